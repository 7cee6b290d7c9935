//! Demo for the transform crate.
//! Builds a parent -> child chain from flags and logs the derived quantities.

use anyhow::{Result, bail};
use transform::{
    Mat4, Transform, TransformApplicationOrder, Vec3, angle_between_vectors_is_within,
    create_billboard_transform_for, matrix_is_decomposable, vector_is_within_centered_sector,
};

/// Value of `--name=value`, last occurrence wins.
fn arg_value(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args()
        .filter_map(|arg| arg.strip_prefix(&prefix).map(str::to_owned))
        .last()
}

fn parse_vec3(text: &str) -> Option<Vec3> {
    let parts: Vec<f32> = text
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [s] => Some(Vec3::splat(*s)),
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Accept: --<name>=x,y,z (or a single value splatted to all axes).
fn parse_vec3_arg(name: &str, default: Vec3) -> Vec3 {
    match arg_value(name) {
        None => default,
        Some(val) => parse_vec3(&val).unwrap_or_else(|| {
            log::warn!("Malformed --{name}='{val}', falling back to {default}.");
            default
        }),
    }
}

fn parse_order_arg() -> TransformApplicationOrder {
    // Accept: --order=srt|str
    match arg_value("order").as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("srt") => TransformApplicationOrder::ScaleRotationTranslation,
        Some("str") => TransformApplicationOrder::ScaleTranslationRotation,
        Some(other) => {
            log::warn!("Unknown order '{other}', falling back to srt.");
            TransformApplicationOrder::ScaleRotationTranslation
        }
    }
}

fn log_matrix(label: &str, m: &Mat4) {
    log::info!("{label}:");
    for row in 0..4 {
        let r = m.row(row);
        log::info!("  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]", r.x, r.y, r.z, r.w);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut root = Transform::with_order(
        parse_vec3_arg("translation", Vec3::ZERO),
        parse_vec3_arg("rotation", Vec3::ZERO),
        parse_vec3_arg("scale", Vec3::ONE),
        parse_order_arg(),
    );
    root.set_child(Transform::from_trs(
        parse_vec3_arg("child-translation", Vec3::ZERO),
        Vec3::ZERO,
        Vec3::ONE,
    ));

    log::info!("Root transform ({:?}):\n{root}", root.application_order());
    log_matrix("Local matrix", &root.matrix());
    log_matrix("Full chain matrix", &root.full_matrix());

    let forward = root.compute_forward_vector();
    log::info!(
        "forward={forward} right={} up={}",
        root.compute_right_vector(),
        root.compute_up_vector()
    );
    log::info!(
        "within 1/8 turn of +X: {}, inside a 1/4-turn sector around +X: {}",
        angle_between_vectors_is_within(Vec3::X, forward, 0.125),
        vector_is_within_centered_sector(Vec3::X, forward, 0.25)
    );
    log_matrix("Billboard", &create_billboard_transform_for(&root));

    match root.checked_inverse_transform() {
        Ok(inverse) => log::info!("Inverse transform:\n{inverse}"),
        Err(e) => log::warn!("No inverse: {e}"),
    }

    // Push the collapsed chain back through decomposition.
    let full = root.full_matrix();
    if !matrix_is_decomposable(&full) {
        bail!("chain matrix is not a TRS matrix");
    }
    let mut flattened = Transform::with_order(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, root.application_order());
    flattened.set_transform_matrix(&full)?;
    log::info!("Flattened chain:\n{flattened}");

    Ok(())
}
