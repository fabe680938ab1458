//! Math type re-exports.
//!
//! Scene placement and camera state are double precision, matching the
//! source toolkit.

pub use glam::{DVec2, DVec3, DVec4, Vec3};

/// Euclidean norm of one tuple.
#[inline]
pub fn magnitude(tuple: impl IntoIterator<Item = f64>) -> f64 {
    tuple.into_iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Convert HSV (all components in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> DVec3 {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => DVec3::new(v, t, p),
        1 => DVec3::new(q, v, p),
        2 => DVec3::new(p, v, t),
        3 => DVec3::new(p, q, v),
        4 => DVec3::new(t, p, v),
        _ => DVec3::new(v, p, q),
    }
}
