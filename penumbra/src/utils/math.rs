use nalgebra::{Matrix4, Orthographic3, Vector3};
use penumbra_utils::finite_or;

#[rustfmt::skip]
pub const MATRIX4_ID: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
);

/// Number of distinguishable intensity levels per color channel, used to
/// find the distance at which a light's contribution drops below one level.
pub const COLOR_DEPTH: f32 = 256.0;

/// Maps clip space coordinates in `[-1, 1]` to texture space `[0, 1]`.
///
/// ```text
/// [ 0.5 0.0 0.0 0.5 ]
/// [ 0.0 0.5 0.0 0.5 ]
/// [ 0.0 0.0 0.5 0.5 ]
/// [ 0.0 0.0 0.0 1.0 ]
/// ```
pub fn bias_matrix() -> Matrix4<f32> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(0.5, 0.5, 0.5))
        * Matrix4::new_translation(&Vector3::new(1.0, 1.0, 1.0))
}

/// Collapses every position onto the origin. Used as the light matrix of
/// lights without a shadow map.
pub fn zero_scale_matrix() -> Matrix4<f32> {
    Matrix4::new_nonuniform_scaling(&Vector3::zeros())
}

/// Left-handed perspective projection (`+Z` forward, `w = z`).
pub fn perspective_lh(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Matrix4<f32> {
    let tan_half_fov = (fov / 2.0).tan();
    let z_range = z_near - z_far;

    let mut m = Matrix4::zeros();
    m[(0, 0)] = 1.0 / (tan_half_fov * aspect);
    m[(1, 1)] = 1.0 / tan_half_fov;
    m[(2, 2)] = (-z_near - z_far) / z_range;
    m[(2, 3)] = 2.0 * z_far * z_near / z_range;
    m[(3, 2)] = 1.0;
    m
}

pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    z_near: f32,
    z_far: f32,
) -> Matrix4<f32> {
    Orthographic3::new(left, right, bottom, top, z_near, z_far).to_homogeneous()
}

/// Distance at which an attenuated light falls below one color level.
///
/// Solves `exponent * d² + linear * d + constant = COLOR_DEPTH * intensity * max_channel`.
/// Returns `f32::INFINITY` when the attenuation never reaches that threshold.
pub fn attenuation_range(
    constant: f32,
    linear: f32,
    exponent: f32,
    intensity: f32,
    max_channel: f32,
) -> f32 {
    let a = exponent;
    let b = linear;
    let c = constant - COLOR_DEPTH * intensity * max_channel;

    if a.abs() <= f32::EPSILON {
        if b <= f32::EPSILON {
            return f32::INFINITY;
        }
        return (-c / b).max(0.0);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return 0.0;
    }

    finite_or((-b + discriminant.sqrt()) / (2.0 * a), f32::INFINITY).max(0.0)
}

/// Rounds `value` down to the closest multiple of `step`.
pub fn snap_down(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    step * (value / step).floor()
}
