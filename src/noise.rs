//! Deterministic 3D simplex noise and the curl-noise field built on it.
//!
//! CPU twin of the WGSL in [`crate::shader_utils`]: same lattice hash,
//! same gradient set, same offsets, so a tick evaluated here and a tick
//! evaluated by the compute shader agree up to float rounding.

use glam::Vec3;

/// Finite-difference step used by [`curl_noise`].
pub const CURL_EPSILON: f32 = 0.1;

#[inline]
fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: f32) -> f32 {
    mod289(((x * 34.0) + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: f32) -> f32 {
    1.792_842_9 - 0.853_734_7 * r
}

/// GLSL `step`: 0 below the edge, 1 at or above it.
#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// 3D simplex noise.
///
/// Not confined to `[-1, 1]`: peaks reach about ±4. [`curl_noise`] only
/// keeps the direction of its differences.
pub fn simplex3(v: Vec3) -> f32 {
    const C_X: f32 = 1.0 / 6.0;
    const C_Y: f32 = 1.0 / 3.0;

    // First corner
    let i = (v + Vec3::splat(v.dot(Vec3::splat(C_Y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // Other corners
    let g = Vec3::new(step(x0.y, x0.x), step(x0.z, x0.y), step(x0.x, x0.z));
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let corners = [
        x0,
        x0 - i1 + Vec3::splat(C_X),
        x0 - i2 + Vec3::splat(C_Y),
        x0 - Vec3::splat(0.5),
    ];
    let offsets = [Vec3::ZERO, i1, i2, Vec3::ONE];

    let i = Vec3::new(mod289(i.x), mod289(i.y), mod289(i.z));

    // Gradients from a 7x7 ring on the octahedron
    let n_ = 0.142_857_14_f32;
    let ns_x = 2.0 * n_;
    let ns_y = 0.5 * n_ - 1.0;
    let ns_z = n_;

    let mut sum = 0.0;
    for (corner, offset) in corners.iter().zip(offsets.iter()) {
        let p = permute(permute(permute(i.z + offset.z) + i.y + offset.y) + i.x + offset.x);

        let j = p - 49.0 * (p * ns_z * ns_z).floor();
        let gx_ = (j * ns_z).floor();
        let gy_ = (j - 7.0 * gx_).floor();

        let gx = gx_ * ns_x + ns_y;
        let gy = gy_ * ns_x + ns_y;
        let h = 1.0 - gx.abs() - gy.abs();

        let sh = -step(h, 0.0);
        let grad = Vec3::new(
            gx + (gx.floor() * 2.0 + 1.0) * sh,
            gy + (gy.floor() * 2.0 + 1.0) * sh,
            h,
        );
        let grad = grad * taylor_inv_sqrt(grad.dot(grad));

        let m = (0.6 - corner.dot(*corner)).max(0.0);
        let m = m * m;
        sum += m * m * grad.dot(*corner);
    }

    42.0 * sum
}

/// Three decorrelated simplex channels sampled around `x`.
pub fn noise_vec3(x: Vec3) -> Vec3 {
    Vec3::new(
        simplex3(x),
        simplex3(Vec3::new(x.y - 19.1, x.z + 33.4, x.x + 47.2)),
        simplex3(Vec3::new(x.z + 74.2, x.x - 124.5, x.y + 99.4)),
    )
}

/// Normalized curl of [`noise_vec3`] at `p`, by central differences.
///
/// Returns zero where the curl vanishes instead of a NaN direction.
pub fn curl_noise(p: Vec3) -> Vec3 {
    let dx = Vec3::new(CURL_EPSILON, 0.0, 0.0);
    let dy = Vec3::new(0.0, CURL_EPSILON, 0.0);
    let dz = Vec3::new(0.0, 0.0, CURL_EPSILON);

    let p_x0 = noise_vec3(p - dx);
    let p_x1 = noise_vec3(p + dx);
    let p_y0 = noise_vec3(p - dy);
    let p_y1 = noise_vec3(p + dy);
    let p_z0 = noise_vec3(p - dz);
    let p_z1 = noise_vec3(p + dz);

    let x = p_y1.z - p_y0.z - p_z1.y + p_z0.y;
    let y = p_z1.x - p_z0.x - p_x1.z + p_x0.z;
    let z = p_x1.y - p_x0.y - p_y1.x + p_y0.x;

    let divisor = 1.0 / (2.0 * CURL_EPSILON);
    (Vec3::new(x, y, z) * divisor).normalize_or_zero()
}
