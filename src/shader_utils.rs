//! WGSL building blocks for evaluating the particle update on a GPU.
//!
//! These mirror [`crate::noise`] function for function.
//!
//! # Available Functions
//!
//! - `simplex3(v: vec3<f32>) -> f32` - 3D simplex noise, peaks around ±4
//! - `noise_vec3(x: vec3<f32>) -> vec3<f32>` - three decorrelated noise channels
//! - `curl_noise(p: vec3<f32>) -> vec3<f32>` - normalized curl of `noise_vec3`

/// WGSL 3D simplex noise.
pub const SIMPLEX_WGSL: &str = r#"
// Gradient noise helpers
fn mod289_3(x: vec3<f32>) -> vec3<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn mod289_4(x: vec4<f32>) -> vec4<f32> {
    return x - floor(x * (1.0 / 289.0)) * 289.0;
}

fn permute4(x: vec4<f32>) -> vec4<f32> {
    return mod289_4(((x * 34.0) + 1.0) * x);
}

fn taylor_inv_sqrt4(r: vec4<f32>) -> vec4<f32> {
    return 1.79284291400159 - 0.85373472095314 * r;
}

// 3D Simplex noise
fn simplex3(v: vec3<f32>) -> f32 {
    let C = vec2<f32>(1.0 / 6.0, 1.0 / 3.0);
    let D = vec4<f32>(0.0, 0.5, 1.0, 2.0);

    // First corner
    var i = floor(v + dot(v, vec3<f32>(C.y)));
    let x0 = v - i + dot(i, vec3<f32>(C.x));

    // Other corners
    let g = step(x0.yzx, x0.xyz);
    let l = 1.0 - g;
    let i1 = min(g.xyz, l.zxy);
    let i2 = max(g.xyz, l.zxy);

    let x1 = x0 - i1 + C.x;
    let x2 = x0 - i2 + C.y;
    let x3 = x0 - D.yyy;

    // Permutations
    i = mod289_3(i);
    let p = permute4(permute4(permute4(
        i.z + vec4<f32>(0.0, i1.z, i2.z, 1.0))
      + i.y + vec4<f32>(0.0, i1.y, i2.y, 1.0))
      + i.x + vec4<f32>(0.0, i1.x, i2.x, 1.0));

    // Gradients
    let n_ = 0.142857142857;
    let ns = n_ * D.wyz - D.xzx;

    let j = p - 49.0 * floor(p * ns.z * ns.z);

    let x_ = floor(j * ns.z);
    let y_ = floor(j - 7.0 * x_);

    let x = x_ * ns.x + ns.yyyy;
    let y = y_ * ns.x + ns.yyyy;
    let h = 1.0 - abs(x) - abs(y);

    let b0 = vec4<f32>(x.xy, y.xy);
    let b1 = vec4<f32>(x.zw, y.zw);

    let s0 = floor(b0) * 2.0 + 1.0;
    let s1 = floor(b1) * 2.0 + 1.0;
    let sh = -step(h, vec4<f32>(0.0));

    let a0 = b0.xzyw + s0.xzyw * sh.xxyy;
    let a1 = b1.xzyw + s1.xzyw * sh.zzww;

    var p0 = vec3<f32>(a0.xy, h.x);
    var p1 = vec3<f32>(a0.zw, h.y);
    var p2 = vec3<f32>(a1.xy, h.z);
    var p3 = vec3<f32>(a1.zw, h.w);

    // Normalize gradients
    let norm = taylor_inv_sqrt4(vec4<f32>(dot(p0, p0), dot(p1, p1), dot(p2, p2), dot(p3, p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    // Mix final noise value
    var m = max(0.6 - vec4<f32>(dot(x0, x0), dot(x1, x1), dot(x2, x2), dot(x3, x3)), vec4<f32>(0.0));
    m = m * m;
    return 42.0 * dot(m * m, vec4<f32>(dot(p0, x0), dot(p1, x1), dot(p2, x2), dot(p3, x3)));
}
"#;

/// WGSL curl noise built on `simplex3`.
pub const CURL_WGSL: &str = r#"
fn noise_vec3(x: vec3<f32>) -> vec3<f32> {
    let s0 = simplex3(x);
    let s1 = simplex3(vec3<f32>(x.y - 19.1, x.z + 33.4, x.x + 47.2));
    let s2 = simplex3(vec3<f32>(x.z + 74.2, x.x - 124.5, x.y + 99.4));
    return vec3<f32>(s0, s1, s2);
}

fn curl_noise(p: vec3<f32>) -> vec3<f32> {
    let e = 0.1;
    let dx = vec3<f32>(e, 0.0, 0.0);
    let dy = vec3<f32>(0.0, e, 0.0);
    let dz = vec3<f32>(0.0, 0.0, e);

    let p_x0 = noise_vec3(p - dx);
    let p_x1 = noise_vec3(p + dx);
    let p_y0 = noise_vec3(p - dy);
    let p_y1 = noise_vec3(p + dy);
    let p_z0 = noise_vec3(p - dz);
    let p_z1 = noise_vec3(p + dz);

    let cx = p_y1.z - p_y0.z - p_z1.y + p_z0.y;
    let cy = p_z1.x - p_z0.x - p_x1.z + p_x0.z;
    let cz = p_x1.y - p_x0.y - p_y1.x + p_y0.x;

    let curl = vec3<f32>(cx, cy, cz) * (1.0 / (2.0 * e));
    let len = length(curl);
    if len <= 0.0 {
        return vec3<f32>(0.0);
    }
    return curl / len;
}
"#;

/// All noise helpers, in dependency order.
pub fn noise_utils_wgsl() -> String {
    format!("// Noise utilities\n{}\n{}\n", SIMPLEX_WGSL, CURL_WGSL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utils_contain_entry_points() {
        let code = noise_utils_wgsl();
        assert!(code.contains("fn simplex3("));
        assert!(code.contains("fn noise_vec3("));
        assert!(code.contains("fn curl_noise("));
        // Helpers are declared before use.
        assert!(code.find("fn simplex3(").unwrap() < code.find("fn noise_vec3(").unwrap());
    }
}
