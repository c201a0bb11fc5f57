//! GPU boundary: texel layout and the WGSL tick kernel.
//!
//! A bulk-parallel evaluator runs the same per-particle update as
//! [`ParticleField::tick`](crate::field::ParticleField::tick) in two passes
//! over a `side × side` grid:
//!
//! 1. `update_velocity` reads the current positions and writes velocities.
//! 2. `update_position` reads both and writes the next positions.
//!
//! The caller swaps the two position buffers afterwards.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::field::{ParticleField, DAMPING};
use crate::shader_utils::noise_utils_wgsl;

/// Workgroup size of the tick kernel.
pub const WORKGROUP_SIZE: u32 = 256;

/// One RGBA float texel of the position or velocity texture.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PositionTexel {
    pub xyz: [f32; 3],
    /// Always 1.
    pub w: f32,
}

impl PositionTexel {
    pub fn new(v: Vec3) -> Self {
        Self {
            xyz: v.to_array(),
            w: 1.0,
        }
    }

    pub fn vec3(&self) -> Vec3 {
        Vec3::from_array(self.xyz)
    }
}

/// Uniforms read by both passes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TickUniforms {
    pub step_size: f32,
    pub count: u32,
    pub damping: f32,
    pub _padding: f32,
}

impl TickUniforms {
    /// Uniforms matching the field's current step and size.
    pub fn for_field(field: &ParticleField) -> Self {
        Self {
            step_size: field.step(),
            count: field.count() as u32,
            damping: DAMPING,
            _padding: 0.0,
        }
    }
}

impl ParticleField {
    /// Current positions as texels, in grid order.
    pub fn position_texels(&self) -> Vec<PositionTexel> {
        self.positions().iter().copied().map(PositionTexel::new).collect()
    }

    /// Last computed velocities as texels, in grid order.
    pub fn velocity_texels(&self) -> Vec<PositionTexel> {
        self.velocities().iter().copied().map(PositionTexel::new).collect()
    }
}

/// Raw bytes of a texel slice, ready for a buffer upload.
pub fn texel_bytes(texels: &[PositionTexel]) -> &[u8] {
    bytemuck::cast_slice(texels)
}

/// Number of workgroups needed to cover `count` particles.
pub fn workgroup_count(count: u32) -> u32 {
    count.div_ceil(WORKGROUP_SIZE)
}

/// Generate the tick compute module.
pub fn tick_shader() -> String {
    let utils = noise_utils_wgsl();
    format!(
        r#"struct Texel {{
    xyz: vec3<f32>,
    w: f32,
}};

struct TickUniforms {{
    step_size: f32,
    count: u32,
    damping: f32,
    _padding: f32,
}};

@group(0) @binding(0)
var<storage, read> positions_in: array<Texel>;

@group(0) @binding(1)
var<storage, read_write> velocities: array<Texel>;

@group(0) @binding(2)
var<storage, read_write> positions_out: array<Texel>;

@group(0) @binding(3)
var<uniform> uniforms: TickUniforms;

{utils}

@compute @workgroup_size({workgroup_size})
fn update_velocity(@builtin(global_invocation_id) global_id: vec3<u32>) {{
    let index = global_id.x;
    if index >= uniforms.count {{
        return;
    }}

    let position = positions_in[index].xyz;
    let velocity = curl_noise(position) - uniforms.damping * position;
    velocities[index] = Texel(velocity, 1.0);
}}

@compute @workgroup_size({workgroup_size})
fn update_position(@builtin(global_invocation_id) global_id: vec3<u32>) {{
    let index = global_id.x;
    if index >= uniforms.count {{
        return;
    }}

    let position = positions_in[index].xyz;
    let offset = uniforms.step_size * velocities[index].xyz;
    positions_out[index] = Texel(position + offset, 1.0);
}}
"#,
        utils = utils,
        workgroup_size = WORKGROUP_SIZE,
    )
}
