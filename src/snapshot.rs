//! Headless preview: splat the particles into an image from the current
//! camera and write it as a PNG.
//!
//! Points are drawn as small squares with additive blending on a black
//! background, so dense regions of the flow saturate toward the ramp's
//! brightest colors. A point at depth `d` covers
//! `particle_size * height / 2 / d` pixels, never less than one.
//!
//! Each splat is weighted by `alpha` (0.3 by default). The live sketch draws
//! its points at full alpha, so snapshots come out dimmer than the sketch
//! unless `render.alpha` is set to 1.

use std::path::Path;

use glam::Vec3;
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::camera::Camera;
use crate::color::ColorRamp;
use crate::config::RenderSettings;
use crate::error::SnapshotError;

/// Viewport and blending parameters for a snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotOptions {
    pub width: u32,
    pub height: u32,
    /// Per-particle alpha multiplier.
    pub alpha: f32,
    /// Point size at unit depth, in half viewport heights.
    pub particle_size: f32,
}

impl From<&RenderSettings> for SnapshotOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            alpha: settings.alpha,
            particle_size: settings.particle_size,
        }
    }
}

impl SnapshotOptions {
    /// Point edge length in whole pixels at view depth `depth`, never below one.
    fn point_pixels(&self, depth: f32) -> i64 {
        let scale = self.height as f32 * 0.5;
        ((self.particle_size * scale / depth).round() as i64).max(1)
    }
}

/// Render `positions` as seen by `camera`.
///
/// `intensities[i]` picks the color of particle `i` from `ramp`. Particles
/// outside the view frustum are skipped.
pub fn render_points(
    positions: &[Vec3],
    intensities: &[f32],
    ramp: &ColorRamp,
    camera: &Camera,
    options: &SnapshotOptions,
) -> Result<RgbaImage, SnapshotError> {
    let (width, height) = (options.width, options.height);
    if width == 0 || height == 0 {
        return Err(SnapshotError::EmptyViewport);
    }

    let view_proj = camera.view_projection(width as f32 / height as f32);
    let mut accum = vec![[0.0f32; 3]; width as usize * height as usize];

    for (position, intensity) in positions.iter().zip(intensities) {
        let clip = view_proj * position.extend(1.0);
        if clip.w <= 0.0 {
            continue;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
            continue;
        }

        let px = ((ndc.x * 0.5 + 0.5) * width as f32).floor() as i64;
        let py = ((0.5 - ndc.y * 0.5) * height as f32).floor() as i64;
        // Perspective clip w is the view depth.
        let size = options.point_pixels(clip.w);
        let half = size / 2;
        let color = ramp.sample(*intensity);
        let weight = color[3] * options.alpha;

        for y in (py - half)..(py - half + size) {
            if y < 0 || y >= height as i64 {
                continue;
            }
            for x in (px - half)..(px - half + size) {
                if x < 0 || x >= width as i64 {
                    continue;
                }
                let texel = &mut accum[y as usize * width as usize + x as usize];
                texel[0] += color[0] * weight;
                texel[1] += color[1] * weight;
                texel[2] += color[2] * weight;
            }
        }
    }

    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let texel = accum[y as usize * width as usize + x as usize];
        Rgba([to_byte(texel[0]), to_byte(texel[1]), to_byte(texel[2]), 255])
    }))
}

/// Render and write a PNG to `path`.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    positions: &[Vec3],
    intensities: &[f32],
    ramp: &ColorRamp,
    camera: &Camera,
    options: &SnapshotOptions,
) -> Result<(), SnapshotError> {
    let image = render_points(positions, intensities, ramp, camera, options)?;
    image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    info!(
        path = %path.as_ref().display(),
        width = options.width,
        height = options.height,
        "snapshot written"
    );
    Ok(())
}
