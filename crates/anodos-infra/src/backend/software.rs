// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A deterministic CPU reference backend.
//!
//! Stands in for a vendor inference SDK in tests and the sandbox: textures
//! are plain RGBA float buffers, the "upscale" is a nearest-neighbor
//! resample, and the per-view state counts accumulated frames so camera
//! cut behavior is observable from the outside.

use anodos_core::math::Extent2D;
use anodos_core::upscale::quality::{OptimalSettings, QualityMode};
use anodos_core::{
    SceneTexture, TextureId, UpscaleBackend, UpscaleError, UpscaleExecuteArgs, UpscaleStateRef,
    VelocityCombineArgs,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// The modes the software backend reports as supported by default.
/// UltraQuality is left unsupported to mirror common vendor runtimes.
const DEFAULT_SUPPORTED: [QualityMode; 4] = [
    QualityMode::UltraPerformance,
    QualityMode::Performance,
    QualityMode::Balanced,
    QualityMode::Quality,
];

/// The software backend's per-view temporal state.
///
/// Downcast target for the opaque state blob; exposes how many frames have
/// accumulated since the last reset so tests can observe cut handling.
#[derive(Debug, Default)]
pub struct SoftwareUpscaleState {
    /// Frames accumulated since creation or the last camera cut.
    pub accumulated_frames: AtomicU32,
}

#[derive(Clone)]
struct SoftwareTexture {
    extent: Extent2D,
    pixels: Vec<[f32; 4]>,
}

impl SoftwareTexture {
    fn new(extent: Extent2D) -> Self {
        Self {
            extent,
            pixels: vec![[0.0; 4]; extent.pixel_count() as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.extent.width + x) as usize
    }
}

/// A CPU implementation of [`UpscaleBackend`].
pub struct SoftwareUpscaleBackend {
    table: [OptimalSettings; QualityMode::COUNT],
    textures: Mutex<HashMap<usize, SoftwareTexture>>,
    next_texture: AtomicUsize,
    executed_requests: AtomicU32,
    velocity_combines: AtomicU32,
    pool_ticks: AtomicU32,
}

impl fmt::Debug for SoftwareUpscaleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareUpscaleBackend")
            .field(
                "textures",
                &self.textures.lock().map(|t| t.len()).unwrap_or(0),
            )
            .field(
                "executed_requests",
                &self.executed_requests.load(Ordering::Relaxed),
            )
            .field("pool_ticks", &self.pool_ticks.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for SoftwareUpscaleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareUpscaleBackend {
    /// Creates a backend with the default supported mode set.
    pub fn new() -> Self {
        Self::with_supported_modes(&DEFAULT_SUPPORTED)
    }

    /// Creates a backend reporting exactly `supported` as its supported
    /// modes, for exercising fallback and availability branches.
    pub fn with_supported_modes(supported: &[QualityMode]) -> Self {
        let mut table = [OptimalSettings::default(); QualityMode::COUNT];
        for mode in QualityMode::ALL {
            let (optimal, min, max) = match mode {
                // Fixed fraction: one third on each axis, not adjustable.
                QualityMode::UltraPerformance => (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
                QualityMode::Performance => (0.5, 0.5, 0.58),
                QualityMode::Balanced => (0.58, 0.5, 0.667),
                QualityMode::Quality => (0.667, 0.58, 0.77),
                QualityMode::UltraQuality => (0.77, 0.667, 0.87),
            };
            table[mode.index()] = OptimalSettings {
                is_supported: supported.contains(&mode),
                optimal_fraction: optimal,
                min_fraction: min,
                max_fraction: max,
                sharpness: 0.0,
            };
        }
        Self {
            table,
            textures: Mutex::new(HashMap::new()),
            next_texture: AtomicUsize::new(1),
            executed_requests: AtomicU32::new(0),
            velocity_combines: AtomicU32::new(0),
            pool_ticks: AtomicU32::new(0),
        }
    }

    /// Fills every pixel of a texture with `value`.
    pub fn fill_texture(&self, texture: SceneTexture, value: [f32; 4]) -> Result<(), UpscaleError> {
        let mut textures = self.textures.lock().expect("texture registry poisoned");
        let entry = textures
            .get_mut(&texture.id.0)
            .ok_or(UpscaleError::InvalidHandle)?;
        entry.pixels.fill(value);
        Ok(())
    }

    /// Reads one pixel back, or `None` when the handle or coordinates are
    /// out of range.
    pub fn texture_pixel(&self, texture: SceneTexture, x: u32, y: u32) -> Option<[f32; 4]> {
        let textures = self.textures.lock().expect("texture registry poisoned");
        let entry = textures.get(&texture.id.0)?;
        if x >= entry.extent.width || y >= entry.extent.height {
            return None;
        }
        Some(entry.pixels[entry.index(x, y)])
    }

    /// How many upscale requests have been executed.
    pub fn executed_requests(&self) -> u32 {
        self.executed_requests.load(Ordering::Relaxed)
    }

    /// How many velocity combine passes have been executed.
    pub fn velocity_combines(&self) -> u32 {
        self.velocity_combines.load(Ordering::Relaxed)
    }

    /// How many times the resource pool has been ticked.
    pub fn pool_ticks(&self) -> u32 {
        self.pool_ticks.load(Ordering::Relaxed)
    }
}

impl UpscaleBackend for SoftwareUpscaleBackend {
    fn optimal_settings(&self, mode: QualityMode) -> Result<OptimalSettings, UpscaleError> {
        Ok(self.table[mode.index()])
    }

    fn create_texture(&self, label: &str, extent: Extent2D) -> SceneTexture {
        let id = self.next_texture.fetch_add(1, Ordering::Relaxed);
        self.textures
            .lock()
            .expect("texture registry poisoned")
            .insert(id, SoftwareTexture::new(extent));
        log::trace!("Created texture '{label}' #{id} at {}x{}", extent.width, extent.height);
        SceneTexture {
            id: TextureId(id),
            extent,
        }
    }

    fn create_state(&self) -> UpscaleStateRef {
        Arc::new(SoftwareUpscaleState::default())
    }

    fn execute(
        &self,
        args: &UpscaleExecuteArgs,
        state: &UpscaleStateRef,
    ) -> Result<(), UpscaleError> {
        let state = state
            .downcast_ref::<SoftwareUpscaleState>()
            .ok_or_else(|| {
                UpscaleError::BackendFailure("foreign state blob passed to software backend".into())
            })?;

        if args.reset {
            state.accumulated_frames.store(0, Ordering::Relaxed);
        }
        state.accumulated_frames.fetch_add(1, Ordering::Relaxed);

        let mut textures = self.textures.lock().expect("texture registry poisoned");
        for required in [args.input_depth, args.input_velocity, args.input_exposure] {
            if !textures.contains_key(&required.id.0) {
                return Err(UpscaleError::InvalidHandle);
            }
        }
        let input = textures
            .get(&args.input_color.id.0)
            .ok_or(UpscaleError::InvalidHandle)?
            .clone();
        let output = textures
            .get_mut(&args.output_color.id.0)
            .ok_or(UpscaleError::InvalidHandle)?;

        let src = args.src_rect;
        let dest = args.dest_rect;
        if dest.is_empty() || src.is_empty() {
            return Ok(());
        }

        for dy in 0..dest.height().min(output.extent.height) {
            let sy = (src.origin.y + dy * src.height() / dest.height())
                .min(input.extent.height.saturating_sub(1));
            for dx in 0..dest.width().min(output.extent.width) {
                let sx = (src.origin.x + dx * src.width() / dest.width())
                    .min(input.extent.width.saturating_sub(1));
                let value = input.pixels[input.index(sx, sy)];
                let index = output.index(dest.origin.x + dx, dest.origin.y + dy);
                output.pixels[index] = value;
            }
        }

        self.executed_requests.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn combine_velocity(&self, args: &VelocityCombineArgs) -> Result<(), UpscaleError> {
        let mut textures = self.textures.lock().expect("texture registry poisoned");
        if !textures.contains_key(&args.depth.id.0) {
            return Err(UpscaleError::InvalidHandle);
        }
        let velocity = textures
            .get(&args.velocity.id.0)
            .ok_or(UpscaleError::InvalidHandle)?
            .clone();
        let output = textures
            .get_mut(&args.output.id.0)
            .ok_or(UpscaleError::InvalidHandle)?;

        let src = args.input_rect;
        let dest = args.output_rect;
        if dest.is_empty() || src.is_empty() {
            return Ok(());
        }

        for dy in 0..dest.height().min(output.extent.height) {
            let sy = (src.origin.y + dy * src.height() / dest.height())
                .min(velocity.extent.height.saturating_sub(1));
            for dx in 0..dest.width().min(output.extent.width) {
                let sx = (src.origin.x + dx * src.width() / dest.width())
                    .min(velocity.extent.width.saturating_sub(1));
                let value = velocity.pixels[velocity.index(sx, sy)];
                let index = output.index(dest.origin.x + dx, dest.origin.y + dy);
                output.pixels[index] = value;
            }
        }

        self.velocity_combines.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn tick_pool_elements(&self) {
        self.pool_ticks.fetch_add(1, Ordering::Relaxed);
    }
}
