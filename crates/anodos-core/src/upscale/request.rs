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

//! Per-frame input, output and request value types.

use super::backend::SceneTexture;
use super::quality::QualityMode;
use crate::math::{Extent2D, IntRect, Vec2};

/// The textures and view rectangles the renderer hands to the upscale pass
/// for one frame.
#[derive(Debug, Clone, Copy)]
pub struct UpscalePassInputs {
    /// The region of the input textures that was rendered this frame.
    pub input_view_rect: IntRect,
    /// The region of the output the upscaler must fill. Its origin must be
    /// (0, 0); anything else is a fatal integration error.
    pub output_view_rect: IntRect,
    /// Low-resolution scene color.
    pub color: SceneTexture,
    /// Low-resolution scene depth.
    pub depth: SceneTexture,
    /// Low-resolution object velocity.
    pub velocity: SceneTexture,
    /// The host-computed exposure texture.
    pub exposure: SceneTexture,
}

/// What the upscale pass returns to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct UpscalePassOutputs {
    /// The upscaled scene color target.
    pub color: SceneTexture,
    /// The region of `color` that holds valid pixels this frame.
    pub view_rect: IntRect,
}

/// A fully-formed upscale request, assembled by the scheduler and executed
/// by the backend in command stream order.
#[derive(Debug, Clone)]
pub struct UpscaleExecuteArgs {
    /// The quality mode this request was scheduled under.
    pub quality: QualityMode,
    /// Source region inside the input textures.
    pub src_rect: IntRect,
    /// Destination region inside the output texture.
    pub dest_rect: IntRect,
    /// Sharpening strength, already clamped to `[-1.0, 1.0]`.
    pub sharpness: f32,
    /// When `true`, the backend discards its temporal accumulation for
    /// this frame (camera cut).
    pub reset: bool,
    /// Sub-pixel temporal jitter applied to this frame's projection.
    pub jitter_offset: Vec2,
    /// Scale applied to sampled motion vectors. The scheduler always
    /// submits 1:1; vectors are expected pre-scaled by the velocity
    /// combine stage.
    pub motion_vector_scale: Vec2,
    /// Whether `input_velocity` is at output (dilated) rather than input
    /// resolution.
    pub high_resolution_motion_vectors: bool,
    /// Wall-clock seconds since the previous frame.
    pub delta_time: f32,
    /// Exposure scale already applied to the input color.
    pub pre_exposure: f32,
    /// When `true`, the backend computes exposure internally and
    /// `input_exposure` is ignored.
    pub use_auto_exposure: bool,
    /// Whether backend-internal memory is released eagerly when the
    /// per-view feature is destroyed.
    pub release_memory_on_delete: bool,
    /// Low-resolution scene color input.
    pub input_color: SceneTexture,
    /// Low-resolution scene depth input.
    pub input_depth: SceneTexture,
    /// Combined (and possibly dilated) motion vectors.
    pub input_velocity: SceneTexture,
    /// Host-computed exposure texture.
    pub input_exposure: SceneTexture,
    /// The output color target.
    pub output_color: SceneTexture,
}

/// A request to merge depth-derived camera motion with the object velocity
/// texture ahead of the upscale dispatch.
#[derive(Debug, Clone)]
pub struct VelocityCombineArgs {
    /// Region of the input depth/velocity textures to read.
    pub input_rect: IntRect,
    /// Region of `output` to write. Matches `input_rect` when not
    /// dilating, or the upscale destination when dilating.
    pub output_rect: IntRect,
    /// Scene depth, used to reconstruct camera motion.
    pub depth: SceneTexture,
    /// Object velocity as rendered.
    pub velocity: SceneTexture,
    /// The combined velocity target.
    pub output: SceneTexture,
    /// Whether vectors are dilated to output resolution.
    pub dilate: bool,
}

impl UpscalePassInputs {
    /// Computes the extent of the output texture for this frame.
    ///
    /// The output must be able to hold both the quantized requested
    /// viewport and the input texture itself, so the result is the
    /// component-wise max of the two.
    pub fn output_extent(&self, quantized_view_size: Extent2D) -> Extent2D {
        self.color.extent.max(quantized_view_size)
    }
}
