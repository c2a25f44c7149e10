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

//! Run-time configuration surface of the upscaler.

use super::quality::QualityMode;
use serde::{Deserialize, Serialize};

/// Run-time options controlling the upscaler, owned by the host.
///
/// The host reads these from whatever configuration system it uses and
/// hands a snapshot to the scheduler each frame; the upscaler core never
/// mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleSettings {
    /// Master enable for the whole upscaling subsystem.
    pub enabled: bool,
    /// The quality mode requested by the user. Falls back to
    /// [`QualityMode::Balanced`] when the backend does not support it.
    pub quality: QualityMode,
    /// When `true`, the quality mode is selected automatically from the
    /// output resolution instead of `quality`.
    pub auto_quality: bool,
    /// Softening/sharpening applied by the backend, `-1.0` to `1.0`.
    /// Negative values soften the image, positive values sharpen. Values
    /// outside the range are clamped at dispatch.
    pub sharpness: f32,
    /// When `true`, motion vectors are dilated to output resolution before
    /// the upscale, which can improve the stability of thin details.
    /// When `false`, the low-resolution vectors are passed through as-is.
    pub dilate_motion_vectors: bool,
    /// When `true`, the backend computes its own exposure instead of using
    /// the host-provided exposure texture. Can alleviate ghosting in dark
    /// scenes.
    pub auto_exposure: bool,
    /// Whether the backend should release internal allocations eagerly
    /// when per-view features are destroyed.
    pub release_memory_on_delete: bool,
}

impl Default for UpscaleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            quality: QualityMode::Performance,
            auto_quality: false,
            sharpness: 0.0,
            dilate_motion_vectors: true,
            auto_exposure: false,
            release_memory_on_delete: true,
        }
    }
}
