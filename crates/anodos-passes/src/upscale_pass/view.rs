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

//! Per-frame view description handed to the scheduler.

use anodos_core::math::Vec2;
use anodos_core::upscale::history::{UpscaleHistory, ViewUpscaleState};
use anodos_core::upscale::quality::QualityMode;
use std::sync::Arc;

/// Everything the scheduler needs to know about one view for one frame.
///
/// Built fresh each frame by the renderer. `prev_history` is a snapshot of
/// the history produced by the previous frame; `persisted` is the slot the
/// *current* frame's history will be written into. Keeping the two apart is
/// what lets a reader of last frame's container never observe the
/// replacement happening.
#[derive(Debug)]
pub struct UpscaleView<'a> {
    /// The view's persisted history slot, or `None` when the view keeps no
    /// state across frames (and therefore cannot accumulate).
    pub persisted: Option<&'a mut ViewUpscaleState>,
    /// The previous frame's history container, if any.
    pub prev_history: Option<Arc<UpscaleHistory>>,
    /// Set by the renderer on a scene discontinuity: temporal accumulation
    /// must be discarded this frame.
    pub camera_cut: bool,
    /// When `true`, this frame must not replace the persisted history
    /// (e.g. a scene capture re-rendering with frozen state).
    pub history_read_only: bool,
    /// Whether the renderer configured this view for temporal upscaling.
    /// The scheduler refuses to run on a view that was not.
    pub temporal_upscale_configured: bool,
    /// The quality mode the view was configured with.
    pub configured_mode: Option<QualityMode>,
    /// The resolution fraction driving this view's render size, if a
    /// screen-percentage driver already set one.
    pub resolution_fraction: Option<f32>,
    /// Sub-pixel temporal jitter applied to this frame's projection.
    pub jitter_offset: Vec2,
    /// Wall-clock seconds since the previous frame.
    pub delta_time: f32,
    /// Exposure scale already applied to the scene color input.
    pub pre_exposure: f32,
}

impl<'a> UpscaleView<'a> {
    /// Creates a view for this frame, snapshotting the previous frame's
    /// history out of the persisted slot.
    pub fn new(persisted: Option<&'a mut ViewUpscaleState>) -> Self {
        let prev_history = persisted
            .as_ref()
            .and_then(|state| state.history.clone());
        Self {
            persisted,
            prev_history,
            camera_cut: false,
            history_read_only: false,
            temporal_upscale_configured: false,
            configured_mode: None,
            resolution_fraction: None,
            jitter_offset: Vec2::ZERO,
            delta_time: 1.0 / 60.0,
            pre_exposure: 1.0,
        }
    }
}
