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

//! Temporal history carried from one frame of a view to the next.

use super::backend::{SceneTexture, UpscaleStateRef};
use crate::math::{Extent2D, IntRect};
use std::fmt;
use std::sync::Arc;

/// One frame's worth of temporal history for a single view.
///
/// A container is immutable once built. Each frame that is allowed to
/// write history constructs a *new* container and swaps it into the view's
/// persisted slot; the previous frame's container stays valid for any
/// reader still holding it. The opaque backend `state` is the only part
/// shared across containers: it is cloned from the prior frame (or created
/// fresh on a view's first upscaled frame) so the backend sees one
/// continuous temporal stream.
pub struct UpscaleHistory {
    /// The backend's opaque accumulated state for this view.
    pub state: UpscaleStateRef,
    /// Last frame's upscaled color output.
    pub output_color: SceneTexture,
    /// Last frame's low-resolution color input.
    pub input_color: SceneTexture,
    /// Last frame's low-resolution depth input.
    pub input_depth: SceneTexture,
    /// Last frame's combined velocity input.
    pub input_velocity: SceneTexture,
    /// The output viewport rectangle the history was produced for.
    pub viewport_rect: IntRect,
    /// The extent of the output texture the history was produced into.
    pub reference_buffer_size: Extent2D,
}

impl fmt::Debug for UpscaleHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpscaleHistory")
            .field("state", &"UpscaleState(...)")
            .field("output_color", &self.output_color)
            .field("input_color", &self.input_color)
            .field("input_depth", &self.input_depth)
            .field("input_velocity", &self.input_velocity)
            .field("viewport_rect", &self.viewport_rect)
            .field("reference_buffer_size", &self.reference_buffer_size)
            .finish()
    }
}

/// The per-view persisted slot the renderer keeps between frames.
///
/// Owned by the caller's view state; the scheduler reads the previous
/// frame's container out of it and, when history is writable, replaces it
/// wholesale at the end of the pass.
#[derive(Debug, Default)]
pub struct ViewUpscaleState {
    /// The most recent history container, if any frame has produced one.
    pub history: Option<Arc<UpscaleHistory>>,
}

impl ViewUpscaleState {
    /// Creates an empty slot with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prior frame's history is available.
    #[inline]
    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }
}
