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

//! The contract fulfilled by a concrete upscale inference backend.

use super::quality::{OptimalSettings, QualityMode};
use super::request::{UpscaleExecuteArgs, VelocityCombineArgs};
use crate::error::UpscaleError;
use crate::math::Extent2D;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque handle to a GPU texture resource owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// A texture handle paired with the extent it was created with.
///
/// The scheduler never reads texel data; it only needs the extent to size
/// output targets and validate view rectangles, so the pair travels
/// together through pass inputs and requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneTexture {
    /// The opaque resource handle.
    pub id: TextureId,
    /// The full extent of the underlying texture.
    pub extent: Extent2D,
}

/// Shared-ownership handle to the backend's opaque per-view temporal state.
///
/// The blob is created by [`UpscaleBackend::create_state`] on a view's
/// first upscaled frame, carried inside the view's [`UpscaleHistory`]
/// container, and handed back to the backend on every subsequent frame.
/// Only the backend knows what is inside; callers share and replace the
/// handle, never inspect it.
///
/// [`UpscaleHistory`]: super::history::UpscaleHistory
pub type UpscaleStateRef = Arc<dyn Any + Send + Sync>;

/// The external inference backend consumed by the upscale scheduler.
///
/// Implementations wrap a vendor SDK (or, in `anodos-infra`, a
/// deterministic software reference). All GPU work is issued through
/// [`execute`](Self::execute) and
/// [`combine_velocity`](Self::combine_velocity) in command stream order;
/// completion is asynchronous and never awaited by the scheduler.
pub trait UpscaleBackend: fmt::Debug + Send + Sync {
    /// Reports the per-mode settings the backend supports at runtime.
    ///
    /// Called once per mode while the settings table is built at context
    /// creation. A mode the backend cannot run is reported with
    /// `is_supported == false`, not as an error; `Err` is reserved for
    /// enumeration itself failing.
    fn optimal_settings(&self, mode: QualityMode) -> Result<OptimalSettings, UpscaleError>;

    /// Creates a texture the upscaler can write to, e.g. the output color
    /// target or the combined velocity buffer.
    fn create_texture(&self, label: &str, extent: Extent2D) -> SceneTexture;

    /// Creates a fresh, empty per-view temporal state blob.
    fn create_state(&self) -> UpscaleStateRef;

    /// Executes one upscale request against the given temporal state.
    ///
    /// Fire-and-forget with respect to the scheduler: the call enqueues
    /// GPU work and returns; resource lifetime across the asynchronous
    /// completion is guaranteed by the surrounding queue discipline.
    fn execute(&self, args: &UpscaleExecuteArgs, state: &UpscaleStateRef)
        -> Result<(), UpscaleError>;

    /// Merges depth-derived camera motion with the object velocity texture,
    /// optionally dilating to output resolution.
    fn combine_velocity(&self, args: &VelocityCombineArgs) -> Result<(), UpscaleError>;

    /// Gives the backend's internal resource pool a chance to release or
    /// cycle allocations tied to finished frames. Invoked once per frame
    /// whether or not an upscale pass ran.
    fn tick_pool_elements(&self);
}

/// Rounds a requested render-target size up to the platform's allowed
/// granularity.
///
/// The exact granularity is a platform concern; the scheduler only relies
/// on `quantize(e) >= e` component-wise.
pub trait BufferSizeQuantizer: fmt::Debug + Send + Sync {
    /// Returns the smallest allowed render-target extent covering
    /// `requested`.
    fn quantize(&self, requested: Extent2D) -> Extent2D;
}
