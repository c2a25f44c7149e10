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

//! Upscale pass scheduling - hot path of the temporal upscaler.
//!
//! A frame flows through here as Validate, ComputeExtent, ResolveHistory,
//! Dispatch, ExtractHistory, Done. None of that sequence persists between
//! frames; the only state carried forward is the view's
//! `UpscaleHistory` container, and the only long-lived objects are the
//! per-mode scheduler instances pooled by the [`UpscalerContext`].

mod auto_quality;
mod context;
mod policy;
mod pool;
mod scheduler;
mod view;

pub use auto_quality::AutoQualitySelector;
pub use context::{UpscalerContext, UpscalerInitError};
pub use policy::QualityModePolicy;
pub use pool::UpscalerInstancePool;
pub use scheduler::UpscalePassScheduler;
pub use view::UpscaleView;
