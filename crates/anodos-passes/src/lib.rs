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

//! # Anodos Passes
//!
//! Hot-path scheduling for the Anodos temporal upscaler: the per-frame pass
//! scheduler, the quality-mode policy and auto selection, the per-mode
//! instance pool, and the owned [`UpscalerContext`] that ties their
//! lifecycles together.
//!
//! [`UpscalerContext`]: upscale_pass::UpscalerContext

pub mod upscale_pass;

pub use upscale_pass::{
    AutoQualitySelector, QualityModePolicy, UpscalePassScheduler, UpscaleView, UpscalerContext,
    UpscalerInitError, UpscalerInstancePool,
};
