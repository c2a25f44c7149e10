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

//! # Anodos Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the Anodos temporal upscaler.
//!
//! This crate defines the "common language" of the upscaling subsystem: the
//! quality-mode data model, the [`UpscaleBackend`] contract fulfilled by a
//! concrete inference backend, the per-frame command stream, and the history
//! state carried from frame to frame. The hot-path scheduling logic lives in
//! `anodos-passes`, and concrete backend implementations live in
//! `anodos-infra`.

#![warn(missing_docs)]

pub mod error;
pub mod math;
pub mod upscale;

pub use error::UpscaleError;
pub use upscale::{
    BufferSizeQuantizer, FrameCommandStream, OptimalSettings, QualityMode, SceneTexture,
    TextureId, UpscaleBackend, UpscaleCommand, UpscaleExecuteArgs, UpscaleHistory,
    UpscalePassInputs, UpscalePassOutputs, UpscaleSettings, UpscaleStateRef,
    VelocityCombineArgs, ViewUpscaleState,
};
