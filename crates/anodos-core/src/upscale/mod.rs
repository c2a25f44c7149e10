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

//! Public contracts of the temporal upscaling subsystem.
//!
//! This module defines the "what" of upscaling: the quality-mode data model,
//! the [`UpscaleBackend`] trait a concrete inference backend implements, the
//! per-frame [`FrameCommandStream`] that carries fully-formed requests in
//! submission order, and the [`UpscaleHistory`] state shared between
//! consecutive frames of a view. The "how" — scheduling, mode policy, per
//! view instance pooling — lives in the `anodos-passes` crate, and concrete
//! backends live in `anodos-infra`.

pub mod backend;
pub mod command;
pub mod history;
pub mod quality;
pub mod request;
pub mod settings;

pub use self::backend::{
    BufferSizeQuantizer, SceneTexture, TextureId, UpscaleBackend, UpscaleStateRef,
};
pub use self::command::{FrameCommandStream, UpscaleCommand};
pub use self::history::{UpscaleHistory, ViewUpscaleState};
pub use self::quality::{GlobalResolutionBounds, OptimalSettings, QualityMode};
pub use self::request::{
    UpscaleExecuteArgs, UpscalePassInputs, UpscalePassOutputs, VelocityCombineArgs,
};
pub use self::settings::UpscaleSettings;
