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

//! # Anodos Infra
//!
//! Concrete implementations of the upscaler's external dependencies: a
//! deterministic software backend implementing
//! [`UpscaleBackend`](anodos_core::UpscaleBackend) and a tile-based
//! render-target size quantizer. A production integration replaces these
//! with a vendor SDK wrapper; the sandbox and the integration tests run
//! against the software versions.

pub mod backend;

pub use backend::{SoftwareUpscaleBackend, SoftwareUpscaleState, TileQuantizer};
