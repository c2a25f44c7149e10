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

//! Error types for the upscaling subsystem.
//!
//! Only genuinely runtime-recoverable conditions travel as errors here.
//! Precondition violations — a non-zero output rect origin, querying an
//! unsupported quality mode, using a context after shutdown — indicate a
//! misconfigured integration and are raised as panics at the call site
//! instead.

use std::fmt;

/// An error reported by an upscale backend or by command stream execution.
#[derive(Debug)]
pub enum UpscaleError {
    /// The backend has not been initialized, or was torn down before use.
    NotInitialized,
    /// A texture handle passed to the backend did not resolve to a live
    /// resource.
    InvalidHandle,
    /// The backend failed while enumerating settings or executing a request.
    BackendFailure(String),
}

impl fmt::Display for UpscaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpscaleError::NotInitialized => {
                write!(f, "The upscale backend is not initialized.")
            }
            UpscaleError::InvalidHandle => {
                write!(f, "Invalid texture handle passed to the upscale backend.")
            }
            UpscaleError::BackendFailure(msg) => {
                write!(f, "Upscale backend operation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for UpscaleError {}
