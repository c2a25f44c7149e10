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

//! The ordered per-frame command stream.

use super::backend::{UpscaleBackend, UpscaleStateRef};
use super::request::{UpscaleExecuteArgs, VelocityCombineArgs};
use crate::error::UpscaleError;
use std::fmt;

/// One unit of GPU work recorded by the upscale scheduler.
pub enum UpscaleCommand {
    /// Merge camera and object motion into the combined velocity target.
    CombineVelocity(VelocityCombineArgs),
    /// Run the upscale itself against a view's temporal state.
    Upscale {
        /// The fully-formed request value.
        args: Box<UpscaleExecuteArgs>,
        /// The temporal state the request accumulates into.
        state: UpscaleStateRef,
    },
    /// Let the backend's resource pool release allocations tied to
    /// finished frames.
    TickPoolElements,
}

impl fmt::Debug for UpscaleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpscaleCommand::CombineVelocity(args) => {
                f.debug_tuple("CombineVelocity").field(args).finish()
            }
            UpscaleCommand::Upscale { args, .. } => f
                .debug_struct("Upscale")
                .field("args", args)
                .field("state", &"UpscaleState(...)")
                .finish(),
            UpscaleCommand::TickPoolElements => write!(f, "TickPoolElements"),
        }
    }
}

/// An ordered queue of upscale commands for one frame.
///
/// The scheduler records fully-formed request values here instead of
/// talking to the backend directly; the host drains the stream once per
/// frame with [`execute`](Self::execute). The contract is submission
/// order: commands reach the backend in exactly the order they were
/// enqueued, and nothing in this module waits on GPU completion.
#[derive(Debug, Default)]
pub struct FrameCommandStream {
    commands: Vec<UpscaleCommand>,
}

impl FrameCommandStream {
    /// Creates an empty stream for a new frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command to the end of the stream.
    pub fn enqueue(&mut self, command: UpscaleCommand) {
        self.commands.push(command);
    }

    /// The commands recorded so far, in submission order.
    pub fn commands(&self) -> &[UpscaleCommand] {
        &self.commands
    }

    /// The number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands have been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drains the stream into the backend, preserving submission order.
    ///
    /// Stops at the first failing command; a failed frame is abandoned,
    /// never partially retried.
    pub fn execute(self, backend: &dyn UpscaleBackend) -> Result<(), UpscaleError> {
        log::trace!("Draining {} upscale command(s)", self.commands.len());
        for command in self.commands {
            match command {
                UpscaleCommand::CombineVelocity(args) => backend.combine_velocity(&args)?,
                UpscaleCommand::Upscale { args, state } => backend.execute(&args, &state)?,
                UpscaleCommand::TickPoolElements => backend.tick_pool_elements(),
            }
        }
        Ok(())
    }
}
