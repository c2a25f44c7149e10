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

//! The per-mode cache of scheduler instances.

use super::policy::QualityModePolicy;
use super::scheduler::UpscalePassScheduler;
use anodos_core::upscale::quality::QualityMode;
use anodos_core::{BufferSizeQuantizer, UpscaleBackend};
use std::sync::Arc;

/// Lazily creates and caches one [`UpscalePassScheduler`] per quality mode.
///
/// Every view requesting the same mode shares the same instance, which is
/// why scheduler instances hold no per-view mutable state: everything
/// per-view lives in the caller-supplied history container. Instances are
/// created on first request and destroyed only when the pool is cleared at
/// context shutdown.
#[derive(Debug, Default)]
pub struct UpscalerInstancePool {
    instances: [Option<Arc<UpscalePassScheduler>>; QualityMode::COUNT],
}

impl UpscalerInstancePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached scheduler for `mode`, creating it on first
    /// request.
    pub fn get_or_create(
        &mut self,
        mode: QualityMode,
        policy: &Arc<QualityModePolicy>,
        backend: &Arc<dyn UpscaleBackend>,
        quantizer: &Arc<dyn BufferSizeQuantizer>,
    ) -> Arc<UpscalePassScheduler> {
        let slot = &mut self.instances[mode.index()];
        if let Some(existing) = slot {
            return Arc::clone(existing);
        }

        log::debug!("Creating upscale scheduler instance for {mode}");
        let created = Arc::new(UpscalePassScheduler::new(
            mode,
            Arc::clone(policy),
            Arc::clone(backend),
            Arc::clone(quantizer),
        ));
        *slot = Some(Arc::clone(&created));
        created
    }

    /// Whether `candidate` is one of this pool's live instances.
    ///
    /// Collaborators (e.g. a denoiser) use this to distinguish a scheduler
    /// from this pool from an unrelated upscaler configured on the same
    /// view.
    pub fn is_valid_instance(&self, candidate: &Arc<UpscalePassScheduler>) -> bool {
        self.instances
            .iter()
            .flatten()
            .any(|instance| Arc::ptr_eq(instance, candidate))
    }

    /// The number of instances created so far.
    pub fn live_instances(&self) -> usize {
        self.instances.iter().flatten().count()
    }

    /// Drops every cached instance.
    pub fn clear(&mut self) {
        self.instances = Default::default();
    }
}
