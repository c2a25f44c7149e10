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

//! The owned lifecycle object tying the upscaler's pieces together.

use super::auto_quality::AutoQualitySelector;
use super::policy::QualityModePolicy;
use super::pool::UpscalerInstancePool;
use super::scheduler::UpscalePassScheduler;
use super::view::UpscaleView;
use anodos_core::math::Extent2D;
use anodos_core::upscale::quality::QualityMode;
use anodos_core::{
    BufferSizeQuantizer, FrameCommandStream, UpscaleBackend, UpscaleCommand, UpscaleError,
    UpscaleSettings,
};
use std::sync::Arc;
use thiserror::Error;

/// An error creating the upscaler context.
#[derive(Debug, Error)]
pub enum UpscalerInitError {
    /// The backend failed while the quality mode table was being built.
    #[error("quality mode enumeration failed: {0}")]
    Enumeration(#[from] UpscaleError),
}

/// Owns the settings table, the instance pool, and the backend handle.
///
/// One context serves the whole renderer. Creating it enumerates the
/// backend's quality modes exactly once; [`shutdown`](Self::shutdown)
/// releases the pooled instances explicitly at subsystem teardown. Using a
/// context after shutdown is a fatal integration error. Both phases run on
/// a single thread by contract, which is why nothing in here locks.
#[derive(Debug)]
pub struct UpscalerContext {
    backend: Arc<dyn UpscaleBackend>,
    quantizer: Arc<dyn BufferSizeQuantizer>,
    policy: Arc<QualityModePolicy>,
    pool: UpscalerInstancePool,
    shut_down: bool,
}

impl UpscalerContext {
    /// Builds the quality mode table from `backend` and prepares an empty
    /// instance pool.
    pub fn new(
        backend: Arc<dyn UpscaleBackend>,
        quantizer: Arc<dyn BufferSizeQuantizer>,
    ) -> Result<Self, UpscalerInitError> {
        log::info!("Initializing upscaler context");
        let policy = Arc::new(QualityModePolicy::build(backend.as_ref())?);
        Ok(Self {
            backend,
            quantizer,
            policy,
            pool: UpscalerInstancePool::new(),
            shut_down: false,
        })
    }

    /// Whether upscaling can run at all: the context is live and at least
    /// one quality mode is supported.
    pub fn is_available(&self) -> bool {
        !self.shut_down && self.policy.is_available()
    }

    /// The quality mode policy built at creation.
    pub fn policy(&self) -> &QualityModePolicy {
        &self.policy
    }

    /// The backend this context drives.
    pub fn backend(&self) -> &Arc<dyn UpscaleBackend> {
        &self.backend
    }

    /// Returns the shared scheduler instance for `mode`, creating it on
    /// first request.
    pub fn scheduler_for_mode(&mut self, mode: QualityMode) -> Arc<UpscalePassScheduler> {
        self.assert_live();
        self.pool
            .get_or_create(mode, &self.policy, &self.backend, &self.quantizer)
    }

    /// Whether `candidate` is one of this context's pooled instances, as
    /// opposed to an unrelated upscaler configured on the same view.
    pub fn is_valid_instance(&self, candidate: &Arc<UpscalePassScheduler>) -> bool {
        self.pool.is_valid_instance(candidate)
    }

    /// Configures a view for upscaling this frame.
    ///
    /// Picks the quality mode — automatically from the output resolution
    /// when `settings.auto_quality` is set, otherwise the configured
    /// override with a Balanced fallback when unsupported — marks the view
    /// as temporally upscaled, drives its resolution fraction to the
    /// mode's optimum unless one is already set, and returns the scheduler
    /// to run the pass with. Returns `None` when upscaling is disabled,
    /// unavailable, or no mode could be selected; the view is left
    /// untouched and the caller skips upscaling this frame.
    pub fn configure_view(
        &mut self,
        view: &mut UpscaleView<'_>,
        settings: &UpscaleSettings,
        output_extent: Extent2D,
    ) -> Option<Arc<UpscalePassScheduler>> {
        self.assert_live();
        if !settings.enabled || !self.policy.is_available() {
            return None;
        }

        let mode = if settings.auto_quality {
            AutoQualitySelector::new(&self.policy).select_for_output(output_extent)?
        } else {
            self.supported_mode_or_fallback(settings.quality)?
        };

        let scheduler = self
            .pool
            .get_or_create(mode, &self.policy, &self.backend, &self.quantizer);
        view.temporal_upscale_configured = true;
        view.configured_mode = Some(mode);
        if view.resolution_fraction.is_none() {
            view.resolution_fraction = Some(self.policy.optimal_fraction(mode));
        }
        Some(scheduler)
    }

    fn supported_mode_or_fallback(&self, requested: QualityMode) -> Option<QualityMode> {
        if self.policy.is_supported(requested) {
            return Some(requested);
        }
        if self.policy.is_supported(QualityMode::Balanced) {
            log::warn!("Quality mode {requested} is not supported at runtime, using Balanced");
            return Some(QualityMode::Balanced);
        }
        log::warn!("Neither {requested} nor the Balanced fallback is supported");
        None
    }

    /// Per-frame maintenance: lets the backend's resource pool cycle
    /// allocations tied to finished frames.
    ///
    /// Deliberately separate from the pass itself so cleanup runs on
    /// frames where no upscale pass was scheduled.
    pub fn tick(&self, stream: &mut FrameCommandStream) {
        self.assert_live();
        stream.enqueue(UpscaleCommand::TickPoolElements);
    }

    /// Releases the settings table and every pooled instance.
    ///
    /// Called exactly once at subsystem teardown; tearing down twice is a
    /// fatal integration error.
    pub fn shutdown(&mut self) {
        assert!(!self.shut_down, "upscaler context shut down twice");
        log::info!(
            "Shutting down upscaler context ({} pooled instance(s))",
            self.pool.live_instances()
        );
        self.pool.clear();
        self.shut_down = true;
    }

    fn assert_live(&self) {
        assert!(!self.shut_down, "upscaler context used after shutdown");
    }
}
