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

//! The per-frame upscale pass scheduler.

use super::policy::QualityModePolicy;
use super::view::UpscaleView;
use anodos_core::math::Vec2;
use anodos_core::upscale::history::UpscaleHistory;
use anodos_core::upscale::quality::QualityMode;
use anodos_core::{
    BufferSizeQuantizer, FrameCommandStream, UpscaleBackend, UpscaleCommand, UpscaleExecuteArgs,
    UpscalePassInputs, UpscalePassOutputs, UpscaleSettings, VelocityCombineArgs,
};
use std::sync::Arc;

/// Slack applied around a mode's fraction range before asserting, to absorb
/// floating point rounding of quantized viewport sizes.
const FRACTION_TOLERANCE: f32 = 0.01;

/// Output dimensions below this many pixels are exempt from the fraction
/// assert: at tiny sizes viewport quantization distorts the ratio far
/// beyond the tolerance (333/1000 is 0.333, but 3/10 is 0.3).
const SMALL_VIEW_EXEMPTION: u32 = 100;

/// Schedules the temporal upscale pass for views configured at one quality
/// mode.
///
/// An instance is bound to its mode for its whole lifetime and is shared by
/// every view running at that mode, so it holds no per-view mutable state;
/// all of that lives in the view's history container. Each call to
/// [`add_passes`](Self::add_passes) is a fresh run through Validate,
/// ComputeExtent, ResolveHistory, Dispatch, ExtractHistory.
#[derive(Debug)]
pub struct UpscalePassScheduler {
    mode: QualityMode,
    policy: Arc<QualityModePolicy>,
    backend: Arc<dyn UpscaleBackend>,
    quantizer: Arc<dyn BufferSizeQuantizer>,
}

impl UpscalePassScheduler {
    pub(crate) fn new(
        mode: QualityMode,
        policy: Arc<QualityModePolicy>,
        backend: Arc<dyn UpscaleBackend>,
        quantizer: Arc<dyn BufferSizeQuantizer>,
    ) -> Self {
        Self {
            mode,
            policy,
            backend,
            quantizer,
        }
    }

    /// The quality mode this instance is bound to.
    pub fn quality_mode(&self) -> QualityMode {
        self.mode
    }

    /// Records this frame's upscale work onto the command stream and
    /// updates the view's history.
    ///
    /// Enqueues the velocity combine and the upscale request in submission
    /// order, replaces the view's history container when history is
    /// writable, and returns the output color target with its valid rect.
    /// Nothing here waits on GPU completion.
    ///
    /// # Panics
    /// Panics on integration errors: a view not configured for this
    /// instance's mode, a non-zero output rect origin, or a resolution
    /// fraction outside the mode's supported range.
    pub fn add_passes(
        &self,
        stream: &mut FrameCommandStream,
        view: &mut UpscaleView<'_>,
        settings: &UpscaleSettings,
        inputs: &UpscalePassInputs,
    ) -> UpscalePassOutputs {
        self.validate(view, inputs);

        let quantized = self.quantizer.quantize(inputs.output_view_rect.size());
        let output_extent = inputs.output_extent(quantized);

        // A cut is either signaled by the renderer or implied by having
        // nothing to accumulate into: no prior container, or no slot to
        // persist one.
        let camera_cut =
            view.prev_history.is_none() || view.camera_cut || view.persisted.is_none();

        let dilate = settings.dilate_motion_vectors;
        let combined_velocity = self.backend.create_texture(
            "CombinedVelocity",
            if dilate {
                output_extent
            } else {
                inputs.velocity.extent
            },
        );
        stream.enqueue(UpscaleCommand::CombineVelocity(VelocityCombineArgs {
            input_rect: inputs.input_view_rect,
            output_rect: if dilate {
                inputs.output_view_rect
            } else {
                inputs.input_view_rect
            },
            depth: inputs.depth,
            velocity: inputs.velocity,
            output: combined_velocity,
            dilate,
        }));

        let output_color = self
            .backend
            .create_texture("UpscaledSceneColor", output_extent);

        let state = match view.prev_history.as_ref() {
            Some(history) => Arc::clone(&history.state),
            None => self.backend.create_state(),
        };

        log::debug!(
            "Upscale {} {}x{} -> {}x{}{}",
            self.mode,
            inputs.input_view_rect.width(),
            inputs.input_view_rect.height(),
            inputs.output_view_rect.width(),
            inputs.output_view_rect.height(),
            if camera_cut { " (reset)" } else { "" }
        );

        let args = UpscaleExecuteArgs {
            quality: self.mode,
            src_rect: inputs.input_view_rect,
            dest_rect: inputs.output_view_rect,
            sharpness: settings.sharpness.clamp(-1.0, 1.0),
            reset: camera_cut,
            jitter_offset: view.jitter_offset,
            // Vectors come pre-scaled out of the combine stage.
            motion_vector_scale: Vec2::ONE,
            high_resolution_motion_vectors: dilate,
            delta_time: view.delta_time,
            pre_exposure: view.pre_exposure,
            use_auto_exposure: settings.auto_exposure,
            release_memory_on_delete: settings.release_memory_on_delete,
            input_color: inputs.color,
            input_depth: inputs.depth,
            input_velocity: combined_velocity,
            input_exposure: inputs.exposure,
            output_color,
        };
        stream.enqueue(UpscaleCommand::Upscale {
            args: Box::new(args),
            state: Arc::clone(&state),
        });

        if !view.history_read_only {
            if let Some(persisted) = view.persisted.as_mut() {
                // Replacement, never in-place mutation: readers of the
                // previous container keep a consistent snapshot.
                persisted.history = Some(Arc::new(UpscaleHistory {
                    state,
                    output_color,
                    input_color: inputs.color,
                    input_depth: inputs.depth,
                    input_velocity: combined_velocity,
                    viewport_rect: inputs.output_view_rect,
                    reference_buffer_size: output_extent,
                }));
            }
        }

        UpscalePassOutputs {
            color: output_color,
            view_rect: inputs.output_view_rect,
        }
    }

    fn validate(&self, view: &UpscaleView<'_>, inputs: &UpscalePassInputs) {
        assert!(
            view.temporal_upscale_configured,
            "The upscale pass requires the view to be configured for temporal upscaling"
        );
        assert_eq!(
            view.configured_mode,
            Some(self.mode),
            "The view was not configured for this upscaler instance"
        );
        assert!(
            inputs.output_view_rect.origin.is_zero(),
            "The upscale output view rect origin ({}, {}) must be zero",
            inputs.output_view_rect.origin.x,
            inputs.output_view_rect.origin.y
        );
        assert!(
            self.policy.is_supported(self.mode),
            "{} is not a supported quality mode",
            self.mode
        );

        let dest = inputs.output_view_rect;
        let scale_x = inputs.input_view_rect.width() as f32 / dest.width() as f32;
        let scale_y = inputs.input_view_rect.height() as f32 / dest.height() as f32;
        let min = self.policy.min_fraction(self.mode) - FRACTION_TOLERANCE;
        let max = self.policy.max_fraction(self.mode) + FRACTION_TOLERANCE;
        assert!(
            dest.width() < SMALL_VIEW_EXEMPTION || (min <= scale_x && scale_x <= max),
            "The current resolution fraction {} is out of the supported range [{}, {}] for {}",
            scale_x,
            self.policy.min_fraction(self.mode),
            self.policy.max_fraction(self.mode),
            self.mode
        );
        assert!(
            dest.height() < SMALL_VIEW_EXEMPTION || (min <= scale_y && scale_y <= max),
            "The current resolution fraction {} is out of the supported range [{}, {}] for {}",
            scale_y,
            self.policy.min_fraction(self.mode),
            self.policy.max_fraction(self.mode),
            self.mode
        );
    }
}
