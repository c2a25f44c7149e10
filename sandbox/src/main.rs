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

//! Drives the upscaler against the software backend for a few simulated
//! frames: auto quality selection, a couple of continuous frames, and a
//! camera cut.

use anodos_core::math::{Extent2D, IntRect, Vec2};
use anodos_core::{
    FrameCommandStream, UpscaleBackend, UpscalePassInputs, UpscaleSettings, ViewUpscaleState,
};
use anodos_infra::{SoftwareUpscaleBackend, SoftwareUpscaleState, TileQuantizer};
use anodos_passes::{UpscaleView, UpscalerContext};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let backend = Arc::new(SoftwareUpscaleBackend::new());
    let quantizer = Arc::new(TileQuantizer::default());
    let mut context = UpscalerContext::new(backend.clone(), quantizer)?;
    log::info!("Upscaling available: {}", context.is_available());

    let settings = UpscaleSettings {
        auto_quality: true,
        ..Default::default()
    };

    // A 4K output view; auto quality will render it at half resolution.
    let output_extent = Extent2D::new(3840, 2160);
    let render_extent = Extent2D::new(1920, 1080);

    let mut view_state = ViewUpscaleState::new();
    for frame in 0..3u32 {
        let mut stream = FrameCommandStream::new();
        let mut view = UpscaleView::new(Some(&mut view_state));
        view.camera_cut = frame == 2;
        view.jitter_offset = Vec2::new(0.25, -0.25);
        view.delta_time = 1.0 / 60.0;

        let Some(scheduler) = context.configure_view(&mut view, &settings, output_extent) else {
            log::warn!("No quality mode selected, skipping upscaling this frame");
            continue;
        };
        log::info!(
            "Frame {frame}: quality mode {} at fraction {:?}",
            scheduler.quality_mode(),
            view.resolution_fraction
        );

        let inputs = UpscalePassInputs {
            input_view_rect: IntRect::from_extent(render_extent),
            output_view_rect: IntRect::from_extent(output_extent),
            color: backend.create_texture("SceneColor", render_extent),
            depth: backend.create_texture("SceneDepth", render_extent),
            velocity: backend.create_texture("SceneVelocity", render_extent),
            exposure: backend.create_texture("Exposure", Extent2D::new(1, 1)),
        };
        backend.fill_texture(inputs.color, [0.1 * (frame + 1) as f32, 0.2, 0.3, 1.0])?;

        let outputs = scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
        context.tick(&mut stream);
        stream.execute(backend.as_ref())?;

        log::info!(
            "Frame {frame}: output {}x{} valid rect {}x{}",
            outputs.color.extent.width,
            outputs.color.extent.height,
            outputs.view_rect.width(),
            outputs.view_rect.height()
        );
    }

    if let Some(history) = &view_state.history {
        let accumulated = history
            .state
            .downcast_ref::<SoftwareUpscaleState>()
            .map(|state| state.accumulated_frames.load(Ordering::Relaxed));
        log::info!(
            "Final history: viewport {}x{}, accumulated frames since last cut: {accumulated:?}",
            history.viewport_rect.width(),
            history.viewport_rect.height()
        );
    }

    context.shutdown();
    Ok(())
}
