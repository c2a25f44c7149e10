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

//! Integration tests for the per-frame upscale pass against the software
//! backend.

use anodos_core::math::{Extent2D, IntRect, Origin2D};
use anodos_core::upscale::quality::QualityMode;
use anodos_core::{
    FrameCommandStream, UpscaleBackend, UpscaleCommand, UpscalePassInputs, UpscaleSettings,
    ViewUpscaleState,
};
use anodos_infra::{SoftwareUpscaleBackend, SoftwareUpscaleState, TileQuantizer};
use anodos_passes::{UpscaleView, UpscalerContext};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn context_with_backend() -> (Arc<SoftwareUpscaleBackend>, UpscalerContext) {
    let backend = Arc::new(SoftwareUpscaleBackend::new());
    let context =
        UpscalerContext::new(backend.clone(), Arc::new(TileQuantizer::default())).unwrap();
    (backend, context)
}

fn frame_inputs(
    backend: &SoftwareUpscaleBackend,
    render: Extent2D,
    output: Extent2D,
) -> UpscalePassInputs {
    UpscalePassInputs {
        input_view_rect: IntRect::from_extent(render),
        output_view_rect: IntRect::from_extent(output),
        color: backend.create_texture("SceneColor", render),
        depth: backend.create_texture("SceneDepth", render),
        velocity: backend.create_texture("SceneVelocity", render),
        exposure: backend.create_texture("Exposure", Extent2D::new(1, 1)),
    }
}

fn performance_settings() -> UpscaleSettings {
    UpscaleSettings {
        quality: QualityMode::Performance,
        auto_quality: false,
        ..Default::default()
    }
}

#[test]
fn test_first_frame_is_camera_cut_and_attaches_history() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    {
        let mut view = UpscaleView::new(Some(&mut view_state));
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    }

    // No prior history anywhere: the dispatch must ask the backend to
    // discard temporal accumulation.
    match &stream.commands()[1] {
        UpscaleCommand::Upscale { args, .. } => assert!(args.reset),
        other => panic!("expected an upscale command, got {other:?}"),
    }

    // A fresh container was constructed and attached to the view's slot.
    let history = view_state.history.expect("history should be attached");
    assert_eq!(history.viewport_rect, IntRect::from_extent(output));
    // 1080 rounds up to the next 32-pixel tile.
    assert_eq!(history.reference_buffer_size, Extent2D::new(1920, 1088));
    assert!(history
        .state
        .downcast_ref::<SoftwareUpscaleState>()
        .is_some());
}

#[test]
fn test_continuous_frames_share_state_and_clear_reset() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    let mut view_state = ViewUpscaleState::new();
    {
        let mut stream = FrameCommandStream::new();
        let mut view = UpscaleView::new(Some(&mut view_state));
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
        stream.execute(backend.as_ref()).unwrap();
    }
    let first_state = Arc::clone(&view_state.history.as_ref().unwrap().state);
    let first_container = Arc::clone(view_state.history.as_ref().unwrap());

    let mut stream = FrameCommandStream::new();
    {
        let mut view = UpscaleView::new(Some(&mut view_state));
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    }

    match &stream.commands()[1] {
        UpscaleCommand::Upscale { args, state } => {
            assert!(!args.reset, "continuous frame must not reset");
            assert!(Arc::ptr_eq(state, &first_state), "state blob must persist");
        }
        other => panic!("expected an upscale command, got {other:?}"),
    }

    // The container itself was replaced, not mutated: the first frame's
    // container is still intact for anyone holding it.
    let second_container = view_state.history.as_ref().unwrap();
    assert!(!Arc::ptr_eq(&first_container, second_container));
    assert!(Arc::ptr_eq(&first_state, &second_container.state));
}

#[test]
fn test_explicit_camera_cut_resets_accumulation() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    let mut view_state = ViewUpscaleState::new();
    for cut in [false, false, true] {
        let mut stream = FrameCommandStream::new();
        let mut view = UpscaleView::new(Some(&mut view_state));
        view.camera_cut = cut;
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
        stream.execute(backend.as_ref()).unwrap();
    }

    // Two continuous frames accumulated, then the cut dropped them.
    let history = view_state.history.unwrap();
    let state = history
        .state
        .downcast_ref::<SoftwareUpscaleState>()
        .unwrap();
    assert_eq!(state.accumulated_frames.load(Ordering::Relaxed), 1);
    assert_eq!(backend.executed_requests(), 3);
}

#[test]
fn test_commands_are_recorded_in_submission_order() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();
    let inputs = frame_inputs(&backend, Extent2D::new(960, 540), output);
    scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    context.tick(&mut stream);

    assert_eq!(stream.len(), 3);
    assert!(matches!(
        stream.commands()[0],
        UpscaleCommand::CombineVelocity(_)
    ));
    assert!(matches!(stream.commands()[1], UpscaleCommand::Upscale { .. }));
    assert!(matches!(
        stream.commands()[2],
        UpscaleCommand::TickPoolElements
    ));
}

#[test]
fn test_output_extent_covers_input_texture() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    // The pooled input texture is larger than the requested output
    // viewport; the output target must cover it on both axes.
    let output = Extent2D::new(1280, 720);
    let texture_extent = Extent2D::new(1920, 1080);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();

    let inputs = UpscalePassInputs {
        input_view_rect: IntRect::from_extent(Extent2D::new(640, 360)),
        output_view_rect: IntRect::from_extent(output),
        color: backend.create_texture("SceneColor", texture_extent),
        depth: backend.create_texture("SceneDepth", texture_extent),
        velocity: backend.create_texture("SceneVelocity", texture_extent),
        exposure: backend.create_texture("Exposure", Extent2D::new(1, 1)),
    };
    let outputs = scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);

    assert_eq!(outputs.color.extent, Extent2D::new(1920, 1080));
    assert_eq!(outputs.view_rect, IntRect::from_extent(output));
}

#[test]
#[should_panic(expected = "must be zero")]
fn test_nonzero_output_origin_is_fatal() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();

    let mut inputs = frame_inputs(&backend, Extent2D::new(960, 540), output);
    inputs.output_view_rect = IntRect::new(Origin2D::new(5, 0), output);
    scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
}

#[test]
#[should_panic(expected = "configured for temporal upscaling")]
fn test_unconfigured_view_is_fatal() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let scheduler = context.scheduler_for_mode(QualityMode::Performance);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    // The renderer never called configure_view on this view.
    let mut view = UpscaleView::new(Some(&mut view_state));
    let inputs = frame_inputs(&backend, Extent2D::new(960, 540), Extent2D::new(1920, 1080));
    scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
}

#[test]
#[should_panic(expected = "out of the supported range")]
fn test_fraction_out_of_range_is_fatal() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();

    // 1:1 rendering is far outside Performance's fraction range.
    let inputs = frame_inputs(&backend, output, output);
    scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
}

#[test]
fn test_tiny_viewports_are_exempt_from_fraction_check() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    // At editor-thumbnail sizes quantization distorts the ratio; the
    // fraction assert deliberately stands down below 100 px.
    let output = Extent2D::new(96, 96);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();

    let inputs = frame_inputs(&backend, Extent2D::new(90, 90), output);
    let outputs = scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    stream.execute(backend.as_ref()).unwrap();
    assert_eq!(outputs.view_rect.size(), output);
}

#[test]
fn test_read_only_history_is_not_replaced() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    let mut view_state = ViewUpscaleState::new();
    {
        let mut stream = FrameCommandStream::new();
        let mut view = UpscaleView::new(Some(&mut view_state));
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    }
    let first_container = Arc::clone(view_state.history.as_ref().unwrap());

    let mut stream = FrameCommandStream::new();
    {
        let mut view = UpscaleView::new(Some(&mut view_state));
        view.history_read_only = true;
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    }

    // The pass still ran, but the persisted slot kept the old container.
    assert_eq!(stream.len(), 2);
    assert!(Arc::ptr_eq(
        &first_container,
        view_state.history.as_ref().unwrap()
    ));
}

#[test]
fn test_tick_runs_without_a_pass() {
    let (backend, context) = context_with_backend();
    let mut stream = FrameCommandStream::new();
    context.tick(&mut stream);
    stream.execute(backend.as_ref()).unwrap();

    assert_eq!(backend.pool_ticks(), 1);
    assert_eq!(backend.executed_requests(), 0);
}

#[test]
fn test_velocity_dilation_follows_settings() {
    let (backend, mut context) = context_with_backend();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    for dilate in [true, false] {
        let settings = UpscaleSettings {
            dilate_motion_vectors: dilate,
            ..performance_settings()
        };
        let mut view_state = ViewUpscaleState::new();
        let mut stream = FrameCommandStream::new();
        let mut view = UpscaleView::new(Some(&mut view_state));
        let scheduler = context
            .configure_view(&mut view, &settings, output)
            .unwrap();
        let inputs = frame_inputs(&backend, render, output);
        scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);

        let expected_extent = if dilate { output } else { render };
        match &stream.commands()[0] {
            UpscaleCommand::CombineVelocity(args) => {
                assert_eq!(args.dilate, dilate);
                assert_eq!(args.output.extent, expected_extent);
            }
            other => panic!("expected a velocity combine command, got {other:?}"),
        }
        match &stream.commands()[1] {
            UpscaleCommand::Upscale { args, .. } => {
                assert_eq!(args.high_resolution_motion_vectors, dilate);
                assert_eq!(args.input_velocity.extent, expected_extent);
            }
            other => panic!("expected an upscale command, got {other:?}"),
        }
    }
}

#[test]
fn test_upscaled_pixels_reach_the_output() {
    let (backend, mut context) = context_with_backend();
    let settings = performance_settings();
    let output = Extent2D::new(1920, 1080);
    let render = Extent2D::new(960, 540);

    let mut view_state = ViewUpscaleState::new();
    let mut stream = FrameCommandStream::new();
    let mut view = UpscaleView::new(Some(&mut view_state));
    let scheduler = context
        .configure_view(&mut view, &settings, output)
        .unwrap();
    let inputs = frame_inputs(&backend, render, output);
    backend
        .fill_texture(inputs.color, [0.4, 0.5, 0.6, 1.0])
        .unwrap();

    let outputs = scheduler.add_passes(&mut stream, &mut view, &settings, &inputs);
    stream.execute(backend.as_ref()).unwrap();

    assert_eq!(
        backend.texture_pixel(outputs.color, 1919, 1079),
        Some([0.4, 0.5, 0.6, 1.0])
    );
}
