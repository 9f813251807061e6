// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end engine tests against the recording fakes.

use lamina_core::{
    Color, ColorSettings, ColorTableFormat, HostTime, IndexedFormat, Rect, RgbaFormat, Status,
    YcbcrFormat,
};
use lamina_disp::config::{ColorSpace, PlaneMode, WorkMode};
use lamina_harness::{
    DispCall, DispLog, IdentityMemory, RecordingDispOpener, RecordingWindowSystem, WindowCall,
    WindowLog, nv12_frame, recording_device,
};
use lamina_present::{
    DeviceConfig, DeviceHandle, Engine, RESERVED_BACKGROUND, SurfaceStatus, WindowId,
};

const WINDOW: WindowId = WindowId(7);

fn engine_with_device(origin: (i32, i32)) -> (Engine, DeviceHandle, DispLog, WindowLog) {
    let (config, disp_log, window_log) = recording_device(origin);
    let mut engine = Engine::new();
    let device = engine.create_device(config);
    (engine, device, disp_log, window_log)
}

#[test]
fn target_creation_negotiates_claims_and_keys() {
    let (mut engine, device, disp_log, window_log) = engine_with_device((0, 0));
    engine.create_presentation_target(device, WINDOW).unwrap();

    let calls = disp_log.snapshot();
    assert!(matches!(calls[0], DispCall::Version { .. }));
    assert!(matches!(
        calls[1],
        DispCall::LayerRequest {
            mode: WorkMode::Scaler
        }
    ));
    assert!(matches!(calls[2], DispCall::SetColorKey { .. }));
    // The key matches the reserved background exactly.
    let DispCall::SetColorKey { key } = calls[2] else {
        panic!("expected a color key call");
    };
    assert_eq!(key.min, [0x00, 0x01, 0x02]);
    assert_eq!(key.min, key.max);

    assert_eq!(
        window_log.snapshot(),
        [WindowCall::SetBackground {
            window: WINDOW,
            rgb: RESERVED_BACKGROUND,
        }]
    );
}

#[test]
fn target_creation_rejects_the_null_window() {
    let (mut engine, device, disp_log, _window_log) = engine_with_device((0, 0));
    let err = engine
        .create_presentation_target(device, WindowId::NONE)
        .unwrap_err();
    assert_eq!(err, Status::InvalidPointer);
    assert!(disp_log.is_empty(), "nothing may be opened for a null window");
}

#[test]
fn target_creation_surfaces_an_open_failure_as_error() {
    let disp_log = DispLog::new();
    let config = DeviceConfig {
        window_system: Box::new(RecordingWindowSystem::new(WindowLog::new(), (0, 0))),
        disp_opener: Box::new(RecordingDispOpener {
            fail_open: true,
            ..RecordingDispOpener::new(disp_log)
        }),
        video_memory: Box::new(IdentityMemory),
    };
    let mut engine = Engine::new();
    let device = engine.create_device(config);
    let err = engine
        .create_presentation_target(device, WINDOW)
        .unwrap_err();
    assert_eq!(err, Status::Error);
}

#[test]
fn target_creation_rejects_a_driver_major_mismatch() {
    let disp_log = DispLog::new();
    let config = DeviceConfig {
        window_system: Box::new(RecordingWindowSystem::new(WindowLog::new(), (0, 0))),
        disp_opener: Box::new(RecordingDispOpener {
            reported_version: Some(0x0002_0000),
            ..RecordingDispOpener::new(disp_log.clone())
        }),
        video_memory: Box::new(IdentityMemory),
    };
    let mut engine = Engine::new();
    let device = engine.create_device(config);
    let err = engine
        .create_presentation_target(device, WINDOW)
        .unwrap_err();
    assert_eq!(err, Status::Error);
    assert_eq!(disp_log.len(), 1, "negotiation stops after the version call");
}

#[test]
fn layer_exhaustion_reports_resources() {
    let disp_log = DispLog::new();
    let config = DeviceConfig {
        window_system: Box::new(RecordingWindowSystem::new(WindowLog::new(), (0, 0))),
        disp_opener: Box::new(RecordingDispOpener {
            deny_layers: true,
            ..RecordingDispOpener::new(disp_log)
        }),
        video_memory: Box::new(IdentityMemory),
    };
    let mut engine = Engine::new();
    let device = engine.create_device(config);
    let err = engine
        .create_presentation_target(device, WINDOW)
        .unwrap_err();
    assert_eq!(err, Status::Resources);
}

#[test]
fn target_destroy_closes_before_releasing() {
    let (mut engine, device, disp_log, _window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    disp_log.clear();

    engine.destroy_presentation_target(target).unwrap();
    let calls = disp_log.snapshot();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], DispCall::LayerClose { .. }));
    assert!(matches!(calls[1], DispCall::LayerRelease { .. }));

    assert_eq!(
        engine.destroy_presentation_target(target).unwrap_err(),
        Status::InvalidHandle,
        "the handle goes stale"
    );
}

#[test]
fn queue_background_is_a_stored_attribute() {
    let (mut engine, device, _disp_log, window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();

    assert_eq!(engine.queue_background(queue).unwrap(), Color::BLACK);
    let red = Color {
        red: 1.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
    engine.set_queue_background(queue, red).unwrap();
    assert_eq!(engine.queue_background(queue).unwrap(), red);
    // Stored only; the window keeps the reserved key background.
    assert_eq!(window_log.len(), 1);
}

#[test]
fn display_without_video_touches_no_hardware() {
    let (mut engine, device, disp_log, window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 640, 480)
        .unwrap();
    disp_log.clear();
    window_log.clear();

    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();
    assert!(disp_log.is_empty());
    assert!(window_log.is_empty());
}

#[test]
fn display_programs_the_layer_from_the_attached_frame() {
    let (mut engine, device, disp_log, window_log) = engine_with_device((10, 20));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 640, 480)
        .unwrap();
    engine
        .attach_video_frame(
            surface,
            nv12_frame(),
            Rect::from_size(640, 480),
            Rect::from_size(640, 480),
        )
        .unwrap();
    disp_log.clear();
    window_log.clear();

    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();

    let calls = disp_log.snapshot();
    let DispCall::LayerSetConfig { config, .. } = calls[0] else {
        panic!("expected the parameter block first, got {calls:?}");
    };
    assert!(matches!(calls[1], DispCall::LayerToBottom { .. }));
    assert!(matches!(calls[2], DispCall::LayerOpen { .. }));

    assert_eq!(config.work_mode, WorkMode::Scaler);
    assert_eq!(config.pipe, 1);
    assert!(config.color_key_enable);
    assert_eq!(config.fb.mode, PlaneMode::NonMbUvCombined);
    assert_eq!(config.fb.color_space, ColorSpace::Bt601);
    assert_eq!(
        config.fb.planes,
        [0x4000_1000, 0x4000_1400, 0x4000_1500],
        "plane addresses carry the DMA bias"
    );
    assert_eq!((config.fb.width, config.fb.height), (640, 480));
    assert_eq!((config.screen.x, config.screen.y), (10, 20));
    assert_eq!((config.screen.width, config.screen.height), (640, 480));
    assert_eq!((config.source.x, config.source.y), (0, 0));

    // The window is cleared even with nothing to punch through.
    assert_eq!(
        window_log.snapshot(),
        [
            WindowCall::TranslateToRoot { window: WINDOW },
            WindowCall::ClearWindow { window: WINDOW },
        ]
    );
}

#[test]
fn display_crops_the_video_above_the_window_origin() {
    let (mut engine, device, disp_log, _window_log) = engine_with_device((0, -30));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 640, 480)
        .unwrap();
    engine
        .attach_video_frame(
            surface,
            nv12_frame(),
            Rect::from_size(640, 480),
            Rect::from_size(640, 480),
        )
        .unwrap();
    disp_log.clear();

    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();
    let DispCall::LayerSetConfig { config, .. } = disp_log.snapshot()[0] else {
        panic!("expected a parameter block");
    };
    assert_eq!(config.screen.y, 0);
    assert_eq!(config.screen.height, 450);
    assert_eq!(config.source.y, 30);
    assert_eq!(config.source.height, 450);
}

#[test]
fn display_punches_opaque_pixels_through_the_window() {
    let (mut engine, device, _disp_log, window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 4, 4)
        .unwrap();
    engine
        .attach_video_frame(
            surface,
            nv12_frame(),
            Rect::from_size(640, 480),
            Rect::from_size(640, 480),
        )
        .unwrap();
    // Index 0 fully opaque, index 1 at exactly the threshold, index 2
    // translucent; only the opaque pixel must be drawn.
    let source = [0u8, 0xff, 1, 0x80, 2, 0x40, 0, 0];
    let table = [0x00aa_bb_cc, 0x0011_2233, 0x0044_5566, 0];
    engine
        .put_bits_indexed(
            surface,
            IndexedFormat::I8A8,
            &source,
            8,
            Rect::new(0, 0, 3, 1),
            ColorTableFormat::B8g8r8x8,
            &table,
        )
        .unwrap();
    window_log.clear();

    engine
        .display(queue, surface, 4, 4, HostTime::UNAVAILABLE)
        .unwrap();
    let draws: Vec<_> = window_log
        .snapshot()
        .into_iter()
        .filter(|call| matches!(call, WindowCall::DrawPoint { .. }))
        .collect();
    assert_eq!(
        draws,
        [WindowCall::DrawPoint {
            window: WINDOW,
            x: 0,
            y: 0,
            rgb: 0x00aa_bbcc,
        }]
    );
    assert!(
        window_log.snapshot().contains(&WindowCall::Flush),
        "punch-through drawing is flushed"
    );
}

#[test]
fn enhancement_is_pushed_once_per_change() {
    let (mut engine, device, disp_log, _window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 640, 480)
        .unwrap();
    engine
        .attach_video_frame(
            surface,
            nv12_frame(),
            Rect::from_size(640, 480),
            Rect::from_size(640, 480),
        )
        .unwrap();
    disp_log.clear();

    // Defaults were never "changed", so the first display skips the block.
    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();
    assert!(
        !disp_log
            .snapshot()
            .iter()
            .any(|call| matches!(call, DispCall::EnhanceOn { .. })),
        "neutral defaults must not touch the enhancement block"
    );

    engine
        .set_surface_color_settings(
            surface,
            ColorSettings {
                brightness: 1.0,
                ..ColorSettings::DEFAULT
            },
        )
        .unwrap();
    disp_log.clear();
    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();
    let calls = disp_log.snapshot();
    assert!(matches!(calls[3], DispCall::EnhanceOff { .. }));
    assert!(
        calls
            .iter()
            .any(|call| matches!(call, DispCall::SetBrightness { value: 287, .. })),
        "brightness 1.0 scales to 287"
    );
    assert!(matches!(calls.last(), Some(DispCall::EnhanceOn { .. })));

    // Unchanged settings are not re-pushed.
    disp_log.clear();
    engine
        .display(queue, surface, 640, 480, HostTime::UNAVAILABLE)
        .unwrap();
    assert!(
        !disp_log
            .snapshot()
            .iter()
            .any(|call| matches!(call, DispCall::EnhanceOn { .. }))
    );
}

#[test]
fn status_and_idle_report_immediate_visibility() {
    let (mut engine, device, _disp_log, _window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 64, 64)
        .unwrap();

    let (status, when) = engine.query_surface_status(queue, surface).unwrap();
    assert_eq!(status, SurfaceStatus::Visible);
    assert!(!when.is_unavailable());

    let idle_at = engine.block_until_surface_idle(queue, surface).unwrap();
    assert!(idle_at >= when, "the clock is monotonic");
}

#[test]
fn stale_handles_miss_everywhere() {
    let (mut engine, device, _disp_log, _window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 64, 64)
        .unwrap();

    engine.destroy_output_surface(surface).unwrap();
    assert_eq!(
        engine
            .display(queue, surface, 64, 64, HostTime::UNAVAILABLE)
            .unwrap_err(),
        Status::InvalidHandle
    );
    assert_eq!(
        engine.output_surface_parameters(surface).unwrap_err(),
        Status::InvalidHandle
    );

    engine.destroy_presentation_queue(queue).unwrap();
    assert_eq!(
        engine.queue_time(queue).unwrap_err(),
        Status::InvalidHandle
    );
    assert_eq!(
        engine.destroy_presentation_queue(queue).unwrap_err(),
        Status::InvalidHandle
    );

    // Destroying the queue never touches the target; it stays usable.
    assert!(engine.create_presentation_queue(device, target).is_ok());
}

#[test]
fn render_with_no_source_clears_the_destination() {
    let (mut engine, device, _disp_log, window_log) = engine_with_device((0, 0));
    let target = engine.create_presentation_target(device, WINDOW).unwrap();
    let queue = engine.create_presentation_queue(device, target).unwrap();
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 4, 4)
        .unwrap();
    engine
        .attach_video_frame(
            surface,
            nv12_frame(),
            Rect::from_size(640, 480),
            Rect::from_size(640, 480),
        )
        .unwrap();
    engine
        .put_bits_indexed(
            surface,
            IndexedFormat::I8A8,
            &[0, 0xff, 0, 0],
            4,
            Rect::new(0, 0, 1, 1),
            ColorTableFormat::B8g8r8x8,
            &[0x00ff_ffff],
        )
        .unwrap();
    window_log.clear();

    engine
        .display(queue, surface, 4, 4, HostTime::UNAVAILABLE)
        .unwrap();
    assert!(
        window_log
            .snapshot()
            .iter()
            .any(|call| matches!(call, WindowCall::DrawPoint { .. })),
        "the opaque pixel punches through before the clear"
    );

    engine
        .render_output_surface(
            surface,
            Rect::from_size(4, 4),
            None,
            Rect::from_size(4, 4),
            None,
            None,
            0,
        )
        .unwrap();
    window_log.clear();
    engine
        .display(queue, surface, 4, 4, HostTime::UNAVAILABLE)
        .unwrap();
    assert!(
        !window_log
            .snapshot()
            .iter()
            .any(|call| matches!(call, WindowCall::DrawPoint { .. })),
        "a cleared backing leaves nothing to punch through"
    );
}

#[test]
fn readback_is_recognized_but_always_fails() {
    let (mut engine, device, _disp_log, _window_log) = engine_with_device((0, 0));
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 16, 16)
        .unwrap();
    let mut destination = [0u8; 64];

    assert_eq!(
        engine
            .get_bits_native(surface, None, &mut destination, 64)
            .unwrap_err(),
        Status::Error,
        "the backing is never exported"
    );

    engine.destroy_output_surface(surface).unwrap();
    assert_eq!(
        engine
            .get_bits_native(surface, None, &mut destination, 64)
            .unwrap_err(),
        Status::InvalidHandle,
        "the handle is still checked first"
    );
}

#[test]
fn unsupported_formats_are_reported_not_errored() {
    let (mut engine, device, _disp_log, _window_log) = engine_with_device((0, 0));
    let caps = engine
        .query_output_surface_capabilities(device, RgbaFormat::A8)
        .unwrap();
    assert!(!caps.supported);
    let packed = engine
        .query_output_surface_capabilities(device, RgbaFormat::B8g8r8a8)
        .unwrap();
    assert!(packed.supported);
    assert_eq!((packed.max_width, packed.max_height), (8192, 8192));
    assert!(
        !engine
            .query_put_bits_ycbcr_capability(device, RgbaFormat::B8g8r8a8, YcbcrFormat::Yv12)
            .unwrap(),
        "the YCbCr upload path is a stub"
    );

    // Bitmap composition is recognized but does nothing.
    let surface = engine
        .create_output_surface(device, RgbaFormat::B8g8r8a8, 16, 16)
        .unwrap();
    engine
        .render_bitmap_surface(
            surface,
            Rect::from_size(8, 8),
            None,
            Rect::from_size(8, 8),
            None,
            None,
            0,
        )
        .unwrap();
    assert!(
        engine.output_surface_parameters(surface).is_ok(),
        "the destination is untouched"
    );
}
