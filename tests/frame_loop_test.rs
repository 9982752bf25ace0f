use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::thread;

use tracing_subscriber::EnvFilter;

use focustrack_rs::{
    Detection, DetectionBuilder, DetectionSource, DrawPlan, FocusConfig, Frame, FrameClock,
    FrameLoop, Overlay, PointerEvent, Rect, RenderSink, SourceStatus, TickOutcome, TrackState,
    Transition, VideoSource,
};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

/// Source that reports `NotReady` for a few ticks, then serves frames, then stops.
struct ScriptedSource {
    warmup: Cell<u32>,
    remaining: Cell<u32>,
    pixels: Vec<u8>,
}

impl ScriptedSource {
    fn new(warmup: u32, frames: u32) -> Self {
        Self {
            warmup: Cell::new(warmup),
            remaining: Cell::new(frames),
            pixels: vec![0; 16],
        }
    }
}

impl VideoSource for ScriptedSource {
    fn status(&self) -> SourceStatus {
        if self.warmup.get() > 0 {
            self.warmup.set(self.warmup.get() - 1);
            return SourceStatus::NotReady;
        }
        if self.remaining.get() == 0 {
            return SourceStatus::Stopped;
        }
        self.remaining.set(self.remaining.get() - 1);
        SourceStatus::Ready
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            data: &self.pixels,
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

struct ScriptedDetector {
    frames: VecDeque<Vec<Detection>>,
}

impl DetectionSource for ScriptedDetector {
    type Error = Infallible;

    fn detect(
        &mut self,
        _frame: &Frame<'_>,
        _timestamp_ms: f64,
    ) -> Result<Vec<Detection>, Infallible> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingSink {
    plans: Vec<DrawPlan>,
    overlays: Vec<Vec<Overlay>>,
}

impl RenderSink for RecordingSink {
    type Error = Infallible;

    fn render(
        &mut self,
        _frame: &Frame<'_>,
        plan: &DrawPlan,
        overlays: &[Overlay],
    ) -> Result<(), Infallible> {
        self.plans.push(plan.clone());
        self.overlays.push(overlays.to_vec());
        Ok(())
    }
}

struct SteadyClock {
    now_ms: f64,
}

impl FrameClock for SteadyClock {
    fn next_frame(&mut self) -> f64 {
        self.now_ms += 1000.0 / 60.0;
        self.now_ms
    }
}

// Respect RUST_LOG when debugging a failing test
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn det(x: f32, y: f32, w: f32, h: f32) -> Detection {
    DetectionBuilder::new()
        .tlwh(x, y, w, h)
        .label("person")
        .score(0.9)
        .build()
}

fn full_display() -> Rect {
    Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32)
}

#[test]
fn test_end_to_end_scenario() {
    init_tracing();
    let detector = ScriptedDetector {
        frames: VecDeque::from(vec![
            vec![det(10.0, 10.0, 50.0, 50.0)],
            vec![det(15.0, 12.0, 50.0, 50.0)],
            vec![],
        ]),
    };
    let mut fl = FrameLoop::with_default_config(
        ScriptedSource::new(0, 3),
        detector,
        RecordingSink::default(),
    )
    .unwrap();

    let out = fl.tick(0.0).unwrap();
    assert!(matches!(out, TickOutcome::Rendered { transition: Transition::Seeded, .. }));
    assert_eq!(fl.state(), TrackState::Locked(Rect::new(10.0, 10.0, 50.0, 50.0)));

    fl.tick(16.0).unwrap();
    assert_eq!(fl.state(), TrackState::Locked(Rect::new(15.0, 12.0, 50.0, 50.0)));

    let out = fl.tick(33.0).unwrap();
    assert!(matches!(out, TickOutcome::Rendered { transition: Transition::Lost, .. }));
    assert_eq!(fl.state(), TrackState::Idle);

    let plans = &fl.sink().plans;
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].layer_count(), 2);
    assert_eq!(plans[2].layer_count(), 1);

    assert_eq!(fl.tick(50.0).unwrap(), TickOutcome::Stopped);
}

#[test]
fn test_run_skips_warmup_and_stops_with_source() {
    init_tracing();
    let detector = ScriptedDetector {
        frames: VecDeque::new(),
    };
    let mut fl =
        FrameLoop::with_default_config(ScriptedSource::new(3, 5), detector, RecordingSink::default())
            .unwrap();

    let stats = fl.run(&mut SteadyClock { now_ms: 0.0 }).unwrap();
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.rendered, 5);
    // The final tick observes the stopped source and does not re-arm
    assert_eq!(stats.ticks, 9);
    assert_eq!(fl.sink().plans.len(), 5);
}

#[test]
fn test_run_honors_stop_handle() {
    let detector = ScriptedDetector {
        frames: VecDeque::new(),
    };
    let mut fl = FrameLoop::with_default_config(
        ScriptedSource::new(0, u32::MAX),
        detector,
        RecordingSink::default(),
    )
    .unwrap();

    let stop = fl.stop_handle();
    stop.stop();
    let stats = fl.run(&mut SteadyClock { now_ms: 0.0 }).unwrap();
    assert_eq!(stats.ticks, 0);
}

#[test]
fn test_pointer_retarget_with_mirrored_display() {
    let frames = vec![
        vec![det(0.0, 0.0, 100.0, 100.0), det(600.0, 300.0, 400.0, 400.0)],
        vec![det(2.0, 0.0, 100.0, 100.0), det(600.0, 300.0, 400.0, 400.0)],
    ];
    let mut fl = FrameLoop::with_default_config(
        ScriptedSource::new(0, 2),
        ScriptedDetector {
            frames: frames.into(),
        },
        RecordingSink::default(),
    )
    .unwrap();

    fl.tick(0.0).unwrap();
    assert_eq!(fl.state(), TrackState::Locked(Rect::new(600.0, 300.0, 400.0, 400.0)));

    // Near the visual right edge of the mirrored feed: low source x
    let hit = fl.handle_pointer(PointerEvent {
        client_x: WIDTH as f32 - 40.0,
        client_y: 50.0,
        display: full_display(),
    });
    assert_eq!(hit, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

    // The retargeted subject is carried even though a larger box is present
    fl.tick(16.0).unwrap();
    assert_eq!(fl.state(), TrackState::Locked(Rect::new(2.0, 0.0, 100.0, 100.0)));
    let overlays = fl.sink().overlays.last().unwrap();
    assert!(overlays[0].is_tracked);
    assert!(!overlays[1].is_tracked);
}

#[test]
fn test_pointer_miss_leaves_state() {
    let mut fl = FrameLoop::with_default_config(
        ScriptedSource::new(0, 1),
        ScriptedDetector {
            frames: vec![vec![det(600.0, 300.0, 100.0, 100.0)]].into(),
        },
        RecordingSink::default(),
    )
    .unwrap();
    fl.tick(0.0).unwrap();
    let before = fl.state();

    let hit = fl.handle_pointer(PointerEvent {
        client_x: 5.0,
        client_y: 5.0,
        display: full_display(),
    });
    assert_eq!(hit, None);
    assert_eq!(fl.state(), before);
}

#[test]
fn test_pointer_events_from_another_thread() {
    init_tracing();
    let mut config = FocusConfig::default();
    config.tracker.auto_track = false;
    config.hit_test.mirrored = false;

    let frames = vec![
        vec![det(100.0, 100.0, 50.0, 50.0)],
        vec![det(101.0, 100.0, 50.0, 50.0)],
        vec![det(102.0, 100.0, 50.0, 50.0)],
    ];
    let mut fl = FrameLoop::new(
        ScriptedSource::new(0, 3),
        ScriptedDetector {
            frames: frames.into(),
        },
        RecordingSink::default(),
        config,
    )
    .unwrap();

    fl.tick(0.0).unwrap();
    assert_eq!(fl.state(), TrackState::Idle);

    let tx = fl.pointer_sender();
    thread::spawn(move || {
        tx.send(PointerEvent {
            client_x: 120.0,
            client_y: 120.0,
            display: full_display(),
        })
        .unwrap();
    })
    .join()
    .unwrap();

    // Queued click applies at the start of the next tick, then that frame re-matches it
    fl.tick(16.0).unwrap();
    assert_eq!(fl.state(), TrackState::Locked(Rect::new(101.0, 100.0, 50.0, 50.0)));
}

#[test]
fn test_toggles_change_plan() {
    let mut fl = FrameLoop::with_default_config(
        ScriptedSource::new(0, 2),
        ScriptedDetector {
            frames: vec![
                vec![det(10.0, 10.0, 50.0, 50.0)],
                vec![det(10.0, 10.0, 50.0, 50.0)],
            ]
            .into(),
        },
        RecordingSink::default(),
    )
    .unwrap();

    fl.set_color_pop(true);
    match fl.tick(0.0).unwrap() {
        TickOutcome::Rendered { plan, .. } => {
            assert_eq!(plan.layer_count(), 2);
            assert!(plan.background.has_filter(focustrack_rs::Filter::Grayscale));
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    fl.set_blur_intensity(0.0);
    match fl.tick(16.0).unwrap() {
        TickOutcome::Rendered { plan, .. } => {
            assert_eq!(plan.layer_count(), 1);
            assert_eq!(plan.background.filters, vec![focustrack_rs::Filter::Grayscale]);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}
