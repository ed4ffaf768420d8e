//! Top-level wiring: configuration, event dispatch, and the run loop.
//!
//! `EventLoop` owns the throttled `Visualizer` plus any extra frame taps
//! (debug dumps) and processes one `SourceEvent` at a time. `run` connects
//! it to a window and a source.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use shape_pool::{DrawingSurface, Frame, Subscribers, Throttled, Visualizer};
use tracing::{error, info, warn};

use crate::debug::FrameDump;
use crate::error::AppError;
use crate::source::{spawn_event_source, SourceEvent};
use crate::window::WindowSurface;

pub const WINDOW_TITLE: &str = "Leap Canvas";

/// Events taken off the channel between two quit polls.
pub const MAX_EVENTS_PER_PASS: usize = 64;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub width:  usize,
    pub height: usize,
    /// Cap on registered shapes; `None` = unlimited.
    pub max_shapes: Option<usize>,
    /// Minimum time between canvas redraws. Zero redraws every frame.
    pub render_interval: Duration,
    /// Interval for raw JSON frame dumps; `None` disables them.
    pub dump_interval: Option<Duration>,
    /// Frame period of the simulated source.
    pub sim_period: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:           800,
            height:          600,
            max_shapes:      None,
            render_interval: Duration::from_millis(16),
            dump_interval:   Some(Duration::from_millis(200)),
            sim_period:      Duration::from_millis(8),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EventLoop
// ════════════════════════════════════════════════════════════════════════════

/// What handling one event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A connect/disconnect notification; only logged.
    Lifecycle,
    /// A frame; `drawn` is false when the redraw throttle dropped it.
    Frame { drawn: bool },
}

/// Outcome of one [`EventLoop::drain`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pass {
    /// Events taken off the channel.
    pub received: usize,
    /// Whether the canvas was redrawn.
    pub drawn:    bool,
    /// The source hung up; nothing more will arrive.
    pub finished: bool,
}

pub struct EventLoop<S> {
    visualizer: Throttled<Visualizer<S>>,
    taps:       Subscribers<'static>,
    frames:     u64,
    superseded: u64,
}

impl<S: DrawingSurface> EventLoop<S> {
    pub fn new(visualizer: Visualizer<S>, cfg: &AppConfig) -> Self {
        let mut taps = Subscribers::new();
        if let Some(interval) = cfg.dump_interval {
            taps.on_frame_throttled(FrameDump::new(), interval);
        }
        EventLoop {
            visualizer: Throttled::new(visualizer, cfg.render_interval),
            taps,
            frames: 0,
            superseded: 0,
        }
    }

    /// Process one event as of `now`.
    pub fn handle(&mut self, event: SourceEvent, now: Instant) -> Result<Step, AppError> {
        match event {
            SourceEvent::Connect => {
                info!("Successfully connected.");
                Ok(Step::Lifecycle)
            }
            SourceEvent::DeviceConnected => {
                info!("A Leap device has been connected.");
                Ok(Step::Lifecycle)
            }
            SourceEvent::DeviceDisconnected => {
                warn!("A Leap device has been disconnected.");
                Ok(Step::Lifecycle)
            }
            SourceEvent::Frame(frame) => {
                self.frames += 1;
                self.taps.dispatch(&frame)?;
                let drawn = self.visualizer.on_frame_at(&frame, now)?;
                Ok(Step::Frame { drawn })
            }
            SourceEvent::Failed(reason) => Err(AppError::Device(reason)),
        }
    }

    /// Take up to `budget` events off `events` and process them.
    ///
    /// Lifecycle events are handled in arrival order. Of the frames in the
    /// batch only the newest is handled; older ones are counted as
    /// superseded. A pass therefore redraws at most once, however deep
    /// the backlog.
    pub fn drain(&mut self, events: &Receiver<SourceEvent>, budget: usize) -> Result<Pass, AppError> {
        let mut pass = Pass::default();
        let mut latest: Option<Frame> = None;

        while pass.received < budget {
            let event = match events.try_recv() {
                Ok(event)                       => event,
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => { pass.finished = true; break; }
            };
            pass.received += 1;
            match event {
                SourceEvent::Frame(frame) => {
                    if latest.replace(frame).is_some() {
                        self.frames += 1;
                        self.superseded += 1;
                    }
                }
                other => { self.handle(other, Instant::now())?; }
            }
        }

        if let Some(frame) = latest {
            if let Step::Frame { drawn } = self.handle(SourceEvent::Frame(frame), Instant::now())? {
                pass.drawn = drawn;
            }
        }
        Ok(pass)
    }

    /// Frames received, drawn or not.
    pub fn frames(&self) -> u64 { self.frames }
    /// Frames the redraw throttle dropped.
    pub fn skipped(&self) -> u64 { self.visualizer.skipped() }
    /// Frames dropped because a newer one arrived in the same pass.
    pub fn superseded(&self) -> u64 { self.superseded }

    pub fn visualizer(&self) -> &Visualizer<S> { self.visualizer.inner() }
    pub fn surface_mut(&mut self) -> &mut S { self.visualizer.inner_mut().surface_mut() }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Opens the window, starts the event source (simulation by default,
/// hardware with `--features leap`) and drains its events until the
/// window closes or the source goes away.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let surface = WindowSurface::new(WINDOW_TITLE, cfg.width, cfg.height, cfg.max_shapes)?;
    let mut app = EventLoop::new(Visualizer::new(surface), &cfg);

    #[cfg(feature = "leap")]
    let events = spawn_event_source(crate::source::LeapEventSource);
    #[cfg(not(feature = "leap"))]
    let events = spawn_event_source(crate::source::SimEventSource::new(cfg.sim_period));

    loop {
        if app.surface_mut().poll_quit() {
            info!(
                frames = app.frames(),
                skipped = app.skipped(),
                superseded = app.superseded(),
                "window closed"
            );
            return Ok(());
        }

        let pass = app.drain(&events, MAX_EVENTS_PER_PASS)?;
        if pass.finished {
            info!(frames = app.frames(), "event source finished");
            return Ok(());
        }

        // Nothing redrawn this pass: keep the window alive (rate-limited).
        if !pass.drawn {
            app.surface_mut().pump();
        }
    }
}

/// Process exit status for the outcome of [`run`]; errors are logged.
pub fn exit_status(result: &Result<(), AppError>) -> i32 {
    match result {
        Ok(())  => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
