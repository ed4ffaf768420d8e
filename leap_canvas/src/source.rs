//! Event sources: a real LeapMotion controller or a synthetic stand-in.
//!
//! The public interface is [`SourceEvent`] delivered over a `mpsc`
//! channel. The run loop drains it on the main thread in bounded batches,
//! so no frame is reconciled while the previous one is still being drawn.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use shape_pool::{Frame, Vec3};
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// SourceEvent
// ════════════════════════════════════════════════════════════════════════════

/// Everything a source can emit.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceEvent {
    /// Connection to the tracking service established.
    Connect,
    /// A device was plugged in / became available.
    DeviceConnected,
    /// The device went away.
    DeviceDisconnected,
    /// A tracking snapshot.
    Frame(Frame),
    /// The source gave up; nothing follows.
    Failed(String),
}

// ════════════════════════════════════════════════════════════════════════════
// EventSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`SourceEvent`]s over a channel.
///
/// `run` returns when the receiver hangs up or the source is exhausted.
/// A source that cannot start sends [`SourceEvent::Failed`] before
/// returning, so the consumer can tell a failure from a normal end.
pub trait EventSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>);
}

/// Spawn a source on its own thread and return the receiving end.
pub fn spawn_event_source<E: EventSource>(source: E) -> Receiver<SourceEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapEventSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Event source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library
/// installed. Fingers are the distal tips of every digit, hand by hand in
/// the order LeapC reports them; palms are palm centres.
#[cfg(feature = "leap")]
#[derive(Debug, Default)]
pub struct LeapEventSource;

#[cfg(feature = "leap")]
impl EventSource for LeapEventSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                let _ = tx.send(SourceEvent::Failed(format!("failed to create LeapC connection: {:?}", e)));
                return;
            }
        };
        if let Err(e) = connection.open() {
            let _ = tx.send(SourceEvent::Failed(format!("failed to open LeapMotion connection: {:?}", e)));
            return;
        }

        let start = Instant::now();
        let mut next_id = 0u64;

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            let event = match msg.event() {
                Event::Connection(_)     => SourceEvent::Connect,
                Event::Device(_)         => SourceEvent::DeviceConnected,
                Event::DeviceLost(_)
                | Event::ConnectionLost(_) => SourceEvent::DeviceDisconnected,
                Event::Tracking(tracking) => {
                    next_id += 1;
                    let mut frame = Frame::new(next_id, start.elapsed().as_micros() as u64);
                    for hand in tracking.hands() {
                        for digit in hand.digits() {
                            let tip = digit.distal().next_joint();
                            frame = frame.with_finger(Vec3::new(tip.x as f64, tip.y as f64, tip.z as f64));
                        }
                        let p = hand.palm().position();
                        frame = frame.with_palm(Vec3::new(p.x as f64, p.y as f64, p.z as f64));
                    }
                    SourceEvent::Frame(frame)
                }
                _ => continue,
            };

            if tx.send(event).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimEventSource: synthetic hands (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Palm height the synthetic hands hover around (mm above the device).
const SIM_HOVER_Y:   f64 = 200.0;
/// Distance from palm centre to a synthetic finger tip (mm).
const SIM_FINGER_LEN: f64 = 70.0;

/// Deterministic two-hand choreography.
///
/// Both palms trace Lissajous paths whose depth swings through zero, so
/// circles flip colour and grow as they leave the depth-zero plane. Each
/// hand cycles through 0–5 extended fingers and the second hand drops out
/// for a third of every twelve seconds, which keeps both pools growing and
/// hiding slots.
#[derive(Debug, Clone)]
pub struct SimEventSource {
    /// Time between frames.
    pub period:     Duration,
    /// Stop after this many frames (then report a disconnect).
    pub max_frames: Option<u64>,
}

impl SimEventSource {
    pub fn new(period: Duration) -> Self {
        SimEventSource { period, max_frames: None }
    }

    pub fn with_max_frames(mut self, n: u64) -> Self {
        self.max_frames = Some(n);
        self
    }

    /// The frame the simulation shows `t` seconds after start.
    pub fn frame_at(id: u64, t: f64) -> Frame {
        let mut frame = Frame::new(id, (t * 1e6) as u64);

        for hand in 0..2usize {
            if hand == 1 && (t / 4.0).floor() as i64 % 3 == 2 {
                continue;
            }
            let phase = hand as f64 * std::f64::consts::PI;
            let side  = if hand == 0 { -80.0 } else { 80.0 };
            let palm  = Vec3::new(
                side + 60.0 * (0.9 * t + phase).sin(),
                SIM_HOVER_Y + 80.0 * (1.3 * t + phase).sin(),
                60.0 * (0.5 * t + phase).sin(),
            );

            let extended = ((t * 1.5).floor() as usize + hand * 2) % 6;
            for i in 0..extended {
                let a = -0.9 + i as f64 * 0.45;
                frame = frame.with_finger(Vec3::new(
                    palm.x + a.sin() * SIM_FINGER_LEN,
                    palm.y + a.cos() * SIM_FINGER_LEN,
                    palm.z - 15.0,
                ));
            }
            frame = frame.with_palm(palm);
        }
        frame
    }
}

impl EventSource for SimEventSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        for e in [SourceEvent::Connect, SourceEvent::DeviceConnected] {
            if tx.send(e).is_err() { return; }
        }

        let start = Instant::now();
        let mut id = 0u64;
        loop {
            if self.max_frames.is_some_and(|max| id >= max) {
                debug!(frames = id, "simulation finished");
                let _ = tx.send(SourceEvent::DeviceDisconnected);
                return;
            }
            id += 1;
            let frame = Self::frame_at(id, start.elapsed().as_secs_f64());
            if tx.send(SourceEvent::Frame(frame)).is_err() { return; }
            if !self.period.is_zero() {
                thread::sleep(self.period);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_at_is_deterministic() {
        assert_eq!(SimEventSource::frame_at(3, 1.25), SimEventSource::frame_at(3, 1.25));
    }

    #[test]
    fn finger_counts_cycle_through_zero_to_five() {
        let mut seen = [false; 11];
        for step in 0..200 {
            let f = SimEventSource::frame_at(step, step as f64 * 0.1);
            assert!(f.fingers.len() <= 10);
            seen[f.fingers.len()] = true;
        }
        assert!(seen[0] || seen[2], "a sparse frame should appear");
        assert!(seen.iter().filter(|&&s| s).count() >= 4);
    }

    #[test]
    fn second_hand_drops_out() {
        // t in [8, 12) → (t/4).floor() == 2 → only one palm
        assert_eq!(SimEventSource::frame_at(1, 9.0).palms.len(), 1);
        assert_eq!(SimEventSource::frame_at(1, 1.0).palms.len(), 2);
    }

    #[test]
    fn depth_crosses_zero() {
        let zs: Vec<f64> = (0..100)
            .map(|i| SimEventSource::frame_at(i, i as f64 * 0.2).palms[0].position.z)
            .collect();
        assert!(zs.iter().any(|&z| z < 0.0));
        assert!(zs.iter().any(|&z| z > 0.0));
    }

    #[test]
    fn timestamp_in_microseconds() {
        assert_eq!(SimEventSource::frame_at(1, 0.5).timestamp_us, 500_000);
    }

    #[test]
    fn run_emits_lifecycle_then_frames_then_disconnect() {
        let rx = spawn_event_source(SimEventSource::new(Duration::ZERO).with_max_frames(3));
        let events: Vec<SourceEvent> = rx.iter().collect();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], SourceEvent::Connect);
        assert_eq!(events[1], SourceEvent::DeviceConnected);
        let ids: Vec<u64> = events[2..5]
            .iter()
            .map(|e| match e {
                SourceEvent::Frame(f) => f.id,
                other => panic!("expected frame, got {:?}", other),
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(events[5], SourceEvent::DeviceDisconnected);
    }

    #[test]
    fn run_stops_when_receiver_hangs_up() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        // Would loop forever if send errors were ignored.
        Box::new(SimEventSource::new(Duration::ZERO)).run(tx);
    }
}
