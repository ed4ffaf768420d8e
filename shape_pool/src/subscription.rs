//! Frame subscription and rate limiting.
//!
//! Sources can deliver frames far faster than anyone needs to redraw.
//! Limiting happens where a handler is subscribed, by wrapping it in
//! [`Throttled`]; handlers themselves never look at the clock.

use std::time::{Duration, Instant};

use crate::error::HandlerError;
use crate::observation::Frame;
use crate::surface::DrawingSurface;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// FrameHandler
// ════════════════════════════════════════════════════════════════════════════

/// Something that consumes frames, one at a time.
pub trait FrameHandler {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError>;
}

impl<S: DrawingSurface> FrameHandler for Visualizer<S> {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        self.handle_frame(frame)?;
        Ok(())
    }
}

impl<H: FrameHandler + ?Sized> FrameHandler for &mut H {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        (**self).on_frame(frame)
    }
}

impl<H: FrameHandler + ?Sized> FrameHandler for Box<H> {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        (**self).on_frame(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Throttle
// ════════════════════════════════════════════════════════════════════════════

/// Leading-edge rate limiter: fires on the first call, then at most once
/// per `interval`. Calls in between are dropped, not deferred.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval:   Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Throttle { interval, last_fired: None }
    }

    /// True if a call at `now` should go through; records it if so.
    pub fn ready(&mut self, now: Instant) -> bool {
        let open = match self.last_fired {
            None       => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if open {
            self.last_fired = Some(now);
        }
        open
    }
}

/// A [`FrameHandler`] that only forwards frames its [`Throttle`] lets through.
pub struct Throttled<H> {
    inner:    H,
    throttle: Throttle,
    skipped:  u64,
}

impl<H: FrameHandler> Throttled<H> {
    pub fn new(inner: H, interval: Duration) -> Self {
        Throttled { inner, throttle: Throttle::new(interval), skipped: 0 }
    }

    /// Forward `frame` if the throttle is open at `now`.
    /// Returns whether the inner handler ran.
    pub fn on_frame_at(&mut self, frame: &Frame, now: Instant) -> Result<bool, HandlerError> {
        if !self.throttle.ready(now) {
            self.skipped += 1;
            return Ok(false);
        }
        self.inner.on_frame(frame)?;
        Ok(true)
    }

    /// Frames dropped so far.
    pub fn skipped(&self) -> u64 { self.skipped }

    pub fn inner(&self) -> &H { &self.inner }
    pub fn inner_mut(&mut self) -> &mut H { &mut self.inner }
}

impl<H: FrameHandler> FrameHandler for Throttled<H> {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        self.on_frame_at(frame, Instant::now()).map(|_| ())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subscribers
// ════════════════════════════════════════════════════════════════════════════

/// Ordered set of frame handlers fed from one source.
#[derive(Default)]
pub struct Subscribers<'a> {
    handlers: Vec<Box<dyn FrameHandler + 'a>>,
}

impl<'a> Subscribers<'a> {
    pub fn new() -> Self {
        Subscribers { handlers: Vec::new() }
    }

    /// Subscribe `handler`; it runs after everything subscribed earlier.
    pub fn on_frame<H: FrameHandler + 'a>(&mut self, handler: H) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Subscribe `handler` behind a throttle. A zero interval subscribes
    /// it unthrottled.
    pub fn on_frame_throttled<H: FrameHandler + 'a>(&mut self, handler: H, interval: Duration) -> &mut Self {
        if interval.is_zero() {
            self.on_frame(handler)
        } else {
            self.on_frame(Throttled::new(handler, interval))
        }
    }

    pub fn len(&self) -> usize { self.handlers.len() }
    pub fn is_empty(&self) -> bool { self.handlers.is_empty() }

    /// Feed `frame` to every handler in order. The first error stops the
    /// dispatch and is returned.
    pub fn dispatch(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        for h in &mut self.handlers {
            h.on_frame(frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Vec3;
    use crate::surface::Canvas;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<u64>>>);

    impl FrameHandler for Recorder {
        fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
            self.0.borrow_mut().push(frame.id);
            Ok(())
        }
    }

    struct Failing;

    impl FrameHandler for Failing {
        fn on_frame(&mut self, _: &Frame) -> Result<(), HandlerError> {
            Err(HandlerError::Other("boom".into()))
        }
    }

    #[test]
    fn throttle_is_leading_edge() {
        let t0 = Instant::now();
        let mut t = Throttle::new(Duration::from_millis(200));
        assert!(t.ready(t0));
        assert!(!t.ready(t0 + Duration::from_millis(50)));
        assert!(!t.ready(t0 + Duration::from_millis(199)));
        assert!(t.ready(t0 + Duration::from_millis(200)));
        assert!(!t.ready(t0 + Duration::from_millis(300)));
        assert!(t.ready(t0 + Duration::from_millis(450)));
    }

    #[test]
    fn zero_interval_always_fires() {
        let t0 = Instant::now();
        let mut t = Throttle::new(Duration::ZERO);
        assert!(t.ready(t0));
        assert!(t.ready(t0));
    }

    #[test]
    fn throttled_drops_frames_between_firings() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut h = Throttled::new(Recorder(log.clone()), Duration::from_millis(100));
        let t0 = Instant::now();
        for (id, ms) in [(1, 0), (2, 30), (3, 90), (4, 100), (5, 150), (6, 260)] {
            h.on_frame_at(&Frame::new(id, 0), t0 + Duration::from_millis(ms)).unwrap();
        }
        assert_eq!(*log.borrow(), vec![1, 4, 6]);
        assert_eq!(h.skipped(), 3);
    }

    #[test]
    fn dispatch_runs_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();
        subs.on_frame(Recorder(log.clone())).on_frame(Recorder(log.clone()));
        subs.dispatch(&Frame::new(9, 0)).unwrap();
        assert_eq!(*log.borrow(), vec![9, 9]);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn dispatch_stops_at_first_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();
        subs.on_frame(Failing).on_frame(Recorder(log.clone()));
        assert!(subs.dispatch(&Frame::new(1, 0)).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn visualizer_surface_errors_surface_through_handler() {
        let mut vis = Visualizer::new(Canvas::new(10, 10).with_max_shapes(0));
        let err = vis.on_frame(&Frame::new(1, 0).with_finger(Vec3::default())).unwrap_err();
        assert!(matches!(err, HandlerError::Surface(_)));
    }

    #[test]
    fn borrowed_visualizer_can_subscribe() {
        let mut vis = Visualizer::new(Canvas::new(10, 10));
        {
            let mut subs = Subscribers::new();
            subs.on_frame_throttled(&mut vis, Duration::ZERO);
            subs.dispatch(&Frame::new(1, 0).with_finger(Vec3::default())).unwrap();
        }
        assert_eq!(vis.fingers().len(), 1);
    }
}
