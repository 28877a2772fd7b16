//! Controller tick
//!
//! The steady-state cycle of the whole sign, run once per tick:
//!
//! 1. Drain at most one pending inbound connection and apply its update
//! 2. Advance the time source
//! 3. Render one frame
//!
//! The order is fixed: a request that lands in a tick is reflected in that
//! same tick's frame. Step 1 is non-blocking, so a quiet network never
//! stalls the render cadence. The fixed sleep between ticks belongs to the
//! embedding (the firmware task runs a ticker around this).

use chronotherm_protocol::{parse_request_line, StatusResponse};

use crate::render::Renderer;
use crate::state::DisplayState;
use crate::time::{TimeSnapshot, TimeSource};
use crate::traits::{Connection, ConnectionSource, Panel, TimeClient};

/// Coordinates request intake, time sync and rendering over one shared
/// [`DisplayState`]
///
/// Owns the state outright: requests mutate it, the renderer reads it, and
/// because both happen sequentially inside [`run_tick`](Self::run_tick)
/// there is never a second writer to guard against.
pub struct Controller<S, T>
where
    S: ConnectionSource,
    T: TimeClient,
{
    state: DisplayState,
    source: S,
    time: TimeSource<T>,
    renderer: Renderer,
}

impl<S, T> Controller<S, T>
where
    S: ConnectionSource,
    T: TimeClient,
{
    pub fn new(source: S, client: T) -> Self {
        Self {
            state: DisplayState::new(),
            source,
            time: TimeSource::new(client),
            renderer: Renderer::new(),
        }
    }

    /// Current display state (request handling is the only writer)
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Local time the renderer will use this tick
    pub fn time_snapshot(&self) -> TimeSnapshot {
        self.time.snapshot()
    }

    /// Run one full tick: handle a request, advance time, render.
    ///
    /// Only the draw target can fail here; everything on the network side
    /// degrades silently (see [`handle_request`](Self::handle_request)).
    pub fn run_tick<P: Panel>(&mut self, panel: &mut P) -> Result<(), P::Error> {
        self.handle_request();
        self.time.tick();
        self.renderer
            .render_frame(panel, &self.state, self.time.snapshot())
    }

    /// Drain at most one pending connection.
    ///
    /// No connection waiting is the normal case and a no-op. A connection
    /// that dies mid-read is treated as an unrecognized request; one that
    /// dies mid-write is abandoned. Either way the state update (if any)
    /// has already been applied and the response reports post-update
    /// state. Returns the response that was sent, mostly for logging.
    pub fn handle_request(&mut self) -> Option<StatusResponse> {
        let mut conn = self.source.poll_connection()?;

        if let Some(update) = conn
            .read_line()
            .ok()
            .and_then(|line| parse_request_line(&line))
        {
            self.state.apply(update);
        }

        let response = StatusResponse::new(self.state.mode(), self.state.value());
        // A peer that hung up before the response is just abandoned
        let _ = conn.write_response(&response);
        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ConnectionError, RequestLine};
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;
    use embedded_graphics::Pixel;
    use heapless::{Deque, Vec};

    const WIDTH: usize = 32;
    const HEIGHT: usize = 16;

    // Shared endpoint between the test and the mock connections it hands
    // out: pending request lines in, written responses out.
    #[derive(Default)]
    struct Wire {
        pending: RefCell<Deque<RequestLine, 4>>,
        responses: RefCell<Vec<StatusResponse, 4>>,
        read_fails: RefCell<bool>,
    }

    impl Wire {
        fn push_request(&self, line: &str) {
            let mut req = RequestLine::new();
            req.push_str(line).unwrap();
            self.pending.borrow_mut().push_back(req).unwrap();
        }
    }

    struct MockSource<'a>(&'a Wire);

    struct MockConnection<'a> {
        line: RequestLine,
        wire: &'a Wire,
    }

    impl<'a> ConnectionSource for MockSource<'a> {
        type Conn = MockConnection<'a>;

        fn poll_connection(&mut self) -> Option<Self::Conn> {
            let line = self.0.pending.borrow_mut().pop_front()?;
            Some(MockConnection { line, wire: self.0 })
        }
    }

    impl Connection for MockConnection<'_> {
        fn read_line(&mut self) -> Result<RequestLine, ConnectionError> {
            if *self.wire.read_fails.borrow() {
                Err(ConnectionError::ReadFailed)
            } else {
                Ok(self.line.clone())
            }
        }

        fn write_response(&mut self, response: &StatusResponse) -> Result<(), ConnectionError> {
            self.wire.responses.borrow_mut().push(*response).unwrap();
            Ok(())
        }
    }

    // Time client pinned to a fixed snapshot
    struct FixedClock(Option<TimeSnapshot>);

    impl TimeClient for FixedClock {
        fn update(&mut self) {}

        fn now(&self) -> Option<TimeSnapshot> {
            self.0
        }
    }

    fn at(hours: u8, minutes: u8) -> FixedClock {
        FixedClock(Some(TimeSnapshot { hours, minutes }))
    }

    // In-memory panel recording the exact frame that was presented
    struct MockPanel {
        pixels: [[Rgb888; WIDTH]; HEIGHT],
        presented: usize,
    }

    impl MockPanel {
        fn new() -> Self {
            Self {
                pixels: [[Rgb888::BLACK; WIDTH]; HEIGHT],
                presented: 0,
            }
        }
    }

    impl OriginDimensions for MockPanel {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for MockPanel {
        type Color = Rgb888;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    impl Panel for MockPanel {
        fn present(&mut self) -> Result<(), Self::Error> {
            self.presented += 1;
            Ok(())
        }
    }

    // Frame a directly-rendered reference state would produce, for
    // comparing against what the controller actually presented.
    fn reference_frame(state: &DisplayState, now: TimeSnapshot) -> [[Rgb888; WIDTH]; HEIGHT] {
        let mut panel = MockPanel::new();
        Renderer::new()
            .render_frame(&mut panel, state, now)
            .unwrap();
        panel.pixels
    }

    #[test]
    fn test_request_reflected_in_same_ticks_frame() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(9, 41));
        let mut panel = MockPanel::new();

        wire.push_request("GET /screen?mode=1&temp=72 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();

        assert_eq!(controller.state().mode(), 1);
        assert_eq!(controller.state().value(), 72);
        assert_eq!(
            wire.responses.borrow().as_slice(),
            &[StatusResponse::new(1, 72)]
        );

        // The frame presented this very tick already shows "72F"
        let mut expected = DisplayState::new();
        expected.set_mode(1);
        expected.set_value(72);
        assert_eq!(panel.presented, 1);
        assert_eq!(
            panel.pixels,
            reference_frame(&expected, TimeSnapshot { hours: 9, minutes: 41 })
        );
    }

    #[test]
    fn test_mode_switch_retains_value_and_shows_clock() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(9, 41));
        let mut panel = MockPanel::new();

        wire.push_request("GET /screen?mode=1&temp=72 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();
        wire.push_request("GET /screen?mode=0 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();

        // Value retained while the clock is showing
        assert_eq!(controller.state().mode(), 0);
        assert_eq!(controller.state().value(), 72);
        assert_eq!(
            wire.responses.borrow().as_slice(),
            &[StatusResponse::new(1, 72), StatusResponse::new(0, 72)]
        );

        let mut expected = DisplayState::new();
        expected.set_value(72);
        assert_eq!(
            panel.pixels,
            reference_frame(&expected, TimeSnapshot { hours: 9, minutes: 41 })
        );
    }

    #[test]
    fn test_malformed_request_answered_with_unchanged_state() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(12, 0));
        let mut panel = MockPanel::new();

        wire.push_request("GET /screen?mode=1&temp=72 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();
        wire.push_request("GET /favicon.ico HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();

        // No state change, but the response still reports current state
        assert_eq!(controller.state().mode(), 1);
        assert_eq!(controller.state().value(), 72);
        assert_eq!(
            wire.responses.borrow().as_slice(),
            &[StatusResponse::new(1, 72), StatusResponse::new(1, 72)]
        );
    }

    #[test]
    fn test_idle_tick_still_renders() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(7, 5));
        let mut panel = MockPanel::new();

        controller.run_tick(&mut panel).unwrap();
        controller.run_tick(&mut panel).unwrap();

        assert!(wire.responses.borrow().is_empty());
        assert_eq!(panel.presented, 2);
        assert_eq!(
            panel.pixels,
            reference_frame(
                &DisplayState::new(),
                TimeSnapshot { hours: 7, minutes: 5 }
            )
        );
    }

    #[test]
    fn test_repeated_request_is_idempotent() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(0, 0));
        let mut panel = MockPanel::new();

        wire.push_request("GET /screen?mode=1&temp=-3 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();
        let first = *controller.state();
        wire.push_request("GET /screen?mode=1&temp=-3 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();

        assert_eq!(*controller.state(), first);
        assert_eq!(
            wire.responses.borrow().as_slice(),
            &[StatusResponse::new(1, -3), StatusResponse::new(1, -3)]
        );
    }

    #[test]
    fn test_dead_connection_still_answered() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(0, 0));

        wire.push_request("GET /screen?mode=1 HTTP/1.1");
        *wire.read_fails.borrow_mut() = true;
        let response = controller.handle_request().unwrap();

        // Read failure means no update, but the exchange is still answered
        assert_eq!(response, StatusResponse::new(0, 0));
        assert_eq!(controller.state().mode(), 0);
    }

    #[test]
    fn test_one_connection_per_tick() {
        let wire = Wire::default();
        let mut controller = Controller::new(MockSource(&wire), at(0, 0));
        let mut panel = MockPanel::new();

        wire.push_request("GET /screen?temp=10 HTTP/1.1");
        wire.push_request("GET /screen?temp=20 HTTP/1.1");
        controller.run_tick(&mut panel).unwrap();

        // Second request waits for the next tick
        assert_eq!(controller.state().value(), 10);
        controller.run_tick(&mut panel).unwrap();
        assert_eq!(controller.state().value(), 20);
    }
}
