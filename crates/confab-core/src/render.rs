//! Rendering seam for the turn loop.
//!
//! The loop emits an abstract sequence of calls — indicator start/tick/stop
//! and "full text so far" — and stays ignorant of how they are drawn. The
//! terminal front-end animates a spinner and prints incrementally; a test
//! renderer just records the calls.

/// Receiver of the turn loop's display callbacks.
///
/// Call order per turn: `indicator_start`, zero or more `indicator_tick`s,
/// exactly one `indicator_stop`, then zero or more `render`s with the
/// accumulated reply. `render` is throttled to the refresh cadence, but the
/// final accumulated text is always rendered before the turn ends.
pub trait TurnRenderer {
    /// The request is in flight and no token has arrived yet.
    fn indicator_start(&mut self);

    /// Refresh tick while still waiting; a chance to animate the indicator.
    fn indicator_tick(&mut self) {}

    /// The wait is over — first delta arrived, or the turn ended without one.
    fn indicator_stop(&mut self);

    /// The full reply accumulated so far.
    fn render(&mut self, text_so_far: &str);
}
