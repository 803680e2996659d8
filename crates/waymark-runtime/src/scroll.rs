// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! Scroll coordination for off-screen targets.
//!
//! [`ScrollCoordinator`] brings a step's target into view before any
//! geometry is computed against it. It is cooperative and poll-driven: the
//! session calls [`begin`](ScrollCoordinator::begin) when a transition
//! starts, then feeds scroll/animation-frame ticks into
//! [`on_tick`](ScrollCoordinator::on_tick) until the coordinator reports
//! [`ScrollPoll::Settled`]. A fixed settle delay after visibility absorbs
//! smooth-scroll deceleration and the reflow caused by inserting the mask
//! and panel right afterwards.
//!
//! Ending the tour mid-scroll calls [`cancel`](ScrollCoordinator::cancel);
//! after that no tick can complete, so no abandoned poll outlives the
//! session.

use tracing::{debug, warn};
use waymark_core::geometry::{RectPx, VIEWPORT_MARGIN, Viewport, in_viewport};
use web_time::{Duration, Instant};

/// Wait after visibility before measuring, letting rendering stabilize.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Where the target's top edge should land relative to the viewport top.
pub const SCROLL_ANCHOR_OFFSET: f64 = 100.0;

/// What the session must do after starting a wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    /// Target already visible (or missing): no scroll, just wait out the
    /// settle delay.
    None,
    /// Issue exactly one smooth scroll by this offset.
    ScrollBy(f64),
}

/// Result of polling a pending wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPoll {
    /// Nothing in flight.
    Idle,
    /// Still scrolling or settling.
    Pending,
    /// Visibility confirmed and the settle delay elapsed; safe to measure.
    Settled,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    /// Scroll issued, polling the visibility predicate each tick.
    Scrolling,
    /// Visible; waiting for rendering to stabilize.
    Settling { until: Instant },
}

/// Poll-driven visibility coordinator. One wait in flight at a time.
#[derive(Debug)]
pub struct ScrollCoordinator {
    state: State,
    margin: f64,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            margin: VIEWPORT_MARGIN,
        }
    }

    /// Start waiting for `target` to become visible.
    ///
    /// A missing target (`None`) is non-fatal: the wait degrades to a plain
    /// settle delay so the tour keeps moving, with a warning for the caller's
    /// logs. A visible target skips the scroll but still settles.
    pub fn begin(
        &mut self,
        target: Option<&RectPx>,
        viewport: Viewport,
        now: Instant,
    ) -> ScrollRequest {
        match target {
            None => {
                warn!("scroll target missing; settling without scroll");
                self.state = State::Settling {
                    until: now + SETTLE_DELAY,
                };
                ScrollRequest::None
            }
            Some(rect) if in_viewport(rect, viewport, self.margin) => {
                self.state = State::Settling {
                    until: now + SETTLE_DELAY,
                };
                ScrollRequest::None
            }
            Some(rect) => {
                let offset = rect.top - SCROLL_ANCHOR_OFFSET;
                debug!(offset, "scrolling target into view");
                self.state = State::Scrolling;
                ScrollRequest::ScrollBy(offset)
            }
        }
    }

    /// Poll the pending wait with a freshly measured target rectangle.
    ///
    /// While scrolling, each tick re-checks the visibility predicate; once it
    /// holds (or the target vanished mid-scroll) the settle phase starts.
    /// Returns [`ScrollPoll::Settled`] exactly once per wait.
    pub fn on_tick(
        &mut self,
        target: Option<&RectPx>,
        viewport: Viewport,
        now: Instant,
    ) -> ScrollPoll {
        match self.state {
            State::Idle => ScrollPoll::Idle,
            State::Scrolling => {
                let visible = match target {
                    Some(rect) => in_viewport(rect, viewport, self.margin),
                    // Vanished mid-scroll: stop polling, settle and move on.
                    None => true,
                };
                if visible {
                    self.state = State::Settling {
                        until: now + SETTLE_DELAY,
                    };
                }
                ScrollPoll::Pending
            }
            State::Settling { until } => {
                if now >= until {
                    self.state = State::Idle;
                    ScrollPoll::Settled
                } else {
                    ScrollPoll::Pending
                }
            }
        }
    }

    /// Abandon the pending wait. Subsequent ticks report [`ScrollPoll::Idle`].
    pub fn cancel(&mut self) {
        if self.is_pending() {
            debug!("scroll wait cancelled");
        }
        self.state = State::Idle;
    }

    /// Whether a wait is in flight.
    pub fn is_pending(&self) -> bool {
        !matches!(self.state, State::Idle)
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
