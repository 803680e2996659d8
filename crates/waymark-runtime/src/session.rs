// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! The tour session orchestrator.
//!
//! [`TourSession`] is the sole caller into the navigator, the scroll
//! coordinator, and the overlay geometry. It owns the whole lifecycle of one
//! tour invocation: welcome modal, step transitions, and teardown. All
//! presentation effects go through the injected [`HostPage`] collaborator;
//! the session never reaches past it into markup or styling.
//!
//! # Transition pipeline
//!
//! Every step change runs the same path: advance the navigator, measure the
//! target, let the scroll coordinator bring it into view, then — only after
//! the settle delay — measure **again** and compute mask and placement from
//! the fresh rectangle. Geometry is never derived from a pre-scroll
//! measurement.
//!
//! # Re-entrancy
//!
//! A transition is in flight from the moment an advance is accepted until
//! its scroll settles. Navigation requests arriving in that window are
//! dropped (and the controls are disabled for its duration), closing the
//! double-click race the reference implementation exhibits. Ending the tour
//! is always accepted and cancels the pending wait.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use waymark_core::error::{DefinitionError, FetchError};
use waymark_core::geometry::{RectPx, Size, Viewport};
use waymark_core::model::{StepContent, TourDefinition, WelcomeContent};
use waymark_overlay::mask::{MASK_GAP, MaskGeometry, compute_mask};
use waymark_overlay::placement::{Placement, choose_placement};
use web_time::Instant;

use crate::navigation::{Direction, Navigator, TourPhase};
use crate::scroll::{ScrollCoordinator, ScrollPoll, ScrollRequest};

/// Why a session could not be created or started.
#[derive(Debug)]
pub enum SessionError {
    /// The definition's kill switch is off; the tour must never start.
    Disabled,
    Fetch(FetchError),
    Definition(DefinitionError),
}

impl From<FetchError> for SessionError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<DefinitionError> for SessionError {
    fn from(err: DefinitionError) -> Self {
        Self::Definition(err)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Disabled => write!(f, "tour display is disabled"),
            SessionError::Fetch(err) => write!(f, "{err}"),
            SessionError::Definition(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Disabled => None,
            SessionError::Fetch(err) => Some(err),
            SessionError::Definition(err) => Some(err),
        }
    }
}

/// Enabled/visible state of the traversal controls.
///
/// Derived from the navigator's first/last queries; a presentation concern
/// layered on the state machine, not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub end_visible: bool,
}

impl ControlState {
    /// Controls for a settled step: first disables Prev and hides End, last
    /// shows only End, everything else shows Prev and Next.
    pub fn for_step(is_first: bool, is_last: bool) -> Self {
        if is_last {
            Self {
                prev_enabled: false,
                next_enabled: false,
                end_visible: true,
            }
        } else {
            Self {
                prev_enabled: !is_first,
                next_enabled: true,
                end_visible: false,
            }
        }
    }

    /// Everything disabled while a transition is in flight.
    pub fn pending() -> Self {
        Self {
            prev_enabled: false,
            next_enabled: false,
            end_visible: false,
        }
    }
}

/// The rendering collaborator: every effect the session has on the page.
///
/// Implementations wrap the actual document/DOM; the session treats these as
/// pure effect boundaries.
pub trait HostPage {
    /// Measure a page element. `None` if the element does not exist.
    fn measure(&self, element_id: &str) -> Option<RectPx>;
    /// Current viewport extent; read fresh on every decision.
    fn viewport(&self) -> Viewport;
    /// Current extent of the explanation panel.
    fn panel_size(&self) -> Size;
    fn insert_overlay(&mut self);
    fn remove_overlay(&mut self);
    fn apply_mask(&mut self, mask: &MaskGeometry);
    fn set_mask_color(&mut self, color: &str);
    fn apply_panel(&mut self, placement: &Placement, content: &StepContent);
    fn apply_controls(&mut self, controls: ControlState);
    fn set_theme_variables(&mut self, theme: &BTreeMap<String, String>);
    /// Issue one smooth scroll by the given vertical offset.
    fn scroll_by(&mut self, offset: f64);
    fn set_scroll_lock(&mut self, locked: bool);
    fn show_welcome(&mut self, content: &WelcomeContent);
    fn close_welcome(&mut self);
}

/// Input surface of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// Welcome modal's Start button.
    StartRequested,
    /// Welcome modal's Skip button.
    SkipRequested,
    NextRequested,
    PrevRequested,
    /// Close button or End Tour button.
    EndRequested,
    /// Remapped Tab: forward, unless already at the last step.
    KeyForward,
    /// Remapped Shift+Tab: backward, unless already at the first step.
    KeyBackward,
    /// Scroll/animation-frame tick driving pending waits.
    Tick,
}

/// One tour invocation over a host page.
pub struct TourSession<H: HostPage> {
    host: H,
    navigator: Navigator,
    scroll: ScrollCoordinator,
    theme: BTreeMap<String, String>,
    welcome: WelcomeContent,
    welcome_open: bool,
    overlay_open: bool,
    /// Direction of the in-flight transition, if one is pending.
    pending: Option<Direction>,
}

impl<H: HostPage> TourSession<H> {
    /// Build a session from a loaded definition.
    ///
    /// Steps are (re-)sorted here so direct construction and
    /// [`load_definition`](crate::loader::load_definition) agree. A disabled
    /// definition is rejected outright.
    pub fn new(mut definition: TourDefinition, host: H) -> Result<Self, SessionError> {
        if !definition.display_enabled {
            return Err(SessionError::Disabled);
        }
        definition.sort_steps();
        let navigator = Navigator::new(definition.steps)?;
        Ok(Self {
            host,
            navigator,
            scroll: ScrollCoordinator::new(),
            theme: definition.theme,
            welcome: definition.welcome,
            welcome_open: false,
            overlay_open: false,
            pending: None,
        })
    }

    /// Lock scrolling, apply the theme, and show the welcome modal.
    pub fn open(&mut self) {
        self.host.set_scroll_lock(true);
        self.host.set_theme_variables(&self.theme);
        self.host.show_welcome(&self.welcome);
        self.welcome_open = true;
    }

    pub fn phase(&self) -> TourPhase {
        self.navigator.phase()
    }

    /// Whether a step transition is waiting on its scroll/settle.
    pub fn is_transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Feed one event into the session. `now` is the caller's clock reading;
    /// pending waits only make progress on [`TourEvent::Tick`].
    pub fn handle(&mut self, event: TourEvent, now: Instant) {
        if self.navigator.phase() == TourPhase::Ended {
            debug!(?event, "event after session end ignored");
            return;
        }
        match event {
            TourEvent::StartRequested => self.start(now),
            TourEvent::SkipRequested => self.skip(),
            TourEvent::NextRequested => self.request(Direction::Forward, false, now),
            TourEvent::PrevRequested => self.request(Direction::Backward, false, now),
            TourEvent::KeyForward => self.request(Direction::Forward, true, now),
            TourEvent::KeyBackward => self.request(Direction::Backward, true, now),
            TourEvent::EndRequested => self.end(),
            TourEvent::Tick => self.tick(now),
        }
    }

    /// End the tour: cancel any pending wait, tear down the overlay, unlock
    /// scrolling. No callback fires after this.
    pub fn end(&mut self) {
        self.scroll.cancel();
        self.pending = None;
        if self.overlay_open {
            self.host.remove_overlay();
            self.overlay_open = false;
        }
        if self.welcome_open {
            self.host.close_welcome();
            self.welcome_open = false;
        }
        self.host.set_scroll_lock(false);
        self.navigator.end();
    }

    fn start(&mut self, now: Instant) {
        if !self.welcome_open || self.navigator.phase() != TourPhase::NotStarted {
            return;
        }
        self.host.close_welcome();
        self.welcome_open = false;
        self.host.insert_overlay();
        self.overlay_open = true;
        // The first transition; the navigator lands on the first step.
        self.begin_transition(Direction::Forward, now);
    }

    fn skip(&mut self) {
        if !self.welcome_open {
            return;
        }
        self.host.close_welcome();
        self.welcome_open = false;
        self.host.set_scroll_lock(false);
        self.navigator.end();
    }

    fn request(&mut self, direction: Direction, from_key: bool, now: Instant) {
        if self.navigator.phase() != TourPhase::Active {
            return;
        }
        if self.pending.is_some() {
            debug!(?direction, "transition in flight; navigation request dropped");
            return;
        }
        // Key events are inert at the matching boundary; the buttons are
        // already disabled there, but clamping would make a stray request
        // harmless anyway.
        if from_key {
            let at_boundary = match direction {
                Direction::Forward => self.navigator.is_last(),
                Direction::Backward => self.navigator.is_first(),
            };
            if at_boundary {
                return;
            }
        }
        self.begin_transition(direction, now);
    }

    fn begin_transition(&mut self, direction: Direction, now: Instant) {
        self.pending = Some(direction);
        self.host.apply_controls(ControlState::pending());
        let step_id = self.navigator.advance(direction).id.clone();

        let target = self.host.measure(&step_id).map(|rect| rect.sanitized());
        let viewport = self.host.viewport();
        if let ScrollRequest::ScrollBy(offset) = self.scroll.begin(target.as_ref(), viewport, now) {
            self.host.scroll_by(offset);
        }
    }

    fn tick(&mut self, now: Instant) {
        let Some(step_id) = self.navigator.current().map(|step| step.id.clone()) else {
            return;
        };
        if self.pending.is_none() {
            return;
        }
        let target = self.host.measure(&step_id).map(|rect| rect.sanitized());
        let viewport = self.host.viewport();
        if self.scroll.on_tick(target.as_ref(), viewport, now) == ScrollPoll::Settled {
            self.complete_transition(now);
        }
    }

    /// The scroll settled: measure fresh and push geometry to the host.
    fn complete_transition(&mut self, now: Instant) {
        let Some(direction) = self.pending.take() else {
            return;
        };
        let Some(step) = self.navigator.current().cloned() else {
            return;
        };

        let Some(rect) = self.host.measure(&step.id) else {
            // Missing target is non-fatal: the step is shown without a
            // precise anchor (no mask, no panel geometry).
            warn!(step = %step.id, "step target missing; shown without anchor");
            self.update_controls();
            return;
        };
        let rect = rect.sanitized();
        let viewport = self.host.viewport();

        self.host.set_mask_color(&step.mask_color);
        let mask = compute_mask(&rect, viewport, MASK_GAP);
        self.host.apply_mask(&mask);

        match choose_placement(&rect, self.host.panel_size(), viewport) {
            Ok(placement) => {
                self.host.apply_panel(&placement, &step.content);
                self.update_controls();
            }
            Err(err) => {
                warn!(step = %step.id, %err, "no panel placement; skipping step");
                self.skip_past(direction, now);
            }
        }
    }

    /// Continue past an unplaceable step in the direction of travel, or end
    /// gracefully if the sequence is exhausted.
    fn skip_past(&mut self, direction: Direction, now: Instant) {
        let exhausted = match direction {
            Direction::Forward => self.navigator.is_last(),
            Direction::Backward => self.navigator.is_first(),
        };
        if exhausted {
            warn!("no placeable step left in this direction; ending tour");
            self.end();
        } else {
            self.begin_transition(direction, now);
        }
    }

    fn update_controls(&mut self) {
        let controls = ControlState::for_step(self.navigator.is_first(), self.navigator.is_last());
        self.host.apply_controls(controls);
    }
}
