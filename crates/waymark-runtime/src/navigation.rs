// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! Navigation state machine for the step sequence.
//!
//! [`Navigator`] replaces the reference implementation's infinite generator
//! with an explicit machine: `NotStarted -> Active -> Ended`, and while
//! active a cursor `(index, direction)` that moves one step per
//! [`advance`](Navigator::advance) call, clamped at both ends. Going past the
//! last step re-yields the last step; past the first re-yields the first. It
//! never wraps and never errors.
//!
//! The UI-level decision to disable "previous" on the first step or swap
//! "next" for "end tour" on the last is a presentation concern layered on
//! [`is_first`](Navigator::is_first)/[`is_last`](Navigator::is_last), not
//! part of this machine.

use waymark_core::error::DefinitionError;
use waymark_core::model::Step;

/// Lifecycle of a tour traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    NotStarted,
    Active,
    /// Terminal.
    Ended,
}

/// Direction of the most recent (or requested) traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Owns the sorted step list and the traversal cursor.
#[derive(Debug)]
pub struct Navigator {
    steps: Vec<Step>,
    phase: TourPhase,
    /// Present only while active.
    cursor: Option<Cursor>,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    last_direction: Direction,
}

impl Navigator {
    /// Build a navigator over an already-sorted step list.
    ///
    /// Empty tours are rejected here so `advance` can always return a step.
    pub fn new(steps: Vec<Step>) -> Result<Self, DefinitionError> {
        if steps.is_empty() {
            return Err(DefinitionError::Empty);
        }
        Ok(Self {
            steps,
            phase: TourPhase::NotStarted,
            cursor: None,
        })
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    /// The active step, if the tour has started.
    pub fn current(&self) -> Option<&Step> {
        self.cursor.map(|c| &self.steps[c.index])
    }

    /// Move the cursor one step in `direction` and return the step now
    /// active.
    ///
    /// The very first call acts as a forward move from a virtual position
    /// before index 0, so it lands on the first step whatever direction was
    /// requested; this is how the tour starts without a separate "start"
    /// transition.
    pub fn advance(&mut self, direction: Direction) -> &Step {
        let index = match self.cursor {
            None => 0,
            Some(cursor) => match direction {
                Direction::Forward => (cursor.index + 1).min(self.steps.len() - 1),
                Direction::Backward => cursor.index.saturating_sub(1),
            },
        };
        self.cursor = Some(Cursor {
            index,
            last_direction: direction,
        });
        self.phase = TourPhase::Active;
        &self.steps[index]
    }

    /// Direction of the last `advance`, if any.
    pub fn last_direction(&self) -> Option<Direction> {
        self.cursor.map(|c| c.last_direction)
    }

    /// Whether the active step is the first of the sequence, by id.
    pub fn is_first(&self) -> bool {
        match self.current() {
            Some(step) => step.id == self.steps[0].id,
            None => false,
        }
    }

    /// Whether the active step is the last of the sequence, by id.
    pub fn is_last(&self) -> bool {
        match self.current() {
            Some(step) => step.id == self.steps[self.steps.len() - 1].id,
            None => false,
        }
    }

    /// Forget the cursor and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.phase = TourPhase::NotStarted;
    }

    /// Enter the terminal phase. The cursor is destroyed with the session.
    pub fn end(&mut self) {
        self.cursor = None;
        self.phase = TourPhase::Ended;
    }
}
