#![forbid(unsafe_code)]

//! Waymark Runtime
//!
//! The stateful half of the tour engine: the navigation state machine that
//! walks the ordered step list, the scroll coordinator that brings off-screen
//! targets into view before anything is measured, the definition loader, and
//! [`TourSession`] which ties them together behind the [`HostPage`] effect
//! boundary.
//!
//! # Key Components
//!
//! - [`Navigator`] - clamped bidirectional traversal with directional memory
//! - [`ScrollCoordinator`] - poll-driven visibility with a settle delay
//! - [`TourSession`] - the orchestrator; sole caller of everything else
//! - [`HostPage`] - the injected rendering collaborator
//!
//! # How it fits in the system
//! The runtime is the only crate with a lifecycle. Geometry comes from
//! `waymark-core`, placement and mask math from `waymark-overlay`; both are
//! pure and get called with rectangles measured *after* any pending scroll
//! has settled, never before.

pub mod loader;
pub mod navigation;
pub mod scroll;
pub mod session;

pub use loader::{DefinitionSource, StaticSource, load_definition};
pub use navigation::{Direction, Navigator, TourPhase};
pub use scroll::{
    SCROLL_ANCHOR_OFFSET, SETTLE_DELAY, ScrollCoordinator, ScrollPoll, ScrollRequest,
};
pub use session::{ControlState, HostPage, SessionError, TourEvent, TourSession};
