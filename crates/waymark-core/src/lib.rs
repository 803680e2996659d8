#![forbid(unsafe_code)]

//! Waymark Core
//!
//! Shared vocabulary for the Waymark guided-tour engine: geometry value
//! types and viewport predicates, the tour definition data model, and the
//! error taxonomy used across the workspace.
//!
//! # Key Components
//!
//! - [`RectPx`] / [`Viewport`] / [`Size`] - measured geometry in CSS pixels
//! - [`in_viewport`] - the visibility predicate the scroll coordinator polls
//! - [`TourDefinition`] / [`Step`] - the externally loaded tour document
//! - [`GeometryError`] / [`DefinitionError`] - failure taxonomy
//!
//! # Role in Waymark
//! `waymark-core` has no state and performs no I/O. The overlay crate builds
//! placement and mask geometry on top of these types; the runtime crate owns
//! everything with a lifecycle.

pub mod error;
pub mod geometry;
pub mod model;

pub use error::{DefinitionError, FetchError, GeometryError};
pub use geometry::{
    PointPx, RectPx, Size, VIEWPORT_MARGIN, Viewport, fits_bottom, fits_left, fits_right, fits_top,
    in_viewport,
};
pub use model::{Step, StepContent, TourDefinition, WelcomeContent};
