#![forbid(unsafe_code)]

//! Waymark Overlay
//!
//! Pure geometry for the tour overlay: choosing which side of the target the
//! explanation panel goes on (and exactly where), and cutting the dimming
//! backdrop into four bands around the highlighted element.
//!
//! # Key Components
//!
//! - [`choose_placement`] - ordered candidate evaluation (right > left >
//!   bottom > top, first fit wins) returning a [`Placement`]
//! - [`compute_mask`] - four-band [`MaskGeometry`] isolating the target
//!
//! Everything here is deterministic and side-effect free; the runtime crate
//! feeds it freshly measured rectangles and pushes the results through the
//! host-page boundary.

pub mod mask;
pub mod placement;

pub use mask::{MASK_GAP, MaskBand, MaskGeometry, compute_mask};
pub use placement::{
    ARROW_LEG, ArrowGeometry, BACKDROP_GAP, MIDDLE_GAP, Placement, PlacementError, Side,
    choose_placement,
};
