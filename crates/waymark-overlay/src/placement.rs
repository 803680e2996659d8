// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! Panel placement relative to a highlighted target.
//!
//! [`choose_placement`] evaluates the four cardinal sides in a fixed order
//! (right, left, bottom, top) and takes the first that fits the current
//! viewport. First-fit is deliberate: no scoring, no best-fit search, so the
//! chosen side is predictable and explainable from the inequalities alone.
//!
//! A target can be positioned such that no side fits (a huge panel on a small
//! viewport); that is surfaced as [`PlacementError::NoneFits`] and handled at
//! the session layer, never silently patched here.

use waymark_core::error::GeometryError;
use waymark_core::geometry::{
    PointPx, RectPx, Size, Viewport, fits_bottom, fits_left, fits_right, fits_top,
};

/// Space between the backdrop cut-out and the target element, in pixels.
pub const BACKDROP_GAP: f64 = 5.0;

/// Space between the target element and the panel, in pixels.
pub const MIDDLE_GAP: f64 = 20.0;

/// Leg length of the panel's directional arrow triangle, in pixels.
pub const ARROW_LEG: f64 = 7.0;

/// Which side of the target the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
    Bottom,
    Top,
}

impl Side {
    /// The panel edge carrying the arrow: opposite the placement side, so the
    /// arrow points back at the target.
    pub fn arrow_edge(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
        }
    }
}

/// The arrow indicator on the panel's edge.
///
/// `offset` is relative to the panel's own origin, matching how the host page
/// positions the clip-path element inside the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    /// Panel edge the arrow sits on.
    pub edge: Side,
    pub offset: PointPx,
    /// Triangle leg length.
    pub leg: f64,
}

/// A computed panel position. Ephemeral; recomputed on every step change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    /// Absolute top-left corner of the panel in viewport coordinates.
    pub panel_origin: PointPx,
    pub arrow: ArrowGeometry,
}

/// Why no placement could be produced.
#[derive(Debug)]
pub enum PlacementError {
    /// None of the four candidate sides fits the viewport.
    NoneFits,
    /// The measured target rectangle was malformed.
    Invalid(GeometryError),
}

impl From<GeometryError> for PlacementError {
    fn from(err: GeometryError) -> Self {
        Self::Invalid(err)
    }
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::NoneFits => {
                write!(f, "panel does not fit on any side of the target")
            }
            PlacementError::Invalid(err) => write!(f, "placement input rejected: {err}"),
        }
    }
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlacementError::NoneFits => None,
            PlacementError::Invalid(err) => Some(err),
        }
    }
}

/// Pick a side for the panel and compute its absolute position.
///
/// Candidate order is fixed: right, left, bottom, top; the first side whose
/// fit predicate holds wins. Inputs are never mutated.
pub fn choose_placement(
    target: &RectPx,
    panel: Size,
    viewport: Viewport,
) -> Result<Placement, PlacementError> {
    target.validate()?;

    let side = if fits_right(target, panel, viewport) {
        Side::Right
    } else if fits_left(target, panel, viewport) {
        Side::Left
    } else if fits_bottom(target, panel, viewport) {
        Side::Bottom
    } else if fits_top(target, panel, viewport) {
        Side::Top
    } else {
        return Err(PlacementError::NoneFits);
    };

    Ok(Placement {
        side,
        panel_origin: panel_origin(side, target, panel),
        arrow: arrow_geometry(side, panel),
    })
}

/// Absolute top-left corner of the panel for the chosen side.
fn panel_origin(side: Side, target: &RectPx, panel: Size) -> PointPx {
    let centered_x = target.left - (panel.width / 2.0 - target.width / 2.0);
    match side {
        Side::Right => PointPx {
            x: target.right + MIDDLE_GAP,
            y: target.top - BACKDROP_GAP,
        },
        Side::Left => PointPx {
            x: target.left - (panel.width + MIDDLE_GAP),
            y: target.top - BACKDROP_GAP,
        },
        Side::Bottom => PointPx {
            x: centered_x,
            y: target.bottom + MIDDLE_GAP,
        },
        Side::Top => PointPx {
            x: centered_x,
            y: target.top - (panel.height + MIDDLE_GAP),
        },
    }
}

/// Arrow position on the panel edge, in panel-local coordinates.
///
/// Side placements pin the arrow near the panel's top (vertically centered on
/// short panels by the fixed 9px inset); vertical placements center it
/// horizontally.
fn arrow_geometry(side: Side, panel: Size) -> ArrowGeometry {
    let offset = match side {
        Side::Right => PointPx { x: -ARROW_LEG, y: 9.0 },
        Side::Left => PointPx {
            x: panel.width,
            y: 9.0,
        },
        Side::Bottom => PointPx {
            x: panel.width / 2.0 - ARROW_LEG,
            y: -5.0,
        },
        Side::Top => PointPx {
            x: panel.width / 2.0 - ARROW_LEG,
            y: panel.height,
        },
    };
    ArrowGeometry {
        edge: side.arrow_edge(),
        offset,
        leg: ARROW_LEG,
    }
}
