// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! Backdrop mask geometry.
//!
//! The dimming backdrop is four rectangular bands whose union is the viewport
//! minus a padded hole around the target. Negative band extents mean the
//! padded target sticks out of the viewport; that is cosmetic-only
//! degeneracy, so extents clamp to zero instead of erroring.

use waymark_core::geometry::{PointPx, RectPx, Viewport};

/// Padding between the target element and the mask cut-out, in pixels.
pub const MASK_GAP: f64 = 5.0;

/// One rectangular band of the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskBand {
    /// Top-left corner in viewport coordinates.
    pub origin: PointPx,
    pub width: f64,
    pub height: f64,
}

impl MaskBand {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: PointPx { x, y },
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Band area; zero for clamped degenerate bands.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Four bands tiling the viewport around a padded hole.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskGeometry {
    /// Full-height band left of the hole, anchored top-left.
    pub left: MaskBand,
    /// Full-height band right of the hole, anchored top-right.
    pub right: MaskBand,
    /// Band above the hole, exactly as wide as the padded target.
    pub top: MaskBand,
    /// Band below the hole, same width, anchored to the viewport bottom.
    pub bottom: MaskBand,
}

/// Cut the backdrop around `target`, padded by `gap` on every side.
pub fn compute_mask(target: &RectPx, viewport: Viewport, gap: f64) -> MaskGeometry {
    let hole_left = target.left - gap;
    let hole_width = target.width + 2.0 * gap;

    MaskGeometry {
        left: MaskBand::new(0.0, 0.0, hole_left, viewport.height),
        right: MaskBand::new(
            target.right + gap,
            0.0,
            viewport.width - (target.right + gap),
            viewport.height,
        ),
        top: MaskBand::new(hole_left, 0.0, hole_width, target.top - gap),
        bottom: MaskBand::new(
            hole_left,
            target.bottom + gap,
            hole_width,
            viewport.height - (target.bottom + gap),
        ),
    }
}
