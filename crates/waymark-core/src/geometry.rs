#![forbid(unsafe_code)]

//! Geometric primitives for viewport math.
//!
//! All values are CSS pixels as `f64`. Rectangles come from measuring a page
//! element or the explanation panel; the viewport is read fresh for every
//! decision and never cached, since it can change between steps.

use crate::error::GeometryError;

/// Vertical margin used by the in-viewport predicate, in pixels.
///
/// The predicate is deliberately asymmetric: top/bottom edges must clear this
/// margin, the left bound is fixed at zero, and the right bound is the raw
/// viewport width. Matches the measured behavior of the host page.
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// A measured rectangle in viewport coordinates.
///
/// Immutable value; `top`/`left`/`right`/`bottom` are edge offsets and
/// `width`/`height` the extents, all in the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectPx {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl RectPx {
    /// Build a rectangle from its top-left corner and extents.
    pub fn from_bounds(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Reject NaN coordinates and negative extents.
    ///
    /// Measurements are taken from an environment we don't control; a NaN or
    /// negative extent means the measurement itself is broken and any geometry
    /// derived from it would be garbage.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let fields = [
            self.top,
            self.left,
            self.right,
            self.bottom,
            self.width,
            self.height,
        ];
        if fields.iter().any(|v| v.is_nan()) {
            return Err(GeometryError::Invalid {
                detail: "rectangle contains NaN".to_string(),
            });
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(GeometryError::Invalid {
                detail: format!("negative extent {}x{}", self.width, self.height),
            });
        }
        Ok(())
    }

    /// Clamp a possibly-broken measurement into something usable.
    ///
    /// NaN coordinates become zero and negative extents are clamped to zero
    /// (with edges recomputed). Production fallback for measurements that
    /// would fail [`validate`](Self::validate).
    pub fn sanitized(&self) -> Self {
        let nz = |v: f64| if v.is_nan() { 0.0 } else { v };
        let top = nz(self.top);
        let left = nz(self.left);
        let width = nz(self.width).max(0.0);
        let height = nz(self.height).max(0.0);
        Self::from_bounds(top, left, width, height)
    }
}

/// The visible window extent. Read fresh on every placement decision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Extent of the explanation panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointPx {
    pub x: f64,
    pub y: f64,
}

/// Whether `rect` lies fully inside the viewport, with a vertical margin.
///
/// Bounds are `[margin, viewport.height - margin]` vertically and
/// `[0, viewport.width]` horizontally. The horizontal bounds intentionally
/// carry no margin; see [`VIEWPORT_MARGIN`].
pub fn in_viewport(rect: &RectPx, viewport: Viewport, margin: f64) -> bool {
    rect.top >= margin
        && rect.left >= 0.0
        && rect.bottom <= viewport.height - margin
        && rect.right <= viewport.width
}

/// Room for the panel to the right of the target.
pub fn fits_right(target: &RectPx, panel: Size, viewport: Viewport) -> bool {
    viewport.width - target.right > panel.width && viewport.height - target.top > panel.height
}

/// Room for the panel to the left of the target.
pub fn fits_left(target: &RectPx, panel: Size, viewport: Viewport) -> bool {
    target.left > panel.width && viewport.height - target.top > panel.height
}

/// Horizontal overhang of a panel centered on the target's midpoint.
fn centered_overhang(target: &RectPx, panel: Size) -> f64 {
    panel.width / 2.0 - target.width / 2.0
}

/// Room for the panel below the target, horizontally centered on it.
///
/// The vertical term subtracts `target.bottom` twice, matching the observed
/// behavior of the reference page rather than plain remaining space.
pub fn fits_bottom(target: &RectPx, panel: Size, viewport: Viewport) -> bool {
    let overhang = centered_overhang(target, panel);
    viewport.height - target.bottom - target.bottom > panel.height
        && target.left > overhang
        && viewport.width - target.right > overhang
}

/// Room for the panel above the target, horizontally centered on it.
pub fn fits_top(target: &RectPx, panel: Size, viewport: Viewport) -> bool {
    let overhang = centered_overhang(target, panel);
    target.top > panel.height && target.left > overhang && viewport.width - target.right > overhang
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1200.0, 800.0)
    }

    #[test]
    fn from_bounds_computes_edges() {
        let rect = RectPx::from_bounds(100.0, 1000.0, 100.0, 50.0);
        assert_eq!(rect.right, 1100.0);
        assert_eq!(rect.bottom, 150.0);
        assert_eq!(rect.center_x(), 1050.0);
    }

    #[test]
    fn validate_rejects_nan() {
        let rect = RectPx {
            top: f64::NAN,
            ..RectPx::default()
        };
        assert!(rect.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_extent() {
        let rect = RectPx {
            width: -1.0,
            ..RectPx::default()
        };
        assert!(rect.validate().is_err());
    }

    #[test]
    fn sanitized_clamps_nan_and_negatives() {
        let rect = RectPx {
            top: f64::NAN,
            left: 10.0,
            right: 5.0,
            bottom: f64::NAN,
            width: -4.0,
            height: 20.0,
        };
        let clean = rect.sanitized();
        assert!(clean.validate().is_ok());
        assert_eq!(clean.top, 0.0);
        assert_eq!(clean.width, 0.0);
        assert_eq!(clean.right, 10.0);
        assert_eq!(clean.bottom, 20.0);
    }

    #[test]
    fn in_viewport_respects_vertical_margin_only() {
        let vp = viewport();
        // Flush against the left edge: fine.
        let at_left = RectPx::from_bounds(50.0, 0.0, 100.0, 50.0);
        assert!(in_viewport(&at_left, vp, VIEWPORT_MARGIN));
        // Within 10px of the top: rejected.
        let near_top = RectPx::from_bounds(5.0, 100.0, 100.0, 50.0);
        assert!(!in_viewport(&near_top, vp, VIEWPORT_MARGIN));
        // Within 10px of the bottom: rejected.
        let near_bottom = RectPx::from_bounds(745.0, 100.0, 100.0, 50.0);
        assert!(!in_viewport(&near_bottom, vp, VIEWPORT_MARGIN));
        // Flush against the right edge: fine, no horizontal margin.
        let at_right = RectPx::from_bounds(50.0, 1100.0, 100.0, 50.0);
        assert!(in_viewport(&at_right, vp, VIEWPORT_MARGIN));
    }

    #[test]
    fn in_viewport_rejects_offscreen() {
        let vp = viewport();
        let below = RectPx::from_bounds(900.0, 100.0, 100.0, 50.0);
        assert!(!in_viewport(&below, vp, VIEWPORT_MARGIN));
        let off_left = RectPx::from_bounds(100.0, -20.0, 100.0, 50.0);
        assert!(!in_viewport(&off_left, vp, VIEWPORT_MARGIN));
    }

    #[test]
    fn fits_right_needs_width_and_height() {
        let vp = viewport();
        let panel = Size::new(300.0, 150.0);
        let roomy = RectPx::from_bounds(100.0, 100.0, 100.0, 50.0);
        assert!(fits_right(&roomy, panel, vp));
        // 1200 - 1100 = 100 < 300
        let cramped = RectPx::from_bounds(100.0, 1000.0, 100.0, 50.0);
        assert!(!fits_right(&cramped, panel, vp));
    }

    #[test]
    fn fits_left_mirror() {
        let vp = viewport();
        let panel = Size::new(300.0, 150.0);
        let target = RectPx::from_bounds(100.0, 1000.0, 100.0, 50.0);
        assert!(fits_left(&target, panel, vp));
        let flush = RectPx::from_bounds(100.0, 0.0, 100.0, 50.0);
        assert!(!fits_left(&flush, panel, vp));
    }

    #[test]
    fn fits_bottom_subtracts_bottom_twice() {
        let vp = viewport();
        let panel = Size::new(100.0, 150.0);
        // 800 - 300 - 300 = 200 > 150, plenty of centering room.
        let target = RectPx::from_bounds(250.0, 500.0, 200.0, 50.0);
        assert!(fits_bottom(&target, panel, vp));
        // 800 - 350 - 350 = 100 < 150 even though plain remaining space
        // (800 - 350 = 450) would fit.
        let lower = RectPx::from_bounds(300.0, 500.0, 200.0, 50.0);
        assert!(!fits_bottom(&lower, panel, vp));
    }

    #[test]
    fn fits_top_needs_headroom_and_centering() {
        let vp = viewport();
        let panel = Size::new(100.0, 150.0);
        let target = RectPx::from_bounds(400.0, 500.0, 200.0, 50.0);
        assert!(fits_top(&target, panel, vp));
        let shallow = RectPx::from_bounds(100.0, 500.0, 200.0, 50.0);
        assert!(!fits_top(&shallow, panel, vp));
        // Wide panel, narrow target flush left: overhang doesn't fit.
        let wide = Size::new(600.0, 100.0);
        let flush = RectPx::from_bounds(400.0, 10.0, 50.0, 50.0);
        assert!(!fits_top(&flush, wide, vp));
    }
}
