//! Viewport pan/zoom state and the cell culling predicate.
//!
//! The viewport tracks a pixel-space pan offset and a zoom factor and
//! answers, per render pass, which grid cells are render candidates.
//! Pan updates apply on every input sample — no smoothing, no inertia,
//! no momentum after release. Culling is a pure predicate over current
//! state; evaluating it mutates nothing, so a renderer may call it for
//! every cell on every frame.

use serde::{Deserialize, Serialize};

/// 2D pixel-space vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Cells beyond the screen edge that still count as render candidates.
pub const CULL_MARGIN: f32 = 10.0;

/// Floor for the zoom factor. Zoom must stay strictly positive; a
/// non-positive request is a caller bug and clamps here instead of
/// poisoning the culling math.
pub const MIN_ZOOM: f32 = 0.01;

/// Pan/zoom state for the city map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in pixel space.
    pub offset: Vec2,
    zoom: f32,
    /// While a pan is active: the cursor position minus the offset at
    /// `begin_pan` time.
    drag_start: Option<Vec2>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            drag_start: None,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to [`MIN_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn is_panning(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Start a pan at the given cursor position.
    pub fn begin_pan(&mut self, cursor: Vec2) {
        self.drag_start = Some(cursor - self.offset);
    }

    /// Apply one pointer-move sample. While a pan is active the offset
    /// follows the cursor directly; returns whether an update applied.
    pub fn update_pan(&mut self, cursor: Vec2) -> bool {
        match self.drag_start {
            Some(start) => {
                self.offset = cursor - start;
                true
            }
            None => false,
        }
    }

    /// Stop tracking the pointer. The offset stays where the last sample
    /// put it.
    pub fn end_pan(&mut self) {
        self.drag_start = None;
    }

    /// Culling predicate: whether the cell at `(cell_x, cell_y)` is a
    /// render candidate for a viewport of `viewport_size` pixels, with a
    /// [`CULL_MARGIN`]-cell margin on every edge.
    pub fn is_cell_visible(&self, cell_x: i32, cell_y: i32, viewport_size: Vec2) -> bool {
        let min_x = -self.offset.x / self.zoom - CULL_MARGIN;
        let max_x = -self.offset.x / self.zoom + viewport_size.x / self.zoom + CULL_MARGIN;
        let min_y = -self.offset.y / self.zoom - CULL_MARGIN;
        let max_y = -self.offset.y / self.zoom + viewport_size.y / self.zoom + CULL_MARGIN;
        let x = cell_x as f32;
        let y = cell_y as f32;
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    }

    /// Inclusive cell-index window implied by the culling predicate,
    /// `(min_x, max_x, min_y, max_y)`, for callers that iterate rows
    /// directly instead of testing every cell.
    pub fn visible_cell_range(&self, viewport_size: Vec2) -> (i32, i32, i32, i32) {
        let min_x = (-self.offset.x / self.zoom - CULL_MARGIN).ceil() as i32;
        let max_x = (-self.offset.x / self.zoom + viewport_size.x / self.zoom + CULL_MARGIN)
            .floor() as i32;
        let min_y = (-self.offset.y / self.zoom - CULL_MARGIN).ceil() as i32;
        let max_y = (-self.offset.y / self.zoom + viewport_size.y / self.zoom + CULL_MARGIN)
            .floor() as i32;
        (min_x, max_x, min_y, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2 { x: 800.0, y: 600.0 };

    #[test]
    fn pan_follows_cursor() {
        let mut vp = Viewport::new();
        vp.offset = Vec2::new(2.0, 2.0);
        vp.begin_pan(Vec2::new(10.0, 10.0));
        assert!(vp.is_panning());

        assert!(vp.update_pan(Vec2::new(20.0, 25.0)));
        assert_eq!(vp.offset, Vec2::new(12.0, 17.0));

        // Every sample applies, even back to the same spot.
        assert!(vp.update_pan(Vec2::new(20.0, 25.0)));
        assert_eq!(vp.offset, Vec2::new(12.0, 17.0));
    }

    #[test]
    fn end_pan_has_no_momentum() {
        let mut vp = Viewport::new();
        vp.begin_pan(Vec2::new(0.0, 0.0));
        vp.update_pan(Vec2::new(50.0, 50.0));
        vp.end_pan();
        assert!(!vp.is_panning());
        assert_eq!(vp.offset, Vec2::new(50.0, 50.0));

        // Samples after release are ignored.
        assert!(!vp.update_pan(Vec2::new(500.0, 500.0)));
        assert_eq!(vp.offset, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn origin_viewport_sees_origin_cells() {
        let vp = Viewport::new();
        assert!(vp.is_cell_visible(0, 0, SCREEN));
        assert!(vp.is_cell_visible(99, 99, SCREEN));
    }

    #[test]
    fn margin_keeps_edge_cells() {
        let vp = Viewport::new();
        // Just off the left edge, inside the margin.
        assert!(vp.is_cell_visible(-10, 0, SCREEN));
        assert!(!vp.is_cell_visible(-11, 0, SCREEN));
    }

    #[test]
    fn panning_shifts_the_window() {
        let mut vp = Viewport::new();
        // Pan the map 500px left: cells near x=0 fall outside the margin.
        vp.begin_pan(Vec2::ZERO);
        vp.update_pan(Vec2::new(-500.0, 0.0));
        assert!(!vp.is_cell_visible(489, 0, SCREEN));
        assert!(vp.is_cell_visible(510, 0, SCREEN));
        assert!(!vp.is_cell_visible(0, 0, SCREEN));
    }

    #[test]
    fn zoom_widens_the_window() {
        let mut vp = Viewport::new();
        vp.set_zoom(0.5);
        // At half zoom the 800px screen spans 1600 cells.
        assert!(vp.is_cell_visible(1_000, 0, SCREEN));
        let vp_default = Viewport::new();
        assert!(!vp_default.is_cell_visible(1_000, 0, SCREEN));
    }

    #[test]
    fn non_positive_zoom_clamps() {
        let mut vp = Viewport::new();
        vp.set_zoom(0.0);
        assert!(vp.zoom() >= MIN_ZOOM);
        vp.set_zoom(-3.0);
        assert!(vp.zoom() >= MIN_ZOOM);
    }

    #[test]
    fn range_agrees_with_predicate() {
        let mut vp = Viewport::new();
        vp.begin_pan(Vec2::ZERO);
        vp.update_pan(Vec2::new(-123.0, 77.0));
        vp.end_pan();
        vp.set_zoom(1.5);

        let (min_x, max_x, min_y, max_y) = vp.visible_cell_range(SCREEN);
        for &x in &[min_x, max_x] {
            for &y in &[min_y, max_y] {
                assert!(vp.is_cell_visible(x, y, SCREEN), "({x}, {y})");
            }
        }
        assert!(!vp.is_cell_visible(min_x - 1, min_y, SCREEN));
        assert!(!vp.is_cell_visible(max_x + 1, min_y, SCREEN));
    }
}
