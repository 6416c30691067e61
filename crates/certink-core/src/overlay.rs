//! Selection overlay: the box and corner handles drawn over the selected item.

use kurbo::{Point, Rect};
use peniko::Color;

use crate::config::OverlayColors;
use crate::selection::{Corner, Handle, corner_handles};

/// Resolved overlay colors.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub stroke: Color,
    pub snapped_stroke: Color,
    pub handle_fill: Color,
}

impl From<OverlayColors> for OverlayStyle {
    fn from(colors: OverlayColors) -> Self {
        Self {
            stroke: colors.stroke.into(),
            snapped_stroke: colors.snapped_stroke.into(),
            handle_fill: colors.handle_fill.into(),
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayColors::default().into()
    }
}

/// Visual projection of the selected item's bounding box, in
/// container-local coordinates.
///
/// The overlay holds no selection of its own; the controller shows, hides
/// and syncs it.
#[derive(Debug, Clone)]
pub struct SelectionOverlay {
    bounds: Rect,
    visible: bool,
    snapped: bool,
    handle_size: f64,
    style: OverlayStyle,
}

impl SelectionOverlay {
    pub fn new(handle_size: f64, style: OverlayStyle) -> Self {
        Self {
            bounds: Rect::ZERO,
            visible: false,
            snapped: false,
            handle_size,
            style,
        }
    }

    /// Make the overlay visible over `bounds`.
    pub fn show(&mut self, bounds: Rect) {
        self.visible = true;
        self.snapped = false;
        self.bounds = Rect::ZERO;
        self.sync(bounds);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.snapped = false;
    }

    /// Track new element bounds. Returns `false` when the bounds are not laid
    /// out yet (zero width or height) and the previous box is kept.
    pub fn sync(&mut self, bounds: Rect) -> bool {
        if !self.visible {
            return false;
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return false;
        }
        self.bounds = bounds;
        true
    }

    pub fn set_snapped(&mut self, snapped: bool) {
        self.snapped = snapped;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped
    }

    /// The box to draw, if any.
    pub fn rect(&self) -> Option<Rect> {
        (self.visible && self.bounds.width() > 0.0 && self.bounds.height() > 0.0)
            .then_some(self.bounds)
    }

    /// Corner handles of the visible box.
    pub fn handles(&self) -> Option<[Handle; 4]> {
        self.rect().map(corner_handles)
    }

    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    /// Which corner handle, if any, is under `point`.
    pub fn hit_test_handle(&self, point: Point) -> Option<Corner> {
        self.handles()?
            .into_iter()
            .find(|handle| handle.hit_test(point, self.handle_size))
            .map(|handle| handle.corner)
    }

    /// Whether `point` falls on the box or any of its handles.
    pub fn contains(&self, point: Point) -> bool {
        match self.rect() {
            Some(rect) => rect.contains(point) || self.hit_test_handle(point).is_some(),
            None => false,
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Outline color, reflecting the snapped marker.
    pub fn stroke_color(&self) -> Color {
        if self.snapped {
            self.style.snapped_stroke
        } else {
            self.style.stroke
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> SelectionOverlay {
        SelectionOverlay::new(16.0, OverlayStyle::default())
    }

    #[test]
    fn test_hidden_by_default() {
        let overlay = overlay();
        assert!(!overlay.is_visible());
        assert!(overlay.rect().is_none());
        assert!(overlay.handles().is_none());
    }

    #[test]
    fn test_show_and_hide() {
        let mut overlay = overlay();
        overlay.show(Rect::new(10.0, 10.0, 60.0, 30.0));
        assert_eq!(overlay.rect(), Some(Rect::new(10.0, 10.0, 60.0, 30.0)));
        overlay.hide();
        assert!(overlay.rect().is_none());
    }

    #[test]
    fn test_zero_size_bounds_are_skipped() {
        let mut overlay = overlay();
        overlay.show(Rect::new(10.0, 10.0, 60.0, 30.0));
        assert!(!overlay.sync(Rect::new(20.0, 20.0, 20.0, 40.0)));
        assert_eq!(overlay.rect(), Some(Rect::new(10.0, 10.0, 60.0, 30.0)));
    }

    #[test]
    fn test_show_unlaid_element_draws_nothing() {
        let mut overlay = overlay();
        overlay.show(Rect::new(10.0, 10.0, 10.0, 10.0));
        assert!(overlay.is_visible());
        assert!(overlay.rect().is_none());
    }

    #[test]
    fn test_handle_hit_test() {
        let mut overlay = overlay();
        overlay.show(Rect::new(100.0, 100.0, 200.0, 150.0));
        assert_eq!(
            overlay.hit_test_handle(Point::new(102.0, 148.0)),
            Some(Corner::BottomLeft)
        );
        assert_eq!(overlay.hit_test_handle(Point::new(150.0, 125.0)), None);
        // Outer half of a handle lies outside the box but still counts
        assert!(overlay.contains(Point::new(205.0, 95.0)));
    }

    #[test]
    fn test_stroke_tracks_snapped_marker() {
        let mut overlay = overlay();
        overlay.show(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(overlay.stroke_color().to_rgba8(), overlay.style().stroke.to_rgba8());
        overlay.set_snapped(true);
        assert_eq!(
            overlay.stroke_color().to_rgba8(),
            overlay.style().snapped_stroke.to_rgba8()
        );
        overlay.hide();
        assert!(!overlay.is_snapped());
    }
}
