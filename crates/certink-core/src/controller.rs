//! Gesture controller: selection, drag, corner/wheel/pinch resize and
//! overlay tracking for a fixed set of editable text items.

use kurbo::{Point, Rect, Vec2};

use crate::binding::{EditableItem, ItemKey, SizeChangeCallback, TextElement};
use crate::config::{ConfigError, ControllerConfig, SizeBounds};
use crate::gesture::{Gesture, GestureKind};
use crate::input::{InputSource, MouseButton, PointerEvent, touch_distance};
use crate::overlay::SelectionOverlay;
use crate::selection::{Corner, corner_resize_delta};
use crate::snap::snap_center_x;

/// Whether the host should keep its per-frame callback running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Selection is active; schedule another frame.
    Continue,
    /// Nothing selected; the loop has ended.
    Stop,
}

/// Routes pointer, wheel and touch input to the editable items.
///
/// The controller owns the selection (at most one item), the current
/// [`Gesture`] and the [`SelectionOverlay`]. Items are host elements; the
/// controller only moves them, sets their font size and toggles their
/// markers. Size changes are reported through the callback given at
/// construction, never written to host controls directly.
///
/// The container rect is in client coordinates, the same space pointer
/// events arrive in. Element bounds are container-local.
pub struct GestureController<E> {
    container: Rect,
    items: Vec<EditableItem<E>>,
    config: ControllerConfig,
    bounds: SizeBounds,
    on_size_change: SizeChangeCallback,
    selected: Option<usize>,
    gesture: Gesture,
    overlay: SelectionOverlay,
    /// A frame loop is running (or has been requested).
    tracking: bool,
    /// A frame request has not been picked up by the host yet.
    frame_requested: bool,
}

impl<E: TextElement> GestureController<E> {
    /// Bind `items` inside `container`.
    ///
    /// Keys are expected to be unique; duplicates are logged and the first
    /// item with a key wins lookups.
    pub fn new(
        container: Rect,
        items: Vec<EditableItem<E>>,
        config: ControllerConfig,
        on_size_change: impl FnMut(&ItemKey, f64) + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds()?;

        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.key == item.key) {
                log::warn!("Duplicate editable item key '{}'", item.key);
            }
        }

        let overlay = SelectionOverlay::new(config.handle_size, config.overlay.into());
        log::debug!(
            "Gesture controller bound {} items, sizes {}..{}",
            items.len(),
            bounds.min(),
            bounds.max()
        );

        Ok(Self {
            container,
            items,
            config,
            bounds,
            on_size_change: Box::new(on_size_change),
            selected: None,
            gesture: Gesture::Idle,
            overlay,
            tracking: false,
            frame_requested: false,
        })
    }

    pub fn items(&self) -> &[EditableItem<E>] {
        &self.items
    }

    pub fn item(&self, key: &str) -> Option<&EditableItem<E>> {
        self.index_of(key).map(|i| &self.items[i])
    }

    /// Mutable access for host-driven updates (text changes, relayout).
    /// Do not move an element while a gesture on it is active.
    pub fn item_mut(&mut self, key: &str) -> Option<&mut EditableItem<E>> {
        let index = self.index_of(key)?;
        Some(&mut self.items[index])
    }

    pub fn selected(&self) -> Option<&EditableItem<E>> {
        self.selected.map(|i| &self.items[i])
    }

    pub fn selected_key(&self) -> Option<&ItemKey> {
        self.selected().map(|item| &item.key)
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_kind(&self) -> GestureKind {
        self.gesture.kind()
    }

    pub fn overlay(&self) -> &SelectionOverlay {
        &self.overlay
    }

    pub fn size_bounds(&self) -> SizeBounds {
        self.bounds
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Update the container rect after the host relaid it out.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
        self.sync_overlay();
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    fn to_local(&self, point: Point) -> Point {
        point - self.container.origin().to_vec2()
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.container.size())
    }

    /// Topmost item under a container-local point. Later items draw on top.
    fn hit_item(&self, point: Point) -> Option<usize> {
        self.items.iter().rposition(|item| item.hit_test(point))
    }

    /// Select an item by key, cancelling any gesture in progress.
    /// Returns `false` if no item has that key.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(index) = self.index_of(key) else {
            log::warn!("Cannot select unknown item '{}'", key);
            return false;
        };
        self.cancel_gesture();
        self.select_index(index);
        true
    }

    /// Clear the selection and hide the overlay. Returns `false` (and does
    /// nothing) when nothing was selected.
    pub fn deselect(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.cancel_gesture();
        if let Some(index) = self.selected.take() {
            self.items[index].element.set_selected(false);
            log::debug!("Deselected '{}'", self.items[index].key);
        }
        self.overlay.hide();
        true
    }

    fn select_index(&mut self, index: usize) {
        if self.selected == Some(index) {
            self.sync_overlay();
            return;
        }
        if let Some(previous) = self.selected.take() {
            self.items[previous].element.set_selected(false);
        }

        let item = &mut self.items[index];
        item.element.set_selected(true);
        self.overlay.show(item.element.bounds());
        log::debug!("Selected '{}'", item.key);

        self.selected = Some(index);
        self.start_tracking();
    }

    fn start_tracking(&mut self) {
        if !self.tracking {
            self.tracking = true;
            self.frame_requested = true;
        }
    }

    /// Returns `true` once when the host should start its per-frame
    /// callback. While a loop is already running no new request is made.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Whether a frame loop is running.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Per-frame callback: re-reads the selected element's layout into the
    /// overlay. Ends the loop once the selection is cleared.
    pub fn frame(&mut self) -> FrameStatus {
        if self.selected.is_none() {
            self.tracking = false;
            self.frame_requested = false;
            return FrameStatus::Stop;
        }
        self.sync_overlay();
        FrameStatus::Continue
    }

    fn sync_overlay(&mut self) {
        if let Some(index) = self.selected {
            self.overlay.sync(self.items[index].element.bounds());
        }
    }

    /// Route one input event. Returns `true` when the controller acted on
    /// it; hosts should then prevent the platform default (scrolling,
    /// text selection) and stop propagation.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => {
                if *button != MouseButton::Left {
                    return false;
                }
                self.press(self.to_local(*position), InputSource::Mouse)
            }
            PointerEvent::Move { position } => {
                self.pointer_move(self.to_local(*position), InputSource::Mouse)
            }
            PointerEvent::Up { button, .. } => {
                if *button != MouseButton::Left {
                    return false;
                }
                self.release(InputSource::Mouse)
            }
            PointerEvent::Wheel { position, delta } => self.wheel(self.to_local(*position), *delta),
            PointerEvent::TouchStart { touches } => self.touch_start(touches),
            PointerEvent::TouchMove { touches } => self.touch_move(touches),
            PointerEvent::TouchEnd { touches } => self.touch_end(touches.len()),
            PointerEvent::TouchCancel => self.touch_end(0),
        }
    }

    /// Single-pointer press: handles first, then items, then empty space.
    fn press(&mut self, point: Point, source: InputSource) -> bool {
        if !self.gesture.is_idle() {
            log::trace!("Ignoring press during {:?}", self.gesture.kind());
            return false;
        }

        if let Some(corner) = self.overlay.hit_test_handle(point) {
            return self.start_corner_resize(corner, point, source);
        }

        if let Some(index) = self.hit_item(point) {
            self.select_index(index);
            let origin = self.items[index].element.bounds().origin();
            self.gesture = Gesture::Dragging {
                item: index,
                source,
                grab: point - origin,
            };
            log::debug!("Drag started on '{}'", self.items[index].key);
            return true;
        }

        if self.overlay.contains(point) {
            return true;
        }

        if self.local_bounds().contains(point) {
            return self.deselect();
        }

        false
    }

    fn start_corner_resize(&mut self, corner: Corner, start: Point, source: InputSource) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        let base_size = self.items[index].font_size();
        self.gesture = Gesture::ResizingCorner {
            item: index,
            source,
            corner,
            start,
            base_size,
        };
        log::debug!(
            "Corner resize started on '{}' from {:?} at size {}",
            self.items[index].key,
            corner,
            base_size
        );
        true
    }

    fn pointer_move(&mut self, point: Point, source: InputSource) -> bool {
        match self.gesture {
            Gesture::Dragging {
                item,
                source: owner,
                grab,
            } if owner == source => {
                self.drag_to(item, point - grab);
                true
            }
            Gesture::ResizingCorner {
                item,
                source: owner,
                corner,
                start,
                base_size,
            } if owner == source => {
                let delta = corner_resize_delta(corner, point - start, self.config.resize_sensitivity);
                self.apply_size(item, base_size + delta);
                true
            }
            _ => false,
        }
    }

    fn release(&mut self, source: InputSource) -> bool {
        match self.gesture {
            Gesture::Dragging { source: owner, .. } | Gesture::ResizingCorner { source: owner, .. }
                if owner == source =>
            {
                self.end_gesture();
                true
            }
            _ => false,
        }
    }

    fn wheel(&mut self, point: Point, delta: Vec2) -> bool {
        if delta.y == 0.0 || !self.gesture.is_idle() {
            return false;
        }
        let Some(index) = self.hit_item(point) else {
            return false;
        };
        self.select_index(index);

        let current = self.items[index].font_size();
        let step = if delta.y > 0.0 {
            -self.config.wheel_step
        } else {
            self.config.wheel_step
        };
        self.apply_size(index, current + step);
        true
    }

    fn touch_start(&mut self, touches: &[Point]) -> bool {
        match touches {
            [touch] => self.press(self.to_local(*touch), InputSource::Touch),
            [a, b] => self.start_pinch(self.to_local(*a), self.to_local(*b)),
            _ => false,
        }
    }

    fn start_pinch(&mut self, a: Point, b: Point) -> bool {
        let target = match self.gesture {
            Gesture::Idle => self.hit_item(a).or_else(|| self.hit_item(b)),
            // A second finger joining a one-finger drag turns it into a pinch.
            Gesture::Dragging {
                item,
                source: InputSource::Touch,
                ..
            } => Some(item),
            _ => None,
        };
        let Some(index) = target else {
            return false;
        };

        let start_distance = touch_distance(a, b);
        if start_distance <= 0.0 {
            return false;
        }

        if let Some(item) = self.gesture.item() {
            self.mark_snapped(item, false);
        }
        self.select_index(index);

        let base_size = self.items[index].font_size();
        self.gesture = Gesture::ResizingPinch {
            item: index,
            start_distance,
            base_size,
        };
        log::debug!(
            "Pinch started on '{}' at distance {:.1}, size {}",
            self.items[index].key,
            start_distance,
            base_size
        );
        true
    }

    fn touch_move(&mut self, touches: &[Point]) -> bool {
        match self.gesture {
            Gesture::ResizingPinch {
                item,
                start_distance,
                base_size,
            } => {
                let [a, b] = touches else {
                    return false;
                };
                let distance = touch_distance(*a, *b);
                if distance <= 0.0 || start_distance <= 0.0 {
                    return false;
                }
                self.apply_size(item, base_size * distance / start_distance);
                true
            }
            Gesture::Dragging {
                source: InputSource::Touch,
                ..
            }
            | Gesture::ResizingCorner {
                source: InputSource::Touch,
                ..
            } => match touches {
                [touch] => self.pointer_move(self.to_local(*touch), InputSource::Touch),
                _ => false,
            },
            _ => false,
        }
    }

    fn touch_end(&mut self, remaining: usize) -> bool {
        match self.gesture {
            Gesture::ResizingPinch { .. } if remaining < 2 => {
                self.end_gesture();
                true
            }
            Gesture::Dragging {
                source: InputSource::Touch,
                ..
            }
            | Gesture::ResizingCorner {
                source: InputSource::Touch,
                ..
            } if remaining == 0 => {
                self.end_gesture();
                true
            }
            _ => false,
        }
    }

    /// Move an item toward `origin`, snapping to the horizontal center and
    /// clamping inside the container.
    fn drag_to(&mut self, index: usize, origin: Point) {
        let container = self.container.size();
        let bounds = self.items[index].element.bounds();
        let max_left = (container.width - bounds.width()).max(0.0);
        let max_top = (container.height - bounds.height()).max(0.0);

        let snap = snap_center_x(
            origin.x.clamp(0.0, max_left),
            bounds.width(),
            container.width,
            self.config.snap_threshold,
        );
        let left = snap.left.clamp(0.0, max_left);
        let top = origin.y.clamp(0.0, max_top);
        // A target pushed back by the walls is not centered.
        let snapped = snap.snapped && left == snap.left;

        self.items[index].element.set_origin(Point::new(left, top));
        self.mark_snapped(index, snapped);
        self.sync_overlay();
        log::trace!(
            "Dragged '{}' to ({:.1}, {:.1}){}",
            self.items[index].key,
            left,
            top,
            if snapped { " [snapped]" } else { "" }
        );
    }

    fn mark_snapped(&mut self, index: usize, snapped: bool) {
        if self.overlay.is_snapped() != snapped {
            self.items[index].element.set_snapped(snapped);
            self.overlay.set_snapped(snapped);
        }
    }

    /// Clamp and apply a font size. Notifies the host only when the size
    /// actually changed.
    fn apply_size(&mut self, index: usize, size: f64) -> bool {
        let next = self.bounds.clamp(size);
        let item = &mut self.items[index];
        if (next - item.font_size()).abs() < f64::EPSILON {
            return false;
        }
        item.element.set_font_size(next);
        log::trace!("Resized '{}' to {:.2}", item.key, next);
        (self.on_size_change)(&item.key, next);
        self.sync_overlay();
        true
    }

    /// Finish the active gesture: settle on the center line if within the
    /// threshold, then clear the snap marker.
    fn end_gesture(&mut self) {
        let Some(index) = self.gesture.item() else {
            return;
        };
        log::debug!(
            "{:?} ended on '{}'",
            self.gesture.kind(),
            self.items[index].key
        );
        self.gesture = Gesture::Idle;

        let container = self.container.size();
        let bounds = self.items[index].element.bounds();
        let snap = snap_center_x(
            bounds.x0,
            bounds.width(),
            container.width,
            self.config.snap_threshold,
        );
        if snap.snapped {
            let max_left = (container.width - bounds.width()).max(0.0);
            let left = snap.left.clamp(0.0, max_left);
            if left != bounds.x0 {
                self.items[index]
                    .element
                    .set_origin(Point::new(left, bounds.y0));
            }
        }
        self.mark_snapped(index, false);
        self.sync_overlay();
    }

    /// Drop the active gesture without the end-of-gesture snap.
    fn cancel_gesture(&mut self) {
        if let Some(index) = self.gesture.item() {
            log::debug!("{:?} cancelled", self.gesture.kind());
            self.mark_snapped(index, false);
        }
        self.gesture = Gesture::Idle;
    }
}
