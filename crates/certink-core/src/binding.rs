//! Host binding: the editable items the controller manipulates.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Font size assumed when an element reports an unusable size.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// A visual text node owned by the host application.
///
/// Implementors are usually handles into the host's scene (a DOM node, a
/// retained widget, an entry in a layout tree). The controller reads layout
/// through `bounds` and writes position and font size back; it never creates
/// or destroys the node.
pub trait TextElement {
    /// Laid-out bounding box in container-local coordinates.
    fn bounds(&self) -> Rect;

    /// Move the element so its top-left corner sits at `origin`.
    fn set_origin(&mut self, origin: Point);

    /// Current rendered font size.
    fn font_size(&self) -> f64;

    /// Set the rendered font size.
    fn set_font_size(&mut self, size: f64);

    /// Selection marker hook.
    fn set_selected(&mut self, _selected: bool) {}

    /// Center-snap marker hook.
    fn set_snapped(&mut self, _snapped: bool) {}
}

/// Stable identifier of an editable item (e.g. "name", "body", "date").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl PartialEq<str> for ItemKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Notification sent whenever a gesture changes an item's font size.
///
/// The host mirrors the value into its own size control.
pub type SizeChangeCallback = Box<dyn FnMut(&ItemKey, f64)>;

/// One manipulable text field.
#[derive(Debug, Clone)]
pub struct EditableItem<E> {
    pub key: ItemKey,
    pub element: E,
}

impl<E: TextElement> EditableItem<E> {
    pub fn new(key: impl Into<ItemKey>, element: E) -> Self {
        Self {
            key: key.into(),
            element,
        }
    }

    /// The element's font size, falling back to [`DEFAULT_FONT_SIZE`].
    pub fn font_size(&self) -> f64 {
        let size = self.element.font_size();
        if size.is_finite() && size > 0.0 {
            size
        } else {
            DEFAULT_FONT_SIZE
        }
    }

    /// Whether `point` (container-local) lies on the element.
    pub fn hit_test(&self, point: Point) -> bool {
        self.element.bounds().contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label {
        rect: Rect,
        size: f64,
    }

    impl TextElement for Label {
        fn bounds(&self) -> Rect {
            self.rect
        }
        fn set_origin(&mut self, origin: Point) {
            self.rect = self.rect.with_origin(origin);
        }
        fn font_size(&self) -> f64 {
            self.size
        }
        fn set_font_size(&mut self, size: f64) {
            self.size = size;
        }
    }

    #[test]
    fn test_font_size_fallback() {
        let item = EditableItem::new(
            "name",
            Label {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                size: f64::NAN,
            },
        );
        assert_eq!(item.font_size(), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_hit_test() {
        let item = EditableItem::new(
            "body",
            Label {
                rect: Rect::new(10.0, 10.0, 50.0, 30.0),
                size: 18.0,
            },
        );
        assert!(item.hit_test(Point::new(20.0, 20.0)));
        assert!(!item.hit_test(Point::new(5.0, 20.0)));
        assert_eq!(item.key, "body");
    }
}
