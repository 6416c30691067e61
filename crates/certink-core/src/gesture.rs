//! Gesture state machine.

use kurbo::{Point, Vec2};

use crate::input::InputSource;
use crate::selection::Corner;

/// The gesture currently in progress.
///
/// Exactly one mode is active at a time; every mode carries the item index
/// it acts on and the input model that started it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving an item with a single pointer.
    Dragging {
        item: usize,
        source: InputSource,
        /// Pointer position relative to the element's top-left at press.
        grab: Vec2,
    },
    /// Dragging one of the overlay's corner handles.
    ResizingCorner {
        item: usize,
        source: InputSource,
        corner: Corner,
        /// Container-local pointer position at press.
        start: Point,
        base_size: f64,
    },
    /// Two-finger pinch on an item.
    ResizingPinch {
        item: usize,
        start_distance: f64,
        base_size: f64,
    },
}

/// Payload-free view of [`Gesture`], for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Idle,
    Dragging,
    ResizingCorner,
    ResizingPinch,
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Idle => GestureKind::Idle,
            Gesture::Dragging { .. } => GestureKind::Dragging,
            Gesture::ResizingCorner { .. } => GestureKind::ResizingCorner,
            Gesture::ResizingPinch { .. } => GestureKind::ResizingPinch,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Index of the item this gesture acts on.
    pub fn item(&self) -> Option<usize> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { item, .. }
            | Gesture::ResizingCorner { item, .. }
            | Gesture::ResizingPinch { item, .. } => Some(*item),
        }
    }

    /// Input model that owns this gesture.
    pub fn source(&self) -> Option<InputSource> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { source, .. } | Gesture::ResizingCorner { source, .. } => {
                Some(*source)
            }
            Gesture::ResizingPinch { .. } => Some(InputSource::Touch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_target() {
        let gesture = Gesture::default();
        assert!(gesture.is_idle());
        assert_eq!(gesture.item(), None);
        assert_eq!(gesture.source(), None);
        assert_eq!(gesture.kind(), GestureKind::Idle);
    }

    #[test]
    fn test_pinch_is_touch_only() {
        let gesture = Gesture::ResizingPinch {
            item: 2,
            start_distance: 80.0,
            base_size: 20.0,
        };
        assert_eq!(gesture.item(), Some(2));
        assert_eq!(gesture.source(), Some(InputSource::Touch));
        assert_eq!(gesture.kind(), GestureKind::ResizingPinch);
    }
}
