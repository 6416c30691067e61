//! Pointer event normalization for mouse, wheel and touch input.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};

/// Pixels per line for line-based wheel deltas.
pub const LINE_HEIGHT_PX: f64 = 16.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Which input model produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are client coordinates (the same space as the container rect).
/// Touch events carry every touch point that is down after the event, in
/// the order the fingers landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Wheel {
        position: Point,
        delta: Vec2,
    },
    TouchStart {
        touches: Vec<Point>,
    },
    TouchMove {
        touches: Vec<Point>,
    },
    TouchEnd {
        touches: Vec<Point>,
    },
    TouchCancel,
}

impl PointerEvent {
    /// The input model this event came from.
    pub fn source(&self) -> InputSource {
        match self {
            Self::Down { .. } | Self::Up { .. } | Self::Move { .. } | Self::Wheel { .. } => {
                InputSource::Mouse
            }
            Self::TouchStart { .. }
            | Self::TouchMove { .. }
            | Self::TouchEnd { .. }
            | Self::TouchCancel => InputSource::Touch,
        }
    }

    /// Single pointer coordinate for this event: the mouse position, or the
    /// first active touch.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. }
            | Self::Up { position, .. }
            | Self::Move { position }
            | Self::Wheel { position, .. } => Some(*position),
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches.first().copied(),
            Self::TouchCancel => None,
        }
    }

    /// Active touch points, empty for mouse events.
    pub fn touches(&self) -> &[Point] {
        match self {
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches,
            _ => &[],
        }
    }
}

/// Euclidean distance between two touch points.
pub fn touch_distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Translates winit window events into [`PointerEvent`]s.
///
/// winit reports touches one finger at a time, so the tracker keeps the
/// ordered set of fingers that are down and emits the full list with every
/// touch event.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    cursor: Point,
    touches: Vec<(u64, Point)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Number of fingers currently down.
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    fn points(&self) -> Vec<Point> {
        self.touches.iter().map(|(_, p)| *p).collect()
    }

    /// Convert a window event. Returns `None` for events the controller
    /// does not consume.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                Some(PointerEvent::Move {
                    position: self.cursor,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return None,
                };
                let position = self.cursor;
                Some(match state {
                    ElementState::Pressed => PointerEvent::Down { position, button },
                    ElementState::Released => PointerEvent::Up { position, button },
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        // winit reports "scroll up" as positive lines; DOM-style
                        // wheel deltas are positive when scrolling down.
                        Vec2::new(-*x as f64, -*y as f64) * LINE_HEIGHT_PX
                    }
                    MouseScrollDelta::PixelDelta(pos) => Vec2::new(-pos.x, -pos.y),
                };
                Some(PointerEvent::Wheel {
                    position: self.cursor,
                    delta,
                })
            }
            WindowEvent::Touch(touch) => {
                let point = Point::new(touch.location.x, touch.location.y);
                match touch.phase {
                    TouchPhase::Started => {
                        self.touches.push((touch.id, point));
                        Some(PointerEvent::TouchStart {
                            touches: self.points(),
                        })
                    }
                    TouchPhase::Moved => {
                        let slot = self.touches.iter_mut().find(|(id, _)| *id == touch.id)?;
                        slot.1 = point;
                        Some(PointerEvent::TouchMove {
                            touches: self.points(),
                        })
                    }
                    TouchPhase::Ended => {
                        self.touches.retain(|(id, _)| *id != touch.id);
                        Some(PointerEvent::TouchEnd {
                            touches: self.points(),
                        })
                    }
                    TouchPhase::Cancelled => {
                        self.touches.retain(|(id, _)| *id != touch.id);
                        if self.touches.is_empty() {
                            Some(PointerEvent::TouchCancel)
                        } else {
                            Some(PointerEvent::TouchEnd {
                                touches: self.points(),
                            })
                        }
                    }
                }
            }
            _ => None,
        }
    }
}
