//! certink core library
//!
//! Interactive text placement over a background image: a gesture controller
//! that selects, drags and resizes text items with mouse, wheel and touch
//! input, keeps a selection overlay in sync and snaps items to the
//! horizontal center line.

pub mod binding;
pub mod config;
pub mod controller;
pub mod export;
pub mod gesture;
pub mod input;
pub mod overlay;
pub mod selection;
pub mod snap;

pub use binding::{DEFAULT_FONT_SIZE, EditableItem, ItemKey, SizeChangeCallback, TextElement};
pub use config::{ConfigError, ControllerConfig, OverlayColors, SerializableColor, SizeBounds};
pub use controller::{FrameStatus, GestureController};
pub use export::{ExportError, NameList, Rasterizer, export_batch};
pub use gesture::{Gesture, GestureKind};
pub use input::{InputSource, MouseButton, PointerEvent, TouchTracker, touch_distance};
pub use overlay::{OverlayStyle, SelectionOverlay};
pub use selection::{Corner, Handle, corner_handles, corner_resize_delta};
pub use snap::{CenterSnap, snap_center_x};
