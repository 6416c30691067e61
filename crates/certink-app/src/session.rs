//! Headless session replay: a recorded input script run against a scene.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use certink_core::{
    ConfigError, ControllerConfig, EditableItem, FrameStatus, GestureController, PointerEvent,
    TextElement,
};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One text field as laid out when the session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub key: String,
    pub bounds: Rect,
    pub font_size: f64,
}

/// A recorded session: scene, optional configuration, input script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub container: Rect,
    #[serde(default)]
    pub config: ControllerConfig,
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Stand-in for a rendered text node. Its box scales with the font size,
/// the way real text reflows.
#[derive(Debug, Clone)]
pub struct SceneText {
    origin: Point,
    base_size: Size,
    base_font_size: f64,
    font_size: f64,
    selected: bool,
}

impl SceneText {
    fn new(spec: &ItemSpec) -> Self {
        Self {
            origin: spec.bounds.origin(),
            base_size: spec.bounds.size(),
            base_font_size: spec.font_size,
            font_size: spec.font_size,
            selected: false,
        }
    }
}

impl TextElement for SceneText {
    fn bounds(&self) -> Rect {
        let scale = if self.base_font_size > 0.0 {
            self.font_size / self.base_font_size
        } else {
            1.0
        };
        Rect::from_origin_size(self.origin, self.base_size * scale)
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Final state of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub key: String,
    pub bounds: Rect,
    pub font_size: f64,
}

/// Host-side size control update, as delivered by the size callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChange {
    pub key: String,
    pub size: f64,
}

/// Outcome of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub items: Vec<ItemReport>,
    pub selected: Option<String>,
    pub overlay: Option<Rect>,
    pub consumed_events: usize,
    pub frames: usize,
    pub size_changes: Vec<SizeChange>,
}

/// Run the session's script and report the resulting layout.
///
/// One animation frame is simulated after every event while the
/// controller's frame loop is running.
pub fn replay(session: &Session) -> Result<Report, ReplayError> {
    let items = session
        .items
        .iter()
        .map(|spec| EditableItem::new(spec.key.as_str(), SceneText::new(spec)))
        .collect();

    let changes: Rc<RefCell<Vec<SizeChange>>> = Rc::default();
    let sink = changes.clone();
    let mut controller = GestureController::new(
        session.container,
        items,
        session.config.clone(),
        move |key, size| {
            // Host size controls keep one decimal.
            let size = (size * 10.0).round() / 10.0;
            sink.borrow_mut().push(SizeChange {
                key: key.to_string(),
                size,
            });
        },
    )?;

    let mut consumed_events = 0;
    let mut frames = 0;
    let mut frame_loop = false;
    for event in &session.events {
        if controller.handle_event(event) {
            consumed_events += 1;
        }
        if controller.take_frame_request() {
            frame_loop = true;
        }
        if frame_loop {
            frames += 1;
            frame_loop = controller.frame() == FrameStatus::Continue;
        }
    }
    log::info!(
        "Replayed {} events ({} consumed, {} frames)",
        session.events.len(),
        consumed_events,
        frames
    );

    let items = controller
        .items()
        .iter()
        .map(|item| ItemReport {
            key: item.key.to_string(),
            bounds: item.element.bounds(),
            font_size: item.element.font_size(),
        })
        .collect();

    Ok(Report {
        items,
        selected: controller.selected_key().map(ToString::to_string),
        overlay: controller.overlay().rect(),
        consumed_events,
        frames,
        size_changes: changes.take(),
    })
}
