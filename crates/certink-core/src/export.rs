//! Batch export of one personalized render per recipient name.
//!
//! Rasterization and document assembly are the host's business; this module
//! only sequences them around the controller.

use thiserror::Error;

use crate::binding::TextElement;
use crate::controller::GestureController;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError<E: std::error::Error + 'static> {
    #[error("no recipient names to export")]
    NoNames,
    #[error("failed to rasterize entry {index} ('{name}')")]
    Rasterize {
        index: usize,
        name: String,
        #[source]
        source: E,
    },
}

/// Recipient names, one per line of the host's input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList {
    names: Vec<String>,
}

impl NameList {
    /// Split on newlines, trim, and drop blank lines.
    pub fn parse(text: &str) -> Self {
        Self {
            names: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Renders the current preview into an image.
pub trait Rasterizer<E> {
    type Image;
    type Error: std::error::Error + 'static;

    fn rasterize(&mut self, scene: &GestureController<E>) -> Result<Self::Image, Self::Error>;
}

/// Render one image per name.
///
/// The selection is cleared first so the overlay never shows up in output.
/// `set_name` writes a name into the preview; the first name is written
/// back once the batch finishes, whether it succeeded or not.
pub fn export_batch<E, R, F>(
    controller: &mut GestureController<E>,
    names: &NameList,
    mut set_name: F,
    rasterizer: &mut R,
) -> Result<Vec<R::Image>, ExportError<R::Error>>
where
    E: TextElement,
    R: Rasterizer<E>,
    F: FnMut(&mut GestureController<E>, &str),
{
    let Some(first) = names.first() else {
        return Err(ExportError::NoNames);
    };

    controller.deselect();
    log::info!("Exporting {} entries", names.len());

    let mut images = Vec::with_capacity(names.len());
    let mut failure = None;
    for (index, name) in names.iter().enumerate() {
        set_name(&mut *controller, name);
        match rasterizer.rasterize(controller) {
            Ok(image) => images.push(image),
            Err(source) => {
                log::error!("Failed to rasterize entry {} ('{}'): {}", index, name, source);
                failure = Some(ExportError::Rasterize {
                    index,
                    name: name.to_owned(),
                    source,
                });
                break;
            }
        }
    }

    set_name(&mut *controller, first);

    match failure {
        Some(err) => Err(err),
        None => {
            log::info!("Export complete: {} images", images.len());
            Ok(images)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::EditableItem;
    use crate::config::ControllerConfig;
    use kurbo::{Point, Rect};
    use std::fmt;

    struct Label {
        rect: Rect,
        text: String,
    }

    impl TextElement for Label {
        fn bounds(&self) -> Rect {
            self.rect
        }
        fn set_origin(&mut self, origin: Point) {
            self.rect = self.rect.with_origin(origin);
        }
        fn font_size(&self) -> f64 {
            20.0
        }
        fn set_font_size(&mut self, _size: f64) {}
    }

    #[derive(Debug)]
    struct Boom;

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    /// Captures the name text and overlay visibility of each frame.
    #[derive(Default)]
    struct Snapshot {
        fail_on: Option<usize>,
        calls: usize,
    }

    impl Rasterizer<Label> for Snapshot {
        type Image = (String, bool);
        type Error = Boom;

        fn rasterize(&mut self, scene: &GestureController<Label>) -> Result<Self::Image, Boom> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on == Some(call) {
                return Err(Boom);
            }
            let text = scene.item("name").map(|item| item.element.text.clone()).unwrap_or_default();
            Ok((text, scene.overlay().is_visible()))
        }
    }

    fn controller() -> GestureController<Label> {
        let items = vec![EditableItem::new(
            "name",
            Label {
                rect: Rect::new(100.0, 100.0, 300.0, 140.0),
                text: String::new(),
            },
        )];
        GestureController::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            items,
            ControllerConfig::default(),
            |_, _| {},
        )
        .unwrap()
    }

    fn set_name(controller: &mut GestureController<Label>, name: &str) {
        if let Some(item) = controller.item_mut("name") {
            item.element.text = name.to_owned();
        }
    }

    #[test]
    fn test_parse_names() {
        let names = NameList::parse("  Alice \n\n Bob\n   \nCarol");
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(names.first(), Some("Alice"));
        assert!(NameList::parse(" \n ").is_empty());
    }

    #[test]
    fn test_export_renders_each_name_without_overlay() {
        let mut controller = controller();
        controller.select("name");
        assert!(controller.overlay().is_visible());

        let names = NameList::parse("Alice\nBob");
        let mut rasterizer = Snapshot::default();
        let images = export_batch(&mut controller, &names, set_name, &mut rasterizer).unwrap();

        assert_eq!(
            images,
            vec![("Alice".to_string(), false), ("Bob".to_string(), false)]
        );
        assert!(controller.selected().is_none());
        assert_eq!(controller.item("name").unwrap().element.text, "Alice");
    }

    #[test]
    fn test_export_without_names() {
        let mut controller = controller();
        let result = export_batch(
            &mut controller,
            &NameList::default(),
            set_name,
            &mut Snapshot::default(),
        );
        assert!(matches!(result, Err(ExportError::NoNames)));
    }

    #[test]
    fn test_export_failure_restores_first_name() {
        let mut controller = controller();
        let names = NameList::parse("Alice\nBob\nCarol");
        let mut rasterizer = Snapshot {
            fail_on: Some(1),
            ..Snapshot::default()
        };
        let err = export_batch(&mut controller, &names, set_name, &mut rasterizer).unwrap_err();

        match err {
            ExportError::Rasterize { index, name, .. } => {
                assert_eq!(index, 1);
                assert_eq!(name, "Bob");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(controller.item("name").unwrap().element.text, "Alice");
        assert_eq!(rasterizer.calls, 2);
    }
}
