//! certink application
//!
//! Host-side tooling around the core: replays recorded input sessions
//! against a simulated scene and reports the resulting layout.

mod session;

pub use session::{ItemReport, ItemSpec, Report, ReplayError, SceneText, Session, SizeChange, replay};
