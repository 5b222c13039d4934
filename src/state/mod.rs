// State management module.
// Drives the widget from cache check through fetch to the final rendered view.

pub mod loader;

pub use loader::{DEFAULT_CONTAINER_ID, DisplaySettings, LoadOutcome, ProjectsLoader};
