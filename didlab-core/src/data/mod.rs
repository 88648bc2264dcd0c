//! Panel loading and synthesis.

mod load;
mod panel;
mod synthetic;

pub use load::{load_panel, LoadError};
pub use panel::Panel;
pub use synthetic::{generate_synthetic_panel, SyntheticPanelSpec};
