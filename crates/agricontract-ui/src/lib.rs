//! Terminal frontend for AgriContract.
//!
//! Everything drawn here comes from the app crate's `frontend::ui_boundary`.

mod ui;

pub use ui::Ui;
