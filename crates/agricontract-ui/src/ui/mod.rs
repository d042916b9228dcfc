pub(crate) mod bootstrap;
pub(crate) mod features;
pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod theme;
pub(crate) mod view_state;

pub use bootstrap::Ui;
