pub mod label;
pub mod ui_context;

pub use label::{ConsoleLabel, DisplayLabel};
pub use ui_context::{UiContext, UiHandle, UiMessage};
