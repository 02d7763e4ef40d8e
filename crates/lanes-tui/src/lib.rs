pub mod app;
pub mod columns;
pub mod dialog;
pub mod events;
pub mod input;
pub mod mouse;
pub mod popup;
pub mod surface;
pub mod theme;
pub mod ui;

pub use app::{App, AppMode};
pub use surface::TerminalSurface;
