pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod render_diff;
pub mod result;
pub mod surface;
pub mod window;

pub use config::{AppConfig, AutoScrollConfig};
pub use error::LanesError;
pub use frame::FrameCoalescer;
pub use logging::{LogEntry, Loggable};
pub use render_diff::{diff, HandleStatus, MaterializedSet, RenderDiff, SyncReport};
pub use result::LanesResult;
pub use surface::{HandleId, RenderSurface};
pub use window::{compute_visible_range, total_extent, Geometry, VisibleRange, WindowState};
