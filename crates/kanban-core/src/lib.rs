pub mod config;
pub mod edit_buffer;
pub mod error;
pub mod geometry;
pub mod logging;

pub use config::{AppConfig, ThemeMode};
pub use edit_buffer::EditBuffer;
pub use error::{KanbanError, KanbanResult};
pub use geometry::{Offset, Point, Rect};
pub use logging::{LogEntry, Loggable};
