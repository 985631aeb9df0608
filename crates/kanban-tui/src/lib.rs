pub mod app;
pub mod events;
pub mod hit_map;
pub mod preview;
pub mod surface;
pub mod theme;
pub mod ui;
pub mod wrap;

pub use app::App;
