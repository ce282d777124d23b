pub mod controls_row;
pub mod dashboard;
pub mod scene_view;
pub mod status_strip;
pub mod weather_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use controls_row::{ControlsRow, ControlsRowProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use scene_view::{SceneView, SceneViewProps};
pub use status_strip::{StatusStrip, StatusStripProps};
pub use weather_card::{WeatherCard, WeatherCardProps};
