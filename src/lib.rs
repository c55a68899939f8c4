#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config, parse_config};
pub use layout::{
    BoardLayout, DashboardLayout, Layout, LayoutError, compute_board, compute_dashboard,
    compute_regions, motion_for, place_radially, simulate,
};
pub use model::{BallNode, Entity, Membership, Obstacle, Vec2};
pub use render::render_svg;
pub use theme::Theme;
