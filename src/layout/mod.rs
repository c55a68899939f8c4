mod boundary;
mod error;
mod motion;
mod radial;
mod regions;
pub mod seeded;
mod simulation;
pub(crate) mod types;

pub use boundary::{AreaBoundary, Circle, area_boundary};
pub use error::LayoutError;
pub use motion::{Motion, WAYPOINT_COUNT, motion_for};
pub use radial::{ball_radius, default_obstacle, place_radially};
pub use regions::{REGION_SPECS, Region, RegionLayout, RegionSpec, TITLE_BAND, compute_regions};
pub use simulation::{SimulationReport, simulate};
pub use types::*;

use crate::config::LayoutConfig;
use crate::model::{Entity, Obstacle, Vec2};

/// Region board: three category circles with every categorized entity
/// settled by the force simulation.
pub fn compute_board(
    entities: &[Entity],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<BoardLayout, LayoutError> {
    let regions = compute_regions(width, height, config.regions.radius_multiplier);
    let mut entities = entities.to_vec();
    let report = simulate(&mut entities, &regions, &config.simulation)?;
    Ok(BoardLayout {
        width,
        height,
        regions,
        entities,
        report,
    })
}

/// Floating-ball dashboard: radial placement around the central obstacle
/// plus a drift loop per ball.
pub fn compute_dashboard(
    entities: &[Entity],
    width: f64,
    height: f64,
    obstacle: Option<Obstacle>,
    config: &LayoutConfig,
) -> DashboardLayout {
    let obstacle = obstacle.unwrap_or_else(|| default_obstacle(width, &config.radial));
    let balls = place_radially(width, height, entities, Some(obstacle), &config.radial)
        .into_iter()
        .map(|ball| {
            let motion = motion_for(&ball.id, ball.x, ball.y, &config.motion);
            FloatingBall { ball, motion }
        })
        .collect();
    DashboardLayout {
        width,
        height,
        obstacle_center: obstacle.resolved_center(width, height),
        obstacle,
        balls,
    }
}

/// Top-left corner for drawing an entity's chip: its simulated position, or
/// its area center if it has not been simulated yet. `None` for entities
/// without a membership.
pub fn chip_origin(
    entity: &Entity,
    regions: &RegionLayout,
    config: &LayoutConfig,
    chip_width: f64,
    chip_height: f64,
) -> Option<Vec2> {
    let anchor = match entity.position {
        Some(position) if entity.is_placed() => position,
        _ => area_boundary(&entity.membership, regions, &config.simulation)?.center(),
    };
    Some(Vec2::new(
        anchor.x - chip_width / 2.0,
        anchor.y - chip_height / 2.0,
    ))
}
