// Greedy angular sweep: each ball takes the first collision-free point found
// scanning rings outward from the viewport center (distance ascending, then
// angle ascending from 0 degrees). Not a global optimum.

use crate::config::RadialConfig;
use crate::model::{BallNode, Entity, Obstacle, Vec2};

const MIN_ANGLE_STEP_DEGREES: f64 = 1.0;

pub fn ball_radius(weight: f64, config: &RadialConfig) -> f64 {
    config.base_radius + weight * config.radius_per_weight
}

/// Obstacle used when the caller supplies none: centered, at most
/// `obstacle_max_width` wide.
pub fn default_obstacle(width: f64, config: &RadialConfig) -> Obstacle {
    Obstacle::new(
        config
            .obstacle_max_width
            .min(width * config.obstacle_width_factor),
        config.obstacle_height,
    )
}

struct Sweep<'a> {
    width: f64,
    height: f64,
    /// Sweep origin; also the obstacle's center.
    center: Vec2,
    obstacle: Obstacle,
    config: &'a RadialConfig,
}

impl Sweep<'_> {
    fn is_valid(&self, position: Vec2, radius: f64, placed: &[BallNode]) -> bool {
        let margin = self.config.viewport_margin;
        if position.x - radius < margin
            || position.x + radius > self.width - margin
            || position.y - radius < margin
            || position.y + radius > self.height - margin
        {
            return false;
        }

        if self.obstacle.distance_to(self.center, position)
            < radius + self.config.obstacle_padding
        {
            return false;
        }

        placed.iter().all(|ball| {
            position.distance(ball.center()) >= radius + ball.radius + self.config.ball_gap
        })
    }

    fn find_slot(&self, radius: f64, distance_step: f64, placed: &[BallNode]) -> Option<Vec2> {
        let max_distance = self.width.min(self.height) * self.config.max_distance_factor;
        let angle_step = self.config.angle_step_degrees.max(MIN_ANGLE_STEP_DEGREES);
        let mut distance = self.config.start_distance;
        while distance < max_distance {
            let mut angle = 0.0_f64;
            while angle < 360.0 {
                let position = Vec2::from_polar(self.center, distance, angle.to_radians());
                if self.is_valid(position, radius, placed) {
                    return Some(position);
                }
                angle += angle_step;
            }
            distance += distance_step;
        }
        None
    }

    fn fallback_slot(&self, placed_count: usize) -> Vec2 {
        let count = placed_count as f64;
        let distance = self.config.start_distance + count * self.config.fallback_distance_step;
        let angle = (count * self.config.fallback_angle_step_degrees) % 360.0;
        Vec2::from_polar(self.center, distance, angle.to_radians())
    }
}

/// Places every entity around a central obstacle without overlaps.
///
/// Stateless: previous placements are never reused, so callers rerun it over
/// the whole list on every resize or list change. An entity that finds no
/// valid ring position is still placed, at a formulaic spot, and flagged with
/// `fallback`.
pub fn place_radially(
    width: f64,
    height: f64,
    entities: &[Entity],
    obstacle: Option<Obstacle>,
    config: &RadialConfig,
) -> Vec<BallNode> {
    let obstacle = obstacle.unwrap_or_else(|| default_obstacle(width, config));
    let sweep = Sweep {
        width,
        height,
        center: obstacle.resolved_center(width, height),
        obstacle,
        config,
    };

    let radii: Vec<f64> = entities
        .iter()
        .map(|entity| ball_radius(entity.weight, config))
        .collect();
    let smallest = radii.iter().copied().fold(f64::INFINITY, f64::min);
    // A non-positive step would never leave the first ring.
    let distance_step = (smallest / 2.0).max(1.0);

    let mut placed: Vec<BallNode> = Vec::with_capacity(entities.len());
    for (entity, radius) in entities.iter().zip(radii) {
        let (position, fallback) = match sweep.find_slot(radius, distance_step, &placed) {
            Some(position) => (position, false),
            None => {
                tracing::warn!(id = %entity.id, "no free ring position, using fallback placement");
                (sweep.fallback_slot(placed.len()), true)
            }
        };
        placed.push(BallNode {
            id: entity.id.clone(),
            label: entity.label.clone(),
            weight: entity.weight,
            radius,
            x: position.x,
            y: position.y,
            fallback,
        });
    }

    tracing::debug!(
        balls = placed.len(),
        fallbacks = placed.iter().filter(|ball| ball.fallback).count(),
        "radial placement finished"
    );
    placed
}
