use serde::Serialize;

use crate::config::SimulationConfig;
use crate::model::{Membership, Vec2};

use super::regions::RegionLayout;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// Area an entity must stay in, derived from its membership. Never stored;
/// rebuilt whenever the membership or the region layout changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AreaBoundary {
    /// One region, shrunk slightly so chips stay inside the drawn circle.
    Circle { center: Vec2, radius: f64 },
    /// Several regions. `center`/`radius` describe the target area around the
    /// centroid; `circles` are the full member circles used for containment.
    Intersection {
        center: Vec2,
        radius: f64,
        circles: Vec<Circle>,
    },
}

impl AreaBoundary {
    pub fn center(&self) -> Vec2 {
        match self {
            AreaBoundary::Circle { center, .. } | AreaBoundary::Intersection { center, .. } => {
                *center
            }
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            AreaBoundary::Circle { radius, .. } | AreaBoundary::Intersection { radius, .. } => {
                *radius
            }
        }
    }

    /// A circle boundary tests its own (shrunk) radius. An intersection tests
    /// the full radius of every member region, not the shrunk target radius.
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            AreaBoundary::Circle { center, radius } => point.distance(*center) <= *radius,
            AreaBoundary::Intersection { circles, .. } => {
                circles.iter().all(|circle| circle.contains(point))
            }
        }
    }
}

/// `None` for an empty membership or one naming a region missing from the
/// layout.
pub fn area_boundary(
    membership: &Membership,
    layout: &RegionLayout,
    config: &SimulationConfig,
) -> Option<AreaBoundary> {
    let circles = membership
        .iter()
        .map(|name| {
            layout.get(name).map(|region| Circle {
                center: region.center,
                radius: region.radius,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    match circles.as_slice() {
        [] => None,
        [single] => Some(AreaBoundary::Circle {
            center: single.center,
            radius: layout.circle_radius * config.circle_boundary_scale,
        }),
        many => {
            let count = many.len() as f64;
            let sum = many
                .iter()
                .fold(Vec2::ZERO, |acc, circle| acc.add(circle.center));
            Some(AreaBoundary::Intersection {
                center: sum.scale(1.0 / count),
                radius: layout.circle_radius * config.intersection_boundary_scale,
                circles,
            })
        }
    }
}
