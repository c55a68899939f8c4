use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::Serialize;

use crate::model::{Membership, Vec2};

/// Vertical band at the top of the container kept for the title.
pub const TITLE_BAND: f64 = 100.0;
const TRIANGLE_SCALE: f64 = 0.36;

pub struct RegionSpec {
    pub name: &'static str,
    pub color: &'static str,
    pub angle: f64,
}

pub const REGION_SPECS: [RegionSpec; 3] = [
    RegionSpec {
        name: "family",
        color: "rose",
        angle: -PI / 2.0,
    },
    RegionSpec {
        name: "friends",
        color: "emerald",
        angle: PI / 6.0,
    },
    RegionSpec {
        name: "work",
        color: "sky",
        angle: 5.0 * PI / 6.0,
    },
];

const FALLBACK_CIRCLE_RADIUS: f64 = 80.0;
const FALLBACK_TRIANGLE_HEIGHT: f64 = 300.0;
const FALLBACK_CENTERS: [(f64, f64); 3] = [(250.0, 130.0), (390.0, 260.0), (110.0, 260.0)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub name: String,
    pub color: String,
    pub center: Vec2,
    pub radius: f64,
    pub left: f64,
    pub top: f64,
}

impl Region {
    fn new(spec: &RegionSpec, center: Vec2, radius: f64) -> Self {
        Self {
            name: spec.name.to_string(),
            color: spec.color.to_string(),
            center,
            radius,
            left: center.x - radius,
            top: center.y - radius,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLayout {
    pub circle_size: f64,
    pub circle_radius: f64,
    pub triangle_height: f64,
    pub regions: BTreeMap<String, Region>,
    /// True when the container was not measured yet and fixed coordinates
    /// were used.
    pub fallback: bool,
}

impl RegionLayout {
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Every region whose full circle contains `point`. This is how a drop
    /// position resolves into a membership.
    pub fn regions_containing(&self, point: Vec2) -> Membership {
        self.regions
            .values()
            .filter(|region| region.contains(point))
            .map(|region| region.name.clone())
            .collect()
    }

    pub fn fallback() -> Self {
        let regions = REGION_SPECS
            .iter()
            .zip(FALLBACK_CENTERS)
            .map(|(spec, (x, y))| {
                (
                    spec.name.to_string(),
                    Region::new(spec, Vec2::new(x, y), FALLBACK_CIRCLE_RADIUS),
                )
            })
            .collect();
        Self {
            circle_size: FALLBACK_CIRCLE_RADIUS * 2.0,
            circle_radius: FALLBACK_CIRCLE_RADIUS,
            triangle_height: FALLBACK_TRIANGLE_HEIGHT,
            regions,
            fallback: true,
        }
    }
}

/// Three overlapping circles at the vertices of a triangle centered in the
/// container below the title band.
pub fn compute_regions(width: f64, height: f64, radius_multiplier: f64) -> RegionLayout {
    let usable_width = width;
    let usable_height = height - TITLE_BAND;
    if !(usable_width > 0.0 && height > 0.0 && usable_height > 0.0) {
        tracing::debug!(width, height, "container not measured, using fallback regions");
        return RegionLayout::fallback();
    }

    let max_size = usable_width.min(usable_height);
    let triangle_height = max_size * TRIANGLE_SCALE;
    let center_to_vertex = triangle_height * (2.0 / 3.0);
    let circle_radius = triangle_height * radius_multiplier;
    let triangle_center = Vec2::new(usable_width / 2.0, (usable_height + TITLE_BAND) / 2.0);

    let regions = REGION_SPECS
        .iter()
        .map(|spec| {
            let center = Vec2::from_polar(triangle_center, center_to_vertex, spec.angle);
            (
                spec.name.to_string(),
                Region::new(spec, center, circle_radius),
            )
        })
        .collect();

    RegionLayout {
        circle_size: circle_radius * 2.0,
        circle_radius,
        triangle_height,
        regions,
        fallback: false,
    }
}
