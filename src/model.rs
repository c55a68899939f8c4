use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_polar(center: Vec2, distance: f64, angle: f64) -> Self {
        Self {
            x: center.x + distance * angle.cos(),
            y: center.y + distance * angle.sin(),
        }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn manhattan(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

/// Set of region names an entity belongs to. Ordering is canonical, so two
/// memberships compare equal regardless of the order the names were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Membership(BTreeSet<String>);

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>) -> bool {
        self.0.insert(region.into())
    }

    pub fn contains(&self, region: &str) -> bool {
        self.0.contains(region)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Sorted names joined with `+`, e.g. `family+work`.
    pub fn key(&self) -> String {
        self.iter().collect::<Vec<_>>().join("+")
    }
}

impl<S: Into<String>> FromIterator<S> for Membership {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("unplaced")
        } else {
            f.write_str(&self.key())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, alias = "categories")]
    pub membership: Membership,
    #[serde(default = "default_weight", alias = "urgency", alias = "urgencyLevel")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    #[serde(default)]
    pub velocity: Vec2,
}

fn default_weight() -> f64 {
    1.0
}

impl Entity {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            membership: Membership::new(),
            weight: default_weight(),
            position: None,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_membership<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.membership = regions.into_iter().collect();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Vec2::new(x, y));
        self
    }

    /// Moves the entity to a new set of regions. Physics state is dropped so
    /// the next simulation reseeds it inside the new area.
    pub fn assign(&mut self, membership: Membership) {
        self.membership = membership;
        self.position = None;
        self.velocity = Vec2::ZERO;
    }

    pub fn is_placed(&self) -> bool {
        !self.membership.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(val) => val.to_string(),
        NumberOrString::String(val) => val,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_weight(weight: f64) -> Self {
        if weight >= 4.0 {
            Self::High
        } else if weight >= 3.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
        }
    }
}

/// A circle placed by the radial sweep.
#[derive(Debug, Clone, Serialize)]
pub struct BallNode {
    pub id: String,
    pub label: String,
    pub weight: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    /// Set when no collision-free ring position was found and the formulaic
    /// fallback was used instead.
    pub fallback: bool,
}

impl BallNode {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn priority(&self) -> Priority {
        Priority::from_weight(self.weight)
    }
}

/// Axis-aligned rectangle reserved for central content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec2>,
}

impl Obstacle {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.center = Some(Vec2::new(x, y));
        self
    }

    pub fn resolved_center(&self, viewport_width: f64, viewport_height: f64) -> Vec2 {
        self.center
            .unwrap_or_else(|| Vec2::new(viewport_width / 2.0, viewport_height / 2.0))
    }

    /// Shortest distance from `point` to the rectangle, zero inside it.
    pub fn distance_to(&self, center: Vec2, point: Vec2) -> f64 {
        let left = center.x - self.width / 2.0;
        let right = center.x + self.width / 2.0;
        let top = center.y - self.height / 2.0;
        let bottom = center.y + self.height / 2.0;
        let dx = (left - point.x).max(point.x - right).max(0.0);
        let dy = (top - point.y).max(point.y - bottom).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}
