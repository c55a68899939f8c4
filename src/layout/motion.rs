use serde::Serialize;

use crate::config::MotionConfig;
use crate::model::Vec2;

use super::seeded::{seed_from_id, seeded_random};

pub const WAYPOINT_COUNT: usize = 5;

/// Closed drift loop for one entity. The caller repeats it forever with eased
/// interpolation between waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Motion {
    pub waypoints: [Vec2; WAYPOINT_COUNT],
    /// Seconds per loop.
    pub duration: f64,
    /// Seconds before the first loop starts.
    pub delay: f64,
    pub movement_range: f64,
}

impl Motion {
    pub fn xs(&self) -> [f64; WAYPOINT_COUNT] {
        self.waypoints.map(|p| p.x)
    }

    pub fn ys(&self) -> [f64; WAYPOINT_COUNT] {
        self.waypoints.map(|p| p.y)
    }
}

pub fn motion_for(id: &str, x: f64, y: f64, config: &MotionConfig) -> Motion {
    let seed = seed_from_id(id);
    let rnd = |offset: u32| seeded_random(seed, f64::from(offset));

    let movement_range = config.base_range + rnd(1) * config.range_spread;
    let duration = config.base_duration + rnd(2) * config.duration_spread;
    let delay = rnd(3) * config.max_delay;

    let wobble = |offset: u32| (rnd(offset) - 0.5) * movement_range * 2.0;
    let waypoints = [
        Vec2::new(x, y),
        Vec2::new(x + wobble(4), y + wobble(7)),
        Vec2::new(x + wobble(5), y + wobble(8)),
        Vec2::new(x + wobble(6), y + wobble(9)),
        Vec2::new(x, y),
    ];

    Motion {
        waypoints,
        duration,
        delay,
        movement_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_is_deterministic() {
        let config = MotionConfig::default();
        let a = motion_for("42", 100.0, 200.0, &config);
        let b = motion_for("42", 100.0, 200.0, &config);
        assert_eq!(a.duration.to_bits(), b.duration.to_bits());
        assert_eq!(a.delay.to_bits(), b.delay.to_bits());
        for (pa, pb) in a.waypoints.iter().zip(b.waypoints.iter()) {
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    #[test]
    fn loop_closes_on_resting_point_and_stays_in_range() {
        let config = MotionConfig::default();
        let motion = motion_for("7", 50.0, -20.0, &config);
        assert_eq!(motion.waypoints[0], Vec2::new(50.0, -20.0));
        assert_eq!(motion.waypoints[WAYPOINT_COUNT - 1], Vec2::new(50.0, -20.0));
        assert!((8.0..12.0).contains(&motion.movement_range));
        assert!((6.0..10.0).contains(&motion.duration));
        assert!((0.0..3.0).contains(&motion.delay));
        for point in &motion.waypoints[1..WAYPOINT_COUNT - 1] {
            assert!((point.x - 50.0).abs() <= motion.movement_range);
            assert!((point.y + 20.0).abs() <= motion.movement_range);
        }
    }

    #[test]
    fn distinct_ids_drift_differently() {
        let config = MotionConfig::default();
        let one = motion_for("1", 0.0, 0.0, &config);
        let two = motion_for("2", 0.0, 0.0, &config);
        assert_ne!(one.movement_range, two.movement_range);
        assert_ne!(one.duration, two.duration);
        assert_ne!(one.delay, two.delay);
    }

    #[test]
    fn unparseable_ids_share_the_default_seed() {
        let config = MotionConfig::default();
        assert_eq!(
            motion_for("alex", 0.0, 0.0, &config),
            motion_for("1", 0.0, 0.0, &config)
        );
    }
}
