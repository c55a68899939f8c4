use std::collections::HashSet;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::model::{Entity, Vec2};

use super::boundary::{AreaBoundary, area_boundary};
use super::error::LayoutError;
use super::regions::RegionLayout;
use super::seeded::{hash_seed, seeded_random};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Entities with a non-empty membership that took part.
    pub simulated: usize,
    pub iterations: usize,
    pub converged: bool,
    /// Summed `|vx| + |vy|` after the last iteration.
    pub total_movement: f64,
}

struct Member {
    index: usize,
    key: String,
    boundary: AreaBoundary,
}

/// Settles every entity with a non-empty membership inside its area.
///
/// Positions and velocities are updated in place; entities without a
/// membership are left untouched. Entities lacking a position are seeded at
/// their area center plus a small deterministic jitter keyed on the id.
/// Every entity is validated before any is mutated.
pub fn simulate(
    entities: &mut [Entity],
    layout: &RegionLayout,
    config: &SimulationConfig,
) -> Result<SimulationReport, LayoutError> {
    let members = collect_members(entities, layout, config)?;

    for member in &members {
        let entity = &mut entities[member.index];
        if entity.position.is_none() {
            let center = member.boundary.center();
            let seed = hash_seed(&entity.id);
            entity.position = Some(Vec2::new(
                center.x + (seeded_random(seed, 1.0) - 0.5) * config.jitter,
                center.y + (seeded_random(seed, 2.0) - 0.5) * config.jitter,
            ));
        }
    }

    let mut report = SimulationReport {
        simulated: members.len(),
        iterations: 0,
        converged: members.is_empty(),
        total_movement: 0.0,
    };
    if members.is_empty() {
        return Ok(report);
    }

    for iteration in 0..config.max_iterations {
        let forces: Vec<Vec2> = members
            .iter()
            .map(|member| net_force(member, &members, entities, config))
            .collect();

        let mut total_movement = 0.0;
        for (member, force) in members.iter().zip(forces) {
            let entity = &mut entities[member.index];
            let velocity = entity.velocity.add(force).scale(config.damping);
            if let Some(position) = entity.position.as_mut() {
                *position = position.add(velocity);
            }
            entity.velocity = velocity;
            total_movement += velocity.manhattan();
        }

        report.iterations = iteration + 1;
        report.total_movement = total_movement;
        if total_movement < config.convergence_threshold {
            report.converged = true;
            tracing::debug!(iterations = report.iterations, "simulation converged");
            break;
        }
    }

    if !report.converged {
        tracing::debug!(
            iterations = report.iterations,
            total_movement = report.total_movement,
            "simulation stopped before converging"
        );
    }
    Ok(report)
}

fn collect_members(
    entities: &[Entity],
    layout: &RegionLayout,
    config: &SimulationConfig,
) -> Result<Vec<Member>, LayoutError> {
    let mut seen = HashSet::new();
    let mut members = Vec::new();
    for (index, entity) in entities.iter().enumerate() {
        if !seen.insert(entity.id.as_str()) {
            return Err(LayoutError::DuplicateEntity(entity.id.clone()));
        }
        if let Some(region) = entity.membership.iter().find(|name| layout.get(name).is_none()) {
            return Err(LayoutError::UnknownRegion {
                entity: entity.id.clone(),
                region: region.to_string(),
            });
        }
        if let Some(boundary) = area_boundary(&entity.membership, layout, config) {
            members.push(Member {
                index,
                key: entity.membership.key(),
                boundary,
            });
        }
    }
    Ok(members)
}

fn net_force(
    member: &Member,
    members: &[Member],
    entities: &[Entity],
    config: &SimulationConfig,
) -> Vec2 {
    let boundary = &member.boundary;
    let center = boundary.center();
    let position = entities[member.index].position.unwrap_or(center);

    let mut force = center.sub(position).scale(config.center_strength);

    for peer in members {
        if peer.index == member.index || peer.key != member.key {
            continue;
        }
        let Some(other) = entities[peer.index].position else {
            continue;
        };
        let away = position.sub(other);
        let distance = away.length();
        if distance > 0.0 && distance < config.repulsion_radius {
            let strength = config.repulsion_strength / (distance * distance);
            force = force.add(away.scale(strength / distance));
        }
    }

    match boundary {
        AreaBoundary::Circle { center, radius } => {
            force = force.add(edge_push(
                position,
                *center,
                *radius,
                config.edge_threshold,
                config.edge_strength,
                config.edge_softening,
            ));
        }
        AreaBoundary::Intersection { circles, .. } => {
            for circle in circles {
                force = force.add(edge_push(
                    position,
                    circle.center,
                    circle.radius,
                    config.intersection_edge_threshold,
                    config.intersection_edge_strength,
                    config.intersection_edge_softening,
                ));
            }
        }
    }

    if !boundary.contains(position) {
        force = force.add(center.sub(position).scale(config.pushback_strength));
    }

    force
}

/// Inward push that grows as `position` nears the circle's edge.
fn edge_push(
    position: Vec2,
    center: Vec2,
    radius: f64,
    threshold: f64,
    strength: f64,
    softening: f64,
) -> Vec2 {
    let from_center = position.distance(center);
    let from_edge = radius - from_center;
    if from_edge >= threshold || from_center <= 0.0 {
        return Vec2::ZERO;
    }
    // Past the edge the distance counts as zero: the push stays inward at its
    // full `strength / softening` instead of shrinking or flipping outward.
    let magnitude = strength / (from_edge.max(0.0) + softening);
    center.sub(position).scale(magnitude / from_center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::layout::regions::{Region, compute_regions};
    use crate::model::Membership;

    fn close(actual: Vec2, expected: Vec2) -> bool {
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9
    }

    /// Hand-placed regions sharing one radius, for exact force arithmetic.
    fn layout_of(circles: &[(&str, f64, f64)], radius: f64) -> RegionLayout {
        let regions = circles
            .iter()
            .map(|(name, x, y)| {
                (
                    name.to_string(),
                    Region {
                        name: name.to_string(),
                        color: "rose".to_string(),
                        center: Vec2::new(*x, *y),
                        radius,
                        left: x - radius,
                        top: y - radius,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        RegionLayout {
            circle_size: radius * 2.0,
            circle_radius: radius,
            triangle_height: radius,
            regions,
            fallback: false,
        }
    }

    fn force_on(index: usize, entities: &[Entity], layout: &RegionLayout) -> Vec2 {
        let config = SimulationConfig::default();
        let members = collect_members(entities, layout, &config).expect("members");
        let member = members
            .iter()
            .find(|member| member.index == index)
            .expect("simulated member");
        net_force(member, &members, entities, &config)
    }

    fn entity(id: &str, regions: &[&str]) -> Entity {
        Entity::new(id, id).with_membership(regions.iter().copied())
    }

    #[test]
    fn peers_in_one_region_are_pushed_apart() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let mut entities = vec![entity("1", &["family"]), entity("2", &["family"])];
        let report = simulate(&mut entities, &layout, &SimulationConfig::default())
            .expect("simulation");
        assert_eq!(report.simulated, 2);
        let a = entities[0].position.expect("positioned");
        let b = entities[1].position.expect("positioned");
        assert!(a.distance(b) >= 20.0, "separation {}", a.distance(b));

        let boundary = area_boundary(
            &entities[0].membership,
            &layout,
            &SimulationConfig::default(),
        )
        .expect("boundary");
        assert!(boundary.contains(a));
        assert!(boundary.contains(b));
    }

    #[test]
    fn converged_state_is_stable() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let config = SimulationConfig::default();
        let mut entities = vec![
            entity("1", &["work"]),
            entity("2", &["work"]),
            entity("3", &["work"]),
        ];
        let settle = SimulationConfig {
            max_iterations: 300,
            ..config.clone()
        };
        let report = simulate(&mut entities, &layout, &settle).expect("simulation");
        assert!(report.converged);
        assert!(report.total_movement < config.convergence_threshold);

        let before: Vec<Vec2> = entities.iter().filter_map(|e| e.position).collect();
        let one_more = SimulationConfig {
            max_iterations: 1,
            ..config
        };
        simulate(&mut entities, &layout, &one_more).expect("simulation");
        for (entity, old) in entities.iter().zip(before) {
            let new = entity.position.expect("positioned");
            assert!(new.distance(old) < 0.25, "moved {}", new.distance(old));
        }
    }

    #[test]
    fn unplaced_entities_are_untouched() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let mut entities = vec![
            entity("1", &["friends"]),
            Entity::new("2", "Dad").with_position(5.0, 6.0),
            Entity::new("3", "Tomás"),
        ];
        let report = simulate(&mut entities, &layout, &SimulationConfig::default())
            .expect("simulation");
        assert_eq!(report.simulated, 1);
        assert_eq!(entities[1].position, Some(Vec2::new(5.0, 6.0)));
        assert_eq!(entities[1].velocity, Vec2::ZERO);
        assert!(entities[2].position.is_none());
    }

    #[test]
    fn different_memberships_do_not_repel() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let config = SimulationConfig::default();
        let shared = Vec2::new(400.0, 300.0);
        let entities = vec![
            entity("1", &["family", "friends", "work"]).with_position(shared.x, shared.y),
            entity("2", &["family", "work"]).with_position(shared.x + 1.0, shared.y),
        ];
        let members = collect_members(&entities, &layout, &config).expect("members");
        let force = net_force(&members[0], &members, &entities, &config);
        // Only the spring toward the triple centroid (which is `shared`) remains.
        assert!(force.length() < 1e-9, "force {:?}", force);
    }

    #[test]
    fn outside_point_gets_pulled_back() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let config = SimulationConfig::default();
        let mut entities = vec![entity("1", &["family"]).with_position(400.0, 5.0)];
        simulate(&mut entities, &layout, &config).expect("simulation");
        let boundary = area_boundary(&entities[0].membership, &layout, &config)
            .expect("boundary");
        let position = entities[0].position.expect("positioned");
        assert!(boundary.contains(position));
        assert!(position.y.is_finite());
    }

    #[test]
    fn unknown_region_is_rejected_before_mutation() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let mut entities = vec![entity("1", &["family"]), entity("2", &["gym"])];
        let err = simulate(&mut entities, &layout, &SimulationConfig::default())
            .expect_err("unknown region");
        assert_eq!(
            err,
            LayoutError::UnknownRegion {
                entity: "2".to_string(),
                region: "gym".to_string(),
            }
        );
        assert!(entities[0].position.is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let mut entities = vec![entity("1", &["family"]), entity("1", &["work"])];
        assert_eq!(
            simulate(&mut entities, &layout, &SimulationConfig::default()),
            Err(LayoutError::DuplicateEntity("1".to_string()))
        );
    }

    #[test]
    fn reassignment_reseeds_inside_new_area() {
        let layout = compute_regions(800.0, 600.0, 0.8);
        let config = SimulationConfig::default();
        let mut entities = vec![entity("1", &["family"]), entity("2", &["family"])];
        simulate(&mut entities, &layout, &config).expect("simulation");

        let drop_point = layout.get("work").expect("work").center;
        entities[1].assign(layout.regions_containing(drop_point));
        assert_eq!(entities[1].membership, Membership::from_iter(["work"]));
        simulate(&mut entities, &layout, &config).expect("simulation");

        let work = area_boundary(&entities[1].membership, &layout, &config).expect("boundary");
        assert!(work.contains(entities[1].position.expect("positioned")));
    }

    #[test]
    fn center_spring_pulls_proportionally() {
        // Circle boundary radius 160, point 10px right of center: spring only.
        let layout = layout_of(&[("family", 0.0, 0.0)], 200.0);
        let entities = vec![entity("1", &["family"]).with_position(10.0, 0.0)];
        assert!(close(force_on(0, &entities, &layout), Vec2::new(-0.5, 0.0)));
    }

    #[test]
    fn peer_repulsion_is_inverse_square_within_radius() {
        let layout = layout_of(&[("family", 0.0, 0.0)], 200.0);
        let entities = vec![
            entity("1", &["family"]).with_position(10.0, 0.0),
            entity("2", &["family"]).with_position(0.0, 0.0),
        ];
        // spring -0.5, repulsion 800 / 10^2 = 8 along +x.
        assert!(close(force_on(0, &entities, &layout), Vec2::new(7.5, 0.0)));

        let far = vec![
            entity("1", &["family"]).with_position(10.0, 0.0),
            entity("2", &["family"]).with_position(-115.0, 0.0),
        ];
        // 125px apart: outside the repulsion radius, spring only.
        assert!(close(force_on(0, &far, &layout), Vec2::new(-0.5, 0.0)));
    }

    #[test]
    fn circle_edge_push_below_forty_pixels() {
        // Boundary radius 160; at 130px the edge is 30px away.
        let layout = layout_of(&[("family", 0.0, 0.0)], 200.0);
        let near_edge = vec![entity("1", &["family"]).with_position(130.0, 0.0)];
        let expected = -6.5 - 200.0 / (30.0 + 5.0);
        assert!(close(
            force_on(0, &near_edge, &layout),
            Vec2::new(expected, 0.0)
        ));

        // At 115px the edge is 45px away: no push.
        let interior = vec![entity("1", &["family"]).with_position(115.0, 0.0)];
        assert!(close(
            force_on(0, &interior, &layout),
            Vec2::new(-5.75, 0.0)
        ));
    }

    #[test]
    fn pushback_applies_outside_the_boundary() {
        // Boundary radius 80; at 90px the entity is 10px outside. Edge distance
        // clamps to 0, so the edge term is 200 / 5.
        let layout = layout_of(&[("family", 0.0, 0.0)], 100.0);
        let entities = vec![entity("1", &["family"]).with_position(90.0, 0.0)];
        let expected = -4.5 - 40.0 - 45.0;
        assert!(close(force_on(0, &entities, &layout), Vec2::new(expected, 0.0)));
    }

    #[test]
    fn intersection_edges_push_per_member_circle() {
        // Lens of two radius-120 circles; centroid (100, 0). At (100, 30) both
        // circles are 104.4px away, so each edge is 15.6px off (< 30px).
        let layout = layout_of(&[("family", 0.0, 0.0), ("friends", 200.0, 0.0)], 120.0);
        let entities = vec![entity("1", &["family", "friends"]).with_position(100.0, 30.0)];

        let from_center = (100.0_f64 * 100.0 + 30.0 * 30.0).sqrt();
        let magnitude = 150.0 / (120.0 - from_center + 3.0);
        let edge_y = 2.0 * (-30.0 / from_center) * magnitude;
        let expected = Vec2::new(0.0, -1.5 + edge_y);
        let force = force_on(0, &entities, &layout);
        assert!(close(force, expected), "force {:?}", force);
        assert!((force.y - -6.135407183116136).abs() < 1e-9);
    }

    #[test]
    fn intersection_edge_threshold_is_thirty_pixels() {
        // Radius-135 circles: the centroid is 35px from both edges. A
        // single-circle boundary would push at that depth; the lens does not.
        let layout = layout_of(&[("family", 0.0, 0.0), ("friends", 200.0, 0.0)], 135.0);
        let entities = vec![entity("1", &["family", "friends"]).with_position(100.0, 0.0)];
        assert!(close(force_on(0, &entities, &layout), Vec2::ZERO));
    }

    #[test]
    fn edge_push_outside_circle_is_clamped_inward() {
        let push = edge_push(Vec2::new(136.0, 0.0), Vec2::ZERO, 100.0, 30.0, 150.0, 3.0);
        assert!(close(push, Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn edge_push_is_finite_outside_circle() {
        let push = edge_push(
            Vec2::new(110.0, 0.0),
            Vec2::ZERO,
            105.0,
            40.0,
            200.0,
            5.0,
        );
        assert!(push.x.is_finite() && push.x < 0.0);
        assert_eq!(
            edge_push(Vec2::ZERO, Vec2::ZERO, 10.0, 40.0, 200.0, 5.0),
            Vec2::ZERO
        );
    }
}
