#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use flare_core::enums::*;
    use flare_core::preferences::TargetPreferences;
    use flare_core::state::*;
    use flare_core::types::{Aabb, BodyId, FactionId};

    use crate::avoidance::{anticollision_correction, correct_course};
    use crate::collision::{find_most_dangerous_collision, is_anticollision_imminent};
    use crate::component_select::{combat_state, component_weight, get_best_target_component};
    use crate::danger::{check_relative_dangerosity, DangerReport};
    use crate::friendly_fire::{check_friendly_fire, FiringSolution};
    use crate::intercept::compute_intercept_time;
    use crate::sector_exit::is_sector_exit_imminent;
    use crate::targeting::{get_best_target, is_ship_dangerous, score_target};
    use crate::world::{Body, RandomSource};

    const US: FactionId = FactionId(1);
    const ENEMY: FactionId = FactionId(2);
    const BYSTANDER: FactionId = FactionId(3);

    /// Ship whose collision sphere radius is exactly `radius`.
    fn make_ship(id: u32, faction: FactionId, location: DVec3, radius: f64) -> Ship {
        Ship {
            id: BodyId(id),
            faction,
            location,
            facing: DVec3::X,
            bounds: Aabb::from_center(location, DVec3::new(radius, 0.0, 0.0)),
            ..Default::default()
        }
    }

    fn make_warship(id: u32, faction: FactionId, location: DVec3) -> Ship {
        Ship {
            is_military: true,
            ..make_ship(id, faction, location, 10.0)
        }
    }

    fn make_asteroid(id: u32, location: DVec3, velocity: DVec3, radius: f64) -> Asteroid {
        Asteroid {
            id: BodyId(id),
            location,
            velocity,
            radius,
        }
    }

    fn make_sector(ships: Vec<Ship>) -> SectorSnapshot {
        let mut diplomacy = Diplomacy::default();
        diplomacy.set(US, ENEMY, Hostility::Hostile);
        diplomacy.set(US, BYSTANDER, Hostility::Neutral);
        SectorSnapshot {
            ships,
            sector_limits: 50_000.0,
            diplomacy,
            ..Default::default()
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    // ---- Intercept ----

    #[test]
    fn test_intercept_stationary_target() {
        let intercept = compute_intercept_time(
            DVec3::new(1000.0, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::ZERO,
            100.0,
            0.0,
        )
        .unwrap();
        assert!(approx(intercept.time, 10.0), "got {}", intercept.time);
        assert_eq!(intercept.location, DVec3::new(1000.0, 0.0, 0.0));
    }

    #[test]
    fn test_intercept_crossing_target() {
        let target_vel = DVec3::new(0.0, 100.0, 0.0);
        let intercept = compute_intercept_time(
            DVec3::new(1000.0, 0.0, 0.0),
            target_vel,
            DVec3::ZERO,
            DVec3::ZERO,
            200.0,
            0.0,
        )
        .unwrap();
        let expected = 1000.0 / 30_000f64.sqrt();
        assert!(approx(intercept.time, expected), "got {}", intercept.time);
        // The projectile covers exactly speed × time to reach the predicted point
        assert!(approx(intercept.location.length(), 200.0 * intercept.time));
    }

    #[test]
    fn test_intercept_unreachable_target() {
        let intercept = compute_intercept_time(
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(300.0, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::ZERO,
            200.0,
            0.0,
        );
        assert!(intercept.is_none(), "A faster receding target is unreachable");
    }

    #[test]
    fn test_intercept_degenerate_inputs() {
        let intercept = compute_intercept_time(
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::ZERO,
            0.0,
            0.0,
        );
        assert!(intercept.is_none(), "Zero speeds everywhere must not divide by zero");
    }

    #[test]
    fn test_intercept_equal_speeds_linear_case() {
        let intercept = compute_intercept_time(
            DVec3::new(1000.0, 0.0, 0.0),
            DVec3::new(-100.0, 0.0, 0.0),
            DVec3::ZERO,
            DVec3::ZERO,
            100.0,
            0.0,
        )
        .unwrap();
        assert!(approx(intercept.time, 5.0), "got {}", intercept.time);
        assert!(approx(intercept.location.x, 500.0));
    }

    #[test]
    fn test_intercept_prediction_lag() {
        let target_pos = DVec3::new(1000.0, 0.0, 0.0);
        let target_vel = DVec3::new(10.0, 0.0, 0.0);
        let intercept =
            compute_intercept_time(target_pos, target_vel, DVec3::ZERO, DVec3::ZERO, 100.0, 1.0)
                .unwrap();
        assert!(intercept.time > 1.0);
        let expected_location = target_pos + target_vel * intercept.time;
        assert!(
            intercept.location.distance(expected_location) < 1e-6,
            "Location should be the target position at the returned time"
        );
    }

    // ---- Dangerosity ----

    #[test]
    fn test_zero_relative_velocity_is_not_dangerous() {
        let velocity = DVec3::new(50.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(12.0, 0.0, 0.0), velocity, 5.0);
        let report = check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, velocity);
        assert!(report.is_none());
    }

    #[test]
    fn test_receding_body_is_not_dangerous() {
        let asteroid = make_asteroid(1, DVec3::new(30.0, 0.0, 0.0), DVec3::X * 10.0, 5.0);
        let report =
            check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, DVec3::X * 10.0, DVec3::ZERO);
        assert!(report.is_none());
    }

    #[test]
    fn test_slow_closing_body_is_not_dangerous() {
        let velocity = DVec3::new(-1.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(20.0, 0.0, 0.0), velocity, 5.0);
        let report = check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, DVec3::ZERO);
        assert!(report.is_none(), "Closing below the threshold is ignored");
    }

    #[test]
    fn test_head_on_body_is_dangerous() {
        let velocity = DVec3::new(-10.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(50.0, 0.0, 0.0), velocity, 5.0);
        let report =
            check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, DVec3::ZERO).unwrap();
        assert_eq!(report.body, BodyId(1));
        assert_eq!(report.kind, BodyKind::Asteroid);
        assert!(approx(report.hit_time, 5.0), "got {}", report.hit_time);
        assert!(approx(report.inter_collision_travel_time, 1.0));
        assert!(approx(report.lead_time(), 4.0));
    }

    #[test]
    fn test_body_beyond_horizon_is_not_dangerous() {
        let velocity = DVec3::new(-10.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(100.0, 0.0, 0.0), velocity, 5.0);
        let report = check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, DVec3::ZERO);
        assert!(report.is_none(), "Closest approach in 10s is beyond the horizon");
    }

    #[test]
    fn test_wide_pass_is_not_dangerous() {
        let velocity = DVec3::new(-10.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(50.0, 20.0, 0.0), velocity, 5.0);
        let report = check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, DVec3::ZERO);
        assert!(report.is_none(), "Missing by 20m with a 10m radius sum is safe");
    }

    #[test]
    fn test_overlap_reports_negative_depth() {
        let velocity = DVec3::new(-10.0, 0.0, 0.0);
        let asteroid = make_asteroid(1, DVec3::new(6.0, 0.0, 0.0), velocity, 5.0);
        let report =
            check_relative_dangerosity(&asteroid, DVec3::ZERO, 5.0, velocity, DVec3::ZERO).unwrap();
        assert!(report.hit_time <= 0.0);
        assert!(approx(report.hit_time, -4.0), "got {}", report.hit_time);
        assert_eq!(report.inter_collision_travel_time, 0.0);
    }

    #[test]
    fn test_ship_uses_live_bounding_box() {
        let mut ship = make_ship(9, ENEMY, DVec3::new(50.0, 0.0, 0.0), 5.0);
        // Hull bounds shifted forward of the reference location
        ship.bounds = Aabb::from_center(DVec3::new(40.0, 0.0, 0.0), DVec3::new(3.0, 4.0, 0.0));
        let sphere = ship.collision_sphere();
        assert_eq!(sphere.center, DVec3::new(40.0, 0.0, 0.0));
        assert!(approx(sphere.radius, 5.0));

        let velocity = DVec3::new(-10.0, 0.0, 0.0);
        let report =
            check_relative_dangerosity(&ship, DVec3::ZERO, 5.0, velocity, DVec3::ZERO).unwrap();
        assert_eq!(report.location, DVec3::new(40.0, 0.0, 0.0));
        assert!(approx(report.hit_time, 4.0));
    }

    #[test]
    fn test_tiny_hull_has_minimum_size() {
        let ship = make_ship(1, US, DVec3::ZERO, 0.0);
        assert_eq!(ship.collision_sphere().radius, 1.0);
    }

    #[test]
    fn test_most_imminent_keeps_first_on_tie() {
        let first = DangerReport {
            body: BodyId(1),
            kind: BodyKind::Asteroid,
            location: DVec3::ZERO,
            velocity: DVec3::ZERO,
            hit_time: 2.0,
            inter_collision_travel_time: 0.5,
        };
        let second = DangerReport {
            body: BodyId(2),
            ..first
        };
        let sooner = DangerReport {
            body: BodyId(3),
            hit_time: 1.0,
            ..first
        };

        let best = DangerReport::most_imminent(None, first);
        let best = DangerReport::most_imminent(best, second);
        assert_eq!(best.unwrap().body, BodyId(1), "Equal hit time keeps first");
        let best = DangerReport::most_imminent(best, sooner);
        assert_eq!(best.unwrap().body, BodyId(3), "Strictly sooner replaces");
    }

    // ---- Collision scanner ----

    #[test]
    fn test_scanner_empty_sector() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let sector = make_sector(vec![observer.clone()]);
        assert!(find_most_dangerous_collision(&sector, &observer, None).is_none());
    }

    #[test]
    fn test_scanner_excludes_bodies_outside_relevance_radius() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);

        // Relevance radius is 200 × 5 = 1000m
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(1500.0, 0.0, 0.0),
            DVec3::new(-1000.0, 0.0, 0.0),
            5.0,
        ));
        assert!(
            find_most_dangerous_collision(&sector, &observer, None).is_none(),
            "A fast body beyond the relevance radius must be ignored"
        );

        sector.asteroids[0].location = DVec3::new(900.0, 0.0, 0.0);
        let report = find_most_dangerous_collision(&sector, &observer, None);
        assert_eq!(report.map(|r| r.body), Some(BodyId(2)));
    }

    #[test]
    fn test_scanner_picks_smallest_hit_time_in_any_order() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let late = make_asteroid(2, DVec3::new(30.0, 0.0, 0.0), DVec3::new(-10.0, 0.0, 0.0), 5.0);
        let soon = make_asteroid(3, DVec3::new(0.0, 20.0, 0.0), DVec3::new(0.0, -10.0, 0.0), 5.0);

        for asteroids in [vec![late, soon], vec![soon, late]] {
            let mut sector = make_sector(vec![observer.clone()]);
            sector.asteroids = asteroids;
            let report = find_most_dangerous_collision(&sector, &observer, None).unwrap();
            assert_eq!(report.body, BodyId(3));
            assert!(approx(report.hit_time, 2.0));
        }
    }

    #[test]
    fn test_scanner_skips_self_ignored_and_docking_ships() {
        let mut observer = make_ship(1, US, DVec3::ZERO, 5.0);
        observer.docking.docked_ships.push(BodyId(3));
        observer.docking.granted_ships.push(BodyId(4));

        let mut ships = vec![observer.clone()];
        for (id, y) in [(2, 20.0), (3, -20.0), (4, 0.0)] {
            let mut ship = make_ship(id, US, DVec3::new(20.0, y, 0.0), 5.0);
            ship.velocity = DVec3::new(-10.0, -y / 2.0, 0.0);
            ships.push(ship);
        }
        let sector = make_sector(ships);

        let report = find_most_dangerous_collision(&sector, &observer, None).unwrap();
        assert_eq!(report.body, BodyId(2));
        assert!(
            find_most_dangerous_collision(&sector, &observer, Some(BodyId(2))).is_none(),
            "Ignored ship must not be reported"
        );
    }

    #[test]
    fn test_scanner_detects_static_collider() {
        let mut observer = make_ship(1, US, DVec3::ZERO, 5.0);
        observer.velocity = DVec3::new(20.0, 0.0, 0.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.colliders.push(StaticCollider {
            id: BodyId(10),
            location: DVec3::new(60.0, 0.0, 0.0),
            radius: 10.0,
        });

        let report = find_most_dangerous_collision(&sector, &observer, None).unwrap();
        assert_eq!(report.kind, BodyKind::StaticCollider);
        assert_eq!(report.velocity, DVec3::ZERO);
        assert!(approx(report.hit_time, 3.0));
    }

    #[test]
    fn test_anticollision_imminent() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(50.0, 0.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));

        // Lead time is 5 - 1 = 4 seconds
        assert!(is_anticollision_imminent(&sector, &observer, 5.0));
        assert!(!is_anticollision_imminent(&sector, &observer, 3.0));

        let mut autopilot = observer.clone();
        autopilot.navigation.autopilot = true;
        assert!(!is_anticollision_imminent(&sector, &autopilot, 5.0));

        let mut loading = observer.clone();
        loading.navigation.ready = false;
        assert!(!is_anticollision_imminent(&sector, &loading, 5.0));

        let mut docked = observer;
        docked.navigation.docked = true;
        assert!(!is_anticollision_imminent(&sector, &docked, 5.0));
    }

    // ---- Avoidance ----

    #[test]
    fn test_avoidance_pass_through_without_threat() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let sector = make_sector(vec![observer.clone()]);
        let desired = DVec3::new(12.5, -3.0, 7.0);
        let corrected = anticollision_correction(&sector, &observer, desired, None, 3.0, &mut rng());
        assert_eq!(corrected, desired);
    }

    #[test]
    fn test_avoidance_blends_away_from_threat() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(40.0, 1.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));

        // Closest approach in ~4s, travel time 1s: lead 3s over a 6s window → alpha 0.5
        let desired = DVec3::new(10.0, 0.0, 0.0);
        let corrected = anticollision_correction(&sector, &observer, desired, None, 6.0, &mut rng());
        let hit_time = 1600f64.sqrt() / 10.0;
        let alpha = 1.0 - (hit_time - 1.0) / 6.0;
        let expected = desired * (1.0 - alpha) + DVec3::new(0.0, -1.0, 0.0) * 100.0 * alpha;
        assert!(
            corrected.distance(expected) < 1e-6,
            "expected {expected:?}, got {corrected:?}"
        );
    }

    #[test]
    fn test_avoidance_ignores_threat_outside_window() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(40.0, 1.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));

        let desired = DVec3::new(10.0, 0.0, 0.0);
        let corrected = anticollision_correction(&sector, &observer, desired, None, 1.0, &mut rng());
        assert!(corrected.distance(desired) < 1e-9, "Alpha clamps to zero");
    }

    #[test]
    fn test_avoidance_with_empty_window_reacts_only_when_contact_is_due() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let desired = DVec3::new(10.0, 0.0, 0.0);

        // Lead 3s: nothing to do yet
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(40.0, 1.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));
        for window in [0.0, -1.0] {
            let corrected =
                anticollision_correction(&sector, &observer, desired, None, window, &mut rng());
            assert!(corrected.distance(desired) < 1e-9, "window {window}");
        }

        // Hit 0.9s, travel 1s: contact already due, full escape
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(9.0, 5.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));
        for window in [0.0, -1.0] {
            let corrected =
                anticollision_correction(&sector, &observer, desired, None, window, &mut rng());
            assert!(
                corrected.distance(DVec3::new(0.0, -100.0, 0.0)) < 1e-9,
                "window {window}: got {corrected:?}"
            );
        }
    }

    #[test]
    fn test_correct_course_reports_the_threat_it_avoided() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let desired = DVec3::new(10.0, 0.0, 0.0);

        let sector = make_sector(vec![observer.clone()]);
        let (velocity, threat) = correct_course(&sector, &observer, desired, None, 6.0, &mut rng());
        assert_eq!(velocity, desired);
        assert!(threat.is_none());

        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(40.0, 1.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));
        let (velocity, threat) = correct_course(&sector, &observer, desired, None, 6.0, &mut rng());
        let threat = threat.expect("asteroid should be reported");
        assert_eq!(threat.body, BodyId(2));
        assert_eq!(threat.kind, BodyKind::Asteroid);
        assert_eq!(
            velocity,
            anticollision_correction(&sector, &observer, desired, None, 6.0, &mut rng())
        );
    }

    #[test]
    fn test_avoidance_random_axis_on_exact_head_on() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(40.0, 0.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));

        // hit 4s, travel 1s, window 6s → alpha 0.5
        let corrected =
            anticollision_correction(&sector, &observer, DVec3::ZERO, None, 6.0, &mut rng());
        assert!(corrected.is_finite());
        assert!(approx(corrected.length(), 50.0), "got {}", corrected.length());
    }

    #[test]
    fn test_avoidance_flees_overlap_at_max_speed() {
        let observer = make_ship(1, US, DVec3::ZERO, 5.0);
        let mut sector = make_sector(vec![observer.clone()]);
        sector.asteroids.push(make_asteroid(
            2,
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(-10.0, 0.0, 0.0),
            5.0,
        ));

        let corrected = anticollision_correction(
            &sector,
            &observer,
            DVec3::new(0.0, 80.0, 0.0),
            None,
            3.0,
            &mut rng(),
        );
        assert!(corrected.distance(DVec3::new(-100.0, 0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_random_unit_vectors_are_normalized() {
        let mut rng = rng();
        for _ in 0..100 {
            assert!(approx(rng.unit_vector().length(), 1.0));
        }
        assert_eq!(rng.below(0), 0);
    }

    // ---- Target selection ----

    fn aligned_prefs() -> TargetPreferences {
        TargetPreferences {
            distance_weight: 2.0,
            max_distance: 20_000.0,
            alignement_weight: 3.0,
            min_alignement: 0.0,
            preferred_direction: DVec3::X,
            ..Default::default()
        }
    }

    #[test]
    fn test_best_target_end_to_end() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let enemy = make_warship(2, ENEMY, DVec3::new(10_000.0, 0.0, 0.0));
        let sector = make_sector(vec![observer.clone(), enemy]);
        let prefs = aligned_prefs();

        let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert_eq!(score.attack_target, 0.0);
        assert!(approx(score.distance, 2.0 * 0.5));
        assert!(approx(score.alignement, 3.0));
        assert!(approx(score.total, 4.0));

        let best = get_best_target(&sector, &observer, &prefs).unwrap();
        assert_eq!(best.id, BodyId(2));
    }

    #[test]
    fn test_best_target_never_returns_excluded_candidates() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let ignored = make_warship(2, ENEMY, DVec3::new(1000.0, 0.0, 0.0));
        let neutral = make_warship(3, BYSTANDER, DVec3::new(1000.0, 0.0, 0.0));
        let mut destroyed = make_warship(4, ENEMY, DVec3::new(1000.0, 0.0, 0.0));
        destroyed.status.alive = false;
        let outside = make_warship(5, ENEMY, DVec3::new(60_000.0, 0.0, 0.0));
        let sector = make_sector(vec![observer.clone(), ignored, neutral, destroyed, outside]);

        let configs = [
            TargetPreferences::default(),
            aligned_prefs(),
            TargetPreferences {
                max_distance: 1e9,
                is_dangerous: 100.0,
                ..Default::default()
            },
        ];
        for mut prefs in configs {
            prefs.ignore_list.push(BodyId(2));
            assert!(
                get_best_target(&sector, &observer, &prefs).is_none(),
                "No eligible candidate exists"
            );
        }
    }

    #[test]
    fn test_score_monotonic_in_distance_weight() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let enemy = make_warship(2, ENEMY, DVec3::new(0.0, 5000.0, 0.0));
        let sector = make_sector(vec![observer.clone(), enemy]);

        let mut previous = f64::NEG_INFINITY;
        for weight in [0.0, 0.5, 1.0, 2.0, 10.0] {
            let prefs = TargetPreferences {
                distance_weight: weight,
                ..aligned_prefs()
            };
            let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
            assert!(score.total >= previous);
            previous = score.total;
        }
    }

    #[test]
    fn test_dangerous_target_with_two_munitions_excluded() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let enemy = make_warship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0));
        let mut sector = make_sector(vec![observer.clone(), enemy]);
        let prefs = aligned_prefs();
        let base = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();

        sector.munitions.push(Munition {
            id: BodyId(50),
            target: Some(BodyId(2)),
            active: true,
        });
        let one = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert!(approx(one.state, base.state / 25.0));

        sector.munitions.push(Munition {
            id: BodyId(51),
            target: Some(BodyId(2)),
            active: true,
        });
        assert!(score_target(&sector, &observer, &sector.ships[1], &prefs).is_none());
        assert!(get_best_target(&sector, &observer, &prefs).is_none());
    }

    #[test]
    fn test_harmless_target_with_one_munition_excluded() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let freighter = make_ship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0), 10.0);
        let mut sector = make_sector(vec![observer.clone(), freighter]);
        sector.munitions.push(Munition {
            id: BodyId(50),
            target: Some(BodyId(2)),
            active: false,
        });
        assert!(
            score_target(&sector, &observer, &sector.ships[1], &aligned_prefs()).is_some(),
            "Inactive munitions do not count"
        );

        sector.munitions[0].active = true;
        assert!(score_target(&sector, &observer, &sector.ships[1], &aligned_prefs()).is_none());
    }

    #[test]
    fn test_harpooned_targets() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let mut enemy = make_warship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0));
        enemy.harpooned = true;
        let mut sector = make_sector(vec![observer.clone(), enemy]);
        let prefs = TargetPreferences {
            is_harpooned: 3.0,
            ..aligned_prefs()
        };

        let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert!(approx(score.state, 3.0));

        sector.ships[1].status.uncontrollable = true;
        assert!(score_target(&sector, &observer, &sector.ships[1], &prefs).is_none());
    }

    #[test]
    fn test_medium_hull_gets_no_size_multiplier() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let mut sector = make_sector(vec![
            observer.clone(),
            make_warship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0)),
        ]);
        let prefs = TargetPreferences {
            is_large: 3.0,
            is_small: 5.0,
            ..aligned_prefs()
        };

        for (size, expected) in [
            (SizeClass::Small, 5.0),
            (SizeClass::Medium, 1.0),
            (SizeClass::Large, 3.0),
        ] {
            sector.ships[1].size = size;
            let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
            assert!(approx(score.state, expected), "{size:?}: got {}", score.state);
        }
    }

    #[test]
    fn test_state_multipliers_compose() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let mut station = make_ship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0), 50.0);
        station.size = SizeClass::Large;
        station.is_station = true;
        station.status.disarmed = true;
        station.status.stranded = true;
        station.status.uncontrollable = true;
        let sector = make_sector(vec![observer.clone(), station]);

        let prefs = TargetPreferences {
            target_state_weight: 2.0,
            is_large: 3.0,
            is_small: 100.0,
            is_station: 5.0,
            is_not_station: 100.0,
            is_military: 100.0,
            is_not_military: 7.0,
            is_dangerous: 100.0,
            is_not_dangerous: 11.0,
            is_stranded: 13.0,
            is_not_stranded: 100.0,
            is_uncontrollable_civil: 17.0,
            is_uncontrollable_military: 100.0,
            is_not_uncontrollable: 100.0,
            ..aligned_prefs()
        };
        let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert!(approx(
            score.state,
            2.0 * 3.0 * 5.0 * 7.0 * 11.0 * 13.0 * 17.0
        ));
    }

    #[test]
    fn test_last_target_and_attack_target_terms() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let mut raider = make_warship(2, ENEMY, DVec3::new(5000.0, 0.0, 0.0));
        raider.pilot_target = Some(BodyId(99));
        let sector = make_sector(vec![observer.clone(), raider]);

        let prefs = TargetPreferences {
            last_target: Some(BodyId(2)),
            last_target_weight: 4.0,
            attack_target: Some(BodyId(99)),
            attack_target_weight: 6.0,
            ..aligned_prefs()
        };
        let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert!(approx(score.state, 4.0));
        assert!(approx(score.attack_target, 6.0));
        assert!(approx(
            score.total,
            score.state * (score.attack_target + score.distance + score.alignement)
        ));
    }

    #[test]
    fn test_best_target_prefers_higher_score_and_first_on_tie() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let far = make_warship(2, ENEMY, DVec3::new(15_000.0, 0.0, 0.0));
        let near = make_warship(3, ENEMY, DVec3::new(2000.0, 0.0, 0.0));
        let near_twin = make_warship(4, ENEMY, DVec3::new(2000.0, 0.0, 0.0));
        let sector = make_sector(vec![observer.clone(), far, near, near_twin]);

        let best = get_best_target(&sector, &observer, &aligned_prefs()).unwrap();
        assert_eq!(best.id, BodyId(3));
    }

    #[test]
    fn test_zero_scores_never_win() {
        let observer = make_warship(1, US, DVec3::ZERO);
        let enemy = make_warship(2, ENEMY, DVec3::new(30_000.0, 0.0, 0.0));
        let sector = make_sector(vec![observer.clone(), enemy]);

        // Beyond max distance and no alignement weight
        let prefs = TargetPreferences::default();
        let score = score_target(&sector, &observer, &sector.ships[1], &prefs).unwrap();
        assert_eq!(score.total, 0.0);
        assert!(get_best_target(&sector, &observer, &prefs).is_none());
    }

    #[test]
    fn test_is_ship_dangerous() {
        let mut ship = make_warship(1, ENEMY, DVec3::ZERO);
        assert!(is_ship_dangerous(&ship));
        ship.status.disarmed = true;
        assert!(!is_ship_dangerous(&ship));
        let freighter = make_ship(2, ENEMY, DVec3::ZERO, 5.0);
        assert!(!is_ship_dangerous(&freighter));
    }

    // ---- Component selection ----

    fn make_loadout_ship() -> Ship {
        let mut ship = make_warship(2, ENEMY, DVec3::ZERO);
        ship.components = vec![
            ShipComponent::new(0, ComponentKind::Weapon),
            ShipComponent::new(1, ComponentKind::EnginePod),
            ShipComponent::new(2, ComponentKind::Rcs),
            ShipComponent::new(3, ComponentKind::Internal),
        ];
        ship
    }

    #[test]
    fn test_combat_state_and_weights() {
        let mut ship = make_loadout_ship();
        assert_eq!(combat_state(&ship), CombatState::Armed);
        ship.status.disarmed = true;
        assert_eq!(combat_state(&ship), CombatState::DisarmedMobile);
        ship.status.stranded = true;
        assert_eq!(combat_state(&ship), CombatState::Stranded);

        assert_eq!(component_weight(CombatState::Armed, ComponentKind::Weapon), 10);
        assert_eq!(component_weight(CombatState::Armed, ComponentKind::EnginePod), 4);
        assert_eq!(
            component_weight(CombatState::DisarmedMobile, ComponentKind::EnginePod),
            5
        );
        assert_eq!(
            component_weight(CombatState::DisarmedMobile, ComponentKind::Weapon),
            0
        );
        assert_eq!(component_weight(CombatState::Stranded, ComponentKind::EnginePod), 0);
        assert_eq!(component_weight(CombatState::Stranded, ComponentKind::Rcs), 1);
    }

    #[test]
    fn test_component_selection_favors_weapons_on_armed_target() {
        let ship = make_loadout_ship();
        let mut rng = rng();
        let mut weapon_hits = 0;
        for _ in 0..1600 {
            let component = get_best_target_component(&ship, &mut rng).unwrap();
            if component.kind == ComponentKind::Weapon {
                weapon_hits += 1;
            }
        }
        // Expected share 10 / 16
        assert!(
            (800..1200).contains(&weapon_hits),
            "weapon picked {weapon_hits} times out of 1600"
        );
    }

    #[test]
    fn test_component_selection_on_stranded_target() {
        let mut ship = make_loadout_ship();
        ship.status.disarmed = true;
        ship.status.stranded = true;
        let mut rng = rng();
        for _ in 0..200 {
            let kind = get_best_target_component(&ship, &mut rng).unwrap().kind;
            assert!(matches!(kind, ComponentKind::Rcs | ComponentKind::Internal));
        }
    }

    #[test]
    fn test_component_selection_skips_broken_and_empty() {
        let mut ship = make_loadout_ship();
        for component in &mut ship.components {
            component.broken = component.kind != ComponentKind::Internal;
        }
        let mut rng = rng();
        let picked = get_best_target_component(&ship, &mut rng).unwrap();
        assert_eq!(picked.kind, ComponentKind::Internal);

        ship.components.clear();
        assert!(get_best_target_component(&ship, &mut rng).is_none());
    }

    // ---- Sector exit ----

    fn exit_sector() -> SectorSnapshot {
        SectorSnapshot {
            sector_limits: 10_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_exit_imminent_near_edge_moving_out_regardless_of_facing() {
        let sector = exit_sector();
        for facing in [DVec3::X, -DVec3::X, DVec3::Y] {
            let mut ship = make_ship(1, US, DVec3::new(9_600.0, 0.0, 0.0), 5.0);
            ship.velocity = DVec3::new(50.0, 0.0, 0.0);
            ship.facing = facing;
            assert!(
                is_sector_exit_imminent(&sector, &ship, 1.0),
                "facing {facing:?} should still warn"
            );
        }
    }

    #[test]
    fn test_exit_not_imminent_when_turned_back() {
        let sector = exit_sector();
        let mut ship = make_ship(1, US, DVec3::new(9_600.0, 0.0, 0.0), 5.0);
        ship.facing = -DVec3::X;
        assert!(!is_sector_exit_imminent(&sector, &ship, 10.0));

        ship.velocity = DVec3::new(-50.0, 0.0, 0.0);
        assert!(!is_sector_exit_imminent(&sector, &ship, 10.0));
    }

    #[test]
    fn test_exit_not_imminent_facing_center_while_braking_far_from_edge() {
        let sector = exit_sector();
        let mut ship = make_ship(1, US, DVec3::new(5_000.0, 0.0, 0.0), 5.0);
        ship.facing = -DVec3::X;
        ship.velocity = DVec3::new(1_000.0, 0.0, 0.0);
        // Ray alone would exit in 5s, but the ship has already turned back
        assert!(!is_sector_exit_imminent(&sector, &ship, 6.0));

        ship.facing = DVec3::X;
        assert!(is_sector_exit_imminent(&sector, &ship, 6.0));
    }

    #[test]
    fn test_exit_margin_without_motion() {
        let sector = exit_sector();
        let mut ship = make_ship(1, US, DVec3::new(0.0, 9_500.0, 0.0), 5.0);
        ship.facing = DVec3::Y;
        assert!(is_sector_exit_imminent(&sector, &ship, 1.0));
    }

    #[test]
    fn test_exit_predicted_from_velocity() {
        let sector = exit_sector();
        let mut ship = make_ship(1, US, DVec3::new(5_000.0, 0.0, 0.0), 5.0);
        ship.facing = DVec3::X;
        ship.velocity = DVec3::new(1_000.0, 0.0, 0.0);
        // 5km to the boundary at 1km/s
        assert!(is_sector_exit_imminent(&sector, &ship, 6.0));
        assert!(!is_sector_exit_imminent(&sector, &ship, 4.0));
    }

    #[test]
    fn test_exit_idle_at_center() {
        let sector = exit_sector();
        let ship = make_ship(1, US, DVec3::ZERO, 5.0);
        assert!(!is_sector_exit_imminent(&sector, &ship, 100.0));
    }

    // ---- Friendly fire ----

    fn shot_along_x(shooter: Option<BodyId>) -> FiringSolution {
        FiringSolution {
            origin: DVec3::ZERO,
            origin_velocity: DVec3::ZERO,
            projectile_speed: 500.0,
            axis: DVec3::X,
            max_delay: 5.0,
            aim_radius: 2.0,
            shooter,
        }
    }

    #[test]
    fn test_friendly_in_line_of_fire() {
        let friend = make_ship(2, US, DVec3::new(1000.0, 0.0, 0.0), 10.0);
        let sector = make_sector(vec![friend]);
        assert!(check_friendly_fire(&sector, US, &shot_along_x(None)));
    }

    #[test]
    fn test_neutral_counts_as_friendly_fire() {
        let bystander = make_ship(2, BYSTANDER, DVec3::new(1000.0, 0.0, 0.0), 10.0);
        let sector = make_sector(vec![bystander]);
        assert!(check_friendly_fire(&sector, US, &shot_along_x(None)));
    }

    #[test]
    fn test_hostile_in_line_of_fire_is_fine() {
        let enemy = make_ship(2, ENEMY, DVec3::new(1000.0, 0.0, 0.0), 10.0);
        let sector = make_sector(vec![enemy]);
        assert!(!check_friendly_fire(&sector, US, &shot_along_x(None)));
    }

    #[test]
    fn test_friendly_off_axis_or_out_of_range() {
        let beside = make_ship(2, US, DVec3::new(1000.0, 500.0, 0.0), 10.0);
        let far = make_ship(3, US, DVec3::new(10_000.0, 0.0, 0.0), 10.0);
        let sector = make_sector(vec![beside, far]);
        assert!(!check_friendly_fire(&sector, US, &shot_along_x(None)));
    }

    #[test]
    fn test_shooter_never_endangers_itself() {
        let shooter = make_ship(1, US, DVec3::new(1.0, 0.0, 0.0), 10.0);
        let sector = make_sector(vec![shooter]);
        assert!(!check_friendly_fire(&sector, US, &shot_along_x(Some(BodyId(1)))));
    }
}
