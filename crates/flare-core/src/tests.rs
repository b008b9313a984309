#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::PilotEvent;
    use crate::preferences::TargetPreferences;
    use crate::state::{DamageStatus, Diplomacy, SectorSnapshot};
    use crate::types::{nearly_zero, Aabb, BodyId, FactionId, SimTime};

    #[test]
    fn test_diplomacy_defaults_to_neutral() {
        let diplomacy = Diplomacy::default();
        assert_eq!(
            diplomacy.hostility(FactionId(1), FactionId(2)),
            Hostility::Neutral
        );
    }

    #[test]
    fn test_diplomacy_self_is_friendly() {
        let mut diplomacy = Diplomacy::default();
        diplomacy.set(FactionId(1), FactionId(1), Hostility::Hostile);
        assert_eq!(
            diplomacy.hostility(FactionId(1), FactionId(1)),
            Hostility::Friendly,
            "A faction is never hostile to itself"
        );
    }

    #[test]
    fn test_diplomacy_is_symmetric_and_replaces() {
        let mut diplomacy = Diplomacy::default();
        diplomacy.set(FactionId(1), FactionId(2), Hostility::Hostile);
        assert_eq!(
            diplomacy.hostility(FactionId(2), FactionId(1)),
            Hostility::Hostile
        );

        diplomacy.set(FactionId(2), FactionId(1), Hostility::Friendly);
        assert_eq!(diplomacy.relations.len(), 1, "Old entry should be replaced");
        assert_eq!(
            diplomacy.hostility(FactionId(1), FactionId(2)),
            Hostility::Friendly
        );
    }

    #[test]
    fn test_aabb_center_and_extent() {
        let aabb = Aabb::new(DVec3::new(-2.0, 0.0, 4.0), DVec3::new(2.0, 6.0, 8.0));
        assert_eq!(aabb.center(), DVec3::new(0.0, 3.0, 6.0));
        assert_eq!(aabb.extent(), DVec3::new(2.0, 3.0, 2.0));

        let rebuilt = Aabb::from_center(aabb.center(), aabb.extent());
        assert_eq!(rebuilt, aabb);
    }

    #[test]
    fn test_nearly_zero() {
        assert!(nearly_zero(DVec3::ZERO));
        assert!(nearly_zero(DVec3::new(1e-5, -1e-5, 0.0)));
        assert!(!nearly_zero(DVec3::new(0.0, 0.01, 0.0)));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance();
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_damage_status_default_is_healthy() {
        let status = DamageStatus::default();
        assert!(status.alive);
        assert!(!status.disarmed && !status.stranded && !status.uncontrollable);
    }

    #[test]
    fn test_preferences_partial_json_uses_defaults() {
        let json = r#"{ "distance_weight": 3.0, "ignore_list": [7] }"#;
        let prefs = TargetPreferences::from_json(json).unwrap();
        assert_eq!(prefs.distance_weight, 3.0);
        assert_eq!(prefs.ignore_list, vec![BodyId(7)]);
        assert_eq!(prefs.max_distance, TargetPreferences::default().max_distance);
        assert!(prefs.ignores(BodyId(7)));
        assert!(!prefs.ignores(BodyId(8)));
    }

    #[test]
    fn test_preferences_reject_non_positive_max_distance() {
        let err = TargetPreferences::from_json(r#"{ "max_distance": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_distance",
                ..
            }
        ));
    }

    #[test]
    fn test_preferences_reject_negative_multiplier() {
        let prefs = TargetPreferences {
            is_military: -1.0,
            ..Default::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_preferences_reject_bad_alignement() {
        let prefs = TargetPreferences {
            min_alignement: 1.0,
            ..Default::default()
        };
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_preferences_malformed_json() {
        let err = TargetPreferences::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_pilot_event_tagged_json() {
        let event = PilotEvent::TargetAcquired {
            ship: BodyId(1),
            target: BodyId(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"TargetAcquired""#), "got {json}");
        let back: PilotEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snapshot = SectorSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SectorSnapshot = serde_json::from_str(&json).unwrap();
        assert!(back.ships.is_empty());
    }
}
