#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::config::LANE_RECORD_HORIZON;
    use crate::error::ConfigError;
    use crate::game_params::{
        GameParams, GeneratorParams, LaneTemplate, TrafficParams, VehicleTemplate,
    };
    use crate::lane::{Lane, LaneType};

    use super::super::generator::LaneTypeGenerator;
    use super::super::manager::LaneManager;

    fn started(seed: u64) -> (LaneManager, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut lanes = LaneManager::new(&GameParams::default()).unwrap();
        lanes.restart(&mut rng);
        (lanes, rng)
    }

    /// Window covers exactly `[first, first + len)` and contains `current`.
    fn assert_window_consistent(lanes: &LaneManager) {
        let first = lanes.first_active_index();
        let current = lanes.current_index();
        let len = lanes.window_len() as u32;
        assert!(current >= first && current < first + len, "{:?}", lanes.debug_info());
        for (offset, lane) in lanes.active_lanes().enumerate() {
            assert!(lane.is_active());
            assert_eq!(lane.logical_index(), first + offset as u32);
            assert_eq!(lane.world_z(), lanes.lane_z(first + offset as u32));
        }
        let active_in_pool = lanes.pool().iter().filter(|l| l.is_active()).count();
        assert_eq!(active_in_pool, lanes.window_len());
        assert!(lanes.current_lane().is_some());
    }

    // -------------------------------------------------------------------------
    // Generator
    // -------------------------------------------------------------------------

    #[test]
    fn test_generator_initial_grass_block() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut gen = LaneTypeGenerator::new(GeneratorParams::default());
            assert_eq!(gen.next(&mut rng), LaneType::Grass);
            assert_eq!(gen.next(&mut rng), LaneType::Grass);
        }
    }

    #[test]
    fn test_generator_caps_hazard_streak() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let mut gen = LaneTypeGenerator::new(GeneratorParams::default());
        let mut streak = 0;
        let mut longest = 0;
        for _ in 0..10_000 {
            if gen.next(&mut rng) == LaneType::Road {
                streak += 1;
                longest = longest.max(streak);
            } else {
                streak = 0;
            }
        }
        assert!(longest <= 3, "longest road streak was {longest}");
        assert!(longest >= 2, "chain should produce some road streaks");
    }

    #[test]
    fn test_generator_cap_of_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut gen = LaneTypeGenerator::new(GeneratorParams {
            max_consecutive_hazards: 1,
            ..Default::default()
        });
        let mut prev = LaneType::Grass;
        for _ in 0..2_000 {
            let next = gen.next(&mut rng);
            assert!(!(prev == LaneType::Road && next == LaneType::Road));
            prev = next;
        }
    }

    #[test]
    fn test_generator_always_road_after_grass() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut gen = LaneTypeGenerator::new(GeneratorParams {
            init_grass_block: 0,
            grass_to_road: 1.0,
            ..Default::default()
        });
        assert_eq!(gen.next(&mut rng), LaneType::Road);
        assert_eq!(gen.consecutive_hazards(), 1);
    }

    #[test]
    fn test_generator_escape_resets_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut gen = LaneTypeGenerator::new(GeneratorParams {
            init_grass_block: 0,
            grass_to_road: 1.0,
            road_escape: 1.0,
            ..Default::default()
        });
        assert_eq!(gen.next(&mut rng), LaneType::Road);
        assert_eq!(gen.next(&mut rng), LaneType::Grass);
        assert_eq!(gen.consecutive_hazards(), 0);
        assert_eq!(gen.last_type(), LaneType::Grass);
    }

    // -------------------------------------------------------------------------
    // Pool construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_allocates_inactive_pool() {
        let lanes = LaneManager::new(&GameParams::default()).unwrap();
        assert_eq!(lanes.pool().len(), 7);
        assert!(lanes.pool().iter().all(|l| !l.is_active()));
        assert_eq!(lanes.window_len(), 0);
        assert!(lanes.current_lane().is_none());
    }

    #[test]
    fn test_new_rejects_missing_templates() {
        let params = GameParams {
            lane_template: None,
            ..Default::default()
        };
        assert_eq!(
            LaneManager::new(&params).unwrap_err(),
            ConfigError::MissingTemplate("lane")
        );
    }

    #[test]
    fn test_visible_clamped_below_pool() {
        let mut params = GameParams::default();
        params.lanes.pool_size = 3;
        params.lanes.visible_count = 8;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut lanes = LaneManager::new(&params).unwrap();
        lanes.restart(&mut rng);
        assert_eq!(lanes.visible_count(), 2);
        assert_eq!(lanes.window_len(), 2);
    }

    #[test]
    fn test_restart_lays_out_visible_lanes() {
        let (lanes, _) = started(3);
        let info = lanes.debug_info();
        assert_eq!(info.active_lanes, 5);
        assert_eq!(info.current_index, 0);
        assert_eq!(info.first_active_index, 0);
        assert_eq!(info.pool_size, 7);
        assert_eq!(info.visible_lanes, 5);
        assert_window_consistent(&lanes);
    }

    #[test]
    fn test_first_two_lanes_are_grass() {
        for seed in 0..10 {
            let (lanes, _) = started(seed);
            let types: Vec<LaneType> = lanes.active_lanes().map(|l| l.lane_type()).collect();
            assert_eq!(&types[..2], &[LaneType::Grass, LaneType::Grass]);
        }
    }

    // -------------------------------------------------------------------------
    // Window movement
    // -------------------------------------------------------------------------

    #[test]
    fn test_backward_at_zero_is_noop() {
        let (mut lanes, mut rng) = started(4);
        let before = lanes.debug_info();
        let slots: Vec<usize> = lanes.active_lanes().map(|l| l.slot).collect();
        assert!(!lanes.move_to_previous_lane(&mut rng));
        assert_eq!(lanes.debug_info(), before);
        let after: Vec<usize> = lanes.active_lanes().map(|l| l.slot).collect();
        assert_eq!(slots, after);
    }

    #[test]
    fn test_forward_before_midpoint_keeps_window() {
        let (mut lanes, mut rng) = started(4);
        let advance = lanes.move_to_next_lane(&mut rng);
        assert_eq!(advance.index, 1);
        assert!(advance.new_best);
        assert_eq!(advance.recycled_slot, None);
        assert_eq!(lanes.first_active_index(), 0);
    }

    #[test]
    fn test_forward_past_midpoint_recycles_back_lane() {
        let (mut lanes, mut rng) = started(4);
        lanes.move_to_next_lane(&mut rng);
        lanes.move_to_next_lane(&mut rng);
        let back_slot = lanes.active_lanes().next().map(|l| l.slot);
        let advance = lanes.move_to_next_lane(&mut rng);
        assert_eq!(advance.recycled_slot, back_slot);
        assert_eq!(lanes.first_active_index(), 1);
        let front = lanes.active_lanes().last().unwrap();
        assert_eq!(Some(front.slot), back_slot);
        assert_eq!(front.logical_index(), 5);
        assert_eq!(lanes.last_spawn_z(), lanes.lane_z(6));
        assert_window_consistent(&lanes);
    }

    #[test]
    fn test_long_walk_keeps_window_contiguous() {
        let (mut lanes, mut rng) = started(21);
        for step in 0..200u32 {
            lanes.move_to_next_lane(&mut rng);
            // Wander back now and then.
            if step % 7 == 3 {
                lanes.move_to_previous_lane(&mut rng);
                lanes.move_to_previous_lane(&mut rng);
            }
            assert_window_consistent(&lanes);
            assert_eq!(lanes.window_len(), 5);
        }
    }

    #[test]
    fn test_retreat_restores_lane_record() {
        let (mut lanes, mut rng) = started(9);
        for _ in 0..10 {
            lanes.move_to_next_lane(&mut rng);
        }
        let first = lanes.first_active_index();
        let expected = lanes.record(first - 1).unwrap();
        while lanes.first_active_index() == first {
            assert!(lanes.move_to_previous_lane(&mut rng));
        }

        let mut reference = Lane::new(
            0,
            LaneTemplate::default(),
            TrafficParams::default(),
            VehicleTemplate::default(),
        );
        reference.set_lane_type(expected.lane_type, expected.decor_seed);

        let restored = lanes.lane_at(first - 1).unwrap();
        assert_eq!(restored.lane_type(), expected.lane_type);
        assert_eq!(restored.trees(), reference.trees());
        assert_window_consistent(&lanes);
    }

    #[test]
    fn test_retreat_then_advance_is_not_new_best() {
        let (mut lanes, mut rng) = started(2);
        lanes.move_to_next_lane(&mut rng);
        lanes.move_to_next_lane(&mut rng);
        lanes.move_to_previous_lane(&mut rng);
        let advance = lanes.move_to_next_lane(&mut rng);
        assert_eq!(advance.index, 2);
        assert!(!advance.new_best);
        assert_eq!(lanes.furthest_index(), 2);
    }

    #[test]
    fn test_retreat_all_the_way_home() {
        let (mut lanes, mut rng) = started(6);
        for _ in 0..25 {
            lanes.move_to_next_lane(&mut rng);
        }
        while lanes.move_to_previous_lane(&mut rng) {
            assert_window_consistent(&lanes);
        }
        assert_eq!(lanes.current_index(), 0);
        assert_eq!(lanes.first_active_index(), 0);
        let first_types: Vec<LaneType> = lanes
            .active_lanes()
            .take(2)
            .map(|l| l.lane_type())
            .collect();
        assert_eq!(first_types, vec![LaneType::Grass, LaneType::Grass]);
    }

    #[test]
    fn test_generated_sequence_respects_hazard_cap() {
        let (mut lanes, mut rng) = started(77);
        for _ in 0..500 {
            lanes.move_to_next_lane(&mut rng);
        }
        let mut streak = 0;
        for i in 0..=lanes.furthest_index() {
            match lanes.record(i).map(|r| r.lane_type) {
                Some(LaneType::Road) => {
                    streak += 1;
                    assert!(streak <= 3, "road streak at {i}");
                }
                Some(LaneType::Grass) => streak = 0,
                None => {}
            }
        }
    }

    #[test]
    fn test_recent_types_bounded_by_pattern_memory() {
        let (mut lanes, mut rng) = started(12);
        for _ in 0..30 {
            lanes.move_to_next_lane(&mut rng);
        }
        assert_eq!(lanes.recent_types().count(), 5);
    }

    #[test]
    fn test_traffic_only_on_road_lanes() {
        let (mut lanes, mut rng) = started(31);
        for _ in 0..12 {
            lanes.move_to_next_lane(&mut rng);
        }
        for _ in 0..600 {
            lanes.tick_traffic(1.0 / 60.0, &mut rng);
        }
        for lane in lanes.active_lanes() {
            if lane.lane_type() == LaneType::Grass {
                assert_eq!(lane.traffic().active_count(), 0);
            }
        }
        let moving: usize = lanes
            .active_lanes()
            .filter(|l| l.lane_type() == LaneType::Road)
            .map(|l| l.traffic().active_count())
            .sum();
        let roads = lanes
            .active_lanes()
            .filter(|l| l.lane_type() == LaneType::Road)
            .count();
        if roads > 0 {
            assert!(moving > 0, "ten seconds of road traffic should spawn vehicles");
        }
    }

    #[test]
    fn test_recycled_lane_starts_without_vehicles() {
        let (mut lanes, mut rng) = started(40);
        for _ in 0..40 {
            for _ in 0..120 {
                lanes.tick_traffic(1.0 / 60.0, &mut rng);
            }
            let advance = lanes.move_to_next_lane(&mut rng);
            if let Some(slot) = advance.recycled_slot {
                let lane = &lanes.pool()[slot];
                assert_eq!(lane.traffic().active_count(), 0);
            }
        }
    }

    #[test]
    fn test_lane_records_forgotten_beyond_horizon() {
        let (mut lanes, mut rng) = started(31);
        for _ in 0..(LANE_RECORD_HORIZON + 400) {
            lanes.move_to_next_lane(&mut rng);
        }
        let oldest = lanes.oldest_record_index();
        assert_eq!(oldest, lanes.first_active_index() - LANE_RECORD_HORIZON);
        assert!(lanes.record(0).is_none());
        assert!(lanes.record(oldest - 1).is_none());
        assert!(lanes.record(oldest).is_some());
        assert!(lanes.record(lanes.furthest_index()).is_some());
        assert_window_consistent(&lanes);
    }

    #[test]
    fn test_retreat_stops_at_oldest_remembered_lane() {
        let (mut lanes, mut rng) = started(32);
        for _ in 0..(LANE_RECORD_HORIZON + 50) {
            lanes.move_to_next_lane(&mut rng);
        }
        let oldest = lanes.oldest_record_index();
        assert!(oldest > 0);
        while lanes.move_to_previous_lane(&mut rng) {
            assert_window_consistent(&lanes);
        }
        assert_eq!(lanes.current_index(), oldest);
        assert_eq!(lanes.first_active_index(), oldest);
        assert_eq!(lanes.oldest_record_index(), oldest);
        assert!(!lanes.move_to_previous_lane(&mut rng));
    }

    #[test]
    fn test_restart_clears_record_horizon() {
        let (mut lanes, mut rng) = started(33);
        for _ in 0..(LANE_RECORD_HORIZON + 20) {
            lanes.move_to_next_lane(&mut rng);
        }
        assert!(lanes.oldest_record_index() > 0);
        lanes.restart(&mut rng);
        assert_eq!(lanes.oldest_record_index(), 0);
        assert!(lanes.record(0).is_some());
    }
}
