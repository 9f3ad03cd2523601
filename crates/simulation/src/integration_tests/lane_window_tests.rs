use crate::game_params::GameParams;
use crate::lane::LaneType;
use crate::player::MoveIntent;
use crate::test_harness::TestGame;

/// A run long enough for back-and-forth walks without timing out.
fn patient_game(seed: u64) -> TestGame {
    let mut params = GameParams::default();
    params.run.max_time_left = 120.0;
    TestGame::with_params(params, seed)
}

fn assert_window(game: &TestGame) {
    let lanes = game.lanes();
    let first = lanes.first_active_index();
    let current = lanes.current_index();
    assert!(current >= first && (current as usize) < first as usize + lanes.window_len());
    for (offset, lane) in lanes.active_lanes().enumerate() {
        assert_eq!(lane.logical_index(), first + offset as u32);
    }
}

#[test]
fn test_hopping_forward_keeps_window_steady() {
    let mut game = TestGame::with_seed(5);
    game.start_run();
    for _ in 0..20 {
        game.hop(MoveIntent::Forward);
        assert_window(&game);
        assert_eq!(game.lanes().window_len(), 5);
    }
    assert_eq!(game.lanes().current_index(), 20);
    // Player stands on the current lane.
    let lane_z = game.lanes().current_lane().unwrap().world_z();
    assert_eq!(game.player().position().z, lane_z);
}

#[test]
fn test_mixed_walk_never_goes_negative() {
    let mut game = patient_game(11);
    game.start_run();
    let pattern = [
        MoveIntent::Backward,
        MoveIntent::Forward,
        MoveIntent::Forward,
        MoveIntent::Backward,
        MoveIntent::Backward,
        MoveIntent::Backward,
        MoveIntent::Forward,
    ];
    for _ in 0..4 {
        for intent in pattern {
            game.hop(intent);
            assert_window(&game);
        }
    }
}

#[test]
fn test_lane_types_survive_retreat() {
    let mut game = patient_game(23);
    game.start_run();
    for _ in 0..8 {
        game.hop(MoveIntent::Forward);
    }
    let before: Vec<(u32, LaneType)> = (0..=8)
        .filter_map(|i| game.lanes().record(i).map(|r| (i, r.lane_type)))
        .collect();
    for _ in 0..8 {
        game.hop(MoveIntent::Backward);
    }
    for (i, lane_type) in before {
        if let Some(lane) = game.lanes().lane_at(i) {
            assert_eq!(lane.lane_type(), lane_type, "lane {i}");
        }
    }
    assert_eq!(game.lanes().current_index(), 0);
    assert_eq!(game.lanes().first_active_index(), 0);
}

#[test]
fn test_sidesteps_stay_in_lane() {
    let mut game = patient_game(3);
    game.start_run();
    let index = game.lanes().current_index();
    for _ in 0..20 {
        game.hop(MoveIntent::Left);
    }
    let tile = game.player().tile_index();
    assert!(tile <= 12, "stopped at walkable edge, got {tile}");
    for _ in 0..20 {
        game.hop(MoveIntent::Right);
    }
    assert!(game.player().tile_index() >= 2);
    assert_eq!(game.lanes().current_index(), index);
}
