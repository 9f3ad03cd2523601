use crate::game_params::GameParams;
use crate::game_state::GameState;
use crate::lane::LaneType;
use crate::test_harness::TestGame;

/// Roads right after the opening grass, with busy traffic.
fn busy_roads() -> GameParams {
    let mut params = GameParams::default();
    params.generator.grass_to_road = 1.0;
    params.traffic.spawn_interval_min = 0.5;
    params.traffic.spawn_interval_max = 1.0;
    params
}

fn road_vehicle_count(game: &TestGame) -> usize {
    game.lanes()
        .active_lanes()
        .filter(|l| l.lane_type() == LaneType::Road)
        .map(|l| l.traffic().active_count())
        .sum()
}

#[test]
fn test_vehicles_spawn_only_while_playing() {
    let mut game = TestGame::with_params(busy_roads(), 4);
    game.start_run();
    assert_eq!(game.lanes().lane_at(2).map(|l| l.lane_type()), Some(LaneType::Road));
    game.tick(128);
    assert!(road_vehicle_count(&game) > 0);
    let grass_vehicles: usize = game
        .lanes()
        .active_lanes()
        .filter(|l| l.lane_type() == LaneType::Grass)
        .map(|l| l.traffic().active_count())
        .sum();
    assert_eq!(grass_vehicles, 0);
}

#[test]
fn test_pause_freezes_vehicles() {
    let mut game = TestGame::with_params(busy_roads(), 4);
    game.start_run();
    game.tick(128);
    game.toggle_pause();
    assert_eq!(game.state(), GameState::Paused);

    let snapshot: Vec<_> = game
        .lanes()
        .active_lanes()
        .flat_map(|l| l.active_vehicle_positions().collect::<Vec<_>>())
        .collect();
    game.tick(64);
    let after: Vec<_> = game
        .lanes()
        .active_lanes()
        .flat_map(|l| l.active_vehicle_positions().collect::<Vec<_>>())
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn test_vehicle_positions_are_in_lane() {
    let mut game = TestGame::with_params(busy_roads(), 9);
    game.start_run();
    game.tick(200);
    for lane in game.lanes().active_lanes() {
        for pos in lane.active_vehicle_positions() {
            assert_eq!(pos.z, lane.world_z());
            assert_eq!(pos.y, 0.5);
            assert!(pos.x.abs() <= 18.0);
        }
    }
}
