use crate::audio::{AudioCommand, SoundId};
use crate::events::ScoreUpdated;
use crate::player::MoveIntent;
use crate::test_harness::TestGame;

#[test]
fn test_forward_progress_scores_and_persists() {
    let mut game = TestGame::new();
    game.start_run();
    game.take_log();

    game.hop(MoveIntent::Forward);
    assert_eq!(
        game.log().scores,
        vec![ScoreUpdated {
            current: 1,
            high: 1
        }]
    );
    assert_eq!(game.log().persisted, vec![1]);
}

#[test]
fn test_every_accepted_hop_plays_jump_sound() {
    let mut game = TestGame::new();
    game.start_run();
    game.take_log();

    game.hop(MoveIntent::Forward);
    game.hop(MoveIntent::Backward);
    let jumps: Vec<f32> = game
        .log()
        .audio
        .iter()
        .filter_map(|c| match c {
            AudioCommand::PlayOnce {
                sound: SoundId::Jump,
                volume,
            } => Some(*volume),
            _ => None,
        })
        .collect();
    assert_eq!(jumps, vec![0.2, 0.2]);
}

#[test]
fn test_revisiting_index_does_not_rescore() {
    let mut game = TestGame::new();
    game.start_run();
    game.hop(MoveIntent::Forward);
    game.hop(MoveIntent::Forward);
    game.hop(MoveIntent::Backward);
    game.take_log();

    game.hop(MoveIntent::Forward);
    assert!(game.log().scores.is_empty());
    assert!(game.log().persisted.is_empty());
    assert_eq!(game.scoreboard().current(), 2);
}

#[test]
fn test_loaded_high_score_is_kept_until_beaten() {
    let mut game = TestGame::new();
    game.load_high_score(3);
    assert_eq!(game.scoreboard().high(), 3);
    assert_eq!(
        game.log().scores.last(),
        Some(&ScoreUpdated {
            current: 0,
            high: 3
        })
    );

    game.start_run();
    game.take_log();
    for _ in 0..3 {
        game.hop(MoveIntent::Forward);
    }
    assert!(game.log().persisted.is_empty());
    assert_eq!(game.scoreboard().high(), 3);

    game.hop(MoveIntent::Forward);
    assert_eq!(game.log().persisted, vec![4]);
    assert_eq!(game.scoreboard().high(), 4);
}

#[test]
fn test_clear_high_score_persists_zero() {
    let mut game = TestGame::new();
    game.load_high_score(9);
    game.take_log();
    game.clear_high_score();
    assert_eq!(game.scoreboard().high(), 0);
    assert_eq!(game.log().persisted, vec![0]);
}
