//! State transition validation tests

use super::super::event::GameEvent;
use super::super::faction::Faction;
use super::super::player::Role::*;
use super::super::prompt::Prompt;
use super::super::GameState;
use super::test_utils::*;
use crate::error::GameError;

#[test]
fn test_game_starts_with_role_call() {
    let game = create_test_game(5, 0);
    assert!(matches!(game.state, GameState::RoleCall { .. }));
    let Prompt::RevealRole { player, card } = game.prompt() else {
        panic!("Expected the role call");
    };
    assert_eq!(player, 0);
    assert_eq!(card, game.role_card(0));
}

#[test]
fn test_role_call_is_one_player_at_a_time() {
    let mut game = create_test_game(4, 0);

    assert_eq!(game.acknowledge_role(1), Err(GameError::NotPlayersTurn));
    game.acknowledge_role(0).unwrap();
    assert!(matches!(game.prompt(), Prompt::RevealRole { player: 1, .. }));
    assert_eq!(game.acknowledge_role(0), Err(GameError::NotPlayersTurn));
    assert_eq!(game.acknowledge_role(9), Err(GameError::InvalidPlayerIndex));
    assert!(game.drain_events().is_empty(), "nothing is announced during the role call");
}

#[test]
fn test_role_call_leads_to_first_day() {
    let mut game = create_test_game(4, 0);
    for i in 0..4 {
        game.acknowledge_role(i).unwrap();
    }
    assert!(matches!(game.state, GameState::DayVoting { turn: 0, .. }));
    assert_eq!(game.drain_events(), vec![GameEvent::DayStarted { day: 1 }]);
    assert_eq!(game.acknowledge_role(0), Err(GameError::InvalidAction));
}

#[test]
fn test_invalid_action_in_wrong_state() {
    let mut game = create_test_game(5, 0);

    // Try to vote or act during the role call
    assert_eq!(game.cast_vote(0, None), Err(GameError::InvalidAction));
    assert_eq!(game.submit_night_action(0, "player1"), Err(GameError::InvalidAction));
    assert_eq!(game.acknowledge_night(0), Err(GameError::InvalidAction));

    // Try to act at night during the day
    finish_role_call(&mut game);
    assert_eq!(game.submit_night_action(0, "player1"), Err(GameError::InvalidAction));
    assert_eq!(game.acknowledge_night(0), Err(GameError::InvalidAction));
    assert_eq!(game.cast_vote(7, None), Err(GameError::InvalidPlayerIndex));
}

#[test]
fn test_day_and_night_alternate() {
    let mut game = create_game_with_roles(&[Mafia, Doctor, Villager, Villager, Villager, Villager]);

    day_vote(&mut game, &[]);
    assert!(matches!(game.state, GameState::NightActions { .. }));
    night_actions(&mut game, &[(1, "player1"), (0, "player5")]);
    assert!(matches!(game.state, GameState::DayVoting { .. }));

    let events = game.drain_events();
    let phases: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DayStarted { .. } | GameEvent::NightStarted { .. }))
        .cloned()
        .collect();
    assert_eq!(phases, vec![GameEvent::NightStarted { night: 1 }, GameEvent::DayStarted { day: 2 }]);
}

#[test]
fn test_nothing_happens_after_game_over() {
    let mut game = create_game_with_roles(&[Mafia, Villager, Villager]);
    day_vote(&mut game, &[(1, "player0"), (2, "player0")]);
    assert_eq!(game.winner(), Some(Faction::Village));
    assert!(matches!(game.prompt(), Prompt::GameOver { winner: Faction::Village }));

    assert_eq!(game.cast_vote(1, None), Err(GameError::InvalidAction));
    assert_eq!(game.submit_night_action(1, "player2"), Err(GameError::InvalidAction));
    assert_eq!(game.acknowledge_role(1), Err(GameError::InvalidAction));
    assert_eq!(game.acknowledge_night(1), Err(GameError::InvalidAction));
}

#[test]
fn test_restart_keeps_players() {
    let mut game = create_game_with_roles(&[Mafia, Villager, Villager]);
    day_vote(&mut game, &[(1, "player0"), (2, "player0")]);
    assert!(game.game_over());

    let fresh = game.restart().unwrap();
    assert!(matches!(fresh.state, GameState::RoleCall { .. }));
    assert_eq!(fresh.player_names().collect::<Vec<_>>(), game.player_names().collect::<Vec<_>>());
    assert_eq!(fresh.num_players_alive(), 3);
    assert_eq!(fresh.opts, game.opts);
    assert_counts_consistent(&fresh);
}

#[test]
fn test_single_player_game_ends_after_first_day() {
    let mut game = create_test_game(1, 0);
    finish_role_call(&mut game);
    let Prompt::Vote { voter: 0, eligible } = game.prompt() else {
        panic!("Expected a vote");
    };
    assert!(eligible.indices().is_empty());
    game.cast_vote(0, None).unwrap();
    assert_eq!(game.winner(), Some(Faction::Mafia));
}
