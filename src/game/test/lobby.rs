//! Lobby tests

use crate::error::GameError;
use crate::game::{GameOptions, Lobby};

#[test]
fn test_lobby_needs_players() {
    let err = Lobby::new(GameOptions::default(), 0).unwrap_err();
    assert_eq!(err, GameError::InvalidPlayerCount(0));
}

#[test]
fn test_lobby_rejects_bad_options() {
    for accuracy in [-0.1, 1.5, f64::NAN] {
        let opts = GameOptions { intuition_accuracy: accuracy };
        assert_eq!(Lobby::new(opts, 5).unwrap_err(), GameError::InvalidGameOptions);
    }
}

#[test]
fn test_players_join_in_seat_order() {
    let mut lobby = Lobby::new(GameOptions::default(), 3).unwrap();
    assert_eq!(lobby.add_player(" Alice"), Ok(0));
    assert_eq!(lobby.add_player("BOB "), Ok(1));
    assert!(!lobby.is_full());
    assert_eq!(lobby.add_player("carol"), Ok(2));
    assert!(lobby.is_full());
    assert_eq!(lobby.players(), ["alice", "bob", "carol"]);
    assert_eq!(lobby.num_players(), 3);
}

#[test]
fn test_bad_names_are_rejected() {
    let mut lobby = Lobby::new(GameOptions::default(), 3).unwrap();
    lobby.add_player("alice").unwrap();
    assert_eq!(lobby.add_player("   "), Err(GameError::EmptyPlayerName));
    assert_eq!(lobby.add_player("ALICE"), Err(GameError::DuplicatePlayerName("alice".to_string())));
    assert_eq!(lobby.players().len(), 1);
}

#[test]
fn test_full_lobby_is_closed() {
    let mut lobby = Lobby::new(GameOptions::default(), 1).unwrap();
    lobby.add_player("alice").unwrap();
    assert_eq!(lobby.add_player("bob"), Err(GameError::LobbyFull));
}

#[test]
fn test_game_starts_only_when_full() {
    let mut lobby = Lobby::new(GameOptions::default(), 2).unwrap();
    lobby.add_player("alice").unwrap();
    assert_eq!(lobby.start(0).unwrap_err(), GameError::LobbyNotFull);

    lobby.add_player("bob").unwrap();
    let game = lobby.start(0).unwrap();
    assert_eq!(game.player_names().collect::<Vec<_>>(), ["alice", "bob"]);
    assert_eq!(game.counts.mafia, 1);
}
