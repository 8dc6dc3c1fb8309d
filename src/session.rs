use crate::board::Square;
use crate::game::{GameError, GameState, GameStatus, MoveOutcome, Player};
use tracing::{info, instrument, warn};

pub struct SessionConfig {
    pub first_player: Player,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            first_player: Player::Zero,
        }
    }
}

/// Turn coordinator: owns the current position, whose turn it is and whether the game is over.
/// One accepted move per turn; a rejected move keeps the turn with the same player.
pub struct Session {
    config: SessionConfig,
    state: GameState,
    current_player: Player,
    status: GameStatus,
    move_count: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            current_player: config.first_player,
            config,
            state: GameState::new(),
            status: GameStatus::InProgress,
            move_count: 0,
        }
    }

    /// Resume from a position reached through play. A position where a piece
    /// already stands on its goal row starts out as game over.
    pub fn from_state(state: GameState, current_player: Player) -> Self {
        let winner = state
            .check_victory(Player::Zero)
            .or_else(|| state.check_victory(Player::One));
        let status = match winner {
            Some(winner) => GameStatus::GameOver { winner },
            None => GameStatus::InProgress,
        };

        Session {
            config: SessionConfig::default(),
            state,
            current_player,
            status,
            move_count: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Squares the player to move may go to; empty once the game is over
    pub fn legal_destinations(&self) -> Vec<Square> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.state.legal_destinations(self.current_player)
    }

    /// Submit the current player's move. On success the turn passes, unless the move won.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn submit(&mut self, square_id: &str) -> Result<GameStatus, GameError> {
        if self.is_game_over() {
            warn!("move submitted after game over");
            return Err(GameError::GameOver);
        }

        let player = self.current_player;
        match self.state.move_piece(player, square_id) {
            MoveOutcome::Rejected => {
                warn!("illegal move, turn stays");
                Err(GameError::Rejected(square_id.to_string()))
            }
            MoveOutcome::Accepted { state, winner } => {
                self.state = state;
                self.move_count += 1;

                if let Some(winner) = winner {
                    info!(%winner, moves = self.move_count, "game over");
                    self.status = GameStatus::GameOver { winner };
                } else {
                    self.current_player = player.opponent();
                }

                Ok(self.status)
            }
        }
    }

    /// Start over from the initial position.
    pub fn reset(&mut self) {
        info!("new game");
        self.state = GameState::new();
        self.current_player = self.config.first_player;
        self.status = GameStatus::InProgress;
        self.move_count = 0;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(id: &str) -> Square {
        id.parse().unwrap()
    }

    #[test]
    fn test_game_starts_with_player_zero() {
        let session = Session::default();
        assert_eq!(session.current_player(), Player::Zero);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_configured_first_player() {
        let session = Session::new(SessionConfig {
            first_player: Player::One,
        });
        assert_eq!(session.current_player(), Player::One);
        assert!(session.legal_destinations().contains(&sq("e2")));
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = Session::default();

        session.submit("e8").unwrap();
        assert_eq!(session.current_player(), Player::One);

        session.submit("e2").unwrap();
        assert_eq!(session.current_player(), Player::Zero);
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn test_rejected_move_keeps_turn_and_state() {
        let mut session = Session::default();

        let result = session.submit("e7");
        assert_eq!(result, Err(GameError::Rejected("e7".to_string())));
        assert_eq!(session.current_player(), Player::Zero);
        assert_eq!(*session.state(), GameState::new());
        assert_eq!(session.move_count(), 0);

        // Same player may resubmit
        assert_eq!(session.submit("e8"), Ok(GameStatus::InProgress));
    }

    #[test]
    fn test_malformed_square_is_rejected() {
        let mut session = Session::default();
        assert!(matches!(session.submit("x"), Err(GameError::Rejected(_))));
        assert_eq!(session.current_player(), Player::Zero);
    }

    #[test]
    fn test_winning_move_ends_game() {
        let state = GameState::with_positions(sq("c2"), sq("e1")).unwrap();
        let mut session = Session::from_state(state, Player::Zero);

        let status = session.submit("c1").unwrap();
        assert_eq!(
            status,
            GameStatus::GameOver {
                winner: Player::Zero
            }
        );
        assert!(session.is_game_over());
        assert!(session.legal_destinations().is_empty());
    }

    #[test]
    fn test_cannot_move_after_game_over() {
        let state = GameState::with_positions(sq("a5"), sq("h8")).unwrap();
        let mut session = Session::from_state(state, Player::One);
        session.submit("h9").unwrap();

        let before = *session.state();
        let result = session.submit("a4");
        assert_eq!(result, Err(GameError::GameOver));
        assert_eq!(*session.state(), before);
    }

    #[test]
    fn test_resuming_won_position_is_game_over() {
        let state = GameState::with_positions(sq("c1"), sq("e5")).unwrap();
        let mut session = Session::from_state(state, Player::One);

        assert_eq!(
            session.status(),
            GameStatus::GameOver {
                winner: Player::Zero
            }
        );
        assert!(session.legal_destinations().is_empty());
        assert_eq!(session.submit("e4"), Err(GameError::GameOver));
        assert_eq!(*session.state(), state);
    }

    #[test]
    fn test_resuming_open_position_is_in_progress() {
        let state = GameState::with_positions(sq("c2"), sq("e8")).unwrap();
        let session = Session::from_state(state, Player::One);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut session = Session::default();
        session.submit("d9").unwrap();
        session.reset();

        assert_eq!(*session.state(), GameState::new());
        assert_eq!(session.current_player(), Player::Zero);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_full_game_down_the_file() {
        let mut session = Session::default();

        // Player 0 walks down the d file, player 1 shuffles on the south edge
        let moves = [
            "d9", "f1", "d8", "g1", "d7", "f1", "d6", "g1", "d5", "f1", "d4", "g1", "d3", "f1",
            "d2", "g1",
        ];
        for id in moves {
            assert_eq!(session.submit(id), Ok(GameStatus::InProgress), "{id}");
        }

        assert_eq!(
            session.submit("d1"),
            Ok(GameStatus::GameOver {
                winner: Player::Zero
            })
        );
        assert_eq!(session.move_count(), 17);
    }
}
