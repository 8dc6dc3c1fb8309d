use crate::board::{BOARD_SIZE, COLUMNS, Direction, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    /// Starting square: player `0` on the north edge, player `1` on the south edge.
    pub fn start_square(&self) -> Square {
        match self {
            Player::Zero => Square::NORTH_CENTER,
            Player::One => Square::SOUTH_CENTER,
        }
    }

    /// Row label the player has to reach to win.
    pub fn goal_row(&self) -> char {
        match self {
            Player::Zero => '1',
            Player::One => '9',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Zero => write!(f, "0"),
            Player::One => write!(f, "1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Invalid move: {0} is not a legal destination")]
    Rejected(String),
    #[error("Game already over")]
    GameOver,
    #[error("Both players cannot occupy {0}")]
    SharedSquare(Square),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    GameOver { winner: Player },
}

impl GameStatus {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::GameOver { winner } => Some(*winner),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }
}

/// Result of submitting a move to the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted {
        state: GameState,
        winner: Option<Player>,
    },
    Rejected,
}

/// Positions of both pieces. The two squares are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Positions")]
pub struct GameState {
    #[serde(rename = "0")]
    zero: Square,
    #[serde(rename = "1")]
    one: Square,
}

#[derive(Deserialize)]
struct Positions {
    #[serde(rename = "0")]
    zero: Square,
    #[serde(rename = "1")]
    one: Square,
}

impl TryFrom<Positions> for GameState {
    type Error = GameError;

    fn try_from(positions: Positions) -> Result<Self, Self::Error> {
        GameState::with_positions(positions.zero, positions.one)
    }
}

impl GameState {
    /// Create a new game with both pieces on their starting squares
    pub fn new() -> Self {
        GameState {
            zero: Player::Zero.start_square(),
            one: Player::One.start_square(),
        }
    }

    /// Create a game from arbitrary positions, e.g. a position reached through play
    pub fn with_positions(zero: Square, one: Square) -> Result<Self, GameError> {
        if zero == one {
            return Err(GameError::SharedSquare(zero));
        }
        Ok(GameState { zero, one })
    }

    pub fn position(&self, player: Player) -> Square {
        match player {
            Player::Zero => self.zero,
            Player::One => self.one,
        }
    }

    pub fn occupant(&self, square: Square) -> Option<Player> {
        if square == self.zero {
            Some(Player::Zero)
        } else if square == self.one {
            Some(Player::One)
        } else {
            None
        }
    }

    /// Destination in one direction, jumping the opponent when it blocks the way.
    pub fn destination(&self, player: Player, direction: Direction) -> Option<Square> {
        let opponent = self.position(player.opponent());
        let next = self.position(player).step(direction)?;

        if next == opponent {
            // Off-board past the opponent means no move this way
            return opponent.step(direction);
        }

        Some(next)
    }

    /// Get all legal destinations for the player, at most one per direction
    pub fn legal_destinations(&self, player: Player) -> Vec<Square> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.destination(player, direction))
            .collect()
    }

    pub fn is_legal_move(&self, player: Player, target: Option<Square>) -> bool {
        let Some(target) = target else {
            return false;
        };

        if self.occupant(target).is_some() {
            return false;
        }

        self.legal_destinations(player).contains(&target)
    }

    /// Return the state after `player` moves to `target`. `self` is never modified.
    pub fn apply_move(&self, player: Player, target: Square) -> Result<GameState, GameError> {
        if !self.is_legal_move(player, Some(target)) {
            debug!(%player, %target, "rejected move");
            return Err(GameError::Rejected(target.to_string()));
        }

        let mut next = *self;
        match player {
            Player::Zero => next.zero = target,
            Player::One => next.one = target,
        }

        trace!(%player, from = %self.position(player), to = %target, "applied move");
        Ok(next)
    }

    /// Winner after `player` has moved, if their piece is on its goal row.
    pub fn check_victory(&self, player: Player) -> Option<Player> {
        if self.position(player).row_label() == player.goal_row() {
            Some(player)
        } else {
            None
        }
    }

    /// Validate, apply and check victory for a raw square identifier such as `"e8"`.
    /// Malformed identifiers are rejected like any other illegal target.
    pub fn move_piece(&self, player: Player, square_id: &str) -> MoveOutcome {
        let target = match square_id.parse::<Square>() {
            Ok(square) => square,
            Err(e) => {
                debug!(%player, square_id, error = %e, "unparsable square");
                return MoveOutcome::Rejected;
            }
        };

        match self.apply_move(player, target) {
            Ok(state) => MoveOutcome::Accepted {
                winner: state.check_victory(player),
                state,
            },
            Err(_) => MoveOutcome::Rejected,
        }
    }

    /// Get a string representation of the board
    pub fn display_board(&self) -> String {
        let mut result = String::new();
        result.push_str("  ");
        for col in COLUMNS {
            result.push_str(&format!(" {} ", col));
        }
        result.push('\n');

        for (i, square) in Square::all().enumerate() {
            if i % BOARD_SIZE == 0 {
                result.push_str(&format!("{} ", square.row_label()));
            }
            let c = match self.occupant(square) {
                Some(Player::Zero) => '0',
                Some(Player::One) => '1',
                None => '.',
            };
            result.push_str(&format!(" {} ", c));
            if i % BOARD_SIZE == BOARD_SIZE - 1 {
                result.push('\n');
            }
        }

        result
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
