//! A game in progress: board, side to move and move history
//!
//! The rule engine only answers questions. `Game` is the caller that commits
//! a move: relocate the piece, relocate the rook when castling, then replace
//! a pawn on its far rank with a queen. All three steps happen inside one
//! `&mut self` call, so no observer ever sees a half-applied move.

use crate::board::Board;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::moves::Move;
use crate::piece::Piece;
use crate::protocol::MoveCommand;
use crate::rules::{is_castle_attempt, GameStatus, RuleEngine};
use crate::square::Square;

/// Outcome of committing one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedMove {
    pub record: Move,
    /// Rook relocation when the move was a castle.
    pub castle: Option<(Square, Square)>,
    pub promoted: bool,
}

impl CommittedMove {
    /// The move as it goes on the wire.
    pub fn command(&self) -> MoveCommand {
        MoveCommand {
            from: self.record.from(),
            to: self.record.to(),
            castle: self.castle,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<Move>,
    captured: Vec<Piece>,
}

impl Game {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            history: Vec::new(),
            captured: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Out-of-band turn signal from the session layer.
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Pieces `color` has taken from the opponent, in capture order.
    pub fn captured_by(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.captured.iter().filter(move |p| p.color() != color)
    }

    pub fn rules(&self) -> RuleEngine<'_> {
        RuleEngine::new(&self.board)
    }

    /// Status of the side to move.
    pub fn status(&self) -> GameStatus {
        self.rules().status(self.turn)
    }

    /// Validates and commits a move for the side to move.
    pub fn play(&mut self, from: Square, to: Square) -> Result<CommittedMove> {
        let castle = self.validate(from, to, self.turn)?;
        self.commit(from, to, castle)
    }

    /// Validates and commits a move received from `color`.
    ///
    /// Castle fields must agree with what the rules derive for the king move.
    pub fn play_as(&mut self, color: Color, cmd: &MoveCommand) -> Result<CommittedMove> {
        if color != self.turn {
            return Err(Error::WrongTurn {
                expected: self.turn,
                got: color,
            });
        }
        let castle = self.validate(cmd.from, cmd.to, color)?;
        if castle != cmd.castle {
            return Err(Error::Protocol(format!(
                "castle fields do not match move {} {}",
                cmd.from, cmd.to
            )));
        }
        self.commit(cmd.from, cmd.to, castle)
    }

    /// Applies a peer's move without validation, as the peer already did.
    ///
    /// Promotion is recomputed locally.
    pub fn apply_remote(&mut self, cmd: &MoveCommand) -> Result<CommittedMove> {
        self.commit(cmd.from, cmd.to, cmd.castle)
    }

    fn validate(&self, from: Square, to: Square, color: Color) -> Result<Option<(Square, Square)>> {
        let rules = self.rules();
        if rules.status(color).is_over() {
            return Err(Error::GameOver);
        }
        if !rules.is_move_valid(from, to, color) {
            return Err(Error::IllegalMove { from, to });
        }
        let castle = match self.board.get(from) {
            Some(piece) if is_castle_attempt(&piece, from, to) => rules.castle_rook_move(from, to, color),
            _ => None,
        };
        Ok(castle)
    }

    fn commit(&mut self, from: Square, to: Square, castle: Option<(Square, Square)>) -> Result<CommittedMove> {
        let moved = self.board.get(from).ok_or(Error::IllegalMove { from, to })?;
        let captured = self.board.get(to);

        self.board.move_piece(from, to);
        if let Some((rook_from, rook_to)) = castle {
            self.board.move_piece(rook_from, rook_to);
        }

        let promotion = self.board.get(to).and_then(|piece| {
            let rules = RuleEngine::new(&self.board);
            rules
                .should_promote(to, &piece)
                .then(|| rules.promote_pawn(piece.color()))
        });
        if let Some(queen) = promotion {
            self.board.set(to, Some(queen));
        }

        let record = Move::new(from, to, moved, captured);
        if let Some(piece) = captured {
            self.captured.push(piece);
        }
        self.history.push(record.clone());
        self.turn = self.turn.opposite();

        Ok(CommittedMove {
            record,
            castle,
            promoted: promotion.is_some(),
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_play_flips_turn_and_records() {
        let mut game = Game::new();
        let committed = game.play(sq("e2"), sq("e4")).unwrap();

        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history().len(), 1);
        assert_eq!(committed.record.to_string(), "pawn from e2 to e4");
        assert_eq!(committed.command().to_string(), "MOVE e2 e4");
        assert!(!committed.promoted);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut game = Game::new();
        let before = game.board().clone();
        let err = game.play(sq("e2"), sq("e5")).unwrap_err();
        assert_eq!(err, Error::IllegalMove { from: sq("e2"), to: sq("e5") });
        assert_eq!(game.turn(), Color::White);
        assert!(game.history().is_empty());
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_castle_moves_rook() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K2R").unwrap();
        let mut game = Game::from_board(board, Color::White);
        let committed = game.play(sq("e1"), sq("g1")).unwrap();

        assert_eq!(committed.castle, Some((sq("h1"), sq("f1"))));
        assert_eq!(committed.command().to_string(), "MOVE e1 g1 CASTLE h1 f1");
        assert_eq!(game.board().get(sq("g1")).unwrap().kind(), PieceKind::King);
        assert_eq!(game.board().get(sq("f1")).unwrap().kind(), PieceKind::Rook);
        assert!(game.board().get(sq("h1")).is_none());
    }

    #[test]
    fn test_promotion_on_commit() {
        let board = Board::from_placement("4k3/P7/8/8/8/8/8/4K3").unwrap();
        let mut game = Game::from_board(board, Color::White);
        let committed = game.play(sq("a7"), sq("a8")).unwrap();

        assert!(committed.promoted);
        let queen = game.board().get(sq("a8")).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.color(), Color::White);
        assert_eq!(game.status(), GameStatus::Check);
    }

    #[test]
    fn test_play_as_checks_turn_and_castle_fields() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K2R").unwrap();
        let mut game = Game::from_board(board, Color::White);

        let bare = MoveCommand::new(sq("e1"), sq("g1"));
        assert!(matches!(game.play_as(Color::Black, &bare), Err(Error::WrongTurn { .. })));
        assert!(matches!(game.play_as(Color::White, &bare), Err(Error::Protocol(_))));

        let castle = bare.with_castle(sq("h1"), sq("f1"));
        assert!(game.play_as(Color::White, &castle).is_ok());
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_apply_remote_recomputes_promotion() {
        let board = Board::from_placement("4k3/8/8/8/8/8/p7/4K3").unwrap();
        let mut game = Game::from_board(board, Color::Black);
        let committed = game.apply_remote(&MoveCommand::new(sq("a2"), sq("a1"))).unwrap();

        assert!(committed.promoted);
        assert_eq!(game.board().get(sq("a1")).unwrap().kind(), PieceKind::Queen);
        assert!(game.apply_remote(&MoveCommand::new(sq("a5"), sq("a4"))).is_err());
    }

    #[test]
    fn test_captures_are_tracked() {
        let mut game = Game::new();
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5")] {
            game.play(sq(from), sq(to)).unwrap();
        }
        let taken: Vec<_> = game.captured_by(Color::White).map(|p| p.kind()).collect();
        assert_eq!(taken, vec![PieceKind::Pawn]);
        assert_eq!(game.captured_by(Color::Black).count(), 0);
        assert_eq!(
            game.history().last().unwrap().to_string(),
            "pawn from e4 to d5 captures pawn"
        );
    }

    #[test]
    fn test_turn_signal_overrides_side_to_move() {
        let mut game = Game::new();
        game.set_turn(Color::Black);
        assert!(game.play(sq("e2"), sq("e4")).is_err());
        assert!(game.play(sq("e7"), sq("e5")).is_ok());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_no_moves_after_mate() {
        let board = Board::from_placement("6k1/8/8/8/8/8/5PPP/r5K1").unwrap();
        let mut game = Game::from_board(board, Color::White);
        assert_eq!(game.play(sq("h2"), sq("h3")).unwrap_err(), Error::GameOver);
    }
}
