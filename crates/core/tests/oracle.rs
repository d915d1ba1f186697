//! Cross-checks legal move generation against shakmaty
//!
//! Positions carry no castling rights and no en-passant square. Where a king
//! and rook still stand on their home squares (the start positions), the
//! squares between them are occupied, so castling is never available and
//! both libraries play by the same rules. Promotions collapse to a single (from, to) pair.

use std::collections::BTreeSet;

use chess_duel_core::{Board, Color, RuleEngine, Square};
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
    "4k3/P7/8/8/8/8/7p/4K3 w - - 0 1",
    "4k3/P7/8/8/8/8/7p/4K3 b - - 0 1",
    "4k3/8/8/8/8/8/3q4/4K3 w - - 0 1",
    "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1",
    "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 w - - 0 1",
    "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b - - 0 1",
    "6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1",
];

fn ours(fen: &str) -> BTreeSet<(String, String)> {
    let board = Board::from_placement(fen).unwrap();
    let color = if fen.split_whitespace().nth(1) == Some("b") {
        Color::Black
    } else {
        Color::White
    };
    let rules = &RuleEngine::new(&board);

    board
        .pieces()
        .filter(|(_, p)| p.color() == color)
        .flat_map(|(from, _)| {
            Square::all()
                .filter(move |&to| rules.is_move_valid(from, to, color))
                .map(move |to| (from.to_string(), to.to_string()))
        })
        .collect()
}

fn theirs(fen: &str) -> BTreeSet<(String, String)> {
    let fen: Fen = fen.parse().unwrap();
    let position: Chess = fen.into_position(CastlingMode::Standard).unwrap();

    position
        .legal_moves()
        .iter()
        .map(|m| (m.from().unwrap().to_string(), m.to().to_string()))
        .collect()
}

#[test]
fn test_legal_moves_match_shakmaty() {
    for fen in POSITIONS {
        assert_eq!(ours(fen), theirs(fen), "legal moves differ for {}", fen);
    }
}

#[test]
fn test_terminal_states_match_shakmaty() {
    for fen in POSITIONS {
        let board = Board::from_placement(fen).unwrap();
        let parsed: Fen = fen.parse().unwrap();
        let position: Chess = parsed.into_position(CastlingMode::Standard).unwrap();
        let color = if position.turn() == shakmaty::Color::White {
            Color::White
        } else {
            Color::Black
        };
        let rules = RuleEngine::new(&board);

        assert_eq!(rules.is_check(color), position.is_check(), "check differs for {}", fen);
        assert_eq!(rules.is_checkmate(color), position.is_checkmate(), "mate differs for {}", fen);
        assert_eq!(rules.is_stalemate(color), position.is_stalemate(), "stalemate differs for {}", fen);
    }
}
