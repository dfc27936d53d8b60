use std::str::FromStr;

use corebishop::board::{Board, Color};
use corebishop::moves::execute::{generate_legal, moves_from};
use corebishop::moves::magic::MagicTables;
use corebishop::moves::magic::loader::load_magic_tables;
use corebishop::moves::square_control::attackers_of;
use corebishop::moves::types::Move;
use corebishop::square::Square;

fn tables() -> MagicTables {
    load_magic_tables()
}

fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    let f = Square::from_str(from).unwrap();
    let t = Square::from_str(to).unwrap();
    moves.iter().any(|m| m.from == f && m.to == t)
}

#[test]
fn self_check_is_filtered_out() {
    // White: Ke1, Re2. Black: Re8. Moving Re2->f2 exposes e-file → illegal.
    let fen = "4r3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &t, &mut legal, &mut scratch);

    assert!(
        !has_move(&legal, "e2", "f2"),
        "Move e2f2 should be filtered (self-check)."
    );
    assert!(
        has_move(&legal, "e2", "e3"),
        "Blocking move e2e3 should remain legal."
    );
}

#[test]
fn checking_moves_are_kept() {
    // White: Re1, Kh1. Black: Ke8, Ne7. Re1xE7+ should be legal.
    let fen = "4k3/4n3/8/8/8/8/8/4R2K w - - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &t, &mut legal, &mut scratch);

    assert!(
        has_move(&legal, "e1", "e7"),
        "Checking capture e1e7 should not be filtered out."
    );
}

#[test]
fn en_passant_is_illegal_when_pawn_is_pinned_opening_file_on_own_king() {
    // Position: White king e1, White pawn e5; Black rook e8; Black pawn d5.
    // EP square = d6; White to move. If White plays e5xd6 e.p., the e-file opens and K on e1 is in check -> illegal.
    //
    // Board:
    // 8: k . . . r . . .
    // 7: . . . . . . . .
    // 6: . . . . . . . .
    // 5: . . . p P . . .
    // 4: . . . . . . . .
    // 3: . . . . . . . .
    // 2: . . . . . . . .
    // 1: . . . . K . . R
    // FEN with EP target d6 and white to move:
    let fen = "k3r3/8/8/3pP3/8/8/8/4K2R w - d6 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let tables = load_magic_tables();

    let mut moves = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &tables, &mut moves, &mut scratch);

    // Ensure no legal EP move from e5 to d6 exists
    assert!(
        !moves.iter().any(|m| m.is_en_passant()
            && m.from == Square::from_str("e5").unwrap()
            && m.to == Square::from_str("d6").unwrap()),
        "EP capture that exposes own king must be filtered out by the legality checker"
    );
}

#[test]
fn moves_from_empty_square_is_empty() {
    let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let moves = moves_from(&mut b, &t, Square::from_str("a4").unwrap());
    assert!(moves.is_empty());
}

#[test]
fn moves_from_matches_generate_legal_filtered_by_source() {
    let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let from_e1 = moves_from(&mut b, &t, Square::from_str("e1").unwrap());

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &t, &mut legal, &mut scratch);
    let expected: Vec<Move> = legal
        .into_iter()
        .filter(|m| m.from == Square::from_str("e1").unwrap())
        .collect();

    assert_eq!(from_e1.len(), expected.len());
    for m in &expected {
        assert!(from_e1.contains(m));
    }
}

#[test]
fn moves_from_never_leaves_own_king_in_check() {
    // White: Ke1, Re2. Black: Re8. e2f2 would expose the e-file to the black rook.
    let fen = "4r3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let from_e2 = moves_from(&mut b, &t, Square::from_str("e2").unwrap());
    assert!(!from_e2.iter().any(|m| m.to == Square::from_str("f2").unwrap()));
}

#[test]
fn attackers_of_empty_square_has_no_attackers() {
    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    let b = Board::from_str(fen).unwrap();
    let t = tables();

    let attackers = attackers_of(&b, Square::from_str("a4").unwrap(), Color::White, &t);
    assert_eq!(attackers, 0);
}

#[test]
fn attackers_of_reports_the_attacking_piece() {
    // White rook on e2 attacks e8 along the open e-file.
    let fen = "4k3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    let b = Board::from_str(fen).unwrap();
    let t = tables();

    let attackers = attackers_of(&b, Square::from_str("e8").unwrap(), Color::White, &t);
    assert_eq!(attackers, 1u64 << Square::from_str("e2").unwrap().index());
}
