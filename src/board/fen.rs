// src/board/fen.rs
// FEN reader/writer per the exact grammar in §6: six whitespace-separated
// fields — placement, side to move, castling rights, en-passant target,
// half-move clock, full-move number.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, Color, Piece};
use crate::square::Square;
use std::str::FromStr;

impl Board {
    /// Parses `fen` and installs it into `self`, replacing all prior state.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(format!(
                "FEN must have 6 fields, found {}: `{}`",
                fields.len(),
                fen
            ));
        }

        let mut board = Board::new_empty();
        board.place_from_ranks(fields[0])?;

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("invalid side to move `{}`", other)),
        };

        board.castling_rights = parse_castling(fields[2])?;

        board.en_passant = match fields[3] {
            "-" => None,
            s => Some(
                Square::from_str(s)
                    .map_err(|_| format!("invalid en-passant target `{}`", s))?,
            ),
        };

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| format!("invalid half-move clock `{}`", fields[4]))?;

        board.fullmove_number = fields[5]
            .parse()
            .map_err(|_| format!("invalid full-move number `{}`", fields[5]))?;
        if board.fullmove_number == 0 {
            return Err("full-move number must be positive".to_string());
        }

        board.history.clear();
        board.refresh_zobrist();

        *self = board;
        Ok(())
    }

    /// Places pieces from field 1 (ranks 8->1, top to bottom).
    fn place_from_ranks(&mut self, placement: &str) -> Result<(), String> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "piece placement must have 8 ranks, found {}",
                ranks.len()
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;

            for c in rank_str.chars() {
                if file > 8 {
                    return Err(format!("rank `{}` overflows 8 files", rank_str));
                }
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(format!("invalid empty-square count `{}`", c));
                    }
                    file += skip as usize;
                    continue;
                }
                if !c.is_ascii() || CHAR_TO_PC[c as usize].is_none() {
                    return Err(format!("invalid piece glyph `{}`", c));
                }
                let (piece, color) = CHAR_TO_PC[c as usize].unwrap();
                if file >= 8 {
                    return Err(format!("rank `{}` overflows 8 files", rank_str));
                }
                let sq = Square::from_file_rank(file as u8, rank as u8);
                let bb = self.bb(color, piece) | (1u64 << sq.index());
                self.set_bb(color, piece, bb);
                file += 1;
            }

            if file != 8 {
                return Err(format!("rank `{}` must total 8 files, got {}", rank_str, file));
            }
        }

        Ok(())
    }

    /// Serializes the current position to its canonical FEN string.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();

        for rank in (0..8).rev() {
            let mut empty_run = 0u32;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        out.push(PC_TO_CHAR[idx]);
                    }
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if rank != 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        out.push_str(&format_castling(self.castling_rights));

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push(' ');
        out.push_str(&self.halfmove_clock.to_string());
        out.push(' ');
        out.push_str(&self.fullmove_number.to_string());

        out
    }
}

fn parse_castling(field: &str) -> Result<u8, String> {
    if field == "-" {
        return Ok(0);
    }
    let mut rights = 0u8;
    for c in field.chars() {
        rights |= match c {
            'K' => super::CASTLE_WK,
            'Q' => super::CASTLE_WQ,
            'k' => super::CASTLE_BK,
            'q' => super::CASTLE_BQ,
            other => return Err(format!("invalid castling glyph `{}`", other)),
        };
    }
    Ok(rights)
}

fn format_castling(rights: u8) -> String {
    let mut s = String::new();
    if rights & super::CASTLE_WK != 0 {
        s.push('K');
    }
    if rights & super::CASTLE_WQ != 0 {
        s.push('Q');
    }
    if rights & super::CASTLE_BK != 0 {
        s.push('k');
    }
    if rights & super::CASTLE_BQ != 0 {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_str(STARTPOS).unwrap();
        assert_eq!(board.to_fen(), STARTPOS);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn en_passant_field_round_trips() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";
        let board = Board::from_str(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
        assert_eq!(board.en_passant, Some(Square::from_str("e6").unwrap()));
    }

    #[test]
    fn no_castling_rights_writes_dash() {
        let fen = "8/8/8/8/8/8/8/4K2k w - - 0 1";
        let board = Board::from_str(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(Board::new_empty().set_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    }

    #[test]
    fn rejects_rank_not_totaling_eight_files() {
        let mut board = Board::new_empty();
        assert!(board.set_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn rejects_bad_side_to_move() {
        let mut board = Board::new_empty();
        assert!(board.set_fen("8/8/8/8/8/8/8/4K2k x - - 0 1").is_err());
    }
}
