//! Static evaluation.
//!
//! Scores a position from the side-to-move's point of view. Each side gets
//! an (opening, endgame) pair; the final score interpolates the two along a
//! game-phase axis driven by how much minor/major material is still on the
//! board.

use crate::core::board::{Board, Cell, Color, Piece, PieceType, Square, NORTH, SOUTH};

pub const PAWN_VALUE: i32 = 90;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Phase weight per piece type. Pawns deliberately carry no weight.
const PHASE_WEIGHT: [i32; 6] = [0, 1, 1, 2, 4, 0];
/// Total phase with all minor and major pieces on the board.
pub const PHASE_TOTAL: i32 = 24;

// Piece-square tables from White's point of view, rank 1 in the first row.
// Black indexes them through a vertical mirror.

#[rustfmt::skip]
const PAWN_ADVANCE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     2,  2,  4,  6,  6,  4,  2,  2,
     4,  6, 10, 14, 14, 10,  6,  4,
     8, 12, 18, 24, 24, 18, 12,  8,
    16, 22, 28, 34, 34, 28, 22, 16,
    30, 36, 42, 48, 48, 42, 36, 30,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const CENTRALIZATION: [i32; 64] = [
    -16, -12,  -8,  -8,  -8,  -8, -12, -16,
    -12,  -4,   0,   2,   2,   0,  -4, -12,
     -8,   0,   6,   8,   8,   6,   0,  -8,
     -8,   2,   8,  12,  12,   8,   2,  -8,
     -8,   2,   8,  12,  12,   8,   2,  -8,
     -8,   0,   6,   8,   8,   6,   0,  -8,
    -12,  -4,   0,   2,   2,   0,  -4, -12,
    -16, -12,  -8,  -8,  -8,  -8, -12, -16,
];

#[rustfmt::skip]
const KING_SHELTER: [i32; 64] = [
     12,  16,   8,   0,   0,   8,  16,  12,
      8,   8,   0,  -4,  -4,   0,   8,   8,
     -8, -12, -12, -16, -16, -12, -12,  -8,
    -16, -20, -24, -28, -28, -24, -20, -16,
    -24, -28, -32, -36, -36, -32, -28, -24,
    -28, -32, -36, -40, -40, -36, -32, -28,
    -32, -36, -40, -44, -44, -40, -36, -32,
    -36, -40, -44, -48, -48, -44, -40, -36,
];

/// Table index for a square as seen by `color` (Black mirrors ranks).
#[inline]
fn relative_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.to8x8(),
        Color::Black => sq.to8x8() ^ 56,
    }
}

/// Evaluate the position for the side to move, in centipawns.
pub fn evaluate(board: &Board) -> i32 {
    let mut opening = [0i32; 2];
    let mut endgame = [0i32; 2];
    let mut phase = PHASE_TOTAL;

    for rank in 0..8 {
        for file in 0..8 {
            let sq = Square::from_file_rank(file, rank);
            let piece = match board.piece_at(sq) {
                Some(piece) => piece,
                None => continue,
            };
            phase -= PHASE_WEIGHT[piece.piece_type.index()];
            let side = piece.color.index();
            let psq = relative_index(sq, piece.color);

            match piece.piece_type {
                PieceType::Pawn => {
                    let base = PAWN_VALUE + PAWN_ADVANCE[psq];
                    opening[side] += base + pawn_center_bonus(sq, piece.color);
                    endgame[side] += base;
                }
                PieceType::Knight => {
                    let base = KNIGHT_VALUE + CENTRALIZATION[psq];
                    opening[side] += base;
                    endgame[side] += base;
                }
                PieceType::Bishop => {
                    let base = BISHOP_VALUE + CENTRALIZATION[psq];
                    opening[side] += base;
                    endgame[side] += base;
                }
                PieceType::Rook => {
                    opening[side] += ROOK_VALUE + rook_file_bonus(board, sq, piece.color);
                    endgame[side] += ROOK_VALUE + rook_seventh_bonus(board, sq, piece.color);
                }
                PieceType::Queen => {
                    opening[side] += QUEEN_VALUE;
                    endgame[side] += QUEEN_VALUE + CENTRALIZATION[psq] / 2;
                }
                PieceType::King => {
                    opening[side] += KING_SHELTER[psq] + king_shield_bonus(board, sq, piece.color);
                }
            }
        }
    }

    if phase < 0 {
        phase = 0;
    }

    let opening_delta = opening[Color::White.index()] - opening[Color::Black.index()];
    let endgame_delta = endgame[Color::White.index()] - endgame[Color::Black.index()];
    let score =
        (opening_delta * (PHASE_TOTAL - phase) + endgame_delta * phase) / PHASE_TOTAL;

    match board.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Opening bonus for pawns holding or approaching the center.
fn pawn_center_bonus(sq: Square, color: Color) -> i32 {
    match color {
        Color::White => match sq {
            Square::D4 | Square::E4 => 20,
            Square::D3 | Square::E3 => 10,
            _ => 0,
        },
        Color::Black => match sq {
            Square::D5 | Square::E5 => 20,
            Square::D6 | Square::E6 => 10,
            _ => 0,
        },
    }
}

/// Opening bonus for a back-rank rook on an open or half-open file.
fn rook_file_bonus(board: &Board, sq: Square, color: Color) -> i32 {
    if sq.rank() != color.back_rank() {
        return 0;
    }
    let dir = match color {
        Color::White => NORTH,
        Color::Black => SOUTH,
    };
    let mut own_pawns = 0;
    let mut enemy_pawns = 0;
    let mut to = sq.offset(dir);
    while let Cell::Empty | Cell::Occupied(_) = board.cell(to) {
        if let Some(piece) = board.piece_at(to) {
            if piece.piece_type == PieceType::Pawn {
                if piece.color == color {
                    own_pawns += 1;
                } else {
                    enemy_pawns += 1;
                }
            }
        }
        to = to.offset(dir);
    }
    if own_pawns == 0 && enemy_pawns == 0 {
        10
    } else if own_pawns == 0 {
        5
    } else {
        0
    }
}

/// Endgame bonus for a rook on the seventh rank, per enemy pawn it rakes.
fn rook_seventh_bonus(board: &Board, sq: Square, color: Color) -> i32 {
    if sq.rank() != color.seventh_rank() {
        return 0;
    }
    let mut bonus = 0;
    for file in 0..8 {
        let other = Square::from_file_rank(file, sq.rank());
        if board.piece_at(other) == Some(Piece::new(PieceType::Pawn, color.opposite())) {
            bonus += 3;
        }
    }
    bonus
}

/// Opening bonus for pawns sheltering the king. The probe walks linear
/// offsets from the king square, not compass directions; see DESIGN.md on
/// the offset indexing.
fn king_shield_bonus(board: &Board, sq: Square, color: Color) -> i32 {
    let own_pawn = Piece::new(PieceType::Pawn, color);
    let mut bonus = 0;
    for i in 0..3i8 {
        let probe = match color {
            Color::White => sq.offset(i),
            Color::Black => sq.offset(-i),
        };
        if board.piece_at(probe) == Some(own_pawn) {
            bonus += 6;
        }
    }
    bonus
}
