//! Pseudo-legal move generation over the mailbox board.
//!
//! Generated moves obey piece movement rules but may leave the mover's own
//! king in check; the search settles legality after playing the move
//! (`Board::last_move_legal`). Generation order is fixed: board scan from a1
//! to h8, direction tables in declaration order, promotions queen first.

use crate::core::board::{
    Board, Cell, Color, Piece, PieceType, Square, BISHOP_DIRS, KING_DIRS, KNIGHT_JUMPS, ROOK_DIRS,
};
use crate::core::moves::{Move, MoveList};

/// Promotion pieces in emission order.
const PROMOTIONS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Generate pseudo-legal moves for the side to move.
pub fn generate_moves(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    let us = board.side_to_move;

    for rank in 0..8 {
        for file in 0..8 {
            let sq = Square::from_file_rank(file, rank);
            let piece = match board.piece_at(sq) {
                Some(piece) if piece.color == us => piece,
                _ => continue,
            };
            match piece.piece_type {
                PieceType::Pawn => pawn_moves(board, sq, piece, &mut list),
                PieceType::Knight => leaper_moves(board, sq, piece, &KNIGHT_JUMPS, &mut list),
                PieceType::Bishop => slider_moves(board, sq, piece, &BISHOP_DIRS, &mut list),
                PieceType::Rook => slider_moves(board, sq, piece, &ROOK_DIRS, &mut list),
                PieceType::Queen => slider_moves(board, sq, piece, &KING_DIRS, &mut list),
                PieceType::King => {
                    leaper_moves(board, sq, piece, &KING_DIRS, &mut list);
                    castle_moves(board, sq, piece, &mut list);
                }
            }
        }
    }

    list
}

/// Generate fully legal moves by playing each candidate and testing.
pub fn generate_legal_moves(board: &mut Board) -> MoveList {
    let candidates = generate_moves(board);
    let mut legal = MoveList::new();
    for i in 0..candidates.len() {
        let mv = candidates.get(i);
        board.make_move(mv);
        if board.last_move_legal() {
            legal.push(mv);
        }
        board.undo_move();
    }
    legal
}

fn pawn_moves(board: &Board, sq: Square, piece: Piece, list: &mut MoveList) {
    let us = piece.color;
    let dir = us.pawn_direction();
    let promo_rank = us.promotion_rank();

    // Diagonal targets: captures, promotions, en passant
    for d in [dir - 1, dir + 1] {
        let to = sq.offset(d);
        match board.cell(to) {
            Cell::Occupied(target) if target.color != us => {
                if to.rank() == promo_rank {
                    for promotion in PROMOTIONS {
                        list.push(Move::new_promotion(piece, sq, to, promotion, Some(target)));
                    }
                } else {
                    list.push(Move::new_capture(piece, sq, to, target));
                }
            }
            Cell::Empty if board.en_passant == Some(to) => {
                let victim = to.offset(-dir);
                list.push(Move::new_en_passant(piece, sq, to, victim));
            }
            _ => {}
        }
    }

    // Straight ahead: push, promotion push, double push
    let ahead = sq.offset(dir);
    if board.cell(ahead) == Cell::Empty {
        if ahead.rank() == promo_rank {
            for promotion in PROMOTIONS {
                list.push(Move::new_promotion(piece, sq, ahead, promotion, None));
            }
        } else {
            list.push(Move::new(piece, sq, ahead));
            if sq.rank() == us.pawn_start_rank() {
                let two = ahead.offset(dir);
                if board.cell(two) == Cell::Empty {
                    list.push(Move::new(piece, sq, two));
                }
            }
        }
    }
}

fn leaper_moves(board: &Board, sq: Square, piece: Piece, dirs: &[i8], list: &mut MoveList) {
    for &d in dirs {
        let to = sq.offset(d);
        match board.cell(to) {
            Cell::Empty => list.push(Move::new(piece, sq, to)),
            Cell::Occupied(target) if target.color != piece.color => {
                list.push(Move::new_capture(piece, sq, to, target));
            }
            _ => {}
        }
    }
}

fn slider_moves(board: &Board, sq: Square, piece: Piece, dirs: &[i8], list: &mut MoveList) {
    for &d in dirs {
        let mut to = sq.offset(d);
        loop {
            match board.cell(to) {
                Cell::Empty => {
                    list.push(Move::new(piece, sq, to));
                    to = to.offset(d);
                }
                Cell::Occupied(target) if target.color != piece.color => {
                    list.push(Move::new_capture(piece, sq, to, target));
                    break;
                }
                _ => break,
            }
        }
    }
}

/// Castles are emitted whenever the right is held, the path is clear, and
/// the rook is home; attacks on the king's path are tested after make.
fn castle_moves(board: &Board, sq: Square, piece: Piece, list: &mut MoveList) {
    let us = piece.color;
    let home = match us {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    };
    if sq != home {
        return;
    }

    let rook = Piece::new(PieceType::Rook, us);
    if board.castling.can_castle_kingside(us)
        && board.cell(sq.offset(1)) == Cell::Empty
        && board.cell(sq.offset(2)) == Cell::Empty
        && board.piece_at(sq.offset(3)) == Some(rook)
    {
        list.push(Move::new(piece, sq, sq.offset(2)));
    }
    if board.castling.can_castle_queenside(us)
        && board.cell(sq.offset(-1)) == Cell::Empty
        && board.cell(sq.offset(-2)) == Cell::Empty
        && board.cell(sq.offset(-3)) == Cell::Empty
        && board.piece_at(sq.offset(-4)) == Some(rook)
    {
        list.push(Move::new(piece, sq, sq.offset(-2)));
    }
}
