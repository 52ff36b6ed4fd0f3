use tracing::debug;

use crate::{
    board::{Board, PieceIndex},
    error::IllegalOperation,
    piece::{Piece, PieceKind},
    square::Square,
};

impl Board {
    /// Whether the piece on `square` is a pawn standing on its promotion row.
    pub fn requires_promotion(&self, square: Square) -> bool {
        self.occupant_at(square).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && square.row() == piece.color.promotion_row()
        })
    }
    /// Replaces the pawn on `square` with a new piece of `kind`. The new piece
    /// gets its own slot; the pawn is gone.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<PieceIndex, IllegalOperation> {
        if !kind.is_promotion_choice() {
            return Err(IllegalOperation::InvalidPromotion(kind));
        }
        let Some(index) = self.index_at(square) else {
            return Err(IllegalOperation::NoPieceAt(square));
        };
        let Some(pawn) = self.get(index).copied() else {
            return Err(IllegalOperation::NoPieceAt(square));
        };
        if pawn.kind != PieceKind::Pawn {
            return Err(IllegalOperation::NotAPawn(square));
        }
        self.remove(index);
        let promoted = self.push(Piece {
            kind,
            color: pawn.color,
            square,
            moved: true,
        });
        debug!(%square, %kind, color = %pawn.color, "promoted pawn");
        Ok(promoted)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        error::IllegalOperation,
        piece::{Piece, PieceKind},
        square::Square,
    };

    fn promotion_board() -> Board {
        Board::from_pieces([
            Piece::new(PieceKind::King, Color::White, Square::new(7, 4)),
            Piece::new(PieceKind::King, Color::Black, Square::new(3, 7)),
            Piece::new(PieceKind::Pawn, Color::White, Square::new(0, 3)),
            Piece::new(PieceKind::Knight, Color::White, Square::new(0, 6)),
        ])
        .unwrap()
    }
    #[test]
    fn pawn_becomes_new_piece() {
        let mut board = promotion_board();
        assert!(board.requires_promotion(Square::new(0, 3)));
        let pawn = board.index_at(Square::new(0, 3)).unwrap();
        let queen = board.promote(Square::new(0, 3), PieceKind::Queen).unwrap();
        assert_ne!(pawn, queen);
        assert!(board.get(pawn).is_none());
        let piece = board.occupant_at(Square::new(0, 3)).unwrap();
        assert_eq!((piece.kind, piece.color), (PieceKind::Queen, Color::White));
        assert!(!board.pieces().any(|piece| piece.kind == PieceKind::Pawn));
        assert!(!board.requires_promotion(Square::new(0, 3)));
    }
    #[test]
    fn rejected_promotions_leave_board_unchanged() {
        let mut board = promotion_board();
        let snapshot = board.clone();
        assert_eq!(
            board.promote(Square::new(0, 3), PieceKind::King),
            Err(IllegalOperation::InvalidPromotion(PieceKind::King))
        );
        assert_eq!(
            board.promote(Square::new(0, 3), PieceKind::Pawn),
            Err(IllegalOperation::InvalidPromotion(PieceKind::Pawn))
        );
        assert_eq!(
            board.promote(Square::new(0, 6), PieceKind::Queen),
            Err(IllegalOperation::NotAPawn(Square::new(0, 6)))
        );
        assert_eq!(
            board.promote(Square::new(4, 4), PieceKind::Rook),
            Err(IllegalOperation::NoPieceAt(Square::new(4, 4)))
        );
        assert_eq!(board, snapshot);
    }
    #[test]
    fn pawn_short_of_last_row_does_not_require_promotion() {
        let board = Board::starting_position();
        assert!(!board.requires_promotion(Square::new(6, 0)));
        assert!(!board.requires_promotion(Square::new(1, 0)));
    }
}
