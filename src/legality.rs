use tracing::trace;

use crate::{
    board::{Board, PieceIndex},
    castling::CastlingSide,
    color::Color,
    piece::PieceKind,
    square::Square,
};

impl Board {
    pub fn is_attacked_by(&self, square: Square, color: Color) -> bool {
        self.pieces_of(color)
            .any(|piece| piece.attacks(self).any(|target| target == square))
    }
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked_by(king, !color))
    }
    /// Pseudo-legal destinations of `index` that keep its own king safe, in
    /// generation order. Castling destinations are kept only when
    /// [`Board::can_castle`] allows them.
    pub fn legal_moves(&mut self, index: PieceIndex) -> Vec<Square> {
        let Some(piece) = self.get(index).copied() else {
            return Vec::new();
        };
        let candidates: Vec<_> = piece.pseudo_legal_moves(self).collect();
        candidates
            .into_iter()
            .filter(|destination| {
                // kings are never captured
                let legal = !self.occupant_at(*destination).is_some_and(|occupant| {
                    occupant.kind == PieceKind::King && occupant.color != piece.color
                }) && match CastlingSide::of_king_move(&piece, *destination) {
                    Some(side) => self.can_castle(piece.color, side),
                    None => !self.move_is_self_check(index, *destination),
                };
                if !legal {
                    trace!(%piece, %destination, "discarded pseudo-legal move");
                }
                legal
            })
            .collect()
    }
    pub fn legal_moves_at(&mut self, square: Square) -> Vec<Square> {
        self.index_at(square)
            .map(|index| self.legal_moves(index))
            .unwrap_or_default()
    }
}
