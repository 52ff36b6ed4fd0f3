use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::{
    board::Board,
    color::Color,
    error::IllegalOperation,
    piece::{Piece, PieceKind},
    square::Square,
};

pub(crate) const KING_HOME_COLUMN: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn from_kingside(kingside: bool) -> Self {
        if kingside {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        }
    }
    pub(crate) fn king_step(self) -> i8 {
        match self {
            CastlingSide::Kingside => 2,
            CastlingSide::Queenside => -2,
        }
    }
    pub(crate) fn rook_home_column(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }
    fn rook_destination_column(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }
    fn king_destination_column(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }
    /// Columns strictly between the king and the rook.
    fn between_columns(self) -> &'static [u8] {
        match self {
            CastlingSide::Kingside => &[5, 6],
            CastlingSide::Queenside => &[1, 2, 3],
        }
    }
    /// Columns the king stands on, passes through, and lands on.
    fn king_path(self) -> [u8; 3] {
        match self {
            CastlingSide::Kingside => [4, 5, 6],
            CastlingSide::Queenside => [4, 3, 2],
        }
    }
    /// The side a king move castles toward, if `destination` is two files away.
    pub fn of_king_move(piece: &Piece, destination: Square) -> Option<Self> {
        if piece.kind != PieceKind::King || piece.square.row() != destination.row() {
            return None;
        }
        match i16::from(destination.column()) - i16::from(piece.square.column()) {
            2 => Some(CastlingSide::Kingside),
            -2 => Some(CastlingSide::Queenside),
            _ => None,
        }
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::Kingside => write!(f, "kingside")?,
            CastlingSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}
impl Board {
    fn unmoved_at(&self, square: Square, color: Color, kind: PieceKind) -> bool {
        self.occupant_at(square)
            .is_some_and(|piece| piece.color == color && piece.kind == kind && !piece.moved)
    }
    /// King and rook unmoved on their home squares, nothing between them, and
    /// none of the squares the king occupies, crosses or reaches attacked.
    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        let row = color.home_row();
        self.unmoved_at(Square::new(row, KING_HOME_COLUMN), color, PieceKind::King)
            && self.unmoved_at(
                Square::new(row, side.rook_home_column()),
                color,
                PieceKind::Rook,
            )
            && side
                .between_columns()
                .iter()
                .all(|column| self.occupant_at(Square::new(row, *column)).is_none())
            && side
                .king_path()
                .into_iter()
                .all(|column| !self.is_attacked_by(Square::new(row, column), !color))
    }
    /// Relocates king and rook together; on rejection nothing moves.
    pub fn castle(&mut self, side: CastlingSide, color: Color) -> Result<(), IllegalOperation> {
        if !self.can_castle(color, side) {
            debug!(%color, %side, "castling rejected");
            return Err(IllegalOperation::CastlingNotAllowed { color, side });
        }
        let row = color.home_row();
        let Some(king) = self.index_at(Square::new(row, KING_HOME_COLUMN)) else {
            return Err(IllegalOperation::CastlingNotAllowed { color, side });
        };
        self.relocate(king, Square::new(row, side.king_destination_column()));
        self.mark_moved(king);
        let relocated = self.castle_rooks(side == CastlingSide::Kingside, color.is_white());
        debug_assert!(relocated, "validated castling rook was not relocated");
        debug!(%color, %side, "castled");
        Ok(())
    }
    /// Moves the home-corner rook of the acting side next to the castled king,
    /// provided it is still an unmoved rook. Returns whether it moved.
    pub(crate) fn castle_rooks(&mut self, kingside: bool, white: bool) -> bool {
        let side = CastlingSide::from_kingside(kingside);
        let color = if white { Color::White } else { Color::Black };
        let row = color.home_row();
        let home = Square::new(row, side.rook_home_column());
        if !self.unmoved_at(home, color, PieceKind::Rook) {
            return false;
        }
        let Some(rook) = self.index_at(home) else {
            return false;
        };
        self.relocate(rook, Square::new(row, side.rook_destination_column()));
        self.mark_moved(rook);
        true
    }
}
