use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{castling::CastlingSide, color::Color, piece::PieceKind, square::Square};

/// A host request the engine refused. The board is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalOperation {
    NoPieceAt(Square),
    NotALegalMove {
        origin: Square,
        destination: Square,
    },
    NotAPawn(Square),
    InvalidPromotion(PieceKind),
    CastlingNotAllowed {
        color: Color,
        side: CastlingSide,
    },
    PromotionPending(Square),
}
impl Display for IllegalOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalOperation::NoPieceAt(square) => write!(f, "no piece found on {square}")?,
            IllegalOperation::NotALegalMove {
                origin,
                destination,
            } => write!(f, "{origin}{destination} is not a legal move")?,
            IllegalOperation::NotAPawn(square) => {
                write!(f, "only a pawn can be promoted, {square} holds none")?;
            }
            IllegalOperation::InvalidPromotion(kind) => write!(
                f,
                "cannot promote to {kind}, expected queen, rook, bishop, or knight"
            )?,
            IllegalOperation::CastlingNotAllowed { color, side } => {
                write!(f, "{color} cannot castle {side}")?;
            }
            IllegalOperation::PromotionPending(square) => {
                write!(f, "the pawn on {square} must be promoted first")?;
            }
        }
        Ok(())
    }
}
impl Error for IllegalOperation {}
