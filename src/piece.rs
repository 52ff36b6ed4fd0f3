use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{color::Color, square::Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const BACK_RANK: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        self.lowercase().to_ascii_uppercase()
    }
    pub fn lowercase(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidPieceKind> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidPieceKind(c.to_string())),
        };
        Ok(piece)
    }
    pub fn is_promotion_choice(self) -> bool {
        PieceKind::PROMOTION_CHOICES.contains(&self)
    }
    /// Whether the `moved` flag of this kind affects the rules.
    pub fn tracks_moved(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::King)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
impl FromStr for PieceKind {
    type Err = InvalidPieceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let piece = match s.to_ascii_lowercase().as_str() {
            "pawn" => PieceKind::Pawn,
            "knight" => PieceKind::Knight,
            "bishop" => PieceKind::Bishop,
            "rook" => PieceKind::Rook,
            "queen" => PieceKind::Queen,
            "king" => PieceKind::King,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => PieceKind::from_fen(c)?,
                    _ => return Err(InvalidPieceKind(s.to_owned())),
                }
            }
        };
        Ok(piece)
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidPieceKind(pub String);
impl Display for InvalidPieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected a piece name such as `queen`, or one of `p`, `n`, `b`, `r`, `q`, `k`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidPieceKind {}

/// A placed unit. Identity is the slot it occupies in a [`Board`](crate::board::Board), not its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    /// Only meaningful for rooks and kings. Never reset once set.
    pub moved: bool,
}
impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            moved: false,
        }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.square)?;
        Ok(())
    }
}
