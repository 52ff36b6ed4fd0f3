use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    board::{Board, InvalidBoard},
    castling::{CastlingSide, KING_HOME_COLUMN},
    color::Color,
    piece::{Piece, PieceKind},
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    UnexpectedChar(char),
    UnexpectedEol,
    InvalidBoard(InvalidBoard),
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "too many squares on a row")?,
            ParseFenError::UnexpectedChar(c) => write!(f, "unexpected `{c}`")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of placement")?,
            ParseFenError::InvalidBoard(error) => write!(f, "{error}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidBoard(error) => Some(error),
            _ => None,
        }
    }
}
impl From<InvalidBoard> for ParseFenError {
    fn from(value: InvalidBoard) -> Self {
        ParseFenError::InvalidBoard(value)
    }
}
/// Whether a piece found on `square` while parsing can still castle.
fn on_home_square(kind: PieceKind, color: Color, square: Square) -> bool {
    let row = color.home_row();
    match kind {
        PieceKind::King => square == Square::new(row, KING_HOME_COLUMN),
        PieceKind::Rook => CastlingSide::ALL
            .into_iter()
            .any(|side| square == Square::new(row, side.rook_home_column())),
        _ => true,
    }
}
/// Parses the piece placement field of a FEN record. The first rank string
/// is row 0. Anything after the first space is ignored.
impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s.split(' ').next().unwrap_or_default();
        let mut characters = placement.chars();
        let mut pieces = Vec::new();

        let mut column: u8 = 0;
        let mut row: u8 = 0;
        while column < 8 || row < 7 {
            let Some(c) = characters.next() else {
                return Err(ParseFenError::UnexpectedEol);
            };
            if c == '/' {
                if column == 8 {
                    column = 0;
                    row += 1;
                } else {
                    return Err(ParseFenError::NotEnoughSquaresOnRow);
                }
            } else if matches!(c, '1'..='8') {
                column += c as u8 - b'0';
                if column > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            } else {
                let kind = PieceKind::from_fen(c).map_err(|_| ParseFenError::UnexpectedChar(c))?;
                if column >= 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square = Square::new(row, column);
                pieces.push(Piece {
                    kind,
                    color,
                    square,
                    moved: !on_home_square(kind, color, square),
                });
                column += 1;
            }
        }
        if let Some(c) = characters.next() {
            return Err(if c == '/' || c.is_ascii_alphanumeric() {
                ParseFenError::ExceedingSquaresOnRow
            } else {
                ParseFenError::UnexpectedChar(c)
            });
        }
        Ok(Board::from_pieces(pieces)?)
    }
}
/// Piece placement field of a [`Board`], created by [`Board::placement`].
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a>(&'a Board);

impl Display for Placement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for column in 0..8 {
                if let Some(piece) = self.0.occupant_at(Square::new(row, column)) {
                    if empty > 0 {
                        write!(f, "{empty}")?;
                        empty = 0;
                    }
                    write!(f, "{}", piece.fen())?;
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        Ok(())
    }
}
impl Board {
    pub fn placement(&self) -> Placement<'_> {
        Placement(self)
    }
}
