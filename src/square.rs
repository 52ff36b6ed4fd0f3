use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Mul,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfBounds {
    pub row: u8,
    pub column: u8,
}
impl Display for OutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) is off the board, row and column must both be < 8",
            self.row, self.column
        )?;
        Ok(())
    }
}
impl Error for OutOfBounds {}

// Bit structure: 00RRRCCC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Callers outside the crate go through [`Square::try_new`] or parsing.
    pub(crate) fn new(row: u8, column: u8) -> Self {
        debug_assert!(row < 8, "{row} should be < 8");
        debug_assert!(column < 8, "{column} should be < 8");
        Square((row << 3) | column)
    }
    pub fn try_new(row: u8, column: u8) -> Result<Self, OutOfBounds> {
        if row >= 8 || column >= 8 {
            Err(OutOfBounds { row, column })
        } else {
            Ok(Square::new(row, column))
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let column = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square::new(row, column))
    }
    pub fn row(self) -> u8 {
        self.0 >> 3
    }
    pub fn column(self) -> u8 {
        self.0 & 0b_111
    }
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..64).map(Square)
    }
    pub fn offset(self, offset: Offset) -> Option<Self> {
        let row = self.row().checked_add_signed(offset.row)?;
        let column = self.column().checked_add_signed(offset.column)?;
        Square::try_new(row, column).ok()
    }
    /// Squares walked from `self` toward `direction`, excluding `self`, up to the board edge.
    pub fn line(self, direction: Offset) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Offset::ZERO);
        (1..).map_while(move |distance| self.offset(direction * distance))
    }
    pub fn is_light(self) -> bool {
        (self.row() + self.column()) % 2 == 0
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.column() + b'a') as char;
        let rank = self.row() + 1;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}
impl TryFrom<(u8, u8)> for Square {
    type Error = OutOfBounds;

    fn try_from((row, column): (u8, u8)) -> Result<Self, Self::Error> {
        Square::try_new(row, column)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: i8,
    pub column: i8,
}
impl Offset {
    pub const ZERO: Self = Offset { row: 0, column: 0 };

    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Offset { row: 1, column: 0 },
        Offset { row: -1, column: 0 },
        Offset { row: 0, column: 1 },
        Offset { row: 0, column: -1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Offset { row: 1, column: 1 },
        Offset { row: 1, column: -1 },
        Offset { row: -1, column: 1 },
        Offset { row: -1, column: -1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = [
        Offset::ROOK_DIRECTIONS[0],
        Offset::ROOK_DIRECTIONS[1],
        Offset::ROOK_DIRECTIONS[2],
        Offset::ROOK_DIRECTIONS[3],
        Offset::BISHOP_DIRECTIONS[0],
        Offset::BISHOP_DIRECTIONS[1],
        Offset::BISHOP_DIRECTIONS[2],
        Offset::BISHOP_DIRECTIONS[3],
    ];
    pub const KNIGHT_MOVES: [Self; 8] = [
        Offset { row: 2, column: 1 },
        Offset { row: 2, column: -1 },
        Offset { row: -2, column: 1 },
        Offset { row: -2, column: -1 },
        Offset { row: 1, column: 2 },
        Offset { row: 1, column: -2 },
        Offset { row: -1, column: 2 },
        Offset { row: -1, column: -2 },
    ];
    pub const KING_MOVES: [Self; 8] = Offset::QUEEN_DIRECTIONS;
}
impl Mul<i8> for Offset {
    type Output = Offset;

    fn mul(self, rhs: i8) -> Self::Output {
        Offset {
            row: self.row * rhs,
            column: self.column * rhs,
        }
    }
}
