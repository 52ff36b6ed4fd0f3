use std::fmt::{self, Display, Formatter};

use gambit::{Board, Color, Piece, Square};
use rustc_hash::FxHashSet;

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// The board as rows of ANSI-colored cells, labeled the way squares are
/// written. `info` lines are printed to the right of the board.
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a FxHashSet<Square>,
    pub info: &'a str,
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let flip = |i: u8| match self.view {
            Color::White => i,
            Color::Black => 7 - i,
        };
        let mut lines = self.info.lines().fuse();
        for row in (0..8).map(flip) {
            for column in (0..8).map(flip) {
                let square = Square::try_new(row, column).map_err(|_| fmt::Error)?;
                let color = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else if square.is_light() {
                    LIGHT
                } else {
                    DARK
                };
                let figurine = self
                    .board
                    .occupant_at(square)
                    .copied()
                    .map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", row + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
