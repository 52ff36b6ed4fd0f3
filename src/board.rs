use std::{
    cell::OnceCell,
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use crate::{
    color::Color,
    piece::{Piece, PieceKind},
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    SquareOccupied(Square),
    MissingKing(Color),
    ExtraKing(Color),
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::SquareOccupied(square) => {
                write!(f, "more than one piece placed on {square}")?;
            }
            InvalidBoard::MissingKing(color) => write!(f, "no {color} king found")?,
            InvalidBoard::ExtraKing(color) => write!(f, "found more than 1 {color} king")?,
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}

/// Slot of a piece inside its board. Slots are never reused, so a promoted
/// piece and the pawn it replaced have different indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceIndex(usize);

#[derive(Debug, Clone, Default)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
    indices: OnceCell<[Option<PieceIndex>; 64]>,
}
impl Board {
    pub fn empty() -> Self {
        Board::default()
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for piece in Board::standard_pieces() {
            board.push(piece);
        }
        board
    }
    /// The 32 pieces of the standard opening layout.
    pub fn standard_pieces() -> impl Iterator<Item = Piece> {
        Color::ALL.into_iter().flat_map(|color| {
            let back_rank = (0..)
                .zip(PieceKind::BACK_RANK)
                .map(move |(column, kind)| {
                    Piece::new(kind, color, Square::new(color.home_row(), column))
                });
            let pawns = (0..8).map(move |column| {
                Piece::new(
                    PieceKind::Pawn,
                    color,
                    Square::new(color.pawn_start_row(), column),
                )
            });
            back_rank.chain(pawns)
        })
    }
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, InvalidBoard> {
        let mut board = Board::empty();
        for piece in pieces {
            board.add(piece)?;
        }
        board.validate()?;
        Ok(board)
    }
    /// Replaces the whole contents. Leaves `self` untouched on error.
    pub fn initialize(&mut self, pieces: impl IntoIterator<Item = Piece>) -> Result<(), InvalidBoard> {
        *self = Board::from_pieces(pieces)?;
        Ok(())
    }
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        for color in Color::ALL {
            let mut kings = self
                .pieces_of(color)
                .filter(|piece| piece.kind == PieceKind::King);
            if kings.next().is_none() {
                return Err(InvalidBoard::MissingKing(color));
            }
            if kings.next().is_some() {
                return Err(InvalidBoard::ExtraKing(color));
            }
        }
        Ok(())
    }
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }
    pub fn pieces_indexed(&self) -> impl Iterator<Item = (PieceIndex, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, piece)| piece.as_ref().map(|piece| (PieceIndex(i), piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }
    pub fn get(&self, index: PieceIndex) -> Option<&Piece> {
        self.pieces.get(index.0)?.as_ref()
    }
    fn indices(&self) -> &[Option<PieceIndex>; 64] {
        self.indices.get_or_init(|| {
            let mut indices = [None; 64];
            for (index, piece) in self.pieces_indexed() {
                debug_assert!(
                    indices[piece.square.index()].is_none(),
                    "two pieces share {}",
                    piece.square
                );
                indices[piece.square.index()] = Some(index);
            }
            indices
        })
    }
    fn invalidate(&mut self) {
        self.indices = OnceCell::new();
    }
    pub fn index_at(&self, square: Square) -> Option<PieceIndex> {
        self.indices()[square.index()]
    }
    pub fn occupant_at(&self, square: Square) -> Option<&Piece> {
        self.index_at(square).and_then(|index| self.get(index))
    }
    pub fn is_occupied_by_color(&self, square: Square, color: Color) -> bool {
        self.occupant_at(square)
            .is_some_and(|piece| piece.color == color)
    }
    pub(crate) fn push(&mut self, piece: Piece) -> PieceIndex {
        let index = PieceIndex(self.pieces.len());
        self.pieces.push(Some(piece));
        self.invalidate();
        index
    }
    pub fn add(&mut self, piece: Piece) -> Result<PieceIndex, InvalidBoard> {
        if self.occupant_at(piece.square).is_some() {
            return Err(InvalidBoard::SquareOccupied(piece.square));
        }
        Ok(self.push(piece))
    }
    /// Removing a piece that is no longer on the board is a no-op.
    pub fn remove(&mut self, index: PieceIndex) -> Option<Piece> {
        let piece = self.pieces.get_mut(index.0)?.take();
        if piece.is_some() {
            self.invalidate();
        }
        piece
    }
    pub(crate) fn relocate(&mut self, index: PieceIndex, destination: Square) {
        if let Some(Some(piece)) = self.pieces.get_mut(index.0) {
            piece.square = destination;
            self.invalidate();
        }
    }
    pub(crate) fn mark_moved(&mut self, index: PieceIndex) {
        if let Some(Some(piece)) = self.pieces.get_mut(index.0) {
            piece.moved = true;
        }
    }
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|piece| piece.kind == PieceKind::King);
        let king = kings.next()?;
        debug_assert!(kings.next().is_none(), "found more than 1 {color} king");
        Some(king.square)
    }
    /// Temporarily plays `index` to `destination`, capturing whatever stands
    /// there. The board is restored when the returned guard is dropped.
    fn simulate(&mut self, index: PieceIndex, destination: Square) -> Simulation<'_> {
        let origin = self.get(index).map(|piece| piece.square);
        let captured = self
            .index_at(destination)
            .filter(|captured| *captured != index)
            .and_then(|captured| Some((captured, self.remove(captured)?)));
        if origin.is_some() {
            self.relocate(index, destination);
        }
        Simulation {
            board: self,
            index,
            origin,
            captured,
        }
    }
    /// Whether moving `index` to `destination` leaves its own king attacked.
    /// The board compares equal to its previous state afterwards.
    pub fn move_is_self_check(&mut self, index: PieceIndex, destination: Square) -> bool {
        let Some(color) = self.get(index).map(|piece| piece.color) else {
            return false;
        };
        let simulation = self.simulate(index, destination);
        simulation.is_in_check(color)
    }
}
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
    }
}
impl Eq for Board {}

struct Simulation<'a> {
    board: &'a mut Board,
    index: PieceIndex,
    origin: Option<Square>,
    captured: Option<(PieceIndex, Piece)>,
}
impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}
impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        if let Some(origin) = self.origin {
            self.board.relocate(self.index, origin);
        }
        if let Some((index, piece)) = self.captured.take() {
            let slot = &mut self.board.pieces[index.0];
            debug_assert!(slot.is_none(), "restoring {piece} into a filled slot");
            *slot = Some(piece);
            self.board.invalidate();
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::{Board, InvalidBoard},
        color::Color,
        piece::{Piece, PieceKind},
        square::Square,
    };

    fn kings() -> [Piece; 2] {
        [
            Piece::new(PieceKind::King, Color::White, Square::new(7, 4)),
            Piece::new(PieceKind::King, Color::Black, Square::new(0, 4)),
        ]
    }
    #[test]
    fn standard_layout() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_square(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(Square::new(0, 4)));
        let queen = board.occupant_at(Square::new(0, 3)).unwrap();
        assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::Black));
        for column in 0..8 {
            let pawn = board.occupant_at(Square::new(6, column)).unwrap();
            assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
            assert!(board.occupant_at(Square::new(4, column)).is_none());
        }
        assert!(board.validate().is_ok());
    }
    #[test]
    fn occupancy_queries() {
        let board = Board::starting_position();
        assert!(board.is_occupied_by_color(Square::new(6, 0), Color::White));
        assert!(!board.is_occupied_by_color(Square::new(6, 0), Color::Black));
        assert!(!board.is_occupied_by_color(Square::new(4, 0), Color::White));
    }
    #[test]
    fn add_rejects_occupied_square() {
        let mut board = Board::from_pieces(kings()).unwrap();
        let intruder = Piece::new(PieceKind::Queen, Color::Black, Square::new(7, 4));
        assert_eq!(
            board.add(intruder),
            Err(InvalidBoard::SquareOccupied(Square::new(7, 4)))
        );
        assert_eq!(board.pieces().count(), 2);
    }
    #[test]
    fn remove_is_idempotent() {
        let mut board = Board::starting_position();
        let index = board.index_at(Square::new(6, 3)).unwrap();
        assert!(board.remove(index).is_some());
        assert!(board.remove(index).is_none());
        assert_eq!(board.pieces().count(), 31);
        assert!(board.occupant_at(Square::new(6, 3)).is_none());
    }
    #[test]
    fn initialize_validates_kings() {
        let mut board = Board::starting_position();
        let lone_king = [Piece::new(PieceKind::King, Color::White, Square::new(7, 4))];
        assert_eq!(
            board.initialize(lone_king),
            Err(InvalidBoard::MissingKing(Color::Black))
        );
        assert_eq!(board, Board::starting_position());
        let extra = kings()
            .into_iter()
            .chain([Piece::new(PieceKind::King, Color::Black, Square::new(3, 3))]);
        assert_eq!(
            Board::from_pieces(extra),
            Err(InvalidBoard::ExtraKing(Color::Black))
        );
    }
    #[test]
    fn missing_king_square_is_none() {
        let board = Board::empty();
        assert_eq!(board.king_square(Color::White), None);
        assert!(!board.is_in_check(Color::White));
    }
    #[test]
    fn self_check_simulation_restores_board() {
        let pieces = kings().into_iter().chain([
            Piece::new(PieceKind::Rook, Color::White, Square::new(6, 4)),
            Piece::new(PieceKind::Queen, Color::Black, Square::new(2, 4)),
            Piece::new(PieceKind::Knight, Color::Black, Square::new(6, 0)),
        ]);
        let mut board = Board::from_pieces(pieces).unwrap();
        let snapshot = board.clone();
        let rook = board.index_at(Square::new(6, 4)).unwrap();

        // leaving the file exposes the king to the queen
        assert!(board.move_is_self_check(rook, Square::new(6, 0)));
        assert_eq!(board, snapshot);
        assert_eq!(
            board.occupant_at(Square::new(6, 0)).map(|piece| piece.kind),
            Some(PieceKind::Knight)
        );

        // capturing the queen is safe
        assert!(!board.move_is_self_check(rook, Square::new(2, 4)));
        assert_eq!(board, snapshot);
        assert_eq!(
            board.occupant_at(Square::new(2, 4)).map(|piece| piece.kind),
            Some(PieceKind::Queen)
        );
        assert_eq!(board.index_at(Square::new(6, 4)), Some(rook));
    }
}
