use crate::{
    board::Board,
    castling::CastlingSide,
    piece::{Piece, PieceKind},
    square::{Offset, Square},
};

impl Piece {
    fn step_moves<'a>(
        self,
        board: &'a Board,
        offsets: &'static [Offset],
    ) -> impl Iterator<Item = Square> + 'a {
        offsets
            .iter()
            .filter_map(move |offset| self.square.offset(*offset))
            .filter(move |destination| !board.is_occupied_by_color(*destination, self.color))
    }
    fn directional_moves(self, board: &Board, direction: Offset) -> impl Iterator<Item = Square> {
        let mut resume = true;
        self.square.line(direction).map_while(move |destination| {
            if !resume {
                return None;
            }
            if let Some(occupant) = board.occupant_at(destination) {
                resume = false;
                (occupant.color != self.color).then_some(destination)
            } else {
                Some(destination)
            }
        })
    }
    fn all_directional_moves<'a>(
        self,
        board: &'a Board,
        directions: &'static [Offset],
    ) -> impl Iterator<Item = Square> + 'a {
        directions
            .iter()
            .flat_map(move |direction| self.directional_moves(board, *direction))
    }
    fn pawn_attacks(self) -> impl Iterator<Item = Square> {
        [-1, 1].into_iter().filter_map(move |column| {
            self.square.offset(Offset {
                row: self.color.forward(),
                column,
            })
        })
    }
    fn pawn_moves(self, board: &Board) -> impl Iterator<Item = Square> {
        let forward_steps = if self.square.row() == self.color.pawn_start_row() {
            2
        } else {
            1
        };
        let advances = self
            .square
            .line(Offset {
                row: self.color.forward(),
                column: 0,
            })
            .take(forward_steps)
            .take_while(move |destination| board.occupant_at(*destination).is_none());
        let captures = self.pawn_attacks().filter(move |destination| {
            board
                .occupant_at(*destination)
                .is_some_and(|occupant| occupant.color != self.color)
        });
        advances.chain(captures)
    }
    /// Two files toward each rook, offered while the king has not moved.
    /// Only [`Board::can_castle`] decides whether they are playable.
    fn castling_placeholders(self) -> impl Iterator<Item = Square> {
        CastlingSide::ALL
            .into_iter()
            .filter(move |_| !self.moved)
            .filter_map(move |side| {
                self.square.offset(Offset {
                    row: 0,
                    column: side.king_step(),
                })
            })
    }
    /// Destinations allowed by the piece's geometry, ignoring whether the
    /// mover's own king ends up attacked.
    pub fn pseudo_legal_moves(self, board: &Board) -> Box<dyn Iterator<Item = Square> + '_> {
        match self.kind {
            PieceKind::Pawn => Box::new(self.pawn_moves(board)),
            PieceKind::Knight => Box::new(self.step_moves(board, &Offset::KNIGHT_MOVES)),
            PieceKind::Bishop => {
                Box::new(self.all_directional_moves(board, &Offset::BISHOP_DIRECTIONS))
            }
            PieceKind::Rook => Box::new(self.all_directional_moves(board, &Offset::ROOK_DIRECTIONS)),
            PieceKind::Queen => {
                Box::new(self.all_directional_moves(board, &Offset::QUEEN_DIRECTIONS))
            }
            PieceKind::King => Box::new(
                self.step_moves(board, &Offset::KING_MOVES)
                    .chain(self.castling_placeholders()),
            ),
        }
    }
    /// Squares this piece attacks. Never consults legality, so check
    /// detection built on it cannot recurse into the legality filter.
    pub fn attacks(self, board: &Board) -> Box<dyn Iterator<Item = Square> + '_> {
        match self.kind {
            PieceKind::Pawn => Box::new(self.pawn_attacks()),
            PieceKind::King => Box::new(self.step_moves(board, &Offset::KING_MOVES)),
            _ => self.pseudo_legal_moves(board),
        }
    }
}
