use tracing::debug;

use crate::{
    board::{Board, InvalidBoard},
    castling::CastlingSide,
    color::Color,
    error::IllegalOperation,
    piece::{Piece, PieceKind},
    square::Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Moved { captured: Option<Piece> },
    Castled(CastlingSide),
    /// The pawn reached its last row; call [`Game::promote`] before the next move.
    PromotionRequired {
        square: Square,
        captured: Option<Piece>,
    },
}

/// What a host UI talks to: a board plus the promotion it is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    pending_promotion: Option<Square>,
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::starting_position())
    }
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            pending_promotion: None,
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }
    pub fn initialize(&mut self, pieces: impl IntoIterator<Item = Piece>) -> Result<(), InvalidBoard> {
        self.board.initialize(pieces)?;
        self.pending_promotion = None;
        Ok(())
    }
    pub fn legal_moves(&mut self, square: Square) -> Vec<Square> {
        self.board.legal_moves_at(square)
    }
    pub fn legal_move_names(&mut self, square: Square) -> Vec<String> {
        self.legal_moves(square)
            .into_iter()
            .map(|destination| destination.to_string())
            .collect()
    }
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }
    pub fn commit_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<MoveOutcome, IllegalOperation> {
        if let Some(square) = self.pending_promotion {
            debug!(%origin, %destination, pending = %square, "move rejected");
            return Err(IllegalOperation::PromotionPending(square));
        }
        let Some(index) = self.board.index_at(origin) else {
            debug!(%origin, "no piece to move");
            return Err(IllegalOperation::NoPieceAt(origin));
        };
        let Some(piece) = self.board.get(index).copied() else {
            return Err(IllegalOperation::NoPieceAt(origin));
        };
        if !self.board.legal_moves(index).contains(&destination) {
            debug!(%origin, %destination, "move rejected");
            return Err(IllegalOperation::NotALegalMove {
                origin,
                destination,
            });
        }
        if let Some(side) = CastlingSide::of_king_move(&piece, destination) {
            self.board.castle(side, piece.color)?;
            return Ok(MoveOutcome::Castled(side));
        }
        let captured = self
            .board
            .index_at(destination)
            .and_then(|captured| self.board.remove(captured));
        self.board.relocate(index, destination);
        if piece.kind.tracks_moved() {
            self.board.mark_moved(index);
        }
        debug!(%piece, %destination, captured = ?captured.map(|piece| piece.kind), "committed move");
        if self.board.requires_promotion(destination) {
            self.pending_promotion = Some(destination);
            Ok(MoveOutcome::PromotionRequired {
                square: destination,
                captured,
            })
        } else {
            Ok(MoveOutcome::Moved { captured })
        }
    }
    /// While a promotion is pending, only that square may be promoted.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), IllegalOperation> {
        if let Some(pending) = self.pending_promotion.filter(|pending| *pending != square) {
            debug!(%square, %pending, "promotion rejected");
            return Err(IllegalOperation::PromotionPending(pending));
        }
        self.board.promote(square, kind)?;
        self.pending_promotion = None;
        Ok(())
    }
    pub fn castle(&mut self, kingside: bool, white: bool) -> Result<(), IllegalOperation> {
        if let Some(square) = self.pending_promotion {
            return Err(IllegalOperation::PromotionPending(square));
        }
        let color = if white { Color::White } else { Color::Black };
        self.board.castle(CastlingSide::from_kingside(kingside), color)
    }
}
