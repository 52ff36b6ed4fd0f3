//! Rules engine for two-player chess on an 8x8 board: legal move generation,
//! check detection, castling and pawn promotion. Turn order is left to the host.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod board;
mod castling;
mod color;
mod error;
mod fen;
#[cfg(test)]
mod fuzz;
mod game;
mod legality;
mod movegen;
mod piece;
mod promotion;
mod square;

pub use crate::{
    board::{Board, InvalidBoard, PieceIndex},
    castling::CastlingSide,
    color::{Color, ParseColorError},
    error::IllegalOperation,
    fen::{ParseFenError, Placement},
    game::{Game, MoveOutcome},
    piece::{InvalidPieceKind, Piece, PieceKind},
    square::{Offset, OutOfBounds, ParseSquareError, Square},
};
