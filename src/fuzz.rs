use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board::{Board, PieceIndex},
    castling::{CastlingSide, KING_HOME_COLUMN},
    color::Color,
    game::{Game, MoveOutcome},
    piece::PieceKind,
    square::Square,
};

const MAX_PLIES: usize = 200;

fn from_chess_square(value: chess::Square) -> Square {
    Square::new(
        (7 - value.get_rank().to_index()).try_into().unwrap(),
        value.get_file().to_index().try_into().unwrap(),
    )
}
fn castling_field(board: &Board) -> String {
    let unmoved = |square, color, kind| {
        board
            .occupant_at(square)
            .is_some_and(|piece| piece.color == color && piece.kind == kind && !piece.moved)
    };
    let mut field = String::new();
    for (color, kingside, letter) in [
        (Color::White, true, 'K'),
        (Color::White, false, 'Q'),
        (Color::Black, true, 'k'),
        (Color::Black, false, 'q'),
    ] {
        let row = color.home_row();
        let side = CastlingSide::from_kingside(kingside);
        if unmoved(Square::new(row, KING_HOME_COLUMN), color, PieceKind::King)
            && unmoved(Square::new(row, side.rook_home_column()), color, PieceKind::Rook)
        {
            field.push(letter);
        }
    }
    if field.is_empty() {
        field.push('-');
    }
    field
}
fn fen(board: &Board, current: Color) -> String {
    format!(
        "{} {} {} - 0 1",
        board.placement(),
        current.lowercase(),
        castling_field(board),
    )
}
fn legal_moves(game: &mut Game, color: Color) -> FxHashSet<(Square, Square)> {
    let origins: Vec<_> = game
        .board()
        .pieces_of(color)
        .map(|piece| piece.square)
        .collect();
    origins
        .into_iter()
        .flat_map(|origin| {
            game.legal_moves(origin)
                .into_iter()
                .map(move |destination| (origin, destination))
        })
        .collect()
}
fn moved_rooks(board: &Board) -> FxHashSet<PieceIndex> {
    board
        .pieces_indexed()
        .filter(|(_, piece)| piece.kind == PieceKind::Rook && piece.moved)
        .map(|(index, _)| index)
        .collect()
}
fn fuzz(seed: u64, games: usize) {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..games {
        let mut game = Game::new();
        let mut current = Color::White;
        let mut rooks = FxHashSet::default();
        for _ in 0..MAX_PLIES {
            let snapshot = game.board().clone();
            let moves = legal_moves(&mut game, current);
            assert_eq!(game.board(), &snapshot, "legal move generation changed the board");

            let fen = fen(game.board(), current);
            let reference = chess::Board::from_str(&fen).unwrap();
            let expected: FxHashSet<_> = chess::MoveGen::new_legal(&reference)
                .map(|movement| {
                    (
                        from_chess_square(movement.get_source()),
                        from_chess_square(movement.get_dest()),
                    )
                })
                .collect();
            if let Some((origin, destination)) = moves.difference(&expected).next() {
                panic!("found {origin}{destination} but it's not a legal move\n{fen}");
            }
            if let Some((origin, destination)) = expected.difference(&moves).next() {
                panic!("{origin}{destination} not found\n{fen}");
            }
            if moves.is_empty() {
                break;
            }
            let mut moves: Vec<_> = moves.into_iter().collect();
            moves.sort_unstable();
            let (origin, destination) = moves[rng.random_range(0..moves.len())];
            if let MoveOutcome::PromotionRequired { square, .. } =
                game.commit_move(origin, destination).unwrap()
            {
                game.promote(square, PieceKind::Queen).unwrap();
            }

            let now_moved = moved_rooks(game.board());
            for index in &rooks {
                if game.board().get(*index).is_some() {
                    assert!(now_moved.contains(index), "rook lost its moved flag\n{fen}");
                }
            }
            rooks = now_moved;
            current = !current;
        }
    }
}
#[test]
fn random_games_match_reference_move_generator() {
    fuzz(0x5eed, 8);
}
#[test]
fn random_games_with_other_seed() {
    fuzz(42, 8);
}
