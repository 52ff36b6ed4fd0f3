#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    error::Error,
    fmt::Write as _,
    io::{self, BufRead, Write, stdin, stdout},
};

use clap::Parser;
use gambit::{Board, CastlingSide, Color, Game, MoveOutcome, PieceKind, Square};
use rustc_hash::FxHashSet;
use tracing_subscriber::EnvFilter;

use crate::board_display::BoardDisplay;

mod board_display;

/// Play both sides of a chess game in the terminal.
#[derive(Debug, Parser)]
struct Cli {
    /// Side drawn at the bottom of the board.
    #[arg(long, default_value_t = Color::White)]
    view: Color,

    /// FEN piece placement to start from instead of the standard layout.
    #[arg(long)]
    position: Option<String>,

    /// Tracing filter directive, overrides `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
}

const HELP: &str = "\
flip                                 - flip the board
import <placement>                   - import a FEN piece placement
reset                                - reset to starting position
fen                                  - export the piece placement
check                                - show which sides are in check
exit                                 - exit the game
e7                                   - view legal moves
e7e5                                 - play the move
castle <kingside|queenside> <color>  - castle directly";

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
fn read_promotion(input: &mut impl BufRead, square: Square) -> io::Result<Option<PieceKind>> {
    loop {
        let Some(answer) = prompt(input, &format!("promote {square} to (q/r/b/n): "))? else {
            return Ok(None);
        };
        match answer.parse::<PieceKind>() {
            Ok(kind) if kind.is_promotion_choice() => return Ok(Some(kind)),
            Ok(kind) => eprintln!("Error: cannot promote to {kind}"),
            Err(err) => eprintln!("Error: {err}"),
        }
    }
}
fn parse_move(input: &str) -> Option<(Square, Square)> {
    let origin = input.get(0..2)?.parse().ok()?;
    let destination = input.get(2..)?.parse().ok()?;
    Some((origin, destination))
}
fn parse_castle(arguments: &str) -> Result<(CastlingSide, Color), String> {
    let mut words = arguments.split_whitespace();
    let side = match words.next() {
        Some("kingside") => CastlingSide::Kingside,
        Some("queenside") => CastlingSide::Queenside,
        _ => return Err("expected `kingside` or `queenside`".to_owned()),
    };
    let color = words
        .next()
        .ok_or_else(|| "expected a color".to_owned())?
        .parse()
        .map_err(|err| format!("{err}"))?;
    Ok((side, color))
}
fn install_subscriber(filter: Option<&str>) -> Result<(), Box<dyn Error>> {
    let filter = match filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}
#[allow(
    clippy::too_many_lines,
    reason = "the state and procedure are very clearly defined; no need to decompose these into separate functions"
)]
fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    install_subscriber(cli.log.as_deref())?;

    let mut game = match &cli.position {
        Some(placement) => Game::from_board(placement.parse::<Board>()?),
        None => Game::new(),
    };
    let mut view = cli.view;
    let mut highlighted = FxHashSet::default();
    let mut info = String::from("type `help` for instructions\n");
    let mut input = stdin().lock();
    loop {
        print!(
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        );
        info.clear();
        loop {
            let Some(line) = prompt(&mut input, "> ")? else {
                return Ok(());
            };
            let line = line.as_str();
            if line == "help" {
                println!("{HELP}");
                continue;
            } else if line == "exit" {
                return Ok(());
            } else if line == "flip" {
                view = !view;
            } else if line == "reset" {
                game = Game::new();
                highlighted.clear();
            } else if line == "fen" {
                println!("{}", game.board().placement());
                continue;
            } else if line == "check" {
                for color in Color::ALL {
                    if game.is_in_check(color) {
                        writeln!(&mut info, "{color} is in check")?;
                    }
                }
                if info.is_empty() {
                    writeln!(&mut info, "no side is in check")?;
                }
            } else if let Some(placement) = line.strip_prefix("import ") {
                match placement.parse::<Board>() {
                    Ok(board) => game = Game::from_board(board),
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                }
                highlighted.clear();
            } else if let Some(arguments) = line.strip_prefix("castle ") {
                let (side, color) = match parse_castle(arguments) {
                    Ok(castle) => castle,
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                };
                if let Err(err) = game.castle(side == CastlingSide::Kingside, color.is_white()) {
                    eprintln!("Error: {err}");
                    continue;
                }
                highlighted.clear();
                writeln!(&mut info, "{color} castled {side}")?;
            } else if let Ok(square) = line.parse::<Square>() {
                highlighted.clear();
                highlighted.extend(game.legal_moves(square));
                if highlighted.is_empty() {
                    writeln!(&mut info, "no legal moves from {square}")?;
                } else {
                    writeln!(&mut info, "{}", game.legal_move_names(square).join(" "))?;
                }
            } else if let Some((origin, destination)) = parse_move(line) {
                let outcome = match game.commit_move(origin, destination) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                };
                if let MoveOutcome::PromotionRequired { square, .. } = outcome {
                    let Some(kind) = read_promotion(&mut input, square)? else {
                        return Ok(());
                    };
                    game.promote(square, kind)?;
                }
                highlighted.clear();
                highlighted.extend([origin, destination]);
                for color in Color::ALL {
                    if game.is_in_check(color) {
                        writeln!(&mut info, "{color} is in check")?;
                    }
                }
            } else {
                eprintln!("Error: unrecognized command `{line}`, type `help` for instructions");
                continue;
            }
            break;
        }
    }
}
