//! Interactive terminal front end for the chess advisor.
//!
//! Renders the board between moves, reads coordinate input for one side,
//! and on the advised side's turn proposes the engine's move, which the
//! user confirms or overrides with their own.

use advisor_core::{Color, Move, Piece, Square};
use advisor_engine::{Game, Outcome, Searcher};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Terminal chess with a minimax move advisor.
#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Terminal chess with a minimax move advisor")]
struct Args {
    /// Side the advisor plays for: "white" or "black" (asked interactively
    /// if omitted)
    #[arg(long)]
    side: Option<String>,

    /// Search depth in plies
    #[arg(long, default_value_t = Searcher::DEFAULT_DEPTH)]
    depth: u32,

    /// FEN of a position to start from instead of the standard setup
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let player = match &args.side {
        Some(text) => parse_side(text).context("--side must be \"white\" or \"black\"")?,
        None => ask_side(&mut input)?,
    };

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen, player).context("unusable --fen position")?,
        None => Game::new(player),
    }
    .with_depth(args.depth);

    while !game.is_game_over() {
        println!("\n{}", render(&game));

        if game.position().side_to_move == game.player() {
            let result = game.recommend_move();
            tracing::info!(
                nodes = result.nodes,
                total = game.nodes_total(),
                "search finished"
            );
            let suggested = result.best_move.expect("an ongoing game has moves");
            print!("Suggested move: {}. Play it? (y/n): ", suggested);
            io::stdout().flush()?;
            if read_yes_no(&mut input)? {
                play(&mut game, suggested, &mut input)?;
                continue;
            }
        }
        prompt_move(&mut game, &mut input)?;
    }

    println!("\n{}", render(&game));
    match game.outcome() {
        Outcome::Draw => println!("The game is a draw."),
        Outcome::Checkmate => {
            if game.position().side_to_move == game.player() {
                println!("{} is checkmated. The advised side loses.", game.player());
            } else {
                println!(
                    "{} is checkmated. The advised side wins!",
                    game.player().opposite()
                );
            }
        }
        Outcome::Ongoing => unreachable!("the loop only ends on a finished game"),
    }
    Ok(())
}

fn parse_side(text: &str) -> Option<Color> {
    match text.trim().to_ascii_lowercase().as_str() {
        "w" | "white" => Some(Color::White),
        "b" | "black" => Some(Color::Black),
        _ => None,
    }
}

fn ask_side(input: &mut impl BufRead) -> Result<Color> {
    loop {
        print!("Which side should the advisor play? (w/b): ");
        io::stdout().flush()?;
        let line = read_line(input)?;
        if let Some(color) = parse_side(&line) {
            return Ok(color);
        }
        println!("Please answer \"w\" or \"b\".");
    }
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn read_yes_no(input: &mut impl BufRead) -> Result<bool> {
    loop {
        match read_line(input)?.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {
                print!("Please answer \"y\" or \"n\": ");
                io::stdout().flush()?;
            }
        }
    }
}

fn read_square(input: &mut impl BufRead, prompt: &str) -> Result<Square> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;
        let line = read_line(input)?;
        if let Some(square) = Square::from_algebraic(&line.to_ascii_lowercase()) {
            return Ok(square);
        }
        println!("That is not a square; use file and rank, like \"b6\".");
    }
}

fn ask_promotion(input: &mut impl BufRead) -> Result<Piece> {
    loop {
        print!("Promote to (q/r/b/n): ");
        io::stdout().flush()?;
        let piece = match read_line(input)?.to_ascii_lowercase().as_str() {
            "q" | "queen" => Piece::Queen,
            "r" | "rook" => Piece::Rook,
            "b" | "bishop" => Piece::Bishop,
            "n" | "knight" => Piece::Knight,
            _ => {
                println!("Please pick one of q, r, b, n.");
                continue;
            }
        };
        return Ok(piece);
    }
}

/// Applies a move known to be legal, asking for the piece when it promotes.
fn play(game: &mut Game, mv: Move, input: &mut impl BufRead) -> Result<()> {
    if game.is_promotion(mv) {
        let piece = ask_promotion(input)?;
        game.make_move_promoting(mv, piece)?;
    } else {
        game.make_move(mv)?;
    }
    Ok(())
}

/// Reads origin and destination until they form a legal move, then plays it.
fn prompt_move(game: &mut Game, input: &mut impl BufRead) -> Result<()> {
    loop {
        let from = read_square(input, "Square of the piece to move (e.g. b6): ")?;
        let to = read_square(input, "Square to move it to: ")?;
        let mv = Move::new(from, to);
        if !game.legal_moves().contains(&mv) {
            println!("{} is not a legal move here; try again.", mv);
            continue;
        }
        play(game, mv, input)?;
        return Ok(());
    }
}

/// Draws the board from White's point of view, one two-character cell per
/// square.
fn render(game: &Game) -> String {
    let position = game.position();
    let mut out = String::new();
    out.push_str("   a  b  c  d  e  f  g  h\n");
    for rank in (0..8u8).rev() {
        out.push((b'1' + rank) as char);
        for file in 0..8u8 {
            let sq = Square::from_coords(rank, file).expect("coords in range");
            out.push(' ');
            match position.board.get(sq) {
                Some(occ) => {
                    out.push(match occ.color {
                        Color::White => 'W',
                        Color::Black => 'B',
                    });
                    out.push(occ.piece.to_fen_char(Color::White));
                }
                None => out.push_str("--"),
            }
        }
        out.push('\n');
    }
    let to_move = position.side_to_move;
    out.push_str(&format!("{} to move", to_move));
    if position.in_check() {
        out.push_str(" (in check)");
    }
    out
}
