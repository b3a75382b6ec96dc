//! Self-play demo: the engine plays a few moves from a position and prints
//! what it chose.
//!
//! Usage: chess_bot [--fen <FEN>] [--moves <N>] [--depth <D>] [--time <SECS>] [--no-book]

use std::env;
use std::process;
use std::time::{Duration, Instant};

use chess_bot::{Engine, EngineConfig, Game, Rules, DEFAULT_DEPTH};

struct Options {
    fen: Option<String>,
    moves: usize,
    depth: u32,
    time: Duration,
    book: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        fen: None,
        moves: 6,
        depth: DEFAULT_DEPTH,
        time: Duration::from_secs(10),
        book: true,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "--fen" => options.fen = Some(value("--fen")?),
            "--moves" => {
                options.moves = value("--moves")?
                    .parse()
                    .map_err(|e| format!("bad --moves: {e}"))?;
            }
            "--depth" => {
                options.depth = value("--depth")?
                    .parse()
                    .map_err(|e| format!("bad --depth: {e}"))?;
            }
            "--time" => {
                let secs: f64 = value("--time")?
                    .parse()
                    .map_err(|e| format!("bad --time: {e}"))?;
                options.time =
                    Duration::try_from_secs_f64(secs).map_err(|e| format!("bad --time: {e}"))?;
            }
            "--no-book" => options.book = false,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(options)
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!(
                "usage: chess_bot [--fen <FEN>] [--moves <N>] [--depth <D>] [--time <SECS>] [--no-book]"
            );
            process::exit(2);
        }
    };

    let mut game = match options.fen.as_deref() {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        },
        None => Game::new(),
    };

    let config = EngineConfig::time(options.time).with_opening_book(options.book);
    let mut engine = Engine::new(config);

    println!("{}", game.fen());
    println!("eval {:+.2}", engine.evaluate(&game));

    for _ in 0..options.moves {
        let start = Instant::now();
        let Some(mv) = engine.select_move(&mut game, options.depth) else {
            println!("no move (game over or out of time)");
            break;
        };
        let elapsed = start.elapsed();

        let notation = game.move_notation(&mv);
        let stats = engine.stats().clone();
        game.push(&mv);

        println!(
            "{notation:<6} {:>6} ms  nodes {:>8}  depth {}{}  eval {:+.2}",
            elapsed.as_millis(),
            stats.nodes,
            stats.completed_depth,
            if stats.book_move { " (book)" } else { "" },
            engine.evaluate(&game)
        );
        println!("       {}", game.fen());
    }
}
