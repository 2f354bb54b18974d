use std::env;
use std::io;
use std::process::ExitCode;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use chess_ai::board::Color;
use chess_ai::engine::{EngineConfig, GameSession, LineSink, LineSource};

fn init_logging() {
    let level = match env::var("CHESS_AI_LOG").as_deref() {
        Ok("debug") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    // stdout carries the moves, so logs go to stderr.
    let _ = WriteLogger::init(level, Config::default(), io::stderr());
}

fn parse_color(arg: Option<&str>) -> Option<Color> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        None | Some("white") => Some(Color::White),
        Some("black") => Some(Color::Black),
        Some(_) => None,
    }
}

fn main() -> ExitCode {
    init_logging();

    let arg = env::args().nth(1);
    let Some(color) = parse_color(arg.as_deref()) else {
        eprintln!("usage: chess_ai [white|black]");
        return ExitCode::FAILURE;
    };

    let mut config = EngineConfig::default();
    if let Ok(threads) = env::var("CHESS_AI_THREADS") {
        match threads.parse::<usize>() {
            Ok(n) => config = config.with_threads(n),
            Err(e) => log::warn!("ignoring CHESS_AI_THREADS='{threads}': {e}"),
        }
    }
    log::info!("playing {color} with {} threads", config.threads);

    let mut session = GameSession::new(color, config);
    let mut source = LineSource::new(io::stdin().lock());
    let mut sink = LineSink::new(io::stdout().lock());

    match session.run(&mut source, &mut sink) {
        Ok(()) => {
            log::info!("Game over!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
