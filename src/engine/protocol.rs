//! The boundary between the engine and whoever it plays against.
//!
//! A [`MoveSource`] reports each turn: the opponent's last move if there was
//! one, our remaining clock, and whether the game has ended. A [`MoveSink`]
//! receives our reply in wire form (`Pe2e4`, `Nf3e5Q`).
//!
//! [`LineSource`] and [`LineSink`] speak a line protocol over any reader and
//! writer. One input line per turn:
//!
//! ```text
//! go [seconds]            we move with no opponent move to apply
//! <move> [seconds]        opponent played <move>, e.g. e2e4 or Pe7e8Q
//! gameover                the game has ended
//! ```

use std::io::{BufRead, Write};

use log::warn;

use crate::board::MoveDescriptor;

use super::SessionError;

/// Clock assumed until the source reports one.
pub const DEFAULT_SECONDS_LEFT: f32 = 900.0;

/// One turn as reported by the move source
#[derive(Clone, Debug, PartialEq)]
pub struct TurnInfo {
    pub last_move: Option<MoveDescriptor>,
    pub seconds_left: f32,
    pub game_over: bool,
}

impl TurnInfo {
    #[must_use]
    pub fn over(seconds_left: f32) -> Self {
        TurnInfo {
            last_move: None,
            seconds_left,
            game_over: true,
        }
    }
}

/// Supplies the opponent's moves, blocking until the next turn is ready.
pub trait MoveSource {
    fn next_turn(&mut self) -> Result<TurnInfo, SessionError>;
}

/// Receives the engine's moves.
pub trait MoveSink {
    fn send(&mut self, wire: &str) -> Result<(), SessionError>;
}

impl<S: MoveSource + ?Sized> MoveSource for &mut S {
    fn next_turn(&mut self) -> Result<TurnInfo, SessionError> {
        (**self).next_turn()
    }
}

impl<S: MoveSink + ?Sized> MoveSink for &mut S {
    fn send(&mut self, wire: &str) -> Result<(), SessionError> {
        (**self).send(wire)
    }
}

/// Line-oriented move source.
pub struct LineSource<R> {
    reader: R,
    seconds_left: f32,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            seconds_left: DEFAULT_SECONDS_LEFT,
        }
    }

    /// Parse one line; `None` for lines that carry no turn.
    fn parse_line(&mut self, line: &str) -> Option<TurnInfo> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?;

        if let Some(secs) = parts.next() {
            match secs.parse::<f32>() {
                Ok(secs) => self.seconds_left = secs,
                Err(e) => warn!("ignoring clock '{secs}': {e}"),
            }
        }

        match head {
            "gameover" | "quit" => Some(TurnInfo::over(self.seconds_left)),
            "go" => Some(TurnInfo {
                last_move: None,
                seconds_left: self.seconds_left,
                game_over: false,
            }),
            mv => match mv.parse::<MoveDescriptor>() {
                Ok(desc) => Some(TurnInfo {
                    last_move: Some(desc),
                    seconds_left: self.seconds_left,
                    game_over: false,
                }),
                Err(e) => {
                    warn!("skipping malformed line '{line}': {e}");
                    None
                }
            },
        }
    }
}

impl<R: BufRead> MoveSource for LineSource<R> {
    fn next_turn(&mut self) -> Result<TurnInfo, SessionError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(TurnInfo::over(self.seconds_left));
            }
            if let Some(turn) = self.parse_line(line.trim()) {
                return Ok(turn);
            }
        }
    }
}

/// Line-oriented move sink, one move per line.
pub struct LineSink<W> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        LineSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MoveSink for LineSink<W> {
    fn send(&mut self, wire: &str) -> Result<(), SessionError> {
        writeln!(self.writer, "{wire}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use std::io::Cursor;

    #[test]
    fn reads_turns_and_skips_noise() {
        let input = "\ngo 600\nbogus\ne7e5\nPg8f6 120.5\ngameover\n";
        let mut source = LineSource::new(Cursor::new(input));

        let first = source.next_turn().expect("turn");
        assert_eq!(first.last_move, None);
        assert_eq!(first.seconds_left, 600.0);
        assert!(!first.game_over);

        let second = source.next_turn().expect("turn");
        let mv = second.last_move.expect("move");
        assert_eq!((mv.from, mv.to), (Square(6, 4), Square(4, 4)));
        assert_eq!(second.seconds_left, 600.0);

        let third = source.next_turn().expect("turn");
        assert_eq!(third.seconds_left, 120.5);

        assert!(source.next_turn().expect("turn").game_over);
    }

    #[test]
    fn end_of_input_ends_the_game() {
        let mut source = LineSource::new(Cursor::new(""));
        let turn = source.next_turn().expect("turn");
        assert!(turn.game_over);
        assert_eq!(turn.seconds_left, DEFAULT_SECONDS_LEFT);
    }

    #[test]
    fn sink_writes_one_line_per_move() {
        let mut sink = LineSink::new(Vec::new());
        sink.send("Pe2e4").expect("send");
        sink.send("Nf3e5Q").expect("send");
        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        assert_eq!(out, "Pe2e4\nNf3e5Q\n");
    }
}
