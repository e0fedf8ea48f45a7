// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A server for the Universal Chess Interface, the line protocol GUIs and
//! match runners use to drive an engine. The server reads whole lines from
//! its reader and writes whole lines to its writer; search progress is
//! streamed as `info` lines followed by a final `bestmove`.
use std::io::{self, BufRead, Write};

use crate::eval::MaterialEvaluator;
use crate::movegen::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::search::{Searcher, UciReporter};

const DEFAULT_DEPTH: u32 = 6;

pub struct UciServer {
    pos: Position,
    searcher: Searcher<MaterialEvaluator>,
}

impl UciServer {
    pub fn new() -> UciServer {
        UciServer {
            pos: Position::from_start_position(),
            searcher: Searcher::new(),
        }
    }

    pub fn run<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            debug!("uci: {}", line);
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"uci", []) => self.handle_uci(&mut writer)?,
                (&"isready", []) => writeln!(&mut writer, "readyok")?,
                (&"ucinewgame", []) => self.pos = Position::from_start_position(),
                (&"position", args) => self.handle_position(&mut writer, args)?,
                (&"go", args) => self.handle_go(&mut writer, args)?,
                (&"quit", []) => break,
                // Unknown lines are ignored; the protocol allows it and
                // GUIs send all sorts of things.
                _ => debug!("unrecognized command: {}", line),
            }
        }

        Ok(())
    }

    fn handle_uci<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        writeln!(
            w,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(w, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(w, "uciok")
    }

    fn handle_position<W: Write>(&mut self, w: &mut W, slice: &[&str]) -> io::Result<()> {
        let (setup, moves) = match slice.iter().position(|&token| token == "moves") {
            Some(idx) => (&slice[..idx], &slice[idx + 1..]),
            None => (slice, &[][..]),
        };

        let fen = match setup.split_first() {
            Some((&"startpos", [])) => {
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_owned()
            }
            Some((&"fen", rest)) => rest.join(" "),
            _ => {
                writeln!(w, "invalid position command")?;
                return Ok(());
            }
        };

        self.pos = if let Ok(pos) = Position::from_fen(&fen) {
            pos
        } else {
            writeln!(w, "invalid fen")?;
            return Ok(());
        };

        for mov in moves {
            if !self.apply_uci_move(mov) {
                debug!("invalid move: {}", mov);
                break;
            }
        }

        debug!("position is now:\n{}", self.pos);
        Ok(())
    }

    /// Applies one move in UCI notation by matching it against the current
    /// position's generated moves, which pins down all the classification
    /// (capture, en passant, castle) the text doesn't carry.
    fn apply_uci_move(&mut self, mov_str: &str) -> bool {
        let mut moves = MoveVec::default();
        MoveGenerator::new().generate_moves(&self.pos, &mut moves);
        for mov in moves {
            if mov.as_uci() == mov_str {
                return self.pos.make_move(mov);
            }
        }

        false
    }

    fn handle_go<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let depth = match args.iter().position(|&token| token == "depth") {
            Some(idx) => args
                .get(idx + 1)
                .and_then(|d| d.parse().ok())
                .unwrap_or(DEFAULT_DEPTH),
            None => DEFAULT_DEPTH,
        };

        let result = {
            let mut reporter = UciReporter::new(&mut *w);
            self.searcher.search(&self.pos, depth, &mut reporter)
        };
        writeln!(w, "bestmove {}", result.best_move.as_uci())?;
        Ok(())
    }
}

impl Default for UciServer {
    fn default() -> UciServer {
        UciServer::new()
    }
}
