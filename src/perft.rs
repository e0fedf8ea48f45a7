// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::Position;

/// Counts the leaf nodes of the move tree rooted at `pos` at the given
/// depth. Pseudo-legal moves that `make_move` rejects contribute nothing,
/// so the count is over strictly legal play; root moves are counted in
/// parallel.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveVec::default();
    let movegen = MoveGenerator::new();
    movegen.generate_moves(pos, &mut moves);
    moves
        .par_iter()
        .map(|&mov| {
            let mut new_pos = pos.clone();
            if new_pos.make_move(mov) {
                perft(&new_pos, depth - 1)
            } else {
                0
            }
        })
        .sum()
}

/// Like [`perft`], but reports the subtree count under each legal root
/// move. Diffing this against another engine's breakdown narrows a bad
/// total down to one root move.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut moves = MoveVec::default();
    let movegen = MoveGenerator::new();
    movegen.generate_moves(pos, &mut moves);

    let mut results = Vec::new();
    for mov in moves {
        let mut new_pos = pos.clone();
        if !new_pos.make_move(mov) {
            continue;
        }
        results.push((mov, perft(&new_pos, depth - 1)));
    }

    results
}
