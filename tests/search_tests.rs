// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use artemis::attacks;
use artemis::eval::MaterialEvaluator;
use artemis::search::{NullReporter, SearchOptions, SearchResult, Searcher};
use artemis::{MoveGenerator, MoveVec, Position};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
];

fn search_with(fen: &str, depth: u32, options: SearchOptions) -> SearchResult {
    attacks::init();
    let pos = Position::from_fen(fen).unwrap();
    let mut searcher: Searcher<MaterialEvaluator> = Searcher::with_options(options);
    searcher.search(&pos, depth, &mut NullReporter)
}

// The ordering and pruning devices may change which equally-scored move is
// preferred and how many nodes get visited, but not the score itself.
#[test]
fn heuristics_preserve_the_score_at_shallow_depths() {
    for &fen in POSITIONS {
        for depth in 1..=2 {
            let full = search_with(fen, depth, Default::default());
            let reference = search_with(fen, depth, SearchOptions::none());
            assert_eq!(
                reference.score, full.score,
                "score diverged at depth {} for {}",
                depth, fen
            );
        }
    }
}

#[test]
fn ordering_heuristics_preserve_the_score_at_depth_three() {
    // reductions and null-move pruning trade exactness for speed; with
    // those two off, the remaining devices only reorder and re-window
    let ordering_only = SearchOptions {
        null_move_pruning: false,
        late_move_reductions: false,
        ..Default::default()
    };
    for &fen in POSITIONS {
        let full = search_with(fen, 3, ordering_only);
        let reference = search_with(fen, 3, SearchOptions::none());
        assert_eq!(reference.score, full.score, "score diverged for {}", fen);
    }
}

#[test]
fn mate_in_one_at_increasing_depths() {
    for depth in 2..=4 {
        let result = search_with("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", depth, Default::default());
        assert_eq!(i32::MAX - 1, result.score, "at depth {}", depth);
        assert_eq!("a1a8", result.best_move.as_uci(), "at depth {}", depth);
    }
}

#[test]
fn stalemate_scores_zero_at_any_depth() {
    for depth in 1..=3 {
        let result = search_with("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", depth, Default::default());
        assert_eq!(0, result.score);
    }
}

#[test]
fn best_move_is_always_legal() {
    for &fen in POSITIONS {
        let result = search_with(fen, 5, Default::default());
        assert!(result.nodes_searched > 0);

        let pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveVec::default();
        MoveGenerator::new().generate_moves(&pos, &mut moves);
        let found = moves
            .into_iter()
            .filter(|&m| pos.clone().make_move(m))
            .any(|m| m == result.best_move);
        assert!(found, "best move {} not legal in {}", result.best_move.as_uci(), fen);
    }
}

#[test]
fn pv_is_a_playable_line() {
    for &fen in POSITIONS {
        let result = search_with(fen, 4, Default::default());
        let mut pos = Position::from_fen(fen).unwrap();
        for &mov in result.pv.moves() {
            assert!(
                pos.make_move(mov),
                "pv move {} unplayable in {}",
                mov.as_uci(),
                fen
            );
        }
    }
}

#[test]
fn deeper_searches_visit_more_nodes() {
    let shallow = search_with(POSITIONS[0], 2, Default::default());
    let deep = search_with(POSITIONS[0], 4, Default::default());
    assert!(deep.nodes_searched > shallow.nodes_searched);
}
