// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed attack tables for every piece.
//!
//! Leaper attacks (pawn, knight, king) are a straightforward table of 64
//! bitboards built by shifting the piece's square and masking away file
//! wraparounds. Slider attacks (bishop, rook) use magic bitboards: for each
//! square, the occupancy of the squares that can block the slider is hashed
//! by a per-square multiplier into a dense table of precomputed attack sets.
//! The multipliers are found by random search when the tables are first
//! built; a fixed seed keeps the tables identical from run to run.
//!
//! All tables are built once, behind `lazy_static`. Call [`init`] at startup
//! to pay the construction cost eagerly rather than on the first lookup.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::bitboard::Bitboard;
use crate::bitboard::{BB_NOT_FILE_A, BB_NOT_FILE_AB, BB_NOT_FILE_GH, BB_NOT_FILE_H};
use crate::types::{Color, Square, TableIndex, COLORS, SQUARES};

/// Popcount of the relevant-occupancy mask for each square, bishop sliders.
const BISHOP_RELEVANT_BITS: [u32; 64] = [
    6, 5, 5, 5, 5, 5, 5, 6, //
    5, 5, 5, 5, 5, 5, 5, 5, //
    5, 5, 7, 7, 7, 7, 5, 5, //
    5, 5, 7, 9, 9, 7, 5, 5, //
    5, 5, 7, 9, 9, 7, 5, 5, //
    5, 5, 7, 7, 7, 7, 5, 5, //
    5, 5, 5, 5, 5, 5, 5, 5, //
    6, 5, 5, 5, 5, 5, 5, 6,
];

/// Popcount of the relevant-occupancy mask for each square, rook sliders.
const ROOK_RELEVANT_BITS: [u32; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    11, 10, 10, 10, 10, 10, 10, 11, //
    12, 11, 11, 11, 11, 11, 11, 12,
];

const BISHOP_MAGIC_SEED: u64 = 0x5ee1_04b5;
const ROOK_MAGIC_SEED: u64 = 0xd6e5_a22e;

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                let board = Bitboard::from_square(sq);
                // Diagonal captures only; pushes are the move generator's
                // business. Shifting right moves toward rank eight.
                let attacks = match color {
                    Color::White => ((board >> 7) & BB_NOT_FILE_A) | ((board >> 9) & BB_NOT_FILE_H),
                    Color::Black => ((board << 7) & BB_NOT_FILE_H) | ((board << 9) & BB_NOT_FILE_A),
                };

                pt.table[sq.as_index()][color.as_index()] = attacks;
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

struct KnightTable {
    table: [Bitboard; 64],
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let mut kt = KnightTable {
            table: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let board = Bitboard::from_square(sq);
            let mut attacks = Bitboard::none();
            attacks |= (board >> 17) & BB_NOT_FILE_H;
            attacks |= (board >> 15) & BB_NOT_FILE_A;
            attacks |= (board >> 10) & BB_NOT_FILE_GH;
            attacks |= (board >> 6) & BB_NOT_FILE_AB;
            attacks |= (board << 17) & BB_NOT_FILE_A;
            attacks |= (board << 15) & BB_NOT_FILE_H;
            attacks |= (board << 10) & BB_NOT_FILE_AB;
            attacks |= (board << 6) & BB_NOT_FILE_GH;
            kt.table[sq.as_index()] = attacks;
        }

        kt
    }

    pub fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct KingTable {
    table: [Bitboard; 64],
}

impl KingTable {
    pub fn new() -> KingTable {
        let mut kt = KingTable {
            table: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let board = Bitboard::from_square(sq);
            let mut attacks = Bitboard::none();
            attacks |= board >> 8;
            attacks |= (board >> 9) & BB_NOT_FILE_H;
            attacks |= (board >> 7) & BB_NOT_FILE_A;
            attacks |= (board >> 1) & BB_NOT_FILE_H;
            attacks |= board << 8;
            attacks |= (board << 9) & BB_NOT_FILE_A;
            attacks |= (board << 7) & BB_NOT_FILE_H;
            attacks |= (board << 1) & BB_NOT_FILE_A;
            kt.table[sq.as_index()] = attacks;
        }

        kt
    }

    pub fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

fn square_at(row: i32, file: i32) -> Square {
    Square::from_index((row * 8 + file) as usize)
}

/// The relevant-occupancy mask for a bishop: every square on the bishop's
/// diagonals excluding the board edge. A blocker on the edge never changes
/// the attack set, so edge squares don't participate in the hash.
pub fn bishop_relevance_mask(sq: Square) -> Bitboard {
    let mut mask = Bitboard::none();
    let row = (sq.as_index() / 8) as i32;
    let file = (sq.as_index() % 8) as i32;

    let (mut r, mut f) = (row + 1, file + 1);
    while r <= 6 && f <= 6 {
        mask.set(square_at(r, f));
        r += 1;
        f += 1;
    }
    let (mut r, mut f) = (row - 1, file + 1);
    while r >= 1 && f <= 6 {
        mask.set(square_at(r, f));
        r -= 1;
        f += 1;
    }
    let (mut r, mut f) = (row + 1, file - 1);
    while r <= 6 && f >= 1 {
        mask.set(square_at(r, f));
        r += 1;
        f -= 1;
    }
    let (mut r, mut f) = (row - 1, file - 1);
    while r >= 1 && f >= 1 {
        mask.set(square_at(r, f));
        r -= 1;
        f -= 1;
    }

    mask
}

/// The relevant-occupancy mask for a rook: every square on the rook's rank
/// and file excluding the final square of each ray.
pub fn rook_relevance_mask(sq: Square) -> Bitboard {
    let mut mask = Bitboard::none();
    let row = (sq.as_index() / 8) as i32;
    let file = (sq.as_index() % 8) as i32;

    for r in (row + 1)..=6 {
        mask.set(square_at(r, file));
    }
    for r in 1..row {
        mask.set(square_at(r, file));
    }
    for f in (file + 1)..=6 {
        mask.set(square_at(row, f));
    }
    for f in 1..file {
        mask.set(square_at(row, f));
    }

    mask
}

/// Walks the bishop's four rays, stopping at (and including) the first
/// blocker. This is the oracle the magic tables are built from and checked
/// against; lookups should go through [`bishop_attacks`] instead.
pub fn bishop_attacks_on_the_fly(sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::none();
    let row = (sq.as_index() / 8) as i32;
    let file = (sq.as_index() % 8) as i32;

    for &(dr, df) in &[(1, 1), (-1, 1), (1, -1), (-1, -1)] {
        let (mut r, mut f) = (row + dr, file + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = square_at(r, f);
            attacks.set(target);
            if occupancy.test(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }

    attacks
}

/// Walks the rook's four rays, stopping at (and including) the first
/// blocker.
pub fn rook_attacks_on_the_fly(sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::none();
    let row = (sq.as_index() / 8) as i32;
    let file = (sq.as_index() % 8) as i32;

    for &(dr, df) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let (mut r, mut f) = (row + dr, file + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = square_at(r, f);
            attacks.set(target);
            if occupancy.test(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }

    attacks
}

/// Produces the `index`th subset of the given relevant-occupancy mask. The
/// mask's set squares are enumerated from the least significant bit; bit `i`
/// of `index` decides whether the `i`th square is occupied.
pub fn occupancy_for_index(index: u32, mask: Bitboard) -> Bitboard {
    let mut occupancy = Bitboard::none();
    for (i, sq) in mask.iter().enumerate() {
        if index & (1u32 << i) != 0 {
            occupancy.set(sq);
        }
    }

    occupancy
}

struct MagicTable {
    masks: [Bitboard; 64],
    magics: [u64; 64],
    shifts: [u32; 64],
    attacks: Vec<Vec<Bitboard>>,
}

impl MagicTable {
    pub fn new(
        relevant_bits: &[u32; 64],
        mask_fn: fn(Square) -> Bitboard,
        attacks_fn: fn(Square, Bitboard) -> Bitboard,
        seed: u64,
    ) -> MagicTable {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mt = MagicTable {
            masks: [Bitboard::none(); 64],
            magics: [0; 64],
            shifts: [0; 64],
            attacks: Vec::with_capacity(64),
        };

        for &sq in SQUARES.iter() {
            let mask = mask_fn(sq);
            let bits = relevant_bits[sq.as_index()];
            debug_assert_eq!(bits, mask.count());

            let occupancies: Vec<Bitboard> = (0..1u32 << bits)
                .map(|index| occupancy_for_index(index, mask))
                .collect();
            let references: Vec<Bitboard> = occupancies
                .iter()
                .map(|&occupancy| attacks_fn(sq, occupancy))
                .collect();

            let (magic, table) = find_magic(mask, &occupancies, &references, bits, &mut rng);
            mt.masks[sq.as_index()] = mask;
            mt.magics[sq.as_index()] = magic;
            mt.shifts[sq.as_index()] = 64 - bits;
            mt.attacks.push(table);
        }

        mt
    }

    pub fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let idx = sq.as_index();
        let masked = occupancy.and(self.masks[idx]).bits();
        let hash = (masked.wrapping_mul(self.magics[idx]) >> self.shifts[idx]) as usize;
        self.attacks[idx][hash]
    }
}

/// Searches for a multiplier that perfectly hashes every occupancy subset of
/// `mask` into a `1 << bits` table. Sparse candidates (the AND of three
/// random words) succeed after a few hundred trials per square at most.
fn find_magic(
    mask: Bitboard,
    occupancies: &[Bitboard],
    references: &[Bitboard],
    bits: u32,
    rng: &mut StdRng,
) -> (u64, Vec<Bitboard>) {
    let size = 1usize << bits;

    loop {
        let magic = rng.next_u64() & rng.next_u64() & rng.next_u64();
        // A usable magic must spread the mask bits into the index's high
        // bits; candidates that don't can be rejected without a fill pass.
        if (mask.bits().wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        let mut table = vec![Bitboard::none(); size];
        let mut used = vec![false; size];
        let mut collision = false;

        for (occupancy, &reference) in occupancies.iter().zip(references) {
            let hash = (occupancy.bits().wrapping_mul(magic) >> (64 - bits)) as usize;
            if !used[hash] {
                used[hash] = true;
                table[hash] = reference;
            } else if table[hash] != reference {
                collision = true;
                break;
            }
        }

        if !collision {
            return (magic, table);
        }
    }
}

lazy_static! {
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref KING_TABLE: KingTable = KingTable::new();
    static ref BISHOP_TABLE: MagicTable = MagicTable::new(
        &BISHOP_RELEVANT_BITS,
        bishop_relevance_mask,
        bishop_attacks_on_the_fly,
        BISHOP_MAGIC_SEED,
    );
    static ref ROOK_TABLE: MagicTable = MagicTable::new(
        &ROOK_RELEVANT_BITS,
        rook_relevance_mask,
        rook_attacks_on_the_fly,
        ROOK_MAGIC_SEED,
    );
}

/// Forces construction of every attack table. The tables build themselves
/// lazily on first use; callers that care about a predictable startup cost
/// (the UCI driver, perft) call this once before searching.
pub fn init() {
    lazy_static::initialize(&PAWN_TABLE);
    lazy_static::initialize(&KNIGHT_TABLE);
    lazy_static::initialize(&KING_TABLE);
    lazy_static::initialize(&BISHOP_TABLE);
    lazy_static::initialize(&ROOK_TABLE);
}

pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_TABLE.attacks(sq, occupancy)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_TABLE.attacks(sq, occupancy)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}
