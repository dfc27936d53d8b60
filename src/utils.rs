// src/utils.rs
use crate::bitboard::BitboardExt;

/// `rank`/`file` in 0..=7 to a 0..=63 square index.
#[inline(always)]
pub fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}

/// "Take lowest set bit from a running value" (§4.1): returns the index of
/// the least significant set bit of `*bb` and clears it. Returns 0 if `*bb`
/// is already zero (callers only invoke this inside a `while *bb != 0` loop).
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> u8 {
    if *bb == 0 {
        return 0;
    }
    let idx = bb.lsb();
    *bb &= *bb - 1;
    idx
}
