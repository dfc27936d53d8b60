// src/moves/magic/loader.rs
// Entry point callers use to obtain a ready `MagicTables`. Behind the
// `load_magic` feature this tries to deserialize a precomputed table from
// disk first (to skip magic-number search on startup), falling back to
// generating fresh tables when no cache is present.

use super::precompute::{default_seed, generate_magic_tables};
use super::structs::MagicTables;

#[cfg(feature = "load_magic")]
const MAGIC_TABLES_PATH: &str = "magic_tables.bin";

#[cfg(feature = "load_magic")]
fn load_from_disk() -> Option<MagicTables> {
    let bytes = std::fs::read(MAGIC_TABLES_PATH).ok()?;
    bincode::deserialize(&bytes).ok()
}

/// Builds the rook/bishop magic tables used by the move generator and evaluator.
pub fn load_magic_tables() -> MagicTables {
    #[cfg(feature = "load_magic")]
    {
        if let Some(tables) = load_from_disk() {
            return tables;
        }
    }

    generate_magic_tables(default_seed()).expect("failed to generate magic bitboard tables")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_magic_tables_covers_all_squares() {
        let tables = load_magic_tables();
        assert_eq!(tables.rook.entries.len(), 64);
        assert_eq!(tables.bishop.entries.len(), 64);
    }
}
