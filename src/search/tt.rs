use crate::moves::types::Move;

// Make sure MATE_THRESHOLD matches what we define in search.rs (30000)
pub const MATE_THRESHOLD: i32 = 30000;

/// Number of successive slots probed on index collision (§4.7).
const N_TRIES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeType {
    Exact = 0,
    LowerBound = 1, // Beta cutoff (failed high)
    UpperBound = 2, // Alpha cutoff (failed low)
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    /// Total occupancy at the time this entry was written; a cheap
    /// secondary confirmation key so an index collision with a different
    /// position can't masquerade as a hit (§4.7).
    pub occupancy: u64,
    pub best_move: Option<Move>,
    pub score: i16,
    pub depth: u8,
    pub bound: u8, // 0=Exact, 1=Lower, 2=Upper
    pub generation: u8,
}

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        key: 0,
        occupancy: 0,
        best_move: None,
        score: 0,
        depth: 0,
        bound: 0,
        generation: 0,
    };
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    pub generation: u8,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        // Allocate TT based on size in MB.
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Round down to power of 2
        let mut capacity = 1;
        while capacity * 2 <= num_entries {
            capacity *= 2;
        }

        Self {
            entries: vec![TTEntry::EMPTY; capacity],
            generation: 0,
        }
    }

    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = TTEntry::EMPTY;
        }
        self.generation = 0;
    }

    #[inline(always)]
    fn probe_sequence(&self, key: u64) -> impl Iterator<Item = usize> + '_ {
        let base = (key as usize) & (self.entries.len() - 1);
        let len = self.entries.len();
        (0..N_TRIES).map(move |i| (base + i) & (len - 1))
    }

    /// Writes (hash, bound-type, depth, score, best-move, occupancy) into the
    /// first acceptable slot in the probe sequence, per the §4.7 update
    /// contract. Entries of the current generation are only overwritten by
    /// an equal-or-deeper search; older-generation and matching-position
    /// slots are always replaced.
    pub fn save(
        &mut self,
        key: u64,
        occupancy: u64,
        mv: Option<Move>,
        score: i32,
        depth: u8,
        bound: u8,
        _ply: i32,
    ) {
        let score_i16 = score.clamp(-32000, 32000) as i16;
        let generation = self.generation;

        let mut target: Option<usize> = None;
        for index in self.probe_sequence(key) {
            let entry = &self.entries[index];
            if entry.key == 0
                || entry.generation != generation
                || (entry.key == key && entry.occupancy == occupancy)
            {
                if entry.generation == generation && entry.key == key && depth < entry.depth {
                    continue;
                }
                target = Some(index);
                break;
            }
        }

        let Some(index) = target else {
            return; // collision: no acceptable slot within N_TRIES
        };

        let entry = &mut self.entries[index];
        let best_move = if mv.is_some() { mv } else { entry.best_move };

        entry.key = key;
        entry.occupancy = occupancy;
        entry.best_move = best_move;
        entry.score = score_i16;
        entry.depth = depth;
        entry.bound = bound;
        entry.generation = generation;
    }

    /// Walks the probe sequence and returns the first slot whose (hash, age,
    /// occupancy) match the query, per the §4.7 probe contract.
    pub fn probe(
        &self,
        key: u64,
        occupancy: u64,
        _depth: u8,
        _alpha: i32,
        _beta: i32,
        _ply: i32,
    ) -> Option<(Option<Move>, i32, u8, u8)> {
        for index in self.probe_sequence(key) {
            let entry = &self.entries[index];
            if entry.key == key
                && entry.occupancy == occupancy
                && entry.generation == self.generation
            {
                return Some((entry.best_move, entry.score as i32, entry.depth, entry.bound));
            }
        }
        None
    }
}
