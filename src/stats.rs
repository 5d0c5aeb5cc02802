use alloc::vec;
use alloc::vec::Vec;

use crate::ChainedHashMap;

/// Chain distribution statistics for a [`ChainedHashMap`].
///
/// Only available with the `stats` feature (and in tests).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStats {
    /// Number of entries in the map
    pub populated: usize,
    /// Number of slots in the slot array
    pub slot_count: usize,
    /// Number of slots holding a chain
    pub allocated_slots: usize,
    /// Number of allocated chains with no entries
    pub empty_chains: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Load factor (populated / slot_count)
    pub load_factor: f64,
    /// Slot utilization (allocated_slots / slot_count)
    pub slot_utilization: f64,
}

impl ChainStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chained Hash Map Statistics ===");
        println!(
            "Population: {} over {} slots ({:.2} load factor)",
            self.populated, self.slot_count, self.load_factor
        );
        println!(
            "Chains: {}/{} allocated ({:.2}% utilization), {} empty",
            self.allocated_slots,
            self.slot_count,
            self.slot_utilization * 100.0,
            self.empty_chains
        );
        println!("Longest chain: {} entries", self.longest_chain);
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Returns statistics about how entries are spread across chains.
    pub fn stats(&self) -> ChainStats {
        let chains = self.chains();
        let allocated_slots = chains.iter().flatten().count();
        let empty_chains = chains.iter().flatten().filter(|c| c.is_empty()).count();
        let longest_chain = chains.iter().flatten().map(|c| c.len()).max().unwrap_or(0);

        ChainStats {
            populated: self.len(),
            slot_count: self.slot_count(),
            allocated_slots,
            empty_chains,
            longest_chain,
            load_factor: self.load_factor(),
            slot_utilization: allocated_slots as f64 / self.slot_count() as f64,
        }
    }

    /// Counts slots by chain length.
    ///
    /// Index `n` of the result holds the number of slots whose chain has
    /// exactly `n` entries. Slots without a chain are counted at index 0.
    pub fn chain_length_histogram(&self) -> Vec<usize> {
        let chains = self.chains();
        let longest = chains.iter().flatten().map(|c| c.len()).max().unwrap_or(0);

        let mut hist = vec![0usize; longest + 1];
        for slot in chains {
            hist[slot.as_ref().map_or(0, |c| c.len())] += 1;
        }
        hist
    }

    /// Pretty-prints the chain length histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print_chain_length_histogram(&self) {
        let hist = self.chain_length_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain length histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("chain length histogram ({} slots):", self.slot_count());
        for (len, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", len, "█".repeat(width), count);
        }
    }
}
