//! Bag-of-seven piece generator.

use crate::brick::BrickKind;
use crate::figure::Figure;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Deals every kind once per shuffled bag before any kind repeats.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    columns: usize,
    pending: Vec<BrickKind>,
    rng: StdRng,
}

impl PieceGenerator {
    /// Generator for a field `columns` wide, seeded from the OS.
    pub fn new(columns: usize) -> Self {
        Self::with_rng(columns, StdRng::from_entropy())
    }

    /// Reproducible generator.
    pub fn seeded(columns: usize, seed: u64) -> Self {
        Self::with_rng(columns, StdRng::seed_from_u64(seed))
    }

    fn with_rng(columns: usize, rng: StdRng) -> Self {
        Self {
            columns,
            pending: Vec::with_capacity(BrickKind::ALL.len()),
            rng,
        }
    }

    /// Kinds left in the current bag, in dealing order.
    pub fn pending(&self) -> impl Iterator<Item = BrickKind> + '_ {
        self.pending.iter().rev().copied()
    }

    pub fn next_kind(&mut self) -> BrickKind {
        loop {
            if let Some(kind) = self.pending.pop() {
                return kind;
            }
            self.refill();
        }
    }

    /// Next figure, placed at the spawn position.
    pub fn next(&mut self) -> Figure {
        Figure::spawn(self.next_kind(), self.columns)
    }

    fn refill(&mut self) {
        let mut bag = BrickKind::ALL.to_vec();
        bag.shuffle(&mut self.rng);
        self.pending = bag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_bag_contains_all_kinds() {
        let mut generator = PieceGenerator::seeded(10, 7);
        let kinds: HashSet<BrickKind> = (0..7).map(|_| generator.next_kind()).collect();
        assert_eq!(kinds.len(), 7);
    }

    #[test]
    fn test_pending_shrinks_then_refills() {
        let mut generator = PieceGenerator::seeded(10, 1);
        generator.next_kind();
        assert_eq!(generator.pending().count(), 6);
        let upcoming: Vec<BrickKind> = generator.pending().collect();
        let dealt: Vec<BrickKind> = (0..6).map(|_| generator.next_kind()).collect();
        assert_eq!(upcoming, dealt);
        assert_eq!(generator.pending().count(), 0);
        generator.next_kind();
        assert_eq!(generator.pending().count(), 6);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceGenerator::seeded(10, 42);
        let mut b = PieceGenerator::seeded(10, 42);
        for _ in 0..21 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_next_figure_spawns_at_top_centre() {
        let mut generator = PieceGenerator::seeded(10, 3);
        let figure = generator.next();
        assert_eq!(figure.position(), (3, 0));
        assert!(!figure.is_frozen());
    }

    proptest! {
        #[test]
        fn every_bag_deals_each_kind_once(seed in any::<u64>(), bags in 1usize..6) {
            let mut generator = PieceGenerator::seeded(10, seed);
            let mut totals = [0usize; 7];
            for _ in 0..bags {
                let mut seen = HashSet::new();
                for _ in 0..7 {
                    let kind = generator.next_kind();
                    prop_assert!(seen.insert(kind), "{} dealt twice in one bag", kind.name());
                    totals[kind.ordinal()] += 1;
                }
            }
            prop_assert!(totals.iter().all(|&n| n == bags));
        }
    }
}
