use super::*;

/// Uniform rejection sampling over the whole grid: draw a random cell, skip it if it already holds
/// a mine, repeat until every kind's quota is filled.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomClassifier {
    seed: u64,
}

impl RandomClassifier {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineClassifier for RandomClassifier {
    fn classify(self, config: &GameConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.dims();
        let total_cells = config.total_cells();
        let mut layout = MineLayout::empty(size);

        // always leave one safe cell so sampling terminates
        let total_mines = if config.total_mines >= total_cells {
            log::warn!(
                "Requested {} mines but the board only fits {}, clamping",
                config.total_mines,
                total_cells.saturating_sub(1)
            );
            total_cells.saturating_sub(1)
        } else {
            config.total_mines
        };

        let quotas = kind_quotas(total_mines);
        let base = total_mines / 3;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let passes = [
            (MineKind::MiniBomb, base),
            (MineKind::Mine, quotas.mine),
            (MineKind::Blast, quotas.blast),
            (MineKind::MiniBomb, quotas.mini_bomb - base),
        ];
        for (kind, mut remaining) in passes {
            while remaining > 0 {
                let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
                if layout.place(coords, kind) {
                    remaining -= 1;
                }
            }
        }

        log::debug!(
            "Classified {} mines with seed {}: {:?}",
            layout.mine_count(),
            self.seed,
            layout.counts()
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines, 1.0, 32).unwrap()
    }

    #[test]
    fn kind_counts_sum_to_total_for_many_seeds() {
        let config = config(8, 14);
        for seed in 0..200 {
            let layout = RandomClassifier::new(seed).classify(&config);

            assert_eq!(layout.mine_count(), 14);
            assert_eq!(layout.counts(), kind_quotas(14));
            assert_eq!(layout.iter_mines().count(), 14);
        }
    }

    #[test]
    fn kinds_agree_with_mine_cells() {
        let layout = RandomClassifier::new(7).classify(&config(12, 26));

        let mut seen = KindCounts::default();
        for (coords, kind) in layout.iter_mines() {
            assert_eq!(layout.kind_at(coords), Some(kind));
            seen[kind] += 1;
        }
        assert_eq!(seen, layout.counts());
    }

    #[test]
    fn same_seed_same_layout() {
        let config = config(16, 38);

        assert_eq!(
            RandomClassifier::new(42).classify(&config),
            RandomClassifier::new(42).classify(&config)
        );
    }

    #[test]
    fn nearly_full_board_terminates() {
        let layout = RandomClassifier::new(3).classify(&config(4, 15));

        assert_eq!(layout.mine_count(), 15);
    }

    #[test]
    fn overfull_request_is_clamped() {
        let config = GameConfig::new_unchecked(3, 20, 1.0, 4);
        let layout = RandomClassifier::new(1).classify(&config);

        assert_eq!(layout.mine_count(), 8);
    }
}
