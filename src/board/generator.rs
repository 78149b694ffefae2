//! Board generation.
//!
//! Builds `rows * cols / 2` pairs, each dealt twice (once per display
//! mode), shuffles them uniformly, and maps them onto a grid centered at
//! the origin. Generation has no side effects: spawning cards is the
//! session's job.

use serde::{Deserialize, Serialize};

use super::layout::{cell_position, cells, GridCell, Position};
use crate::cards::{CardCatalog, CardIdentity, DisplayMode, PairKey};
use crate::core::{ConfigError, GameRng, GridSize, Spacing};

/// One dealt card: where it goes and what it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub cell: GridCell,
    pub position: Position,
    pub identity: CardIdentity,
}

/// Shuffled board generator.
///
/// ```
/// use memory_match::board::BoardGenerator;
/// use memory_match::cards::CardCatalog;
/// use memory_match::core::{GameRng, Spacing};
///
/// let generator = BoardGenerator::new(Spacing { x: 3.0, y: 4.0 });
/// let catalog = CardCatalog::numbered(6);
/// let mut rng = GameRng::new(1);
///
/// let layout = generator.generate(3, 4, &catalog, &mut rng).unwrap();
/// assert_eq!(layout.len(), 12);
/// assert!(generator.generate(3, 3, &catalog, &mut rng).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoardGenerator {
    spacing: Spacing,
}

impl BoardGenerator {
    #[must_use]
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }

    #[must_use]
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Deal a `rows x cols` board.
    ///
    /// Fails when the grid is empty or odd, or when the catalog has fewer
    /// entries than the board has pairs. Nothing is produced on failure.
    pub fn generate(
        &self,
        rows: u32,
        cols: u32,
        catalog: &CardCatalog,
        rng: &mut GameRng,
    ) -> Result<Vec<LayoutEntry>, ConfigError> {
        let grid = GridSize::new(rows, cols);
        grid.validate()?;
        let pairs = grid.pair_count() as usize;
        catalog.ensure_pairs(pairs)?;

        let mut deck: Vec<(PairKey, DisplayMode)> = (0..grid.card_count())
            .map(|i| (PairKey::new(i / 2), DisplayMode::BOTH[(i % 2) as usize]))
            .collect();
        rng.shuffle(&mut deck);

        cells(grid)
            .zip(deck)
            .map(|(cell, (key, mode))| -> Result<LayoutEntry, ConfigError> {
                let identity = catalog.identity(key, mode).ok_or(ConfigError::InsufficientCatalog {
                    needed: pairs,
                    available: catalog.len(),
                })?;
                Ok(LayoutEntry {
                    cell,
                    position: cell_position(grid, self.spacing, cell),
                    identity,
                })
            })
            .collect()
    }
}
