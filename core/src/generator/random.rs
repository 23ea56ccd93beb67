use alloc::string::String;
use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Placement attempts made for each seed word before giving up on it.
pub const PLACEMENT_ATTEMPTS: usize = 50;

/// Generation strategy that writes a shuffled sample of seed words along straight lines, fills the rest with random
/// letters, then scatters the endpoints, blocked cells and bonus cells.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds the letters of a fresh grid.
    ///
    /// Placement is best effort: a word that does not fit after [`PLACEMENT_ATTEMPTS`] random origins and
    /// directions is skipped. At most a quarter of the cell count worth of words are attempted.
    pub fn build<R: Rng + ?Sized>(size: Coord2, words: &[&str], rng: &mut R) -> Result<Grid> {
        let mut grid = Grid::new(size)?;

        let mut candidates: Vec<String> = words
            .iter()
            .map(|word| word.trim().to_uppercase())
            .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
            .collect();
        // input order may come from a hash set, sort so the seed alone decides the shuffle
        candidates.sort_unstable();
        candidates.dedup();
        candidates.shuffle(rng);

        let target = candidates.len().min(usize::from(grid.total_cells()) / 4);
        for word in &candidates[..target] {
            let placed = (0..PLACEMENT_ATTEMPTS).any(|_| {
                let origin = (rng.random_range(0..size.0), rng.random_range(0..size.1));
                let direction = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
                grid.try_place_word(word, origin, direction)
            });
            if !placed {
                log::trace!("Skipped seed word {word}, no fit after {PLACEMENT_ATTEMPTS} attempts");
            }
        }

        if target > 0 && grid.placements().is_empty() {
            log::warn!(
                "No seed word fits in a {}x{} grid, letters are purely random",
                size.0,
                size.1
            );
        } else {
            log::debug!(
                "Placed {} of {} seed words",
                grid.placements().len(),
                target
            );
        }

        grid.fill_placeholders(rng);
        Ok(grid)
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &GameConfig, words: &[&str]) -> Result<Grid> {
        if words.iter().all(|word| word.trim().is_empty()) {
            return Err(GameError::EmptyWordSource);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut grid = Self::build(config.size, words, &mut rng)?;
        grid.pick_endpoints(&mut rng)?;
        grid.add_blocked_cells(config.blocked, &mut rng)?;
        grid.add_bonus_cells(config.bonus, &mut rng)?;
        Ok(grid)
    }
}
