use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Added to a word whose path is as short as the shortest route between its first and last cells.
pub const SHORTEST_PATH_BONUS: u32 = 50;

/// Added for every bonus cell on an accepted word's path.
pub const BONUS_CELL_POINTS: u32 = 25;

/// Added to the final score once every seeded word has been found.
pub const COMPLETION_BONUS: u32 = 50;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game session: the grid, the move budget, the score and the paths traced so far.
#[derive(Clone, Debug)]
pub struct PlayEngine<D> {
    config: GameConfig,
    grid: Grid,
    dictionary: D,
    score: u32,
    found_words: Vec<String>,
    current_path: Vec<Coord2>,
    path_history: Vec<Vec<Coord2>>,
    moves_left: u32,
    state: EngineState,
}

impl<D: WordOracle> PlayEngine<D> {
    pub fn new_game(difficulty: Difficulty, size: Coord2, dictionary: D, seed: u64) -> Result<Self> {
        Self::new(GameConfig::new(difficulty, size)?, dictionary, seed)
    }

    /// Generates a grid from the dictionary's seed words and starts playing on it.
    pub fn new(config: GameConfig, dictionary: D, seed: u64) -> Result<Self> {
        let grid = {
            let words: Vec<&str> = dictionary.seed_words().collect();
            RandomGridGenerator::new(seed).generate(&config, &words)?
        };
        Self::with_grid(config, grid, dictionary)
    }

    pub fn with_grid(config: GameConfig, grid: Grid, dictionary: D) -> Result<Self> {
        if grid.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }

        let mut engine = Self {
            config,
            grid,
            dictionary,
            score: 0,
            found_words: Vec::new(),
            current_path: Vec::new(),
            path_history: Vec::new(),
            moves_left: config.moves,
            state: Default::default(),
        };
        engine.update_state();
        Ok(engine)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn has_won(&self) -> bool {
        self.state == EngineState::Won
    }

    pub fn has_lost(&self) -> bool {
        self.state == EngineState::Lost
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn required_words(&self) -> CellCount {
        self.config.required_words
    }

    /// Accepted words, lowercase, in the order they were found.
    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn current_path(&self) -> &[Coord2] {
        &self.current_path
    }

    /// Submitted and abandoned paths, oldest first.
    pub fn path_history(&self) -> &[Vec<Coord2>] {
        &self.path_history
    }

    /// Letters of the current path, in path order.
    pub fn current_word(&self) -> String {
        self.current_path
            .iter()
            .map(|&pos| self.grid[pos].letter())
            .collect()
    }

    /// Reaching the destination ends the session; that decision belongs to the caller.
    pub fn is_destination(&self, coords: Coord2) -> bool {
        self.grid.destination() == Some(coords)
    }

    /// Whether every seeded word of the grid has been found.
    pub fn is_complete(&self) -> bool {
        let placements = self.grid.placements();
        !placements.is_empty()
            && placements
                .iter()
                .all(|placement| self.has_found(&placement.word().to_lowercase()))
    }

    pub fn final_score(&self) -> u32 {
        self.summary().final_score()
    }

    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            state: self.state,
            score: self.score,
            completion_bonus: if self.is_complete() {
                COMPLETION_BONUS
            } else {
                0
            },
            words_found: self.found_words.len(),
            required_words: self.config.required_words,
            moves_left: self.moves_left,
        }
    }

    /// Extends the current path with the cell at `coords`.
    ///
    /// The first cell may be anything but a blocked cell or the destination; every later cell must be a neighbor of
    /// the previous one. A cell can only appear once per path.
    pub fn move_to(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let allowed = !self.grid[coords].is_blocked()
            && !self.current_path.contains(&coords)
            && match self.current_path.last() {
                None => !self.is_destination(coords),
                Some(&last) => self.grid.is_adjacent(last, coords),
            };
        if !allowed {
            log::trace!("Rejected move to {coords:?}");
            return Ok(MoveOutcome::Rejected);
        }

        self.current_path.push(coords);
        self.moves_left -= 1;
        self.update_state();

        Ok(if self.has_lost() {
            MoveOutcome::OutOfMoves
        } else {
            MoveOutcome::Extended
        })
    }

    /// Checks the current path against the dictionary and the words already found, scoring it when accepted.
    pub fn submit_word(&mut self) -> Result<SubmitOutcome> {
        self.check_playing()?;

        let (Some(&first), Some(&last)) = (self.current_path.first(), self.current_path.last())
        else {
            return Ok(SubmitOutcome::Rejected);
        };

        let word = self.current_word().to_lowercase();
        if self.has_found(&word) || !self.dictionary.is_valid(&word) {
            log::trace!("Rejected word {word:?}");
            return Ok(SubmitOutcome::Rejected);
        }

        let shortest = self.grid.shortest_path(first, last).map(|path| path.len());
        let bonus_cells = self
            .current_path
            .iter()
            .filter(|&&pos| self.grid[pos].is_bonus())
            .count();
        let word_score = WordScore {
            base: self.dictionary.base_score(&word),
            shortest_path_bonus: if shortest == Some(self.current_path.len()) {
                SHORTEST_PATH_BONUS
            } else {
                0
            },
            bonus_cells: BONUS_CELL_POINTS
                .saturating_mul(u32::try_from(bonus_cells).unwrap_or(u32::MAX)),
        };
        log::debug!("Accepted {word:?} for {} points", word_score.total());

        self.score = self.score.saturating_add(word_score.total());
        for &pos in &self.current_path {
            self.grid.consume(pos);
        }
        self.found_words.push(word);
        self.path_history.push(core::mem::take(&mut self.current_path));
        self.update_state();

        Ok(if self.has_won() {
            SubmitOutcome::Won(word_score)
        } else {
            SubmitOutcome::Accepted(word_score)
        })
    }

    /// Abandons the current path, keeping it in the history. Moves spent on it are not refunded.
    pub fn reset_path(&mut self) {
        if !self.current_path.is_empty() {
            self.path_history.push(core::mem::take(&mut self.current_path));
        }
    }

    fn has_found(&self, word: &str) -> bool {
        self.found_words.iter().any(|found| found == word)
    }

    fn update_state(&mut self) {
        if self.state.is_finished() {
            return;
        }

        if self.found_words.len() >= usize::from(self.config.required_words) {
            log::debug!("Won with {} words", self.found_words.len());
            self.state = EngineState::Won;
        } else if self.moves_left == 0 {
            log::debug!("Out of moves with {} words", self.found_words.len());
            self.state = EngineState::Lost;
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Score details for the end of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub state: EngineState,
    pub score: u32,
    pub completion_bonus: u32,
    pub words_found: usize,
    pub required_words: CellCount,
    pub moves_left: u32,
}

impl ScoreSummary {
    pub const fn final_score(&self) -> u32 {
        self.score.saturating_add(self.completion_bonus)
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            EngineState::Playing => writeln!(f, "Game ended early")?,
            EngineState::Won => writeln!(f, "Word target reached")?,
            EngineState::Lost => writeln!(f, "Out of moves")?,
        }
        writeln!(f, "Words found: {}/{}", self.words_found, self.required_words)?;
        writeln!(f, "Moves left: {}", self.moves_left)?;
        writeln!(f, "Score: {}", self.score)?;
        if self.completion_bonus > 0 {
            writeln!(f, "Completion bonus: {}", self.completion_bonus)?;
        }
        write!(f, "Final score: {}", self.final_score())
    }
}
