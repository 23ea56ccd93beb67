use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub letter: char,
    pub blocked: bool,
    pub bonus: bool,
    pub consumed: bool,
    pub start: bool,
    pub destination: bool,
    pub in_path: bool,
}

/// Read-only copy of a session, detached from the engine that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: Coord2,
    pub state: EngineState,
    pub score: u32,
    pub moves_left: u32,
    pub required_words: CellCount,
    pub found_words: Vec<String>,
    pub current_path: Vec<Coord2>,
    pub path_history: Vec<Vec<Coord2>>,
    pub cells: Array2<CellView>,
}

impl GameSnapshot {
    pub fn from_engine<D: WordOracle>(engine: &PlayEngine<D>) -> Self {
        let grid = engine.grid();
        let size = grid.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::default());

        for cell in grid.cells() {
            let coords = cell.pos();
            cells[coords.to_nd_index()] = CellView {
                letter: cell.letter(),
                blocked: cell.is_blocked(),
                bonus: cell.is_bonus(),
                consumed: cell.is_consumed(),
                start: grid.start() == Some(coords),
                destination: grid.destination() == Some(coords),
                in_path: engine.current_path().contains(&coords),
            };
        }

        Self {
            size,
            state: engine.state(),
            score: engine.score(),
            moves_left: engine.moves_left(),
            required_words: engine.required_words(),
            found_words: engine.found_words().to_vec(),
            current_path: engine.current_path().to_vec(),
            path_history: engine.path_history().to_vec(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&CellView> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        let in_bounds = |&(row, col): &Coord2| row < self.size.0 && col < self.size.1;
        let all_paths = self.path_history.iter().chain([&self.current_path]);
        if !all_paths.flatten().all(in_bounds) {
            return Err(GameError::InvalidCoords);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn engine() -> PlayEngine<WordList> {
        let mut grid = Grid::from_rows(&["CAt", "#OG"]).unwrap();
        grid.set_endpoints((1, 1), (1, 2)).unwrap();
        let config = GameConfig::new_unchecked(grid.size(), 10, 2, 0, 0);
        PlayEngine::with_grid(config, grid, WordList::new(["cat", "cog"])).unwrap()
    }

    #[test]
    fn from_engine_maps_cells_and_progress() {
        let mut engine = engine();
        for pos in [(0, 0), (0, 1), (0, 2)] {
            engine.move_to(pos).unwrap();
        }
        engine.submit_word().unwrap();
        engine.move_to((0, 0)).unwrap();

        let snapshot = GameSnapshot::from_engine(&engine);

        assert_eq!(snapshot.found_words, ["cat"]);
        assert_eq!(snapshot.current_path, [(0, 0)]);
        assert_eq!(snapshot.path_history, [vec![(0, 0), (0, 1), (0, 2)]]);
        assert_eq!(snapshot.moves_left, 6);

        let corner = snapshot.cell((0, 0)).unwrap();
        assert!(corner.consumed && corner.in_path);
        assert!(snapshot.cell((0, 2)).unwrap().bonus);
        assert!(snapshot.cell((1, 0)).unwrap().blocked);
        assert!(snapshot.cell((1, 1)).unwrap().start);
        assert!(snapshot.cell((1, 2)).unwrap().destination);
        assert_eq!(snapshot.cell((1, 2)).unwrap().letter, 'G');
        assert_eq!(snapshot.cell((2, 0)), None);
    }

    #[test]
    fn snapshot_is_plain_data() {
        let snapshot = GameSnapshot::from_engine(&engine());

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: GameSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let mut snapshot = GameSnapshot::from_engine(&engine());
        snapshot.cells = Array2::from_elem([1, 3], CellView::default());

        assert_eq!(snapshot.validate(), Err(GameError::InvalidBoardShape));

        let mut snapshot = GameSnapshot::from_engine(&engine());
        snapshot.current_path = vec![(4, 0)];

        assert_eq!(snapshot.validate(), Err(GameError::InvalidCoords));
    }
}
