use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Non-blocked neighbors of a cell, in [`DIRECTIONS`] order.
pub type Neighbors = SmallVec<[Coord2; 8]>;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A seed word written along a straight line of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    word: String,
    origin: Coord2,
    direction: Delta,
}

impl Placement {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub const fn origin(&self) -> Coord2 {
        self.origin
    }

    pub const fn direction(&self) -> Delta {
        self.direction
    }

    /// Coordinates of each letter, in word order.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        let bounds = (Coord::MAX, Coord::MAX);
        (0..self.word.chars().count())
            .filter_map(move |step| offset(self.origin, self.direction, step, bounds))
    }
}

/// Letter grid owning every [`Cell`] plus the adjacency graph between non-blocked cells.
///
/// Cells are only ever referred to by their `(row, col)` coordinates, both from the outside and inside the
/// adjacency lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    adjacency: Array2<Neighbors>,
    start: Option<Coord2>,
    destination: Option<Coord2>,
    placements: Vec<Placement>,
}

impl Grid {
    /// Creates a grid of placeholder cells without any flags.
    pub fn new(size: Coord2) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        let mut grid = Self {
            cells,
            adjacency: Array2::default(size.to_nd_index()),
            start: None,
            destination: None,
            placements: Vec::new(),
        };
        grid.rebuild_adjacency();
        Ok(grid)
    }

    /// Builds a grid from rows of text.
    ///
    /// Uppercase letters are plain cells, lowercase letters are bonus cells and `#` is a blocked cell.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let size = (
            Coord::try_from(rows.len()).map_err(|_| GameError::InvalidBoardShape)?,
            Coord::try_from(width).map_err(|_| GameError::InvalidBoardShape)?,
        );
        let mut grid = Self::new(size)?;

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, letter) in line.chars().enumerate() {
                let cell = &mut grid.cells[[row, col]];
                match letter {
                    '#' => {
                        cell.set_letter('#');
                        cell.set_blocked();
                    }
                    letter if letter.is_lowercase() => {
                        cell.set_letter(letter.to_ascii_uppercase());
                        cell.set_bonus();
                    }
                    letter => cell.set_letter(letter),
                }
            }
        }

        grid.rebuild_adjacency();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> &[Coord2] {
        self.adjacency
            .get(coords.to_nd_index())
            .map(Neighbors::as_slice)
            .unwrap_or_default()
    }

    pub fn is_adjacent(&self, from: Coord2, to: Coord2) -> bool {
        self.neighbors(from).contains(&to)
    }

    pub fn start(&self) -> Option<Coord2> {
        self.start
    }

    pub fn destination(&self) -> Option<Coord2> {
        self.destination
    }

    pub fn is_endpoint(&self, coords: Coord2) -> bool {
        self.start == Some(coords) || self.destination == Some(coords)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placed_words(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(Placement::word)
    }

    /// Writes `word` from `origin` along `direction` if every cell on the way is in bounds and either still a
    /// placeholder or already holds the matching letter. Words holding anything but letters are refused.
    pub fn try_place_word(&mut self, word: &str, origin: Coord2, direction: Delta) -> bool {
        if word.is_empty() || !word.chars().all(|letter| letter != PLACEHOLDER && letter.is_alphabetic()) {
            return false;
        }

        let size = self.size();
        let mut path = Vec::with_capacity(word.len());
        for (step, letter) in word.chars().enumerate() {
            let Some(pos) = offset(origin, direction, step, size) else {
                return false;
            };
            let current = self[pos].letter();
            if current != PLACEHOLDER && current != letter {
                return false;
            }
            path.push((pos, letter));
        }

        for (pos, letter) in path {
            self.cells[pos.to_nd_index()].set_letter(letter);
        }
        self.placements.push(Placement {
            word: word.into(),
            origin,
            direction,
        });
        true
    }

    /// Gives every remaining placeholder a uniformly random letter.
    pub fn fill_placeholders<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_placeholder()) {
            let letter = ALPHABET[rng.random_range(0..ALPHABET.len())];
            cell.set_letter(char::from(letter));
        }
    }

    /// Picks a random start and a distinct random destination among non-blocked cells.
    pub fn pick_endpoints<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.start = None;
        self.destination = None;

        let mut free = self.free_cells(|cell| !cell.is_blocked());
        if free.len() < 2 {
            return Err(GameError::NotEnoughFreeCells {
                requested: 2,
                available: free.len() as CellCount,
            });
        }

        let start = free.swap_remove(rng.random_range(0..free.len()));
        let destination = free.swap_remove(rng.random_range(0..free.len()));
        log::debug!("Start at {start:?}, destination at {destination:?}");
        self.set_endpoints(start, destination)
    }

    pub fn set_endpoints(&mut self, start: Coord2, destination: Coord2) -> Result<()> {
        let start = self.validate_coords(start)?;
        let destination = self.validate_coords(destination)?;
        if start == destination || self[start].is_blocked() || self[destination].is_blocked() {
            return Err(GameError::InvalidEndpoints);
        }

        self.start = Some(start);
        self.destination = Some(destination);
        Ok(())
    }

    /// Blocks `count` random cells that are neither blocked already nor endpoints, then rebuilds the adjacency.
    pub fn add_blocked_cells<R: Rng + ?Sized>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        let free = self.free_cells(|cell| !cell.is_blocked());
        for pos in sample_cells(free, count, rng)? {
            self.cells[pos.to_nd_index()].set_blocked();
        }
        self.rebuild_adjacency();
        Ok(())
    }

    /// Marks `count` random free, non-endpoint cells as bonus cells.
    pub fn add_bonus_cells<R: Rng + ?Sized>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        let free = self.free_cells(|cell| !cell.is_blocked() && !cell.is_bonus());
        for pos in sample_cells(free, count, rng)? {
            self.cells[pos.to_nd_index()].set_bonus();
        }
        Ok(())
    }

    /// Finds one of the shortest routes from `from` to `to`, both ends included.
    ///
    /// Every edge costs one, so a breadth-first search settles cells in distance order. Returns `None` when either
    /// end is out of bounds or `to` cannot be reached.
    pub fn shortest_path(&self, from: Coord2, to: Coord2) -> Option<Vec<Coord2>> {
        let from = self.validate_coords(from).ok()?;
        let to = self.validate_coords(to).ok()?;
        if from == to {
            return Some(vec![from]);
        }

        let dim = self.cells.dim();
        let mut parents: Array2<Option<Coord2>> = Array2::from_elem(dim, None);
        let mut visited: Array2<bool> = Array2::from_elem(dim, false);
        let mut to_visit = VecDeque::from([from]);
        visited[from.to_nd_index()] = true;

        while let Some(current) = to_visit.pop_front() {
            if current == to {
                break;
            }

            for &next in self.neighbors(current) {
                if visited[next.to_nd_index()] {
                    continue;
                }
                visited[next.to_nd_index()] = true;
                parents[next.to_nd_index()] = Some(current);
                to_visit.push_back(next);
            }
        }

        if !visited[to.to_nd_index()] {
            return None;
        }

        let mut path = vec![to];
        let mut current = to;
        while let Some(parent) = parents[current.to_nd_index()] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    pub(crate) fn consume(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].consume();
    }

    fn free_cells(&self, keep: impl Fn(&Cell) -> bool) -> Vec<Coord2> {
        self.cells
            .iter()
            .filter(|cell| !self.is_endpoint(cell.pos()) && keep(cell))
            .map(Cell::pos)
            .collect()
    }

    fn rebuild_adjacency(&mut self) {
        let cells = &self.cells;
        self.adjacency = Array2::from_shape_fn(cells.dim(), |(row, col)| {
            if cells[[row, col]].is_blocked() {
                return Neighbors::new();
            }
            cells
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|pos| !cells[pos.to_nd_index()].is_blocked())
                .collect()
        });
    }
}

/// Draws `count` distinct cells out of `free`, failing upfront when there are not enough of them.
fn sample_cells<R: Rng + ?Sized>(
    mut free: Vec<Coord2>,
    count: CellCount,
    rng: &mut R,
) -> Result<Vec<Coord2>> {
    let available = CellCount::try_from(free.len()).unwrap_or(CellCount::MAX);
    if count > available {
        return Err(GameError::NotEnoughFreeCells {
            requested: count,
            available,
        });
    }

    Ok((0..count)
        .map(|_| free.swap_remove(rng.random_range(0..free.len())))
        .collect())
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                if cell.is_blocked() {
                    f.write_str(" #")?;
                } else if cell.is_bonus() {
                    write!(f, "*{}", cell.letter())?;
                } else {
                    write!(f, " {}", cell.letter())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new((0, 4)),
            Err(GameError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert_eq!(
            Grid::from_rows(&[]).unwrap_err(),
            GameError::InvalidDimensions { rows: 0, cols: 0 }
        );
    }

    #[test]
    fn from_rows_reads_blocked_and_bonus_cells() {
        let grid = grid(&["Ab", "#D"]);

        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid[(0, 1)].letter(), 'B');
        assert!(grid[(0, 1)].is_bonus());
        assert!(grid[(1, 0)].is_blocked());
        assert!(!grid[(1, 1)].is_bonus());
        assert_eq!(Grid::from_rows(&["AB", "C"]), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn adjacency_skips_blocked_cells() {
        let grid = grid(&["ABC", "D#E", "FGH"]);

        assert_eq!(grid.neighbors((0, 0)), [(0, 1), (1, 0)]);
        assert!(grid.neighbors((1, 1)).is_empty());
        assert!(grid.is_adjacent((0, 1), (1, 2)));
        assert!(!grid.is_adjacent((0, 0), (1, 1)));
        for cell in grid.cells() {
            assert!(grid.neighbors(cell.pos()).iter().all(|&pos| !grid[pos].is_blocked()));
        }
    }

    #[test]
    fn place_word_allows_matching_crossings() {
        let mut grid = Grid::new((3, 3)).unwrap();

        assert!(grid.try_place_word("CAT", (0, 0), (1, 1)));
        assert!(grid.try_place_word("BAD", (1, 0), (0, 1)));
        assert!(!grid.try_place_word("FOX", (0, 0), (0, 1)));
        assert!(!grid.try_place_word("LONG", (0, 0), (0, 1)));
        assert!(!grid.try_place_word("UP", (0, 0), (-1, 0)));
        assert!(!grid.try_place_word("X Y", (2, 0), (0, 1)));
        assert!(!grid.try_place_word("A-B", (2, 0), (0, 1)));

        assert_eq!(grid.placed_words().collect::<Vec<_>>(), ["CAT", "BAD"]);
        for placement in grid.placements() {
            let letters: String = placement.cells().map(|pos| grid[pos].letter()).collect();
            assert_eq!(letters, placement.word());
        }
    }

    #[test]
    fn fill_leaves_no_placeholder() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::new((4, 5)).unwrap();
        grid.try_place_word("WORD", (0, 0), (0, 1));

        grid.fill_placeholders(&mut rng);

        assert!(grid.cells().all(|cell| cell.letter().is_ascii_uppercase()));
        assert_eq!(grid[(0, 2)].letter(), 'R');
    }

    #[test]
    fn shortest_path_to_self_is_single_cell() {
        let grid = grid(&["AB", "CD"]);

        assert_eq!(grid.shortest_path((1, 1), (1, 1)), Some(vec![(1, 1)]));
    }

    #[test]
    fn shortest_path_goes_around_walls() {
        let grid = grid(&["A#B", "C#D", "EFG"]);

        let path = grid.shortest_path((0, 0), (0, 2)).unwrap();

        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(0, 2)));
        assert!(path.windows(2).all(|step| grid.is_adjacent(step[0], step[1])));
    }

    #[test]
    fn shortest_path_to_isolated_cell_is_none() {
        let grid = grid(&["AB#D", "###E"]);

        assert_eq!(grid.shortest_path((0, 0), (0, 3)), None);
        assert_eq!(grid.shortest_path((0, 0), (1, 0)), None);
        assert_eq!(grid.shortest_path((0, 0), (5, 5)), None);
    }

    #[test]
    fn blocked_cells_spare_endpoints_and_update_adjacency() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut grid = grid(&["ABC", "DEF", "GHI"]);
        grid.set_endpoints((0, 0), (2, 2)).unwrap();

        grid.add_blocked_cells(7, &mut rng).unwrap();

        assert!(!grid[(0, 0)].is_blocked());
        assert!(!grid[(2, 2)].is_blocked());
        assert_eq!(grid.cells().filter(|cell| cell.is_blocked()).count(), 7);
        assert!(grid.neighbors((0, 0)).is_empty());
        assert_eq!(grid.shortest_path((0, 0), (2, 2)), None);
    }

    #[test]
    fn sampling_fails_instead_of_spinning() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut grid = grid(&["ABC", "DEF"]);
        grid.set_endpoints((0, 0), (1, 2)).unwrap();

        assert_eq!(
            grid.add_blocked_cells(5, &mut rng),
            Err(GameError::NotEnoughFreeCells { requested: 5, available: 4 })
        );
        grid.add_blocked_cells(2, &mut rng).unwrap();
        assert_eq!(
            grid.add_bonus_cells(3, &mut rng),
            Err(GameError::NotEnoughFreeCells { requested: 3, available: 2 })
        );
        let before: Vec<Vec<Coord2>> = grid.cells().map(|cell| grid.neighbors(cell.pos()).to_vec()).collect();
        grid.add_bonus_cells(2, &mut rng).unwrap();
        assert_eq!(grid.cells().filter(|cell| cell.is_bonus()).count(), 2);
        let after: Vec<Vec<Coord2>> = grid.cells().map(|cell| grid.neighbors(cell.pos()).to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn endpoints_are_distinct_and_open() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut grid = grid(&["A#", "#B"]);

        grid.pick_endpoints(&mut rng).unwrap();

        let (start, destination) = (grid.start().unwrap(), grid.destination().unwrap());
        assert_ne!(start, destination);
        assert!(!grid[start].is_blocked());
        assert!(!grid[destination].is_blocked());
        assert_eq!(grid.set_endpoints((0, 0), (0, 0)), Err(GameError::InvalidEndpoints));
        assert_eq!(grid.set_endpoints((0, 0), (0, 1)), Err(GameError::InvalidEndpoints));

        let mut tiny = self::grid(&["A#"]);
        assert_eq!(
            tiny.pick_endpoints(&mut rng),
            Err(GameError::NotEnoughFreeCells { requested: 2, available: 1 })
        );
    }

    #[test]
    fn display_marks_blocked_and_bonus_cells() {
        let grid = grid(&["Ab", "#D"]);

        assert_eq!(grid.to_string(), " A*B\n # D\n");
    }
}
