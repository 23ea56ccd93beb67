use std::fmt;
use wordlab_core::{CellView, GameSnapshot};

fn cell_text(cell: &CellView) -> String {
    let letter = if cell.consumed {
        cell.letter.to_ascii_lowercase()
    } else {
        cell.letter
    };

    if cell.blocked {
        " # ".into()
    } else if cell.in_path {
        format!("[{letter}]")
    } else if cell.start {
        format!("<{letter}>")
    } else if cell.destination {
        format!("{{{letter}}}")
    } else if cell.bonus {
        format!("*{letter} ")
    } else {
        format!(" {letter} ")
    }
}

/// Dra/// Draws the grid with row and column numbers, followed by the session counters.
pub struct Board<'a>(pub &'a GameSnapshot);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;

        write!(f, "   ")?;
        for col in 0..snapshot.size.1 {
            write!(f, "{col:^3}")?;
        }
        writeln!(f)?;

        for (row, cells) in snapshot.cells.rows().into_iter().enumerate() {
            write!(f, "{row:>2} ")?;
            for cell in cells {
                f.write_str(&cell_text(cell))?;
            }
            writeln!(f)?;
        }

        let word: String = snapshot
            .current_path
            .iter()
            .filter_map(|&coords| snapshot.cell(coords))
            .map(|cell| cell.letter)
            .collect();
        writeln!(
            f,
            "Score: {} | Words found: {}/{} | Moves left: {}",
            snapshot.score,
            snapshot.found_words.len(),
            snapshot.required_words,
            snapshot.moves_left
        )?;
        if !word.is_empty() {
            writeln!(f, "Current word: {word}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordlab_core::*;

    #[test]
    fn renders_markers_and_counters() {
        let mut grid = Grid::from_rows(&["CAt", "#OG"]).unwrap();
        grid.set_endpoints((1, 1), (1, 2)).unwrap();
        let config = GameConfig::new_unchecked(grid.size(), 10, 2, 0, 0);
        let mut engine = PlayEngine::with_grid(config, grid, WordList::new(["cat"])).unwrap();
        engine.move_to((0, 0)).unwrap();

        let text = Board(&GameSnapshot::from_engine(&engine)).to_string();

        assert_eq!(
            text,
            "    0  1  2 \n 0 [C] A *T \n 1  # <O>{G}\nScore: 0 | Words found: 0/2 | Moves left: 9\nCurrent word: C\n"
        );
    }
}
