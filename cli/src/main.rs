use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use wordlab_core::*;

mod board;

use board::Board;

/// Words used when no word list file is given.
const DEFAULT_WORDS: &[&str] = &[
    "ace", "act", "age", "aid", "air", "ant", "arm", "art", "ash", "bag", "bat", "bed", "bee",
    "bus", "cab", "cap", "car", "cat", "cow", "cup", "day", "dog", "ear", "egg", "elf", "eye",
    "fan", "fig", "fox", "gem", "hat", "hen", "ice", "ink", "jam", "jar", "key", "kit", "leg",
    "map", "mud", "net", "nut", "oak", "owl", "pan", "pea", "pen", "pig", "rat", "rug", "sea",
    "sun", "tea", "toe", "van", "web", "yak", "zoo", "bird", "boat", "cake", "coin", "door",
    "fish", "frog", "gate", "harp", "kite", "lamp", "leaf", "moon", "nest", "pear", "ring",
    "rose", "sand", "ship", "star", "tree", "wolf", "apple", "bread", "chair", "cloud", "house",
    "lemon", "mouse", "piano", "river", "stone", "tiger", "water",
];

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Trace paths through a letter labyrinth to spell words.
#[derive(Parser)]
#[command(long_about = None, version)]
struct Args {
    /// Difficulty level, sets the move budget and the word target
    #[arg(value_enum, short, long, default_value_t = Level::Easy)]
    difficulty: Level,

    /// Number of grid rows
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..))]
    rows: u8,

    /// Number of grid columns
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..))]
    cols: u8,

    /// Seed for grid generation, random when absent
    #[arg(short, long)]
    seed: Option<u64>,

    /// Word list file, one word per line
    #[arg(short, long)]
    words: Option<PathBuf>,

    #[command(flatten)]
    verbosity: Verbosity,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Move(Coord2),
    Submit,
    Reset,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = match parts.next()? {
            "m" | "move" => {
                let row = parts.next()?.parse().ok()?;
                let col = parts.next()?.parse().ok()?;
                Self::Move((row, col))
            }
            "s" | "submit" => Self::Submit,
            "r" | "reset" => Self::Reset,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            _ => return None,
        };
        parts.next().is_none().then_some(command)
    }
}

const HELP: &str = "\
Commands:
  m ROW COL   extend the current path (first cell anywhere but the destination)
  s           submit the current path as a word
  r           abandon the current path
  q           quit
Cells: <A> start, {A} destination, [A] current path, *A bonus, a used, # blocked";

fn load_words(path: Option<&PathBuf>) -> Result<WordList> {
    let Some(path) = path else {
        return Ok(WordList::new(DEFAULT_WORDS));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read word list {}", path.display()))?;
    let words = WordList::new(text.lines());
    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Play stops on a win or loss, and as soon as every hidden word has been found.
fn session_over<D: WordOracle>(engine: &PlayEngine<D>) -> bool {
    engine.is_finished() || engine.is_complete()
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let words = load_words(args.words.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("Using seed {seed}");

    let mut engine =
        PlayEngine::new_game(args.difficulty.into(), (args.rows, args.cols), words, seed)
            .context("Cannot set up the game")?;

    println!("{HELP}\n");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !session_over(&engine) {
        print!("{}", Board(&GameSnapshot::from_engine(&engine)));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match Command::parse(&line) {
            Some(Command::Move(coords)) if engine.is_destination(coords) => {
                println!("Reached the destination.");
                break;
            }
            Some(Command::Move(coords)) => match engine.move_to(coords) {
                Ok(outcome) if outcome.is_accepted() => {}
                Ok(_) => println!("Cannot move there."),
                Err(err) => println!("{err}."),
            },
            Some(Command::Submit) => match engine.submit_word()? {
                SubmitOutcome::Rejected => println!("Invalid word or already found!"),
                SubmitOutcome::Accepted(score) | SubmitOutcome::Won(score) => {
                    println!("+{} points", score.total());
                }
            },
            Some(Command::Reset) => engine.reset_path(),
            Some(Command::Help) => println!("{HELP}"),
            Some(Command::Quit) => break,
            None => println!("Unknown command, try `help`."),
        }
    }

    if engine.is_complete() {
        println!("\nEvery hidden word found, {COMPLETION_BONUS} bonus points!");
    }
    println!("\n{}", engine.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("m 2 3"), Some(Command::Move((2, 3))));
        assert_eq!(Command::parse("  move 0 11 "), Some(Command::Move((0, 11))));
        assert_eq!(Command::parse("s"), Some(Command::Submit));
        assert_eq!(Command::parse("reset"), Some(Command::Reset));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("m 2"), None);
        assert_eq!(Command::parse("m -1 2"), None);
        assert_eq!(Command::parse("m 1 2 3"), None);
        assert_eq!(Command::parse("jump"), None);
    }

    #[test]
    fn finding_every_hidden_word_ends_the_session() {
        let mut grid = Grid::new((1, 3)).unwrap();
        assert!(grid.try_place_word("CAT", (0, 0), (0, 1)));
        let config = GameConfig::new_unchecked(grid.size(), 10, 5, 0, 0);
        let mut engine = PlayEngine::with_grid(config, grid, WordList::new(["cat"])).unwrap();

        assert!(!session_over(&engine));
        for pos in [(0, 0), (0, 1), (0, 2)] {
            engine.move_to(pos).unwrap();
        }
        engine.submit_word().unwrap();

        assert!(!engine.is_finished());
        assert!(session_over(&engine));
    }

    #[test]
    fn default_words_seed_a_game() {
        let words = load_words(None).unwrap();
        let engine = PlayEngine::new_game(Difficulty::Hard, (12, 12), words, 1).unwrap();

        assert!(!engine.grid().placements().is_empty());
    }
}
