use crate::*;
pub use random::*;

mod random;

/// Produces a grid ready for play: letters set, endpoints chosen, blocked and bonus cells marked.
pub trait GridGenerator {
    fn generate(self, config: &GameConfig, words: &[&str]) -> Result<Grid>;
}
