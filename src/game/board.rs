//! Toy Codenames board.
//!
//! A flat deal of words and colours, enough to demo the solver on a
//! realistic turn: the red team's words become targets, everything else
//! becomes the avoid list. Not a game loop.

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Card colour on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Own team's words (targets)
    Red,
    /// Enemy words
    Blue,
    /// Neutral bystanders
    Grey,
    /// The assassin
    Black,
}

/// A dealt board: `words[i]` has colour `colours[i]`.
#[derive(Debug, Clone)]
pub struct Board {
    pub words: Vec<String>,
    pub colours: Vec<Colour>,
    pub cols: usize,
}

impl Board {
    /// Words of one colour, in board order.
    pub fn words_for(&self, colour: Colour) -> Vec<String> {
        self.words
            .iter()
            .zip(&self.colours)
            .filter(|&(_, &c)| c == colour)
            .map(|(w, _)| w.clone())
            .collect()
    }

    /// Words of every colour except `colour`, in board order.
    pub fn words_except(&self, colour: Colour) -> Vec<String> {
        self.words
            .iter()
            .zip(&self.colours)
            .filter(|&(_, &c)| c != colour)
            .map(|(w, _)| w.clone())
            .collect()
    }
}

/// Deal parameters. Counts must sum to `cols * rows`.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    pub cols: usize,
    pub rows: usize,
    pub red: usize,
    pub blue: usize,
    pub grey: usize,
    pub black: usize,
    pub seed: Option<u64>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        // The standard 25-card deal
        Self {
            cols: 5,
            rows: 5,
            red: 9,
            blue: 8,
            grey: 7,
            black: 1,
            seed: None,
        }
    }
}

impl BoardBuilder {
    /// Sample words from `pool` and shuffle a colour stack over them.
    ///
    /// With a seed the deal is fully reproducible; without one it draws
    /// from OS entropy.
    pub fn deal(&self, pool: &[String]) -> Result<Board> {
        let cells = self.cols * self.rows;
        if self.red + self.blue + self.grey + self.black != cells {
            bail!(
                "colour counts {}+{}+{}+{} do not fill a {}x{} board",
                self.red,
                self.blue,
                self.grey,
                self.black,
                self.cols,
                self.rows
            );
        }
        if pool.len() < cells {
            bail!(
                "word pool has {} words, a {}x{} board needs {}",
                pool.len(),
                self.cols,
                self.rows,
                cells
            );
        }

        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().next_u64()),
        };

        let mut words: Vec<String> = pool.to_vec();
        words.shuffle(&mut rng);
        words.truncate(cells);

        let mut colours: Vec<Colour> = Vec::with_capacity(cells);
        colours.extend(std::iter::repeat_n(Colour::Red, self.red));
        colours.extend(std::iter::repeat_n(Colour::Blue, self.blue));
        colours.extend(std::iter::repeat_n(Colour::Grey, self.grey));
        colours.extend(std::iter::repeat_n(Colour::Black, self.black));
        colours.shuffle(&mut rng);

        Ok(Board {
            words,
            colours,
            cols: self.cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    #[test]
    fn deal_fills_the_board_with_the_requested_counts() {
        let builder = BoardBuilder { seed: Some(7), ..BoardBuilder::default() };
        let board = builder.deal(&pool(40)).unwrap();

        assert_eq!(board.words.len(), 25);
        assert_eq!(board.words_for(Colour::Red).len(), 9);
        assert_eq!(board.words_for(Colour::Blue).len(), 8);
        assert_eq!(board.words_for(Colour::Grey).len(), 7);
        assert_eq!(board.words_for(Colour::Black).len(), 1);
        assert_eq!(board.words_except(Colour::Red).len(), 16);
    }

    #[test]
    fn seeded_deals_are_reproducible() {
        let builder = BoardBuilder { seed: Some(42), ..BoardBuilder::default() };
        let a = builder.deal(&pool(40)).unwrap();
        let b = builder.deal(&pool(40)).unwrap();

        assert_eq!(a.words, b.words);
        assert_eq!(a.colours, b.colours);
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let builder = BoardBuilder { red: 10, ..BoardBuilder::default() };
        assert!(builder.deal(&pool(40)).is_err());
    }

    #[test]
    fn short_pool_is_rejected() {
        let builder = BoardBuilder { seed: Some(1), ..BoardBuilder::default() };
        assert!(builder.deal(&pool(10)).is_err());
    }
}
