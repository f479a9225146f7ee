//! Generator module - constrained random token generation
//!
//! A generator produces the initial field and single replacement tokens. Every draw
//! excludes the caller's restricted colors, so a generated token never completes a
//! three-in-a-row with the neighbors it was restricted against.
//!
//! [`RandomGenerator`] owns its RNG stream: the same seed and the same sequence of
//! calls always reproduce the same tokens, and two grids with separate generators
//! never perturb each other's stream.

use tracing::trace;

use crate::error::GeneratorError;
use crate::matching::restricted_colors;
use crate::rng::SimpleRng;
use crate::token::Token;
use crate::types::{Position, TileColor, DEFAULT_SEED};

/// Source of tokens for a grid.
pub trait FieldGenerator {
    /// Produce a full `width` x `height` field, stored row-major (`y * width + x`).
    fn populate(&mut self, width: u16, height: u16) -> Result<Vec<Token>, GeneratorError>;

    /// Produce one token for `position`, avoiding every color in `restricted`.
    fn generate_at(
        &mut self,
        position: Position,
        restricted: &[TileColor],
    ) -> Result<Token, GeneratorError>;
}

/// Seeded generator drawing uniformly from a palette.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    palette: Vec<TileColor>,
    rng: SimpleRng,
    seed: u32,
}

impl RandomGenerator {
    /// Generator over the full six-color palette.
    pub fn new(seed: u32) -> Self {
        Self::with_palette(seed, TileColor::ALL.to_vec())
    }

    /// Generator over a custom palette.
    ///
    /// An empty or too-small palette is accepted here and reported by the first draw
    /// that cannot be satisfied.
    pub fn with_palette(seed: u32, palette: Vec<TileColor>) -> Self {
        Self {
            palette,
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn palette(&self) -> &[TileColor] {
        &self.palette
    }

    /// Current RNG stream position.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Draw one color for `position` outside `restricted`.
    pub fn draw_color(
        &mut self,
        position: Position,
        restricted: &[TileColor],
    ) -> Result<TileColor, GeneratorError> {
        if self.palette.is_empty() {
            return Err(GeneratorError::EmptyPalette);
        }

        let available: Vec<TileColor> = self
            .palette
            .iter()
            .copied()
            .filter(|c| !restricted.contains(c))
            .collect();

        if available.is_empty() {
            return Err(GeneratorError::PaletteExhausted {
                position,
                restricted: restricted.to_vec(),
            });
        }

        let color = available[self.rng.next_index(available.len())];
        trace!(%position, ?restricted, %color, "drew color");
        Ok(color)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl FieldGenerator for RandomGenerator {
    fn populate(&mut self, width: u16, height: u16) -> Result<Vec<Token>, GeneratorError> {
        let (w, h) = (width as usize, height as usize);
        let mut placed: Vec<Option<TileColor>> = vec![None; w * h];

        // Column by column, bottom to top. Cells after the current one are still empty,
        // so only preceding pairs can restrict here.
        for x in 0..w {
            for y in 0..h {
                let position = Position::new(x as i32, y as i32);
                let restricted = restricted_colors(
                    |p| {
                        if p.x < 0 || p.y < 0 || p.x >= w as i32 || p.y >= h as i32 {
                            return None;
                        }
                        placed[p.y as usize * w + p.x as usize]
                    },
                    position,
                );
                placed[y * w + x] = Some(self.draw_color(position, &restricted)?);
            }
        }

        let tokens = placed
            .into_iter()
            .enumerate()
            .filter_map(|(i, color)| {
                let position = Position::new((i % w) as i32, (i / w) as i32);
                color.map(|c| Token::new(position, c))
            })
            .collect();
        Ok(tokens)
    }

    fn generate_at(
        &mut self,
        position: Position,
        restricted: &[TileColor],
    ) -> Result<Token, GeneratorError> {
        let color = self.draw_color(position, restricted)?;
        Ok(Token::new(position, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::find_any_match;

    fn colors(tokens: &[Token]) -> Vec<TileColor> {
        tokens.iter().map(Token::color).collect()
    }

    #[test]
    fn populate_fills_every_cell_in_storage_order() {
        let mut gen = RandomGenerator::new(1);
        let tokens = gen.populate(4, 3).unwrap();
        assert_eq!(tokens.len(), 12);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position(), Position::new((i % 4) as i32, (i / 4) as i32));
        }
    }

    #[test]
    fn populate_has_no_match() {
        for seed in 0..50 {
            let mut gen = RandomGenerator::new(seed);
            let tokens = gen.populate(8, 8).unwrap();
            let found = find_any_match(8, 8, |p| {
                if p.x < 0 || p.y < 0 || p.x >= 8 || p.y >= 8 {
                    return None;
                }
                Some(tokens[p.y as usize * 8 + p.x as usize].color())
            });
            assert_eq!(found, None, "seed {} produced a match", seed);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = RandomGenerator::new(42).populate(6, 6).unwrap();
        let b = RandomGenerator::new(42).populate(6, 6).unwrap();
        assert_eq!(colors(&a), colors(&b));
    }

    #[test]
    fn different_seeds_differ() {
        let a = RandomGenerator::new(1).populate(6, 6).unwrap();
        let b = RandomGenerator::new(2).populate(6, 6).unwrap();
        assert_ne!(colors(&a), colors(&b));
    }

    #[test]
    fn empty_palette_is_a_configuration_error() {
        let mut gen = RandomGenerator::with_palette(1, Vec::new());
        assert_eq!(gen.populate(3, 3).unwrap_err(), GeneratorError::EmptyPalette);
        assert_eq!(
            gen.generate_at(Position::new(0, 0), &[]).unwrap_err(),
            GeneratorError::EmptyPalette
        );
    }

    #[test]
    fn exhausted_palette_is_fatal() {
        let mut gen = RandomGenerator::with_palette(1, vec![TileColor::Red, TileColor::Blue]);
        let err = gen
            .generate_at(Position::new(2, 2), &[TileColor::Blue, TileColor::Red])
            .unwrap_err();
        assert_eq!(
            err,
            GeneratorError::PaletteExhausted {
                position: Position::new(2, 2),
                restricted: vec![TileColor::Blue, TileColor::Red],
            }
        );
    }

    #[test]
    fn generate_at_avoids_restricted_colors() {
        let mut gen = RandomGenerator::new(3);
        let restricted = [TileColor::Red, TileColor::Green, TileColor::Blue, TileColor::Cyan];
        for _ in 0..100 {
            let token = gen.generate_at(Position::new(1, 1), &restricted).unwrap();
            assert!(!restricted.contains(&token.color()));
            assert_eq!(token.position(), Position::new(1, 1));
        }
    }

    #[test]
    fn single_color_palette_fills_a_degenerate_row() {
        // Width 2 never forms a horizontal window, height 1 never a vertical one.
        let mut gen = RandomGenerator::with_palette(5, vec![TileColor::Magenta]);
        let tokens = gen.populate(2, 1).unwrap();
        assert_eq!(colors(&tokens), vec![TileColor::Magenta; 2]);
    }
}
