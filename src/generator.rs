use rand::Rng;

use crate::{
    color::Rgb,
    document::Document,
    error::{CollageError, Result},
    item::{CanvasSize, Item},
};

/// Number of items in a generated collage.
pub const RANDOM_ITEM_COUNT: usize = 21;

/// How a word index is drawn from the tokenized corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordSelection {
    /// Uniform over `0..len - 1`; the last word is never picked unless it is
    /// the only one.
    #[default]
    ExcludeLast,
    /// Uniform over every word.
    Uniform,
}

impl WordSelection {
    fn pick<R: Rng + ?Sized>(self, word_count: usize, rng: &mut R) -> usize {
        match self {
            WordSelection::ExcludeLast if word_count > 1 => rng.gen_range(0..word_count - 1),
            WordSelection::ExcludeLast => 0,
            WordSelection::Uniform => rng.gen_range(0..word_count),
        }
    }
}

/// Splits `corpus` into runs of ASCII letters.
///
/// Every other character, including digits and non-ASCII letters, separates
/// words.
pub fn tokenize(corpus: &str) -> Vec<&str> {
    corpus
        .split(|ch: char| !ch.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Builds collages out of words sampled from an arbitrary text.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomCollageGenerator {
    pub canvas_size: CanvasSize,
    pub item_count: usize,
    pub word_selection: WordSelection,
}

impl Default for RandomCollageGenerator {
    fn default() -> Self {
        Self::new(CanvasSize::new(800, 600))
    }
}

impl RandomCollageGenerator {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            canvas_size,
            item_count: RANDOM_ITEM_COUNT,
            word_selection: WordSelection::default(),
        }
    }

    /// Samples a new set of items and a background color.
    ///
    /// Each item independently gets a word from the corpus, a position inside
    /// the canvas and a random color.
    pub fn generate_parts<R: Rng + ?Sized>(
        &self,
        corpus: &str,
        rng: &mut R,
    ) -> Result<(Vec<Item>, Rgb)> {
        let width = self.canvas_size.width;
        let height = self.canvas_size.height;
        if width == 0 || height == 0 {
            return Err(CollageError::EmptyCanvas { width, height });
        }

        let words = tokenize(corpus);
        if words.is_empty() {
            return Err(CollageError::NoWordsFound);
        }

        let max_x = i32::try_from(width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX);

        let mut items = Vec::with_capacity(self.item_count);
        for _ in 0..self.item_count {
            let word = words[self.word_selection.pick(words.len(), rng)];
            let x = rng.gen_range(0..max_x);
            let y = rng.gen_range(0..max_y);
            let color = Rgb::random(rng);
            items.push(Item::new(word, x, y, Some(color))?);
        }

        let background = Rgb::random(rng);
        log::debug!(
            "generated {} items from {} corpus words",
            items.len(),
            words.len()
        );

        Ok((items, background))
    }

    /// Like [`Self::generate_parts`], packaged as a standalone document.
    pub fn generate<R: Rng + ?Sized>(&self, corpus: &str, rng: &mut R) -> Result<Document> {
        let (items, background) = self.generate_parts(corpus, rng)?;
        let mut document = Document::default();
        document.replace_all(items, background);
        Ok(document)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    const CORPUS: &str = "The quick brown fox, jumps over 12 lazy dogs!\nEnd.";

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize(CORPUS),
            ["The", "quick", "brown", "fox", "jumps", "over", "lazy", "dogs", "End"]
        );
        assert_eq!(tokenize("abc123def"), ["abc", "def"]);
        assert_eq!(tokenize("caf\u{e9} ok"), ["caf", "ok"]);
        assert!(tokenize("42 -- 7\n\t").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_generate_shape() {
        let generator = RandomCollageGenerator::new(CanvasSize::new(120, 40));
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let document = generator.generate(CORPUS, &mut rng).unwrap();

        let words = tokenize(CORPUS);
        assert_eq!(document.len(), RANDOM_ITEM_COUNT);
        for item in document.items() {
            assert!((0..120).contains(&item.x()));
            assert!((0..40).contains(&item.y()));
            assert!(words.contains(&item.text()));
            assert_ne!(item.text(), "End");
            assert!(item.color().is_some());
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_seed() {
        let generator = RandomCollageGenerator::default();
        let a = generator
            .generate(CORPUS, &mut Xoshiro256StarStar::seed_from_u64(3))
            .unwrap();
        let b = generator
            .generate(CORPUS, &mut Xoshiro256StarStar::seed_from_u64(3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_single_word() {
        let generator = RandomCollageGenerator::default();
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let document = generator.generate("...only...", &mut rng).unwrap();
        assert!(document.items().iter().all(|item| item.text() == "only"));
    }

    #[test]
    fn test_uniform_selection_can_pick_last_word() {
        let mut generator = RandomCollageGenerator::default();
        generator.word_selection = WordSelection::Uniform;
        generator.item_count = 200;

        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let document = generator.generate("alpha beta", &mut rng).unwrap();
        assert!(document.items().iter().any(|item| item.text() == "beta"));
    }

    #[test]
    fn test_generate_without_words() {
        let generator = RandomCollageGenerator::default();
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        assert!(matches!(
            generator.generate("1234 !? 56", &mut rng),
            Err(CollageError::NoWordsFound)
        ));
    }

    #[test]
    fn test_generate_on_empty_canvas() {
        let generator = RandomCollageGenerator::new(CanvasSize::new(0, 10));
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        assert!(matches!(
            generator.generate("words", &mut rng),
            Err(CollageError::EmptyCanvas { width: 0, height: 10 })
        ));
    }
}
