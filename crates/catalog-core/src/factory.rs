//! # Product Factory
//!
//! Generates plausible, unpersisted products for tests and the seed binary.
//!
//! Names come from a short fixed list on purpose: with ten products, some
//! names, categories and availabilities repeat, which is what the
//! `find_by_*` queries need to be exercised against.
//!
//! ## Usage
//! ```rust
//! use catalog_core::factory::ProductFactory;
//!
//! // Reproducible sequence
//! let products: Vec<_> = ProductFactory::seeded(42).take(10).collect();
//! assert_eq!(products.len(), 10);
//! assert!(products.iter().all(|p| p.id.is_none()));
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::price::Price;
use crate::types::{Category, Product};

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const ADJECTIVES: &[&str] = &[
    "sturdy", "bright", "classic", "compact", "fresh", "durable", "light", "premium",
];

const NOUNS: &[&str] = &[
    "item", "choice", "pick", "design", "model", "edition",
];

/// Lowest generated price: 0.50
const MIN_PRICE_CENTS: i64 = 50;

/// Highest generated price: 2000.00
const MAX_PRICE_CENTS: i64 = 200_000;

/// Infinite source of random products.
#[derive(Debug)]
pub struct ProductFactory {
    rng: StdRng,
}

impl ProductFactory {
    /// Creates a factory seeded from OS entropy.
    pub fn new() -> Self {
        ProductFactory {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a factory that always yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        ProductFactory {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds one product with `id` unset.
    pub fn build(&mut self) -> Product {
        let name = self.pick(NAMES);
        let description = format!(
            "A {} {} {}",
            self.pick(ADJECTIVES),
            self.pick(NOUNS),
            self.rng.gen_range(1..1000)
        );
        let price = Price::from_cents(self.rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS));
        let available = self.rng.gen_bool(0.5);
        let category = Category::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();

        Product::new(name, description, price, available, category)
    }

    /// Builds `count` products.
    pub fn build_many(&mut self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.build()).collect()
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl Default for ProductFactory {
    fn default() -> Self {
        ProductFactory::new()
    }
}

impl Iterator for ProductFactory {
    type Item = Product;

    fn next(&mut self) -> Option<Product> {
        Some(self.build())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
