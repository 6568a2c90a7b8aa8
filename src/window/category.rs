//! Number categories served by the upstream provider

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Prime,
    Fibonacci,
    Even,
    Random,
}

impl Category {
    /// Inbound token (`p`, `f`, `e`, `r`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Prime => "p",
            Category::Fibonacci => "f",
            Category::Even => "e",
            Category::Random => "r",
        }
    }

    /// Upstream path segment for this category
    pub fn upstream_path(&self) -> &'static str {
        match self {
            Category::Prime => "primes",
            Category::Fibonacci => "fibo",
            Category::Even => "even",
            Category::Random => "rand",
        }
    }

    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "p" => Some(Category::Prime),
            "f" => Some(Category::Fibonacci),
            "e" => Some(Category::Even),
            "r" => Some(Category::Random),
            _ => None,
        }
    }

    pub fn all() -> [Category; 4] {
        [
            Category::Prime,
            Category::Fibonacci,
            Category::Even,
            Category::Random,
        ]
    }

    /// Dense index used to address per-category state
    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Prime => 0,
            Category::Fibonacci => 1,
            Category::Even => 2,
            Category::Random => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
