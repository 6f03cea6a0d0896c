//! Pagination parameters for list endpoints
//!
//! The contract is offset-based: `from` is the number of rows to skip and
//! `size` the number of rows to return. `from` does not have to be a
//! multiple of `size`.

use serde::{Deserialize, Serialize};

const DEFAULT_FROM: u32 = 0;
const DEFAULT_SIZE: u32 = 10;

/// Offset-based pagination parameters (`?from=&size=`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageParams {
    /// Number of rows to skip
    #[serde(default = "default_from")]
    pub from: u32,

    /// Number of rows to return, must be positive
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            from: default_from(),
            size: default_size(),
        }
    }
}

impl PageParams {
    pub fn new(from: u32, size: u32) -> Self {
        Self { from, size }
    }

    /// Whether the parameters satisfy the contract (`size > 0`)
    pub fn is_valid(&self) -> bool {
        self.size > 0
    }

    /// Offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        i64::from(self.from)
    }

    /// Limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.size)
    }

    /// Offset as usize for in-memory slicing
    pub fn offset_usize(&self) -> usize {
        self.from as usize
    }

    /// Limit as usize for in-memory slicing
    pub fn limit_usize(&self) -> usize {
        self.size as usize
    }
}

fn default_from() -> u32 {
    DEFAULT_FROM
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}
