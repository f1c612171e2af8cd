use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Generic `{count, results}` envelope used by search-style endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Counted<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> Counted<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self { count: results.len(), results }
    }
}
