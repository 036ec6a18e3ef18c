use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Admissible advance increments, validated once at construction.
///
/// Always non-empty, strictly ascending and free of zeros. The greedy
/// decomposition walks it from the back, so the ordering is never
/// re-checked after this point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IncrementSet {
    steps: Vec<u32>,
}

impl IncrementSet {
    pub fn new(steps: impl Into<Vec<u32>>) -> Result<Self> {
        let steps = steps.into();

        if steps.is_empty() {
            return Err(Error::InvalidConfiguration(
                "At least one step is required".to_string()
            ));
        }

        if steps[0] == 0 {
            return Err(Error::InvalidConfiguration(
                "Steps must be positive".to_string()
            ));
        }

        if !steps.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidConfiguration(
                format!("Steps must be in increasing order, got {:?}", steps)
            ));
        }

        Ok(Self { steps })
    }

    /// 1, 3, 6 and 24 hour increments.
    pub fn hourly() -> Self {
        Self { steps: vec![1, 3, 6, 24] }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn smallest(&self) -> u32 {
        self.steps[0]
    }

    pub fn largest(&self) -> u32 {
        self.steps[self.steps.len() - 1]
    }

    pub fn contains(&self, step: u32) -> bool {
        self.steps.binary_search(&step).is_ok()
    }

    /// Increments in the order the decomposition consumes them.
    pub fn largest_first(&self) -> impl Iterator<Item = u32> + '_ {
        self.steps.iter().rev().copied()
    }
}

impl TryFrom<Vec<u32>> for IncrementSet {
    type Error = Error;

    fn try_from(steps: Vec<u32>) -> Result<Self> {
        Self::new(steps)
    }
}

impl From<IncrementSet> for Vec<u32> {
    fn from(set: IncrementSet) -> Self {
        set.steps
    }
}
