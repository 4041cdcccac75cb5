// SPDX-License-Identifier: Apache-2.0

use baret_model::TallyKey;

/// Fixed-domain counter over a closed status enum.
///
/// Built from a grouped-count query result: every enum key is present and
/// zero-initialized, each recognized token sets its key once, and tokens
/// outside the enum are discarded without adding keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTally<S: TallyKey> {
    counts: Vec<i64>,
    _domain: std::marker::PhantomData<S>,
}

impl<S: TallyKey> StatusTally<S> {
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            counts: vec![0; S::KEYS.len()],
            _domain: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn from_grouped(rows: &[(String, i64)]) -> Self {
        let mut tally = Self::zeroed();
        for (token, count) in rows {
            if let Some(position) = S::KEYS.iter().position(|key| key.token() == token) {
                tally.counts[position] = *count;
            }
        }
        tally
    }

    #[must_use]
    pub fn get(&self, key: S) -> i64 {
        S::KEYS
            .iter()
            .position(|candidate| *candidate == key)
            .map_or(0, |position| self.counts[position])
    }

    /// Locale labels in key order, aligned with [`counts`](Self::counts).
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        S::KEYS.iter().map(|key| key.label().to_string()).collect()
    }

    #[must_use]
    pub fn counts(&self) -> Vec<i64> {
        self.counts.clone()
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.counts.iter().sum()
    }
}

impl<S: TallyKey> Default for StatusTally<S> {
    fn default() -> Self {
        Self::zeroed()
    }
}
