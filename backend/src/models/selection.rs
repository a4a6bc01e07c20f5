//! The user's current filter intent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// First selectable month.
pub const FIRST_MONTH: u32 = 1;
/// Last selectable month.
pub const LAST_MONTH: u32 = 12;

/// Rejected filter input. The previous valid selection stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Month {month} is outside 1..=12")]
    MonthOutOfBounds { month: i64 },

    #[error("Month range is inverted: {min_month} > {max_month}")]
    InvertedMonthRange { min_month: u32, max_month: u32 },
}

/// Inclusive month span. Both bounds are always present and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthRange")]
pub struct MonthRange {
    min_month: u32,
    max_month: u32,
}

#[derive(Deserialize)]
struct RawMonthRange {
    min_month: u32,
    max_month: u32,
}

impl TryFrom<RawMonthRange> for MonthRange {
    type Error = SelectionError;

    fn try_from(raw: RawMonthRange) -> Result<Self, Self::Error> {
        MonthRange::new(raw.min_month, raw.max_month)
    }
}

impl MonthRange {
    pub fn new(min_month: u32, max_month: u32) -> Result<Self, SelectionError> {
        for month in [min_month, max_month] {
            if !(FIRST_MONTH..=LAST_MONTH).contains(&month) {
                return Err(SelectionError::MonthOutOfBounds {
                    month: i64::from(month),
                });
            }
        }
        if min_month > max_month {
            return Err(SelectionError::InvertedMonthRange {
                min_month,
                max_month,
            });
        }
        Ok(Self {
            min_month,
            max_month,
        })
    }

    /// The whole year.
    pub fn full_year() -> Self {
        Self {
            min_month: FIRST_MONTH,
            max_month: LAST_MONTH,
        }
    }

    pub fn min_month(&self) -> u32 {
        self.min_month
    }

    pub fn max_month(&self) -> u32 {
        self.max_month
    }

    pub fn contains(&self, month: u32) -> bool {
        (self.min_month..=self.max_month).contains(&month)
    }
}

impl Default for MonthRange {
    fn default() -> Self {
        Self::full_year()
    }
}

/// Complete set of active constraints.
///
/// Empty `states`/`cities` mean "no constraint on this dimension", not
/// "exclude everything". A missing `min_delay` disables delay filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub states: BTreeSet<String>,
    #[serde(default)]
    pub cities: BTreeSet<String>,
    #[serde(default)]
    pub months: MonthRange,
    #[serde(default)]
    pub min_delay: Option<i64>,
}

impl FilterSelection {
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = cities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_months(mut self, months: MonthRange) -> Self {
        self.months = months;
        self
    }

    pub fn with_min_delay(mut self, min_delay: Option<i64>) -> Self {
        self.min_delay = min_delay;
        self
    }
}
