use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How dates on which only some funds published a NAV are valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarryForwardPolicy {
    /// Sum only the funds that reported on that date. Funds without an entry
    /// count as zero, which dips the series when disclosure timing differs.
    /// A date whose sum is zero takes the previous output value.
    SumReported,

    /// Carry each fund's last known NAV forward independently before summing.
    /// Dates before every fund has reported at least once are dropped.
    #[default]
    PerFund,
}

/// Whether every holding contributed to a day's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayState {
    Complete,
    Partial,
}

/// Accumulated market value for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    /// Σ nav × units over contributing funds
    pub value: Decimal,

    /// Number of funds that published a NAV on exactly this date
    pub reported: usize,

    pub state: DayState,
}

/// Date-indexed accumulator; iteration is ascending by date.
pub type DailyAggregate = BTreeMap<NaiveDate, DayTotal>;

/// Chart-ready series: `dates[i]` pairs with `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Decimal>,
}

impl ChartSeries {
    pub fn push(&mut self, date: NaiveDate, value: Decimal) {
        self.dates.push(date);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value recorded for `date`, if the date is in the series.
    pub fn value_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
