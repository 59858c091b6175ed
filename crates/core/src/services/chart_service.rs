use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::chart::{CarryForwardPolicy, ChartSeries, DailyAggregate, DayState, DayTotal};
use crate::models::nav::FundSeries;

/// Builds the portfolio's historical value series from per-fund NAV series.
///
/// The core computes all the numbers; renderers only draw `ChartSeries`.
/// Work happens in two explicit steps:
/// 1. fold every fund's NAV × units into a date-indexed `DailyAggregate`
/// 2. read the aggregate back in date order, applying the carry-forward policy
pub struct ChartService {
    policy: CarryForwardPolicy,
}

impl ChartService {
    pub fn new(policy: CarryForwardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CarryForwardPolicy {
        self.policy
    }

    /// Aggregate and read out in one call.
    pub fn build_history(&self, funds: &[FundSeries]) -> ChartSeries {
        let aggregate = self.aggregate(funds);
        let series = self.read_series(&aggregate);
        debug!(
            policy = ?self.policy,
            dates = aggregate.len(),
            points = series.len(),
            "portfolio history built"
        );
        series
    }

    /// Fold all funds into a per-date accumulator.
    ///
    /// Only dates on which at least one fund published a NAV are present.
    pub fn aggregate(&self, funds: &[FundSeries]) -> DailyAggregate {
        match self.policy {
            CarryForwardPolicy::SumReported => aggregate_reported(funds),
            CarryForwardPolicy::PerFund => aggregate_per_fund(funds),
        }
    }

    /// Turn an accumulator into a chart series, ascending by date.
    pub fn read_series(&self, aggregate: &DailyAggregate) -> ChartSeries {
        let mut series = ChartSeries::default();
        match self.policy {
            CarryForwardPolicy::SumReported => {
                let mut last_value: Option<Decimal> = None;
                for (date, total) in aggregate {
                    if !total.value.is_zero() {
                        last_value = Some(total.value);
                        series.push(*date, total.value);
                    } else if let Some(previous) = last_value {
                        series.push(*date, previous);
                    }
                }
            }
            CarryForwardPolicy::PerFund => {
                for (date, total) in aggregate {
                    if total.state == DayState::Complete {
                        series.push(*date, total.value);
                    }
                }
            }
        }
        series
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(CarryForwardPolicy::default())
    }
}

fn day_state(contributing: usize, fund_count: usize) -> DayState {
    if contributing == fund_count {
        DayState::Complete
    } else {
        DayState::Partial
    }
}

/// Σ nav × units over the funds that published on each date.
fn aggregate_reported(funds: &[FundSeries]) -> DailyAggregate {
    let mut aggregate = funds.iter().fold(DailyAggregate::new(), |mut acc, fund| {
        for point in &fund.history.points {
            let day = acc.entry(point.date).or_insert(DayTotal {
                value: Decimal::ZERO,
                reported: 0,
                state: DayState::Partial,
            });
            day.value += point.nav * fund.holding.units_held;
            day.reported += 1;
        }
        acc
    });

    for day in aggregate.values_mut() {
        day.state = day_state(day.reported, funds.len());
    }
    aggregate
}

/// Σ last-known nav × units, each fund carried forward on its own.
fn aggregate_per_fund(funds: &[FundSeries]) -> DailyAggregate {
    let dates: BTreeSet<NaiveDate> = funds
        .iter()
        .flat_map(|f| f.history.points.iter().map(|p| p.date))
        .collect();

    // Per fund: index of the next unread point and the last NAV seen.
    let mut cursors: Vec<(usize, Option<Decimal>)> = vec![(0, None); funds.len()];
    let mut aggregate = DailyAggregate::new();

    for date in dates {
        let mut value = Decimal::ZERO;
        let mut reported = 0;
        let mut known = 0;

        for (fund, (next, last_nav)) in funds.iter().zip(cursors.iter_mut()) {
            let points = &fund.history.points;
            while *next < points.len() && points[*next].date <= date {
                if points[*next].date == date {
                    reported += 1;
                }
                *last_nav = Some(points[*next].nav);
                *next += 1;
            }
            if let Some(nav) = last_nav {
                value += *nav * fund.holding.units_held;
                known += 1;
            }
        }

        aggregate.insert(
            date,
            DayTotal {
                value,
                reported,
                state: day_state(known, funds.len()),
            },
        );
    }
    aggregate
}
