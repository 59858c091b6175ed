// ═══════════════════════════════════════════════════════════════════
// NAV History Tests — date parsing, cutoff filtering, ordering
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use mf_portfolio_core::errors::CoreError;
use mf_portfolio_core::models::nav::{RawNavEntry, RawNavHistory};
use mf_portfolio_core::models::scheme::{SchemeCode, SchemeMeta, SchemeRecord};
use mf_portfolio_core::providers::retry::RetryPolicy;
use mf_portfolio_core::providers::traits::NavProvider;
use mf_portfolio_core::services::nav_service::{normalize_entries, parse_entry, NavService};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn entry(date: &str, nav: &str) -> RawNavEntry {
    RawNavEntry {
        date: date.to_string(),
        nav: nav.to_string(),
    }
}

fn cutoff() -> NaiveDate {
    d(2024, 9, 30)
}

/// Provider that returns one fixed history for every scheme.
struct FixedHistoryProvider {
    history: RawNavHistory,
}

#[async_trait]
impl NavProvider for FixedHistoryProvider {
    fn name(&self) -> &str {
        "FixedHistory"
    }

    async fn search_schemes(&self, _query: &str) -> Result<Vec<SchemeRecord>, CoreError> {
        Ok(vec![])
    }

    async fn get_nav_history(&self, _code: &SchemeCode) -> Result<RawNavHistory, CoreError> {
        Ok(self.history.clone())
    }
}

fn contra() -> SchemeRecord {
    SchemeRecord {
        scheme_code: SchemeCode::new("119835"),
        scheme_name: "SBI Contra Fund - Direct Plan - Growth".into(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// parse_entry
// ═══════════════════════════════════════════════════════════════════

mod parsing {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        let point = parse_entry(&entry("01-10-2024", "12.34500")).unwrap();
        assert_eq!(point.date, d(2024, 10, 1));
        assert_eq!(point.nav, dec!(12.345));
    }

    #[test]
    fn trims_whitespace() {
        let point = parse_entry(&entry(" 15-11-2024 ", " 401.2 ")).unwrap();
        assert_eq!(point.date, d(2024, 11, 15));
        assert_eq!(point.nav, dec!(401.2));
    }

    #[test]
    fn rejects_iso_dates() {
        let err = parse_entry(&entry("2024-10-01", "12.3")).unwrap_err();
        assert!(matches!(err, CoreError::Parse(ref msg) if msg.contains("2024-10-01")));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(
            parse_entry(&entry("31-02-2024", "12.3")),
            Err(CoreError::Parse(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_nav() {
        let err = parse_entry(&entry("01-10-2024", "N.A.")).unwrap_err();
        assert!(matches!(err, CoreError::Parse(ref msg) if msg.contains("N.A.")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// normalize_entries
// ═══════════════════════════════════════════════════════════════════

mod normalize {
    use super::*;

    #[test]
    fn reverses_newest_first_input() {
        let raw = vec![
            entry("03-10-2024", "12.3"),
            entry("02-10-2024", "12.2"),
            entry("01-10-2024", "12.1"),
        ];
        let points = normalize_entries(&raw, cutoff()).unwrap();
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2024, 10, 1), d(2024, 10, 2), d(2024, 10, 3)]);
        assert_eq!(points[2].nav, dec!(12.3));
    }

    #[test]
    fn drops_entries_before_cutoff() {
        let raw = vec![
            entry("01-10-2024", "12.1"),
            entry("30-09-2024", "12.0"),
            entry("27-09-2024", "11.9"),
        ];
        let points = normalize_entries(&raw, cutoff()).unwrap();
        assert_eq!(points.len(), 2);
        // The cutoff date itself is kept.
        assert_eq!(points[0].date, cutoff());
        assert!(points.iter().all(|p| p.date >= cutoff()));
    }

    #[test]
    fn duplicate_dates_keep_first_published() {
        let raw = vec![
            entry("02-10-2024", "12.2"),
            entry("01-10-2024", "12.1"),
            entry("01-10-2024", "99.9"),
        ];
        let points = normalize_entries(&raw, cutoff()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].nav, dec!(12.1));
    }

    #[test]
    fn output_is_strictly_ascending() {
        let raw = vec![
            entry("05-10-2024", "5"),
            entry("01-10-2024", "1"),
            entry("03-10-2024", "3"),
            entry("03-10-2024", "3"),
            entry("02-10-2024", "2"),
        ];
        let points = normalize_entries(&raw, cutoff()).unwrap();
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn malformed_entry_fails_whole_history() {
        let raw = vec![entry("01-10-2024", "12.1"), entry("bad", "12.0")];
        assert!(matches!(normalize_entries(&raw, cutoff()), Err(CoreError::Parse(_))));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize_entries(&[], cutoff()).unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// NavService::fetch_history
// ═══════════════════════════════════════════════════════════════════

mod fetch_history {
    use super::*;

    fn service(history: RawNavHistory) -> NavService {
        NavService::new(
            Arc::new(FixedHistoryProvider { history }),
            cutoff(),
            RetryPolicy::none(),
        )
    }

    #[tokio::test]
    async fn returns_ascending_filtered_history_with_meta() {
        let svc = service(RawNavHistory {
            meta: SchemeMeta {
                fund_house: Some("SBI Mutual Fund".into()),
                scheme_type: Some("Open Ended Schemes".into()),
                scheme_category: Some("Equity Scheme - Contra Fund".into()),
            },
            data: vec![
                entry("02-10-2024", "380.5"),
                entry("01-10-2024", "379.0"),
                entry("20-09-2024", "370.0"),
            ],
        });

        let history = svc.fetch_history(&contra()).await.unwrap();
        assert_eq!(history.scheme, contra());
        assert_eq!(history.meta.fund_house.as_deref(), Some("SBI Mutual Fund"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.points[0].date, d(2024, 10, 1));
        assert_eq!(history.latest().unwrap().date, d(2024, 10, 2));
        assert_eq!(history.latest().unwrap().nav, dec!(380.5));
    }

    #[tokio::test]
    async fn no_points_after_cutoff_is_an_error() {
        let svc = service(RawNavHistory {
            meta: SchemeMeta::default(),
            data: vec![entry("20-09-2024", "370.0")],
        });

        let err = svc.fetch_history(&contra()).await.unwrap_err();
        assert!(matches!(err, CoreError::NoNavData { ref scheme_code } if scheme_code == "119835"));
    }

    #[tokio::test]
    async fn cutoff_is_exposed() {
        assert_eq!(service(RawNavHistory::default()).cutoff(), cutoff());
    }
}
