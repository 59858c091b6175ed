// ═══════════════════════════════════════════════════════════════════
// Render Tests — number formatting, HTML page, SVG chart
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use mf_portfolio_core::models::analytics::{
    HoldingState, HoldingStatus, HoldingValuation, LoadOutcome, PortfolioSnapshot, PortfolioSummary,
};
use mf_portfolio_core::models::chart::ChartSeries;
use mf_portfolio_core::models::scheme::SchemeCode;
use mf_portfolio_core::models::settings::{NumberGrouping, PortfolioSettings};
use mf_portfolio_core::render::chart::{render_history_chart, tick_indices};
use mf_portfolio_core::render::escape_html;
use mf_portfolio_core::render::format::{
    format_currency, format_nav, format_number, format_percent, format_signed_currency,
    group_digits, pl_class, round_half_away, summary_class,
};
use mf_portfolio_core::render::{render_page, HtmlOptions};

use NumberGrouping::{Indian, Western};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn innovation_snapshot() -> PortfolioSnapshot {
    let mut history = ChartSeries::default();
    history.push(d(2024, 10, 1), dec!(99600.5));
    history.push(d(2024, 10, 14), dec!(123274.125));

    PortfolioSnapshot {
        as_of: d(2024, 10, 14),
        cutoff: d(2024, 9, 30),
        holdings: vec![HoldingValuation {
            fund_name: "SBI Innovation Opportunities Fund".into(),
            display_name: "SBI Innovation Opportunities Fund - Direct Plan - Growth".into(),
            scheme_code: SchemeCode::new("152000"),
            invested: dec!(100000),
            units: dec!(9861.93),
            latest_nav: dec!(12.50000),
            latest_date: d(2024, 10, 14),
            current_value: dec!(123274.125),
            pl: dec!(23274.125),
            pl_percent: Some(dec!(23.274125)),
        }],
        summary: PortfolioSummary {
            total_invested: dec!(100000),
            total_current: dec!(123274.125),
            net_pl: dec!(23274.125),
            net_pl_percent: Some(dec!(23.274125)),
        },
        history,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Number formatting
// ═══════════════════════════════════════════════════════════════════

mod format {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_half_away(dec!(12.5), 0), dec!(13));
        assert_eq!(round_half_away(dec!(-12.5), 0), dec!(-13));
        assert_eq!(round_half_away(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_away(dec!(2.5), 0), dec!(3));
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(group_digits("123", Indian), "123");
        assert_eq!(group_digits("1234", Indian), "1,234");
        assert_eq!(group_digits("123274", Indian), "1,23,274");
        assert_eq!(group_digits("1234567", Indian), "12,34,567");
        assert_eq!(group_digits("123456789", Indian), "12,34,56,789");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(group_digits("123274", Western), "123,274");
        assert_eq!(group_digits("1234567", Western), "1,234,567");
    }

    #[test]
    fn currency_whole_units() {
        assert_eq!(format_currency(dec!(123274.125), "₹", 0, Indian), "₹1,23,274");
        assert_eq!(format_currency(dec!(100000), "₹", 0, Indian), "₹1,00,000");
        assert_eq!(format_currency(dec!(999.5), "₹", 0, Indian), "₹1,000");
    }

    #[test]
    fn currency_two_places() {
        assert_eq!(format_currency(dec!(123274.125), "₹", 2, Indian), "₹1,23,274.13");
        assert_eq!(format_currency(dec!(5), "₹", 2, Indian), "₹5.00");
        assert_eq!(format_currency(dec!(123274.125), "$", 2, Western), "$123,274.13");
    }

    #[test]
    fn negative_currency_puts_sign_first() {
        assert_eq!(format_currency(dec!(-1500.4), "₹", 0, Indian), "-₹1,500");
        assert_eq!(format_number(dec!(-1500.4), 0, Indian), "-1,500");
    }

    #[test]
    fn tiny_loss_keeps_its_sign() {
        assert_eq!(format_currency(dec!(-0.4), "₹", 0, Indian), "-₹0");
        assert_eq!(format_signed_currency(dec!(-0.3), "₹", 0, Indian), "-₹0");
        assert_eq!(format_signed_currency(dec!(-0.001), "₹", 2, Indian), "-₹0.00");
        assert_eq!(format_percent(Some(dec!(-0.001))), "-0.00%");
    }

    #[test]
    fn sign_agrees_with_class() {
        for value in [dec!(-0.3), dec!(-0.001), dec!(0), dec!(0.001), dec!(-12.5), dec!(12.5)] {
            let gain = pl_class(value) == "positive";
            assert_eq!(summary_class(value) == "profit", gain);
            assert_eq!(format_signed_currency(value, "₹", 0, Indian).starts_with('+'), gain, "{value}");
            assert_eq!(format_signed_currency(value, "₹", 2, Indian).starts_with('+'), gain, "{value}");
            assert_eq!(format_percent(Some(value)).starts_with('+'), gain, "{value}");
        }
    }

    #[test]
    fn signed_currency() {
        assert_eq!(format_signed_currency(dec!(23274.125), "₹", 2, Indian), "+₹23,274.13");
        assert_eq!(format_signed_currency(dec!(-23274.125), "₹", 0, Indian), "-₹23,274");
        assert_eq!(format_signed_currency(dec!(0), "₹", 0, Indian), "+₹0");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(Some(dec!(23.274125))), "+23.27%");
        assert_eq!(format_percent(Some(dec!(-4.005))), "-4.01%");
        assert_eq!(format_percent(Some(dec!(0))), "+0.00%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn nav_drops_trailing_zeros() {
        assert_eq!(format_nav(dec!(12.50000)), "12.5");
        assert_eq!(format_nav(dec!(395.12340)), "395.1234");
    }

    #[test]
    fn zero_is_classed_as_gain() {
        assert_eq!(pl_class(dec!(0)), "positive");
        assert_eq!(pl_class(dec!(-0.01)), "negative");
        assert_eq!(summary_class(dec!(0)), "profit");
        assert_eq!(summary_class(dec!(-1)), "loss");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"A & B's"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&#39;s&quot;&lt;/b&gt;"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// HTML page
// ═══════════════════════════════════════════════════════════════════

mod page {
    use super::*;

    fn complete_page() -> String {
        render_page(
            &LoadOutcome::Complete(innovation_snapshot()),
            &HtmlOptions::default(),
        )
    }

    #[test]
    fn hero_shows_value_and_change() {
        let page = complete_page();
        assert!(page.contains(r#"id="portfolioValue">₹1,23,274<"#));
        assert!(page.contains(r#"class="pill positive" id="portfolioChange">+23.27%<"#));
    }

    #[test]
    fn holding_row() {
        let page = complete_page();
        assert!(page.contains("SBI Innovation Opportunities Fund - Direct Plan - Growth"));
        assert!(page.contains("Invested: ₹1,00,000"));
        assert!(page.contains("Current: ₹1,23,274"));
        assert!(page.contains("NAV (2024-10-14): ₹12.5"));
        assert!(page.contains(r#"<div class="asset-pl positive">+₹23,274</div>"#));
    }

    #[test]
    fn summary_rows() {
        let page = complete_page();
        assert!(page.contains("Total Invested"));
        assert!(page.contains("<span>₹1,00,000</span>"));
        assert!(page.contains("<span>₹1,23,274.13</span>"));
        assert!(page.contains(r#"<div class="row space profit">"#));
        assert!(page.contains("<span>+₹23,274.13</span>"));
    }

    #[test]
    fn sections_in_order() {
        let page = complete_page();
        let hero = page.find("portfolioValue").unwrap();
        let chart = page.find("portfolioChart").unwrap();
        let holdings = page.find(r#"id="portfolio""#).unwrap();
        let summary = page.find(r#"id="summary""#).unwrap();
        assert!(hero < chart && chart < holdings && holdings < summary);
        assert!(page.contains("NAV data from 2024-09-30 to 2024-10-14"));
    }

    #[test]
    fn loss_uses_negative_classes() {
        let mut snapshot = innovation_snapshot();
        snapshot.summary.net_pl = dec!(-500);
        snapshot.summary.net_pl_percent = Some(dec!(-0.5));
        snapshot.holdings[0].pl = dec!(-500);
        let page = render_page(&LoadOutcome::Complete(snapshot), &HtmlOptions::default());
        assert!(page.contains("pill negative"));
        assert!(page.contains("-0.50%"));
        assert!(page.contains("asset-pl negative"));
        assert!(page.contains("row space loss"));
    }

    #[test]
    fn fractional_loss_renders_as_loss() {
        let mut snapshot = innovation_snapshot();
        snapshot.summary.net_pl = dec!(-0.001);
        snapshot.summary.net_pl_percent = Some(dec!(-0.000001));
        snapshot.holdings[0].pl = dec!(-0.3);
        let page = render_page(&LoadOutcome::Complete(snapshot), &HtmlOptions::default());
        assert!(page.contains(r#"class="pill negative" id="portfolioChange">-0.00%<"#));
        assert!(page.contains(r#"<div class="asset-pl negative">-₹0</div>"#));
        assert!(page.contains(r#"<div class="row space loss">"#));
        assert!(page.contains("<span>-₹0.00</span>"));
        assert!(!page.contains("+₹0"));
    }

    #[test]
    fn western_options_follow_settings() {
        let settings = PortfolioSettings::default().with_grouping(Western);
        let options = HtmlOptions::from_settings(&settings).with_title("My Funds");
        let page = render_page(&LoadOutcome::Complete(innovation_snapshot()), &options);
        assert!(page.contains("<title>My Funds</title>"));
        assert!(page.contains("₹123,274"));
    }

    #[test]
    fn fund_names_are_escaped() {
        let mut snapshot = innovation_snapshot();
        snapshot.holdings[0].display_name = "Banking & PSU <Debt> Fund".into();
        let page = render_page(&LoadOutcome::Complete(snapshot), &HtmlOptions::default());
        assert!(page.contains("Banking &amp; PSU &lt;Debt&gt; Fund"));
        assert!(!page.contains("<Debt>"));
    }

    #[test]
    fn failure_page_shows_statuses_without_totals() {
        let outcome = LoadOutcome::Failed {
            statuses: vec![
                HoldingStatus {
                    fund_name: "SBI Contra Fund".into(),
                    state: HoldingState::Loaded {
                        scheme_name: "SBI Contra Fund - Direct Plan - Growth".into(),
                        latest_date: d(2024, 10, 14),
                    },
                },
                HoldingStatus {
                    fund_name: "Tata Digital India Fund".into(),
                    state: HoldingState::Failed {
                        reason: "Network error: timed out".into(),
                    },
                },
            ],
            error: "Network error: timed out".into(),
        };
        let page = render_page(&outcome, &HtmlOptions::default());

        assert!(page.contains("Portfolio could not be loaded."));
        assert!(page.contains("SBI Contra Fund - Direct Plan - Growth (NAV 2024-10-14)"));
        assert!(page.contains("Tata Digital India Fund"));
        assert!(page.contains(r#"<span class="negative">Network error: timed out</span>"#));
        assert!(!page.contains("Total Invested"));
        assert!(!page.contains("portfolioValue"));
        assert!(!page.contains("<svg"));
        assert!(!page.contains('₹'));
    }
}

// ═══════════════════════════════════════════════════════════════════
// SVG chart
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn empty_series_renders_placeholder() {
        let html = render_history_chart(&ChartSeries::default(), "₹", Indian);
        assert_eq!(html, r#"<div class="chart-empty">No history available</div>"#);
    }

    #[test]
    fn renders_line_and_tooltips() {
        let svg = render_history_chart(&innovation_snapshot().history, "₹", Indian);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains(r##"stroke="#f5c542""##));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("<title>2024-10-14: ₹1,23,274</title>"));
        assert!(svg.contains("<title>2024-10-01: ₹99,601</title>"));
    }

    #[test]
    fn single_point_is_drawn() {
        let mut series = ChartSeries::default();
        series.push(d(2024, 10, 1), dec!(10));
        let svg = render_history_chart(&series, "₹", Indian);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn ticks_include_both_ends() {
        assert_eq!(tick_indices(0), Vec::<usize>::new());
        assert_eq!(tick_indices(3), vec![0, 1, 2]);
        assert_eq!(tick_indices(10), vec![0, 3, 6, 9]);
        assert_eq!(tick_indices(5), vec![0, 1, 2, 4]);
    }

    #[test]
    fn long_series_limits_labels() {
        let mut series = ChartSeries::default();
        for day in 1..=20 {
            series.push(d(2024, 10, day), dec!(100) + Decimal::from(day));
        }
        let svg = render_history_chart(&series, "₹", Indian);
        assert_eq!(svg.matches("<text").count(), 4);
        assert!(svg.contains(">2024-10-01<"));
        assert!(svg.contains(">2024-10-20<"));
    }
}
