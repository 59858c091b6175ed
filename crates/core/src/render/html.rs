use rust_decimal::Decimal;

use crate::models::analytics::{HoldingState, HoldingStatus, HoldingValuation, LoadOutcome, PortfolioSnapshot, PortfolioSummary};
use crate::models::settings::{NumberGrouping, PortfolioSettings};
use super::chart::render_history_chart;
use super::escape_html;
use super::format::{
    format_currency, format_nav, format_percent, format_signed_currency, pl_class, summary_class,
};

const STYLE: &str = r#"
body{margin:0;background:#0f172a;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#e5e7eb}
.container{max-width:720px;margin:0 auto;padding:24px}
.hero{margin-bottom:16px}
.hero .value{font-size:32px;font-weight:700}
.pill{display:inline-block;padding:2px 10px;border-radius:999px;font-size:14px;margin-top:6px}
.pill.positive{background:#064e3b;color:#34d399}
.pill.negative{background:#7f1d1d;color:#f87171}
.card{background:#fff;color:#111827;border-radius:16px;padding:16px;margin-bottom:16px}
.chart-box{height:240px}
.chart-box svg{width:100%;height:100%}
.asset{display:flex;justify-content:space-between;align-items:center;padding:12px 0;border-bottom:1px solid #1f2937}
.asset-name{font-weight:600}
.asset-meta span{margin-right:12px;font-size:13px;color:#9ca3af}
.label{font-size:12px;color:#9ca3af}
.asset-pl{font-weight:600}
.positive{color:#22c55e}
.negative{color:#ef4444}
.row{display:flex;padding:6px 0}
.space{justify-content:space-between}
.profit{color:#22c55e}
.loss{color:#ef4444}
.error-banner{background:#7f1d1d;color:#fecaca;border-radius:12px;padding:12px;margin-bottom:16px}
.status{display:flex;justify-content:space-between;padding:8px 0;border-bottom:1px solid #1f2937}
"#;

/// Page presentation settings.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title: String,
    pub currency_symbol: String,
    pub grouping: NumberGrouping,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "Mutual Fund Portfolio".to_string(),
            currency_symbol: "₹".to_string(),
            grouping: NumberGrouping::Indian,
        }
    }
}

impl HtmlOptions {
    pub fn from_settings(settings: &PortfolioSettings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            grouping: settings.grouping,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn money(&self, value: Decimal, dp: u32) -> String {
        escape_html(&format_currency(value, &self.currency_symbol, dp, self.grouping))
    }

    fn signed_money(&self, value: Decimal, dp: u32) -> String {
        escape_html(&format_signed_currency(value, &self.currency_symbol, dp, self.grouping))
    }
}

/// Render a whole page for a load outcome.
///
/// A failed load shows which holdings could not be loaded and nothing else:
/// no totals, no holding values, no chart.
pub fn render_page(outcome: &LoadOutcome, options: &HtmlOptions) -> String {
    let body = match outcome {
        LoadOutcome::Complete(snapshot) => render_snapshot(snapshot, options),
        LoadOutcome::Failed { statuses, error } => render_failure(statuses, error),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="container">
{body}
</div>
</body>
</html>
"#,
        title = escape_html(&options.title),
        style = STYLE,
        body = body
    )
}

/// Headline value, change pill, chart, holdings and summary rows.
pub fn render_snapshot(snapshot: &PortfolioSnapshot, options: &HtmlOptions) -> String {
    let summary = &snapshot.summary;
    let mut html = String::new();

    html.push_str(&render_hero(summary, options));
    html.push_str(&format!(
        r#"<div class="card chart-box" id="portfolioChart">{}</div>"#,
        render_history_chart(&snapshot.history, &options.currency_symbol, options.grouping)
    ));

    html.push_str(r#"<div id="portfolio">"#);
    for holding in &snapshot.holdings {
        html.push_str(&render_holding(holding, options));
    }
    html.push_str("</div>");

    html.push_str(&render_summary(summary, options));
    html.push_str(&format!(
        r#"<div class="label">NAV data from {cutoff} to {as_of}</div>"#,
        cutoff = snapshot.cutoff.format("%Y-%m-%d"),
        as_of = snapshot.as_of.format("%Y-%m-%d")
    ));
    html
}

fn render_hero(summary: &PortfolioSummary, options: &HtmlOptions) -> String {
    format!(
        r#"<div class="hero"><div class="label">Portfolio Value</div><div class="value" id="portfolioValue">{value}</div><div class="pill {class}" id="portfolioChange">{change}</div></div>"#,
        value = options.money(summary.total_current, 0),
        class = pl_class(summary.net_pl),
        change = format_percent(summary.net_pl_percent)
    )
}

/// One row of the holdings list.
pub fn render_holding(holding: &HoldingValuation, options: &HtmlOptions) -> String {
    format!(
        r#"<div class="asset">
  <div class="asset-left">
    <div class="asset-name">{name}</div>
    <div class="asset-meta">
      <span>Invested: {invested}</span>
      <span>Current: {current}</span>
    </div>
    <div class="label">NAV ({date}): {symbol}{nav}</div>
  </div>
  <div class="asset-pl {class}">{pl}</div>
</div>
"#,
        name = escape_html(&holding.display_name),
        invested = options.money(holding.invested, 0),
        current = options.money(holding.current_value, 0),
        date = holding.latest_date.format("%Y-%m-%d"),
        symbol = escape_html(&options.currency_symbol),
        nav = format_nav(holding.latest_nav),
        class = pl_class(holding.pl),
        pl = options.signed_money(holding.pl, 0)
    )
}

/// Total invested, current value and net P&L rows.
pub fn render_summary(summary: &PortfolioSummary, options: &HtmlOptions) -> String {
    format!(
        r#"<div class="card" id="summary">
  <div class="row space">
    <span class="label">Total Invested</span>
    <span>{invested}</span>
  </div>
  <div class="row space">
    <span class="label">Current Value</span>
    <span>{current}</span>
  </div>
  <div class="row space {class}">
    <span>Net P/L</span>
    <span>{pl}</span>
  </div>
</div>
"#,
        invested = options.money(summary.total_invested, 0),
        current = options.money(summary.total_current, 2),
        class = summary_class(summary.net_pl),
        pl = options.signed_money(summary.net_pl, 2)
    )
}

fn render_failure(statuses: &[HoldingStatus], error: &str) -> String {
    let mut html = format!(
        r#"<div class="error-banner">Portfolio could not be loaded. {}</div><div id="portfolio">"#,
        escape_html(error)
    );
    for status in statuses {
        let (detail, class) = match &status.state {
            HoldingState::Loaded { scheme_name, latest_date } => (
                format!("{} (NAV {})", scheme_name, latest_date.format("%Y-%m-%d")),
                "positive",
            ),
            HoldingState::Failed { reason } => (reason.clone(), "negative"),
        };
        html.push_str(&format!(
            r#"<div class="status"><span class="asset-name">{name}</span><span class="{class}">{detail}</span></div>"#,
            name = escape_html(&status.fund_name),
            class = class,
            detail = escape_html(&detail)
        ));
    }
    html.push_str("</div>");
    html
}
