//! Human-readable rendering of backtest reports and price alerts.
//! Pure formatting; carries no state.

use std::fmt::Write;

use common::{AlertEvent, StrategyReport};

/// Render one report line per strategy, win rate to one decimal place.
pub fn render_reports(reports: &[StrategyReport]) -> String {
    let mut out = String::from("=== Strategy Backtest ===\n");
    for report in reports {
        let _ = writeln!(
            out,
            "{}: {} signals, win rate {:.1}% ({}/{})",
            report.strategy_id,
            report.signal_count,
            report.win_rate,
            report.wins,
            report.signal_count,
        );
    }
    out
}

/// Render the alert message handed to the external notifier.
pub fn render_alert(alert: &AlertEvent) -> String {
    let arrow = if alert.change > 0.0 { "↑" } else { "↓" };
    let sign = if alert.change > 0.0 { "+" } else { "" };
    let mut out = format!(
        "PRICE ALERT\n\
         {}\n\
         Price: {:.1}% {arrow} {:.1}%\n\
         Change: {sign}{}%\n",
        alert.market,
        alert.old_price * 100.0,
        alert.new_price * 100.0,
        alert.change_pct,
    );
    if let Some(url) = &alert.url {
        let _ = writeln!(out, "URL: {url}");
    }
    out
}
