//! Contractor summary printed after a conversion.

use console::style;
use rust_decimal::Decimal;

use xact_core::estimate::rules::format_amount;
use xact_core::report::{ContractorSummary, EstimateReport};

pub fn print(report: &EstimateReport) {
    let summary = report.summary();

    println!();
    println!("{}", style("Contractor Summary").bold());
    for line in summary_lines(&summary, report.budget_ratio) {
        println!("  {}", line);
    }

    println!();
    println!("{}", style("By Trade").bold());
    for sheet in &report.trades {
        println!(
            "  {:<32} {:>14}  {} {:>14}",
            sheet.trade,
            format_amount(sheet.totals.rcv),
            style("budget").dim(),
            format_amount(sheet.budget),
        );
    }
}

fn summary_lines(summary: &ContractorSummary, budget_ratio: Decimal) -> Vec<String> {
    let held_back = match summary.held_back_percent {
        Some(percent) => format!(
            "{} ({}% of RCV)",
            format_amount(summary.depreciation),
            percent.round_dp(1)
        ),
        None => format_amount(summary.depreciation),
    };

    vec![
        format!("Initial check (ACV):      {}", format_amount(summary.acv)),
        format!("Total job value (RCV):    {}", format_amount(summary.rcv)),
        format!("Held back until complete: {}", held_back),
        format!(
            "Budget ({}% of RCV):      {}",
            (budget_ratio * Decimal::ONE_HUNDRED).normalize(),
            format_amount(summary.budget)
        ),
    ]
}
