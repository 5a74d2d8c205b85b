//! Trade report model: per-trade subtotals, grand totals and budget.

pub mod xlsx;

pub use xlsx::XlsxWriter;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ReportError;
use crate::models::estimate::LineItem;

/// Maximum length of a worksheet name.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Column-wise sums of the six currency columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurrencyTotals {
    pub unit_price: Decimal,
    pub tax: Decimal,
    pub overhead_profit: Decimal,
    pub rcv: Decimal,
    pub depreciation: Decimal,
    pub acv: Decimal,
}

impl CurrencyTotals {
    /// Sum the amounts of a set of items.
    pub fn of_items<'a>(
        items: impl IntoIterator<Item = &'a LineItem>,
    ) -> Result<Self, ReportError> {
        items
            .into_iter()
            .try_fold(Self::default(), |totals, item| {
                totals.checked_add(&Self::of_item(item))
            })
    }

    fn of_item(item: &LineItem) -> Self {
        Self {
            unit_price: item.unit_price,
            tax: item.tax,
            overhead_profit: item.overhead_profit,
            rcv: item.rcv,
            depreciation: item.depreciation,
            acv: item.acv,
        }
    }

    /// Column-wise sum, failing if any column overflows.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ReportError> {
        let add = |column: &'static str, a: Decimal, b: Decimal| {
            a.checked_add(b).ok_or(ReportError::Overflow(column))
        };

        Ok(Self {
            unit_price: add("unit price", self.unit_price, other.unit_price)?,
            tax: add("tax", self.tax, other.tax)?,
            overhead_profit: add("O&P", self.overhead_profit, other.overhead_profit)?,
            rcv: add("RCV", self.rcv, other.rcv)?,
            depreciation: add("depreciation", self.depreciation, other.depreciation)?,
            acv: add("ACV", self.acv, other.acv)?,
        })
    }

    /// The six totals in column order.
    pub fn amounts(&self) -> [Decimal; 6] {
        [
            self.unit_price,
            self.tax,
            self.overhead_profit,
            self.rcv,
            self.depreciation,
            self.acv,
        ]
    }

    /// Budget for these totals: RCV times the ratio.
    pub fn budget(&self, ratio: Decimal) -> Result<Decimal, ReportError> {
        self.rcv
            .checked_mul(ratio)
            .ok_or(ReportError::Overflow("budget"))
    }
}

/// Line items of one trade with their subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct TradeSheet {
    /// Trade category name.
    pub trade: String,
    /// Worksheet name (trade name cut to the spreadsheet limit).
    pub sheet_name: String,
    /// Items of this trade in extraction order.
    pub items: Vec<LineItem>,
    /// Column-wise totals.
    pub totals: CurrencyTotals,
    /// RCV total times the budget ratio.
    pub budget: Decimal,
}

/// Headline figures for the contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractorSummary {
    /// Initial check (actual cash value).
    pub acv: Decimal,
    /// Total job value (replacement cost value).
    pub rcv: Decimal,
    /// Depreciation held back until completion.
    pub depreciation: Decimal,
    /// Held-back share of RCV in percent, when anything is held back.
    pub held_back_percent: Option<Decimal>,
    /// Budget for the job.
    pub budget: Decimal,
}

/// Everything needed to render the trade workbook.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    /// Every line item in extraction order.
    pub master: Vec<LineItem>,
    /// One sheet per trade, sorted by trade name.
    pub trades: Vec<TradeSheet>,
    /// Sum over all trades.
    pub grand_total: CurrencyTotals,
    /// Budget over all trades.
    pub grand_budget: Decimal,
    /// Share of RCV budgeted.
    pub budget_ratio: Decimal,
}

impl EstimateReport {
    /// Group items by trade and compute totals.
    ///
    /// An empty item list is refused; callers should check the extraction
    /// status before building a report.
    pub fn build(items: &[LineItem], budget_ratio: Decimal) -> Result<Self, ReportError> {
        if items.is_empty() {
            return Err(ReportError::Empty);
        }

        let mut by_trade: BTreeMap<&str, Vec<LineItem>> = BTreeMap::new();
        for item in items {
            by_trade
                .entry(item.trade.as_str())
                .or_default()
                .push(item.clone());
        }

        let trades = by_trade
            .into_iter()
            .map(|(trade, items)| {
                let totals = CurrencyTotals::of_items(&items)?;
                Ok(TradeSheet {
                    trade: trade.to_string(),
                    sheet_name: sheet_name(trade),
                    budget: totals.budget(budget_ratio)?,
                    totals,
                    items,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let grand_total = trades
            .iter()
            .try_fold(CurrencyTotals::default(), |total, sheet| {
                total.checked_add(&sheet.totals)
            })?;

        Ok(Self {
            master: items.to_vec(),
            trades,
            grand_budget: grand_total.budget(budget_ratio)?,
            grand_total,
            budget_ratio,
        })
    }

    /// Headline figures over the whole estimate.
    pub fn summary(&self) -> ContractorSummary {
        let total = &self.grand_total;
        let held_back_percent = if total.depreciation.is_zero() || total.rcv.is_zero() {
            None
        } else {
            Some(total.depreciation / total.rcv * Decimal::ONE_HUNDRED)
        };

        ContractorSummary {
            acv: total.acv,
            rcv: total.rcv,
            depreciation: total.depreciation,
            held_back_percent,
            budget: self.grand_budget,
        }
    }
}

/// Cut a trade name down to a valid worksheet name.
pub fn sheet_name(trade: &str) -> String {
    trade.chars().take(MAX_SHEET_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::estimate::CarrierTemplate;

    fn item(description: &str, trade: &str, rcv: Decimal, dep: Decimal) -> LineItem {
        LineItem {
            description: description.to_string(),
            trade: trade.to_string(),
            quantity_unit: "1.00EA".to_string(),
            unit_price: rcv,
            tax: dec!(1.00),
            overhead_profit: dec!(2.00),
            rcv,
            depreciation: dep,
            acv: rcv - dep,
            template: CarrierTemplate::Simple,
        }
    }

    fn sample() -> Vec<LineItem> {
        vec![
            item("1. Paint walls", "Painting", dec!(100.00), dec!(10.00)),
            item("2. Drywall patch", "Drywall", dec!(50.00), dec!(0.00)),
            item("3. Paint ceiling", "Painting", dec!(200.00), dec!(20.00)),
        ]
    }

    #[test]
    fn test_build_groups_by_sorted_trade() {
        let report = EstimateReport::build(&sample(), dec!(0.6)).unwrap();

        let names: Vec<&str> = report.trades.iter().map(|t| t.trade.as_str()).collect();
        assert_eq!(names, vec!["Drywall", "Painting"]);

        let painting = &report.trades[1];
        let descriptions: Vec<&str> = painting.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, vec!["1. Paint walls", "3. Paint ceiling"]);
        assert_eq!(painting.totals.rcv, dec!(300.00));
        assert_eq!(painting.totals.tax, dec!(2.00));
        assert_eq!(painting.totals.acv, dec!(270.00));
        assert_eq!(painting.budget, dec!(180.000));
        assert_eq!(report.master.len(), 3);
    }

    #[test]
    fn test_grand_total_sums_trades() {
        let report = EstimateReport::build(&sample(), dec!(0.6)).unwrap();

        assert_eq!(
            report.grand_total,
            CurrencyTotals {
                unit_price: dec!(350.00),
                tax: dec!(3.00),
                overhead_profit: dec!(6.00),
                rcv: dec!(350.00),
                depreciation: dec!(30.00),
                acv: dec!(320.00),
            }
        );
        assert_eq!(report.grand_budget, dec!(210.00));
    }

    #[test]
    fn test_summary() {
        let summary = EstimateReport::build(&sample(), dec!(0.6)).unwrap().summary();

        assert_eq!(summary.acv, dec!(320.00));
        assert_eq!(summary.rcv, dec!(350.00));
        assert_eq!(summary.depreciation, dec!(30.00));
        assert_eq!(summary.budget, dec!(210.00));
        assert_eq!(summary.held_back_percent.map(|p| p.round_dp(2)), Some(dec!(8.57)));
    }

    #[test]
    fn test_summary_without_depreciation() {
        let items = vec![item("1. Drywall patch", "Drywall", dec!(50.00), dec!(0.00))];
        let summary = EstimateReport::build(&items, dec!(0.6)).unwrap().summary();
        assert_eq!(summary.held_back_percent, None);
    }

    #[test]
    fn test_empty_report_refused() {
        assert!(matches!(
            EstimateReport::build(&[], dec!(0.6)),
            Err(ReportError::Empty)
        ));
    }

    #[test]
    fn test_overflowing_totals_refused() {
        let items = vec![
            item("1. Paint walls", "Painting", Decimal::MAX, dec!(0)),
            item("2. Paint ceiling", "Painting", Decimal::MAX, dec!(0)),
        ];
        assert!(matches!(
            EstimateReport::build(&items, dec!(0.6)),
            Err(ReportError::Overflow("unit price"))
        ));

        let sheets = [
            CurrencyTotals {
                rcv: Decimal::MAX,
                ..CurrencyTotals::default()
            },
            CurrencyTotals {
                rcv: dec!(1),
                ..CurrencyTotals::default()
            },
        ];
        assert!(matches!(
            sheets[0].checked_add(&sheets[1]),
            Err(ReportError::Overflow("RCV"))
        ));
        assert!(matches!(
            sheets[0].budget(dec!(2)),
            Err(ReportError::Overflow("budget"))
        ));
    }

    #[test]
    fn test_sheet_name_truncated() {
        assert_eq!(sheet_name("Painting"), "Painting");
        let long = "Baseboards, Trim, Casing and Millwork Extras";
        assert_eq!(sheet_name(long).chars().count(), MAX_SHEET_NAME_LEN);
    }
}
