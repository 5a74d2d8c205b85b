//! Estimate line item model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column headers of the line item table, in output order.
pub const HEADERS: [&str; 9] = [
    "DESCRIPTION",
    "TRADE",
    "QUANTITY",
    "UNIT PRICE",
    "TAX",
    "O&P",
    "RCV",
    "DEPREC.",
    "ACV",
];

/// The six currency columns, in output order.
pub const CURRENCY_COLUMNS: [&str; 6] = ["UNIT PRICE", "TAX", "O&P", "RCV", "DEPREC.", "ACV"];

/// Unit-of-measure codes seen on Xactimate estimates.
pub const KNOWN_UNITS: &[&str] = &[
    "SF", "LF", "EA", "HR", "DA", "SY", "SQ", "CF", "CY", "GL", "LS", "MO", "WK", "RL", "TN",
];

/// Carrier layout a line item was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierTemplate {
    /// Age/life and inline condition with tax and O&P.
    WithAgeLife,
    /// Condition rating printed on the line after the amounts (State Farm).
    ConditionOnNextLine,
    /// Tax column without O&P (State Farm/Travelers).
    TaxNoOverhead,
    /// Neither tax nor O&P (Allstate).
    NoTaxNoOverhead,
    /// Amounts only, no age/life or condition.
    Simple,
    /// Quantity and unit as separate tokens, depreciation in angle brackets.
    AngleBrackets,
}

impl CarrierTemplate {
    /// Stable short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WithAgeLife => "with_age_life",
            Self::ConditionOnNextLine => "state_farm",
            Self::TaxNoOverhead => "tax_no_op",
            Self::NoTaxNoOverhead => "no_tax_op",
            Self::Simple => "simple",
            Self::AngleBrackets => "angle_brackets",
        }
    }
}

impl fmt::Display for CarrierTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single priced line of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description with the leading item number, e.g. "1. Remove carpet".
    pub description: String,

    /// Trade category, or "Other".
    pub trade: String,

    /// Quantity glued to its unit code, e.g. "13.49SQ".
    pub quantity_unit: String,

    /// Price per unit.
    pub unit_price: Decimal,

    /// Sales tax.
    pub tax: Decimal,

    /// Overhead and profit.
    pub overhead_profit: Decimal,

    /// Replacement cost value.
    pub rcv: Decimal,

    /// Depreciation withheld.
    pub depreciation: Decimal,

    /// Actual cash value.
    pub acv: Decimal,

    /// Layout the record was matched with.
    pub template: CarrierTemplate,
}

impl LineItem {
    /// Unit code part of `quantity_unit`.
    pub fn unit(&self) -> &str {
        let split = self
            .quantity_unit
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(self.quantity_unit.len());
        &self.quantity_unit[split..]
    }

    /// Numeric part of `quantity_unit`.
    pub fn quantity(&self) -> Option<Decimal> {
        let unit_len = self.unit().len();
        let number = &self.quantity_unit[..self.quantity_unit.len() - unit_len];
        Decimal::from_str(&number.replace(',', "")).ok()
    }

    /// The six currency amounts in column order.
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

    /// Render the item as one output row, matching [`HEADERS`].
    pub fn to_row(&self) -> [String; 9] {
        let [unit_price, tax, op, rcv, dep, acv] = self.amounts().map(|a| format!("{:.2}", a));
        [
            self.description.clone(),
            self.trade.clone(),
            self.quantity_unit.clone(),
            unit_price,
            tax,
            op,
            rcv,
            dep,
            acv,
        ]
    }

    /// Check the item for internal consistency.
    ///
    /// Returns a list of issues; the item is never modified.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.rcv - self.depreciation != self.acv {
            issues.push(format!(
                "ACV {} does not equal RCV {} minus depreciation {}",
                self.acv, self.rcv, self.depreciation
            ));
        }

        if !KNOWN_UNITS.contains(&self.unit()) {
            issues.push(format!("unrecognized unit code: {}", self.unit()));
        }

        if self.quantity().is_none() {
            issues.push(format!("unreadable quantity: {}", self.quantity_unit));
        }

        issues
    }
}
