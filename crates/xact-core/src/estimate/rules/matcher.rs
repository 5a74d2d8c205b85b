//! Record matching against the bank of carrier templates.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::trace;

use crate::error::ExtractionError;
use crate::models::estimate::{CarrierTemplate, LineItem};

use super::amounts::parse_amount;
use super::patterns::{
    ANGLE_BRACKETS, CONDITION_ON_NEXT_LINE, NO_TAX_NO_OVERHEAD, SIMPLE, TAX_NO_OVERHEAD,
    WHITESPACE_RUN, WITH_AGE_LIFE,
};
use super::trades::classify;

/// Which optional amount columns a template carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// Both tax and overhead & profit.
    TaxAndOverhead,
    /// Tax only.
    TaxOnly,
    /// Neither column.
    Neither,
}

impl FieldLayout {
    pub fn has_tax(self) -> bool {
        matches!(self, Self::TaxAndOverhead | Self::TaxOnly)
    }

    pub fn has_overhead(self) -> bool {
        matches!(self, Self::TaxAndOverhead)
    }
}

/// One carrier template: its structural pattern and column layout.
#[derive(Debug)]
pub struct PatternDescriptor {
    pub template: CarrierTemplate,
    pub pattern: &'static Regex,
    pub layout: FieldLayout,
}

lazy_static! {
    /// Templates in priority order. They overlap, so the first match wins.
    pub static ref PATTERN_BANK: [PatternDescriptor; 6] = [
        PatternDescriptor {
            template: CarrierTemplate::WithAgeLife,
            pattern: &WITH_AGE_LIFE,
            layout: FieldLayout::TaxAndOverhead,
        },
        PatternDescriptor {
            template: CarrierTemplate::ConditionOnNextLine,
            pattern: &CONDITION_ON_NEXT_LINE,
            layout: FieldLayout::TaxAndOverhead,
        },
        PatternDescriptor {
            template: CarrierTemplate::TaxNoOverhead,
            pattern: &TAX_NO_OVERHEAD,
            layout: FieldLayout::TaxOnly,
        },
        PatternDescriptor {
            template: CarrierTemplate::NoTaxNoOverhead,
            pattern: &NO_TAX_NO_OVERHEAD,
            layout: FieldLayout::Neither,
        },
        PatternDescriptor {
            template: CarrierTemplate::Simple,
            pattern: &SIMPLE,
            layout: FieldLayout::TaxAndOverhead,
        },
        PatternDescriptor {
            template: CarrierTemplate::AngleBrackets,
            pattern: &ANGLE_BRACKETS,
            layout: FieldLayout::TaxAndOverhead,
        },
    ];
}

/// Typed fields of a matched record, before trade classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMatch {
    pub template: CarrierTemplate,
    pub description: String,
    pub quantity_unit: String,
    pub unit_price: Decimal,
    pub tax: Decimal,
    pub overhead_profit: Decimal,
    pub rcv: Decimal,
    pub depreciation: Decimal,
    pub acv: Decimal,
}

impl RecordMatch {
    /// Whether the record's condition rating sits on the following line.
    pub fn has_trailing_condition(&self) -> bool {
        self.template == CarrierTemplate::ConditionOnNextLine
    }

    /// Classify the record and turn it into a line item.
    pub fn into_line_item(self) -> LineItem {
        let trade = classify(&self.description).to_string();
        LineItem {
            description: self.description,
            trade,
            quantity_unit: self.quantity_unit,
            unit_price: self.unit_price,
            tax: self.tax,
            overhead_profit: self.overhead_profit,
            rcv: self.rcv,
            depreciation: self.depreciation,
            acv: self.acv,
            template: self.template,
        }
    }
}

impl PatternDescriptor {
    fn extract(&self, caps: &Captures<'_>) -> Result<RecordMatch, ExtractionError> {
        let amount = |name: &str| parse_amount(name, &caps[name]);
        let optional = |present: bool, name: &str| {
            if present {
                amount(name)
            } else {
                Ok(Decimal::ZERO)
            }
        };

        let description = WHITESPACE_RUN.replace_all(caps["description"].trim(), " ");

        Ok(RecordMatch {
            template: self.template,
            description: format!("{} {}", &caps["number"], description),
            quantity_unit: format!("{}{}", &caps["quantity"], &caps["unit"]),
            unit_price: amount("unit_price")?,
            tax: optional(self.layout.has_tax(), "tax")?,
            overhead_profit: optional(self.layout.has_overhead(), "overhead")?,
            rcv: amount("rcv")?,
            depreciation: amount("depreciation")?,
            acv: amount("acv")?,
        })
    }
}

/// Match a joined candidate against the templates in priority order.
///
/// Returns `Ok(None)` when no template matches, and an error when a template
/// matches but one of its amounts is not a valid number.
pub fn match_record(candidate: &str) -> Result<Option<RecordMatch>, ExtractionError> {
    for descriptor in PATTERN_BANK.iter() {
        if let Some(caps) = descriptor.pattern.captures(candidate) {
            trace!("Matched {} template: {}", descriptor.template, &caps[0]);
            return descriptor.extract(&caps).map(Some);
        }
    }

    Ok(None)
}
