//! Excel rendering of an [`EstimateReport`].

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::utility::row_col_to_cell;
use rust_xlsxwriter::{Chart, ChartType, ColNum, Format, Formula, RowNum, Workbook, Worksheet};
use tracing::{debug, info};

use super::{CurrencyTotals, EstimateReport, TradeSheet};
use crate::error::ReportError;
use crate::models::config::ReportConfig;
use crate::models::estimate::{LineItem, CURRENCY_COLUMNS, HEADERS};

type Result<T> = std::result::Result<T, ReportError>;

/// First currency column on the line item sheets.
const FIRST_AMOUNT_COL: ColNum = 3;
/// RCV column on the line item sheets.
const RCV_COL: ColNum = 6;
/// RCV column on the totals sheet.
const TOTALS_RCV_COL: ColNum = 4;
/// Rows between the last totals row and the chart.
const CHART_GAP_ROWS: RowNum = 2;
const CHART_WIDTH: u32 = 605;
const CHART_HEIGHT: u32 = 378;

/// Writes the trade workbook: a master sheet, one sheet per trade, and a
/// totals sheet with an RCV pie chart.
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    master_sheet: String,
    totals_sheet: String,
    chart_title: String,
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self::from_config(&ReportConfig::default())
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            master_sheet: config.master_sheet.clone(),
            totals_sheet: config.totals_sheet.clone(),
            chart_title: config.chart_title.clone(),
        }
    }

    /// Render the report and save it to `path`.
    pub fn write(&self, report: &EstimateReport, path: &Path) -> Result<()> {
        let mut workbook = self.build_workbook(report)?;
        workbook.save(path)?;
        info!(
            "Wrote {} line items across {} trades to {}",
            report.master.len(),
            report.trades.len(),
            path.display()
        );
        Ok(())
    }

    /// Render the report into an in-memory workbook.
    pub fn build_workbook(&self, report: &EstimateReport) -> Result<Workbook> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();

        let mut master = Worksheet::new();
        master.set_name(&self.master_sheet)?;
        write_items(&mut master, &report.master, &styles)?;
        master.autofit();
        workbook.push_worksheet(master);

        for sheet in &report.trades {
            debug!("Writing sheet {} ({} items)", sheet.sheet_name, sheet.items.len());
            let mut worksheet = Worksheet::new();
            worksheet.set_name(&sheet.sheet_name)?;
            write_trade(&mut worksheet, sheet, report.budget_ratio, &styles)?;
            worksheet.autofit();
            workbook.push_worksheet(worksheet);
        }

        let mut totals = Worksheet::new();
        totals.set_name(&self.totals_sheet)?;
        self.write_totals(&mut totals, report, &styles)?;
        totals.autofit();
        workbook.push_worksheet(totals);

        Ok(workbook)
    }

    fn write_totals(
        &self,
        worksheet: &mut Worksheet,
        report: &EstimateReport,
        styles: &Styles,
    ) -> Result<()> {
        worksheet.write_string_with_format(0, 0, "TRADE", &styles.bold)?;
        for (i, header) in CURRENCY_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, 1 + i as ColNum, *header, &styles.bold)?;
        }
        let budget_col = 1 + CURRENCY_COLUMNS.len() as ColNum;
        worksheet.write_string_with_format(0, budget_col, "BUDGET", &styles.bold)?;

        let mut row: RowNum = 1;
        for sheet in &report.trades {
            worksheet.write_string(row, 0, &sheet.trade)?;
            write_amounts(worksheet, row, 1, &sheet.totals, &styles.money)?;
            worksheet.write_number_with_format(
                row,
                budget_col,
                to_f64(sheet.budget),
                &styles.money,
            )?;
            row += 1;
        }

        let grand_row = row;
        worksheet.write_string_with_format(grand_row, 0, "GRAND TOTAL", &styles.bold)?;
        write_amounts(worksheet, grand_row, 1, &report.grand_total, &styles.bold_money)?;
        worksheet.write_number_with_format(
            grand_row,
            budget_col,
            to_f64(report.grand_budget),
            &styles.bold_money,
        )?;

        // The grand total row stays out of the chart.
        let last_trade_row = grand_row - 1;
        let mut chart = Chart::new(ChartType::Pie);
        chart
            .add_series()
            .set_name((self.totals_sheet.as_str(), 0, TOTALS_RCV_COL))
            .set_categories((self.totals_sheet.as_str(), 1, 0, last_trade_row, 0))
            .set_values((
                self.totals_sheet.as_str(),
                1,
                TOTALS_RCV_COL,
                last_trade_row,
                TOTALS_RCV_COL,
            ));
        chart.title().set_name(self.chart_title.as_str());
        chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);

        worksheet.insert_chart(grand_row + 1 + CHART_GAP_ROWS, 2, &chart)?;
        Ok(())
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

struct Styles {
    bold: Format,
    money: Format,
    bold_money: Format,
}

impl Styles {
    fn new() -> Self {
        let money = Format::new().set_num_format("#,##0.00");
        Self {
            bold: Format::new().set_bold(),
            bold_money: money.clone().set_bold(),
            money,
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn write_amounts(
    worksheet: &mut Worksheet,
    row: RowNum,
    first_col: ColNum,
    totals: &CurrencyTotals,
    format: &Format,
) -> Result<()> {
    for (i, amount) in totals.amounts().into_iter().enumerate() {
        worksheet.write_number_with_format(row, first_col + i as ColNum, to_f64(amount), format)?;
    }
    Ok(())
}

/// Header row plus one row per item. Returns the next free row.
fn write_items(worksheet: &mut Worksheet, items: &[LineItem], styles: &Styles) -> Result<RowNum> {
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, *header, &styles.bold)?;
    }

    let mut row: RowNum = 1;
    for item in items {
        worksheet.write_string(row, 0, &item.description)?;
        worksheet.write_string(row, 1, &item.trade)?;
        worksheet.write_string(row, 2, &item.quantity_unit)?;
        for (i, amount) in item.amounts().into_iter().enumerate() {
            worksheet.write_number_with_format(
                row,
                FIRST_AMOUNT_COL + i as ColNum,
                to_f64(amount),
                &styles.money,
            )?;
        }
        row += 1;
    }

    Ok(row)
}

/// Item rows, then a TOTAL row and a TOTAL BUDGET row computed from it.
fn write_trade(
    worksheet: &mut Worksheet,
    sheet: &TradeSheet,
    budget_ratio: Decimal,
    styles: &Styles,
) -> Result<()> {
    let total_row = write_items(worksheet, &sheet.items, styles)?;

    worksheet.write_string_with_format(total_row, 1, "TOTAL", &styles.bold)?;
    write_amounts(worksheet, total_row, FIRST_AMOUNT_COL, &sheet.totals, &styles.bold_money)?;

    let budget_row = total_row + 1;
    let budget = sheet.budget.round_dp(2);
    let formula = Formula::new(format!(
        "={}*{}",
        row_col_to_cell(total_row, RCV_COL),
        budget_ratio.normalize()
    ))
    .set_result(budget.to_string());

    worksheet.write_string_with_format(budget_row, 1, "TOTAL BUDGET", &styles.bold)?;
    worksheet.write_formula_with_format(budget_row, RCV_COL, formula, &styles.bold_money)?;
    Ok(())
}
