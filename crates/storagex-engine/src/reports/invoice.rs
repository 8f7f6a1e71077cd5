//! Invoice reports

#![allow(clippy::result_large_err)]

use super::elapsed_ms;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::Add;
use storagex_core::mapping::Value;
use storagex_core::model::InvoiceItem;
use storagex_core::{log_op_end, log_op_error, log_op_start, sql};
use storagex_store::errors::Result;
use storagex_store::{InvoiceItemRepository, InvoiceRepository};

const INVOICES_IN_RANGE_SQL: &str = "SELECT * FROM invoice WHERE date >= ? AND date < ?";

/// Amount and volume summed over invoice lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InvoiceSummary {
    /// Sum of `round(price * volume)` per line
    pub amount: i64,
    pub volume: f64,
}

impl InvoiceSummary {
    fn of(line: &InvoiceItem) -> Self {
        Self {
            amount: line.amount(),
            volume: line.volume,
        }
    }
}

impl Add for InvoiceSummary {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            amount: self.amount + other.amount,
            volume: self.volume + other.volume,
        }
    }
}

/// Per-day summaries plus their total
///
/// Days are UTC calendar days of the invoice date. Only days with at least
/// one invoice line appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyInvoiceSummary {
    pub days: BTreeMap<NaiveDate, InvoiceSummary>,
    pub total: InvoiceSummary,
}

impl DailyInvoiceSummary {
    fn from_days(days: BTreeMap<NaiveDate, InvoiceSummary>) -> Self {
        let total = days.values().copied().fold(InvoiceSummary::default(), Add::add);
        Self { days, total }
    }
}

/// Reports over invoices and their lines
#[derive(Debug, Clone)]
pub struct InvoiceReports {
    invoices: InvoiceRepository,
    lines: InvoiceItemRepository,
}

impl InvoiceReports {
    pub fn new(invoices: InvoiceRepository, lines: InvoiceItemRepository) -> Self {
        Self { invoices, lines }
    }

    /// Daily amount/volume of invoices dated within `[start, end)`
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn daily_summary(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<DailyInvoiceSummary> {
        log_op_start!("report_daily_summary", from = %start_date, to = %end_date);
        let start = std::time::Instant::now();

        let summary = self
            .daily_summary_impl(start_date, end_date)
            .map_err(|e| {
                log_op_error!(
                    "report_daily_summary",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;

        log_op_end!(
            "report_daily_summary",
            duration_ms = elapsed_ms(start),
            days = summary.days.len()
        );
        Ok(summary)
    }

    fn daily_summary_impl(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<DailyInvoiceSummary> {
        let invoice_days: HashMap<String, NaiveDate> = self
            .invoices
            .find_all_by_query(
                INVOICES_IN_RANGE_SQL,
                &[Value::Date(start_date), Value::Date(end_date)],
            )?
            .into_iter()
            .map(|invoice| (invoice.id, invoice.date.date_naive()))
            .collect();

        let ids: Vec<&str> = invoice_days.keys().map(String::as_str).collect();
        let mut days: BTreeMap<NaiveDate, InvoiceSummary> = BTreeMap::new();
        for line in self.lines_of(&ids)? {
            if let Some(day) = invoice_days.get(&line.invoice_id) {
                let entry = days.entry(*day).or_default();
                *entry = *entry + InvoiceSummary::of(&line);
            }
        }

        Ok(DailyInvoiceSummary::from_days(days))
    }

    /// Mean unit price of lines on invoices dated within `[start, end)`
    ///
    /// `None` when there are no such invoices or they have no lines.
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn average_price(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Option<f64>> {
        log_op_start!("report_average_price", from = %start_date, to = %end_date);
        let start = std::time::Instant::now();

        let average = self
            .average_price_impl(start_date, end_date)
            .map_err(|e| {
                log_op_error!(
                    "report_average_price",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;

        log_op_end!(
            "report_average_price",
            duration_ms = elapsed_ms(start),
            found = average.is_some()
        );
        Ok(average)
    }

    fn average_price_impl(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Option<f64>> {
        let ids: Vec<String> = self
            .invoices
            .find_all_by_query(
                INVOICES_IN_RANGE_SQL,
                &[Value::Date(start_date), Value::Date(end_date)],
            )?
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();

        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let lines = self.lines_of(&ids)?;
        if lines.is_empty() {
            return Ok(None);
        }

        let total: f64 = lines.iter().map(|line| f64::from(line.price)).sum();
        Ok(Some(total / lines.len() as f64))
    }

    /// Lines belonging to any of `invoice_ids`
    fn lines_of(&self, invoice_ids: &[&str]) -> Result<Vec<InvoiceItem>> {
        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT * FROM invoice_item WHERE invoice_id IN ({})",
            sql::placeholders(invoice_ids.len())
        );
        let params: Vec<Value> = invoice_ids.iter().map(|id| Value::from(*id)).collect();
        self.lines.find_all_by_query(&query, &params)
    }
}
