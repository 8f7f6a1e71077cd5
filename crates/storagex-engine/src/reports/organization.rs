//! Organization reports

#![allow(clippy::result_large_err)]

use super::elapsed_ms;
use std::collections::{HashMap, HashSet};
use storagex_core::mapping::Value;
use storagex_core::model::{Item, Organization, OrganizationWithItem};
use storagex_core::{log_op_end, log_op_error, log_op_start};
use storagex_store::errors::Result;
use storagex_store::OrganizationRepository;

pub const DEFAULT_MOST_ACTIVE_LIMIT: usize = 10;

const MOST_ACTIVE_SQL: &str = "\
WITH activity AS (
  SELECT o.*, SUM(ii.volume) AS volume
  FROM organization o
      INNER JOIN invoice i ON o.organization_id = i.organization_id
      INNER JOIN invoice_item ii ON i.invoice_id = ii.invoice_id
  GROUP BY o.organization_id, o.name, o.itn, o.account
)
SELECT organization_id, name, itn, account
FROM activity
ORDER BY volume DESC, organization_id
LIMIT ?";

const ITEM_VOLUME_ABOVE_SQL: &str = "\
SELECT o.organization_id, o.name, o.itn, o.account
FROM organization o
    INNER JOIN invoice i ON o.organization_id = i.organization_id
    INNER JOIN invoice_item ii ON i.invoice_id = ii.invoice_id
WHERE ii.item_id = ?
GROUP BY o.organization_id, o.name, o.itn, o.account
HAVING SUM(ii.volume) > ?";

const ORGANIZATION_ITEMS_SQL: &str = "\
SELECT DISTINCT
  o.organization_id AS organization_id,
  o.name AS organization_name,
  o.itn AS organization_itn,
  o.account AS organization_account,
  it.item_id AS item_id,
  it.name AS item_name,
  it.code AS item_code
FROM organization o
    LEFT JOIN (SELECT * FROM invoice i WHERE i.date >= ? AND i.date < ?) AS inv
        ON o.organization_id = inv.organization_id
    LEFT JOIN invoice_item ii ON inv.invoice_id = ii.invoice_id
    LEFT JOIN item it ON ii.item_id = it.item_id";

/// Reports over organizations and what they invoiced
#[derive(Debug, Clone)]
pub struct OrganizationReports {
    organizations: OrganizationRepository,
}

impl OrganizationReports {
    pub fn new(organizations: OrganizationRepository) -> Self {
        Self { organizations }
    }

    /// Organizations ranked by total invoiced volume, largest first
    ///
    /// Organizations without invoice lines are not ranked. Ties are broken
    /// by identifier.
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn most_active(&self, limit: usize) -> Result<Vec<Organization>> {
        log_op_start!("report_most_active", limit = limit);
        let start = std::time::Instant::now();

        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let organizations = self
            .organizations
            .find_all_by_query(MOST_ACTIVE_SQL, &[Value::Integer(limit)])
            .map_err(|e| {
                log_op_error!(
                    "report_most_active",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;

        log_op_end!(
            "report_most_active",
            duration_ms = elapsed_ms(start),
            rows = organizations.len()
        );
        Ok(organizations)
    }

    /// Organizations whose summed volume of every listed item exceeds its
    /// threshold
    ///
    /// Each `(item_id, min_volume)` pair is evaluated separately and the
    /// results intersected. An empty list yields no organizations. The
    /// result is ordered by identifier.
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn with_items_above<S: AsRef<str>>(&self, thresholds: &[(S, f64)]) -> Result<Vec<Organization>> {
        log_op_start!("report_items_above", thresholds = thresholds.len());
        let start = std::time::Instant::now();

        let organizations = self.with_items_above_impl(thresholds).map_err(|e| {
            log_op_error!(
                "report_items_above",
                e.clone(),
                duration_ms = elapsed_ms(start)
            );
            e
        })?;

        log_op_end!(
            "report_items_above",
            duration_ms = elapsed_ms(start),
            rows = organizations.len()
        );
        Ok(organizations)
    }

    fn with_items_above_impl<S: AsRef<str>>(&self, thresholds: &[(S, f64)]) -> Result<Vec<Organization>> {
        let mut matching: Option<HashSet<Organization>> = None;
        for (item_id, min_volume) in thresholds {
            let found: HashSet<Organization> = self
                .organizations
                .find_all_by_query(
                    ITEM_VOLUME_ABOVE_SQL,
                    &[Value::from(item_id.as_ref()), Value::Double(*min_volume)],
                )?
                .into_iter()
                .collect();

            let narrowed = match matching {
                None => found,
                Some(current) => current.intersection(&found).cloned().collect(),
            };
            if narrowed.is_empty() {
                return Ok(Vec::new());
            }
            matching = Some(narrowed);
        }

        let mut organizations: Vec<_> = matching.unwrap_or_default().into_iter().collect();
        organizations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(organizations)
    }

    /// Every organization with the set of items it invoiced in `[start, end)`
    ///
    /// Organizations with no invoices in the range map to an empty set.
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn with_items(
        &self,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    ) -> Result<HashMap<Organization, HashSet<Item>>> {
        log_op_start!(
            "report_organization_items",
            from = %start_date,
            to = %end_date
        );
        let start = std::time::Instant::now();

        let rows = self
            .organizations
            .find_all_by_query_as::<OrganizationWithItem>(
                ORGANIZATION_ITEMS_SQL,
                &[Value::Date(start_date), Value::Date(end_date)],
            )
            .map_err(|e| {
                log_op_error!(
                    "report_organization_items",
                    e.clone(),
                    duration_ms = elapsed_ms(start)
                );
                e
            })?;

        let mut grouped: HashMap<Organization, HashSet<Item>> = HashMap::new();
        for row in &rows {
            let items = grouped.entry(row.organization()).or_default();
            if let Some(item) = row.item() {
                items.insert(item);
            }
        }

        log_op_end!(
            "report_organization_items",
            duration_ms = elapsed_ms(start),
            organizations = grouped.len()
        );
        Ok(grouped)
    }
}
