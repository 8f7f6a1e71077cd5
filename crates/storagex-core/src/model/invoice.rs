use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapping::{Record, SchemaBuilder};

/// Invoice - header of one billing document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,

    /// When the invoice was issued
    pub date: DateTime<Utc>,

    /// Issuing organization (`organization_id`)
    pub organization_id: String,
}

impl Record for Invoice {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("invoice")
            .constructor(Self::default)
            .id("invoice_id", |i| &i.id, |i| &mut i.id)
            .column("date", |i| &i.date, |i| &mut i.date)
            .column("organization_id", |i| &i.organization_id, |i| {
                &mut i.organization_id
            });
    }
}
