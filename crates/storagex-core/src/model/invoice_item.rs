use serde::{Deserialize, Serialize};

use crate::mapping::{Record, SchemaBuilder};

/// InvoiceItem - one line of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub item_id: String,

    /// Unit price in minor currency units
    pub price: i32,

    pub volume: f64,
}

impl InvoiceItem {
    /// `price * volume`, with halves rounded towards positive infinity
    pub fn amount(&self) -> i64 {
        (f64::from(self.price) * self.volume + 0.5).floor() as i64
    }
}

impl Record for InvoiceItem {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("invoice_item")
            .constructor(Self::default)
            .id("invoice_item_id", |i| &i.id, |i| &mut i.id)
            .column("invoice_id", |i| &i.invoice_id, |i| &mut i.invoice_id)
            .column("item_id", |i| &i.item_id, |i| &mut i.item_id)
            .column("price", |i| &i.price, |i| &mut i.price)
            .column("volume", |i| &i.volume, |i| &mut i.volume);
    }
}
