use serde::{Deserialize, Serialize};

use crate::mapping::{Record, SchemaBuilder};

/// Item - a product that can appear on invoices
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Catalogue code, absent for ad-hoc items
    pub code: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code,
        }
    }
}

impl Record for Item {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("item")
            .constructor(Self::default)
            .id("item_id", |i| &i.id, |i| &mut i.id)
            .column("name", |i| &i.name, |i| &mut i.name)
            .column("code", |i| &i.code, |i| &mut i.code);
    }
}
