use serde::{Deserialize, Serialize};

use crate::mapping::{Record, SchemaBuilder};

/// Organization - a counterparty that issues invoices
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organization {
    /// Identifier (`organization_id`)
    pub id: String,

    pub name: String,

    /// Individual taxpayer number
    pub itn: String,

    /// Bank account number
    pub account: String,
}

impl Organization {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        itn: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            itn: itn.into(),
            account: account.into(),
        }
    }
}

impl Record for Organization {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("organization")
            .constructor(Self::default)
            .id("organization_id", |o| &o.id, |o| &mut o.id)
            .column("name", |o| &o.name, |o| &mut o.name)
            .column("itn", |o| &o.itn, |o| &mut o.itn)
            .column("account", |o| &o.account, |o| &mut o.account);
    }
}
