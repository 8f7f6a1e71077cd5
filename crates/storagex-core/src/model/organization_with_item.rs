use serde::{Deserialize, Serialize};

use super::{Item, Organization};
use crate::mapping::{Record, SchemaBuilder};

/// Denormalized organization/item row produced by a left-joined report query
///
/// Not backed by a table. Item columns are NULL for organizations without
/// matching invoice lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationWithItem {
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub organization_itn: Option<String>,
    pub organization_account: Option<String>,
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    pub item_code: Option<String>,
}

impl OrganizationWithItem {
    /// Organization half of the row; missing columns become empty strings
    pub fn organization(&self) -> Organization {
        Organization::new(
            self.organization_id.clone().unwrap_or_default(),
            self.organization_name.clone().unwrap_or_default(),
            self.organization_itn.clone().unwrap_or_default(),
            self.organization_account.clone().unwrap_or_default(),
        )
    }

    /// Item half of the row, `None` when the join found no item
    pub fn item(&self) -> Option<Item> {
        self.item_id.as_ref().map(|id| {
            Item::new(
                id.clone(),
                self.item_name.clone().unwrap_or_default(),
                self.item_code.clone(),
            )
        })
    }
}

impl Record for OrganizationWithItem {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .constructor(Self::default)
            .column("organization_id", |r| &r.organization_id, |r| {
                &mut r.organization_id
            })
            .column("organization_name", |r| &r.organization_name, |r| {
                &mut r.organization_name
            })
            .column("organization_itn", |r| &r.organization_itn, |r| {
                &mut r.organization_itn
            })
            .column("organization_account", |r| &r.organization_account, |r| {
                &mut r.organization_account
            })
            .column("item_id", |r| &r.item_id, |r| &mut r.item_id)
            .column("item_name", |r| &r.item_name, |r| &mut r.item_name)
            .column("item_code", |r| &r.item_code, |r| &mut r.item_code);
    }
}
