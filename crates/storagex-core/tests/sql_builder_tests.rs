// Property tests for statement building: placeholder and parameter order

use proptest::prelude::*;
use storagex_core::mapping::{EntityDescriptor, Value};
use storagex_core::model::InvoiceItem;
use storagex_core::sql;

fn invoice_item() -> impl Strategy<Value = InvoiceItem> {
    (
        "[a-z0-9]{1,8}",
        "[a-z0-9]{1,8}",
        "[a-z0-9]{1,8}",
        any::<i32>(),
        -1.0e6f64..1.0e6,
    )
        .prop_map(|(id, invoice_id, item_id, price, volume)| InvoiceItem {
            id,
            invoice_id,
            item_id,
            price,
            volume,
        })
}

proptest! {
    #[test]
    fn insert_binds_one_param_per_placeholder(line in invoice_item()) {
        let descriptor = EntityDescriptor::<InvoiceItem>::derive().unwrap();
        let stmt = sql::insert(&descriptor, &line).unwrap();

        prop_assert_eq!(stmt.sql.matches('?').count(), stmt.params.len());
        prop_assert_eq!(stmt.params.len(), descriptor.fields().len());
        prop_assert_eq!(&stmt.params[0], &Value::Text(line.id.clone()));
    }

    #[test]
    fn update_binds_identifier_after_assignments(line in invoice_item()) {
        let descriptor = EntityDescriptor::<InvoiceItem>::derive().unwrap();
        let stmt = sql::update(&descriptor, &line).unwrap();

        prop_assert_eq!(stmt.sql.matches('?').count(), stmt.params.len());
        prop_assert_eq!(stmt.params.len(), descriptor.fields().len());
        prop_assert_eq!(stmt.params.last(), Some(&Value::Text(line.id.clone())));
        prop_assert_eq!(&stmt.params[2], &Value::Integer(line.price));
    }

    #[test]
    fn placeholders_match_count(n in 0usize..64) {
        let text = sql::placeholders(n);
        prop_assert_eq!(text.matches('?').count(), n);
    }
}
