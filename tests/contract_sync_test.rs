//! Reconciliation planning behavior over realistic contract payloads.

use std::collections::HashSet;

use uuid::Uuid;

use contract_ledger::domain::{plan_sync, CreateContract, PaymentTermInput, SyncItem, UpdateContract};

fn term(value: i64) -> PaymentTermInput {
    PaymentTermInput {
        batch: "Batch 1".to_string(),
        content: None,
        ratio: 50.0,
        value,
        is_collected: false,
        collection_date: None,
        invoice_status: None,
    }
}

#[test]
fn update_existing_delete_dropped_create_new() {
    // Contract C holds terms A(id=a, value=100) and B(id=b, value=200).
    // The submission keeps A at value 150 and replaces B with a new term
    // worth 50.
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let existing: HashSet<Uuid> = [a, b].into_iter().collect();

    let submitted = vec![SyncItem::existing(a, term(150)), SyncItem::new(term(50))];

    let plan = plan_sync(&existing, submitted);

    assert_eq!(plan.delete, vec![b]);
    assert_eq!(plan.update.len(), 1);
    assert_eq!(plan.update[0].0, a);
    assert_eq!(plan.update[0].1.value, 150);
    assert_eq!(plan.create.len(), 1);
    assert_eq!(plan.create[0].value, 50);

    // Two rows survive, totalling 200.
    let surviving = existing.len() - plan.delete.len() + plan.create.len();
    assert_eq!(surviving, 2);
    let total: i64 = plan.update.iter().map(|(_, t)| t.value).sum::<i64>()
        + plan.create.iter().map(|t| t.value).sum::<i64>();
    assert_eq!(total, 200);
}

#[test]
fn resubmitting_a_read_back_snapshot_plans_no_net_change() {
    let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let existing: HashSet<Uuid> = ids.iter().copied().collect();

    let submitted: Vec<SyncItem<PaymentTermInput>> = ids
        .iter()
        .map(|id| SyncItem::existing(*id, term(100)))
        .collect();

    let plan = plan_sync(&existing, submitted);

    assert!(plan.delete.is_empty());
    assert!(plan.create.is_empty());
    assert_eq!(plan.update.len(), 4);
}

#[test]
fn empty_array_deletes_every_stored_row() {
    let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let existing: HashSet<Uuid> = ids.iter().copied().collect();

    let plan = plan_sync::<PaymentTermInput>(&existing, vec![]);

    assert_eq!(plan.delete.len(), 3);
    assert!(plan.update.is_empty());
    assert!(plan.create.is_empty());
}

#[test]
fn surviving_ids_are_exactly_submitted_real_ids() {
    let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    let existing: HashSet<Uuid> = ids.iter().copied().collect();

    // Keep 0, 2, 4; drop 1, 3; add one new row.
    let submitted = vec![
        SyncItem::existing(ids[0], term(1)),
        SyncItem::existing(ids[2], term(2)),
        SyncItem::existing(ids[4], term(3)),
        SyncItem::new(term(4)),
    ];

    let plan = plan_sync(&existing, submitted);

    let deleted: HashSet<Uuid> = plan.delete.iter().copied().collect();
    let surviving: HashSet<Uuid> = existing.difference(&deleted).copied().collect();
    let submitted_real: HashSet<Uuid> = [ids[0], ids[2], ids[4]].into_iter().collect();

    assert_eq!(surviving, submitted_real);
    assert_eq!(plan.create.len(), 1);
}

#[test]
fn identifier_from_another_contract_becomes_a_create() {
    let mine = Uuid::new_v4();
    let foreign = Uuid::new_v4();
    let existing: HashSet<Uuid> = [mine].into_iter().collect();

    let submitted = vec![
        SyncItem::existing(mine, term(10)),
        // Syntactically real, but not stored under this contract.
        SyncItem::existing(foreign, term(20)),
    ];

    let plan = plan_sync(&existing, submitted);

    assert!(plan.delete.is_empty());
    assert_eq!(plan.update.len(), 1);
    assert_eq!(plan.create.len(), 1);
    assert_eq!(plan.create[0].value, 20);
}

#[test]
fn absent_collection_key_is_distinct_from_empty_array() {
    // Omitted key: leave the collection untouched.
    let untouched: UpdateContract = serde_json::from_str(r#"{ "duration": "24 months" }"#).unwrap();
    assert!(untouched.payment_terms.is_none());
    assert_eq!(untouched.patch.duration.as_deref(), Some("24 months"));

    // Empty array: delete everything in the collection.
    let clear_all: UpdateContract = serde_json::from_str(r#"{ "payment_terms": [] }"#).unwrap();
    assert_eq!(clear_all.payment_terms.map(|t| t.len()), Some(0));
}

#[test]
fn tagged_items_deserialize_inside_an_update_payload() {
    let payload: UpdateContract = serde_json::from_str(
        r#"{
            "value_pre_vat": 1000000,
            "expected_version": 3,
            "software_ids": [],
            "payment_terms": [
                {"op": "existing", "id": "550e8400-e29b-41d4-a716-446655440000",
                 "batch": "Batch 1", "ratio": 75.0, "value": 150},
                {"op": "new", "batch": "Batch 2", "ratio": 25.0, "value": 50}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(payload.patch.value_pre_vat, Some(1_000_000));
    assert_eq!(payload.expected_version, Some(3));
    assert_eq!(payload.software_ids.as_deref(), Some(&[][..]));

    let terms = payload.payment_terms.unwrap();
    assert_eq!(terms.len(), 2);
    assert!(matches!(&terms[0], SyncItem::Existing(e) if e.fields.value == 150));
    assert!(matches!(&terms[1], SyncItem::New(t) if t.batch == "Batch 2"));
}

#[test]
fn creation_without_nested_arrays_yields_empty_collections() {
    let payload: CreateContract = serde_json::from_str(
        r#"{
            "code": "HD-2025-007",
            "sign_date": "2025-03-01",
            "customer_id": "550e8400-e29b-41d4-a716-446655440000"
        }"#,
    )
    .unwrap();

    assert!(payload.payment_terms.is_empty());
    assert!(payload.expenses.is_empty());
    assert!(payload.members.is_empty());
    assert!(payload.attachments.is_empty());
    assert!(payload.software_ids.is_none());
    assert_eq!(payload.value_pre_vat, 0);
    assert_eq!(payload.value_post_vat, 0);
}

#[test]
fn an_element_without_a_tag_is_rejected() {
    let result: Result<UpdateContract, _> = serde_json::from_str(
        r#"{ "payment_terms": [ {"batch": "Batch 1", "ratio": 100.0, "value": 10} ] }"#,
    );

    assert!(result.is_err());
}
