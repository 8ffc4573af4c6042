//! Nested-collection synchronization planning.
//!
//! A contract update carries full replacement arrays for its owned
//! collections. Each element is explicitly tagged: `new` rows are inserted
//! under the contract, `existing` rows update the stored row with that id.
//! `plan_sync` partitions a submitted array against the stored id set into
//! the minimal delete/update/create operation set.

use std::collections::HashSet;

use serde::Deserialize;
use uuid::Uuid;

/// One element of a submitted replacement array.
///
/// Wire shape: `{"op": "new", ...fields}` or
/// `{"op": "existing", "id": "<uuid>", ...fields}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SyncItem<T> {
    New(T),
    Existing(ExistingItem<T>),
}

/// An element that claims to be a stored row.
#[derive(Debug, Clone, Deserialize)]
pub struct ExistingItem<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: T,
}

impl<T> SyncItem<T> {
    pub fn new(fields: T) -> Self {
        SyncItem::New(fields)
    }

    pub fn existing(id: Uuid, fields: T) -> Self {
        SyncItem::Existing(ExistingItem { id, fields })
    }
}

/// The minimal operation set that reconciles stored rows with a submission.
///
/// Phases execute in order: delete, then update, then create.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan<T> {
    pub delete: Vec<Uuid>,
    pub update: Vec<(Uuid, T)>,
    pub create: Vec<T>,
}

impl<T> SyncPlan<T> {
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty() && self.update.is_empty() && self.create.is_empty()
    }
}

/// Partition a submitted array against the stored id set.
///
/// - ids present in storage but absent from the submission are deleted;
/// - `Existing` items whose id is stored are updated in place;
/// - `New` items, and `Existing` items whose id is unknown, become inserts
///   (the client-supplied id is discarded so storage assigns a fresh one).
///
/// An empty submission therefore deletes every stored row; callers encode
/// "leave untouched" by not invoking the sync at all.
pub fn plan_sync<T>(existing: &HashSet<Uuid>, submitted: Vec<SyncItem<T>>) -> SyncPlan<T> {
    let submitted_real: HashSet<Uuid> = submitted
        .iter()
        .filter_map(|item| match item {
            SyncItem::Existing(e) => Some(e.id),
            SyncItem::New(_) => None,
        })
        .collect();

    let mut delete: Vec<Uuid> = existing.difference(&submitted_real).copied().collect();
    // Stable output for tests and logs; HashSet iteration order is arbitrary.
    delete.sort();

    let mut update = Vec::new();
    let mut create = Vec::new();

    for item in submitted {
        match item {
            SyncItem::Existing(e) if existing.contains(&e.id) => update.push((e.id, e.fields)),
            // Unknown "real" id: treated as a create, not an error.
            SyncItem::Existing(e) => create.push(e.fields),
            SyncItem::New(fields) => create.push(fields),
        }
    }

    SyncPlan {
        delete,
        update,
        create,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn resubmitting_stored_state_is_a_pure_update() {
        let stored = ids(3);
        let existing: HashSet<Uuid> = stored.iter().copied().collect();

        let submitted: Vec<SyncItem<u32>> = stored
            .iter()
            .map(|id| SyncItem::existing(*id, 7))
            .collect();

        let plan = plan_sync(&existing, submitted);
        assert!(plan.delete.is_empty());
        assert!(plan.create.is_empty());
        assert_eq!(plan.update.len(), 3);
    }

    #[test]
    fn empty_submission_deletes_everything() {
        let stored = ids(2);
        let existing: HashSet<Uuid> = stored.iter().copied().collect();

        let plan = plan_sync::<u32>(&existing, vec![]);
        assert_eq!(plan.delete.len(), 2);
        assert!(plan.update.is_empty());
        assert!(plan.create.is_empty());
    }

    #[test]
    fn dropped_rows_are_deleted_and_new_rows_created() {
        // Stored terms: A(value 100), B(value 200). Submission keeps A with a
        // new value and replaces B with a brand-new term.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let existing: HashSet<Uuid> = [a, b].into_iter().collect();

        let submitted = vec![SyncItem::existing(a, 150u32), SyncItem::new(50u32)];

        let plan = plan_sync(&existing, submitted);
        assert_eq!(plan.delete, vec![b]);
        assert_eq!(plan.update, vec![(a, 150)]);
        assert_eq!(plan.create, vec![50]);
    }

    #[test]
    fn unknown_real_id_becomes_a_create() {
        let stored = Uuid::new_v4();
        let foreign = Uuid::new_v4();
        let existing: HashSet<Uuid> = [stored].into_iter().collect();

        let submitted = vec![
            SyncItem::existing(stored, 1u32),
            SyncItem::existing(foreign, 2u32),
        ];

        let plan = plan_sync(&existing, submitted);
        assert!(plan.delete.is_empty());
        assert_eq!(plan.update, vec![(stored, 1)]);
        assert_eq!(plan.create, vec![2]);
    }

    #[test]
    fn stored_ids_after_equals_submitted_real_union_created() {
        let stored = ids(4);
        let existing: HashSet<Uuid> = stored.iter().copied().collect();

        // Keep rows 0 and 2, drop 1 and 3, add two new rows.
        let submitted = vec![
            SyncItem::existing(stored[0], 0u32),
            SyncItem::existing(stored[2], 0u32),
            SyncItem::new(0u32),
            SyncItem::new(0u32),
        ];

        let plan = plan_sync(&existing, submitted);

        let surviving: HashSet<Uuid> = existing
            .iter()
            .filter(|id| !plan.delete.contains(id))
            .copied()
            .collect();
        let submitted_real: HashSet<Uuid> = [stored[0], stored[2]].into_iter().collect();

        assert_eq!(surviving, submitted_real);
        assert_eq!(plan.create.len(), 2);
    }

    #[test]
    fn tagged_wire_shape_deserializes() {
        #[derive(Debug, Clone, Deserialize, PartialEq)]
        struct Fields {
            value: i64,
        }

        let items: Vec<SyncItem<Fields>> = serde_json::from_str(
            r#"[
                {"op": "existing", "id": "550e8400-e29b-41d4-a716-446655440000", "value": 150},
                {"op": "new", "value": 50}
            ]"#,
        )
        .unwrap();

        assert!(matches!(&items[0], SyncItem::Existing(e) if e.fields.value == 150));
        assert!(matches!(&items[1], SyncItem::New(f) if f.value == 50));
    }
}
