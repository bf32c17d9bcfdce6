use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use finanzplaner::core::{FinancialStore, LoadOrigin};
use finanzplaner::domain::{InputsPatch, ItemDraft, ItemKind, ItemPatch};
use finanzplaner::errors::{PlannerError, Result};
use finanzplaner::storage::{
    JsonStorage, MemoryStorage, PlannerStorage, INPUTS_KEY, ITEMS_KEY,
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

/// Reads succeed from an inner store, every write fails.
struct ReadOnlyStorage {
    inner: MemoryStorage,
    attempts: Arc<AtomicUsize>,
}

impl PlannerStorage for ReadOnlyStorage {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        self.inner.read_blob(key)
    }

    fn write_blob(&self, _key: &str, _data: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PlannerError::StorageError("disk full".into()))
    }
}

fn mid_may() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

#[test]
fn first_run_seeds_and_persists_items() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("data");

    let store = FinancialStore::open(Box::new(JsonStorage::new(&root).unwrap()));
    assert_eq!(store.origin(), LoadOrigin::Seeded);
    let seeded_ids: Vec<_> = store.items().iter().map(|item| item.id.clone()).collect();

    let reopened = FinancialStore::open(Box::new(JsonStorage::new(&root).unwrap()));
    assert_eq!(reopened.origin(), LoadOrigin::Stored);
    let reloaded_ids: Vec<_> = reopened.items().iter().map(|item| item.id.clone()).collect();
    assert_eq!(seeded_ids, reloaded_ids, "seed ids must survive a restart");
}

#[test]
fn mutations_survive_a_restart() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("data");

    let mut store = FinancialStore::open(Box::new(JsonStorage::new(&root).unwrap()));
    store.update_inputs(InputsPatch {
        kontostand: Some(dec!(1000)),
        bargeld: Some(dec!(50)),
        ..InputsPatch::default()
    })
    .unwrap();
    let id = store
        .add_item(ItemDraft::new("Gehalt", dec!(2100.50), 25, ItemKind::Income))
        .unwrap();
    store
        .update_item(
            &id,
            ItemPatch {
                name: Some("Nettogehalt".into()),
                ..ItemPatch::default()
            },
        )
        .unwrap();
    let expected = store.snapshot().project(mid_may());

    let reopened = FinancialStore::open(Box::new(JsonStorage::new(&root).unwrap()));
    assert_eq!(reopened.inputs().kontostand, dec!(1000));
    assert_eq!(reopened.item(&id).unwrap().name, "Nettogehalt");
    assert_eq!(reopened.item(&id).unwrap().amount, dec!(2100.50));
    assert_eq!(reopened.snapshot().project(mid_may()), expected);
}

#[test]
fn failed_saves_keep_memory_authoritative() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let storage = ReadOnlyStorage {
        inner: MemoryStorage::new().with_blob(ITEMS_KEY, "[]"),
        attempts: Arc::clone(&attempts),
    };
    let mut store = FinancialStore::open(Box::new(storage));

    let id = store
        .add_item(ItemDraft::new("Miete", dec!(550), 1, ItemKind::Expense))
        .expect("mutation succeeds even when persistence fails");
    assert_eq!(store.item(&id).unwrap().amount, dec!(550));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    assert!(matches!(store.flush(), Err(PlannerError::StorageError(_))));
}

#[test]
fn malformed_stored_data_is_normalized_on_load() {
    let storage = MemoryStorage::new()
        .with_blob(INPUTS_KEY, r#"{"kontostand":"1000","bargeld":null}"#)
        .with_blob(
            ITEMS_KEY,
            r#"[
                {"id":"a","name":"Kindergeld","amount":255,"dayOfMonth":15,"type":"income","active":true},
                {"id":"b","name":"Ohne Betrag","dayOfMonth":20,"type":"expense","active":true},
                {"id":"c","name":"Kaputt","amount":12,"type":"expense","active":true}
            ]"#,
        );
    let store = FinancialStore::open(Box::new(storage));
    assert_eq!(store.origin(), LoadOrigin::Stored);
    assert_eq!(store.items().len(), 2);

    let result = store.snapshot().project(mid_may());
    assert_eq!(result.sofort_verfuegbar, dec!(1000));
    assert_eq!(result.remaining_income, dec!(255));
    assert_eq!(result.remaining_expense, dec!(0));
    assert_eq!(result.verfuegbar_bis_monatsende, dec!(1255));
}

#[test]
fn blobs_written_by_json_storage_use_camel_case_numeric_fields() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path()).unwrap();
    let mut store = FinancialStore::open(Box::new(storage.clone()));
    store.update_inputs(InputsPatch {
        bekomme: Some(dec!(12.5)),
        ..InputsPatch::default()
    })
    .unwrap();

    let inputs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.blob_path(INPUTS_KEY)).unwrap()).unwrap();
    assert_eq!(inputs["bekomme"], 12.5);
    assert_eq!(inputs["kontostand"], 0.0);

    let items: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.blob_path(ITEMS_KEY)).unwrap()).unwrap();
    let first = &items[0];
    assert!(first["id"].is_string());
    assert!(first["dayOfMonth"].is_u64());
    assert!(first["type"] == "income" || first["type"] == "expense");
    assert!(first["active"].is_boolean());
}

#[test]
fn seeded_store_projects_mid_month_scenario() {
    let mut store = FinancialStore::open(Box::new(MemoryStorage::new()));
    store.update_inputs(InputsPatch {
        kontostand: Some(dec!(1000)),
        bargeld: Some(dec!(50)),
        bekomme: Some(dec!(0)),
    })
    .unwrap();
    // Seed items due from the 15th on: Kindergeld +255, Spotify -15, Telekom Mobil -20.
    let result = store.snapshot().project(mid_may());
    assert_eq!(result.sofort_verfuegbar, dec!(1050));
    assert_eq!(result.remaining_income, dec!(255));
    assert_eq!(result.remaining_expense, dec!(35));
    assert_eq!(result.verfuegbar_bis_monatsende, dec!(1270));
}

#[test]
fn extreme_amounts_in_stored_blobs_are_zeroed_before_projection() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path()).unwrap();
    fs::write(
        storage.blob_path(INPUTS_KEY),
        r#"{"kontostand":7e28,"bargeld":7e28,"bekomme":0}"#,
    )
    .unwrap();
    fs::write(
        storage.blob_path(ITEMS_KEY),
        r#"[
            {"id":"x","name":"Lotto","amount":7e28,"dayOfMonth":20,"type":"income","active":true},
            {"id":"y","name":"Lotto 2","amount":7e28,"dayOfMonth":21,"type":"income","active":true},
            {"id":"z","name":"Spotify","amount":15,"dayOfMonth":28,"type":"expense","active":true}
        ]"#,
    )
    .unwrap();

    let store = FinancialStore::open(Box::new(storage));
    let result = store.snapshot().project(mid_may());
    assert_eq!(result.sofort_verfuegbar, dec!(0));
    assert_eq!(result.remaining_income, dec!(0));
    assert_eq!(result.remaining_expense, dec!(15));
    assert_eq!(result.verfuegbar_bis_monatsende, dec!(-15));
}
