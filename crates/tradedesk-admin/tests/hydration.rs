//! Persistence tests against a real `RocksDB` directory.
//!
//! Every mutation is written through immediately, so a freshly opened service
//! must see exactly what the previous one left behind.

use std::sync::Arc;

use tempfile::TempDir;
use tradedesk_admin::{
    AdminService, AlwaysConfirm, Authorizer, Column, ColumnType, Credentials, FieldValue, Fields,
    SessionGate,
};
use tradedesk_store::{RocksStore, StorageKey, Store};

fn open(dir: &TempDir) -> AdminService<RocksStore> {
    let store = Arc::new(RocksStore::open(dir.path()).unwrap());
    AdminService::open(store).unwrap()
}

fn trader() -> Fields {
    [
        ("name", "A. Trader"),
        ("email", "a@x.com"),
        ("datePurchased", "2024-01-01"),
        ("status", "Active"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
    .collect()
}

#[test]
fn schema_and_records_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let (columns, records) = {
        let mut admin = open(&dir);
        let tier = Column::new("tier", "Tier", ColumnType::Select).with_options(["Gold", "Silver"]);
        admin.add_column(tier).unwrap();
        admin.add_record(&trader()).unwrap();
        admin.add_record(&trader()).unwrap();
        (admin.columns().to_vec(), admin.records().records().to_vec())
    };

    let admin = open(&dir);
    assert_eq!(admin.columns(), columns.as_slice());
    assert_eq!(admin.records().records(), records.as_slice());
    assert_eq!(admin.stats().total_users, 2);
}

#[test]
fn column_removal_is_persisted_for_records() {
    let dir = TempDir::new().unwrap();

    {
        let mut admin = open(&dir);
        admin
            .add_column(Column::new("phone", "Phone", ColumnType::Tel))
            .unwrap();
        admin.add_record(&trader()).unwrap();
        admin.remove_column("phone", &AlwaysConfirm).unwrap();
    }

    let admin = open(&dir);
    assert!(admin.schema().get("phone").is_none());
    assert!(admin
        .records()
        .records()
        .iter()
        .all(|r| r.get("phone").is_none()));
}

#[test]
fn loads_data_exported_from_browser_storage() {
    let dir = TempDir::new().unwrap();
    {
        let store = RocksStore::open(dir.path()).unwrap();
        store
            .put(
                StorageKey::Columns,
                r#"[{"key":"name","label":"Name","type":"text","required":true},
                    {"key":"notes","label":"Notes","type":"textarea","required":false}]"#,
            )
            .unwrap();
        store
            .put(
                StorageKey::Users,
                r#"[{"id":"1704067200000","name":"Legacy","notes":""},
                    {"name":"Numeric","notes":"vip","id":1704067200001}]"#,
            )
            .unwrap();
    }

    let admin = open(&dir);
    assert_eq!(admin.columns().len(), 2);
    assert_eq!(admin.records().len(), 2);
    assert_eq!(admin.search("VIP")[0].display_value("name"), "Numeric");
}

#[test]
fn session_survives_reopen_until_logout() {
    let dir = TempDir::new().unwrap();
    let credentials = Credentials::new(Some("admin".into()), Some("pw".into()));
    let day = std::time::Duration::from_secs(86_400);

    {
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        let gate = SessionGate::new(store, credentials.clone(), day);
        gate.login("admin", "pw").unwrap();
    }

    let store = Arc::new(RocksStore::open(dir.path()).unwrap());
    let gate = SessionGate::new(Arc::clone(&store), credentials, day);
    assert!(gate.is_authorized().unwrap());

    gate.logout().unwrap();
    assert!(!gate.is_authorized().unwrap());
}
