//! Macro-generated contract suite for `PersistenceAdapter` backends.
//!
//! The `persistence_adapter_tests!` macro wraps a key/value backend in a
//! [`BlobAdapter`](stockroom::storage::BlobAdapter) and checks the adapter
//! contract: missing or corrupt data reads as empty, writes replace the whole
//! list, and the lenient read side accepts form-shaped blobs.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use stockroom::storage::InMemoryKeyValueStore;
//!
//! persistence_adapter_tests!(InMemoryKeyValueStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_missing_blob_reads_empty`
//! - `test_write_then_read_all`
//! - `test_write_replaces_whole_list`
//! - `test_empty_list_persists_as_empty_array`
//! - `test_corrupt_blob_reads_empty`
//! - `test_unreadable_entries_are_skipped`
//! - `test_form_shaped_blob_is_accepted`
//! - `test_stored_final_price_is_recomputed`
//! - `test_keys_are_isolated`
//! - `test_store_reloads_what_it_wrote`

/// Generate the adapter contract suite.
///
/// `$factory` must evaluate to a fresh `KeyValueStore + 'static`; it is
/// re-evaluated for each test.
#[macro_export]
macro_rules! persistence_adapter_tests {
    ($factory:expr) => {
        mod persistence_adapter_contract_tests {
            use super::*;
            use stockroom::core::entity::{Category, ProductRecord};
            use stockroom::core::store::ProductStore;
            use stockroom::storage::{BlobAdapter, KeyValueStore, PersistenceAdapter};

            fn adapter() -> BlobAdapter<impl KeyValueStore> {
                BlobAdapter::new($factory)
            }

            #[test]
            fn test_missing_blob_reads_empty() {
                let adapter = adapter();
                assert!(adapter.read_all().is_empty());
            }

            #[test]
            fn test_write_then_read_all() {
                let adapter = adapter();
                let records = vec![
                    record("1", "Milk", Category::Dairy, 10.0),
                    ProductRecord::new(
                        "2",
                        "Bread",
                        Category::Bakery,
                        Some("sourdough".into()),
                        Some(date(2030, 1, 1)),
                        3.0,
                        5.0,
                        20.0,
                    ),
                ];
                adapter.write_all(&records).unwrap();

                let read = adapter.read_all();
                assert_eq!(read, records);
                assert_eq!(read[1].final_price(), 4.0);
            }

            #[test]
            fn test_write_replaces_whole_list() {
                let adapter = adapter();
                adapter.write_all(&numbered(5)).unwrap();
                adapter.write_all(&numbered(2)).unwrap();

                let ids: Vec<_> = adapter.read_all().into_iter().map(|r| r.id).collect();
                assert_eq!(ids, vec!["1", "2"]);
            }

            #[test]
            fn test_empty_list_persists_as_empty_array() {
                let adapter = adapter();
                adapter.write_all(&numbered(1)).unwrap();
                adapter.write_all(&[]).unwrap();

                let raw = adapter.backend().get(adapter.key()).unwrap();
                assert_eq!(raw.as_deref(), Some("[]"));
                assert!(adapter.read_all().is_empty());
            }

            #[test]
            fn test_corrupt_blob_reads_empty() {
                let adapter = adapter();
                adapter.backend().set(adapter.key(), "[{\"id\": ").unwrap();
                assert!(adapter.read_all().is_empty());
                assert!(adapter.try_read_all().is_err());
            }

            #[test]
            fn test_unreadable_entries_are_skipped() {
                let adapter = adapter();
                let blob = r#"[
                    {"id":"1","name":"Milk","category":"Dairy","costPrice":10,"sellPrice":20,"discount":10},
                    {"id":"2","name":"TV","category":"Electronics","costPrice":100,"sellPrice":200},
                    {"id":"3","name":"Bread","category":"Bakery","costPrice":2,"sellPrice":4}
                ]"#;
                adapter.backend().set(adapter.key(), blob).unwrap();

                let ids: Vec<_> = adapter.read_all().into_iter().map(|r| r.id).collect();
                assert_eq!(ids, vec!["1", "3"]);
            }

            #[test]
            fn test_form_shaped_blob_is_accepted() {
                let adapter = adapter();
                let blob = r#"[{
                    "id": 3,
                    "name": "Juice",
                    "category": "Beverages",
                    "description": "",
                    "expiryDate": "",
                    "costPrice": "4",
                    "sellPrice": "10",
                    "discount": "50",
                    "finalPrice": 5
                }]"#;
                adapter.backend().set(adapter.key(), blob).unwrap();

                let read = adapter.read_all();
                assert_eq!(read.len(), 1);
                assert_eq!(read[0].id, "3");
                assert_eq!(read[0].description, None);
                assert_eq!(read[0].expiry_date, None);
                assert_eq!(read[0].cost_price, 4.0);
                assert_eq!(read[0].final_price(), 5.0);
            }

            #[test]
            fn test_stored_final_price_is_recomputed() {
                let adapter = adapter();
                let blob = r#"[{"id":"1","name":"Milk","category":"Dairy",
                    "costPrice":10,"sellPrice":20,"discount":10,"finalPrice":999}]"#;
                adapter.backend().set(adapter.key(), blob).unwrap();

                assert_eq!(adapter.read_all()[0].final_price(), 18.0);
            }

            #[test]
            fn test_keys_are_isolated() {
                let adapter = BlobAdapter::with_key($factory, "shop-a");
                adapter.write_all(&numbered(2)).unwrap();

                assert_eq!(adapter.backend().get("products").unwrap(), None);
                assert_eq!(adapter.read_all().len(), 2);
            }

            #[test]
            fn test_store_reloads_what_it_wrote() {
                let backend = std::sync::Arc::new($factory);
                let mut store = ProductStore::new(
                    Box::new(BlobAdapter::new(SharedBackend(backend.clone()))),
                    fixed_clock(),
                    10,
                );
                store.load();
                store.add(milk_draft()).unwrap();

                let mut reopened = ProductStore::new(
                    Box::new(BlobAdapter::new(SharedBackend(backend))),
                    fixed_clock(),
                    10,
                );
                reopened.load();
                assert_eq!(reopened.items(), store.items());
            }

            struct SharedBackend<K>(std::sync::Arc<K>);

            impl<K: KeyValueStore> KeyValueStore for SharedBackend<K> {
                fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
                    self.0.get(key)
                }

                fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
                    self.0.set(key, value)
                }
            }
        }
    };
}
