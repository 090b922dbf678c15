//! Behavioral checks every [`KvStore`] backend must pass.

use serde::{Deserialize, Serialize};
use serde_json::json;

use curricula_core::Batch;

use crate::error::StorageError;
use crate::traits::{KvStore, KvStoreExt};

pub fn get_set_delete(store: &dyn KvStore) {
    assert_eq!(store.get("asig:CS101").unwrap(), None);

    store.set("asig:CS101", json!({ "n": 1 })).unwrap();
    assert_eq!(store.get("asig:CS101").unwrap(), Some(json!({ "n": 1 })));

    store.set("asig:CS101", json!({ "n": 2 })).unwrap();
    assert_eq!(store.get("asig:CS101").unwrap(), Some(json!({ "n": 2 })));

    assert!(store.delete("asig:CS101").unwrap());
    assert!(!store.delete("asig:CS101").unwrap());
    assert_eq!(store.get("asig:CS101").unwrap(), None);
}

pub fn mget_is_positional(store: &dyn KvStore) {
    store.set("b", json!("B")).unwrap();
    store.set("a", json!("A")).unwrap();

    let keys = vec!["a".to_string(), "missing".to_string(), "b".to_string()];
    assert_eq!(
        store.mget(&keys).unwrap(),
        vec![Some(json!("A")), None, Some(json!("B"))]
    );
    assert!(store.mget(&[]).unwrap().is_empty());
}

pub fn batch_applies_in_order(store: &dyn KvStore) {
    store.set("vinculo:A:CS101", json!({ "semestre": 1 })).unwrap();

    let mut batch = Batch::new();
    batch
        .delete("vinculo:A:CS101")
        .set("asig:CS101", json!({ "v": 1 }))
        .set("vinculo:B:CS101", json!({ "semestre": 2 }))
        .set("asig:CS101", json!({ "v": 2 }))
        .delete("never-existed");
    store.exec(batch).unwrap();

    assert_eq!(store.get("vinculo:A:CS101").unwrap(), None);
    assert_eq!(store.get("asig:CS101").unwrap(), Some(json!({ "v": 2 })));
    assert_eq!(
        store.get("vinculo:B:CS101").unwrap(),
        Some(json!({ "semestre": 2 }))
    );

    store.exec(Batch::new()).unwrap();
}

pub fn scan_prefix_is_ordered_and_bounded(store: &dyn KvStore) {
    for key in [
        "vinculo:INF:MAT2",
        "vinculo:INFO:CS101",
        "vinculo:INF:CS101",
        "asig:CS101",
        "vinculo:IND:X",
        "vinculo:INF:",
    ] {
        store.set(key, json!(null)).unwrap();
    }

    assert_eq!(
        store.scan_prefix("vinculo:INF:").unwrap(),
        vec!["vinculo:INF:", "vinculo:INF:CS101", "vinculo:INF:MAT2"]
    );
    assert_eq!(store.scan_prefix("asig:").unwrap(), vec!["asig:CS101"]);
    assert!(store.scan_prefix("user:").unwrap().is_empty());
    assert_eq!(store.scan_prefix("").unwrap().len(), 6);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Row {
    n: u32,
}

pub fn typed_records(store: &dyn KvStore) {
    store.set("row:1", json!({ "n": 1 })).unwrap();
    store.set("row:3", json!({ "n": 3 })).unwrap();
    store.set("row:bad", json!("not a row")).unwrap();

    assert_eq!(store.get_record::<Row>("row:1").unwrap(), Some(Row { n: 1 }));
    assert_eq!(store.get_record::<Row>("row:2").unwrap(), None);

    let keys = vec!["row:1".to_string(), "row:2".to_string(), "row:3".to_string()];
    let rows: Vec<(String, Row)> = store.get_records(&keys).unwrap();
    assert_eq!(
        rows,
        vec![("row:1".to_string(), Row { n: 1 }), ("row:3".to_string(), Row { n: 3 })]
    );

    let err = store.get_record::<Row>("row:bad").unwrap_err();
    assert!(matches!(err, StorageError::CorruptRecord { ref key, .. } if key == "row:bad"));
}
