//! Snapshot-file store
//!
//! Generic `Repository` implementation that keeps one entity type fully in
//! memory and rewrites its snapshot file on every mutation. The snapshot
//! holds the records and the identity counter:
//!
//! ```json
//! { "records": [ ... ], "nextId": 4 }
//! ```
//!
//! Each mutation runs as a transaction under a per-store mutex: the change
//! is applied to a working copy, the copy is written to disk, and only a
//! successful write commits it to memory. A failed write surfaces as
//! `DomainError::Storage` and leaves both the records and the counter
//! untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::entities::{Identity, Record};
use crate::domain::ports::Repository;
use crate::error::DomainError;

const FIRST_ID: Identity = 1;

fn first_id() -> Identity {
    FIRST_ID
}

#[derive(Clone, Serialize, Deserialize)]
struct Snapshot<R> {
    records: Vec<R>,
    #[serde(rename = "nextId", default = "first_id")]
    next_id: Identity,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

/// File-backed store for one record type
pub struct JsonFileStore<R: Record> {
    path: PathBuf,
    state: Mutex<Snapshot<R>>,
}

impl<R: Record> JsonFileStore<R> {
    /// Load the snapshot at `path`.
    ///
    /// A missing file starts an empty collection. A malformed file is
    /// logged and also starts an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = load_snapshot::<R>(&path).await;

        tracing::info!(
            collection = R::COLLECTION,
            path = %path.display(),
            records = snapshot.records.len(),
            next_id = snapshot.next_id,
            "Loaded snapshot"
        );

        Self {
            path,
            state: Mutex::new(snapshot),
        }
    }

    /// Load `<dir>/<collection>.json`
    pub async fn open_in(dir: &Path) -> Self {
        Self::open(dir.join(format!("{}.json", R::COLLECTION))).await
    }

    /// First record matching `predicate`
    pub(crate) async fn find<P>(&self, predicate: P) -> Option<R>
    where
        P: Fn(&R) -> bool + Send,
    {
        let state = self.state.lock().await;
        state.records.iter().find(|r| predicate(*r)).cloned()
    }

    /// All records matching `predicate`, in insertion order
    pub(crate) async fn filter<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool + Send,
    {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }

    /// Run `change` against a working copy and commit it once persisted.
    ///
    /// `change` returns `None` when there is nothing to commit; the
    /// snapshot file is then left alone.
    async fn transact<T, F>(&self, change: F) -> Result<Option<T>, DomainError>
    where
        F: FnOnce(&mut Snapshot<R>) -> Option<T> + Send,
        T: Send,
    {
        let mut state = self.state.lock().await;
        let mut working = state.clone();

        let Some(outcome) = change(&mut working) else {
            return Ok(None);
        };

        self.persist(&working).await?;
        *state = working;
        Ok(Some(outcome))
    }

    async fn persist(&self, snapshot: &Snapshot<R>) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| DomainError::Internal(format!("serializing {}: {}", R::COLLECTION, e)))?;

        let result = write_atomically(&self.path, &bytes).await;
        if let Err(ref e) = result {
            tracing::warn!(
                collection = R::COLLECTION,
                path = %self.path.display(),
                "Failed to persist snapshot: {}",
                e
            );
        }

        result.map_err(|e| {
            DomainError::Storage(format!(
                "writing {} to {}: {}",
                R::COLLECTION,
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl<R: Record> Repository<R> for JsonFileStore<R> {
    async fn get_all(&self) -> Result<Vec<R>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.records.clone())
    }

    async fn get_by_id(&self, id: Identity) -> Result<Option<R>, DomainError> {
        Ok(self.find(|r| r.id() == id).await)
    }

    async fn create(&self, new: R::New) -> Result<R, DomainError> {
        let created = self
            .transact(move |snapshot| {
                let id = snapshot.next_id;
                snapshot.next_id = id.checked_add(1)?;

                let record = R::from_new(id, new);
                snapshot.records.push(record.clone());
                Some(record)
            })
            .await?;

        match created {
            Some(record) => {
                tracing::debug!(collection = R::COLLECTION, id = record.id(), "Created record");
                Ok(record)
            }
            None => {
                tracing::error!(collection = R::COLLECTION, "Identity counter exhausted");
                Err(DomainError::Storage(format!(
                    "identity counter for {} exhausted",
                    R::COLLECTION
                )))
            }
        }
    }

    async fn update(&self, id: Identity, patch: R::Patch) -> Result<Option<R>, DomainError> {
        self.transact(move |snapshot| {
            let slot = snapshot.records.iter_mut().find(|r| r.id() == id)?;
            let updated = slot.patched(patch);
            *slot = updated.clone();
            Some(updated)
        })
        .await
    }

    async fn delete(&self, id: Identity) -> Result<bool, DomainError> {
        let removed = self
            .transact(|snapshot| {
                let index = snapshot.records.iter().position(|r| r.id() == id)?;
                Some(snapshot.records.remove(index))
            })
            .await?;

        Ok(removed.is_some())
    }
}

async fn load_snapshot<R: Record>(path: &Path) -> Snapshot<R> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Snapshot::default(),
        Err(e) => {
            tracing::error!(
                collection = R::COLLECTION,
                path = %path.display(),
                "Failed to read snapshot, starting empty: {}",
                e
            );
            return Snapshot::default();
        }
    };

    let mut snapshot: Snapshot<R> = match serde_json::from_slice(&bytes) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(
                collection = R::COLLECTION,
                path = %path.display(),
                "Malformed snapshot, starting empty: {}",
                e
            );
            return Snapshot::default();
        }
    };

    // Never issue an identity that is already in use. A record at the top
    // of the range pins the counter there, which exhausts it.
    let floor = snapshot
        .records
        .iter()
        .map(|r| r.id().saturating_add(1))
        .max()
        .unwrap_or(FIRST_ID)
        .max(FIRST_ID);
    if snapshot.next_id < floor {
        tracing::warn!(
            collection = R::COLLECTION,
            stored = snapshot.next_id,
            repaired = floor,
            "Identity counter behind stored records"
        );
        snapshot.next_id = floor;
    }

    snapshot
}

/// Write to a sibling temp file, then rename over the target
async fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::entities::{Medico, MedicoPatch};
    use crate::test_utils::new_medico;

    async fn store_in(dir: &TempDir) -> JsonFileStore<Medico> {
        JsonFileStore::open_in(dir.path()).await
    }

    fn snapshot_json(dir: &TempDir) -> serde_json::Value {
        let raw = std::fs::read_to_string(dir.path().join("medicos.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let first = store.create(new_medico(100)).await.unwrap();
        let second = store.create(new_medico(200)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let json = snapshot_json(&dir);
        assert_eq!(json["nextId"], 3);
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["records"][1]["matricula"], 200);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let first = store.create(new_medico(100)).await.unwrap();
        let second = store.create(new_medico(200)).await.unwrap();
        assert!(store.delete(second.id).await.unwrap());
        assert!(store.delete(first.id).await.unwrap());

        let third = store.create(new_medico(300)).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn reopen_restores_records_and_counter() {
        let dir = TempDir::new().unwrap();
        {
            let store = store_in(&dir).await;
            store.create(new_medico(100)).await.unwrap();
            store.create(new_medico(200)).await.unwrap();
            store.delete(2).await.unwrap();
        }

        let reopened = store_in(&dir).await;
        let all = reopened.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].matricula, 100);

        let next = reopened.create(new_medico(300)).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn malformed_snapshot_starts_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("medicos.json"), "{ not json").unwrap();

        let store = store_in(&dir).await;
        assert!(store.get_all().await.unwrap().is_empty());
        assert_eq!(store.create(new_medico(100)).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn counter_behind_records_is_repaired() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("medicos.json"),
            r#"{"records": [{"id": 7, "matricula": 1, "nombre": "N", "email": "e", "especialidad": "E"}], "nextId": 2}"#,
        )
        .unwrap();

        let store = store_in(&dir).await;
        assert_eq!(store.create(new_medico(100)).await.unwrap().id, 8);
    }

    #[tokio::test]
    async fn exhausted_counter_fails_create_without_writing() {
        let dir = TempDir::new().unwrap();
        let raw = format!(r#"{{"records": [], "nextId": {}}}"#, Identity::MAX);
        std::fs::write(dir.path().join("medicos.json"), &raw).unwrap();

        let store = store_in(&dir).await;
        let err = store.create(new_medico(100)).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(store.get_all().await.unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("medicos.json")).unwrap(),
            raw
        );
    }

    #[tokio::test]
    async fn record_at_max_identity_loads_and_exhausts_counter() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("medicos.json"),
            format!(
                r#"{{"records": [{{"id": {}, "matricula": 1, "nombre": "N", "email": "e", "especialidad": "E"}}], "nextId": 2}}"#,
                Identity::MAX
            ),
        )
        .unwrap();

        let store = store_in(&dir).await;
        assert_eq!(store.get_all().await.unwrap().len(), 1);
        assert!(store.get_by_id(Identity::MAX).await.unwrap().is_some());

        let err = store.create(new_medico(100)).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_all_returns_an_owned_copy() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        store.create(new_medico(100)).await.unwrap();

        let mut copy = store.get_all().await.unwrap();
        copy.clear();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_returns_none_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        let result = store.update(42, MedicoPatch::default()).await.unwrap();

        assert!(result.is_none());
        assert!(!dir.path().join("medicos.json").exists());
    }

    #[tokio::test]
    async fn update_patches_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        let created = store.create(new_medico(100)).await.unwrap();

        let updated = store
            .update(
                created.id,
                MedicoPatch {
                    especialidad: Some("Neurologia".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.especialidad, "Neurologia");
        assert_eq!(updated.nombre, created.nombre);
        assert_eq!(snapshot_json(&dir)["records"][0]["especialidad"], "Neurologia");
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        store.create(new_medico(100)).await.unwrap();

        assert!(!store.delete(9).await.unwrap());
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_write_commits_nothing() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let store: JsonFileStore<Medico> = JsonFileStore::open(blocker.join("medicos.json")).await;
        let err = store.create(new_medico(100)).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(store.get_all().await.unwrap().is_empty());
        assert_eq!(store.state.lock().await.next_id, FIRST_ID);
    }

    #[tokio::test]
    async fn concurrent_creates_issue_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir).await);

        let handles: Vec<_> = (1..=20)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.create(new_medico(n)).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(snapshot_json(&dir)["nextId"], 21);
    }
}
