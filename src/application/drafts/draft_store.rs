//! DraftStore - keyed CRUD over one namespace of locally persisted drafts.
//!
//! The namespace is stored as a single JSON array and is read in full and
//! rewritten in full on every mutation. Array elements that do not read as
//! a draft are skipped on load and written back untouched. Mutations hold an in-process lock
//! across the read-modify-write, so two saves through the same store never
//! interleave. Writers in other processes are not coordinated with: the
//! last full rewrite wins.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ExternalChange, ExternalChangeListeners};
use crate::domain::draft::{Draft, DraftInput, DraftKind};
use crate::domain::foundation::{Clock, DraftId, ListenerId, ParseError, SystemClock};
use crate::ports::{KeyValueStore, StorageError};

/// Namespace for system drafts (packing lists, daily reports).
pub const SYSTEM_DRAFTS: &str = "micsa_drafts";

/// Namespace for locally kept employee records.
pub const EMPLOYEES: &str = "micsa_employees";

/// Namespace for locally kept training records.
pub const TRAININGS: &str = "micsa_trainings";

/// Errors surfaced by draft persistence.
#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("Draft storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize drafts: {0}")]
    SerializationFailed(String),
}

/// One element of the stored array.
#[derive(Debug, Clone)]
enum StoredEntry {
    Draft(Draft),
    /// Written by another schema version; kept as is.
    Unreadable(Value),
}

impl StoredEntry {
    fn draft(&self) -> Option<&Draft> {
        match self {
            StoredEntry::Draft(draft) => Some(draft),
            StoredEntry::Unreadable(_) => None,
        }
    }

    fn is_draft(&self, id: &DraftId) -> bool {
        self.draft().is_some_and(|d| &d.id == id)
    }
}

/// Drafts stored under one namespace key.
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
    listeners: ExternalChangeListeners,
}

impl DraftStore {
    /// Creates a store for `namespace` using the wall clock.
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self::with_clock(store, namespace, Arc::new(SystemClock))
    }

    /// Creates a store that timestamps drafts with `clock`.
    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        namespace: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            clock,
            write_lock: Mutex::new(()),
            listeners: ExternalChangeListeners::new(),
        }
    }

    /// The namespace key this store reads and writes.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Every draft in the namespace, newest first.
    ///
    /// An absent collection, or one that is not a JSON array, reads as
    /// empty. Elements that are not drafts are left out. Only a failing
    /// store is reported as an error.
    pub async fn get_all(&self) -> Result<Vec<Draft>, DraftStoreError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter_map(|entry| match entry {
                StoredEntry::Draft(draft) => Some(draft),
                StoredEntry::Unreadable(_) => None,
            })
            .collect())
    }

    /// Looks up one draft.
    pub async fn get_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DraftStoreError> {
        Ok(self.get_all().await?.into_iter().find(|d| &d.id == id))
    }

    /// Drafts of one kind, filtered without touching payloads.
    pub async fn list_by_kind(&self, kind: &DraftKind) -> Result<Vec<Draft>, DraftStoreError> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|d| &d.kind == kind)
            .collect())
    }

    /// Saves a draft.
    ///
    /// If `input.id` names an existing draft it is replaced in place and
    /// keeps its `createdAt`. Otherwise a new draft (with the given id, or
    /// a fresh one) is put at the front of the collection.
    pub async fn save(&self, input: DraftInput) -> Result<Draft, DraftStoreError> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut entries = self.load().await?;

        let existing = input
            .id
            .as_ref()
            .and_then(|id| entries.iter().position(|e| e.is_draft(id)));

        let saved = match existing.map(|index| &mut entries[index]) {
            Some(StoredEntry::Draft(draft)) => {
                draft.revise(input, now);
                draft.clone()
            }
            _ => {
                let id = input.id.clone().unwrap_or_default();
                let draft = Draft::create(id, input, now);
                entries.insert(0, StoredEntry::Draft(draft.clone()));
                draft
            }
        };

        self.write_all(&entries).await?;
        tracing::debug!(
            namespace = %self.namespace,
            id = %saved.id,
            kind = %saved.kind,
            replaced = existing.is_some(),
            "saved draft"
        );
        Ok(saved)
    }

    /// Removes a draft. Removing an unknown id is a no-op.
    pub async fn delete(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;

        let before = entries.len();
        entries.retain(|e| !e.is_draft(id));
        if entries.len() == before {
            return Ok(());
        }

        self.write_all(&entries).await?;
        tracing::debug!(namespace = %self.namespace, %id, "deleted draft");
        Ok(())
    }

    /// Removes a draft once its document reached the authoritative store.
    pub async fn discard_on_submit(&self, id: &DraftId) -> Result<(), DraftStoreError> {
        self.delete(id).await?;
        tracing::info!(namespace = %self.namespace, %id, "draft discarded after submission");
        Ok(())
    }

    /// Registers a callback for writes made to this namespace elsewhere.
    pub fn on_external_change<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&ExternalChange) + Send + Sync + 'static,
    {
        self.listeners.add(callback)
    }

    /// Unregisters a callback added with [`Self::on_external_change`].
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Reports that `key` was rewritten by another process.
    ///
    /// Listeners only fire when `key` is this store's namespace. Returns
    /// how many listeners were invoked.
    pub fn notify_external_change(&self, key: &str) -> usize {
        if key != self.namespace {
            return 0;
        }
        self.listeners.notify(&ExternalChange {
            key: key.to_string(),
        })
    }

    async fn load(&self) -> Result<Vec<StoredEntry>, DraftStoreError> {
        let raw = match self.store.get(&self.namespace).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let elements = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(elements) => elements,
            Err(e) => {
                let error = ParseError::corrupt_collection(&self.namespace, e.to_string());
                tracing::warn!(error = %error, "reading draft collection as empty");
                return Ok(Vec::new());
            }
        };

        Ok(elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| match Draft::deserialize(&element) {
                Ok(draft) => StoredEntry::Draft(draft),
                Err(e) => {
                    tracing::warn!(
                        namespace = %self.namespace,
                        index,
                        error = %e,
                        "skipping stored element that is not a draft"
                    );
                    StoredEntry::Unreadable(element)
                }
            })
            .collect())
    }

    async fn write_all(&self, entries: &[StoredEntry]) -> Result<(), DraftStoreError> {
        let elements = entries
            .iter()
            .map(|entry| match entry {
                StoredEntry::Draft(draft) => serde_json::to_value(draft),
                StoredEntry::Unreadable(element) => Ok(element.clone()),
            })
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| DraftStoreError::SerializationFailed(e.to_string()))?;
        let json = serde_json::to_string(&elements)
            .map_err(|e| DraftStoreError::SerializationFailed(e.to_string()))?;

        self.store.set(&self.namespace, &json).await.map_err(|e| {
            tracing::error!(namespace = %self.namespace, error = %e, "failed to persist drafts");
            DraftStoreError::from(e)
        })
    }
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("namespace", &self.namespace)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::foundation::{FixedClock, Timestamp};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn start() -> Timestamp {
        Timestamp::parse_date("t", "2024-06-01T08:00:00Z").unwrap()
    }

    fn setup() -> (DraftStore, InMemoryKeyValueStore, FixedClock) {
        let kv = InMemoryKeyValueStore::new();
        let clock = FixedClock::new(start());
        let store = DraftStore::with_clock(Arc::new(kv.clone()), SYSTEM_DRAFTS, Arc::new(clock.clone()));
        (store, kv, clock)
    }

    fn packing(folio: &str) -> DraftInput {
        DraftInput::new(DraftKind::PackingList, json!({ "folio": folio, "items": [] }))
            .with_metadata("folio", folio)
    }

    #[tokio::test]
    async fn test_get_all_empty_when_absent() {
        let (store, _, _) = setup();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_get_by_id_round_trips_payload() {
        let (store, _, _) = setup();

        let saved = store.save(packing("PL-1")).await.unwrap();
        let loaded = store.get_by_id(&saved.id).await.unwrap().unwrap();

        assert_eq!(loaded.payload, json!({ "folio": "PL-1", "items": [] }));
        assert_eq!(loaded.created_at(), start());
        assert_eq!(loaded.last_modified_at(), start());
    }

    #[tokio::test]
    async fn test_second_save_preserves_created_at() {
        let (store, _, clock) = setup();

        let first = store.save(packing("PL-1")).await.unwrap();
        clock.advance_millis(60_000);
        let second = store
            .save(packing("PL-1 rev").with_id(first.id.clone()))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at(), first.created_at());
        assert!(second.last_modified_at().is_after(&first.last_modified_at()));

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].metadata_str("folio"), Some("PL-1 rev"));
    }

    #[tokio::test]
    async fn test_new_drafts_are_prepended() {
        let (store, _, _) = setup();

        let a = store.save(packing("A")).await.unwrap();
        let b = store.save(packing("B")).await.unwrap();

        let ids: Vec<_> = store.get_all().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_replacing_keeps_position() {
        let (store, _, _) = setup();

        let a = store.save(packing("A")).await.unwrap();
        let b = store.save(packing("B")).await.unwrap();
        store.save(packing("A2").with_id(a.id.clone())).await.unwrap();

        let ids: Vec<_> = store.get_all().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_unknown_caller_id_creates_new_draft_with_that_id() {
        let (store, _, _) = setup();
        let id = DraftId::try_from_string("1717228800000").unwrap();

        let saved = store.save(packing("PL-7").with_id(id.clone())).await.unwrap();

        assert_eq!(saved.id, id);
        assert_eq!(saved.created_at(), start());
    }

    #[tokio::test]
    async fn test_delete_removes_draft() {
        let (store, _, _) = setup();
        let saved = store.save(packing("PL-1")).await.unwrap();

        store.delete(&saved.id).await.unwrap();

        assert!(store.get_by_id(&saved.id).await.unwrap().is_none());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (store, _, _) = setup();
        store.save(packing("PL-1")).await.unwrap();

        store.delete(&DraftId::new()).await.unwrap();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_collection_reads_as_empty() {
        let (store, kv, _) = setup();
        kv.seed(SYSTEM_DRAFTS, "{not json").await;

        assert!(store.get_all().await.unwrap().is_empty());
        assert!(store.get_by_id(&DraftId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_array_collection_reads_as_empty() {
        let (store, kv, _) = setup();
        kv.seed(SYSTEM_DRAFTS, "{\"folio\": \"PL-1\"}").await;

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_element_does_not_hide_other_drafts() {
        let (store, kv, _) = setup();
        let good = Draft::create(DraftId::try_from_string("kept").unwrap(), packing("PL-1"), start());
        let legacy = json!({ "id": 1712345678901_u64, "type": "PACKING_LIST", "data": {} });
        kv.seed(SYSTEM_DRAFTS, &json!([good, legacy]).to_string()).await;

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].metadata_str("folio"), Some("PL-1"));
    }

    #[tokio::test]
    async fn test_save_keeps_unreadable_elements_and_existing_drafts() {
        let (store, kv, _) = setup();
        let good = Draft::create(DraftId::try_from_string("kept").unwrap(), packing("PL-1"), start());
        let legacy = json!({ "id": 1712345678901_u64, "type": "PACKING_LIST", "data": {} });
        kv.seed(SYSTEM_DRAFTS, &json!([good, legacy]).to_string()).await;

        let saved = store.save(packing("PL-2")).await.unwrap();

        let raw: Value = serde_json::from_str(&kv.get(SYSTEM_DRAFTS).await.unwrap().unwrap()).unwrap();
        let elements = raw.as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0]["id"], saved.id.as_str());
        assert_eq!(elements[1]["id"], "kept");
        assert_eq!(elements[2], legacy);

        let ids: Vec<_> = store.get_all().await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![saved.id, good.id]);
    }

    #[tokio::test]
    async fn test_delete_keeps_unreadable_elements() {
        let (store, kv, _) = setup();
        let good = Draft::create(DraftId::try_from_string("kept").unwrap(), packing("PL-1"), start());
        let legacy = json!({ "id": "", "kind": "PACKING_LIST" });
        kv.seed(SYSTEM_DRAFTS, &json!([good, legacy]).to_string()).await;

        store.delete(&good.id).await.unwrap();

        let raw: Value = serde_json::from_str(&kv.get(SYSTEM_DRAFTS).await.unwrap().unwrap()).unwrap();
        assert_eq!(raw, json!([legacy]));
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_from_save() {
        let (store, kv, _) = setup();
        store.save(packing("PL-1")).await.unwrap();
        kv.set_unavailable(true);

        let result = store.save(packing("PL-2")).await;

        assert!(matches!(
            result,
            Err(DraftStoreError::Storage(StorageError::Unavailable(_)))
        ));
        kv.set_unavailable(false);
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_quota_exceeded_is_not_silently_dropped() {
        let kv = InMemoryKeyValueStore::with_quota(64);
        let store = DraftStore::new(Arc::new(kv), SYSTEM_DRAFTS);

        let big = DraftInput::new(DraftKind::DailyReport, json!({ "notes": "x".repeat(200) }));
        let result = store.save(big).await;

        assert!(matches!(
            result,
            Err(DraftStoreError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_namespaces_do_not_collide() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        let drafts = DraftStore::new(Arc::clone(&kv), SYSTEM_DRAFTS);
        let trainings = DraftStore::new(Arc::clone(&kv), TRAININGS);

        drafts.save(packing("PL-1")).await.unwrap();

        assert_eq!(drafts.get_all().await.unwrap().len(), 1);
        assert!(trainings.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_kind_filters() {
        let (store, _, _) = setup();
        store.save(packing("PL-1")).await.unwrap();
        store
            .save(DraftInput::new(DraftKind::DailyReport, json!({ "crew": 4 })))
            .await
            .unwrap();

        let reports = store.list_by_kind(&DraftKind::DailyReport).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].payload["crew"], 4);
    }

    #[tokio::test]
    async fn test_discard_on_submit_deletes() {
        let (store, _, _) = setup();
        let saved = store.save(packing("PL-1")).await.unwrap();

        store.discard_on_submit(&saved.id).await.unwrap();

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_saves_through_one_store_keep_every_draft() {
        let (store, _, _) = setup();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save(packing(&format!("PL-{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.get_all().await.unwrap().len(), 10);
    }

    #[test]
    fn test_external_change_only_fires_for_own_namespace() {
        let (store, _, _) = setup();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = store.on_external_change(move |change| {
            assert_eq!(change.key, SYSTEM_DRAFTS);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(store.notify_external_change(EMPLOYEES), 0);
        assert_eq!(store.notify_external_change(SYSTEM_DRAFTS), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(store.remove_listener(id));
        assert_eq!(store.notify_external_change(SYSTEM_DRAFTS), 0);
    }
}
