use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::calendar::{self, DayMarking};
use crate::classify::{classify, IrregularityStatus, Thresholds};
use crate::clock::Clock;
use crate::error::{CycleError, StorageError};
use crate::models::{CycleData, DayNote, PeriodRecord};
use crate::outlook::{self, CycleOutlook};
use crate::stats::CycleStatistics;
use crate::storage::Storage;
use crate::store::PeriodStore;

#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub statistics: CycleStatistics,
    pub status: IrregularityStatus,
}

type Slot = Arc<Mutex<Option<PeriodStore>>>;

/// Per-user period stores backed by a key-value storage.
///
/// The map lock is only held to look up or insert a user's slot; the slot's
/// own lock covers load, validate, mutate and persist for that user. Reads for
/// users without persisted data are served from an empty store and leave the
/// map untouched. A failed load starts the user empty and a failed save is
/// only logged: the in-memory state stays authoritative for the process.
pub struct CycleTracker {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    thresholds: Thresholds,
    stores: Mutex<HashMap<Uuid, Slot>>,
}

pub fn storage_key(user_id: Uuid) -> String {
    format!("cycleData:{}", user_id)
}

impl CycleTracker {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>, thresholds: Thresholds) -> Self {
        Self {
            storage,
            clock,
            thresholds,
            stores: Mutex::new(HashMap::new()),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    async fn slot(&self, user_id: Uuid) -> Slot {
        self.stores.lock().await.entry(user_id).or_default().clone()
    }

    async fn ensure_loaded<'a>(
        &self,
        user_id: Uuid,
        slot: &'a mut Option<PeriodStore>,
    ) -> &'a mut PeriodStore {
        if slot.is_none() {
            *slot = Some(self.load(user_id).await.unwrap_or_default());
        }
        slot.get_or_insert_with(PeriodStore::new)
    }

    async fn read<R>(&self, user_id: Uuid, f: impl FnOnce(&PeriodStore) -> R) -> R {
        let cached = self.stores.lock().await.get(&user_id).cloned();
        if let Some(slot) = cached {
            let mut guard = slot.lock().await;
            let store = self.ensure_loaded(user_id, &mut *guard).await;
            return f(&*store);
        }

        match self.load(user_id).await {
            Some(store) => {
                let result = f(&store);
                self.stores
                    .lock()
                    .await
                    .entry(user_id)
                    .or_insert_with(|| Arc::new(Mutex::new(Some(store))));
                result
            }
            None => f(&PeriodStore::new()),
        }
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<CycleData>, StorageError> {
        let Some(raw) = self.storage.get(&storage_key(user_id)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// `None` when nothing usable is stored for the user.
    async fn load(&self, user_id: Uuid) -> Option<PeriodStore> {
        let data = match self.fetch(user_id).await {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("⚠️ Failed to load cycle data for {}: {}", user_id, e);
                return None;
            }
        };

        let periods = data.periods.len();
        match PeriodStore::from_data(data) {
            Ok(store) => {
                tracing::debug!("Loaded {} period records for {}", periods, user_id);
                Some(store)
            }
            Err(e) => {
                tracing::warn!("⚠️ Stored cycle data for {} is inconsistent: {}", user_id, e);
                None
            }
        }
    }

    async fn save(&self, user_id: Uuid, store: &PeriodStore) -> Result<(), StorageError> {
        let raw = serde_json::to_string(store.data())?;
        self.storage.set(&storage_key(user_id), &raw).await
    }

    async fn persist(&self, user_id: Uuid, store: &PeriodStore) {
        if let Err(e) = self.save(user_id, store).await {
            tracing::warn!("⚠️ Failed to save cycle data for {}: {}", user_id, e);
        }
    }

    pub async fn log_period_start(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<PeriodRecord, CycleError> {
        let today = self.today();
        let slot = self.slot(user_id).await;
        let mut guard = slot.lock().await;
        let store = self.ensure_loaded(user_id, &mut *guard).await;
        let record = store
            .log_period_start(date, today)
            .map_err(|e| {
                tracing::debug!("Rejected period start {} for {}: {}", date, user_id, e);
                e
            })?
            .clone();

        tracing::info!("🩸 Period started {} for {}", date, user_id);
        self.persist(user_id, store).await;
        Ok(record)
    }

    pub async fn log_period_end(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<PeriodRecord, CycleError> {
        let today = self.today();
        let slot = self.slot(user_id).await;
        let mut guard = slot.lock().await;
        let store = self.ensure_loaded(user_id, &mut *guard).await;
        let record = store
            .log_period_end(date, today)
            .map_err(|e| {
                tracing::debug!("Rejected period end {} for {}: {}", date, user_id, e);
                e
            })?
            .clone();

        tracing::info!("✅ Period ended {} for {}", date, user_id);
        self.persist(user_id, store).await;
        Ok(record)
    }

    pub async fn records(&self, user_id: Uuid) -> Vec<PeriodRecord> {
        self.read(user_id, |store| store.records().to_vec()).await
    }

    pub async fn is_date_locked(&self, user_id: Uuid, date: NaiveDate) -> bool {
        let today = self.today();
        self.read(user_id, |store| store.is_date_locked(date, today))
            .await
    }

    pub async fn report(&self, user_id: Uuid) -> CycleReport {
        let statistics = self
            .read(user_id, |store| CycleStatistics::compute(store.records()))
            .await;
        let status = classify(&statistics, &self.thresholds);
        CycleReport { statistics, status }
    }

    pub async fn calendar(
        &self,
        user_id: Uuid,
        selected: Option<NaiveDate>,
    ) -> BTreeMap<NaiveDate, DayMarking> {
        let today = self.today();
        self.read(user_id, |store| {
            calendar::project(store.records(), store.notes(), selected, today)
        })
        .await
    }

    pub async fn outlook(&self, user_id: Uuid) -> Option<CycleOutlook> {
        let today = self.today();
        self.read(user_id, |store| {
            let stats = CycleStatistics::compute(store.records());
            outlook::outlook(store.records(), &stats, today)
        })
        .await
    }

    pub async fn set_alerts_enabled(&self, user_id: Uuid, enabled: bool) {
        let slot = self.slot(user_id).await;
        let mut guard = slot.lock().await;
        let store = self.ensure_loaded(user_id, &mut *guard).await;
        store.set_alerts_enabled(enabled);
        tracing::info!("🔔 Cycle alerts {} for {}", if enabled { "on" } else { "off" }, user_id);
        self.persist(user_id, store).await;
    }

    pub async fn alerts_enabled(&self, user_id: Uuid) -> bool {
        self.read(user_id, |store| store.alerts_enabled()).await
    }

    pub async fn set_note(&self, user_id: Uuid, date: NaiveDate, note: DayNote) {
        let slot = self.slot(user_id).await;
        let mut guard = slot.lock().await;
        let store = self.ensure_loaded(user_id, &mut *guard).await;
        store.set_note(date, note);
        self.persist(user_id, store).await;
    }

    /// Returns false when there was no note for `date`.
    pub async fn remove_note(&self, user_id: Uuid, date: NaiveDate) -> bool {
        let slot = self.slot(user_id).await;
        let mut guard = slot.lock().await;
        let store = self.ensure_loaded(user_id, &mut *guard).await;
        if store.remove_note(date).is_none() {
            return false;
        }
        self.persist(user_id, store).await;
        true
    }

    pub async fn notes(&self, user_id: Uuid) -> BTreeMap<NaiveDate, DayNote> {
        self.read(user_id, |store| store.notes().clone()).await
    }
}
