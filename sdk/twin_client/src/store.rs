use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::ledger::{twin_key, Ledger, INDEX_KEY};
use crate::twin::{
    side_effect_label, DigitalTwin, TreatmentEntry, EFFECTIVENESS_MAX, EFFECTIVENESS_MIN,
};

/// Synchronizes the twin list against the ledger's key-value store.
///
/// The index blob (`twin_keys`) and the per-twin blobs are written in
/// separate transactions with no atomicity between them: a failure after the
/// record write but before the index append leaves an orphaned record the
/// list never shows. The store surfaces the failure and does not retry.
pub struct TwinStore<L: Ledger> {
    ledger: L,
}

impl<L: Ledger> TwinStore<L> {
    /// Wraps a ledger handle; fails fast if the store is unreachable.
    pub fn new(ledger: L) -> Result<Self, ClientError> {
        if !ledger.is_available() {
            return Err(ClientError::LedgerUnavailable);
        }
        Ok(Self { ledger })
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Loads every twin the index references, newest first.
    ///
    /// A corrupt index is treated as empty; a missing or corrupt twin blob
    /// is skipped. Neither aborts the load.
    pub fn load_all(&self) -> Result<Vec<DigitalTwin>, ClientError> {
        let ids = self.load_index()?;
        debug!(count = ids.len(), "loading twin index");

        let mut twins = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.try_load_twin(id)? {
                Some(twin) => twins.push(twin),
                None => warn!(%id, "skipping missing or unreadable twin record"),
            }
        }

        twins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(twins)
    }

    /// Loads a single twin; a missing or unreadable blob is `TwinNotFound`.
    pub fn get_twin(&self, id: &str) -> Result<DigitalTwin, ClientError> {
        self.try_load_twin(id)?
            .ok_or_else(|| ClientError::TwinNotFound(id.to_string()))
    }

    /// Creates a twin and appends its key to the global index.
    ///
    /// Write order is record first, then index. The two writes are not
    /// atomic; an index failure leaves the record orphaned.
    pub fn create_twin(
        &mut self,
        patient_id: &str,
        name: &str,
        encrypted_profile: &str,
    ) -> Result<DigitalTwin, ClientError> {
        let twin = DigitalTwin {
            id: Uuid::new_v4().simple().to_string(),
            patient_id: patient_id.to_string(),
            name: name.to_string(),
            encrypted_profile: encrypted_profile.to_string(),
            created_at: Utc::now().timestamp(),
            treatment_history: Vec::new(),
        };

        self.write_twin(&twin)?;

        let mut ids = self.load_index()?;
        ids.push(twin.id.clone());
        let raw = serde_json::to_vec(&ids)?;
        self.ledger.set_data(INDEX_KEY, raw)?;

        debug!(id = %twin.id, patient = %twin.patient_id, "created twin");
        Ok(twin)
    }

    /// Appends a treatment with a fabricated effectiveness in 70..=95 and
    /// the matching side-effect label, then rewrites the full record.
    pub fn append_treatment(
        &mut self,
        twin_id: &str,
        treatment: &str,
    ) -> Result<TreatmentEntry, ClientError> {
        let mut twin = self.get_twin(twin_id)?;

        let effectiveness =
            rand::thread_rng().gen_range(EFFECTIVENESS_MIN..=EFFECTIVENESS_MAX);
        let entry = TreatmentEntry {
            treatment: treatment.to_string(),
            effectiveness,
            side_effects: side_effect_label(effectiveness).to_string(),
            recorded_at: Utc::now().timestamp(),
        };

        twin.treatment_history.push(entry.clone());
        self.write_twin(&twin)?;

        Ok(entry)
    }

    fn load_index(&self) -> Result<Vec<String>, ClientError> {
        let Some(raw) = self.ledger.get_data(INDEX_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&raw) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                warn!(%err, "twin index is unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// `Ok(None)` covers both a missing blob and one that fails to parse.
    fn try_load_twin(&self, id: &str) -> Result<Option<DigitalTwin>, ClientError> {
        let Some(raw) = self.ledger.get_data(&twin_key(id))? else {
            return Ok(None);
        };
        match serde_json::from_slice(&raw) {
            Ok(twin) => Ok(Some(twin)),
            Err(err) => {
                warn!(%id, %err, "twin record is unreadable");
                Ok(None)
            }
        }
    }

    fn write_twin(&mut self, twin: &DigitalTwin) -> Result<(), ClientError> {
        let raw = serde_json::to_vec(twin)?;
        self.ledger.set_data(&twin_key(&twin.id), raw)?;
        Ok(())
    }
}
