//! JSON persistence for the store.
//!
//! The on-disk form is one JSON array of community documents,
//! `{community_id, community_name, periods: {period_key: {submitter_id:
//! [entry, ...]}}}`, entries flat with absent optional fields omitted.
//! Loading validates every document against the pruning and id-uniqueness
//! invariants and rejects the whole file loudly on a violation — an empty
//! container in a document can only mean the store was corrupted.

use super::{Community, Store};
use crate::error::StoreError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::{error, info};

impl Store {
    /// Snapshot of every community document, ordered by community id.
    pub fn to_documents(&self) -> Vec<Community> {
        let map = self.communities.read().unwrap_or_else(PoisonError::into_inner);
        let mut documents: Vec<Community> = map
            .values()
            .map(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .collect();
        documents.sort_by_key(|community| community.community_id);
        documents
    }

    /// Rebuilds a store from documents, validating each one.
    pub fn from_documents(documents: Vec<Community>) -> Result<Store, StoreError> {
        let mut map = HashMap::with_capacity(documents.len());
        for community in documents {
            if let Err(violation) = community.validate() {
                error!(
                    community_id = community.community_id,
                    %violation,
                    "rejecting corrupt community document"
                );
                return Err(violation);
            }
            let community_id = community.community_id;
            if map.insert(community_id, Mutex::new(community)).is_some() {
                return Err(StoreError::InvariantViolation(format!(
                    "duplicate community id {community_id}"
                )));
            }
        }
        Ok(Store { communities: RwLock::new(map) })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let documents = self.to_documents();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &documents)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Store, StoreError> {
        let file = File::open(path)?;
        let documents: Vec<Community> = serde_json::from_reader(BufReader::new(file))?;
        info!(communities = documents.len(), path = %path.display(), "loaded suggestion store");
        Store::from_documents(documents)
    }
}
