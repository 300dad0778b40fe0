//! Hierarchical suggestion store.
//!
//! Community → period → submitter → ordered entries. Every operation is
//! atomic with respect to one community's data: the root map hands out one
//! `Mutex<Community>` per community, so same-community operations serialize
//! while distinct communities proceed in parallel. Parsing never touches the
//! store; callers feed it assembled skeletons.
//!
//! Pruning is eager: the moment a removal empties a submitter's sequence the
//! slot goes away, and the moment a bucket loses its last submitter the
//! bucket goes away. An empty container in a stored document therefore means
//! corruption, and loading rejects it loudly (see `persist.rs`).

mod persist;

use crate::error::StoreError;
use crate::suggestion::{SuggestionEntry, SuggestionFields};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub type CommunityId = u64;
pub type UserId = String;
pub type PeriodKey = String;

/// One community's nested record — the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub community_id: CommunityId,
    pub community_name: String,
    pub periods: BTreeMap<PeriodKey, PeriodBucket>,
}

/// Entries of one period, grouped by submitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodBucket {
    pub submitters: BTreeMap<UserId, Vec<SuggestionEntry>>,
}

impl Community {
    fn new(community_id: CommunityId, community_name: String) -> Self {
        Community { community_id, community_name, periods: BTreeMap::new() }
    }

    /// Checks the eager-pruning and id-uniqueness invariants. A violation
    /// means the record was corrupted outside this store's operations.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut seen_ids = HashSet::new();
        for (period_key, bucket) in &self.periods {
            if bucket.submitters.is_empty() {
                return Err(StoreError::InvariantViolation(format!(
                    "community {}: period {period_key} holds no submitters",
                    self.community_id
                )));
            }
            for (submitter_id, sequence) in &bucket.submitters {
                if sequence.is_empty() {
                    return Err(StoreError::InvariantViolation(format!(
                        "community {}: submitter {submitter_id} in period {period_key} holds no entries",
                        self.community_id
                    )));
                }
                for entry in sequence {
                    if !seen_ids.insert(entry.id) {
                        return Err(StoreError::InvariantViolation(format!(
                            "community {}: duplicate suggestion id {}",
                            self.community_id, entry.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Root collection of community records.
#[derive(Debug, Default)]
pub struct Store {
    communities: RwLock<HashMap<CommunityId, Mutex<Community>>>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Inserts a community with an empty period map if absent. Idempotent —
    /// a second call with the same id changes nothing.
    pub fn ensure_community(&self, community_id: CommunityId, name: &str) {
        let mut map = self.communities.write().unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(&community_id) {
            debug!(community_id, "community already present");
            return;
        }
        map.insert(community_id, Mutex::new(Community::new(community_id, name.to_owned())));
        info!(community_id, name, "community added");
    }

    /// Finalizes `drafts` into the period bucket of `submitter_id`: each gets
    /// a fresh unique identifier and is appended in order. The finalized
    /// entries are returned so the caller can render them immediately.
    pub fn append_entries(
        &self,
        community_id: CommunityId,
        period_key: &str,
        submitter_id: &str,
        drafts: Vec<SuggestionFields>,
    ) -> Result<Vec<SuggestionEntry>, StoreError> {
        if drafts.is_empty() {
            // Nothing to insert; never materialize an empty bucket or slot.
            return Ok(Vec::new());
        }
        self.with_community(community_id, |community| {
            let bucket = community.periods.entry(period_key.to_owned()).or_default();
            let sequence = bucket.submitters.entry(submitter_id.to_owned()).or_default();
            let mut appended = Vec::with_capacity(drafts.len());
            for fields in drafts {
                let entry = SuggestionEntry { id: Uuid::new_v4(), fields };
                sequence.push(entry.clone());
                appended.push(entry);
            }
            Ok(appended)
        })
    }

    /// Entries `submitter_id` filed under `period_key`, in insertion order.
    pub fn find_by_period_and_user(
        &self,
        community_id: CommunityId,
        period_key: &str,
        submitter_id: &str,
    ) -> Result<Vec<SuggestionEntry>, StoreError> {
        self.with_community(community_id, |community| {
            community
                .periods
                .get(period_key)
                .ok_or_else(|| StoreError::NotFound(format!("period {period_key}")))?
                .submitters
                .get(submitter_id)
                .cloned()
                .ok_or_else(|| {
                    StoreError::NotFound(format!("submitter {submitter_id} in period {period_key}"))
                })
        })
    }

    /// Every submitter's entries under `period_key`.
    pub fn find_by_period(
        &self,
        community_id: CommunityId,
        period_key: &str,
    ) -> Result<BTreeMap<UserId, Vec<SuggestionEntry>>, StoreError> {
        self.with_community(community_id, |community| {
            community
                .periods
                .get(period_key)
                .map(|bucket| bucket.submitters.clone())
                .ok_or_else(|| StoreError::NotFound(format!("period {period_key}")))
        })
    }

    /// Removes the first entry matching `entry_id` across the community's
    /// period buckets, restricted to `submitter_id`'s own sequences, pruning
    /// emptied containers. An id owned by another submitter reports NotFound,
    /// indistinguishable from an id that does not exist.
    pub fn remove_by_id(
        &self,
        community_id: CommunityId,
        submitter_id: &str,
        entry_id: Uuid,
    ) -> Result<SuggestionEntry, StoreError> {
        self.with_community(community_id, |community| {
            let mut removed = None;
            let mut emptied_period = None;

            for (period_key, bucket) in community.periods.iter_mut() {
                let Some(sequence) = bucket.submitters.get_mut(submitter_id) else { continue };
                let Some(index) = sequence.iter().position(|entry| entry.id == entry_id) else {
                    continue;
                };
                removed = Some(sequence.remove(index));
                if sequence.is_empty() {
                    bucket.submitters.remove(submitter_id);
                }
                if bucket.submitters.is_empty() {
                    emptied_period = Some(period_key.clone());
                }
                break;
            }

            if let Some(period_key) = emptied_period {
                community.periods.remove(&period_key);
            }
            removed.ok_or_else(|| {
                StoreError::NotFound(format!("suggestion {entry_id} for submitter {submitter_id}"))
            })
        })
    }

    fn with_community<T>(
        &self,
        community_id: CommunityId,
        op: impl FnOnce(&mut Community) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let map = self.communities.read().unwrap_or_else(PoisonError::into_inner);
        let slot = map
            .get(&community_id)
            .ok_or_else(|| StoreError::NotFound(format!("community {community_id}")))?;
        let mut community = slot.lock().unwrap_or_else(PoisonError::into_inner);
        op(&mut community)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> SuggestionFields {
        SuggestionFields { title: title.to_owned(), ..SuggestionFields::default() }
    }

    #[test]
    fn ensure_community_is_idempotent() {
        let store = Store::new();
        store.ensure_community(42, "book nook");
        store.ensure_community(42, "renamed much later");

        let documents = store.to_documents();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].community_name, "book nook");
    }

    #[test]
    fn append_finalizes_drafts_with_unique_ids() {
        let store = Store::new();
        store.ensure_community(1, "c");
        let appended = store
            .append_entries(1, "06/24", "100", vec![draft("dune"), draft("hyperion")])
            .unwrap();

        assert_eq!(appended.len(), 2);
        assert_ne!(appended[0].id, appended[1].id);
        assert_eq!(appended[0].fields.title, "dune");

        let found = store.find_by_period_and_user(1, "06/24", "100").unwrap();
        assert_eq!(found, appended);
    }

    #[test]
    fn append_to_unknown_community_is_not_found() {
        let store = Store::new();
        let err = store.append_entries(9, "06/24", "100", vec![draft("x")]).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = Store::new();
        store.ensure_community(1, "c");
        for title in ["first", "second", "third"] {
            store.append_entries(1, "06/24", "100", vec![draft(title)]).unwrap();
        }

        let found = store.find_by_period_and_user(1, "06/24", "100").unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.fields.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn lookups_report_not_found_at_every_level() {
        let store = Store::new();
        store.ensure_community(1, "c");
        store.append_entries(1, "06/24", "100", vec![draft("dune")]).unwrap();

        assert!(matches!(
            store.find_by_period_and_user(2, "06/24", "100"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.find_by_period_and_user(1, "07/24", "100"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.find_by_period_and_user(1, "06/24", "200"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.find_by_period(1, "07/24"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn find_by_period_groups_by_submitter() {
        let store = Store::new();
        store.ensure_community(1, "c");
        store.append_entries(1, "06/24", "100", vec![draft("dune")]).unwrap();
        store.append_entries(1, "06/24", "200", vec![draft("piranesi")]).unwrap();

        let by_submitter = store.find_by_period(1, "06/24").unwrap();
        assert_eq!(by_submitter.len(), 2);
        assert_eq!(by_submitter["100"][0].fields.title, "dune");
        assert_eq!(by_submitter["200"][0].fields.title, "piranesi");
    }

    #[test]
    fn removing_the_last_entry_prunes_slot_and_bucket() {
        let store = Store::new();
        store.ensure_community(1, "c");
        let appended = store.append_entries(1, "06/24", "100", vec![draft("dune")]).unwrap();

        let removed = store.remove_by_id(1, "100", appended[0].id).unwrap();
        assert_eq!(removed, appended[0]);

        // Slot and bucket are both gone, eagerly.
        assert!(matches!(store.find_by_period(1, "06/24"), Err(StoreError::NotFound(_))));
        assert!(store.to_documents()[0].periods.is_empty());
    }

    #[test]
    fn removal_keeps_sibling_entries_and_submitters() {
        let store = Store::new();
        store.ensure_community(1, "c");
        let mine = store
            .append_entries(1, "06/24", "100", vec![draft("dune"), draft("hyperion")])
            .unwrap();
        store.append_entries(1, "06/24", "200", vec![draft("piranesi")]).unwrap();

        store.remove_by_id(1, "100", mine[0].id).unwrap();
        let rest = store.find_by_period_and_user(1, "06/24", "100").unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].fields.title, "hyperion");

        store.remove_by_id(1, "100", mine[1].id).unwrap();
        // The other submitter's bucket entry survives the pruning.
        let by_submitter = store.find_by_period(1, "06/24").unwrap();
        assert_eq!(by_submitter.len(), 1);
        assert!(by_submitter.contains_key("200"));
    }

    #[test]
    fn removal_is_scoped_to_the_requesting_submitter() {
        let store = Store::new();
        store.ensure_community(1, "c");
        let appended = store.append_entries(1, "06/24", "100", vec![draft("dune")]).unwrap();

        let err = store.remove_by_id(1, "200", appended[0].id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Still there for the rightful owner.
        assert_eq!(store.find_by_period_and_user(1, "06/24", "100").unwrap().len(), 1);
    }

    #[test]
    fn removal_scans_every_period_of_the_community() {
        let store = Store::new();
        store.ensure_community(1, "c");
        store.append_entries(1, "05/24", "100", vec![draft("dune")]).unwrap();
        let later = store.append_entries(1, "06/24", "100", vec![draft("piranesi")]).unwrap();

        let removed = store.remove_by_id(1, "100", later[0].id).unwrap();
        assert_eq!(removed.fields.title, "piranesi");
        assert!(matches!(store.find_by_period(1, "06/24"), Err(StoreError::NotFound(_))));
        assert_eq!(store.find_by_period_and_user(1, "05/24", "100").unwrap().len(), 1);
    }

    #[test]
    fn appending_nothing_materializes_nothing() {
        let store = Store::new();
        store.ensure_community(1, "c");
        let appended = store.append_entries(1, "06/24", "100", Vec::new()).unwrap();
        assert!(appended.is_empty());
        assert!(store.to_documents()[0].periods.is_empty());
    }

    #[test]
    fn communities_mutate_independently_across_threads() {
        let store = Store::new();
        store.ensure_community(1, "left");
        store.ensure_community(2, "right");

        std::thread::scope(|scope| {
            for community_id in [1u64, 2u64] {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..50 {
                        store
                            .append_entries(
                                community_id,
                                "06/24",
                                "100",
                                vec![draft(&format!("book {i}"))],
                            )
                            .unwrap();
                    }
                });
            }
        });

        for community_id in [1, 2] {
            let entries = store.find_by_period_and_user(community_id, "06/24", "100").unwrap();
            assert_eq!(entries.len(), 50);
        }
    }
}
