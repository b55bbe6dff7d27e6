// The set of job identifiers that have already been delivered
use super::identity::IdStrategy;
use crate::model::{JobIdentifier, JobRecord};
use std::collections::HashSet;

/// A record that passed dedup, paired with the id it was judged by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub id: JobIdentifier,
    pub record: JobRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    ids: HashSet<JobIdentifier>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(|id| JobIdentifier(id.into())).collect(),
        }
    }

    pub fn contains(&self, id: &JobIdentifier) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in a stable order, for persistence.
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().map(|id| id.0.clone()).collect();
        ids.sort();
        ids
    }

    /// Records whose id is neither already seen nor repeated earlier in the
    /// same batch, and which `accept` lets through.
    ///
    /// The set itself is left untouched; call [`SeenSet::mark_seen`] once
    /// the batch has actually been delivered.
    pub fn filter_new<F>(&self, records: Vec<JobRecord>, strategy: IdStrategy, accept: F) -> Vec<NewJob>
    where
        F: Fn(&JobRecord) -> bool,
    {
        let mut batch_ids = HashSet::new();
        let mut fresh = Vec::new();
        for record in records {
            let id = strategy.derive_id(&record);
            if self.contains(&id) || batch_ids.contains(&id) {
                continue;
            }
            if !accept(&record) {
                continue;
            }
            batch_ids.insert(id.clone());
            fresh.push(NewJob { id, record });
        }
        fresh
    }

    /// Adds the ids of a delivered batch. Returns how many were not yet present.
    pub fn mark_seen(&mut self, jobs: &[NewJob]) -> usize {
        jobs.iter()
            .filter(|job| self.ids.insert(job.id.clone()))
            .count()
    }
}
