//! The ledger service.
//!
//! [`LedgerService`] is the single entry point for reading and changing
//! shift entries. Every call is checked against the access policy before
//! the repository is touched, and repository failures come back unchanged.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::policy::{Action, EntryFilter, authorize, visible_entries};
use super::verification::{VerifyOutcome, verify};
use crate::calculation::{SummaryOptions, group_by_store, rank_stores, recent_entries, summarize};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Actor, EntryStatus, EntrySubmission, ShiftEntry, Store, StoreStanding, Summary};
use crate::repository::EntryRepository;

/// Number of entries listed as recent activity in a [`Report`].
pub const RECENT_LIMIT: usize = 5;

/// Totals for a set of visible entries together with their store standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Totals over every counted entry.
    pub summary: Summary,
    /// Per-store totals, highest final balance first.
    pub stores: Vec<StoreStanding>,
    /// The newest visible entries, pending ones included.
    pub recent: Vec<ShiftEntry>,
}

/// Drives submissions, verifications and deletions against an entry store.
#[derive(Clone)]
pub struct LedgerService {
    repository: Arc<dyn EntryRepository>,
}

impl LedgerService {
    /// Creates a service over the given repository.
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    /// Fetches a fresh snapshot of every stored entry.
    ///
    /// The snapshot may already be stale when it returns.
    pub fn snapshot(&self) -> LedgerResult<Vec<ShiftEntry>> {
        Ok(self.repository.list_entries()?)
    }

    /// Validates and stores a new pending entry.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` if a staff actor submits for someone else
    /// - `Validation` if the submission is invalid; nothing is stored
    /// - `Persistence` if the store rejects the entry or its expenses. An
    ///   entry row stored before its expenses failed is deleted again.
    pub fn submit(&self, actor: &Actor, submission: EntrySubmission) -> LedgerResult<ShiftEntry> {
        authorize(
            actor,
            &Action::CreateEntry {
                staff_user_id: submission.staff_user_id.clone(),
            },
        )?;

        let entry = ShiftEntry::create(submission)?;

        self.repository.insert_entry(&entry)?;
        if !entry.expenses().is_empty() {
            if let Err(error) = self.repository.insert_expenses(entry.id(), entry.expenses()) {
                self.roll_back(&entry);
                return Err(error.into());
            }
        }

        info!(
            entry_id = %entry.id(),
            actor_id = %actor.id,
            store_id = %entry.store_id(),
            final_balance = %entry.final_balance(),
            "Shift entry submitted"
        );

        Ok(entry)
    }

    /// Verifies an entry.
    ///
    /// An entry that is already verified is left alone and nothing is
    /// written to the store.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` for staff actors
    /// - `EntryNotFound` if no entry has the id
    /// - `Persistence` if the store fails
    pub fn verify(&self, actor: &Actor, entry_id: Uuid) -> LedgerResult<VerifyOutcome> {
        authorize(actor, &Action::VerifyEntry)?;

        let mut entry = self.find(entry_id)?;
        let outcome = verify(&mut entry, actor)?;

        match outcome {
            VerifyOutcome::Verified => {
                self.repository
                    .update_entry_status(entry_id, EntryStatus::Verified)?;
                info!(entry_id = %entry_id, actor_id = %actor.id, "Shift entry verified");
            }
            VerifyOutcome::AlreadyVerified => {
                info!(entry_id = %entry_id, actor_id = %actor.id, "Shift entry already verified");
            }
        }

        Ok(outcome)
    }

    /// Deletes an entry together with its expenses, whatever its status.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` for staff actors
    /// - `EntryNotFound` if no entry has the id
    /// - `Persistence` if the store fails
    pub fn delete(&self, actor: &Actor, entry_id: Uuid) -> LedgerResult<()> {
        authorize(actor, &Action::DeleteEntry)?;

        let entry = self.find(entry_id)?;
        if entry.is_verified() {
            warn!(
                entry_id = %entry_id,
                actor_id = %actor.id,
                final_balance = %entry.final_balance(),
                "Deleting verified shift entry"
            );
        }

        self.repository.delete_entry(entry_id)?;
        info!(entry_id = %entry_id, actor_id = %actor.id, "Shift entry deleted");

        Ok(())
    }

    /// Returns the entries the actor may see that pass the filter.
    pub fn visible(&self, actor: &Actor, filter: &EntryFilter) -> LedgerResult<Vec<ShiftEntry>> {
        authorize(actor, &Action::ViewEntries)?;

        let entries = self.snapshot()?;
        Ok(visible_entries(&entries, actor, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Sums the entries the actor may see that pass the filter.
    pub fn summary(
        &self,
        actor: &Actor,
        filter: &EntryFilter,
        options: SummaryOptions,
    ) -> LedgerResult<Summary> {
        let entries = self.visible(actor, filter)?;
        Ok(summarize(&entries, options))
    }

    /// Builds the summary and store standings in one pass over a snapshot.
    ///
    /// Store groups count the same entries as the summary. The recent list
    /// ignores `verified_only` so pending submissions show up there.
    pub fn report(
        &self,
        actor: &Actor,
        filter: &EntryFilter,
        options: SummaryOptions,
        stores: &[Store],
    ) -> LedgerResult<Report> {
        let entries = self.visible(actor, filter)?;
        let counted: Vec<&ShiftEntry> = entries.iter().filter(|e| options.includes(e)).collect();

        Ok(Report {
            summary: summarize(counted.iter().copied(), SummaryOptions::default()),
            stores: rank_stores(&group_by_store(counted.iter().copied(), stores), stores),
            recent: recent_entries(&entries, RECENT_LIMIT).into_iter().cloned().collect(),
        })
    }

    fn roll_back(&self, entry: &ShiftEntry) {
        match self.repository.delete_entry(entry.id()) {
            Ok(()) => warn!(entry_id = %entry.id(), "Expenses not stored; entry rolled back"),
            Err(error) => warn!(
                entry_id = %entry.id(),
                error = %error,
                "Expenses not stored and entry rollback failed"
            ),
        }
    }

    fn find(&self, entry_id: Uuid) -> LedgerResult<ShiftEntry> {
        self.snapshot()?
            .into_iter()
            .find(|entry| entry.id() == entry_id)
            .ok_or(LedgerError::EntryNotFound { entry_id })
    }
}
