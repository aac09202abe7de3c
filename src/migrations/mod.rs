// Name-auction consensus core: name-state machine, block assembler and
// authoritative resolver for a naming blockchain.
// Written in 2026 by
//     Name Chain Developers
//
// To the extent possible under law, the author(s) have dedicated all copyright
// and related and neighboring rights to this software to the public domain
// worldwide. This software is distributed without any warranty.
//
// You should have received a copy of the MIT License along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! The forward-only schema migration runner (spec.md §1 Non-goals / §6
//! "Migration state"; SPEC_FULL.md §12). Deliberately small: this is
//! plumbing the storage backend owns, not the engineering core.
//!
//! Encoded with the same `StrictEncode`/`StrictDecode` derives used for
//! [`crate::covenant::state::NameState`], keeping one encoding for every
//! versioned on-disk record.

/// One step in the dense, forward-only migration sequence.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(StrictEncode, StrictDecode)]
pub enum Step {
    /// Run the migration's actual transform.
    Migrate,
    /// Mark the migration as not applicable to this database; its effects
    /// are assumed to already hold.
    Skip,
    /// Mark the migration as applied without running it (used for
    /// databases created fresh, already at the latest shape).
    FakeMigrate,
}

/// The persisted `M` record from spec.md §6: which migration a database is
/// at, and whether one was left mid-flight by a prior crash.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[derive(StrictEncode, StrictDecode)]
pub struct MigrationState {
    /// The last migration id this database has fully applied.
    pub version: u32,
    /// Set while a migration is running; a crash mid-migration leaves this
    /// `true` so the next boot can detect a dirty state.
    pub in_progress: bool,
    /// The next migration id due to run.
    pub next_migration: u64,
    /// Migration ids explicitly skipped rather than run.
    pub skipped: Vec<u64>,
    /// Opaque progress checkpoint for a migration that was interrupted.
    pub in_progress_data: Option<Vec<u8>>,
}

/// Errors refusing to open a database rather than silently running or
/// skipping migrations it was not told to.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum MigrationError {
    /// database has {remaining} migration(s) pending and no --migrate flag was given
    PendingMigrations { remaining: u64 },

    /// --migrate={requested} does not match the latest migration id {latest}
    MigrateFlagMismatch { requested: u64, latest: u64 },
}

/// Drives [`MigrationState`] forward across a dense `0..latest` id space.
/// A fresh database (no prior `MigrationState`) always fast-forwards to
/// `latest` without running anything; an existing database with pending
/// migrations refuses to open unless the caller's `--migrate` flag names
/// exactly the latest id (spec.md §6).
pub struct Runner {
    latest: u64,
}

impl Runner {
    /// Build a runner whose dense migration sequence ends at `latest`.
    pub fn new(latest: u64) -> Self { Runner { latest } }

    /// Compute the state a fresh database should start at: already current,
    /// with nothing to run.
    pub fn fresh(&self) -> MigrationState {
        MigrationState { version: self.latest as u32, next_migration: self.latest, ..MigrationState::default() }
    }

    /// Check whether `state` (from an existing database) may proceed to
    /// open, given the operator's `--migrate` flag (`None` if not passed).
    pub fn check(&self, state: &MigrationState, migrate_flag: Option<u64>) -> Result<(), MigrationError> {
        let remaining = self.latest.saturating_sub(state.next_migration);
        if remaining == 0 {
            return Ok(());
        }
        match migrate_flag {
            None => Err(MigrationError::PendingMigrations { remaining }),
            Some(requested) if requested != self.latest => {
                Err(MigrationError::MigrateFlagMismatch { requested, latest: self.latest })
            }
            Some(_) => Ok(()),
        }
    }

    /// Advance `state` by one migration `step`, recording a skip where
    /// applicable. Callers invoke this once per pending id, in order.
    pub fn advance(&self, state: &mut MigrationState, id: u64, step: Step) {
        debug_assert_eq!(id, state.next_migration);
        if step == Step::Skip {
            state.skipped.push(id);
        }
        state.next_migration = id + 1;
        state.version = state.next_migration.min(self.latest) as u32;
        state.in_progress = false;
        state.in_progress_data = None;
    }
}
