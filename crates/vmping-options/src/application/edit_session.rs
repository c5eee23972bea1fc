//! Edit sessions and the single-editor slot.
//!
//! At most one options editor may be open at a time.  The [`EditorSlot`] is
//! borrowed mutably by the [`EditSession`] it hands out, so the borrow checker
//! refuses a second [`EditorSlot::open`] while a session is alive.
//!
//! # Session lifecycle
//!
//! ```text
//! open ──► (edit display form) ──► commit ──ok──► closed
//!   │                                 │
//!   │                              rejected ──► still open (session handed back)
//!   └──────────────► cancel ──► closed, store untouched
//! ```

use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use vmping_core::{DirectoryProbe, DisplayOptions};

use super::commit::{CommitCoordinator, CommitError, CommitReport};
use super::store::OptionsStore;

/// Owner of the one options editor.
#[derive(Debug, Default)]
pub struct EditorSlot {
    opened: u64,
    last_session: Option<Uuid>,
}

impl EditorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions this slot has handed out.
    pub fn sessions_opened(&self) -> u64 {
        self.opened
    }

    pub fn last_session(&self) -> Option<Uuid> {
        self.last_session
    }

    /// Opens an edit session, loading the display form from `store`.
    pub fn open<S: OptionsStore + ?Sized>(&mut self, store: &S) -> EditSession<'_> {
        let id = Uuid::new_v4();
        self.opened += 1;
        self.last_session = Some(id);
        info!(session = %id, seq = self.opened, "options editor opened");

        EditSession {
            slot: self,
            id,
            display: DisplayOptions::load(store.options()),
        }
    }
}

/// An open options editor.
///
/// Owns the display form for the lifetime of the session.
#[derive(Debug)]
pub struct EditSession<'slot> {
    slot: &'slot mut EditorSlot,
    id: Uuid,
    display: DisplayOptions,
}

/// A commit that did not go through.  The session is still open.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct CommitRejected<'slot> {
    pub session: EditSession<'slot>,
    pub error: CommitError,
}

impl<'slot> EditSession<'slot> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    /// Discards edits and reloads the form from `store`.
    pub fn reload<S: OptionsStore + ?Sized>(&mut self, store: &S) {
        self.display = DisplayOptions::load(store.options());
    }

    /// Commits the edited form.  Success closes the session.
    ///
    /// # Errors
    ///
    /// Returns [`CommitRejected`], carrying this session and the reason, when
    /// a rule fails or the store cannot be flushed.
    pub fn commit<S: OptionsStore + ?Sized>(
        self,
        coordinator: &CommitCoordinator,
        store: &mut S,
        probe: &dyn DirectoryProbe,
    ) -> Result<CommitReport, CommitRejected<'slot>> {
        match coordinator.commit(&self.display, store, probe) {
            Ok(report) => {
                info!(
                    session = %self.id,
                    seq = self.slot.opened,
                    "options editor closed after commit"
                );
                Ok(report)
            }
            Err(error) => Err(CommitRejected {
                session: self,
                error,
            }),
        }
    }

    /// Closes the session without touching the store.
    pub fn cancel(self) {
        info!(session = %self.id, seq = self.slot.opened, "options editor cancelled");
    }
}
