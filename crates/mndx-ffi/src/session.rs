//! Scoped handles for one enumeration call
//!
//! [`Session`] owns an opened [`RootHandler`] and [`Search`] owns one of its
//! cursors. Each guard releases its handle in `Drop`, so every exit path
//! tears down in reverse order of acquisition: the cursor is ended, then
//! the handler is closed.
//! The cursor borrows the session, so the compiler rejects any other order.

use mndx_core::{EnumerationState, MndxError, MndxResult, RootEntry, RootHandler, SearchCursor};
use std::cell::Cell;
use std::mem::ManuallyDrop;

/// State of a single enumeration call
///
/// Single-threaded by construction: one call owns one `CallState`.
#[derive(Debug, Default)]
pub struct CallState {
    state: Cell<EnumerationState>,
}

impl CallState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EnumerationState {
        self.state.get()
    }

    /// Move to `target` if the transition is legal
    pub fn transition_to(&self, target: EnumerationState) -> MndxResult<()> {
        let current = self.state();
        if !current.can_transition_to(target) {
            return Err(MndxError::Internal(format!(
                "illegal enumeration transition {current} -> {target}"
            )));
        }
        tracing::trace!(from = %current, to = %target, "enumeration state");
        self.state.set(target);
        Ok(())
    }

    /// Record that the call aborted
    pub fn fail(&self) {
        if !self.state().is_terminal() {
            tracing::trace!(from = %self.state(), "enumeration failed");
            self.state.set(EnumerationState::Failed);
        }
    }
}

/// An opened root handler, closed when dropped
pub struct Session<'s, H: RootHandler> {
    handler: ManuallyDrop<H>,
    state: &'s CallState,
    finished: bool,
}

impl<'s, H: RootHandler> Session<'s, H> {
    /// Parse `root_file` and take ownership of the resulting handler
    pub fn open(root_file: &[u8], state: &'s CallState) -> MndxResult<Self> {
        let handler = match H::open(root_file) {
            Ok(handler) => handler,
            Err(e) => {
                tracing::debug!(len = root_file.len(), error = %e, "root file rejected");
                state.fail();
                return Err(e);
            }
        };
        if let Err(e) = state.transition_to(EnumerationState::SessionOpen) {
            handler.close();
            return Err(e);
        }
        tracing::debug!(
            len = root_file.len(),
            declared = handler.file_count(),
            "root file opened"
        );

        Ok(Self {
            handler: ManuallyDrop::new(handler),
            state,
            finished: false,
        })
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Number of entries the handler declares
    pub fn file_count(&self) -> u32 {
        self.handler.file_count()
    }

    /// Start a search; the session cannot close while it is live
    pub fn begin_search(&self, mask: &str) -> MndxResult<Search<'_, 's, H>> {
        let cursor = self.handler.begin_search(mask).inspect_err(|_| self.state.fail())?;
        if let Err(e) = self.state.transition_to(EnumerationState::SearchActive) {
            cursor.end_search();
            return Err(e);
        }
        tracing::trace!(mask, "search started");

        Ok(Search {
            cursor: ManuallyDrop::new(cursor),
            state: self.state,
        })
    }

    /// Close the handler after a successful enumeration
    pub fn finish(mut self) {
        self.finished = true;
    }
}

impl<H: RootHandler> Drop for Session<'_, H> {
    fn drop(&mut self) {
        // SAFETY: the handler is taken exactly once, here, and never touched again
        let handler = unsafe { ManuallyDrop::take(&mut self.handler) };
        handler.close();

        if self.finished && self.state.transition_to(EnumerationState::Done).is_ok() {
            tracing::trace!("root file closed");
        } else {
            self.state.fail();
            tracing::trace!("root file closed after failure");
        }
    }
}

/// A live search cursor, ended when dropped
pub struct Search<'h, 's, H: RootHandler + 'h> {
    cursor: ManuallyDrop<H::Cursor<'h>>,
    state: &'s CallState,
}

impl<'h, H: RootHandler + 'h> Search<'h, '_, H> {
    /// Advance the cursor; `Ok(None)` ends the sequence
    pub fn next_match(&mut self) -> MndxResult<Option<RootEntry<'_>>> {
        let result = self.cursor.next_match();
        if let Err(e) = &result {
            tracing::debug!(error = %e, "search aborted");
            self.state.fail();
        }
        result
    }

    /// End the search explicitly
    pub fn finish(self) {}
}

impl<'h, H: RootHandler + 'h> Drop for Search<'h, '_, H> {
    fn drop(&mut self) {
        // SAFETY: the cursor is taken exactly once, here, and never touched again
        let cursor = unsafe { ManuallyDrop::take(&mut self.cursor) };
        cursor.end_search();

        if self.state.state() == EnumerationState::SearchActive {
            let _ = self.state.transition_to(EnumerationState::SessionOpen);
        }
        tracing::trace!("search ended");
    }
}
