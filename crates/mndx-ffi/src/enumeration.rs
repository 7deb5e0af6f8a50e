//! Enumeration loop and result materialization

use crate::result_set::ResultSet;
use crate::session::{CallState, Session};
use mndx_core::mask::MATCH_ALL;
use mndx_core::{
    BridgeConfig, EnumerationState, FileEntry, MndxError, MndxResult, RootEntry, RootHandler,
};
use std::collections::BTreeMap;

/// Destination for entries copied out of a search
///
/// Implementations copy every field; nothing yielded is skipped or merged.
pub trait Materialize {
    /// Reserve room for `additional` entries, failing instead of aborting
    fn try_reserve(&mut self, additional: usize) -> MndxResult<()>;

    /// Copy one entry
    fn push_entry(&mut self, entry: &RootEntry<'_>) -> MndxResult<()>;

    /// Entries copied so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Materialize for ResultSet {
    fn try_reserve(&mut self, additional: usize) -> MndxResult<()> {
        ResultSet::try_reserve(self, additional)
    }

    fn push_entry(&mut self, entry: &RootEntry<'_>) -> MndxResult<()> {
        ResultSet::push_entry(self, entry)
    }

    fn len(&self) -> usize {
        ResultSet::len(self)
    }
}

impl Materialize for Vec<FileEntry> {
    fn try_reserve(&mut self, additional: usize) -> MndxResult<()> {
        Vec::try_reserve(self, additional)?;
        Ok(())
    }

    fn push_entry(&mut self, entry: &RootEntry<'_>) -> MndxResult<()> {
        let owned = entry.try_to_owned()?;
        Vec::try_reserve(self, 1)?;
        self.push(owned);
        Ok(())
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// One open → search → materialize → close pass over a root file
///
/// An `Enumeration` is single-use: its state only moves forward, so running
/// it twice fails with [`MndxError::Internal`].
pub struct Enumeration<'c> {
    config: &'c BridgeConfig,
    state: CallState,
}

impl<'c> Enumeration<'c> {
    pub fn new(config: &'c BridgeConfig) -> Self {
        Self {
            config,
            state: CallState::new(),
        }
    }

    pub fn state(&self) -> EnumerationState {
        self.state.state()
    }

    /// Enumerate into a caller-transferable [`ResultSet`]
    pub fn run<H: RootHandler>(&self, root_file: &[u8]) -> MndxResult<ResultSet> {
        let mut files = ResultSet::new();
        self.drive::<H, _>(root_file, &mut files)?;
        Ok(files)
    }

    /// Enumerate into owned entries
    pub fn collect<H: RootHandler>(&self, root_file: &[u8]) -> MndxResult<Vec<FileEntry>> {
        let mut entries = Vec::new();
        self.drive::<H, _>(root_file, &mut entries)?;
        Ok(entries)
    }

    /// Drive the search to exhaustion, copying every match into `out`
    ///
    /// On error `out` may hold a prefix of the entries; callers discard it.
    /// The session and cursor are released on every path.
    pub fn drive<H, M>(&self, root_file: &[u8], out: &mut M) -> MndxResult<()>
    where
        H: RootHandler,
        M: Materialize,
    {
        let session = Session::<H>::open(root_file, &self.state)?;
        let declared = session.file_count();

        let capacity = self.config.initial_capacity(declared);
        if let Err(e) = out.try_reserve(capacity) {
            self.state.fail();
            return Err(e);
        }

        let mut search = session.begin_search(&self.config.search_mask)?;
        while let Some(entry) = search.next_match()? {
            if let Err(e) = out.push_entry(&entry) {
                self.state.fail();
                return Err(e);
            }
        }
        search.finish();

        let yielded = u32::try_from(out.len()).map_err(|_| {
            self.state.fail();
            MndxError::Allocation("more than u32::MAX entries".to_string())
        })?;
        if let Err(e) = self.check_count(declared, yielded) {
            self.state.fail();
            return Err(e);
        }

        session.finish();
        tracing::debug!(declared, yielded, "enumeration complete");
        Ok(())
    }

    /// The yielded count governs the result; the declared count is advisory
    /// unless `strict_entry_count` is set. Filtered searches are not compared.
    fn check_count(&self, declared: u32, yielded: u32) -> MndxResult<()> {
        if declared == yielded || self.config.search_mask != MATCH_ALL {
            return Ok(());
        }
        if self.config.strict_entry_count {
            return Err(MndxError::EntryCountMismatch { declared, yielded });
        }
        tracing::warn!(declared, yielded, "root handler count mismatch");
        Ok(())
    }
}

/// Enumerate every entry of a root file into a [`ResultSet`]
pub fn enumerate_files<H: RootHandler>(
    root_file: &[u8],
    config: &BridgeConfig,
) -> MndxResult<ResultSet> {
    Enumeration::new(config).run::<H>(root_file)
}

/// Enumerate every entry of a root file into owned [`FileEntry`] values
pub fn enumerate<H: RootHandler>(
    root_file: &[u8],
    config: &BridgeConfig,
) -> MndxResult<Vec<FileEntry>> {
    Enumeration::new(config).collect::<H>(root_file)
}

/// Enumerate a root file into a map keyed by entry name
///
/// When names repeat, the entry yielded last wins.
pub fn file_map<H: RootHandler>(
    root_file: &[u8],
    config: &BridgeConfig,
) -> MndxResult<BTreeMap<String, FileEntry>> {
    let entries = enumerate::<H>(root_file, config)?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect())
}
