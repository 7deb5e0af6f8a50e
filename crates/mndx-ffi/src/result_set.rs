//! Caller-owned result array
//!
//! The bridge allocates, the host frees. A successful enumeration hands the
//! host a pointer to `count` contiguous [`MndxFile`] records; the host gives
//! both back to `mndx_free_files` exactly once.

use mndx_core::{CONTENT_KEY_SIZE, ContentKey, FileEntry, MndxError, MndxResult, RootEntry};
use std::ffi::{CStr, CString, c_char};
use std::ptr;

/// One enumerated entry in C layout
///
/// # Memory Layout
///
/// ```text
/// +----------+--------+--------------+--------------+--------------+
/// |   name   |  size  | locale_flags | file_data_id | encoding_key |
/// | (*char)  | (u32)  |    (u32)     |    (u32)     |   (u8[16])   |
/// +----------+--------+--------------+--------------+--------------+
/// ```
///
/// `name` is a null-terminated UTF-8 string owned by the enclosing result
/// set. Each record owns its own name buffer.
#[repr(C)]
#[derive(Debug)]
pub struct MndxFile {
    pub name: *mut c_char,
    pub size: u32,
    pub locale_flags: u32,
    pub file_data_id: u32,
    pub encoding_key: [u8; CONTENT_KEY_SIZE],
}

impl MndxFile {
    /// Copy a root entry, allocating an exact-length name buffer
    pub fn from_root_entry(entry: &RootEntry<'_>) -> MndxResult<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(entry.name.len() + 1)?;
        bytes.extend_from_slice(entry.name.as_bytes());
        let name = CString::new(bytes)
            .map_err(|_| MndxError::InvalidEntryName(entry.name.to_string()))?;

        Ok(Self {
            name: name.into_raw(),
            size: entry.size,
            locale_flags: entry.locale_flags,
            file_data_id: entry.file_data_id,
            encoding_key: *entry.content_key.as_bytes(),
        })
    }

    /// Borrow the name
    ///
    /// Names come from `&str`, so they are always valid UTF-8.
    pub fn name(&self) -> &str {
        if self.name.is_null() {
            return "";
        }
        // SAFETY: name was produced by CString::into_raw and is owned by self
        let name = unsafe { CStr::from_ptr(self.name) };
        name.to_str().unwrap_or_default()
    }

    pub fn content_key(&self) -> ContentKey {
        ContentKey::new(self.encoding_key)
    }

    /// Copy into an owned [`FileEntry`]
    pub fn to_file_entry(&self) -> FileEntry {
        FileEntry {
            name: self.name().to_string(),
            size: self.size,
            locale_flags: self.locale_flags,
            file_data_id: self.file_data_id,
            content_key: self.content_key(),
        }
    }

    /// Free the name buffer
    ///
    /// # Safety
    ///
    /// `name` must be null or come from `CString::into_raw` and not have
    /// been freed already.
    unsafe fn free_name(&mut self) {
        if !self.name.is_null() {
            // SAFETY: guaranteed by the caller
            drop(unsafe { CString::from_raw(self.name) });
            self.name = ptr::null_mut();
        }
    }
}

/// Owned sequence of [`MndxFile`] records
///
/// Dropping a result set frees every name and then the array, so a set
/// abandoned halfway through materialization leaks nothing.
#[derive(Debug, Default)]
pub struct ResultSet {
    files: Vec<MndxFile>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `additional` records without aborting on failure
    pub fn try_reserve(&mut self, additional: usize) -> MndxResult<()> {
        self.files.try_reserve(additional)?;
        Ok(())
    }

    /// Append a copy of `entry`
    pub fn push_entry(&mut self, entry: &RootEntry<'_>) -> MndxResult<()> {
        if self.files.len() >= u32::MAX as usize {
            return Err(MndxError::Allocation(
                "result set cannot hold more than u32::MAX entries".to_string(),
            ));
        }
        let file = MndxFile::from_root_entry(entry)?;
        self.files.try_reserve(1)?;
        self.files.push(file);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn as_slice(&self) -> &[MndxFile] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MndxFile> {
        self.files.iter()
    }

    /// Copy every record into owned entries
    pub fn to_file_entries(&self) -> Vec<FileEntry> {
        self.files.iter().map(MndxFile::to_file_entry).collect()
    }

    /// Hand the array to the host
    ///
    /// The returned pointer is never null, even for an empty set, and must
    /// be released with [`ResultSet::from_raw`] (via `mndx_free_files`)
    /// using the returned count. Spare capacity is dropped by moving the
    /// records into an exact-size allocation, which fails with
    /// [`MndxError::Allocation`] instead of aborting.
    pub fn into_raw(mut self) -> MndxResult<(*mut MndxFile, u32)> {
        if self.files.capacity() != self.files.len() {
            let mut exact = Vec::new();
            exact.try_reserve_exact(self.files.len())?;
            exact.append(&mut self.files);
            self.files = exact;
        }
        let count = u32::try_from(self.files.len()).map_err(|_| {
            MndxError::Allocation("result set holds more than u32::MAX entries".to_string())
        })?;
        let files = std::mem::take(&mut self.files).into_boxed_slice();
        Ok((Box::into_raw(files).cast::<MndxFile>(), count))
    }

    pub fn capacity(&self) -> usize {
        self.files.capacity()
    }

    /// Take back an array produced by [`ResultSet::into_raw`]
    ///
    /// # Safety
    ///
    /// - `files` and `count` must be exactly a pair returned by `into_raw`
    /// - The pair must not have been reclaimed already
    pub unsafe fn from_raw(files: *mut MndxFile, count: u32) -> Self {
        if files.is_null() {
            return Self::new();
        }
        let slice = ptr::slice_from_raw_parts_mut(files, count as usize);
        // SAFETY: the pair came from Box::<[MndxFile]>::into_raw
        let files = unsafe { Box::from_raw(slice) };
        Self {
            files: files.into_vec(),
        }
    }
}

impl Drop for ResultSet {
    fn drop(&mut self) {
        for file in &mut self.files {
            // SAFETY: every name in the set came from CString::into_raw
            unsafe { file.free_name() };
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MndxFile;
    type IntoIter = std::slice::Iter<'a, MndxFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

// A ResultSet owns every pointer it holds
unsafe impl Send for ResultSet {}
