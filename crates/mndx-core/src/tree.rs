//! Directory tree view over an enumerated file list
//!
//! Root files list members by full `/`-separated path. [`FileTree`] folds
//! that flat list into nested directories so hosts can browse and resolve
//! paths. Lookups ignore case, matching how archive names are resolved.

use crate::entry::{ContentKey, FileEntry};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors building or querying a [`FileTree`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path needs a directory where a file already exists
    #[error("file and directory have clashing names: {0}")]
    DirFileNameClash(String),

    /// Two files resolve to the same path
    #[error("file has clashing name: {0}")]
    Exists(String),

    /// No file or directory at the path
    #[error("no such file or directory: {0}")]
    NotExists(String),

    /// A path descends through a file
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// The path has no segments once cleaned
    #[error("invalid path: {0:?}")]
    InvalidPath(String),
}

/// File metadata stored at a leaf of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeFile {
    pub size: u32,
    pub locale_flags: u32,
    pub file_data_id: u32,
    pub content_key: ContentKey,
}

impl From<&FileEntry> for TreeFile {
    fn from(entry: &FileEntry) -> Self {
        Self {
            size: entry.size,
            locale_flags: entry.locale_flags,
            file_data_id: entry.file_data_id,
            content_key: entry.content_key,
        }
    }
}

/// A directory or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory(FileTree),
    File(TreeFile),
}

/// Named child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDirEntry {
    /// Name with the case it was first seen with
    pub name: String,
    pub node: TreeNode,
}

impl TreeDirEntry {
    pub fn as_directory(&self) -> Option<&FileTree> {
        match &self.node {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&TreeFile> {
        match &self.node {
            TreeNode::File(file) => Some(file),
            TreeNode::Directory(_) => None,
        }
    }
}

/// A directory of [`TreeDirEntry`] children, keyed case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    children: BTreeMap<String, TreeDirEntry>,
}

impl FileTree {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from enumerated entries
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = &'a FileEntry>,
    {
        let mut root = Self::new();
        for entry in entries {
            root.insert(entry)?;
        }
        Ok(root)
    }

    /// Add one entry, creating intermediate directories
    pub fn insert(&mut self, entry: &FileEntry) -> Result<(), TreeError> {
        let segments = clean_path(&entry.name);
        let Some((file_name, dirs)) = segments.split_last() else {
            return Err(TreeError::InvalidPath(entry.name.clone()));
        };

        let dir = self.mkdirs(dirs, &entry.name)?;
        let key = file_name.to_lowercase();
        if dir.children.contains_key(&key) {
            return Err(TreeError::Exists(entry.name.clone()));
        }
        dir.children.insert(
            key,
            TreeDirEntry {
                name: (*file_name).to_string(),
                node: TreeNode::File(TreeFile::from(entry)),
            },
        );
        Ok(())
    }

    fn mkdirs(&mut self, dirs: &[&str], full_path: &str) -> Result<&mut FileTree, TreeError> {
        let mut current = self;
        for dir in dirs {
            let child = current
                .children
                .entry(dir.to_lowercase())
                .or_insert_with(|| TreeDirEntry {
                    name: (*dir).to_string(),
                    node: TreeNode::Directory(FileTree::new()),
                });
            current = match &mut child.node {
                TreeNode::Directory(next) => next,
                TreeNode::File(_) => return Err(TreeError::DirFileNameClash(full_path.to_string())),
            };
        }
        Ok(current)
    }

    /// Resolve a `/`-separated path
    pub fn get(&self, path: &str) -> Result<&TreeDirEntry, TreeError> {
        let segments = clean_path(path);
        let Some((last, dirs)) = segments.split_last() else {
            return Err(TreeError::NotExists(path.to_string()));
        };

        let mut current = self;
        for dir in dirs {
            let child = current
                .children
                .get(&dir.to_lowercase())
                .ok_or_else(|| TreeError::NotExists(path.to_string()))?;
            current = child
                .as_directory()
                .ok_or_else(|| TreeError::NotADirectory(path.to_string()))?;
        }

        current
            .children
            .get(&last.to_lowercase())
            .ok_or_else(|| TreeError::NotExists(path.to_string()))
    }

    /// Children sorted by case-folded name
    pub fn entries(&self) -> impl Iterator<Item = &TreeDirEntry> {
        self.children.values()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Split a path into segments, dropping empty and `.` segments and
/// resolving `..` against earlier ones
fn clean_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments
}
