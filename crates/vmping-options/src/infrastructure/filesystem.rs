//! Filesystem-backed [`DirectoryProbe`].

use std::path::Path;

use vmping_core::DirectoryProbe;

/// Answers directory questions with a single blocking `stat`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryProbe;

impl DirectoryProbe for FsDirectoryProbe {
    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }
}
