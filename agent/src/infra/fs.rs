//! Filesystem infrastructure: implements `FileProbe`.

use std::path::Path;

use crate::application::ports::FileProbe;

/// Production filesystem implementation of `FileProbe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileProbe for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}
