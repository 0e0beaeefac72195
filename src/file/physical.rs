use std::{fs, path::Path};

use memmap2::Mmap;

use super::Backend;
use crate::Result;

/// Image backed by a read-only memory map of a file on disk
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Map the file at `path`
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened and
    /// [`crate::Error::Error`] if it cannot be mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path)?;

        // The map stays read-only; the file is not expected to change during a run.
        let data = unsafe { Mmap::map(&file) }
            .map_err(|error| crate::Error::Error(error.to_string()))?;

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(out_of_bounds_error!())?;

        Ok(&self.data[offset..end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
