//! PE image access for .NET modules.
//!
//! A [`File`] owns the raw bytes of an image (memory-mapped from disk or held in memory)
//! together with the parsed PE headers, and knows how to translate relative virtual
//! addresses into file offsets. Everything above this layer only deals with the CLI
//! header and the metadata it points at.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asmdump::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("MyLibrary.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let clr_offset = file.rva_to_offset(clr_rva)?;
//! let header = file.data_slice(clr_offset, clr_size)?;
//! # Ok::<(), asmdump::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

use crate::{
    Error::{Empty, GoblinErr},
    Result,
};

/// Storage behind a [`File`]
pub trait Backend: Send + Sync {
    /// Bounds-checked slice of the image
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the requested range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// The complete image
    fn data(&self) -> &[u8];

    /// Length of the image in bytes
    fn len(&self) -> usize;
}

/// A loaded PE image carrying a CLR runtime header
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-map and parse the image at `file`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is empty, is not a PE image or has no
    /// CLR runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        Self::load(Physical::new(file)?)
    }

    /// Parse an image held in memory
    ///
    /// # Errors
    /// Returns an error if the buffer is empty, is not a PE image or has no CLR runtime header.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        Self::load(Memory::new(data))
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        File::try_new(Box::new(data), |data| {
            let pe = PE::parse(data.data()).map_err(GoblinErr)?;
            let Some(optional_header) = pe.header.optional_header else {
                return Err(malformed_error!("File does not have an OptionalHeader"));
            };

            match optional_header.data_directories.get_clr_runtime_header() {
                Some(_) => Ok(pe),
                None => Err(malformed_error!(
                    "File does not have a CLR runtime header directory"
                )),
            }
        })
    }

    /// Length of the image in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_data(|data| data.len())
    }

    /// Whether the image is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complete image
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Bounds-checked slice of the image
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// RVA and size of the CLR runtime header
    ///
    /// # Errors
    /// Returns an error if the directory is missing; `load` already rejects such images.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let directory = pe
                .header
                .optional_header
                .as_ref()
                .and_then(|header| match header.data_directories.get_clr_runtime_header() {
                    Some(directory) => Some((
                        directory.virtual_address as usize,
                        directory.size as usize,
                    )),
                    None => None,
                });

            directory.ok_or_else(|| malformed_error!("CLR runtime header directory is missing"))
        })
    }

    /// Translate a relative virtual address into a file offset
    ///
    /// # Errors
    /// Returns an error if no section contains `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 =
            u32::try_from(rva)
                .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}
