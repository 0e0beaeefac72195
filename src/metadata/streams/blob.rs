use crate::{file::parser::Parser, Result};

/// The `#Blob` heap: length-prefixed binary data such as signatures (ECMA-335 II.24.2.4)
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wrap the heap data; the first byte must be the empty blob
    ///
    /// # Errors
    /// Returns an error if the heap is empty or does not start with a NUL byte.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// Get the blob starting at `index`, without its length prefix
    ///
    /// # Errors
    /// Returns an error if `index` or the encoded length runs past the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        if index >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let mut parser = Parser::new(&self.data[index..]);
        let len = parser.read_compressed_uint()? as usize;

        let data_start = index + parser.pos();
        let data_end = data_start
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(out_of_bounds_error!())?;

        Ok(&self.data[data_start..data_end])
    }
}
