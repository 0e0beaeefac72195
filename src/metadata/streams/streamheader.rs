use crate::{file::io::read_le_at, Result};

/// An entry of the stream directory in the metadata root (ECMA-335 II.24.2.2)
pub struct StreamHeader {
    /// Offset of the stream, relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream, e.g. `#~` or `#Strings`
    pub name: String,
}

impl StreamHeader {
    /// Parse a stream header from the start of `data`
    ///
    /// # Errors
    /// Returns an error if the data is truncated or the name is not NUL-terminated within
    /// 32 bytes.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(out_of_bounds_error!());
        }

        let name_area = &data[8..data.len().min(8 + 32)];
        let Some(name_len) = name_area.iter().position(|byte| *byte == 0) else {
            return Err(malformed_error!("Stream header name is not terminated"));
        };

        let name = std::str::from_utf8(&name_area[..name_len])
            .map_err(|_| malformed_error!("Invalid stream header name"))?
            .to_string();

        Ok(StreamHeader {
            offset: read_le_at::<u32>(data, &mut 0)?,
            size: read_le_at::<u32>(data, &mut 4)?,
            name,
        })
    }
}
