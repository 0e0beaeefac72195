//! Borrowed view over the metadata of a loaded image.

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, Strings, TablesHeader},
    },
    Result,
};

/// The parsed metadata root with the streams needed to describe types
pub struct MetadataView<'a> {
    /// The metadata root and its stream directory
    pub root: Root,
    /// The `#~` or `#-` stream
    pub tables: TablesHeader<'a>,
    /// The `#Strings` heap
    pub strings: Strings<'a>,
    /// The `#Blob` heap
    pub blobs: Blob<'a>,
}

impl<'a> MetadataView<'a> {
    /// Locate the metadata of a PE image through its CLR runtime header
    ///
    /// # Errors
    /// Returns an error if the CLR header or the metadata directory is invalid.
    pub fn from_file(file: &'a File) -> Result<MetadataView<'a>> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20_header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

        let metadata_offset = file.rva_to_offset(cor20_header.meta_data_rva as usize)?;
        let metadata = file.data_slice(metadata_offset, cor20_header.meta_data_size as usize)?;

        Self::from_metadata(metadata)
    }

    /// Parse a metadata blob starting with the `BSJB` root signature
    ///
    /// # Errors
    /// Returns an error if the root is malformed or one of the required streams is missing.
    pub fn from_metadata(metadata: &'a [u8]) -> Result<MetadataView<'a>> {
        let root = Root::read(metadata)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;
        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let Some(stream_data) = start
                .checked_add(stream.size as usize)
                .and_then(|end| metadata.get(start..end))
            else {
                return Err(out_of_bounds_error!());
            };

            match stream.name.as_str() {
                "#~" | "#-" => tables = Some(TablesHeader::from(stream_data)?),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                _ => {}
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Metadata has no tables stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Metadata has no #Strings heap"));
        };

        Ok(MetadataView {
            root,
            tables,
            strings,
            // Images without any signatures may omit the heap entirely
            blobs: match blobs {
                Some(blobs) => blobs,
                None => Blob::from(&[0])?,
            },
        })
    }
}
