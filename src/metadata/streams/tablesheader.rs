use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Result,
};

/// Heap size flag announcing four extra bytes after the row counts
const EXTRA_DATA: u8 = 0x40;

#[derive(Clone, Copy, Debug)]
struct TableSpan {
    offset: usize,
    rows: u32,
}

/// The `#~` (or uncompressed `#-`) stream: header, row counts and the table data
/// (ECMA-335 II.24.2.6)
///
/// ```rust,ignore
/// use asmdump::metadata::{streams::TablesHeader, tables::TypeDefRaw};
///
/// let tables = TablesHeader::from(tables_stream)?;
/// if let Some(typedefs) = tables.table::<TypeDefRaw>() {
///     for row in typedefs.iter() {
///         println!("{:?}", row.token);
///     }
/// }
/// ```
pub struct TablesHeader<'a> {
    /// Major version of the table schema
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    tables: Vec<Option<TableSpan>>,
}

impl<'a> TablesHeader<'a> {
    /// Parse the tables stream and locate every present table
    ///
    /// # Errors
    /// Returns an error if the stream is truncated, names unknown tables or holds no tables.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(out_of_bounds_error!());
        }

        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let info = Arc::new(TableInfo::new(data, valid_bitvec)?);

        let mut current_offset = 24 + valid_bitvec.count_ones() as usize * 4;
        if data[6] & EXTRA_DATA != 0 {
            current_offset += 4;
        }

        let mut tables = vec![None; TableId::iter().count()];
        for table_id in TableId::iter() {
            if valid_bitvec & (1 << table_id as usize) == 0 {
                continue;
            }

            let rows = info.rows(table_id);
            let size = rows as usize * info.row_size(table_id) as usize;
            let end = current_offset
                .checked_add(size)
                .filter(|end| *end <= data.len())
                .ok_or_else(|| {
                    malformed_error!("Table {:?} exceeds the tables stream", table_id)
                })?;

            tables[table_id as usize] = Some(TableSpan {
                offset: current_offset,
                rows,
            });
            current_offset = end;
        }

        Ok(TablesHeader {
            major_version: data[4],
            minor_version: data[5],
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            tables,
        })
    }

    /// Number of rows in `table_id`, 0 if absent
    #[must_use]
    pub fn row_count(&self, table_id: TableId) -> u32 {
        self.tables[table_id as usize].map_or(0, |span| span.rows)
    }

    /// Typed access to the table holding rows of type `T`
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let span = self.tables[T::TABLE_ID as usize]?;
        MetadataTable::new(&self.data[span.offset..], span.rows, self.info.clone()).ok()
    }
}
