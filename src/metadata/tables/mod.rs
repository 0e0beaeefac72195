//! Metadata tables (ECMA-335 II.22).
//!
//! [`TableInfo`] derives every row layout from the row counts of the tables stream;
//! [`MetadataTable`] provides typed, lazily decoded access to the rows of a single table.
//! Only the tables needed to build a type catalog have typed row readers, every other table
//! is skipped using its row size.

mod assembly;
mod codedindex;
mod genericparam;
mod indirection;
mod interfaceimpl;
mod methoddef;
mod methodsemantics;
mod module;
mod nestedclass;
mod param;
mod property;
mod tableid;
mod tableinfo;
mod typedef;
mod typeref;
mod typespec;

use std::marker::PhantomData;

use crate::Result;

pub use assembly::{AssemblyRaw, AssemblyRefRaw};
pub use codedindex::{CodedIndex, CodedIndexType};
pub use genericparam::GenericParamRaw;
pub use indirection::{MethodPtrRaw, ParamPtrRaw, PropertyPtrRaw};
pub use interfaceimpl::InterfaceImplRaw;
pub use methoddef::{MethodAttributes, MethodDefRaw};
pub use methodsemantics::{MethodSemanticsAttributes, MethodSemanticsRaw};
pub use module::ModuleRaw;
pub use nestedclass::NestedClassRaw;
pub use param::ParamRaw;
pub use property::{PropertyMapRaw, PropertyRaw};
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};
pub use typedef::{TypeAttributes, TypeDefRaw};
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

/// A row type that can be decoded from its table's raw bytes
pub trait RowReadable: Sized + Send {
    /// The table this row type belongs to
    const TABLE_ID: TableId;

    /// Decode the row `rid` starting at `offset`, advancing `offset` past it
    ///
    /// # Errors
    /// Returns an error if the row data is truncated or carries an invalid coded index.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed view over the rows of one metadata table
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Create a view over `row_count` rows stored at the start of `data`
    ///
    /// # Errors
    /// Returns an error if `data` is too short to hold all rows.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = sizes.row_size(T::TABLE_ID);
        if u64::from(row_count) * u64::from(row_size) > data.len() as u64 {
            return Err(out_of_bounds_error!());
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of a single row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Decode the row with the 1-based `index`
    #[must_use]
    pub fn get(&self, index: u32) -> Option<T> {
        if index == 0 || self.row_count < index {
            return None;
        }

        T::row_read(
            self.data,
            &mut ((index as usize - 1) * self.row_size as usize),
            index,
            &self.sizes,
        )
        .ok()
    }

    /// Iterate over all rows in order
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`]
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        match T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        ) {
            Ok(row) => {
                self.current_row += 1;
                Some(row)
            }
            Err(_) => None,
        }
    }
}

/// Half-open row range `[start, end)` owned by a parent row through a list column
///
/// List columns (`TypeDef.MethodList`, `MethodDef.ParamList`, `PropertyMap.PropertyList`)
/// hold the first row of a run that ends where the next parent's run starts, or after the
/// last row of the target table. Out-of-range starts yield an empty range.
#[must_use]
pub fn list_range(start: u32, next_start: Option<u32>, target_rows: u32) -> std::ops::Range<u32> {
    let end = next_start.unwrap_or(target_rows + 1).min(target_rows + 1);
    if start == 0 || start > end {
        return 0..0;
    }

    start..end
}
