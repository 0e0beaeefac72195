use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, TableId},
    Result,
};

/// Row count of a single table and the width of indexes pointing into it
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits needed to store the largest row number
    pub bits: u8,
    /// Whether simple indexes into this table take four bytes
    pub is_large: bool,
}

impl TableRowInfo {
    /// Derive the index widths for a table of `rows` rows
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths of all tables in a metadata stream
///
/// Every column that references a heap, a table or a coded index changes width depending on
/// these numbers, so every row layout is derived from here.
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Read the row counts following the tables header in `data`
    ///
    /// `data` is the complete `#~` stream; the row counts begin at offset 24 and appear in
    /// table order for every bit set in `valid_bitvec`.
    ///
    /// # Errors
    /// Returns an error if the stream is truncated or names a table this crate does not know.
    pub fn new(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        if valid_bitvec >> TableId::COUNT != 0 {
            return Err(malformed_error!(
                "Tables stream references unknown tables - {:#x}",
                valid_bitvec
            ));
        }

        let mut row_counts = Vec::new();
        let mut next_row_offset = 24;
        for table_id in TableId::iter() {
            if (valid_bitvec & (1 << table_id as usize)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            row_counts.push((table_id, row_count));
        }

        let heap_size_flags = *data.get(6).ok_or(out_of_bounds_error!())?;
        Ok(Self::with_rows(
            &row_counts,
            heap_size_flags & 0x01 != 0,
            heap_size_flags & 0x04 != 0,
            heap_size_flags & 0x02 != 0,
        ))
    }

    /// Build a [`TableInfo`] from explicit row counts and heap index widths
    #[must_use]
    pub fn with_rows(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for (table, rows) in valid_tables {
            table_info.rows[*table as usize] = TableRowInfo::new(*rows);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Split a raw coded index value into its target table and row
    ///
    /// # Errors
    /// Returns an error if the tag does not name a table of `coded_index_type`.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1 << tag_bits) - 1;

        let tag = value & tag_mask;
        let index = value >> tag_bits;

        match tables.get(tag as usize) {
            Some(table) => Ok((*table, index)),
            None => Err(malformed_error!(
                "Invalid tag {} for coded index {:?}",
                tag,
                coded_index_type
            )),
        }
    }

    /// Number of rows in `table`
    #[must_use]
    pub fn rows(&self, table: TableId) -> u32 {
        self.rows[table as usize].rows
    }

    /// Whether simple indexes into `id` are four bytes wide
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Whether `#Strings` indexes are four bytes wide
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Whether `#GUID` indexes are four bytes wide
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// Whether `#Blob` indexes are four bytes wide
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Width of a simple index into `table_id`
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].is_large {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of kind `coded_index_type`
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Size in bytes of a single row of `table` (ECMA-335 II.22)
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(&self, table: TableId) -> u32 {
        let s = self.str_bytes();
        let g = self.guid_bytes();
        let b = self.blob_bytes();
        let idx = |table: TableId| self.table_index_bytes(table);
        let ci = |kind: CodedIndexType| self.coded_index_bytes(kind);

        let size = match table {
            TableId::Module => 2 + s + g + g + g,
            TableId::TypeRef => ci(CodedIndexType::ResolutionScope) + s + s,
            TableId::TypeDef => {
                4 + s
                    + s
                    + ci(CodedIndexType::TypeDefOrRef)
                    + idx(TableId::Field)
                    + idx(TableId::MethodDef)
            }
            TableId::FieldPtr => idx(TableId::Field),
            TableId::Field => 2 + s + b,
            TableId::MethodPtr => idx(TableId::MethodDef),
            TableId::MethodDef => 4 + 2 + 2 + s + b + idx(TableId::Param),
            TableId::ParamPtr => idx(TableId::Param),
            TableId::Param => 2 + 2 + s,
            TableId::InterfaceImpl => idx(TableId::TypeDef) + ci(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef => ci(CodedIndexType::MemberRefParent) + s + b,
            TableId::Constant => 2 + ci(CodedIndexType::HasConstant) + b,
            TableId::CustomAttribute => {
                ci(CodedIndexType::HasCustomAttribute) + ci(CodedIndexType::CustomAttributeType) + b
            }
            TableId::FieldMarshal => ci(CodedIndexType::HasFieldMarshal) + b,
            TableId::DeclSecurity => 2 + ci(CodedIndexType::HasDeclSecurity) + b,
            TableId::ClassLayout => 2 + 4 + idx(TableId::TypeDef),
            TableId::FieldLayout => 4 + idx(TableId::Field),
            TableId::StandAloneSig => b,
            TableId::EventMap => idx(TableId::TypeDef) + idx(TableId::Event),
            TableId::EventPtr => idx(TableId::Event),
            TableId::Event => 2 + s + ci(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap => idx(TableId::TypeDef) + idx(TableId::Property),
            TableId::PropertyPtr => idx(TableId::Property),
            TableId::Property => 2 + s + b,
            TableId::MethodSemantics => {
                2 + idx(TableId::MethodDef) + ci(CodedIndexType::HasSemantics)
            }
            TableId::MethodImpl => idx(TableId::TypeDef) + 2 * ci(CodedIndexType::MethodDefOrRef),
            TableId::ModuleRef => s,
            TableId::TypeSpec => b,
            TableId::ImplMap => {
                2 + ci(CodedIndexType::MemberForwarded) + s + idx(TableId::ModuleRef)
            }
            TableId::FieldRVA => 4 + idx(TableId::Field),
            TableId::EncLog => 4 + 4,
            TableId::EncMap => 4,
            TableId::Assembly => 4 + 2 + 2 + 2 + 2 + 4 + b + s + s,
            TableId::AssemblyProcessor => 4,
            TableId::AssemblyOS => 4 + 4 + 4,
            TableId::AssemblyRef => 2 + 2 + 2 + 2 + 4 + b + s + s + b,
            TableId::AssemblyRefProcessor => 4 + idx(TableId::AssemblyRef),
            TableId::AssemblyRefOS => 4 + 4 + 4 + idx(TableId::AssemblyRef),
            TableId::File => 4 + s + b,
            TableId::ExportedType => 4 + 4 + s + s + ci(CodedIndexType::Implementation),
            TableId::ManifestResource => 4 + 4 + s + ci(CodedIndexType::Implementation),
            TableId::NestedClass => idx(TableId::TypeDef) + idx(TableId::TypeDef),
            TableId::GenericParam => 2 + 2 + ci(CodedIndexType::TypeOrMethodDef) + s,
            TableId::MethodSpec => ci(CodedIndexType::MethodDefOrRef) + b,
            TableId::GenericParamConstraint => {
                idx(TableId::GenericParam) + ci(CodedIndexType::TypeDefOrRef)
            }
        };

        u32::from(size)
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}
