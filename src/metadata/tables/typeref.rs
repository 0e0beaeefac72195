use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `TypeRef` table
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Offset of the row within the table
    pub offset: usize,
    /// Where the type lives (`ResolutionScope`)
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}

impl RowReadable for TypeRefRaw {
    const TABLE_ID: TableId = TableId::TypeRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeRefRaw {
            rid,
            token: Token::new(0x0100_0000 + rid),
            offset: *offset,
            resolution_scope: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::ResolutionScope,
            )?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x06, 0x00, // resolution_scope, AssemblyRef 1
            0x10, 0x00, // type_name
            0x20, 0x00, // type_namespace
            0x07, 0x00, // resolution_scope, TypeRef 1
            0x30, 0x00, // type_name
            0x00, 0x00, // type_namespace
        ];

        let sizes = Arc::new(TableInfo::with_rows(&[(TableId::TypeRef, 2)], false, false, false));
        let table = MetadataTable::<TypeRefRaw>::new(&data, 2, sizes).unwrap();
        let rows: Vec<TypeRefRaw> = table.iter().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].resolution_scope, CodedIndex::new(TableId::AssemblyRef, 1));
        assert_eq!(rows[0].type_name, 0x10);
        assert_eq!(rows[0].type_namespace, 0x20);
        assert_eq!(rows[1].token, Token::new(0x0100_0002));
        assert_eq!(rows[1].resolution_scope, CodedIndex::new(TableId::TypeRef, 1));
    }
}
