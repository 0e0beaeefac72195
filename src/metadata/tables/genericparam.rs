use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `GenericParam` table
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Offset of the row within the table
    pub offset: usize,
    /// Zero-based position within the owner's parameter list
    pub number: u32,
    /// Variance and constraint flags
    pub flags: u32,
    /// The owning type or method (`TypeOrMethodDef`)
    pub owner: CodedIndex,
    /// `#Strings` index of the name
    pub name: u32,
}

impl RowReadable for GenericParamRaw {
    const TABLE_ID: TableId = TableId::GenericParam;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: Token::new(0x2A00_0000 + rid),
            offset: *offset,
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
            0x01, 0x00, // number
            0x00, 0x00, // flags
            0x06, 0x00, // owner, TypeDef 3
            0x11, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::with_rows(
            &[(TableId::GenericParam, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamRaw>::new(&data, 1, sizes).unwrap();
        let row = table.get(1).unwrap();

        assert_eq!(row.number, 1);
        assert_eq!(row.owner, CodedIndex::new(TableId::TypeDef, 3));
        assert_eq!(row.name, 0x11);
    }
}
