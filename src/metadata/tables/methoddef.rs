use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// Flags of the `MethodDef` table, ECMA-335 II.23.1.10
pub mod MethodAttributes {
    /// Mask for the member access bits
    pub const MEMBER_ACCESS_MASK: u32 = 0x0007;
    /// Accessible only by the compiler
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessible by anyone in the assembly
    pub const ASSEM: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessible by anyone
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on the type rather than per instance
    pub const STATIC: u32 = 0x0010;
    /// Name is special
    pub const SPECIAL_NAME: u32 = 0x0800;
    /// Runtime should check the name encoding
    pub const RT_SPECIAL_NAME: u32 = 0x1000;
}

/// A row of the `MethodDef` table
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Offset of the row within the table
    pub offset: usize,
    /// RVA of the method body
    pub rva: u32,
    /// Implementation flags
    pub impl_flags: u32,
    /// [`MethodAttributes`] bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of the owned parameter run
    pub param_list: u32,
}

impl MethodDefRaw {
    /// Whether the method is declared `public`
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags & MethodAttributes::MEMBER_ACCESS_MASK == MethodAttributes::PUBLIC
    }
}

impl RowReadable for MethodDefRaw {
    const TABLE_ID: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::new(0x0600_0000 + rid),
            offset: *offset,
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x86, 0x08, // flags, public hidebysig specialname
            0x2A, 0x00, // name
            0x0A, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::with_rows(&[(TableId::MethodDef, 1)], false, false, false));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();
        let row = table.get(1).unwrap();

        assert_eq!(row.token, Token::new(0x0600_0001));
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.flags, 0x0886);
        assert!(row.is_public());
        assert_eq!(row.name, 0x2A);
        assert_eq!(row.signature, 0x0A);
        assert_eq!(row.param_list, 1);
    }
}
