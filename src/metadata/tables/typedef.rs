use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// Flags of the `TypeDef` table, ECMA-335 II.23.1.15
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Top-level type, not visible outside the assembly
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Top-level public type
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested type with public visibility
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested type with private visibility
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested type with family visibility
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested type with assembly visibility
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Nested type with family and assembly visibility
    pub const NESTED_FAM_AND_ASSEM: u32 = 0x0000_0006;
    /// Nested type with family or assembly visibility
    pub const NESTED_FAM_OR_ASSEM: u32 = 0x0000_0007;
    /// Mask for the class semantics bit
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
    /// Name is special
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// Type is imported from a COM type library
    pub const IMPORT: u32 = 0x0000_1000;
    /// Type is serializable
    pub const SERIALIZABLE: u32 = 0x0000_2000;
}

/// A row of the `TypeDef` table
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Offset of the row within the table
    pub offset: usize,
    /// [`TypeAttributes`] bitmask
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type (`TypeDefOrRef`), null for interfaces and `System.Object`
    pub extends: CodedIndex,
    /// First row of the owned field run
    pub field_list: u32,
    /// First row of the owned method run
    pub method_list: u32,
}

impl RowReadable for TypeDefRaw {
    const TABLE_ID: TableId = TableId::TypeDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::new(0x0200_0000 + rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }
}
