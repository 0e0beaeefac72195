use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// All possible flags for `MethodSemanticsAttributes`
pub mod MethodSemanticsAttributes {
    /// Setter for property
    pub const SETTER: u32 = 0x0001;
    /// Getter for property
    pub const GETTER: u32 = 0x0002;
    /// Other method for property or event
    pub const OTHER: u32 = 0x0004;
    /// `AddOn` method for event
    pub const ADD_ON: u32 = 0x0008;
    /// `RemoveOn` method for event
    pub const REMOVE_ON: u32 = 0x0010;
    /// Fire method for event
    pub const FIRE: u32 = 0x0020;
}

/// A row of the `MethodSemantics` table
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Offset of the row within the table
    pub offset: usize,
    /// [`MethodSemanticsAttributes`] bitmask
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// The owning property or event (`HasSemantics`)
    pub association: CodedIndex,
}

impl RowReadable for MethodSemanticsRaw {
    const TABLE_ID: TableId = TableId::MethodSemantics;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: Token::new(0x1800_0000 + rid),
            offset: *offset,
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
        })
    }
}
