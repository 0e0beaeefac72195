//! Pointer tables of unoptimized (`#-`) metadata.
//!
//! When present, list columns index into the pointer table instead of the target table,
//! and each pointer row names the actual target row.

use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

macro_rules! pointer_table {
    ($(#[$doc:meta])* $name:ident, $table:expr, $target:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            /// Row id, 1-based
            pub rid: u32,
            /// Token of this row
            pub token: Token,
            /// Offset of the row within the table
            pub offset: usize,
            /// Row in the target table
            pub target: u32,
        }

        impl RowReadable for $name {
            const TABLE_ID: TableId = $table;

            fn row_read(
                data: &[u8],
                offset: &mut usize,
                rid: u32,
                sizes: &TableInfoRef,
            ) -> Result<Self> {
                Ok($name {
                    rid,
                    token: Token::new($table.token_base() + rid),
                    offset: *offset,
                    target: read_le_at_dyn(data, offset, sizes.is_large($target))?,
                })
            }
        }
    };
}

pointer_table!(
    /// A row of the `MethodPtr` table
    MethodPtrRaw,
    TableId::MethodPtr,
    TableId::MethodDef
);

pointer_table!(
    /// A row of the `ParamPtr` table
    ParamPtrRaw,
    TableId::ParamPtr,
    TableId::Param
);

pointer_table!(
    /// A row of the `PropertyPtr` table
    PropertyPtrRaw,
    TableId::PropertyPtr,
    TableId::Property
);
