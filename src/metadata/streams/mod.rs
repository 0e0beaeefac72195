//! Metadata streams (ECMA-335 II.24.2).
//!
//! The metadata root lists a handful of named streams. Type catalogs only need three of them:
//! the `#~` tables, the `#Strings` identifier heap and the `#Blob` signature heap.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
