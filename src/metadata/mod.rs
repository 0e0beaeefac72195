//! ECMA-335 metadata: the CLI header, the metadata root, its streams and tables, and the
//! signature blobs referenced from them.

pub mod cor20header;
pub mod root;
pub mod signatures;
pub mod streams;
pub mod tables;
pub mod token;
pub mod view;
