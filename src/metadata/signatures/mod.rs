//! Signature blob decoding (ECMA-335 II.23.2).
//!
//! Only the signature kinds needed to describe a type's public surface are decoded:
//! method, property and type specification signatures.

mod parser;
mod types;

pub use parser::SignatureParser;
pub use types::*;

use crate::Result;

/// Decode a method signature blob
///
/// # Errors
/// Returns an error if the blob is malformed.
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    SignatureParser::new(data).parse_method_signature()
}

/// Decode a property signature blob
///
/// # Errors
/// Returns an error if the blob is malformed.
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    SignatureParser::new(data).parse_property_signature()
}

/// Decode a type specification blob
///
/// # Errors
/// Returns an error if the blob is malformed.
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    SignatureParser::new(data).parse_type_spec_signature()
}
