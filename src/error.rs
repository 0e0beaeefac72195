use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Only conditions that end a run are reported through this type. Unresolvable dependency
/// modules, invisible types, unknown type kinds and unmapped primitives are all recovered
/// locally while loading or emitting and never show up here.
///
/// # Error Categories
///
/// ## File Parsing Errors
/// - [`Error::InvalidOffset`] - Invalid file offset during parsing
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond file boundaries
/// - [`Error::NotSupported`] - Unsupported file format or feature
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from goblin crate
///
/// ## Catalog Errors
/// - [`Error::TypeNotFound`] - A metadata token does not resolve to a type
/// - [`Error::RecursionLimit`] - Maximum recursion depth exceeded
///
/// # Examples
///
/// ```rust,no_run
/// use asmdump::{Error, LoadOptions};
/// use std::path::Path;
///
/// match asmdump::load(Path::new("assembly.dll"), &LoadOptions::default()) {
///     Ok(catalog) => println!("Loaded {}", catalog.name()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Encountered an invalid offset while parsing file structures.
    #[error("Could not retrieve a valid offset!")]
    InvalidOffset,

    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// This file type is not supported.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// A metadata token which should point at a type could not be resolved.
    #[error("Failed to find type - {0}")]
    TypeNotFound(Token),

    /// Recursion limit reached.
    ///
    /// Signature decoding and ancestry walks are depth-limited; this error reports the
    /// limit that was exceeded.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
