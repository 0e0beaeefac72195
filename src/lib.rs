// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # asmdump
//!
//! Turns the public surface of a .NET assembly into a pseudo-C# listing that a documentation
//! generator such as doxygen can index. The assembly is never executed: everything is read
//! from its ECMA-335 metadata, on any platform, without a .NET runtime.
//!
//! ## Pipeline
//!
//! 1. [`loader`] reads the module's metadata tables into a [`TypeCatalog`]. Referenced
//!    assemblies are optional and only looked up through an explicit
//!    [`loader::AssemblyResolver`].
//! 2. [`Emitter`] renders the catalog as namespace blocks holding class, interface and
//!    enum declarations with their properties, public methods and nested types.
//! 3. [`output`] writes the lines to `<out>/src/<module>.cs`; [`doxygen`] renders the
//!    generator configuration that points at them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asmdump::{dump, DumpOptions};
//! use std::path::Path;
//!
//! let listing = dump(Path::new("MyLibrary.dll"), Path::new("out"), &DumpOptions::default())?;
//! println!("Listing written to {}", listing.display());
//! # Ok::<(), asmdump::Error>(())
//! ```
//!
//! ### Working with the catalog
//!
//! ```rust,no_run
//! use asmdump::prelude::*;
//! use std::path::Path;
//!
//! let catalog = load(Path::new("MyLibrary.dll"), &LoadOptions::isolated())?;
//! for (id, descriptor) in catalog.definitions() {
//!     if descriptor.is_visible() {
//!         println!("{} ({:?})", catalog.full_name(id), descriptor.kind);
//!     }
//! }
//!
//! for line in Emitter::emit(&catalog) {
//!     println!("{line}");
//! }
//! # Ok::<(), asmdump::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`metadata`] - ECMA-335 metadata root, heaps, tables and signatures
//! - [`catalog`] - The read-only type catalog consumed by the emitter
//! - [`loader`] - Catalog construction and dependency resolution
//! - [`emitter`] - Pseudo-source rendering
//! - [`output`] / [`doxygen`] - Files on disk
//! - [`Error`] and [`Result`] - Error handling

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use asmdump::prelude::*;
///
/// let catalog = load("MyLibrary.dll".as_ref(), &LoadOptions::default())?;
/// let lines = Emitter::emit(&catalog);
/// # Ok::<(), asmdump::Error>(())
/// ```
pub mod prelude;

/// Definitions and parsing of CIL metadata based on ECMA-335
///
/// Only the parts needed to describe types are decoded:
///
/// - [`metadata::cor20header`] - CLI header
/// - [`metadata::root`] - Metadata root and stream directory
/// - [`metadata::streams`] - `#Strings` and `#Blob` heaps, tables stream header
/// - [`metadata::tables`] - Row layouts and typed rows
/// - [`metadata::signatures`] - Method, property and type specification signatures
/// - [`metadata::view`] - The combination of all of the above for one module
///
/// # Examples
///
/// ```rust,no_run
/// use asmdump::{
///     metadata::{tables::TableId, view::MetadataView},
///     File,
/// };
/// use std::path::Path;
///
/// let file = File::from_file(Path::new("MyLibrary.dll"))?;
/// let view = MetadataView::from_file(&file)?;
/// println!("Runtime version: {}", view.root.version);
/// println!("Types defined: {}", view.tables.row_count(TableId::TypeDef));
/// # Ok::<(), asmdump::Error>(())
/// ```
pub mod metadata;

/// Type descriptors of a loaded module
///
/// A [`catalog::TypeCatalog`] is built once per load through a [`catalog::CatalogBuilder`]
/// and never changes afterwards.
pub mod catalog;

/// Reading modules into catalogs
pub mod loader;

/// Pseudo-C# rendering of a catalog
pub mod emitter;

/// Listing files
pub mod output;

/// Documentation-generator configuration
pub mod doxygen;

/// `asmdump` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `asmdump` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use asmdump::{Error, LoadOptions};
///
/// match asmdump::load(std::path::Path::new("broken.dll"), &LoadOptions::isolated()) {
///     Ok(catalog) => println!("Loaded {}", catalog.name()),
///     Err(Error::NotSupported) => println!("File format not supported"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Low-level PE image access
///
/// # Example
///
/// ```rust,no_run
/// use asmdump::File;
/// let file = File::from_file(std::path::Path::new("MyLibrary.dll"))?;
/// println!("Image size: {}", file.len());
/// # Ok::<(), asmdump::Error>(())
/// ```
pub use file::File;

/// Cursor over raw metadata bytes
pub use file::parser::Parser;

/// The `#Strings` heap
pub use metadata::streams::Strings;

/// The type catalog
pub use catalog::TypeCatalog;

/// Pseudo-source emitter
pub use emitter::Emitter;

/// Catalog loading
pub use loader::{load, load_from_metadata, LoadOptions};

/// Writing listings
pub use output::{dump, write_lines, DumpOptions, OutputOptions};
