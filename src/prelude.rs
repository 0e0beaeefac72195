//! # asmdump Prelude
//!
//! The types needed to load a module, inspect its catalog and render a listing.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all asmdump operations
pub use crate::Error;

/// The result type used throughout asmdump
pub use crate::Result;

// ================================================================================================
// Loading
// ================================================================================================

/// Load a module from disk or from raw metadata
pub use crate::loader::{load, load_from_metadata};

/// Dependency handling
pub use crate::loader::{AssemblyResolver, DirectoryResolver, LoadOptions, NoResolver};

/// Low-level file parsing utilities
pub use crate::{File, Parser};

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

// ================================================================================================
// Catalog
// ================================================================================================

/// Catalog, descriptors and references
pub use crate::catalog::{
    CatalogBuilder, MethodDescriptor, ParameterDescriptor, PropertyDescriptor, TypeCatalog,
    TypeDescriptor, TypeFlags, TypeId, TypeKind, TypeReference, WellKnownType,
};

// ================================================================================================
// Output
// ================================================================================================

/// Rendering
pub use crate::emitter::{Emitter, NameResolver};

/// Files on disk
pub use crate::output::{dump, write_lines, DumpOptions, OutputOptions};

/// Documentation-generator configuration
pub use crate::doxygen::DoxygenConfig;
