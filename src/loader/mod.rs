//! Reads a .NET module into a [`TypeCatalog`].
//!
//! Every `TypeDef` row becomes a descriptor, in table order, followed by stand-ins for the
//! external types the definitions mention. Referenced assemblies are never required: an
//! assembly that cannot be located or read only costs the flags that depend on its types,
//! and the load goes on with a warning.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asmdump::loader::{load, DirectoryResolver, LoadOptions};
//! use std::path::Path;
//!
//! let options = LoadOptions::with_resolver(
//!     DirectoryResolver::new().with_search_directory("/usr/lib/mono/4.5"),
//! );
//! let catalog = load(Path::new("MyLibrary.dll"), &options)?;
//! println!("{} types in {}", catalog.definition_count(), catalog.name());
//! # Ok::<(), asmdump::Error>(())
//! ```

mod ancestry;
mod context;
mod identity;
mod names;
mod resolver;

use std::path::Path;

use log::debug;

pub use identity::{public_key_token, AssemblyIdentity};
pub use resolver::{AssemblyResolver, DirectoryResolver, NoResolver};

use crate::{catalog::TypeCatalog, file::File, metadata::view::MetadataView, Result};
use context::CatalogLoader;

/// How a load treats referenced assemblies
pub struct LoadOptions {
    /// Locates referenced assemblies
    pub resolver: Box<dyn AssemblyResolver>,
}

impl LoadOptions {
    /// Load with a custom dependency lookup
    #[must_use]
    pub fn with_resolver(resolver: impl AssemblyResolver + 'static) -> Self {
        LoadOptions {
            resolver: Box::new(resolver),
        }
    }

    /// Never read referenced assemblies
    #[must_use]
    pub fn isolated() -> Self {
        LoadOptions::with_resolver(NoResolver)
    }
}

impl Default for LoadOptions {
    /// Search next to the loaded module
    fn default() -> Self {
        LoadOptions::with_resolver(DirectoryResolver::new())
    }
}

/// Load the module at `path`
///
/// # Errors
/// Returns an error if the file cannot be read, is not a .NET module or its metadata is
/// malformed.
pub fn load(path: &Path, options: &LoadOptions) -> Result<TypeCatalog> {
    debug!("Loading {}", path.display());

    let file = File::from_file(path)?;
    let view = MetadataView::from_file(&file)?;

    CatalogLoader::new(&view)?.load(path.parent(), options.resolver.as_ref())
}

/// Load a module from its raw metadata (the blob starting with the `BSJB` signature)
///
/// Dependencies are searched for relative to `directory`.
///
/// # Errors
/// Returns an error if the metadata is malformed.
pub fn load_from_metadata(
    metadata: &[u8],
    directory: Option<&Path>,
    options: &LoadOptions,
) -> Result<TypeCatalog> {
    let view = MetadataView::from_metadata(metadata)?;

    CatalogLoader::new(&view)?.load(directory, options.resolver.as_ref())
}
