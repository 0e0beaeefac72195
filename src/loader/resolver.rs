//! Dependency lookup strategies.
//!
//! Referenced assemblies are only needed to refine a few flags that depend on a type's full
//! ancestry. The lookup policy is an explicit [`AssemblyResolver`] handed to each load call,
//! so two loads with different search paths never influence each other.

use std::path::{Path, PathBuf};

/// Locates the file of a referenced assembly
pub trait AssemblyResolver: Send + Sync {
    /// Find the file for the assembly `name`, referenced from a module in `requesting_directory`
    fn resolve(&self, name: &str, requesting_directory: Option<&Path>) -> Option<PathBuf>;
}

/// File extensions tried in every candidate directory, in order
const CANDIDATE_EXTENSIONS: [&str; 2] = ["dll", "exe"];

/// Searches the requesting module's directory, then any configured search directories
#[derive(Debug, Default, Clone)]
pub struct DirectoryResolver {
    search_directories: Vec<PathBuf>,
}

impl DirectoryResolver {
    /// A resolver that only searches next to the requesting module
    #[must_use]
    pub fn new() -> Self {
        DirectoryResolver::default()
    }

    /// Also search `directory`, after all previously added directories
    #[must_use]
    pub fn with_search_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.search_directories.push(directory.into());
        self
    }
}

impl AssemblyResolver for DirectoryResolver {
    fn resolve(&self, name: &str, requesting_directory: Option<&Path>) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return None;
        }

        requesting_directory
            .into_iter()
            .chain(self.search_directories.iter().map(PathBuf::as_path))
            .flat_map(|directory| {
                CANDIDATE_EXTENSIONS
                    .iter()
                    .map(move |extension| directory.join(format!("{name}.{extension}")))
            })
            .find(|candidate| candidate.is_file())
    }
}

/// Never resolves anything; every external type stays a stand-in
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResolver;

impl AssemblyResolver for NoResolver {
    fn resolve(&self, _name: &str, _requesting_directory: Option<&Path>) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requesting_directory_first() {
        let local = tempfile::tempdir().unwrap();
        let shared = tempfile::tempdir().unwrap();

        std::fs::write(shared.path().join("Dep.dll"), b"shared").unwrap();
        std::fs::write(local.path().join("Dep.exe"), b"local").unwrap();

        let resolver = DirectoryResolver::new().with_search_directory(shared.path());
        assert_eq!(
            resolver.resolve("Dep", Some(local.path())),
            Some(local.path().join("Dep.exe"))
        );
        assert_eq!(
            resolver.resolve("Dep", None),
            Some(shared.path().join("Dep.dll"))
        );
    }

    #[test]
    fn dll_before_exe() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Both.exe"), b"").unwrap();
        std::fs::write(dir.path().join("Both.dll"), b"").unwrap();

        let resolver = DirectoryResolver::new();
        assert_eq!(
            resolver.resolve("Both", Some(dir.path())),
            Some(dir.path().join("Both.dll"))
        );
    }

    #[test]
    fn misses() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new().with_search_directory(dir.path());

        assert_eq!(resolver.resolve("Missing", Some(dir.path())), None);
        assert_eq!(resolver.resolve("../escape", Some(dir.path())), None);
        assert_eq!(resolver.resolve("", Some(dir.path())), None);
        assert_eq!(NoResolver.resolve("Missing", Some(dir.path())), None);
    }
}
