//! Base-type chains across module boundaries.
//!
//! A few reflection flags depend on every ancestor of a type, not just its direct base.
//! The chain is followed by full name through the loaded module and, where a base lives in
//! another assembly, through that assembly's definitions, loaded on first use and cached for
//! the rest of the load.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    catalog::TypeFlags,
    file::File,
    loader::{
        names::{read_references, Definitions, Reference, Scope},
        resolver::AssemblyResolver,
    },
    metadata::{
        signatures::{parse_type_spec_signature, TypeSignature},
        tables::{CodedIndex, TableId, TypeSpecRaw},
        view::MetadataView,
    },
    Result,
};

/// Base chains longer than this are not followed any further
const MAX_ANCESTRY_DEPTH: usize = 64;

/// Direct base of every type defined by one module, keyed by full name
#[derive(Debug, Default)]
pub(crate) struct ModuleTypes {
    bases: HashMap<String, (Scope, String)>,
    directory: Option<PathBuf>,
}

impl ModuleTypes {
    /// Collect the bases of the definitions of `view`
    ///
    /// Bases in the module itself are recorded with `owner` as their scope, so the result
    /// can be followed without knowing which module it came from.
    pub fn new(
        view: &MetadataView<'_>,
        definitions: &Definitions,
        references: &[Reference],
        owner: &Scope,
        directory: Option<&Path>,
    ) -> ModuleTypes {
        let specs = view
            .tables
            .table::<TypeSpecRaw>()
            .map(|table| table.iter().collect::<Vec<_>>())
            .unwrap_or_default();

        let mut bases = HashMap::new();
        for (index, row) in definitions.rows.iter().enumerate() {
            if row.extends.is_null() {
                continue;
            }

            if let Some((scope, name)) =
                base_name(view, definitions, references, &specs, &row.extends)
            {
                let scope = match scope {
                    Scope::Local => owner.clone(),
                    other => other,
                };
                bases.insert(definitions.full_names[index].clone(), (scope, name));
            }
        }

        ModuleTypes {
            bases,
            directory: directory.map(Path::to_path_buf),
        }
    }

    /// Read the definitions of the assembly file at `path`
    ///
    /// # Errors
    /// Returns an error if the file is not a readable .NET module.
    pub fn from_path(path: &Path, owner: &Scope) -> Result<ModuleTypes> {
        let file = File::from_file(path)?;
        let view = MetadataView::from_file(&file)?;
        let definitions = Definitions::read(&view)?;
        let references = read_references(&view)?;

        Ok(ModuleTypes::new(
            &view,
            &definitions,
            &references,
            owner,
            path.parent(),
        ))
    }

    /// Scope and full name of the direct base of `full_name`
    pub fn base_of(&self, full_name: &str) -> Option<&(Scope, String)> {
        self.bases.get(full_name)
    }
}

/// Scope and full name of the type a `TypeDefOrRef` index points at; instantiations
/// report their generic type
fn base_name(
    view: &MetadataView<'_>,
    definitions: &Definitions,
    references: &[Reference],
    specs: &[TypeSpecRaw],
    index: &CodedIndex,
) -> Option<(Scope, String)> {
    let position = (index.row as usize).checked_sub(1)?;

    match index.tag {
        TableId::TypeDef => definitions
            .full_names
            .get(position)
            .map(|name| (Scope::Local, name.clone())),
        TableId::TypeRef => references
            .get(position)
            .map(|reference| (reference.scope.clone(), reference.full_name.clone())),
        TableId::TypeSpec => {
            let blob = view.blobs.get(specs.get(position)?.signature as usize).ok()?;
            let signature = parse_type_spec_signature(blob).ok()?;

            let TypeSignature::GenericInst(base, _) = signature.base else {
                return None;
            };
            let (TypeSignature::Class(token) | TypeSignature::ValueType(token)) = *base else {
                return None;
            };

            let tag = match token.table() {
                0x02 => TableId::TypeDef,
                0x01 => TableId::TypeRef,
                _ => return None,
            };
            base_name(view, definitions, references, specs, &CodedIndex::new(tag, token.row()))
        }
        _ => None,
    }
}

/// Follows base chains, loading referenced assemblies on demand
pub(crate) struct Ancestry<'r> {
    resolver: &'r dyn AssemblyResolver,
    local: ModuleTypes,
    dependencies: HashMap<String, Option<ModuleTypes>>,
}

impl<'r> Ancestry<'r> {
    /// Start from the bases of the module being loaded
    pub fn new(local: ModuleTypes, resolver: &'r dyn AssemblyResolver) -> Self {
        Ancestry {
            resolver,
            local,
            dependencies: HashMap::new(),
        }
    }

    /// Flags implied by the ancestors of the local type `full_name`, the type itself included
    pub fn flags(&mut self, full_name: &str) -> TypeFlags {
        let mut flags = TypeFlags::empty();
        let mut scope = Scope::Local;
        let mut name = full_name.to_string();
        let mut requesting = self.local.directory.clone();

        for _ in 0..MAX_ANCESTRY_DEPTH {
            match name.as_str() {
                "System.MarshalByRefObject" => flags |= TypeFlags::MARSHAL_BY_REF,
                "System.ContextBoundObject" => {
                    flags |= TypeFlags::MARSHAL_BY_REF | TypeFlags::CONTEXTFUL;
                }
                "System.Enum" | "System.Delegate" => flags |= TypeFlags::SERIALIZABLE,
                _ => {}
            }

            let module = match &scope {
                Scope::Local => Some(&self.local),
                Scope::Assembly(assembly) => {
                    let assembly = assembly.clone();
                    self.dependency(&assembly, requesting.as_deref())
                }
            };
            let Some(((next_scope, next_name), directory)) = module.and_then(|module| {
                module
                    .base_of(&name)
                    .map(|base| (base.clone(), module.directory.clone()))
            }) else {
                break;
            };

            scope = next_scope;
            name = next_name;
            requesting = directory;
        }

        flags
    }

    /// Number of dependency assemblies that were loaded successfully
    pub fn loaded_dependencies(&self) -> usize {
        self.dependencies.values().filter(|module| module.is_some()).count()
    }

    fn dependency(&mut self, assembly: &str, requesting: Option<&Path>) -> Option<&ModuleTypes> {
        if !self.dependencies.contains_key(assembly) {
            let loaded = self.load_dependency(assembly, requesting);
            self.dependencies.insert(assembly.to_string(), loaded);
        }

        self.dependencies.get(assembly).and_then(Option::as_ref)
    }

    fn load_dependency(&self, assembly: &str, requesting: Option<&Path>) -> Option<ModuleTypes> {
        let Some(path) = self.resolver.resolve(assembly, requesting) else {
            warn!("Could not locate dependency {assembly}, keeping its types as stand-ins");
            return None;
        };

        match ModuleTypes::from_path(&path, &Scope::Assembly(assembly.to_string())) {
            Ok(module) => {
                debug!(
                    "Loaded dependency {} from {} ({} types with a base)",
                    assembly,
                    path.display(),
                    module.bases.len()
                );
                Some(module)
            }
            Err(error) => {
                warn!(
                    "Could not read dependency {} at {}: {}",
                    assembly,
                    path.display(),
                    error
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::resolver::NoResolver;

    fn module(bases: &[(&str, Scope, &str)]) -> ModuleTypes {
        ModuleTypes {
            bases: bases
                .iter()
                .map(|(name, scope, base)| (name.to_string(), (scope.clone(), base.to_string())))
                .collect(),
            directory: None,
        }
    }

    #[test]
    fn local_chain() {
        let local = module(&[
            ("N.Remote", Scope::Local, "N.Middle"),
            ("N.Middle", Scope::Local, "System.MarshalByRefObject"),
            ("N.Plain", Scope::Local, "System.Object"),
        ]);
        let mut ancestry = Ancestry::new(local, &NoResolver);

        assert_eq!(ancestry.flags("N.Remote"), TypeFlags::MARSHAL_BY_REF);
        assert_eq!(ancestry.flags("N.Plain"), TypeFlags::empty());
        assert_eq!(ancestry.flags("Unknown"), TypeFlags::empty());
    }

    #[test]
    fn names_are_recognised_without_dependencies() {
        let mscorlib = Scope::Assembly("mscorlib".to_string());
        let local = module(&[
            ("N.Context", mscorlib.clone(), "System.ContextBoundObject"),
            ("N.Color", mscorlib.clone(), "System.Enum"),
            ("N.Handler", mscorlib, "System.MulticastDelegate"),
        ]);
        let mut ancestry = Ancestry::new(local, &NoResolver);

        assert_eq!(
            ancestry.flags("N.Context"),
            TypeFlags::MARSHAL_BY_REF | TypeFlags::CONTEXTFUL
        );
        assert_eq!(ancestry.flags("N.Color"), TypeFlags::SERIALIZABLE);
        // MulticastDelegate -> Delegate needs the defining assembly
        assert_eq!(ancestry.flags("N.Handler"), TypeFlags::empty());
        assert_eq!(ancestry.loaded_dependencies(), 0);
    }

    #[test]
    fn cycles_terminate() {
        let local = module(&[
            ("A", Scope::Local, "B"),
            ("B", Scope::Local, "A"),
        ]);
        let mut ancestry = Ancestry::new(local, &NoResolver);
        assert_eq!(ancestry.flags("A"), TypeFlags::empty());
    }

    #[test]
    fn unreadable_dependency_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.dll"), b"not a module").unwrap();

        let resolver = crate::loader::resolver::DirectoryResolver::new();
        let mut local = module(&[("N.Derived", Scope::Assembly("Broken".to_string()), "B.Base")]);
        local.directory = Some(dir.path().to_path_buf());

        let mut ancestry = Ancestry::new(local, &resolver);
        assert_eq!(ancestry.flags("N.Derived"), TypeFlags::empty());
        assert_eq!(ancestry.flags("N.Derived"), TypeFlags::empty());
        assert_eq!(ancestry.dependencies.len(), 1);
        assert_eq!(ancestry.loaded_dependencies(), 0);
    }
}
