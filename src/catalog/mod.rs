//! The read-only type catalog of a loaded module.
//!
//! A [`TypeCatalog`] holds one [`TypeDescriptor`] per type defined in the module, in
//! definition order, followed by stand-in descriptors for the external types those
//! definitions reference. Catalogs are assembled through a [`CatalogBuilder`], which also
//! derives visibility and precomputes the parent-to-children nesting index, so a finished
//! catalog is never mutated.
//!
//! # Examples
//!
//! ```rust
//! use asmdump::catalog::{CatalogBuilder, TypeDescriptor, TypeFlags, TypeKind};
//!
//! let mut builder = CatalogBuilder::new("Sample");
//! let mut outer = TypeDescriptor::new(Some("N"), "Outer", TypeKind::Class);
//! outer.flags = TypeFlags::PUBLIC;
//! let outer = builder.add_type(outer);
//!
//! let mut inner = TypeDescriptor::new(Some("N"), "Inner", TypeKind::Class);
//! inner.flags = TypeFlags::NESTED_PUBLIC;
//! inner.declaring_type = Some(outer);
//! let inner = builder.add_type(inner);
//!
//! let catalog = builder.build()?;
//! assert_eq!(catalog.nested_types(outer), &[inner]);
//! assert_eq!(catalog.full_name(inner), "N.Outer+Inner");
//! # Ok::<(), asmdump::Error>(())
//! ```

mod descriptor;
mod reference;

use std::fmt;

pub use descriptor::{
    MethodDescriptor, ParameterDescriptor, PropertyDescriptor, TypeDescriptor, TypeFlags,
    TypeKind,
};
pub use reference::{TypeReference, WellKnownType};

use crate::{Error, Result};

/// Nesting deeper than this is treated as a cycle
const MAX_NESTING_DEPTH: usize = 64;

/// Index of a descriptor within its [`TypeCatalog`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Wrap a raw catalog index
    #[must_use]
    pub fn new(index: u32) -> TypeId {
        TypeId(index)
    }

    /// The raw catalog index
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The complete, immutable set of types of one module
#[derive(Debug)]
pub struct TypeCatalog {
    name: String,
    types: Vec<TypeDescriptor>,
    definition_count: usize,
    children: Vec<Vec<TypeId>>,
    namespaces: Vec<Option<String>>,
}

impl TypeCatalog {
    /// Display name of the module, used for the listing's header line
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a descriptor; stand-ins are included
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    /// Types defined by the module, in catalog order
    pub fn definitions(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.types
            .iter()
            .take(self.definition_count)
            .enumerate()
            .map(|(index, descriptor)| (TypeId(index as u32), descriptor))
    }

    /// Number of types defined by the module
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definition_count
    }

    /// Number of descriptors, stand-ins included
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog holds no descriptors at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Defined types whose declaring type is `parent`, in catalog order
    #[must_use]
    pub fn nested_types(&self, parent: TypeId) -> &[TypeId] {
        self.children
            .get(parent.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Distinct namespaces of the defined types, sorted, with the global namespace first
    #[must_use]
    pub fn namespaces(&self) -> &[Option<String>] {
        &self.namespaces
    }

    /// Reflection-style full name: `Namespace.Name`, with `+` separating nested types
    #[must_use]
    pub fn full_name(&self, id: TypeId) -> String {
        let Some(descriptor) = self.get(id) else {
            return String::new();
        };

        match descriptor.declaring_type {
            Some(parent) => format!("{}+{}", self.full_name(parent), descriptor.name),
            None => match &descriptor.namespace {
                Some(namespace) => format!("{}.{}", namespace, descriptor.name),
                None => descriptor.name.clone(),
            },
        }
    }
}

/// Assembles a [`TypeCatalog`]
///
/// Definitions must be added before stand-ins; the split is what distinguishes the
/// module's own types from external ones.
pub struct CatalogBuilder {
    name: String,
    types: Vec<TypeDescriptor>,
    definition_count: Option<usize>,
}

impl CatalogBuilder {
    /// Start a catalog for the module displayed as `name`
    #[must_use]
    pub fn new(name: &str) -> CatalogBuilder {
        CatalogBuilder {
            name: name.to_string(),
            types: Vec::new(),
            definition_count: None,
        }
    }

    /// Add a type defined by the module; call before adding any stand-in
    pub fn add_type(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(descriptor);
        id
    }

    /// Add a stand-in for an external type
    pub fn add_standin(&mut self, descriptor: TypeDescriptor) -> TypeId {
        if self.definition_count.is_none() {
            self.definition_count = Some(self.types.len());
        }

        self.add_type(descriptor)
    }

    /// Id the next added descriptor will receive
    #[must_use]
    pub fn next_id(&self) -> TypeId {
        TypeId(self.types.len() as u32)
    }

    /// Mutable access to an added descriptor
    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeDescriptor> {
        self.types.get_mut(id.index())
    }

    /// Access to an added descriptor
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    /// Add a property to `owner`
    ///
    /// # Errors
    /// Returns [`Error::Error`] if `owner` does not exist.
    pub fn add_property(&mut self, owner: TypeId, property: PropertyDescriptor) -> Result<()> {
        self.owner(owner)?.properties.push(property);
        Ok(())
    }

    /// Add a method to `owner`
    ///
    /// # Errors
    /// Returns [`Error::Error`] if `owner` does not exist.
    pub fn add_method(&mut self, owner: TypeId, method: MethodDescriptor) -> Result<()> {
        self.owner(owner)?.methods.push(method);
        Ok(())
    }

    fn owner(&mut self, owner: TypeId) -> Result<&mut TypeDescriptor> {
        self.types
            .get_mut(owner.index())
            .ok_or_else(|| Error::Error(format!("Unknown owner type {owner}")))
    }

    /// Validate the relations, derive visibility and index nested types
    ///
    /// # Errors
    /// Returns an error if a descriptor references a type that was never added, or if the
    /// nesting chain of a type is cyclic.
    pub fn build(self) -> Result<TypeCatalog> {
        let definition_count = self.definition_count.unwrap_or(self.types.len());
        let mut types = self.types;

        for descriptor in &types {
            if let Some(parent) = descriptor.declaring_type {
                if parent.index() >= types.len() {
                    return Err(Error::Error(format!(
                        "Type {} is nested in unknown type {}",
                        descriptor.name, parent
                    )));
                }
            }
        }

        for index in 0..types.len() {
            let mut depth = 0;
            let mut current = Some(TypeId(index as u32));
            while let Some(id) = current {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(Error::RecursionLimit(MAX_NESTING_DEPTH));
                }
                current = types[id.index()].declaring_type;
            }
        }

        let visible: Vec<bool> = (0..types.len())
            .map(|index| is_visible(&types, TypeId(index as u32)))
            .collect();
        for (descriptor, visible) in types.iter_mut().zip(visible) {
            descriptor.flags.set(TypeFlags::VISIBLE, visible);
        }

        let mut children = vec![Vec::new(); types.len()];
        for (index, descriptor) in types.iter().enumerate().take(definition_count) {
            if let Some(parent) = descriptor.declaring_type {
                children[parent.index()].push(TypeId(index as u32));
            }
        }

        let mut namespaces: Vec<Option<String>> = types
            .iter()
            .take(definition_count)
            .map(|descriptor| descriptor.namespace.clone())
            .collect();
        namespaces.sort();
        namespaces.dedup();

        Ok(TypeCatalog {
            name: self.name,
            types,
            definition_count,
            children,
            namespaces,
        })
    }
}

fn is_visible(types: &[TypeDescriptor], id: TypeId) -> bool {
    let descriptor = &types[id.index()];
    match descriptor.declaring_type {
        None => descriptor.flags.contains(TypeFlags::PUBLIC),
        Some(parent) => {
            descriptor.flags.contains(TypeFlags::NESTED_PUBLIC) && is_visible(types, parent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public(namespace: Option<&str>, name: &str) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new(namespace, name, TypeKind::Class);
        descriptor.flags = TypeFlags::PUBLIC;
        descriptor
    }

    #[test]
    fn namespaces_sorted_with_global_first() {
        let mut builder = CatalogBuilder::new("M");
        builder.add_type(public(Some("Zeta"), "A"));
        builder.add_type(public(None, "B"));
        builder.add_type(public(Some("Alpha"), "C"));
        builder.add_type(public(Some("Zeta"), "D"));
        builder.add_standin(public(Some("External"), "E"));

        let catalog = builder.build().unwrap();

        assert_eq!(
            catalog.namespaces(),
            &[None, Some("Alpha".to_string()), Some("Zeta".to_string())]
        );
        assert_eq!(catalog.definition_count(), 4);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.definitions().count(), 4);
    }

    #[test]
    fn visibility_follows_enclosing_types() {
        let mut builder = CatalogBuilder::new("M");

        let hidden = builder.add_type(TypeDescriptor::new(Some("N"), "Hidden", TypeKind::Class));
        let mut inside_hidden = TypeDescriptor::new(Some("N"), "InsideHidden", TypeKind::Class);
        inside_hidden.flags = TypeFlags::NESTED_PUBLIC;
        inside_hidden.declaring_type = Some(hidden);
        let inside_hidden = builder.add_type(inside_hidden);

        let shown = builder.add_type(public(Some("N"), "Shown"));
        let mut inside_shown = TypeDescriptor::new(Some("N"), "InsideShown", TypeKind::Class);
        inside_shown.flags = TypeFlags::NESTED_PUBLIC;
        inside_shown.declaring_type = Some(shown);
        let inside_shown = builder.add_type(inside_shown);

        let mut private = TypeDescriptor::new(Some("N"), "Private", TypeKind::Class);
        private.declaring_type = Some(shown);
        let private = builder.add_type(private);

        let catalog = builder.build().unwrap();
        let visible = |id| catalog.get(id).unwrap().is_visible();

        assert!(!visible(hidden));
        assert!(!visible(inside_hidden));
        assert!(visible(shown));
        assert!(visible(inside_shown));
        assert!(!visible(private));
        assert_eq!(catalog.nested_types(shown), &[inside_shown, private]);
        assert!(catalog.nested_types(inside_shown).is_empty());
    }

    #[test]
    fn full_names() {
        let mut builder = CatalogBuilder::new("M");
        let outer = builder.add_type(public(Some("N.Sub"), "Outer`1"));
        let mut inner = public(Some("N.Sub"), "Inner");
        inner.declaring_type = Some(outer);
        let inner = builder.add_type(inner);
        let global = builder.add_type(public(None, "Global"));

        let catalog = builder.build().unwrap();

        assert_eq!(catalog.full_name(outer), "N.Sub.Outer`1");
        assert_eq!(catalog.full_name(inner), "N.Sub.Outer`1+Inner");
        assert_eq!(catalog.full_name(global), "Global");
        assert_eq!(catalog.full_name(TypeId::new(99)), "");
    }

    #[test]
    fn rejects_broken_nesting() {
        let mut builder = CatalogBuilder::new("M");
        let mut orphan = public(None, "Orphan");
        orphan.declaring_type = Some(TypeId::new(7));
        builder.add_type(orphan);
        assert!(builder.build().is_err());

        let mut builder = CatalogBuilder::new("M");
        let mut cyclic = public(None, "Cyclic");
        cyclic.declaring_type = Some(TypeId::new(0));
        builder.add_type(cyclic);
        assert!(matches!(builder.build(), Err(Error::RecursionLimit(_))));
    }

    #[test]
    fn members_need_an_owner() {
        let mut builder = CatalogBuilder::new("M");
        let owner = builder.add_type(public(None, "Owner"));

        let method = MethodDescriptor::new("Run", owner, WellKnownType::Void.into());
        assert!(builder.add_method(owner, method.clone()).is_ok());
        assert!(builder.add_method(TypeId::new(5), method).is_err());

        let catalog = builder.build().unwrap();
        assert_eq!(catalog.get(owner).unwrap().methods.len(), 1);
    }
}
