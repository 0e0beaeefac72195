//! Reflection-style names of the types defined and referenced by one module.

use std::collections::HashMap;

use log::warn;

use crate::{
    metadata::{
        tables::{
            AssemblyRefRaw, NestedClassRaw, RowReadable, TableId, TypeDefRaw, TypeRefRaw,
        },
        view::MetadataView,
    },
    Error, Result,
};

/// Nesting chains longer than this are treated as cycles
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Where a referenced type is defined
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Scope {
    /// The module being read
    Local,
    /// The assembly with this simple name
    Assembly(String),
}

/// Decode every row of the table holding `T`; unreadable trailing rows are dropped
pub(crate) fn read_rows<T: RowReadable>(view: &MetadataView<'_>) -> Vec<T> {
    let Some(table) = view.tables.table::<T>() else {
        return Vec::new();
    };

    let rows: Vec<T> = table.iter().collect();
    if rows.len() != table.row_count() as usize {
        warn!(
            "Only {} of {} rows of table {:?} could be read",
            rows.len(),
            table.row_count(),
            T::TABLE_ID
        );
    }
    rows
}

fn namespace_of(view: &MetadataView<'_>, index: u32) -> Result<Option<String>> {
    let namespace = view.strings.get(index as usize)?;
    Ok((!namespace.is_empty()).then(|| namespace.to_string()))
}

/// Walk `enclosing` from `index` to the outermost type, innermost first
fn nesting_chain(enclosing: &[Option<usize>], index: usize) -> Result<Vec<usize>> {
    let mut chain = vec![index];
    let mut current = enclosing[index];
    while let Some(parent) = current {
        if chain.len() >= MAX_NESTING_DEPTH {
            return Err(Error::RecursionLimit(MAX_NESTING_DEPTH));
        }
        chain.push(parent);
        current = enclosing[parent];
    }
    Ok(chain)
}

/// `Namespace.Outer+Inner` for a chain produced by [`nesting_chain`]
fn chain_name(names: &[String], namespace: Option<&str>, chain: &[usize]) -> String {
    let mut full_name = match namespace {
        Some(namespace) => format!("{namespace}."),
        None => String::new(),
    };

    for (position, index) in chain.iter().rev().enumerate() {
        if position > 0 {
            full_name.push('+');
        }
        full_name.push_str(&names[*index]);
    }
    full_name
}

/// Names and nesting of the `TypeDef` rows of a module
pub(crate) struct Definitions {
    /// The raw rows, in table order
    pub rows: Vec<TypeDefRaw>,
    /// Simple names
    pub names: Vec<String>,
    /// Namespaces; nested types carry their outermost enclosing type's namespace
    pub namespaces: Vec<Option<String>>,
    /// Index of the enclosing row of nested types
    pub enclosing: Vec<Option<usize>>,
    /// Reflection full names
    pub full_names: Vec<String>,
    /// Row index by full name
    pub by_full_name: HashMap<String, usize>,
}

impl Definitions {
    /// Read the `TypeDef` and `NestedClass` tables of `view`
    ///
    /// # Errors
    /// Returns an error if a name cannot be read or the nesting is cyclic.
    pub fn read(view: &MetadataView<'_>) -> Result<Definitions> {
        let rows: Vec<TypeDefRaw> = read_rows(view);

        let mut names = Vec::with_capacity(rows.len());
        let mut namespaces = Vec::with_capacity(rows.len());
        for row in &rows {
            names.push(view.strings.get(row.type_name as usize)?.to_string());
            namespaces.push(namespace_of(view, row.type_namespace)?);
        }

        let mut enclosing = vec![None; rows.len()];
        for nested in read_rows::<NestedClassRaw>(view) {
            let (inner, outer) = (nested.nested_class as usize, nested.enclosing_class as usize);
            if inner == 0
                || outer == 0
                || inner > rows.len()
                || outer > rows.len()
                || inner == outer
            {
                warn!(
                    "Ignoring NestedClass row {} ({} in {})",
                    nested.rid, nested.nested_class, nested.enclosing_class
                );
                continue;
            }
            enclosing[inner - 1] = Some(outer - 1);
        }

        let mut full_names = Vec::with_capacity(rows.len());
        for index in 0..rows.len() {
            let chain = nesting_chain(&enclosing, index)?;
            let outermost = chain[chain.len() - 1];
            let namespace = namespaces[outermost].clone();

            full_names.push(chain_name(&names, namespace.as_deref(), &chain));
            namespaces[index] = namespace;
        }

        let by_full_name = full_names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        Ok(Definitions {
            rows,
            names,
            namespaces,
            enclosing,
            full_names,
            by_full_name,
        })
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Name and origin of one `TypeRef` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reference {
    /// Defining scope of the outermost type
    pub scope: Scope,
    /// Namespace of the outermost type
    pub namespace: Option<String>,
    /// Simple name
    pub name: String,
    /// Index of the enclosing reference of a nested type
    pub enclosing: Option<usize>,
    /// Reflection full name
    pub full_name: String,
}

/// Read the `TypeRef` table of `view`, with scopes resolved to assembly names
///
/// # Errors
/// Returns an error if a name cannot be read or the nesting is cyclic.
pub(crate) fn read_references(view: &MetadataView<'_>) -> Result<Vec<Reference>> {
    let assemblies = read_rows::<AssemblyRefRaw>(view)
        .iter()
        .map(|row| Ok(view.strings.get(row.name as usize)?.to_string()))
        .collect::<Result<Vec<String>>>()?;

    let rows: Vec<TypeRefRaw> = read_rows(view);

    let mut names = Vec::with_capacity(rows.len());
    let mut namespaces = Vec::with_capacity(rows.len());
    let mut enclosing = vec![None; rows.len()];
    for (index, row) in rows.iter().enumerate() {
        names.push(view.strings.get(row.type_name as usize)?.to_string());
        namespaces.push(namespace_of(view, row.type_namespace)?);

        let scope = &row.resolution_scope;
        if scope.tag == TableId::TypeRef && scope.row != 0 {
            let parent = scope.row as usize - 1;
            if parent < rows.len() && parent != index {
                enclosing[index] = Some(parent);
            }
        }
    }

    let mut references = Vec::with_capacity(rows.len());
    for index in 0..rows.len() {
        let chain = nesting_chain(&enclosing, index)?;
        let outermost = chain[chain.len() - 1];
        let namespace = namespaces[outermost].clone();

        let resolution_scope = &rows[outermost].resolution_scope;
        let scope = match resolution_scope.tag {
            TableId::AssemblyRef => {
                let slot = (resolution_scope.row as usize).wrapping_sub(1);
                match assemblies.get(slot) {
                    Some(assembly) => Scope::Assembly(assembly.clone()),
                    None => {
                        warn!(
                            "TypeRef {} points at missing AssemblyRef {}",
                            rows[outermost].rid, resolution_scope.row
                        );
                        Scope::Local
                    }
                }
            }
            _ => Scope::Local,
        };

        references.push(Reference {
            scope,
            full_name: chain_name(&names, namespace.as_deref(), &chain),
            namespace,
            name: names[index].clone(),
            enclosing: enclosing[index],
        });
    }

    Ok(references)
}
