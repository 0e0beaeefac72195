//! Catalog construction from the metadata tables of one module.

use std::{collections::HashMap, path::Path};

use log::{debug, warn};
use strum::IntoEnumIterator;

use crate::{
    catalog::{
        CatalogBuilder, MethodDescriptor, ParameterDescriptor, PropertyDescriptor, TypeCatalog,
        TypeDescriptor, TypeFlags, TypeId, TypeKind, TypeReference, WellKnownType,
    },
    loader::{
        ancestry::{Ancestry, ModuleTypes},
        identity,
        names::{read_references, read_rows, Definitions, Reference, Scope},
        resolver::AssemblyResolver,
    },
    metadata::{
        signatures::{
            parse_method_signature, parse_property_signature, parse_type_spec_signature,
            SignatureParameter, TypeSignature,
        },
        tables::{
            list_range, CodedIndex, GenericParamRaw, InterfaceImplRaw, MethodAttributes,
            MethodDefRaw, MethodPtrRaw, MethodSemanticsAttributes, MethodSemanticsRaw, ParamPtrRaw,
            ParamRaw, PropertyMapRaw, PropertyPtrRaw, PropertyRaw, TableId, TypeAttributes,
            TypeSpecRaw,
        },
        token::Token,
        view::MetadataView,
    },
    Error, Result,
};

/// `TypeSpec` blobs nested deeper than this are rejected
const MAX_SPEC_DEPTH: usize = 16;

/// Names bound to generic parameter positions while decoding a signature
#[derive(Default)]
struct GenericContext {
    type_parameters: Vec<String>,
    method_parameters: Vec<String>,
}

/// Maps a logical row of a list column onto the target table, through its pointer table if
/// the module has one
struct Indirection {
    targets: Vec<u32>,
    rows: u32,
}

impl Indirection {
    fn new(targets: Vec<u32>, target_rows: usize) -> Self {
        let rows = if targets.is_empty() {
            target_rows as u32
        } else {
            targets.len() as u32
        };
        Indirection { targets, rows }
    }

    fn resolve(&self, logical: u32) -> u32 {
        if self.targets.is_empty() {
            logical
        } else {
            self.targets
                .get(logical as usize - 1)
                .copied()
                .unwrap_or(0)
        }
    }
}

/// Accessor methods of one property
#[derive(Default)]
struct PropertyAccessors {
    getters: Vec<u32>,
    setters: Vec<u32>,
}

/// Turns the metadata of one module into a [`TypeCatalog`]
pub(crate) struct CatalogLoader<'v, 'a> {
    view: &'v MetadataView<'a>,
    name: String,
    definitions: Definitions,
    references: Vec<Reference>,
    builder: CatalogBuilder,
    definition_ids: Vec<Option<TypeId>>,
    full_names: Vec<String>,
    standins: HashMap<(Scope, String), TypeId>,
    type_specs: Vec<TypeSpecRaw>,
    methods: Vec<MethodDefRaw>,
    method_indirection: Indirection,
    params: Vec<ParamRaw>,
    param_indirection: Indirection,
    properties: Vec<PropertyRaw>,
    property_indirection: Indirection,
    type_parameters: HashMap<u32, Vec<String>>,
    method_parameters: HashMap<u32, Vec<String>>,
}

impl<'v, 'a> CatalogLoader<'v, 'a> {
    /// Prepare the tables of `view`
    ///
    /// # Errors
    /// Returns an error if the type names cannot be read or type nesting is cyclic.
    pub fn new(view: &'v MetadataView<'a>) -> Result<Self> {
        let name = identity::display_name(view)?;
        let definitions = Definitions::read(view)?;
        let references = read_references(view)?;

        let methods: Vec<MethodDefRaw> = read_rows(view);
        let params: Vec<ParamRaw> = read_rows(view);
        let properties: Vec<PropertyRaw> = read_rows(view);

        let method_indirection = Indirection::new(
            read_rows::<MethodPtrRaw>(view).iter().map(|row| row.target).collect(),
            methods.len(),
        );
        let param_indirection = Indirection::new(
            read_rows::<ParamPtrRaw>(view).iter().map(|row| row.target).collect(),
            params.len(),
        );
        let property_indirection = Indirection::new(
            read_rows::<PropertyPtrRaw>(view).iter().map(|row| row.target).collect(),
            properties.len(),
        );

        let mut type_parameters: HashMap<u32, Vec<(u32, String)>> = HashMap::new();
        let mut method_parameters: HashMap<u32, Vec<(u32, String)>> = HashMap::new();
        for row in read_rows::<GenericParamRaw>(view) {
            let parameter = (row.number, view.strings.get(row.name as usize)?.to_string());
            match row.owner.tag {
                TableId::TypeDef => {
                    type_parameters.entry(row.owner.row).or_default().push(parameter);
                }
                TableId::MethodDef => {
                    method_parameters.entry(row.owner.row).or_default().push(parameter);
                }
                _ => {}
            }
        }

        Ok(CatalogLoader {
            view,
            builder: CatalogBuilder::new(&name),
            name,
            definitions,
            references,
            definition_ids: Vec::new(),
            full_names: Vec::new(),
            standins: HashMap::new(),
            type_specs: read_rows(view),
            methods,
            method_indirection,
            params,
            param_indirection,
            properties,
            property_indirection,
            type_parameters: ordered_names(type_parameters),
            method_parameters: ordered_names(method_parameters),
        })
    }

    /// Build the catalog, following base chains into dependencies through `resolver`
    ///
    /// # Errors
    /// Returns an error if the catalog relations are inconsistent. Unreadable members and
    /// unresolvable dependencies are skipped with a warning.
    pub fn load(
        mut self,
        directory: Option<&Path>,
        resolver: &dyn AssemblyResolver,
    ) -> Result<TypeCatalog> {
        self.add_definitions();

        let interfaces = self.interface_rows();
        let (accessor_methods, property_accessors) = self.semantics();
        let property_lists = self.property_lists();

        for index in 0..self.definitions.len() {
            let Some(id) = self.definition_ids[index] else {
                continue;
            };
            let row = self.definitions.rows[index].clone();
            let context = GenericContext {
                type_parameters: self.type_parameters.get(&row.rid).cloned().unwrap_or_default(),
                method_parameters: Vec::new(),
            };

            if !row.extends.is_null() {
                match self.coded_reference(&row.extends, &context) {
                    Ok(base) => self.set_base(id, base),
                    Err(error) => warn!(
                        "Could not resolve the base type of {}: {}",
                        self.definitions.full_names[index], error
                    ),
                }
            }

            for interface in interfaces.get(&row.rid).into_iter().flatten() {
                match self.coded_reference(interface, &context) {
                    Ok(reference) => self.push_interface(id, reference),
                    Err(error) => warn!(
                        "Could not resolve an interface of {}: {}",
                        self.definitions.full_names[index], error
                    ),
                }
            }

            let next_methods = self.definitions.rows.get(index + 1).map(|next| next.method_list);
            for logical in list_range(row.method_list, next_methods, self.method_indirection.rows) {
                let rid = self.method_indirection.resolve(logical);
                match self.method(id, rid, &context, &accessor_methods) {
                    Ok(Some(method)) => self.builder.add_method(id, method)?,
                    Ok(None) => {}
                    Err(error) => warn!(
                        "Skipping method {} of {}: {}",
                        rid, self.definitions.full_names[index], error
                    ),
                }
            }

            if let Some(range) = property_lists.get(&row.rid) {
                for logical in range.clone() {
                    let rid = self.property_indirection.resolve(logical);
                    match self.property(id, rid, &context, &property_accessors) {
                        Ok(Some(property)) => self.builder.add_property(id, property)?,
                        Ok(None) => {}
                        Err(error) => warn!(
                            "Skipping property {} of {}: {}",
                            rid, self.definitions.full_names[index], error
                        ),
                    }
                }
            }
        }

        let local = ModuleTypes::new(
            self.view,
            &self.definitions,
            &self.references,
            &Scope::Local,
            directory,
        );
        let mut ancestry = Ancestry::new(local, resolver);
        self.classify(&mut ancestry);

        debug!(
            "Loaded {} definitions and {} external types from {} ({} dependencies read)",
            self.definition_ids.iter().flatten().count(),
            self.standins.len(),
            self.name,
            ancestry.loaded_dependencies()
        );

        self.builder.build()
    }

    /// Register one descriptor per `TypeDef` row, `<Module>` excluded
    fn add_definitions(&mut self) {
        for index in 0..self.definitions.len() {
            let row = &self.definitions.rows[index];
            if index == 0 && self.definitions.names[0] == "<Module>" {
                self.definition_ids.push(None);
                continue;
            }

            let mut descriptor = TypeDescriptor::new(
                self.definitions.namespaces[index].as_deref(),
                &self.definitions.names[index],
                TypeKind::Class,
            );
            descriptor.token = row.token;
            descriptor.flags = definition_flags(row.flags);
            descriptor.generic_parameters =
                self.type_parameters.get(&row.rid).cloned().unwrap_or_default();
            if !descriptor.generic_parameters.is_empty() {
                descriptor.flags |= TypeFlags::GENERIC_TYPE | TypeFlags::GENERIC_TYPE_DEFINITION;
            }

            let id = self.builder.add_type(descriptor);
            self.definition_ids.push(Some(id));
            self.full_names.push(self.definitions.full_names[index].clone());
        }

        for index in 0..self.definitions.len() {
            let (Some(id), Some(parent)) =
                (self.definition_ids[index], self.definitions.enclosing[index])
            else {
                continue;
            };

            match self.definition_ids[parent] {
                Some(parent) => {
                    if let Some(descriptor) = self.builder.get_mut(id) {
                        descriptor.declaring_type = Some(parent);
                    }
                }
                None => warn!(
                    "{} is nested in the module type, treating it as top-level",
                    self.definitions.full_names[index]
                ),
            }
        }
    }

    fn set_base(&mut self, id: TypeId, base: TypeReference) {
        if let Some(descriptor) = self.builder.get_mut(id) {
            descriptor.base_type = Some(base);
        }
    }

    fn push_interface(&mut self, id: TypeId, interface: TypeReference) {
        if let Some(descriptor) = self.builder.get_mut(id) {
            descriptor.interfaces.push(interface);
        }
    }

    /// Interfaces per implementing `TypeDef` row, in table order
    fn interface_rows(&self) -> HashMap<u32, Vec<CodedIndex>> {
        let mut interfaces: HashMap<u32, Vec<CodedIndex>> = HashMap::new();
        for row in read_rows::<InterfaceImplRaw>(self.view) {
            interfaces.entry(row.class).or_default().push(row.interface);
        }
        interfaces
    }

    /// Getter and setter methods, overall and per property
    fn semantics(&self) -> (Vec<bool>, HashMap<u32, PropertyAccessors>) {
        let mut accessor_methods = vec![false; self.methods.len() + 1];
        let mut property_accessors: HashMap<u32, PropertyAccessors> = HashMap::new();

        for row in read_rows::<MethodSemanticsRaw>(self.view) {
            let is_getter = row.semantics & MethodSemanticsAttributes::GETTER != 0;
            let is_setter = row.semantics & MethodSemanticsAttributes::SETTER != 0;
            if !is_getter && !is_setter {
                continue;
            }

            if let Some(flag) = accessor_methods.get_mut(row.method as usize) {
                *flag = true;
            }

            if row.association.tag == TableId::Property {
                let accessors = property_accessors.entry(row.association.row).or_default();
                if is_getter {
                    accessors.getters.push(row.method);
                }
                if is_setter {
                    accessors.setters.push(row.method);
                }
            }
        }

        (accessor_methods, property_accessors)
    }

    /// Logical property rows per owning `TypeDef` row
    fn property_lists(&self) -> HashMap<u32, std::ops::Range<u32>> {
        let maps: Vec<PropertyMapRaw> = read_rows(self.view);

        maps.iter()
            .enumerate()
            .map(|(index, map)| {
                let next = maps.get(index + 1).map(|next| next.property_list);
                (
                    map.parent,
                    list_range(map.property_list, next, self.property_indirection.rows),
                )
            })
            .collect()
    }

    fn method(
        &mut self,
        owner: TypeId,
        rid: u32,
        context: &GenericContext,
        accessor_methods: &[bool],
    ) -> Result<Option<MethodDescriptor>> {
        let Some(row) = self.methods.get((rid as usize).wrapping_sub(1)).cloned() else {
            return Err(Error::TypeNotFound(Token::new(TableId::MethodDef.token_base() | rid)));
        };

        let name = self.view.strings.get(row.name as usize)?.to_string();
        let signature = parse_method_signature(self.view.blobs.get(row.signature as usize)?)?;

        let context = GenericContext {
            type_parameters: context.type_parameters.clone(),
            method_parameters: self.method_parameters.get(&row.rid).cloned().unwrap_or_default(),
        };

        let names = self.parameter_names(&row);
        let return_type = self.parameter_reference(&signature.return_type, &context)?;
        let mut parameters = Vec::with_capacity(signature.params.len());
        for (position, parameter) in signature.params.iter().enumerate() {
            parameters.push(ParameterDescriptor {
                name: names
                    .get(&(position as u32 + 1))
                    .cloned()
                    .unwrap_or_else(|| format!("arg{position}")),
                parameter_type: self.parameter_reference(parameter, &context)?,
            });
        }

        Ok(Some(MethodDescriptor {
            is_public: row.is_public(),
            is_accessor: accessor_methods.get(rid as usize).copied().unwrap_or(false),
            is_constructor: row.flags & MethodAttributes::RT_SPECIAL_NAME != 0
                && (name == ".ctor" || name == ".cctor"),
            name,
            return_type,
            parameters,
            declaring_type: owner,
        }))
    }

    /// Names of the parameters of `method` by sequence number; the return value is skipped
    ///
    /// Parameter runs follow the physical `MethodDef` order, even when a `MethodPtr` table
    /// reorders the methods of a type.
    fn parameter_names(&self, method: &MethodDefRaw) -> HashMap<u32, String> {
        let next = self.methods.get(method.rid as usize).map(|next| next.param_list);

        let mut names = HashMap::new();
        for logical in list_range(method.param_list, next, self.param_indirection.rows) {
            let rid = self.param_indirection.resolve(logical);
            let Some(param) = self.params.get((rid as usize).wrapping_sub(1)) else {
                continue;
            };
            if param.sequence == 0 {
                continue;
            }

            match self.view.strings.get(param.name as usize) {
                Ok(name) if !name.is_empty() => {
                    names.insert(param.sequence, name.to_string());
                }
                Ok(_) => {}
                Err(error) => warn!("Unreadable name of parameter {}: {}", param.rid, error),
            }
        }
        names
    }

    fn property(
        &mut self,
        owner: TypeId,
        rid: u32,
        context: &GenericContext,
        property_accessors: &HashMap<u32, PropertyAccessors>,
    ) -> Result<Option<PropertyDescriptor>> {
        let Some(row) = self.properties.get((rid as usize).wrapping_sub(1)).cloned() else {
            return Err(Error::TypeNotFound(Token::new(TableId::Property.token_base() | rid)));
        };

        let Some(accessors) = property_accessors.get(&rid) else {
            return Ok(None);
        };

        let is_public = |method: &u32| {
            self.methods
                .get((*method as usize).wrapping_sub(1))
                .is_some_and(MethodDefRaw::is_public)
        };
        if !accessors.getters.iter().chain(&accessors.setters).any(is_public) {
            return Ok(None);
        }

        let can_read = !accessors.getters.is_empty();
        let can_write = !accessors.setters.is_empty();

        let name = self.view.strings.get(row.name as usize)?.to_string();
        let signature = parse_property_signature(self.view.blobs.get(row.signature as usize)?)?;

        Ok(Some(PropertyDescriptor {
            name,
            property_type: self.type_reference(&signature.base, context, 0)?,
            can_read,
            can_write,
            declaring_type: owner,
        }))
    }

    fn parameter_reference(
        &mut self,
        parameter: &SignatureParameter,
        context: &GenericContext,
    ) -> Result<TypeReference> {
        let reference = self.type_reference(&parameter.base, context, 0)?;
        Ok(if parameter.by_ref {
            TypeReference::ByRef(Box::new(reference))
        } else {
            reference
        })
    }

    fn coded_reference(
        &mut self,
        index: &CodedIndex,
        context: &GenericContext,
    ) -> Result<TypeReference> {
        self.token_reference(index.token, context, 0)
    }

    fn type_reference(
        &mut self,
        signature: &TypeSignature,
        context: &GenericContext,
        depth: usize,
    ) -> Result<TypeReference> {
        Ok(match signature {
            TypeSignature::Void => WellKnownType::Void.into(),
            TypeSignature::Boolean => WellKnownType::Boolean.into(),
            TypeSignature::Char => WellKnownType::Char.into(),
            TypeSignature::I1 => WellKnownType::SByte.into(),
            TypeSignature::U1 => WellKnownType::Byte.into(),
            TypeSignature::I2 => WellKnownType::Int16.into(),
            TypeSignature::U2 => WellKnownType::UInt16.into(),
            TypeSignature::I4 => WellKnownType::Int32.into(),
            TypeSignature::U4 => WellKnownType::UInt32.into(),
            TypeSignature::I8 => WellKnownType::Int64.into(),
            TypeSignature::U8 => WellKnownType::UInt64.into(),
            TypeSignature::R4 => WellKnownType::Single.into(),
            TypeSignature::R8 => WellKnownType::Double.into(),
            TypeSignature::I | TypeSignature::FnPtr(_) => WellKnownType::IntPtr.into(),
            TypeSignature::U => WellKnownType::UIntPtr.into(),
            TypeSignature::String => WellKnownType::String.into(),
            TypeSignature::Object | TypeSignature::Unknown => WellKnownType::Object.into(),
            TypeSignature::TypedByRef => self.named_type(Some("System"), "TypedReference"),
            TypeSignature::Ptr(pointer) => TypeReference::Pointer(Box::new(
                self.type_reference(&pointer.base, context, depth)?,
            )),
            TypeSignature::ByRef(inner) => {
                TypeReference::ByRef(Box::new(self.type_reference(inner, context, depth)?))
            }
            TypeSignature::Pinned(inner) => self.type_reference(inner, context, depth)?,
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                self.token_reference(*token, context, depth)?
            }
            TypeSignature::GenericParamType(position) => TypeReference::GenericParameter(
                context
                    .type_parameters
                    .get(*position as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!{position}")),
            ),
            TypeSignature::GenericParamMethod(position) => TypeReference::GenericParameter(
                context
                    .method_parameters
                    .get(*position as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!!{position}")),
            ),
            TypeSignature::Array(array) => TypeReference::Array {
                element: Box::new(self.type_reference(&array.base, context, depth)?),
                rank: array.rank,
            },
            TypeSignature::SzArray(array) => {
                TypeReference::array_of(self.type_reference(&array.base, context, depth)?)
            }
            TypeSignature::GenericInst(base, arguments) => {
                match self.type_reference(base, context, depth)? {
                    TypeReference::Type { target, .. } => {
                        let mut args = Vec::with_capacity(arguments.len());
                        for argument in arguments {
                            args.push(self.type_reference(argument, context, depth)?);
                        }
                        TypeReference::Type { target, args }
                    }
                    other => other,
                }
            }
        })
    }

    fn token_reference(
        &mut self,
        token: Token,
        context: &GenericContext,
        depth: usize,
    ) -> Result<TypeReference> {
        let index = (token.row() as usize).wrapping_sub(1);

        match token.table() {
            0x02 => match self.definition_ids.get(index).copied().flatten() {
                Some(id) => Ok(self.definition_reference(id)),
                None => Err(Error::TypeNotFound(token)),
            },
            0x01 if index < self.references.len() => Ok(self.reference_type(index)),
            0x1B => {
                if depth >= MAX_SPEC_DEPTH {
                    return Err(Error::RecursionLimit(MAX_SPEC_DEPTH));
                }

                let Some(spec) = self.type_specs.get(index) else {
                    return Err(Error::TypeNotFound(token));
                };
                let signature =
                    parse_type_spec_signature(self.view.blobs.get(spec.signature as usize)?)?;
                self.type_reference(&signature.base, context, depth + 1)
            }
            _ => Err(Error::TypeNotFound(token)),
        }
    }

    /// Reference to a catalog entry, or its well-known identity
    fn definition_reference(&self, id: TypeId) -> TypeReference {
        match well_known(&self.full_names[id.index()]) {
            Some(known) => known.into(),
            None => TypeReference::to(id),
        }
    }

    /// The stand-in for `TypeRef` row `index`, created on first use
    fn reference_type(&mut self, index: usize) -> TypeReference {
        let reference = self.references[index].clone();

        if reference.scope == Scope::Local {
            let local = self
                .definitions
                .by_full_name
                .get(&reference.full_name)
                .and_then(|definition| self.definition_ids[*definition]);
            if let Some(id) = local {
                return self.definition_reference(id);
            }
        }

        if let Some(known) = well_known(&reference.full_name) {
            return known.into();
        }

        let key = (reference.scope.clone(), reference.full_name.clone());
        if let Some(id) = self.standins.get(&key) {
            return TypeReference::to(*id);
        }

        let declaring_type = match reference.enclosing.map(|parent| self.reference_type(parent)) {
            Some(TypeReference::Type { target, .. }) => Some(target),
            _ => None,
        };

        let mut descriptor =
            TypeDescriptor::new(reference.namespace.as_deref(), &reference.name, TypeKind::Class);
        descriptor.token = Token::new(TableId::TypeRef.token_base() | (index as u32 + 1));
        descriptor.declaring_type = declaring_type;
        descriptor.generic_parameters = arity_placeholders(&reference.name);
        if let Scope::Assembly(assembly) = &reference.scope {
            descriptor.assembly = Some(assembly.clone());
        }

        self.add_standin(key, descriptor)
    }

    /// A type known only by name, such as the target of `ELEMENT_TYPE_TYPEDBYREF`
    fn named_type(&mut self, namespace: Option<&str>, name: &str) -> TypeReference {
        let full_name = match namespace {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name.to_string(),
        };

        if let Some(id) = self
            .definitions
            .by_full_name
            .get(&full_name)
            .and_then(|definition| self.definition_ids[*definition])
        {
            return self.definition_reference(id);
        }

        let key = (Scope::Local, full_name);
        if let Some(id) = self.standins.get(&key) {
            return TypeReference::to(*id);
        }

        self.add_standin(key, TypeDescriptor::new(namespace, name, TypeKind::Other))
    }

    fn add_standin(&mut self, key: (Scope, String), descriptor: TypeDescriptor) -> TypeReference {
        let id = self.builder.add_standin(descriptor);
        self.full_names.push(key.1.clone());
        self.standins.insert(key, id);
        TypeReference::to(id)
    }

    /// Full name of the type behind a reference, for ancestry checks
    fn reference_name(&self, reference: &TypeReference) -> Option<String> {
        match reference {
            TypeReference::WellKnown(known) => Some(known.full_name()),
            TypeReference::Type { target, .. } => self.full_names.get(target.index()).cloned(),
            _ => None,
        }
    }

    /// Derive kinds and the flags that depend on base types
    fn classify(&mut self, ancestry: &mut Ancestry<'_>) {
        for index in 0..self.definition_ids.len() {
            let Some(id) = self.definition_ids[index] else {
                continue;
            };
            let full_name = self.full_names[id.index()].clone();
            let base_name = self
                .builder
                .get(id)
                .and_then(|descriptor| descriptor.base_type.as_ref())
                .and_then(|base| self.reference_name(base));

            let ancestry_flags = ancestry.flags(&full_name);
            let Some(descriptor) = self.builder.get_mut(id) else {
                continue;
            };

            let primitive = well_known(&full_name).filter(|known| known.is_primitive());
            descriptor.kind = if descriptor.flags.contains(TypeFlags::INTERFACE) {
                TypeKind::Interface
            } else if primitive.is_some() {
                descriptor.flags |= TypeFlags::PRIMITIVE | TypeFlags::VALUE_TYPE;
                TypeKind::Primitive
            } else if base_name.as_deref() == Some("System.Enum") {
                descriptor.flags |= TypeFlags::VALUE_TYPE;
                TypeKind::Enum
            } else if base_name.as_deref() == Some("System.ValueType")
                && full_name != "System.Enum"
            {
                descriptor.flags |= TypeFlags::VALUE_TYPE;
                TypeKind::Other
            } else {
                TypeKind::Class
            };

            if descriptor.kind == TypeKind::Class && descriptor.flags.contains(TypeFlags::IMPORT) {
                descriptor.flags |= TypeFlags::COM_OBJECT;
            }
            descriptor.flags |= ancestry_flags;
        }
    }
}

/// Flags carried directly by `TypeDef.Flags`
fn definition_flags(flags: u32) -> TypeFlags {
    let mut result = TypeFlags::empty();

    match flags & TypeAttributes::VISIBILITY_MASK {
        TypeAttributes::PUBLIC => result |= TypeFlags::PUBLIC,
        TypeAttributes::NESTED_PUBLIC => result |= TypeFlags::NESTED_PUBLIC,
        _ => {}
    }

    for (attribute, flag) in [
        (TypeAttributes::INTERFACE, TypeFlags::INTERFACE),
        (TypeAttributes::ABSTRACT, TypeFlags::ABSTRACT),
        (TypeAttributes::SEALED, TypeFlags::SEALED),
        (TypeAttributes::SPECIAL_NAME, TypeFlags::SPECIAL_NAME),
        (TypeAttributes::IMPORT, TypeFlags::IMPORT),
        (TypeAttributes::SERIALIZABLE, TypeFlags::SERIALIZABLE),
    ] {
        if flags & attribute != 0 {
            result |= flag;
        }
    }

    result
}

/// The well-known identity with this full name
fn well_known(full_name: &str) -> Option<WellKnownType> {
    WellKnownType::iter().find(|known| known.full_name() == full_name)
}

/// Placeholder parameter names for an external generic type, from its arity suffix
fn arity_placeholders(name: &str) -> Vec<String> {
    let arity = name
        .rsplit_once('`')
        .and_then(|(_, arity)| arity.parse::<usize>().ok())
        .unwrap_or(0);

    match arity {
        0 => Vec::new(),
        1 => vec!["T".to_string()],
        _ => (1..=arity).map(|position| format!("T{position}")).collect(),
    }
}

/// Sort generic parameters by number and keep their names
fn ordered_names(parameters: HashMap<u32, Vec<(u32, String)>>) -> HashMap<u32, Vec<String>> {
    parameters
        .into_iter()
        .map(|(owner, mut parameters)| {
            parameters.sort_by_key(|(number, _)| *number);
            (owner, parameters.into_iter().map(|(_, name)| name).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_from_attributes() {
        assert_eq!(
            definition_flags(TypeAttributes::PUBLIC | TypeAttributes::SEALED),
            TypeFlags::PUBLIC | TypeFlags::SEALED
        );
        assert_eq!(
            definition_flags(TypeAttributes::NESTED_PUBLIC | TypeAttributes::SERIALIZABLE),
            TypeFlags::NESTED_PUBLIC | TypeFlags::SERIALIZABLE
        );
        assert_eq!(
            definition_flags(
                TypeAttributes::NESTED_PRIVATE
                    | TypeAttributes::INTERFACE
                    | TypeAttributes::ABSTRACT
            ),
            TypeFlags::INTERFACE | TypeFlags::ABSTRACT
        );
        assert_eq!(
            definition_flags(TypeAttributes::IMPORT | TypeAttributes::SPECIAL_NAME),
            TypeFlags::IMPORT | TypeFlags::SPECIAL_NAME
        );
    }

    #[test]
    fn placeholders() {
        assert!(arity_placeholders("Plain").is_empty());
        assert_eq!(arity_placeholders("List`1"), vec!["T"]);
        assert_eq!(arity_placeholders("Dictionary`2"), vec!["T1", "T2"]);
        assert!(arity_placeholders("Odd`x").is_empty());
    }

    #[test]
    fn well_known_names() {
        assert_eq!(well_known("System.Int32"), Some(WellKnownType::Int32));
        assert_eq!(well_known("System.Object"), Some(WellKnownType::Object));
        assert_eq!(well_known("System.Enum"), None);
        assert_eq!(well_known("Int32"), None);
    }

    #[test]
    fn indirection() {
        let direct = Indirection::new(Vec::new(), 4);
        assert_eq!(direct.rows, 4);
        assert_eq!(direct.resolve(3), 3);

        let indirect = Indirection::new(vec![3, 1, 2], 3);
        assert_eq!(indirect.rows, 3);
        assert_eq!(indirect.resolve(1), 3);
        assert_eq!(indirect.resolve(3), 2);
        assert_eq!(indirect.resolve(4), 0);
    }
}
