use bitflags::bitflags;

use crate::{
    catalog::{TypeId, TypeReference},
    metadata::token::Token,
};

/// What kind of declaration a type is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A reference type that is not an interface
    Class,
    /// An interface
    Interface,
    /// A type deriving from `System.Enum`
    Enum,
    /// One of the runtime's primitive types
    Primitive,
    /// Anything else, e.g. a struct
    Other,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    /// Structural and visibility properties of a type
    pub struct TypeFlags: u32 {
        /// Top-level type with public visibility
        const PUBLIC = 0x0000_0001;
        /// Nested type with public visibility
        const NESTED_PUBLIC = 0x0000_0002;
        /// Public and reachable through public enclosing types; derived while building a catalog
        const VISIBLE = 0x0000_0004;
        /// Declared abstract
        const ABSTRACT = 0x0000_0008;
        /// Declared sealed
        const SEALED = 0x0000_0010;
        /// An interface
        const INTERFACE = 0x0000_0020;
        /// An array type
        const ARRAY = 0x0000_0100;
        /// A managed reference type
        const BY_REF = 0x0000_0200;
        /// A COM object wrapper class
        const COM_OBJECT = 0x0000_0400;
        /// Derives from `System.ContextBoundObject`
        const CONTEXTFUL = 0x0000_0800;
        /// A generic parameter
        const GENERIC_PARAMETER = 0x0000_1000;
        /// A generic type
        const GENERIC_TYPE = 0x0000_2000;
        /// An open generic type definition
        const GENERIC_TYPE_DEFINITION = 0x0000_4000;
        /// Imported from a COM type library
        const IMPORT = 0x0000_8000;
        /// Derives from `System.MarshalByRefObject`
        const MARSHAL_BY_REF = 0x0001_0000;
        /// An unmanaged pointer type
        const POINTER = 0x0002_0000;
        /// One of the runtime's primitive types
        const PRIMITIVE = 0x0004_0000;
        /// Marked serializable
        const SERIALIZABLE = 0x0008_0000;
        /// Has a special name
        const SPECIAL_NAME = 0x0010_0000;
        /// A value type
        const VALUE_TYPE = 0x0020_0000;
    }
}

/// Flags reported in a type's attribute comment, in reporting order
const ATTRIBUTE_NAMES: [(TypeFlags, &str); 14] = [
    (TypeFlags::ARRAY, "array"),
    (TypeFlags::BY_REF, "byRef"),
    (TypeFlags::COM_OBJECT, "COMObject"),
    (TypeFlags::CONTEXTFUL, "contextful"),
    (TypeFlags::GENERIC_PARAMETER, "genericParameter"),
    (TypeFlags::GENERIC_TYPE, "genericType"),
    (TypeFlags::GENERIC_TYPE_DEFINITION, "genericTypeDefinition"),
    (TypeFlags::IMPORT, "import"),
    (TypeFlags::MARSHAL_BY_REF, "marshalByRef"),
    (TypeFlags::POINTER, "pointer"),
    (TypeFlags::PRIMITIVE, "primitive"),
    (TypeFlags::SERIALIZABLE, "serializable"),
    (TypeFlags::SPECIAL_NAME, "specialName"),
    (TypeFlags::VALUE_TYPE, "valueType"),
];

impl TypeFlags {
    /// Names of the structural flags that are set, in reporting order
    #[must_use]
    pub fn attribute_names(self) -> Vec<&'static str> {
        ATTRIBUTE_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// A declared type, or a stand-in for a type defined in another module
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    /// Metadata token of the definition or reference, null for synthesized stand-ins
    pub token: Token,
    /// Simple name, including any arity suffix (``List`1``)
    pub name: String,
    /// Namespace; `None` is the global namespace. Nested types carry their outermost
    /// enclosing type's namespace
    pub namespace: Option<String>,
    /// Enclosing type of a nested type
    pub declaring_type: Option<TypeId>,
    /// Declaration kind
    pub kind: TypeKind,
    /// Structural and visibility flags
    pub flags: TypeFlags,
    /// Base type, `None` for interfaces and the root object type
    pub base_type: Option<TypeReference>,
    /// Directly implemented interfaces, in metadata order
    pub interfaces: Vec<TypeReference>,
    /// Names of the generic parameters of an open definition, in order
    pub generic_parameters: Vec<String>,
    /// Properties reported for this type
    pub properties: Vec<PropertyDescriptor>,
    /// Methods reported for this type
    pub methods: Vec<MethodDescriptor>,
    /// Defining assembly of a stand-in; `None` for types of the loaded module
    pub assembly: Option<String>,
}

impl TypeDescriptor {
    /// A descriptor with no members, flags or relations
    #[must_use]
    pub fn new(namespace: Option<&str>, name: &str, kind: TypeKind) -> TypeDescriptor {
        TypeDescriptor {
            token: Token::new(0),
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            declaring_type: None,
            kind,
            flags: TypeFlags::empty(),
            base_type: None,
            interfaces: Vec::new(),
            generic_parameters: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            assembly: None,
        }
    }

    /// Top-level public visibility
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.flags.contains(TypeFlags::PUBLIC)
    }

    /// Public and reachable through public enclosing types
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(TypeFlags::VISIBLE)
    }

    /// Declared abstract
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    /// Declared sealed
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags.contains(TypeFlags::SEALED)
    }

    /// Whether the type is nested in another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Whether this is an open generic definition with at least one parameter
    #[must_use]
    pub fn is_generic_definition(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}

/// A property of a type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name
    pub name: String,
    /// Declared property type
    pub property_type: TypeReference,
    /// Has a getter
    pub can_read: bool,
    /// Has a setter
    pub can_write: bool,
    /// Type that declares the property
    pub declaring_type: TypeId,
}

/// A parameter of a method
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared parameter type
    pub parameter_type: TypeReference,
}

/// A method of a type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Declared return type
    pub return_type: TypeReference,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterDescriptor>,
    /// Type that declares the method
    pub declaring_type: TypeId,
    /// Declared public
    pub is_public: bool,
    /// Implements a property getter or setter
    pub is_accessor: bool,
    /// Instance or type constructor
    pub is_constructor: bool,
}

impl MethodDescriptor {
    /// A public, non-accessor method without parameters
    #[must_use]
    pub fn new(name: &str, declaring_type: TypeId, return_type: TypeReference) -> MethodDescriptor {
        MethodDescriptor {
            name: name.to_string(),
            return_type,
            parameters: Vec::new(),
            declaring_type,
            is_public: true,
            is_accessor: false,
            is_constructor: false,
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with_parameter(mut self, name: &str, parameter_type: TypeReference) -> MethodDescriptor {
        self.parameters.push(ParameterDescriptor {
            name: name.to_string(),
            parameter_type,
        });
        self
    }
}
