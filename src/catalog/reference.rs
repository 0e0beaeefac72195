use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::catalog::TypeId;

/// Core library types with a fixed identity, independent of the module that defines them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum WellKnownType {
    /// `System.Boolean`
    Boolean,
    /// `System.Char`
    Char,
    /// `System.SByte`
    SByte,
    /// `System.Byte`
    Byte,
    /// `System.Int16`
    Int16,
    /// `System.UInt16`
    UInt16,
    /// `System.Int32`
    Int32,
    /// `System.UInt32`
    UInt32,
    /// `System.Int64`
    Int64,
    /// `System.UInt64`
    UInt64,
    /// `System.Single`
    Single,
    /// `System.Double`
    Double,
    /// `System.IntPtr`
    IntPtr,
    /// `System.UIntPtr`
    UIntPtr,
    /// `System.String`
    String,
    /// `System.Object`
    Object,
    /// `System.Void`
    Void,
}

impl WellKnownType {
    /// Simple name within the `System` namespace
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WellKnownType::Boolean => "Boolean",
            WellKnownType::Char => "Char",
            WellKnownType::SByte => "SByte",
            WellKnownType::Byte => "Byte",
            WellKnownType::Int16 => "Int16",
            WellKnownType::UInt16 => "UInt16",
            WellKnownType::Int32 => "Int32",
            WellKnownType::UInt32 => "UInt32",
            WellKnownType::Int64 => "Int64",
            WellKnownType::UInt64 => "UInt64",
            WellKnownType::Single => "Single",
            WellKnownType::Double => "Double",
            WellKnownType::IntPtr => "IntPtr",
            WellKnownType::UIntPtr => "UIntPtr",
            WellKnownType::String => "String",
            WellKnownType::Object => "Object",
            WellKnownType::Void => "Void",
        }
    }

    /// Namespace-qualified name, e.g. `System.Int32`
    #[must_use]
    pub fn full_name(self) -> String {
        format!("System.{}", self.name())
    }

    /// Look up the identity of `System.<name>`
    #[must_use]
    pub fn from_name(namespace: Option<&str>, name: &str) -> Option<WellKnownType> {
        if namespace != Some("System") {
            return None;
        }

        WellKnownType::iter().find(|known| known.name() == name)
    }

    /// Whether this is one of the runtime's primitive types
    #[must_use]
    pub fn is_primitive(self) -> bool {
        !matches!(
            self,
            WellKnownType::String | WellKnownType::Object | WellKnownType::Void
        )
    }
}

/// A reference from a declaration to a type
///
/// References either name a descriptor of the catalog (possibly with bound generic
/// arguments), a well-known core type, a generic parameter of the surrounding declaration or
/// a composite built from another reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeReference {
    /// A core library type
    WellKnown(WellKnownType),
    /// A catalog type; `args` holds the bound arguments of a closed instantiation
    Type {
        /// The referenced descriptor
        target: TypeId,
        /// Bound generic arguments, empty for plain references
        args: Vec<TypeReference>,
    },
    /// An unbound generic parameter, by name
    GenericParameter(String),
    /// An array of `element` with `rank` dimensions
    Array {
        /// Element type
        element: Box<TypeReference>,
        /// Number of dimensions, at least 1
        rank: u32,
    },
    /// A managed reference
    ByRef(Box<TypeReference>),
    /// An unmanaged pointer
    Pointer(Box<TypeReference>),
}

impl TypeReference {
    /// Plain reference to a catalog type
    #[must_use]
    pub fn to(target: TypeId) -> TypeReference {
        TypeReference::Type {
            target,
            args: Vec::new(),
        }
    }

    /// Closed instantiation of the generic catalog type `target`
    #[must_use]
    pub fn generic(target: TypeId, args: Vec<TypeReference>) -> TypeReference {
        TypeReference::Type { target, args }
    }

    /// Single-dimension array of `element`
    #[must_use]
    pub fn array_of(element: TypeReference) -> TypeReference {
        TypeReference::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Whether this names `known`
    #[must_use]
    pub fn is_well_known(&self, known: WellKnownType) -> bool {
        matches!(self, TypeReference::WellKnown(other) if *other == known)
    }
}

impl From<WellKnownType> for TypeReference {
    fn from(known: WellKnownType) -> Self {
        TypeReference::WellKnown(known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_lookup() {
        for known in WellKnownType::iter() {
            assert_eq!(WellKnownType::from_name(Some("System"), known.name()), Some(known));
            assert!(known.full_name().starts_with("System."));
        }

        assert_eq!(WellKnownType::COUNT, 17);
        assert_eq!(WellKnownType::from_name(None, "Int32"), None);
        assert_eq!(WellKnownType::from_name(Some("System"), "Decimal"), None);
        assert_eq!(WellKnownType::from_name(Some("Other"), "Object"), None);
    }

    #[test]
    fn primitives() {
        assert!(WellKnownType::Boolean.is_primitive());
        assert!(WellKnownType::IntPtr.is_primitive());
        assert!(!WellKnownType::String.is_primitive());
        assert!(!WellKnownType::Object.is_primitive());
        assert!(!WellKnownType::Void.is_primitive());
    }

    #[test]
    fn constructors() {
        let id = TypeId::new(3);
        assert_eq!(TypeReference::to(id), TypeReference::Type { target: id, args: vec![] });
        assert!(TypeReference::from(WellKnownType::Object).is_well_known(WellKnownType::Object));
        assert!(!TypeReference::to(id).is_well_known(WellKnownType::Object));
        assert_eq!(
            TypeReference::array_of(WellKnownType::Int32.into()),
            TypeReference::Array { element: Box::new(WellKnownType::Int32.into()), rank: 1 }
        );
    }
}
