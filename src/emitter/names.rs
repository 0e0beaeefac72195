//! Type-name resolution for declarations and member signatures.
//!
//! Names are resolved relative to a reference namespace: types in that namespace are shown by
//! their simple name, everything else by its full name. Well-known core types use their
//! language aliases where one exists.

use crate::catalog::{TypeCatalog, TypeDescriptor, TypeId, TypeReference, WellKnownType};

/// Marker prepended to primitives that have no alias
const PRIMITIVE_MARKER: &str = "/* primitive */";

/// Alias of a well-known type, or the marked full name of an unaliased primitive
#[must_use]
pub fn well_known_name(known: WellKnownType) -> String {
    match known {
        WellKnownType::Boolean => "bool".to_string(),
        WellKnownType::Double => "double".to_string(),
        WellKnownType::Int32 => "int".to_string(),
        WellKnownType::Int64 => "long".to_string(),
        WellKnownType::Single => "float".to_string(),
        WellKnownType::Object => "object".to_string(),
        WellKnownType::String => "string".to_string(),
        WellKnownType::Void => "void".to_string(),
        other => format!("{}{}", PRIMITIVE_MARKER, other.full_name()),
    }
}

/// Remove every generic arity suffix (a backtick followed by digits)
#[must_use]
pub fn strip_arity(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '`' && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
            continue;
        }
        result.push(c);
    }

    result
}

/// Resolves [`TypeReference`]s of one catalog into display names
pub struct NameResolver<'c> {
    catalog: &'c TypeCatalog,
}

impl<'c> NameResolver<'c> {
    /// Create a resolver over `catalog`
    #[must_use]
    pub fn new(catalog: &'c TypeCatalog) -> Self {
        NameResolver { catalog }
    }

    /// Full name of a reference, with generic decoration
    ///
    /// Open generic definitions list their parameter names; closed instantiations list their
    /// arguments resolved through [`NameResolver::base_name`], and `System.Nullable` over
    /// `T` becomes `T?`.
    #[must_use]
    pub fn class_name(&self, namespace: Option<&str>, reference: &TypeReference) -> String {
        match reference {
            TypeReference::Type { target, args } => {
                let name = self.descriptor_name(namespace, *target);
                let Some(descriptor) = self.catalog.get(*target) else {
                    return name;
                };

                if args.is_empty() {
                    if descriptor.is_generic_definition() {
                        return format!("{}<{}>", name, descriptor.generic_parameters.join(", "));
                    }
                    return name;
                }

                let args = args
                    .iter()
                    .map(|arg| self.base_name(namespace, arg))
                    .collect::<Vec<_>>()
                    .join(", ");

                if is_nullable(descriptor) {
                    format!("{args}?")
                } else {
                    format!("{name}<{args}>")
                }
            }
            _ => self.base_name(namespace, reference),
        }
    }

    /// Name of a reference without generic decoration
    ///
    /// Arrays, by-refs and pointers are distinct types: they never take a language alias and
    /// never carry generic decoration, so `int[]` renders as `System.Int32[]`.
    #[must_use]
    pub fn base_name(&self, namespace: Option<&str>, reference: &TypeReference) -> String {
        match reference {
            TypeReference::WellKnown(known) => well_known_name(*known),
            TypeReference::Type { target, .. } => self.descriptor_name(namespace, *target),
            TypeReference::GenericParameter(name) => name.clone(),
            TypeReference::Array { .. } | TypeReference::ByRef(_) | TypeReference::Pointer(_) => {
                self.element_name(namespace, reference)
            }
        }
    }

    /// Name of a declared type as it appears in its own header, with generic parameters
    #[must_use]
    pub fn declaration_name(&self, id: TypeId) -> String {
        let Some(descriptor) = self.catalog.get(id) else {
            return String::new();
        };

        self.class_name(descriptor.namespace.as_deref(), &TypeReference::to(id))
    }

    /// The ` : Base, IFirst, ISecond` clause of a declaration, or an empty string
    #[must_use]
    pub fn extends_clause(&self, descriptor: &TypeDescriptor) -> String {
        let namespace = descriptor.namespace.as_deref();

        let extends: Vec<String> = descriptor
            .base_type
            .iter()
            .filter(|base| !self.is_root_object(base))
            .chain(descriptor.interfaces.iter())
            .map(|reference| self.class_name(namespace, reference))
            .collect();

        if extends.is_empty() {
            String::new()
        } else {
            format!(" : {}", extends.join(", "))
        }
    }

    /// Composite and element names: namespace-relative, without aliases
    fn element_name(&self, namespace: Option<&str>, reference: &TypeReference) -> String {
        match reference {
            TypeReference::WellKnown(known) => {
                if namespace == Some("System") {
                    known.name().to_string()
                } else {
                    known.full_name()
                }
            }
            TypeReference::Type { target, .. } => self.relative_name(namespace, *target),
            TypeReference::GenericParameter(name) => name.clone(),
            TypeReference::Array { element, rank } => {
                format!("{}{}", self.element_name(namespace, element), array_suffix(*rank))
            }
            TypeReference::ByRef(element) => format!("{}&", self.element_name(namespace, element)),
            TypeReference::Pointer(element) => {
                format!("{}*", self.element_name(namespace, element))
            }
        }
    }

    fn descriptor_name(&self, namespace: Option<&str>, id: TypeId) -> String {
        let Some(descriptor) = self.catalog.get(id) else {
            return String::new();
        };

        if descriptor.declaring_type.is_none() {
            if let Some(known) =
                WellKnownType::from_name(descriptor.namespace.as_deref(), &descriptor.name)
            {
                return well_known_name(known);
            }
        }

        self.relative_name(namespace, id)
    }

    /// Simple name inside `namespace`, full name elsewhere, arity suffixes removed
    fn relative_name(&self, namespace: Option<&str>, id: TypeId) -> String {
        let Some(descriptor) = self.catalog.get(id) else {
            return String::new();
        };

        let name = if descriptor.namespace.as_deref() == namespace {
            descriptor.name.clone()
        } else {
            self.catalog.full_name(id)
        };

        strip_arity(&name)
    }

    fn is_root_object(&self, reference: &TypeReference) -> bool {
        match reference {
            TypeReference::WellKnown(known) => *known == WellKnownType::Object,
            TypeReference::Type { target, args } if args.is_empty() => {
                self.catalog.get(*target).is_some_and(|descriptor| {
                    let namespace = descriptor.namespace.as_deref();
                    descriptor.declaring_type.is_none()
                        && WellKnownType::from_name(namespace, &descriptor.name)
                            == Some(WellKnownType::Object)
                })
            }
            _ => false,
        }
    }
}

fn is_nullable(descriptor: &TypeDescriptor) -> bool {
    descriptor.declaring_type.is_none()
        && descriptor.namespace.as_deref() == Some("System")
        && strip_arity(&descriptor.name) == "Nullable"
}

fn array_suffix(rank: u32) -> String {
    format!("[{}]", ",".repeat(rank.saturating_sub(1) as usize))
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::catalog::{CatalogBuilder, TypeDescriptor, TypeFlags, TypeKind};

    #[test]
    fn alias_table() {
        let expected = [
            (WellKnownType::Boolean, "bool"),
            (WellKnownType::Char, "/* primitive */System.Char"),
            (WellKnownType::SByte, "/* primitive */System.SByte"),
            (WellKnownType::Byte, "/* primitive */System.Byte"),
            (WellKnownType::Int16, "/* primitive */System.Int16"),
            (WellKnownType::UInt16, "/* primitive */System.UInt16"),
            (WellKnownType::Int32, "int"),
            (WellKnownType::UInt32, "/* primitive */System.UInt32"),
            (WellKnownType::Int64, "long"),
            (WellKnownType::UInt64, "/* primitive */System.UInt64"),
            (WellKnownType::Single, "float"),
            (WellKnownType::Double, "double"),
            (WellKnownType::IntPtr, "/* primitive */System.IntPtr"),
            (WellKnownType::UIntPtr, "/* primitive */System.UIntPtr"),
            (WellKnownType::String, "string"),
            (WellKnownType::Object, "object"),
            (WellKnownType::Void, "void"),
        ];

        assert_eq!(expected.len(), WellKnownType::iter().count());
        for (known, name) in expected {
            assert_eq!(well_known_name(known), name);
        }
    }

    #[test]
    fn arity_suffix() {
        assert_eq!(strip_arity("List`1"), "List");
        assert_eq!(strip_arity("N.Outer`2+Inner`1"), "N.Outer+Inner");
        assert_eq!(strip_arity("Plain"), "Plain");
        assert_eq!(strip_arity("Odd`"), "Odd`");
        assert_eq!(strip_arity("Tick`Name"), "Tick`Name");
    }

    fn catalog() -> (TypeCatalog, TypeId, TypeId, TypeId, TypeId) {
        let mut builder = CatalogBuilder::new("M");

        let mut pair = TypeDescriptor::new(Some("N"), "Pair`2", TypeKind::Class);
        pair.flags = TypeFlags::PUBLIC;
        pair.generic_parameters = vec!["TKey".to_string(), "TValue".to_string()];
        let pair = builder.add_type(pair);

        let mut other = TypeDescriptor::new(Some("Other"), "Thing", TypeKind::Class);
        other.flags = TypeFlags::PUBLIC;
        let other = builder.add_type(other);

        let nullable = builder.add_standin(TypeDescriptor::new(
            Some("System"),
            "Nullable`1",
            TypeKind::Other,
        ));
        let list = builder.add_standin(TypeDescriptor::new(
            Some("System.Collections.Generic"),
            "List`1",
            TypeKind::Class,
        ));

        (builder.build().unwrap(), pair, other, nullable, list)
    }

    #[test]
    fn namespace_relative_names() {
        let (catalog, pair, other, _, list) = catalog();
        let names = NameResolver::new(&catalog);

        assert_eq!(names.base_name(Some("Other"), &TypeReference::to(other)), "Thing");
        assert_eq!(names.base_name(Some("N"), &TypeReference::to(other)), "Other.Thing");
        assert_eq!(names.base_name(None, &TypeReference::to(pair)), "N.Pair");
        assert_eq!(
            names.base_name(
                Some("N"),
                &TypeReference::generic(list, vec![WellKnownType::Int32.into()])
            ),
            "System.Collections.Generic.List"
        );
    }

    #[test]
    fn generic_decoration() {
        let (catalog, pair, other, nullable, list) = catalog();
        let names = NameResolver::new(&catalog);

        assert_eq!(names.declaration_name(pair), "Pair<TKey, TValue>");
        assert_eq!(
            names.class_name(
                Some("N"),
                &TypeReference::generic(nullable, vec![WellKnownType::Int32.into()])
            ),
            "int?"
        );
        assert_eq!(
            names.class_name(
                Some("Other"),
                &TypeReference::generic(
                    list,
                    vec![TypeReference::to(other), WellKnownType::String.into()]
                )
            ),
            "System.Collections.Generic.List<Thing, string>"
        );

        // nested arguments keep only their base name
        let nested = TypeReference::generic(
            list,
            vec![TypeReference::generic(list, vec![WellKnownType::Int32.into()])],
        );
        assert_eq!(
            names.class_name(Some("System.Collections.Generic"), &nested),
            "List<List>"
        );

        let bound_to_parameters = TypeReference::generic(
            pair,
            vec![
                TypeReference::GenericParameter("T".to_string()),
                TypeReference::GenericParameter("U".to_string()),
            ],
        );
        assert_eq!(names.class_name(Some("N"), &bound_to_parameters), "Pair<T, U>");
    }

    #[test]
    fn composites() {
        let (catalog, _, other, _, list) = catalog();
        let names = NameResolver::new(&catalog);

        assert_eq!(
            names.class_name(Some("Other"), &TypeReference::array_of(TypeReference::to(other))),
            "Thing[]"
        );
        assert_eq!(
            names.class_name(Some("N"), &TypeReference::array_of(TypeReference::to(other))),
            "Other.Thing[]"
        );

        let cube = TypeReference::Array {
            element: Box::new(WellKnownType::Double.into()),
            rank: 3,
        };
        assert_eq!(names.class_name(None, &cube), "System.Double[,,]");
        assert_eq!(names.class_name(Some("System"), &cube), "Double[,,]");

        let total = TypeReference::ByRef(Box::new(WellKnownType::Int64.into()));
        assert_eq!(names.class_name(Some("N"), &total), "System.Int64&");
        assert_eq!(names.base_name(Some("N"), &total), "System.Int64&");

        let bytes = TypeReference::Pointer(Box::new(WellKnownType::Byte.into()));
        assert_eq!(names.class_name(None, &bytes), "System.Byte*");

        let jagged = TypeReference::array_of(TypeReference::array_of(WellKnownType::Int32.into()));
        assert_eq!(names.class_name(Some("N"), &jagged), "System.Int32[][]");

        // element instantiations are not decorated
        let flags = TypeReference::array_of(TypeReference::generic(
            list,
            vec![WellKnownType::Boolean.into()],
        ));
        assert_eq!(names.class_name(Some("System.Collections.Generic"), &flags), "List[]");

        let values = TypeReference::array_of(TypeReference::GenericParameter("T".to_string()));
        assert_eq!(names.class_name(Some("N"), &values), "T[]");

        // composite arguments of a closed instantiation
        let lists = TypeReference::generic(
            list,
            vec![TypeReference::array_of(WellKnownType::String.into())],
        );
        assert_eq!(
            names.class_name(Some("N"), &lists),
            "System.Collections.Generic.List<System.String[]>"
        );
    }

    #[test]
    fn extends() {
        let (catalog, pair, other, _, list) = catalog();
        let names = NameResolver::new(&catalog);

        let mut descriptor = TypeDescriptor::new(Some("Other"), "Derived", TypeKind::Class);
        assert_eq!(names.extends_clause(&descriptor), "");

        descriptor.base_type = Some(WellKnownType::Object.into());
        assert_eq!(names.extends_clause(&descriptor), "");

        descriptor.interfaces.push(TypeReference::to(other));
        assert_eq!(names.extends_clause(&descriptor), " : Thing");

        descriptor.base_type =
            Some(TypeReference::generic(list, vec![WellKnownType::Int32.into()]));
        descriptor.interfaces.push(TypeReference::to(pair));
        assert_eq!(
            names.extends_clause(&descriptor),
            " : System.Collections.Generic.List<int>, Thing, N.Pair<TKey, TValue>"
        );
    }
}
