//! Pseudo-C# rendering of a [`TypeCatalog`].
//!
//! The emitter walks the catalog namespace by namespace and writes one declaration block per
//! visible type, with its properties, public methods and nested types inside. The listing only
//! needs to be good enough for a documentation generator to pick up declarations; it is never
//! compiled.
//!
//! # Examples
//!
//! ```rust
//! use asmdump::catalog::{
//!     CatalogBuilder, MethodDescriptor, TypeDescriptor, TypeFlags, TypeKind, WellKnownType,
//! };
//! use asmdump::Emitter;
//!
//! let mut builder = CatalogBuilder::new("Demo");
//! let mut foo = TypeDescriptor::new(Some("N"), "Foo", TypeKind::Class);
//! foo.flags = TypeFlags::PUBLIC;
//! let foo = builder.add_type(foo);
//! builder.add_method(foo, MethodDescriptor::new("Run", foo, WellKnownType::Void.into()))?;
//!
//! let lines = Emitter::emit(&builder.build()?);
//! assert_eq!(lines[0], "// Demo");
//! assert!(lines.contains(&"        public void Run() { }".to_string()));
//! # Ok::<(), asmdump::Error>(())
//! ```

mod names;
mod writer;

use log::debug;

pub use names::{strip_arity, well_known_name, NameResolver};
pub use writer::{LineWriter, INDENT};

use crate::catalog::{
    MethodDescriptor, PropertyDescriptor, TypeCatalog, TypeDescriptor, TypeId, TypeKind,
};

/// Renders a catalog into pseudo-source lines
pub struct Emitter<'c> {
    catalog: &'c TypeCatalog,
    names: NameResolver<'c>,
    out: LineWriter,
    emitted: usize,
}

impl<'c> Emitter<'c> {
    /// Render `catalog` into lines, without line terminators
    ///
    /// The output depends only on the catalog contents, so repeated runs over the same
    /// catalog produce identical listings.
    #[must_use]
    pub fn emit(catalog: &'c TypeCatalog) -> Vec<String> {
        let mut emitter = Emitter {
            catalog,
            names: NameResolver::new(catalog),
            out: LineWriter::new(),
            emitted: 0,
        };

        emitter.out.line(&format!("// {}", catalog.name()));

        for namespace in catalog.namespaces() {
            emitter.emit_namespace(namespace.as_deref());
        }

        debug!(
            "Emitted {} of {} types from {}",
            emitter.emitted,
            catalog.definition_count(),
            catalog.name()
        );

        emitter.out.into_lines()
    }

    fn emit_namespace(&mut self, namespace: Option<&str>) {
        if let Some(namespace) = namespace {
            self.out.open(&format!("namespace {namespace} {{"));
        }

        let catalog = self.catalog;
        for (id, descriptor) in catalog.definitions() {
            if descriptor.namespace.as_deref() == namespace && !descriptor.is_nested() {
                self.emit_type(id, descriptor);
            }
        }

        if namespace.is_some() {
            self.out.close();
            self.out.line("");
        }
    }

    fn emit_type(&mut self, id: TypeId, descriptor: &'c TypeDescriptor) {
        if !descriptor.is_visible() {
            return;
        }

        let attributes = descriptor.flags.attribute_names();
        if !attributes.is_empty() {
            let declaring = descriptor
                .declaring_type
                .map(|parent| self.catalog.full_name(parent))
                .unwrap_or_default();
            self.out.line(&format!(
                "// {} attributes={}",
                declaring,
                attributes.join(",")
            ));
        }

        let mut prefixes = Vec::new();
        if descriptor.is_public() {
            prefixes.push("public");
        }
        if descriptor.kind != TypeKind::Interface {
            if descriptor.is_abstract() {
                prefixes.push("abstract");
            }
            if descriptor.is_sealed() {
                prefixes.push("sealed");
            }
        }

        match descriptor.kind {
            TypeKind::Class | TypeKind::Interface => {
                prefixes.push(if descriptor.kind == TypeKind::Class {
                    "class"
                } else {
                    "interface"
                });

                self.out.open(&format!(
                    "{} {}{} {{",
                    prefixes.join(" "),
                    self.names.declaration_name(id),
                    self.names.extends_clause(descriptor)
                ));
                self.emit_members(id, descriptor);
                self.out.close();
            }
            TypeKind::Enum => {
                prefixes.push("enum");
                self.out
                    .open(&format!("{} {} {{", prefixes.join(" "), descriptor.name));
                self.out.close();
            }
            TypeKind::Primitive | TypeKind::Other => {
                self.out
                    .line(&format!("// Unknown {}", self.catalog.full_name(id)));
            }
        }

        self.emitted += 1;
    }

    fn emit_members(&mut self, id: TypeId, descriptor: &'c TypeDescriptor) {
        let namespace = descriptor.namespace.as_deref();

        for property in descriptor
            .properties
            .iter()
            .filter(|property| property.declaring_type == id)
        {
            let line = self.property_line(namespace, property);
            self.out.line(&line);
        }

        for method in descriptor
            .methods
            .iter()
            .filter(|method| is_listed(id, method))
        {
            let line = self.method_line(namespace, method);
            self.out.line(&line);
        }

        let catalog = self.catalog;
        for &child in catalog.nested_types(id) {
            if let Some(nested) = catalog.get(child) {
                self.emit_type(child, nested);
            }
        }
    }

    fn property_line(&self, namespace: Option<&str>, property: &PropertyDescriptor) -> String {
        let mut accessors = Vec::new();
        if property.can_read {
            accessors.push("get;");
        }
        if property.can_write {
            accessors.push("set;");
        }

        format!(
            "public {} {} {{ {} }}",
            self.names.class_name(namespace, &property.property_type),
            property.name,
            accessors.join(" ")
        )
    }

    fn method_line(&self, namespace: Option<&str>, method: &MethodDescriptor) -> String {
        let parameters = method
            .parameters
            .iter()
            .map(|parameter| {
                format!(
                    "{} {}",
                    self.names.class_name(namespace, &parameter.parameter_type),
                    parameter.name
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "public {} {}({}) {{ }}",
            self.names.class_name(namespace, &method.return_type),
            method.name,
            parameters
        )
    }
}

/// Whether `method` gets its own line in the body of `owner`
fn is_listed(owner: TypeId, method: &MethodDescriptor) -> bool {
    method.declaring_type == owner
        && method.is_public
        && !method.is_accessor
        && !method.is_constructor
        && !method.name.starts_with("get_")
        && !method.name.starts_with("set_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogBuilder, PropertyDescriptor, TypeFlags, TypeReference, WellKnownType,
    };
    use crate::test::{public_type, read_write_property};

    #[test]
    fn foo_bar_baz() {
        let mut builder = CatalogBuilder::new("Sample");
        let foo = builder.add_type(public_type(Some("N"), "Foo", TypeKind::Class));
        builder
            .add_property(
                foo,
                read_write_property(foo, "Bar", WellKnownType::Int32.into()),
            )
            .unwrap();
        builder
            .add_method(
                foo,
                MethodDescriptor::new("Baz", foo, WellKnownType::Void.into())
                    .with_parameter("x", WellKnownType::Int32.into()),
            )
            .unwrap();

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            lines,
            vec![
                "// Sample",
                "namespace N {",
                "    public class Foo {",
                "        public int Bar { get; set; }",
                "        public void Baz(int x) { }",
                "    }",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn global_namespace_is_not_wrapped() {
        let mut builder = CatalogBuilder::new("Sample");
        builder.add_type(public_type(None, "Loose", TypeKind::Interface));
        builder.add_type(public_type(Some("A"), "Boxed", TypeKind::Class));

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            lines,
            vec![
                "// Sample",
                "public interface Loose {",
                "}",
                "namespace A {",
                "    public class Boxed {",
                "    }",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn method_filter() {
        let owner = TypeId::new(0);
        let other = TypeId::new(1);

        let void = || TypeReference::from(WellKnownType::Void);
        assert!(is_listed(owner, &MethodDescriptor::new("Run", owner, void())));
        assert!(!is_listed(owner, &MethodDescriptor::new("Run", other, void())));
        assert!(!is_listed(
            owner,
            &MethodDescriptor::new("get_Value", owner, WellKnownType::Int32.into())
        ));
        assert!(!is_listed(owner, &MethodDescriptor::new("set_Value", owner, void())));

        let mut hidden = MethodDescriptor::new("Hidden", owner, WellKnownType::Void.into());
        hidden.is_public = false;
        assert!(!is_listed(owner, &hidden));

        let mut accessor = MethodDescriptor::new("add_Changed", owner, WellKnownType::Void.into());
        accessor.is_accessor = true;
        assert!(!is_listed(owner, &accessor));

        let mut constructor = MethodDescriptor::new(".ctor", owner, WellKnownType::Void.into());
        constructor.is_constructor = true;
        assert!(!is_listed(owner, &constructor));
    }

    #[test]
    fn modifiers_and_kinds() {
        let mut builder = CatalogBuilder::new("Sample");

        let mut shape = public_type(Some("G"), "Shape", TypeKind::Class);
        shape.flags |= TypeFlags::ABSTRACT;
        let shape = builder.add_type(shape);

        let mut contract = public_type(Some("G"), "IContract", TypeKind::Interface);
        contract.flags |= TypeFlags::ABSTRACT;
        builder.add_type(contract);

        let mut color = public_type(Some("G"), "Color", TypeKind::Enum);
        color.flags |= TypeFlags::SEALED | TypeFlags::VALUE_TYPE | TypeFlags::SERIALIZABLE;
        color.base_type = Some(TypeReference::to(shape));
        builder.add_type(color);

        let mut point = public_type(Some("G"), "Point", TypeKind::Other);
        point.flags |= TypeFlags::SEALED | TypeFlags::VALUE_TYPE;
        builder.add_type(point);

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            lines,
            vec![
                "// Sample",
                "namespace G {",
                "    public abstract class Shape {",
                "    }",
                "    public interface IContract {",
                "    }",
                "    //  attributes=serializable,valueType",
                "    public sealed enum Color {",
                "    }",
                "    //  attributes=valueType",
                "    // Unknown G.Point",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn nested_types_follow_members() {
        let mut builder = CatalogBuilder::new("Sample");
        let outer = builder.add_type(public_type(Some("N"), "Outer", TypeKind::Class));

        let mut inner = TypeDescriptor::new(Some("N"), "Inner", TypeKind::Class);
        inner.flags = TypeFlags::NESTED_PUBLIC;
        inner.declaring_type = Some(outer);
        builder.add_type(inner);

        let mut hidden = TypeDescriptor::new(Some("N"), "Hidden", TypeKind::Class);
        hidden.declaring_type = Some(outer);
        builder.add_type(hidden);

        builder
            .add_method(outer, MethodDescriptor::new("Go", outer, WellKnownType::Void.into()))
            .unwrap();

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            lines,
            vec![
                "// Sample",
                "namespace N {",
                "    public class Outer {",
                "        public void Go() { }",
                "        class Inner {",
                "        }",
                "    }",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn hidden_parent_hides_nested_types() {
        let mut builder = CatalogBuilder::new("P");
        let hidden =
            builder.add_type(TypeDescriptor::new(Some("N"), "Hidden", TypeKind::Class));

        let mut inner = TypeDescriptor::new(Some("N"), "Inner", TypeKind::Class);
        inner.flags = TypeFlags::NESTED_PUBLIC;
        inner.declaring_type = Some(hidden);
        builder.add_type(inner);

        builder.add_type(public_type(Some("N"), "Shown", TypeKind::Class));

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(lines, ["// P", "namespace N {", "    public class Shown {", "    }", "}", ""]);
        assert!(lines.iter().all(|line| !line.contains("Hidden") && !line.contains("Inner")));
    }

    #[test]
    fn composite_parameters() {
        let mut builder = CatalogBuilder::new("P");
        let math = builder.add_type(public_type(Some("N"), "Math", TypeKind::Class));
        builder
            .add_method(
                math,
                MethodDescriptor::new("Sum", math, WellKnownType::Int32.into())
                    .with_parameter(
                        "values",
                        TypeReference::array_of(WellKnownType::Int32.into()),
                    )
                    .with_parameter(
                        "total",
                        TypeReference::ByRef(Box::new(WellKnownType::Int64.into())),
                    ),
            )
            .unwrap();

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            lines[3],
            "        public int Sum(System.Int32[] values, System.Int64& total) { }"
        );
    }

    #[test]
    fn property_accessors() {
        let mut builder = CatalogBuilder::new("Sample");
        let owner = builder.add_type(public_type(None, "Holder", TypeKind::Class));

        let accessors = [
            ("Both", true, true),
            ("Read", true, false),
            ("Write", false, true),
            ("None", false, false),
        ];
        for (name, can_read, can_write) in accessors {
            builder
                .add_property(
                    owner,
                    PropertyDescriptor {
                        name: name.to_string(),
                        property_type: WellKnownType::String.into(),
                        can_read,
                        can_write,
                        declaring_type: owner,
                    },
                )
                .unwrap();
        }

        let lines = Emitter::emit(&builder.build().unwrap());
        assert_eq!(
            &lines[2..6],
            &[
                "    public string Both { get; set; }",
                "    public string Read { get; }",
                "    public string Write { set; }",
                "    public string None {  }",
            ]
        );
    }
}
