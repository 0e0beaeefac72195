//! Benchmarks for listing emission.
//!
//! Builds synthetic catalogs shaped like a mid-sized class library and measures:
//! - Rendering of plain classes with members
//! - Rendering of generic-heavy signatures

extern crate asmdump;

use asmdump::{
    catalog::{
        CatalogBuilder, MethodDescriptor, PropertyDescriptor, TypeCatalog, TypeDescriptor,
        TypeFlags, TypeKind, TypeReference, WellKnownType,
    },
    Emitter,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// `namespaces` namespaces of `types` classes, each with ten properties and ten methods
fn plain_catalog(namespaces: usize, types: usize) -> TypeCatalog {
    let mut builder = CatalogBuilder::new("Bench.Plain");

    for ns in 0..namespaces {
        let namespace = format!("Bench.Area{ns}");
        for index in 0..types {
            let mut descriptor =
                TypeDescriptor::new(Some(&namespace), &format!("Type{index}"), TypeKind::Class);
            descriptor.flags = TypeFlags::PUBLIC;
            let id = builder.add_type(descriptor);

            for member in 0..10 {
                builder
                    .add_property(
                        id,
                        PropertyDescriptor {
                            name: format!("Property{member}"),
                            property_type: WellKnownType::String.into(),
                            can_read: true,
                            can_write: member % 2 == 0,
                            declaring_type: id,
                        },
                    )
                    .unwrap();
                builder
                    .add_method(
                        id,
                        MethodDescriptor::new(
                            &format!("Method{member}"),
                            id,
                            WellKnownType::Void.into(),
                        )
                        .with_parameter("count", WellKnownType::Int32.into())
                        .with_parameter("name", WellKnownType::String.into()),
                    )
                    .unwrap();
            }
        }
    }

    builder.build().unwrap()
}

/// Generic definitions whose methods return nested closed instantiations of a stand-in
fn generic_catalog(types: usize) -> TypeCatalog {
    let mut builder = CatalogBuilder::new("Bench.Generic");

    let mut ids = Vec::with_capacity(types);
    for index in 0..types {
        let mut descriptor =
            TypeDescriptor::new(Some("Bench"), &format!("Container{index}`2"), TypeKind::Class);
        descriptor.flags =
            TypeFlags::PUBLIC | TypeFlags::GENERIC_TYPE | TypeFlags::GENERIC_TYPE_DEFINITION;
        descriptor.generic_parameters = vec!["TKey".to_string(), "TValue".to_string()];
        ids.push(builder.add_type(descriptor));
    }

    let mut dictionary = TypeDescriptor::new(
        Some("System.Collections.Generic"),
        "Dictionary`2",
        TypeKind::Class,
    );
    dictionary.generic_parameters = vec!["TKey".to_string(), "TValue".to_string()];
    let dictionary = builder.add_standin(dictionary);

    let key = TypeReference::GenericParameter("TKey".to_string());
    let value = TypeReference::GenericParameter("TValue".to_string());
    let nested = TypeReference::generic(
        dictionary,
        vec![
            key.clone(),
            TypeReference::array_of(TypeReference::generic(
                dictionary,
                vec![key.clone(), value.clone()],
            )),
        ],
    );

    for id in ids {
        for member in 0..10 {
            builder
                .add_method(
                    id,
                    MethodDescriptor::new(&format!("Lookup{member}"), id, nested.clone())
                        .with_parameter("key", key.clone())
                        .with_parameter("fallback", value.clone()),
                )
                .unwrap();
        }
    }

    builder.build().unwrap()
}

/// Benchmark rendering 1,000 plain classes.
fn bench_emit_plain(c: &mut Criterion) {
    let catalog = plain_catalog(10, 100);

    c.bench_function("emit_plain_1000_types", |b| {
        b.iter(|| {
            let lines = Emitter::emit(black_box(&catalog));
            black_box(lines)
        });
    });
}

/// Benchmark rendering generic-heavy signatures.
fn bench_emit_generic(c: &mut Criterion) {
    let catalog = generic_catalog(200);

    c.bench_function("emit_generic_200_types", |b| {
        b.iter(|| {
            let lines = Emitter::emit(black_box(&catalog));
            black_box(lines)
        });
    });
}

criterion_group!(benches, bench_emit_plain, bench_emit_generic);
criterion_main!(benches);
