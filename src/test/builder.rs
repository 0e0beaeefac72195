//! Assembles minimal metadata blobs (`BSJB` root, `#~`, `#Strings`, `#Blob`) so loader tests
//! can run against real table layouts without binary fixtures.
//!
//! All heaps and tables stay small, so every index column is two bytes wide.

use std::collections::{BTreeMap, HashMap};

use crate::metadata::{
    root::CIL_HEADER_MAGIC,
    tables::{CodedIndexType, TableId},
};

/// A column value of a crafted row
#[derive(Clone, Copy, Debug)]
pub enum Col {
    /// Two-byte column: heap indexes, table indexes, coded indexes and 16-bit constants
    U16(u16),
    /// Four-byte column: flags, RVAs and hash algorithm ids
    U32(u32),
}

/// Encode a coded index of kind `ci` for `row` of `table`
pub fn coded(ci: CodedIndexType, table: TableId, row: u32) -> u16 {
    let tag = ci
        .tables()
        .iter()
        .position(|candidate| *candidate == table)
        .expect("table is not a target of this coded index");

    ((row << ci.tag_bits()) | tag as u32) as u16
}

/// `TypeDefOrRefOrSpecEncoded` form of a token, as used inside signatures (single byte)
pub fn sig_token(table: TableId, row: u32) -> u8 {
    coded(CodedIndexType::TypeDefOrRef, table, row) as u8
}

/// Builds a metadata blob row by row
#[derive(Default)]
pub struct MetadataBuilder {
    strings: Vec<u8>,
    string_index: HashMap<String, u16>,
    blobs: Vec<u8>,
    tables: BTreeMap<TableId, Vec<Vec<u8>>>,
}

impl MetadataBuilder {
    /// An empty image with the mandatory empty heap entries
    pub fn new() -> Self {
        MetadataBuilder {
            strings: vec![0],
            blobs: vec![0],
            ..Default::default()
        }
    }

    /// Index of `value` in the `#Strings` heap; the empty string is index 0
    pub fn string(&mut self, value: &str) -> u16 {
        if value.is_empty() {
            return 0;
        }
        if let Some(index) = self.string_index.get(value) {
            return *index;
        }

        let index = self.strings.len() as u16;
        self.strings.extend_from_slice(value.as_bytes());
        self.strings.push(0);
        self.string_index.insert(value.to_string(), index);
        index
    }

    /// Index of a new `#Blob` entry holding `data`; empty data is index 0
    pub fn blob(&mut self, data: &[u8]) -> u16 {
        if data.is_empty() {
            return 0;
        }

        let index = self.blobs.len() as u16;
        match data.len() {
            len if len < 0x80 => self.blobs.push(len as u8),
            len => {
                self.blobs.push(0x80 | (len >> 8) as u8);
                self.blobs.push(len as u8);
            }
        }
        self.blobs.extend_from_slice(data);
        index
    }

    /// Append a row to `table`, returning its 1-based rid
    pub fn row(&mut self, table: TableId, columns: &[Col]) -> u32 {
        let mut row = Vec::new();
        for column in columns {
            match column {
                Col::U16(value) => row.extend_from_slice(&value.to_le_bytes()),
                Col::U32(value) => row.extend_from_slice(&value.to_le_bytes()),
            }
        }

        let rows = self.tables.entry(table).or_default();
        rows.push(row);
        rows.len() as u32
    }

    /// `Module` row
    pub fn module(&mut self, name: &str) -> u32 {
        let name = self.string(name);
        self.row(
            TableId::Module,
            &[Col::U16(0), Col::U16(name), Col::U16(0), Col::U16(0), Col::U16(0)],
        )
    }

    /// `Assembly` row
    pub fn assembly(
        &mut self,
        name: &str,
        version: [u16; 4],
        flags: u32,
        public_key: &[u8],
    ) -> u32 {
        let name = self.string(name);
        let public_key = self.blob(public_key);
        self.row(
            TableId::Assembly,
            &[
                Col::U32(0x8004),
                Col::U16(version[0]),
                Col::U16(version[1]),
                Col::U16(version[2]),
                Col::U16(version[3]),
                Col::U32(flags),
                Col::U16(public_key),
                Col::U16(name),
                Col::U16(0),
            ],
        )
    }

    /// `AssemblyRef` row
    pub fn assembly_ref(&mut self, name: &str) -> u32 {
        let name = self.string(name);
        self.row(
            TableId::AssemblyRef,
            &[
                Col::U16(4),
                Col::U16(0),
                Col::U16(0),
                Col::U16(0),
                Col::U32(0),
                Col::U16(0),
                Col::U16(name),
                Col::U16(0),
                Col::U16(0),
            ],
        )
    }

    /// `TypeRef` row; `scope` is an encoded `ResolutionScope`
    pub fn type_ref(&mut self, scope: u16, namespace: &str, name: &str) -> u32 {
        let name = self.string(name);
        let namespace = self.string(namespace);
        self.row(
            TableId::TypeRef,
            &[Col::U16(scope), Col::U16(name), Col::U16(namespace)],
        )
    }

    /// `TypeDef` row; `extends` is an encoded `TypeDefOrRef`
    pub fn type_def(
        &mut self,
        flags: u32,
        namespace: &str,
        name: &str,
        extends: u16,
        method_list: u16,
    ) -> u32 {
        let name = self.string(name);
        let namespace = self.string(namespace);
        self.row(
            TableId::TypeDef,
            &[
                Col::U32(flags),
                Col::U16(name),
                Col::U16(namespace),
                Col::U16(extends),
                Col::U16(1),
                Col::U16(method_list),
            ],
        )
    }

    /// `MethodDef` row
    pub fn method_def(&mut self, flags: u16, name: &str, signature: &[u8], param_list: u16) -> u32 {
        let name = self.string(name);
        let signature = self.blob(signature);
        self.row(
            TableId::MethodDef,
            &[
                Col::U32(0),
                Col::U16(0),
                Col::U16(flags),
                Col::U16(name),
                Col::U16(signature),
                Col::U16(param_list),
            ],
        )
    }

    /// `Param` row
    pub fn param(&mut self, sequence: u16, name: &str) -> u32 {
        let name = self.string(name);
        self.row(TableId::Param, &[Col::U16(0), Col::U16(sequence), Col::U16(name)])
    }

    /// `InterfaceImpl` row; `interface` is an encoded `TypeDefOrRef`
    pub fn interface_impl(&mut self, class: u16, interface: u16) -> u32 {
        self.row(TableId::InterfaceImpl, &[Col::U16(class), Col::U16(interface)])
    }

    /// `PropertyMap` row
    pub fn property_map(&mut self, parent: u16, property_list: u16) -> u32 {
        self.row(TableId::PropertyMap, &[Col::U16(parent), Col::U16(property_list)])
    }

    /// `Property` row
    pub fn property(&mut self, name: &str, signature: &[u8]) -> u32 {
        let name = self.string(name);
        let signature = self.blob(signature);
        self.row(TableId::Property, &[Col::U16(0), Col::U16(name), Col::U16(signature)])
    }

    /// `MethodSemantics` row associating `method` with property `property`
    pub fn property_semantics(&mut self, semantics: u16, method: u16, property: u32) -> u32 {
        let association = coded(CodedIndexType::HasSemantics, TableId::Property, property);
        self.row(
            TableId::MethodSemantics,
            &[Col::U16(semantics), Col::U16(method), Col::U16(association)],
        )
    }

    /// `TypeSpec` row
    pub fn type_spec(&mut self, signature: &[u8]) -> u32 {
        let signature = self.blob(signature);
        self.row(TableId::TypeSpec, &[Col::U16(signature)])
    }

    /// `NestedClass` row
    pub fn nested_class(&mut self, nested: u16, enclosing: u16) -> u32 {
        self.row(TableId::NestedClass, &[Col::U16(nested), Col::U16(enclosing)])
    }

    /// `GenericParam` row owned by `TypeDef` or `MethodDef` row `owner`
    pub fn generic_param(
        &mut self,
        number: u16,
        owner_table: TableId,
        owner: u32,
        name: &str,
    ) -> u32 {
        let owner = coded(CodedIndexType::TypeOrMethodDef, owner_table, owner);
        let name = self.string(name);
        self.row(
            TableId::GenericParam,
            &[Col::U16(number), Col::U16(0), Col::U16(owner), Col::U16(name)],
        )
    }

    /// The `#~` stream
    pub fn tables_stream(&self) -> Vec<u8> {
        let valid = self
            .tables
            .keys()
            .fold(0_u64, |valid, table| valid | (1 << *table as u64));

        let mut stream = vec![0, 0, 0, 0, 2, 0, 0, 1];
        stream.extend_from_slice(&valid.to_le_bytes());
        stream.extend_from_slice(&0_u64.to_le_bytes());
        for rows in self.tables.values() {
            stream.extend_from_slice(&(rows.len() as u32).to_le_bytes());
        }
        for rows in self.tables.values() {
            for row in rows {
                stream.extend_from_slice(row);
            }
        }
        pad(&mut stream);
        stream
    }

    /// The complete metadata blob, starting with the `BSJB` signature
    pub fn build(&self) -> Vec<u8> {
        let mut strings = self.strings.clone();
        pad(&mut strings);
        let mut blobs = self.blobs.clone();
        pad(&mut blobs);

        let streams = [
            ("#~", self.tables_stream()),
            ("#Strings", strings),
            ("#Blob", blobs),
        ];

        let version = b"v4.0.30319\0\0";
        let header_len = 16
            + version.len()
            + 4
            + streams
                .iter()
                .map(|(name, _)| 8 + ((name.len() + 1 + 3) & !3))
                .sum::<usize>();

        let mut metadata = Vec::new();
        metadata.extend_from_slice(&CIL_HEADER_MAGIC.to_le_bytes());
        metadata.extend_from_slice(&1_u16.to_le_bytes());
        metadata.extend_from_slice(&1_u16.to_le_bytes());
        metadata.extend_from_slice(&0_u32.to_le_bytes());
        metadata.extend_from_slice(&(version.len() as u32).to_le_bytes());
        metadata.extend_from_slice(version);
        metadata.extend_from_slice(&0_u16.to_le_bytes());
        metadata.extend_from_slice(&(streams.len() as u16).to_le_bytes());

        let mut offset = header_len;
        for (name, data) in &streams {
            metadata.extend_from_slice(&(offset as u32).to_le_bytes());
            metadata.extend_from_slice(&(data.len() as u32).to_le_bytes());
            let mut padded_name = name.as_bytes().to_vec();
            padded_name.push(0);
            pad(&mut padded_name);
            metadata.extend_from_slice(&padded_name);
            offset += data.len();
        }

        for (_, data) in &streams {
            metadata.extend_from_slice(data);
        }
        metadata
    }
}

fn pad(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{tables::TypeDefRaw, view::MetadataView};

    #[test]
    fn round_trip_through_view() {
        let mut builder = MetadataBuilder::new();
        builder.module("Sample.dll");
        builder.type_def(0, "", "<Module>", 0, 1);
        builder.type_def(1, "N", "Foo", 0, 1);

        let metadata = builder.build();
        let view = MetadataView::from_metadata(&metadata).unwrap();

        assert_eq!(view.root.version, "v4.0.30319");
        assert_eq!(view.tables.row_count(TableId::TypeDef), 2);

        let table = view.tables.table::<TypeDefRaw>().unwrap();
        let foo = table.get(2).unwrap();
        assert_eq!(view.strings.get(foo.type_name as usize).unwrap(), "Foo");
        assert_eq!(view.strings.get(foo.type_namespace as usize).unwrap(), "N");
        assert_eq!(foo.flags, 1);
    }

    #[test]
    fn coded_indexes() {
        assert_eq!(coded(CodedIndexType::TypeDefOrRef, TableId::TypeRef, 6), 25);
        assert_eq!(coded(CodedIndexType::ResolutionScope, TableId::AssemblyRef, 1), 6);
        assert_eq!(coded(CodedIndexType::HasSemantics, TableId::Property, 1), 3);
        assert_eq!(coded(CodedIndexType::TypeOrMethodDef, TableId::TypeDef, 5), 10);
    }
}
