use crate::metadata::token::Token;

#[allow(non_snake_case)]
/// Element type codes of signature blobs, ECMA-335 II.23.1.16
pub mod ELEMENT_TYPE {
    /// Marks the end of a list
    pub const END: u8 = 0x00;
    /// `void`
    pub const VOID: u8 = 0x01;
    /// `bool`
    pub const BOOLEAN: u8 = 0x02;
    /// `char`
    pub const CHAR: u8 = 0x03;
    /// `sbyte`
    pub const I1: u8 = 0x04;
    /// `byte`
    pub const U1: u8 = 0x05;
    /// `short`
    pub const I2: u8 = 0x06;
    /// `ushort`
    pub const U2: u8 = 0x07;
    /// `int`
    pub const I4: u8 = 0x08;
    /// `uint`
    pub const U4: u8 = 0x09;
    /// `long`
    pub const I8: u8 = 0x0a;
    /// `ulong`
    pub const U8: u8 = 0x0b;
    /// `float`
    pub const R4: u8 = 0x0c;
    /// `double`
    pub const R8: u8 = 0x0d;
    /// `string`
    pub const STRING: u8 = 0x0e;
    /// Unmanaged pointer, followed by a type
    pub const PTR: u8 = 0x0f;
    /// Managed reference, followed by a type
    pub const BYREF: u8 = 0x10;
    /// Value type, followed by a `TypeDefOrRefOrSpecEncoded` token
    pub const VALUETYPE: u8 = 0x11;
    /// Reference type, followed by a `TypeDefOrRefOrSpecEncoded` token
    pub const CLASS: u8 = 0x12;
    /// Generic parameter of the enclosing type
    pub const VAR: u8 = 0x13;
    /// General array with rank and bounds
    pub const ARRAY: u8 = 0x14;
    /// Generic instantiation
    pub const GENERICINST: u8 = 0x15;
    /// Typed reference
    pub const TYPEDBYREF: u8 = 0x16;
    /// `System.IntPtr`
    pub const I: u8 = 0x18;
    /// `System.UIntPtr`
    pub const U: u8 = 0x19;
    /// Function pointer, followed by a method signature
    pub const FNPTR: u8 = 0x1b;
    /// `System.Object`
    pub const OBJECT: u8 = 0x1c;
    /// Single-dimension, zero-based array
    pub const SZARRAY: u8 = 0x1d;
    /// Generic parameter of the enclosing method
    pub const MVAR: u8 = 0x1e;
    /// Required custom modifier
    pub const CMOD_REQD: u8 = 0x1f;
    /// Optional custom modifier
    pub const CMOD_OPT: u8 = 0x20;
    /// Used inside the CLI only
    pub const INTERNAL: u8 = 0x21;
    /// Start of the vararg part of a call site signature
    pub const SENTINEL: u8 = 0x41;
    /// Pinned local
    pub const PINNED: u8 = 0x45;
}

/// A decoded type from a signature blob
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeSignature {
    /// Placeholder for an absent type
    #[default]
    Unknown,
    /// `void`
    Void,
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `sbyte`
    I1,
    /// `byte`
    U1,
    /// `short`
    I2,
    /// `ushort`
    U2,
    /// `int`
    I4,
    /// `uint`
    U4,
    /// `long`
    I8,
    /// `ulong`
    U8,
    /// `float`
    R4,
    /// `double`
    R8,
    /// `string`
    String,
    /// `object`
    Object,
    /// `System.IntPtr`
    I,
    /// `System.UIntPtr`
    U,
    /// `System.TypedReference`
    TypedByRef,
    /// Unmanaged pointer
    Ptr(SignaturePointer),
    /// Managed reference
    ByRef(Box<TypeSignature>),
    /// Value type given by a `TypeDef`, `TypeRef` or `TypeSpec` token
    ValueType(Token),
    /// Reference type given by a `TypeDef`, `TypeRef` or `TypeSpec` token
    Class(Token),
    /// Generic parameter of the enclosing type, by position
    GenericParamType(u32),
    /// Generic parameter of the enclosing method, by position
    GenericParamMethod(u32),
    /// General array
    Array(SignatureArray),
    /// Single-dimension, zero-based array
    SzArray(SignatureSzArray),
    /// Generic instantiation: the generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
    /// Pinned local
    Pinned(Box<TypeSignature>),
}

/// A general array type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureArray {
    /// The element type
    pub base: Box<TypeSignature>,
    /// Number of dimensions
    pub rank: u32,
}

/// A single-dimension, zero-based array type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureSzArray {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The element type
    pub base: Box<TypeSignature>,
}

/// An unmanaged pointer type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignaturePointer {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The type pointed to
    pub base: Box<TypeSignature>,
}

/// Parameter or return type with optional custom modifiers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureParameter {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// Parameter is passed by reference
    pub by_ref: bool,
    /// The type of the parameter
    pub base: TypeSignature,
}

/// Method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureMethod {
    /// Instance method
    pub has_this: bool,
    /// The `this` pointer is explicitly listed as first parameter
    pub explicit_this: bool,
    /// Uses the `vararg` calling convention
    pub vararg: bool,
    /// Number of generic parameters of the method
    pub param_count_generic: u32,
    /// Declared number of parameters
    pub param_count: u32,
    /// The return type
    pub return_type: SignatureParameter,
    /// The fixed parameters
    pub params: Vec<SignatureParameter>,
    /// Parameters following the vararg sentinel
    pub varargs: Vec<SignatureParameter>,
}

/// Property signature (II.23.2.5)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The property type
    pub base: TypeSignature,
    /// Index parameters
    pub params: Vec<SignatureParameter>,
}

/// Type specification signature (II.23.2.14)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureTypeSpec {
    /// The specified type
    pub base: TypeSignature,
}
