use strum::{EnumCount, EnumIter};

/// Identifiers of the metadata tables that may appear in an assembly's `#~` or `#-` stream
///
/// The discriminant is the table number from ECMA-335 II.22, which is also the high byte
/// of every token pointing into that table.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    /// Current module descriptor
    Module = 0x00,
    /// References to types defined in other modules or assemblies
    TypeRef = 0x01,
    /// Types defined in this module
    TypeDef = 0x02,
    /// Field indirection, only present in unoptimized metadata
    FieldPtr = 0x03,
    /// Field definitions
    Field = 0x04,
    /// Method indirection, only present in unoptimized metadata
    MethodPtr = 0x05,
    /// Method definitions
    MethodDef = 0x06,
    /// Parameter indirection, only present in unoptimized metadata
    ParamPtr = 0x07,
    /// Parameter definitions
    Param = 0x08,
    /// Interfaces implemented by types
    InterfaceImpl = 0x09,
    /// References to members of other types
    MemberRef = 0x0A,
    /// Constant values of fields, parameters and properties
    Constant = 0x0B,
    /// Custom attribute instances
    CustomAttribute = 0x0C,
    /// Marshalling descriptors
    FieldMarshal = 0x0D,
    /// Declarative security
    DeclSecurity = 0x0E,
    /// Explicit class layout
    ClassLayout = 0x0F,
    /// Explicit field offsets
    FieldLayout = 0x10,
    /// Stand-alone signatures
    StandAloneSig = 0x11,
    /// Map from types to their events
    EventMap = 0x12,
    /// Event indirection, only present in unoptimized metadata
    EventPtr = 0x13,
    /// Event definitions
    Event = 0x14,
    /// Map from types to their properties
    PropertyMap = 0x15,
    /// Property indirection, only present in unoptimized metadata
    PropertyPtr = 0x16,
    /// Property definitions
    Property = 0x17,
    /// Links between properties/events and their accessor methods
    MethodSemantics = 0x18,
    /// Explicit method overrides
    MethodImpl = 0x19,
    /// References to other modules
    ModuleRef = 0x1A,
    /// Type specifications (constructed types)
    TypeSpec = 0x1B,
    /// P/Invoke mappings
    ImplMap = 0x1C,
    /// Initial data locations of fields
    FieldRVA = 0x1D,
    /// Edit-and-continue log
    EncLog = 0x1E,
    /// Edit-and-continue map
    EncMap = 0x1F,
    /// The assembly manifest
    Assembly = 0x20,
    /// Unused processor information
    AssemblyProcessor = 0x21,
    /// Unused operating system information
    AssemblyOS = 0x22,
    /// Referenced assemblies
    AssemblyRef = 0x23,
    /// Unused processor information for references
    AssemblyRefProcessor = 0x24,
    /// Unused operating system information for references
    AssemblyRefOS = 0x25,
    /// Files of a multi-file assembly
    File = 0x26,
    /// Types exported from other modules
    ExportedType = 0x27,
    /// Manifest resources
    ManifestResource = 0x28,
    /// Nesting relationships between types
    NestedClass = 0x29,
    /// Generic parameters of types and methods
    GenericParam = 0x2A,
    /// Generic method instantiations
    MethodSpec = 0x2B,
    /// Constraints on generic parameters
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// High byte of tokens pointing into this table
    #[must_use]
    pub fn token_base(self) -> u32 {
        (self as u32) << 24
    }
}
