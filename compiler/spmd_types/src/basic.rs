//! Basic (atomic) type kinds.

/// The primitive kinds an atomic type can have.
///
/// Declaration order is the implicit-conversion generality order: when two
/// different atomics meet in a binary operation, the later one wins.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BasicKind {
    Void,
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float,
    Int64,
    UInt64,
    Double,
}

impl BasicKind {
    /// The eleven non-void kinds, least general first.
    pub const NON_VOID: [BasicKind; 11] = [
        BasicKind::Bool,
        BasicKind::Int8,
        BasicKind::UInt8,
        BasicKind::Int16,
        BasicKind::UInt16,
        BasicKind::Int32,
        BasicKind::UInt32,
        BasicKind::Float,
        BasicKind::Int64,
        BasicKind::UInt64,
        BasicKind::Double,
    ];

    pub const fn is_bool(self) -> bool {
        matches!(self, BasicKind::Bool)
    }

    pub const fn is_int(self) -> bool {
        matches!(
            self,
            BasicKind::Int8
                | BasicKind::UInt8
                | BasicKind::Int16
                | BasicKind::UInt16
                | BasicKind::Int32
                | BasicKind::UInt32
                | BasicKind::Int64
                | BasicKind::UInt64
        )
    }

    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            BasicKind::UInt8 | BasicKind::UInt16 | BasicKind::UInt32 | BasicKind::UInt64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, BasicKind::Float | BasicKind::Double)
    }

    /// Storage width in bits. `bool` is a single bit at the machine level
    /// and `void` has no storage.
    pub const fn bits(self) -> u32 {
        match self {
            BasicKind::Void => 0,
            BasicKind::Bool => 1,
            BasicKind::Int8 | BasicKind::UInt8 => 8,
            BasicKind::Int16 | BasicKind::UInt16 => 16,
            BasicKind::Int32 | BasicKind::UInt32 | BasicKind::Float => 32,
            BasicKind::Int64 | BasicKind::UInt64 | BasicKind::Double => 64,
        }
    }

    /// 64-bit kinds fill a native vector register with half as many lanes.
    pub const fn is_64bit(self) -> bool {
        self.bits() == 64
    }

    /// Unsigned counterpart of an integer kind. Unsigned kinds map to
    /// themselves; non-integers have none.
    pub const fn to_unsigned(self) -> Option<BasicKind> {
        match self {
            BasicKind::Int8 | BasicKind::UInt8 => Some(BasicKind::UInt8),
            BasicKind::Int16 | BasicKind::UInt16 => Some(BasicKind::UInt16),
            BasicKind::Int32 | BasicKind::UInt32 => Some(BasicKind::UInt32),
            BasicKind::Int64 | BasicKind::UInt64 => Some(BasicKind::UInt64),
            _ => None,
        }
    }

    /// Source-language spelling.
    pub const fn source_name(self) -> &'static str {
        match self {
            BasicKind::Void => "void",
            BasicKind::Bool => "bool",
            BasicKind::Int8 => "int8",
            BasicKind::UInt8 => "unsigned int8",
            BasicKind::Int16 => "int16",
            BasicKind::UInt16 => "unsigned int16",
            BasicKind::Int32 => "int32",
            BasicKind::UInt32 => "unsigned int32",
            BasicKind::Float => "float",
            BasicKind::Int64 => "int64",
            BasicKind::UInt64 => "unsigned int64",
            BasicKind::Double => "double",
        }
    }

    /// C spelling used in generated headers.
    pub const fn c_name(self) -> &'static str {
        match self {
            BasicKind::Void => "void",
            BasicKind::Bool => "bool",
            BasicKind::Int8 => "int8_t",
            BasicKind::UInt8 => "uint8_t",
            BasicKind::Int16 => "int16_t",
            BasicKind::UInt16 => "uint16_t",
            BasicKind::Int32 => "int32_t",
            BasicKind::UInt32 => "uint32_t",
            BasicKind::Float => "float",
            BasicKind::Int64 => "int64_t",
            BasicKind::UInt64 => "uint64_t",
            BasicKind::Double => "double",
        }
    }

    /// Name recorded in debug information.
    pub const fn debug_name(self) -> &'static str {
        match self {
            BasicKind::Void => "void",
            BasicKind::Bool => "bool",
            BasicKind::Int8 => "int8",
            BasicKind::UInt8 => "uint8",
            BasicKind::Int16 => "int16",
            BasicKind::UInt16 => "uint16",
            BasicKind::Int32 => "int32",
            BasicKind::UInt32 => "uint32",
            BasicKind::Float => "float",
            BasicKind::Int64 => "int64",
            BasicKind::UInt64 => "uint64",
            BasicKind::Double => "double",
        }
    }

    /// Single-character code used in mangled names.
    pub const fn mangle_code(self) -> char {
        match self {
            BasicKind::Void => 'v',
            BasicKind::Bool => 'b',
            BasicKind::Int8 => 't',
            BasicKind::UInt8 => 'T',
            BasicKind::Int16 => 's',
            BasicKind::UInt16 => 'S',
            BasicKind::Int32 => 'i',
            BasicKind::UInt32 => 'u',
            BasicKind::Float => 'f',
            BasicKind::Int64 => 'I',
            BasicKind::UInt64 => 'U',
            BasicKind::Double => 'd',
        }
    }
}
