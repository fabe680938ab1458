//! Element kinds of numeric arrays.

use bytemuck::Pod;
use std::fmt;

/// Element kind of a [`DataArray`](crate::core::DataArray).
///
/// Mirrors the numeric VTK array types the web consumer understands, plus
/// the 64-bit index type used for cell connectivity, which is narrowed to
/// `Uint32` before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DataType {
    /// Signed 8-bit integer (VTK_CHAR)
    Int8 = 2,
    /// Unsigned 8-bit integer (VTK_UNSIGNED_CHAR)
    Uint8 = 3,
    /// Signed 16-bit integer (VTK_SHORT)
    Int16 = 4,
    /// Unsigned 16-bit integer (VTK_UNSIGNED_SHORT)
    Uint16 = 5,
    /// Signed 32-bit integer (VTK_INT)
    Int32 = 6,
    /// Unsigned 32-bit integer (VTK_UNSIGNED_INT)
    Uint32 = 7,
    /// 32-bit floating point (VTK_FLOAT)
    Float32 = 10,
    /// 64-bit floating point (VTK_DOUBLE)
    Float64 = 11,
    /// Signed 64-bit index type (VTK_ID_TYPE)
    IdType = 12,
}

impl DataType {
    /// All element kinds, in VTK type-code order.
    pub const ALL: [DataType; 9] = [
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
        Self::IdType,
    ];

    /// Size in bytes of one element as held in memory.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 | Self::IdType => 8,
        }
    }

    /// Kind the element is stored as inside the archive.
    #[inline]
    pub const fn stored(self) -> Self {
        match self {
            Self::IdType => Self::Uint32,
            other => other,
        }
    }

    /// Typed-array name the web consumer uses to decode a blob.
    #[inline]
    pub const fn js_name(self) -> &'static str {
        match self.stored() {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 | Self::IdType => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }

    /// Parse a typed-array name back into the stored kind.
    pub fn from_js_name(name: &str) -> Option<Self> {
        Some(match name {
            "Int8Array" => Self::Int8,
            "Uint8Array" => Self::Uint8,
            "Int16Array" => Self::Int16,
            "Uint16Array" => Self::Uint16,
            "Int32Array" => Self::Int32,
            "Uint32Array" => Self::Uint32,
            "Float32Array" => Self::Float32,
            "Float64Array" => Self::Float64,
            _ => return None,
        })
    }

    /// VTK type code.
    #[inline]
    pub const fn vtk_code(self) -> u8 {
        self as u8
    }

    /// Returns true for floating point kinds.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8 => "char",
            Self::Uint8 => "unsigned_char",
            Self::Int16 => "short",
            Self::Uint16 => "unsigned_short",
            Self::Int32 => "int",
            Self::Uint32 => "unsigned_int",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::IdType => "idtype",
        };
        f.write_str(name)
    }
}

// === Element trait for type-safe construction ===

/// Rust primitive types that can back a data array.
pub trait ArrayElement: Pod + Copy + Default + PartialOrd {
    /// The corresponding element kind.
    const DATA_TYPE: DataType;

    /// Widen to f64 for range computation.
    fn to_f64(self) -> f64;
}

macro_rules! impl_array_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl ArrayElement for $t {
                const DATA_TYPE: DataType = DataType::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_array_element! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
    i64 => IdType,
}
