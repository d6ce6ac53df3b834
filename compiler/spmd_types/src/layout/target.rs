//! Compilation target settings that affect type layout.

use std::fmt;

/// Invalid [`Target`] parameters.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TargetError {
    /// Gang or native width is zero or not a power of two.
    InvalidWidth { field: &'static str, value: u32 },
    /// Mask elements must be 1, 8, 16, 32 or 64 bits.
    InvalidMaskBits(u32),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::InvalidWidth { field, value } => {
                write!(f, "{field} must be a non-zero power of two, got {value}")
            }
            TargetError::InvalidMaskBits(bits) => {
                write!(f, "mask element width must be 1, 8, 16, 32 or 64 bits, got {bits}")
            }
        }
    }
}

impl std::error::Error for TargetError {}

/// Layout-relevant properties of the compilation target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    /// Program instances per gang; the lane count of varying values.
    vector_width: u32,
    /// Native SIMD register width, counted in 32-bit elements.
    native_vector_width: u32,
    /// Pointers are 32 bits wide instead of 64.
    is_32bit: bool,
    /// Element width of the execution mask vector.
    mask_bits: u32,
}

impl Target {
    pub fn new(
        vector_width: u32,
        native_vector_width: u32,
        is_32bit: bool,
        mask_bits: u32,
    ) -> Result<Self, TargetError> {
        check_width("vector_width", vector_width)?;
        check_width("native_vector_width", native_vector_width)?;
        if !matches!(mask_bits, 1 | 8 | 16 | 32 | 64) {
            return Err(TargetError::InvalidMaskBits(mask_bits));
        }
        Ok(Target {
            vector_width,
            native_vector_width,
            is_32bit,
            mask_bits,
        })
    }

    /// 4-wide SSE4 with a 32-bit-per-lane mask.
    pub const fn sse4() -> Self {
        Target {
            vector_width: 4,
            native_vector_width: 4,
            is_32bit: false,
            mask_bits: 32,
        }
    }

    /// 8-wide AVX with a 32-bit-per-lane mask.
    pub const fn avx() -> Self {
        Target {
            vector_width: 8,
            native_vector_width: 8,
            is_32bit: false,
            mask_bits: 32,
        }
    }

    /// 16-wide AVX-512 with a one-bit-per-lane mask.
    pub const fn avx512() -> Self {
        Target {
            vector_width: 16,
            native_vector_width: 16,
            is_32bit: false,
            mask_bits: 1,
        }
    }

    #[must_use]
    pub const fn with_32bit_pointers(mut self) -> Self {
        self.is_32bit = true;
        self
    }

    pub const fn vector_width(&self) -> u32 {
        self.vector_width
    }

    pub const fn native_vector_width(&self) -> u32 {
        self.native_vector_width
    }

    pub const fn is_32bit(&self) -> bool {
        self.is_32bit
    }

    pub const fn mask_bits(&self) -> u32 {
        self.mask_bits
    }

    pub const fn pointer_bits(&self) -> u32 {
        if self.is_32bit {
            32
        } else {
            64
        }
    }

    /// Native register lanes for elements of `elem_bits`. 64-bit elements
    /// fit half as many.
    pub const fn native_lanes(&self, elem_bits: u32) -> u32 {
        if elem_bits == 64 {
            let half = self.native_vector_width / 2;
            if half == 0 {
                1
            } else {
                half
            }
        } else {
            self.native_vector_width
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::sse4()
    }
}

fn check_width(field: &'static str, value: u32) -> Result<(), TargetError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(TargetError::InvalidWidth { field, value })
    }
}
