//! Typed access to the elements of one attribute of one vertex.

use half::f16;

use super::decl::{AttribFormat, AttribType, MAX_ATTRIB_COUNT};

const MAX: usize = MAX_ATTRIB_COUNT as usize;

/// The elements of one attribute of one vertex.
///
/// `uint10`, `int16` and `half` elements share the [`Uint16`](Self::Uint16)
/// variant and hold their raw 16-bit patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttribValues {
    /// `uint8` elements.
    Uint8 { values: [u8; MAX], count: usize },
    /// Raw 16-bit elements.
    Uint16 { values: [u16; MAX], count: usize },
    /// `float` elements.
    Float { values: [f32; MAX], count: usize },
}

impl AttribValues {
    /// Create a zeroed value group for the given type.
    pub(crate) fn zeroed(ty: AttribType) -> Self {
        match ty {
            AttribType::Uint8 => Self::Uint8 {
                values: [0; MAX],
                count: 0,
            },
            AttribType::Uint10 | AttribType::Int16 | AttribType::Half => Self::Uint16 {
                values: [0; MAX],
                count: 0,
            },
            AttribType::Float => Self::Float {
                values: [0.0; MAX],
                count: 0,
            },
        }
    }

    /// Decode elements from little-endian bytes.
    ///
    /// `bytes` must hold at least `format.size()` bytes.
    pub(crate) fn from_bytes(format: &AttribFormat, bytes: &[u8]) -> Self {
        let count = (format.count as usize).min(MAX);
        let mut group = Self::zeroed(format.ty);
        match &mut group {
            Self::Uint8 { values, .. } => {
                values[..count].copy_from_slice(&bytes[..count]);
            }
            Self::Uint16 { values, .. } => {
                for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(2)).take(count) {
                    *value = u16::from_le_bytes([chunk[0], chunk[1]]);
                }
            }
            Self::Float { values, .. } => {
                for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)).take(count) {
                    *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
            }
        }
        group.set_len(count);
        group
    }

    /// Append one element. Integer values are truncated to the element width.
    ///
    /// Returns `false` when the group is already full.
    pub(crate) fn push_int(&mut self, value: u32) -> bool {
        match self {
            Self::Uint8 { values, count } if *count < MAX => {
                values[*count] = value as u8;
                *count += 1;
                true
            }
            Self::Uint16 { values, count } if *count < MAX => {
                values[*count] = value as u16;
                *count += 1;
                true
            }
            _ => false,
        }
    }

    /// Append one float element.
    ///
    /// Returns `false` when the group is full or not a float group.
    pub(crate) fn push_float(&mut self, value: f32) -> bool {
        match self {
            Self::Float { values, count } if *count < MAX => {
                values[*count] = value;
                *count += 1;
                true
            }
            _ => false,
        }
    }

    /// Append the group's elements to `out` as little-endian bytes.
    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>) {
        match self {
            Self::Uint8 { values, count } => out.extend_from_slice(&values[..*count]),
            Self::Uint16 { values, count } => {
                for value in &values[..*count] {
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
            Self::Float { values, count } => {
                for value in &values[..*count] {
                    out.extend_from_slice(&value.to_le_bytes());
                }
            }
        }
    }

    fn set_len(&mut self, len: usize) {
        match self {
            Self::Uint8 { count, .. } | Self::Uint16 { count, .. } | Self::Float { count, .. } => {
                *count = len;
            }
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Uint8 { count, .. } | Self::Uint16 { count, .. } | Self::Float { count, .. } => {
                *count
            }
        }
    }

    /// Whether the group holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `uint8` elements, if this is a `uint8` group.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Self::Uint8 { values, count } => Some(&values[..*count]),
            _ => None,
        }
    }

    /// The raw 16-bit elements, if this is a 16-bit group.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Self::Uint16 { values, count } => Some(&values[..*count]),
            _ => None,
        }
    }

    /// The float elements, if this is a `float` group.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::Float { values, count } => Some(&values[..*count]),
            _ => None,
        }
    }

    /// Convert the elements to floats the way a shader would see them.
    ///
    /// Half elements are decoded, `int16` is read as signed and the
    /// normalized flag maps integers to `[0, 1]` (unsigned) or `[-1, 1]`
    /// (signed).
    pub fn to_f32(&self, format: &AttribFormat) -> Vec<f32> {
        match (self, format.ty) {
            (Self::Float { values, count }, _) => values[..*count].to_vec(),
            (Self::Uint8 { values, count }, _) => values[..*count]
                .iter()
                .map(|&v| {
                    if format.normalized {
                        v as f32 / u8::MAX as f32
                    } else {
                        v as f32
                    }
                })
                .collect(),
            (Self::Uint16 { values, count }, AttribType::Half) => values[..*count]
                .iter()
                .map(|&bits| f16::from_bits(bits).to_f32())
                .collect(),
            (Self::Uint16 { values, count }, AttribType::Int16) => values[..*count]
                .iter()
                .map(|&bits| {
                    let v = bits as i16;
                    if format.normalized {
                        (v as f32 / i16::MAX as f32).max(-1.0)
                    } else {
                        v as f32
                    }
                })
                .collect(),
            (Self::Uint16 { values, count }, _) => values[..*count]
                .iter()
                .map(|&v| {
                    if format.normalized {
                        (v & 0x3ff) as f32 / 1023.0
                    } else {
                        v as f32
                    }
                })
                .collect(),
        }
    }
}
