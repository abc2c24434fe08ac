//! Runtime SSZ type descriptors.
//!
//! An [`SszType`] describes the shape of an SSZ value; descriptors
//! compose freely (a container of lists of containers of bitlists is
//! still a descriptor) and every one of them offers the same four
//! operations: size, serialize, deserialize and hash tree root. The
//! payloads they operate on are dynamic [`Value`]s, so a single
//! descriptor tree can drive arbitrarily nested data without the
//! caller committing to concrete Rust types; [`Typed`] recovers a
//! statically typed surface where one is wanted.

mod bitarray;
mod macros;
mod typed;
mod types;
mod value;

use std::fmt;

pub use bitarray::BitArray;
pub use ethereum_types::H256;
pub use typed::{SszValue, Typed};
pub use types::{
    BitListType, BitVectorType, BoolType, ByteListType, ByteVectorType, ContainerType, Field,
    ListType, SszType, UintType, VectorType,
};
pub use value::Value;

/// The number of bytes occupied by a serialized offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// The reason an operation failed, without its location.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// The value is not of the shape the descriptor expects.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A list-kind value holds more elements or bits than its limit.
    LengthExceedsLimit { len: usize, limit: usize },
    /// A vector-kind value has the wrong count, or a fixed-size
    /// deserialization input has the wrong byte length.
    LengthMismatch { len: usize, expected: usize },
    /// An unsigned integer does not fit the declared width.
    OutOfRange { value: u64, max: u64 },
    /// A boolean byte was neither 0 nor 1.
    InvalidBool { byte: u8 },
    /// An offset slot was unreadable, pointed outside the buffer,
    /// into the fixed region, or did not increase strictly.
    InvalidOffset { offset: usize },
    /// A bitlist had no delimiter bit, or its derived length exceeds
    /// the limit.
    InvalidBitList,
    /// A bitvector input has bits set past its declared length.
    ExtraneousBits,
    /// An input length is not a multiple of the required element or
    /// offset size.
    Unaligned { len: usize, modulus: usize },
    /// A uint descriptor was requested with a width outside
    /// {8, 16, 32, 64}.
    UnsupportedWidth { bits: usize },
    /// A descriptor was declared with a zero length, limit or field
    /// count.
    ZeroLength,
    /// A bit index fell outside a `BitArray`.
    OutOfBounds { i: usize, len: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            ErrorKind::LengthExceedsLimit { len, limit } => {
                write!(f, "length exceeds limit: {} > {}", len, limit)
            }
            ErrorKind::LengthMismatch { len, expected } => {
                write!(f, "length mismatch: {} != {}", len, expected)
            }
            ErrorKind::OutOfRange { value, max } => {
                write!(f, "value out of range: {} > {}", value, max)
            }
            ErrorKind::InvalidBool { byte } => write!(f, "invalid boolean byte: {}", byte),
            ErrorKind::InvalidOffset { offset } => write!(f, "invalid offset: {}", offset),
            ErrorKind::InvalidBitList => write!(f, "invalid bitlist encoding"),
            ErrorKind::ExtraneousBits => write!(f, "extraneous bits set past declared length"),
            ErrorKind::Unaligned { len, modulus } => {
                write!(f, "length {} is not a multiple of {}", len, modulus)
            }
            ErrorKind::UnsupportedWidth { bits } => {
                write!(f, "unsupported uint width: {} bits", bits)
            }
            ErrorKind::ZeroLength => write!(f, "length, limit or field count must be positive"),
            ErrorKind::OutOfBounds { i, len } => {
                write!(f, "bit index out of bounds: {} >= {}", i, len)
            }
        }
    }
}

/// An [`ErrorKind`] wrapped with the trail of descriptor names it
/// bubbled through, innermost last.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    trail: Vec<String>,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The descriptor names the error passed on its way out,
    /// outermost first.
    pub fn trail(&self) -> impl Iterator<Item = &str> {
        self.trail.iter().rev().map(String::as_str)
    }

    pub(crate) fn in_type(mut self, name: String) -> Self {
        self.trail.push(name);
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, trail: vec![] }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.trail() {
            write!(f, "{}: ", name)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {}
