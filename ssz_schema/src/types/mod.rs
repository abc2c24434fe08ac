mod basic;
mod bitfield;
mod bytes;
mod container;
mod list;
mod offsets;
mod vector;

use crate::value::Value;
use crate::{Error, ErrorKind};
use ethereum_types::H256;

pub use basic::{BoolType, UintType};
pub use bitfield::{BitListType, BitVectorType};
pub use bytes::{ByteListType, ByteVectorType};
pub use container::{ContainerType, Field};
pub use list::ListType;
pub use vector::VectorType;

/// A runtime SSZ type descriptor.
///
/// The set of descriptor kinds is closed, so composition dispatches
/// over this enum rather than through trait objects; composites hold
/// their children as further `SszType`s and every operation recurses
/// through the same surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SszType {
    Bool(BoolType),
    Uint(UintType),
    ByteVector(ByteVectorType),
    ByteList(ByteListType),
    BitVector(BitVectorType),
    BitList(BitListType),
    Vector(VectorType),
    List(ListType),
    Container(ContainerType),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $call:expr) => {
        match $self {
            SszType::Bool($inner) => $call,
            SszType::Uint($inner) => $call,
            SszType::ByteVector($inner) => $call,
            SszType::ByteList($inner) => $call,
            SszType::BitVector($inner) => $call,
            SszType::BitList($inner) => $call,
            SszType::Vector($inner) => $call,
            SszType::List($inner) => $call,
            SszType::Container($inner) => $call,
        }
    };
}

impl SszType {
    pub fn bool() -> Self {
        SszType::Bool(BoolType)
    }

    /// A little-endian unsigned integer of the given bit width.
    ///
    /// Widths outside {8, 16, 32, 64} are rejected.
    pub fn uint(bits: usize) -> Result<Self, Error> {
        UintType::new(bits).map(SszType::Uint)
    }

    pub fn uint8() -> Self {
        SszType::Uint(UintType { bits: 8 })
    }

    pub fn uint16() -> Self {
        SszType::Uint(UintType { bits: 16 })
    }

    pub fn uint32() -> Self {
        SszType::Uint(UintType { bits: 32 })
    }

    pub fn uint64() -> Self {
        SszType::Uint(UintType { bits: 64 })
    }

    pub fn byte_vector(length: usize) -> Result<Self, Error> {
        ByteVectorType::new(length).map(SszType::ByteVector)
    }

    pub fn byte_list(limit: usize) -> Result<Self, Error> {
        ByteListType::new(limit).map(SszType::ByteList)
    }

    pub fn bit_vector(length: usize) -> Result<Self, Error> {
        BitVectorType::new(length).map(SszType::BitVector)
    }

    pub fn bit_list(limit: usize) -> Result<Self, Error> {
        BitListType::new(limit).map(SszType::BitList)
    }

    pub fn vector(element: SszType, length: usize) -> Result<Self, Error> {
        VectorType::new(element, length).map(SszType::Vector)
    }

    pub fn list(element: SszType, limit: usize) -> Result<Self, Error> {
        ListType::new(element, limit).map(SszType::List)
    }

    pub fn container(name: &str, fields: Vec<Field>) -> Result<Self, Error> {
        ContainerType::new(name, fields).map(SszType::Container)
    }

    /// Human-readable tag used to locate failures in nested values.
    pub fn name(&self) -> String {
        dispatch!(self, inner => inner.name())
    }

    /// The zero/empty value of this type.
    pub fn default_value(&self) -> Value {
        dispatch!(self, inner => inner.default_value())
    }

    pub fn is_variable_size(&self) -> bool {
        dispatch!(self, inner => inner.is_variable_size())
    }

    /// Serialized byte length of every value of this type, or 0 for
    /// variable-size types.
    pub fn fixed_size(&self) -> usize {
        dispatch!(self, inner => inner.fixed_size())
    }

    /// True for `Bool` and `Uint`, the only types whose hash tree
    /// leaves pack several values into one chunk.
    pub fn is_basic(&self) -> bool {
        match self {
            SszType::Bool(_) | SszType::Uint(_) => true,
            _ => false,
        }
    }

    /// Serialized byte length of `value`.
    pub fn size(&self, value: &Value) -> Result<usize, Error> {
        dispatch!(self, inner => inner.size(value)).map_err(|e| e.in_type(self.name()))
    }

    /// Writes the serialization of `value` at `buf[start..]`.
    ///
    /// The buffer must hold at least `start + size(value)` bytes and
    /// the write panics otherwise; [`SszType::serialize`] sizes the
    /// buffer itself.
    pub fn serialize_to(&self, value: &Value, buf: &mut [u8], start: usize) -> Result<(), Error> {
        dispatch!(self, inner => inner.serialize_to(value, buf, start))
            .map_err(|e| e.in_type(self.name()))
    }

    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; self.size(value)?];
        self.serialize_to(value, &mut buf, 0)?;
        Ok(buf)
    }

    /// Parses the byte range `bytes[start..end]` into a value,
    /// validating every length, offset and padding rule on the way.
    pub fn deserialize_from(&self, bytes: &[u8], start: usize, end: usize) -> Result<Value, Error> {
        if start > end || end > bytes.len() {
            return Err(Error::from(ErrorKind::OutOfBounds {
                i: end,
                len: bytes.len(),
            })
            .in_type(self.name()));
        }

        dispatch!(self, inner => inner.deserialize_from(bytes, start, end))
            .map_err(|e| e.in_type(self.name()))
    }

    pub fn deserialize(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.deserialize_from(bytes, 0, bytes.len())
    }

    /// The 32-byte Merkle root of `value` under this type.
    pub fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        dispatch!(self, inner => inner.hash_tree_root(value)).map_err(|e| e.in_type(self.name()))
    }
}
