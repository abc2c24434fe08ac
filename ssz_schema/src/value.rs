use crate::bitarray::BitArray;
use crate::ErrorKind;
use serde_derive::{Deserialize, Serialize};

/// A dynamic SSZ payload.
///
/// Descriptors take and produce `Value`s so that composition never has
/// to know the concrete Rust type behind a child. Structural equality
/// via `PartialEq` is the notion of equality every round-trip law in
/// this crate is stated against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    /// Any unsigned integer; the descriptor's declared width is
    /// enforced when encoding.
    Uint(u64),
    /// Payload of `ByteVector` and `ByteList`.
    Bytes(Vec<u8>),
    /// Payload of `BitVector` and `BitList`.
    Bits(BitArray),
    /// Elements of a `Vector` or `List`, in order.
    Sequence(Vec<Value>),
    /// Fields of a `Container`, in declared field order.
    Record(Vec<Value>),
}

impl Value {
    /// Short tag used in `TypeMismatch` errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Uint(_) => "uint",
            Value::Bytes(_) => "bytes",
            Value::Bits(_) => "bits",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bits(&self) -> Option<&BitArray> {
        match self {
            Value::Bits(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn expect_bool(&self) -> Result<bool, ErrorKind> {
        self.as_bool().ok_or_else(|| self.mismatch("bool"))
    }

    pub(crate) fn expect_uint(&self) -> Result<u64, ErrorKind> {
        self.as_uint().ok_or_else(|| self.mismatch("uint"))
    }

    pub(crate) fn expect_bytes(&self) -> Result<&[u8], ErrorKind> {
        self.as_bytes().ok_or_else(|| self.mismatch("bytes"))
    }

    pub(crate) fn expect_bits(&self) -> Result<&BitArray, ErrorKind> {
        self.as_bits().ok_or_else(|| self.mismatch("bits"))
    }

    pub(crate) fn expect_sequence(&self) -> Result<&[Value], ErrorKind> {
        self.as_sequence().ok_or_else(|| self.mismatch("sequence"))
    }

    pub(crate) fn expect_record(&self) -> Result<&[Value], ErrorKind> {
        self.as_record().ok_or_else(|| self.mismatch("record"))
    }

    fn mismatch(&self, expected: &'static str) -> ErrorKind {
        ErrorKind::TypeMismatch {
            expected,
            found: self.kind_name(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Uint(u64::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Uint(u64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<BitArray> for Value {
    fn from(v: BitArray) -> Self {
        Value::Bits(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Uint(7).as_uint(), Some(7));
        assert_eq!(Value::Bool(true).as_uint(), None);
    }

    #[test]
    fn test_mismatch_reports_both_sides() {
        let err = Value::Uint(3).expect_bytes().unwrap_err();
        assert_eq!(
            err,
            ErrorKind::TypeMismatch {
                expected: "bytes",
                found: "uint"
            }
        );
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(7u16), Value::Uint(7));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
        assert_eq!(Value::from(true), Value::Bool(true));
    }
}
