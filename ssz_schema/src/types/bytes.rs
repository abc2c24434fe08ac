use crate::value::Value;
use crate::{Error, ErrorKind};
use ethereum_types::H256;
use ssz_merkle::{merkleize, mix_in_length, pack, BYTES_PER_CHUNK};

/// A byte string of exactly `length` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteVectorType {
    length: usize,
}

impl ByteVectorType {
    pub(crate) fn new(length: usize) -> Result<Self, Error> {
        if length == 0 {
            return Err(ErrorKind::ZeroLength.into());
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn name(&self) -> String {
        format!("ByteVector[{}]", self.length)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bytes(vec![0; self.length])
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        false
    }

    pub(crate) fn fixed_size(&self) -> usize {
        self.length
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a [u8], Error> {
        let bytes = value.expect_bytes()?;
        if bytes.len() != self.length {
            return Err(ErrorKind::LengthMismatch {
                len: bytes.len(),
                expected: self.length,
            }
            .into());
        }
        Ok(bytes)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        self.check(value)?;
        Ok(self.length)
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let bytes = self.check(value)?;
        buf[start..start + self.length].copy_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        if end - start != self.length {
            return Err(ErrorKind::LengthMismatch {
                len: end - start,
                expected: self.length,
            }
            .into());
        }

        Ok(Value::Bytes(bytes[start..end].to_vec()))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let bytes = self.check(value)?;
        let limit = (self.length + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;
        Ok(merkleize(&pack(bytes), limit))
    }
}

/// A byte string of up to `limit` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteListType {
    limit: usize,
}

impl ByteListType {
    pub(crate) fn new(limit: usize) -> Result<Self, Error> {
        if limit == 0 {
            return Err(ErrorKind::ZeroLength.into());
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn name(&self) -> String {
        format!("ByteList[{}]", self.limit)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bytes(vec![])
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        true
    }

    pub(crate) fn fixed_size(&self) -> usize {
        0
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a [u8], Error> {
        let bytes = value.expect_bytes()?;
        if bytes.len() > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: bytes.len(),
                limit: self.limit,
            }
            .into());
        }
        Ok(bytes)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        Ok(self.check(value)?.len())
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let bytes = self.check(value)?;
        buf[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        if end - start > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: end - start,
                limit: self.limit,
            }
            .into());
        }

        Ok(Value::Bytes(bytes[start..end].to_vec()))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let bytes = self.check(value)?;
        let limit = (self.limit + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;
        let root = merkleize(&pack(bytes), limit);
        Ok(mix_in_length(root, bytes.len() as u64))
    }
}
