use crate::value::Value;
use crate::{Error, ErrorKind};
use ethereum_types::H256;

/// The one-byte SSZ boolean.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoolType;

impl BoolType {
    pub(crate) fn name(&self) -> String {
        "bool".to_string()
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bool(false)
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        false
    }

    pub(crate) fn fixed_size(&self) -> usize {
        1
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        value.expect_bool()?;
        Ok(1)
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        buf[start] = value.expect_bool()? as u8;
        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        if end - start != 1 {
            return Err(ErrorKind::LengthMismatch {
                len: end - start,
                expected: 1,
            }
            .into());
        }

        match bytes[start] {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            byte => Err(ErrorKind::InvalidBool { byte }.into()),
        }
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let mut chunk = H256::zero();
        self.serialize_to(value, chunk.as_bytes_mut(), 0)?;
        Ok(chunk)
    }
}

/// A little-endian unsigned integer of 8, 16, 32 or 64 bits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UintType {
    pub(crate) bits: usize,
}

impl UintType {
    pub(crate) fn new(bits: usize) -> Result<Self, Error> {
        match bits {
            8 | 16 | 32 | 64 => Ok(Self { bits }),
            _ => Err(ErrorKind::UnsupportedWidth { bits }.into()),
        }
    }

    /// The largest value the declared width can hold.
    pub fn max(&self) -> u64 {
        if self.bits == 64 {
            u64::max_value()
        } else {
            (1 << self.bits) - 1
        }
    }

    fn width(&self) -> usize {
        self.bits / 8
    }

    pub(crate) fn name(&self) -> String {
        format!("uint{}", self.bits)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Uint(0)
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        false
    }

    pub(crate) fn fixed_size(&self) -> usize {
        self.width()
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        value.expect_uint()?;
        Ok(self.width())
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let value = value.expect_uint()?;
        if value > self.max() {
            return Err(ErrorKind::OutOfRange {
                value,
                max: self.max(),
            }
            .into());
        }

        let width = self.width();
        buf[start..start + width].copy_from_slice(&value.to_le_bytes()[..width]);
        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        let width = self.width();
        if end - start != width {
            return Err(ErrorKind::LengthMismatch {
                len: end - start,
                expected: width,
            }
            .into());
        }

        let mut raw = [0; 8];
        raw[..width].copy_from_slice(&bytes[start..end]);
        Ok(Value::Uint(u64::from_le_bytes(raw)))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let mut chunk = H256::zero();
        self.serialize_to(value, chunk.as_bytes_mut(), 0)?;
        Ok(chunk)
    }
}
