use crate::bitarray::BitArray;
use crate::value::Value;
use crate::{Error, ErrorKind};
use ethereum_types::H256;
use ssz_merkle::{merkleize, mix_in_length, pack};

/// Bits per Merkle chunk; bit sequences express their chunk limit in
/// these units.
const BITS_PER_CHUNK: usize = 256;

/// A bit sequence of exactly `length` bits.
#[derive(Clone, Debug, PartialEq)]
pub struct BitVectorType {
    length: usize,
}

impl BitVectorType {
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
        format!("BitVector[{}]", self.length)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bits(BitArray::with_len(self.length))
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        false
    }

    pub(crate) fn fixed_size(&self) -> usize {
        (self.length + 7) / 8
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a BitArray, Error> {
        let bits = value.expect_bits()?;
        if bits.len() != self.length {
            return Err(ErrorKind::LengthMismatch {
                len: bits.len(),
                expected: self.length,
            }
            .into());
        }
        Ok(bits)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        self.check(value)?;
        Ok(self.fixed_size())
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let bits = self.check(value)?;
        buf[start..start + self.fixed_size()].copy_from_slice(bits.as_slice());
        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        if end - start != self.fixed_size() {
            return Err(ErrorKind::LengthMismatch {
                len: end - start,
                expected: self.fixed_size(),
            }
            .into());
        }

        // Rejects set bits past `length` in the final byte.
        let bits = BitArray::from_packed(bytes[start..end].to_vec(), self.length)?;
        Ok(Value::Bits(bits))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let bits = self.check(value)?;
        let limit = (self.length + BITS_PER_CHUNK - 1) / BITS_PER_CHUNK;
        Ok(merkleize(&pack(bits.as_slice()), limit))
    }
}

/// A bit sequence of up to `limit` bits.
///
/// The serialized form carries one delimiter bit immediately after the
/// last data bit, so a bitlist of `B` bits always occupies
/// `B / 8 + 1` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct BitListType {
    limit: usize,
}

impl BitListType {
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
        format!("BitList[{}]", self.limit)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Bits(BitArray::with_len(0))
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        true
    }

    pub(crate) fn fixed_size(&self) -> usize {
        0
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a BitArray, Error> {
        let bits = value.expect_bits()?;
        if bits.len() > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: bits.len(),
                limit: self.limit,
            }
            .into());
        }
        Ok(bits)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        Ok(self.check(value)?.len() / 8 + 1)
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let bits = self.check(value)?;
        let bit_len = bits.len();
        let data_len = (bit_len + 7) / 8;

        buf[start..start + data_len].copy_from_slice(bits.as_slice());
        if bit_len % 8 == 0 {
            buf[start + data_len] = 1;
        } else {
            buf[start + data_len - 1] |= 1 << (bit_len % 8);
        }

        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        let byte_len = end - start;
        if byte_len == 0 {
            return Err(ErrorKind::InvalidBitList.into());
        }

        let last = bytes[end - 1];
        if last == 0 {
            return Err(ErrorKind::InvalidBitList.into());
        }

        let leading_zeros = last.leading_zeros() as usize;
        let bit_len = byte_len * 8 - leading_zeros - 1;
        if bit_len > self.limit {
            return Err(ErrorKind::InvalidBitList.into());
        }

        let data = if bit_len % 8 == 0 {
            bytes[start..end - 1].to_vec()
        } else {
            let mut data = bytes[start..end].to_vec();
            let last_index = data.len() - 1;
            // Strip the delimiter; everything above it is already zero.
            data[last_index] &= 0xff >> (leading_zeros + 1);
            data
        };

        Ok(Value::Bits(BitArray::from_packed(data, bit_len)?))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let bits = self.check(value)?;
        let limit = (self.limit + BITS_PER_CHUNK - 1) / BITS_PER_CHUNK;
        let root = merkleize(&pack(bits.as_slice()), limit);
        Ok(mix_in_length(root, bits.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SszType;

    #[test]
    fn test_bit_vector_round_trip() {
        let ty = SszType::bit_vector(9).unwrap();
        let mut bits = BitArray::with_len(9);
        bits.set(0, true).unwrap();
        bits.set(8, true).unwrap();

        let bytes = ty.serialize(&Value::Bits(bits.clone())).unwrap();
        assert_eq!(bytes, vec![0b0000_0001, 0b0000_0001]);
        assert_eq!(ty.deserialize(&bytes).unwrap(), Value::Bits(bits));
    }

    #[test]
    fn test_bit_vector_all_set() {
        let ty = SszType::bit_vector(9).unwrap();
        let bits = BitArray::from_bools(&[true; 9]);

        assert_eq!(ty.serialize(&Value::Bits(bits)).unwrap(), vec![0xff, 0x01]);
    }

    #[test]
    fn test_bit_vector_rejects_extraneous_bits() {
        let ty = SszType::bit_vector(9).unwrap();
        assert_eq!(
            ty.deserialize(&[0xff, 0xff]).unwrap_err().kind(),
            &ErrorKind::ExtraneousBits
        );
    }

    #[test]
    fn test_bit_vector_length_checks() {
        let ty = SszType::bit_vector(9).unwrap();

        assert!(ty.deserialize(&[0xff]).is_err());
        assert!(ty.deserialize(&[0, 0, 0]).is_err());

        let wrong_len = Value::Bits(BitArray::with_len(8));
        assert_eq!(
            ty.serialize(&wrong_len).unwrap_err().kind(),
            &ErrorKind::LengthMismatch { len: 8, expected: 9 }
        );
    }

    #[test]
    fn test_bit_list_delimiter_packing() {
        // Bits [true, false, true] pack to 0x05; the delimiter lands at
        // position 3 giving a single 0x0d byte.
        let ty = SszType::bit_list(4).unwrap();
        let bits = BitArray::from_bools(&[true, false, true]);

        let bytes = ty.serialize(&Value::Bits(bits.clone())).unwrap();
        assert_eq!(bytes, vec![0x0d]);
        assert_eq!(ty.deserialize(&bytes).unwrap(), Value::Bits(bits));
    }

    #[test]
    fn test_bit_list_byte_aligned_delimiter() {
        let ty = SszType::bit_list(16).unwrap();
        let bits = BitArray::from_bools(&[true; 8]);

        let bytes = ty.serialize(&Value::Bits(bits.clone())).unwrap();
        assert_eq!(bytes, vec![0xff, 0x01]);
        assert_eq!(ty.deserialize(&bytes).unwrap(), Value::Bits(bits));
    }

    #[test]
    fn test_empty_bit_list() {
        let ty = SszType::bit_list(4).unwrap();
        let empty = Value::Bits(BitArray::with_len(0));

        let bytes = ty.serialize(&empty).unwrap();
        assert_eq!(bytes, vec![0x01]);
        assert_eq!(ty.deserialize(&bytes).unwrap(), empty);
    }

    #[test]
    fn test_bit_list_delimiter_only_payload() {
        // 0x20 is five zero data bits plus the delimiter at position 5.
        let ty = SszType::bit_list(5).unwrap();

        let value = ty.deserialize(&[0x20]).unwrap();
        assert_eq!(value, Value::Bits(BitArray::with_len(5)));
    }

    #[test]
    fn test_bit_list_missing_delimiter() {
        let ty = SszType::bit_list(8).unwrap();

        assert_eq!(
            ty.deserialize(&[0x00]).unwrap_err().kind(),
            &ErrorKind::InvalidBitList
        );
        assert_eq!(
            ty.deserialize(&[0xaa, 0x00]).unwrap_err().kind(),
            &ErrorKind::InvalidBitList
        );
        assert!(ty.deserialize(&[]).is_err());
    }

    #[test]
    fn test_bit_list_over_limit() {
        let ty = SszType::bit_list(3).unwrap();

        // Four data bits plus delimiter.
        assert_eq!(
            ty.deserialize(&[0b0001_1111]).unwrap_err().kind(),
            &ErrorKind::InvalidBitList
        );

        let long = Value::Bits(BitArray::with_len(4));
        assert_eq!(
            ty.serialize(&long).unwrap_err().kind(),
            &ErrorKind::LengthExceedsLimit { len: 4, limit: 3 }
        );
    }

    #[test]
    fn test_bit_list_hash_mixes_in_bit_length() {
        let ty = SszType::bit_list(16).unwrap();
        let bits = BitArray::from_bools(&[true, true, false]);

        let root = ty.hash_tree_root(&Value::Bits(bits.clone())).unwrap();
        let expected = mix_in_length(merkleize(&pack(bits.as_slice()), 1), 3);
        assert_eq!(root, expected);
    }
}
