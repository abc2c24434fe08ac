use crate::{Error, ErrorKind};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A packed bit buffer with an explicit bit length.
///
/// Bit `i` lives at `data[i / 8] & (1 << (i % 8))`, the little-endian
/// bit order SSZ serializes. The buffer always holds exactly
/// `(len + 7) / 8` bytes; bits past `len` in the final byte are kept
/// zero by the mutators.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitArray {
    data: Vec<u8>,
    len: usize,
}

impl BitArray {
    /// Creates an all-zero array of `len` bits.
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0; (len + 7) / 8],
            len,
        }
    }

    /// Packs a slice of booleans, index 0 first.
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut array = Self::with_len(bits.len());
        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                array.data[i / 8] |= 1 << (i % 8);
            }
        }
        array
    }

    /// Rebuilds an array from its packed representation.
    ///
    /// The byte count must match `len` exactly and no bit past `len`
    /// may be set.
    pub fn from_packed(data: Vec<u8>, len: usize) -> Result<Self, Error> {
        if data.len() != (len + 7) / 8 {
            return Err(ErrorKind::LengthMismatch {
                len: data.len(),
                expected: (len + 7) / 8,
            }
            .into());
        }

        if len % 8 != 0 {
            let last = data.last().copied().unwrap_or(0);
            if last >> (len % 8) != 0 {
                return Err(ErrorKind::ExtraneousBits.into());
            }
        }

        Ok(Self { data, len })
    }

    pub fn get(&self, i: usize) -> Result<bool, Error> {
        if i < self.len {
            Ok(self.data[i / 8] & (1 << (i % 8)) != 0)
        } else {
            Err(ErrorKind::OutOfBounds { i, len: self.len }.into())
        }
    }

    pub fn set(&mut self, i: usize, bit: bool) -> Result<(), Error> {
        if i < self.len {
            if bit {
                self.data[i / 8] |= 1 << (i % 8);
            } else {
                self.data[i / 8] &= !(1 << (i % 8));
            }
            Ok(())
        } else {
            Err(ErrorKind::OutOfBounds { i, len: self.len }.into())
        }
    }

    /// Number of bits stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes, `(len + 7) / 8` of them.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len)
            .map(|i| self.data[i / 8] & (1 << (i % 8)) != 0)
            .collect()
    }
}

impl Serialize for BitArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}:0x{}", self.len, hex::encode(&self.data)))
    }
}

impl<'de> Deserialize<'de> for BitArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut parts = raw.splitn(2, ":0x");

        let len = parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| D::Error::custom("missing bit length prefix"))?;
        let data = parts
            .next()
            .and_then(|s| hex::decode(s).ok())
            .ok_or_else(|| D::Error::custom("missing 0x-prefixed hex payload"))?;

        Self::from_packed(data, len)
            .map_err(|e| D::Error::custom(format!("invalid bit array: {}", e)))
    }
}
