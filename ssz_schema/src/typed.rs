use crate::bitarray::BitArray;
use crate::types::SszType;
use crate::value::Value;
use crate::{Error, ErrorKind};
use ethereum_types::H256;
use std::marker::PhantomData;

/// Conversion between a host Rust type and the dynamic [`Value`]
/// representation descriptors operate on.
pub trait SszValue: Sized {
    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, Error>;
}

impl SszValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value.expect_bool()?)
    }
}

macro_rules! ssz_value_for_uint {
    ($($type_ident: ty),*) => { $(
        impl SszValue for $type_ident {
            fn to_value(&self) -> Value {
                Value::Uint(u64::from(*self))
            }

            fn from_value(value: Value) -> Result<Self, Error> {
                let raw = value.expect_uint()?;
                if raw > u64::from(<$type_ident>::max_value()) {
                    return Err(ErrorKind::OutOfRange {
                        value: raw,
                        max: u64::from(<$type_ident>::max_value()),
                    }
                    .into());
                }
                Ok(raw as $type_ident)
            }
        }
    )* };
}

ssz_value_for_uint!(u8, u16, u32);

impl SszValue for u64 {
    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value.expect_uint()?)
    }
}

impl SszValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value.expect_bytes()?.to_vec())
    }
}

impl SszValue for BitArray {
    fn to_value(&self) -> Value {
        Value::Bits(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value.expect_bits()?.clone())
    }
}

// A generic `Vec<T>` impl would overlap the `Vec<u8>` byte impl, so
// the u64 sequence is provided directly.
impl SszValue for Vec<u64> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(u64::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        value
            .expect_sequence()?
            .iter()
            .map(|v| u64::from_value(v.clone()))
            .collect()
    }
}

/// A descriptor paired with the host type its values convert to,
/// so call sites serialize and deserialize `T` directly instead of
/// threading `Value`s around.
pub struct Typed<T> {
    ty: SszType,
    _phantom: PhantomData<T>,
}

impl<T: SszValue> Typed<T> {
    /// Pairs `ty` with `T`.
    ///
    /// The descriptor's default value must convert to `T`, which
    /// catches descriptor/host mismatches at construction instead of
    /// first use.
    pub fn new(ty: SszType) -> Result<Self, Error> {
        T::from_value(ty.default_value()).map_err(|e| e.in_type(ty.name()))?;

        Ok(Self {
            ty,
            _phantom: PhantomData,
        })
    }

    pub fn ssz_type(&self) -> &SszType {
        &self.ty
    }

    pub fn default_value(&self) -> T {
        T::from_value(self.ty.default_value())
            .expect("default conversion is validated at construction")
    }

    pub fn size(&self, value: &T) -> Result<usize, Error> {
        self.ty.size(&value.to_value())
    }

    pub fn serialize(&self, value: &T) -> Result<Vec<u8>, Error> {
        self.ty.serialize(&value.to_value())
    }

    pub fn deserialize(&self, bytes: &[u8]) -> Result<T, Error> {
        T::from_value(self.ty.deserialize(bytes)?).map_err(|e| e.in_type(self.ty.name()))
    }

    pub fn hash_tree_root(&self, value: &T) -> Result<H256, Error> {
        self.ty.hash_tree_root(&value.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_uint_round_trip() {
        let ty: Typed<u16> = Typed::new(SszType::uint16()).unwrap();

        let bytes = ty.serialize(&0x0102).unwrap();
        assert_eq!(bytes, vec![0x02, 0x01]);
        assert_eq!(ty.deserialize(&bytes).unwrap(), 0x0102);
        assert_eq!(ty.default_value(), 0);
    }

    #[test]
    fn test_typed_byte_list() {
        let ty: Typed<Vec<u8>> = Typed::new(SszType::byte_list(8).unwrap()).unwrap();

        let bytes = ty.serialize(&vec![1, 2, 3]).unwrap();
        assert_eq!(ty.deserialize(&bytes).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_typed_uint_sequence() {
        let ty: Typed<Vec<u64>> = Typed::new(SszType::list(SszType::uint64(), 8).unwrap()).unwrap();

        let bytes = ty.serialize(&vec![5, 6]).unwrap();
        assert_eq!(ty.deserialize(&bytes).unwrap(), vec![5, 6]);
    }

    #[test]
    fn test_typed_rejects_mismatched_host_type() {
        assert!(Typed::<bool>::new(SszType::uint16()).is_err());
        assert!(Typed::<Vec<u8>>::new(SszType::bool()).is_err());
    }

    #[test]
    fn test_narrowing_conversion_checks_range() {
        let err = u8::from_value(Value::Uint(300)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfRange { value: 300, max: 255 });
    }
}
