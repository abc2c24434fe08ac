use crate::types::offsets::{read_offsets, write_offset};
use crate::types::SszType;
use crate::value::Value;
use crate::{Error, ErrorKind, BYTES_PER_LENGTH_OFFSET};
use ethereum_types::H256;
use ssz_merkle::merkleize;

/// A named container field.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: SszType,
}

impl Field {
    pub fn new(name: &str, ty: SszType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// A heterogeneous record with a declared field order.
///
/// Construction walks the field list once and precomputes the layout:
/// the byte range of every fixed-size field, the offset-slot position
/// of every variable-size field and the end of the fixed region. The
/// codec paths then never re-derive the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerType {
    name: String,
    fields: Vec<Field>,
    fixed_ranges: Vec<(usize, usize)>,
    variable_slots: Vec<usize>,
    fixed_end: usize,
}

impl ContainerType {
    pub(crate) fn new(name: &str, fields: Vec<Field>) -> Result<Self, Error> {
        if fields.is_empty() {
            return Err(ErrorKind::ZeroLength.into());
        }

        let mut fixed_ranges = vec![];
        let mut variable_slots = vec![];
        let mut offset = 0;

        for field in &fields {
            if field.ty.is_variable_size() {
                variable_slots.push(offset);
                offset += BYTES_PER_LENGTH_OFFSET;
            } else {
                let size = field.ty.fixed_size();
                fixed_ranges.push((offset, offset + size));
                offset += size;
            }
        }

        Ok(Self {
            name: name.to_string(),
            fields,
            fixed_ranges,
            variable_slots,
            fixed_end: offset,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index of the field called `name` in declared order, which is
    /// also its position inside a `Value::Record`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub(crate) fn name(&self) -> String {
        format!("Container[{}]", self.name)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Record(self.fields.iter().map(|f| f.ty.default_value()).collect())
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        self.fields.iter().any(|f| f.ty.is_variable_size())
    }

    pub(crate) fn fixed_size(&self) -> usize {
        if self.is_variable_size() {
            0
        } else {
            self.fixed_end
        }
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a [Value], Error> {
        let values = value.expect_record()?;
        if values.len() != self.fields.len() {
            return Err(ErrorKind::LengthMismatch {
                len: values.len(),
                expected: self.fields.len(),
            }
            .into());
        }
        Ok(values)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        let values = self.check(value)?;

        let mut size = 0;
        for (field, value) in self.fields.iter().zip(values) {
            if field.ty.is_variable_size() {
                size += BYTES_PER_LENGTH_OFFSET + field.ty.size(value)?;
            } else {
                size += field.ty.fixed_size();
            }
        }
        Ok(size)
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let values = self.check(value)?;

        let mut fixed_ix = 0;
        let mut variable_ix = 0;
        let mut variable_index = self.fixed_end;

        for (field, value) in self.fields.iter().zip(values) {
            if field.ty.is_variable_size() {
                let size = field.ty.size(value)?;
                write_offset(buf, start + self.variable_slots[variable_ix], variable_index)?;
                field.ty.serialize_to(value, buf, start + variable_index)?;
                variable_index += size;
                variable_ix += 1;
            } else {
                field.ty.serialize_to(value, buf, start + self.fixed_ranges[fixed_ix].0)?;
                fixed_ix += 1;
            }
        }

        Ok(())
    }

    pub(crate) fn deserialize_from(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        let total = end - start;

        if !self.is_variable_size() {
            if total != self.fixed_end {
                return Err(ErrorKind::LengthMismatch {
                    len: total,
                    expected: self.fixed_end,
                }
                .into());
            }
        }

        // The first offset must equal the fixed-region end and no
        // offset may exceed the total, so a buffer shorter than the
        // fixed region cannot pass this stage.
        let offsets = read_offsets(bytes, start, end, &self.variable_slots, self.fixed_end)?;

        let mut fixed_ix = 0;
        let mut variable_ix = 0;
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let (field_start, field_end) = if field.ty.is_variable_size() {
                let segment_start = offsets[variable_ix];
                let segment_end = offsets.get(variable_ix + 1).copied().unwrap_or(total);
                variable_ix += 1;
                (segment_start, segment_end)
            } else {
                let range = self.fixed_ranges[fixed_ix];
                fixed_ix += 1;
                range
            };

            values.push(field.ty.deserialize_from(bytes, start + field_start, start + field_end)?);
        }

        Ok(Value::Record(values))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let values = self.check(value)?;

        let mut roots = Vec::with_capacity(self.fields.len());
        for (field, value) in self.fields.iter().zip(values) {
            roots.push(field.ty.hash_tree_root(value)?);
        }

        Ok(merkleize(&roots, roots.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SszType;
    use ssz_merkle::{hash_concat, mix_in_length, pack};

    fn block_type() -> SszType {
        SszType::container(
            "Block",
            vec![
                Field::new("a", SszType::uint16()),
                Field::new("b", SszType::list(SszType::uint16(), 1024).unwrap()),
                Field::new("c", SszType::uint8()),
            ],
        )
        .unwrap()
    }

    fn block_value() -> Value {
        Value::Record(vec![
            Value::Uint(0xaabb),
            Value::Sequence(vec![Value::Uint(0x1111), Value::Uint(0x2222)]),
            Value::Uint(0x77),
        ])
    }

    #[test]
    fn test_mixed_fields_layout() {
        let bytes = block_type().serialize(&block_value()).unwrap();
        assert_eq!(
            bytes,
            vec![0xbb, 0xaa, 0x07, 0x00, 0x00, 0x00, 0x77, 0x11, 0x11, 0x22, 0x22]
        );
    }

    #[test]
    fn test_mixed_fields_round_trip() {
        let ty = block_type();
        let value = block_value();

        let bytes = ty.serialize(&value).unwrap();
        assert_eq!(ty.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn test_fixed_container_exact_length() {
        let ty = SszType::container(
            "Pair",
            vec![
                Field::new("x", SszType::uint16()),
                Field::new("y", SszType::bool()),
            ],
        )
        .unwrap();

        assert!(!ty.is_variable_size());
        assert_eq!(ty.fixed_size(), 3);

        let bytes = [22, 0, 1];
        let value = ty.deserialize(&bytes).unwrap();
        assert_eq!(
            value,
            Value::Record(vec![Value::Uint(22), Value::Bool(true)])
        );

        assert!(ty.deserialize(&[22, 0]).is_err());
        assert!(ty.deserialize(&[22, 0, 1, 0]).is_err());
    }

    #[test]
    fn test_variable_container_fixed_size_is_zero() {
        assert!(block_type().is_variable_size());
        assert_eq!(block_type().fixed_size(), 0);
    }

    #[test]
    fn test_equal_offsets_rejected() {
        let ty = SszType::container(
            "TwoLists",
            vec![
                Field::new("a", SszType::byte_list(8).unwrap()),
                Field::new("b", SszType::byte_list(8).unwrap()),
            ],
        )
        .unwrap();

        // Both offsets point at byte 8.
        let payload = [8, 0, 0, 0, 8, 0, 0, 0, 0xaa];
        assert_eq!(
            ty.deserialize(&payload).unwrap_err().kind(),
            &ErrorKind::InvalidOffset { offset: 8 }
        );
    }

    #[test]
    fn test_first_offset_must_equal_fixed_end() {
        let ty = block_type();

        // Fixed region ends at 7; claim the payload starts at 8.
        let payload = [0xbb, 0xaa, 0x08, 0x00, 0x00, 0x00, 0x77, 0x00, 0x11, 0x11];
        assert_eq!(
            ty.deserialize(&payload).unwrap_err().kind(),
            &ErrorKind::InvalidOffset { offset: 8 }
        );
    }

    #[test]
    fn test_truncated_fixed_region() {
        let ty = block_type();
        assert!(ty.deserialize(&[0xbb, 0xaa, 0x07]).is_err());
    }

    #[test]
    fn test_nested_error_carries_type_trail() {
        let ty = block_type();
        let bad = Value::Record(vec![
            Value::Uint(1),
            Value::Sequence(vec![Value::Bool(true)]),
            Value::Uint(2),
        ]);

        let err = ty.serialize(&bad).unwrap_err();
        let trail: Vec<&str> = err.trail().collect();
        assert_eq!(trail, vec!["Container[Block]", "List[uint16, 1024]", "uint16"]);
    }

    #[test]
    fn test_field_index() {
        match block_type() {
            SszType::Container(container) => {
                assert_eq!(container.field_index("b"), Some(1));
                assert_eq!(container.field_index("missing"), None);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_hash_tree_root_over_field_roots() {
        let ty = SszType::container(
            "Pair",
            vec![
                Field::new("x", SszType::uint64()),
                Field::new("y", SszType::byte_list(32).unwrap()),
            ],
        )
        .unwrap();
        let value = Value::Record(vec![Value::Uint(3), Value::Bytes(vec![0xaa])]);

        let x_root = SszType::uint64().hash_tree_root(&Value::Uint(3)).unwrap();
        let y_root = mix_in_length(merkleize(&pack(&[0xaa]), 1), 1);
        assert_eq!(
            ty.hash_tree_root(&value).unwrap(),
            hash_concat(x_root, y_root)
        );
    }

    #[test]
    fn test_default_value() {
        let value = block_type().default_value();
        assert_eq!(
            value,
            Value::Record(vec![
                Value::Uint(0),
                Value::Sequence(vec![]),
                Value::Uint(0),
            ])
        );
    }
}
