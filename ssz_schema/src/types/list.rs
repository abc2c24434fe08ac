use crate::types::offsets::{read_offset, read_offsets, write_offset};
use crate::types::SszType;
use crate::value::Value;
use crate::{Error, ErrorKind, BYTES_PER_LENGTH_OFFSET};
use ethereum_types::H256;
use ssz_merkle::{merkleize, mix_in_length, pack, BYTES_PER_CHUNK};

/// A homogeneous sequence of up to `limit` elements.
///
/// The element count is never stored: fixed-size elements imply it
/// through the input length, variable-size elements through the first
/// offset. The empty buffer is the one and only encoding of the empty
/// list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListType {
    element: Box<SszType>,
    limit: usize,
}

impl ListType {
    pub(crate) fn new(element: SszType, limit: usize) -> Result<Self, Error> {
        if limit == 0 {
            return Err(ErrorKind::ZeroLength.into());
        }
        Ok(Self {
            element: Box::new(element),
            limit,
        })
    }

    pub fn element(&self) -> &SszType {
        &self.element
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn name(&self) -> String {
        format!("List[{}, {}]", self.element.name(), self.limit)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Sequence(vec![])
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        true
    }

    pub(crate) fn fixed_size(&self) -> usize {
        0
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a [Value], Error> {
        let elements = value.expect_sequence()?;
        if elements.len() > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: elements.len(),
                limit: self.limit,
            }
            .into());
        }
        Ok(elements)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        let elements = self.check(value)?;

        if !self.element.is_variable_size() {
            return Ok(elements.len() * self.element.fixed_size());
        }

        let mut size = 0;
        for element in elements {
            size += BYTES_PER_LENGTH_OFFSET + self.element.size(element)?;
        }
        Ok(size)
    }

    pub(crate) fn serialize_to(
        &self,
        value: &Value,
        buf: &mut [u8],
        start: usize,
    ) -> Result<(), Error> {
        let elements = self.check(value)?;

        if !self.element.is_variable_size() {
            let element_size = self.element.fixed_size();
            for (i, element) in elements.iter().enumerate() {
                self.element.serialize_to(element, buf, start + i * element_size)?;
            }
        } else {
            let mut variable_index = BYTES_PER_LENGTH_OFFSET * elements.len();
            for (i, element) in elements.iter().enumerate() {
                let element_size = self.element.size(element)?;
                write_offset(buf, start + i * BYTES_PER_LENGTH_OFFSET, variable_index)?;
                self.element.serialize_to(element, buf, start + variable_index)?;
                variable_index += element_size;
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
        if start == end {
            return Ok(Value::Sequence(vec![]));
        }

        if !self.element.is_variable_size() {
            return self.deserialize_fixed_elements(bytes, start, end);
        }

        let first_offset = read_offset(&bytes[start..end], 0)?;
        if first_offset == 0 {
            // Only the empty buffer encodes an empty list.
            return Err(ErrorKind::InvalidOffset { offset: 0 }.into());
        }
        if first_offset % BYTES_PER_LENGTH_OFFSET != 0 {
            return Err(ErrorKind::Unaligned {
                len: first_offset,
                modulus: BYTES_PER_LENGTH_OFFSET,
            }
            .into());
        }

        let count = first_offset / BYTES_PER_LENGTH_OFFSET;
        if count > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: count,
                limit: self.limit,
            }
            .into());
        }

        let slots: Vec<usize> = (0..count).map(|i| i * BYTES_PER_LENGTH_OFFSET).collect();
        let offsets = read_offsets(bytes, start, end, &slots, first_offset)?;

        let total = end - start;
        let mut elements = Vec::with_capacity(count);
        for (i, offset) in offsets.iter().enumerate() {
            let segment_end = offsets.get(i + 1).copied().unwrap_or(total);
            elements.push(
                self.element
                    .deserialize_from(bytes, start + offset, start + segment_end)?,
            );
        }

        Ok(Value::Sequence(elements))
    }

    fn deserialize_fixed_elements(
        &self,
        bytes: &[u8],
        start: usize,
        end: usize,
    ) -> Result<Value, Error> {
        let element_size = self.element.fixed_size();
        let len = end - start;

        if len % element_size != 0 {
            return Err(ErrorKind::Unaligned {
                len,
                modulus: element_size,
            }
            .into());
        }

        let count = len / element_size;
        if count > self.limit {
            return Err(ErrorKind::LengthExceedsLimit {
                len: count,
                limit: self.limit,
            }
            .into());
        }

        let mut elements = Vec::with_capacity(count);
        for i in 0..count {
            let element_start = start + i * element_size;
            elements.push(self.element.deserialize_from(
                bytes,
                element_start,
                element_start + element_size,
            )?);
        }

        Ok(Value::Sequence(elements))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let elements = self.check(value)?;

        if self.element.is_basic() {
            let mut buf = vec![0; self.size(value)?];
            self.serialize_to(value, &mut buf, 0)?;

            let byte_limit = self.limit * self.element.fixed_size();
            let chunk_limit = (byte_limit + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;
            let root = merkleize(&pack(&buf), chunk_limit);
            return Ok(mix_in_length(root, elements.len() as u64));
        }

        let mut roots = Vec::with_capacity(elements.len());
        for element in elements {
            roots.push(self.element.hash_tree_root(element)?);
        }
        let root = merkleize(&roots, self.limit);
        Ok(mix_in_length(root, elements.len() as u64))
    }
}
