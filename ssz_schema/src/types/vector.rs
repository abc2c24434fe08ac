use crate::types::offsets::{read_offsets, write_offset};
use crate::types::SszType;
use crate::value::Value;
use crate::{Error, ErrorKind, BYTES_PER_LENGTH_OFFSET};
use ethereum_types::H256;
use ssz_merkle::{merkleize, pack, BYTES_PER_CHUNK};

/// A homogeneous sequence of exactly `length` elements.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorType {
    element: Box<SszType>,
    length: usize,
}

impl VectorType {
    pub(crate) fn new(element: SszType, length: usize) -> Result<Self, Error> {
        if length == 0 {
            return Err(ErrorKind::ZeroLength.into());
        }
        Ok(Self {
            element: Box::new(element),
            length,
        })
    }

    pub fn element(&self) -> &SszType {
        &self.element
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub(crate) fn name(&self) -> String {
        format!("Vector[{}, {}]", self.element.name(), self.length)
    }

    pub(crate) fn default_value(&self) -> Value {
        Value::Sequence(vec![self.element.default_value(); self.length])
    }

    pub(crate) fn is_variable_size(&self) -> bool {
        self.element.is_variable_size()
    }

    pub(crate) fn fixed_size(&self) -> usize {
        // Variable elements report fixed size 0, which propagates
        // through the product.
        self.element.fixed_size() * self.length
    }

    fn check<'a>(&self, value: &'a Value) -> Result<&'a [Value], Error> {
        let elements = value.expect_sequence()?;
        if elements.len() != self.length {
            return Err(ErrorKind::LengthMismatch {
                len: elements.len(),
                expected: self.length,
            }
            .into());
        }
        Ok(elements)
    }

    pub(crate) fn size(&self, value: &Value) -> Result<usize, Error> {
        let elements = self.check(value)?;
        if !self.element.is_variable_size() {
            return Ok(self.fixed_size());
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
            let mut variable_index = BYTES_PER_LENGTH_OFFSET * self.length;
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
        if !self.element.is_variable_size() {
            let element_size = self.element.fixed_size();
            if end - start != element_size * self.length {
                return Err(ErrorKind::LengthMismatch {
                    len: end - start,
                    expected: element_size * self.length,
                }
                .into());
            }

            let mut elements = Vec::with_capacity(self.length);
            for i in 0..self.length {
                let element_start = start + i * element_size;
                elements.push(self.element.deserialize_from(
                    bytes,
                    element_start,
                    element_start + element_size,
                )?);
            }
            return Ok(Value::Sequence(elements));
        }

        let slots: Vec<usize> = (0..self.length)
            .map(|i| i * BYTES_PER_LENGTH_OFFSET)
            .collect();
        let fixed_end = BYTES_PER_LENGTH_OFFSET * self.length;
        let offsets = read_offsets(bytes, start, end, &slots, fixed_end)?;

        let total = end - start;
        let mut elements = Vec::with_capacity(self.length);
        for (i, offset) in offsets.iter().enumerate() {
            let segment_end = offsets.get(i + 1).copied().unwrap_or(total);
            elements.push(
                self.element
                    .deserialize_from(bytes, start + offset, start + segment_end)?,
            );
        }

        Ok(Value::Sequence(elements))
    }

    pub(crate) fn hash_tree_root(&self, value: &Value) -> Result<H256, Error> {
        let elements = self.check(value)?;

        if self.element.is_basic() {
            let mut buf = vec![0; self.size(value)?];
            self.serialize_to(value, &mut buf, 0)?;

            let byte_len = self.length * self.element.fixed_size();
            let limit = (byte_len + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;
            return Ok(merkleize(&pack(&buf), limit));
        }

        let mut roots = Vec::with_capacity(self.length);
        for element in elements {
            roots.push(self.element.hash_tree_root(element)?);
        }
        Ok(merkleize(&roots, self.length))
    }
}
