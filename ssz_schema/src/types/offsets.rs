//! Offset-table plumbing shared by containers, lists and vectors of
//! variable-size elements.

use crate::{ErrorKind, BYTES_PER_LENGTH_OFFSET};

/// The largest byte position a 4-byte offset can address.
pub(crate) const MAX_OFFSET: usize = u32::MAX as usize;

/// Writes `offset` into the slot at `buf[at..at + 4]`, little-endian.
pub(crate) fn write_offset(buf: &mut [u8], at: usize, offset: usize) -> Result<(), ErrorKind> {
    if offset > MAX_OFFSET {
        return Err(ErrorKind::InvalidOffset { offset });
    }

    buf[at..at + BYTES_PER_LENGTH_OFFSET].copy_from_slice(&(offset as u32).to_le_bytes());
    Ok(())
}

/// Reads the offset slot at `bytes[at..at + 4]`.
///
/// A slot that runs past the buffer is reported as an invalid offset:
/// a truncated table and an out-of-bounds pointer are the same defect
/// to a caller.
pub(crate) fn read_offset(bytes: &[u8], at: usize) -> Result<usize, ErrorKind> {
    let slot = bytes
        .get(at..at + BYTES_PER_LENGTH_OFFSET)
        .ok_or(ErrorKind::InvalidOffset { offset: at })?;

    let mut raw = [0; BYTES_PER_LENGTH_OFFSET];
    raw.copy_from_slice(slot);
    Ok(u32::from_le_bytes(raw) as usize)
}

/// Reads and validates a composite's offset table.
///
/// `slots` holds the slot positions and `fixed_end` the expected first
/// offset, both relative to `start`. Enforces the three offset
/// invariants: the first offset equals the fixed-region end, every
/// offset stays within the composite, and offsets increase strictly.
/// Returned offsets are relative to `start`.
pub(crate) fn read_offsets(
    bytes: &[u8],
    start: usize,
    end: usize,
    slots: &[usize],
    fixed_end: usize,
) -> Result<Vec<usize>, ErrorKind> {
    let region = &bytes[start..end];
    let total = end - start;
    let mut offsets: Vec<usize> = Vec::with_capacity(slots.len());

    for slot in slots {
        let offset = read_offset(region, *slot)?;

        if offset > total {
            return Err(ErrorKind::InvalidOffset { offset });
        }
        match offsets.last() {
            None => {
                if offset != fixed_end {
                    return Err(ErrorKind::InvalidOffset { offset });
                }
            }
            Some(previous) => {
                if offset <= *previous {
                    return Err(ErrorKind::InvalidOffset { offset });
                }
            }
        }

        offsets.push(offset);
    }

    Ok(offsets)
}
