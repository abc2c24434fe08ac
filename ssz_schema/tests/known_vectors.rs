//! Hand-checked wire and hash vectors for the consensus encoding.

use ethereum_types::H256;
use ssz_merkle::{hash_concat, merkleize, mix_in_length, pack, zero_hash};
use ssz_schema::{ssz_container, BitArray, ErrorKind, SszType, Value};

#[test]
fn test_uint16_wire_and_root() {
    let ty = SszType::uint16();
    let value = Value::Uint(0x0102);

    assert_eq!(ty.serialize(&value).unwrap(), vec![0x02, 0x01]);

    let mut expected_root = [0; 32];
    expected_root[0] = 0x02;
    expected_root[1] = 0x01;
    assert_eq!(ty.hash_tree_root(&value).unwrap(), H256::from(expected_root));
}

#[test]
fn test_byte_vector_root_is_padded_input() {
    let ty = SszType::byte_vector(4).unwrap();
    let value = Value::Bytes(vec![1, 0, 0, 0]);

    let bytes = ty.serialize(&value).unwrap();
    assert_eq!(ty.deserialize(&bytes).unwrap(), value);

    let mut expected_root = [0; 32];
    expected_root[0] = 1;
    assert_eq!(ty.hash_tree_root(&value).unwrap(), H256::from(expected_root));
}

#[test]
fn test_bit_list_single_byte_encoding() {
    // Data bits 0b101 pack to 0x05; the delimiter at position 3 turns
    // the single byte into 0x0d.
    let ty = SszType::bit_list(4).unwrap();
    let value = Value::Bits(BitArray::from_bools(&[true, false, true]));

    assert_eq!(ty.serialize(&value).unwrap(), vec![0x0d]);
}

#[test]
fn test_mixed_container_wire_layout() {
    let ty = ssz_container!(Mixed {
        a: SszType::uint16(),
        b: SszType::list(SszType::uint16(), 1024).unwrap(),
        c: SszType::uint8(),
    })
    .unwrap();
    let value = Value::Record(vec![
        Value::Uint(0xaabb),
        Value::Sequence(vec![Value::Uint(0x1111), Value::Uint(0x2222)]),
        Value::Uint(0x77),
    ]);

    assert_eq!(
        ty.serialize(&value).unwrap(),
        vec![0xbb, 0xaa, 0x07, 0x00, 0x00, 0x00, 0x77, 0x11, 0x11, 0x22, 0x22]
    );
    assert_eq!(ty.deserialize(&ty.serialize(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_zero_limit_descriptors_rejected() {
    assert!(SszType::list(SszType::uint64(), 0).is_err());
    assert!(SszType::vector(SszType::uint64(), 0).is_err());
    assert!(SszType::bit_vector(0).is_err());
}

#[test]
fn test_bit_vector_nine_bits() {
    let ty = SszType::bit_vector(9).unwrap();
    let value = Value::Bits(BitArray::from_bools(&[true; 9]));

    assert_eq!(ty.serialize(&value).unwrap(), vec![0xff, 0x01]);
    assert_eq!(
        ty.deserialize(&[0xff, 0xff]).unwrap_err().kind(),
        &ErrorKind::ExtraneousBits
    );
}

#[test]
fn test_bit_list_delimiter_only() {
    // 0x20: no data bits set, delimiter at position 5.
    let ty = SszType::bit_list(5).unwrap();

    assert_eq!(
        ty.deserialize(&[0x20]).unwrap(),
        Value::Bits(BitArray::with_len(5))
    );
    assert_eq!(
        ty.deserialize(&[0x00]).unwrap_err().kind(),
        &ErrorKind::InvalidBitList
    );
}

#[test]
fn test_equal_container_offsets_rejected() {
    let ty = ssz_container!(TwoLists {
        a: SszType::byte_list(8).unwrap(),
        b: SszType::byte_list(8).unwrap(),
    })
    .unwrap();

    assert_eq!(
        ty.deserialize(&[8, 0, 0, 0, 8, 0, 0, 0, 1]).unwrap_err().kind(),
        &ErrorKind::InvalidOffset { offset: 8 }
    );
}

#[test]
fn test_hash_stability_across_construction_paths() {
    let ty = SszType::bit_list(16).unwrap();

    let via_bools = Value::Bits(BitArray::from_bools(&[true, true, false, true]));
    let via_packed = Value::Bits(BitArray::from_packed(vec![0b0000_1011], 4).unwrap());

    assert_eq!(via_bools, via_packed);
    assert_eq!(
        ty.hash_tree_root(&via_bools).unwrap(),
        ty.hash_tree_root(&via_packed).unwrap()
    );
}

// The chunk tree of a four-chunk byte vector, spelled out by hand.
#[test]
fn test_multi_chunk_byte_vector_root() {
    let ty = SszType::byte_vector(100).unwrap();
    let value = Value::Bytes(vec![0xab; 100]);

    let chunks = pack(&[0xab; 100]);
    assert_eq!(chunks.len(), 4);
    let expected = hash_concat(
        hash_concat(chunks[0], chunks[1]),
        hash_concat(chunks[2], chunks[3]),
    );
    assert_eq!(ty.hash_tree_root(&value).unwrap(), expected);
}

// Empty list roots are pure zero subtrees plus the length chunk.
#[test]
fn test_empty_list_root() {
    let ty = SszType::list(SszType::uint64(), 1024).unwrap();
    let root = ty.hash_tree_root(&Value::Sequence(vec![])).unwrap();

    // 1024 u64 values occupy 256 chunks, an eight-level tree.
    assert_eq!(root, mix_in_length(zero_hash(8), 0));
    assert_eq!(root, mix_in_length(merkleize(&[], 256), 0));
}
