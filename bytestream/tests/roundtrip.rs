use bytestream::{ByteError, ByteReader, ByteWriter};

#[test]
fn bounded_writer_roundtrip_bytes() {
    let mut buf = [0u8; 8];
    let mut writer = ByteWriter::new(&mut buf);
    writer.write_u8(0xA1).unwrap();
    writer.write_bytes(&[1, 2, 3]).unwrap();
    let bytes_used = writer.finish();

    let mut reader = ByteReader::new(&buf[..bytes_used]);
    assert_eq!(reader.read_u8().unwrap(), 0xA1);
    assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
    assert!(reader.is_empty());
}

#[test]
fn writer_exact_capacity_succeeds() {
    let mut buf = [0u8; 5];
    let mut writer = ByteWriter::new(&mut buf);
    writer.write_u8(1).unwrap();
    writer.write_u32_le(u32::MAX).unwrap();
    assert_eq!(writer.remaining(), 0);
    assert_eq!(writer.finish(), 5);
}

#[test]
fn writer_one_short_fails_without_partial_write() {
    let mut buf = [0x55u8; 4];
    let mut writer = ByteWriter::new(&mut buf);
    writer.write_u8(1).unwrap();
    let err = writer.write_u32_le(u32::MAX).unwrap_err();
    assert_eq!(
        err,
        ByteError::Overflow {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(writer.finish(), 1);
    assert_eq!(buf, [1, 0x55, 0x55, 0x55]);
}

#[test]
fn header_patching_roundtrip() {
    let mut buf = [0u8; 4];
    let mut writer = ByteWriter::new(&mut buf);
    let header = writer.reserve_zeroed(1).unwrap();
    for slot in 0..4u8 {
        writer.or_at(header, slot << (slot * 2)).unwrap();
    }
    writer.write_u8(0xFF).unwrap();
    let used = writer.finish();

    let mut reader = ByteReader::new(&buf[..used]);
    let packed = reader.read_u8().unwrap();
    for slot in 0..4u8 {
        assert_eq!((packed >> (slot * 2)) & 3, slot);
    }
    assert_eq!(reader.read_u8().unwrap(), 0xFF);
}
