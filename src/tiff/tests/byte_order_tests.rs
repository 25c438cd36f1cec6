//! Tests for the byte order module

extern crate std;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};

#[test]
fn test_byte_order_from_marker() {
    std::assert_eq!(ByteOrder::from_marker(*b"II").unwrap(), ByteOrder::LittleEndian);
    std::assert_eq!(ByteOrder::from_marker(*b"MM").unwrap(), ByteOrder::BigEndian);
    std::assert!(ByteOrder::from_marker(*b"XX").is_err());
}

#[test]
fn test_byte_order_from_name() {
    std::assert_eq!(ByteOrder::from_name("little").unwrap(), ByteOrder::LittleEndian);
    std::assert_eq!(ByteOrder::from_name("BE").unwrap(), ByteOrder::BigEndian);
    std::assert_eq!(ByteOrder::from_name("mm").unwrap(), ByteOrder::BigEndian);
    std::assert!(ByteOrder::from_name("middle").is_err());
}

#[test]
fn test_little_endian_handler_reads() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();

    let handler = LittleEndianHandler;
    std::assert_eq!(handler.read_u16(&buffer[0..]), 0x1234);
    std::assert_eq!(handler.read_u32(&buffer[2..]), 0x12345678);
    std::assert_eq!(handler.read_u64(&buffer[6..]), 0x1234567890ABCDEF);
}

#[test]
fn test_big_endian_handler_reads() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_u64::<BigEndian>(0x1234567890ABCDEF).unwrap();

    let handler = BigEndianHandler;
    std::assert_eq!(handler.read_u16(&buffer[0..]), 0x1234);
    std::assert_eq!(handler.read_u32(&buffer[2..]), 0x12345678);
    std::assert_eq!(handler.read_u64(&buffer[6..]), 0x1234567890ABCDEF);
}

#[test]
fn test_handler_writes_in_place() {
    let mut buffer = [0u8; 4];
    ByteOrder::BigEndian.handler().write_u16(&mut buffer[1..], 0xABCD);
    std::assert_eq!(buffer, [0x00, 0xAB, 0xCD, 0x00]);

    ByteOrder::LittleEndian.handler().write_u16(&mut buffer[1..], 0xABCD);
    std::assert_eq!(buffer, [0x00, 0xCD, 0xAB, 0x00]);

    let mut wide = [0u8; 8];
    ByteOrder::LittleEndian.handler().write_u32(&mut wide, 0x01020304);
    std::assert_eq!(&wide[..4], &[0x04, 0x03, 0x02, 0x01]);
    ByteOrder::BigEndian.handler().write_u64(&mut wide, 0x0102030405060708);
    std::assert_eq!(wide, [1, 2, 3, 4, 5, 6, 7, 8]);
}
