use smbios::error::Error;
use smbios::{FormFactor, MemoryDevice, MemoryTechnology, MemoryType, TypeDetail};

struct Formatted(Vec<u8>);

impl Formatted {
    fn new(len: usize) -> Self {
        Formatted(vec![0; len])
    }

    fn u8(mut self, offset: usize, value: u8) -> Self {
        self.0[offset] = value;
        self
    }

    fn u16(mut self, offset: usize, value: u16) -> Self {
        self.0[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        self
    }

    fn u32(mut self, offset: usize, value: u32) -> Self {
        self.0[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    fn decode(&self, strings: &[&str]) -> MemoryDevice {
        MemoryDevice::decode(&self.0, strings).unwrap()
    }
}

const NO_STRINGS: &[&str] = &[];

#[test]
fn decode_ddr4_dimm_2_6() {
    let body = Formatted::new(24)
        .u16(8, 0x0010)
        .u8(10, 9)
        .u8(12, 1)
        .u8(14, 26)
        // Bit 13 is Registered (Buffered); bit 7 would be Synchronous.
        .u16(15, 0x2000);

    let mem = body.decode(&["DIMM_A1"]);

    assert_eq!(mem.size_mb, 16);
    assert_eq!(mem.size_kb, 16384);
    assert_eq!(mem.form_factor, FormFactor::Dimm);
    assert_eq!(mem.form_factor.label(), "DIMM");
    assert_eq!(mem.memory_ty.label(), "DDR4");
    assert_eq!(mem.ty_detail, vec![TypeDetail::Registered]);
    assert_eq!(mem.ty_detail[0].label(), "Registered (Buffered)");
    assert_eq!(mem.device_locator, "DIMM_A1");
    assert_eq!(mem.bank_locator, "");
    assert_eq!(mem.memory_technology, None);
}

#[test]
fn decode_synchronous_bit() {
    let mem = Formatted::new(24).u16(15, 0x0080).decode(NO_STRINGS);

    assert_eq!(mem.ty_detail, vec![TypeDetail::Synchronous]);
}

#[test]
fn decode_empty_slot() {
    let mem = Formatted::new(24).u8(10, 9).decode(NO_STRINGS);

    assert_eq!(mem.size_kb, 0);
    assert_eq!(mem.size_mb, 0);
    assert!(mem.is_empty_slot());
}

#[test]
fn decode_rejects_short_section() {
    for len in [0, 1, 16] {
        assert_eq!(
            MemoryDevice::decode(&vec![0u8; len], NO_STRINGS),
            Err(Error::InputTooShort { len, min: 17 })
        );
    }

    assert!(MemoryDevice::decode(&[0u8; 17], NO_STRINGS).is_ok());
}

#[test]
fn decode_size_in_extended_field() {
    let body = Formatted::new(30).u16(8, 0x7FFF).u32(24, 65536);

    let mem = body.decode(NO_STRINGS);

    assert_eq!(mem.size_mb, 65536);
    assert_eq!(mem.size_kb, 65536 * 1024);
}

#[test]
fn decode_size_sentinel_without_extended_field() {
    let mem = Formatted::new(29).u16(8, 0x7FFF).decode(NO_STRINGS);

    assert_eq!(mem.size_mb, 0x7FFF);
    assert_eq!(mem.size_kb, 0x7FFF * 1024);
}

#[test]
fn decode_size_granularity_bit() {
    let mb = Formatted::new(17).u16(8, 0x0400).decode(NO_STRINGS);
    assert_eq!(mb.size_mb, 0x0400);
    assert_eq!(mb.size_kb, 0x0400 * 1024);

    // Bit 7 of byte 9 set: the resolved value is taken as kilobytes.
    let kb = Formatted::new(17).u16(8, 0x8600).decode(NO_STRINGS);
    assert_eq!(kb.size_kb, 0x8600);
    assert_eq!(kb.size_mb, 0x8600 / 1024);
}

#[test]
fn decode_speed_in_extended_field() {
    let body = Formatted::new(88).u16(17, 0xFFFF).u32(80, 70000);
    assert_eq!(body.decode(NO_STRINGS).speed, 70000);

    let body = Formatted::new(88).u16(17, 0x7FFF).u32(80, 70000);
    assert_eq!(body.decode(NO_STRINGS).speed, 70000);

    let body = Formatted::new(88).u16(17, 3200).u32(80, 70000);
    assert_eq!(body.decode(NO_STRINGS).speed, 3200);
}

#[test]
fn decode_speed_sentinel_before_3_3() {
    let body = Formatted::new(87).u16(17, 0xFFFF);

    assert_eq!(body.decode(NO_STRINGS).speed, 0xFFFF);
}

#[test]
fn decode_configured_speed_follows_speed_rule() {
    let body = Formatted::new(88).u16(28, 0xFFFF).u32(84, 66000);
    assert_eq!(body.decode(NO_STRINGS).configured_speed, 66000);

    let body = Formatted::new(36).u16(28, 2933);
    assert_eq!(body.decode(NO_STRINGS).configured_speed, 2933);
}

#[test]
fn decode_every_ty_detail_combination() {
    let mut body = Formatted::new(17);
    for value in 0..=u16::MAX {
        body = body.u16(15, value);

        let mem = body.decode(NO_STRINGS);

        let expected: Vec<u32> = (0..16).filter(|i| value & (1 << i) != 0).collect();
        let actual: Vec<u32> = mem.ty_detail.iter().map(|d| d.bit()).collect();
        assert_eq!(actual, expected, "ty_detail {:#06X}", value);
    }
}

#[test]
fn decode_string_indices() {
    let strings = ["DIMM 0", "BANK 0", "Samsung", "0xDEADBEEF", "ASSET", "M393A2K43BB1"];
    let body = Formatted::new(24)
        .u8(12, 1)
        .u8(13, 2)
        .u8(19, 3)
        .u8(20, 4)
        .u8(21, 5)
        .u8(22, 6);

    let mem = body.decode(&strings);

    assert_eq!(mem.device_locator, "DIMM 0");
    assert_eq!(mem.bank_locator, "BANK 0");
    assert_eq!(mem.manufacturer, "Samsung");
    assert_eq!(mem.serial_number, "0xDEADBEEF");
    assert_eq!(mem.asset_tag, "ASSET");
    assert_eq!(mem.part_number, "M393A2K43BB1");
}

#[test]
fn decode_missing_strings_are_empty() {
    let strings = ["DIMM 0", "BANK 0"];
    let body = Formatted::new(24)
        .u8(12, 0)
        .u8(13, 2)
        .u8(19, 3)
        .u8(20, 0xFF);

    let mem = body.decode(&strings);
    assert_eq!(mem.device_locator, "");
    assert_eq!(mem.bank_locator, "BANK 0");
    assert_eq!(mem.manufacturer, "");
    assert_eq!(mem.serial_number, "");

    let mem = body.decode(NO_STRINGS);
    assert_eq!(mem.bank_locator, "");
}

#[test]
fn decode_unknown_enum_values() {
    let mem = Formatted::new(17).u8(10, 0x42).u8(14, 0x99).decode(NO_STRINGS);

    assert_eq!(mem.form_factor, FormFactor::OutOfSpec(0x42));
    assert_eq!(mem.form_factor.label(), "Unknown/Reserved");
    assert_eq!(mem.memory_ty, MemoryType::OutOfSpec(0x99));
    assert_eq!(mem.memory_ty.label(), "Unknown/Reserved");
}

#[test]
fn decode_3_2_fields() {
    let body = Formatted::new(80)
        .u16(4, 72)
        .u16(6, 64)
        .u8(11, 3)
        .u8(23, 0x12)
        .u16(30, 1200)
        .u16(32, 1350)
        .u16(34, 1200)
        .u8(36, 4)
        .u8(39, 1);

    let mem = body.decode(&["FW 1.0"]);

    assert_eq!(mem.total_width, 72);
    assert_eq!(mem.data_width, 64);
    assert_eq!(mem.device_set, 3);
    assert_eq!(mem.rank, 2);
    assert_eq!(mem.minimum_voltage, 1200);
    assert_eq!(mem.maximum_voltage, 1350);
    assert_eq!(mem.configured_voltage, 1200);
    assert_eq!(mem.memory_technology, Some(MemoryTechnology::NvdimmN));
    assert_eq!(mem.firmware_version, "FW 1.0");
}

#[test]
fn decoded_record_serializes_labels() {
    let mem = Formatted::new(24)
        .u16(8, 8192)
        .u8(10, 13)
        .u8(14, 34)
        .u16(15, 0x4080)
        .decode(NO_STRINGS);

    let json = serde_json::to_value(&mem).unwrap();

    assert_eq!(json["form_factor"], "SODIMM");
    assert_eq!(json["memory_ty"], "DDR5");
    assert_eq!(
        json["ty_detail"],
        serde_json::json!(["Synchronous", "Unbuffered (Unregistered)"])
    );
    assert_eq!(json["size_mb"], 8192);
    assert_eq!(json["memory_technology"], serde_json::Value::Null);
}
