use super::bitfield::BitField;
use super::error::Error;
use super::labels::{FormFactor, MemoryTechnology, MemoryType, TypeDetail};
use super::structure::{get_string_by_index, RawStructure, TYPE_MEMORY_DEVICE};
use serde::Serialize;
use smbios_derive::SMBIOS;
use tracing::{debug, trace};

// Formatted section lengths (header stripped) per specification revision.
const SIZE_AS_PER_2_7: usize = 30;
const SIZE_AS_PER_3_2: usize = 80;
const SIZE_AS_PER_3_3: usize = 88;

/// Size is 32 GiB - 1 MiB or larger and lives in Extended Size.
const SIZE_IN_EXTENDED: u16 = 0x7FFF;

/// Bit 15 of Size selects kilobyte units.
const SIZE_GRANULARITY_KB: u16 = 0x8000;

const ATTRIBUTES_RANK_MASK: u8 = 0x0F;

/// Memory Device (type 17) formatted section, SMBIOS 2.1 through 3.3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, SMBIOS)]
pub struct MemoryDeviceRaw {
    #[smbios(since = 17)]
    physical_memory_array_handle: u16,
    #[smbios(since = 17)]
    memory_error_information_handle: u16,
    #[smbios(since = 17)]
    total_width: u16,
    #[smbios(since = 17)]
    data_width: u16,
    #[smbios(since = 17)]
    size: u16,
    #[smbios(since = 17)]
    form_factor: u8,
    #[smbios(since = 17)]
    device_set: u8,
    #[smbios(since = 17)]
    device_locator: u8,
    #[smbios(since = 17)]
    bank_locator: u8,
    #[smbios(since = 17)]
    memory_ty: u8,
    #[smbios(since = 17)]
    ty_detail: u16,
    #[smbios(since = 23)]
    speed: u16,
    #[smbios(since = 23)]
    manufacturer: u8,
    #[smbios(since = 23)]
    serial_number: u8,
    #[smbios(since = 23)]
    asset_tag: u8,
    #[smbios(since = 23)]
    part_number: u8,
    #[smbios(since = 24)]
    attributes: u8,
    #[smbios(since = 30)]
    extended_size: u32,
    #[smbios(since = 30)]
    configured_memory_speed: u16,
    #[smbios(since = 36)]
    minimum_voltage: u16,
    #[smbios(since = 36)]
    maximum_voltage: u16,
    #[smbios(since = 36)]
    configured_voltage: u16,
    #[smbios(since = 80)]
    memory_technology: u8,
    #[smbios(since = 80)]
    memory_operating_mode_capability: u16,
    #[smbios(since = 80)]
    firmware_version: u8,
    #[smbios(since = 80)]
    module_manufacturer_id: u16,
    #[smbios(since = 80)]
    module_product_id: u16,
    #[smbios(since = 80)]
    memory_subsystem_ctrl_manufacturer_id: u16,
    #[smbios(since = 80)]
    memory_subsystem_ctrl_product_id: u16,
    #[smbios(since = 80)]
    non_volatile_size: u64,
    #[smbios(since = 80)]
    volatile_size: u64,
    #[smbios(since = 80)]
    cache_size: u64,
    #[smbios(since = 80)]
    logical_size: u64,
    #[smbios(since = 88)]
    extended_speed: u32,
    #[smbios(since = 88)]
    extended_configured_memory_speed: u32,
}

/// A decoded Memory Device.
///
/// Strings are empty when the structure does not reference them or the string set does not
/// contain the referenced index, which is common on virtual machines. A `size_kb` of zero is an
/// empty socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryDevice {
    pub physical_memory_array_handle: u16,
    pub memory_error_information_handle: u16,
    /// In bits.
    pub total_width: u16,
    /// In bits.
    pub data_width: u16,
    pub size_kb: u64,
    pub size_mb: u64,
    pub form_factor: FormFactor,
    pub device_set: u8,
    pub device_locator: String,
    pub bank_locator: String,
    pub memory_ty: MemoryType,
    pub ty_detail: Vec<TypeDetail>,
    /// In MT/s.
    pub speed: u32,
    pub manufacturer: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub part_number: String,
    /// 0 when unknown.
    pub rank: u8,
    /// In MT/s.
    pub configured_speed: u32,
    /// In millivolts, 0 when unknown.
    pub minimum_voltage: u16,
    pub maximum_voltage: u16,
    pub configured_voltage: u16,
    pub memory_technology: Option<MemoryTechnology>,
    pub firmware_version: String,
}

impl MemoryDevice {
    /// Decodes a formatted section (header stripped) and the structure's string set.
    pub fn decode<S: AsRef<str>>(formatted: &[u8], strings: &[S]) -> Result<Self, Error> {
        let len = formatted.len();
        check_length(len)?;

        trace!(
            len,
            tier = ?MemoryDeviceRaw::tier_for_length(len),
            "decoding memory device"
        );

        let raw = MemoryDeviceRaw::from_formatted(formatted);
        Self::interpret(&raw, len, strings)
    }

    pub fn from_structure(structure: &RawStructure) -> Result<Self, Error> {
        if structure.ty != TYPE_MEMORY_DEVICE {
            return Err(Error::UnexpectedType {
                found: structure.ty,
            });
        }

        Self::decode(&structure.formatted, &structure.strings)
    }

    /// `len` is the length of the formatted section `raw` was extracted from.
    pub fn interpret<S: AsRef<str>>(
        raw: &MemoryDeviceRaw,
        len: usize,
        strings: &[S],
    ) -> Result<Self, Error> {
        check_length(len)?;

        let (size_kb, size_mb) = resolve_size(raw, len);

        let form_factor = FormFactor::from(raw.form_factor());
        if let FormFactor::OutOfSpec(v) = form_factor {
            debug!(value = v, "form factor out of spec");
        }

        let memory_ty = MemoryType::from(raw.memory_ty());
        if let MemoryType::OutOfSpec(v) = memory_ty {
            debug!(value = v, "memory type out of spec");
        }

        let memory_technology =
            (len >= SIZE_AS_PER_3_2).then(|| MemoryTechnology::from(raw.memory_technology()));

        Ok(MemoryDevice {
            physical_memory_array_handle: raw.physical_memory_array_handle(),
            memory_error_information_handle: raw.memory_error_information_handle(),
            total_width: raw.total_width(),
            data_width: raw.data_width(),
            size_kb,
            size_mb,
            form_factor,
            device_set: raw.device_set(),
            device_locator: get_string(strings, raw.device_locator()),
            bank_locator: get_string(strings, raw.bank_locator()),
            memory_ty,
            ty_detail: get_ty_detail(raw.ty_detail()),
            speed: resolve_speed(raw.speed(), raw.extended_speed(), len),
            manufacturer: get_string(strings, raw.manufacturer()),
            serial_number: get_string(strings, raw.serial_number()),
            asset_tag: get_string(strings, raw.asset_tag()),
            part_number: get_string(strings, raw.part_number()),
            rank: raw.attributes() & ATTRIBUTES_RANK_MASK,
            configured_speed: resolve_speed(
                raw.configured_memory_speed(),
                raw.extended_configured_memory_speed(),
                len,
            ),
            minimum_voltage: raw.minimum_voltage(),
            maximum_voltage: raw.maximum_voltage(),
            configured_voltage: raw.configured_voltage(),
            memory_technology,
            firmware_version: get_string(strings, raw.firmware_version()),
        })
    }

    pub fn is_empty_slot(&self) -> bool {
        self.size_kb == 0
    }
}

fn check_length(len: usize) -> Result<(), Error> {
    if len < MemoryDeviceRaw::MIN_LENGTH {
        return Err(Error::InputTooShort {
            len,
            min: MemoryDeviceRaw::MIN_LENGTH,
        });
    }

    Ok(())
}

fn resolve_size(raw: &MemoryDeviceRaw, len: usize) -> (u64, u64) {
    let mut size = raw.size() as u64;
    if raw.size() == SIZE_IN_EXTENDED && len >= SIZE_AS_PER_2_7 {
        debug!(extended_size = raw.extended_size(), "size in extended field");
        size = raw.extended_size() as u64;
    }

    if raw.size() & SIZE_GRANULARITY_KB == 0 {
        (size * 1024, size)
    } else {
        (size, size / 1024)
    }
}

// 0x7FFF and 0xFFFF both defer to the extended field once SMBIOS 3.3 added it.
fn resolve_speed(speed: u16, extended: u32, len: usize) -> u32 {
    if (speed == 0x7FFF || speed == 0xFFFF) && len >= SIZE_AS_PER_3_3 {
        debug!(speed, extended, "speed in extended field");
        extended
    } else {
        speed as u32
    }
}

fn get_ty_detail(value: u16) -> Vec<TypeDetail> {
    let bits = BitField::from(value);
    TypeDetail::ALL
        .iter()
        .copied()
        .filter(|d| bits.test(d.bit()))
        .collect()
}

fn get_string<S: AsRef<str>>(strings: &[S], index: u8) -> String {
    get_string_by_index(strings, index)
        .map(str::to_string)
        .unwrap_or_default()
}
