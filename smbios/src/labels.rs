use serde::{Serialize, Serializer};
use std::fmt;

const OUT_OF_SPEC: &str = "Unknown/Reserved";

macro_rules! label_serde {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    Undefined,
    Other,
    Unknown,
    Simm,
    Sip,
    Chip,
    Dip,
    Zip,
    ProprietaryCard,
    Dimm,
    Tsop,
    RowOfChips,
    Rimm,
    SoDimm,
    Srimm,
    FbDimm,
    Die,
    OutOfSpec(u8),
}

impl FormFactor {
    pub fn label(&self) -> &'static str {
        match self {
            FormFactor::Undefined => "Undefined",
            FormFactor::Other => "Other",
            FormFactor::Unknown => "Unknown",
            FormFactor::Simm => "SIMM",
            FormFactor::Sip => "SIP",
            FormFactor::Chip => "Chip",
            FormFactor::Dip => "DIP",
            FormFactor::Zip => "ZIP",
            FormFactor::ProprietaryCard => "Proprietary Card",
            FormFactor::Dimm => "DIMM",
            FormFactor::Tsop => "TSOP",
            FormFactor::RowOfChips => "RowOfChips",
            FormFactor::Rimm => "RIMM",
            FormFactor::SoDimm => "SODIMM",
            FormFactor::Srimm => "SRIMM",
            FormFactor::FbDimm => "FBDIMM",
            FormFactor::Die => "Die",
            FormFactor::OutOfSpec(_) => OUT_OF_SPEC,
        }
    }
}

impl From<u8> for FormFactor {
    fn from(value: u8) -> Self {
        match value {
            0x00 => FormFactor::Undefined,
            0x01 => FormFactor::Other,
            0x02 => FormFactor::Unknown,
            0x03 => FormFactor::Simm,
            0x04 => FormFactor::Sip,
            0x05 => FormFactor::Chip,
            0x06 => FormFactor::Dip,
            0x07 => FormFactor::Zip,
            0x08 => FormFactor::ProprietaryCard,
            0x09 => FormFactor::Dimm,
            0x0A => FormFactor::Tsop,
            0x0B => FormFactor::RowOfChips,
            0x0C => FormFactor::Rimm,
            0x0D => FormFactor::SoDimm,
            0x0E => FormFactor::Srimm,
            0x0F => FormFactor::FbDimm,
            0x10 => FormFactor::Die,
            v => FormFactor::OutOfSpec(v),
        }
    }
}

label_serde!(FormFactor);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryType {
    Undefined,
    Other,
    Unknown,
    Dram,
    Edram,
    Vram,
    Sram,
    Ram,
    Rom,
    Flash,
    Eeprom,
    Feprom,
    Eprom,
    Cdram,
    ThreeDram,
    Sdram,
    Sgram,
    Rdram,
    Ddr,
    Ddr2,
    Ddr2FbDimm,
    /// 0x15..=0x17 are reserved by DSP0134.
    Reserved(u8),
    Ddr3,
    Fbd2,
    Ddr4,
    Lpddr,
    Lpddr2,
    Lpddr3,
    Lpddr4,
    LogicalNonVolatile,
    Hbm,
    Hbm2,
    Ddr5,
    Lpddr5,
    OutOfSpec(u8),
}

impl MemoryType {
    pub fn label(&self) -> &'static str {
        match self {
            MemoryType::Undefined => "Undefined",
            MemoryType::Other => "Other",
            MemoryType::Unknown => "Unknown",
            MemoryType::Dram => "DRAM",
            MemoryType::Edram => "EDRAM",
            MemoryType::Vram => "VRAM",
            MemoryType::Sram => "SRAM",
            MemoryType::Ram => "RAM",
            MemoryType::Rom => "ROM",
            MemoryType::Flash => "FLASH",
            MemoryType::Eeprom => "EEPROM",
            MemoryType::Feprom => "FEPROM",
            MemoryType::Eprom => "EPROM",
            MemoryType::Cdram => "CDRAM",
            MemoryType::ThreeDram => "3DRAM",
            MemoryType::Sdram => "SDRAM",
            MemoryType::Sgram => "SGRAM",
            MemoryType::Rdram => "RDRAM",
            MemoryType::Ddr => "DDR",
            MemoryType::Ddr2 => "DDR2",
            MemoryType::Ddr2FbDimm => "DDR2 FB-DIMM",
            MemoryType::Reserved(_) => "Reserved",
            MemoryType::Ddr3 => "DDR3",
            MemoryType::Fbd2 => "FBD2",
            MemoryType::Ddr4 => "DDR4",
            MemoryType::Lpddr => "LPDDR",
            MemoryType::Lpddr2 => "LPDDR2",
            MemoryType::Lpddr3 => "LPDDR3",
            MemoryType::Lpddr4 => "LPDDR4",
            MemoryType::LogicalNonVolatile => "Logical non-volatile device",
            MemoryType::Hbm => "HBM (High Bandwidth Memory)",
            MemoryType::Hbm2 => "HBM2 (High Bandwidth Memory Generation 2)",
            MemoryType::Ddr5 => "DDR5",
            MemoryType::Lpddr5 => "LPDDR5",
            MemoryType::OutOfSpec(_) => OUT_OF_SPEC,
        }
    }
}

impl From<u8> for MemoryType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => MemoryType::Undefined,
            0x01 => MemoryType::Other,
            0x02 => MemoryType::Unknown,
            0x03 => MemoryType::Dram,
            0x04 => MemoryType::Edram,
            0x05 => MemoryType::Vram,
            0x06 => MemoryType::Sram,
            0x07 => MemoryType::Ram,
            0x08 => MemoryType::Rom,
            0x09 => MemoryType::Flash,
            0x0A => MemoryType::Eeprom,
            0x0B => MemoryType::Feprom,
            0x0C => MemoryType::Eprom,
            0x0D => MemoryType::Cdram,
            0x0E => MemoryType::ThreeDram,
            0x0F => MemoryType::Sdram,
            0x10 => MemoryType::Sgram,
            0x11 => MemoryType::Rdram,
            0x12 => MemoryType::Ddr,
            0x13 => MemoryType::Ddr2,
            0x14 => MemoryType::Ddr2FbDimm,
            0x15..=0x17 => MemoryType::Reserved(value),
            0x18 => MemoryType::Ddr3,
            0x19 => MemoryType::Fbd2,
            0x1A => MemoryType::Ddr4,
            0x1B => MemoryType::Lpddr,
            0x1C => MemoryType::Lpddr2,
            0x1D => MemoryType::Lpddr3,
            0x1E => MemoryType::Lpddr4,
            0x1F => MemoryType::LogicalNonVolatile,
            0x20 => MemoryType::Hbm,
            0x21 => MemoryType::Hbm2,
            0x22 => MemoryType::Ddr5,
            0x23 => MemoryType::Lpddr5,
            v => MemoryType::OutOfSpec(v),
        }
    }
}

label_serde!(MemoryType);

/// One bit of the 16-bit Type Detail field. Discriminants are bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDetail {
    Reserved = 0,
    Other = 1,
    Unknown = 2,
    FastPaged = 3,
    StaticColumn = 4,
    PseudoStatic = 5,
    Rambus = 6,
    Synchronous = 7,
    Cmos = 8,
    Edo = 9,
    WindowDram = 10,
    CacheDram = 11,
    NonVolatile = 12,
    Registered = 13,
    Unbuffered = 14,
    Lrdimm = 15,
}

impl TypeDetail {
    /// Indexed by bit position.
    pub const ALL: [TypeDetail; 16] = [
        TypeDetail::Reserved,
        TypeDetail::Other,
        TypeDetail::Unknown,
        TypeDetail::FastPaged,
        TypeDetail::StaticColumn,
        TypeDetail::PseudoStatic,
        TypeDetail::Rambus,
        TypeDetail::Synchronous,
        TypeDetail::Cmos,
        TypeDetail::Edo,
        TypeDetail::WindowDram,
        TypeDetail::CacheDram,
        TypeDetail::NonVolatile,
        TypeDetail::Registered,
        TypeDetail::Unbuffered,
        TypeDetail::Lrdimm,
    ];

    pub fn bit(&self) -> u32 {
        *self as u32
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeDetail::Reserved => "Reserved",
            TypeDetail::Other => "Other",
            TypeDetail::Unknown => "Unknown",
            TypeDetail::FastPaged => "Fast-paged",
            TypeDetail::StaticColumn => "Static column",
            TypeDetail::PseudoStatic => "Pseudo-static",
            TypeDetail::Rambus => "RAMBUS",
            TypeDetail::Synchronous => "Synchronous",
            TypeDetail::Cmos => "CMOS",
            TypeDetail::Edo => "EDO",
            TypeDetail::WindowDram => "Window DRAM",
            TypeDetail::CacheDram => "Cache DRAM",
            TypeDetail::NonVolatile => "Non-volatile",
            TypeDetail::Registered => "Registered (Buffered)",
            TypeDetail::Unbuffered => "Unbuffered (Unregistered)",
            TypeDetail::Lrdimm => "LRDIMM",
        }
    }
}

label_serde!(TypeDetail);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTechnology {
    Other,
    Unknown,
    Dram,
    NvdimmN,
    NvdimmF,
    NvdimmP,
    IntelOptane,
    OutOfSpec(u8),
}

impl MemoryTechnology {
    pub fn label(&self) -> &'static str {
        match self {
            MemoryTechnology::Other => "Other",
            MemoryTechnology::Unknown => "Unknown",
            MemoryTechnology::Dram => "DRAM",
            MemoryTechnology::NvdimmN => "NVDIMM-N",
            MemoryTechnology::NvdimmF => "NVDIMM-F",
            MemoryTechnology::NvdimmP => "NVDIMM-P",
            MemoryTechnology::IntelOptane => "Intel Optane persistent memory",
            MemoryTechnology::OutOfSpec(_) => OUT_OF_SPEC,
        }
    }
}

impl From<u8> for MemoryTechnology {
    fn from(value: u8) -> Self {
        match value {
            0x01 => MemoryTechnology::Other,
            0x02 => MemoryTechnology::Unknown,
            0x03 => MemoryTechnology::Dram,
            0x04 => MemoryTechnology::NvdimmN,
            0x05 => MemoryTechnology::NvdimmF,
            0x06 => MemoryTechnology::NvdimmP,
            0x07 => MemoryTechnology::IntelOptane,
            v => MemoryTechnology::OutOfSpec(v),
        }
    }
}

label_serde!(MemoryTechnology);
