pub mod bitfield;
pub mod error;
pub mod inventory;
pub mod labels;
pub mod memory;
pub mod structure;

pub use self::inventory::Inventory;
pub use self::labels::{FormFactor, MemoryTechnology, MemoryType, TypeDetail};
pub use self::memory::{MemoryDevice, MemoryDeviceRaw};
pub use self::structure::{RawStructure, Structures};
