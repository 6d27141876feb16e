use super::error::Error;
use super::memory::MemoryDevice;
use super::structure::{Structures, TYPE_MEMORY_DEVICE};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

/// Memory devices of one structure table, in table order.
///
/// Empty sockets are kept; use [`Inventory::populated`] to skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    devices: Vec<MemoryDevice>,
}

impl Inventory {
    pub fn from_table(data: Bytes) -> Result<Self, Error> {
        let mut devices = vec![];
        for structure in Structures::new(data) {
            let structure = structure?;
            if structure.ty != TYPE_MEMORY_DEVICE {
                continue;
            }

            devices.push(MemoryDevice::from_structure(&structure)?);
        }

        debug!(count = devices.len(), "memory devices decoded");
        Ok(Inventory { devices })
    }

    pub fn devices(&self) -> &[MemoryDevice] {
        &self.devices
    }

    pub fn populated(&self) -> impl Iterator<Item = &MemoryDevice> {
        self.devices.iter().filter(|d| !d.is_empty_slot())
    }

    pub fn total_size_mb(&self) -> u64 {
        self.devices.iter().map(|d| d.size_mb).sum()
    }
}
