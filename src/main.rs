pub mod error;

use self::error::Error;
use bytes::Bytes;
use clap::Parser;
use smbios::{Inventory, MemoryDevice};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DMI_PATH: &str = "/sys/firmware/dmi/tables/DMI";

#[derive(Parser)]
#[command(name = "memdev-dump")]
#[command(about = "Decode SMBIOS memory devices from a structure table as JSON lines")]
struct Cli {
    /// Raw SMBIOS structure table
    #[arg(short, long, env = "MEMDEV_DMI_TABLE", default_value = DMI_PATH)]
    table: PathBuf,

    /// Leave out sockets without a module
    #[arg(long)]
    skip_empty: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(path = %cli.table.display(), "reading structure table");
    let data = Bytes::from(fs::read(&cli.table)?);

    let inventory = Inventory::from_table(data)?;
    tracing::info!(
        devices = inventory.devices().len(),
        total_mb = inventory.total_size_mb(),
        "inventory decoded"
    );

    write_devices(&inventory, cli.skip_empty, std::io::stdout().lock())
}

/// Writes one JSON object per line for each selected device.
fn write_devices(
    inventory: &Inventory,
    skip_empty: bool,
    mut out: impl Write,
) -> Result<(), Error> {
    let devices: Vec<&MemoryDevice> = if skip_empty {
        inventory.populated().collect()
    } else {
        inventory.devices().iter().collect()
    };

    for device in devices {
        serde_json::to_writer(&mut out, device)?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn memory_device(handle: u16, size_mb: u16, locator: &str) -> Vec<u8> {
        let mut body = vec![0u8; 24];
        body[8..10].copy_from_slice(&size_mb.to_le_bytes());
        body[10] = 0x09;
        body[12] = 1;
        body[14] = 0x1A;

        let mut s = vec![17, (body.len() + 4) as u8];
        s.extend_from_slice(&handle.to_le_bytes());
        s.extend_from_slice(&body);
        s.extend_from_slice(locator.as_bytes());
        s.extend_from_slice(b"\0\0");
        s
    }

    fn inventory() -> Inventory {
        let table = [
            memory_device(0x1100, 8192, "DIMM_A1"),
            memory_device(0x1101, 0, "DIMM_A2"),
            vec![127, 4, 0xFF, 0xFE, 0, 0],
        ]
        .concat();

        Inventory::from_table(Bytes::from(table)).unwrap()
    }

    fn json_lines(skip_empty: bool) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        write_devices(&inventory(), skip_empty, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn every_socket_is_written_by_default() {
        let lines = json_lines(false);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["device_locator"], "DIMM_A1");
        assert_eq!(lines[0]["size_mb"], 8192);
        assert_eq!(lines[0]["memory_ty"], "DDR4");
        assert_eq!(lines[1]["device_locator"], "DIMM_A2");
        assert_eq!(lines[1]["size_mb"], 0);
    }

    #[test]
    fn skip_empty_leaves_out_unpopulated_sockets() {
        let lines = json_lines(true);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["device_locator"], "DIMM_A1");
        assert_eq!(lines[0]["form_factor"], "DIMM");
    }

    #[test]
    fn table_path_falls_back_to_env_then_sysfs() {
        std::env::remove_var("MEMDEV_DMI_TABLE");
        let cli = Cli::try_parse_from(["memdev-dump"]).unwrap();
        assert_eq!(cli.table, Path::new(DMI_PATH));
        assert!(!cli.skip_empty);

        std::env::set_var("MEMDEV_DMI_TABLE", "/tmp/dmi.bin");
        let cli = Cli::try_parse_from(["memdev-dump"]).unwrap();
        assert_eq!(cli.table, Path::new("/tmp/dmi.bin"));

        let cli =
            Cli::try_parse_from(["memdev-dump", "--table", "table.bin", "--skip-empty"]).unwrap();
        assert_eq!(cli.table, Path::new("table.bin"));
        assert!(cli.skip_empty);
        std::env::remove_var("MEMDEV_DMI_TABLE");
    }
}
