//! Read-only view of the local Bluetooth adapters and their known devices.
//!
//! Startup only needs to check that a requested adapter or device exists, so
//! the inventory is read from the kernel's sysfs adapter list and the BlueZ
//! storage directory rather than from a live bus connection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{Adapter, Device};

/// Adapter and device lookups consulted by the validators.
pub trait Bluetooth {
    /// All adapters, in a stable order.
    fn adapters(&self) -> Vec<Adapter>;

    /// Devices known to `adapter`.
    fn devices(&self, adapter: &Adapter) -> Vec<Device>;

    /// Adapter selected when none was requested.
    fn default_adapter(&self) -> Option<Adapter> {
        self.adapters().into_iter().next()
    }
}

const SYSFS_ROOT: &str = "/sys/class/bluetooth";
const STORAGE_ROOT: &str = "/var/lib/bluetooth";
const BLUEZ_OBJECT_ROOT: &str = "/org/bluez";

fn address_pattern() -> &'static Regex {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    ADDRESS.get_or_init(|| {
        Regex::new(r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2}){5}$").expect("valid address pattern")
    })
}

/// Inventory backed by sysfs and BlueZ's on-disk storage.
pub struct SystemBluetooth {
    sysfs_root: PathBuf,
    storage_root: PathBuf,
}

impl Default for SystemBluetooth {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBluetooth {
    /// Inventory rooted at the standard system locations.
    pub fn new() -> Self {
        Self::with_roots(SYSFS_ROOT, STORAGE_ROOT)
    }

    /// Inventory rooted elsewhere (used by tests).
    pub fn with_roots(sysfs_root: impl Into<PathBuf>, storage_root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            storage_root: storage_root.into(),
        }
    }

    /// Controller address exposed by the kernel, when available.
    fn adapter_address(&self, adapter: &Adapter) -> Option<String> {
        let raw = fs::read_to_string(self.sysfs_root.join(adapter.id()).join("address")).ok()?;
        let address = raw.trim().to_ascii_uppercase();
        address_pattern().is_match(&address).then_some(address)
    }

    /// Storage directories that may hold devices for `adapter`.
    fn storage_dirs(&self, adapter: &Adapter) -> Vec<PathBuf> {
        if let Some(address) = self.adapter_address(adapter) {
            return vec![self.storage_root.join(address)];
        }

        // Without a kernel-provided address every adapter's storage is consulted.
        address_entries(&self.storage_root)
            .into_iter()
            .map(|(_, path)| path)
            .collect()
    }
}

impl Bluetooth for SystemBluetooth {
    fn adapters(&self) -> Vec<Adapter> {
        let Ok(entries) = fs::read_dir(&self.sysfs_root) else {
            debug!("No adapter list at {}", self.sysfs_root.display());
            return Vec::new();
        };

        let mut ids: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            // hciN:M entries are connections, not controllers
            .filter(|name| name.starts_with("hci") && !name.contains(':'))
            .collect();
        ids.sort_by_key(|id| (id.len(), id.clone()));

        ids.into_iter()
            .map(|id| {
                let name = fs::read_to_string(self.sysfs_root.join(&id).join("name"))
                    .map(|n| n.trim().to_string())
                    .ok()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| id.clone());
                Adapter {
                    name,
                    path: format!("{}/{}", BLUEZ_OBJECT_ROOT, id),
                }
            })
            .collect()
    }

    fn devices(&self, adapter: &Adapter) -> Vec<Device> {
        let mut devices: Vec<Device> = self
            .storage_dirs(adapter)
            .iter()
            .flat_map(|dir| address_entries(dir))
            .map(|(address, path)| Device {
                name: read_device_name(&path.join("info")),
                address,
            })
            .collect();
        devices.sort_by(|a, b| a.address.cmp(&b.address));
        devices.dedup_by(|a, b| a.address == b.address);
        devices
    }
}

/// Subdirectories of `dir` named like a hardware address.
fn address_entries(dir: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| {
            let name = e.file_name().into_string().ok()?;
            address_pattern()
                .is_match(&name)
                .then(|| (name, e.path()))
        })
        .collect()
}

/// `Name=` line from a BlueZ device `info` file.
fn read_device_name(info: &Path) -> Option<String> {
    let content = fs::read_to_string(info).ok()?;
    content
        .lines()
        .find_map(|line| line.strip_prefix("Name="))
        .map(|name| name.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, SystemBluetooth) {
        let dir = TempDir::new().unwrap();
        let sysfs = dir.path().join("sys");
        let storage = dir.path().join("lib");

        fs::create_dir_all(sysfs.join("hci0")).unwrap();
        fs::create_dir_all(sysfs.join("hci10")).unwrap();
        fs::create_dir_all(sysfs.join("hci1")).unwrap();
        fs::create_dir_all(sysfs.join("hci0:12")).unwrap();
        fs::write(sysfs.join("hci1").join("address"), "00:1a:7d:da:71:13\n").unwrap();

        let first = storage.join("00:1A:7D:DA:71:13");
        fs::create_dir_all(first.join("AA:BB:CC:DD:EE:FF")).unwrap();
        fs::write(
            first.join("AA:BB:CC:DD:EE:FF").join("info"),
            "[General]\nName=Headphones\n",
        )
        .unwrap();
        fs::create_dir_all(first.join("cache")).unwrap();

        let second = storage.join("11:22:33:44:55:66");
        fs::create_dir_all(second.join("01:02:03:04:05:06")).unwrap();

        let bt = SystemBluetooth::with_roots(sysfs, storage);
        (dir, bt)
    }

    #[test]
    fn test_adapters_sorted_without_connections() {
        let (_dir, bt) = fixture();
        let ids: Vec<String> = bt.adapters().iter().map(|a| a.id().to_string()).collect();
        assert_eq!(ids, vec!["hci0", "hci1", "hci10"]);
        assert_eq!(bt.default_adapter().unwrap().path, "/org/bluez/hci0");
    }

    #[test]
    fn test_devices_use_adapter_address_when_known() {
        let (_dir, bt) = fixture();
        let hci1 = bt.adapters().into_iter().find(|a| a.id() == "hci1").unwrap();
        let devices = bt.devices(&hci1);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(devices[0].name.as_deref(), Some("Headphones"));
    }

    #[test]
    fn test_devices_fall_back_to_all_storage() {
        let (_dir, bt) = fixture();
        let hci0 = bt.adapters().into_iter().next().unwrap();
        let addresses: Vec<String> = bt.devices(&hci0).into_iter().map(|d| d.address).collect();
        assert_eq!(addresses, vec!["01:02:03:04:05:06", "AA:BB:CC:DD:EE:FF"]);
    }

    #[test]
    fn test_missing_roots_are_empty() {
        let dir = TempDir::new().unwrap();
        let bt = SystemBluetooth::with_roots(dir.path().join("none"), dir.path().join("none"));
        assert!(bt.adapters().is_empty());
        assert!(bt.default_adapter().is_none());
    }
}
