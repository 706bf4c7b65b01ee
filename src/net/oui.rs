//! OUI Resolver — a static, read-only MAC-vendor lookup table.
//!
//! No network I/O: this is a curated table of IEEE-assigned OUI prefixes
//! covering common consumer/IoT/virtualization vendors, not a full copy of
//! the public IEEE registry.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::mac;

static OUI_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("aa:bb:cc", "Acme");
    table.insert("3c:6d:66", "Sagemcom Broadband SAS");
    table.insert("b8:27:eb", "Raspberry Pi Foundation");
    table.insert("dc:a6:32", "Raspberry Pi Trading Ltd");
    table.insert("e4:5f:01", "Raspberry Pi Trading Ltd");
    table.insert("24:6f:28", "Espressif Inc.");
    table.insert("ec:fa:bc", "Espressif Inc.");
    table.insert("18:fe:34", "Espressif Inc.");
    table.insert("a0:20:a6", "Espressif Inc.");
    table.insert("b0:be:76", "Tuya Smart Inc.");
    table.insert("f0:fe:6b", "Tuya Smart Inc.");
    table.insert("68:57:2d", "Tuya Smart Inc.");
    table.insert("00:17:88", "Philips Lighting BV");
    table.insert("00:50:56", "VMware, Inc.");
    table.insert("00:0c:29", "VMware, Inc.");
    table.insert("08:00:27", "Oracle VirtualBox");
    table.insert("00:1b:63", "Apple, Inc.");
    table.insert("3c:5a:b4", "Google, Inc.");
    table.insert("64:16:66", "Hewlett Packard");
    table.insert("00:1f:29", "Hewlett Packard");
    table.insert("00:00:48", "Seiko Epson Corporation");
    table
});

/// Resolve a MAC address to a vendor name via its OUI prefix. Returns `None`
/// for prefixes not in the static table.
pub fn lookup(mac_addr: &str) -> Option<String> {
    let prefix = mac::oui_prefix(mac_addr)?;
    OUI_TABLE.get(prefix.as_str()).map(|vendor| vendor.to_string())
}
