//! MAC address normalization and OUI prefix extraction.

/// Normalize a MAC address into lowercase colon-separated IEEE-802 form.
/// Accepts colon, hyphen, or bare-hex input. Strings that don't contain
/// exactly 12 hex digits are returned unchanged.
pub fn normalize(mac: &str) -> String {
    let clean: String = mac.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    if clean.len() != 12 {
        return mac.to_string();
    }
    clean
        .as_bytes()
        .chunks(2)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or("00"))
        .collect::<Vec<&str>>()
        .join(":")
        .to_lowercase()
}

/// Extract the 24-bit OUI prefix (`xx:xx:xx`) from a MAC address, normalizing
/// first. Returns `None` if the address doesn't normalize to a full MAC.
pub fn oui_prefix(mac: &str) -> Option<String> {
    let normalized = normalize(mac);
    let mut parts = normalized.splitn(4, ':');
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if a.len() != 2 || b.len() != 2 || c.len() != 2 {
        return None;
    }
    Some(format!("{a}:{b}:{c}"))
}
