/// FNV-1a hash of a string, used to seed deterministic pseudo-analytics.
/// Stable across runs and platforms, unlike `DefaultHasher`.
pub fn fnv1a_hash(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Lower-cased, hyphen-joined form of a display string ("Non-Farm Payrolls"
/// -> "non-farm-payrolls").
pub fn slug(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_stable() {
        // Same input always hashes the same
        assert_eq!(fnv1a_hash("cpi-yoy"), fnv1a_hash("cpi-yoy"));
        assert_ne!(fnv1a_hash("cpi-yoy"), fnv1a_hash("cpi-mom"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Non-Farm Payrolls"), "non-farm-payrolls");
        assert_eq!(slug("  United   States "), "united-states");
        assert_eq!(slug("CPI YoY"), "cpi-yoy");
    }
}
