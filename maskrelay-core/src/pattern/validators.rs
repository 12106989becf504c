//! Named validator hooks resolved at pack-load time.
//!
//! A validator takes the matched substring and returns pass/fail. Unknown
//! validator names fail pack loading. `us_ssn_checksum` and
//! `uk_nino_checksum` are structural checks beyond a bare regex match.
//! License: Apache-2.0

use crate::error::MaskError;

/// Resolves a validator name to a function pointer, or `Err` if unknown.
pub fn resolve(name: &str) -> Result<fn(&str) -> bool, MaskError> {
    match name {
        "luhn" => Ok(luhn_checksum),
        "us_ssn_checksum" => Ok(is_valid_ssn),
        "uk_nino_checksum" => Ok(is_valid_uk_nino),
        other => Err(MaskError::ValidatorUnknown(other.to_string())),
    }
}

/// Standard mod-10 (Luhn) checksum over the digits of `s`, ignoring any
/// spaces or dashes used as grouping separators.
pub fn luhn_checksum(s: &str) -> bool {
    let digits: Vec<u32> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default();

    if digits.len() < 2 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Structural validation of a US SSN against known-invalid area/group/serial
/// ranges.
pub fn is_valid_ssn(ssn: &str) -> bool {
    let parts: Vec<&str> = ssn.split('-').collect();
    if parts.len() != 3 {
        return false;
    }
    let (area, group, serial) = (parts[0], parts[1], parts[2]);

    if area.len() != 3 || !area.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if group.len() != 2 || !group.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if serial.len() != 4 || !serial.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let (area_num, group_num, serial_num) = match (
        area.parse::<u16>(),
        group.parse::<u8>(),
        serial.parse::<u16>(),
    ) {
        (Ok(a), Ok(g), Ok(s)) => (a, g, s),
        _ => return false,
    };

    if area_num == 0 || area_num == 666 || area_num >= 900 || (700..=729).contains(&area_num) {
        return false;
    }
    if group_num == 0 || serial_num == 0 {
        return false;
    }
    true
}

/// Structural validation of a UK National Insurance Number.
pub fn is_valid_uk_nino(nino: &str) -> bool {
    const NINO_LENGTH: usize = 9;
    let normalized: String = nino
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if normalized.len() != NINO_LENGTH {
        return false;
    }
    let chars: Vec<char> = normalized.chars().collect();
    let prefix = &normalized[0..2];

    if !chars[0].is_ascii_alphabetic() || !chars[1].is_ascii_alphabetic() {
        return false;
    }
    if !chars[2..8].iter().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if !chars[8].is_ascii_alphabetic() {
        return false;
    }

    const INVALID_PREFIXES: [&str; 11] =
        ["BF", "BG", "EH", "GB", "JE", "NK", "KN", "LI", "NT", "TN", "ZZ"];
    if INVALID_PREFIXES.contains(&prefix) {
        return false;
    }

    const INVALID_PREFIX_CHARS: [char; 7] = ['D', 'F', 'I', 'Q', 'U', 'V', 'O'];
    if INVALID_PREFIX_CHARS.contains(&chars[0]) || INVALID_PREFIX_CHARS.contains(&chars[1]) {
        return false;
    }

    const VALID_SUFFIX_CHARS: [char; 4] = ['A', 'B', 'C', 'D'];
    VALID_SUFFIX_CHARS.contains(&chars[8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_accepts_known_valid_card() {
        assert!(luhn_checksum("4111-1111-1111-1111"));
    }

    #[test]
    fn luhn_rejects_tampered_card() {
        assert!(!luhn_checksum("4111-1111-1111-1112"));
    }

    #[test]
    fn ssn_rejects_invalid_area_number() {
        assert!(!is_valid_ssn("666-12-3456"));
        assert!(!is_valid_ssn("000-12-3456"));
    }

    #[test]
    fn ssn_accepts_structurally_valid_number() {
        assert!(is_valid_ssn("123-45-6789"));
    }

    #[test]
    fn nino_rejects_known_invalid_prefix() {
        assert!(!is_valid_uk_nino("BG123456C"));
    }

    #[test]
    fn nino_accepts_structurally_valid_number() {
        assert!(is_valid_uk_nino("AB123456C"));
    }

    #[test]
    fn unknown_validator_name_is_rejected() {
        assert!(resolve("does_not_exist").is_err());
    }
}
