use crate::error::CoreError;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Normalizes a raw phone value to the canonical dedup key: digits only,
/// 10-15 characters. Spaces, dashes and a leading country-code plus are
/// stripped; anything else is rejected.
pub fn normalize_phone(value: &str) -> Result<String, CoreError> {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        match ch {
            ' ' | '-' | '+' => continue,
            _ if ch.is_ascii_digit() => out.push(ch),
            _ => return Err(CoreError::InvalidPhone(value.trim().to_string())),
        }
    }

    if out.len() < MIN_PHONE_DIGITS || out.len() > MAX_PHONE_DIGITS {
        return Err(CoreError::InvalidPhone(value.trim().to_string()));
    }

    Ok(out)
}

/// Checks that a value is already in canonical form. Callers normalize
/// before reconciliation; the engine still refuses anything else.
pub fn ensure_normalized_phone(value: &str) -> Result<(), CoreError> {
    if value.len() < MIN_PHONE_DIGITS
        || value.len() > MAX_PHONE_DIGITS
        || !value.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(CoreError::InvalidPhone(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_normalized_phone, normalize_phone};

    #[test]
    fn normalize_phone_strips_separators() {
        let value = normalize_phone(" 98765-432 10 ").unwrap();
        assert_eq!(value, "9876543210");
    }

    #[test]
    fn normalize_phone_strips_country_code_plus() {
        let value = normalize_phone("+91 98765 43210").unwrap();
        assert_eq!(value, "919876543210");
    }

    #[test]
    fn normalize_phone_rejects_letters() {
        assert!(normalize_phone("98765abcde").is_err());
    }

    #[test]
    fn normalize_phone_rejects_short_and_long_values() {
        assert!(normalize_phone("12345").is_err());
        assert!(normalize_phone("1234567890123456").is_err());
    }

    #[test]
    fn ensure_normalized_accepts_digit_strings_only() {
        assert!(ensure_normalized_phone("9876543210").is_ok());
        assert!(ensure_normalized_phone("+919876543210").is_err());
        assert!(ensure_normalized_phone("987654321").is_err());
    }
}
