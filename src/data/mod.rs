//! # Test Data Generation
//!
//! Random and time-based values for request payloads, so repeated runs
//! never collide on unique-constrained fields.

use rand::Rng;

const ALPHA: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMERIC: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random UUID (v4) as a string.
pub fn uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Random alphabetic string of the given length.
pub fn random_string(length: usize) -> String {
    random_from(ALPHA, length)
}

/// Random alphanumeric string of the given length.
pub fn random_alphanumeric(length: usize) -> String {
    random_from(ALPHANUMERIC, length)
}

/// Random integer in `[min, max]`.
pub fn random_number(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// Random lowercase email on the test domain.
pub fn random_email() -> String {
    format!("{}@test.com", random_string(8).to_lowercase())
}

/// Random 10-digit phone number.
pub fn random_phone() -> String {
    random_from(NUMERIC, 10)
}

/// Compact timestamp (`yyyyMMddHHmmss`).
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Unique name: `{prefix}_{timestamp}_{4 random chars}`.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}_{}", timestamp(), random_alphanumeric(4))
}

fn random_from(charset: &[u8], length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_strings_have_requested_length() {
        assert_eq!(random_string(5).len(), 5);
        assert_eq!(random_alphanumeric(12).len(), 12);
        assert_eq!(random_phone().len(), 10);
    }

    #[test]
    fn random_number_respects_bounds() {
        for _ in 0..100 {
            let n = random_number(1, 10);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn email_has_expected_shape() {
        let email = random_email();
        assert!(email.ends_with("@test.com"));
        assert_eq!(email, email.to_lowercase());
    }

    #[test]
    fn uuids_are_unique() {
        assert_ne!(uuid(), uuid());
    }

    #[test]
    fn timestamp_is_fourteen_digits() {
        let ts = timestamp();
        assert_eq!(ts.len(), 14);
        assert!(ts.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn unique_names_carry_the_prefix() {
        let name = unique_name("catalog");
        assert!(name.starts_with("catalog_"));
        assert_ne!(name, unique_name("catalog"));
    }
}
