//! Deterministic primary keys derived from fixture record names.
//!
//! Every fixture record gets its primary key from its *name* rather than from
//! the database. Any record can therefore compute the key of any other record
//! without a round-trip, which is what lets relationships point at records
//! that have not been inserted yet.
//!
//! # Example
//!
//! ```
//! use reinhardt_fixtures::key::generate_key;
//!
//! assert_eq!(generate_key("Travis"), 1950325866);
//! assert_eq!(generate_key("Travis"), generate_key("Travis"));
//! ```

use sha1::{Digest, Sha1};

/// Number of leading decimal digits kept from the digest.
pub const KEY_DIGITS: usize = 10;

/// Derives a stable integer key from a record name.
///
/// The SHA-1 digest of `name` is read as an unsigned 160-bit integer, written
/// in base 10, and its leading [`KEY_DIGITS`] digits become the key. The
/// result is always below `10^10` and therefore fits in an `i64`.
pub fn generate_key(name: &str) -> i64 {
	let digest = Sha1::digest(name.as_bytes());
	let decimal = to_decimal(&digest);

	decimal
		.bytes()
		.take(KEY_DIGITS)
		.fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'))
}

/// Writes a big-endian unsigned integer in base 10.
fn to_decimal(bytes: &[u8]) -> String {
	let mut number = bytes.to_vec();
	let mut digits = Vec::with_capacity(bytes.len() * 3);

	// Repeated long division by 10; remainders come out least significant first.
	while number.iter().any(|&b| b != 0) {
		let mut remainder = 0u32;
		for byte in number.iter_mut() {
			let current = (remainder << 8) | u32::from(*byte);
			*byte = (current / 10) as u8;
			remainder = current % 10;
		}
		digits.push(b'0' + remainder as u8);
	}

	if digits.is_empty() {
		return "0".to_string();
	}

	digits.reverse();
	String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	#[rstest]
	#[case("Travis", 1950325866)]
	#[case("root", 1258629836)]
	#[case("endUser", 7340248209)]
	#[case("Diablo 3", 4684043086)]
	#[case("", 1245845410)]
	fn test_generate_key_known_values(#[case] name: &str, #[case] expected: i64) {
		assert_eq!(generate_key(name), expected);
	}

	#[rstest]
	fn test_generate_key_is_deterministic() {
		for name in ["admin", "guest", "Jane Doe", "ünïcödé"] {
			assert_eq!(generate_key(name), generate_key(name));
		}
	}

	#[rstest]
	fn test_generate_key_is_distinct_for_distinct_names() {
		let names: Vec<String> = (0..2000).map(|i| format!("record_{}", i)).collect();
		let keys: HashSet<i64> = names.iter().map(|n| generate_key(n)).collect();
		assert_eq!(keys.len(), names.len());
	}

	#[rstest]
	fn test_generate_key_stays_below_ten_digits() {
		for name in ["a", "b", "zzzzzzzz", "Travis"] {
			let key = generate_key(name);
			assert!(key >= 0);
			assert!(key < 10_000_000_000);
		}
	}

	#[rstest]
	fn test_to_decimal() {
		assert_eq!(to_decimal(&[0x00]), "0");
		assert_eq!(to_decimal(&[0x01, 0x00]), "256");
		assert_eq!(to_decimal(&[0xff, 0xff, 0xff, 0xff]), "4294967295");
	}
}
