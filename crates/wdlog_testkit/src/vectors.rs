//! Record encoding test vectors.
//!
//! These pin the on-media byte layout so that firmware written in any
//! language can be checked against the same images.

use serde::{Deserialize, Serialize};

/// A test vector that can be shared with device firmware tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Timestamp in seconds.
    pub time: u32,
    /// Event code byte.
    pub event: u8,
    /// Encoded record (hex).
    pub encoded_hex: String,
    /// Expected error message when decoding should fail.
    pub expected_error: Option<String>,
}

fn vector(id: &str, description: &str, time: u32, event: u8, encoded_hex: &str) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        time,
        event,
        encoded_hex: encoded_hex.into(),
        expected_error: None,
    }
}

/// Record encoding vectors.
pub fn record_vectors() -> Vec<TestVector> {
    vec![
        vector("empty", "Empty sentinel", 0, 0, "0000000000"),
        vector("boot_1", "Boot at t=1", 1, 1, "0100000001"),
        vector("reset_1", "Reset at t=1", 1, 2, "0100000002"),
        vector(
            "boot_epoch",
            "Boot at 2023-11-14T22:13:20Z",
            1_700_000_000,
            1,
            "00f1536501",
        ),
        vector(
            "reset_max",
            "Reset at the largest timestamp",
            u32::MAX,
            2,
            "ffffffff02",
        ),
        vector(
            "byte_order",
            "Little-endian time",
            0x0403_0201,
            1,
            "0102030401",
        ),
    ]
}

/// Vectors that must fail to decode.
pub fn invalid_record_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            expected_error: Some("invalid event code: 0x03".into()),
            ..vector("code_3", "First unassigned event code", 0, 3, "0000000003")
        },
        TestVector {
            expected_error: Some("invalid event code: 0xff".into()),
            ..vector("erased", "Factory-erased EEPROM bytes", u32::MAX, 0xFF, "ffffffffff")
        },
    ]
}

/// Encodes bytes as lowercase hexadecimal.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes a hexadecimal string to bytes.
///
/// # Panics
///
/// Panics on malformed input; intended for test data only.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

/// Generate all test vectors as JSON.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        records: record_vectors(),
        invalid: invalid_record_vectors(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    records: Vec<TestVector>,
    invalid: Vec<TestVector>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdlog_codec::{LogEvent, LogRecord, Timestamp};

    #[test]
    fn record_vectors_encode() {
        for v in record_vectors() {
            let event = LogEvent::from_byte(v.event).unwrap();
            let record = LogRecord::new(event, Timestamp::new(v.time));
            assert_eq!(
                hex_encode(&record.encode()),
                v.encoded_hex,
                "Vector {} failed: {}",
                v.id,
                v.description
            );
            assert_eq!(LogRecord::decode(&hex_decode(&v.encoded_hex)).unwrap(), record);
        }
    }

    #[test]
    fn invalid_vectors_fail() {
        for v in invalid_record_vectors() {
            let err = LogRecord::decode(&hex_decode(&v.encoded_hex)).unwrap_err();
            assert_eq!(Some(err.to_string()), v.expected_error, "Vector {}", v.id);
        }
    }

    #[test]
    fn vectors_json_roundtrip() {
        let json = all_vectors_json();
        let parsed: AllTestVectors = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.records.len(), record_vectors().len());
        assert_eq!(parsed.invalid.len(), 2);
    }
}
