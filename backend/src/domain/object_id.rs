//! Object-id identifiers.
//!
//! An object-id is twelve bytes rendered as 24 lower-case hexadecimal
//! characters: a 4-byte big-endian Unix timestamp, 5 random bytes and a 3-byte
//! counter. Parsing accepts either hex case and normalises to lower case.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;

/// Number of raw bytes in an object-id.
pub const OBJECT_ID_LEN: usize = 12;
/// Number of hexadecimal characters in the textual form.
pub const OBJECT_ID_HEX_LEN: usize = OBJECT_ID_LEN * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Reasons an object-id string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    /// The input does not have exactly 24 characters.
    #[error("object id must be {expected} hexadecimal characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// The input contains a non-hexadecimal character.
    #[error("object id must only contain hexadecimal characters")]
    InvalidCharacter,
}

/// Twelve-byte document identifier.
///
/// # Examples
/// ```
/// use accounts::domain::ObjectId;
///
/// let id: ObjectId = "507F1F77BCF86CD799439011".parse().expect("valid object id");
/// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
/// assert!("not-an-id".parse::<ObjectId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generate a fresh identifier stamped with `at`.
    ///
    /// Timestamps outside the 32-bit range saturate.
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let seconds = u32::try_from(at.timestamp().max(0)).unwrap_or(u32::MAX);
        let process = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().r#gen());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().r#gen::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0_u8; OBJECT_ID_LEN];
        let (time_part, rest) = bytes.split_at_mut(4);
        time_part.copy_from_slice(&seconds.to_be_bytes());
        let (process_part, counter_part) = rest.split_at_mut(5);
        process_part.copy_from_slice(process);
        let counter_bytes = counter.to_be_bytes();
        counter_part.copy_from_slice(&counter_bytes[1..]);
        Self(bytes)
    }

    /// Creation time encoded in the first four bytes.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let [a, b, c, d, ..] = self.0;
        DateTime::from_timestamp(i64::from(u32::from_be_bytes([a, b, c, d])), 0)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != OBJECT_ID_HEX_LEN {
            return Err(ObjectIdError::InvalidLength {
                expected: OBJECT_ID_HEX_LEN,
                actual: s.chars().count(),
            });
        }
        let mut bytes = [0_u8; OBJECT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError::InvalidCharacter)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
