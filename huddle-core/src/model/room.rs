use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const SEGMENTS: usize = 3;
const SEGMENT_LEN: usize = 3;
/// Bytes 6 and 8 of a v4 UUID carry the version and variant bits.
const RANDOM_BYTES: [usize; 9] = [0, 1, 2, 3, 4, 5, 7, 9, 10];

/// Free-form room token. The relay accepts any string; `generate` produces
/// the `abc-def-ghi` shape handed out to people creating a new room.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        let random = Uuid::new_v4();
        let bytes = random.as_bytes();
        let letters: Vec<char> = RANDOM_BYTES
            .iter()
            .take(SEGMENTS * SEGMENT_LEN)
            .map(|&i| char::from(b'a' + bytes[i] % 26))
            .collect();

        let token = letters
            .chunks(SEGMENT_LEN)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("-");

        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
