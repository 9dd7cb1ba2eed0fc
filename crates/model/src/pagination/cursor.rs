use serde::{Deserialize, Serialize};

/// Sentinel id meaning "nothing consumed yet".
pub const NO_ID: i64 = -1;

/// Persisted resume point of a log stream.
///
/// Serialized as `{"lastID": n}`. Files written by the legacy reader used
/// `LastID`, which is still accepted on read. Unknown fields are ignored, a
/// missing id is not.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    #[serde(rename = "lastID", alias = "LastID")]
    pub last_id: i64,
}

impl Default for CursorState {
    fn default() -> Self {
        Self { last_id: NO_ID }
    }
}

impl CursorState {
    pub fn new(last_id: i64) -> Self {
        Self { last_id }
    }

    /// True until the first non-empty batch has been recorded.
    pub fn is_unset(&self) -> bool {
        self.last_id == NO_ID
    }

    /// Cursor after consuming a batch whose last row has `id`.
    ///
    /// Never moves backwards: an `id` below the current position leaves the
    /// cursor where it is.
    pub fn advance_to(self, id: i64) -> Self {
        Self {
            last_id: self.last_id.max(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        let state = CursorState::default();
        assert_eq!(state.last_id, -1);
        assert!(state.is_unset());
    }

    #[test]
    fn serializes_with_camel_case_key() {
        let json = serde_json::to_string(&CursorState::new(42)).unwrap();
        assert_eq!(json, r#"{"lastID":42}"#);
    }

    #[test]
    fn reads_legacy_key_and_ignores_unknown_fields() {
        let state: CursorState =
            serde_json::from_str(r#"{ "LastID": 17, "host": "hs3" }"#).unwrap();
        assert_eq!(state.last_id, 17);
    }

    #[test]
    fn missing_key_is_rejected() {
        assert!(serde_json::from_str::<CursorState>("{}").is_err());
    }

    #[test]
    fn advance_is_monotonic() {
        let state = CursorState::new(10);
        assert_eq!(state.advance_to(12).last_id, 12);
        assert_eq!(state.advance_to(3).last_id, 10);
    }
}
