use super::models::AppState;

/// Serializes every persisted field of the state as JSON.
///
/// The text input buffer lives outside `AppState` and is never written.
pub fn encode(state: &AppState) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(state).map_err(|e| CodecError::Encode(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> Result<AppState, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

#[derive(Debug)]
pub enum CodecError {
    Encode(String),
    Decode(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Encode(msg) => {
                write!(f, "Failed to encode checklist state: {}", msg)
            }
            CodecError::Decode(msg) => {
                write!(f, "Stored checklist state is corrupt or incompatible: {}", msg)
            }
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::models::{View, arb_app_state};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        #[test]
        fn round_trip_holds_for_any_valid_state(state in arb_app_state()) {
            let bytes = encode(&state).unwrap();
            prop_assert_eq!(decode(&bytes).unwrap(), state);
        }
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let mut state = AppState::seeded();
        state.push_item("Buy milk".to_string());
        state.selected.extend([0, 2]);
        state.view = View::Add;

        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_round_trip_empty_list() {
        let state = AppState::new(Vec::new());
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_encoding_uses_stable_field_names() {
        let bytes = encode(&AppState::seeded()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"{"items":["Do a thing","do another thing"],"cursor":0,"selected":[],"view":"list"}"#
        );
    }

    #[test]
    fn test_decode_without_view_defaults_to_list() {
        let state = decode(br#"{"items":["x"],"cursor":0,"selected":[0]}"#).unwrap();
        assert_eq!(state.view, View::List);
        assert_eq!(state.selected, BTreeSet::from([0]));
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let err = decode(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_decode_unknown_view_is_an_error() {
        let result = decode(br#"{"items":[],"cursor":0,"selected":[],"view":"edit"}"#);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }
}
