use thiserror::Error;

/// Failures raised by checked translation lookups.
///
/// View code uses the unchecked helpers (`Translator::t`) that render missing
/// data as an empty string; everything that decodes structured catalog data
/// goes through these variants instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown locale code: '{0}'")]
    UnknownLocale(String),

    #[error("[{locale}] missing translation key '{key}'")]
    MissingKey { locale: String, key: String },

    #[error("[{locale}] key '{key}' has shape {found}, expected {expected}")]
    ShapeMismatch {
        locale: String,
        key: String,
        expected: String,
        found: String,
    },

    #[error("[{locale}] record {index} under '{key}' is malformed: {detail}")]
    RecordDecode {
        locale: String,
        key: String,
        index: usize,
        detail: String,
    },
}

/// Failure of the positional merge between translated and local sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cannot merge {translated} translated entries with {local} local entries")]
    LengthMismatch { translated: usize, local: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_locale_and_key() {
        let err = LookupError::MissingKey {
            locale: "es".to_string(),
            key: "dashboard.menu".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[es]"));
        assert!(msg.contains("dashboard.menu"));
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = MergeError::LengthMismatch {
            translated: 4,
            local: 3,
        };
        assert_eq!(
            err.to_string(),
            "cannot merge 4 translated entries with 3 local entries"
        );
    }
}
