use itertools::Itertools;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GelError {
    /// Requested ladder name is not in the registry. The message enumerates
    /// every recognized name; there is no fallback ladder.
    UnknownLadder {
        requested: String,
        recognized: Vec<String>,
    },
    /// A fragment size that is not a usable number (NaN or infinite).
    /// Zero and negative sizes are valid and clamp to the domain minimum.
    InvalidSize { lane: Option<String>, value: f64 },
    String(String),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Error for GelError {}

impl fmt::Display for GelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GelError::UnknownLadder {
                requested,
                recognized,
            } => write!(
                f,
                "Ladder type '{requested}' unrecognized! Expected ladders: {}",
                recognized.iter().map(|name| format!("\"{name}\"")).join(", ")
            ),
            GelError::InvalidSize {
                lane: Some(lane),
                value,
            } => write!(
                f,
                "Sample '{lane}' has a fragment size that is not a usable number ({value})"
            ),
            GelError::InvalidSize { lane: None, value } => {
                write!(f, "Fragment size is not a usable number ({value})")
            }
            GelError::String(message) => write!(f, "{message}"),
            GelError::Io(e) => write!(f, "I/O error: {e}"),
            GelError::Serde(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl From<String> for GelError {
    fn from(err: String) -> Self {
        GelError::String(err)
    }
}

impl From<std::io::Error> for GelError {
    fn from(err: std::io::Error) -> Self {
        GelError::Io(err)
    }
}

impl From<serde_json::Error> for GelError {
    fn from(err: serde_json::Error) -> Self {
        GelError::Serde(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ladder_message_lists_names() {
        let err = GelError::UnknownLadder {
            requested: "2-log".to_string(),
            recognized: vec!["1kb+".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("'2-log'"));
        assert!(text.contains("\"1kb+\""));
    }

    #[test]
    fn test_invalid_size_message_names_lane() {
        let err = GelError::InvalidSize {
            lane: Some("Sample 3".to_string()),
            value: f64::NAN,
        };
        assert!(err.to_string().contains("Sample 3"));
    }
}
