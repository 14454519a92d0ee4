//! Errors that can be produced while reading, scanning, and writing layouts.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed sequence record {idx} from {origin}: {source}")]
    Format {
        origin: String,
        idx: usize,
        source: FormatError,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("Error parsing record {idx} from {origin}: {source}")]
    ParseRecord {
        origin: String,
        idx: usize,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error reading or writing file \"{file}\": {source}")]
    FileIo {
        file: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error reading or writing bytes: {0}")]
    BytesIo(Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error only invalidates the record being processed.
    ///
    /// Processing can continue with the next record after one of these.
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}

/// Errors in a single sequence record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing sequence identifier")]
    MissingId,

    #[error("invalid nucleotide '{}' at position {pos} in \"{id}\"", char::from(*base))]
    InvalidBase { id: String, pos: usize, base: u8 },
}

/// Errors in a single motif.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty motif")]
    Empty,

    #[error(
        "invalid IUPAC symbol '{}' at position {pos} in motif \"{motif}\"",
        char::from(*symbol)
    )]
    InvalidSymbol { motif: String, pos: usize, symbol: u8 },
}

pub fn utf8(b: &[u8]) -> String {
    std::str::from_utf8(b).unwrap_or("<invalid UTF-8>").to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_are_recoverable() {
        let e = Error::Format {
            origin: "\"a.fa\"".to_owned(),
            idx: 3,
            source: FormatError::MissingId,
        };
        assert!(e.is_record_error());
        assert_eq!(
            e.to_string(),
            "Malformed sequence record 3 from \"a.fa\": missing sequence identifier"
        );

        let e = Error::Pattern(PatternError::Empty);
        assert!(!e.is_record_error());
    }

    #[test]
    fn pattern_error_message_names_symbol() {
        let e = PatternError::InvalidSymbol {
            motif: "AXG".to_owned(),
            pos: 1,
            symbol: b'X',
        };
        assert_eq!(
            e.to_string(),
            "invalid IUPAC symbol 'X' at position 1 in motif \"AXG\""
        );
    }
}
