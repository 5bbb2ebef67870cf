use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),

    #[error("invalid file pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no input files match {0}")]
    NoInputFiles(String),

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let error = Error::NoInputFiles("*.txt".to_string());
        assert_eq!(error.to_string(), "no input files match *.txt");

        let error = Error::UnknownEncoding("klingon".to_string());
        assert_eq!(error.to_string(), "unknown encoding label: klingon");

        let error = Error::Read {
            path: PathBuf::from("words.tsv"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(error.to_string(), "failed to read words.tsv: gone");
    }

    #[test]
    fn pattern_errors_keep_their_source() {
        let source = glob::Pattern::new("[").unwrap_err();
        let error = Error::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(error.to_string().starts_with("invalid file pattern [:"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
