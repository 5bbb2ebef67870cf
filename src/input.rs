//! Input sources: file paths, glob patterns and standard input.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use glob::glob;

use crate::error::{Error, Result};

/// Where input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// Resolves command-line arguments to input sources.
///
/// No arguments, or `-`, means standard input. An argument naming an
/// existing file is used as is; anything else is expanded as a glob pattern
/// and must match at least one file.
pub fn resolve_sources(args: &[String]) -> Result<Vec<Source>> {
    if args.is_empty() {
        return Ok(vec![Source::Stdin]);
    }

    let mut sources = Vec::new();
    for arg in args {
        if arg == "-" {
            sources.push(Source::Stdin);
            continue;
        }
        if Path::new(arg).is_file() {
            sources.push(Source::File(PathBuf::from(arg)));
            continue;
        }

        let paths = glob(arg).map_err(|source| Error::InvalidPattern {
            pattern: arg.clone(),
            source,
        })?;
        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => matched.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("skipping {}: {}", e.path().display(), e.error()),
            }
        }
        if matched.is_empty() {
            return Err(Error::NoInputFiles(arg.clone()));
        }
        matched.sort();
        sources.extend(matched.into_iter().map(Source::File));
    }
    Ok(sources)
}

/// Looks up an encoding by its WHATWG label (`utf-8`, `utf-16le`, `latin1`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decodes input bytes. A byte order mark overrides `encoding`.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("malformed {} input, invalid sequences replaced", used.name());
    }
    text.into_owned()
}

/// Reads and decodes one source completely.
pub fn read_source(source: &Source, encoding: &'static Encoding) -> Result<String> {
    let bytes = match source {
        Source::Stdin => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(Error::Stdin)?;
            buffer
        }
        Source::File(path) => fs::read(path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?,
    };
    log::debug!("read {} bytes from {source:?}", bytes.len());
    Ok(decode(&bytes, encoding))
}
