//! Conversion of Ume Saami text from Schlachter's 1958 dictionary orthography
//! to the 2016 standard orthography.
//!
//! ```
//! use umeconv::{convert, Options};
//!
//! assert_eq!(convert("bägga ahka", &Options::default()), "beäg'ga ahkka");
//! ```

mod consonants;
mod convert;
mod error;
mod fields;
mod gradation;
pub mod input;
mod normalize;
mod options;
mod rule;
mod syllable;
mod vowels;

pub use convert::{convert, convert_word};
pub use error::{Error, Result};
pub use fields::{convert_line, FieldMode};
pub use options::Options;
