/// Output variants of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Write overlong geminates with a straight apostrophe (`beäg'ga`).
    /// Turning this off only removes the apostrophe; the letters stay the same.
    pub mark_overlong_geminates: bool,
    /// Keep short closed /o/ apart from long open /å/ instead of writing both as `å`.
    pub distinguish_short_o: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mark_overlong_geminates: true,
            distinguish_short_o: false,
        }
    }
}
