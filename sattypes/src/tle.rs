use derive_more::Display;

/// Three-line TLE: a display name followed by the two element lines
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display(fmt = "{}\n{}\n{}", "name", "line1", "line2")]
pub struct Tle {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl Tle {
    pub fn new(name: impl Into<String>, line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// NORAD catalog number, columns 3-7 of line 1
    pub fn catalog_number(&self) -> Option<u64> {
        self.line1.get(2..7)?.trim().parse().ok()
    }
}
