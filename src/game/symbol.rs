use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A mark that can occupy a board cell.
///
/// Every symbol type has a distinguished [`Symbol::BLANK`] value meaning
/// "empty cell". Equality is the only operation the engine relies on.
pub trait Symbol: Copy + Eq + Hash + Debug + Display + Send + 'static {
    const BLANK: Self;

    fn is_blank(self) -> bool {
        self == Self::BLANK
    }

    /// Parse a single key typed by a human into a symbol, if it names one.
    fn from_key(key: char) -> Option<Self>;
}

/// Letters and X/O marks. `.` is blank.
impl Symbol for char {
    const BLANK: char = '.';

    fn from_key(key: char) -> Option<Self> {
        key.is_ascii_alphabetic().then(|| key.to_ascii_uppercase())
    }
}

/// Small numbers for numerical variants. `0` is blank.
impl Symbol for u8 {
    const BLANK: u8 = 0;

    fn from_key(key: char) -> Option<Self> {
        key.to_digit(10)
            .filter(|&d| d != 0)
            .map(|d| d as u8)
    }
}
