//! WindowHandle value object - opaque OS window identifier
//!
//! Only valid while the OS window exists; the OS may hand the same value
//! to an unrelated window later, so every use must revalidate it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque top-level window handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    /// Create a handle from its raw value
    pub const fn new(raw: isize) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub const fn raw(self) -> isize {
        self.0
    }

    /// The null handle (no window)
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl std::str::FromStr for WindowHandle {
    type Err = std::num::ParseIntError;

    /// Accepts decimal or `0x`-prefixed hexadecimal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => isize::from_str_radix(hex, 16).map(Self),
            None => s.parse::<isize>().map(Self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("4660".parse::<WindowHandle>().unwrap(), WindowHandle(0x1234));
        assert_eq!("0x1234".parse::<WindowHandle>().unwrap(), WindowHandle(0x1234));
        assert!("hwnd".parse::<WindowHandle>().is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(WindowHandle(255).to_string(), "0xFF");
    }
}
