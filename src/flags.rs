//! Behaviour toggles for [`Command`](crate::Command).

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit-combinable set of command behaviour flags.
///
/// ```
/// use cmdkit::Flags;
///
/// let flags = Flags::DONT_ESCAPE | Flags::PREPEND_UNIX_STYLE;
/// assert!(flags.contains(Flags::DONT_ESCAPE));
/// assert!(!flags.contains(Flags::FORCE_USE_PROC_OPEN));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    /// Store the command name, keys and values exactly as given.
    pub const DONT_ESCAPE: Self = Self(1);
    /// Use the pipe-based strategy on Windows too.
    pub const FORCE_USE_PROC_OPEN: Self = Self(1 << 1);
    /// Prefix bare argument keys with `-` or `--`.
    pub const PREPEND_UNIX_STYLE: Self = Self(1 << 2);
    /// Prefix bare argument keys with `/`.
    pub const PREPEND_WINDOWS_STYLE: Self = Self(1 << 3);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::DONT_ESCAPE, "DONT_ESCAPE"),
        (Self::FORCE_USE_PROC_OPEN, "FORCE_USE_PROC_OPEN"),
        (Self::PREPEND_UNIX_STYLE, "PREPEND_UNIX_STYLE"),
        (Self::PREPEND_WINDOWS_STYLE, "PREPEND_WINDOWS_STYLE"),
    ];

    /// No flags set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Default prepend style selected by the flags, if any.
    ///
    /// Unix style wins when both style flags are present.
    #[must_use]
    pub const fn prepend_style(self) -> Option<PrependStyle> {
        if self.contains(Self::PREPEND_UNIX_STYLE) {
            Some(PrependStyle::Unix)
        } else if self.contains(Self::PREPEND_WINDOWS_STYLE) {
            Some(PrependStyle::Windows)
        } else {
            None
        }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Switch-prefix convention applied to bare argument keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrependStyle {
    /// `-k` for one-character keys, `--key` otherwise.
    Unix,
    /// `/key`.
    Windows,
}

impl PrependStyle {
    /// Switch prefix this style gives the bare `key`.
    #[must_use]
    pub fn prefix(self, key: &str) -> &'static str {
        match self {
            Self::Unix if key.chars().count() == 1 => "-",
            Self::Unix => "--",
            Self::Windows => "/",
        }
    }

    /// Prefix `key` according to this style.
    #[must_use]
    pub fn apply(self, key: &str) -> String {
        format!("{}{key}", self.prefix(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn flags_combine_and_report_membership() {
        let mut flags = Flags::empty();
        assert!(flags.is_empty());
        flags |= Flags::FORCE_USE_PROC_OPEN;
        assert!(flags.contains(Flags::FORCE_USE_PROC_OPEN));
        assert!(!flags.contains(Flags::DONT_ESCAPE));
        assert!(flags.contains(Flags::empty()));
        assert_eq!(format!("{flags:?}"), "{FORCE_USE_PROC_OPEN}");
    }

    #[rstest]
    #[case(Flags::empty(), None)]
    #[case(Flags::PREPEND_UNIX_STYLE, Some(PrependStyle::Unix))]
    #[case(Flags::PREPEND_WINDOWS_STYLE, Some(PrependStyle::Windows))]
    #[case(Flags::PREPEND_UNIX_STYLE | Flags::PREPEND_WINDOWS_STYLE, Some(PrependStyle::Unix))]
    fn prepend_style_follows_flags(#[case] flags: Flags, #[case] expected: Option<PrependStyle>) {
        assert_eq!(flags.prepend_style(), expected);
    }

    #[rstest]
    #[case(PrependStyle::Unix, "f", "-f")]
    #[case(PrependStyle::Unix, "foo", "--foo")]
    #[case(PrependStyle::Unix, "é", "-é")]
    #[case(PrependStyle::Windows, "f", "/f")]
    #[case(PrependStyle::Windows, "foo", "/foo")]
    fn styles_prefix_keys(#[case] style: PrependStyle, #[case] key: &str, #[case] expected: &str) {
        assert_eq!(style.apply(key), expected);
    }
}
