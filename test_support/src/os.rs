//! Fixed platform descriptions for strategy tests.

use std::cell::Cell;

use cmdkit::{Flavor, OsDetector, OsInfo};

/// A Linux host, as the real detector would report it.
#[must_use]
pub fn linux_os() -> OsInfo {
    OsInfo::from_flavor(Flavor::Linux)
}

/// A Windows host, as the real detector would report it.
#[must_use]
pub fn windows_os() -> OsInfo {
    OsInfo::from_flavor(Flavor::Windows)
}

/// Detector that always reports the same platform and counts its probes.
///
/// # Examples
///
/// ```
/// use cmdkit::{Command, Flags};
/// use test_support::{CountingDetector, windows_os};
///
/// let detector = CountingDetector::new(windows_os());
/// let _cmd = Command::with_detector(Flags::empty(), &detector);
/// assert_eq!(detector.calls(), 1);
/// ```
#[derive(Debug)]
pub struct CountingDetector {
    info: OsInfo,
    calls: Cell<usize>,
}

impl CountingDetector {
    /// Report `info` on every probe.
    #[must_use]
    pub const fn new(info: OsInfo) -> Self {
        Self {
            info,
            calls: Cell::new(0),
        }
    }

    /// Number of probes so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl OsDetector for CountingDetector {
    fn detect(&self) -> OsInfo {
        self.calls.set(self.calls.get() + 1);
        self.info.clone()
    }
}
