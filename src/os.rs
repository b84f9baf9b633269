//! Host platform detection.
//!
//! A [`Command`](crate::Command) consults an [`OsInfo`] once, at construction,
//! to decide how it will launch processes. The real prober is
//! [`HostDetector`]; tests inject their own [`OsDetector`] or a fixed
//! [`OsInfo`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad operating-system classification that selects the execution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Windows and its `cmd.exe` shell.
    Windows,
    /// Unix-like systems with a POSIX `sh`.
    Unix,
}

/// Specific operating system within a [`Family`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Flavor {
    /// Microsoft Windows.
    Windows,
    /// Linux, including Android.
    Linux,
    /// macOS and iOS.
    Mac,
    /// FreeBSD, `OpenBSD`, `NetBSD` and `DragonFly`.
    Bsd,
    /// Solaris and illumos.
    Solaris,
    /// Any other Unix-like target.
    Unknown,
}

impl Flavor {
    /// Map a Rust target OS name (see [`std::env::consts::OS`]) onto a flavor.
    #[must_use]
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "linux" | "android" => Self::Linux,
            "macos" | "ios" => Self::Mac,
            "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Self::Bsd,
            "solaris" | "illumos" => Self::Solaris,
            _ => Self::Unknown,
        }
    }

    /// Family this flavor belongs to.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Windows => Family::Windows,
            Self::Linux | Self::Mac | Self::Bsd | Self::Solaris | Self::Unknown => Family::Unix,
        }
    }

    /// Upper-case display label, e.g. `LINUX`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Windows => "WINDOWS",
            Self::Linux => "LINUX",
            Self::Mac => "MAC",
            Self::Bsd => "BSD",
            Self::Solaris => "SOLARIS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Immutable description of the detected platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OsInfo {
    name: String,
    family: Family,
    flavor: Flavor,
}

impl OsInfo {
    /// Describe a platform explicitly.
    #[must_use]
    pub fn new(name: impl Into<String>, family: Family, flavor: Flavor) -> Self {
        Self {
            name: name.into(),
            family,
            flavor,
        }
    }

    /// Describe a platform from its flavor, deriving the name and family.
    #[must_use]
    pub fn from_flavor(flavor: Flavor) -> Self {
        Self::new(flavor.label(), flavor.family(), flavor)
    }

    /// Display label such as `WINDOWS` or `LINUX`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Broad classification used for strategy dispatch.
    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Specific operating system.
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Whether this is a Windows-family platform.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.family == Family::Windows
    }
}

impl fmt::Display for OsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Source of [`OsInfo`] values.
pub trait OsDetector {
    /// Probe the platform.
    fn detect(&self) -> OsInfo;
}

/// Detects the platform this binary was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostDetector;

impl OsDetector for HostDetector {
    fn detect(&self) -> OsInfo {
        let info = OsInfo::from_flavor(Flavor::from_target_os(std::env::consts::OS));
        tracing::debug!(os = %info, family = ?info.family(), "detected host platform");
        info
    }
}

impl<F> OsDetector for F
where
    F: Fn() -> OsInfo,
{
    fn detect(&self) -> OsInfo {
        self()
    }
}
