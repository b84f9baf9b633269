//! cmdkit core library.
//!
//! Builds shell command lines from a program name and keyed arguments,
//! escapes every token for the host shell, and runs the result with a
//! strategy chosen from the detected operating-system family.
//!
//! ```no_run
//! use cmdkit::{Command, CommandResult, Flags};
//!
//! let mut cmd = Command::new(Flags::empty());
//! cmd.set_command("grep")?
//!     .add_argument("-i", "needle")?
//!     .set_stdin("haystack\nNEEDLE\n");
//! let mut result = CommandResult::new();
//! cmd.run(&mut result)?;
//! assert_eq!(result.last_line(), "NEEDLE");
//! # Ok::<(), cmdkit::CommandError>(())
//! ```

pub mod chain;
pub mod cli;
pub mod command;
pub mod flags;
pub mod os;
pub mod quote;
pub mod runner;

pub use chain::{Chain, ChainMode, ChainOutcome, CommandChain};
pub use command::{
    ArgValue, Argument, Command, CommandError, CommandResult, ExecOutput, Launcher, PipeOutput,
    ResolvedArgument, SIGNAL_EXIT_CODE, Strategy, SystemLauncher, Values, resolve_argument,
};
pub use flags::{Flags, PrependStyle};
pub use os::{Family, Flavor, HostDetector, OsDetector, OsInfo};
pub use quote::{QuoteError, Shell};
