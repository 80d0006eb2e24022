//! Seams between the encoder and the host system.
//!
//! Everything that touches the outside world beyond plain file I/O goes
//! through one of two traits:
//!
//! - [`ProgramLocator`] answers "is this program installed?"
//! - [`CommandRunner`] executes a composed shell command line
//!
//! The production implementations are [`WhichLocator`] (search `PATH` with the
//! `which` crate) and [`ShellRunner`] (`sh -c`). Tests swap in the doubles
//! from [`crate::testing`].

mod shell;
mod traits;
mod which;

pub use shell::{quote, quote_path, ShellRunner};
pub use traits::{CommandRunner, ProgramLocator, RunStatus};
pub use which::WhichLocator;
