//! Dialect writers.
//!
//! [`c_style`] holds the shared base: the emitter and the default
//! brace-and-semicolon emissions. The PowerShell writers specialize it.

pub mod c_style;

#[cfg(feature = "write-powershell")]
pub mod powershell;

#[cfg(feature = "write-powershell5")]
pub mod powershell5;

pub use c_style::{CStyleVisit, Emitter};

#[cfg(feature = "write-powershell")]
pub use powershell::PowerShellWriter;

#[cfg(feature = "write-powershell5")]
pub use powershell5::PowerShell5Writer;
