use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{AppError, Result};

/// An opaque, platform-specific action applied to a file (launch, install).
pub trait Capability {
    fn invoke(&self, path: &Path) -> Result<()>;
}

/// Runs an external program with the host path as its only argument.
///
/// Standard streams are detached so the program cannot draw over the UI.
#[derive(Debug, Clone)]
pub struct CommandCapability {
    program: String,
}

impl CommandCapability {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Capability for CommandCapability {
    fn invoke(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AppError::failed(&self.program, e))?;

        tracing::info!(program = %self.program, path = %path.display(), %status, "capability ran");
        if status.success() {
            Ok(())
        } else {
            Err(AppError::failed(&self.program, status))
        }
    }
}
