//! Process exit control.

/// Outcome the process exits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// Numeric exit code.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

/// Ends the process. Injected so exits can be observed without ending the test binary.
pub trait ProcessController: Send + Sync {
    fn exit(&self, status: ExitStatus);
}

/// Exits the real process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

impl ProcessController for SystemProcess {
    fn exit(&self, status: ExitStatus) {
        std::process::exit(status.code());
    }
}
