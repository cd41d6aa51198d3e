use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): the command ran; for `scan`, nothing convertible was found
/// - `Failure` (1): `scan` found convertible strings
/// - `Error` (2): usage error, missing file, parse failure or bad configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
