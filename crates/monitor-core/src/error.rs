use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    /// An alert type outside the closed registry was requested. This is a
    /// configuration error and fails loud: substituting a default would
    /// misstate clinical priority.
    #[error("Unknown alert type: '{0}'")]
    UnknownAlertType(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
