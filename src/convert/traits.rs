use async_trait::async_trait;
use bytes::Bytes;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Converter errors
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("{program} failed with {status}")]
    ExitStatus { program: String, status: ExitStatus },
    #[error("{program} failed: {message}")]
    Failed { program: String, message: String },
    #[error("{program} timed out after {after:?}")]
    TimedOut { program: String, after: Duration },
}

/// External image tool capability
///
/// Implementations run the tool once per call with the given argument list,
/// feed `stdin` (if any) to its standard input and return everything it wrote
/// to standard output. A call succeeds only when the tool exits zero.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn run(&self, args: &[String], stdin: Option<Bytes>) -> Result<Bytes, ConvertError>;

    /// Name used in logs and error messages
    fn program(&self) -> String;
}
