//! ImageMagick subprocess runner

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::traits::{ConvertError, Converter};
use crate::config::ConverterConfig;

/// Runs the configured `convert` binary as a child process.
///
/// The child is spawned with `kill_on_drop`, so dropping the future returned
/// by [`Converter::run`] (client disconnect, timeout) terminates it.
#[derive(Debug, Clone)]
pub struct ImageMagick {
    program: PathBuf,
    timeout: Duration,
}

impl ImageMagick {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.program.clone(), config.timeout.as_duration())
    }

    async fn run_to_completion(
        &self,
        args: &[String],
        stdin: Option<Bytes>,
    ) -> Result<Bytes, ConvertError> {
        let program = self.program();

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                program: program.clone(),
                source,
            })?;

        tracing::debug!(program = %program, pid = ?child.id(), "Converter started");

        // Feed stdin from its own task so a full stdout pipe cannot deadlock us
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(&input).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };

        let output = child.wait_with_output().await?;

        let written = match writer {
            Some(handle) => handle.await.map_err(std::io::Error::other)?,
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(ConvertError::ExitStatus {
                program,
                status: output.status,
            });
        }

        match written {
            // The tool may legitimately stop reading once it has what it needs
            Err(err) if err.kind() != ErrorKind::BrokenPipe => return Err(err.into()),
            _ => {}
        }

        Ok(Bytes::from(output.stdout))
    }
}

#[async_trait]
impl Converter for ImageMagick {
    async fn run(&self, args: &[String], stdin: Option<Bytes>) -> Result<Bytes, ConvertError> {
        match tokio::time::timeout(self.timeout, self.run_to_completion(args, stdin)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(program = %self.program.display(), timeout = ?self.timeout, "Converter timed out, killing it");
                Err(ConvertError::TimedOut {
                    program: self.program(),
                    after: self.timeout,
                })
            }
        }
    }

    fn program(&self) -> String {
        self.program.display().to_string()
    }
}
