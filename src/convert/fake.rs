//! In-process converter for tests and local development without ImageMagick

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;

use super::traits::{ConvertError, Converter};

/// One recorded call to [`StaticConverter::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub stdin: Option<Bytes>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Output(Bytes),
    Failure(String),
}

/// Converter returning a canned result and recording every invocation
#[derive(Debug)]
pub struct StaticConverter {
    outcome: Outcome,
    calls: Mutex<Vec<Invocation>>,
}

impl StaticConverter {
    pub fn succeeding(output: impl Into<Bytes>) -> Self {
        Self {
            outcome: Outcome::Output(output.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Converter for StaticConverter {
    async fn run(&self, args: &[String], stdin: Option<Bytes>) -> Result<Bytes, ConvertError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                args: args.to_vec(),
                stdin,
            });
        }

        match &self.outcome {
            Outcome::Output(bytes) => Ok(bytes.clone()),
            Outcome::Failure(message) => Err(ConvertError::Failed {
                program: self.program(),
                message: message.clone(),
            }),
        }
    }

    fn program(&self) -> String {
        "static".to_string()
    }
}
