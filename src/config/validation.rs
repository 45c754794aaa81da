use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Converter program must not be empty")]
    EmptyConverterProgram,

    #[error("Converter timeout must be positive")]
    ZeroConverterTimeout,

    #[error("Server port must be non-zero (bind address {0})")]
    ZeroPort(std::net::SocketAddr),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_converter(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.bind_addr.port() == 0 {
        return Err(ValidationError::ZeroPort(config.server.bind_addr));
    }

    Ok(())
}

fn validate_converter(config: &Config) -> Result<(), ValidationError> {
    if config.converter.program.as_os_str().is_empty() {
        return Err(ValidationError::EmptyConverterProgram);
    }

    if config.converter.timeout.is_zero() {
        return Err(ValidationError::ZeroConverterTimeout);
    }

    Ok(())
}
