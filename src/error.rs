//! Process-level error type.
//!
//! Every fallible path in the crate surfaces as an [`AppError`] carrying the
//! exit code the binary should terminate with:
//!
//! - `2` – bad CLI arguments or configuration
//! - `3` – data could not be loaded or contains nothing usable
//! - `4` – chart rendering or report writing failed at runtime

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message_only() {
        let err = AppError::new(3, "No usable rows in input");
        assert_eq!(err.to_string(), "No usable rows in input");
        assert_eq!(err.exit_code(), 3);
    }
}
