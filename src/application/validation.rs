//! Request validation for inbound documents
//!
//! Runs before any identifier is generated or any store is touched.

use crate::application::dto::CreateDocumentRequest;
use crate::config::Config;
use crate::domain::errors::DomainError;
use crate::domain::validation::Validation;

/// Tunable limits for create requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Largest accepted content, in UTF-8 bytes
    pub max_content_size: usize,
    /// Longest accepted extension, in characters
    pub max_extension_length: usize,
    /// Strict: `[A-Za-z0-9]` only. Permissive: anything that is not path-like.
    pub strict_extensions: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_content_size: 400_000,
            max_extension_length: 16,
            strict_extensions: true,
        }
    }
}

impl From<&Config> for ValidationConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_content_size: config.max_content_size,
            max_extension_length: config.extension_max_length,
            strict_extensions: config.strict_extensions,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    config: ValidationConfig,
}

impl RequestValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a create request
    pub fn validate(&self, request: &CreateDocumentRequest) -> Result<(), DomainError> {
        self.validate_content(&request.content)?;

        if let Some(extension) = request.extension.as_deref() {
            self.validate_extension(extension)?;
        }

        Ok(())
    }

    pub fn validate_content(&self, content: &str) -> Result<(), DomainError> {
        Validation::validate_not_empty(content, "content")?;
        Validation::validate_no_nul(content, "content")?;
        Validation::validate_max_bytes(content, "content", self.config.max_content_size)
    }

    /// An empty extension is treated as absent and always accepted
    pub fn validate_extension(&self, extension: &str) -> Result<(), DomainError> {
        if extension.is_empty() {
            return Ok(());
        }

        Validation::validate_length(
            extension,
            "extension",
            None,
            Some(self.config.max_extension_length),
        )?;
        Validation::validate_path_safe(extension, "extension")?;

        if self.config.strict_extensions {
            Validation::validate_alphanumeric(extension, "extension")?;
        }

        Ok(())
    }
}
