//! Configuration validation.

use std::fmt;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Uploads above this size are accepted but reported.
const LARGE_UPLOAD_WARNING: u64 = 100 * 1024 * 1024;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_uploads(config, &mut result);
        Self::validate_scripts(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_uploads(config: &Config, result: &mut ValidationResult) {
        if config.uploads.max_file_size == 0 {
            result.add_error(ValidationError::new(
                "uploads.max_file_size",
                "max_file_size must be greater than 0",
            ));
        }

        if config.uploads.max_file_size > LARGE_UPLOAD_WARNING {
            result.add_warning(ValidationWarning::new(
                "uploads.max_file_size",
                "max_file_size is very high (>100 MiB), uploads are written to local disk",
            ));
        }

        if config.uploads.dir.as_os_str().is_empty() {
            result.add_error(ValidationError::new("uploads.dir", "Upload directory cannot be empty"));
        }
    }

    fn validate_scripts(config: &Config, result: &mut ValidationResult) {
        let scripts = &config.scripts;
        let names = [
            ("scripts.normalize_icon", &scripts.normalize_icon),
            ("scripts.setup_firebase", &scripts.setup_firebase),
            ("scripts.setup_admin_firebase", &scripts.setup_admin_firebase),
            ("scripts.generate_assets", &scripts.generate_assets),
        ];

        for (path, name) in names {
            if name.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Script name cannot be empty"));
            }
        }

        if scripts
            .interpreter
            .as_deref()
            .is_some_and(|i| i.trim().is_empty())
        {
            result.add_error(ValidationError::new(
                "scripts.interpreter",
                "Interpreter cannot be empty when set",
            ));
        }

        if !scripts.dir.exists() {
            result.add_warning(ValidationWarning::new(
                "scripts.dir",
                format!("Script directory does not exist: {:?}", scripts.dir),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
