use thiserror::Error;

/// Default environment variable containing the license table name
pub const LICENSE_TABLE_NAME: &str = "DOCTOR_LICENSE_TABLE_NAME";
/// Optional environment variable toggling strongly consistent read-back
pub const LICENSE_CONSISTENT_READ: &str = "DOCTOR_LICENSE_CONSISTENT_READ";

/// Where and how license records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTableConfig {
    pub table_name: String,
    pub consistent_read: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0} environment variable")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {name}, expected true or false")]
    Invalid { name: &'static str, value: String },
}

impl LicenseTableConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        LicenseTableConfig {
            table_name: table_name.into(),
            consistent_read: true,
        }
    }

    /// Pull the table configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name: String = lookup(LICENSE_TABLE_NAME)
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::Missing(LICENSE_TABLE_NAME))?;

        let consistent_read: bool = match lookup(LICENSE_CONSISTENT_READ) {
            None => true,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: LICENSE_CONSISTENT_READ,
                        value,
                    })
                }
            },
        };

        Ok(LicenseTableConfig {
            table_name,
            consistent_read,
        })
    }
}
