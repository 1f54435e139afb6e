//! TikTok SDK configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [providers.tiktok]
//! app_id = "com.omega.planeats"
//! tt_app_id = "7301234567890"
//! access_token = "${TIKTOK_ACCESS_TOKEN}"
//! debug = false
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tally_core::{ProviderError, ProviderKind, ProviderResult};

/// Credentials and switches passed to the TikTok Business SDK.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TikTokConfig {
    /// Application identifier (the package / bundle id).
    pub app_id: String,

    /// Application identifier assigned by TikTok.
    pub tt_app_id: String,

    /// Events API access token.
    pub access_token: String,

    /// Enable vendor debug logging before initialization.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

fn default_debug() -> bool {
    true
}

impl TikTokConfig {
    /// Creates a configuration with debug mode on.
    pub fn new(
        app_id: impl Into<String>,
        tt_app_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            tt_app_id: tt_app_id.into(),
            access_token: access_token.into(),
            debug: default_debug(),
        }
    }

    /// Sets the debug flag.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the fields that can be checked locally.
    ///
    /// Only the app id and access token are required to be non-blank. Whether
    /// the credentials are valid is for the vendor to decide.
    pub fn validate(&self) -> ProviderResult<()> {
        if self.app_id.trim().is_empty() {
            return Err(ProviderError::invalid_config(
                ProviderKind::TikTok,
                "app_id must not be empty",
            ));
        }
        if self.access_token.trim().is_empty() {
            return Err(ProviderError::invalid_config(
                ProviderKind::TikTok,
                "access_token must not be empty",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for TikTokConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TikTokConfig")
            .field("app_id", &self.app_id)
            .field("tt_app_id", &self.tt_app_id)
            .field("access_token", &"<redacted>")
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(TikTokConfig::new("com.app.id", "ttid123", "token").validate().is_ok());
        assert!(TikTokConfig::new("", "ttid123", "token").validate().is_err());
        assert!(TikTokConfig::new("com.app.id", "ttid123", "  ").validate().is_err());
        // The TikTok app id is not checked locally.
        assert!(TikTokConfig::new("com.app.id", "", "token").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TikTokConfig::new("com.app.id", "ttid123", "s3cr3t");
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("com.app.id"));
    }

    #[test]
    fn test_deserialize_defaults_debug_on() {
        let yaml = r#"
app_id: com.app.id
tt_app_id: ttid123
access_token: token
"#;
        let config: TikTokConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.debug);
        assert_eq!(config.tt_app_id, "ttid123");
    }
}
