use clap::{Parser, builder::BoolishValueParser};
use linkedin_core::api::VoyagerCredentials;
use linkedin_core::control::ScoringConfig;
use secrecy::SecretString;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "linkedin-mcpd", version, about = "LinkedIn MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "LINKEDIN_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "LINKEDIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(
        long = "stdio",
        env = "LINKEDIN_MCP_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "LINKEDIN_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "LINKEDIN_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(long, env = "LINKEDIN_SCORING_CONFIG")]
    scoring_config: Option<PathBuf>,

    #[arg(long, env = "LINKEDIN_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,

    /// Run a single job search and print the result instead of serving.
    #[arg(long, default_value_t = false)]
    smoke: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct LinkedinConfig {
    pub credentials: Arc<VoyagerCredentials>,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
    pub request_timeout: Duration,
    pub scoring_config: Option<PathBuf>,
    pub log_filter: String,
    pub smoke: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
    ScoringFile { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::ScoringFile { path, message } => {
                let path_display = path.display();
                write!(f, "failed to load scoring config {path_display}: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

impl LinkedinConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Scoring overrides from `LINKEDIN_SCORING_CONFIG`, or the defaults.
    pub fn load_scoring(&self) -> Result<ScoringConfig, ConfigError> {
        let Some(path) = &self.scoring_config else {
            return Ok(ScoringConfig::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::ScoringFile {
            path: path.clone(),
            message: err.to_string(),
        })?;
        ScoringConfig::from_toml_str(&raw).map_err(|err| ConfigError::ScoringFile {
            path: path.clone(),
            message: err.to_string(),
        })
    }
}

impl TryFrom<CliArgs> for LinkedinConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let email = args
            .email
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("LINKEDIN_EMAIL"))?;
        let password = args
            .password
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting("LINKEDIN_PASSWORD"))?;

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "LINKEDIN_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        let log_filter = if args.log.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log
        };

        Ok(Self {
            credentials: Arc::new(VoyagerCredentials::new(
                email.trim(),
                SecretString::from(password),
            )),
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            scoring_config: args.scoring_config.filter(|path| !path.as_os_str().is_empty()),
            log_filter,
            smoke: args.smoke,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            email: Some("seller@example.com".to_string()),
            password: Some("hunter2".to_string()),
            enable_stdio: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            scoring_config: None,
            log: DEFAULT_LOG_FILTER.to_string(),
            smoke: false,
        }
    }

    #[test]
    fn defaults_parse() {
        let config = LinkedinConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.mcp_http_addr.port(), 4030);
        assert!(!config.enable_stdio);
        assert_eq!(
            config.load_scoring().expect("defaults should load"),
            ScoringConfig::default()
        );
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut args = base_args();
        args.email = Some("  ".to_string());
        let err = LinkedinConfig::try_from(args).expect_err("blank email should fail");
        assert_eq!(err.to_string(), "missing required setting: LINKEDIN_EMAIL");

        let mut args = base_args();
        args.password = None;
        assert!(matches!(
            LinkedinConfig::try_from(args),
            Err(ConfigError::MissingSetting("LINKEDIN_PASSWORD"))
        ));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let mut args = base_args();
        args.request_timeout_secs = 0;
        assert!(matches!(
            LinkedinConfig::try_from(args),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn blank_log_filter_falls_back_to_info() {
        let mut args = base_args();
        args.log = String::new();
        let config = LinkedinConfig::try_from(args).expect("config should parse");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn missing_scoring_file_is_reported() {
        let mut args = base_args();
        args.scoring_config = Some(PathBuf::from("/nonexistent/linkedin-scoring.toml"));
        let config = LinkedinConfig::try_from(args).expect("config should parse");

        let err = config.load_scoring().expect_err("missing file should fail");
        assert!(err.to_string().starts_with("failed to load scoring config /nonexistent/linkedin-scoring.toml"));
    }
}
