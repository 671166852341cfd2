// src/config.rs
use crate::constants::{DEFAULT_FETCH_DEPTH, DEFAULT_OUT_DIR};
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Directory the generated site is written into
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: String,

    /// Site base URL for page metadata (overrides the SITE_URL env var)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Levels of nested child blocks to resolve (0 = top-level only)
    #[arg(long, default_value_t = DEFAULT_FETCH_DEPTH)]
    pub depth: u8,
}

/// The site owner's identity, shown in the hero section and navigation.
///
/// Every field is environment-driven with a literal fallback, so the
/// site renders sensibly on a fresh checkout with nothing configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub description: String,
    pub avatar: String,
    pub email: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl Profile {
    /// Reads the profile from the environment, falling back to the
    /// built-in defaults.
    pub fn from_env() -> Self {
        Self {
            name: env_or("USER_NAME", "Ozzy"),
            role: env_or("USER_ROLE", "Frontend Engineer"),
            description: env_or("USER_DESCRIPTION", "I love crafting good UI/UX"),
            avatar: env_or("USER_AVATAR", "/avatar.jpg"),
            email: std::env::var("USER_EMAIL").ok(),
            github: std::env::var("USER_GITHUB").ok(),
            twitter: std::env::var("USER_TWITTER").ok(),
            linkedin: std::env::var("USER_LINKEDIN").ok(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Ozzy".to_string(),
            role: "Frontend Engineer".to_string(),
            description: "I love crafting good UI/UX".to_string(),
            avatar: "/avatar.jpg".to_string(),
            email: None,
            github: None,
            twitter: None,
            linkedin: None,
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Resolved build configuration — validated and ready to drive all
/// three stages.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_key: ApiKey,
    pub out_dir: PathBuf,
    pub base_url: ValidatedUrl,
    pub depth: u8,
    #[allow(dead_code)] // Logging level is configured before resolve runs
    pub verbose: bool,
    pub profile: Profile,
}

impl SiteConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = ApiKey::new(api_key_str)?;

        let base_url = ValidatedUrl::parse(
            &cli.base_url
                .unwrap_or_else(|| env_or("SITE_URL", "http://localhost:3000")),
        )?;

        Ok(SiteConfig {
            api_key,
            out_dir: PathBuf::from(cli.out_dir),
            base_url,
            depth: cli.depth,
            verbose: cli.verbose,
            profile: Profile::from_env(),
        })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::new("secret_default_key_for_testing_only")
                .expect("Default API key should be valid"),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            base_url: ValidatedUrl::parse("http://localhost:3000")
                .expect("Default base URL should be valid"),
            depth: DEFAULT_FETCH_DEPTH,
            verbose: false,
            profile: Profile::default(),
        }
    }
}
