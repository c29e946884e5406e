//! Configuration loading for coursedump.
//!
//! Configuration comes from a `coursedump.toml` file discovered in the
//! current directory or any parent, with `${VAR}` / `${VAR:-default}`
//! environment expansion applied to the course credentials. Without a config
//! file, the three required values are read straight from the environment
//! (`COURSE_URL`, `ACCESS_TOKEN`, `USER_AGENT`).
//!
//! Missing any required value is a fatal startup error; the run never gets
//! as far as a network request.
//!
//! ```toml
//! [course]
//! url = "https://courses.example.com/member/"
//! access_token = "${ACCESS_TOKEN}"
//! user_agent = "${USER_AGENT}"
//!
//! [output]
//! dir = "out"
//! tmp_dir = "tmp"
//! filename = "text.md"
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use expand::expand_env_vars;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "coursedump.toml";

/// Environment fallbacks when no config file exists.
const ENV_COURSE_URL: &str = "COURSE_URL";
const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
const ENV_USER_AGENT: &str = "USER_AGENT";

/// CLI settings that override configuration values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct Config {
    /// Course source and credentials.
    pub course: CourseConfig,
    /// Output and cache locations.
    pub output: OutputConfig,
    /// Path to the config file, when one was loaded.
    pub config_path: Option<PathBuf>,
}

/// Course source and credentials.
#[derive(Debug)]
pub struct CourseConfig {
    /// Base URL of the course, page paths are joined onto it.
    pub url: String,
    /// Session access token sent as the login cookie.
    pub access_token: String,
    /// Client identity string sent as `User-Agent`.
    pub user_agent: String,
}

/// Output and cache locations.
#[derive(Debug)]
pub struct OutputConfig {
    /// Directory for downloaded media and the final document.
    pub dir: PathBuf,
    /// Directory for cached fetched documents.
    pub tmp_dir: PathBuf,
    /// Filename of the final Markdown document inside `dir`.
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            tmp_dir: PathBuf::from("tmp"),
            filename: "text.md".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly named config file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A required value is missing or invalid.
    #[error("configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path, e.g. `course.access_token`.
        field: String,
        /// What went wrong.
        message: String,
    },
}

/// On-disk configuration shape.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    course: CourseSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Deserialize)]
struct CourseSection {
    url: String,
    access_token: String,
    user_agent: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    dir: Option<PathBuf>,
    tmp_dir: Option<PathBuf>,
    filename: Option<String>,
}

impl Config {
    /// Load configuration with optional CLI overrides.
    ///
    /// An explicit `config_path` must exist. Otherwise `coursedump.toml` is
    /// searched for upwards from the current directory; if none is found the
    /// course values are read from the environment.
    ///
    /// # Errors
    ///
    /// Any missing or invalid required value.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::from_env()?
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load and expand a specific config file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)?;

        let output_defaults = OutputConfig::default();
        Ok(Self {
            course: CourseConfig {
                url: expand_env_vars(&file.course.url, "course.url")?,
                access_token: expand_env_vars(&file.course.access_token, "course.access_token")?,
                user_agent: expand_env_vars(&file.course.user_agent, "course.user_agent")?,
            },
            output: OutputConfig {
                dir: file.output.dir.unwrap_or(output_defaults.dir),
                tmp_dir: file.output.tmp_dir.unwrap_or(output_defaults.tmp_dir),
                filename: file.output.filename.unwrap_or(output_defaults.filename),
            },
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Build configuration from environment variables only.
    fn from_env() -> Result<Self, ConfigError> {
        let require = |name: &str| {
            std::env::var(name).map_err(|_| {
                ConfigError::Validation(format!(
                    "no {CONFIG_FILENAME} found and {name} is not set"
                ))
            })
        };

        Ok(Self {
            course: CourseConfig {
                url: require(ENV_COURSE_URL)?,
                access_token: require(ENV_ACCESS_TOKEN)?,
                user_agent: require(ENV_USER_AGENT)?,
            },
            output: OutputConfig::default(),
            config_path: None,
        })
    }

    /// Apply CLI settings on top of the loaded configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output.dir.clone_from(output_dir);
        }
    }

    /// Validate required values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] when a required field is empty or the
    /// course URL has no HTTP scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.course.url, "course.url")?;
        require_non_empty(&self.course.access_token, "course.access_token")?;
        require_non_empty(&self.course.user_agent, "course.user_agent")?;

        if !self.course.url.starts_with("http://") && !self.course.url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "course.url must start with http:// or https://".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
