//! Command-line argument parsing for the demo driver.
//!
//! A hand-rolled scan over `std::env::args()`: four flags, no
//! subcommands.

use crate::config::GufoConfig;

/// Parsed CLI invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    /// Print the version and exit.
    pub version: bool,
    /// Override the API base URL.
    pub url: Option<String>,
    /// Override the demo question.
    pub question: Option<String>,
    /// Override the pipeline configuration name.
    pub config_name: Option<String>,
}

impl CliArgs {
    /// Apply the overrides to a configuration.
    pub fn apply(self, mut config: GufoConfig) -> GufoConfig {
        if let Some(url) = self.url {
            config.base_url = url;
        }
        if let Some(question) = self.question {
            config.question = question;
        }
        if let Some(name) = self.config_name {
            config.config_name = name;
        }
        config
    }
}

/// Parse command-line arguments.
///
/// Unknown flags and missing values are ignored rather than fatal; the
/// demo falls back to its defaults.
///
/// # Examples
///
/// ```
/// use gufo::cli::parse_args;
///
/// let args = parse_args(["gufo", "--version"].iter().map(|s| s.to_string()));
/// assert!(args.version);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.skip(1); // program name
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => parsed.version = true,
            "--url" => parsed.url = args.next(),
            "--question" => parsed.question = args.next(),
            "--config" => parsed.config_name = args.next(),
            _ => {}
        }
    }
    parsed
}
