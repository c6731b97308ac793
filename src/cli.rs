use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "token-gate", version)]
#[command(about = "Answer allow/deny for query strings matching a token list", long_about = None)]
pub struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reload scopes whenever the configuration file changes
    #[arg(short, long, requires = "config")]
    pub watch: bool,

    /// Validate the configuration, print the resolved scopes as JSON and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_requires_config() {
        assert!(Cli::try_parse_from(["token-gate", "--watch"]).is_err());

        let cli = Cli::try_parse_from(["token-gate", "-c", "gate.toml", "--watch"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.config, Some(PathBuf::from("gate.toml")));
        assert!(!cli.check);
    }
}
