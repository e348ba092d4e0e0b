//! ArgMatches → HostConfig conversion.

use clap::ArgMatches;
use xa_participant::ParticipantOptions;

/// Everything `xa-host` needs to start serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Participant options after file and flag overrides
    pub options: ParticipantOptions,
    /// Log filter, `None` to disable logging
    pub log_filter: Option<String>,
}

/// Resolve options: defaults, then the config file, then flags
pub fn matches_to_config(matches: &ArgMatches) -> Result<HostConfig, String> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ParticipantOptions::load(path).map_err(|e| e.to_string())?,
        None => ParticipantOptions::default(),
    };

    if let Some(marker) = matches.get_one::<String>("halt-marker") {
        options = options.with_halt_marker(marker.clone());
    }
    if let Some(code) = matches.get_one::<i32>("halt-exit-code") {
        options = options.with_halt_exit_code(*code);
    }
    options.validate().map_err(|e| e.to_string())?;

    let log_filter = if matches.get_flag("quiet") {
        None
    } else {
        Some(
            matches
                .get_one::<String>("log")
                .cloned()
                .or_else(|| std::env::var("RUST_LOG").ok())
                .unwrap_or_else(|| "warn".to_string()),
        )
    };

    Ok(HostConfig {
        options,
        log_filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;
    use std::io::Write;

    fn parse(args: &[&str]) -> Result<HostConfig, String> {
        let matches = build_cli()
            .try_get_matches_from(std::iter::once("xa-host").chain(args.iter().copied()))
            .unwrap();
        matches_to_config(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--log", "info"]).unwrap();
        assert_eq!(config.options, ParticipantOptions::default());
        assert_eq!(config.log_filter.as_deref(), Some("info"));
    }

    #[test]
    fn test_quiet_disables_logging() {
        let config = parse(&["--quiet"]).unwrap();
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "halt_marker = \"FILE\"").unwrap();
        writeln!(file, "halt_exit_code = 5").unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--halt-marker", "FLAG"]).unwrap();
        assert_eq!(config.options.halt_marker, "FLAG");
        assert_eq!(config.options.halt_exit_code, 5);
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = parse(&["--halt-marker", ""]).unwrap_err();
        assert!(err.contains("halt_marker"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = parse(&["--config", "/nonexistent/xa-host.toml"]).unwrap_err();
        assert!(err.contains("configuration error"));
    }
}
