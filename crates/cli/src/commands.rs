//! Command-line definition for `xa-host`.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the clap command
pub fn build_cli() -> Command {
    Command::new("xa-host")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve an XA participant over JSON lines on stdin/stdout")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("TOML file with participant options"),
        )
        .arg(
            Arg::new("halt-marker")
                .long("halt-marker")
                .value_name("TEXT")
                .help("Fault kinds containing TEXT halt the process"),
        )
        .arg(
            Arg::new("halt-exit-code")
                .long("halt-exit-code")
                .value_name("CODE")
                .value_parser(value_parser!(i32))
                .help("Exit status of a halted process"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FILTER")
                .help("Log filter (defaults to RUST_LOG, then \"warn\")"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Disable logging"),
        )
}
