// clap 2.x `crate_authors!` expands to an implicit raw-pointer autoref denied by newer rustc.
#![allow(unknown_lints, dangerous_implicit_autorefs)]

use std::convert::TryFrom;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{crate_authors, crate_version, App, Arg, ArgMatches};
use garp::config::{Config, RawConfig, DEFAULT_CONFIG_PATH};
use garp::{announce, GarpIdentity, InterfaceHandle};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Collect arguments from user
    let matches = App::new("garp")
        .version(crate_version!())
        .author(crate_authors!(", "))
        .about("Broadcast one gratuitous ARP request announcing an IPv4 address")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("JSON config file with `ip`, `mac` and `interface` [default: config.json]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("interface")
                .short("i")
                .long("interface")
                .value_name("NAME")
                .help("Interface to announce on")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("mac")
                .short("m")
                .long("mac")
                .value_name("MAC")
                .help("Sender MAC address [default: the interface's own]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ip")
                .short("a")
                .long("ip")
                .value_name("ADDR")
                .help("IPv4 address to announce")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Verbose mode (-v, -vv)"),
        )
        .get_matches();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(
            env::var(EnvFilter::DEFAULT_ENV).ok(),
            level_filter(&matches),
        ))
        .init();

    let config = load_config(&matches)?;
    debug!(?config, "loaded config");

    let handle = InterfaceHandle::by_name(&config.interface)?;
    let mac = config.mac.unwrap_or_else(|| handle.hardware_addr());
    let identity = GarpIdentity::new(&mac.bytes, config.ip)?;

    announce(&handle, &identity)
        .with_context(|| format!("announcing {} on {}", identity.ip(), handle.name()))?;
    Ok(())
}

fn level_filter(matches: &ArgMatches) -> LevelFilter {
    match matches.occurrences_of("verbose") {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `RUST_LOG` wins when it is set and parses, otherwise `-v` picks the level.
fn log_filter(rust_log: Option<String>, verbosity: LevelFilter) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(verbosity.into()))
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let from_file = match matches.value_of("config") {
        Some(path) => RawConfig::from_file(path)?,
        // The default file is optional, everything can come from flags.
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            RawConfig::from_file(DEFAULT_CONFIG_PATH)?
        }
        None => RawConfig::default(),
    };
    let from_flags = RawConfig {
        ip: matches.value_of("ip").map(str::to_owned),
        mac: matches.value_of("mac").map(str::to_owned),
        interface: matches.value_of("interface").map(str::to_owned),
    };
    Config::try_from(from_file.merge(from_flags)).context("invalid configuration")
}
