//! redkit - uniform plugin wrappers for security tooling.
//!
//! Surfaces the toolkit's self-description contract and the directly
//! runnable plugins: identifier generation, public-IP lookup, and a one-shot
//! SQL runner.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use redkit_checkip::{BrowserKind, CheckIp, LookupConfig};
use redkit_core::plugin::PluginInfo;
use redkit_ldap::DirectoryDao;
use redkit_sqlite::{DatabaseConfig, SqlValue, SqliteDao};
use redkit_ssn::SsnGenerator;
use tracing_subscriber::EnvFilter;

/// Uniform plugin wrappers for security tooling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print usage and authors for a plugin
    Info {
        /// Plugin to describe
        #[arg(value_enum)]
        plugin: PluginName,
    },

    /// Generate synthetic SSN-style identifiers
    Ssn {
        /// Number of identifiers to produce
        #[arg(long)]
        count: usize,
    },

    /// Look up the public IP address
    Checkip {
        /// Rendering engine selection
        #[arg(long, value_enum, default_value = "firefox")]
        browser_type: BrowserArg,

        /// Egress proxy (scheme://host:port)
        #[arg(long)]
        proxy: Option<String>,

        /// Route via the local Tor SOCKS endpoint
        #[arg(long)]
        with_tor: bool,
    },

    /// Run a single SQL statement against a SQLite database
    Sql {
        /// Path of the SQLite3 DB file
        #[arg(long)]
        db: PathBuf,

        /// SQL text, with positional ? markers when parameterized
        #[arg(long)]
        statement: String,

        /// Ordered bind values (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PluginName {
    Ldap,
    Sqlite,
    Checkip,
    Ssn,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BrowserArg {
    Firefox,
    Chrome,
    Ie,
    Headless,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Firefox => Self::Firefox,
            BrowserArg::Chrome => Self::Chrome,
            BrowserArg::Ie => Self::Ie,
            BrowserArg::Headless => Self::Headless,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_info(plugin: PluginName) {
    let (name, authors, usage) = match plugin {
        PluginName::Ldap => (
            DirectoryDao::NAME,
            DirectoryDao::authors(),
            DirectoryDao::usage(),
        ),
        PluginName::Sqlite => (SqliteDao::NAME, SqliteDao::authors(), SqliteDao::usage()),
        PluginName::Checkip => (CheckIp::NAME, CheckIp::authors(), CheckIp::usage()),
        PluginName::Ssn => (
            SsnGenerator::NAME,
            SsnGenerator::authors(),
            SsnGenerator::usage(),
        ),
    };

    println!("PLUGIN: {name}");
    println!("{authors}");
    println!("{usage}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Info { plugin } => print_info(plugin),

        Command::Ssn { count } => {
            for value in redkit_ssn::generate(count) {
                println!("{value}");
            }
        }

        Command::Checkip {
            browser_type,
            proxy,
            with_tor,
        } => {
            let config = LookupConfig {
                browser_type: browser_type.into(),
                proxy,
                with_tor,
            };
            let mut session = redkit_checkip::open(&config)?;
            println!("PUBLIC IP: {}", session.public_ip());
            redkit_checkip::close(&mut session)?;
        }

        Command::Sql {
            db,
            statement,
            params,
        } => {
            let mut session = redkit_sqlite::connect(&DatabaseConfig { dir_path: db })?;
            let bind_values: Option<Vec<SqlValue>> = if params.is_empty() {
                None
            } else {
                Some(params.into_iter().map(SqlValue::Text).collect())
            };
            let rows =
                redkit_sqlite::sql_statement(&session, &statement, bind_values.as_deref())?;
            for row in rows {
                println!("{}", serde_json::to_string(&row)?);
            }
            redkit_sqlite::disconnect(&mut session)?;
        }
    }

    Ok(())
}
