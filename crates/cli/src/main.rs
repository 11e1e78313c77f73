use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use piracy_checker::commands::{
    apps_command, init_config_command, license_record_command, license_status_command,
    scan_command, CatalogArgs, ScanArgs,
};
use piracy_checker::logging::{init_tracing, LogFormat};
use piracy_core::config::DEFAULT_CONFIG_FILE;

/// Detect known piracy apps in a device's package list and inspect license state.
///
/// This CLI is a thin wrapper around `piracy-core` (exposed in code as `piracy_core`).
#[derive(Parser, Debug)]
#[command(
    name = "piracy-checker",
    version,
    about = "Detect known piracy apps and evaluate license responses",
    long_about = None
)]
struct Cli {
    /// Log output format (logs go to stderr; level comes from RUST_LOG).
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CatalogFlags {
    /// Config file. Defaults to `piracy-checker.json` in the current directory, if present.
    #[arg(long)]
    config: Option<String>,

    /// Also treat third-party app stores as piracy indicators.
    #[arg(long, default_value_t = false)]
    include_stores: bool,

    /// Never treat third-party app stores as piracy indicators, whatever the config says.
    #[arg(long, default_value_t = false, conflicts_with = "include_stores")]
    no_stores: bool,

    /// JSON or YAML file with additional app definitions.
    #[arg(long)]
    extra: Option<String>,
}

impl From<CatalogFlags> for CatalogArgs {
    fn from(flags: CatalogFlags) -> Self {
        Self {
            config: flags.config,
            include_stores: flags.include_stores,
            exclude_stores: flags.no_stores,
            extra: flags.extra,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known apps that a scan checks for.
    Apps {
        #[command(flatten)]
        catalog: CatalogFlags,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Check a package listing for known piracy apps.
    ///
    /// The listing is one package per line; `adb shell pm list packages`
    /// output is accepted as-is.
    Scan {
        /// Path to the package listing, or `-` for stdin.
        #[arg(long)]
        packages: String,

        #[command(flatten)]
        catalog: CatalogFlags,

        /// Report every match instead of only the first.
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Exit with a failure status when a piracy app is detected.
        #[arg(long, default_value_t = false)]
        fail_on_detect: bool,
    },

    /// Record and inspect license-server responses.
    License {
        #[command(subcommand)]
        command: LicenseCommand,
    },

    /// Write a default config file.
    InitConfig {
        /// Where to write the config.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: String,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum LicenseCommand {
    /// Feed a server response into the server-managed policy.
    Record {
        /// Preference database holding the policy state.
        #[arg(long)]
        db: String,

        /// One of: licensed, not-licensed, retry.
        #[arg(long)]
        response: String,

        /// Server `extra` query string, e.g. `VT=...&GT=...&GR=...`.
        #[arg(long)]
        extra: Option<String>,
    },

    /// Show the policy state and whether access is currently allowed.
    Status {
        /// Preference database holding the policy state.
        #[arg(long)]
        db: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::Apps { catalog, json } => apps_command(&catalog.into(), json)?,
        Command::Scan { packages, catalog, all, json, fail_on_detect } => {
            let args = ScanArgs { packages, catalog: catalog.into(), all, json, fail_on_detect };
            scan_command(&args)?;
        }
        Command::License { command } => match command {
            LicenseCommand::Record { db, response, extra } => {
                license_record_command(&db, &response, extra.as_deref())?;
            }
            LicenseCommand::Status { db, json } => {
                license_status_command(&db, json)?;
            }
        },
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
