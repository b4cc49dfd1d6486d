use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use hydrometer_settings::{
    commands::{self, RebootOutcome, SettingsEdits},
    config::DeviceConfig,
    shell::Shell,
    transport::ReqwestTransport,
};
use log::{error, info};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(version, about = "Configure an electronic hydrometer over its local HTTP API")]
struct Cli {
    /// Device base URL, overrides HYDROMETER_URL
    #[arg(long, global = true, value_name = "URL")]
    device: Option<String>,
    /// Request timeout in seconds, overrides HYDROMETER_TIMEOUT_SECS
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the settings stored on the device
    Show,
    /// List the WiFi networks the device can see
    Scan,
    /// Connect the device to a WiFi network
    Connect {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        pass: String,
    },
    /// Connect the device to the stored fermenter access point
    ConnectFermenter,
    /// Enable the device's FTP service
    Ftp,
    /// Test an MQTT broker configuration
    MqttTest {
        #[command(flatten)]
        edits: SettingsEdits,
        #[command(flatten)]
        reboot: RebootArgs,
    },
    /// Change settings and save them on the device
    Set {
        #[command(flatten)]
        edits: SettingsEdits,
        #[command(flatten)]
        reboot: RebootArgs,
    },
}

#[derive(clap::Args)]
struct RebootArgs {
    /// Reboot the device afterwards so the settings take effect
    #[arg(long)]
    reboot: bool,
    /// Do not ask before rebooting
    #[arg(long, requires = "reboot")]
    yes: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize();

    let config = DeviceConfig::load(cli.device, cli.timeout)?;
    info!("using device at {}", config.base_url);
    let mut shell = Shell::new(ReqwestTransport::new(&config)?);

    match cli.command {
        Command::Show => {
            let view = commands::load(&mut shell).await?;
            let json = serde_json::to_string_pretty(&view.model.settings)
                .context("failed to serialize settings")?;
            println!("{json}");
            println!("uplink: {:?}", view.uplink);
            println!("interval: {} min", view.interval_minutes);
            if let Some(warning) = view.interval_warning {
                println!("{warning}");
            }
        }
        Command::Scan => {
            for ssid in commands::scan(&mut shell).await? {
                println!("{ssid}");
            }
        }
        Command::Connect { ssid, pass } => commands::connect_wifi(&mut shell, ssid, pass).await?,
        Command::ConnectFermenter => commands::connect_fermenter(&mut shell).await?,
        Command::Ftp => commands::enable_ftp(&mut shell).await?,
        Command::MqttTest { edits, reboot } => {
            commands::mqtt_test(&mut shell, edits).await?;
            maybe_reboot(&mut shell, reboot).await?;
        }
        Command::Set { edits, reboot } => {
            commands::save(&mut shell, edits).await?;
            maybe_reboot(&mut shell, reboot).await?;
        }
    }

    Ok(())
}

async fn maybe_reboot(shell: &mut Shell<ReqwestTransport>, args: RebootArgs) -> Result<()> {
    if !args.reboot {
        return Ok(());
    }
    let confirm = || match args.yes {
        true => Ok(true),
        false => ask_for_reboot(),
    };
    let outcome = commands::reboot(shell, confirm).await?;
    if outcome == RebootOutcome::Cancelled {
        println!("reboot cancelled");
    }
    Ok(())
}

fn ask_for_reboot() -> Result<bool> {
    print!("Reboot the device now? [y/N] ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read answer")?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stderr).init();

    info!("hydrometer-settings version: {}", env!("CARGO_PKG_VERSION"));
}
