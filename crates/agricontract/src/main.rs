use agricontract_app::{AppController, AppError, AppResult};
use agricontract_config::{load_from_env, LoggingRuntimeConfig};
use agricontract_ui::Ui;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli_flags(std::env::args().skip(1))?;
    if cli.help {
        print_cli_help();
        return Ok(());
    }
    let config = load_from_env()?;
    init_file_logging(&config.logging())?;

    let mut view_config = config.ui_view();
    if let Some(theme) = cli.theme {
        view_config.theme = theme;
    }
    let simulation = config.simulation();
    tracing::info!(
        theme = view_config.theme.as_str(),
        tick_rate_ms = view_config.tick_rate_ms,
        seeded = simulation.rng_seed.is_some(),
        "starting agricontract"
    );

    let mut controller = AppController::new(&view_config, &simulation);
    let mut ui = Ui::init_with_view_config(&view_config)?;
    if let Err(error) = ui.run(&mut controller) {
        tracing::error!(error = %error, "terminal ui stopped with an error");
        return Err(error.into());
    }
    tracing::info!("agricontract exited");
    Ok(())
}

fn init_file_logging(logging: &LoggingRuntimeConfig) -> AppResult<()> {
    let log_path = &logging.log_path;
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| {
                AppError::configuration(format!(
                    "failed to create agricontract log directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| {
            AppError::configuration(format!(
                "failed to open agricontract log file '{}': {error}",
                log_path.display()
            ))
        })?;

    let filter = logging.filter.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliFlags {
    theme: Option<String>,
    help: bool,
}

fn parse_cli_flags(args: impl IntoIterator<Item = String>) -> AppResult<CliFlags> {
    let mut flags = CliFlags::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--theme" => {
                let value = args.next().ok_or_else(|| {
                    AppError::configuration("Missing value after --theme. Use --theme <light|dark>.")
                })?;
                flags.theme = Some(read_theme(&value)?);
            }
            "--help" | "-h" => flags.help = true,
            value if value.starts_with("--") => {
                return Err(AppError::configuration(format!(
                    "Unknown flag '{value}'. Run with --help for valid flags."
                )));
            }
            unknown => {
                return Err(AppError::configuration(format!(
                    "Unexpected argument '{unknown}'. Run with --help for valid flags."
                )));
            }
        }
    }

    Ok(flags)
}

fn read_theme(value: &str) -> AppResult<String> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "light" | "dark" => Ok(value),
        "" => Err(AppError::configuration("Flag '--theme' requires a non-empty value.")),
        other => Err(AppError::configuration(format!(
            "Unknown theme '{other}'. Use --theme <light|dark>."
        ))),
    }
}

fn print_cli_help() {
    println!("Usage: agricontract [--theme <light|dark>]");
    println!();
    println!("  --theme <theme>   Start in the light or dark theme");
    println!("  --help            Show this help message");
    println!();
    println!("Settings are read from $AGRICONTRACT_CONFIG or the default config path.");
}
