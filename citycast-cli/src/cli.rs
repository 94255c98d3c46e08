use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use citycast_core::{Config, RequestController, WeatherResult, provider_from_config};
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Password, PasswordDisplayMode, Text};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather and forecast for a city")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and forecast length.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Forecast days (1-14); overrides the configured value.
        #[arg(long)]
        days: Option<u8>,
    },

    /// Keep asking for cities until Esc or Ctrl-C.
    Interactive {
        /// Forecast days (1-14); overrides the configured value.
        #[arg(long)]
        days: Option<u8>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = self.config.as_deref();

        match self.command {
            Command::Configure => configure(path),
            Command::Show { city, days } => show(path, &city, days).await,
            Command::Interactive { days } => interactive(path, days).await,
        }
    }
}

/// `--config` when given, the platform location otherwise.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn configure(path: Option<&Path>) -> Result<()> {
    let mut config = load_config(path)?;
    if config.api_key().is_some() {
        println!("An API key is already configured; a new one replaces it.");
    }

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    let days = CustomType::<u8>::new("Forecast days (1-14):")
        .with_default(config.forecast_days)
        .with_error_message("Please type a whole number")
        .prompt()?;

    config.set_forecast_days(days)?;
    config.set_api_key(api_key.to_string());
    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => {
            config.save()?;
            Config::config_file_path()?
        }
    };

    println!("Saved configuration to {}", saved_to.display());
    Ok(())
}

fn controller_for(path: Option<&Path>, days: Option<u8>) -> Result<RequestController> {
    let mut config = load_config(path)?;
    if let Some(days) = days {
        config.set_forecast_days(days)?;
    }

    let provider = provider_from_config(&config)?;
    Ok(RequestController::new(provider, config.forecast_days))
}

/// Submit `city` and wait for the request to settle.
async fn lookup(controller: &RequestController, city: &str) -> Result<WeatherResult> {
    let handle = controller.submit(city);
    // `submit` leaves the state at Loading; the task may already have replaced it.
    eprintln!("{}", render(&WeatherResult::Loading));

    handle.await.context("Weather request task failed")?;
    Ok(controller.current())
}

async fn show(path: Option<&Path>, city: &str, days: Option<u8>) -> Result<()> {
    let controller = controller_for(path, days)?;

    match lookup(&controller, city).await? {
        WeatherResult::Error(message) => bail!("{message}"),
        state => {
            println!("{}", render(&state));
            Ok(())
        }
    }
}

async fn interactive(path: Option<&Path>, days: Option<u8>) -> Result<()> {
    let controller = controller_for(path, days)?;
    println!("{}", render(&controller.current()));

    loop {
        let prompt = Text::new("Enter a City").with_help_message("Esc to quit");
        let city = match prompt.prompt_skippable() {
            Ok(Some(city)) => city,
            Ok(None) | Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let state = lookup(&controller, &city).await?;
        println!("{}\n", render(&state));
    }

    Ok(())
}
