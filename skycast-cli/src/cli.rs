use clap::{Parser, Subcommand};
use inquire::Select;

use skycast_core::geocode::ReverseGeocoder;
use skycast_core::geolocate::FALLBACK_LOCATION_NAME;
use skycast_core::units::{
    PrecipitationUnit, PressureUnit, TemperatureUnit, TimeFormat, WindSpeedUnit,
};
use skycast_core::{Config, Coordinates, Dashboard, Locale, Location, OpenMeteoProvider};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for the saved (or default) location.
    Show {
        /// Forecast day for the hourly view: 0 = today, up to 6.
        #[arg(long, default_value_t = 0)]
        day: usize,
    },

    /// Pick display units, time format and language interactively.
    Configure,

    /// Save a location by coordinates, or forget the saved one.
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,

        /// Clear the saved location and fall back to the default.
        #[arg(long)]
        forget: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { day } => show(day).await,
            Command::Configure => configure(),
            Command::Locate {
                latitude,
                longitude,
                forget,
            } => locate(latitude, longitude, forget).await,
        }
    }
}

async fn show(day: usize) -> anyhow::Result<()> {
    let config = Config::load()?;
    let location = config.effective_location().clone();

    let mut dashboard = Dashboard::new(Box::new(OpenMeteoProvider::new()), location);
    dashboard.refresh().await;

    if let Some(message) = dashboard.error() {
        anyhow::bail!("{message}");
    }

    let snapshot = dashboard
        .weather()
        .ok_or_else(|| anyhow::anyhow!("No weather data received"))?;

    print!(
        "{}",
        render::dashboard(snapshot, dashboard.location(), &config, day)
    );

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.units.temperature =
        Select::new("Temperature unit:", TemperatureUnit::all().to_vec()).prompt()?;
    config.units.wind_speed =
        Select::new("Wind speed unit:", WindSpeedUnit::all().to_vec()).prompt()?;
    config.units.precipitation =
        Select::new("Precipitation unit:", PrecipitationUnit::all().to_vec()).prompt()?;
    config.units.pressure =
        Select::new("Air pressure unit:", PressureUnit::all().to_vec()).prompt()?;
    config.units.time_format =
        Select::new("Time format:", TimeFormat::all().to_vec()).prompt()?;

    let locale = Select::new("Language:", Locale::all().to_vec()).prompt()?;
    config.locale = locale.code().to_string();

    config.save()?;
    println!("Settings saved to {}.", Config::config_file_path()?.display());

    Ok(())
}

async fn locate(latitude: Option<f64>, longitude: Option<f64>, forget: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if forget {
        config.clear_location();
        config.save()?;
        println!(
            "Saved location cleared; using {}.",
            config.effective_location().name
        );
        return Ok(());
    }

    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        anyhow::bail!("Pass --latitude and --longitude, or --forget to clear the saved location.");
    };

    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("Latitude {latitude} is outside [-90, 90].");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("Longitude {longitude} is outside [-180, 180].");
    }

    let coordinates = Coordinates {
        latitude,
        longitude,
    };

    // Best effort: coordinates are usable without a resolved name.
    let name = ReverseGeocoder::new()
        .lookup(coordinates)
        .await
        .unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string());

    config.save_location(Location {
        latitude,
        longitude,
        name: name.clone(),
    });
    config.save()?;

    println!("Location saved: {name}");
    Ok(())
}
