mod input;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use portal_engine::{Classification, Classifier, EngineSettings, EventLabel, ScanPeriod};
use portal_ephem::{EphemerisConfig, MeeusEphemeris};
use portal_time::datetime_from_jd;
use portal_vedic::{
    DayNight, DaylightWindow, NightConvention, SolarDayNight, dasha_for_longitude, houses_for,
    nakshatra_info, rashi_for,
};

use crate::input::{InputError, parse_instant_default, resolve_location};

#[derive(Parser)]
#[command(name = "portal", about = "Event classification CLI")]
struct Cli {
    /// Engine settings (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Use this Kp for every date
    #[arg(long, global = true)]
    kp: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Location {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Configured place name, or "lat, lon"
    #[arg(long)]
    place: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one place and instant
    Classify {
        #[command(flatten)]
        location: Location,
        /// RFC 3339, YYYY-MM-DDThh:mm (UTC), or YYYY-MM-DD (15:00 UTC)
        #[arg(long)]
        date: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify every day of a month, quarter, or year
    Scan {
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        year: i32,
        /// Month 1-12
        #[arg(long, conflicts_with = "quarter")]
        month: Option<u32>,
        /// Quarter 1-4
        #[arg(long)]
        quarter: Option<u32>,
        /// Consecutive months or quarters to scan
        #[arg(long, default_value = "1")]
        periods: u32,
        /// Keep only this label
        #[arg(long)]
        label: Option<EventLabel>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Nakshatra for an ecliptic longitude
    Nakshatra {
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        deg: f64,
    },
    /// Vimshottari mahadasha for a Moon longitude
    Dasha {
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        deg: f64,
    },
    /// House cusps for a place and instant
    Houses {
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        date: String,
    },
    /// Day or night at a place and instant
    Night {
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        date: String,
        /// sunrise, civil, nautical, or astronomical
        #[arg(long)]
        convention: Option<String>,
    },
}

fn load_settings(cli: &Cli) -> anyhow::Result<EngineSettings> {
    let mut settings = match &cli.config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    if let Some(kp) = cli.kp {
        settings.kp.fixed = Some(kp);
        settings.kp.table_path = None;
    }
    settings.validate()?;
    Ok(settings)
}

fn locate(location: &Location, settings: &EngineSettings) -> Result<(f64, f64), InputError> {
    resolve_location(
        location.lat,
        location.lon,
        location.place.as_deref(),
        &settings.place_table(),
    )
}

fn format_instant(jd: f64) -> String {
    datetime_from_jd(jd)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| format!("JD {jd:.6}"))
}

fn print_classification(r: &Classification) {
    let a = &r.detail.astro;
    let c = &r.detail.conditions;
    let obs = &r.detail.observation;
    println!("{}", r.label);
    println!(
        "  at ({:.4}, {:.4}) {}",
        obs.latitude(),
        obs.longitude(),
        obs.instant().to_rfc3339()
    );
    println!(
        "  sun {:.4}  moon {:.4}  node {:.4}  elongation {:.4}",
        a.sun_deg, a.moon_deg, a.node_deg, c.elongation_deg
    );
    match a.nakshatra {
        Some(n) => println!("  nakshatra {} pada {}", n, a.pada.unwrap_or(0)),
        None => println!("  nakshatra unknown"),
    }
    if let Some(sign) = a.moon_sign {
        println!("  moon sign {} ({})", sign.name(), sign.western_name());
    }
    if let Some(d) = &a.dasha {
        println!(
            "  dasha {} ({} years, {:.2} remaining)",
            d.planet, d.years, d.balance_years
        );
    }
    if let Some(h) = a.moon_house {
        println!("  moon house {h}");
    }
    if let Some(cusps) = &a.house_cusps {
        let list: Vec<String> = cusps.iter().map(|c| format!("{c:.2}")).collect();
        println!("  cusps {}", list.join(" "));
    }
    println!(
        "  node distance {:.4}  kp {:.2}  night {}",
        c.node_distance_deg, c.kp, c.night
    );
    println!(
        "  C1 {} C2 {} C3 {} C4 {} C5 {} C6 {}",
        c.node_proximity,
        c.critical_angle,
        c.mansion_member,
        c.latitude_band,
        c.night,
        c.quiet_geomagnetic
    );
    if let Some(name) = &r.detail.contact {
        println!("  reference event {name}");
    }
}

fn scan_periods(
    year: i32,
    month: Option<u32>,
    quarter: Option<u32>,
    count: u32,
) -> Result<Vec<ScanPeriod>, InputError> {
    let first = match (month, quarter) {
        (Some(month), _) => ScanPeriod::Month { year, month },
        (None, Some(quarter)) => ScanPeriod::Quarter { year, quarter },
        (None, None) => ScanPeriod::Year(year),
    };
    if !first.is_valid() {
        return Err(InputError::Period(match first {
            ScanPeriod::Quarter { quarter, .. } => format!("quarter {quarter} (expected 1-4)"),
            _ => format!("month {} (expected 1-12)", month.unwrap_or(0)),
        }));
    }
    Ok(std::iter::successors(Some(first), |p| p.next())
        .take(count.max(1) as usize)
        .collect())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    match &cli.command {
        Commands::Classify {
            location,
            date,
            json,
        } => {
            let (lat, lon) = locate(location, &settings)?;
            let instant: DateTime<Utc> = parse_instant_default(date)?;
            let classifier = Classifier::from_settings(&settings)?;
            let result = classifier.classify(lat, lon, instant)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_classification(&result);
            }
        }

        Commands::Scan {
            location,
            year,
            month,
            quarter,
            periods,
            label,
            json,
        } => {
            let (lat, lon) = locate(location, &settings)?;
            let classifier = Classifier::from_settings(&settings)?;
            let mut hits = Vec::new();
            for period in scan_periods(*year, *month, *quarter, *periods)? {
                log::info!("scanning {period:?} at ({lat:.4}, {lon:.4})");
                hits.extend(
                    classifier
                        .classify_range(lat, lon, &period)?
                        .into_iter()
                        .filter(|(_, r)| label.is_none_or(|l| r.label == l)),
                );
            }
            if *json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("no events found");
            } else {
                for (day, r) in &hits {
                    println!("{} {}", day.format("%d.%m.%Y"), r.label);
                }
                println!("{} events", hits.len());
            }
        }

        Commands::Nakshatra { deg } => match nakshatra_info(*deg) {
            Some(info) => println!(
                "{} (index {}) - Pada {} ({:.4} deg in nakshatra)",
                info.nakshatra.name(),
                info.nakshatra.index(),
                info.pada,
                info.degrees_in_nakshatra
            ),
            None => println!("unknown"),
        },

        Commands::Dasha { deg } => {
            let d = dasha_for_longitude(*deg);
            let sign = rashi_for(*deg).map_or("unknown", |r| r.name());
            println!(
                "{} ({}) - {} years, {:.2} remaining; moon sign {}",
                d.planet.name(),
                d.planet.english_name(),
                d.years,
                d.balance_years,
                sign
            );
        }

        Commands::Houses { location, date } => {
            let (lat, lon) = locate(location, &settings)?;
            let instant = parse_instant_default(date)?;
            let h = houses_for(lat, lon, &instant);
            println!(
                "{:?} houses, ascendant {:.4}, MC {:.4}",
                h.system, h.ascendant_deg, h.mc_deg
            );
            for (i, cusp) in h.cusps.iter().enumerate() {
                println!("  {:>2}: {:>9.4}", i + 1, cusp);
            }
        }

        Commands::Night {
            location,
            date,
            convention,
        } => {
            let (lat, lon) = locate(location, &settings)?;
            let instant = parse_instant_default(date)?;
            let convention = match convention.as_deref() {
                None => settings.day_night.convention,
                Some("sunrise") => NightConvention::Sunrise,
                Some("civil") => NightConvention::Civil,
                Some("nautical") => NightConvention::Nautical,
                Some("astronomical") => NightConvention::Astronomical,
                Some(other) => anyhow::bail!(
                    "unknown convention `{other}` (sunrise, civil, nautical, astronomical)"
                ),
            };
            let ephemeris = MeeusEphemeris::new(&EphemerisConfig {
                lsk_path: settings.ephemeris.lsk_path.clone(),
            })?;
            let day_night = SolarDayNight::new(ephemeris).with_convention(convention);
            match day_night.daylight_window(lat, lon, &instant) {
                Ok(DaylightWindow::Bounded { start_jd, end_jd }) => {
                    println!("day starts {}", format_instant(start_jd));
                    println!("day ends   {}", format_instant(end_jd));
                }
                Ok(window) => println!("{window:?}"),
                Err(e) => println!("unresolved: {e}"),
            }
            let night = day_night.is_night(lat, lon, &instant);
            println!("{}", if night { "night" } else { "day" });
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if let Some(input) = e.downcast_ref::<InputError>() {
                eprintln!("\nexample:\n  {}", input.example());
            }
            ExitCode::FAILURE
        }
    }
}
