use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use roverdrive::config::{RenderMode, RoverConfig};
use roverdrive::display::{DisplaySink, HtmlFile, Stdout};
use roverdrive::mission::MissionRegistry;
use roverdrive::rover::Rover;
use roverdrive::script;

#[derive(Parser)]
#[command(name = "roverdrive")]
#[command(about = "Drive a rover across a mission map and render the result as animated SVG", long_about = None)]
#[command(version)]
struct Cli {
    /// Script of rover commands, one per line
    script: Option<PathBuf>,

    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding missions.tsv and the background images
    #[arg(short, long)]
    missions: Option<PathBuf>,

    /// Mission to start before the script runs
    #[arg(long, default_value = "0")]
    mission: i64,

    /// Initial speed, 1 (slow) to 10 (fast)
    #[arg(long)]
    speed: Option<u8>,

    /// Display width
    #[arg(long)]
    width: Option<u32>,

    /// Display height
    #[arg(long)]
    height: Option<u32>,

    /// HTML page to keep updated; without it frames are printed to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Only write the page once the whole script has run
    #[arg(long)]
    batch: bool,

    /// Log every command
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn rover_config(&self) -> Result<RoverConfig> {
        let mut config = match &self.config {
            Some(path) => RoverConfig::from_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RoverConfig::default(),
        };
        if let Some(folder) = &self.missions {
            config.mission_folder = folder.to_string_lossy().to_string();
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        if let Some(width) = self.width {
            config.window_size.0 = width;
        }
        if let Some(height) = self.height {
            config.window_size.1 = height;
        }
        if self.batch {
            config.render_mode = RenderMode::Explicit;
        }
        config.validate()?;
        Ok(config)
    }
}

fn drive<S: DisplaySink>(cli: &Cli, config: RoverConfig, sink: S) -> Result<Rover<S>> {
    let missions = MissionRegistry::load(&config.mission_folder);
    let mut rover = Rover::new(config, missions, sink)?;
    rover.start_mission(cli.mission)?;

    if let Some(path) = &cli.script {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let steps = script::parse(&text)?;
        log::info!("Running {} commands from {}", steps.len(), path.display());
        for line in script::run(&mut rover, &steps)? {
            eprintln!("{}", line);
        }
    }
    rover.go()?;
    Ok(rover)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = cli.rover_config()?;
    match &cli.out {
        Some(path) => {
            let sink = HtmlFile::new(path, "roverdrive")?;
            let rover = drive(&cli, config, sink)?;
            eprintln!(
                "Wrote {} (travelled {})",
                rover.sink().path().display(),
                rover.travel()?
            );
        }
        None => {
            drive(&cli, config, Stdout)?;
        }
    }
    Ok(())
}
