use std::path::Path;

use anyhow::Context;
use clap::{Arg, Command};

use day_night_palette::{
    components::TimeState, load_config, resources::TransitionConfig, run_viewer,
};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("day-night-palette")
        .about("Toggle a 2D scene between day and night palettes")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .help("Path to config file"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .takes_value(true)
                .possible_values(["day", "night"])
                .help("Starting time of day"),
        )
        .arg(
            Arg::new("transition")
                .long("transition")
                .takes_value(true)
                .help("Transition duration in seconds, 0 for an instant swap"),
        )
        .get_matches();

    let config_path = Path::new(matches.value_of("config").unwrap_or("daynight.toml"));
    let mut config = load_config(config_path);

    match matches.value_of("state") {
        Some("day") => config.time.starting_state = TimeState::Day,
        Some("night") => config.time.starting_state = TimeState::Night,
        _ => {}
    }

    if let Some(transition) = matches.value_of("transition") {
        let seconds: f32 = transition
            .parse()
            .with_context(|| format!("invalid --transition value `{}`", transition))?;
        TransitionConfig::symmetric(seconds)
            .validate()
            .with_context(|| format!("invalid --transition value `{}`", transition))?;
        config.time.transition_to_night = seconds;
        config.time.transition_to_day = None;
    }

    run_viewer(&config);
    Ok(())
}
