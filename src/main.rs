// Entrypoint for the CLI application.
// - Parses the command line, loads configuration and initialises logging.
// - Without a subcommand hands over to the interactive menu.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ejercicios_cli::config::{AppConfig, Overrides, MAX_DISCS};
use ejercicios_cli::ui::{self, RouteOptions};

/// Country listing, best-route search across Colombia and Tower of Hanoi.
#[derive(Parser)]
#[command(name = "ejercicios")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first countries returned by the REST Countries API.
    Countries {
        /// How many countries to print.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find the shortest route between two cities through mandatory stops.
    Route {
        #[arg(short, long)]
        origin: Option<String>,

        #[arg(short, long)]
        destination: Option<String>,

        /// Stops separated by `;`, e.g. "Medellín; Cartagena".
        #[arg(short, long)]
        stops: Option<String>,

        /// HTML file to write the route map to.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Do not write the map file.
        #[arg(long)]
        no_map: bool,
    },

    /// Play the Tower of Hanoi in the console.
    Hanoi {
        /// Number of discs.
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=MAX_DISCS as i64))]
        discs: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let overrides = match &cli.command {
        Some(Commands::Countries { limit }) => Overrides {
            countries_limit: *limit,
            ..Overrides::default()
        },
        Some(Commands::Route { output, .. }) => Overrides {
            map_file: output.clone(),
            ..Overrides::default()
        },
        Some(Commands::Hanoi { discs }) => Overrides {
            hanoi_discs: *discs,
            ..Overrides::default()
        },
        None => Overrides::default(),
    };
    let config = AppConfig::load(&overrides)?;

    match cli.command {
        None => ui::main_menu(&config),
        Some(Commands::Countries { .. }) => ui::show_countries(&config, config.countries_limit),
        Some(Commands::Route {
            origin,
            destination,
            stops,
            no_map,
            ..
        }) => ui::plan_route(
            &config,
            RouteOptions {
                origin,
                destination,
                stops,
                skip_map: no_map,
            },
        ),
        Some(Commands::Hanoi { .. }) => ui::play_hanoi(config.hanoi_discs),
    }
}
