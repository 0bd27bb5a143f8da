// UI layer: provides a simple interactive menu using `dialoguer` and the
// console flows for the three programs. Library modules do the work; this
// file only prompts, prints and shows spinners.

use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{render_countries, CountriesClient};
use crate::config::AppConfig;
use crate::hanoi::{TowerId, Towers};
use crate::routing::{best_route, parse_stops, write_route_map, CityMap};

pub const DEFAULT_ORIGIN: &str = "Ibagué";
pub const DEFAULT_DESTINATION: &str = "Barranquilla";

/// Values for the route program. Anything left as `None` is prompted for
/// when stdin is a terminal, otherwise the default is used.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Raw `;`-separated list
    pub stops: Option<String>,
    pub skip_map: bool,
}

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit". Errors from a program are printed and the menu comes back.
pub fn main_menu(config: &AppConfig) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "The interactive menu needs a terminal. Choose a subcommand instead: countries, route or hanoi."
        );
    }
    loop {
        let items = vec!["List countries", "Best route", "Tower of Hanoi", "Exit"];
        // `Select` shows a keyboard-navigable list in the terminal.
        let selection = Select::new().items(&items).default(0).interact()?;
        let outcome = match selection {
            0 => show_countries(config, config.countries_limit),
            1 => plan_route(config, RouteOptions::default()),
            2 => play_hanoi(config.hanoi_discs),
            3 => break,
            _ => Ok(()),
        };
        if let Err(e) = outcome {
            print_error(&format!("{e:#}"));
        }
    }
    Ok(())
}

/// Fetch the country list and print the first `limit` entries.
pub fn show_countries(config: &AppConfig, limit: usize) -> Result<()> {
    let client = CountriesClient::from_config(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Fetching countries...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let fetched = client.fetch_countries();
    spinner.finish_and_clear();

    let countries = fetched.context("Countries request failed")?;
    println!("{}", render_countries(&countries, limit));
    Ok(())
}

/// Ask for origin, destination and stops, print the best route and write
/// the HTML map.
pub fn plan_route(config: &AppConfig, options: RouteOptions) -> Result<()> {
    let map = CityMap::colombia();
    let interactive = std::io::stdin().is_terminal();

    println!("=== BEST ROUTE BETWEEN COLOMBIAN CITIES ===");
    println!("Available cities:");
    println!("{}", map.names_sorted().join(", "));

    let origin = ask_or_default(options.origin, "Origin", DEFAULT_ORIGIN, interactive)?;
    let destination =
        ask_or_default(options.destination, "Destination", DEFAULT_DESTINATION, interactive)?;
    let raw_stops = match options.stops {
        Some(s) => s,
        None if interactive => Input::<String>::new()
            .with_prompt("Stops (separate with ;, e.g. Medellín; Cartagena)")
            .allow_empty(true)
            .interact_text()?,
        None => String::new(),
    };
    let stops = parse_stops(&raw_stops);

    let route = match best_route(&map, &origin, &destination, &stops) {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(error = %e, "route request rejected");
            anyhow::bail!("Some city is not in the list. {e}");
        }
    };

    let Some(route) = route else {
        print_error(&format!(
            "No route found from {origin} to {destination} through the requested stops."
        ));
        return Ok(());
    };

    println!();
    println!("Best route found: {}", route.display_path());
    println!("Total approximate distance: {} km", route.distance_km);

    if options.skip_map {
        return Ok(());
    }
    let path = &config.map_file;
    write_route_map(&map, &route, path)?;
    print_success(&format!("Map generated: {}", path.display()));
    println!("Open it in your browser to see the route over the map of Colombia.");
    Ok(())
}

fn ask_or_default(
    given: Option<String>,
    prompt: &str,
    default: &str,
    interactive: bool,
) -> Result<String> {
    let value = match given {
        Some(v) => v,
        None if interactive => Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?,
        None => String::new(),
    };
    let value = value.trim();
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    })
}

/// Turn-based Tower of Hanoi. Each turn asks for a source and a destination
/// tower; the game ends once tower C holds every disc.
///
/// On a terminal the turns are read with `dialoguer`; otherwise one line per
/// answer is read from stdin and running out of input is an error.
pub fn play_hanoi(discs: u32) -> Result<()> {
    if std::io::stdin().is_terminal() {
        return play_hanoi_with(discs, |prompt| {
            Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
        });
    }

    let mut lines = std::io::stdin().lock().lines();
    play_hanoi_with(discs, |prompt| {
        print!("{prompt}: ");
        std::io::stdout().flush()?;
        match lines.next() {
            Some(line) => {
                let line = line.context("Failed to read move from stdin")?;
                println!("{}", line.trim());
                Ok(line)
            }
            None => {
                println!();
                anyhow::bail!("input ended before the puzzle was solved")
            }
        }
    })
}

/// Game loop over any source of answers. `ask` receives the prompt text and
/// returns the raw answer.
pub fn play_hanoi_with<F>(discs: u32, mut ask: F) -> Result<()>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut towers = Towers::new(discs);

    println!("Tower of Hanoi - interactive game");
    println!("Goal: move the {discs} discs from A to C");
    println!("{towers}");

    while !towers.is_solved() {
        let from = ask("Move from (A/B/C)")?;
        let to = ask("Move to (A/B/C)")?;

        let (from, to) = match (from.parse::<TowerId>(), to.parse::<TowerId>()) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                print_error(&e.to_string());
                continue;
            }
        };

        if let Err(e) = towers.move_disc(from, to) {
            tracing::warn!(error = %e, "move rejected");
            print_error(&e.to_string());
        }
        println!("{towers}");
    }

    print_success(&format!(
        "Congratulations! You solved the Tower of Hanoi in {} moves (best possible: {}).",
        towers.moves(),
        towers.optimal_moves()
    ));
    Ok(())
}

// Colors only when stdout is a terminal, so piped output stays plain.
fn print_error(msg: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", msg.red());
    } else {
        println!("{msg}");
    }
}

fn print_success(msg: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", msg.green());
    } else {
        println!("{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn answers(items: &[&str]) -> impl FnMut(&str) -> Result<String> {
        let mut queue: VecDeque<String> = items.iter().map(|s| s.to_string()).collect();
        move |_prompt| {
            queue
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("input ended before the puzzle was solved"))
        }
    }

    #[test]
    fn one_disc_game_finishes_after_one_move() {
        play_hanoi_with(1, answers(&["a", "c"])).unwrap();
    }

    #[test]
    fn invalid_letters_and_moves_are_skipped() {
        let moves = ["X", "C", "B", "C", "A", "B", "A", "C", "B", "C"];
        play_hanoi_with(2, answers(&moves)).unwrap();
    }

    #[test]
    fn running_out_of_answers_is_an_error() {
        let err = play_hanoi_with(2, answers(&["A", "B"])).unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }
}
