use anyhow::Result;
use clap::Args as ClapArgs;

use crate::config::schema::{BarLength, ColorMode};
use crate::render::bar::render_bar;

/// Arguments for the `cc-statusline preview` subcommand.
#[derive(ClapArgs)]
pub struct Args {}

/// Render the bar matrix for visual inspection in a real terminal:
/// every permitted length, the color modes, and the fractional levels.
pub fn run(_args: Args) -> Result<()> {
    println!("\n=== Progress Bar Preview ===");

    let percentages = [0.0, 10.0, 25.0, 33.0, 50.0, 66.0, 75.0, 90.0, 100.0];
    for length in [BarLength::Short, BarLength::Medium, BarLength::Long] {
        println!("\n{}-cell bars:\n", length.cells());
        for pct in percentages {
            let bar = render_bar(pct, length.cells(), ColorMode::Progressive);
            println!("{pct:>5}% {bar}");
        }
    }

    println!("\n=== Color Modes (50% at 10 cells) ===\n");
    for (name, mode) in [
        ("progressive", ColorMode::Progressive),
        ("green", ColorMode::Green),
        ("yellow", ColorMode::Yellow),
        ("red", ColorMode::Red),
        ("blue", ColorMode::Blue),
    ] {
        println!("{name:<12}: {}", render_bar(50.0, 10, mode));
    }

    println!("\n=== Fractional Cells (10-cell bar) ===\n");
    for pct in [11.25, 12.5, 13.75, 15.0, 16.25, 17.5, 18.75] {
        println!("{pct:>6}% {}", render_bar(pct, 10, ColorMode::Progressive));
    }

    println!();
    Ok(())
}
