//! gridterm - draw a demo grid of bordered cells
//!
//! Draws a grid of cells on the terminal using the settings from
//! `~/.gridterm/config.toml`, colors the first row with the built-in
//! palette and fills a few cells with text. Press any key to exit.
//!
//! # Quick Start
//!
//! ```text
//! gridterm                    # Draw on the terminal
//! gridterm --cols 9 --rows 3  # Choose the grid size
//! gridterm --dump             # Print the grid as plain text instead
//! ```

use std::env;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridterm::config::{home_dir, Config as GridConfig};
use gridterm::{ColorPair, CrosstermSurface, Grid, RecordingSurface, Surface};

/// Command line options
struct Options {
    /// Cell interior width override
    width: Option<u16>,
    /// Cell interior height override
    height: Option<u16>,
    /// Number of grid columns
    cols: i32,
    /// Number of grid rows
    rows: i32,
    /// Print as text instead of drawing on the terminal
    dump: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            cols: 9,
            rows: 4,
            dump: false,
        }
    }
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("gridterm {}", VERSION);
}

fn print_help() {
    eprintln!("gridterm {} - bordered cell grids on a character terminal", VERSION);
    eprintln!();
    eprintln!("Usage: gridterm [OPTIONS]");
    eprintln!();
    eprintln!("Grid options:");
    eprintln!("  --cols <N>            Number of grid columns (default: 9)");
    eprintln!("  --rows <N>            Number of grid rows (default: 4)");
    eprintln!("  --width <N>           Cell interior width (overrides config)");
    eprintln!("  --height <N>          Cell interior height (overrides config)");
    eprintln!();
    eprintln!("Output options:");
    eprintln!("  (default)             Draw on the terminal, press any key to exit");
    eprintln!("  -d, --dump            Print the grid as plain text");
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Logging goes to ~/.gridterm/gridterm.log, level from GRIDTERM_LOG.");
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, name: &str) -> Result<T, String> {
    let value = args
        .get(i)
        .ok_or_else(|| format!("Missing {} argument", name))?;
    value
        .parse()
        .map_err(|_| format!("Invalid {} value: {}", name, value))
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-d" | "--dump" => {
                options.dump = true;
            }
            "--cols" => {
                i += 1;
                options.cols = parse_number(&args, i, "cols")?;
            }
            "--rows" => {
                i += 1;
                options.rows = parse_number(&args, i, "rows")?;
            }
            "--width" => {
                i += 1;
                options.width = Some(parse_number(&args, i, "width")?);
            }
            "--height" => {
                i += 1;
                options.height = Some(parse_number(&args, i, "height")?);
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn init_logging() {
    let log_path = home_dir()
        .map(|h| h.join(".gridterm").join("gridterm.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("gridterm.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    // Logging must never reach the terminal being drawn on
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("GRIDTERM_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("gridterm starting...");

    let mut config = GridConfig::load();
    if let Some(width) = options.width {
        config.cell.width = width;
    }
    if let Some(height) = options.height {
        config.cell.height = height;
    }
    let geometry = config.geometry()?;
    let palette = config.palette()?;

    if options.dump {
        let mut grid = Grid::with_palette(RecordingSurface::new(), geometry, palette);
        draw_demo(&mut grid, &options)?;
        print!("{}", grid.surface().render_text());
        return Ok(());
    }

    let mut surface = CrosstermSurface::stdout();
    surface.init()?;
    let mut grid = Grid::with_palette(surface, geometry, palette);
    let drawn = draw_demo(&mut grid, &options)
        .and_then(|()| grid.refresh().map_err(anyhow::Error::from));
    if drawn.is_ok() {
        wait_for_key()?;
    }
    grid.surface_mut().cleanup()?;
    drawn
}

/// Draw the demo scene: a bordered grid, one colored cell per pair on the
/// first row, a caption across the second row and one cleared cell.
fn draw_demo<S: Surface>(grid: &mut Grid<S>, options: &Options) -> anyhow::Result<()> {
    for y in 0..options.rows {
        grid.draw_line(0, y, options.cols)?;
    }

    match grid.init_colors() {
        Ok(()) => {
            for (x, pair) in ColorPair::ALL.into_iter().enumerate() {
                let x = x as i32;
                if x >= options.cols {
                    break;
                }
                grid.draw_colored_cell(x, 0, pair)?;
                grid.write_colored_content(x, 0, pair.name(), pair)?;
            }
        }
        Err(e) => warn!(error = %e, "drawing without colors"),
    }

    if options.rows > 1 {
        write_across(grid, 1, "gridterm demo", options.cols)?;
    }
    if options.rows > 2 && options.cols > 0 {
        let x = options.cols - 1;
        grid.write_content(x, 2, "stale text")?;
        grid.clear_cell(x, 2)?;
    }
    info!(cols = options.cols, rows = options.rows, "demo drawn");
    Ok(())
}

/// Spread `text` over consecutive cells of grid row `y`
fn write_across<S: Surface>(grid: &mut Grid<S>, y: i32, text: &str, cols: i32) -> anyhow::Result<()> {
    let capacity = grid.geometry().capacity();
    let chars: Vec<char> = text.chars().collect();
    for (x, chunk) in chars.chunks(capacity).enumerate() {
        let x = x as i32;
        if x >= cols {
            break;
        }
        let part: String = chunk.iter().collect();
        grid.write_content(x, y, &part)?;
    }
    Ok(())
}

fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
