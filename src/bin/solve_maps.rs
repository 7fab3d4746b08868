//! Solve every labyrinth in a map file and print the doors Teseo must open.
//!
//! ```bash
//! solve_maps --input data_files/input.txt --render --report report.json
//! ```

use clap::Parser;
use env_logger::Env;
use log::info;
use minotaur::config::DEFAULT_CONFIG_PATH;
use minotaur::render::render_map;
use minotaur::{load_maps, BatchReport, Config, Labyrinth, LabyrinthError};
use std::process;

#[derive(Parser)]
#[command(name = "solve_maps")]
#[command(author, version, about = "Find the fewest doors between Teseo and the Minotaur")]
struct Args {
    /// TOML configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Map description file, overrides [batch] input_path
    #[arg(short, long)]
    input: Option<String>,

    /// Write a JSON report here, overrides [batch] report_path
    #[arg(short, long)]
    report: Option<String>,

    /// Print each labyrinth with its path
    #[arg(long)]
    render: bool,
}

fn main() {
    let args = Args::parse();

    let (config, origin) = match &args.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("Error: failed to load {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let (config, origin) = Config::load_or_default(DEFAULT_CONFIG_PATH);
            (config, Some(origin))
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str())).init();
    if let Some(origin) = origin {
        origin.log();
    }

    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, config: &Config) -> Result<(), LabyrinthError> {
    let input = args.input.as_deref().unwrap_or(&config.batch.input_path);
    let maps = load_maps(input)?;
    info!("Loaded {} maps from {}", maps.len(), input);

    let mut labyrinth = Labyrinth::with_search(
        config.labyrinth.max_coordinate,
        config.teseo(),
        config.teseo(),
        config.to_search_config(),
    )?;
    let mut report = BatchReport::new(labyrinth.max_coordinate());

    for (index, map) in maps.iter().enumerate() {
        let solved = labyrinth.load_map(map).and_then(|_| labyrinth.solve());
        match solved {
            Ok(solution) => {
                if solution.reachable {
                    println!("Number of doors = {}", solution.doors_used);
                } else {
                    println!("No path");
                }
                if args.render {
                    println!("{}\n", render_map(&labyrinth, &solution.path));
                }
                report.push(index, &solution);
            }
            Err(e) => {
                eprintln!("Map {}: {}", index, e);
                report.push_error(index, &e);
            }
        }
    }

    let report_path = args.report.as_deref().or_else(|| config.report_path());
    if let Some(path) = report_path {
        report.save_to_file(path)?;
        info!("Report written to {}", path);
    }

    info!("Solved {} of {} maps", maps.len() - report.failures(), maps.len());
    Ok(())
}
