//! Rule Layout CLI
//!
//! Usage:
//!   rule-layout [OPTIONS] [FILE]
//!
//! Options:
//!   --size <WxH>       Override the container size from the scene
//!   --resize <WxH>     Lay out again at another container size (repeatable)
//!   -m, --measure <K>  Print the min/pref/max size instead of laying out
//!   -l, --lint         Report rule-ordering diagnostics on stderr
//!   -v, --verbose      More logging (repeat for trace output)
//!   -h, --help         Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::Level;

use rule_layout::{Scene, Size, SizeKind};

#[derive(Parser)]
#[command(name = "rule-layout")]
#[command(about = "Resolve edge-to-edge layout rules for a TOML scene")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Container size as WIDTHxHEIGHT, overriding the scene
    #[arg(long, value_parser = parse_size)]
    size: Option<Size>,

    /// Lay out again after resizing the container to WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    resize: Vec<Size>,

    /// Print a measurement instead of the laid-out bounds
    #[arg(short, long, value_enum)]
    measure: Option<Pass>,

    /// Report rule-ordering diagnostics
    #[arg(short, long)]
    lint: bool,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Pass {
    Min,
    Pref,
    Max,
}

impl From<Pass> for SizeKind {
    fn from(pass: Pass) -> Self {
        match pass {
            Pass::Min => SizeKind::Minimum,
            Pass::Pref => SizeKind::Preferred,
            Pass::Max => SizeKind::Maximum,
        }
    }
}

fn parse_size(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width '{}': {}", width, e))?;
    let height = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height '{}': {}", height, e))?;
    Ok(Size::new(width, height))
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("rule-layout: no scene given. Pass a TOML file or pipe one on stdin (see --help).");
        std::process::exit(2);
    }

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut scene = match Scene::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(size) = cli.size {
        scene.host.resize(size);
    }

    if cli.lint {
        for warning in scene.lint() {
            eprintln!("lint: {}", warning);
        }
    }

    if let Err(e) = run(&mut scene, &cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(scene: &mut Scene, cli: &Cli) -> Result<(), rule_layout::SceneError> {
    if let Some(pass) = cli.measure {
        let size = scene.measure(pass.into())?;
        println!("{}", size);
        return Ok(());
    }

    scene.run_layout()?;
    println!("{}", scene.render_bounds());

    for size in &cli.resize {
        scene.resize(*size)?;
        println!();
        println!("# {}", size);
        println!("{}", scene.render_bounds());
    }
    Ok(())
}
