use crate::config::{Config, load_config};
use crate::layout::{Layout, compute_board, compute_dashboard};
use crate::layout_dump::{layout_dump_json, write_layout_dump};
use crate::model::{Entity, Obstacle};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "contact-layout",
    version,
    about = "Lay out contacts as region boards or floating-ball dashboards"
)]
pub struct Args {
    /// Input file (JSON/JSON5 list of contacts) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Which layout to compute
    #[arg(short = 'm', long = "mode", value_enum, default_value = "board")]
    pub mode: Mode,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Container height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Region radius as a fraction of the triangle height
    #[arg(long = "radiusMultiplier")]
    pub radius_multiplier: Option<f64>,

    /// Simulation iteration cap
    #[arg(long = "iterations")]
    pub iterations: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Board,
    Dashboard,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputFile {
    List(Vec<Entity>),
    Document {
        #[serde(alias = "contacts", alias = "people")]
        entities: Vec<Entity>,
        #[serde(default)]
        obstacle: Option<Obstacle>,
    },
}

impl InputFile {
    fn into_parts(self) -> (Vec<Entity>, Option<Obstacle>) {
        match self {
            InputFile::List(entities) => (entities, None),
            InputFile::Document { entities, obstacle } => (entities, obstacle),
        }
    }
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = build_config(&args)?;

    let input = read_input(args.input.as_deref())?;
    let (entities, obstacle) = parse_entities(&input)?;
    tracing::debug!(count = entities.len(), mode = ?args.mode, "input parsed");

    let width = config.render.width;
    let height = config.render.height;
    let layout = match args.mode {
        Mode::Board => Layout::Board(compute_board(&entities, width, height, &config.layout)?),
        Mode::Dashboard => Layout::Dashboard(compute_dashboard(
            &entities,
            width,
            height,
            obstacle,
            &config.layout,
        )),
    };

    match args.output_format {
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout, &config)?,
            None => println!("{}", layout_dump_json(&layout, &config)?),
        },
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&layout, &config, args.output.as_deref())?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(multiplier) = args.radius_multiplier {
        config.layout.regions.radius_multiplier = multiplier;
    }
    if let Some(iterations) = args.iterations {
        config.layout.simulation.max_iterations = iterations;
    }
    Ok(config)
}

#[cfg(feature = "png")]
fn write_png(layout: &Layout, config: &Config, output: Option<&Path>) -> Result<()> {
    let output = ensure_output(output, "png")?;
    let svg = render_svg(layout, &config.theme, &config.layout, &config.render);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &Layout, _config: &Config, _output: Option<&Path>) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_entities(input: &str) -> Result<(Vec<Entity>, Option<Obstacle>)> {
    let parsed: InputFile = json5::from_str(input)?;
    let (entities, obstacle) = parsed.into_parts();
    if entities.is_empty() {
        return Err(anyhow::anyhow!("No contacts found in input"));
    }
    Ok((entities, obstacle))
}

#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}
