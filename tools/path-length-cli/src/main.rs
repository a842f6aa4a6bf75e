mod logger;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use glam::DVec2;
use path_length::{LookupTable, PartAtLength, Path, PathOptions, SolverOptions};
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "path-length", version)]
#[command(about = "Measure SVG path data and sample points along it by distance travelled")]
struct Args {
	#[command(subcommand)]
	command: Command,

	/// Print JSON instead of plain text
	#[arg(long, global = true)]
	json: bool,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Chords used to approximate the length of each elliptical arc
	#[arg(long, global = true, default_value_t = 300)]
	arc_resolution: usize,

	/// Distance between the samples used to estimate an arc's tangent
	#[arg(long, global = true, default_value_t = 0.05)]
	arc_tangent_step: f64,

	/// Relative error at which the Bézier length solver stops
	#[arg(long, global = true, default_value_t = 1e-3)]
	tolerance: f64,

	/// Iteration cap of the Bézier length solver
	#[arg(long, global = true, default_value_t = 500)]
	max_iterations: usize,
}

#[derive(Subcommand)]
enum Command {
	/// Print the commands with implicit repetitions expanded
	Parse(PathInput),
	/// Print the total length
	Length(PathInput),
	/// Print the point at a distance along the path
	Point(QueryArgs),
	/// Print the unit tangent at a distance along the path
	Tangent(QueryArgs),
	/// Print the point and unit tangent at a distance along the path
	Properties(QueryArgs),
	/// List the start, end and length of every drawable segment
	Parts(PathInput),
	/// Print evenly spaced samples of the path
	Lookup(LookupArgs),
}

#[derive(clap::Args)]
struct PathInput {
	/// SVG path data (read from --input or stdin when omitted)
	path_data: Option<String>,

	/// File containing the path data
	#[arg(short, long, conflicts_with = "path_data")]
	input: Option<PathBuf>,
}

#[derive(clap::Args)]
struct QueryArgs {
	#[command(flatten)]
	path: PathInput,

	/// Distance along the path
	#[arg(long, allow_hyphen_values = true)]
	at: f64,

	/// Read --at as a fraction of the total length
	#[arg(long)]
	fraction: bool,
}

#[derive(clap::Args)]
struct LookupArgs {
	#[command(flatten)]
	path: PathInput,

	/// Number of intervals between samples
	#[arg(long, default_value_t = 100)]
	precision: usize,

	/// Record the angle of each sample around this point, given as X,Y
	#[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
	center: Option<DVec2>,

	/// Angle in radians from which sample angles are measured
	#[arg(long, requires = "center", allow_hyphen_values = true, default_value_t = 0.)]
	start_angle: f64,
}

#[derive(Serialize)]
struct Sample {
	length: f64,
	#[serde(flatten)]
	part: PartAtLength,
	#[serde(skip_serializing_if = "Option::is_none")]
	point: Option<DVec2>,
	#[serde(skip_serializing_if = "Option::is_none")]
	tangent: Option<DVec2>,
}

#[derive(Serialize)]
struct PartSummary {
	command_index: usize,
	start: DVec2,
	end: DVec2,
	length: f64,
}

impl Args {
	fn path_options(&self) -> PathOptions {
		PathOptions {
			arc_resolution: self.arc_resolution,
			arc_tangent_step: self.arc_tangent_step,
			solver: SolverOptions {
				tolerance: self.tolerance,
				max_iterations: self.max_iterations,
			},
		}
	}
}

impl PathInput {
	fn read(&self) -> Result<String> {
		match (&self.path_data, &self.input) {
			(Some(path_data), _) => Ok(path_data.clone()),
			(None, Some(file)) => fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file)),
			(None, None) => {
				let mut path_data = String::new();
				std::io::stdin().read_to_string(&mut path_data).context("Failed to read path data from stdin")?;
				Ok(path_data)
			}
		}
	}

	fn load(&self, options: PathOptions) -> Result<Path> {
		let path_data = self.read()?;
		let path = Path::with_options(path_data.trim(), options).context("Failed to parse path data")?;
		log::info!("Loaded {} commands with a total length of {}", path.commands().len(), path.total_length());
		Ok(path)
	}
}

impl QueryArgs {
	fn length_on(&self, path: &Path) -> Result<f64> {
		if !self.at.is_finite() {
			bail!("--at must be a finite number, got {}", self.at);
		}
		Ok(if self.fraction { self.at * path.total_length() } else { self.at })
	}
}

fn parse_point(value: &str) -> Result<DVec2, String> {
	let (x, y) = value.split_once(',').ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
	let coordinate = |text: &str| text.trim().parse::<f64>().map_err(|error| format!("invalid coordinate {text:?}: {error}"));
	Ok(DVec2::new(coordinate(x)?, coordinate(y)?))
}

fn print<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T) -> String) -> Result<()> {
	if json {
		println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
	} else {
		println!("{}", human(value));
	}
	Ok(())
}

fn sample(path: &Path, query: &QueryArgs, with_point: bool, with_tangent: bool) -> Result<Sample> {
	let length = query.length_on(path)?;
	let properties = path.properties_at_length(length).with_context(|| format!("Failed to sample the path at {length}"))?;
	Ok(Sample {
		length,
		part: path.part_at_length(length),
		point: with_point.then_some(properties.point),
		tangent: with_tangent.then_some(properties.tangent),
	})
}

fn main() -> Result<()> {
	let args = Args::parse();
	logger::init_logger(args.verbose).context("Failed to install the logger")?;

	let options = args.path_options();
	let json = args.json;

	match &args.command {
		Command::Parse(input) => {
			let path = input.load(options)?;
			print(json, &path.commands(), |commands| commands.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))?;
		}
		Command::Length(input) => {
			let path = input.load(options)?;
			print(json, &path.total_length(), ToString::to_string)?;
		}
		Command::Point(query) => {
			let path = query.path.load(options)?;
			print(json, &sample(&path, query, true, false)?, |sample| sample.point.unwrap_or_default().to_string())?;
		}
		Command::Tangent(query) => {
			let path = query.path.load(options)?;
			print(json, &sample(&path, query, false, true)?, |sample| sample.tangent.unwrap_or_default().to_string())?;
		}
		Command::Properties(query) => {
			let path = query.path.load(options)?;
			print(json, &sample(&path, query, true, true)?, |sample| {
				format!("point {} tangent {}", sample.point.unwrap_or_default(), sample.tangent.unwrap_or_default())
			})?;
		}
		Command::Parts(input) => {
			let path = input.load(options)?;
			let parts = path
				.parts()
				.iter()
				.map(|part| PartSummary {
					command_index: part.command_index(),
					start: part.start(),
					end: part.end(),
					length: part.length(),
				})
				.collect::<Vec<_>>();
			print(json, &parts, |parts| {
				parts
					.iter()
					.map(|part| format!("{}: {} -> {} length {}", part.command_index, part.start, part.end, part.length))
					.collect::<Vec<_>>()
					.join("\n")
			})?;
		}
		Command::Lookup(lookup) => {
			let path = lookup.path.load(options)?;
			let table = match lookup.center {
				Some(center) => LookupTable::radial(&path, lookup.precision, center, lookup.start_angle),
				None => LookupTable::new(&path, lookup.precision),
			}
			.context("Failed to build the lookup table")?;
			print(json, &table, |table| {
				table
					.entries()
					.iter()
					.map(|entry| match entry.angle {
						Some(angle) => format!("{} {angle}", entry.point),
						None => entry.point.to_string(),
					})
					.collect::<Vec<_>>()
					.join("\n")
			})?;
		}
	}

	Ok(())
}
