use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Logs to stderr so stdout only carries the command's output.
pub fn init_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
	let colors = ColoredLevelConfig::new().debug(Color::Magenta).info(Color::Green).error(Color::Red);

	fern::Dispatch::new()
		.chain(std::io::stderr())
		.level(level_for_verbosity(verbosity))
		.format(move |out, message, record| {
			out.finish(format_args!(
				"[{}]{} {}",
				// Only the level is colored
				colors.color(record.level()),
				chrono::Utc::now().format("[%Y-%m-%d %H:%M:%S]"),
				message
			))
		})
		.apply()
}
