use std::{
    fmt::Arguments,
    fs::OpenOptions,
    io::{self, Write},
};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::options::{LogFormat, LogOptions};
use crate::{Error, Result};

/// Crate prefix dropped from record targets in the pretty format.
const TARGET_PREFIX: &str = "mts_gamma_core::";

/// Installs the global logger. The output file, when set, is appended to so
/// consecutive runs share one log.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let format = options.format;
    let timestamp = options.timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            write_record(buf, format, record.level(), record.target(), record.args())
        });

    let target = match options.output_path() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    Error::other(format!("cannot open log file {}: {e}", path.display()))
                })?;
            Target::Pipe(Box::new(file))
        }
        None => Target::Stderr,
    };
    builder.target(target);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger already installed: {e}")))
}

/// One log line without the timestamp: `LEVEL message`, or
/// `LEVEL [module] message` in the pretty format.
fn write_record(
    out: &mut impl Write,
    format: LogFormat,
    level: Level,
    target: &str,
    args: &Arguments<'_>,
) -> io::Result<()> {
    match format {
        LogFormat::Compact => writeln!(out, "{} {args}", level.as_str()),
        LogFormat::Pretty => {
            let module = target.strip_prefix(TARGET_PREFIX).unwrap_or(target);
            writeln!(out, "{} [{module}] {args}", level.as_str())
        }
    }
}
