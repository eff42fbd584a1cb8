/*
 * Respack - Minecraft resource pack tools
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes log records to stderr, warnings and errors are coloured
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init(verbose: u8, quiet: bool) -> Result<(), SetLoggerError> {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug
    };

    log::set_logger(&LOGGER)?;
    log::set_max_level(level);

    Ok(())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            Level::Error => style("error").red().bold(),
            Level::Warn => style("warning").yellow().bold(),
            Level::Info => style("info").green(),
            Level::Debug | Level::Trace => style("debug").dim()
        };

        eprintln!("{level}: {}", record.args());
    }

    fn flush(&self) {}
}
