/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use std::fmt;
use std::path::{Path, PathBuf};
use log::{Level, LevelFilter};

/// Builder-style setup for logging.
#[derive(Debug, Clone)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    level: LevelFilter,
    engine_level: LevelFilter,
}

impl Default for GlobalLogger {
    fn default() -> Self
    {
        GlobalLogger {
            path: None,
            level: LevelFilter::Info,
            engine_level: LevelFilter::Debug,
        }
    }
}

impl GlobalLogger {
    /// Also write to a file. (Relative paths are resolved by `apply`.)
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Level for everything outside of the matrix engine.
    pub fn level(&mut self, level: LevelFilter) -> &mut Self
    { self.level = level; self }

    /// Level for messages from `geomx_linalg`.
    ///
    /// Pivot nudges and solver trouble are reported at `warn`; `trace`
    /// additionally shows every singular `factor` exit and sweep count.
    pub fn engine_level(&mut self, level: LevelFilter) -> &mut Self
    { self.engine_level = level; self }

    /// Install as the global logger. This can only succeed once per process.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let start = Instant::now();
        let mut fern = fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(self.level)
            .level_for("geomx_linalg", self.engine_level)
            .chain(std::io::stdout());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(fern::log_file(path)?);
        }

        fern.apply().map_err(|e| format_err!("could not install logger: {}", e))?;
        Ok(())
    }
}

/// Shorthand for `GlobalLogger` with one level for everything.
pub fn setup_global_logger(level: LevelFilter, path: Option<&Path>) -> FailResult<()>
{
    let mut logger = GlobalLogger::default();
    logger.level(level).engine_level(level);
    if let Some(path) = path {
        logger.path(path);
    }
    logger.apply()
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn  => ansi_term::Colour::Red.normal(),
            Level::Info  => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}{}{}", style.prefix(), self.0, style.suffix())
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn colorized_level_keeps_name() {
        let s = ColorizedLevel(Level::Warn).to_string();
        assert!(s.contains("WARN"), "{:?}", s);
        assert!(s.starts_with("\u{1b}["), "{:?}", s);
    }
}
