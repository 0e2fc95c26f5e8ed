use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError,
    Logger, LoggerHandle, Naming,
};
use std::path::Path;

/// Starts the global logger. Without `log_dir` logs go to stderr; with it they
/// go to rotating files there, warnings still echoed to stderr.
///
/// Keep the returned handle alive for as long as logs should be written.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str("info")?; // RUST_LOG wins over the default level

    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .duplicate_to_stderr(Duplicate::Warn)
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
