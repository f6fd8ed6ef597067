// logging.rs
use std::path::Path;

/// Sends records to stdout and to `log_file`, one line each:
/// `<local time> — <LEVEL> — <target> — <message>`.
pub fn setup_logger(level: log::LevelFilter, log_file: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} — {} — {} — {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}
