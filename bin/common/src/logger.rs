use std::path::Path;

use fern::colors::Color;
use log::info;

use crate::Config;

/// Logs to stdout and to `<binary_name>.log` inside `log_directory`
pub fn init(config: &Config, log_directory: &Path, binary_name: &str) -> Result<(), fern::InitError> {
    let colors = fern::colors::ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Cyan)
        .debug(Color::Green)
        .trace(Color::Magenta);

    let mut log_file_path = log_directory.to_path_buf();
    log_file_path.push(binary_name);
    log_file_path.set_extension("log");

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{color_line}[{date}][{target}][{level}{color_line}]\t{message}\x1B[0m",
                color_line = format_args!("\x1B[{}m", colors.get_color(&record.level()).to_fg_str()),
                date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                target = record.target(),
                level = colors.color(record.level()),
                message = message,
            ))
        })
        .level(config.level_filter())
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_file_path)?)
        .apply()?;

    info!("Logging events to {}", log_file_path.display());
    Ok(())
}
