use std::io::Write;

/// Initializes `env_logger`: info by default, debug with `verbose`, trace with `debug`.
pub fn init_logger(verbose: bool, debug: bool) {
    let level = if debug {
        log::LevelFilter::Trace
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "[{}] {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}
