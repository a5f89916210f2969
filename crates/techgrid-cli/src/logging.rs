use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

/// Installs the global tracing subscriber: a compact stderr layer gated by
/// the verbosity flags, plus an optional verbose file layer when
/// `--log-file` is given. Solver diagnostics stay on stderr so rendered
/// grids and scores on stdout remain pipeable.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(path).map_err(CliError::Io)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;
    use std::sync::Once;
    use std::thread;
    use std::time::Duration;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn install_global_subscriber_once() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("global subscriber should install");
        });
    }

    #[test]
    #[serial]
    fn all_levels_log_without_panicking() {
        install_global_subscriber_once();

        error!("solve failed");
        warn!("grid has no supercharged cells");
        info!("annealing started");
        debug!("temperature step complete");
        trace!("move rejected");
    }

    #[test]
    #[serial]
    fn file_layer_captures_solver_diagnostics() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("techgrid.log");

        let file = File::create(log_path.clone()).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(score = 7.5, "best placement updated");
        });

        thread::sleep(Duration::from_millis(100));

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("best placement updated"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_path_propagates_error() {
        let directory_path = PathBuf::from("/");

        // File::create on a directory fails, which must surface as Io
        // instead of silently dropping the file layer.
        if cfg!(unix) && directory_path.is_dir() {
            let result = setup_logging(0, false, Some(&directory_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
