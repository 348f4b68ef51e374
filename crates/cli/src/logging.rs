//! Tracing subscriber setup

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber
///
/// Logs go to stderr; stdout is reserved for command output. The filter comes
/// from `RUST_LOG` unless `debug` is set. `ansi` should follow the output
/// settings, so that `--no-color` and `--json` also keep escape codes out of
/// log lines.
pub fn init(debug: bool, ansi: bool) {
    subscriber(debug, ansi, std::io::stderr).init();
}

fn subscriber<W>(debug: bool, ansi: bool, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(ansi))
        .with(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(ansi: bool) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = subscriber(true, ansi, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = "connection refused", "Remote call failed; error suppressed");
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_plain_log_lines_without_ansi() {
        let line = capture(false);
        assert!(line.contains("ERROR"));
        assert!(line.contains("error suppressed"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_colored_log_lines_with_ansi() {
        let line = capture(true);
        assert!(line.contains("\x1b["));
    }
}
