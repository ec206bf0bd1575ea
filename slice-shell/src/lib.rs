use std::io::{self, BufRead, Write};

use kinesin_slice::CyclicView;
use tracing::{debug, warn};

use command::{Command, Outcome, HELP};

pub mod command;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// create buffer of `capacity` characters cycling through 0-9 and a-z
pub fn fill_buffer(capacity: usize) -> Vec<char> {
    (0..capacity)
        .map(|i| ALPHABET[i % ALPHABET.len()] as char)
        .collect()
}

/// read commands from `input` until it ends or `quit` is seen, writing the
/// view after every line
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    view: &mut CyclicView<'_, char>,
) -> io::Result<()> {
    writeln!(output, "{HELP}")?;
    writeln!(output, "{view}")?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                debug!(line = %line, "bad command");
                writeln!(output, "Error: {e}")?;
                continue;
            }
        };

        debug!(?command, "executing");
        match command.execute(view) {
            Ok(Outcome::Done) => {}
            Ok(Outcome::Output(text)) => writeln!(output, "{text}")?,
            Ok(Outcome::Help) => writeln!(output, "{HELP}")?,
            Ok(Outcome::Quit) => {
                writeln!(output, "Bye!")?;
                return Ok(());
            }
            Err(e) => writeln!(output, "Error: {e}")?,
        }
        writeln!(output, "{view}")?;
    }

    Ok(())
}

pub fn setup_log_handlers() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    // stdout belongs to the shell
    let fmt_layer = fmt::layer().with_writer(io::stderr);
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    if let Err(e) = color_eyre::install() {
        warn!("failed to install error report handler: {e}");
    }
}

pub fn initialize_logging() {
    use parking_lot::Once;

    static INITIALIZE: Once = Once::new();
    INITIALIZE.call_once(setup_log_handlers);
}
