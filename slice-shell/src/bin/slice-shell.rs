use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use eyre::Context;
use kinesin_slice::{End, ViewBounds};
use slice_shell::{fill_buffer, initialize_logging, run};
use tracing::info;

/// Interactively move, resize, reverse and rotate a cyclic slice
#[derive(ClapParser, Debug)]
#[command(about, version)]
struct Args {
    /// Number of characters in the backing buffer
    #[arg(short = 'n', long, default_value_t = 10)]
    capacity: usize,
    /// Buffer index at which the slice starts
    #[arg(short, long, default_value_t = 0)]
    start: usize,
    /// Buffer index before which the slice ends. Wraps around if lower than
    /// the start. If not provided, the slice runs to the end of the buffer.
    #[arg(short, long)]
    end: Option<usize>,
    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> eyre::Result<()> {
    initialize_logging();
    let args = Args::parse();

    let mut buf = fill_buffer(args.capacity);
    let bounds = ViewBounds {
        start: args.start,
        end: args.end.map_or(End::BufferEnd, End::At),
    };
    let mut view = bounds.build(&mut buf).wrap_err("invalid slice bounds")?;
    info!(
        capacity = args.capacity,
        head = view.head(),
        len = view.len(),
        "slice ready"
    );

    let input: Box<dyn BufRead> = match args.script {
        Some(path) => {
            let file = File::open(&path)
                .wrap_err_with(|| format!("cannot open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    run(input, io::stdout().lock(), &mut view).wrap_err("i/o error")?;
    Ok(())
}
