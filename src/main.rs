//! loglit - highlight log lines in the terminal
//!
//! Reads lines from a file or stdin and writes the highlighted lines to
//! stderr. When stdout is not a terminal the raw lines are also copied to
//! stdout, so loglit can sit in the middle of a pipeline.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossterm::tty::IsTty;

use loglit::config::Config;
use loglit::error::{HighlightError, Result};
use loglit::syntax::{builtin, Renderer};

/// Highlight log lines by pattern and keyword
#[derive(Debug, Parser)]
#[command(name = "loglit", version, about)]
struct Args {
    /// Regex patterns to highlight on top of the built-in rules
    patterns: Vec<String>,

    /// Read logs from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Config file [default: $LOGLIT_CONFIG or ~/.loglit.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::debug!("{:?}", e);
        drain_stdin();
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    for pattern in &args.patterns {
        config.add_user_pattern(pattern)?;
    }
    let renderer = Renderer::new(config, builtin::default_theme())?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let passthrough = !io::stdout().is_tty();
    log::debug!("passthrough to stdout: {}", passthrough);

    let mut colored = io::stderr().lock();
    let mut raw = io::stdout().lock();
    highlight(&renderer, reader, &mut colored, passthrough.then_some(&mut raw))
}

/// Render every line of `reader` to `colored`, copying the raw bytes to
/// `raw` if given.
///
/// A closed output pipe ends the run quietly.
fn highlight<R, C, W>(
    renderer: &Renderer,
    reader: R,
    colored: &mut C,
    raw: Option<&mut W>,
) -> Result<()>
where
    R: BufRead,
    C: Write,
    W: Write,
{
    match write_lines(renderer, reader, colored, raw) {
        Err(HighlightError::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("output closed: {}", err);
            Ok(())
        }
        result => result,
    }
}

fn write_lines<R, C, W>(
    renderer: &Renderer,
    reader: R,
    colored: &mut C,
    mut raw: Option<&mut W>,
) -> Result<()>
where
    R: BufRead,
    C: Write,
    W: Write,
{
    for bytes in reader.split(b'\n') {
        let bytes = bytes?;
        let text = String::from_utf8_lossy(&bytes);
        let line = text.strip_suffix('\r').unwrap_or(&text);

        writeln!(colored, "{}", renderer.render(line)?)?;
        if let Some(raw) = raw.as_deref_mut() {
            raw.write_all(&bytes)?;
            raw.write_all(b"\n")?;
        }
    }

    colored.flush()?;
    if let Some(raw) = raw {
        raw.flush()?;
    }
    Ok(())
}

/// Consume piped stdin so the writer upstream does not fail on a closed pipe
fn drain_stdin() {
    let stdin = io::stdin();
    if !stdin.is_tty() {
        let _ = io::copy(&mut stdin.lock(), &mut io::sink());
    }
}
