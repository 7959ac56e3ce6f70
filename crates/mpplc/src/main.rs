//! The MPPL compiler CLI.
//!
//! `mpplc FILE` runs the front-end pipeline (lex, parse, resolve, type
//! check) over one source file. Diagnostics go to stderr; the exit code is
//! 0 only when every phase finished without errors.

mod session;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use mppl_common::source::Source;
use mppl_report::{ColorChoice, Emitter};
use session::Session;

#[derive(Parser)]
#[command(name = "mpplc", version, about = "The MPPL compiler front end")]
struct Cli {
    /// Source file to compile
    file: PathBuf,

    /// When to style diagnostics with colors
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match compile(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("error: failed to read '{}': {error}", cli.file.display());
            process::exit(1);
        }
    }
}

/// Load the file and drive the phases. `Ok(true)` means a clean run.
fn compile(cli: &Cli) -> io::Result<bool> {
    let text = std::fs::read_to_string(&cli.file)?;
    let source = Source::new(cli.file.display().to_string(), text);

    let styled = ColorChoice::from(cli.color).styled_for(&io::stderr());
    let mut session = Session::new(source, Emitter::new(styled));
    Ok(session.check().is_some())
}
