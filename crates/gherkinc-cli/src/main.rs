//! gherkinc: compiles `.feature` specifications against a C++ library's
//! headers into a single self-contained C++ test file.

mod discover;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use gherkinc_compiler::{Compiler, Config, ConfigError, ParseError, TableError};

#[derive(Parser)]
#[command(name = "gherkinc", bin_name = "gherkinc")]
#[command(about = "Compile Gherkin feature files into a C++ test harness")]
struct Cli {
    /// Directory containing the C++ headers of the library under test
    source: PathBuf,

    /// Directory containing the `.feature` files
    features: PathBuf,

    /// Path of the generated C++ test file
    output: PathBuf,

    /// Extra #include directive for the generated file (repeatable);
    /// defaults to every parsed header
    #[arg(long = "include", value_name = "FILE")]
    includes: Vec<String>,

    /// Fix-up configuration as JSON (aliases, constructor returns,
    /// builtin variables, standalone functions)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the reconstructed class prototypes instead of compiling
    #[arg(long)]
    dump_classes: bool,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::from_json(&read(path)?)?,
        None => Config::default(),
    };

    let mut headers = Vec::new();
    for path in discover::walk(&cli.source, "h").map_err(|source| Error::Io {
        path: cli.source.display().to_string(),
        source,
    })? {
        let label = discover::relative_label(&cli.source, &path);
        headers.push((label, read(&path)?));
    }

    let compiler = Compiler::from_headers(headers, &config)?;

    if cli.dump_classes {
        for class in compiler.table().classes() {
            println!("{class}");
        }
        return Ok(());
    }

    let mut features = Vec::new();
    for path in discover::walk(&cli.features, "feature").map_err(|source| Error::Io {
        path: cli.features.display().to_string(),
        source,
    })? {
        let source = read(&path)?;
        features.push(compiler.parse_feature(path.display().to_string(), &source)?);
    }

    let includes = if cli.includes.is_empty() {
        compiler.table().default_includes()
    } else {
        cli.includes.clone()
    };

    let code = compiler.generate(&features, &includes);
    fs::write(&cli.output, code).map_err(|source| Error::Io {
        path: cli.output.display().to_string(),
        source,
    })?;
    Ok(())
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}
