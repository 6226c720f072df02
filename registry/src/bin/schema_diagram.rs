#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Render the table catalog as a Mermaid ER diagram.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path registry/Cargo.toml --bin schema-diagram -- --output docs/schema.mmd
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use registry::domain::{SchemaCatalog, render_mermaid_diagram};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Clone, Default)]
struct CliArgs {
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse(arguments: impl IntoIterator<Item = String>) -> io::Result<Self> {
        let mut args = arguments.into_iter();
        let mut parsed = Self::default();

        while let Some(argument) = args.next() {
            match argument.as_str() {
                "--output" => {
                    parsed.output = Some(parse_output_value(&mut args)?);
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                unknown => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("unknown argument: {unknown}"),
                    ));
                }
            }
        }

        Ok(parsed)
    }
}

fn parse_output_value(args: &mut impl Iterator<Item = String>) -> io::Result<PathBuf> {
    match args.next() {
        Some(path) => Ok(PathBuf::from(path)),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--output requires a value",
        )),
    }
}

fn print_help() {
    println!(concat!(
        "Usage: schema-diagram [OPTIONS]\n\n",
        "Options:\n",
        "  --output <path>  Write the Mermaid source to a file instead of stdout\n",
        "  -h, --help       Print this help message\n",
    ));
}

fn main() -> io::Result<()> {
    init_tracing();
    let parsed = CliArgs::parse(env::args().skip(1))?;
    let catalog = SchemaCatalog::new();
    let diagram = render_mermaid_diagram(&catalog);

    match parsed.output {
        Some(path) => {
            fs::write(&path, diagram)?;
            println!("Wrote Mermaid diagram: {}", path.to_string_lossy());
        }
        None => print!("{diagram}"),
    }

    Ok(())
}
