use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use busidl_compiler::compile_unit;
use busidl_compiler::error::IdlError;
use busidl_compiler::types::{Backend, Direction, Unit};

#[derive(Parser)]
#[command(name = "busidl")]
#[command(about = "Compile busidl XML interface definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a unit and force every member signature, printing a summary
    Check {
        /// Input XML unit
        #[arg(short, long)]
        input: PathBuf,

        /// Unit name (defaults to the input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Primitive type profile: plain or rich
        #[arg(short, long, default_value = "plain")]
        backend: String,
    },

    /// Compile a unit and dump the resolved model as JSON
    Dump {
        /// Input XML unit
        #[arg(short, long)]
        input: PathBuf,

        /// Unit name (defaults to the input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Primitive type profile: plain or rich
        #[arg(short, long, default_value = "plain")]
        backend: String,

        /// Output JSON file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn unit_name(input: &Path, name: &Option<String>) -> String {
    match name {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unit".to_string()),
    }
}

fn compile(input: &Path, name: &Option<String>, backend: &str) -> Result<Unit, IdlError> {
    let backend: Backend = backend.parse()?;
    let text = fs::read_to_string(input).map_err(IdlError::Io)?;
    compile_unit(&text, &unit_name(input, name), backend)
}

fn main() -> Result<(), IdlError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check {
            input,
            name,
            backend,
        } => {
            let unit = compile(input, name, backend)?;

            let mut members = 0usize;
            for interface in &unit.interfaces {
                for method in &interface.methods {
                    method.introspect_signature(unit.registry())?;
                    method.directional_signature(unit.registry(), Direction::In)?;
                    method.directional_signature(unit.registry(), Direction::Out)?;
                    members += 1;
                }
                for signal in &interface.signals {
                    signal.introspect_signature(unit.registry())?;
                    signal.signature(unit.registry())?;
                    members += 1;
                }
            }
            println!(
                "{}: {} interface(s), {} member signature(s) ok",
                unit.name,
                unit.interfaces.len(),
                members
            );
            Ok(())
        }

        Commands::Dump {
            input,
            name,
            backend,
            output,
        } => {
            let unit = compile(input, name, backend)?;
            let json = serde_json::to_string_pretty(&unit)?;
            if let Some(out_path) = output {
                fs::write(out_path, &json).map_err(IdlError::Io)?;
                println!("Model written to {}", out_path.display());
            } else {
                println!("{}", json);
            }
            Ok(())
        }
    }
}
