use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use lcm_idl_compiler::tokenizer::dump_tokens;
use lcm_idl_compiler::{LcmError, SchemaRegistry};

#[derive(Parser)]
#[command(name = "lcm-idl")]
#[command(version)]
#[command(about = "Parse, check and fingerprint LCM type definitions", long_about = None)]
struct Cli {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse `.lcm` files and print each type with its fingerprint
    Check {
        /// Input `.lcm` files, processed in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Parse `.lcm` files and print the full registry listing
    Dump {
        /// Input `.lcm` files, processed in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Parse `.lcm` files and write the registry as JSON
    Json {
        /// Input `.lcm` files, processed in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output `.json` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print every token of a file with its position, without parsing
    Tokenize {
        /// Input `.lcm` file
        input: PathBuf,
    },
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}

fn load(inputs: &[PathBuf]) -> Result<SchemaRegistry, LcmError> {
    let mut registry = SchemaRegistry::new();
    for input in inputs {
        debug!("Input file: {:?}", input);
        registry.handle_file(input)?;
    }
    for warning in registry.warnings() {
        print!("{}", warning.render());
    }
    Ok(registry)
}

fn run(cli: &Cli) -> Result<(), LcmError> {
    match &cli.command {
        Commands::Check { inputs } => {
            let registry = load(inputs)?;
            for en in registry.enums() {
                println!("enum   {} 0x{:016x}", en.name, en.hash);
            }
            for st in registry.structs() {
                println!("struct {} 0x{:016x}", st.name, st.hash);
            }
            Ok(())
        }

        Commands::Dump { inputs } => {
            let registry = load(inputs)?;
            print!("{}", registry.dump());
            Ok(())
        }

        Commands::Json { inputs, output } => {
            let registry = load(inputs)?;
            let json = registry.to_json()?;
            if let Some(out_path) = output {
                fs::write(out_path, &json).map_err(|source| LcmError::Io {
                    path: out_path.display().to_string(),
                    source,
                })?;
                info!("Registry written to {}", out_path.display());
            } else {
                println!("{}", json);
            }
            Ok(())
        }

        Commands::Tokenize { input } => {
            let text = fs::read_to_string(input).map_err(|source| LcmError::Io {
                path: input.display().to_string(),
                source,
            })?;
            print!("{}", dump_tokens(&text));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LcmError::Diagnostic(diag)) => {
            print!("{}", diag.render());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
