use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use proto_wrappers_compiler::{
    compile_schema, format_schema, generate_file, schema_to_json, GeneratorConfig, ProtoWrapError,
};

#[derive(Parser)]
#[command(name = "protowrap")]
#[command(about = "Generate Swift wrappers for SwiftProtobuf messages", long_about = None)]
struct Cli {
    /// Enables verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate `<wrapper-prefix>.swift` from a `.proto` schema
    Generate {
        /// Dir path of the proto schema file
        #[arg(long)]
        proto_dir: PathBuf,

        /// Filename of the proto schema file
        #[arg(long)]
        proto_file: PathBuf,

        /// Name prefix for generated wrappers
        #[arg(long)]
        wrapper_prefix: String,

        /// Name prefix for the SwiftProtobuf types
        #[arg(long)]
        proto_prefix: String,

        /// Path to the destination directory
        #[arg(long)]
        dst_dir: PathBuf,
    },

    /// Print the prepared declaration tree as JSON
    Dump {
        /// Input `.proto` file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, default_value = "")]
        wrapper_prefix: String,

        #[arg(long, default_value = "")]
        proto_prefix: String,
    },

    /// Rewrite a `.proto` schema in canonical form
    Format {
        /// Input `.proto` file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), ProtoWrapError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Generate { proto_dir, proto_file, wrapper_prefix, proto_prefix, dst_dir } => {
            let config = GeneratorConfig::new(wrapper_prefix.as_str(), proto_prefix.as_str());
            let input = proto_dir.join(proto_file);
            let dst_path = generate_file(&input, dst_dir, &config)?;
            info!("Generated {} → {}", input.display(), dst_path.display());
            Ok(())
        }

        Commands::Dump { input, wrapper_prefix, proto_prefix } => {
            let config = GeneratorConfig::new(wrapper_prefix.as_str(), proto_prefix.as_str());
            let text = fs::read_to_string(input)?;
            let schema = compile_schema(&text, &input.display().to_string(), &config)?;
            println!("{}", schema_to_json(&schema)?);
            Ok(())
        }

        Commands::Format { input, output } => {
            let text = fs::read_to_string(input)?;
            let formatted = format_schema(&text, &input.display().to_string())?;
            if let Some(out_path) = output {
                fs::write(out_path, &formatted)?;
                info!("Formatted schema written to {}", out_path.display());
            } else {
                print!("{}", formatted);
            }
            Ok(())
        }
    }
}
