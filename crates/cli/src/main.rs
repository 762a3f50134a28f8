//! protoc-gen-interfaces CLI
//!
//! Run without a subcommand this is a protoc plugin: it reads a
//! `CodeGeneratorRequest` from stdin and writes a `CodeGeneratorResponse` to
//! stdout. The subcommands work on descriptor set files for local use.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::CodeGeneratorResponse;
use protoc_gen_interfaces_common::{GeneratorConfig, OutputFile};
use protoc_gen_interfaces_generator::Generator;
use protoc_gen_interfaces_parser::{DescriptorSetParser, PluginRequest};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protoc-gen-interfaces")]
#[command(version, about = "Generate TypeScript interfaces from protobuf descriptors", long_about = None)]
#[command(after_help = "PLUGIN USAGE:\n  \
    protoc --plugin=protoc-gen-interfaces --interfaces_out=./gen foo.proto\n  \
    protoc --interfaces_out=./gen --interfaces_opt=validate,wide_integer_policy=arbitrary_precision foo.proto")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a descriptor set and display the resulting type model
    #[command(after_help = "EXAMPLES:\n  \
        # Produce a descriptor set\n  \
        protoc --include_imports --descriptor_set_out=orders.pb orders.proto\n\n  \
        # Show the types generated for orders.proto\n  \
        protoc-gen-interfaces inspect --descriptor-set orders.pb\n\n  \
        # Dump the model of every file as JSON\n  \
        protoc-gen-interfaces inspect --descriptor-set orders.pb --all --json")]
    Inspect {
        /// Path to a FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// YAML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the model as JSON
        #[arg(long)]
        json: bool,

        /// Include every file of the set, not only the last one
        #[arg(long)]
        all: bool,
    },

    /// Render a descriptor set to TypeScript files
    #[command(after_help = "EXAMPLES:\n  \
        protoc-gen-interfaces render \\\n    \
        --descriptor-set orders.pb \\\n    \
        --output ./gen")]
    Render {
        /// Path to a FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./generated")]
        output: PathBuf,

        /// YAML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include every file of the set, not only the last one
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => plugin_command()?,
        Some(Commands::Inspect {
            descriptor_set,
            config,
            json,
            all,
        }) => {
            inspect_command(
                descriptor_set.as_path(),
                config.as_deref(),
                json,
                all,
                cli.verbose,
            )?;
        }
        Some(Commands::Render {
            descriptor_set,
            output,
            config,
            all,
        }) => {
            render_command(
                descriptor_set.as_path(),
                output.as_path(),
                config.as_deref(),
                all,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries the plugin response
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn plugin_command() -> Result<()> {
    let response = match generate_response(std::io::stdin().lock()) {
        Ok(file) => CodeGeneratorResponse {
            file,
            supported_features: Some(Feature::Proto3Optional as u64),
            ..Default::default()
        },
        Err(e) => {
            error!("generation failed: {:#}", e);
            CodeGeneratorResponse {
                error: Some(format!("{:#}", e)),
                ..Default::default()
            }
        }
    };

    std::io::stdout()
        .lock()
        .write_all(&response.encode_to_vec())
        .context("Failed to write CodeGeneratorResponse to stdout")?;

    Ok(())
}

fn generate_response<R: Read>(reader: R) -> Result<Vec<File>> {
    let request = PluginRequest::from_reader(reader).context("Failed to read request")?;
    let config = request.config().context("Failed to parse plugin options")?;

    if let Some(version) = request.compiler_version() {
        debug!(protoc = %version, "plugin invoked");
    }

    let generator = Generator::new(config).context("Failed to create generator")?;
    let rendered = generator
        .generate(request.proto_files(), request.files_to_generate())
        .context("Failed to generate interfaces")?;

    Ok(rendered
        .into_iter()
        .map(|r| File {
            name: Some(r.name),
            content: Some(r.content),
            ..Default::default()
        })
        .collect())
}

fn load_config(path: Option<&Path>, all: bool) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path).context("Failed to load config")?,
        None => GeneratorConfig::default(),
    };
    if all {
        config.emit_dependencies = true;
    }
    Ok(config)
}

fn inspect_command(
    descriptor_set: &Path,
    config_path: Option<&Path>,
    json: bool,
    all: bool,
    verbose: bool,
) -> Result<()> {
    let config = load_config(config_path, all)?;
    let parser =
        DescriptorSetParser::from_file(descriptor_set).context("Failed to load descriptor set")?;

    if !json {
        println!(
            "{} Inspecting descriptor set: {}",
            "→".cyan(),
            descriptor_set.display()
        );
        if verbose {
            println!("  Files: {}", parser.files().len());
            println!("  Wide integers: {}", config.wide_integer_policy);
            println!("  Validate: {}", config.validate);
        }
    }

    let generator = Generator::new(config).context("Failed to create generator")?;
    let outputs = generator
        .assemble(parser.files(), &parser.default_targets())
        .context("Failed to assemble descriptor set")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    println!("\n{}", "✓ Assembly successful!".green().bold());
    for output in &outputs {
        print_output_file(output, verbose);
    }

    Ok(())
}

fn print_output_file(output: &OutputFile, verbose: bool) {
    println!("\n{}", output.name.bold());
    if !output.package.is_empty() {
        println!("  Package: {}", output.package.yellow());
    }
    println!("  Types: {}", output.types.len());

    for definition in &output.types {
        println!(
            "  • {} ({} fields)",
            definition.qualified_name.cyan(),
            definition.fields.len()
        );
        if verbose {
            for field in &definition.fields {
                println!("      {}: {}", field.name, field.resolved_type);
            }
        }
    }
}

fn render_command(
    descriptor_set: &Path,
    output: &Path,
    config_path: Option<&Path>,
    all: bool,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Rendering interfaces from: {}",
        "→".cyan(),
        descriptor_set.display()
    );

    let config = load_config(config_path, all)?;
    if verbose {
        println!("  Output: {}", output.display());
        println!("  Extension: .{}", config.file_extension);
        println!("  Wide integers: {}", config.wide_integer_policy);
    }

    let parser =
        DescriptorSetParser::from_file(descriptor_set).context("Failed to load descriptor set")?;
    println!(
        "{} Loaded {} descriptors",
        "✓".green(),
        parser.files().len()
    );

    let generator = Generator::new(config).context("Failed to create generator")?;
    let written = generator
        .generate_to_directory(parser.files(), &parser.default_targets(), output)
        .context("Failed to render interfaces")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }

    Ok(())
}
