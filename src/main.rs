use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};

use sketchspec::ingest;
use sketchspec::options::OptionDefaults;
use sketchspec::parser::parse_directives;
use sketchspec::pipeline::build_view_model;
use sketchspec::telemetry;
use sketchspec::EnglishCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Flat CSV; roles are assigned with the map() directive
    Csv,
    /// Full JSON data description (metadata plus categorical or matrix payload)
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sketchspec")]
#[command(about = "Transform role-tagged tabular data into chart specs", long_about = None)]
struct Args {
    /// Chart directive string (e.g., 'bar() | map(category: region, measure: sales)')
    directive: String,

    /// Input format of the data read from stdin
    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    format: InputFormat,

    /// Pretty-print the emitted spec JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let _ = telemetry::init_tracing();
    let args = Args::parse();

    // Parse the directive string
    let directives = match parse_directives(&args.directive) {
        Ok((remaining, directives)) => {
            if !remaining.trim().is_empty() {
                eprintln!("Warning: unparsed input: '{}'", remaining);
            }
            directives
        }
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    // Read data from stdin
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read data from stdin")?;

    let description = match args.format {
        InputFormat::Csv => {
            let roles = directives
                .map
                .as_ref()
                .context("CSV input needs a map() directive to assign roles")?;
            ingest::description_from_csv(input.as_slice(), roles)
                .context("Failed to ingest CSV data")?
        }
        InputFormat::Json => {
            if directives.map.is_some() {
                eprintln!("Warning: map() is ignored for JSON input; roles come from the metadata");
            }
            ingest::description_from_json(input.as_slice())
                .context("Failed to ingest JSON data description")?
        }
    };

    let settings = directives.settings();
    let view_model = build_view_model(
        &description,
        &settings,
        &OptionDefaults::default(),
        &EnglishCatalog,
    );

    if !view_model.test_result.result {
        for message in &view_model.test_result.messages {
            eprintln!("{}", message);
        }
        std::process::exit(1);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&view_model.spec)
    } else {
        serde_json::to_string(&view_model.spec)
    }
    .context("Failed to serialize chart spec")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).context("Failed to write spec to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
