//! Print the OpenAPI document as JSON or YAML.

use std::io::Write;

use clap::{Parser, ValueEnum};
use hotel_backend::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the hotel booking OpenAPI document")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = match cli.format {
        Format::Json => doc.to_pretty_json().map_err(std::io::Error::other)?,
        Format::Yaml => doc.to_yaml().map_err(std::io::Error::other)?,
    };
    writeln!(std::io::stdout().lock(), "{rendered}")
}
