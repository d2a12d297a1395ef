//! Ok command
//!
//! Usage: sideload ok --type <NAME> --input <FILE>

use clap::Args;
use std::path::PathBuf;

use sideload_core::{Responder, ResponseContext, SideloadConfig};

use super::{read_json, write_json, CommandResult};

#[derive(Debug, Args)]
pub struct OkArgs {
    /// Primary type name to embed the records under
    #[arg(short = 't', long = "type")]
    pub primary_type: String,

    /// Records as JSON (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub pretty: bool,
}

/// Execute ok command
pub fn execute(args: OkArgs) -> CommandResult {
    let data = read_json(&args.input)?;
    let ctx = ResponseContext::for_model(args.primary_type);

    let config = match &args.config {
        Some(path) => SideloadConfig::from_yaml_file(path)?,
        None => SideloadConfig::default(),
    };

    let response = Responder::new(config)
        .ok(&ctx, &data)?
        .ok_or("ok responses are disabled by load_default_ok_response")?;

    write_json(&response.body, args.output.as_ref(), args.pretty)
}
