//! Normalize command
//!
//! Usage: sideload normalize --type <NAME> --input <FILE> [--schema <FILE>] [--meta <FILE>]

use clap::{Args, ValueEnum};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use sideload_core::{
    assemble, AssembleOptions, AssociationDescriptor, ListPolicy, Records, SideloadConfig,
};

use super::{read_json, write_json, CommandResult};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Primary type name (the document key of the input records)
    #[arg(short = 't', long = "type")]
    pub primary_type: String,

    /// Records as JSON: one object or an array (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// YAML schema declaring the primary type's associations
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// JSON file attached verbatim as the document's `meta`
    #[arg(short, long)]
    pub meta: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reference to-one related records by id only
    #[arg(long)]
    pub no_related_model: bool,

    /// Override the configured handling of lists without associations
    #[arg(long, value_enum)]
    pub list_policy: Option<ListPolicyArg>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListPolicyArg {
    PassThrough,
    Empty,
    Reject,
}

impl From<ListPolicyArg> for ListPolicy {
    fn from(arg: ListPolicyArg) -> Self {
        match arg {
            ListPolicyArg::PassThrough => ListPolicy::PassThrough,
            ListPolicyArg::Empty => ListPolicy::Empty,
            ListPolicyArg::Reject => ListPolicy::Reject,
        }
    }
}

/// Association schema file
///
/// ```yaml
/// associations:
///   - alias: author
///     model: user
///   - alias: tags
///     collection: tag
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    associations: Option<Vec<AssociationDescriptor>>,
}

type Schema = Option<Vec<AssociationDescriptor>>;

fn load_schema(path: &Path) -> Result<Schema, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read schema {}: {}", path.display(), e))?;
    let schema: SchemaFile = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid schema {}: {}", path.display(), e))?;
    Ok(schema.associations)
}

/// Execute normalize command
pub fn execute(args: NormalizeArgs) -> CommandResult {
    let config = match &args.config {
        Some(path) => SideloadConfig::from_yaml_file(path)?,
        None => SideloadConfig::default(),
    };

    let mut options = AssembleOptions::from(&config);
    if args.no_related_model {
        options.send_related_model = false;
    }
    if let Some(policy) = args.list_policy {
        options.list_policy = policy.into();
    }

    let associations = match &args.schema {
        Some(path) => load_schema(path)?,
        None => None,
    };
    let meta: Option<Value> = args.meta.as_deref().map(read_json).transpose()?;
    let records = Records::from(read_json(&args.input)?);

    let doc = assemble(
        records,
        associations.as_deref(),
        &args.primary_type,
        &options,
    )?
    .with_meta(meta);

    write_json(&doc.into_value(), args.output.as_ref(), args.pretty)
}
