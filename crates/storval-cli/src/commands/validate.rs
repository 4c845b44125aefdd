//! Descriptor validation command
//!
//! Usage: storval validate <FILE> [--old FILE] [--config FILE] [--feature NAME=BOOL]...
//!        [--allow-long-node-id] [--format text|json]

use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use storval_core::{log_op_end, log_op_error, log_op_start};
use storval_core::{Document, ErrorList, ResourceValidator, Result, StorvalError};

use crate::config::GateArgs;
use crate::{EXIT_ACCEPTED, EXIT_REJECTED};

const OP_CLI_VALIDATE: &str = "cli_validate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per field error
    Text,
    /// The error list as a JSON array
    Json,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Descriptor to validate (JSON or YAML); `-` reads stdin
    pub file: PathBuf,

    /// Previous version of the descriptor; switches to update validation
    #[arg(long, value_name = "FILE")]
    pub old: Option<PathBuf>,

    #[command(flatten)]
    pub gates: GateArgs,

    /// Accept CSINode driver nodeID values up to 256 bytes
    #[arg(long)]
    pub allow_long_node_id: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute validate command, returning the process exit code
pub fn execute(args: ValidateArgs) -> std::result::Result<i32, Box<dyn std::error::Error>> {
    let start = Instant::now();
    log_op_start!(OP_CLI_VALIDATE, file = %args.file.display());

    let errs = match run(&args) {
        Ok(errs) => errs,
        Err(err) => {
            log_op_error!(OP_CLI_VALIDATE, start, err);
            return Err(err.into());
        }
    };

    match args.format {
        OutputFormat::Text => {
            for err in &errs {
                println!("{}", err);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&errs)?),
    }

    log_op_end!(OP_CLI_VALIDATE, start, error_count = errs.len());

    Ok(if errs.is_empty() {
        EXIT_ACCEPTED
    } else {
        EXIT_REJECTED
    })
}

fn run(args: &ValidateArgs) -> Result<ErrorList> {
    let (features, config_options) = args.gates.resolve()?;
    let new = read_document(&args.file)?;
    let options = config_options
        .with_long_node_id(config_options.allow_long_node_id || args.allow_long_node_id)
        .with_v1_attachment_rules(new.is_storage_v1());

    let errs = match &args.old {
        Some(old_path) => {
            let old = read_document(old_path)?;
            new.descriptor
                .validate_update(&old.descriptor, &features, &options)
        }
        None => new.descriptor.validate_create(&features, &options),
    };
    Ok(errs)
}

fn read_document(path: &Path) -> Result<Document> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| StorvalError::io("<stdin>", &e))?;
        return Document::decode_yaml(&content);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| StorvalError::io(path.display().to_string(), &e))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Document::decode_json(&content),
        _ => Document::decode_yaml(&content),
    }
}
