mod discovery;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;

use discogen_core::config::{self, CONFIG_FILE_NAME, DiscogenConfig};
use discogen_core::fetch::{self, DiscoverySource, FileDiscoverySource};
use discogen_core::ir::{Declaration, IrSpec};
use discogen_core::overrides::OverrideRegistry;
use discogen_core::parse::{self, document::Resource};
use discogen_core::pipeline::{GenerationReport, GenerationRequest, Pipeline};
use discogen_core::transform;
use discogen_swift::{SwiftConfig, SwiftGenerator};

use crate::discovery::HttpDiscoverySource;

#[derive(Parser)]
#[command(
    name = "discogen",
    about = "Swift client generator for Google Discovery APIs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Swift sources for one API
    Generate {
        /// Discovery API name, e.g. `books`
        #[arg(short, long)]
        service: Option<String>,

        /// API version, e.g. `v1`
        #[arg(short = 'a', long)]
        api_version: Option<String>,

        /// Local discovery document, or a directory of `<service>.<version>.json` files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory searched for `<service>.override.json`
        #[arg(long)]
        overrides: Option<PathBuf>,
    },

    /// Validate a local discovery document
    Validate {
        /// Path to the discovery document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the declarations generated from a discovery document
    Inspect {
        /// Path to the discovery document
        #[arg(short, long)]
        input: PathBuf,

        /// Directory searched for `<service>.override.json`
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// List the APIs known to the discovery service
    List {
        /// Only show the preferred version of each API
        #[arg(long)]
        preferred: bool,

        /// Read the directory listing from a local file instead
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Initialize a new discogen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            service,
            api_version,
            input,
            output,
            overrides,
        } => cmd_generate(service, api_version, input, output, overrides),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            overrides,
            format,
        } => cmd_inspect(input, overrides, format),

        Commands::List { preferred, input } => cmd_list(preferred, input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "discogen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<DiscogenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_overrides(dir: &Path, service: &str) -> Result<OverrideRegistry> {
    OverrideRegistry::load(dir, service)
        .with_context(|| format!("failed to load overrides for {service} from {}", dir.display()))
}

fn run_pipeline<S: DiscoverySource>(
    source: S,
    request: &GenerationRequest,
    overrides: &OverrideRegistry,
    config: &SwiftConfig,
) -> Result<GenerationReport> {
    let mut pipeline = Pipeline::new(source, SwiftGenerator);
    pipeline
        .run(request, overrides, config)
        .with_context(|| format!("failed to generate {} {}", request.service, request.version))
}

fn cmd_generate(
    service: Option<String>,
    api_version: Option<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    overrides: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let Some(service) = service.or_else(|| cfg.service.clone()) else {
        anyhow::bail!("no service given. Pass --service or set `service` in {CONFIG_FILE_NAME}.");
    };
    let Some(version) = api_version.or_else(|| cfg.version.clone()) else {
        anyhow::bail!("no API version given. Pass --api-version or set `version` in {CONFIG_FILE_NAME}.");
    };
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let overrides_dir = overrides.unwrap_or_else(|| PathBuf::from(&cfg.overrides_dir));

    let registry = load_overrides(&overrides_dir, &service)?;
    let request = GenerationRequest {
        service: service.clone(),
        version: version.clone(),
        output_dir: output_dir.clone(),
    };
    let swift = SwiftConfig::new(cfg.header.clone());

    eprintln!("Generating {service} {version} → {}", output_dir.display());
    let report = match input {
        Some(path) => run_pipeline(FileDiscoverySource::new(path), &request, &registry, &swift)?,
        None => run_pipeline(HttpDiscoverySource::new(&cfg.discovery), &request, &registry, &swift)?,
    };

    for path in &report.written {
        eprintln!("  wrote {}", path.display());
    }
    eprintln!(
        "Generated {} files ({} declarations) for {}",
        report.written.len(),
        report.declarations,
        report.service_name
    );
    Ok(())
}

fn resource_count(resources: &IndexMap<String, Resource>) -> usize {
    resources
        .values()
        .map(|r| 1 + resource_count(&r.resources))
        .sum()
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = fetch::read_document(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    eprintln!(
        "Valid discovery document: {}",
        doc.title.as_deref().unwrap_or(&doc.name)
    );
    eprintln!("  API: {} {}", doc.name, doc.version);
    eprintln!("  Schemas: {}", doc.schemas.len());
    eprintln!("  Resources: {}", resource_count(&doc.resources));
    eprintln!("  Methods: {}", doc.method_count());
    eprintln!("  Scopes: {}", doc.oauth_scopes().len());

    // Also validate that it transforms without overrides
    let ir = transform::transform(&doc, &OverrideRegistry::empty())?;
    eprintln!("  File groups: {}", ir.groups.len());
    eprintln!("  Declarations: {}", ir.declaration_count());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, overrides: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let doc = fetch::read_document(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let registry = match overrides {
        Some(dir) => load_overrides(&dir, &doc.name)?,
        None => OverrideRegistry::empty(),
    };
    let ir = transform::transform(&doc, &registry)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let files: Vec<serde_json::Value> = ir
        .groups
        .iter()
        .map(|(group, declarations)| {
            let declarations: Vec<serde_json::Value> = declarations
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "name": d.name(),
                        "kind": d.kind(),
                    })
                })
                .collect();
            serde_json::json!({
                "file": format!("{group}.swift"),
                "declarations": declarations,
            })
        })
        .collect();

    let methods: Vec<serde_json::Value> = ir
        .groups
        .get(&ir.service_group)
        .into_iter()
        .flatten()
        .filter_map(|d| match d {
            Declaration::Service(service) => Some(service),
            _ => None,
        })
        .flat_map(|service| &service.methods)
        .map(|m| {
            serde_json::json!({
                "id": m.id,
                "name": m.name,
                "method": m.http_method.as_str(),
                "endpoint": m.endpoint,
                "required": m.required_params.len(),
                "optional": m.optional_params.len(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "api": ir.info.api_name,
            "version": ir.info.version,
            "service": ir.info.service_name,
            "title": ir.info.title,
        },
        "files": files,
        "methods": methods,
    })
}

fn cmd_list(preferred: bool, input: Option<PathBuf>) -> Result<()> {
    let list = match input {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse::directory_from_json(&content)?
        }
        None => {
            let cfg = try_load_config()?.unwrap_or_default();
            HttpDiscoverySource::new(&cfg.discovery)
                .list()
                .context("failed to fetch the discovery directory")?
        }
    };

    let items: Vec<_> = if preferred {
        list.preferred().collect()
    } else {
        list.items.iter().collect()
    };
    for item in &items {
        println!("{}", item.display_line());
    }
    eprintln!("{} APIs", items.len());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "name": "library",
        "version": "v2",
        "resources": {
            "shelves": {
                "methods": {
                    "get": {"id": "library.shelves.get", "path": "shelves/{id}", "httpMethod": "GET",
                            "parameters": {"id": {"type": "string", "required": true, "location": "path"}},
                            "response": {"$ref": "Shelf"}}
                },
                "resources": {"books": {"methods": {}}}
            }
        },
        "schemas": {"Shelf": {"type": "object", "properties": {"name": {"type": "string"}}}}
    }"#;

    #[test]
    fn test_resource_count_includes_nested() {
        let doc = parse::from_json(DOC).unwrap();
        assert_eq!(resource_count(&doc.resources), 2);
    }

    #[test]
    fn test_inspect_summary() {
        let doc = parse::from_json(DOC).unwrap();
        let ir = transform::transform(&doc, &OverrideRegistry::empty()).unwrap();
        let summary = build_inspect_summary(&ir);
        assert_eq!(summary["info"]["service"], "Library");
        assert_eq!(summary["files"][0]["file"], "LibraryShelf.swift");
        assert_eq!(summary["files"][0]["declarations"][0]["kind"], "model");
        assert_eq!(summary["files"][1]["file"], "Library.swift");
        assert_eq!(summary["methods"][0]["name"], "getShelves");
        assert_eq!(summary["methods"][0]["endpoint"], "shelves/{id}");
        assert_eq!(summary["methods"][0]["required"], 1);
    }
}
