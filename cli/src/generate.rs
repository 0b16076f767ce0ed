#![deny(missing_docs)]

//! # Generate Commands
//!
//! `generate` writes the full documentation set; `openapi` writes only the
//! OpenAPI document. Both load the IR completely before touching any
//! output path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use autodoc_core::{build_document, generate_artifacts, ApiDocument, GeneratorConfig};
use clap::ValueEnum;
use tracing::info;

use crate::error::CliResult;
use crate::metadata::{parse_info, parse_servers};
use crate::parser::{load_ir, DEFAULT_PARSER_COMMAND};

/// Encoding of the OpenAPI document.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// Pretty-printed JSON document.
    Json,
}

impl SpecFormat {
    /// Picks the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            SpecFormat::Yaml => "openapi.yaml",
            SpecFormat::Json => "openapi.json",
        }
    }

    fn encode(self, document: &ApiDocument) -> CliResult<String> {
        Ok(match self {
            SpecFormat::Yaml => document.to_yaml()?,
            SpecFormat::Json => document.to_json()?,
        })
    }
}

/// Input and metadata options shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Source tree handed to the parser.
    #[clap(long, env = "AUTODOC_SOURCE")]
    pub source: Option<PathBuf>,

    /// Pre-computed IR JSON file; skips the parser.
    #[clap(long, env = "AUTODOC_IR", conflicts_with = "source")]
    pub ir: Option<PathBuf>,

    /// Parser command line; the source directory is appended as last argument.
    #[clap(long, env = "AUTODOC_PARSER", default_value = DEFAULT_PARSER_COMMAND)]
    pub parser: String,

    /// Generator configuration file (YAML, or JSON by extension).
    #[clap(long, env = "AUTODOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Document info, e.g. `title="My API",version="2.0"`.
    #[clap(long, env = "AUTODOC_INFO")]
    pub info: Option<String>,

    /// Servers, e.g. `url="https://a",description="Prod";url="https://b"`.
    #[clap(long, env = "AUTODOC_SERVERS")]
    pub servers: Option<String>,
}

impl InputArgs {
    /// Builds the effective configuration: file (or defaults), then flags.
    pub fn load_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_path(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(text) = &self.info {
            config.info.extend(parse_info(text)?);
        }
        if let Some(text) = &self.servers {
            config.servers = parse_servers(text)?;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the `generate` command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    #[allow(missing_docs)]
    pub input: InputArgs,

    /// Directory receiving the generated files.
    #[clap(long, env = "AUTODOC_OUT_DIR", default_value = "docs")]
    pub out_dir: PathBuf,

    /// Specification encoding.
    #[clap(long, value_enum, default_value_t = SpecFormat::Yaml)]
    pub format: SpecFormat,
}

/// Arguments for the `openapi` command.
#[derive(clap::Args, Debug, Clone)]
pub struct OpenapiArgs {
    #[clap(flatten)]
    #[allow(missing_docs)]
    pub input: InputArgs,

    /// Output file; standard output when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Specification encoding; inferred from `--output` when omitted.
    #[clap(long, value_enum)]
    pub format: Option<SpecFormat>,
}

/// Writes the OpenAPI document and every reference artifact into `out_dir`.
///
/// # Returns
///
/// The written paths, in write order.
pub fn execute(args: &GenerateArgs) -> CliResult<Vec<PathBuf>> {
    let config = args.input.load_config()?;
    let ir = load_ir(
        args.input.ir.as_deref(),
        args.input.source.as_deref(),
        &args.input.parser,
    )?;
    let artifacts = generate_artifacts(&ir, &config)?;
    let spec = args.format.encode(&artifacts.document)?;

    fs::create_dir_all(&args.out_dir)?;
    let outputs = [
        (args.format.file_name(), spec),
        ("endpoints.md", artifacts.endpoint_table),
        ("models.md", artifacts.model_reference),
        ("endpoint-map.mmd", artifacts.endpoint_map),
        ("dependencies.mmd", artifacts.dependency_diagram),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, content) in outputs {
        let path = args.out_dir.join(name);
        fs::write(&path, content)?;
        info!(path = %path.display(), "Wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Writes only the OpenAPI document.
pub fn execute_openapi(args: &OpenapiArgs) -> CliResult<()> {
    let config = args.input.load_config()?;
    let ir = load_ir(
        args.input.ir.as_deref(),
        args.input.source.as_deref(),
        &args.input.parser,
    )?;
    let document = build_document(&ir, &config);

    let format = args
        .format
        .or_else(|| args.output.as_deref().map(SpecFormat::from_path))
        .unwrap_or_default();
    let spec = format.encode(&document)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, spec)?;
            info!(path = %path.display(), "Wrote OpenAPI document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(spec.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use autodoc_core::AppError;
    use tempfile::tempdir;

    const IR: &str = r#"{
      "models": [
        {"name": "User", "fields": [{"name": "id", "required": true, "typeRef": {"base": "Long"}}]}
      ],
      "endpoints": [
        {"path": "/api/users", "method": "GET", "controllerName": "UserController",
         "responseType": {"base": "List", "args": [{"base": "User"}]},
         "dependencies": [{"name": "repo", "type": "UserRepository", "injectionType": "field"}]},
        {"path": "/api/orders", "method": "POST", "controllerName": "OrderController"}
      ]
    }"#;

    fn input(ir: Option<PathBuf>, source: Option<PathBuf>, parser: &str) -> InputArgs {
        InputArgs {
            source,
            ir,
            parser: parser.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_writes_every_artifact() {
        let dir = tempdir().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, IR).unwrap();
        let out_dir = dir.path().join("out/docs");

        let args = GenerateArgs {
            input: InputArgs {
                info: Some(r#"title="Shop",version="2.0""#.into()),
                ..input(Some(ir_path), None, DEFAULT_PARSER_COMMAND)
            },
            out_dir: out_dir.clone(),
            format: SpecFormat::Yaml,
        };
        let written = execute(&args).unwrap();
        assert_eq!(written.len(), 5);
        for name in [
            "openapi.yaml",
            "endpoints.md",
            "models.md",
            "endpoint-map.mmd",
            "dependencies.mmd",
        ] {
            assert!(out_dir.join(name).exists(), "missing {}", name);
        }

        let spec = fs::read_to_string(out_dir.join("openapi.yaml")).unwrap();
        assert!(spec.contains("title: Shop"));
        assert!(spec.contains("$ref: '#/components/schemas/User'"));

        let table = fs::read_to_string(out_dir.join("endpoints.md")).unwrap();
        assert!(table.contains("| Orders | POST | `/api/orders` |"));
        assert!(table.contains("| Users | GET | `/api/users` |"));

        let deps = fs::read_to_string(out_dir.join("dependencies.mmd")).unwrap();
        assert!(deps.contains("subgraph Repositories"));
    }

    #[test]
    fn test_generate_json_format() {
        let dir = tempdir().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, IR).unwrap();

        let args = GenerateArgs {
            input: input(Some(ir_path), None, DEFAULT_PARSER_COMMAND),
            out_dir: dir.path().to_path_buf(),
            format: SpecFormat::Json,
        };
        execute(&args).unwrap();
        let spec = fs::read_to_string(dir.path().join("openapi.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&spec).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
    }

    #[test]
    fn test_parser_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("docs");

        let args = GenerateArgs {
            input: input(
                None,
                Some(dir.path().to_path_buf()),
                "autodoc-parser-that-does-not-exist",
            ),
            out_dir: out_dir.clone(),
            format: SpecFormat::Yaml,
        };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::Parser(_))));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_invalid_info_writes_nothing() {
        let dir = tempdir().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, IR).unwrap();
        let out_dir = dir.path().join("docs");

        let args = GenerateArgs {
            input: InputArgs {
                info: Some(r#"title="""#.into()),
                ..input(Some(ir_path), None, DEFAULT_PARSER_COMMAND)
            },
            out_dir: out_dir.clone(),
            format: SpecFormat::Yaml,
        };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::Config(_))));
        assert!(!out_dir.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_generate_from_parser_output() {
        let dir = tempdir().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, IR).unwrap();
        let out_dir = dir.path().join("docs");

        let args = GenerateArgs {
            input: input(None, Some(ir_path), "cat"),
            out_dir: out_dir.clone(),
            format: SpecFormat::Yaml,
        };
        execute(&args).unwrap();
        let models = fs::read_to_string(out_dir.join("models.md")).unwrap();
        assert!(models.contains("| id | Long | yes | - |"));
    }

    #[test]
    fn test_openapi_to_file_infers_format() {
        let dir = tempdir().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, IR).unwrap();
        let output = dir.path().join("spec/api.json");

        let args = OpenapiArgs {
            input: InputArgs {
                servers: Some(r#"url="https://a",description="Prod";url="https://b""#.into()),
                ..input(Some(ir_path), None, DEFAULT_PARSER_COMMAND)
            },
            output: Some(output.clone()),
            format: None,
        };
        execute_openapi(&args).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value["servers"][0]["description"], "Prod");
        assert_eq!(value["servers"][1]["url"], "https://b");
        assert_eq!(
            value["paths"]["/api/users"]["get"]["responses"]["200"]["content"]["application/json"]
                ["schema"]["items"]["$ref"],
            "#/components/schemas/User"
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SpecFormat::from_path(Path::new("a.json")), SpecFormat::Json);
        assert_eq!(SpecFormat::from_path(Path::new("a.yml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("a")), SpecFormat::Yaml);
    }
}
