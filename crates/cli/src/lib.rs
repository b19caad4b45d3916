//! # Scaffolder CLI
//!
//! Command-line interface for the migration scaffolder.
//!
//! ## Commands
//!
//! - `compile` - Compile migrations for one or more model files
//! - `cache list` - List cached migrations
//! - `cache clear` - Remove cached migrations so the next compile rebuilds them
//!

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use heck::ToPascalCase;
use scaffolder_codegen::{
    CacheStore, CompiledArtifact, CompilerConfig, FsCacheStore, MigrationClock,
    MigrationCompiler, MigrationExtension, SoftDeletes, Stub, fingerprint,
};
use scaffolder_ir::{load_config, load_model};
use std::path::{Path, PathBuf};

// Re-export dependencies for use in main.rs
pub use scaffolder_codegen;
pub use scaffolder_core;
pub use scaffolder_ir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "scaffolder", version, about = "Compile schema-builder migrations from model definitions")]
pub struct Cli {
    /// Project root that path templates and the cache resolve against
    #[arg(long, global = true, env = "SCAFFOLDER_BASE_PATH", default_value = ".")]
    pub base_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile migrations for model definition files
    Compile(CompileArgs),

    /// Inspect or clear the migration cache
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Model definition file(s), compiled in the given order
    #[arg(long = "model", short = 'm', required = true)]
    pub models: Vec<PathBuf>,

    /// Scaffolder configuration file
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Model name (defaults to the model file name in PascalCase; single model only)
    #[arg(long)]
    pub name: Option<String>,

    /// Custom migration stub
    #[arg(long)]
    pub stub: Option<PathBuf>,

    /// Content hash for the cache (defaults to a SHA-256 of the model; single model only)
    #[arg(long)]
    pub hash: Option<String>,

    /// Add a soft-delete column to every compiled migration
    #[arg(long)]
    pub soft_deletes: bool,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// List cached migrations
    List,

    /// Remove all cached migrations
    Clear,
}

// ============================================================================
// Execution
// ============================================================================

/// Run a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let base_path = std::path::absolute(&cli.base_path)
        .with_context(|| format!("resolving base path {}", cli.base_path.display()))?;
    let config = CompilerConfig::new().with_base_path(base_path);

    match cli.command {
        Command::Compile(args) => {
            for artifact in compile(&config, &args)? {
                let status = if artifact.from_cache {
                    "cached ".yellow()
                } else {
                    "created".green()
                };
                println!("{} {}", status.bold(), artifact.path.display());
            }
        }
        Command::Cache(CacheCommand::List) => {
            let store = FsCacheStore::new(config.cache_path());
            let entries = store.entries()?;
            if entries.is_empty() {
                println!("{}", "No cached migrations".dimmed());
            }
            for key in entries {
                println!("{}", store.entry_path(&key).display());
            }
        }
        Command::Cache(CacheCommand::Clear) => {
            let mut store = FsCacheStore::new(config.cache_path());
            let removed = store.clear()?;
            println!("{} {} cached migration(s)", "removed".bold().red(), removed);
        }
    }

    Ok(())
}

/// Compile every model named in `args`, in order, with one compiler
pub fn compile(config: &CompilerConfig, args: &CompileArgs) -> anyhow::Result<Vec<CompiledArtifact>> {
    if args.models.len() > 1 && (args.name.is_some() || args.hash.is_some()) {
        bail!("--name and --hash can only be used with a single --model");
    }

    let scaffolder_config = load_config(&args.config)
        .with_context(|| format!("loading configuration {}", args.config.display()))?;

    let stub = match &args.stub {
        Some(path) => Stub::load(path)?,
        None => Stub::migration(),
    };

    let mut extensions: Vec<Box<dyn MigrationExtension>> = Vec::new();
    if args.soft_deletes {
        extensions.push(Box::new(SoftDeletes));
    }

    let mut compiler = MigrationCompiler::on_disk(config.clone(), MigrationClock::starting_now());
    let mut artifacts = Vec::with_capacity(args.models.len());

    for path in &args.models {
        let model = load_model(path)
            .with_context(|| format!("loading model {}", path.display()))?;

        let model_name = match &args.name {
            Some(name) => name.clone(),
            None => model_name_from_path(path)?,
        };

        let hash = match &args.hash {
            Some(hash) => hash.clone(),
            None => fingerprint(&model_name, &model, &scaffolder_config, &stub, &extensions)?,
        };

        tracing::debug!(model = %model_name, hash = %hash, path = %path.display(), "compiling model");

        let artifact = compiler
            .compile(&stub, &model_name, &model, &scaffolder_config, &hash, &extensions)
            .with_context(|| format!("compiling migration for {}", model_name))?;
        artifacts.push(artifact);
    }

    Ok(artifacts)
}

/// `blog_post.json` → `BlogPost`
pub fn model_name_from_path(path: &Path) -> anyhow::Result<String> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("cannot derive a model name from {}", path.display()))?;
    Ok(stem.to_pascal_case())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
        let model = dir.join("blog_post.json");
        std::fs::write(
            &model,
            serde_json::json!({
                "fields": [
                    { "name": "title", "type": { "db": "string" }, "index": "unique" },
                    { "name": "user_id", "type": { "db": "unsignedInteger" }, "foreignKey": "id:users" }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let config = dir.join("scaffolder.json");
        std::fs::write(
            &config,
            r#"{ "paths": { "migrations": "{{base_path}}/database/migrations/" } }"#,
        )
        .unwrap();

        (model, config)
    }

    fn args(models: Vec<PathBuf>, config: PathBuf) -> CompileArgs {
        CompileArgs {
            models,
            config,
            name: None,
            stub: None,
            hash: None,
            soft_deletes: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compile_command() {
        let cli = Cli::try_parse_from([
            "scaffolder", "compile", "-m", "a.json", "-m", "b.json", "-c", "s.json",
        ])
        .unwrap();

        match cli.command {
            Command::Compile(args) => {
                assert_eq!(args.models.len(), 2);
                assert!(!args.soft_deletes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_model_name_from_path() {
        assert_eq!(
            model_name_from_path(Path::new("models/blog_post.json")).unwrap(),
            "BlogPost"
        );
        assert_eq!(model_name_from_path(Path::new("Person.json")).unwrap(), "Person");
    }

    #[test]
    fn test_compile_twice_hits_cache() {
        let dir = tempdir().unwrap();
        let (model, config_path) = write_fixtures(dir.path());
        let config = CompilerConfig::new().with_base_path(dir.path());

        let first = compile(&config, &args(vec![model.clone()], config_path.clone())).unwrap();
        let second = compile(&config, &args(vec![model], config_path)).unwrap();

        assert!(!first[0].from_cache);
        assert!(second[0].from_cache);
        assert!(first[0].file_name().ends_with("_create_blogposts_table.php"));
        assert!(first[0].content.contains("Schema::create('blogposts'"));
    }

    #[test]
    fn test_compile_with_soft_deletes() {
        let dir = tempdir().unwrap();
        let (model, config_path) = write_fixtures(dir.path());
        let config = CompilerConfig::new().with_base_path(dir.path());

        let mut compile_args = args(vec![model], config_path);
        compile_args.soft_deletes = true;
        compile_args.hash = Some("with-soft-deletes".to_string());

        let artifacts = compile(&config, &compile_args).unwrap();
        assert!(artifacts[0].content.contains("$table->softDeletes();"));
    }

    #[test]
    fn test_soft_deletes_toggle_rebuilds_migration() {
        let dir = tempdir().unwrap();
        let (model, config_path) = write_fixtures(dir.path());
        let config = CompilerConfig::new().with_base_path(dir.path());

        let plain = compile(&config, &args(vec![model.clone()], config_path.clone())).unwrap();
        assert!(!plain[0].from_cache);
        assert!(!plain[0].content.contains("softDeletes"));

        let mut compile_args = args(vec![model], config_path);
        compile_args.soft_deletes = true;

        let soft = compile(&config, &compile_args).unwrap();
        assert!(!soft[0].from_cache);
        assert!(soft[0].content.contains("$table->softDeletes();"));
    }

    #[test]
    fn test_custom_stub_rebuilds_migration() {
        let dir = tempdir().unwrap();
        let (model, config_path) = write_fixtures(dir.path());
        let config = CompilerConfig::new().with_base_path(dir.path());

        let stub_path = dir.path().join("custom.stub");
        std::fs::write(&stub_path, "// CUSTOM {{table_name}}\n{{fields}}").unwrap();

        let builtin = compile(&config, &args(vec![model.clone()], config_path.clone())).unwrap();
        assert!(!builtin[0].from_cache);

        let mut compile_args = args(vec![model], config_path);
        compile_args.stub = Some(stub_path);

        let custom = compile(&config, &compile_args).unwrap();
        assert!(!custom[0].from_cache);
        assert!(custom[0].content.starts_with("// CUSTOM blogposts"));
    }

    #[test]
    fn test_name_rejected_for_multiple_models() {
        let dir = tempdir().unwrap();
        let (model, config_path) = write_fixtures(dir.path());
        let config = CompilerConfig::new().with_base_path(dir.path());

        let mut compile_args = args(vec![model.clone(), model], config_path);
        compile_args.name = Some("Post".to_string());

        assert!(compile(&config, &compile_args).is_err());
    }
}
