//! # Migration Compiler
//!
//! Orchestrates one migration compile:
//!
//! ```text
//! advance clock ──► destination path
//!        │
//!        ▼
//!   cache hit? ──yes──► copy cached entry to destination
//!        │ no
//!        ▼
//!   substitute {{class_name}} / {{table_name}}
//!   synthesize {{fields}}
//!   run extensions
//!        │
//!        ▼
//!   write cache entry ──► copy to destination
//! ```

use chrono::NaiveDateTime;
use scaffolder_core::{CodeGenContext, ScaffoldResult, Validatable};
use scaffolder_ir::{ModelData, ScaffolderConfig};
use std::path::{Path, PathBuf};

use crate::cache::{CacheKey, CacheStore, FsCacheStore};
use crate::clock::MigrationClock;
use crate::extension::{MigrationExtension, apply_extensions};
use crate::migrations::fields::synthesize_fields;
use crate::naming::{PathResolver, migration_file_name, resolve_table_name};
use crate::output::{FsOutputStore, OutputStore};
use crate::template::{self, Placeholders, Stub};
use crate::CompilerConfig;

// ============================================================================
// CompiledArtifact
// ============================================================================

/// A compiled migration and where it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    /// Destination file
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// Whether the content was served from the cache
    pub from_cache: bool,

    /// Clock value used for the file name
    pub timestamp: NaiveDateTime,
}

impl CompiledArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Destination file name, without directories
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a migration without touching the cache or the output store.
///
/// Substitutes the class name and table name, then fills the fields block.
pub fn render_migration(
    stub: &Stub,
    model_name: &str,
    model: &ModelData,
    config: &ScaffolderConfig,
    ctx: &CodeGenContext,
) -> ScaffoldResult<String> {
    let placeholders = Placeholders::new()
        .with(template::CLASS_NAME, model_name)
        .with(template::TABLE_NAME, resolve_table_name(config, model_name))
        .with(template::FIELDS, synthesize_fields(model, ctx)?);

    Ok(stub.render(&placeholders))
}

// ============================================================================
// MigrationCompiler
// ============================================================================

/// Compiles migrations, caching them by content hash.
///
/// The compiler owns its clock and stores; `compile` takes `&mut self`, so a
/// compiler shared between threads must sit behind a lock, which also keeps
/// the clock monotonic.
#[derive(Debug)]
pub struct MigrationCompiler<C = FsCacheStore, O = FsOutputStore> {
    config: CompilerConfig,
    clock: MigrationClock,
    cache: C,
    output: O,
    paths: PathResolver,
}

impl MigrationCompiler<FsCacheStore, FsOutputStore> {
    /// Create a compiler that caches under `config.cache_path()` and writes
    /// migrations to disk
    pub fn on_disk(config: CompilerConfig, clock: MigrationClock) -> Self {
        let cache = FsCacheStore::new(config.cache_path());
        Self::new(config, clock, cache, FsOutputStore)
    }
}

impl<C: CacheStore, O: OutputStore> MigrationCompiler<C, O> {
    // ====================================================================
    // Construction
    // ====================================================================

    pub fn new(config: CompilerConfig, clock: MigrationClock, cache: C, output: O) -> Self {
        let paths = config.path_resolver();
        let clock = clock.with_step_seconds(config.step_seconds);
        Self {
            config,
            clock,
            cache,
            output,
            paths,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    // ====================================================================
    // Compilation
    // ====================================================================

    /// Compile one migration.
    ///
    /// # Arguments
    ///
    /// * `stub` - migration template with `{{class_name}}`, `{{table_name}}`
    ///   and `{{fields}}` placeholders
    /// * `model_name` - model name as written (`Person`)
    /// * `model` - the model's fields
    /// * `scaffolder_config` - table name override and path templates
    /// * `hash` - non-empty content hash keying the cache entry (see
    ///   [`CacheKey::migration`] for how it maps to a file name)
    /// * `extensions` - post-processing steps, run in order on a cache miss
    ///
    /// # Errors
    ///
    /// Invalid configuration or field directives, failing extensions, and
    /// cache or output I/O errors all abort the compile. Nothing is retried.
    pub fn compile(
        &mut self,
        stub: &Stub,
        model_name: &str,
        model: &ModelData,
        scaffolder_config: &ScaffolderConfig,
        hash: &str,
        extensions: &[Box<dyn MigrationExtension>],
    ) -> ScaffoldResult<CompiledArtifact> {
        scaffolder_config.validate()?;

        let timestamp = self.clock.advance();
        let path = self.destination_path(model_name, scaffolder_config, &timestamp);
        let key = CacheKey::migration(hash, &self.config.cache_extension)?;

        let from_cache = self.cache.exists(&key)?;
        if from_cache {
            tracing::debug!(key = %key, "migration cache hit");
        } else {
            tracing::debug!(key = %key, "migration cache miss");

            let ctx = CodeGenContext::at_level(self.config.indent_level);
            let compiled = render_migration(stub, model_name, model, scaffolder_config, &ctx)?;
            let compiled = apply_extensions(compiled, model, scaffolder_config, extensions)?;

            self.cache.write(&key, &compiled)?;
        }

        let content = self.cache.read(&key)?;
        self.output.put(&path, &content)?;

        tracing::info!(
            model = %model_name,
            path = %path.display(),
            cached = from_cache,
            "migration compiled",
        );

        Ok(CompiledArtifact {
            path,
            content,
            from_cache,
            timestamp,
        })
    }

    /// Destination of a migration compiled at `timestamp`.
    ///
    /// The file name always uses the model name; `tableName` does not apply.
    pub fn destination_path(
        &self,
        model_name: &str,
        scaffolder_config: &ScaffolderConfig,
        timestamp: &NaiveDateTime,
    ) -> PathBuf {
        self.paths
            .resolve(scaffolder_config.migrations_path())
            .join(migration_file_name(
                timestamp,
                model_name,
                &self.config.source_extension,
            ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::output::MemoryOutputStore;
    use chrono::{NaiveDate, TimeDelta};
    use pretty_assertions::assert_eq;
    use scaffolder_core::ScaffoldError;
    use scaffolder_ir::FieldDescriptor;
    use std::cell::Cell;
    use std::rc::Rc;

    type TestCompiler = MigrationCompiler<MemoryCacheStore, MemoryOutputStore>;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn compiler() -> TestCompiler {
        MigrationCompiler::new(
            CompilerConfig::new().with_base_path("/srv/app"),
            MigrationClock::new(start()),
            MemoryCacheStore::new(),
            MemoryOutputStore::new(),
        )
    }

    fn config() -> ScaffolderConfig {
        ScaffolderConfig::new("{{base_path}}/database/migrations/")
    }

    fn post() -> ModelData {
        ModelData::new(vec![
            FieldDescriptor::new("title", "string").with_index("unique"),
            FieldDescriptor::new("views", "integer").with_modifiers("nullable:default,0"),
            FieldDescriptor::new("user_id", "unsignedInteger").with_foreign_key("id:users"),
        ])
    }

    /// Counts its invocations and appends a marker
    struct Counting {
        calls: Rc<Cell<usize>>,
        marker: &'static str,
    }

    impl MigrationExtension for Counting {
        fn name(&self) -> &str {
            self.marker
        }

        fn after_migration_compiled(
            &self,
            mut text: String,
            _model: &ModelData,
            _config: &ScaffolderConfig,
        ) -> ScaffoldResult<String> {
            self.calls.set(self.calls.get() + 1);
            text.push_str(self.marker);
            Ok(text)
        }
    }

    fn counting(marker: &'static str) -> (Box<dyn MigrationExtension>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let ext = Counting {
            calls: Rc::clone(&calls),
            marker,
        };
        (Box::new(ext), calls)
    }

    #[test]
    fn test_render_full_migration() {
        let out = render_migration(
            &Stub::migration(),
            "Post",
            &post(),
            &config(),
            &CodeGenContext::at_level(3),
        )
        .unwrap();

        let expected = "        Schema::create('posts', function (Blueprint $table) {
            $table->increments('id');

            $table->string('title')->unique();
            $table->integer('views')->nullable()->default(0);
            $table->unsignedInteger('user_id');
            $table->foreign('user_id')->references('id')->on('users');


            $table->timestamps();
        });
";
        assert!(out.contains("class CreatePostsTable extends Migration"));
        assert!(out.contains(expected), "unexpected migration:\n{out}");
        assert!(out.contains("Schema::drop('posts');"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_compile_writes_destination_and_cache() {
        let mut compiler = compiler();
        let artifact = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "abc123", &[])
            .unwrap();

        assert!(!artifact.from_cache);
        assert_eq!(
            artifact.path,
            PathBuf::from("/srv/app/database/migrations/2024_05_01_120005_create_posts_table.php")
        );
        assert_eq!(compiler.output().get(&artifact.path), Some(artifact.content.as_str()));

        let key = CacheKey::migration("abc123", ".scf").unwrap();
        assert_eq!(compiler.cache().read(&key).unwrap(), artifact.content);
    }

    #[test]
    fn test_second_compile_served_from_cache() {
        let mut compiler = compiler();
        let (ext, calls) = counting("<A>");
        let extensions = vec![ext];

        let first = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "abc123", &extensions)
            .unwrap();
        let second = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "abc123", &extensions)
            .unwrap();

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(first.content, second.content);
        assert_eq!(calls.get(), 1, "extensions must not run on a cache hit");
        assert_ne!(first.path, second.path);
        assert_eq!(compiler.output().get(&second.path), Some(first.content.as_str()));
    }

    #[test]
    fn test_cache_hit_skips_synthesis() {
        let mut compiler = compiler();
        let key = CacheKey::migration("h1", ".scf").unwrap();
        compiler.cache_mut().write(&key, "cached body").unwrap();

        // Would fail synthesis if it ran
        let broken = ModelData::new(vec![FieldDescriptor::new("x", "var char")]);
        let artifact = compiler
            .compile(&Stub::migration(), "Post", &broken, &config(), "h1", &[])
            .unwrap();

        assert!(artifact.from_cache);
        assert_eq!(artifact.content, "cached body");
    }

    #[test]
    fn test_extension_order() {
        let mut compiler = compiler();
        let (a, _) = counting("<A>");
        let (b, _) = counting("<B>");

        let artifact = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "h", &[a, b])
            .unwrap();
        assert!(artifact.content.ends_with("<A><B>"));
    }

    #[test]
    fn test_table_name_override_does_not_change_file_name() {
        let mut compiler = compiler();
        let config = config().with_table_name("people");
        let model = ModelData::new(vec![FieldDescriptor::new("name", "string")]);

        let artifact = compiler
            .compile(&Stub::migration(), "Person", &model, &config, "p", &[])
            .unwrap();

        assert!(artifact.content.contains("Schema::create('people'"));
        assert!(artifact.content.contains("Schema::drop('people')"));
        assert!(!artifact.content.contains("persons"));
        assert!(artifact.file_name().ends_with("_create_persons_table.php"));
    }

    #[test]
    fn test_file_names_are_monotonic() {
        let mut compiler = compiler();
        let model = ModelData::new(vec![FieldDescriptor::new("name", "string")]);

        let artifacts: Vec<CompiledArtifact> = ["Author", "Book", "Review"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                compiler
                    .compile(&Stub::migration(), name, &model, &config(), &format!("h{i}"), &[])
                    .unwrap()
            })
            .collect();

        assert_eq!(artifacts[0].file_name(), "2024_05_01_120005_create_authors_table.php");
        assert_eq!(artifacts[1].file_name(), "2024_05_01_120010_create_books_table.php");
        assert_eq!(artifacts[2].file_name(), "2024_05_01_120015_create_reviews_table.php");

        for pair in artifacts.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, TimeDelta::seconds(5));
            assert!(pair[0].file_name() < pair[1].file_name());
        }
    }

    #[test]
    fn test_failing_extension_writes_nothing() {
        struct Broken;

        impl MigrationExtension for Broken {
            fn name(&self) -> &str {
                "broken"
            }

            fn after_migration_compiled(
                &self,
                _text: String,
                _model: &ModelData,
                _config: &ScaffolderConfig,
            ) -> ScaffoldResult<String> {
                Err(ScaffoldError::validation("nope"))
            }
        }

        let mut compiler = compiler();
        let extensions: Vec<Box<dyn MigrationExtension>> = vec![Box::new(Broken)];
        let err = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "h", &extensions)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Extension { .. }));
        assert!(compiler.cache().is_empty());
        assert_eq!(compiler.output().file_count(), 0);
    }

    #[test]
    fn test_empty_hash_rejected() {
        let mut compiler = compiler();
        let err = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "", &[])
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_base64_hash_is_cached() {
        let mut compiler = compiler();
        let hash = "n4bQgYhMfWWaL+qgxVrQFaO/TxsrC4Is0V1sFbDwCgg=";

        let first = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), hash, &[])
            .unwrap();
        let second = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), hash, &[])
            .unwrap();

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(compiler.cache().len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut compiler = compiler();
        let err = compiler
            .compile(
                &Stub::migration(),
                "Post",
                &post(),
                &ScaffolderConfig::new(""),
                "h",
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingConfig(_)));
    }

    #[test]
    fn test_compile_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut compiler = MigrationCompiler::on_disk(
            CompilerConfig::new().with_base_path(dir.path()),
            MigrationClock::new(start()),
        );

        let first = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "disk", &[])
            .unwrap();
        let second = compiler
            .compile(&Stub::migration(), "Post", &post(), &config(), "disk", &[])
            .unwrap();

        assert!(second.from_cache);
        assert!(
            dir.path()
                .join("scaffolder-config/cache/migration_disk.scf")
                .is_file()
        );
        assert_eq!(
            std::fs::read(&first.path).unwrap(),
            std::fs::read(&second.path).unwrap()
        );
        assert!(first.path.starts_with(dir.path().join("database/migrations")));
    }
}
