//! media-slideshow - inspect and validate slideshow media.
//!
//! This binary loads a media library file and runs the media sources over it.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use media_slideshow::{
    config::{CheckConfig, Cli, Command, GlobalOptions, MetadataConfig, SettingsConfig},
    host::{ChronoDateFormatter, DefaultMetadata, EntityLookup, MemoryStore, SourceContext},
    media::{BundleId, MediaId},
    source::{validate_media, SlideshowSource, SourceRegistry, DEFAULT_NAME, THUMBNAIL_URI},
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.options.verbose);

    if let Err(e) = cli.options.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Check(config) => run_check(&cli.options, config),
        Command::Metadata(config) => run_metadata(&cli.options, config),
        Command::Settings(config) => run_settings(config),
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "media_slideshow=debug"
    } else {
        "media_slideshow=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Shared Setup
// =============================================================================

/// Everything a command needs to run sources over a library.
struct Workspace {
    store: MemoryStore,
    registry: SourceRegistry,
    dates: ChronoDateFormatter,
    fallback: DefaultMetadata,
}

impl Workspace {
    fn load(options: &GlobalOptions, library: &Path) -> Result<Self, String> {
        let store = MemoryStore::from_path(library)
            .map_err(|e| format!("failed to load {}: {}", library.display(), e))?;
        let registry = SourceRegistry::from_media_types(store.media_types(), options.max_depth)
            .map_err(|e| e.to_string())?;
        let dates = options.date_formatter().map_err(|e| e.to_string())?;

        Ok(Self {
            store,
            registry,
            dates,
            fallback: options.fallback(),
        })
    }

    fn context(&self) -> SourceContext<'_> {
        SourceContext::new(
            &self.store,
            &self.store,
            &self.registry,
            &self.dates,
            &self.fallback,
        )
    }
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(options: &GlobalOptions, config: CheckConfig) -> ExitCode {
    println!("Media Library Check");
    println!("═══════════════════");
    println!();

    let workspace = match Workspace::load(options, &config.library) {
        Ok(w) => w,
        Err(e) => {
            println!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;

    println!("Media types:");
    for (bundle, source) in workspace.registry.iter() {
        match source.check_configuration(bundle, &workspace.store) {
            Ok(()) => println!("  ✓ {} ({})", bundle, source.plugin_definition().id),
            Err(e) => {
                failures += 1;
                println!("  ✗ {} ({}): {}", bundle, source.plugin_definition().id, e);
            }
        }
    }
    for bundle in workspace.registry.unconfigured() {
        println!("  ⚠ {} (no source field selected yet)", bundle);
    }
    println!();

    let cx = workspace.context();
    let media = workspace.store.all_media();

    println!("Media:");
    for item in &media {
        match validate_media(item, &cx) {
            Ok(()) => println!("  ✓ {} [{}]", item.id, item.bundle),
            Err(e) => {
                failures += 1;
                warn!(media = %item.id, field = e.field(), "validation failed");
                println!("  ✗ {} [{}] {}: {}", item.id, item.bundle, e.field(), e.message());
            }
        }
    }
    if media.is_empty() {
        println!("  (no media found)");
    }

    println!();
    println!("═══════════════════");
    if failures > 0 {
        println!("✗ {} problem(s) found", failures);
        return ExitCode::FAILURE;
    }
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}

// =============================================================================
// Metadata Command
// =============================================================================

fn run_metadata(options: &GlobalOptions, config: MetadataConfig) -> ExitCode {
    let workspace = match Workspace::load(options, &config.library) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let id = MediaId(config.media_id);
    let Some(media) = workspace.store.load_media(id) else {
        eprintln!("Error: media {} not found", id);
        return ExitCode::FAILURE;
    };

    let Some(source) = workspace.registry.get(&media.bundle) else {
        eprintln!("Error: no media source registered for bundle '{}'", media.bundle);
        return ExitCode::FAILURE;
    };

    let names = if config.names.is_empty() {
        let mut names: Vec<String> = source
            .metadata_attributes()
            .iter()
            .map(|attr| attr.name.to_string())
            .collect();
        names.push(DEFAULT_NAME.to_string());
        names.push(THUMBNAIL_URI.to_string());
        names
    } else {
        config.names
    };

    let cx = workspace.context();
    let mut values = serde_json::Map::new();
    for name in names {
        let value = source.metadata(&media, &name, &cx);
        values.insert(
            name,
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
    }

    match serde_json::to_string_pretty(&values) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Settings Command
// =============================================================================

fn run_settings(config: SettingsConfig) -> ExitCode {
    let store = match MemoryStore::from_path(&config.library) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", config.library.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let bundle = BundleId::new(config.bundle);
    let current = store
        .load_media_type(&bundle)
        .and_then(|media_type| media_type.source_configuration.source_field);

    let form = SlideshowSource::settings_form_for(&bundle, current.as_deref(), &store);

    match serde_json::to_string_pretty(&form) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
