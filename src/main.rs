//! Gestalt localization CLI
//!
//! Loads a page description, localizes it against the configured locales
//! resource and prints the rendered page as JSON.

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tokio::task::LocalSet;
use tracing::{info, warn};

use gestalt_localization::{
    config::Settings,
    dom::Page,
    i18n::{render::LANGUAGE_ATTRIBUTE, LanguageChange, Localization, LocalizationOptions, Phase, TranslationStore},
    storage,
    utils::logging,
};

#[derive(Debug, Parser)]
#[command(name = "gestalt-localization", version, about = "Render a Gestalt page in the selected language")]
struct Cli {
    /// Page description (JSON)
    #[arg(long)]
    page: PathBuf,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long)]
    config: Option<String>,

    /// Switch to this language after the dictionary loads
    #[arg(long)]
    lang: Option<String>,

    /// Do not store the language given with --lang
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path, true),
        None => Settings::new(),
    }
    .context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", gestalt_localization::info());

    let page = Page::from_file(&cli.page)
        .with_context(|| format!("failed to read page {}", cli.page.display()))?;

    let local = LocalSet::new();
    let tasks = &local;
    let rendered = local
        .run_until(async move {
            let document = page.into_document();
            let store = TranslationStore::from_config(&settings.localization)?;
            let storage = storage::from_config(&settings.storage)?;
            let options = LocalizationOptions::from(&settings.localization);

            let localization = Localization::initialize(tasks, document.clone(), store, storage, options)?;

            if localization.settled().await == Phase::Unavailable {
                warn!("Rendering page without translations");
            }

            if let Some(language) = cli.lang.as_deref() {
                switch_language(&localization, language, !cli.no_persist);
            }

            info!(
                active = %localization.active_language(),
                rendered = ?localization.rendered_language(),
                "Page localized"
            );

            anyhow::Ok(Page::snapshot(&document))
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

/// Click the control for `language` like a user would, or change the
/// language directly when the page has no such control.
fn switch_language(localization: &Localization, language: &str, persist: bool) {
    let document = localization.document();
    let control = localization.controls().iter().copied().find(|&control| {
        document.attribute(control, LANGUAGE_ATTRIBUTE).as_deref() == Some(language)
    });

    match control {
        Some(control) if persist => document.click(control),
        _ => localization.set_language_with(language, LanguageChange { persist }),
    }
}
