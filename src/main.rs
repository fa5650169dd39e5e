use caojambo_site::api::ApiClient;
use caojambo_site::config::{self, SiteConfig};
use caojambo_site::contact::{ContactField, ContactForm, SubmitBlocked, SubmitOutcome, Toaster};
use caojambo_site::gallery::GalleryLoader;
use caojambo_site::i18n::{LanguageStore, Locale, Translations};
use caojambo_site::storage::FileStorage;
use caojambo_site::{generate, output};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "caojambo")]
#[command(about = "Bilingual site generator and backend client for CAOJAMBO")]
#[command(long_about = "\
Bilingual site generator and backend client for CAOJAMBO

Builds the Spanish and English pages of the De Origen Natural Company site,
reads the photo gallery from the backend, and sends contact messages.

Output structure:

  dist/
  ├── index.html        # Spanish (default)
  └── en/
      └── index.html    # English

The active language is remembered between runs in the state file
(--state, default .caojambo-state.json), the same way the published site
remembers it in the browser.

Run 'caojambo gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file (missing file = stock defaults)
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// File holding the persisted language choice
    #[arg(long, default_value = ".caojambo-state.json", global = true)]
    state: PathBuf,

    /// Backend base URL, overriding [api].backend_url
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render both language pages into the output directory
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
        /// Skip the backend and use the built-in gallery
        #[arg(long)]
        offline: bool,
    },
    /// Fetch and list the gallery
    Gallery,
    /// Resolve a translation key
    T {
        /// Dotted key, e.g. hero.title
        key: String,
        /// Language to resolve in (default: the persisted one)
        #[arg(long)]
        locale: Option<Locale>,
    },
    /// Show or change the persisted language
    Lang {
        #[command(subcommand)]
        action: Option<LangAction>,
    },
    /// Send a message through the contact endpoint
    Contact(ContactArgs),
    /// Validate the config and translation files without building
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

#[derive(Subcommand, Clone, Copy)]
enum LangAction {
    /// Print the active language (default)
    Show,
    /// Switch between Spanish and English
    Toggle,
    /// Switch to a specific language
    Set { locale: Locale },
}

#[derive(clap::Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// One of: beans, development, export, other
    #[arg(long, default_value = "")]
    service: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            output: ref output_dir,
            offline,
        } => {
            let site_config = load_site_config(&cli)?;
            let gallery = if offline {
                GalleryLoader::fallback()
            } else {
                println!("==> Loading gallery from {}", site_config.api.backend_url);
                GalleryLoader::load(&ApiClient::new(&site_config.api)?)
            };

            println!("==> Rendering pages \u{2192} {}", output_dir.display());
            let year = chrono::Local::now().year();
            let pages = generate::generate(
                output_dir,
                &Translations::builtin(),
                &gallery.images,
                &site_config,
                year,
            )?;
            output::print_build_output(&pages, &gallery);
        }
        Command::Gallery => {
            let site_config = load_site_config(&cli)?;
            let store = language_store(&cli.state);
            let gallery = GalleryLoader::load(&ApiClient::new(&site_config.api)?);
            output::print_gallery(&gallery, store.locale());
        }
        Command::T { ref key, locale } => {
            let locale = locale.unwrap_or_else(|| language_store(&cli.state).locale());
            println!("{}", Translations::builtin().resolve(locale, key));
        }
        Command::Lang { action } => {
            let mut store = language_store(&cli.state);
            match action.unwrap_or(LangAction::Show) {
                LangAction::Show => {}
                LangAction::Toggle => {
                    store.toggle();
                }
                LangAction::Set { locale } => store.set(locale),
            }
            println!("{}", output::format_language(store.locale(), &cli.state));
        }
        Command::Contact(ref args) => {
            let site_config = load_site_config(&cli)?;
            let store = language_store(&cli.state);
            let client = ApiClient::new(&site_config.api)?;

            let mut form = ContactForm::new();
            form.set(ContactField::Name, args.name.as_str());
            form.set(ContactField::Company, args.company.as_str());
            form.set(ContactField::Email, args.email.as_str());
            form.set(ContactField::Phone, args.phone.as_str());
            form.set(ContactField::ServiceInterest, args.service.as_str());
            form.set(ContactField::Message, args.message.as_str());

            let mut toaster = Toaster::new();
            let outcome = form.submit(&client, store.translations(), store.locale(), &mut toaster);
            for notification in toaster.drain() {
                println!("{}", output::format_notification(&notification));
            }
            match outcome {
                SubmitOutcome::Sent => {}
                SubmitOutcome::Failed(err) => return Err(err.into()),
                SubmitOutcome::Blocked(SubmitBlocked::MissingRequired(fields)) => {
                    let names: Vec<&str> = fields
                        .iter()
                        .map(|f| store.t(f.label_key()))
                        .collect();
                    return Err(format!("missing required fields: {}", names.join(", ")).into());
                }
                SubmitOutcome::Blocked(SubmitBlocked::InFlight) => {
                    return Err("a submission is already in flight".into());
                }
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            load_site_config(&cli)?;
            let translations = Translations::builtin();
            let gaps = translations.check_parity();
            for line in output::format_parity_gaps(&gaps) {
                println!("{}", line);
            }
            let missing = generate::missing_page_keys(&translations);
            for line in output::format_missing_page_keys(&missing) {
                println!("{}", line);
            }
            if !gaps.is_empty() || !missing.is_empty() {
                return Err("translation files are out of sync".into());
            }
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `--config`, apply `--backend-url`, and validate the result.
fn load_site_config(cli: &Cli) -> Result<SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(&cli.config)?;
    if let Some(url) = &cli.backend_url {
        site_config.api.backend_url = url.clone();
        site_config.validate()?;
    }
    Ok(site_config)
}

fn language_store(state: &Path) -> LanguageStore<FileStorage> {
    LanguageStore::load(Translations::builtin(), FileStorage::open(state))
}
