pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use printmarket_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use printmarket_core::{ContactInfo, QuoteItemDraft, QuoteItemPatch};
use printmarket_store::{InMemoryStorage, JsonFileStorage, QuoteStore, QuoteStorage};

#[derive(Debug, Parser)]
#[command(
    name = "printmarket",
    about = "PrintMarket quote cart CLI",
    long_about = "Manage a print-quote cart: add and configure products, check readiness, and assemble bulk quote requests.",
    after_help = "Examples:\n  printmarket add poster --quantity 100 --size a3 --paper matte-170 --color 4-0\n  printmarket list\n  printmarket submit --email print@example.com"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the printmarket.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Quote state file (overrides config and env)")]
    state_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args, Default)]
pub struct ItemFlags {
    #[arg(long, help = "Print run quantity")]
    quantity: Option<String>,
    #[arg(long, help = "Size option value, or `custom`")]
    size: Option<String>,
    #[arg(long, help = "Custom width in mm (with --size custom)")]
    width: Option<String>,
    #[arg(long, help = "Custom height in mm (with --size custom)")]
    height: Option<String>,
    #[arg(long, help = "Paper type option value")]
    paper: Option<String>,
    #[arg(long, help = "Color option value, e.g. 4-0")]
    color: Option<String>,
    #[arg(long, help = "Free-form notes for the print shop")]
    notes: Option<String>,
    #[arg(long, help = "Required-by date (ISO calendar date)")]
    deadline: Option<NaiveDate>,
    #[arg(
        long = "field",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Product-specific field, repeatable"
    )]
    fields: Vec<(String, String)>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Add a product to the quote cart (merges onto an existing entry by slug)")]
    Add {
        slug: String,
        #[arg(long, help = "Display name (defaults to a humanized slug)")]
        name: Option<String>,
        #[arg(long, help = "Product image URL")]
        image_url: Option<String>,
        #[command(flatten)]
        flags: ItemFlags,
    },
    #[command(about = "Update fields on a cart item by id")]
    Update {
        id: String,
        #[command(flatten)]
        flags: ItemFlags,
    },
    #[command(about = "Remove a cart item by id")]
    Remove { id: String },
    #[command(about = "Empty the quote cart")]
    Clear,
    #[command(about = "List cart items with per-item readiness")]
    List,
    #[command(about = "List the product catalog and its option sets")]
    Products,
    #[command(about = "Assemble and log the bulk quote request, then clear the cart")]
    Submit {
        #[arg(long, help = "Contact email (required for submission)")]
        email: String,
        #[arg(long, help = "Contact phone")]
        phone: Option<String>,
        #[arg(long, help = "Notes for the whole request")]
        notes: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl ItemFlags {
    fn into_patch(self) -> QuoteItemPatch {
        QuoteItemPatch {
            quantity: self.quantity,
            size: self.size,
            custom_width: self.width,
            custom_height: self.height,
            paper_type: self.paper,
            color_option: self.color,
            notes: self.notes,
            deadline: self.deadline,
            custom_fields: self.fields.into_iter().collect(),
        }
    }

    fn into_draft(self, slug: String, name: Option<String>, image_url: Option<String>) -> QuoteItemDraft {
        let mut draft = QuoteItemDraft::new(
            slug.clone(),
            name.unwrap_or_else(|| humanize_slug(&slug)),
            image_url.unwrap_or_default(),
        );
        let patch = self.into_patch();
        draft.quantity = patch.quantity;
        draft.size = patch.size;
        draft.custom_width = patch.custom_width;
        draft.custom_height = patch.custom_height;
        draft.paper_type = patch.paper_type;
        draft.color_option = patch.color_option;
        draft.notes = patch.notes;
        draft.deadline = patch.deadline;
        draft.custom_fields = patch.custom_fields;
        draft
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // try_init so repeated invocations inside one process (tests) stay quiet
    let _ = match config.logging.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .compact()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .pretty()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .json()
            .try_init(),
    };
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
        overrides: ConfigOverrides {
            state_file: cli.state_file.clone(),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let storage: Box<dyn QuoteStorage> = if config.storage.disabled {
        Box::new(InMemoryStorage::default())
    } else {
        Box::new(JsonFileStorage::new(config.storage.state_file.clone()))
    };
    let mut store = QuoteStore::open(storage);

    let result = match cli.command {
        Command::Add { slug, name, image_url, flags } => {
            commands::add::run(&mut store, flags.into_draft(slug, name, image_url))
        }
        Command::Update { id, flags } => commands::update::run(&mut store, &id, flags.into_patch()),
        Command::Remove { id } => commands::remove::run(&mut store, &id),
        Command::Clear => commands::clear::run(&mut store),
        Command::List => commands::list::run(&store),
        Command::Products => commands::products::run(store.registry()),
        Command::Submit { email, phone, notes } => {
            let contact = ContactInfo {
                email,
                phone: phone.unwrap_or_default(),
                notes: notes.unwrap_or_default(),
            };
            commands::submit::run(&mut store, contact)
        }
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(&config, cli.config.as_deref()),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
