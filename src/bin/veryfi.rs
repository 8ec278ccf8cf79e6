//! CLI binary for the veryfi client.
//!
//! A thin shim over [`veryfi::ClientV8`]: flags become request options and
//! responses are printed as a short summary or as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use veryfi::scheme::options::{
    DocumentGetOptions, DocumentSearchOptions, DocumentSharedOptions, DocumentUpdateOptions,
    DocumentUploadOptions, DocumentUrlOptions, LineItemOptions, TagOptions, VendorUpdateOptions,
};
use veryfi::{ClientV8, Options};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Process a local receipt
  veryfi process receipt.jpeg

  # Process by URL with confidence scores and bounding boxes
  veryfi process --detailed https://cdn.example.com/invoice.png

  # Tag on submission, JSON output
  veryfi --json process --tags travel,nyc receipt.pdf

  # Fetch, correct and delete a document
  veryfi get 36966934
  veryfi update 36966934 --notes "team lunch" --vendor-name "In-N-Out Burger"
  veryfi delete 36966934

  # Search
  veryfi search --q burger --created-gt 2024-01-01 --page-size 10

  # Line items and tags
  veryfi line-items list 36966934
  veryfi line-items add 36966934 --description "Fries" --total 3.5
  veryfi tags add 36966934 travel
  veryfi tags global

ENVIRONMENT VARIABLES:
  VERYFI_CLIENT_ID        Client id
  VERYFI_CLIENT_SECRET    Client secret (request signing)
  VERYFI_USERNAME         Username
  VERYFI_API_KEY          API key
  VERYFI_ENVIRONMENT_URL  Host override (default api.veryfi.com)
  RUST_LOG                Log filter, overrides --verbose / --quiet
"#;

/// Process and manage documents with the Veryfi API.
#[derive(Parser, Debug)]
#[command(
    name = "veryfi",
    version,
    about = "Process and manage documents with the Veryfi API",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,

    /// Per-attempt HTTP timeout in seconds.
    #[arg(long, global = true, env = "VERYFI_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Retries on network failure.
    #[arg(long, global = true, env = "VERYFI_RETRIES", default_value_t = 3)]
    retries: u32,

    /// Print responses as JSON.
    #[arg(long, global = true, env = "VERYFI_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "VERYFI_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, global = true, env = "VERYFI_QUIET")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, global = true, env = "VERYFI_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,

    #[arg(long, global = true, env = "VERYFI_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    #[arg(long, global = true, env = "VERYFI_USERNAME", hide_env_values = true)]
    username: Option<String>,

    #[arg(long, global = true, env = "VERYFI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, global = true, env = "VERYFI_ENVIRONMENT_URL")]
    environment_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a local file or an HTTP/HTTPS URL for processing.
    Process(ProcessArgs),

    /// Fetch a processed document.
    Get {
        document_id: i64,
        /// Include confidence scores and bounding boxes.
        #[arg(long)]
        detailed: bool,
        /// Include the audit trail.
        #[arg(long)]
        audit_trail: bool,
    },

    /// Search processed documents.
    Search(SearchArgs),

    /// Correct fields of a processed document.
    Update(UpdateArgs),

    /// Delete a processed document.
    Delete { document_id: i64 },

    /// Manage the line items of a document.
    #[command(subcommand)]
    LineItems(LineItemCommand),

    /// Manage document and account tags.
    #[command(subcommand)]
    Tags(TagCommand),
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Local file path or HTTP/HTTPS URL.
    input: String,

    /// Include confidence scores and bounding boxes.
    #[arg(long)]
    detailed: bool,

    /// File name reported to Veryfi (defaults to the path's file name).
    #[arg(long)]
    file_name: Option<String>,

    /// Comma-separated categories to choose from.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Comma-separated tags to attach.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    #[arg(long)]
    external_id: Option<String>,

    /// Only process the first N pages.
    #[arg(long)]
    max_pages: Option<u32>,

    /// Skip enrichment for a faster answer.
    #[arg(long)]
    boost: bool,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text query.
    #[arg(long)]
    q: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    #[arg(long)]
    external_id: Option<String>,
    #[arg(long)]
    created_gt: Option<String>,
    #[arg(long)]
    created_lt: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
    /// Include confidence scores and bounding boxes.
    #[arg(long)]
    detailed: bool,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    document_id: i64,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    invoice_number: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    currency_code: Option<String>,
    #[arg(long)]
    external_id: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    total: Option<f64>,
    #[arg(long)]
    vendor_name: Option<String>,
    #[arg(long)]
    vendor_address: Option<String>,
}

#[derive(Subcommand, Debug)]
enum LineItemCommand {
    /// List the line items of a document.
    List { document_id: i64 },
    /// Add a line item.
    Add {
        document_id: i64,
        #[command(flatten)]
        item: LineItemArgs,
    },
    /// Fetch one line item.
    Get { document_id: i64, line_item_id: i64 },
    /// Change a line item.
    Update {
        document_id: i64,
        line_item_id: i64,
        #[command(flatten)]
        item: LineItemArgs,
    },
    /// Delete a line item.
    Delete { document_id: i64, line_item_id: i64 },
}

#[derive(Args, Debug)]
struct LineItemArgs {
    #[arg(long)]
    order: Option<u32>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    total: Option<f64>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    quantity: Option<f64>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    /// List the tags of a document.
    List { document_id: i64 },
    /// Attach a tag to a document.
    Add { document_id: i64, name: String },
    /// Detach a tag from a document.
    Delete { document_id: i64, tag_id: i64 },
    /// List every tag of the account.
    Global,
    /// Delete a tag from the account.
    DeleteGlobal { tag_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let client = ClientV8::new(build_options(&cli)?).context("Invalid configuration")?;

    match &cli.command {
        Command::Process(args) => process(&cli, &client, args).await,
        Command::Get {
            document_id,
            detailed,
            audit_trail,
        } => {
            let opts = DocumentGetOptions {
                return_audit_trail: *audit_trail,
                ..Default::default()
            };
            if *detailed {
                let doc = client
                    .get_detailed_document(*document_id, &opts)
                    .await
                    .context("Failed to get document")?;
                print_json(&doc)
            } else {
                let doc = client
                    .get_document(*document_id, &opts)
                    .await
                    .context("Failed to get document")?;
                print_document(&cli, &doc)
            }
        }
        Command::Search(args) => search(&cli, &client, args).await,
        Command::Update(args) => {
            let doc = client
                .update_document(args.document_id, &update_options(args))
                .await
                .context("Failed to update document")?;
            print_document(&cli, &doc)
        }
        Command::Delete { document_id } => {
            client
                .delete_document(*document_id)
                .await
                .context("Failed to delete document")?;
            done(&cli, &format!("Deleted document {document_id}"));
            Ok(())
        }
        Command::LineItems(cmd) => line_items(&cli, &client, cmd).await,
        Command::Tags(cmd) => tags(&cli, &client, cmd).await,
    }
}

/// Map CLI args to `Options`. Unset credentials fail at client construction.
fn build_options(cli: &Cli) -> Result<Options> {
    let c = &cli.credentials;
    let mut builder = Options::builder()
        .client_id(c.client_id.clone().unwrap_or_default())
        .client_secret(c.client_secret.clone().unwrap_or_default())
        .username(c.username.clone().unwrap_or_default())
        .api_key(c.api_key.clone().unwrap_or_default())
        .timeout(Duration::from_secs(cli.timeout))
        .retry_count(cli.retries);
    if let Some(ref host) = c.environment_url {
        builder = builder.environment_url(host.clone());
    }
    builder
        .build()
        .context("Missing credentials: set VERYFI_CLIENT_ID, VERYFI_USERNAME and VERYFI_API_KEY")
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn shared_options(args: &ProcessArgs) -> DocumentSharedOptions {
    DocumentSharedOptions {
        file_name: args.file_name.clone().unwrap_or_default(),
        categories: args.categories.clone(),
        tags: args.tags.clone(),
        max_pages_to_process: args.max_pages.unwrap_or_default(),
        boost_mode: args.boost,
        external_id: args.external_id.clone().unwrap_or_default(),
        ..Default::default()
    }
}

async fn process(cli: &Cli, client: &ClientV8, args: &ProcessArgs) -> Result<()> {
    let spinner = spinner(cli, &args.input);
    let shared = shared_options(args);

    let result = if is_url(&args.input) {
        let opts = DocumentUrlOptions {
            file_url: args.input.clone(),
            shared,
            ..Default::default()
        };
        if args.detailed {
            client
                .process_detailed_document_url(&opts)
                .await
                .map(serde_json::to_value)
        } else {
            client
                .process_document_url(&opts)
                .await
                .map(serde_json::to_value)
        }
    } else {
        let opts = DocumentUploadOptions {
            file_path: PathBuf::from(&args.input),
            shared,
        };
        if args.detailed {
            client
                .process_detailed_document_upload(&opts)
                .await
                .map(serde_json::to_value)
        } else {
            client
                .process_document_upload(&opts)
                .await
                .map(serde_json::to_value)
        }
    };

    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let value = result
        .with_context(|| format!("Failed to process {}", args.input))?
        .context("Failed to serialise response")?;

    if args.detailed || cli.json {
        return print_json(&value);
    }
    let doc: veryfi::scheme::v8::Document =
        serde_json::from_value(value).context("Failed to read response")?;
    print_document(cli, &doc)
}

async fn search(cli: &Cli, client: &ClientV8, args: &SearchArgs) -> Result<()> {
    let opts = DocumentSearchOptions {
        q: args.q.clone().unwrap_or_default(),
        tag: args.tag.clone().unwrap_or_default(),
        external_id: args.external_id.clone().unwrap_or_default(),
        created_gt: args.created_gt.clone().unwrap_or_default(),
        created_lt: args.created_lt.clone().unwrap_or_default(),
        page: args.page.unwrap_or_default(),
        page_size: args.page_size.unwrap_or_default(),
        ..Default::default()
    };
    if args.detailed {
        let found = client
            .search_detailed_documents(&opts)
            .await
            .context("Search failed")?;
        return print_json(&found);
    }

    let found = client.search_documents(&opts).await.context("Search failed")?;
    if cli.json {
        return print_json(&found);
    }
    for doc in &found.documents {
        println!(
            "{:>10}  {:<10}  {:<30}  {:>10} {}",
            doc.id, doc.date, doc.vendor.name, doc.total, doc.currency_code
        );
    }
    if let Some(total) = found.meta.total_found {
        done(cli, &format!("{total} document(s) found"));
    }
    Ok(())
}

fn update_options(args: &UpdateArgs) -> DocumentUpdateOptions {
    DocumentUpdateOptions {
        date: args.date.clone().unwrap_or_default(),
        invoice_number: args.invoice_number.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        currency_code: args.currency_code.clone().unwrap_or_default(),
        external_id: args.external_id.clone().unwrap_or_default(),
        notes: args.notes.clone().unwrap_or_default(),
        total: args.total.unwrap_or_default(),
        vendor: VendorUpdateOptions {
            name: args.vendor_name.clone().unwrap_or_default(),
            address: args.vendor_address.clone().unwrap_or_default(),
        },
        ..Default::default()
    }
}

fn line_item_options(args: &LineItemArgs) -> LineItemOptions {
    LineItemOptions {
        order: args.order.unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        total: args.total.unwrap_or_default(),
        price: args.price.unwrap_or_default(),
        quantity: args.quantity.unwrap_or_default(),
        sku: args.sku.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        ..Default::default()
    }
}

async fn line_items(cli: &Cli, client: &ClientV8, cmd: &LineItemCommand) -> Result<()> {
    match cmd {
        LineItemCommand::List { document_id } => {
            let items = client
                .get_line_items(*document_id)
                .await
                .context("Failed to list line items")?;
            print_json(&items)
        }
        LineItemCommand::Add { document_id, item } => {
            let added = client
                .add_line_item(*document_id, &line_item_options(item))
                .await
                .context("Failed to add line item")?;
            print_json(&added)
        }
        LineItemCommand::Get {
            document_id,
            line_item_id,
        } => {
            let item = client
                .get_line_item(*document_id, *line_item_id)
                .await
                .context("Failed to get line item")?;
            print_json(&item)
        }
        LineItemCommand::Update {
            document_id,
            line_item_id,
            item,
        } => {
            let updated = client
                .update_line_item(*document_id, *line_item_id, &line_item_options(item))
                .await
                .context("Failed to update line item")?;
            print_json(&updated)
        }
        LineItemCommand::Delete {
            document_id,
            line_item_id,
        } => {
            client
                .delete_line_item(*document_id, *line_item_id)
                .await
                .context("Failed to delete line item")?;
            done(cli, &format!("Deleted line item {line_item_id}"));
            Ok(())
        }
    }
}

async fn tags(cli: &Cli, client: &ClientV8, cmd: &TagCommand) -> Result<()> {
    match cmd {
        TagCommand::List { document_id } => {
            let tags = client
                .get_tags(*document_id)
                .await
                .context("Failed to list tags")?;
            print_json(&tags)
        }
        TagCommand::Add { document_id, name } => {
            let tag = client
                .add_tag(*document_id, &TagOptions { name: name.clone() })
                .await
                .context("Failed to add tag")?;
            print_json(&tag)
        }
        TagCommand::Delete {
            document_id,
            tag_id,
        } => {
            client
                .delete_tag(*document_id, *tag_id)
                .await
                .context("Failed to delete tag")?;
            done(cli, &format!("Removed tag {tag_id} from document {document_id}"));
            Ok(())
        }
        TagCommand::Global => {
            let tags = client
                .get_global_tags()
                .await
                .context("Failed to list tags")?;
            print_json(&tags)
        }
        TagCommand::DeleteGlobal { tag_id } => {
            client
                .delete_global_tag(*tag_id)
                .await
                .context("Failed to delete tag")?;
            done(cli, &format!("Deleted tag {tag_id}"));
            Ok(())
        }
    }
}

// ── Output ───────────────────────────────────────────────────────────────

fn spinner(cli: &Cli, input: &str) -> Option<ProgressBar> {
    if cli.quiet || cli.json || cli.verbose {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Processing");
    bar.set_message(input.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise output")?;
    println!("{json}");
    Ok(())
}

fn print_document(cli: &Cli, doc: &veryfi::scheme::v8::Document) -> Result<()> {
    if cli.json {
        return print_json(doc);
    }
    println!("{}  {}", bold(&format!("#{}", doc.id)), doc.vendor.name);
    println!("Date:         {}", doc.date);
    if !doc.invoice_number.is_empty() {
        println!("Invoice:      {}", doc.invoice_number);
    }
    println!("Subtotal:     {}", doc.subtotal);
    println!("Tax:          {}", doc.tax);
    println!("Total:        {} {}", doc.total, doc.currency_code);
    for item in &doc.line_items {
        println!(
            "  {:<40} {:>10}",
            item.description,
            dim(&item.total.to_string())
        );
    }
    Ok(())
}

fn done(cli: &Cli, message: &str) {
    if !cli.quiet && !cli.json {
        eprintln!("{} {}", green("✔"), message);
    }
}
