use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use quoter::api::{self, ApiContext};
use quoter::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use quoter::models::{AppState, ProductCategory, QuoteFile, QuoteLine, ValidationErrors};
use quoter::pricing::{resolve_country_currency, resolve_tier_currency, resolve_unit_price, CurrencyTracker, QuoteSummary};
use quoter::routes;
use quoter::services::{self, Workload};
use quoter::utils::format_money;
use quoter::wizard::CalculatorStep;

fn build_api_context() -> ApiContext {
    let client = match ApiContext::build_client(config::get_request_timeout_secs()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    };
    ApiContext::new(client, config::get_api_base_url(), config::get_api_token())
}

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    AppState::new(
        build_api_context(),
        &config::get_default_currency(),
        &config::get_default_country(),
        config::get_invoice_output_dir(),
    )
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = routes::build_router(state);
    tracing::info!(%addr, "Starting quoter web console");
    println!(
        "{} {}",
        yansi::Paint::new("Calculator running on").green(),
        yansi::Paint::new(format!("http://{}/summary", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    tracing::error!(%err, "{}", context);
    eprintln!("{}: {}", yansi::Paint::red(context), err);
    process::exit(1);
}

fn print_validation(prefix: &str, errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        let path = if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };
        eprintln!("  {} {}: {}", yansi::Paint::red("✗"), yansi::Paint::new(path).bold(), message);
    }
}

fn print_lines(title: &str, lines: &[QuoteLine], fallback_currency: &str) {
    if lines.is_empty() {
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Item", "Region", "Qty", "Term", "Unit price", "Total"]);
    for line in lines {
        let currency = line.currency.as_deref().unwrap_or(fallback_currency);
        table.add_row(vec![
            line.name.clone(),
            line.region.clone(),
            format!("{}", line.quantity),
            format!("{} mo", line.term_months),
            format_money(line.unit_price, currency),
            format_money(line.total, currency),
        ]);
    }
    println!("\n{}", yansi::Paint::new(title).bold().underline());
    println!("{table}");
}

fn print_summary(summary: &QuoteSummary) {
    let currency = summary.currency.as_str();
    print_lines("Compute", &summary.compute_lines, currency);
    print_lines("Object storage", &summary.storage_lines, currency);

    let mut totals = new_table();
    totals.set_header(vec!["", currency]);
    if let Some(pre) = summary.pre_discount_subtotal {
        totals.add_row(vec!["Subtotal before discount".to_string(), format_money(pre, currency)]);
    }
    totals.add_row(vec!["Subtotal".to_string(), format_money(summary.subtotal, currency)]);
    if summary.discount > 0.0 {
        let label = summary.discount_label.clone().unwrap_or_else(|| "Discount".to_string());
        totals.add_row(vec![label, format_money(-summary.discount, currency)]);
    }
    totals.add_row(vec!["Tax".to_string(), format_money(summary.tax, currency)]);
    totals.add_row(vec!["Total".to_string(), format_money(summary.total, currency)]);
    println!("\n{totals}");
    if summary.estimated {
        println!(
            "{}",
            yansi::Paint::new("Backend pricing was unavailable; figures are a local estimate without tax or discount.").yellow()
        );
    }
    println!();
}

fn advance(step: CalculatorStep, has_items: bool) -> CalculatorStep {
    match step.next(has_items) {
        Some(next) => {
            tracing::info!(from = %step, to = %next, "calculator step");
            next
        }
        None => fail("Cannot leave the current step", step),
    }
}

async fn run_quote(file: PathBuf, submit: bool, out_dir: Option<PathBuf>, json: bool, env_file: Option<&str>) {
    // Stdout carries only the summary document in JSON mode.
    if json {
        api::set_silent(true);
    }
    config::load_env_file(env_file);
    let ctx = build_api_context();

    let text = match tokio::fs::read_to_string(&file).await {
        Ok(t) => t,
        Err(e) => fail(&format!("Failed to read {}", file.display()), e),
    };
    let quote = match QuoteFile::parse(&text) {
        Ok(q) => q,
        Err(e) => fail(&format!("Invalid quote file {}", file.display()), e),
    };

    let mut step = CalculatorStep::Config;
    let initial_currency = quote.currency.clone().unwrap_or_else(config::get_default_currency);
    let mut tracker = CurrencyTracker::new(&initial_currency);
    let country = quote.country_code.clone().unwrap_or_else(config::get_default_country);
    if !country.trim().is_empty() {
        let countries = match api::load_countries(&ctx).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(%e, "country list unavailable; keeping the configured currency");
                Vec::new()
            }
        };
        tracker.select_country(&country, &countries);
    }
    let country = tracker.country().unwrap_or_default().to_string();
    let currency = tracker.currency().to_string();

    if let Some(discount) = &quote.discount {
        if let Err(errors) = discount.validate() {
            eprintln!("{}", yansi::Paint::red("Invalid discount"));
            print_validation("", &errors);
            process::exit(1);
        }
    }

    let mut workload = Workload::default();
    let mut invalid = false;
    for (i, draft) in quote.workloads.iter().enumerate() {
        if let Err(errors) = workload.add_item(draft) {
            print_validation(&format!("workloads.{}", i), &errors);
            invalid = true;
        }
    }
    if invalid {
        eprintln!("{}", yansi::Paint::red("Quote file has invalid workloads"));
        process::exit(1);
    }

    if !quote.storage.is_empty() {
        let pb = spinner("Resolving object storage tiers");
        for (i, draft) in quote.storage.iter().enumerate() {
            match services::resolve_storage_item(&ctx, draft, &country, &currency).await {
                Ok(item) => {
                    workload.add_storage(item);
                }
                Err(quoter::CalculatorError::Validation(errors)) => {
                    pb.finish_and_clear();
                    print_validation(&format!("storage.{}", i), &errors);
                    process::exit(1);
                }
                Err(e) => {
                    pb.finish_and_clear();
                    fail(&format!("Storage item {} could not be priced", i), e);
                }
            }
        }
        pb.finish_and_clear();
    }

    step = advance(step, !workload.is_empty());
    let pb = spinner("Pricing workload");
    let summary = services::price_workload(&ctx, &workload, &country, &currency, quote.discount.as_ref()).await;
    pb.finish_and_clear();

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => fail("Failed to encode summary", e),
        }
    } else {
        print_summary(&summary);
    }

    if !submit {
        return;
    }
    let Some(submission) = quote.submission.as_ref() else {
        fail("Cannot submit", "the quote file has no `submission` block");
    };
    step = advance(step, true);

    let pb = spinner("Submitting quote");
    let result = services::submit(&ctx, &workload, &country, submission, quote.discount.as_ref()).await;
    pb.finish_and_clear();
    let response = match result {
        Ok(r) => r,
        Err(quoter::CalculatorError::Validation(errors)) => {
            eprintln!("{}", yansi::Paint::red("Submission details are incomplete"));
            print_validation("submission", &errors);
            process::exit(1);
        }
        Err(e) => fail("Submission failed", e),
    };

    let dir = out_dir.unwrap_or_else(config::get_invoice_output_dir);
    let saved = match services::save_invoices(&response, &dir).await {
        Ok(paths) => paths,
        Err(e) => fail("Failed to save invoices", e),
    };
    step = advance(step, true);
    tracing::debug!(%step, "quote finished");

    let report = |line: String| if json { eprintln!("{line}") } else { println!("{line}") };
    for path in &saved {
        report(format!("{} {}", yansi::Paint::new("Saved invoice").green(), yansi::Paint::new(path.display()).cyan()));
    }
    if response.lead.is_some() || !submission.generates_invoice() {
        report(yansi::Paint::new("Lead created").green().to_string());
    }
    if let Some(message) = &response.message {
        report(message.clone());
    }
}

#[derive(Parser)]
#[command(
    name = "quoter",
    author,
    version,
    about = "Infrastructure pricing calculator",
    long_about = r#"quoter prices compute, add-on and object-storage workloads against the pricing backend.

It can run as a small web console with a JSON API, or price a workload described in a JSON file straight from the terminal and optionally request invoices or a sales lead for it. Use `--env-file` or environment variables to provide API_BASE_URL and API_TOKEN.

Examples:
  1) Run the web console:
      quoter serve --host 127.0.0.1 --port 8080
  2) Price a workload file:
      quoter quote workload.json
  3) Price it and generate invoices:
      quoter quote workload.json --submit --out-dir invoices/
"#,
    after_help = "Use `quoter <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(
        about = "Validate configuration and ensure API connectivity.",
        long_about = "Validate the environment variables quoter reads, then confirm the backend answers by fetching the region list."
    )]
    CheckConfig,
    /// List active regions
    Regions,
    /// List billing countries and their currencies
    Countries,
    /// Show priced options for a region and category
    #[command(
        about = "Show priced options for a region and product category",
        long_about = "Categories: compute_instance, os_image, volume_type, bandwidth, ip, cross_connect, object_storage_configuration."
    )]
    Prices {
        /// Region code or id
        #[arg(long)]
        region: String,
        /// Product category
        #[arg(long)]
        category: String,
        /// Billing country (ISO-2); defaults to DEFAULT_COUNTRY
        #[arg(long)]
        country: Option<String>,
    },
    /// Show which currency a billing country prices in
    Currency { country: String },
    /// Price a workload file and optionally submit it
    #[command(
        about = "Price a workload described in a JSON file",
        long_about = "Reads {country_code, currency, workloads, storage, discount, submission} from a JSON file, prints the summary, and with --submit sends the quote and saves any invoice PDFs."
    )]
    Quote {
        file: PathBuf,
        /// Submit the quote using the file's `submission` block
        #[arg(long)]
        submit: bool,
        /// Directory for invoice PDFs; defaults to INVOICE_OUTPUT_DIR
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    let env_file = cli.env_file.as_deref();
    let Some(command) = cli.command else {
        let state = build_state_from_env(env_file);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT).await;
        return;
    };

    match command {
        Commands::Serve { host, port } => {
            let state = build_state_from_env(env_file);
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig => {
            config::load_env_file(env_file);
            let mut ok = true;
            if std::env::var("API_BASE_URL").map(|v| v.trim().is_empty()).unwrap_or(true) {
                eprintln!(
                    "{} {}",
                    yansi::Paint::new("API_BASE_URL is not configured; using").yellow(),
                    config::get_api_base_url()
                );
            }
            if config::get_api_token().is_empty() {
                eprintln!("{}", yansi::Paint::new("API_TOKEN is not configured").red());
                ok = false;
            }
            if !ok {
                process::exit(1);
            }
            let ctx = build_api_context();
            match api::load_regions(&ctx).await {
                Ok(regions) => {
                    println!(
                        "{} ({} active regions)",
                        yansi::Paint::new("Configuration looks valid").green(),
                        regions.len()
                    );
                }
                Err(e) => fail("Configuration appears invalid", e),
            }
        }
        Commands::Regions => {
            config::load_env_file(env_file);
            let ctx = build_api_context();
            let regions = match api::load_regions(&ctx).await {
                Ok(r) => r,
                Err(e) => fail("Failed to load regions", e),
            };
            if regions.is_empty() {
                println!("(empty list)");
                return;
            }
            let mut table = new_table();
            table.set_header(vec!["ID", "Code", "Name", "Country"]);
            for r in &regions {
                table.add_row(vec![
                    r.id.clone().unwrap_or_default(),
                    r.code.clone().unwrap_or_default(),
                    r.name.clone(),
                    r.country.clone().unwrap_or_default(),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::Countries => {
            config::load_env_file(env_file);
            let ctx = build_api_context();
            let countries = match api::load_countries(&ctx).await {
                Ok(c) => c,
                Err(e) => fail("Failed to load countries", e),
            };
            let fallback = config::get_default_currency();
            let mut table = new_table();
            table.set_header(vec!["Code", "Name", "Currency"]);
            for c in &countries {
                table.add_row(vec![
                    c.display_code(),
                    c.name.clone().unwrap_or_default(),
                    c.currency_hint().unwrap_or_else(|| format!("{} (default)", fallback)),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::Prices { region, category, country } => {
            config::load_env_file(env_file);
            let Some(category) = ProductCategory::from_str(&category) else {
                let known: Vec<&str> = ProductCategory::all().iter().map(|c| c.as_str()).collect();
                fail("Unknown category", format!("{} (expected one of: {})", category, known.join(", ")));
            };
            let country = country.unwrap_or_else(config::get_default_country);
            let default_currency = config::get_default_currency();
            let ctx = build_api_context();
            let options = match api::load_price_options(&ctx, &region, category, &country).await {
                Ok(o) => o,
                Err(e) => fail("Failed to load prices", e),
            };
            if options.is_empty() {
                println!("(no {} options in {})", category.label(), region);
                return;
            }
            let mut table = new_table();
            table.set_header(vec!["ID", "Name", "Unit price"]);
            for option in &options {
                let currency = resolve_tier_currency(option, Some(&default_currency));
                table.add_row(vec![
                    option.id.clone().unwrap_or_default(),
                    option.display_name(),
                    format_money(resolve_unit_price(option), &currency),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::Currency { country } => {
            config::load_env_file(env_file);
            let ctx = build_api_context();
            let countries = match api::load_countries(&ctx).await {
                Ok(c) => c,
                Err(e) => fail("Failed to load countries", e),
            };
            let default_currency = config::get_default_currency();
            let currency = resolve_country_currency(&country, &countries, Some(&default_currency));
            println!("{} {}", yansi::Paint::new(country.trim().to_uppercase()).bold(), yansi::Paint::new(currency).cyan());
        }
        Commands::Quote { file, submit, out_dir, json } => {
            run_quote(file, submit, out_dir, json, env_file).await;
        }
    }
}
