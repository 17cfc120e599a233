//! `toolscout` - command-line front end for the AI tool directory.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use toolscout_auth::{Credentials, Role};
use toolscout_client::{CatalogService, ClientConfig, ComparisonState, DEFAULT_TRENDING_LIMIT};
use toolscout_core::ProductId;
use toolscout_observability::LogFormat;
use toolscout_products::{FilterOptions, Product, SortKey, category_slug, price_label};

#[derive(Parser, Debug)]
#[command(name = "toolscout")]
#[command(about = "Browse, search and compare AI tools")]
#[command(version)]
struct Cli {
    /// Directory API base URL
    #[arg(long, global = true, env = "TOOLSCOUT_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products
    List {
        #[arg(long)]
        category: Option<String>,
        /// Tag filter; repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one product and related products
    Show { id: String },
    /// Most popular products
    Trending {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = DEFAULT_TRENDING_LIMIT)]
        limit: usize,
    },
    /// Free-text search
    Search { query: String },
    /// Search suggestions for a partial query
    Suggest { query: String },
    /// Compare two or three products side by side
    Compare {
        #[arg(required = true, num_args = 2..=3)]
        ids: Vec<String>,
    },
    /// Statistics for a category slug
    Category { slug: String },
    /// Log in and print the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TOOLSCOUT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and print the session
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TOOLSCOUT_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "user")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    toolscout_observability::init_with(LogFormat::Pretty, default_filter);

    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url).context("invalid --api-url")?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(api_url = %config.api_url(), "using directory API");

    let catalog = CatalogService::http(config).context("failed to build HTTP client")?;
    let json = cli.json;

    match cli.command {
        Command::List { category, tags, sort, search, page, limit } => {
            let options = FilterOptions {
                category,
                tags,
                sort,
                search,
                page,
                limit,
            };
            let products = catalog.list_products(&options).await;
            print_products(&products, json)?;
        }
        Command::Show { id } => {
            let id = ProductId::new(id)?;
            let product = catalog.get_product(&id).await?;
            let related = catalog.related_products(&product).await;
            if json {
                print_json(&serde_json::json!({ "product": product, "related": related }))?;
            } else {
                print_detail(&product);
                if !related.is_empty() {
                    println!("\nRelated:");
                    print_products(&related, false)?;
                }
            }
        }
        Command::Trending { category, limit } => {
            let products = catalog.list_trending(category.as_deref(), limit).await;
            print_products(&products, json)?;
        }
        Command::Search { query } => {
            let products = catalog.search_products(&query).await;
            print_products(&products, json)?;
        }
        Command::Suggest { query } => {
            let suggestions = catalog.search_suggestions(&query).await;
            if json {
                print_json(&suggestions)?;
            } else {
                suggestions.iter().for_each(|s| println!("{s}"));
            }
        }
        Command::Compare { ids } => {
            let state = ComparisonState::new(catalog.clone());
            for id in ids {
                let id = ProductId::new(id)?;
                if !state.add(id.clone()) {
                    bail!("cannot add {id} to the comparison");
                }
            }
            state.compare().await?;

            let snapshot = state.snapshot();
            if json {
                print_json(&snapshot.compared)?;
            } else {
                for row in snapshot.rows() {
                    println!("{:<10} {}", row.label, row.cells.join(" | "));
                }
            }
        }
        Command::Category { slug } => {
            let stats = catalog.category_stats(&slug).await;
            let slug = category_slug(&slug);
            if json {
                print_json(&stats)?;
            } else {
                println!(
                    "{slug}: {} products, {} reviews, average rating {}",
                    stats.product_count,
                    stats.total_reviews,
                    stats.rating_label()
                );
            }
        }
        Command::Login { email, password } => {
            let session = catalog.login(&Credentials::new(email, password)).await?;
            print_json(&session)?;
        }
        Command::Register { email, password, role } => {
            let session = catalog
                .register(&Credentials::new(email, password), &Role::new(role))
                .await?;
            print_json(&session)?;
        }
    }

    let connectivity = catalog.offline_mode().await;
    if connectivity.is_offline() {
        tracing::warn!(
            degraded_responses = connectivity.degraded_responses(),
            "directory API unavailable; results come from sample data"
        );
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_products(products: &[Product], json: bool) -> Result<()> {
    if json {
        return print_json(products);
    }
    if products.is_empty() {
        println!("No products found.");
    }
    for product in products {
        println!(
            "{:<6} {:<24} {:>6}  {:.1}*  {}",
            product.id.as_str(),
            product.name,
            price_label(product.price),
            product.average_rating(),
            product.categories.join(", ")
        );
    }
    Ok(())
}

fn print_detail(product: &Product) {
    println!("{} ({})", product.name, product.id);
    println!("{}", product.description);
    println!(
        "Price: {}  Rating: {:.1} ({} reviews)  Popularity: {}",
        price_label(product.price),
        product.average_rating(),
        product.reviews.len(),
        product.popularity
    );
    if !product.categories.is_empty() {
        println!("Categories: {}", product.categories.join(", "));
    }
    if !product.tags.is_empty() {
        println!("Tags: {}", product.tags.join(", "));
    }
    for feature in &product.features {
        println!("  - {}: {}", feature.name, feature.description);
    }
    if let Some(link) = &product.purchase_link {
        println!("Get it: {link}");
    }
}
