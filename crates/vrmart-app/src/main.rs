//! vrmart - VR asset marketplace - Entry Point
//!
//! Browsing and publishing run against the seeded in-memory catalog;
//! account commands go through the configured ledger.

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::info;
use vrmart_app::views::{DetailView, UploadCandidate};
use vrmart_app::{AppConfig, Application};
use vrmart_core::{e8s_to_icp, icp_to_e8s, Category, E8s, Icp, ItemId};
use vrmart_telemetry::Metrics;

/// VR asset marketplace
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via VRMART_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog items
    List {
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        /// Category label, e.g. "Furniture" or "Object/Prop"
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show one catalog item
    Show { id: u64 },
    /// Publish a model
    Publish {
        #[arg(long)]
        file: String,
        /// File size in bytes
        #[arg(long)]
        size: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Category,
        /// Price in ICP
        #[arg(long)]
        price: String,
        /// Mint on the ledger instead of the local catalog
        #[arg(long)]
        remote: bool,
    },
    /// Log in through the identity provider
    Login,
    /// Log out and forget the persisted session
    Logout,
    /// List ledger assets
    Assets,
    /// Buy a ledger asset
    Buy { id: u64 },
    /// Like a ledger asset
    Like { id: u64 },
    /// Convert between ICP and e8s
    #[command(group(ArgGroup::new("amount").required(true).args(["icp", "e8s"])))]
    Convert {
        #[arg(long)]
        icp: Option<Icp>,
        #[arg(long)]
        e8s: Option<u64>,
    },
    /// Print Prometheus metrics for this run
    Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config path: CLI arg > VRMART_CONFIG env var > default
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?.with_env_overrides(),
        None => AppConfig::load()?,
    };

    vrmart_telemetry::init_logging_with(Some(&config.telemetry.log_level))?;
    info!("Starting vrmart v{}", env!("CARGO_PKG_VERSION"));

    let app = Application::new(config)?;
    run(&app, args.command).await
}

async fn run(app: &Application, command: Command) -> Result<()> {
    match command {
        Command::List { search, category } => {
            let mut view = app.catalog_view();
            if let Some(search) = search {
                view.set_search(search);
            }
            view.set_category(category);
            for row in view.rows() {
                println!(
                    "{:>3}  {:<32} {:<16} {:>10}  likes {:>5}  views {:>6}",
                    row.id.value(),
                    row.title,
                    row.category,
                    row.price,
                    row.likes,
                    row.views
                );
            }
        }
        Command::Show { id } => {
            let Some(view) = app.detail(ItemId(id)) else {
                bail!("Product Not Found");
            };
            let item = view.item();
            println!("{}", item.title);
            println!("  category: {}", item.category);
            println!("  price:    {}", item.price);
            println!("  likes:    {}", item.likes);
            println!("  views:    {}", item.views);
            if let Some(description) = &item.description {
                println!("  {description}");
            }
            println!("{}", serde_json::to_string_pretty(view.viewer())?);
        }
        Command::Publish {
            file,
            size,
            title,
            description,
            category,
            price,
            remote,
        } => {
            let mut form = app.create_form();
            form.attach_file(UploadCandidate::new(file, size))?;
            form.title = title;
            form.description = description;
            form.category = Some(category);
            form.price = price;

            if remote {
                app.start().await;
                let id = form.publish_remote(app.session()).await?;
                println!("Asset minted with id {id}");
            } else {
                let id = form.publish_local(app.catalog())?;
                println!("Asset published with id {id}");
            }
        }
        Command::Login => {
            app.start().await;
            if app.session().is_authenticated() || app.session().login().await {
                let principal = app.session().principal();
                println!(
                    "Logged in as {}",
                    principal.map(|p| p.to_string()).unwrap_or_default()
                );
            } else {
                bail!("Login failed");
            }
        }
        Command::Logout => {
            app.start().await;
            // also clears a persisted session that failed to restore
            app.session().logout().await;
            app.shutdown().await;
            println!("Logged out");
        }
        Command::Assets => {
            app.start().await;
            if !app.session().is_authenticated() {
                bail!("Not authenticated, run `vrmart login` first");
            }
            for asset in app.session().assets() {
                println!(
                    "{:>3}  {:<32} {:<16} {:>12}  by {}",
                    asset.id,
                    asset.title,
                    asset.category,
                    asset.price_icp().to_string(),
                    asset.creator
                );
            }
        }
        Command::Buy { id } => {
            app.start().await;
            let message = DetailView::buy(app.session(), id).await?;
            println!("{message}");
        }
        Command::Like { id } => {
            app.start().await;
            if app.session().like_asset(id).await {
                println!("Liked asset {id}");
            } else {
                println!("Asset {id} was not liked");
            }
        }
        Command::Convert { icp, e8s } => {
            if let Some(icp) = icp {
                println!("{}", icp_to_e8s(icp)?);
            } else if let Some(e8s) = e8s {
                println!("{}", e8s_to_icp(E8s(e8s)));
            }
        }
        Command::Metrics => {
            print!("{}", Metrics::gather_text()?);
        }
    }
    Ok(())
}
