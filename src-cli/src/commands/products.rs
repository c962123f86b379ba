//! Product commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use cmsadmin::models::ProductField;
use cmsadmin::AdminApp;

use super::{login, logout, CliError, Credentials, Result};

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products
    List,
    /// Edit one product, upload its images and save the product list
    Save(SaveArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// 1-based row of the product; omit with --new
    #[arg(long, required_unless_present = "new")]
    pub index: Option<usize>,

    /// Append a new product instead of editing one
    #[arg(long, conflicts_with = "index")]
    pub new: bool,

    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,

    /// Local image for slot 1
    #[arg(long)]
    pub image1: Option<PathBuf>,
    /// Local image for slot 2
    #[arg(long)]
    pub image2: Option<PathBuf>,

    #[command(flatten)]
    pub credentials: Credentials,
}

pub async fn run(app: &mut AdminApp, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List => {
            app.refresh_all().await?;
            for (i, product) in app.products.records().iter().enumerate() {
                println!("{:>3}. {} [{}]", i + 1, product.name, product.category);
                for url in &product.image_urls {
                    println!("       {}", url);
                }
            }
            Ok(())
        }
        ProductsCommand::Save(args) => save(app, args).await,
    }
}

async fn save(app: &mut AdminApp, args: SaveArgs) -> Result<()> {
    app.refresh_all().await?;

    if args.new {
        app.add_product();
    } else {
        let row = args
            .index
            .filter(|row| *row >= 1)
            .ok_or_else(|| CliError::Usage("--index is 1-based".to_string()))?;
        app.products.select(row - 1)?;
    }

    if let Some(category) = &args.category {
        let known = &app.settings().products.categories;
        if !known.contains(category) {
            log::warn!("Category '{}' is not one of {:?}", category, known);
        }
    }
    for (field, value) in [
        (ProductField::Name, &args.name),
        (ProductField::Category, &args.category),
        (ProductField::Description, &args.description),
    ] {
        if let Some(value) = value {
            app.products.set_field(field, value);
        }
    }
    if let Some(path) = args.image1 {
        app.image_slots_mut().set(1, path)?;
    }
    if let Some(path) = args.image2 {
        app.image_slots_mut().set(2, path)?;
    }

    let mut progress = app.subscribe_progress();
    login(app, &args.credentials).await?;
    let outcome = app.save_selected_product().await;
    logout(app).await;

    while let Ok(event) = progress.try_recv() {
        println!("[{}] {}", event.phase, event.message);
    }
    outcome?;
    Ok(())
}
