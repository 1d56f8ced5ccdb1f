use bas_core::{
    models::{ProviderId, ResourceId},
    ports::{BidRepository as _, ResourceRepository as _},
};
use bas_sqlite::{Database, Storage};
use clap::Parser;
use std::path::PathBuf;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod render;

// The top-level arguments: the database location and which subcommand to run
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to the auction database
    #[arg(long, env = "BAS_DB", default_value = "auction.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        // The snapshot solve is pure and never opens a database.
        let command = match self.command {
            Commands::Solve { io, pricing } => {
                return solve::run(&io, pricing.config());
            }
            command => command,
        };

        let db = Database::open(Storage::File(self.db))?;

        match command {
            Commands::AddProvider { name } => {
                let id = db.add_provider(&name)?;
                println!("provider {name:?} added with id {id}");
            }
            Commands::AddResource {
                provider,
                name,
                capacity,
                base_price,
            } => {
                let id = db.add_resource(ProviderId(provider), &name, capacity, base_price)?;
                println!("resource {name:?} added with id {id}");
            }
            Commands::UpdateResource {
                id,
                capacity,
                base_price,
            } => {
                if db.update_resource(ResourceId(id), capacity, base_price)? {
                    println!("resource {id} updated");
                } else {
                    anyhow::bail!("no resource with id {id}");
                }
            }
            Commands::AddCustomer { name } => {
                let id = db.add_customer(&name)?;
                println!("customer {name:?} added with id {id}");
            }
            Commands::AddBid {
                customer,
                price,
                bundle,
            } => {
                let bundle: Vec<ResourceId> = bundle.into_iter().map(ResourceId).collect();
                let id = db.add_bid(&customer, price, &bundle)?;
                println!("bid {id} by {customer:?} added");
            }
            Commands::Resources => {
                let resources = db.resources()?;
                let providers = db.providers()?;
                print!("{}", render::resource_table(&resources, &providers));
            }
            Commands::Bids => {
                let bids = db.bids()?;
                print!("{}", render::bid_table(&bids));
            }
            Commands::Customers => {
                for (id, name) in db.customers()? {
                    println!("{id}: {name}");
                }
            }
            Commands::ClearBids => {
                db.clear_bids()?;
                println!("all bids cleared");
            }
            Commands::Reset => {
                db.clear_all()?;
                println!("all data cleared");
            }
            Commands::Clear { pricing, purge } => {
                clear::run(&db, pricing.config(), purge)?;
            }
            // Handled above, before the database is opened
            Commands::Solve { .. } => unreachable!(),
        }

        Ok(())
    }
}
