use super::IOArgs;
use clap::Subcommand;

pub(crate) mod clear;
pub(crate) mod solve;

pub use clear::PricingArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Register a service provider
    AddProvider {
        /// The provider's display name
        name: String,
    },

    /// Register a resource offered by a provider
    AddResource {
        /// The id of the provider offering this resource
        #[arg(short, long)]
        provider: i64,

        /// The resource's display name
        name: String,

        /// Units available
        capacity: u32,

        /// Posted price per unit
        #[arg(default_value_t = 10.0)]
        base_price: f64,
    },

    /// Replace a resource's capacity and base price
    UpdateResource {
        /// The resource to update
        id: i64,

        /// The new capacity
        capacity: u32,

        /// The new base price
        base_price: f64,
    },

    /// Register a customer
    AddCustomer {
        /// The customer's display name
        name: String,
    },

    /// Submit a sealed bundle bid
    AddBid {
        /// The bidding customer's name
        #[arg(short, long)]
        customer: String,

        /// The all-or-nothing price offered for the bundle
        #[arg(short, long)]
        price: f64,

        /// Comma-separated resource ids, one unit each
        #[arg(short, long, value_delimiter = ',', required = true)]
        bundle: Vec<i64>,
    },

    /// List resources and their remaining capacities
    Resources,

    /// List outstanding bids
    Bids,

    /// List customers
    Customers,

    /// Remove every outstanding bid
    ClearBids,

    /// Remove all providers, resources, customers, and bids
    Reset,

    /// Run the auction against the database and apply the result
    Clear {
        #[command(flatten)]
        pricing: PricingArgs,

        /// Also remove the winning bids from the bid list
        #[arg(long)]
        purge: bool,
    },

    /// Clear a JSON snapshot and report the outcome, touching no database
    Solve {
        #[command(flatten)]
        io: IOArgs,

        #[command(flatten)]
        pricing: PricingArgs,
    },
}
