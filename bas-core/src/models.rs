mod bid;
mod config;
mod map;
mod outcome;
mod resource;
mod snapshot;

pub use bid::Bid;
pub use config::{ClearingConfig, DEFAULT_ALPHA, PricingPolicy};
pub use map::Map;
pub use outcome::{ApplyInstructions, ClearingOutcome, Winner};
pub use resource::Resource;
pub use snapshot::ClearingSnapshot;

macro_rules! id_wrapper {
    ($struct: ident) => {
        /// An integer id newtype.
        ///
        /// The store assigns these from its rowid sequence; wrapping them
        /// keeps the various id spaces from being used interchangeably.
        #[derive(
            Debug,
            Hash,
            PartialEq,
            Eq,
            Clone,
            Copy,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $struct(pub i64);

        impl From<i64> for $struct {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for i64 {
            fn from(value: $struct) -> i64 {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_wrapper!(ProviderId);
id_wrapper!(ResourceId);
id_wrapper!(CustomerId);
id_wrapper!(BidId);
