use bas_core::models::{Bid, Map, ResourceId};

/// A winner pays the sum of cleared prices over its bundle, one unit each.
///
/// This is a uniform, cleared-price payment rule, not pay-as-bid: the
/// payment can land above or below the submitted price, and the mechanism
/// makes no individual-rationality promise. Payments are keyed per bid, so
/// two winning bids from the same customer each carry their own payment.
pub(crate) fn bundle_payment(bid: &Bid, cleared_prices: &Map<ResourceId>) -> f64 {
    bid.bundle
        .iter()
        .map(|resource_id| cleared_prices.get(resource_id).copied().unwrap_or(0.0))
        .sum()
}
