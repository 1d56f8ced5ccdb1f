use crate::Map;
use bas_core::models::{
    Bid, ClearingConfig, Map as CoreMap, PricingPolicy, Resource, ResourceId,
};

/// One tâtonnement-style adjustment step: move each resource's price away
/// from its base according to the realized excess demand or surplus.
///
/// Demand above capacity always raises the price geometrically in the
/// shortfall. At or below capacity, the configured policy decides between
/// geometric decay in the surplus and holding the base price. Base prices
/// are never modified; the result is a fresh per-resource price map.
pub(crate) fn adjust_prices(
    resources: &CoreMap<ResourceId, Resource>,
    winners: &[&Bid],
    config: ClearingConfig,
) -> CoreMap<ResourceId> {
    let mut demand = Map::<ResourceId, u32>::default();
    for bid in winners {
        for resource_id in &bid.bundle {
            *demand.entry(*resource_id).or_insert(0) += 1;
        }
    }

    resources
        .iter()
        .map(|(id, resource)| {
            let demanded = demand.get(id).copied().unwrap_or(0);
            let price = cleared_price(resource.base_price, resource.capacity, demanded, config);
            (*id, price)
        })
        .collect()
}

fn cleared_price(base: f64, capacity: u32, demand: u32, config: ClearingConfig) -> f64 {
    if demand > capacity {
        base * (1.0 + config.alpha).powi((demand - capacity) as i32)
    } else {
        match config.pricing {
            PricingPolicy::Decay => base * (1.0 - config.alpha).powi((capacity - demand) as i32),
            PricingPolicy::Hold => base,
        }
    }
}
