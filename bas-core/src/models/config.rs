/// The markup factor used when no other value is requested.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// How the cleared price behaves when demand does not exceed supply.
///
/// Demand above capacity always raises the price geometrically in the
/// shortfall. Below capacity, two policies are in circulation: decaying the
/// price geometrically in the surplus, or holding it at the base price.
/// Neither is authoritative, so the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingPolicy {
    /// Surplus decays the price: base · (1 − α)^(capacity − demand)
    Decay,
    /// Surplus leaves the price at base
    Hold,
}

/// Run-level knobs for a clearing run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClearingConfig {
    /// The price adjustment factor, applied once per unit of shortfall or surplus
    pub alpha: f64,
    /// The surplus-side pricing behavior
    pub pricing: PricingPolicy,
}

impl ClearingConfig {
    /// A config with the reference markup factor and the given policy.
    pub fn new(pricing: PricingPolicy) -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            pricing,
        }
    }
}
