use serde::{Deserialize, Serialize};

/// Score and revenue floor for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaixaMinimos {
    pub score: u32,
    pub faturamento: u64,
}

/// Threshold configuration consumed by the eligibility engine.
///
/// Percentages are expressed on the 0-100 scale the policy documents use,
/// not as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub percentual_min: f64,
    pub upgrade_high: f64,
    pub upgrade_medium: f64,
    pub faixa_p: FaixaMinimos,
    pub faixa_m: FaixaMinimos,
    pub faixa_g: FaixaMinimos,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            percentual_min: 50.0,
            upgrade_high: 90.0,
            upgrade_medium: 70.0,
            faixa_p: FaixaMinimos {
                score: 400,
                faturamento: 10_000,
            },
            faixa_m: FaixaMinimos {
                score: 600,
                faturamento: 100_000,
            },
            faixa_g: FaixaMinimos {
                score: 800,
                faturamento: 1_000_000,
            },
        }
    }
}
