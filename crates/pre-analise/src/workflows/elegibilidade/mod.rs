//! Eligibility rules: bureau score + revenue + payment history -> loan tier.
//!
//! This module is the single authoritative implementation of the tier
//! rules; every caller (HTTP route, CLI demo, tests) evaluates through
//! [`EligibilityEngine`] instead of re-deriving thresholds locally.

mod config;
pub mod domain;
pub mod provider;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{EligibilityConfig, FaixaMinimos};
pub use domain::{
    BomPagadorData, BureauData, EligibilityResult, Faixa, FaturamentoData, FaturamentoMes,
};
pub use provider::{
    gerar_notas_mock, gerar_quantidade_notas, ClienteDataProvider, ProviderError,
    SeededClienteProvider, UpstreamClienteProvider,
};

/// Stateless evaluator applying the configured thresholds to one client.
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    /// Pure function of its inputs and the configured thresholds: the same
    /// inputs always yield the same tier and the same reason ordering.
    pub fn avaliar(
        &self,
        cliente_id: &str,
        bureau: BureauData,
        faturamento: FaturamentoData,
        bom_pagador: BomPagadorData,
    ) -> EligibilityResult {
        let resultado = rules::classificar(&self.config, &bureau, &faturamento, &bom_pagador);

        EligibilityResult {
            cliente_id: cliente_id.to_string(),
            cliente_nome: None,
            aprovado: resultado.aprovado,
            faixa_sugerida: resultado.faixa,
            motivos: resultado.motivos,
            bureau,
            faturamento,
            bom_pagador,
        }
    }
}

/// Eligibility lookup failures surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ElegibilidadeError {
    #[error("Informe um CPF ou CNPJ valido.")]
    DocumentoInvalido,
    #[error("Falha ao consultar dados do cliente: {0}")]
    Upstream(#[from] ProviderError),
}
