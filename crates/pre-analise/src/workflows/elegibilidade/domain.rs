use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot returned by the credit bureau for a client document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauData {
    pub score: u32,
    pub last_update: NaiveDate,
}

/// Monthly revenue point inside the six month history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaturamentoMes {
    pub mes: String,
    pub valor: u64,
}

/// Revenue figures for the client, oldest month first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaturamentoData {
    pub total_atual: u64,
    pub media_6m: u64,
    pub percentual_meta: u8,
    pub historico: Vec<FaturamentoMes>,
}

/// Payment-history ("bom pagador") figures. `percentual_pago` is a
/// fraction in [0, 1]; `valor_pago` is source-computed from it and is not
/// re-checked downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomPagadorData {
    pub divida_total: u64,
    pub valor_pago: u64,
    pub percentual_pago: f64,
}

/// Loan-size tier suggested by the eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faixa {
    P,
    M,
    G,
    #[serde(rename = "RECUSADO")]
    Recusado,
}

impl Faixa {
    pub const fn label(self) -> &'static str {
        match self {
            Faixa::P => "P",
            Faixa::M => "M",
            Faixa::G => "G",
            Faixa::Recusado => "RECUSADO",
        }
    }

    /// One-step promotion used by the upgrade pass. G never upgrades.
    pub(crate) const fn promover(self) -> Faixa {
        match self {
            Faixa::P => Faixa::M,
            Faixa::M | Faixa::G => Faixa::G,
            Faixa::Recusado => Faixa::Recusado,
        }
    }
}

/// Outcome of one eligibility evaluation. Immutable once built; reasons
/// are appended in evaluation order and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub cliente_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_nome: Option<String>,
    pub aprovado: bool,
    pub faixa_sugerida: Faixa,
    pub motivos: Vec<String>,
    pub bureau: BureauData,
    pub faturamento: FaturamentoData,
    pub bom_pagador: BomPagadorData,
}
