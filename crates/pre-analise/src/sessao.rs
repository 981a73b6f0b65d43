//! Explicit process state, one per service instance.
//!
//! The three stage results live in a single container with a
//! create-on-operation, replace-wholesale, clear-on-reset lifecycle.
//! Mutation is always read-modify-replace through the repository; two
//! in-flight submissions simply race to overwrite, never to mutate.

use serde::{Deserialize, Serialize};

use crate::workflows::elegibilidade::EligibilityResult;
use crate::workflows::parecer::ParecerRecord;
use crate::workflows::validacao::ValidationResult;

/// Session-held results for the pre-analysis in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadoProcesso {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validacao: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parecer: Option<ParecerRecord>,
}

/// Storage abstraction for the process state so the service can be
/// exercised against test doubles.
pub trait SessaoRepository: Send + Sync {
    fn carregar(&self) -> Result<EstadoProcesso, SessaoError>;
    fn salvar(&self, estado: EstadoProcesso) -> Result<(), SessaoError>;
    fn limpar(&self) -> Result<(), SessaoError>;
}

/// Session storage failure.
#[derive(Debug, thiserror::Error)]
pub enum SessaoError {
    #[error("armazenamento de sessao indisponivel: {0}")]
    Indisponivel(String),
}
