//! Invoice batch validation: extraction, normalization, and the
//! tolerance summary.

pub mod domain;
pub mod extract;
mod normalize;
mod summary;

pub use domain::{
    ArquivoLote, NotaRecebida, NotaStatus, Origem, StatusTolerancia, TipoArquivo, ValidationNote,
    ValidationPayload, ValidationResult, ValidationSummary,
};
pub use extract::{
    extrair_notas, extrair_notas_dos_arquivos, inferir_tipo_upload, ExtractError,
};
pub use normalize::normalizar_notas;
pub use summary::calcular_resumo;

/// Requested amount applied when the payload does not carry one.
pub const VALOR_SOLICITADO_PADRAO: u64 = 150_000;

/// Batch name applied when the payload does not carry one.
pub const NOME_LOTE_PADRAO: &str = "Lote sem nome";

/// Batch-level validation failures returned to the caller as 4xx
/// responses; none of them is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ValidacaoError {
    #[error("clienteId obrigatorio para validar o lote.")]
    ClienteObrigatorio,
    #[error("Nenhuma nota valida recebida. Envie ao menos uma nota para processar o lote.")]
    LoteVazio,
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
