use serde::{Deserialize, Serialize};

use crate::workflows::elegibilidade::EligibilityResult;

/// File format a note was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origem {
    Xml,
    Cnab,
}

impl Origem {
    pub const fn label(self) -> &'static str {
        match self {
            Origem::Xml => "XML",
            Origem::Cnab => "CNAB",
        }
    }
}

/// Validation status assigned to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotaStatus {
    Validada,
    Recusada,
    Pendente,
}

impl NotaStatus {
    pub const fn label(self) -> &'static str {
        match self {
            NotaStatus::Validada => "validada",
            NotaStatus::Recusada => "recusada",
            NotaStatus::Pendente => "pendente",
        }
    }
}

/// Declared format of an uploaded batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoArquivo {
    Xml,
    Cnab,
    Misto,
}

impl TipoArquivo {
    pub const fn label(self) -> &'static str {
        match self {
            TipoArquivo::Xml => "XML",
            TipoArquivo::Cnab => "CNAB",
            TipoArquivo::Misto => "MISTO",
        }
    }

    pub fn extensao(self) -> String {
        self.label().to_ascii_lowercase()
    }
}

/// A normalized invoice note. `chave` is the deduplication identity within
/// a batch; `valor` is whole currency units, no sub-unit precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationNote {
    pub chave: String,
    pub origem: Origem,
    pub valor: u64,
    pub status: NotaStatus,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

/// Raw inbound note record, before normalization. Every field is optional
/// or loosely typed so a malformed payload degrades into dropped or
/// zeroed notes rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotaRecebida {
    pub chave: String,
    pub origem: Option<String>,
    pub valor: f64,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub motivo: Option<String>,
}

impl From<&ValidationNote> for NotaRecebida {
    fn from(nota: &ValidationNote) -> Self {
        Self {
            chave: nota.chave.clone(),
            origem: Some(nota.origem.label().to_string()),
            valor: nota.valor as f64,
            status: Some(nota.status.label().to_string()),
            tag: Some(nota.tag.clone()),
            motivo: nota.motivo.clone(),
        }
    }
}

/// An uploaded file travelling inline in the request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArquivoLote {
    pub nome: String,
    pub conteudo: String,
}

/// Tolerance verdict for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTolerancia {
    #[serde(rename = "Dentro da tolerancia")]
    Dentro,
    #[serde(rename = "Fora da tolerancia")]
    Fora,
}

/// Derived batch totals. Recomputed fresh on every submission, never
/// updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_notas: usize,
    pub validas: usize,
    pub invalidas: usize,
    pub tolerancia: f64,
    pub percentual_valido: u32,
    pub valor_total_validas: u64,
    pub valor_solicitado: u64,
    pub status: StatusTolerancia,
}

/// Outcome of one batch submission. Superseded wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub cliente_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_lote: Option<String>,
    pub tipo_arquivo: TipoArquivo,
    pub notas: Vec<ValidationNote>,
    pub summary: ValidationSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arquivos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityResult>,
}

/// Request body for a batch validation submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPayload {
    pub cliente_id: String,
    pub cliente_nome: Option<String>,
    pub nome_lote: Option<String>,
    pub tipo_arquivo: Option<TipoArquivo>,
    pub valor_solicitado: Option<u64>,
    pub arquivos: Option<Vec<String>>,
    pub arquivos_upload: Vec<ArquivoLote>,
    pub notas: Vec<NotaRecebida>,
    pub eligibility: Option<EligibilityResult>,
}
