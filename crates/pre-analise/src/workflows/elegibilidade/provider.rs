use chrono::{Datelike, Duration, Local, NaiveDate};

use super::domain::{BomPagadorData, BureauData, FaturamentoData, FaturamentoMes};
use crate::workflows::validacao::domain::{NotaStatus, Origem, TipoArquivo, ValidationNote};

/// Boundary to the external bureau / revenue / payment-history systems.
///
/// Implementations resolve one client document at a time; the individual
/// lookups carry no ordering dependency between them.
pub trait ClienteDataProvider: Send + Sync {
    fn bureau(&self, documento: &str) -> Result<BureauData, ProviderError>;
    fn faturamento(&self, documento: &str) -> Result<FaturamentoData, ProviderError>;
    fn bom_pagador(&self, documento: &str) -> Result<BomPagadorData, ProviderError>;
    fn nome(&self, documento: &str) -> Result<String, ProviderError>;
}

/// Failure of an external data lookup. Never retried here; retry policy
/// belongs to the collaborator behind the implementation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("servico externo indisponivel: {0}")]
    Indisponivel(String),
}

const RAZOES_SOCIAIS: [&str; 10] = [
    "Horizonte Logistica LTDA",
    "Aurora Comercio ME",
    "Vale Verde Servicos EIRELI",
    "Nimbus Tecnologia SA",
    "Litoral Industrial Ltda",
    "Delta Alimentos ME",
    "Serra Azul Engenharia LTDA",
    "Vita Farma Distribuidora",
    "Atlas Construcoes EIRELI",
    "Orion Educacional SA",
];

const SEGMENTOS: [&str; 10] = [
    "Logistica",
    "Comercio",
    "Servicos",
    "Tecnologia",
    "Industrial",
    "Alimentos",
    "Engenharia",
    "Saude",
    "Construcao",
    "Educacao",
];

const MESES: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Park-Miller generator seeded from the client document, so every lookup
/// for the same document yields the same figures.
struct SeededRandom {
    seed: u64,
}

impl SeededRandom {
    fn new(seed_value: u32) -> Self {
        let mut seed = u64::from(seed_value) % 2_147_483_647;
        if seed == 0 {
            seed += 2_147_483_646;
        }
        Self { seed }
    }

    fn next(&mut self) -> f64 {
        self.seed = self.seed * 16_807 % 2_147_483_647;
        (self.seed - 1) as f64 / 2_147_483_646.0
    }
}

fn hash_documento(documento: &str) -> u32 {
    let mut hash: u32 = 0;
    for c in documento.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as u32);
    }
    hash
}

fn normalizar_documento(documento: &str) -> String {
    let digitos: String = documento.chars().filter(char::is_ascii_digit).collect();
    if digitos.is_empty() {
        "00000000000000".to_string()
    } else {
        digitos
    }
}

fn rand_para(documento: &str, dominio: &str) -> SeededRandom {
    let chave = if dominio.is_empty() {
        normalizar_documento(documento)
    } else {
        format!("{}:{dominio}", normalizar_documento(documento))
    };
    SeededRandom::new(hash_documento(&chave))
}

/// Deterministic stand-in for the real bureau/revenue/payment collaborators,
/// keyed by a hash of the client document. The reference date anchors the
/// generated dates so tests stay reproducible.
#[derive(Debug, Clone)]
pub struct SeededClienteProvider {
    referencia: NaiveDate,
}

impl SeededClienteProvider {
    pub fn new() -> Self {
        Self::with_reference_date(Local::now().date_naive())
    }

    pub fn with_reference_date(referencia: NaiveDate) -> Self {
        Self { referencia }
    }
}

impl Default for SeededClienteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ClienteDataProvider for SeededClienteProvider {
    fn bureau(&self, documento: &str) -> Result<BureauData, ProviderError> {
        let mut rand = rand_para(documento, "bureau");
        let score = (350.0 + rand.next() * 650.0).round() as u32;
        let dias_atras = (rand.next() * 15.0) as i64;
        let last_update = self.referencia - Duration::days(dias_atras);
        Ok(BureauData { score, last_update })
    }

    fn faturamento(&self, documento: &str) -> Result<FaturamentoData, ProviderError> {
        let mut rand = rand_para(documento, "faturamento");
        let base = (80_000.0 + rand.next() * 1_200_000.0).round();
        let mes_atual = self.referencia.month0() as usize;

        let mut historico = Vec::with_capacity(6);
        let mut soma: u64 = 0;
        // Oldest month first; the newest entry is the current month.
        for atras in (0..6).rev() {
            let indice = (mes_atual + 12 - atras) % 12;
            let fator_sazonal = 0.9 + rand.next() * 0.25;
            let variacao = 0.92 + rand.next() * 0.18;
            let valor = (base * fator_sazonal * variacao).round() as u64;
            historico.push(FaturamentoMes {
                mes: MESES[indice].to_string(),
                valor,
            });
            soma += valor;
        }

        let total_atual = historico.last().map(|mes| mes.valor).unwrap_or(base as u64);
        let media_6m = (soma as f64 / historico.len() as f64).round() as u64;
        let meta_alvo = base * 1.05;
        let percentual_meta =
            ((total_atual as f64 / meta_alvo * 100.0).round()).clamp(35.0, 130.0) as u8;

        Ok(FaturamentoData {
            total_atual,
            media_6m,
            percentual_meta,
            historico,
        })
    }

    fn bom_pagador(&self, documento: &str) -> Result<BomPagadorData, ProviderError> {
        let mut rand = rand_para(documento, "pagador");
        let divida_total = (10_000.0 + rand.next() * 190_000.0).round() as u64;
        let percentual_pago = ((0.25 + rand.next() * 0.7) * 100.0).round() / 100.0;
        let valor_pago = (divida_total as f64 * percentual_pago).round() as u64;
        Ok(BomPagadorData {
            divida_total,
            valor_pago,
            percentual_pago,
        })
    }

    fn nome(&self, documento: &str) -> Result<String, ProviderError> {
        let mut rand = rand_para(documento, "");
        let segmento = SEGMENTOS[(rand.next() * SEGMENTOS.len() as f64) as usize];
        let razao = RAZOES_SOCIAIS[(rand.next() * RAZOES_SOCIAIS.len() as f64) as usize];
        Ok(format!("{razao} - {segmento}"))
    }
}

/// Client for the real bureau aggregator. Selected with
/// `DATA_PROVIDER=upstream`; every lookup reports the upstream as
/// unavailable until the integration is wired.
// TODO: replace the stub bodies with the aggregator HTTP client once the
// integration contract is signed.
#[derive(Debug, Clone)]
pub struct UpstreamClienteProvider {
    base_url: String,
}

impl UpstreamClienteProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn indisponivel(&self) -> ProviderError {
        ProviderError::Indisponivel(format!(
            "integracao com o bureau em {} ainda nao habilitada",
            self.base_url
        ))
    }
}

impl ClienteDataProvider for UpstreamClienteProvider {
    fn bureau(&self, _documento: &str) -> Result<BureauData, ProviderError> {
        Err(self.indisponivel())
    }

    fn faturamento(&self, _documento: &str) -> Result<FaturamentoData, ProviderError> {
        Err(self.indisponivel())
    }

    fn bom_pagador(&self, _documento: &str) -> Result<BomPagadorData, ProviderError> {
        Err(self.indisponivel())
    }

    fn nome(&self, _documento: &str) -> Result<String, ProviderError> {
        Err(self.indisponivel())
    }
}

struct TagInvalida {
    tag: &'static str,
    status: NotaStatus,
    motivo: &'static str,
}

const TAGS_INVALIDAS: [TagInvalida; 3] = [
    TagInvalida {
        tag: "RECUSADO",
        status: NotaStatus::Recusada,
        motivo: "Tag RECUSADO retornada pela API",
    },
    TagInvalida {
        tag: "NAO RECONHECIDO",
        status: NotaStatus::Recusada,
        motivo: "Chave nao encontrada na base do fisco",
    },
    TagInvalida {
        tag: "PENDENTE",
        status: NotaStatus::Pendente,
        motivo: "Consulta em andamento no provedor",
    },
];

/// Seeded batch size for the demo note generator, clamped to 8..=20.
pub fn gerar_quantidade_notas(cliente_id: &str) -> usize {
    let mut rand = rand_para(cliente_id, "quantidade");
    let quantidade = (8.0 + rand.next() * 8.0).round() as usize;
    quantidade.clamp(8, 20)
}

/// Deterministic invoice batch used by the CLI demo, mimicking the mix of
/// validated, refused, and pending notes a real lookup returns.
pub fn gerar_notas_mock(
    cliente_id: &str,
    quantidade: usize,
    tipo_arquivo: TipoArquivo,
) -> Vec<ValidationNote> {
    let documento = normalizar_documento(cliente_id);
    let mut rand = rand_para(cliente_id, "notas");
    let mut notas = Vec::with_capacity(quantidade);

    for i in 0..quantidade {
        let origem = match tipo_arquivo {
            TipoArquivo::Misto => {
                if rand.next() > 0.5 {
                    Origem::Xml
                } else {
                    Origem::Cnab
                }
            }
            TipoArquivo::Xml => Origem::Xml,
            TipoArquivo::Cnab => Origem::Cnab,
        };
        let valor = (5_000.0 + rand.next() * 45_000.0).round() as u64;
        let serie = 100_000 + (rand.next() * 900_000.0) as u64;
        let chave = format!("{documento}{serie:06}{i:02}");

        let mut status = NotaStatus::Validada;
        let mut tag = "OK".to_string();
        let mut motivo = None;

        if rand.next() < 0.15 {
            let invalida = &TAGS_INVALIDAS[(rand.next() * TAGS_INVALIDAS.len() as f64) as usize];
            status = invalida.status;
            tag = invalida.tag.to_string();
            motivo = Some(invalida.motivo.to_string());
        }

        notas.push(ValidationNote {
            chave,
            origem,
            valor,
            status,
            tag,
            motivo,
        });
    }

    notas
}
