//! Service composing the data provider, the two rule engines, the
//! decision rules, and the session store.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::sessao::{EstadoProcesso, SessaoError, SessaoRepository};
use crate::workflows::elegibilidade::{
    ClienteDataProvider, ElegibilidadeError, EligibilityEngine, EligibilityResult,
};
use crate::workflows::parecer::{
    montar_parecer, ParecerError, ParecerRecord, ParecerRequest,
};
use crate::workflows::validacao::{
    calcular_resumo, extrair_notas_dos_arquivos, inferir_tipo_upload, normalizar_notas,
    NotaRecebida, TipoArquivo, ValidacaoError, ValidationPayload, ValidationResult,
    NOME_LOTE_PADRAO, VALOR_SOLICITADO_PADRAO,
};

pub struct ProcessoService<P, S> {
    provider: Arc<P>,
    sessao: Arc<S>,
    engine: EligibilityEngine,
    tolerancia: f64,
}

impl<P, S> ProcessoService<P, S>
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    pub fn new(provider: Arc<P>, sessao: Arc<S>, rules: RulesConfig) -> Self {
        Self {
            provider,
            sessao,
            engine: EligibilityEngine::new(rules.elegibilidade),
            tolerancia: rules.tolerancia,
        }
    }

    /// Evaluates eligibility for a free-form document: strips non-digit
    /// characters, resolves the three external signals plus the display
    /// name, and stores the result as the start of a fresh process.
    pub fn consultar_elegibilidade(
        &self,
        documento: &str,
    ) -> Result<EligibilityResult, ProcessoServiceError> {
        let cliente_id = somente_digitos(documento);
        if cliente_id.is_empty() {
            return Err(ElegibilidadeError::DocumentoInvalido.into());
        }

        let bureau = self
            .provider
            .bureau(&cliente_id)
            .map_err(ElegibilidadeError::Upstream)?;
        let faturamento = self
            .provider
            .faturamento(&cliente_id)
            .map_err(ElegibilidadeError::Upstream)?;
        let bom_pagador = self
            .provider
            .bom_pagador(&cliente_id)
            .map_err(ElegibilidadeError::Upstream)?;
        let nome = self
            .provider
            .nome(&cliente_id)
            .map_err(ElegibilidadeError::Upstream)?;

        let mut resultado = self
            .engine
            .avaliar(&cliente_id, bureau, faturamento, bom_pagador);
        resultado.cliente_nome = Some(nome);

        info!(
            cliente_id = %resultado.cliente_id,
            faixa = resultado.faixa_sugerida.label(),
            aprovado = resultado.aprovado,
            "elegibilidade avaliada"
        );

        // A new search opens a fresh process: downstream stage results
        // from the previous client are discarded.
        let mut estado = self.sessao.carregar()?;
        estado.eligibility = Some(resultado.clone());
        estado.validacao = None;
        estado.parecer = None;
        self.sessao.salvar(estado)?;

        Ok(resultado)
    }

    /// Validates one invoice batch: extracts inline uploads (fail-fast on
    /// any file error), normalizes and dedups the notes, and derives the
    /// tolerance summary. The result replaces the session's previous one.
    pub fn processar_lote(
        &self,
        payload: ValidationPayload,
    ) -> Result<ValidationResult, ProcessoServiceError> {
        let cliente_id = somente_digitos(&payload.cliente_id);
        if cliente_id.is_empty() {
            return Err(ValidacaoError::ClienteObrigatorio.into());
        }

        let extraidas = if payload.arquivos_upload.is_empty() {
            Vec::new()
        } else {
            extrair_notas_dos_arquivos(&payload.arquivos_upload).map_err(ValidacaoError::from)?
        };
        debug!(
            arquivos = payload.arquivos_upload.len(),
            extraidas = extraidas.len(),
            recebidas = payload.notas.len(),
            "lote recebido"
        );

        let tipo_arquivo = payload.tipo_arquivo.unwrap_or_else(|| {
            if payload.arquivos_upload.is_empty() {
                TipoArquivo::Misto
            } else {
                inferir_tipo_upload(&payload.arquivos_upload)
            }
        });

        // Uploaded files come first so their notes win the dedup tie-break
        // over the caller-supplied records.
        let recebidas: Vec<NotaRecebida> = extraidas
            .iter()
            .map(NotaRecebida::from)
            .chain(payload.notas.into_iter())
            .collect();
        let notas = normalizar_notas(&recebidas);
        if notas.is_empty() {
            return Err(ValidacaoError::LoteVazio.into());
        }

        let valor_solicitado = payload.valor_solicitado.unwrap_or(VALOR_SOLICITADO_PADRAO);
        let summary = calcular_resumo(&notas, self.tolerancia, valor_solicitado);

        let mut estado = self.sessao.carregar()?;

        let arquivos = payload
            .arquivos
            .or_else(|| {
                if payload.arquivos_upload.is_empty() {
                    None
                } else {
                    Some(
                        payload
                            .arquivos_upload
                            .iter()
                            .map(|arquivo| arquivo.nome.clone())
                            .collect(),
                    )
                }
            })
            .unwrap_or_else(|| {
                notas
                    .iter()
                    .map(|nota| format!("{}.{}", nota.chave, tipo_arquivo.extensao()))
                    .collect()
            });

        let eligibility = payload
            .eligibility
            .or_else(|| estado.eligibility.clone())
            .map(|mut resultado| {
                resultado.cliente_id = cliente_id.clone();
                resultado
            });

        let resultado = ValidationResult {
            cliente_id,
            cliente_nome: payload.cliente_nome,
            nome_lote: Some(
                payload
                    .nome_lote
                    .unwrap_or_else(|| NOME_LOTE_PADRAO.to_string()),
            ),
            tipo_arquivo,
            notas,
            summary,
            arquivos: Some(arquivos),
            eligibility,
        };

        info!(
            cliente_id = %resultado.cliente_id,
            total = resultado.summary.total_notas,
            validas = resultado.summary.validas,
            "lote validado"
        );

        // A fresh batch supersedes any decision taken over the old one.
        estado.validacao = Some(resultado.clone());
        estado.parecer = None;
        self.sessao.salvar(estado)?;

        Ok(resultado)
    }

    /// Records the final decision, snapshotting the stage results and
    /// closing the process: eligibility and validation slots are cleared,
    /// only the audit record remains.
    pub fn registrar_parecer(
        &self,
        request: ParecerRequest,
    ) -> Result<ParecerRecord, ProcessoServiceError> {
        let mut estado = self.sessao.carregar()?;
        let registro = montar_parecer(request, &estado, Local::now().naive_local())?;

        info!(decisao = registro.decisao.label(), "parecer registrado");

        estado.parecer = Some(registro.clone());
        estado.eligibility = None;
        estado.validacao = None;
        self.sessao.salvar(estado)?;

        Ok(registro)
    }

    pub fn estado(&self) -> Result<EstadoProcesso, ProcessoServiceError> {
        Ok(self.sessao.carregar()?)
    }

    pub fn reiniciar(&self) -> Result<(), ProcessoServiceError> {
        self.sessao.limpar()?;
        Ok(())
    }
}

fn somente_digitos(documento: &str) -> String {
    documento.chars().filter(char::is_ascii_digit).collect()
}

/// Error raised by the process service.
#[derive(Debug, thiserror::Error)]
pub enum ProcessoServiceError {
    #[error(transparent)]
    Elegibilidade(#[from] ElegibilidadeError),
    #[error(transparent)]
    Validacao(#[from] ValidacaoError),
    #[error(transparent)]
    Parecer(#[from] ParecerError),
    #[error(transparent)]
    Sessao(#[from] SessaoError),
}
