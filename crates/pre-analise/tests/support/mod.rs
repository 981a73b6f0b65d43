use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use pre_analise::config::RulesConfig;
use pre_analise::service::ProcessoService;
use pre_analise::sessao::{EstadoProcesso, SessaoError, SessaoRepository};
use pre_analise::workflows::elegibilidade::{
    BomPagadorData, BureauData, ClienteDataProvider, FaturamentoData, FaturamentoMes,
    ProviderError,
};

/// Mutex-backed session store, the same shape the API binary wires in.
#[derive(Default)]
pub struct MemorySessao {
    estado: Mutex<EstadoProcesso>,
}

impl SessaoRepository for MemorySessao {
    fn carregar(&self) -> Result<EstadoProcesso, SessaoError> {
        Ok(self.estado.lock().expect("sessao mutex poisoned").clone())
    }

    fn salvar(&self, estado: EstadoProcesso) -> Result<(), SessaoError> {
        *self.estado.lock().expect("sessao mutex poisoned") = estado;
        Ok(())
    }

    fn limpar(&self) -> Result<(), SessaoError> {
        *self.estado.lock().expect("sessao mutex poisoned") = EstadoProcesso::default();
        Ok(())
    }
}

/// Provider returning fixed figures so scenarios are written against
/// exact scores and revenue instead of seeded data.
pub struct FixedProvider {
    pub score: u32,
    pub total_atual: u64,
    pub percentual_pago: f64,
}

impl ClienteDataProvider for FixedProvider {
    fn bureau(&self, _documento: &str) -> Result<BureauData, ProviderError> {
        Ok(BureauData {
            score: self.score,
            last_update: NaiveDate::from_ymd_opt(2026, 8, 1).expect("data valida"),
        })
    }

    fn faturamento(&self, _documento: &str) -> Result<FaturamentoData, ProviderError> {
        let historico = ["mar", "abr", "mai", "jun", "jul", "ago"]
            .into_iter()
            .map(|mes| FaturamentoMes {
                mes: mes.to_string(),
                valor: self.total_atual,
            })
            .collect();

        Ok(FaturamentoData {
            total_atual: self.total_atual,
            media_6m: self.total_atual,
            percentual_meta: 100,
            historico,
        })
    }

    fn bom_pagador(&self, _documento: &str) -> Result<BomPagadorData, ProviderError> {
        let divida_total = 120_000;
        Ok(BomPagadorData {
            divida_total,
            valor_pago: (divida_total as f64 * self.percentual_pago).round() as u64,
            percentual_pago: self.percentual_pago,
        })
    }

    fn nome(&self, _documento: &str) -> Result<String, ProviderError> {
        Ok("Horizonte Logistica LTDA - Logistica".to_string())
    }
}

/// Provider whose lookups always fail, for the upstream-failure path.
pub struct FailingProvider;

impl ClienteDataProvider for FailingProvider {
    fn bureau(&self, _documento: &str) -> Result<BureauData, ProviderError> {
        Err(ProviderError::Indisponivel("bureau fora do ar".to_string()))
    }

    fn faturamento(&self, _documento: &str) -> Result<FaturamentoData, ProviderError> {
        Err(ProviderError::Indisponivel("bureau fora do ar".to_string()))
    }

    fn bom_pagador(&self, _documento: &str) -> Result<BomPagadorData, ProviderError> {
        Err(ProviderError::Indisponivel("bureau fora do ar".to_string()))
    }

    fn nome(&self, _documento: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Indisponivel("bureau fora do ar".to_string()))
    }
}

pub fn service_with<P: ClienteDataProvider + 'static>(
    provider: P,
) -> (Arc<ProcessoService<P, MemorySessao>>, Arc<MemorySessao>) {
    let sessao = Arc::new(MemorySessao::default());
    let service = Arc::new(ProcessoService::new(
        Arc::new(provider),
        sessao.clone(),
        RulesConfig::default(),
    ));
    (service, sessao)
}
