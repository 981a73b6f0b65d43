use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use pre_analise::config::{ProviderConfig, ProviderKind};
use pre_analise::sessao::{EstadoProcesso, SessaoError, SessaoRepository};
use pre_analise::workflows::elegibilidade::{
    BomPagadorData, BureauData, ClienteDataProvider, FaturamentoData, ProviderError,
    SeededClienteProvider, UpstreamClienteProvider,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process state held in memory for the lifetime of the service. One
/// analysis at a time; each stage replaces its slot wholesale.
#[derive(Default)]
pub(crate) struct InMemorySessaoRepository {
    estado: Mutex<EstadoProcesso>,
}

impl SessaoRepository for InMemorySessaoRepository {
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

/// Config-selected client-data provider.
pub(crate) enum ProviderSelecionado {
    Mock(SeededClienteProvider),
    Upstream(UpstreamClienteProvider),
}

impl ProviderSelecionado {
    pub(crate) fn from_config(config: &ProviderConfig) -> Self {
        match config.kind {
            ProviderKind::Mock => Self::Mock(SeededClienteProvider::new()),
            ProviderKind::Upstream => {
                let base_url = config.upstream_base_url.clone().unwrap_or_default();
                Self::Upstream(UpstreamClienteProvider::new(base_url))
            }
        }
    }
}

impl ClienteDataProvider for ProviderSelecionado {
    fn bureau(&self, documento: &str) -> Result<BureauData, ProviderError> {
        match self {
            Self::Mock(provider) => provider.bureau(documento),
            Self::Upstream(provider) => provider.bureau(documento),
        }
    }

    fn faturamento(&self, documento: &str) -> Result<FaturamentoData, ProviderError> {
        match self {
            Self::Mock(provider) => provider.faturamento(documento),
            Self::Upstream(provider) => provider.faturamento(documento),
        }
    }

    fn bom_pagador(&self, documento: &str) -> Result<BomPagadorData, ProviderError> {
        match self {
            Self::Mock(provider) => provider.bom_pagador(documento),
            Self::Upstream(provider) => provider.bom_pagador(documento),
        }
    }

    fn nome(&self, documento: &str) -> Result<String, ProviderError> {
        match self {
            Self::Mock(provider) => provider.nome(documento),
            Self::Upstream(provider) => provider.nome(documento),
        }
    }
}
