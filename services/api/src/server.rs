use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use pre_analise::config::AppConfig;
use pre_analise::error::AppError;
use pre_analise::service::ProcessoService;
use pre_analise::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessaoRepository, ProviderSelecionado};
use crate::routes::with_processo_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let provider = Arc::new(ProviderSelecionado::from_config(&config.provider));
    let sessao = Arc::new(InMemorySessaoRepository::default());
    let service = Arc::new(ProcessoService::new(
        provider,
        sessao,
        config.rules.clone(),
    ));

    let app = with_processo_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit pre-analysis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
