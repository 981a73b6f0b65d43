//! HTTP surface of the workflow: eligibility lookup, batch validation,
//! final decision, and process state.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::service::{ProcessoService, ProcessoServiceError};
use crate::sessao::SessaoRepository;
use crate::workflows::elegibilidade::{ClienteDataProvider, ElegibilidadeError};
use crate::workflows::parecer::{ParecerError, ParecerRequest};
use crate::workflows::validacao::ValidationPayload;

/// Router builder exposing the workflow endpoints.
pub fn processo_router<P, S>(service: Arc<ProcessoService<P, S>>) -> Router
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/clientes/:documento/eligibility",
            get(eligibility_handler::<P, S>),
        )
        .route("/api/v1/validacao", post(validacao_handler::<P, S>))
        .route("/api/v1/parecer", post(parecer_handler::<P, S>))
        .route("/api/v1/processo", get(processo_handler::<P, S>))
        .route("/api/v1/processo/reset", post(reset_handler::<P, S>))
        .with_state(service)
}

pub(crate) async fn eligibility_handler<P, S>(
    State(service): State<Arc<ProcessoService<P, S>>>,
    Path(documento): Path<String>,
) -> Response
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    match service.consultar_elegibilidade(&documento) {
        Ok(resultado) => (StatusCode::OK, axum::Json(resultado)).into_response(),
        Err(err) => resposta_erro(err),
    }
}

pub(crate) async fn validacao_handler<P, S>(
    State(service): State<Arc<ProcessoService<P, S>>>,
    axum::Json(payload): axum::Json<ValidationPayload>,
) -> Response
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    match service.processar_lote(payload) {
        Ok(resultado) => (StatusCode::OK, axum::Json(resultado)).into_response(),
        Err(err) => resposta_erro(err),
    }
}

pub(crate) async fn parecer_handler<P, S>(
    State(service): State<Arc<ProcessoService<P, S>>>,
    axum::Json(request): axum::Json<ParecerRequest>,
) -> Response
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    match service.registrar_parecer(request) {
        Ok(registro) => (StatusCode::OK, axum::Json(registro)).into_response(),
        Err(err) => resposta_erro(err),
    }
}

pub(crate) async fn processo_handler<P, S>(
    State(service): State<Arc<ProcessoService<P, S>>>,
) -> Response
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    match service.estado() {
        Ok(estado) => (StatusCode::OK, axum::Json(estado)).into_response(),
        Err(err) => resposta_erro(err),
    }
}

pub(crate) async fn reset_handler<P, S>(
    State(service): State<Arc<ProcessoService<P, S>>>,
) -> Response
where
    P: ClienteDataProvider + 'static,
    S: SessaoRepository + 'static,
{
    match service.reiniciar() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => resposta_erro(err),
    }
}

fn resposta_erro(err: ProcessoServiceError) -> Response {
    let status = match &err {
        ProcessoServiceError::Elegibilidade(ElegibilidadeError::DocumentoInvalido) => {
            StatusCode::BAD_REQUEST
        }
        ProcessoServiceError::Elegibilidade(ElegibilidadeError::Upstream(_)) => {
            StatusCode::BAD_GATEWAY
        }
        ProcessoServiceError::Validacao(_) => StatusCode::BAD_REQUEST,
        ProcessoServiceError::Parecer(ParecerError::SemLote) => StatusCode::CONFLICT,
        ProcessoServiceError::Parecer(ParecerError::ChecklistIncompleto { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ProcessoServiceError::Sessao(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = axum::Json(json!({ "message": err.to_string() }));
    (status, body).into_response()
}
