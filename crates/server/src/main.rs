// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use eval_cycle::{CreateCyclePayload, DraftSnapshot};
use eval_cycle_api::{
    ApiError, CompetencyResponse, CompetencySelectionRequest, CreateCompetencyRequest,
    CreateCycleError, CreateTemplateRequest, CreatedCycle, CsvPreviewResult, CycleCreator,
    CycleDetailsRequest, CycleResponse, DraftDecision, DraftNoticeResponse, DraftStore,
    JumpRequest, ParticipantRequest, ReplaceParticipantsRequest, SessionView, SubmitResponse,
    TemplateResponse, WeightsRequest, WizardController, create_competency, create_template,
    get_template, list_competencies, list_cycles, list_templates, preview_participants_csv,
};
use eval_cycle_domain::{Competency, CompetencySelection, EvaluationTemplate, ParticipantRoster};
use eval_cycle_notify::LogNotifier;
use eval_cycle_persistence::{Persistence, PersistenceError};

/// The default draft slot when the caller does not name one.
const DEFAULT_WIZARD_KIND: &str = "evaluation-cycle-360";

/// Evaluation Cycle Server - HTTP server for the Evaluation Cycle System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Counter for wizard session identifiers.
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Application state shared across handlers.
///
/// The persistence layer and the live wizard sessions are guarded by
/// mutexes; every handler does its work synchronously under the lock,
/// so guards never live across an await point.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for drafts, templates, and cycles.
    persistence: Arc<Mutex<Persistence>>,
    /// Live wizard sessions by session identifier.
    wizards: Arc<Mutex<HashMap<String, WizardController>>>,
}

/// Draft store collaborator backed by the shared persistence layer.
struct SqliteDraftStore {
    persistence: Arc<Mutex<Persistence>>,
    wizard_kind: String,
}

/// Locks the shared persistence layer, surfacing poisoning as an error.
fn lock_persistence(
    persistence: &Arc<Mutex<Persistence>>,
) -> Result<MutexGuard<'_, Persistence>, PersistenceError> {
    persistence
        .lock()
        .map_err(|_| PersistenceError::DatabaseError(String::from("Persistence lock poisoned")))
}

impl DraftStore for SqliteDraftStore {
    fn load(&mut self) -> Result<Option<DraftSnapshot>, PersistenceError> {
        lock_persistence(&self.persistence)?.load_draft(&self.wizard_kind)
    }

    fn save(&mut self, snapshot: &DraftSnapshot) -> Result<(), PersistenceError> {
        lock_persistence(&self.persistence)?.save_draft(&self.wizard_kind, snapshot)
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        lock_persistence(&self.persistence)?.clear_draft(&self.wizard_kind)
    }
}

/// Create-cycle collaborator backed by the shared persistence layer.
struct SqliteCycleCreator {
    persistence: Arc<Mutex<Persistence>>,
}

impl CycleCreator for SqliteCycleCreator {
    fn create_cycle(
        &mut self,
        payload: &CreateCyclePayload,
    ) -> Result<CreatedCycle, CreateCycleError> {
        let mut persistence = lock_persistence(&self.persistence).map_err(|e| CreateCycleError {
            message: e.to_string(),
        })?;

        let cycle_id: i64 = persistence
            .insert_cycle(payload)
            .map_err(|e| CreateCycleError {
                message: e.to_string(),
            })?;

        Ok(CreatedCycle { cycle_id })
    }
}

/// API request to open a wizard session.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSessionRequest {
    /// The draft slot to use. Defaults to the evaluation-cycle slot;
    /// deployments key it per operator.
    draft_key: Option<String>,
}

/// API response for an opened wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateSessionResponse {
    /// The session identifier for subsequent wizard calls.
    session_id: String,
    /// Whether a saved draft awaits the restore/discard decision.
    draft: DraftNoticeResponse,
}

/// API request to resolve the draft recovery prompt.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DraftDecisionRequest {
    /// "restore" or "discard".
    decision: String,
}

/// API request to apply a stored template to a session.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApplyTemplateRequest {
    /// The template to apply.
    template_id: i64,
}

/// API request for a participant CSV preview.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CsvPreviewRequest {
    /// The raw CSV content.
    csv: String,
}

/// Query parameters for listing templates.
#[derive(Debug, Deserialize)]
struct ListTemplatesQuery {
    /// When true, only public templates are returned.
    only_public: Option<bool>,
}

/// Query parameters for listing competencies.
#[derive(Debug, Deserialize)]
struct ListCompetenciesQuery {
    /// Display-time search filter.
    q: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn session_not_found(session_id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Wizard session '{session_id}' not found"),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DraftDecisionPending
            | ApiError::SubmissionInFlight
            | ApiError::AlreadySubmitted => StatusCode::CONFLICT,
            ApiError::SubmissionFailed { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        warn!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Runs a closure against one wizard session under the sessions lock.
fn with_wizard<T>(
    state: &AppState,
    session_id: &str,
    operation: impl FnOnce(&mut WizardController) -> Result<T, ApiError>,
) -> Result<T, HttpError> {
    let mut wizards = state.wizards.lock().map_err(|_| HttpError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: String::from("Wizard session lock poisoned"),
    })?;

    let controller: &mut WizardController = wizards
        .get_mut(session_id)
        .ok_or_else(|| HttpError::session_not_found(session_id))?;

    operation(controller).map_err(HttpError::from)
}

/// Handler for POST `/wizard/sessions` endpoint.
///
/// Opens a wizard session, reading the draft slot exactly once.
async fn handle_create_session(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, HttpError> {
    let wizard_kind: String = req
        .draft_key
        .unwrap_or_else(|| String::from(DEFAULT_WIZARD_KIND));

    info!(wizard_kind = %wizard_kind, "Opening wizard session");

    let catalog: Vec<Competency> = lock_persistence(&state.persistence)?.list_competencies()?;

    let controller: WizardController = WizardController::mount(
        Box::new(SqliteDraftStore {
            persistence: state.persistence.clone(),
            wizard_kind,
        }),
        Box::new(SqliteCycleCreator {
            persistence: state.persistence.clone(),
        }),
        Arc::new(LogNotifier::new()),
        catalog,
    );

    let draft: DraftNoticeResponse = controller.draft_notice().map_or(
        DraftNoticeResponse {
            draft_found: false,
            step: None,
            saved_at: None,
        },
        |notice| DraftNoticeResponse {
            draft_found: true,
            step: Some(notice.step),
            saved_at: Some(notice.saved_at),
        },
    );

    let session_id: String = format!("wizard-{}", SESSION_COUNTER.fetch_add(1, Ordering::SeqCst));

    state
        .wizards
        .lock()
        .map_err(|_| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from("Wizard session lock poisoned"),
        })?
        .insert(session_id.clone(), controller);

    info!(session_id = %session_id, draft_found = draft.draft_found, "Wizard session opened");

    Ok(Json(CreateSessionResponse { session_id, draft }))
}

/// Handler for POST `/wizard/sessions/{id}/draft` endpoint.
///
/// Resolves the draft recovery prompt.
async fn handle_resolve_draft(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<DraftDecisionRequest>,
) -> Result<Json<SessionView>, HttpError> {
    let decision: DraftDecision = match req.decision.as_str() {
        "restore" => DraftDecision::Restore,
        "discard" => DraftDecision::Discard,
        other => {
            return Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!("Invalid decision: '{other}'. Must be 'restore' or 'discard'"),
            });
        }
    };

    with_wizard(&state, &session_id, |controller| {
        controller.resolve_draft(decision)?;
        controller.view()
    })
    .map(Json)
}

/// Handler for GET `/wizard/sessions/{id}` endpoint.
async fn handle_get_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| controller.view()).map(Json)
}

/// Handler for PUT `/wizard/sessions/{id}/cycle` endpoint.
async fn handle_replace_cycle(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CycleDetailsRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.replace_cycle_details(req.into_details()?)?;
        controller.view()
    })
    .map(Json)
}

/// Handler for PUT `/wizard/sessions/{id}/weights` endpoint.
async fn handle_replace_weights(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<WeightsRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.replace_weights(req.into_weights())?;
        controller.view()
    })
    .map(Json)
}

/// Handler for PUT `/wizard/sessions/{id}/competencies` endpoint.
async fn handle_replace_competencies(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CompetencySelectionRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.replace_competencies(CompetencySelection::from_ids(req.competency_ids))?;
        controller.view()
    })
    .map(Json)
}

/// Handler for PUT `/wizard/sessions/{id}/participants` endpoint.
async fn handle_replace_participants(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ReplaceParticipantsRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        let mut participants = Vec::with_capacity(req.participants.len());
        for participant in req.participants {
            participants.push(participant.into_participant()?);
        }
        controller.replace_participants(ParticipantRoster::from_participants(participants))?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/participants` endpoint.
///
/// The checked add operation: duplicate employee IDs are rejected here.
async fn handle_add_participant(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ParticipantRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.add_participant(req.into_participant()?)?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/participants/preview` endpoint.
///
/// Validates a participant CSV against the session's roster without
/// importing anything.
async fn handle_preview_participants(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CsvPreviewRequest>,
) -> Result<Json<CsvPreviewResult>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        preview_participants_csv(&req.csv, &controller.session().participants).map_err(|e| {
            ApiError::InvalidInput {
                field: String::from("csv"),
                message: e.to_string(),
            }
        })
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/advance` endpoint.
async fn handle_advance(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.advance()?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/retreat` endpoint.
async fn handle_retreat(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.retreat()?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/jump` endpoint.
async fn handle_jump(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<SessionView>, HttpError> {
    with_wizard(&state, &session_id, |controller| {
        controller.jump_to_step(req.step)?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/template` endpoint.
///
/// Fetches the template and applies it to the session wholesale.
async fn handle_apply_template(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ApplyTemplateRequest>,
) -> Result<Json<SessionView>, HttpError> {
    let template: EvaluationTemplate = lock_persistence(&state.persistence)?
        .get_template(req.template_id)
        .map_err(|e| HttpError::from(ApiError::from(e)))?;

    with_wizard(&state, &session_id, |controller| {
        controller.apply_template(template)?;
        controller.view()
    })
    .map(Json)
}

/// Handler for POST `/wizard/sessions/{id}/submit` endpoint.
async fn handle_submit(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SubmitResponse>, HttpError> {
    let response: SubmitResponse = with_wizard(&state, &session_id, WizardController::submit)?;

    info!(
        session_id = %session_id,
        cycle_id = response.cycle_id,
        "Wizard submission created evaluation cycle"
    );

    Ok(Json(response))
}

/// Handler for POST `/templates` endpoint.
async fn handle_create_template(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<Json<TemplateResponse>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let response: TemplateResponse = create_template(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/templates` endpoint.
async fn handle_list_templates(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<Vec<TemplateResponse>>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let templates: Vec<TemplateResponse> =
        list_templates(&mut persistence, query.only_public.unwrap_or(false))?;
    Ok(Json(templates))
}

/// Handler for GET `/templates/{id}` endpoint.
async fn handle_get_template(
    AxumState(state): AxumState<AppState>,
    Path(template_id): Path<i64>,
) -> Result<Json<TemplateResponse>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let template: TemplateResponse = get_template(&mut persistence, template_id)?;
    Ok(Json(template))
}

/// Handler for POST `/competencies` endpoint.
async fn handle_create_competency(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateCompetencyRequest>,
) -> Result<Json<CompetencyResponse>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let response: CompetencyResponse = create_competency(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/competencies` endpoint.
///
/// The `q` parameter is a display-time filter only.
async fn handle_list_competencies(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListCompetenciesQuery>,
) -> Result<Json<Vec<CompetencyResponse>>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let competencies: Vec<CompetencyResponse> =
        list_competencies(&mut persistence, query.q.as_deref())?;
    Ok(Json(competencies))
}

/// Handler for GET `/cycles` endpoint.
async fn handle_list_cycles(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<CycleResponse>>, HttpError> {
    let mut persistence = lock_persistence(&state.persistence)?;
    let cycles: Vec<CycleResponse> = list_cycles(&mut persistence)?;
    Ok(Json(cycles))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/wizard/sessions", post(handle_create_session))
        .route("/wizard/sessions/{id}", get(handle_get_session))
        .route("/wizard/sessions/{id}/draft", post(handle_resolve_draft))
        .route("/wizard/sessions/{id}/cycle", put(handle_replace_cycle))
        .route("/wizard/sessions/{id}/weights", put(handle_replace_weights))
        .route(
            "/wizard/sessions/{id}/competencies",
            put(handle_replace_competencies),
        )
        .route(
            "/wizard/sessions/{id}/participants",
            put(handle_replace_participants),
        )
        .route(
            "/wizard/sessions/{id}/participants",
            post(handle_add_participant),
        )
        .route(
            "/wizard/sessions/{id}/participants/preview",
            post(handle_preview_participants),
        )
        .route("/wizard/sessions/{id}/advance", post(handle_advance))
        .route("/wizard/sessions/{id}/retreat", post(handle_retreat))
        .route("/wizard/sessions/{id}/jump", post(handle_jump))
        .route("/wizard/sessions/{id}/template", post(handle_apply_template))
        .route("/wizard/sessions/{id}/submit", post(handle_submit))
        .route("/templates", post(handle_create_template))
        .route("/templates", get(handle_list_templates))
        .route("/templates/{id}", get(handle_get_template))
        .route("/competencies", post(handle_create_competency))
        .route("/competencies", get(handle_list_competencies))
        .route("/cycles", get(handle_list_cycles))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Evaluation Cycle Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        wizards: Arc::new(Mutex::new(HashMap::new())),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
