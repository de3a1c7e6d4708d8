//! # API REST
//!
//! REST API implementation for Haven.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON payloads, CORS, status code mapping)
//!
//! Uses `api-shared` for payload types and `haven-core` for all domain
//! behaviour.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ActivityRes, CreateBedReq, CreateBedRes, CreateReferralReq, CreateReferralRes, DeleteBedParams,
    ErrorRes, FacilitiesRes, HealthRes, HealthService, ListBedsRes, ListReferralsRes, StatsRes,
    SuccessRes, UpdateBedStatusReq, UpdateReferralStatusReq,
};
use haven_core::{CoreError, NewBed, NewReferral, ShelterService};

/// How many activity entries the feed returns.
const ACTIVITY_FEED_LIMIT: u32 = 20;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ShelterService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_referrals,
        create_referral,
        update_referral_status,
        list_beds,
        create_bed,
        update_bed_status,
        delete_bed,
        list_facilities,
        dashboard_stats,
        recent_activity,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        SuccessRes,
        ListReferralsRes,
        CreateReferralRes,
        CreateReferralReq,
        UpdateReferralStatusReq,
        ListBedsRes,
        CreateBedRes,
        CreateBedReq,
        api_shared::BulkBedReq,
        UpdateBedStatusReq,
        FacilitiesRes,
        StatsRes,
        ActivityRes,
        haven_core::Referral,
        haven_core::ReferralStatus,
        haven_core::Bed,
        haven_core::BedStatus,
        haven_core::ActivityEntry,
        haven_core::DashboardStats,
        haven_core::FacilitySummary,
    ))
)]
struct ApiDoc;

type Failure = (StatusCode, Json<ErrorRes>);

/// Builds the REST router with Swagger UI and a permissive CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/referrals", get(list_referrals))
        .route("/referrals", post(create_referral))
        .route("/referrals", patch(update_referral_status))
        .route("/beds", get(list_beds))
        .route("/beds", post(create_bed))
        .route("/beds", patch(update_bed_status))
        .route("/beds", delete(delete_bed))
        .route("/facilities", get(list_facilities))
        .route("/stats", get(dashboard_stats))
        .route("/activity", get(recent_activity))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Maps a core failure onto the REST error taxonomy.
///
/// Validation failures and missing records carry their message through;
/// anything else is logged server-side and reported generically.
fn failure(op: &str, err: CoreError) -> Failure {
    match &err {
        CoreError::InvalidInput(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: message.clone(),
            }),
        ),
        CoreError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorRes {
                error: err.to_string(),
            }),
        ),
        _ => {
            tracing::error!("{op} error: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    error: "Internal error".into(),
                }),
            )
        }
    }
}

fn required_fields(message: &str) -> Failure {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used for monitoring and load balancer probes.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/referrals",
    responses(
        (status = 200, description = "All referrals, newest first", body = ListReferralsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all referrals in the queue.
async fn list_referrals(
    State(state): State<AppState>,
) -> Result<Json<ListReferralsRes>, Failure> {
    match state.service.list_referrals() {
        Ok(referrals) => Ok(Json(ListReferralsRes { referrals })),
        Err(e) => Err(failure("list referrals", e)),
    }
}

#[utoipa::path(
    post,
    path = "/referrals",
    request_body = CreateReferralReq,
    responses(
        (status = 201, description = "Referral created", body = CreateReferralRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Record a new client referral.
///
/// `firstName`, `lastInitial` and `referralPartner` are required; everything
/// else defaults. Creation also appends an intake entry to the activity feed.
async fn create_referral(
    State(state): State<AppState>,
    Json(req): Json<CreateReferralReq>,
) -> Result<(StatusCode, Json<CreateReferralRes>), Failure> {
    if req.first_name.trim().is_empty()
        || req.last_initial.trim().is_empty()
        || req.referral_partner.trim().is_empty()
    {
        return Err(required_fields(
            "firstName, lastInitial, and referralPartner are required",
        ));
    }

    let input = NewReferral {
        first_name: req.first_name,
        last_initial: req.last_initial,
        phone: req.phone,
        dob: req.dob,
        referral_partner: req.referral_partner,
        bed_type: req.bed_type,
        urgency: req.urgency,
        date_referred: req.date_referred,
        status: req.status,
        waitlist_priority: req.waitlist_priority,
        staff_notes: req.staff_notes,
        partner_notes: req.partner_notes,
    };

    match state.service.create_referral(input) {
        Ok(referral) => Ok((StatusCode::CREATED, Json(CreateReferralRes { referral }))),
        Err(e) => Err(failure("create referral", e)),
    }
}

#[utoipa::path(
    patch,
    path = "/referrals",
    request_body = UpdateReferralStatusReq,
    responses(
        (status = 200, description = "Status updated", body = SuccessRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 404, description = "Referral not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Move a referral to a new status.
async fn update_referral_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateReferralStatusReq>,
) -> Result<Json<SuccessRes>, Failure> {
    if req.id.is_empty() || req.status.is_empty() {
        return Err(required_fields("id and status are required"));
    }
    match state.service.update_referral_status(&req.id, &req.status) {
        Ok(()) => Ok(Json(SuccessRes { success: true })),
        Err(e) => Err(failure("update referral status", e)),
    }
}

#[utoipa::path(
    get,
    path = "/beds",
    responses(
        (status = 200, description = "All beds by facility and number", body = ListBedsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List the bed inventory.
async fn list_beds(State(state): State<AppState>) -> Result<Json<ListBedsRes>, Failure> {
    match state.service.list_beds() {
        Ok(beds) => Ok(Json(ListBedsRes { beds })),
        Err(e) => Err(failure("list beds", e)),
    }
}

/// Response body of `POST /beds`: a single bed or the full replacement set.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum CreateBedResponse {
    Single(CreateBedRes),
    Bulk(ListBedsRes),
}

#[utoipa::path(
    post,
    path = "/beds",
    request_body = CreateBedReq,
    responses(
        (status = 201, description = "Bed(s) created", body = CreateBedRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a bed, or bulk-replace the whole inventory.
///
/// With `{ "bulk": true, "beds": [...] }` the existing collection is wiped
/// and replaced with the supplied set in one transaction. Otherwise a single
/// bed is created from the flat fields.
async fn create_bed(
    State(state): State<AppState>,
    Json(req): Json<CreateBedReq>,
) -> Result<(StatusCode, Json<CreateBedResponse>), Failure> {
    if req.bulk {
        if let Some(beds) = req.beds {
            let inputs: Vec<NewBed> = beds
                .into_iter()
                .map(|bed| NewBed {
                    id: (!bed.id.is_empty()).then_some(bed.id),
                    bed_number: bed.bed_number,
                    facility_id: bed.facility_id,
                    facility_name: bed.facility_name,
                    status: (!bed.status.is_empty()).then_some(bed.status),
                })
                .collect();

            return match state.service.replace_beds(inputs) {
                Ok(beds) => Ok((
                    StatusCode::CREATED,
                    Json(CreateBedResponse::Bulk(ListBedsRes { beds })),
                )),
                Err(e) => Err(failure("bulk create beds", e)),
            };
        }
        return Err(required_fields("bulk requests must include beds"));
    }

    if req.bed_number.trim().is_empty()
        || req.facility_id.trim().is_empty()
        || req.facility_name.trim().is_empty()
    {
        return Err(required_fields(
            "bedNumber, facilityId, and facilityName are required",
        ));
    }

    let input = NewBed {
        id: (!req.id.is_empty()).then_some(req.id),
        bed_number: req.bed_number,
        facility_id: req.facility_id,
        facility_name: req.facility_name,
        status: (!req.status.is_empty()).then_some(req.status),
    };

    match state.service.create_bed(input) {
        Ok(bed) => Ok((
            StatusCode::CREATED,
            Json(CreateBedResponse::Single(CreateBedRes { bed })),
        )),
        Err(e) => Err(failure("create bed", e)),
    }
}

#[utoipa::path(
    patch,
    path = "/beds",
    request_body = UpdateBedStatusReq,
    responses(
        (status = 200, description = "Status updated", body = SuccessRes),
        (status = 400, description = "Missing or invalid fields", body = ErrorRes),
        (status = 404, description = "Bed not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Change a bed's status.
async fn update_bed_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateBedStatusReq>,
) -> Result<Json<SuccessRes>, Failure> {
    if req.id.is_empty() || req.status.is_empty() {
        return Err(required_fields("id and status are required"));
    }
    match state.service.update_bed_status(&req.id, &req.status) {
        Ok(()) => Ok(Json(SuccessRes { success: true })),
        Err(e) => Err(failure("update bed status", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/beds",
    params(DeleteBedParams),
    responses(
        (status = 200, description = "Bed deleted", body = SuccessRes),
        (status = 400, description = "Missing id", body = ErrorRes),
        (status = 404, description = "Bed not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Remove a bed from the inventory.
async fn delete_bed(
    State(state): State<AppState>,
    Query(params): Query<DeleteBedParams>,
) -> Result<Json<SuccessRes>, Failure> {
    let Some(id) = params.id.filter(|id| !id.is_empty()) else {
        return Err(required_fields("id is required"));
    };
    match state.service.delete_bed(&id) {
        Ok(()) => Ok(Json(SuccessRes { success: true })),
        Err(e) => Err(failure("delete bed", e)),
    }
}

#[utoipa::path(
    get,
    path = "/facilities",
    responses(
        (status = 200, description = "Per-facility bed summaries", body = FacilitiesRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Derived facility summaries, one per facility with beds.
async fn list_facilities(State(state): State<AppState>) -> Result<Json<FacilitiesRes>, Failure> {
    match state.service.facilities() {
        Ok(facilities) => Ok(Json(FacilitiesRes { facilities })),
        Err(e) => Err(failure("list facilities", e)),
    }
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Dashboard aggregate snapshot", body = StatsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// The dashboard statistics snapshot.
async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<StatsRes>, Failure> {
    match state.service.dashboard_stats() {
        Ok(stats) => Ok(Json(StatsRes { stats })),
        Err(e) => Err(failure("dashboard stats", e)),
    }
}

#[utoipa::path(
    get,
    path = "/activity",
    responses(
        (status = 200, description = "Most recent activity entries", body = ActivityRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// The recent-activity feed (most recent 20 entries).
async fn recent_activity(State(state): State<AppState>) -> Result<Json<ActivityRes>, Failure> {
    match state.service.recent_activity(ACTIVITY_FEED_LIMIT) {
        Ok(activities) => Ok(Json(ActivityRes { activities })),
        Err(e) => Err(failure("recent activity", e)),
    }
}
