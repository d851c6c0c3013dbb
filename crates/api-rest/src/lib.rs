//! # API REST
//!
//! REST API implementation for Citas.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response types and `citas-core` for the state they operate on.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AppointmentQuery, AppointmentRes, AppointmentStatsRes, ArticleQuery, ArticleRes,
    CreateArticleReq, CreateDoctorReq, DoctorQuery, DoctorRes, ErrorRes, HealthRes,
    HealthService, ListAppointmentsRes, ListArticlesRes, ListDoctorsRes, ListSpecialtiesRes,
    SpecialtyRes, ValidateAppointmentReq, ValidateDoctorReq, ValidatePatientReq,
    ValidateRegistrationReq, ValidationRes,
};
use citas_core::store::{ArticleAction, DoctorAction};
use citas_core::validation::{AppointmentDraft, DoctorDraft, PatientDraft, RegistrationDraft};
use citas_core::{Catalogue, CoreConfig, CoreError, CoreResult, Store, Validate};
use citas_types::NonEmptyText;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers.
///
/// The store sits behind a `tokio::sync::RwLock`: list endpoints take read locks, creation takes
/// the write lock, and the last writer wins.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Loads the configured catalogue and builds a store using the configured filter sentinel.
    pub fn from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        let catalogue = Catalogue::from_config(cfg)?;
        Ok(Self::new(Store::new(catalogue, cfg.filter_sentinel())))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_specialties,
        list_doctors,
        create_doctor,
        list_articles,
        create_article,
        list_appointments,
        appointment_stats,
        validate_appointment,
        validate_doctor,
        validate_patient,
        validate_registration,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        SpecialtyRes,
        ListSpecialtiesRes,
        DoctorRes,
        ListDoctorsRes,
        CreateDoctorReq,
        ArticleRes,
        ListArticlesRes,
        CreateArticleReq,
        AppointmentRes,
        ListAppointmentsRes,
        AppointmentStatsRes,
        ValidateAppointmentReq,
        ValidateDoctorReq,
        ValidatePatientReq,
        ValidateRegistrationReq,
        ValidationRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/specialties", get(list_specialties))
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route("/articles", get(list_articles).post(create_article))
        .route("/appointments", get(list_appointments))
        .route("/appointments/stats", get(appointment_stats))
        .route("/validate/appointment", post(validate_appointment))
        .route("/validate/doctor", post(validate_doctor))
        .route("/validate/patient", post(validate_patient))
        .route("/validate/registration", post(validate_registration))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(err: CoreError) -> ApiError {
    let status = match &err {
        CoreError::InvalidInput(_) | CoreError::InvalidCatalogue(_) | CoreError::Text { .. } => {
            StatusCode::BAD_REQUEST
        }
        CoreError::DuplicateId { .. } => StatusCode::CONFLICT,
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("request failed: {err:?}");
        return (status, Json(ErrorRes::new("Internal error")));
    }
    (status, Json(ErrorRes::new(err.to_string())))
}

fn required(field: &'static str, value: &str) -> Result<(), ApiError> {
    NonEmptyText::new(value)
        .map(drop)
        .map_err(|source| error_response(CoreError::Text { field, source }))
}

fn new_id(requested: Option<String>) -> String {
    requested
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/specialties",
    responses(
        (status = 200, description = "All specialties", body = ListSpecialtiesRes)
    )
)]
#[axum::debug_handler]
async fn list_specialties(State(state): State<AppState>) -> Json<ListSpecialtiesRes> {
    let store = state.store.read().await;
    Json(ListSpecialtiesRes {
        specialties: store.specialties().iter().map(SpecialtyRes::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(DoctorQuery),
    responses(
        (status = 200, description = "Doctors matching every given filter", body = ListDoctorsRes)
    )
)]
/// Search the doctor directory
///
/// Every query parameter is optional. A parameter equal to the configured sentinel (`all` by
/// default) is ignored, as is an empty `q`.
#[axum::debug_handler]
async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DoctorQuery>,
) -> Json<ListDoctorsRes> {
    let store = state.store.read().await;
    let doctors = store.doctors.query(&query.into_selection());
    Json(ListDoctorsRes {
        doctors: doctors.into_iter().map(DoctorRes::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = CreateDoctorReq,
    responses(
        (status = 201, description = "Doctor added", body = DoctorRes),
        (status = 400, description = "Invalid doctor", body = ErrorRes),
        (status = 409, description = "Id already in use", body = ErrorRes)
    )
)]
/// Add a doctor to the in-memory directory
///
/// The doctor is appended to the end of the list and is lost on restart.
#[axum::debug_handler]
async fn create_doctor(
    State(state): State<AppState>,
    Json(req): Json<CreateDoctorReq>,
) -> Result<(StatusCode, Json<DoctorRes>), ApiError> {
    let id = new_id(req.id.clone());
    let doctor = req.into_doctor(id);
    required("name", &doctor.name)?;
    required("specialty", &doctor.specialty)?;
    if !doctor.has_valid_rating() {
        return Err(error_response(CoreError::InvalidInput(format!(
            "rating {} is outside [0, 5]",
            doctor.rating
        ))));
    }

    let res = DoctorRes::from(&doctor);
    state
        .store
        .write()
        .await
        .dispatch(DoctorAction::AddDoctor(doctor))
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    get,
    path = "/articles",
    params(ArticleQuery),
    responses(
        (status = 200, description = "Articles matching every given filter", body = ListArticlesRes)
    )
)]
#[axum::debug_handler]
async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> Json<ListArticlesRes> {
    let store = state.store.read().await;
    let articles = store.articles.query(&query.into_selection());
    Json(ListArticlesRes {
        articles: articles.into_iter().map(ArticleRes::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/articles",
    request_body = CreateArticleReq,
    responses(
        (status = 201, description = "Article published", body = ArticleRes),
        (status = 400, description = "Invalid article", body = ErrorRes),
        (status = 409, description = "Id already in use", body = ErrorRes)
    )
)]
/// Publish an article
///
/// New articles go to the top of the list. A missing publication date defaults to today (UTC).
#[axum::debug_handler]
async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<CreateArticleReq>,
) -> Result<(StatusCode, Json<ArticleRes>), ApiError> {
    let id = new_id(req.id.clone());
    let article = req.into_article(id, chrono::Utc::now().date_naive());
    required("title", &article.title)?;
    required("category", &article.category)?;
    if article.read_time == 0 {
        return Err(error_response(CoreError::InvalidInput(
            "readTime must be positive".into(),
        )));
    }

    let res = ArticleRes::from(&article);
    state
        .store
        .write()
        .await
        .dispatch(ArticleAction::AddArticle(article))
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    get,
    path = "/appointments",
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Appointments matching every given filter", body = ListAppointmentsRes)
    )
)]
#[axum::debug_handler]
async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentQuery>,
) -> Json<ListAppointmentsRes> {
    let store = state.store.read().await;
    let appointments = store.appointments.query(&query.into_selection());
    Json(ListAppointmentsRes {
        appointments: appointments.into_iter().map(AppointmentRes::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/appointments/stats",
    responses(
        (status = 200, description = "Counts over all appointments", body = AppointmentStatsRes)
    )
)]
#[axum::debug_handler]
async fn appointment_stats(State(state): State<AppState>) -> Json<AppointmentStatsRes> {
    let store = state.store.read().await;
    Json(store.appointment_stats().into())
}

#[utoipa::path(
    post,
    path = "/validate/appointment",
    request_body = ValidateAppointmentReq,
    responses(
        (status = 200, description = "Validation result", body = ValidationRes),
        (status = 400, description = "Unknown appointment type", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn validate_appointment(
    Json(req): Json<ValidateAppointmentReq>,
) -> Result<Json<ValidationRes>, ApiError> {
    let draft = AppointmentDraft::try_from(req).map_err(error_response)?;
    Ok(Json(draft.validate().into()))
}

#[utoipa::path(
    post,
    path = "/validate/doctor",
    request_body = ValidateDoctorReq,
    responses(
        (status = 200, description = "Validation result", body = ValidationRes)
    )
)]
#[axum::debug_handler]
async fn validate_doctor(Json(req): Json<ValidateDoctorReq>) -> Json<ValidationRes> {
    Json(DoctorDraft::from(req).validate().into())
}

#[utoipa::path(
    post,
    path = "/validate/patient",
    request_body = ValidatePatientReq,
    responses(
        (status = 200, description = "Validation result", body = ValidationRes)
    )
)]
#[axum::debug_handler]
async fn validate_patient(Json(req): Json<ValidatePatientReq>) -> Json<ValidationRes> {
    Json(PatientDraft::from(req).validate().into())
}

#[utoipa::path(
    post,
    path = "/validate/registration",
    request_body = ValidateRegistrationReq,
    responses(
        (status = 200, description = "Validation result", body = ValidationRes)
    )
)]
#[axum::debug_handler]
async fn validate_registration(Json(req): Json<ValidateRegistrationReq>) -> Json<ValidationRes> {
    Json(RegistrationDraft::from(req).validate().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Store::default()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("request should complete");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("valid request")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    fn ids(list: &Value) -> Vec<String> {
        list.as_array()
            .expect("array")
            .iter()
            .map(|item| item["id"].as_str().expect("id").to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_doctor_search_by_specialty() {
        let (status, body) = send(app(), get("/doctors?specialty=Cardiolog%C3%ADa")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["doctors"]), ["2"]);

        let (_, body) = send(app(), get("/doctors?specialty=all&availability=available")).await;
        assert_eq!(ids(&body["doctors"]), ["1", "2", "4", "5", "6"]);
    }

    #[tokio::test]
    async fn test_appointment_filters_and_stats() {
        let (_, body) = send(app(), get("/appointments?status=cancelada")).await;
        assert_eq!(ids(&body["appointments"]), ["5"]);

        let (_, body) = send(app(), get("/appointments?type=virtual&age=young")).await;
        assert_eq!(ids(&body["appointments"]), ["3", "5"]);

        let (_, body) = send(app(), get("/appointments/stats")).await;
        assert_eq!(body["total"], 6);
        assert_eq!(body["byStatus"]["confirmada"], 2);
    }

    #[tokio::test]
    async fn test_create_doctor_then_find_it() {
        let app = app();
        let new_doctor = json!({
            "id": "7",
            "name": "Dr. Pablo Núñez",
            "specialty": "Neurología",
            "rating": 4.2,
            "languages": ["Español"],
            "price": 65000,
            "available": true
        });

        let (status, body) = send(app.clone(), post_json("/doctors", new_doctor.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "7");

        let (_, body) = send(app.clone(), get("/doctors?q=neuro")).await;
        assert_eq!(ids(&body["doctors"]), ["7"]);

        let (status, _) = send(app, post_json("/doctors", new_doctor)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_doctor_rejects_bad_rating() {
        let (status, body) = send(
            app(),
            post_json(
                "/doctors",
                json!({ "name": "X", "specialty": "Y", "rating": 7.0, "price": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().expect("message").contains("rating"));
    }

    #[tokio::test]
    async fn test_create_doctor_rejects_blank_name() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            post_json(
                "/doctors",
                json!({ "name": "   ", "specialty": "Neurología", "rating": 4.0, "price": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().expect("message").contains("name"));

        let (_, body) = send(app, get("/doctors")).await;
        assert_eq!(body["doctors"].as_array().expect("array").len(), 6);
    }

    #[tokio::test]
    async fn test_new_article_is_listed_first() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            post_json(
                "/articles",
                json!({
                    "title": "Dormir bien",
                    "excerpt": "Hábitos de sueño",
                    "category": "Bienestar",
                    "author": "Dra. Laura Pérez",
                    "imageUrl": "https://example.com/sleep.png",
                    "readTime": 3
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let new_id = body["id"].as_str().expect("generated id").to_string();

        let (_, body) = send(app, get("/articles")).await;
        assert_eq!(ids(&body["articles"])[0], new_id);
        assert_eq!(body["articles"].as_array().expect("array").len(), 5);
    }

    #[tokio::test]
    async fn test_validate_endpoints() {
        let (status, body) = send(
            app(),
            post_json(
                "/validate/appointment",
                json!({
                    "pacienteId": 1,
                    "medicoId": 2,
                    "fechaCita": "2025-10-05",
                    "horaEntrada": "09:00",
                    "horaSalida": "09:00",
                    "especialidad": "Cardiología",
                    "motivo": "Control"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(
            body["errors"]["horaSalida"],
            "La hora de salida debe ser después de la hora de entrada"
        );

        let (_, body) = send(
            app(),
            post_json("/validate/patient", json!({ "email": "a@b" })),
        )
        .await;
        assert_eq!(body["errors"]["email"], "Email inválido");

        let (status, _) = send(
            app(),
            post_json("/validate/appointment", json!({ "tipoCita": "telefono" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
