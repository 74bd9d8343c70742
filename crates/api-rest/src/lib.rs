//! # API REST
//!
//! The DevDishes site API.
//!
//! Handles:
//! - HTTP endpoints with axum for browsing, matching, suggestions, details and submissions
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! The catalog is loaded once at startup and shared read-only by every handler. Detail lookups
//! and submissions are forwarded to the external recipe service.

#![warn(rust_2018_idioms)]

use api_shared::{
    CatalogQuery, CatalogRes, CategoriesRes, ErrorRes, HealthRes, HealthService, MatchReq,
    MatchRes, MatchedRecipe, SubmitRecipeRes, SuggestionsQuery, SuggestionsRes,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use devdishes_core::{
    constants::{ALL_CATEGORIES, RECIPE_NOT_FOUND},
    Difficulty, Recipe, RecipeDetail, RecipeError, RecipeId, RecipeService, RecipeSubmission,
    SelectionSet,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    service: RecipeService,
}

impl AppState {
    pub fn new(service: RecipeService) -> Self {
        Self { service }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_catalog,
        list_categories,
        get_catalog_recipe,
        match_ingredients,
        suggestions,
        get_recipe_detail,
        submit_recipe,
    ),
    components(schemas(
        HealthRes,
        CatalogRes,
        CategoriesRes,
        MatchReq,
        MatchRes,
        MatchedRecipe,
        SuggestionsRes,
        SubmitRecipeRes,
        ErrorRes,
        Recipe,
        RecipeDetail,
        RecipeSubmission,
        Difficulty,
    ))
)]
pub struct ApiDoc;

/// Build the site router with CORS and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(list_catalog))
        .route("/catalog/categories", get(list_categories))
        .route("/catalog/:id", get(get_catalog_recipe))
        .route("/match", post(match_ingredients))
        .route("/suggestions", get(suggestions))
        .route("/recipes", post(submit_recipe))
        .route("/recipes/:id", get(get_recipe_detail))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the site API until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, service: RecipeService) -> std::io::Result<()> {
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- DevDishes site API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("DevDishes site API shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: error.into(),
        }),
    )
}

/// Map a core error onto the status the site reports for it.
///
/// Client mistakes stay 4xx; anything that went wrong talking to the recipe service is a 502.
fn api_error(err: RecipeError) -> ApiError {
    let status = match &err {
        RecipeError::InvalidInput(_) | RecipeError::Text(_) => StatusCode::BAD_REQUEST,
        RecipeError::NotFound(_) => StatusCode::NOT_FOUND,
        RecipeError::Status { status, .. } if (400..500).contains(status) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    if status == StatusCode::BAD_GATEWAY {
        tracing::error!("recipe service error: {:?}", err);
    }
    error_response(status, err.user_message())
}

fn parse_id(raw: &str) -> Result<RecipeId, ApiError> {
    raw.parse::<RecipeId>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "recipe id cannot be empty"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the site API.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.service.catalog().len()))
}

#[utoipa::path(
    get,
    path = "/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Recipes matching the search and category", body = CatalogRes)
    )
)]
/// Browse the catalog.
///
/// A missing query matches everything; a missing category means `All`.
#[axum::debug_handler]
async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogRes> {
    let q = query.q.as_deref().unwrap_or_default();
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let recipes = state
        .service
        .catalog()
        .browse(q, category)
        .into_iter()
        .cloned()
        .collect();
    Json(CatalogRes { recipes })
}

#[utoipa::path(
    get,
    path = "/catalog/categories",
    responses(
        (status = 200, description = "All followed by each category in the catalog", body = CategoriesRes)
    )
)]
#[axum::debug_handler]
async fn list_categories(State(state): State<AppState>) -> Json<CategoriesRes> {
    Json(CategoriesRes {
        categories: state.service.catalog().categories(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe from the loaded catalog", body = Recipe),
        (status = 404, description = "No such recipe in the catalog", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_catalog_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .catalog()
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, RECIPE_NOT_FOUND))
}

#[utoipa::path(
    post,
    path = "/match",
    request_body = MatchReq,
    responses(
        (status = 200, description = "Recipes sharing at least one ingredient, best first", body = MatchRes)
    )
)]
/// Match the catalog against a list of ingredients.
///
/// Terms are lowercased and deduplicated before matching. An empty list matches nothing.
#[axum::debug_handler]
async fn match_ingredients(
    State(state): State<AppState>,
    Json(req): Json<MatchReq>,
) -> Json<MatchRes> {
    let selection = SelectionSet::from_terms(&req.ingredients);
    Json(MatchRes::build(state.service.catalog(), &selection))
}

#[utoipa::path(
    get,
    path = "/suggestions",
    params(SuggestionsQuery),
    responses(
        (status = 200, description = "Popular ingredients not yet selected", body = SuggestionsRes)
    )
)]
#[axum::debug_handler]
async fn suggestions(Query(query): Query<SuggestionsQuery>) -> Json<SuggestionsRes> {
    let suggestions = query
        .selection()
        .suggestions()
        .into_iter()
        .map(str::to_owned)
        .collect();
    Json(SuggestionsRes { suggestions })
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id on the recipe service")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found", body = ErrorRes),
        (status = 502, description = "Recipe service unavailable", body = ErrorRes)
    )
)]
/// Fetch recipe details from the recipe service.
#[axum::debug_handler]
async fn get_recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .recipe_detail(&id)
        .await
        .map(Json)
        .map_err(api_error)
}

#[utoipa::path(
    post,
    path = "/recipes",
    request_body = RecipeSubmission,
    responses(
        (status = 201, description = "Recipe accepted for review", body = SubmitRecipeRes),
        (status = 400, description = "Invalid submission", body = ErrorRes),
        (status = 502, description = "Recipe service unavailable", body = ErrorRes)
    )
)]
/// Submit a recipe to the recipe service.
///
/// The form is cleaned and validated here before anything is sent.
#[axum::debug_handler]
async fn submit_recipe(
    State(state): State<AppState>,
    Json(submission): Json<RecipeSubmission>,
) -> Result<(StatusCode, Json<SubmitRecipeRes>), ApiError> {
    match state.service.submit(submission).await {
        Ok(receipt) => Ok((StatusCode::CREATED, Json(receipt.into()))),
        Err(e) => {
            tracing::warn!("recipe submission failed: {}", e);
            Err(api_error(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use devdishes_core::{seed::embedded_seed, Catalog, CoreConfig, RecipeGateway};
    use tower::ServiceExt;

    async fn upstream(app: Option<Router>) -> RecipeGateway {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        match app {
            Some(app) => {
                tokio::spawn(async move {
                    axum::serve(listener, app).await.unwrap();
                });
            }
            None => drop(listener),
        }
        let cfg = CoreConfig::new(&format!("http://{addr}"), None, None).unwrap();
        RecipeGateway::new(&cfg).unwrap()
    }

    async fn app_with(upstream_app: Option<Router>) -> Router {
        let gateway = upstream(upstream_app).await;
        let catalog = Catalog::new(embedded_seed().unwrap());
        router(AppState::new(RecipeService::new(catalog, gateway)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, json) = send(app_with(None).await, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn test_catalog_defaults_to_everything() {
        let seed_len = embedded_seed().unwrap().len();
        let (status, json) = send(app_with(None).await, get_req("/catalog")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recipes"].as_array().unwrap().len(), seed_len);
    }

    #[tokio::test]
    async fn test_catalog_filters_by_query_and_category() {
        let (_, json) = send(
            app_with(None).await,
            get_req("/catalog?q=pasta&category=Italian"),
        )
        .await;
        let recipes = json["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0]["name"], "Classic Spaghetti Carbonara");

        let (_, json) = send(app_with(None).await, get_req("/catalog?category=Dessert")).await;
        assert!(json["recipes"]
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["category"] == "Dessert"));
    }

    #[tokio::test]
    async fn test_categories_start_with_all() {
        let (_, json) = send(app_with(None).await, get_req("/catalog/categories")).await;
        let categories = json["categories"].as_array().unwrap();
        assert_eq!(categories[0], "All");
        assert!(categories.iter().any(|c| c == "Seafood"));
    }

    #[tokio::test]
    async fn test_catalog_recipe_lookup() {
        let (status, json) = send(app_with(None).await, get_req("/catalog/3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Garlic Butter Shrimp");

        let (status, json) = send(app_with(None).await, get_req("/catalog/404")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn test_match_ranks_and_scores() {
        let (status, json) = send(
            app_with(None).await,
            post_json(
                "/match",
                serde_json::json!({"ingredients": ["Garlic", "butter", "garlic"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["selected"], serde_json::json!(["garlic", "butter"]));

        let matches = json["matches"].as_array().unwrap();
        assert!(!matches.is_empty());
        assert_eq!(matches[0]["recipe"]["name"], "Garlic Butter Shrimp");
        assert_eq!(matches[0]["match_percentage"], 100);
    }

    #[tokio::test]
    async fn test_match_with_no_ingredients_is_empty() {
        let (status, json) = send(
            app_with(None).await,
            post_json("/match", serde_json::json!({"ingredients": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggestions_skip_selected() {
        let (_, json) = send(
            app_with(None).await,
            get_req("/suggestions?selected=chicken,beef"),
        )
        .await;
        let suggestions = json["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 12);
        assert_eq!(suggestions[0], "salmon");
    }

    #[tokio::test]
    async fn test_recipe_detail_proxies_and_maps_not_found() {
        let upstream_app = Router::new().route(
            "/recipes/:id",
            get(|Path(id): Path<u64>| async move {
                if id == 5 {
                    Ok(axum::Json(serde_json::json!({
                        "id": 5, "name": "Stew", "content": "Slow cooked", "image": null
                    })))
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            }),
        );
        let app = app_with(Some(upstream_app)).await;

        let (status, json) = send(app.clone(), get_req("/recipes/5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Stew");
        assert_eq!(json["content"], "Slow cooked");

        let (status, json) = send(app, get_req("/recipes/6")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn test_recipe_detail_unreachable_service_is_bad_gateway() {
        let (status, json) = send(app_with(None).await, get_req("/recipes/1")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().starts_with("request failed: "));
    }

    #[tokio::test]
    async fn test_submit_recipe_accepted() {
        let upstream_app = Router::new().route(
            "/recipes",
            post(|| async {
                (
                    StatusCode::CREATED,
                    axum::Json(serde_json::json!({"message": "Recipe added successfully", "id": 42})),
                )
            }),
        );
        let (status, json) = send(
            app_with(Some(upstream_app)).await,
            post_json(
                "/recipes",
                serde_json::json!({
                    "name": "Toast",
                    "ingredients": ["bread", ""],
                    "instructions": ["Toast it."]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], 42);
        assert_eq!(
            json["message"],
            "Recipe submitted successfully! It will be reviewed before being published."
        );
    }

    #[tokio::test]
    async fn test_submit_recipe_rejects_invalid_form_locally() {
        let (status, json) = send(
            app_with(None).await,
            post_json("/recipes", serde_json::json!({"name": "  ", "ingredients": ["x"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("name is required"));
    }

    #[tokio::test]
    async fn test_submit_recipe_surfaces_service_error() {
        let upstream_app = Router::new().route(
            "/recipes",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(serde_json::json!({"error": "name required"})),
                )
            }),
        );
        let (status, json) = send(
            app_with(Some(upstream_app)).await,
            post_json(
                "/recipes",
                serde_json::json!({"name": "Toast", "ingredients": ["bread"], "instructions": ["Toast."]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "name required");
    }

    #[tokio::test]
    async fn test_submit_recipe_unreachable_service_is_bad_gateway() {
        let (status, json) = send(
            app_with(None).await,
            post_json(
                "/recipes",
                serde_json::json!({"name": "Toast", "ingredients": ["bread"], "instructions": ["Toast."]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].as_str().unwrap().starts_with("request failed"));
    }
}
