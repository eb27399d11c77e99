//! JSON HTTP surface over the storefront.

use std::sync::Arc;

use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::{get, patch, post}, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::assistant::{self, prompt, AssistantSession, TextGenerator};
use crate::auth::LoginForm;
use crate::domain::aggregates::{Cart, Catalog, Product, SellListing};
use crate::domain::value_objects::CategoryFilter;
use crate::payment::PaymentSimulator;
use crate::storefront::{OrderConfirmation, Storefront};
use crate::{ChatTurn, ShopError, User};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Storefront>>,
    pub assistant: Arc<Mutex<AssistantSession>>,
    pub generator: Arc<dyn TextGenerator>,
    pub payments: PaymentSimulator,
}

impl AppState {
    pub fn new(store: Storefront, assistant: AssistantSession, generator: Arc<dyn TextGenerator>, payments: PaymentSimulator) -> Self {
        Self { store: Arc::new(Mutex::new(store)), assistant: Arc::new(Mutex::new(assistant)), generator, payments }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "shoporbit"})) }))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/products", get(list_products).post(create_listing))
        .route("/api/v1/products/:id", get(get_product))
        .route("/api/v1/products/:id/pitch", get(get_pitch))
        .route("/api/v1/cart", get(get_cart).post(add_to_cart))
        .route("/api/v1/cart/:id", patch(adjust_quantity).delete(remove_from_cart))
        .route("/api/v1/checkout", post(checkout))
        .route("/api/v1/session", get(current_user).post(login).delete(logout))
        .route("/api/v1/assistant", get(get_transcript).post(send_message))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = match &self {
            ShopError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            ShopError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ShopError::LoginRequired => StatusCode::UNAUTHORIZED,
            ShopError::EmptyCart | ShopError::DuplicateProduct(_) | ShopError::AssistantBusy | ShopError::CheckoutInProgress => StatusCode::CONFLICT,
            ShopError::StorageError(_) | ShopError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() { tracing::error!(error = %self, "request failed"); }
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

type ApiResult<T> = Result<T, ShopError>;

/// Runs work that must finish even if the client goes away mid-request.
async fn run_to_completion<T, F>(work: F) -> ApiResult<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work).await.map_err(|e| ShopError::Internal(e.to_string()))
}

#[derive(Debug, Serialize)]
pub struct ProductView { #[serde(flatten)] pub product: Product, pub low_stock: bool }

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self { Self { product: p.clone(), low_stock: p.is_low_stock() } }
}

#[derive(Debug, Deserialize)] pub struct BrowseParams { pub category: Option<String>, pub search: Option<String> }
#[derive(Debug, Serialize)] pub struct BrowseResponse { pub category: String, pub data: Vec<ProductView>, pub total: usize }

async fn list_categories() -> Json<Vec<&'static str>> { Json(Catalog::categories()) }

async fn list_products(State(s): State<AppState>, Query(p): Query<BrowseParams>) -> Json<BrowseResponse> {
    let category = CategoryFilter::parse(p.category.as_deref());
    let store = s.store.lock().await;
    let data: Vec<ProductView> = store.browse(&category, p.search.as_deref().unwrap_or("")).into_iter().map(ProductView::from).collect();
    Json(BrowseResponse { category: category.to_string(), total: data.len(), data })
}

async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<ProductView>> {
    let store = s.store.lock().await;
    let view = ProductView::from(store.product(&id)?);
    Ok(Json(view))
}

async fn create_listing(State(s): State<AppState>, Json(r): Json<SellListing>) -> ApiResult<(StatusCode, Json<ProductView>)> {
    let mut store = s.store.lock().await;
    let product = store.list_product(r)?;
    Ok((StatusCode::CREATED, Json(ProductView::from(product))))
}

#[derive(Debug, Serialize)] pub struct PitchResponse { pub product_id: String, pub pitch: String }

async fn get_pitch(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<PitchResponse>> {
    let name = s.store.lock().await.product(&id)?.name().to_string();
    let pitch = assistant::pitch(s.generator.as_ref(), &name).await;
    Ok(Json(PitchResponse { product_id: id, pitch }))
}

async fn get_cart(State(s): State<AppState>) -> Json<Cart> {
    let cart = s.store.lock().await.cart().clone();
    Json(cart)
}

#[derive(Debug, Deserialize)] pub struct AddToCartRequest { pub product_id: String }
#[derive(Debug, Deserialize)] pub struct AdjustQuantityRequest { pub delta: i64 }

async fn add_to_cart(State(s): State<AppState>, Json(r): Json<AddToCartRequest>) -> ApiResult<(StatusCode, Json<Cart>)> {
    let mut store = s.store.lock().await;
    let cart = store.add_to_cart(&r.product_id)?.clone();
    Ok((StatusCode::CREATED, Json(cart)))
}

async fn adjust_quantity(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<AdjustQuantityRequest>) -> Json<Cart> {
    let cart = s.store.lock().await.adjust_quantity(&id, r.delta).clone();
    Json(cart)
}

async fn remove_from_cart(State(s): State<AppState>, Path(id): Path<String>) -> Json<Cart> {
    let cart = s.store.lock().await.remove_from_cart(&id).clone();
    Json(cart)
}

async fn checkout(State(s): State<AppState>) -> ApiResult<Json<OrderConfirmation>> {
    let pending = s.store.lock().await.begin_checkout()?;
    let (store, payments) = (s.store.clone(), s.payments.clone());
    let confirmation = run_to_completion(async move {
        let receipt = payments.pay(pending.amount().clone()).await;
        let confirmation = store.lock().await.complete_checkout(pending, receipt);
        confirmation
    })
    .await?;
    Ok(Json(confirmation))
}

async fn current_user(State(s): State<AppState>) -> Json<Option<User>> {
    let user = s.store.lock().await.user().cloned();
    Json(user)
}

async fn login(State(s): State<AppState>, Json(r): Json<LoginForm>) -> ApiResult<Json<User>> {
    let user = s.store.lock().await.login(r)?.clone();
    Ok(Json(user))
}

async fn logout(State(s): State<AppState>) -> ApiResult<StatusCode> {
    s.store.lock().await.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_transcript(State(s): State<AppState>) -> Json<Vec<ChatTurn>> {
    let transcript = s.assistant.lock().await.transcript().to_vec();
    Json(transcript)
}

#[derive(Debug, Deserialize)] pub struct SendMessageRequest { pub message: String }

async fn send_message(State(s): State<AppState>, Json(r): Json<SendMessageRequest>) -> ApiResult<Json<ChatTurn>> {
    if r.message.trim().is_empty() {
        return Err(ShopError::Validation("Message must not be empty.".into()));
    }
    let preamble = prompt::preamble(s.store.lock().await.catalog().products());
    let request = s.assistant.lock().await.submit(&r.message, preamble).ok_or(ShopError::AssistantBusy)?;
    let (assistant, generator) = (s.assistant.clone(), s.generator.clone());
    let turn = run_to_completion(async move {
        let reply = generator.generate(&request).await;
        let turn = assistant.lock().await.record_reply(reply);
        turn
    })
    .await?;
    Ok(Json(turn))
}
