//! Users API handlers.
//!
//! ```text
//! POST  /api/v1/users                         {"walletAddress":"0xABC","username":"ada"}
//! POST  /api/v1/users/login                   {"walletAddress":"0xABC"}
//! GET   /api/v1/users/search?q=ada
//! GET   /api/v1/users/random?limit=5
//! GET   /api/v1/users/{walletAddress}
//! GET   /api/v1/users/{walletAddress}/id
//! PATCH /api/v1/users/{walletAddress}         {"bio":"Studies maths"}
//! GET   /api/v1/users/{walletAddress}/avatar
//! ```
//!
//! Handlers only translate between HTTP and the [`UserAccounts`] port; every
//! failure is rendered through [`ApiError`].
//!
//! [`UserAccounts`]: crate::domain::ports::UserAccounts

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::DEFAULT_RANDOM_USERS;
use crate::domain::{Avatar, NewUser, User, UserChanges, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/users/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F")]
    pub wallet_address: String,
}

/// Query string for `GET /api/v1/users/search`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring; empty matches every user.
    #[serde(default)]
    pub q: String,
}

/// Query string for `GET /api/v1/users/random`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RandomQuery {
    /// Number of users to return (default 20, capped at 100).
    pub limit: Option<u32>,
}

/// Response body for `GET /api/v1/users/{walletAddress}/id`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserIdResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Log a user in by wallet address.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = User),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Unknown wallet", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "loginUser"
)]
#[post("/users/login")]
pub async fn login_user(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.login_user(&payload.wallet_address).await?;
    Ok(web::Json(user))
}

/// Search users by a case-insensitive substring.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.search_users(&query.q).await?;
    Ok(web::Json(users))
}

/// Sample users at random.
#[utoipa::path(
    get,
    path = "/api/v1/users/random",
    params(RandomQuery),
    responses(
        (status = 200, description = "Random users", body = [User]),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "randomUsers"
)]
#[get("/users/random")]
pub async fn random_users(
    state: web::Data<HttpState>,
    query: web::Query<RandomQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RANDOM_USERS);
    let users = state.users.random_users(limit).await?;
    Ok(web::Json(users))
}

/// Fetch a user by wallet address.
#[utoipa::path(
    get,
    path = "/api/v1/users/{walletAddress}",
    params(("walletAddress" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Unknown wallet", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUserByWalletAddress"
)]
#[get("/users/{wallet_address}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user_by_wallet_address(&path).await?;
    Ok(web::Json(user))
}

/// Fetch only the identifier of a user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{walletAddress}/id",
    params(("walletAddress" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "User identifier", body = UserIdResponse),
        (status = 404, description = "Unknown wallet", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUserIdByWalletAddress"
)]
#[get("/users/{wallet_address}/id")]
pub async fn get_user_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserIdResponse>> {
    let id = state.users.get_user_id_by_wallet_address(&path).await?;
    Ok(web::Json(UserIdResponse { id }))
}

/// Apply a partial profile update.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{walletAddress}",
    params(("walletAddress" = String, Path, description = "Wallet address")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Unknown wallet", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{wallet_address}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserChanges>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .update_user(&path, payload.into_inner())
        .await?;
    Ok(web::Json(user))
}

/// Fetch a user's avatar; unknown wallets yield `{"avatar": null}`.
#[utoipa::path(
    get,
    path = "/api/v1/users/{walletAddress}/avatar",
    params(("walletAddress" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "Avatar", body = Avatar),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUserAvatar"
)]
#[get("/users/{wallet_address}/avatar")]
pub async fn get_user_avatar(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Avatar>> {
    let avatar = state.users.get_user_avatar(&path).await?;
    Ok(web::Json(avatar))
}

/// Register user routes; literal segments come before the wallet matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(login_user)
        .service(search_users)
        .service(random_users)
        .service(get_user_id)
        .service(get_user_avatar)
        .service(get_user)
        .service(update_user);
}
