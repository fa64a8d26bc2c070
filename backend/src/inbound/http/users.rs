//! Account API handlers mounted under `/user`.
//!
//! ```text
//! GET  /user/getActiveUser
//! GET  /user/507f1f77bcf86cd799439011
//! POST /user/signup {"userSignup":{"username":"ada","email":"ada@example.com","password":"correct horse"}}
//! POST /user/login  {"userLogin":{"username":"ada","password":"correct horse"}}
//! POST /user/logout
//! ```
//!
//! Handlers only extract input, call one `UserService` method and translate
//! the outcome. Account rules live behind the port.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, SignupDetails, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserResponseSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const USER_NOT_FOUND: &str = "User not found";
const SIGNUP_FAILED: &str = "User could not be created";
const LOGIN_FAILED: &str = "Could not log in user";

/// Success payload shared by every user-returning route.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Signup fields nested under `userSignup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /user/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_signup: SignupPayload,
}

impl From<SignupPayload> for SignupDetails {
    fn from(value: SignupPayload) -> Self {
        Self::new(value.username, value.email, value.password)
    }
}

/// Login fields nested under `userLogin`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /user/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_login: LoginPayload,
}

impl From<LoginPayload> for LoginCredentials {
    fn from(value: LoginPayload) -> Self {
        Self::new(value.username, value.password)
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_request(format!("{raw} is not a valid ObjectId"))
            .with_details(json!({ "field": "id", "code": "invalid_object_id" }))
    })
}

async fn find_user(state: &HttpState, id: &UserId) -> ApiResult<User> {
    state
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

/// Return the user bound to the current session.
#[utoipa::path(
    get,
    path = "/user/getActiveUser",
    responses(
        (status = 200, description = "Logged-in user", body = UserResponseSchema),
        (status = 401, description = "No user logged in", body = ErrorSchema),
        (status = 404, description = "Session user no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getActiveUser"
)]
#[get("/getActiveUser")]
pub async fn get_active_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let id = session.require_user_id()?;
    let user = find_user(&state, &id).await?;
    Ok(web::Json(UserResponse { user }))
}

/// Fetch a user by object id.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "24-character hexadecimal object id")),
    responses(
        (status = 200, description = "User", body = UserResponseSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserById",
    security([])
)]
#[get("/{id}")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = find_user(&state, &id).await?;
    Ok(web::Json(UserResponse { user }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/user/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponseSchema),
        (status = 400, description = "Rejected signup or malformed body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let details = SignupDetails::from(payload.into_inner().user_signup);
    let user = state.users.signup(&details).await?.into_user(SIGNUP_FAILED)?;
    Ok(web::Json(UserResponse { user }))
}

/// Check credentials and bind the user to the session.
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = UserResponseSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Rejected credentials or malformed body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = LoginCredentials::from(payload.into_inner().user_login);
    let user = state
        .users
        .login(&credentials)
        .await?
        .into_user(LOGIN_FAILED)?;
    session.persist_user(user.id())?;
    info!(user_id = %user.id(), "user logged in");
    Ok(web::Json(UserResponse { user }))
}

/// Destroy the session and redirect to `/`.
#[utoipa::path(
    post,
    path = "/user/logout",
    responses(
        (status = 302, description = "Session destroyed", headers(("Location" = String)))
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Ok(Some(id)) = session.user_id() {
        info!(user_id = %id, "user logged out");
    }
    session.destroy();
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Mount the `/user` scope.
///
/// `getActiveUser` is registered ahead of `/{id}` so the literal segment wins.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use accounts::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(get_active_user)
            .service(signup)
            .service(login)
            .service(logout)
            .service(get_user_by_id),
    );
}
