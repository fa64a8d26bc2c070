//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the `/user` and health paths, the schema wrappers
//! from [`crate::inbound::http::schemas`] and the session cookie security
//! scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, UserResponseSchema, UserSchema,
};
use crate::inbound::http::users::{LoginPayload, LoginRequest, SignupPayload, SignupRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /user/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Accounts API",
        description = "Session-backed user accounts: signup, login, logout and lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::get_active_user,
        crate::inbound::http::users::get_user_by_id,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserResponseSchema,
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        SignupPayload,
        LoginRequest,
        LoginPayload,
    )),
    tags(
        (name = "users", description = "Account lookup, signup and session management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
