//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain-friendly
//! operations: binding a user id at login, reading it back, and tearing the
//! session down at logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Message returned when a request needs a logged-in user and has none.
pub const NOT_LOGGED_IN: &str = "User not logged in";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the authenticated user's id to the session.
    ///
    /// The session is renewed so a pre-login cookie cannot be replayed as an
    /// authenticated one.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id, if present and well formed.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match UserId::new(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(NOT_LOGGED_IN))
    }

    /// Drop every session entry and expire the cookie.
    pub fn destroy(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const FIXTURE_ID: &str = "507f1f77bcf86cd799439011";

    async fn persist(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(FIXTURE_ID).expect("fixture id");
        session.persist_user(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn require(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn destroy(session: SessionContext) -> HttpResponse {
        session.destroy();
        HttpResponse::Ok().finish()
    }

    async fn tamper(session: Session) -> HttpResponse {
        session
            .insert(USER_ID_KEY, "not-an-object-id")
            .expect("insert tampered id");
        HttpResponse::Ok().finish()
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route("/set", web::get().to(persist))
            .route("/get", web::get().to(require))
            .route("/destroy", web::get().to(destroy))
            .route("/tamper", web::get().to(tamper))
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(session_test_app()).await;

        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set.status(), StatusCode::OK);
        let cookie = session_cookie(&set).expect("session cookie set");

        let get = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get.status(), StatusCode::OK);
        assert_eq!(test::read_body(get).await, FIXTURE_ID);
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.message(), NOT_LOGGED_IN);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;
        let set =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&set).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn destroy_expires_the_cookie() {
        let app = test::init_service(session_test_app()).await;
        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/destroy")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let removal = session_cookie(&res).expect("removal cookie sent");
        assert_eq!(removal.value(), "");
    }
}
