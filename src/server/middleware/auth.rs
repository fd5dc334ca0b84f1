//! Authentication middleware
//!
//! Verifies the bearer token on every protected route and stashes the
//! resulting [`AuthContext`] in request extensions for handlers to pick up.
//! Guards never see a request without a verified subject id and role set.

use crate::auth::AuthContext;
use crate::server::AppState;
use crate::utils::error::BoardError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Routes that do not require a bearer token
fn is_public_route(path: &str) -> bool {
    path == "/health"
}

/// Pull the token out of the Authorization header
fn extract_bearer(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Short-circuit the request with the error's response
fn reject<B>(req: ServiceRequest, err: BoardError) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    let res = err.error_response().map_into_right_body();
    ServiceResponse::new(req, res)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let Some(token) = extract_bearer(&req) else {
            debug!(path = %req.path(), "Missing bearer token");
            let res = reject(req, BoardError::unauthorized("Missing bearer token"));
            return Box::pin(ready(Ok(res)));
        };

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            let res = reject(req, BoardError::internal("Application state not configured"));
            return Box::pin(ready(Ok(res)));
        };

        match state.auth.verify_token(&token) {
            Ok(context) => {
                req.extensions_mut().insert(context);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(e) => {
                warn!(path = %req.path(), error = %e, "Bearer token rejected");
                let res = reject(req, BoardError::unauthorized("Invalid bearer token"));
                Box::pin(ready(Ok(res)))
            }
        }
    }
}

/// Extract the verified caller identity placed by the middleware
pub fn get_auth_context(req: &HttpRequest) -> Result<AuthContext, BoardError> {
    req.extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| BoardError::internal("Missing auth context"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("/health"));
        assert!(!is_public_route("/api/jobs"));
        assert!(!is_public_route("/api/labs"));
    }

    #[test]
    fn test_extract_bearer() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_srv_request();
        assert_eq!(extract_bearer(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert!(extract_bearer(&req).is_none());

        let req = TestRequest::default().to_srv_request();
        assert!(extract_bearer(&req).is_none());
    }

    #[test]
    fn test_reject_builds_error_response() {
        let req = TestRequest::get().uri("/api/labs").to_srv_request();
        let res: ServiceResponse<EitherBody<actix_web::body::BoxBody>> =
            reject(req, BoardError::unauthorized("Missing bearer token"));
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
