use crate::error::{AppError, AppResult};
use crate::utils::jwt::{JwtService, ROLE_ADMIN};
use actix_web::http::Method;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Authenticated identity stored in request extensions by the middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Bearer authentication is optional at the middleware level: a valid token
/// attaches an `AuthUser`, a malformed or expired one is rejected outright,
/// and no token at all passes through so guest flows (cart, wishlist) keep
/// working. Handlers that need an identity call `require_user` or
/// `require_admin`.
pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials.
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        let token = match token {
            Some(t) => t,
            None => return Box::pin(self.service.call(req)),
        };

        match self.jwt_service.verify_token(&token) {
            Ok(claims) => {
                let user = AuthUser {
                    id: claims.sub.parse::<i64>().unwrap_or(0),
                    email: claims.email,
                    role: claims.role,
                };
                req.extensions_mut().insert(user);
                Box::pin(self.service.call(req))
            }
            Err(_) => {
                let error = AppError::AuthError("Invalid access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

pub fn current_user(req: &HttpRequest) -> Option<AuthUser> {
    req.extensions().get::<AuthUser>().cloned()
}

pub fn require_user(req: &HttpRequest) -> AppResult<AuthUser> {
    current_user(req).ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

pub fn require_admin(req: &HttpRequest) -> AppResult<AuthUser> {
    let user = require_user(req)?;
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

/// Opaque guest identifier supplied by the client.
pub fn session_id(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
