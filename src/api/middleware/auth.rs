//! Owner authentication
//!
//! `OwnerAuth` validates the `Authorization: Bearer <jwt>` header and stores
//! the owner id in the request extensions, where handlers read it through
//! the `OwnerId` extractor.

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, trace};

use crate::api::jwt::get_jwt_service;
use crate::api::services::dashboard::{ApiResponse, ErrorCode};

/// Authenticated owner id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for OwnerId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<OwnerId>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unauthorized")),
        )
    }
}

/// Owner authentication middleware
#[derive(Clone)]
pub struct OwnerAuth;

impl<S, B> Transform<S, ServiceRequest> for OwnerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OwnerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct OwnerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> OwnerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: Invalid or missing token".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl<S, B> Service<ServiceRequest> for OwnerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // CORS 预检请求不带凭证
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            let Some(token) = Self::extract_bearer_token(&req) else {
                debug!("Owner authentication failed: missing bearer token");
                return Ok(Self::handle_unauthorized(req));
            };

            match get_jwt_service().validate_access_token(&token) {
                Ok(claims) => {
                    trace!("Bearer token accepted for owner {}", claims.sub);
                    req.extensions_mut().insert(OwnerId(claims.sub));
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    debug!("Owner authentication failed: {}", e);
                    Ok(Self::handle_unauthorized(req))
                }
            }
        })
    }
}
