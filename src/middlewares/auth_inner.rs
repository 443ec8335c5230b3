//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::{AppError, AppResult, AppState};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::auth_middleware::AccessLevel;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub level: AccessLevel,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let level = self.level;

        Box::pin(async move {
            match authorize(&req, level).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("접근 거부 ({} {}): {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 토큰 → 사용자 → 활성/권한 확인
async fn authorize(req: &ServiceRequest, level: AccessLevel) -> AppResult<AuthenticatedUser> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("AppState 가 등록되지 않았습니다".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Not authenticated".to_string()))?;

    let token = TokenService::extract_bearer_token(header)?;
    let user = state.auth.authenticate_token(token).await?;

    if level == AccessLevel::Admin && !user.is_admin {
        return Err(AppError::AuthorizationError("관리자 권한이 필요합니다".to_string()));
    }

    Ok(AuthenticatedUser::from(&user))
}
