//! Bearer 토큰 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 토큰을 검증하고 사용자 정보를 추출합니다.
//! 실패 응답은 핸들러가 실행되기 전에 반환됩니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 토큰 없음 / 형식 오류 / 검증 실패 / 사용자 없음 | 401 |
//! | 비활성 사용자 | 400 |
//! | 관리자 스코프에 일반 사용자 | 403 |
//! | 저장소 오류 | 500 |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 접근에 필요한 권한 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// 활성 사용자
    User,
    /// 활성 관리자
    Admin,
}

pub struct AuthMiddleware {
    level: AccessLevel,
}

impl AuthMiddleware {
    pub fn new(level: AccessLevel) -> Self {
        Self { level }
    }

    /// 인증된 활성 사용자만 허용
    pub fn required() -> Self {
        Self::new(AccessLevel::User)
    }

    /// 관리자만 허용
    pub fn admin() -> Self {
        Self::new(AccessLevel::Admin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            level: self.level,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, http::StatusCode, test, web, App, HttpResponse};
    use serde_json::Value;
    use crate::domain::entities::User;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::repositories::{UserStore, UserUpdate};
    use crate::testing::TestContext;

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(user)
    }

    async fn user(ctx: &TestContext, name: &str, active: bool, admin: bool) -> String {
        let user = ctx
            .users
            .insert(User::new_local(name.to_string(), format!("{}@example.com", name), String::new()))
            .await
            .unwrap();
        ctx.users
            .update_fields(&user.id, UserUpdate { is_active: Some(active), is_admin: Some(admin) })
            .await
            .unwrap();
        ctx.state.auth.issue_session_token(&user, 15).unwrap()
    }

    async fn call(ctx: &TestContext, level: AccessLevel, token: Option<&str>) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .service(web::scope("").wrap(AuthMiddleware::new(level)).service(whoami)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/whoami");
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {}", token)));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let ctx = TestContext::new();
        let (status, body) = call(&ctx, AccessLevel::User, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthenticated");
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        let ctx = TestContext::new();
        let (status, _) = call(&ctx, AccessLevel::User, Some("not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_inactive_user_is_bad_request() {
        let ctx = TestContext::new();
        let token = user(&ctx, "sleepy", false, false).await;
        let (status, _) = call(&ctx, AccessLevel::User, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_active_user_passes() {
        let ctx = TestContext::new();
        let token = user(&ctx, "alice", true, false).await;
        let (status, body) = call(&ctx, AccessLevel::User, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
    }

    #[actix_web::test]
    async fn test_admin_scope() {
        let ctx = TestContext::new();
        let plain = user(&ctx, "alice", true, false).await;
        let admin = user(&ctx, "root", true, true).await;

        let (status, _) = call(&ctx, AccessLevel::Admin, Some(&plain)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = call(&ctx, AccessLevel::Admin, Some(&admin)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_admin"], true);
    }
}
