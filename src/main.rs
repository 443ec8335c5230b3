//! Task Pilot 백엔드 메인 애플리케이션
//!
//! 설정을 읽고 MongoDB, 상태 저장소(Redis 또는 인-프로세스), OAuth 프로바이더,
//! 메일 발송기를 초기화한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use task_pilot_backend::caching::{MemoryStateStore, RedisClient, StateStore};
use task_pilot_backend::config::{
    AuthConfig, DatabaseConfig, EmailConfig, Environment, ServerConfig, StateStoreConfig,
};
use task_pilot_backend::core::{AppComponents, AppResult, AppState};
use task_pilot_backend::db::Database;
use task_pilot_backend::repositories::{TodoRepository, UserRepository};
use task_pilot_backend::routes::configure_all_routes;
use task_pilot_backend::services::auth::providers::{build_http_client, ProviderRegistry};
use task_pilot_backend::services::auth::TokenService;
use task_pilot_backend::services::email::build_email_sender;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 Task Pilot 백엔드 시작중... (환경: {:?})", Environment::current());

    let state = match initialize_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ 초기화 실패: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 바인딩 주소는 `HOST` / `PORT` (기본값 `0.0.0.0:8000`) 입니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, Rate Limiting 설정 오류 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 저장소, 프로바이더, 서비스를 조립합니다
///
/// # Errors
///
/// * 운영 환경에서 `JWT_SECRET` 미설정
/// * MongoDB / Redis 연결 실패
/// * HTTP 클라이언트 생성 실패
async fn initialize_app_state() -> AppResult<AppState> {
    let auth_config = AuthConfig::from_env()?;

    info!("📡 데이터베이스 연결 중...");
    let database = Database::new(&DatabaseConfig::uri(), &DatabaseConfig::database_name()).await?;

    let user_store = Arc::new(UserRepository::new(&database).await?);
    let todo_store = Arc::new(TodoRepository::new(&database).await?);
    let state_store = initialize_state_store().await?;

    let http = build_http_client()?;
    let providers = ProviderRegistry::from_config(&auth_config, http.clone());
    if providers.enabled().is_empty() {
        warn!("활성화된 OAuth 프로바이더가 없습니다");
    }

    let email = build_email_sender(EmailConfig::from_env(), http);

    Ok(AppState::new(AppComponents {
        tokens: Arc::new(TokenService::new(&auth_config.jwt)),
        bcrypt_cost: auth_config.bcrypt_cost,
        user_store,
        todo_store,
        state_store,
        email,
        providers,
    }))
}

/// `REDIS_URL` 에 따라 상태 저장소를 선택합니다
///
/// `memory://` 는 인-프로세스 저장소로, 단일 인스턴스에서만 사용해야 합니다.
async fn initialize_state_store() -> AppResult<Arc<dyn StateStore>> {
    let url = StateStoreConfig::url();

    if StateStoreConfig::is_in_memory(&url) {
        warn!("⚠️ 인-프로세스 상태 저장소 사용 중 (다중 인스턴스 배포에 사용 금지)");
        return Ok(Arc::new(MemoryStateStore::new()));
    }

    Ok(Arc::new(RedisClient::connect(&url).await?))
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if dotenv::from_filename(".env.dev").is_err() {
                dotenv().ok();
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드 개발 서버(`localhost:3000`)와 `PUBLIC_BASE_URL` 을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin(&ServerConfig::public_base_url())
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
