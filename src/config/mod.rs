//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 상태 저장소, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT, OAuth 프로바이더(Google/Yandex/VK), 이메일 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! `PROFILE` 값에 따라 `.env.dev` / `.env.prod` 파일이 로드됩니다.
//!
//! ### 2. 명시적 주입 (Explicit Injection)
//!
//! 인증 관련 설정은 애플리케이션 시작 시 한 번만 읽어 값 객체로 만들고,
//! 이후에는 생성자를 통해 각 서비스에 전달됩니다.
//! 요청 처리 도중에 환경 변수를 다시 읽지 않습니다.
//!
//! ### 3. 프로바이더 선택 (Provider Selection)
//!
//! OAuth 프로바이더는 `*_CLIENT_ID` 환경 변수가 설정된 경우에만 활성화됩니다.
//! 설정되지 않은 프로바이더의 로그인 요청은 404로 응답합니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8000"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="taskpilot"
//! export REDIS_URL="redis://localhost:6379"   # memory:// 이면 인-프로세스 저장소
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_ALGORITHM="HS256"
//!
//! # OAuth (사용하는 프로바이더만)
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:8000/api/v1/auth/login/google/callback"
//! export YANDEX_CLIENT_ID="..."
//! export VK_CLIENT_ID="..."
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
