//! # User Data Transfer Objects Module
//!
//! 회원가입, 로그인, OAuth 콜백, 이메일 확인 API 의 요청/응답 구조입니다.
//!
//! | Spring Security | 이 시스템 | 역할 |
//! |-----------------|-----------|------|
//! | `@RequestBody CreateUserDto` | `CreateUserRequest` | 회원가입 요청 |
//! | `OAuth2PasswordRequestForm` | `LoginForm` | 폼 로그인 요청 |
//! | `@ResponseBody UserDto` | `UserResponse` | 사용자 정보 응답 |
//! | `OAuth2AccessTokenResponse` | `TokenResponse` | 액세스 토큰 응답 |
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user.rs    # 회원가입 요청
//! │   └── auth_request.rs   # 로그인 폼, 쿼리 파라미터
//! └── response/
//!     └── user_response.rs  # 사용자/토큰/메시지 응답
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
