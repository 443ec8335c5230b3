//! User Entity Implementation
//!
//! 로컬 가입과 OAuth 로그인을 모두 표현하는 사용자(Identity) 엔티티입니다.
//! 하드 삭제되지 않으며, 이메일 확인과 관리자 승격으로만 변경됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// - 로컬 가입 사용자: `is_active = false` 로 생성되고 이메일 확인 후 활성화
/// - OAuth 사용자: 빈 `password_hash`, `is_active = true`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// UUID v4 문자열
    #[serde(rename = "_id")]
    pub id: String,
    /// 사용자명 (unique)
    pub username: String,
    /// 이메일 (unique)
    pub email: String,
    /// bcrypt 해시. OAuth 사용자는 빈 문자열
    #[serde(default)]
    pub password_hash: String,
    /// 최초 가입 경로
    pub auth_provider: AuthProvider,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 이메일 확인 전의 비활성 로컬 사용자를 생성합니다.
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            auth_provider: AuthProvider::Local,
            is_active: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// OAuth 최초 로그인 사용자를 생성합니다.
    ///
    /// 사용자명은 `<provider>_<이메일 local-part>` 형식입니다.
    pub fn new_oauth(provider: AuthProvider, email: String) -> Self {
        let now = DateTime::now();

        Self {
            id: Uuid::new_v4().to_string(),
            username: Self::oauth_username(provider, &email),
            email,
            password_hash: String::new(),
            auth_provider: provider,
            is_active: true,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn oauth_username(provider: AuthProvider, email: &str) -> String {
        let local_part = email.split('@').next().unwrap_or(email);
        format!("{}_{}", provider.as_str(), local_part)
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}
