//! # 사용자 생성 요청 DTO
//!
//! `POST /api/v1/user/register` 본문입니다.
//!
//! ## 검증 규칙
//!
//! - `username`: 3-50자
//! - `email`: 이메일 형식
//! - `password`: 8-50자
//!
//! 사용자명/이메일 중복 여부는 서비스 계층에서 확인합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::models::auth::Password;

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "username": "john_doe",
///   "email": "user@example.com",
///   "password": "SecurePass123"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "사용자명은 3-50자 사이여야 합니다"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_password_length"))]
    pub password: Password,
}

fn validate_password_length(password: &Password) -> Result<(), ValidationError> {
    if (8..=50).contains(&password.char_len()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("length");
        error.message = Some("비밀번호는 8-50자 사이여야 합니다".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: Password::new(password),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("john_doe", "john@example.com", "password123").validate().is_ok());
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(request("ab", "john@example.com", "password123").validate().is_err());
        assert!(request(&"a".repeat(51), "john@example.com", "password123").validate().is_err());
        assert!(request(&"a".repeat(50), "john@example.com", "password123").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = request("john_doe", "not-an-email", "password123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(request("john_doe", "john@example.com", "short").validate().is_err());
        assert!(request("john_doe", "john@example.com", &"p".repeat(51)).validate().is_err());
        assert!(request("john_doe", "john@example.com", "12345678").validate().is_ok());
    }

    #[test]
    fn test_password_error_does_not_leak_value() {
        let errors = request("john_doe", "john@example.com", "short-1").validate().unwrap_err();
        let field_errors = errors.field_errors();
        let password_errors = field_errors.get("password").unwrap();

        assert!(password_errors.iter().flat_map(|e| e.params.values()).all(|v| v != "short-1"));
        assert!(!errors.to_string().contains("short-1"));
    }
}
