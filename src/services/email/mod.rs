//! # 확인 메일 발송
//!
//! 가입 직후 이메일 확인 링크를 보냅니다. 발송은 가입 성공 여부에 영향을 주지 않으며,
//! 실패는 호출 측에서 로그로만 남깁니다.
//!
//! | 구현 | 조건 |
//! |------|------|
//! | [`HttpEmailSender`] | `EMAIL_API_KEY`, `EMAIL_SENDER` 설정됨 (Brevo 호환 JSON API) |
//! | [`LogEmailSender`] | 그 외 (수신자만 로그로 남김) |

use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::config::EmailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> AppResult<()>;
}

pub const CONFIRMATION_SUBJECT: &str = "Task Pilot: подтверждение email";

pub fn confirmation_link(public_base_url: &str, token: &str) -> String {
    format!(
        "{}/api/v1/auth/confirm-email?token={}",
        public_base_url.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

pub fn confirmation_text(link: &str) -> String {
    format!(
        "Здравствуйте!\n\n\
         Для подтверждения адреса электронной почты перейдите по ссылке:\n{}\n\n\
         Ссылка действительна 12 часов.",
        link
    )
}

/// 설정에 따라 발송 구현을 선택합니다.
pub fn build_email_sender(config: EmailConfig, http: reqwest::Client) -> Arc<dyn EmailSender> {
    if config.is_configured() {
        log::info!("📧 HTTP 메일 발송 활성화: {}", config.api_url);
        Arc::new(HttpEmailSender::new(config, http))
    } else {
        log::warn!("EMAIL_API_KEY/EMAIL_SENDER 미설정, 확인 메일은 발송되지 않습니다");
        Arc::new(LogEmailSender)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: EmailAddress,
    to: Vec<EmailAddress>,
    subject: String,
    text_content: String,
}

/// Brevo 호환 트랜잭션 메일 API 발송기
pub struct HttpEmailSender {
    config: EmailConfig,
    http: reqwest::Client,
}

impl HttpEmailSender {
    pub fn new(config: EmailConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> AppResult<()> {
        let (Some(api_key), Some(sender)) = (&self.config.api_key, &self.config.sender) else {
            return Err(AppError::InternalError("메일 발송 설정이 없습니다".to_string()));
        };

        let body = SendEmailBody {
            sender: EmailAddress {
                email: sender.clone(),
                name: Some("Task Pilot".to_string()),
            },
            to: vec![EmailAddress {
                email: to.to_string(),
                name: None,
            }],
            subject: CONFIRMATION_SUBJECT.to_string(),
            text_content: confirmation_text(&confirmation_link(&self.config.public_base_url, token)),
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .header("api-key", api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .context("메일 API 요청 실패")?;

        let status = response.status();
        if status.is_success() {
            log::info!("확인 메일 발송: {}", to);
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(AppError::InternalError(format!(
            "메일 발송 실패 (status={}): {}",
            status, text
        )))
    }
}

/// 메일 API 가 설정되지 않은 환경용 발송기
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_confirmation_email(&self, to: &str, _token: &str) -> AppResult<()> {
        log::info!("확인 메일 발송 생략 (메일 API 미설정): {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_link() {
        assert_eq!(
            confirmation_link("http://localhost:8000/", "a.b.c"),
            "http://localhost:8000/api/v1/auth/confirm-email?token=a.b.c"
        );
    }

    #[test]
    fn test_confirmation_text_mentions_validity() {
        let text = confirmation_text("http://x/confirm");
        assert!(text.contains("http://x/confirm"));
        assert!(text.contains("12 часов"));
    }

    #[test]
    fn test_body_uses_camel_case() {
        let body = SendEmailBody {
            sender: EmailAddress { email: "noreply@taskpilot.dev".into(), name: None },
            to: vec![EmailAddress { email: "user@example.com".into(), name: None }],
            subject: "s".into(),
            text_content: "t".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["textContent"], "t");
        assert_eq!(json["to"][0]["email"], "user@example.com");
        assert!(json["sender"].get("name").is_none());
    }

    #[actix_web::test]
    async fn test_unconfigured_http_sender_fails() {
        let sender = HttpEmailSender::new(EmailConfig::default(), reqwest::Client::new());
        assert!(sender.send_confirmation_email("user@example.com", "tok").await.is_err());
    }
}
