//! OAuth CSRF state 레코드와 PKCE
//!
//! state 값은 운영체제 난수 64바이트의 SHA-256 을 소문자 hex 로 표현한 64자 문자열입니다.
//! VK 로그인에서는 `code_verifier` 가 같은 레코드에 함께 저장되어
//! 콜백 시 토큰 교환에 사용됩니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// `oauth_state:{state}` 키에 JSON 으로 저장되는 레코드
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthStateRecord {
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
}

impl OAuthStateRecord {
    /// 새 난수 state 로 레코드를 만듭니다.
    pub fn generate(code_verifier: Option<String>) -> Self {
        Self {
            state: generate_state(),
            created_at: Utc::now(),
            code_verifier,
        }
    }

    /// 생성 후 `max_age` 를 넘겼는지 확인합니다.
    pub fn is_older_than(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > max_age
    }
}

pub fn generate_state() -> String {
    let mut seed = [0u8; 64];
    rand::rng().fill_bytes(&mut seed);
    format!("{:x}", Sha256::digest(seed))
}

/// RFC 7636 PKCE verifier / S256 challenge 쌍
#[derive(Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    pub const METHOD: &'static str = "S256";

    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = Self::challenge_for(&verifier);

        Self { verifier, challenge }
    }

    pub fn challenge_for(verifier: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
    }
}

impl std::fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcePair")
            .field("verifier", &"[REDACTED]")
            .field("challenge", &self.challenge)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_64_lowercase_hex() {
        let state = generate_state();
        assert_eq!(state.len(), 64);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_states_are_distinct() {
        assert_ne!(generate_state(), generate_state());
    }

    #[test]
    fn test_pkce_challenge_rfc7636_vector() {
        // RFC 7636 Appendix B
        let challenge = PkcePair::challenge_for("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
        assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn test_pkce_pair_is_unpadded_base64url() {
        let pair = PkcePair::generate();
        assert_eq!(pair.verifier.len(), 43);
        assert!(!pair.verifier.contains('='));
        assert!(!pair.challenge.contains('='));
        assert_eq!(PkcePair::challenge_for(&pair.verifier), pair.challenge);
        assert!(!format!("{:?}", pair).contains(&pair.verifier));
    }

    #[test]
    fn test_age_check() {
        let mut record = OAuthStateRecord::generate(None);
        let now = Utc::now();
        assert!(!record.is_older_than(Duration::seconds(300), now));

        record.created_at = now - Duration::seconds(301);
        assert!(record.is_older_than(Duration::seconds(300), now));
    }

    #[test]
    fn test_record_json_shape() {
        let record = OAuthStateRecord::generate(Some("verifier".into()));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["state"], record.state);
        assert_eq!(json["code_verifier"], "verifier");
        assert!(json["created_at"].is_string());
    }
}
