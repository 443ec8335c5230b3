use serde::{Deserialize, Serialize};

/// OAuth 프로바이더에서 확인된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderUserInfo {
    pub email: String,
    pub display_name: Option<String>,
}
