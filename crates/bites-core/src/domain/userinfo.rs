use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile projection for a user. The reservation core never touches this
/// except during account purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Same id the identity provider hands out.
    pub id: Uuid,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}
