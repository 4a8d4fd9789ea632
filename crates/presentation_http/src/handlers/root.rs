//! Plaintext liveness banner

/// Banner returned by `GET /`
pub const ROOT_MESSAGE: &str = "Calendar Events API is running";

pub async fn root() -> &'static str {
    ROOT_MESSAGE
}
