/// Authenticated caller for a request.
///
/// Inserted by the auth interceptor; every secured handler extracts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: String,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
