//! Request-scoped state handed to handlers.

use rustc_hash::{FxHashMap, FxHashSet};

/// Where a shortcode is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Rendering inside the admin area (editor previews, list screens).
    pub is_admin: bool,
    /// Post whose content is being rendered, if any.
    pub post_id: Option<u64>,
}

impl RenderContext {
    /// Front-end rendering of a single post.
    pub const fn front(post_id: u64) -> Self {
        Self {
            is_admin: false,
            post_id: Some(post_id),
        }
    }
}

/// The authenticated user behind an admin request.
#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: u64,
    capabilities: FxHashSet<String>,
}

impl User {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            capabilities: FxHashSet::default(),
        }
    }

    pub fn with_capability(mut self, cap: impl Into<String>) -> Self {
        self.capabilities.insert(cap.into());
        self
    }

    pub fn can(&self, cap: &str) -> bool {
        self.capabilities.contains(cap)
    }
}

/// An admin request: query string, submitted form fields and the user.
#[derive(Debug, Clone, Default)]
pub struct AdminRequest {
    pub query: FxHashMap<String, String>,
    pub form: FxHashMap<String, String>,
    pub user: User,
    /// Request time in seconds since the Unix epoch.
    pub now: u64,
}

impl AdminRequest {
    pub fn new(user: User, now: u64) -> Self {
        Self {
            user,
            now,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_capabilities() {
        let user = User::new(7).with_capability("manage_options");
        assert!(user.can("manage_options"));
        assert!(!user.can("edit_posts"));
        assert!(!User::new(8).can("manage_options"));
    }

    #[test]
    fn test_admin_request_accessors() {
        let req = AdminRequest::new(User::new(1), 100)
            .with_query("page", "sendtonews-settings")
            .with_field("stn_video_load_delay", "1500");
        assert_eq!(req.query("page"), Some("sendtonews-settings"));
        assert_eq!(req.field("stn_video_load_delay"), Some("1500"));
        assert_eq!(req.field("missing"), None);
        assert_eq!(req.now, 100);
    }

    #[test]
    fn test_render_context_front() {
        let ctx = RenderContext::front(42);
        assert!(!ctx.is_admin);
        assert_eq!(ctx.post_id, Some(42));
        assert_eq!(RenderContext::default().post_id, None);
    }
}
