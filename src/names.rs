pub const WALK_URL: &str = "/";
pub const ADMIN_URL: &str = "/admin";
pub const TREE_API_URL: &str = "/api/decision-tree";
pub const NODES_API_URL: &str = "/api/decision-tree/nodes";
pub const AUTH_CHECK_URL: &str = "/api/admin/auth";

pub fn node_api_url(id: &str) -> String {
    format!("{NODES_API_URL}/{id}")
}

pub fn walk_url(query: &str) -> String {
    format!("/?{query}")
}

// Admin defaults, overridable via CLI/env
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "aiml1234";
pub const AUTH_CHALLENGE: &str = "Basic realm=\"Secure Area\"";

pub const DEFAULT_DATA_FILE: &str = "data/decision-tree.json";

// Breadcrumb entries are cut off past this many characters
pub const BREADCRUMB_MAX_CHARS: usize = 30;
