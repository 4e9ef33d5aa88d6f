/// Role name for the single administrative account.
pub const ROLE_ADMIN: &str = "admin";
