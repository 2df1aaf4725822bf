//! Route paths served by the API.

pub const GET_API_HEALTHZ: &str = "/api/healthz";
pub const POST_API_USERS: &str = "/api/users";
pub const PUT_API_USERS: &str = "/api/users";
pub const POST_API_LOGIN: &str = "/api/login";
pub const POST_API_REFRESH: &str = "/api/refresh";
pub const POST_API_REVOKE: &str = "/api/revoke";
pub const GET_API_CHIRPS: &str = "/api/chirps";
pub const POST_API_CHIRPS: &str = "/api/chirps";
pub const GET_API_CHIRPS_ID: &str = "/api/chirps/{chirp_id}";
pub const DELETE_API_CHIRPS_ID: &str = "/api/chirps/{chirp_id}";
pub const POST_API_POLKA_WEBHOOKS: &str = "/api/polka/webhooks";
pub const POST_ADMIN_RESET: &str = "/admin/reset";
