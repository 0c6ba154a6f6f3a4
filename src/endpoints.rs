//! Backend endpoint paths, relative to the configured base URL

pub const AUTH_LOGIN: &str = "/api/auth/signin";
pub const AUTH_REGISTER: &str = "/api/auth/signup";
pub const AUTH_SESSION: &str = "/api/auth/session";

pub const USERS: &str = "/api/users";
pub const USERS_UPDATE: &str = "/api/users/update";
pub const USERS_ROLE: &str = "/api/users/role";

pub const BARRISTERS: &str = "/api/barrister";
pub const BARRISTERS_SEARCH: &str = "/api/barrister/search";

pub const FREELANCERS: &str = "/api/freelancers";
pub const FREELANCERS_SEARCH: &str = "/api/freelancers/search";

pub const CASES: &str = "/api/cases";
pub const CASES_STATS: &str = "/api/cases/stats";
pub const CASES_AVAILABLE: &str = "/api/cases/available";

pub const DOCUMENTS: &str = "/api/v1/documents";
pub const DOCUMENTS_BY_USER: &str = "/api/v1/documents/user";

pub const HEALTH: &str = "/api/health";

/// Client-side route the session is sent to when credentials are dropped
pub const LOGIN_ROUTE: &str = "/auth/login";
