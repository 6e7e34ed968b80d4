//! # Endpoint Constants
//!
//! Centralized endpoint paths for the services under test, plus the HTTP
//! status codes asserted against. Templates use `{name}` placeholders
//! filled by the client's path-parameter substitution.

/// Placeholder API (JSONPlaceholder-compatible).
pub mod placeholder {
    pub const USERS: &str = "/users";
    pub const USER_BY_ID: &str = "/users/{id}";

    pub const POSTS: &str = "/posts";
    pub const POST_BY_ID: &str = "/posts/{id}";

    pub const COMMENTS: &str = "/comments";
    pub const COMMENT_BY_ID: &str = "/comments/{id}";
    pub const COMMENTS_BY_POST: &str = "/posts/{postId}/comments";

    pub const ALBUMS: &str = "/albums";
    pub const ALBUM_BY_ID: &str = "/albums/{id}";

    pub const TODOS: &str = "/todos";
    pub const TODO_BY_ID: &str = "/todos/{id}";
}

/// BOMB backend.
pub mod bomb {
    pub const LOGIN: &str = "/api/auth/login";

    pub const CATALOG_ALL: &str = "/v1/admin/catalog_all";
    pub const CATALOG: &str = "/v1/admin/catalog";

    pub const VIDEOS_BY_SELLER: &str = "/v1/admin/editor/edit/videos/{sellerId}";
    pub const VIDEO_TITLE_GENERATION: &str = "/v2/ai/tags-to-text";
}

/// Buyer App (Navo) backend.
pub mod buyer_app {
    pub const LOGIN: &str = "/api/auth/login";
    pub const AUTH_VALIDATE: &str = "/v1/auth/validate";

    pub const FEED_FILTERS: &str = "/v1/feed/filters";
    pub const FEED_FILTERS_SAVE: &str = "/v1/feed/filters/save";
    pub const FEED_BANNERS: &str = "/v1/feed/banners";
    pub const FEED_HOME_CATALOG: &str = "/v1/feed/home/catalog";
    pub const FEED_HOME_TRENDING: &str = "/v1/feed/home/trending";
    pub const FEED_NEW_THIS_WEEK: &str = "/v1/feed/new-this-week";

    pub const USER_SEARCH: &str = "/v1/user/search";

    pub const COLLECTION_ALL: &str = "/v1/collection/all";
    pub const COLLECTION_TOP: &str = "/v1/feed/collection/top";
    pub const COLLECTION_BY_ID: &str = "/v1/collection/{id}";

    pub const APP_UPDATE: &str = "/api/appConfig/app-update";
    pub const SUITABLE_FOR_CONFIG: &str = "/api/appConfig/suitable-for";

    pub const CART: &str = "/v1/cart";
}

/// HTTP status codes used in assertions.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const ACCEPTED: u16 = 202;
    pub const NO_CONTENT: u16 = 204;

    pub const MOVED_PERMANENTLY: u16 = 301;
    pub const FOUND: u16 = 302;
    pub const NOT_MODIFIED: u16 = 304;

    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const CONFLICT: u16 = 409;
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    pub const TOO_MANY_REQUESTS: u16 = 429;

    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const BAD_GATEWAY: u16 = 502;
    pub const SERVICE_UNAVAILABLE: u16 = 503;
    pub const GATEWAY_TIMEOUT: u16 = 504;
}
