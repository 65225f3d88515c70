use crate::{Credentials, CurrentUserResponse, LoginResponse, MessageResponse};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods that change server state and therefore carry a body.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API prefix.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Log in with username and password.
impl ApiRequest for Credentials {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Terminate the server-side session. Sends no body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/auth/logout/";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Who am I.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = CurrentUserResponse;
    const PATH: &'static str = "/auth/user/";
    const METHOD: HttpMethod = HttpMethod::Get;
}
