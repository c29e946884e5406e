//! Authenticated HTTP session.

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body, BodyReader};

use crate::FetchError;

/// Cookie the course platform uses to mark an authenticated visitor.
const ACCESS_TOKEN_COOKIE: &str = "lead_logged_in";

/// Timeout for connecting and for the first response byte. No global
/// timeout: media bodies legitimately take minutes to stream.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Body size cap, raised from ureq's 10 MB default for course media.
const BODY_LIMIT: u64 = 4 * 1024 * 1024 * 1024;

/// HTTP session with fixed authentication headers.
///
/// Holds a reusable [`Agent`] for connection pooling plus the `User-Agent`
/// and session-cookie values attached to every request.
pub struct Session {
    agent: Agent,
    user_agent: String,
    cookie: String,
}

impl Session {
    /// Create a session from the client identity string and access token.
    #[must_use]
    pub fn new(user_agent: &str, access_token: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(REQUEST_TIMEOUT))
            .timeout_recv_response(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: user_agent.to_owned(),
            cookie: format!("{ACCESS_TOKEN_COOKIE}={access_token}"),
        }
    }

    /// Issue an authenticated GET and return the response body as bytes.
    ///
    /// # Errors
    ///
    /// [`FetchError::Status`] for non-2xx responses, [`FetchError::Transport`]
    /// when the request itself fails.
    pub fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let body = self
            .request(url)?
            .into_body()
            .with_config()
            .limit(BODY_LIMIT)
            .read_to_vec()?;
        Ok(body)
    }

    /// Issue an authenticated GET and return a streaming body reader.
    ///
    /// For media downloads, which may not fit in memory; the body is never
    /// buffered whole.
    ///
    /// # Errors
    ///
    /// [`FetchError::Status`] for non-2xx responses, [`FetchError::Transport`]
    /// when the request itself fails. Body read failures surface as I/O
    /// errors from the returned reader.
    pub fn get_reader(&self, url: &str) -> Result<BodyReader<'static>, FetchError> {
        let response = self.request(url)?;
        Ok(response
            .into_body()
            .into_with_config()
            .limit(BODY_LIMIT)
            .reader())
    }

    fn request(&self, url: &str) -> Result<Response<Body>, FetchError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Cookie", &self.cookie)
            .call()?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                status,
                url: url.to_owned(),
            });
        }
        Ok(response)
    }
}
