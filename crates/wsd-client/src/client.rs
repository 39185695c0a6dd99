//! HTTP round-trip against the rendering service.
//!
//! A render is two requests: a form-encoded POST that returns the image
//! location (or errors), then a GET that returns the image bytes.

use std::time::Duration;

use ureq::Agent;

use crate::error::{ClientError, RenderError};
use crate::options::DiagramOptions;
use crate::request::RenderRequest;
use crate::response::{RenderResponse, decode_response};
use crate::stream::ImageStream;

/// Anything that can turn diagram text into image bytes.
///
/// Implemented by [`WsdClient`]; directive handlers depend on this trait so a
/// different backend (or a simulated service in tests) can be substituted.
pub trait DiagramRenderer {
    /// Render `text` with `options` and return the image stream.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Render`] when the service reports errors, and the
    /// other [`ClientError`] variants for empty input, transport failures,
    /// HTTP error statuses and malformed responses.
    fn render(&self, text: &str, options: &DiagramOptions) -> Result<ImageStream, ClientError>;
}

/// Create HTTP agent with an optional global timeout.
///
/// `None` means no timeout: a stalled service stalls the caller.
pub fn create_agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .timeout_global(timeout)
        .http_status_as_error(false)
        .build()
        .into()
}

/// Client for the websequencediagrams HTTP API.
pub struct WsdClient {
    agent: Agent,
    base_url: String,
}

impl WsdClient {
    /// Create a client for the service at `base_url` with no timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_agent(base_url, create_agent(None))
    }

    /// Create a client that reuses an existing agent.
    #[must_use]
    pub fn with_agent(base_url: impl Into<String>, agent: Agent) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { agent, base_url }
    }

    /// Base URL requests are sent to (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the diagram and decode the image location.
    fn request_image_location(
        &self,
        text: &str,
        options: &DiagramOptions,
    ) -> Result<String, ClientError> {
        let request = RenderRequest::new(text, options);
        tracing::debug!(
            url = %self.base_url,
            style = options.style.as_str(),
            format = options.format.as_str(),
            "Submitting diagram"
        );

        let response = self
            .agent
            .post(&self.base_url)
            .send_form(request.form_fields())?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;

        if status >= 400 {
            return Err(ClientError::HttpResponse { status, body });
        }

        match decode_response(&body)? {
            RenderResponse::Image(img) => Ok(img),
            RenderResponse::Errors(messages) => Err(RenderError { messages }.into()),
        }
    }

    /// GET the rendered image.
    fn fetch_image(&self, url: &str) -> Result<ImageStream, ClientError> {
        tracing::debug!(url, "Fetching rendered diagram");

        let response = self.agent.get(url).call()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(ClientError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(ImageStream::from_reader(body.into_reader()).with_content_type(content_type))
    }
}

impl DiagramRenderer for WsdClient {
    fn render(&self, text: &str, options: &DiagramOptions) -> Result<ImageStream, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::EmptySource);
        }
        let img = self.request_image_location(text, options)?;
        let url = resolve_image_url(&self.base_url, &img);
        self.fetch_image(&url)
    }
}

/// Resolve the `img` field of a render response against the service URL.
///
/// - absolute URLs are returned unchanged
/// - `/path` is joined to the scheme and host of `base_url`
/// - anything else (`?png=abc`, `files/abc.png`) is appended to `base_url`
pub(crate) fn resolve_image_url(base_url: &str, img: &str) -> String {
    if img.starts_with("http://") || img.starts_with("https://") {
        return img.to_owned();
    }

    let base = base_url.trim_end_matches('/');
    if let Some(path) = img.strip_prefix('/') {
        return format!("{}/{path}", origin(base));
    }
    format!("{base}/{img}")
}

/// Scheme and authority of a URL (`https://host:port`).
fn origin(url: &str) -> &str {
    let after_scheme = url.find("://").map_or(0, |i| i + 3);
    match url[after_scheme..].find('/') {
        Some(i) => &url[..after_scheme + i],
        None => url,
    }
}
