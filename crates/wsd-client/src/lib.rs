//! Client for the websequencediagrams rendering service.
//!
//! This crate turns sequence diagram text into image bytes:
//! - [`DiagramOptions`] holds the style, format and pass-through parameters
//! - [`RenderRequest`] serializes text and options into form fields
//! - [`decode_response`] reads the service's non-strict JSON reply
//! - [`WsdClient`] performs the POST + GET round-trip and returns an [`ImageStream`]
//!
//! # Architecture
//!
//! - [`options`]: `Style`, `Format` and `DiagramOptions`
//! - [`request`]: form body construction
//! - [`response`]: lenient response decoding (JSON5 or query string)
//! - [`client`]: HTTP round-trip via `ureq`
//! - [`stream`]: readable image stream that owns the HTTP connection
//!
//! # Example
//!
//! ```ignore
//! use std::io::Read;
//! use wsd_client::{DiagramOptions, DiagramRenderer, WsdClient};
//!
//! let client = WsdClient::new("https://www.websequencediagrams.com/");
//! let mut stream = client.render("Alice->Bob: hello", &DiagramOptions::default())?;
//! let mut bytes = Vec::new();
//! stream.read_to_end(&mut bytes)?;
//! ```

mod client;
mod consts;
mod error;
mod options;
mod request;
mod response;
mod stream;

pub use client::{DiagramRenderer, WsdClient, create_agent};
pub use consts::{DEFAULT_API_URL, DEFAULT_APP_VERSION};
pub use error::{ClientError, RenderError};
pub use options::{DiagramOptions, Format, Style};
pub use request::RenderRequest;
pub use response::{RenderResponse, decode_response};
pub use stream::ImageStream;
