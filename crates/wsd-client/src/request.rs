//! Render request construction.

use crate::options::DiagramOptions;

/// A diagram serialized for the service's form-encoded POST body.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    pub message: &'a str,
    pub options: &'a DiagramOptions,
}

impl<'a> RenderRequest<'a> {
    #[must_use]
    pub fn new(message: &'a str, options: &'a DiagramOptions) -> Self {
        Self { message, options }
    }

    /// Form fields in send order: `message`, `style`, `format`, `appVersion`,
    /// then the pass-through parameters.
    ///
    /// `alt` is presentation-only and never sent.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'a str, &'a str)> {
        let options = self.options;
        let mut fields = Vec::with_capacity(4 + options.extra.len());
        fields.push(("message", self.message));
        fields.push(("style", options.style.as_str()));
        fields.push(("format", options.format.as_str()));
        fields.push(("appVersion", options.app_version.as_str()));
        fields.extend(
            options
                .extra
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        fields
    }
}
