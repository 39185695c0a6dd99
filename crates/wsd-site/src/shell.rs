//! Standalone HTML page wrapping a rendered document body.

use wsd_renderer::escape_html;

/// Wrap `body` in a minimal HTML5 document.
///
/// Falls back to `docname` when the document has no H1 title.
pub(crate) fn render_page(title: Option<&str>, docname: &str, body: &str) -> String {
    let title = escape_html(title.unwrap_or(docname));
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         {body}\
         </body>\n\
         </html>\n"
    )
}
