//! Location of a page in the source tree and in the build output.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::util::relative_path;

/// Characters escaped in URI paths; `/` is kept as the segment separator.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Directory (relative to the output root) that holds binary assets.
pub const IMAGES_DIR: &str = "_images";

/// Where a document comes from and where its page goes.
#[derive(Debug, Clone)]
pub struct PageInfo {
    /// Document name: source path relative to the source root, without `.md`,
    /// `/`-separated (e.g. `index`, `guide/setup`).
    pub docname: String,
    /// Documentation source root.
    pub source_root: PathBuf,
    /// Build output root.
    pub output_root: PathBuf,
}

impl PageInfo {
    #[must_use]
    pub fn new(docname: impl Into<String>, source_root: &Path, output_root: &Path) -> Self {
        Self {
            docname: docname.into(),
            source_root: source_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
        }
    }

    /// Page URL relative to the output root (e.g. `guide/setup.html`).
    #[must_use]
    pub fn page_url(&self) -> String {
        format!("{}.html", self.docname)
    }

    /// Absolute location of the rendered page.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_root.join(self.page_url())
    }

    /// Build image directory.
    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.output_root.join(IMAGES_DIR)
    }

    /// URI of `target` (relative to the output root) as seen from this page,
    /// percent-encoded for use in `src`/`href` attributes.
    #[must_use]
    pub fn relative_uri(&self, target: &str) -> String {
        utf8_percent_encode(&relative_path(&self.page_url(), target), PATH_ENCODE_SET).to_string()
    }
}
