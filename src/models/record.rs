//! Per-document feature record and label marker.

use serde::Serialize;

/// Shallow structural and lexical features of one HTML document.
///
/// The `*_count` fields count every element of that kind, while the
/// resource, scheme and extension lists only hold entries whose target URL
/// classified successfully, so a list may be shorter than its count.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Base filename of the archive entry
    #[serde(rename = "filename")]
    pub document_id: String,

    /// Raw text of the first `<title>` element
    pub title_text: String,

    /// Character count of the stripped title (legacy name `title_word_len`)
    #[serde(rename = "title_word_len")]
    pub title_char_count: usize,

    /// Whitespace token count of the title (legacy name `title_char_len`)
    #[serde(rename = "title_char_len")]
    pub title_word_count: usize,

    /// Text of every `<p>`, space-joined
    #[serde(rename = "para_text")]
    pub body_text: String,

    #[serde(rename = "link_num")]
    pub link_count: usize,
    #[serde(rename = "link_resources")]
    pub link_network_locations: Vec<String>,
    pub link_schemes: Vec<String>,

    #[serde(rename = "img_num")]
    pub image_count: usize,
    #[serde(rename = "img_resources")]
    pub image_network_locations: Vec<String>,
    #[serde(rename = "img_schemes")]
    pub image_schemes: Vec<String>,
    #[serde(rename = "img_exts")]
    pub image_extensions: Vec<String>,
}

impl FeatureRecord {
    /// Attach the archive entry's base filename.
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = document_id.into();
        self
    }
}

/// Class marker prefixed to a serialized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMarker {
    Positive,
    Negative,
    Unlabeled,
}

impl LabelMarker {
    /// Line prefix for this marker, including its separating space.
    pub fn prefix(self) -> &'static str {
        match self {
            LabelMarker::Positive => "1 ",
            LabelMarker::Negative => "-1 ",
            LabelMarker::Unlabeled => "",
        }
    }
}
