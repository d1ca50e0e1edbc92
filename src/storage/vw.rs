//! Sparse namespace line format.
//!
//! One line per document:
//!
//! ```text
//! [1 |-1 ]'<id> |title <text> |body <text> |link_resources <...> |link_schemes <...> |img_resources <...> |img_exts <...>
//! ```
//!
//! Image schemes are extracted but never emitted.

use std::io::Write;

use crate::error::Result;
use crate::models::{FeatureRecord, LabelMarker};
use crate::storage::FeatureSink;
use crate::utils::text::{sanitize, sanitize_tag};

/// Render one output line, without the trailing newline.
pub fn format_line(record: &FeatureRecord, label: LabelMarker) -> String {
    let blocks = [
        ("title", sanitize(&record.title_text)),
        ("body", sanitize(&record.body_text)),
        ("link_resources", sanitize(&record.link_network_locations.join(" "))),
        ("link_schemes", sanitize(&record.link_schemes.join(" "))),
        ("img_resources", sanitize(&record.image_network_locations.join(" "))),
        ("img_exts", sanitize(&record.image_extensions.join(" "))),
    ];

    let mut line = format!("{}'{}", label.prefix(), sanitize_tag(&record.document_id));
    for (namespace, content) in blocks {
        line.push_str(" |");
        line.push_str(namespace);
        if !content.is_empty() {
            line.push(' ');
            line.push_str(&content);
        }
    }

    line.truncate(line.trim_end().len());
    line
}

/// Writes namespace lines to any byte sink.
pub struct VwWriter<W: Write> {
    out: W,
}

impl<W: Write> VwWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeatureSink for VwWriter<W> {
    fn write_record(&mut self, record: &FeatureRecord, label: LabelMarker) -> Result<()> {
        let mut line = format_line(record, label);
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
