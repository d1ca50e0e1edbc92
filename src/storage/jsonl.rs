//! JSON-lines sink carrying every extracted field.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::models::{FeatureRecord, LabelMarker};
use crate::storage::FeatureSink;

#[derive(Serialize)]
struct LabeledRecord<'a> {
    label: LabelMarker,
    #[serde(flatten)]
    record: &'a FeatureRecord,
}

/// Writes one JSON object per document.
pub struct JsonlWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeatureSink for JsonlWriter<W> {
    fn write_record(&mut self, record: &FeatureRecord, label: LabelMarker) -> Result<()> {
        let mut line = serde_json::to_vec(&LabeledRecord { label, record })?;
        line.push(b'\n');
        self.out.write_all(&line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
