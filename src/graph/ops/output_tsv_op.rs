use serde::Serialize;

use std::io::Write;

use crate::graph::*;

const HEADER: [&str; 6] = ["id", "motif", "start", "end", "lane", "color"];

#[derive(Serialize)]
struct OccurrenceRow<'a> {
    id: &'a str,
    motif: &'a str,
    start: usize,
    end: usize,
    lane: usize,
    color: Rgb,
}

pub struct OutputTsvOp<'writer> {
    writer: csv::Writer<Box<dyn Write + 'writer>>,
}

impl<'writer> OutputTsvOp<'writer> {
    const NAME: &'static str = "OutputTsvOp";

    /// Output one tab-separated row per occurrence to a file.
    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let writer = super::create_file_writer(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        Self::new(writer)
    }

    /// Output one tab-separated row per occurrence to a `Write`r.
    pub fn from_writer(writer: impl Write + 'writer) -> Result<Self> {
        Self::new(Box::new(writer))
    }

    fn new(writer: Box<dyn Write + 'writer>) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        writer
            .write_record(HEADER)
            .map_err(|e| Error::BytesIo(Box::new(e)))?;

        Ok(Self { writer })
    }
}

impl<'writer> GraphNode for OutputTsvOp<'writer> {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(transcript) = transcript else {
            panic!("Expected some transcript!")
        };
        let Some(layout) = &transcript.layout else {
            panic!("Expected a layout before {}", Self::NAME)
        };

        for o in &layout.occurrences {
            self.writer
                .serialize(OccurrenceRow {
                    id: &layout.id,
                    motif: layout.label_of(o),
                    start: o.start,
                    end: o.end,
                    lane: o.lane,
                    color: layout.color_of(o),
                })
                .map_err(|e| Error::BytesIo(Box::new(e)))?;
        }

        Ok((Some(transcript), false))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::BytesIo(Box::new(e)))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
