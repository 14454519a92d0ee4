use std::io::Write;

use crate::graph::*;

pub struct OutputJsonOp<'writer> {
    writer: Box<dyn Write + 'writer>,
}

impl<'writer> OutputJsonOp<'writer> {
    const NAME: &'static str = "OutputJsonOp";

    /// Output layouts to a file in JSONL format.
    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let writer = super::create_file_writer(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        Ok(Self { writer })
    }

    /// Output layouts to a `Write`r in JSONL format.
    pub fn from_writer(writer: impl Write + 'writer) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }
}

impl<'writer> GraphNode for OutputJsonOp<'writer> {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(transcript) = transcript else {
            panic!("Expected some transcript!")
        };
        let Some(layout) = &transcript.layout else {
            panic!("Expected a layout before {}", Self::NAME)
        };

        serde_json::to_writer(&mut self.writer, &SerializableLayout::from(layout))
            .map_err(|e| Error::BytesIo(Box::new(e)))?;
        writeln!(&mut self.writer).map_err(|e| Error::BytesIo(Box::new(e)))?;

        Ok((Some(transcript), false))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::BytesIo(Box::new(e)))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
