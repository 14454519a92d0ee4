use std::io::Write;
use std::sync::Arc;

use crate::graph::*;
use crate::render::{render_png, render_svg, RenderStyle};

/// Image format written by [`OutputDiagramOp`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiagramFormat {
    Svg,
    /// The SVG diagram rasterized at one pixel per SVG unit.
    Png,
}

pub struct OutputDiagramOp<'writer> {
    writer: Box<dyn Write + 'writer>,
    format: DiagramFormat,
    title: String,
    colors: Arc<ColorTable>,
    style: RenderStyle,
    layouts: Vec<SequenceLayout>,
}

impl<'writer> OutputDiagramOp<'writer> {
    const NAME: &'static str = "OutputDiagramOp";

    /// Draw all layouts into one image file once every transcript has been seen.
    pub fn from_file(
        file: impl AsRef<str>,
        format: DiagramFormat,
        title: impl Into<String>,
        colors: Arc<ColorTable>,
        style: RenderStyle,
    ) -> Result<Self> {
        let file = file.as_ref();
        let writer = super::create_file_writer(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        Ok(Self::new(writer, format, title.into(), colors, style))
    }

    /// Draw all layouts into one image written to a `Write`r.
    pub fn from_writer(
        writer: impl Write + 'writer,
        format: DiagramFormat,
        title: impl Into<String>,
        colors: Arc<ColorTable>,
        style: RenderStyle,
    ) -> Self {
        Self::new(Box::new(writer), format, title.into(), colors, style)
    }

    fn new(
        writer: Box<dyn Write + 'writer>,
        format: DiagramFormat,
        title: String,
        colors: Arc<ColorTable>,
        style: RenderStyle,
    ) -> Self {
        Self {
            writer,
            format,
            title,
            colors,
            style,
            layouts: Vec::new(),
        }
    }
}

impl<'writer> GraphNode for OutputDiagramOp<'writer> {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(transcript) = transcript else {
            panic!("Expected some transcript!")
        };
        let Some(layout) = &transcript.layout else {
            panic!("Expected a layout before {}", Self::NAME)
        };

        self.layouts.push(layout.clone());
        Ok((Some(transcript), false))
    }

    fn finish(&mut self) -> Result<()> {
        let doc = render_svg(&self.title, &self.layouts, &self.colors, &self.style);
        match self.format {
            DiagramFormat::Svg => {
                svg::write(&mut self.writer, &doc).map_err(|e| Error::BytesIo(Box::new(e)))?
            }
            DiagramFormat::Png => {
                let png = render_png(&doc)?;
                log::debug!(
                    "Rasterized {} layouts into {} PNG bytes",
                    self.layouts.len(),
                    png.len()
                );
                self.writer
                    .write_all(&png)
                    .map_err(|e| Error::BytesIo(Box::new(e)))?
            }
        }
        self.writer.flush().map_err(|e| Error::BytesIo(Box::new(e)))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
