//! SVG rendering of sequence layouts.
//!
//! The diagram has a title and a legend at the top, then one block per sequence: a label, a thin
//! intron line over the full sequence, black exon boxes on the line, and the motif occurrences
//! below it, one row per lane. A shared base-count axis closes the image.

use resvg::{tiny_skia, usvg};
use serde::{Deserialize, Serialize};
use svg::node::element::{Line, Rectangle, Text};
use svg::Document;

use crate::errors::*;
use crate::layout::*;

const FONT: &str = "Arial";
const TITLE_BASELINE: f64 = 60.0;
const TITLE_SIZE: f64 = 48.0;
const LEGEND_TOP: f64 = 10.0;
const LEGEND_WIDTH: f64 = 435.0;
const LEGEND_ROW: f64 = 25.0;
const LABEL_SIZE: f64 = 24.0;
const LABEL_TO_LINE: f64 = 40.0;
const INTRON_WIDTH: f64 = 4.0;
const EXON_HEIGHT: f64 = 20.0;
const LINE_TO_LANES: f64 = 6.0;
const AXIS_GAP: f64 = 20.0;
const FOOTER: f64 = 100.0;

/// Geometry of the diagram, in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// Pixels per base.
    pub scale: f64,
    pub margin: f64,
    /// Space left below the last lane of a sequence.
    pub row_spacing: f64,
    pub lane_height: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            scale: 2.0,
            margin: 50.0,
            row_spacing: 40.0,
            lane_height: 12.0,
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("scale", self.scale),
            ("margin", self.margin),
            ("row_spacing", self.row_spacing),
            ("lane_height", self.lane_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "render.{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    fn block_height(&self, layout: &SequenceLayout) -> f64 {
        LABEL_SIZE
            + LABEL_TO_LINE
            + EXON_HEIGHT / 2.0
            + LINE_TO_LANES
            + layout.lane_count as f64 * self.lane_height
            + self.row_spacing
    }
}

/// Draw every layout into one document, in order.
///
/// `colors` supplies the legend, so motifs without any occurrence are still listed.
pub fn render_svg(
    title: &str,
    layouts: &[SequenceLayout],
    colors: &ColorTable,
    style: &RenderStyle,
) -> Document {
    let longest = layouts.iter().map(|l| l.len).max().unwrap_or(0) as f64;
    let legend_height = (colors.len() as f64 * LEGEND_ROW + 15.0).max(90.0);
    let header = (TITLE_BASELINE + AXIS_GAP).max(LEGEND_TOP + legend_height + AXIS_GAP);

    let width = (2.0 * style.margin + longest * style.scale)
        .max(2.0 * style.margin + LEGEND_WIDTH + 250.0);
    let axis_y = header + layouts.iter().map(|l| style.block_height(l)).sum::<f64>() + AXIS_GAP;
    let height = axis_y + FOOTER;

    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, width, height))
        .set("width", width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", width)
                .set("height", height)
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new(title)
                .set("x", style.margin / 2.0)
                .set("y", TITLE_BASELINE)
                .set("font-family", FONT)
                .set("font-size", TITLE_SIZE)
                .set("fill", "#000000"),
        );

    doc = add_legend(doc, colors, width - style.margin - LEGEND_WIDTH, legend_height);

    let mut y = header;
    for layout in layouts {
        doc = add_sequence(doc, layout, style, y);
        y += style.block_height(layout);
    }

    add_axis(doc, longest, style, width, axis_y)
}

/// Rasterize a diagram to PNG at its own pixel size.
///
/// Text is set in the system fonts and is left out where none are installed.
pub fn render_png(doc: &Document) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&doc.to_string(), &options)
        .map_err(|e| Error::BytesIo(Box::new(e)))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        Error::BytesIo(format!("cannot allocate a {size:?} image").into())
    })?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|e| Error::BytesIo(Box::new(e)))
}

fn add_legend(mut doc: Document, colors: &ColorTable, x: f64, height: f64) -> Document {
    doc = doc
        .add(
            Rectangle::new()
                .set("x", x)
                .set("y", LEGEND_TOP)
                .set("width", LEGEND_WIDTH)
                .set("height", height)
                .set("fill", "#cccccc")
                .set("stroke", "#000000")
                .set("stroke-width", 3.0),
        )
        .add(
            Rectangle::new()
                .set("x", x + 20.0)
                .set("y", 30.0 - EXON_HEIGHT / 2.0)
                .set("width", 40.0)
                .set("height", EXON_HEIGHT)
                .set("fill", "#000000"),
        )
        .add(legend_line(x, 30.0))
        .add(legend_text("Exons", x + 75.0, 38.0, LABEL_SIZE))
        .add(legend_line(x, 70.0))
        .add(legend_text("Introns", x + 75.0, 78.0, LABEL_SIZE));

    for (i, (label, color)) in colors.iter().enumerate() {
        let top = LEGEND_TOP + 10.0 + i as f64 * LEGEND_ROW;
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", x + 210.0)
                    .set("y", top)
                    .set("width", 45.0)
                    .set("height", 20.0)
                    .set("fill", color.hex()),
            )
            .add(legend_text(label, x + 270.0, top + 17.0, 20.0));
    }

    doc
}

fn legend_line(x: f64, y: f64) -> Line {
    Line::new()
        .set("x1", x + 10.0)
        .set("y1", y)
        .set("x2", x + 70.0)
        .set("y2", y)
        .set("stroke", "#000000")
        .set("stroke-width", INTRON_WIDTH)
}

fn legend_text(content: &str, x: f64, y: f64, size: f64) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT)
        .set("font-size", size)
        .set("fill", "#000000")
}

fn add_sequence(
    mut doc: Document,
    layout: &SequenceLayout,
    style: &RenderStyle,
    y: f64,
) -> Document {
    let label_y = y + LABEL_SIZE;
    let line_y = label_y + LABEL_TO_LINE;
    let lanes_top = line_y + EXON_HEIGHT / 2.0 + LINE_TO_LANES;
    let x = |pos: usize| style.margin + pos as f64 * style.scale;

    doc = doc
        .add(
            Text::new(format!("{} ({} bases)", layout.id, layout.len))
                .set("x", style.margin)
                .set("y", label_y)
                .set("font-family", FONT)
                .set("font-size", LABEL_SIZE)
                .set("fill", "#000000"),
        )
        .add(
            Line::new()
                .set("x1", x(0))
                .set("y1", line_y)
                .set("x2", x(layout.len))
                .set("y2", line_y)
                .set("stroke", "#000000")
                .set("stroke-width", INTRON_WIDTH),
        );

    for exon in &layout.exons {
        doc = doc.add(
            Rectangle::new()
                .set("x", x(exon.start))
                .set("y", line_y - EXON_HEIGHT / 2.0)
                .set("width", exon.len() as f64 * style.scale)
                .set("height", EXON_HEIGHT)
                .set("fill", "#000000"),
        );
    }

    for o in &layout.occurrences {
        doc = doc.add(
            Rectangle::new()
                .set("x", x(o.start))
                .set("y", lanes_top + o.lane as f64 * style.lane_height)
                .set("width", (o.end - o.start) as f64 * style.scale)
                .set("height", style.lane_height * 0.8)
                .set("fill", layout.color_of(o).hex()),
        );
    }

    doc
}

fn add_axis(
    mut doc: Document,
    longest: f64,
    style: &RenderStyle,
    width: f64,
    y: f64,
) -> Document {
    let axis_len = longest * style.scale;

    doc = doc.add(
        Line::new()
            .set("x1", style.margin)
            .set("y1", y)
            .set("x2", style.margin + axis_len)
            .set("y2", y)
            .set("stroke", "#000000")
            .set("stroke-width", 3.0),
    );

    for i in 0..=4 {
        let x = style.margin + axis_len * i as f64 / 4.0;
        let label = (longest * i as f64 / 4.0).round();
        doc = doc
            .add(
                Line::new()
                    .set("x1", x)
                    .set("y1", y)
                    .set("x2", x)
                    .set("y2", y + 10.0)
                    .set("stroke", "#000000")
                    .set("stroke-width", 3.0),
            )
            .add(
                Text::new(format!("{label}"))
                    .set("x", x)
                    .set("y", y + 30.0)
                    .set("text-anchor", "middle")
                    .set("font-family", FONT)
                    .set("font-size", 16.0)
                    .set("fill", "#000000"),
            );
    }

    doc.add(
        Text::new("Number of Bases")
            .set("x", width / 2.0)
            .set("y", y + 65.0)
            .set("text-anchor", "middle")
            .set("font-family", FONT)
            .set("font-size", 20.0)
            .set("fill", "#000000"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motifs::Motifs;
    use crate::record::SequenceRecord;
    use std::sync::Arc;

    fn render(records: &[SequenceRecord], motifs: &[&str]) -> String {
        let motifs = Motifs::from_strs(motifs.iter().copied()).unwrap();
        let colors = Arc::new(ColorTable::new(&motifs));
        let layouts = layout_records(records, &motifs, &colors);
        render_svg("Figure_1", &layouts, &colors, &RenderStyle::default()).to_string()
    }

    #[test]
    fn test_diagram_contents() {
        let records = [
            SequenceRecord::new("INSR", "tgctGCATGcgcc").unwrap(),
            SequenceRecord::new("MBNL", "ygcy").unwrap(),
        ];
        let svg = render(&records, &["YGCY", "GCAUG"]);

        assert!(svg.contains("Figure_1"));
        assert!(svg.contains("INSR (13 bases)"));
        assert!(svg.contains("MBNL (4 bases)"));
        assert!(svg.contains("Number of Bases"));
        assert!(svg.contains("Exons"));
        assert!(svg.contains("Introns"));
        // legend swatches plus occurrences
        assert!(svg.contains(r##""#008000""##));
        assert!(svg.contains(r##""#ff0000""##));
        // tick labels for the longest sequence
        for tick in [">0<", ">3<", ">7<", ">10<", ">13<"] {
            assert!(svg.contains(tick), "{tick}");
        }
    }

    #[test]
    fn test_deterministic() {
        let records = [SequenceRecord::new("a", "aaGCATGaaGCAUG").unwrap()];
        assert_eq!(render(&records, &["GCAUG"]), render(&records, &["GCAUG"]));
    }

    #[test]
    fn test_no_sequences() {
        let svg = render(&[], &["YGCY"]);
        assert!(svg.contains("Number of Bases"));
        assert!(svg.contains("YGCY"));
    }

    #[test]
    fn test_png() {
        let motifs = Motifs::from_strs(["GCAUG"]).unwrap();
        let colors = Arc::new(ColorTable::new(&motifs));
        let records = [SequenceRecord::new("a", "aaGCATGaa").unwrap()];
        let layouts = layout_records(&records, &motifs, &colors);
        let doc = render_svg("png", &layouts, &colors, &RenderStyle::default());

        let png = render_png(&doc).unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn test_validate_style() {
        assert!(RenderStyle::default().validate().is_ok());
        let style = RenderStyle {
            lane_height: 0.0,
            ..RenderStyle::default()
        };
        assert!(matches!(style.validate(), Err(Error::Config(_))));
    }
}
