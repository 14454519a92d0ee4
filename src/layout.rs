use colored::Colorize;

use serde::{Serialize, Serializer};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::*;
use crate::lanes::*;
use crate::motifs::*;
use crate::record::*;
use crate::search::MotifScanner;

/// An opaque RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// A color on the hue circle, `hue` in degrees.
    fn from_hue(hue: f64, saturation: f64, value: f64) -> Self {
        let c = value * saturation;
        let h = (hue.rem_euclid(360.0)) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = value - c;
        let to_u8 = |v: f64| ((v + m) * 255.0).round() as u8;
        Self(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Config(format!("invalid color \"{s}\", expected #rrggbb"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Green, red, blue, purple, teal, pink, maroon, orange, yellow, salmon.
pub const DEFAULT_PALETTE: [Rgb; 10] = [
    Rgb(0, 128, 0),
    Rgb(255, 0, 0),
    Rgb(0, 0, 255),
    Rgb(128, 0, 128),
    Rgb(0, 191, 255),
    Rgb(255, 0, 255),
    Rgb(153, 51, 102),
    Rgb(255, 102, 0),
    Rgb(255, 255, 0),
    Rgb(255, 0, 128),
];

const GOLDEN_ANGLE: f64 = 137.507_764_050_037_85;

/// The motif to color table of a run: motif `i` of the ordered motif list gets color `i`.
///
/// Colors come from the palette first. Past the end of the palette, new colors are generated by
/// stepping around the hue circle, skipping any that are already taken, so a color is never
/// shared between motifs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    labels: Vec<String>,
    colors: Vec<Rgb>,
}

impl ColorTable {
    pub fn new(motifs: &Motifs) -> Self {
        Self::with_palette(motifs, &DEFAULT_PALETTE)
    }

    pub fn with_palette(motifs: &Motifs, palette: &[Rgb]) -> Self {
        let mut colors: Vec<Rgb> = Vec::with_capacity(motifs.len());
        let mut step = 0;

        for (i, _) in motifs.iter() {
            let color = match palette.get(i) {
                Some(&c) if !colors.contains(&c) => c,
                _ => loop {
                    let value = if (step / 7) % 2 == 0 { 0.9 } else { 0.6 };
                    let c = Rgb::from_hue(step as f64 * GOLDEN_ANGLE, 0.85, value);
                    step += 1;
                    if !colors.contains(&c) {
                        break c;
                    }
                },
            };
            colors.push(color);
        }

        Self {
            labels: motifs.iter().map(|(_, m)| m.raw().to_owned()).collect(),
            colors,
        }
    }

    pub fn color(&self, motif_idx: usize) -> Rgb {
        self.colors[motif_idx]
    }

    pub fn label(&self, motif_idx: usize) -> &str {
        &self.labels[motif_idx]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.labels.iter().map(|l| l.as_str()).zip(self.colors.iter().copied())
    }
}

/// Everything needed to draw one sequence: its exons, its lane-assigned occurrences, and the
/// shared color table.
#[derive(Debug, Clone)]
pub struct SequenceLayout {
    pub id: String,
    pub len: usize,
    pub exons: Vec<Interval>,
    pub occurrences: Vec<PlacedOccurrence>,
    pub lane_count: usize,
    pub colors: Arc<ColorTable>,
}

impl SequenceLayout {
    pub fn new(record: &SequenceRecord, lanes: LaneAssignment, colors: Arc<ColorTable>) -> Self {
        Self {
            id: record.id().to_owned(),
            len: record.len(),
            exons: record.exons().to_vec(),
            occurrences: lanes.placed,
            lane_count: lanes.lane_count,
            colors,
        }
    }

    pub fn color_of(&self, occurrence: &PlacedOccurrence) -> Rgb {
        self.colors.color(occurrence.motif_idx)
    }

    pub fn label_of(&self, occurrence: &PlacedOccurrence) -> &str {
        self.colors.label(occurrence.motif_idx)
    }
}

/// Scan, assign lanes, and bundle the result for one record.
pub fn layout_record(
    record: &SequenceRecord,
    scanner: &MotifScanner,
    colors: &Arc<ColorTable>,
) -> SequenceLayout {
    let lanes = assign_lanes(scanner.scan(record));
    SequenceLayout::new(record, lanes, Arc::clone(colors))
}

/// Lay out every record against the same motifs, in input order.
pub fn layout_records<'a>(
    records: impl IntoIterator<Item = &'a SequenceRecord>,
    motifs: &Motifs,
    colors: &Arc<ColorTable>,
) -> Vec<SequenceLayout> {
    let scanner = MotifScanner::new(motifs);
    records
        .into_iter()
        .map(|r| layout_record(r, &scanner, colors))
        .collect()
}

#[derive(Serialize)]
pub struct SerializableLayout<'a> {
    id: &'a str,
    len: usize,
    exons: &'a [Interval],
    lanes: usize,
    occurrences: Vec<SerializableOccurrence<'a>>,
}

#[derive(Serialize)]
struct SerializableOccurrence<'a> {
    motif: &'a str,
    start: usize,
    end: usize,
    lane: usize,
    color: Rgb,
}

impl<'a> From<&'a SequenceLayout> for SerializableLayout<'a> {
    fn from(layout: &'a SequenceLayout) -> Self {
        Self {
            id: &layout.id,
            len: layout.len,
            exons: &layout.exons,
            lanes: layout.lane_count,
            occurrences: layout
                .occurrences
                .iter()
                .map(|o| SerializableOccurrence {
                    motif: layout.label_of(o),
                    start: o.start,
                    end: o.end,
                    lane: o.lane,
                    color: layout.color_of(o),
                })
                .collect(),
        }
    }
}

impl fmt::Display for SequenceLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} bases)", self.id.bold(), self.len)?;

        let mut track = vec!['-'; self.len];
        for e in &self.exons {
            track[e.start..e.end].iter_mut().for_each(|c| *c = '=');
        }
        writeln!(f, " exons: {}", track.into_iter().collect::<String>())?;

        for lane in 0..self.lane_count {
            let mut row = vec![" ".normal(); self.len];
            for o in self.occurrences.iter().filter(|o| o.lane == lane) {
                let Rgb(r, g, b) = self.color_of(o);
                for cell in &mut row[o.start..o.end] {
                    *cell = "#".truecolor(r, g, b);
                }
            }
            write!(f, " {lane:>5}: ")?;
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_motif_order() {
        let motifs = Motifs::from_strs(["ygcy", "GCAUG", "catag"]).unwrap();
        let colors = ColorTable::new(&motifs);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors.color(0), DEFAULT_PALETTE[0]);
        assert_eq!(colors.color(2), DEFAULT_PALETTE[2]);
        assert_eq!(colors.label(1), "GCAUG");
    }

    #[test]
    fn test_colors_never_shared() {
        let raws = (0..40)
            .map(|i| format!("{}{}", "A".repeat(i / 4 + 1), ["C", "G", "T", "N"][i % 4]))
            .collect::<Vec<_>>();
        let motifs = Motifs::from_strs(&raws).unwrap();
        assert_eq!(motifs.len(), 40);

        let colors = ColorTable::new(&motifs);
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors.color(i), colors.color(j), "{i} and {j}");
            }
        }
        assert_eq!(colors, ColorTable::new(&motifs));
    }

    #[test]
    fn test_custom_palette_skips_repeats() {
        let motifs = Motifs::from_strs(["A", "C", "G"]).unwrap();
        let red = Rgb(255, 0, 0);
        let colors = ColorTable::with_palette(&motifs, &[red, red]);
        assert_eq!(colors.color(0), red);
        assert_ne!(colors.color(1), red);
        assert_ne!(colors.color(2), colors.color(1));
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!("#00ff80".parse::<Rgb>().unwrap(), Rgb(0, 255, 128));
        assert_eq!(Rgb(0, 191, 255).to_string(), "#00bfff");
        assert!("00ff80".parse::<Rgb>().is_err());
        assert!("#00ff8".parse::<Rgb>().is_err());
        assert!("#00gg80".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_layout_records() {
        let motifs = Motifs::from_strs(["AA", "RA"]).unwrap();
        let colors = Arc::new(ColorTable::new(&motifs));
        let records = [
            SequenceRecord::new("s1", "ttAAAAtt").unwrap(),
            SequenceRecord::new("s2", "").unwrap(),
        ];

        let layouts = layout_records(&records, &motifs, &colors);
        assert_eq!(layouts.len(), 2);

        let l = &layouts[0];
        assert_eq!(l.exons, [Interval::new(2, 6)]);
        // AA at 2, 3, 4 and RA at 2, 3, 4
        assert_eq!(l.occurrences.len(), 6);
        assert_eq!(l.lane_count, 4);
        assert_eq!(l.color_of(&l.occurrences[0]), DEFAULT_PALETTE[0]);

        let l = &layouts[1];
        assert!(l.exons.is_empty());
        assert!(l.occurrences.is_empty());
        assert_eq!(l.lane_count, 0);
    }

    #[test]
    fn test_serialized_layout_is_deterministic() {
        let motifs = Motifs::from_strs(["YGCY", "GCAUG"]).unwrap();
        let colors = Arc::new(ColorTable::new(&motifs));
        let records = [SequenceRecord::new("INSR", "tgctGCATGcgcc").unwrap()];

        let to_json = || {
            layout_records(&records, &motifs, &colors)
                .iter()
                .map(|l| serde_json::to_string(&SerializableLayout::from(l)).unwrap())
                .collect::<Vec<_>>()
        };
        let first = to_json();
        assert_eq!(first, to_json());
        assert!(first[0].starts_with(r#"{"id":"INSR","len":13,"exons":[{"start":4,"end":9}]"#));
        let placed = r##""motif":"GCAUG","start":4,"end":9,"lane":0,"color":"#ff0000""##;
        assert!(first[0].contains(placed));
    }
}
