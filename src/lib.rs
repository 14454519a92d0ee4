//! Find protein binding motifs in transcripts and lay them out for drawing.
//!
//! # Overview
//! motif-mark scans transcript sequences for short nucleotide motifs, which may use IUPAC
//! ambiguity codes, and draws every occurrence next to the exon/intron structure of its
//! transcript.
//!
//! ## Transcripts
//! Transcripts are read from FASTA. Letter case carries the gene structure: every maximal run of
//! uppercase letters is an exon, everything else is intron.
//! ```text
//! >INSR chr19:7150261-7150808
//! tgctgcttgcGCATGCTCAGGTAAGcatagcgtcgc
//! ```
//! Each record becomes a [`SequenceRecord`] with its identifier (the first word of the header),
//! the sequence as written, and its exon intervals.
//!
//! ## Motifs
//! A [`Motif`] expands each symbol into the set of bases it stands for, so `YGCY` matches
//! `CGCT`, `TGCC`, and so on. `U` and `T` are the same base. Matching ignores case, and every
//! start position is tried, so overlapping occurrences (`AA` in `AAAA`) are all reported.
//!
//! ## Lanes
//! Occurrences of one transcript that overlap cannot be drawn on the same row. They are greedily
//! packed into the fewest rows ("lanes") that keep them apart, see [`assign_lanes`].
//!
//! ## Computation graph API
//! To mark motifs, you add *operations* (read FASTA, scan, assign lanes, write SVG, etc.) to a
//! [`Graph`](graph::Graph) and run it, which executes all the operations on each transcript.
//! See [`graph`] for all supported operations.
//! ```no_run
//! use std::sync::Arc;
//!
//! use motif_mark::graph::*;
//! use motif_mark::render::RenderStyle;
//! use motif_mark::Motifs;
//!
//! let motifs = Motifs::from_strs(["YGCY", "GCAUG", "catag", "YYYYYYYYYY"])?;
//! let colors = Arc::new(ColorTable::new(&motifs));
//!
//! let mut graph = Graph::new();
//! graph
//!     .add(InputFastaOp::from_file("Figure_1.fasta")?)
//!     .add(ScanMotifsOp::new(&motifs))
//!     .add(AssignLanesOp::new())
//!     .add(LayoutOp::new(Arc::clone(&colors)))
//!     .add(OutputDiagramOp::from_file(
//!         "Figure_1.svg",
//!         DiagramFormat::Svg,
//!         "Figure_1",
//!         colors,
//!         RenderStyle::default(),
//!     )?);
//! graph.run()?;
//! # Ok::<(), motif_mark::errors::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod iupac;
pub mod lanes;
pub mod layout;
pub mod motifs;
pub mod record;
pub mod render;
pub mod search;
pub mod transcript;

mod parse_utils;

// commonly used functions and types

pub use crate::lanes::*;
pub use crate::motifs::*;
pub use crate::record::*;
pub use crate::search::*;
