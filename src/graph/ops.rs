//! Graph ops that process transcripts.

mod input_fasta_op;
pub use input_fasta_op::*;

mod scan_motifs_op;
pub use scan_motifs_op::*;

mod assign_lanes_op;
pub use assign_lanes_op::*;

mod layout_op;
pub use layout_op::*;

mod for_each_op;
pub use for_each_op::*;

mod output_json_op;
pub use output_json_op::*;

mod output_tsv_op;
pub use output_tsv_op::*;

mod output_diagram_op;
pub use output_diagram_op::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::{write::GzEncoder, Compression};

/// Create a buffered writer for `file_path` and any missing parent directories.
///
/// Paths ending in `.gz` are gzip-compressed.
fn create_file_writer(file_path: &str) -> std::io::Result<Box<dyn Write>> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let writer: Box<dyn Write> = if file_path.ends_with(".gz") {
        Box::new(BufWriter::new(GzEncoder::new(
            File::create(file_path)?,
            Compression::default(),
        )))
    } else {
        Box::new(BufWriter::new(File::create(file_path)?))
    };

    Ok(writer)
}
