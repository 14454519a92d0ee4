use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::layout::{Rgb, DEFAULT_PALETTE};
use crate::render::RenderStyle;

/// Settings of one run, usually read from a YAML file and then overridden on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fasta: Option<PathBuf>,
    pub motifs: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub svg: bool,
    /// Also rasterize the diagram to `<out_dir>/<stem>.png`.
    pub png: bool,
    pub json: Option<PathBuf>,
    pub tsv: Option<PathBuf>,
    /// Abort on the first invalid motif instead of dropping it.
    pub strict: bool,
    /// Motif colors as `#rrggbb`, in motif order.
    pub palette: Option<Vec<String>>,
    pub render: RenderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fasta: None,
            motifs: None,
            out_dir: PathBuf::from("."),
            svg: true,
            png: true,
            json: None,
            tsv: None,
            strict: false,
            palette: None,
            render: RenderStyle::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileIo {
            file: path.display().to_string(),
            source: Box::new(e),
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // a document without content (blank or comments only) has no map to deserialize
        let has_content = yaml
            .lines()
            .map(str::trim)
            .any(|l| !(l.is_empty() || l.starts_with('#') || l == "---"));
        if !has_content {
            return Ok(Self::default());
        }
        let config: Option<Self> =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.palette()?;
        self.render.validate()
    }

    /// The configured palette, or the default one.
    pub fn palette(&self) -> Result<Vec<Rgb>> {
        match &self.palette {
            Some(colors) => colors.iter().map(|c| c.parse()).collect(),
            None => Ok(DEFAULT_PALETTE.to_vec()),
        }
    }

    /// Where the diagram for `fasta` goes: `<out_dir>/<stem>.svg`.
    pub fn svg_path(&self, fasta: &Path) -> PathBuf {
        self.out_dir.join(format!("{}.svg", fasta_stem(fasta)))
    }

    /// Where the raster copy of the diagram goes: `<out_dir>/<stem>.png`.
    pub fn png_path(&self, fasta: &Path) -> PathBuf {
        self.out_dir.join(format!("{}.png", fasta_stem(fasta)))
    }
}

/// The file name of a FASTA path without its directory or its FASTA and `.gz` extensions.
pub fn fasta_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);

    for ext in [".fasta", ".fa", ".fna", ".fas"] {
        if let Some(stem) = name.strip_suffix(ext) {
            if !stem.is_empty() {
                return stem.to_owned();
            }
        }
    }

    name.to_owned()
}
