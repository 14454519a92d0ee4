use flate2::bufread::MultiGzDecoder;

use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_reader, FastxReader};

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use crate::graph::*;
use crate::parse_utils::header_id;
use crate::record::SequenceRecord;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub struct InputFastaOp<'reader> {
    reader: Option<Box<dyn FastxReader + 'reader>>,
    origin: Arc<Origin>,
    idx: usize,
}

impl<'reader> InputFastaOp<'reader> {
    const NAME: &'static str = "InputFastaOp";

    /// Stream transcripts created from the FASTA records of an input file.
    ///
    /// An empty file yields no transcripts. Whitespace before the first header is ignored.
    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let io_err = |e: Box<dyn std::error::Error + Send + Sync>| Error::FileIo {
            file: file.to_owned(),
            source: e,
        };

        let stream = File::open(file)
            .and_then(fasta_stream)
            .map_err(|e| io_err(Box::new(e)))?;
        let reader =
            Self::empty_as_none(parse_fastx_reader(stream)).map_err(|e| io_err(Box::new(e)))?;

        Ok(Self {
            reader,
            origin: Arc::new(Origin::File(file.to_owned())),
            idx: 0,
        })
    }

    /// Stream transcripts created from FASTA records from an arbitrary `Read`er.
    pub fn from_reader(reader: impl Read + Send + 'reader) -> Result<Self> {
        let stream = fasta_stream(reader).map_err(|e| Error::BytesIo(Box::new(e)))?;
        let reader = Self::empty_as_none(parse_fastx_reader(stream))
            .map_err(|e| Error::BytesIo(Box::new(e)))?;

        Ok(Self {
            reader,
            origin: Arc::new(Origin::Bytes),
            idx: 0,
        })
    }

    fn empty_as_none(
        reader: std::result::Result<Box<dyn FastxReader + 'reader>, ParseError>,
    ) -> std::result::Result<Option<Box<dyn FastxReader + 'reader>>, ParseError> {
        match reader {
            Ok(reader) => Ok(Some(reader)),
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Decompress gzipped input and drop any whitespace before the first record, which the parser
/// would otherwise reject as an unknown format.
fn fasta_stream<'r>(
    reader: impl Read + Send + 'r,
) -> std::io::Result<Box<dyn Read + Send + 'r>> {
    let mut reader = BufReader::new(reader);

    if reader.fill_buf()?.starts_with(&GZIP_MAGIC) {
        let decoded = BufReader::new(MultiGzDecoder::new(reader));
        Ok(Box::new(skip_leading_whitespace(decoded)?))
    } else {
        Ok(Box::new(skip_leading_whitespace(reader)?))
    }
}

fn skip_leading_whitespace<R: BufRead>(mut reader: R) -> std::io::Result<R> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let n = buf.iter().take_while(|c| c.is_ascii_whitespace()).count();
        let rest = buf.len() - n;
        reader.consume(n);
        if rest > 0 {
            break;
        }
    }

    Ok(reader)
}

impl<'reader> GraphNode for InputFastaOp<'reader> {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        assert!(
            transcript.is_none(),
            "Expected no input transcripts for {}",
            Self::NAME
        );

        let Some(reader) = self.reader.as_mut() else {
            return Ok((None, true));
        };
        let Some(record) = reader.next() else {
            return Ok((None, true));
        };

        let idx = self.idx;
        self.idx += 1;

        let record = record.map_err(|e| Error::ParseRecord {
            origin: self.origin.to_string(),
            idx,
            source: Box::new(e),
        })?;
        let id = utf8(header_id(record.id()));
        let record = SequenceRecord::new(id, record.seq().into_owned()).map_err(|source| {
            Error::Format {
                origin: self.origin.to_string(),
                idx,
                source,
            }
        })?;

        log::debug!(
            "Read record {idx} \"{}\" ({} bases, {} exons)",
            record.id(),
            record.len(),
            record.exons().len()
        );

        Ok((
            Some(Transcript::new(record, Arc::clone(&self.origin), idx)),
            false,
        ))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
