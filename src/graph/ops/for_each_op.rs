use crate::graph::*;

pub struct ForEachOp<F: FnMut(&mut Transcript)> {
    func: F,
}

impl<F: FnMut(&mut Transcript)> ForEachOp<F> {
    const NAME: &'static str = "ForEachOp";

    /// Apply an arbitrary function on each transcript.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F: FnMut(&mut Transcript)> GraphNode for ForEachOp<F> {
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)> {
        let Some(mut transcript) = transcript else {
            panic!("Expected some transcript!")
        };
        (self.func)(&mut transcript);
        Ok((Some(transcript), false))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

pub struct DbgOp;

impl DbgOp {
    /// Print each transcript to standard error, with its lanes drawn in motif colors once it
    /// has a layout.
    pub fn new() -> ForEachOp<impl FnMut(&mut Transcript)> {
        ForEachOp::new(|transcript| eprint!("{transcript}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SequenceRecord;
    use std::sync::Arc;

    #[test]
    fn test_for_each() {
        let record = SequenceRecord::new("a", "ACGT").unwrap();
        let transcript = Transcript::new(record, Arc::new(Origin::Bytes), 0);

        let mut seen = Vec::new();
        let mut op = ForEachOp::new(|t: &mut Transcript| seen.push(t.record.id().to_owned()));
        let (res, done) = op.run(Some(transcript)).unwrap();
        drop(op);

        assert!(res.is_some());
        assert!(!done);
        assert_eq!(seen, ["a"]);
    }
}
