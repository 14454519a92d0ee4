//! Computation graph that drives records through the pipeline.
//!
//! A [`Graph`] is a list of nodes. The first node is an input node that is run without a
//! transcript and produces one [`Transcript`] per record. Every other node receives that
//! transcript, enriches it, and passes it on. After the input is exhausted, every node is given
//! the chance to flush its output in [`GraphNode::finish`].
//!
//! Errors that only invalidate one record (see [`Error::is_record_error`]) are logged and the
//! record is skipped. Any other error stops the run.

mod ops;
pub use ops::*;

pub use crate::errors::*;
pub use crate::layout::*;
pub use crate::transcript::*;

pub trait GraphNode {
    /// Process one transcript.
    ///
    /// Returns the transcript to hand to the next node (`None` drops it) and whether the stream
    /// is done. Only input nodes are run with `None`.
    fn run(&mut self, transcript: Option<Transcript>) -> Result<(Option<Transcript>, bool)>;

    /// Called once after the last transcript.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}

/// Counts gathered while running a [`Graph`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub skipped: usize,
    pub occurrences: usize,
}

#[derive(Default)]
pub struct Graph<'a> {
    nodes: Vec<Box<dyn GraphNode + 'a>>,
}

impl<'a> Graph<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node. The first node added must be an input node.
    pub fn add(&mut self, node: impl GraphNode + 'a) -> &mut Self {
        self.nodes.push(Box::new(node));
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run every record through the graph, then finish every node.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let Some((input, rest)) = self.nodes.split_first_mut() else {
            return Ok(summary);
        };

        loop {
            let (transcript, done) = match input.run(None) {
                Ok(res) => res,
                Err(e) if e.is_record_error() => {
                    log::warn!("Skipping record in {}: {e}", input.name());
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(transcript) = transcript {
                match Self::run_rest(rest, transcript) {
                    Ok(Some(transcript)) => {
                        summary.records += 1;
                        summary.occurrences +=
                            transcript.occurrences.as_ref().map_or(0, |o| o.len());
                    }
                    Ok(None) => summary.records += 1,
                    Err(e) if e.is_record_error() => {
                        log::warn!("Skipping record: {e}");
                        summary.skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            if done {
                break;
            }
        }

        for node in self.nodes.iter_mut() {
            node.finish()?;
        }

        Ok(summary)
    }

    fn run_rest(
        nodes: &mut [Box<dyn GraphNode + 'a>],
        transcript: Transcript,
    ) -> Result<Option<Transcript>> {
        let mut curr = Some(transcript);

        for node in nodes.iter_mut() {
            let Some(transcript) = curr.take() else {
                break;
            };
            let (next, _) = node.run(Some(transcript))?;
            curr = next;
        }

        Ok(curr)
    }
}
