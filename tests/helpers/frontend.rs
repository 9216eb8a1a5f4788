//! A scripted frontend handing out prepared raw parses by file path.

use std::sync::atomic::{AtomicUsize, Ordering};

use javelin::error::FrontendError;
use javelin::frontend::{JavaFrontend, RawParse, SourceUnit};
use javelin::ParserOptions;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct FixedFrontend {
    parses: FxHashMap<String, RawParse>,
    /// Index at which `parse_batch` gives up.
    abort_at: Option<usize>,
    single_calls: AtomicUsize,
}

impl FixedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, parse: RawParse) -> Self {
        self.parses.insert(path.to_string(), parse);
        self
    }

    pub fn aborting_at(mut self, index: usize) -> Self {
        self.abort_at = Some(index);
        self
    }

    /// Calls to [`JavaFrontend::parse`] made outside of a batch.
    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, unit: &SourceUnit) -> Result<RawParse, FrontendError> {
        self.parses
            .get(&unit.path)
            .cloned()
            .ok_or_else(|| FrontendError::Failed {
                file: unit.path.clone(),
                reason: "no prepared parse".to_string(),
            })
    }
}

impl JavaFrontend for FixedFrontend {
    fn parse(&self, unit: &SourceUnit, _options: &ParserOptions) -> Result<RawParse, FrontendError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(unit)
    }

    fn parse_batch(
        &self,
        units: &[SourceUnit],
        _options: &ParserOptions,
        sink: &mut dyn FnMut(usize, Result<RawParse, FrontendError>),
    ) -> Result<(), FrontendError> {
        for (index, unit) in units.iter().enumerate() {
            if self.abort_at == Some(index) {
                return Err(FrontendError::BatchAborted("parser state corrupted".to_string()));
            }
            sink(index, self.lookup(unit));
        }
        Ok(())
    }
}
