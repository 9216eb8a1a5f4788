//! Multi-file conversion.
//!
//! Files of a batch share one frontend instance. When the frontend gives
//! up part way, the files it never reported are retried one at a time, so
//! one bad file cannot take the rest of the batch down with it.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::ConvertError;
use crate::frontend::{JavaFrontend, SourceUnit};
use crate::{JavaFile, analyze};

/// Parse and convert one file.
pub fn convert_file<F>(frontend: &F, unit: &SourceUnit, config: &AnalysisConfig) -> Result<JavaFile, ConvertError>
where
    F: JavaFrontend + ?Sized,
{
    let parse = frontend.parse(unit, &config.parser)?;
    analyze(&unit.text, parse, config)
}

/// Convert `units` through [`JavaFrontend::parse_batch`]. Results come back
/// in input order, one per unit.
pub fn convert_batch<F>(frontend: &F, units: &[SourceUnit], config: &AnalysisConfig) -> Vec<Result<JavaFile, ConvertError>>
where
    F: JavaFrontend + ?Sized,
{
    let mut results: Vec<Option<Result<JavaFile, ConvertError>>> = units.iter().map(|_| None).collect();

    let outcome = frontend.parse_batch(units, &config.parser, &mut |index, parse| {
        let (Some(unit), Some(slot)) = (units.get(index), results.get_mut(index)) else {
            warn!(index, "frontend reported an index outside the batch");
            return;
        };
        *slot = Some(parse.map_err(ConvertError::from).and_then(|parse| analyze(&unit.text, parse, config)));
    });

    let pending = results.iter().filter(|r| r.is_none()).count();
    match outcome {
        Err(error) => warn!(%error, pending, "batch parse aborted, retrying remaining files one by one"),
        Ok(()) if pending > 0 => warn!(pending, "batch parse skipped files, retrying them one by one"),
        Ok(()) => {}
    }

    let results: Vec<_> = results
        .into_iter()
        .zip(units)
        .map(|(result, unit)| match result {
            Some(result) => result,
            None => convert_file(frontend, unit, config),
        })
        .collect();
    debug!(
        files = results.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "batch converted"
    );
    results
}

/// Convert `units` on the rayon pool, one frontend call per file.
pub fn convert_parallel<F>(frontend: &F, units: &[SourceUnit], config: &AnalysisConfig) -> Vec<Result<JavaFile, ConvertError>>
where
    F: JavaFrontend + Sync + ?Sized,
{
    units
        .par_iter()
        .map(|unit| convert_file(frontend, unit, config))
        .collect()
}
