//! Batch and parallel conversion through a shared frontend.
