//! `lift-metrics` — post-run statistics over the passenger log.
//!
//! # Conventions
//!
//! Passengers partition into *finished* (exit recorded) and *unfinished*.
//! Timing statistics are computed over sorted samples from the finished set;
//! percentiles are linearly interpolated and the standard deviation is the
//! population form.  Every statistic of an empty sample is `0.0`, and every
//! ratio with a zero divisor is `0.0` — a run never fails on arithmetic.

pub mod aggregate;

#[cfg(test)]
mod tests;

pub use aggregate::{compute_metrics, MetricResult, OperationalTotals};
