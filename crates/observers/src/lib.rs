//! Reusable observers for Strand's bracketed solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the Brent minimizer and the Brent root finder.
//!
//! # Modules
//!
//! - [`traits`]: capability traits for cross-solver observers
//!   ([`HasBracket`], [`HasResidual`], [`HasObjective`], [`CanStopEarly`],
//!   [`CanAssumeWorse`])
//! - [`IterationLog`]: per-iteration `tracing` diagnostics
//!
//! # Features
//!
//! - `plot`: enables [`PlotObserver`] for visualizing results via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: strand_core::Observer
//! [`HasBracket`]: traits::HasBracket
//! [`HasResidual`]: traits::HasResidual
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanAssumeWorse`]: traits::CanAssumeWorse

mod log;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use log::IterationLog;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
