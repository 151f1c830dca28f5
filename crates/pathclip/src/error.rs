//! Error type shared by every kernel operation.
//!
//! Purpose
//! - Malformed input fails fast with the offending geometry attached, so the
//!   caller can fix the path upstream.
//! - Algorithmic non-convergence (iteration ceiling, indecisive containment)
//!   is reported, never papered over with a guessed answer.

use thiserror::Error;

use crate::containment::FillRule;

/// Errors raised by containment, clipping and path utilities.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// Subject must be closed because the caller asked for closed output.
    #[error("the subject path is open: {path}")]
    OpenPath { path: String },

    /// Window loops must always be closed.
    #[error("the window edges are open: {path}")]
    OpenEdges { path: String },

    #[error(
        "window vertex ({s}, {t}) lies outside the domain [{s_min}, {s_max}] x [{t_min}, {t_max}]"
    )]
    EdgeOutsideDomain {
        s: f64,
        t: f64,
        s_min: f64,
        s_max: f64,
        t_min: f64,
        t_max: f64,
    },

    #[error(
        "the point ({s}, {t}) is not on the domain [{s_min}, {s_max}] x [{t_min}, {t_max}]"
    )]
    PointOutsideDomain {
        s: f64,
        t: f64,
        s_min: f64,
        s_max: f64,
        t_min: f64,
        t_max: f64,
    },

    /// A sub-path of fewer than three straight segments encloses nothing.
    #[error("ill-posed polygon: the section starting at segment {start} is only {len} long: {path}")]
    IllPosed {
        start: usize,
        len: usize,
        path: String,
    },

    #[error("the fill rule {0:?} is not defined on periodic domains")]
    FillRuleOnPeriodicDomain(FillRule),

    #[error("degenerate arc (its start is its end): {segment}")]
    DegenerateArc { segment: String },

    #[error("'{kind}' segments are not supported by {operation}")]
    UnsupportedSegment {
        kind: char,
        operation: &'static str,
    },

    #[error("arcs are not supported on periodic domains")]
    ArcOnPeriodicDomain,

    /// Geographic windows only allow zero-length lines as loop closers.
    #[error("a window line from ({s0}, {t0}) to ({s1}, {t1}) has nonzero length on a periodic domain")]
    GeographicEdgeHasLength { s0: f64, t0: f64, s1: f64, t1: f64 },

    #[error("the path does not begin with a moveto")]
    MissingMoveTo,

    #[error("this operation requires a nonempty path")]
    EmptyPath,

    #[error("the polygon has no segments to aim a ray at: {path}")]
    NoSegments { path: String },

    #[error("arcs cannot be scaled anisotropically ({scale_s} vs {scale_t})")]
    AnisotropicArcScale { scale_s: f64, scale_t: f64 },

    #[error("unsupported rotation angle: {0}")]
    UnsupportedRotation(i32),

    #[error("clipping did not converge between {previous} and {current} after {iterations} iterations")]
    IterationCeiling {
        previous: String,
        current: String,
        iterations: usize,
    },

    #[error("containment stayed indecisive after escalation: {path}")]
    Indecisive { path: String },

    #[error("no restart position found on window loop {loop_index}")]
    NoRestart { loop_index: usize },

    #[error("a section ended at ({s}, {t}) on the domain edge, but no window edge continues from there")]
    DanglingOnDomainEdge { s: f64, t: f64 },

    #[error("a section ended at ({s}, {t}) and nothing picks up from there")]
    Dangling { s: f64, t: f64 },

    #[error("the section starting at ({s}, {t}) was already drawn")]
    AlreadyDrawn { s: f64, t: f64 },

    #[error("decimation stalled on {path}")]
    DecimationStalled { path: String },

    #[error("cannot parse path at token {position} ('{token}'): {reason}")]
    Parse {
        position: usize,
        token: String,
        reason: String,
    },
}

/// Result alias for kernel operations.
pub type Result<T> = std::result::Result<T, PathError>;
