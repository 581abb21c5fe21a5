use thiserror::Error;

/// Configuration errors detected before any optimisation work starts.
///
/// Run-time optimisation outcomes (no improvement, convergence, exhausted
/// budgets, rejected updates) are reported through
/// [`OptimStatus`](crate::result::OptimStatus) in the results, never
/// through this type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptimError {
    /// The optimiser was constructed without any scorer.
    #[error("at least one scorer is required")]
    NoScorers,
    /// The optimisation scorer did not produce a gradient when asked for
    /// one; every direction strategy consumes gradients.
    #[error("optimisation scorer did not produce a gradient")]
    MissingGradient,
    /// L-BFGS was selected with a zero history size.
    #[error("L-BFGS memory size must be at least 1")]
    ZeroMemory,
    /// `min_direction_step` exceeds `max_direction_step` with both bounds
    /// enabled.
    #[error("minimum direction step exceeds maximum direction step")]
    InvalidStepBounds,
}
