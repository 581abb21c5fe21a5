use std::fmt;

use crate::model::ScoreInfo;

/// Lifecycle state of an optimisation run.
///
/// Every variant except [`Running`](OptimStatus::Running) is terminal for
/// the current `optimize` call; the iteration-budget variants are
/// additionally resumable on the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimStatus {
    /// The run is still making progress.
    Running,
    /// The per-call iteration budget was reached (resumable).
    MaxIterationsExceeded,
    /// The per-call sub-iteration budget was reached (resumable).
    MaxSubIterationsExceeded,
    /// The gradient vanished; there is no direction left to move in.
    GradientTooSmall,
    /// The model rejected the parameter restore after a failed update.
    UpdateFailed,
    /// An accepted update did not improve the score.
    ScoreNotImproved,
    /// The score improvement fell below `score_tolerance`.
    ScoreConverged,
    /// The score improvement fell below `|old score|` times
    /// `relative_score_tolerance`.
    RelativeScoreConverged,
    /// A gradient was required but the score bundle did not carry one.
    GradientUnavailable,
    /// The trial step moved the parameters by less than
    /// `min_direction_step`.
    DirectionStepTooSmall,
    /// The trial step moved the parameters by more than
    /// `max_direction_step`.
    DirectionStepTooLarge,
    /// The model rejected a trial parameter vector during the line search.
    ParameterUpdateFailed,
}

impl OptimStatus {
    /// Whether this status ends the current `optimize` call.
    pub fn is_terminal(self) -> bool {
        self != OptimStatus::Running
    }

    /// Statuses the next `optimize` call resumes from automatically.
    pub fn is_resumable(self) -> bool {
        matches!(
            self,
            OptimStatus::MaxIterationsExceeded | OptimStatus::MaxSubIterationsExceeded
        )
    }
}

impl fmt::Display for OptimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimStatus::Running => write!(f, "running"),
            OptimStatus::MaxIterationsExceeded => write!(f, "maximum iterations reached"),
            OptimStatus::MaxSubIterationsExceeded => write!(f, "maximum sub-iterations reached"),
            OptimStatus::GradientTooSmall => write!(f, "gradient too small"),
            OptimStatus::UpdateFailed => write!(f, "parameter restore rejected by model"),
            OptimStatus::ScoreNotImproved => write!(f, "score did not improve"),
            OptimStatus::ScoreConverged => write!(f, "score improvement below tolerance"),
            OptimStatus::RelativeScoreConverged => {
                write!(f, "score improvement below relative tolerance")
            }
            OptimStatus::GradientUnavailable => write!(f, "gradient unavailable"),
            OptimStatus::DirectionStepTooSmall => write!(f, "direction step below minimum"),
            OptimStatus::DirectionStepTooLarge => write!(f, "direction step above maximum"),
            OptimStatus::ParameterUpdateFailed => write!(f, "trial parameters rejected by model"),
        }
    }
}

/// What one `optimize` call did.
#[derive(Debug, Clone)]
pub struct OptimResults<F> {
    /// Iterations performed by this call.
    pub iterations: usize,
    /// Line-search sub-iterations performed by this call.
    pub sub_iterations: usize,
    /// Scores before this call, optimisation scorer first.
    pub initial_scores: Vec<F>,
    /// Scores after this call, optimisation scorer first.
    pub final_scores: Vec<F>,
    /// Final score-gradient bundle of the optimisation scorer.
    pub score_info: ScoreInfo<F>,
    /// Terminal status of this call.
    pub status: OptimStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_budget_statuses_resume() {
        assert!(OptimStatus::MaxIterationsExceeded.is_resumable());
        assert!(OptimStatus::MaxSubIterationsExceeded.is_resumable());
        assert!(!OptimStatus::ScoreConverged.is_resumable());
        assert!(!OptimStatus::Running.is_resumable());
    }

    #[test]
    fn running_is_not_terminal() {
        assert!(!OptimStatus::Running.is_terminal());
        assert!(OptimStatus::ScoreNotImproved.is_terminal());
    }
}
