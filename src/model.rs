use num_traits::Float;

/// A scalar score with an optional gradient with respect to the model's
/// parameters.
///
/// The gradient is carried behind an explicit `Option` so consumers decide
/// by flag whether gradient-consuming strategies can run; there is no
/// capability probing on the scorer itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInfo<F> {
    score: F,
    gradient: Option<Vec<F>>,
}

impl<F: Float> ScoreInfo<F> {
    /// Bundle a bare score with no gradient.
    pub fn new(score: F) -> Self {
        ScoreInfo {
            score,
            gradient: None,
        }
    }

    /// Bundle a score together with its gradient.
    pub fn with_gradient(score: F, gradient: Vec<F>) -> Self {
        ScoreInfo {
            score,
            gradient: Some(gradient),
        }
    }

    /// The scalar score.
    pub fn score(&self) -> F {
        self.score
    }

    /// The gradient, if the scorer produced one.
    pub fn gradient(&self) -> Option<&[F]> {
        self.gradient.as_deref()
    }

    /// Whether a gradient is present.
    pub fn has_gradient(&self) -> bool {
        self.gradient.is_some()
    }
}

/// A model holding the parameter vector under optimisation.
///
/// The parameter vector is owned exclusively by the model and replaced
/// wholesale on each accepted step; no partial mutation is observable from
/// outside.
pub trait Model<F: Float> {
    /// The current parameter vector.
    fn parameters(&self) -> &[F];

    /// Replace the parameter vector wholesale.
    ///
    /// Returns `false`, leaving the current parameters untouched, when the
    /// new vector is structurally invalid (e.g. wrong length). Must not
    /// panic for that case.
    fn set_parameters(&mut self, parameters: &[F]) -> bool;
}

/// Evaluates a model against the scorer's bound data.
///
/// Scoring must be a pure function of the model's current parameters plus
/// the scorer's data: no hidden state spanning calls, safe to invoke on a
/// freshly updated model.
pub trait Scorer<F: Float, M: Model<F>> {
    /// Score the model, optionally with the gradient of the score with
    /// respect to the parameters.
    ///
    /// A bundle returned without a gradient when `want_gradient` was set
    /// surfaces from the engine as a `GradientUnavailable` status.
    fn score(&mut self, model: &M, want_gradient: bool) -> ScoreInfo<F>;
}

impl<F: Float, M: Model<F>, S: Scorer<F, M> + ?Sized> Scorer<F, M> for Box<S> {
    fn score(&mut self, model: &M, want_gradient: bool) -> ScoreInfo<F> {
        (**self).score(model, want_gradient)
    }
}

/// The plain dense model: a bare parameter vector with length checking.
#[derive(Debug, Clone, PartialEq)]
pub struct VecModel<F> {
    parameters: Vec<F>,
}

impl<F: Float> VecModel<F> {
    pub fn new(parameters: Vec<F>) -> Self {
        VecModel { parameters }
    }
}

impl<F: Float> Model<F> for VecModel<F> {
    fn parameters(&self) -> &[F] {
        &self.parameters
    }

    fn set_parameters(&mut self, parameters: &[F]) -> bool {
        if parameters.len() != self.parameters.len() {
            return false;
        }
        self.parameters.clear();
        self.parameters.extend_from_slice(parameters);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_info_gradient_flag() {
        let plain = ScoreInfo::new(1.5);
        assert!(!plain.has_gradient());
        assert_eq!(plain.gradient(), None);

        let full = ScoreInfo::with_gradient(1.5, vec![0.5, -0.5]);
        assert!(full.has_gradient());
        assert_eq!(full.gradient(), Some(&[0.5, -0.5][..]));
        assert_eq!(full.score(), 1.5);
    }

    #[test]
    fn vec_model_replaces_wholesale() {
        let mut model = VecModel::new(vec![1.0, 2.0]);
        assert!(model.set_parameters(&[3.0, 4.0]));
        assert_eq!(model.parameters(), &[3.0, 4.0]);
    }

    #[test]
    fn vec_model_rejects_wrong_length_unchanged() {
        let mut model = VecModel::new(vec![1.0, 2.0]);
        assert!(!model.set_parameters(&[1.0, 2.0, 3.0]));
        // Rejection leaves the previous parameters bitwise intact.
        assert_eq!(model.parameters(), &[1.0, 2.0]);
    }
}
