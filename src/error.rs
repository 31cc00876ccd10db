//! Error types of the batched transforms and of the engine seam.
use crate::plan::PlanFamily;

/// Status reported by an [`FftEngine`](crate::FftEngine) when a transform
/// could not be applied to a buffer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The buffer handed to the engine does not match the plan length.
    #[error("buffer length mismatch, got {got} expected {expected}")]
    BufferLength {
        /// Number of doubles the plan expects.
        expected: usize,
        /// Number of doubles actually passed.
        got: usize,
    },

    /// The plan was already handed back to the engine.
    #[error("plan already released")]
    Released,

    /// Error reported by the real-input transform backend.
    #[error(transparent)]
    RealFft(#[from] realfft::FftError),
}

/// Failure of one of the batched operations.
///
/// Both causes are allocation failures in the sense of the underlying engine:
/// either no plan could be built, or applying it failed part way through the
/// batch. In both cases no output array is returned.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// The engine could not construct a plan for the requested length.
    #[error("failed to allocate {family} plan of length {length}")]
    Plan {
        /// Transform family of the requested plan.
        family: PlanFamily,
        /// Requested transform length.
        length: usize,
    },

    /// Applying the plan failed on one of the batch slices.
    #[error("{family} transform of length {length} failed on batch slice {slice}")]
    Transform {
        /// Transform family of the plan in use.
        family: PlanFamily,
        /// Transform length.
        length: usize,
        /// Index of the slice that failed.
        slice: usize,
        /// Status reported by the engine.
        #[source]
        source: EngineError,
    },
}

/// Convenience alias for `Result<T, AllocationError>`.
pub type Result<T> = std::result::Result<T, AllocationError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages_name_family_and_length() {
        let err = AllocationError::Plan {
            family: PlanFamily::Real,
            length: 0,
        };
        assert_eq!(err.to_string(), "failed to allocate real plan of length 0");

        let err = AllocationError::Transform {
            family: PlanFamily::Complex,
            length: 8,
            slice: 3,
            source: EngineError::BufferLength {
                expected: 16,
                got: 14,
            },
        };
        assert_eq!(
            err.to_string(),
            "complex transform of length 8 failed on batch slice 3"
        );
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("buffer length mismatch, got 14 expected 16")
        );
    }
}
