//! Traits describing read-only rule data.
//!
//! Oracles expose static content (enemy templates, skill templates, stages,
//! question pools) and deterministic randomness. The [`Env`] aggregate bundles
//! them so the engine can access everything it needs without hard coupling to
//! concrete implementations.
mod content;
mod error;
mod rng;

pub use content::{ContentOracle, EnemyTemplate};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates read-only oracles required by the engine.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    content: Option<&'a C>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<'a, dyn ContentOracle + 'a, dyn RngOracle + 'a>;

impl<'a, C, R> Env<'a, C, R>
where
    C: ContentOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(content: Option<&'a C>, rng: Option<&'a R>) -> Self {
        Self { content, rng }
    }

    pub fn with_all(content: &'a C, rng: &'a R) -> Self {
        Self::new(Some(content), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            content: None,
            rng: None,
        }
    }

    /// Returns the ContentOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ContentNotAvailable` if no content oracle was provided.
    pub fn content(&self) -> Result<&'a C, OracleError> {
        self.content.ok_or(OracleError::ContentNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no RNG oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}
