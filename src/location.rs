use crate::profile::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location access was denied")]
    Denied,
    #[error("No position source is available")]
    Unavailable,
}

/// One-shot position lookup used to enrich the user's profile.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Reports a position taken from configuration.
pub struct FixedLocator {
    coordinates: Option<Coordinates>,
    granted: bool,
}

impl FixedLocator {
    pub fn new(coordinates: Option<Coordinates>, granted: bool) -> Self {
        Self {
            coordinates,
            granted,
        }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        if !self.granted {
            return Err(LocationError::Denied);
        }
        self.coordinates.ok_or(LocationError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Coordinates = Coordinates {
        lat: 10.78,
        lng: 106.69,
    };

    #[tokio::test]
    async fn denial_wins_over_known_position() {
        let locator = FixedLocator::new(Some(HERE), false);
        assert!(matches!(locator.locate().await, Err(LocationError::Denied)));
    }

    #[tokio::test]
    async fn missing_position_is_unavailable() {
        let locator = FixedLocator::new(None, true);
        assert!(matches!(
            locator.locate().await,
            Err(LocationError::Unavailable)
        ));
        let locator = FixedLocator::new(Some(HERE), true);
        assert_eq!(locator.locate().await.unwrap(), HERE);
    }
}
