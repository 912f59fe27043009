//! Bracket construction service
//!
//! Builds brackets of a given size from whatever template source it was given.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Bracket, Payload};
use crate::infrastructure::traits::TemplateProvider;

/// Service for building brackets from templates.
pub struct BracketService {
    templates: Arc<dyn TemplateProvider>,
}

impl BracketService {
    /// Create a new bracket service.
    pub fn new(templates: Arc<dyn TemplateProvider>) -> Self {
        Self { templates }
    }

    /// Build an empty-payload bracket for `size` competitors.
    ///
    /// The whole template is read before the first insertion, so a failed read
    /// never leaves a partial bracket behind. Repeated positions are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn by_size(&self, size: usize) -> ApplicationResult<Bracket> {
        let seats = self.templates.seats(size)?;
        if seats.is_empty() {
            return Err(ApplicationError::EmptyTemplate { size });
        }

        let mut bracket = Bracket::new();
        for seat in &seats {
            if !bracket.add(seat.position, Payload::new()) {
                warn!(
                    position = seat.position,
                    size, "by_size: duplicate template position skipped"
                );
            }
        }
        debug!(
            "by_size: built bracket of {} seats, depth {:?}",
            bracket.size(),
            bracket.depth()
        );
        Ok(bracket)
    }
}
