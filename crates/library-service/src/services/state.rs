//! State registry service

use tracing::{info, instrument};

use library_core::{State, StatusName};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct StateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StateService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create any registry rows that are missing. Safe to run on every start.
    #[instrument(skip(self))]
    pub async fn ensure_registry(&self) -> ServiceResult<Vec<State>> {
        let repo = self.ctx.state_repo();
        for name in StatusName::ALL {
            if repo.find_by_name(name).await?.is_none() {
                repo.create(&State::seed(name)).await?;
                info!(state = %name, "Seeded state");
            }
        }
        Ok(repo.list().await?)
    }

    pub async fn get(&self, name: StatusName) -> ServiceResult<State> {
        self.ctx
            .state_repo()
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found_on_fetch("State"))
    }

    pub async fn list(&self) -> ServiceResult<Vec<State>> {
        Ok(self.ctx.state_repo().list().await?)
    }

    /// Whether every registry name has a row
    pub async fn is_seeded(&self) -> ServiceResult<bool> {
        let states = self.list().await?;
        Ok(StatusName::ALL
            .iter()
            .all(|name| states.iter().any(|s| s.name == *name)))
    }
}
