//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Link service over type-erased storage and generator handles.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn CodeGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
}

impl AppState {
    /// Creates state from explicit storage and generator instances.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository, code_generator)),
        }
    }

    /// Wires the PostgreSQL repository and the random code generator.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgLinkRepository::new(Arc::new(pool))),
            Arc::new(RandomCodeGenerator),
        )
    }
}
