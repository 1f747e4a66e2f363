use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use escala_core::error::CoreError;
use escala_service::store::BoardStore;

pub struct BoardStoreHandler {
    pub store: Arc<dyn BoardStore>,
}

#[async_trait]
impl salvo::Handler for BoardStoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the board store from the depot.
///
/// ## Errors
/// Returns an error if the board store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn BoardStore>> {
    depot
        .obtain::<Arc<dyn BoardStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Board store not found in depot").into())
}
