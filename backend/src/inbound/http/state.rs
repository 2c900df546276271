//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised with mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{KitchenCommand, KitchenQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub kitchen: Arc<dyn KitchenQuery>,
    pub commands: Arc<dyn KitchenCommand>,
}

impl HttpState {
    /// Bundle the three driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use kitchen::domain::{KitchenRepositories, KitchenService, PasswordLoginService};
    /// use kitchen::inbound::http::state::HttpState;
    /// use kitchen::outbound::memory::InMemoryKitchenStore;
    ///
    /// let store = Arc::new(InMemoryKitchenStore::new());
    /// let service = Arc::new(KitchenService::new(KitchenRepositories::shared(store.clone())));
    /// let state = HttpState::new(
    ///     Arc::new(PasswordLoginService::new(store)),
    ///     service.clone(),
    ///     service,
    /// );
    /// let _kitchen = state.kitchen.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        kitchen: Arc<dyn KitchenQuery>,
        commands: Arc<dyn KitchenCommand>,
    ) -> Self {
        Self {
            login,
            kitchen,
            commands,
        }
    }
}
