use std::sync::Arc;

use crate::gateway::UserGateway;

pub struct AppState {
    pub gateway: Box<dyn UserGateway>,
}

impl AppState {
    pub fn new(gateway: impl UserGateway + 'static) -> Self {
        Self {
            gateway: Box::new(gateway),
        }
    }
}

pub type SharedState = Arc<AppState>;
