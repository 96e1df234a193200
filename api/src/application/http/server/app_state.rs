use std::sync::Arc;

use lactose_core::application::LactoseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: LactoseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: LactoseService) -> Self {
        Self { args, service }
    }
}
