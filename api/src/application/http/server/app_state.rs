use std::sync::Arc;

use foogie_core::application::FoogieService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: FoogieService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: FoogieService) -> Self {
        Self { args, service }
    }
}
