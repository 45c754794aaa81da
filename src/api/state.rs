use std::sync::Arc;

use crate::convert::Converter;
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<dyn Converter>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(converter: Arc<dyn Converter>) -> Self {
        Self {
            converter,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
