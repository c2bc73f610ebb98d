//! # Estado da Aplicação Web
//!
//! Tudo é construído antes do servidor subir e compartilhado via `Arc`;
//! não há inicialização em background. O [`Analyzer`] é `Sync` e não
//! precisa de lock externo.

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::metrics::ServiceMetrics;
use crate::payload::PayloadBuilder;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub metrics: Arc<ServiceMetrics>,
    pub payload: Arc<PayloadBuilder>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>, payload: PayloadBuilder) -> Self {
        Self {
            analyzer,
            metrics: Arc::new(ServiceMetrics::new()),
            payload: Arc::new(payload),
        }
    }
}
