#![allow(dead_code)]
#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # Preproc Analyzer — Pré-processador de Mensagens de Chat
//!
//! **Ponto de entrada principal** do serviço que classifica mensagens de
//! chat em quatro buckets (`system`, `messages`, `user`, `unclear`), detecta
//! os scopes de autorização externa de pedidos de integração e monta os
//! metadados usados pelo construtor de prompts.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Carrega Config (config.toml + PREPROC_*)
//!   ├── Configura tracing (pretty ou json)
//!   ├── Analyzer::init
//!   │     ├── escolhe o backend de lematização (dictionary / hybrid)
//!   │     └── carrega data/learned_verbs.json (ou começa vazio)
//!   ├── Monta AppState e Router
//!   ├── Serve até Ctrl-C / SIGTERM
//!   └── Analyzer::shutdown → grava o lote pendente de verbos aprendidos
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs detalhados (hits/misses de cache, regra que decidiu)
//! RUST_LOG=debug cargo run
//!
//! # Só dicionário, logs em JSON, outra porta
//! PREPROC_LEMMATIZER_MODE=dictionary PREPROC_LOG_FORMAT=json PREPROC_BIND=127.0.0.1:9000 cargo run
//! ```

/// Módulo `core`: tipos compartilhados: Category, ClassificationResult, Message, erros.
mod core;

/// Módulo `nlu`: normalizador, lematizador, classificador e detector de scopes.
mod nlu;

/// Módulo `persistence`: dicionário de verbos aprendidos em JSON.
mod persistence;

/// Módulo `cache`: cache TTL + LRU de resultados por hash do texto.
mod cache;

/// Módulo `analyzer`: o serviço que amarra o pipeline.
mod analyzer;

/// Módulo `payload`: metadados para o construtor de prompts.
mod payload;

/// Módulo `metrics`: contadores do serviço e memória do processo.
mod metrics;

/// Módulo `config`: configuração TOML + variáveis de ambiente.
mod config;

/// Módulo `web`: servidor axum e handlers HTTP.
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::analyzer::Analyzer;
use crate::config::{Config, LogFormat, LoggingConfig};
use crate::payload::PayloadBuilder;
use crate::web::state::AppState;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Espera Ctrl-C ou SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "falha ao instalar handler de Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "falha ao instalar handler de SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("sinal de encerramento recebido, drenando conexões");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "preproc-analyzer iniciando");

    let addr = config.server.socket_addr()?;
    let analyzer = Arc::new(Analyzer::init(&config));
    let state = AppState::new(analyzer.clone(), PayloadBuilder::from(&config.payload));
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("falha ao abrir {addr}"))?;
    tracing::info!(%addr, "servidor ouvindo");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    analyzer.shutdown();
    tracing::info!("encerrado");
    Ok(())
}
