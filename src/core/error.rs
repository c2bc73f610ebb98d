//! # Erros Locais-Recuperáveis
//!
//! Nenhum destes erros chega ao chamador de `classify`: todos são
//! devolvidos como `Result` até uma **fronteira de log** (lematizador ou
//! `Analyzer::init`), registrados e descartados.
//!
//! | Tipo | Quando | Tratamento |
//! |------|--------|------------|
//! | [`PersistenceError::Write`] | flush do dicionário aprendido falha | log `error`, estado em memória intacto |
//! | [`PersistenceError::CorruptLearnedState`] | arquivo ilegível/malformado no startup | log `warn`, dicionário vazio |
//! | [`FallbackError::Unavailable`] | regras morfológicas não carregam | log `warn` uma vez, identidade |
//! | [`FallbackError::Analysis`] | fallback falha em tempo de execução | log `warn` uma vez, identidade |
//!
//! Entrada vazia não é erro: vira o resultado-sentinela
//! [`ClassificationResult::empty_input`](super::ClassificationResult::empty_input).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("falha ao gravar dicionário aprendido em {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("falha ao serializar dicionário aprendido: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("dicionário aprendido em {path} ilegível ou malformado: {reason}")]
    CorruptLearnedState { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("fallback de lematização indisponível ({path}): {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("fallback falhou ao analisar '{word}': {reason}")]
    Analysis { word: String, reason: String },
}
