//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos compartilhados** por todas as camadas do
//! pré-processador. Nenhum deles conhece HTTP, disco ou regras de
//! classificação; são apenas os dados que fluem pelo pipeline:
//!
//! - [`Category`]: os quatro buckets terminais (`system`, `messages`, `user`, `unclear`)
//! - [`ClassificationResult`]: categoria + razões + scopes, o valor guardado no cache
//! - [`Message`]: texto bruto, normalizado, lematizado e idioma de uma requisição
//! - [`RequestContext`]: dicas de idioma/temperatura/modelo enviadas pelo chamador
//! - [`Language`]: flag binária `pt` / `en`
//! - [`PersistenceError`], [`FallbackError`]: taxonomia de erros recuperáveis
//!
//! ## Fluxo dos Tipos
//!
//! ```text
//! texto bruto ──► Message { raw, normalized, lemmatized, language }
//!                    │
//!                    ▼
//!            ClassificationResult { category, reasons, scope, ... }
//!                    │
//!                    ▼
//!            ResultCache (chave = sha256(normalized))
//! ```

/// Sub-módulo com a implementação de [`Category`].
pub mod category;

/// Sub-módulo com [`ClassificationResult`], [`Message`], [`RequestContext`] e [`Language`].
pub mod classification;

/// Sub-módulo com os erros locais-recuperáveis do núcleo.
pub mod error;

// Re-exports para conveniência: permite usar `crate::core::Category` diretamente.
pub use category::Category;
pub use classification::{ClassificationResult, Language, Message, RequestContext, EMPTY_INPUT};
pub use error::{FallbackError, PersistenceError};
