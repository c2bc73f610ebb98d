//! # NLU — Normalização, Lematização e Classificação
//!
//! Este módulo reúne o **núcleo** do pré-processador: tudo que transforma
//! uma mensagem de chat em `(categoria, razões, scopes)`. Nenhum
//! sub-módulo faz I/O de rede; o único acesso a disco é o dicionário
//! aprendido do [`lemmatizer`].
//!
//! ## Fluxo
//!
//! ```text
//! mensagem
//!   ├── normalizer   minúsculas + sem acento (memo LRU)
//!   ├── features     tokens, lemas, verbos de integração
//!   │     └── lemmatizer   estático → aprendido → fallback → identidade
//!   ├── classifier   regras 1..12, primeira que casa decide
//!   └── scopes       só se categoria == system
//! ```
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`normalizer`] | Case-fold + remoção de diacríticos |
//! | [`lemmatizer`] | Formas verbais → infinitivo, com aprendizado persistido |
//! | [`lexicon`] | Listas de palavras e frases usadas pelas regras |
//! | [`features`] | Tokenização e consultas sobre a mensagem |
//! | [`question`] | Detecção de perguntas com ou sem `?` |
//! | [`rules`] | Os 12 grupos de regras em ordem de prioridade |
//! | [`classifier`] | Avaliação first-match das regras |
//! | [`scopes`] | Tokens de autorização externa |
//! | [`language`] | Flag `pt` / `en` |

pub mod classifier;
pub mod features;
pub mod language;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod question;
pub mod rules;
pub mod scopes;

pub use classifier::{Classifier, Decision};
pub use lemmatizer::{Lemmatizer, LemmatizerMode, LemmatizerSettings};
pub use normalizer::Normalizer;
pub use scopes::ScopeDetector;
