//! # Analyzer — Serviço de Pré-processamento
//!
//! O [`Analyzer`] é dono de todo o estado compartilhado do pipeline:
//! normalizador, lematizador, classificador, detector de scopes e cache
//! de resultados. É construído **uma vez** no startup ([`Analyzer::init`])
//! e compartilhado via `Arc` por todos os handlers.
//!
//! ## Fluxo de `classify`
//!
//! ```text
//! mensagem bruta
//!   │
//!   ├── trim vazio? ──► sentinela EMPTY_INPUT (sem cache, sem classificador)
//!   │
//!   ├── 1. Normalizer          minúsculas + sem acento
//!   ├── 2. ResultCache::get    sha256(normalizado)
//!   │      └── hit ──► devolve o resultado guardado, pipeline pulado
//!   ├── 3. Lemmatizer          texto lematizado
//!   ├── 4. Classifier          regras 1..12, primeira que casa
//!   ├── 5. ScopeDetector       só para `system`
//!   └── 6. ResultCache::put    e devolve
//! ```
//!
//! ## Ciclo de vida
//!
//! | Fase | Método | Efeito |
//! |------|--------|--------|
//! | startup | [`init`](Analyzer::init) | carrega o dicionário aprendido, escolhe o backend |
//! | serviço | [`analyze`](Analyzer::analyze) / [`classify`](Analyzer::classify) | total, nunca falha |
//! | shutdown | [`shutdown`](Analyzer::shutdown) | grava o lote pendente do dicionário aprendido |
//!
//! Dois misses concorrentes para a mesma chave nova calculam em paralelo e
//! o último `put` vence. Os dois resultados são idênticos.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::cache::{cache_key, ResultCache};
use crate::config::Config;
use crate::core::{ClassificationResult, Message, RequestContext};
use crate::nlu::language::resolve_language;
use crate::nlu::{Classifier, Lemmatizer, LemmatizerSettings, Normalizer, ScopeDetector};

/// Saída completa de uma análise: formas textuais + classificação.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub message: Message,
    pub result: ClassificationResult,
    pub cache_hit: bool,
    pub elapsed: Duration,
}

impl Analysis {
    pub fn is_empty_input(&self) -> bool {
        self.result.is_empty_input()
    }
}

pub struct Analyzer {
    normalizer: Normalizer,
    lemmatizer: Lemmatizer,
    classifier: Classifier,
    scopes: ScopeDetector,
    cache: ResultCache,
}

impl Analyzer {
    /// Constrói o serviço a partir da configuração carregada.
    pub fn init(config: &Config) -> Self {
        let settings = LemmatizerSettings::from(&config.lemmatizer);
        let lemmatizer = Lemmatizer::init(&settings);
        let analyzer = Self::from_parts(
            Normalizer::new(config.cache.normalizer_capacity),
            lemmatizer,
            Classifier::new(),
            ScopeDetector::new(),
            ResultCache::new(config.cache.capacity, config.cache.ttl()),
        );
        tracing::info!(
            backend = analyzer.lemmatizer.backend(),
            learned = analyzer.lemmatizer.learned_len(),
            rules = analyzer.classifier.rule_count(),
            cache_capacity = analyzer.cache.capacity(),
            ttl_secs = analyzer.cache.ttl().as_secs(),
            "analyzer pronto"
        );
        analyzer
    }

    pub fn from_parts(
        normalizer: Normalizer,
        lemmatizer: Lemmatizer,
        classifier: Classifier,
        scopes: ScopeDetector,
        cache: ResultCache,
    ) -> Self {
        Self {
            normalizer,
            lemmatizer,
            classifier,
            scopes,
            cache,
        }
    }

    /// Analisa uma mensagem: formas textuais, idioma e classificação.
    pub fn analyze(&self, raw: &str, ctx: &RequestContext) -> Analysis {
        let started = Instant::now();
        let trimmed = raw.trim();
        let language = resolve_language(ctx.language_hint(), raw);

        if trimmed.is_empty() {
            tracing::debug!("mensagem vazia, devolvendo sentinela");
            return Analysis {
                message: Message {
                    raw: raw.to_string(),
                    normalized: String::new(),
                    lemmatized: String::new(),
                    language,
                },
                result: ClassificationResult::empty_input(),
                cache_hit: false,
                elapsed: started.elapsed(),
            };
        }

        let normalized = self.normalizer.normalize(trimmed);
        let key = cache_key(&normalized);

        let (result, cache_hit) = match self.cache.get(&key) {
            Some(cached) => (cached, true),
            None => {
                let fresh = self.compute(trimmed, normalized);
                self.cache.put(key, fresh.clone());
                (fresh, false)
            }
        };

        let elapsed = started.elapsed();
        tracing::info!(
            category = %result.category,
            reason = result.reasons.first().map(String::as_str).unwrap_or(""),
            scopes = result.scope.len(),
            cache_hit,
            elapsed_us = elapsed.as_micros() as u64,
            "mensagem classificada"
        );

        Analysis {
            message: Message {
                raw: raw.to_string(),
                normalized: result.normalized_text.clone(),
                lemmatized: result.lemmatized_text.clone(),
                language,
            },
            result,
            cache_hit,
            elapsed,
        }
    }

    /// Operação central: só o resultado da classificação.
    pub fn classify(&self, raw: &str, ctx: &RequestContext) -> ClassificationResult {
        self.analyze(raw, ctx).result
    }

    /// Classifica várias mensagens em paralelo (rayon), preservando a ordem.
    pub fn classify_batch(&self, messages: &[String], ctx: &RequestContext) -> Vec<Analysis> {
        messages.par_iter().map(|m| self.analyze(m, ctx)).collect()
    }

    fn compute(&self, trimmed: &str, normalized: String) -> ClassificationResult {
        let lemmatized = self.lemmatizer.lemmatize_text(&normalized);
        let decision = self.classifier.classify(trimmed, &normalized, &self.lemmatizer);
        let scope = if decision.category.is_integration() {
            self.scopes.detect_scopes(&normalized, &self.lemmatizer)
        } else {
            Vec::new()
        };
        ClassificationResult {
            category: decision.category,
            reasons: decision.reasons,
            scope,
            normalized_text: normalized,
            lemmatized_text: lemmatized,
            error: None,
        }
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Grava o lote pendente do dicionário aprendido. Falhas são logadas.
    pub fn shutdown(&self) {
        match self.lemmatizer.flush() {
            Ok(0) => tracing::info!("shutdown: nenhum verbo aprendido pendente"),
            Ok(n) => tracing::info!(entries = n, "shutdown: dicionário aprendido gravado"),
            Err(e) => tracing::error!(error = %e, "shutdown: falha ao gravar dicionário aprendido"),
        }
    }
}
