//! # Cache de Resultados — TTL + LRU por Hash do Conteúdo
//!
//! Um hit pula o pipeline inteiro (lematizar → classificar → scopes).
//!
//! ```text
//! chave = hex(sha256(texto_normalizado))
//!
//! get(chave)
//!   ├── ausente                 → miss
//!   ├── presente, idade > TTL   → remove, miss
//!   └── presente, idade ≤ TTL   → hit (move para o topo do LRU)
//!
//! put(chave, resultado)         → overflow despeja o menos acessado
//! ```
//!
//! ## Invariante
//!
//! Um hit devolve exatamente o resultado que um cálculo novo teria
//! produzido no momento da inserção. O cache nunca altera o valor.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::core::ClassificationResult;

pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Chave do cache: SHA-256 do texto normalizado, em hex minúsculo.
pub fn cache_key(normalized: &str) -> String {
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

struct Entry {
    result: ClassificationResult,
    inserted_at: Instant,
}

/// Cache de [`ClassificationResult`] limitado por tamanho e idade.
pub struct ResultCache {
    entries: Mutex<LruCache<String, Entry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<ClassificationResult> {
        self.get_at(key, Instant::now())
    }

    /// Como [`get`](Self::get), com o relógio explícito.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<ClassificationResult> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if now.saturating_duration_since(entry.inserted_at) <= self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = key.get(..12).unwrap_or(key), "cache hit");
                return Some(entry.result.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = key.get(..12).unwrap_or(key), expired, "cache miss");
        None
    }

    pub fn put(&self, key: String, result: ClassificationResult) {
        self.put_at(key, result, Instant::now());
    }

    pub fn put_at(&self, key: String, result: ClassificationResult, now: Instant) {
        self.entries.lock().put(key, Entry { result, inserted_at: now });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn result(text: &str) -> ClassificationResult {
        ClassificationResult {
            category: Category::Messages,
            reasons: vec!["short and objective".into()],
            scope: Vec::new(),
            normalized_text: text.into(),
            lemmatized_text: text.into(),
            error: None,
        }
    }

    #[test]
    fn key_is_lowercase_sha256_hex() {
        let key = cache_key("oi");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(key, cache_key("oi"));
        assert_ne!(key, cache_key("oi!"));
    }

    #[test]
    fn non_ascii_key_is_logged_without_panic() {
        // byte 12 cai no meio de um `ç`
        let key = "açãoçãoção".to_string();
        assert!(!key.is_char_boundary(12));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let cache = ResultCache::default();
            assert!(cache.get_at(&key, Instant::now()).is_none());
            cache.put(key.clone(), result("acao"));
            assert_eq!(cache.get(&key), Some(result("acao")));
        });
    }

    #[test]
    fn miss_then_hit_returns_same_value() {
        let cache = ResultCache::default();
        let key = cache_key("qual a capital do brasil?");
        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), result("qual a capital do brasil?"));
        assert_eq!(cache.get(&key), Some(result("qual a capital do brasil?")));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ResultCache::new(10, Duration::from_secs(60));
        let t0 = Instant::now();
        cache.put_at("k".into(), result("a"), t0);
        assert!(cache.get_at("k", t0 + Duration::from_secs(60)).is_some());
        assert!(cache.get_at("k", t0 + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn overflow_evicts_least_recently_used() {
        let cache = ResultCache::new(2, DEFAULT_TTL);
        cache.put("a".into(), result("a"));
        cache.put("b".into(), result("b"));
        cache.get("a");
        cache.put("c".into(), result("c"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }
}
