//! # Normalizador — Minúsculas e Remoção de Diacríticos
//!
//! Transformação pura e total: `"Reunião às 14h"` → `"reuniao as 14h"`.
//!
//! ```text
//! texto ──► to_lowercase ──► NFD ──► remove marcas combinantes ──► texto'
//!                            "ã" → "a" + U+0303     └── descarta U+0303
//! ```
//!
//! Fora isso o texto é preservado: pontuação, dígitos, emojis e espaços
//! passam intactos. O mesmo literal é normalizado várias vezes ao longo do
//! pipeline (cache, classificador, scopes), por isso há memoização em um
//! LRU limitado.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Capacidade padrão do memo de normalização.
pub const DEFAULT_CAPACITY: usize = 500;

/// Aplica a transformação sem memoização.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Normalizador memoizado, seguro para uso concorrente.
pub struct Normalizer {
    memo: Mutex<LruCache<String, String>>,
}

impl Normalizer {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memo: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Normaliza `text`, consultando o memo antes de calcular.
    ///
    /// O lock não é mantido durante o cálculo; duas threads podem calcular
    /// o mesmo valor em paralelo, e o resultado é idêntico.
    pub fn normalize(&self, text: &str) -> String {
        if let Some(hit) = self.memo.lock().get(text) {
            return hit.clone();
        }
        let folded = fold(text);
        self.memo.lock().put(text.to_string(), folded.clone());
        folded
    }

    /// Entradas atualmente memoizadas.
    pub fn len(&self) -> usize {
        self.memo.lock().len()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(fold("Agende uma Reunião amanhã às 14h"), "agende uma reuniao amanha as 14h");
        assert_eq!(fold("AÇÃO, cônjuge, pôr"), "acao, conjuge, por");
    }

    #[test]
    fn preserves_everything_else() {
        assert_eq!(fold("joão@empresa.com? 100%!"), "joao@empresa.com? 100%!");
        assert_eq!(fold("  dois   espaços "), "  dois   espaços ".replace('ç', "c"));
    }

    #[test]
    fn fold_is_idempotent() {
        let once = fold("Está tudo ótimo?");
        assert_eq!(fold(&once), once);
    }

    #[test]
    fn memo_is_bounded() {
        let n = Normalizer::new(2);
        n.normalize("Um");
        n.normalize("Dois");
        n.normalize("Três");
        assert_eq!(n.len(), 2);
        assert_eq!(n.normalize("Três"), "tres");
    }

    #[test]
    fn zero_capacity_falls_back_to_one() {
        let n = Normalizer::new(0);
        assert_eq!(n.normalize("É"), "e");
        assert_eq!(n.len(), 1);
    }
}
