//! # Lematizador Híbrido — Formas Verbais → Infinitivo
//!
//! O [`Lemmatizer`] reduz formas conjugadas ao infinitivo para que o
//! classificador compare "agende", "agendou" e "agendando" como `agendar`.
//!
//! ## Ordem de Consulta
//!
//! ```text
//! palavra
//!   ├── 0. memo LRU (≈2000)            → hit: retorna
//!   ├── 1. dicionário estático          → match: retorna
//!   ├── 2. dicionário aprendido         → match: retorna
//!   ├── 3. fallback (LemmaFallback)
//!   │   ├── Ok(Some(inf)) → APRENDE forma → inf, retorna inf
//!   │   ├── Ok(None)      → identidade
//!   │   └── Err(_)        → identidade (log uma única vez)
//!   └── 4. identidade
//! ```
//!
//! O passo 3 é o **único** lugar onde o dicionário aprendido cresce (além
//! de [`Lemmatizer::add_verb`], a inserção manual). Entradas estáticas
//! sempre vencem entradas aprendidas para a mesma chave.
//!
//! ## Concorrência
//!
//! | Estrutura | Proteção |
//! |-----------|----------|
//! | dicionário estático | imutável (`OnceLock`) |
//! | dicionário aprendido | `RwLock<HashMap>` |
//! | memo | `Mutex<LruCache>` |
//! | gravação em disco | `Mutex` dentro de [`LearnedStore`] |
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`dictionary`] | Tabela de verbos e geração de conjugações |
//! | [`fallback`] | Interface [`LemmaFallback`] e suas implementações |

pub mod dictionary;
pub mod fallback;

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::persistence::{self, LearnedStore};
use dictionary::{in_verb_position, static_dictionary, StaticDictionary};
use fallback::{DictionaryOnly, LemmaFallback, MorphologyModel};

/// Capacidade padrão do memo de lemas.
pub const DEFAULT_MEMO_CAPACITY: usize = 2000;

/// Backend do fallback, escolhido uma vez na construção.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerMode {
    /// Só dicionários; palavras desconhecidas ficam como estão.
    Dictionary,
    /// Dicionários + modelo morfológico com aprendizado.
    #[default]
    Hybrid,
}

impl std::str::FromStr for LemmatizerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dictionary" | "dict" | "dictionary-only" => Ok(LemmatizerMode::Dictionary),
            "hybrid" => Ok(LemmatizerMode::Hybrid),
            other => Err(format!("modo de lematizador desconhecido: {other}")),
        }
    }
}

/// Parâmetros de construção do lematizador.
#[derive(Clone, Debug)]
pub struct LemmatizerSettings {
    pub mode: LemmatizerMode,
    pub learned_path: PathBuf,
    pub batch_size: usize,
    pub memo_capacity: usize,
    pub rules_path: Option<PathBuf>,
}

impl Default for LemmatizerSettings {
    fn default() -> Self {
        Self {
            mode: LemmatizerMode::default(),
            learned_path: PathBuf::from(persistence::DEFAULT_LEARNED_PATH),
            batch_size: persistence::DEFAULT_BATCH_SIZE,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            rules_path: None,
        }
    }
}

/// Estatísticas expostas em `/lemmatizer/stats` e `/metrics`.
/// Verbo de integração encontrado no texto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerbHit {
    /// Índice do token (o primeiro, em locuções).
    pub position: usize,
    pub lemma: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LemmatizerStats {
    pub backend: &'static str,
    pub static_forms: usize,
    pub unique_infinitives: usize,
    pub integration_verbs: usize,
    pub learned_entries: usize,
    pub pending_since_flush: usize,
    pub memo_entries: usize,
    pub memo_hits: u64,
    pub memo_misses: u64,
}

/// Lematizador híbrido compartilhado entre classificador e detector de scopes.
pub struct Lemmatizer {
    statics: &'static StaticDictionary,
    learned: RwLock<HashMap<String, String>>,
    store: LearnedStore,
    fallback: Box<dyn LemmaFallback>,
    memo: Mutex<LruCache<String, String>>,
    memo_hits: AtomicU64,
    memo_misses: AtomicU64,
    fallback_error_logged: AtomicBool,
}

impl Lemmatizer {
    /// Constrói o lematizador: escolhe o backend e carrega o dicionário aprendido.
    ///
    /// Nunca falha. Arquivo aprendido corrompido vira dicionário vazio e
    /// fallback indisponível vira [`DictionaryOnly`]; ambos são logados aqui.
    pub fn init(settings: &LemmatizerSettings) -> Self {
        let fallback = build_fallback(settings.mode, settings.rules_path.as_deref());
        let learned = match persistence::load_learned(&settings.learned_path) {
            Ok(map) => {
                if !map.is_empty() {
                    tracing::info!(learned = map.len(), "dicionário aprendido carregado do disco");
                }
                map
            }
            Err(e) => {
                tracing::warn!(error = %e, "dicionário aprendido ignorado, iniciando vazio");
                HashMap::new()
            }
        };
        Self::with_fallback(fallback, learned, settings)
    }

    /// Constrói com um fallback explícito (usado em testes).
    pub fn with_fallback(
        fallback: Box<dyn LemmaFallback>,
        learned: HashMap<String, String>,
        settings: &LemmatizerSettings,
    ) -> Self {
        let capacity = NonZeroUsize::new(settings.memo_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            statics: static_dictionary(),
            learned: RwLock::new(learned),
            store: LearnedStore::new(settings.learned_path.clone(), settings.batch_size),
            fallback,
            memo: Mutex::new(LruCache::new(capacity)),
            memo_hits: AtomicU64::new(0),
            memo_misses: AtomicU64::new(0),
            fallback_error_logged: AtomicBool::new(false),
        }
    }

    /// `true` quando há um modelo real como fallback.
    pub fn has_model(&self) -> bool {
        self.fallback.is_model()
    }

    pub fn backend(&self) -> &'static str {
        self.fallback.name()
    }

    /// Reduz uma palavra ao infinitivo, ou a devolve inalterada.
    pub fn lemmatize_word(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        if let Some(hit) = self.memo.lock().get(word) {
            self.memo_hits.fetch_add(1, Ordering::Relaxed);
            return hit.clone();
        }
        self.memo_misses.fetch_add(1, Ordering::Relaxed);

        let Some(lemma) = self.resolve(word) else {
            // Erro do fallback: identidade sem memoizar, para tentar de novo depois.
            return word.to_string();
        };
        self.memo.lock().put(word.to_string(), lemma.clone());
        lemma
    }

    /// `None` apenas quando o fallback falhou.
    fn resolve(&self, word: &str) -> Option<String> {
        if let Some(lemma) = self.statics.get(word) {
            return Some(lemma.to_string());
        }
        if let Some(lemma) = self.learned.read().get(word) {
            return Some(lemma.clone());
        }
        match self.fallback.analyze(word) {
            Ok(Some(lemma)) => {
                if lemma != word {
                    self.learn(word, &lemma);
                }
                Some(lemma)
            }
            Ok(None) => Some(word.to_string()),
            Err(e) => {
                if !self.fallback_error_logged.swap(true, Ordering::Relaxed) {
                    tracing::warn!(error = %e, backend = self.fallback.name(), "fallback de lematização falhou, usando identidade");
                }
                None
            }
        }
    }

    /// Insere no dicionário aprendido e dispara gravação em lote se necessário.
    ///
    /// Retorna `false` se a forma já era conhecida (estática ou aprendida).
    fn learn(&self, form: &str, lemma: &str) -> bool {
        if self.statics.contains(form) {
            return false;
        }
        let inserted = {
            let mut learned = self.learned.write();
            if learned.contains_key(form) {
                false
            } else {
                learned.insert(form.to_string(), lemma.to_string());
                true
            }
        };
        if !inserted {
            return false;
        }
        tracing::info!(form, lemma, "novo verbo aprendido");
        match self.store.record_insert(&self.learned) {
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "falha ao gravar dicionário aprendido"),
        }
        true
    }

    /// Inserção manual de um verbo no dicionário aprendido.
    pub fn add_verb(&self, form: &str, infinitive: &str) -> bool {
        let form = form.trim();
        let infinitive = infinitive.trim();
        if form.is_empty() || infinitive.is_empty() {
            return false;
        }
        let added = self.learn(form, infinitive);
        if added {
            self.memo.lock().pop(form);
        }
        added
    }

    /// Aplica [`lemmatize_word`](Self::lemmatize_word) palavra a palavra.
    ///
    /// A pontuação nas bordas de cada palavra é preservada; o resultado é
    /// unido por espaços simples.
    pub fn lemmatize_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| {
                let core = token.trim_matches(|c: char| !c.is_alphanumeric());
                if core.is_empty() {
                    return token.to_string();
                }
                let start = token.find(core).unwrap_or(0);
                let (prefix, rest) = token.split_at(start);
                let suffix = &rest[core.len()..];
                format!("{prefix}{}{suffix}", self.lemmatize_word(core))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Infinitivo de `word` se ele pertencer ao vocabulário de integração.
    pub fn integration_verb(&self, word: &str) -> Option<String> {
        let lemma = self.lemmatize_word(word);
        self.statics.is_integration_verb(&lemma).then_some(lemma)
    }

    /// Ocorrências de verbos de integração em uma sequência de tokens.
    ///
    /// Reconhece locuções de duas palavras do dicionário (`fazer upload`) e
    /// descarta homógrafos nominais fora de posição de verbo (`minha agenda`).
    pub fn action_verb_hits(&self, words: &[&str]) -> Vec<VerbHit> {
        let mut hits = Vec::new();
        let mut i = 0;
        while i < words.len() {
            if let Some(next) = words.get(i + 1) {
                let pair = format!("{} {next}", words[i]);
                let lemma = self.statics.get(&pair).filter(|l| self.statics.is_integration_verb(l));
                if let Some(lemma) = lemma {
                    hits.push(VerbHit { position: i, lemma: lemma.to_string() });
                    i += 2;
                    continue;
                }
            }
            if in_verb_position(words, i) {
                if let Some(lemma) = self.integration_verb(words[i]) {
                    hits.push(VerbHit { position: i, lemma });
                }
            }
            i += 1;
        }
        hits
    }

    /// Verbos de integração presentes no texto, já no infinitivo.
    pub fn extract_action_verbs(&self, text: &str) -> BTreeSet<String> {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        self.action_verb_hits(&words).into_iter().map(|h| h.lemma).collect()
    }

    /// Grava o lote pendente. Chamado no shutdown.
    pub fn flush(&self) -> Result<usize, crate::core::PersistenceError> {
        self.store.flush(&self.learned)
    }

    /// Esvazia o memo (dicionários ficam intactos).
    pub fn clear_memo(&self) {
        self.memo.lock().clear();
    }

    pub fn learned_len(&self) -> usize {
        self.learned.read().len()
    }

    pub fn learned_path(&self) -> &Path {
        self.store.path()
    }

    pub fn stats(&self) -> LemmatizerStats {
        LemmatizerStats {
            backend: self.fallback.name(),
            static_forms: self.statics.len(),
            unique_infinitives: self.statics.infinitive_count(),
            integration_verbs: self.statics.integration_verbs().count(),
            learned_entries: self.learned_len(),
            pending_since_flush: self.store.pending(),
            memo_entries: self.memo.lock().len(),
            memo_hits: self.memo_hits.load(Ordering::Relaxed),
            memo_misses: self.memo_misses.load(Ordering::Relaxed),
        }
    }
}

/// Seleciona o backend; falha de carga degrada para dicionário-apenas.
fn build_fallback(mode: LemmatizerMode, rules_path: Option<&Path>) -> Box<dyn LemmaFallback> {
    match mode {
        LemmatizerMode::Dictionary => Box::new(DictionaryOnly),
        LemmatizerMode::Hybrid => match MorphologyModel::load(rules_path) {
            Ok(model) => {
                tracing::info!(rules = model.rule_count(), "modelo morfológico carregado");
                Box::new(model)
            }
            Err(e) => {
                tracing::warn!(error = %e, "fallback indisponível, lematização apenas por dicionário");
                Box::new(DictionaryOnly)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FallbackError;

    fn settings(dir: &Path, batch: usize) -> LemmatizerSettings {
        LemmatizerSettings {
            mode: LemmatizerMode::Hybrid,
            learned_path: dir.join("learned.json"),
            batch_size: batch,
            memo_capacity: 100,
            rules_path: None,
        }
    }

    fn hybrid(dir: &Path, batch: usize) -> Lemmatizer {
        Lemmatizer::init(&settings(dir, batch))
    }

    /// Fallback que sempre falha: simula modelo quebrado em runtime.
    struct Broken;

    impl LemmaFallback for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn analyze(&self, word: &str) -> Result<Option<String>, FallbackError> {
            Err(FallbackError::Analysis { word: word.to_string(), reason: "sem modelo".into() })
        }
    }

    // ─── lookup order ──────────────────────────────────────────

    #[test]
    fn static_forms_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        assert_eq!(l.lemmatize_word("agende"), "agendar");
        assert_eq!(l.lemmatize_word("enviou"), "enviar");
        assert_eq!(l.lemmatize_word("reuniao"), "reuniao");
    }

    #[test]
    fn static_wins_over_learned() {
        let dir = tempfile::tempdir().unwrap();
        let learned = HashMap::from([("envie".to_string(), "xyz".to_string())]);
        let l = Lemmatizer::with_fallback(Box::new(DictionaryOnly), learned, &settings(dir.path(), 10));
        assert_eq!(l.lemmatize_word("envie"), "enviar");
    }

    #[test]
    fn fallback_learns_new_verbs() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        assert_eq!(l.lemmatize_word("programou"), "programar");
        assert_eq!(l.learned_len(), 1);
        // Segunda consulta vem do memo, sem reaprender.
        assert_eq!(l.lemmatize_word("programou"), "programar");
        assert_eq!(l.learned_len(), 1);
        assert_eq!(l.stats().memo_hits, 1);
    }

    #[test]
    fn dictionary_mode_is_identity_for_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path(), 10);
        s.mode = LemmatizerMode::Dictionary;
        let l = Lemmatizer::init(&s);
        assert_eq!(l.lemmatize_word("programou"), "programou");
        assert_eq!(l.learned_len(), 0);
        assert!(!l.has_model());
    }

    #[test]
    fn broken_fallback_degrades_to_identity() {
        let dir = tempfile::tempdir().unwrap();
        let l = Lemmatizer::with_fallback(Box::new(Broken), HashMap::new(), &settings(dir.path(), 10));
        assert_eq!(l.lemmatize_word("programou"), "programou");
        assert_eq!(l.lemmatize_word("programou"), "programou");
        assert_eq!(l.lemmatize_word("crie"), "criar");
        assert_eq!(l.learned_len(), 0);
    }

    #[test]
    fn unavailable_rules_file_degrades_to_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path(), 10);
        s.rules_path = Some(dir.path().join("nao-existe.toml"));
        let l = Lemmatizer::init(&s);
        assert_eq!(l.backend(), "dictionary");
        assert_eq!(l.lemmatize_word("programou"), "programou");
    }

    // ─── persistence ───────────────────────────────────────────

    #[test]
    fn learned_entries_flush_in_batches_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 2);
        l.lemmatize_word("programou");
        assert!(!l.learned_path().exists());
        l.lemmatize_word("estudaram");
        assert!(l.learned_path().exists());

        l.lemmatize_word("dividiram");
        assert_eq!(l.stats().pending_since_flush, 1);
        assert_eq!(l.flush().unwrap(), 3);

        let reloaded = Lemmatizer::init(&settings(dir.path(), 2));
        assert_eq!(reloaded.learned_len(), 3);
        assert_eq!(reloaded.lemmatize_word("dividiram"), "dividir");
    }

    #[test]
    fn corrupt_learned_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("learned.json"), "não é json").unwrap();
        let l = hybrid(dir.path(), 10);
        assert_eq!(l.learned_len(), 0);
        assert_eq!(l.lemmatize_word("agende"), "agendar");
    }

    #[test]
    fn add_verb_overrides_memoized_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path(), 10);
        s.mode = LemmatizerMode::Dictionary;
        let l = Lemmatizer::init(&s);
        assert_eq!(l.lemmatize_word("plotou"), "plotou");
        assert!(l.add_verb("plotou", "plotar"));
        assert_eq!(l.lemmatize_word("plotou"), "plotar");
        assert!(!l.add_verb("envie", "outro"));
    }

    // ─── text-level operations ─────────────────────────────────

    #[test]
    fn lemmatize_text_keeps_punctuation() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        assert_eq!(
            l.lemmatize_text("agende   uma reuniao, e envie o convite!"),
            "agendar uma reuniao, e enviar o convite!"
        );
    }

    #[test]
    fn extracts_only_integration_verbs() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        let verbs = l.extract_action_verbs("limpe o cache, depois crie e compartilhe a planilha");
        assert_eq!(
            verbs.into_iter().collect::<Vec<_>>(),
            vec!["compartilhar".to_string(), "criar".to_string()]
        );
        let multi = l.extract_action_verbs("pode fazer upload do arquivo?");
        assert!(multi.contains("fazer upload"));
    }

    #[test]
    fn noun_homographs_are_not_action_verbs() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        assert!(l.extract_action_verbs("minha agenda de amanha esta muito cheia").is_empty());
        assert!(l.extract_action_verbs("minha marca precisa de uma planilha nova").is_empty());
        assert!(l.extract_action_verbs("agenda uma reuniao amanha").contains("agendar"));
        assert!(l.extract_action_verbs("me marca um horario").contains("marcar"));
    }

    #[test]
    fn verb_hits_keep_positions() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 10);
        let hits = l.action_verb_hits(&["depois", "crie", "e", "fazer", "upload"]);
        assert_eq!(
            hits,
            vec![
                VerbHit { position: 1, lemma: "criar".into() },
                VerbHit { position: 3, lemma: "fazer upload".into() },
            ]
        );
    }

    /// lemma(lemma(w)) == lemma(w) para todas as formas estáticas
    #[test]
    fn lemmatize_word_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let l = hybrid(dir.path(), 1000);
        for (form, _) in static_dictionary().iter() {
            let once = l.lemmatize_word(form);
            assert_eq!(l.lemmatize_word(&once), once, "forma {form}");
        }
        for word in ["programou", "escrevendo", "dividiram"] {
            let once = l.lemmatize_word(word);
            assert_eq!(l.lemmatize_word(&once), once, "forma {word}");
        }
    }

    #[test]
    fn concurrent_learning_is_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let l = std::sync::Arc::new(hybrid(dir.path(), 3));
        let words = ["programou", "estudaram", "dividiram", "testando", "cozinhou", "pintaram"];
        std::thread::scope(|s| {
            for _ in 0..4 {
                let l = l.clone();
                s.spawn(move || {
                    for w in words {
                        l.lemmatize_word(w);
                    }
                });
            }
        });
        assert_eq!(l.learned_len(), words.len());
        l.flush().unwrap();
        assert_eq!(persistence::load_learned(l.learned_path()).unwrap().len(), words.len());
    }
}
