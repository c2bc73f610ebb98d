//! # Persistência — Dicionário de Verbos Aprendidos em Disco
//!
//! Módulo responsável por serializar/desserializar o dicionário aprendido
//! (forma conjugada → infinitivo) como JSON em `data/learned_verbs.json`.
//!
//! ## Formato de Armazenamento
//!
//! Um único objeto JSON "pretty-printed", com **chaves ordenadas** (via
//! `BTreeMap`) para facilitar inspeção manual e diffs:
//!
//! ```json
//! {
//!   "dividiram": "dividir",
//!   "programou": "programar"
//! }
//! ```
//!
//! ## Quando o Arquivo é Gravado?
//!
//! Nunca por entrada. O [`LearnedStore`] conta inserções pendentes e regrava
//! o arquivo inteiro a cada `batch_size` novas entradas, e uma última vez no
//! shutdown. Toda gravação acontece sob um `Mutex`, então dois aprendizes
//! concorrentes nunca intercalam escritas parciais.
//!
//! ## Atomicidade
//!
//! A escrita usa o padrão write-rename: grava em `<arquivo>.tmp` e renomeia
//! por cima do destino. Um crash no meio deixa o arquivo anterior intacto.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::core::PersistenceError;

/// Caminho padrão do dicionário aprendido (relativo à raiz do projeto).
pub const DEFAULT_LEARNED_PATH: &str = "data/learned_verbs.json";

/// Tamanho padrão do lote de gravação.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Carrega o dicionário aprendido do disco.
///
/// Arquivo inexistente não é erro: retorna dicionário vazio.
///
/// # Erros
///
/// [`PersistenceError::CorruptLearnedState`] se o arquivo existir mas não
/// puder ser lido ou não for um objeto JSON `string → string`.
pub fn load_learned(path: &Path) -> Result<HashMap<String, String>, PersistenceError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "nenhum dicionário aprendido encontrado, iniciando vazio");
        return Ok(HashMap::new());
    }
    let corrupt = |reason: String| PersistenceError::CorruptLearnedState {
        path: path.to_path_buf(),
        reason,
    };
    let json = std::fs::read_to_string(path).map_err(|e| corrupt(e.to_string()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&json).map_err(|e| corrupt(e.to_string()))?;
    Ok(map.into_iter().collect())
}

/// Grava o dicionário inteiro, com chaves ordenadas, via write-rename.
pub fn save_learned(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Contador de lote + lock de escrita do dicionário aprendido.
///
/// O `Mutex` protege o contador de pendentes **e** serializa as gravações:
/// quem atinge o limite do lote grava ainda segurando o lock.
pub struct LearnedStore {
    path: PathBuf,
    batch_size: usize,
    pending: Mutex<usize>,
}

impl LearnedStore {
    pub fn new(path: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            path: path.into(),
            batch_size: batch_size.max(1),
            pending: Mutex::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserções ainda não gravadas em disco.
    pub fn pending(&self) -> usize {
        *self.pending.lock()
    }

    /// Registra uma nova entrada aprendida e grava se o lote fechou.
    ///
    /// Retorna `Ok(Some(n))` quando gravou `n` entradas, `Ok(None)` quando
    /// apenas acumulou. Em falha de gravação o contador é preservado, e a
    /// próxima inserção tenta de novo.
    pub fn record_insert(
        &self,
        learned: &RwLock<HashMap<String, String>>,
    ) -> Result<Option<usize>, PersistenceError> {
        let mut pending = self.pending.lock();
        *pending += 1;
        if *pending < self.batch_size {
            return Ok(None);
        }
        let written = self.write_snapshot(learned)?;
        *pending = 0;
        Ok(Some(written))
    }

    /// Grava o lote pendente, se houver. Usado no shutdown.
    pub fn flush(&self, learned: &RwLock<HashMap<String, String>>) -> Result<usize, PersistenceError> {
        let mut pending = self.pending.lock();
        if *pending == 0 {
            return Ok(0);
        }
        let written = self.write_snapshot(learned)?;
        *pending = 0;
        Ok(written)
    }

    fn write_snapshot(&self, learned: &RwLock<HashMap<String, String>>) -> Result<usize, PersistenceError> {
        // Snapshot ordenado; o read lock é liberado antes do I/O.
        let snapshot: BTreeMap<String, String> = learned
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        save_learned(&self.path, &snapshot)?;
        tracing::info!(entries = snapshot.len(), path = %self.path.display(), "dicionário aprendido gravado");
        Ok(snapshot.len())
    }
}
