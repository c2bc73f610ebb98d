//! # Métricas do Serviço
//!
//! Contadores atômicos atualizados pelos handlers HTTP, mais um snapshot
//! sob demanda com dados do cache, do lematizador e do processo.
//!
//! | Métrica | Fonte |
//! |---------|-------|
//! | requisições, hits, misses, erros | [`ServiceMetrics`] (atomics) |
//! | latência média (ms) | soma em µs / requisições |
//! | tamanho do cache | [`ResultCache::len`](crate::cache::ResultCache::len) |
//! | lematizador | [`LemmatizerStats`] |
//! | memória do processo (MB) | `sysinfo` |
//!
//! ## Estado Persistente (System singleton)
//!
//! Uma única instância [`System`] via [`OnceLock`] + [`Mutex`], reutilizada
//! em todas as coletas; só o processo atual é atualizado a cada snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::analyzer::Analyzer;
use crate::nlu::lemmatizer::LemmatizerStats;

static SYS: OnceLock<Mutex<System>> = OnceLock::new();

fn system() -> &'static Mutex<System> {
    SYS.get_or_init(|| Mutex::new(System::new()))
}

/// Memória residente do processo atual, em MB. `0.0` se indisponível.
pub fn process_memory_mb() -> f64 {
    let pid = Pid::from_u32(std::process::id());
    let mut sys = system().lock();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), false);
    sys.process(pid)
        .map(|p| p.memory() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

#[derive(Default)]
pub struct ServiceMetrics {
    requests: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    latency_us: AtomicU64,
    errors: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra uma classificação concluída.
    pub fn record(&self, elapsed: Duration, cache_hit: bool) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.latency_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        if cache_hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Entrada vazia ou falha de handler.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self, analyzer: &Analyzer) -> MetricsSnapshot {
        let requests = self.requests();
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let latency_us = self.latency_us.load(Ordering::Relaxed);
        let lookups = hits + misses;

        MetricsSnapshot {
            requests,
            cache_hits: hits,
            cache_misses: misses,
            errors: self.errors(),
            avg_latency_ms: if requests == 0 {
                0.0
            } else {
                latency_us as f64 / requests as f64 / 1000.0
            },
            hit_rate: if lookups == 0 { 0.0 } else { hits as f64 / lookups as f64 },
            cache_size: analyzer.cache().len(),
            lemmatizer: analyzer.lemmatizer().stats(),
            memory_mb: process_memory_mb(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub errors: u64,
    pub avg_latency_ms: f64,
    pub hit_rate: f64,
    pub cache_size: usize,
    pub lemmatizer: LemmatizerStats,
    pub memory_mb: f64,
}
