//! # Detector de Scopes — Intenção de Integração → Autorizações Externas
//!
//! Chamado apenas quando a categoria é `system`. Devolve os tokens de
//! autorização que a ação pedida exige, sem duplicatas e em ordem.
//!
//! ## Tokens
//!
//! | Conceito | Token |
//! |----------|-------|
//! | e-mail | [`MAIL`] |
//! | agenda | [`CALENDAR`] |
//! | planilhas | [`SHEETS`] |
//! | armazenamento | [`DRIVE`] |
//! | documentos | [`DOCUMENTS`] |
//! | boleto (não-OAuth) | [`BOLETO`] |
//!
//! ## Algoritmo
//!
//! ```text
//! texto normalizado
//!   ├── 1. tabela de padrões (substring)  → 1º match retorna direto
//!   ├── 2. ação + palavra-chave
//!   │     ├── e-mail + agenda + conector  → [MAIL, CALENDAR]
//!   │     ├── e-mail                      → [MAIL]  (ação dominante)
//!   │     └── agenda                      → [CALENDAR]
//!   └── 3. só palavras-chave
//!         ├── agenda                      → CALENDAR
//!         ├── planilha                    → + [SHEETS, DRIVE], retorna
//!         ├── documento/arquivo           → + [DRIVE, DOCUMENTS], retorna
//!         └── e-mail / drive / boleto     → um token cada
//! ```
//!
//! **Colapso para a ação dominante**: "envie o email e agende a reunião"
//! sem conector explícito ("e depois", "também") recebe só [`MAIL`]. A
//! agenda fica sem autorização e o pedido de calendário falha depois; o
//! comportamento é mantido porque consumidores dependem dele.
//!
//! Sem nenhum conceito de integração o resultado é vazio, mesmo com
//! categoria `system` (ex.: "limpe o cache da sessão").

use std::collections::BTreeSet;

use super::features::tokenize;
use super::lemmatizer::Lemmatizer;

pub const MAIL: &str = "https://mail.google.com/";
pub const CALENDAR: &str = "https://www.googleapis.com/auth/calendar";
pub const SHEETS: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DRIVE: &str = "https://www.googleapis.com/auth/drive";
pub const DOCUMENTS: &str = "https://www.googleapis.com/auth/documents";
pub const BOLETO: &str = "boleto";

/// Substring literal → scopes. Avaliado antes de qualquer heurística.
#[derive(Clone, Debug)]
pub struct ScopePattern {
    pub pattern: String,
    pub scopes: Vec<&'static str>,
}

impl ScopePattern {
    pub fn new(pattern: &str, scopes: &[&'static str]) -> Self {
        Self { pattern: pattern.to_string(), scopes: scopes.to_vec() }
    }
}

/// Tabela padrão. A família de planilhas vem primeiro para que o
/// acoplamento `[SHEETS, DRIVE]` valha mesmo no curto-circuito.
pub fn default_patterns() -> Vec<ScopePattern> {
    vec![
        ScopePattern::new("planilha", &[SHEETS, DRIVE]),
        ScopePattern::new("spreadsheet", &[SHEETS, DRIVE]),
        ScopePattern::new("sheet", &[SHEETS, DRIVE]),
        ScopePattern::new("excel", &[SHEETS, DRIVE]),
        ScopePattern::new("tabela", &[SHEETS, DRIVE]),
        ScopePattern::new("google docs", &[DRIVE, DOCUMENTS]),
        ScopePattern::new("google drive", &[DRIVE]),
        ScopePattern::new("google agenda", &[CALENDAR]),
        ScopePattern::new("google calendar", &[CALENDAR]),
        ScopePattern::new("segunda via", &[BOLETO]),
        ScopePattern::new("link de pagamento", &[BOLETO]),
    ]
}

const EMAIL_ACTIONS: &[&str] = &[
    "enviar", "mandar", "escrever", "responder", "encaminhar", "disparar", "send", "reply",
    "forward",
];
const EMAIL_WORDS: &[&str] = &["gmail", "email", "emails", "e mail", "mail"];

const CALENDAR_ACTIONS: &[&str] = &["agendar", "marcar", "reagendar", "reservar", "schedule", "book"];
const CALENDAR_EVENT_PHRASES: &[&str] = &["criar evento", "adicionar evento"];
const CALENDAR_WORDS: &[&str] = &[
    "calendar", "calendario", "agenda", "evento", "eventos", "reuniao", "reunioes", "meeting",
    "aula", "sala", "hoje", "amanha", "segunda", "terca", "quarta", "quinta", "sexta", "sabado",
    "domingo", "call",
];
const EXPLICIT_CONNECTORS: &[&str] = &["e depois", "tambem", "alem disso", "and then", "also", "em seguida"];

const CALENDAR_KEYWORDS: &[&str] = &["calendar", "calendario", "agenda", "evento", "eventos"];
const SPREADSHEET_KEYWORDS: &[&str] = &["sheet", "sheets", "planilha", "planilhas", "tabela", "tabelas", "spreadsheet"];
const DOCUMENT_KEYWORDS: &[&str] = &[
    "documento", "documentos", "document", "doc", "docs", "arquivo", "arquivos", "file", "files",
    "pdf",
];
const STORAGE_KEYWORDS: &[&str] = &["drive", "armazenamento", "storage", "backup", "upload", "download", "pasta"];
const BOLETO_KEYWORDS: &[&str] = &["boleto", "boletos", "fatura", "faturas", "cobranca", "pagamento", "pix"];

/// Texto tokenizado com lemas, para as etapas 2 e 3.
struct ScopeText {
    words: Vec<String>,
    lemmas: Vec<String>,
    padded: String,
    padded_lemmas: String,
}

impl ScopeText {
    fn new(normalized: &str, lemmatizer: &Lemmatizer) -> Self {
        let words: Vec<String> = tokenize(normalized).into_iter().map(str::to_string).collect();
        let lemmas: Vec<String> = words.iter().map(|w| lemmatizer.lemmatize_word(w)).collect();
        Self {
            padded: format!(" {} ", words.join(" ")),
            padded_lemmas: format!(" {} ", lemmas.join(" ")),
            words,
            lemmas,
        }
    }

    fn has_any(&self, list: &[&str]) -> bool {
        list.iter().any(|p| self.padded.contains(&format!(" {p} ")))
    }

    fn has_lemma(&self, list: &[&str]) -> bool {
        self.lemmas.iter().any(|l| list.contains(&l.as_str()))
            || self.words.iter().any(|w| list.contains(&w.as_str()))
    }

    fn has_lemma_phrase(&self, list: &[&str]) -> bool {
        list.iter().any(|p| self.padded_lemmas.contains(&format!(" {p} ")))
    }

    /// Horário no formato `14h`, `14hs`, `14hr`, `9h30`.
    fn has_hour(&self) -> bool {
        self.words.iter().any(|w| {
            let digits = w.trim_start_matches(|c: char| c.is_ascii_digit());
            digits.len() < w.len() && {
                let rest = digits.trim_end_matches(|c: char| c.is_ascii_digit());
                matches!(rest, "h" | "hs" | "hr" | "hrs")
            }
        })
    }
}

/// Detector de scopes com tabela de padrões substituível.
pub struct ScopeDetector {
    patterns: Vec<ScopePattern>,
}

impl Default for ScopeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeDetector {
    pub fn new() -> Self {
        Self::with_patterns(default_patterns())
    }

    pub fn with_patterns(patterns: Vec<ScopePattern>) -> Self {
        Self { patterns }
    }

    pub fn detect_scopes(&self, normalized: &str, lemmatizer: &Lemmatizer) -> Vec<String> {
        // ─── 1. Tabela de padrões ────────────────────────────
        if let Some(p) = self.patterns.iter().find(|p| normalized.contains(p.pattern.as_str())) {
            return dedup(p.scopes.iter().copied());
        }

        let text = ScopeText::new(normalized, lemmatizer);

        // ─── 2. Ação + palavra-chave ─────────────────────────
        let email_action = text.has_lemma(EMAIL_ACTIONS);
        let email_intent = email_action && text.has_any(EMAIL_WORDS);
        let calendar_action = text.has_lemma(CALENDAR_ACTIONS) || text.has_lemma_phrase(CALENDAR_EVENT_PHRASES);
        let calendar_word = text.has_any(CALENDAR_WORDS) || text.has_hour() || normalized.contains(':');
        let connector = text.has_any(EXPLICIT_CONNECTORS);

        if email_intent && (calendar_action || calendar_word) && connector {
            return dedup([MAIL, CALENDAR]);
        }
        if email_intent {
            return dedup([MAIL]);
        }
        if calendar_action && (calendar_word || text.has_any(&["compromisso", "compromissos"])) {
            return dedup([CALENDAR]);
        }

        // ─── 3. Só palavras-chave ────────────────────────────
        let mut scopes = Vec::new();
        if text.has_any(CALENDAR_KEYWORDS) || (text.has_any(&["compromisso", "compromissos"]) && !email_action) {
            scopes.push(CALENDAR);
        }
        if text.has_any(SPREADSHEET_KEYWORDS) {
            scopes.extend([SHEETS, DRIVE]);
            return dedup(scopes);
        }
        if text.has_any(DOCUMENT_KEYWORDS) {
            scopes.extend([DRIVE, DOCUMENTS]);
            return dedup(scopes);
        }
        if text.has_any(EMAIL_WORDS) {
            scopes.push(MAIL);
        }
        if text.has_any(STORAGE_KEYWORDS) {
            scopes.push(DRIVE);
        }
        if text.has_any(BOLETO_KEYWORDS) {
            scopes.push(BOLETO);
        }
        dedup(scopes)
    }
}

/// Remove duplicatas preservando a ordem de chegada.
fn dedup<'a>(scopes: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    scopes
        .into_iter()
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}
