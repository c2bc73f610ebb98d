//! # Detector de Perguntas — Interrogação com ou sem `?`
//!
//! Reconhece perguntas mesmo quando o usuário não digita o ponto de
//! interrogação: "me diga como funciona o git", "quero saber sobre rust".
//!
//! ## Ordem de Decisão
//!
//! ```text
//! texto normalizado
//!   ├── contexto pessoal ("quero aprender", ...)      → false
//!   ├── explicação detalhada ("passo a passo", ...)  → false
//!   ├── contém "?"                                   → true
//!   ├── 1ª palavra ou bigrama interrogativo          → true
//!   ├── estrutura interrogativa ("me diga", ...)     → true
//!   └── evidência por lema (só com modelo)           → saber/entender/...
//! ```
//!
//! As duas exclusões existem porque pedidos de desenvolvimento pessoal e
//! explicações longas pertencem ao bucket `user`, não a `messages`.

/// Frases de desenvolvimento pessoal.
const PERSONAL_CONTEXTS: &[&str] = &[
    "gostaria de aprender", "gostaria de melhorar", "gostaria de desenvolver", "quero aprender",
    "quero melhorar", "quero desenvolver", "preciso aprender", "preciso melhorar",
    "preciso desenvolver", "desejo aprender", "desejo melhorar", "desejo desenvolver",
    "estou tentando aprender", "estou buscando aprender",
];

/// Marcadores de explicação detalhada.
const DETAILED_EXPLANATION: &[&str] = &[
    "detalhadamente", "passo a passo", "em detalhes", "processo de aprendizado",
    "processo de desenvolvimento", "me ajude a entender o processo", "me explique o processo",
];

const INTERROGATIVE_OPENERS: &[&str] = &[
    "como", "quando", "onde", "porque", "qual", "quais", "quem", "quanto", "quantos", "quantas",
    "que", "what", "how", "why", "when", "where", "which", "who",
];

const INTERROGATIVE_BIGRAMS: &[&str] = &["por que", "o que", "pra que", "para que"];

const INTERROGATIVE_STRUCTURES: &[&str] = &[
    "me diga", "me explique", "me explica", "me fale", "me conte", "quero saber",
    "quero entender", "gostaria de saber", "preciso saber", "preciso entender",
    "voce pode explicar", "voce consegue explicar", "pode me dizer", "consegue me dizer",
    "tell me", "explain",
];

/// Verbos de pedido de informação factual, reconhecidos por lema.
const INFORMATION_LEMMAS: &[&str] = &["saber", "entender", "conhecer", "descobrir"];

fn is_excluded(text: &str) -> bool {
    PERSONAL_CONTEXTS.iter().any(|p| text.contains(p))
        || DETAILED_EXPLANATION.iter().any(|p| text.contains(p))
}

/// Pergunta detectada apenas por regras lexicais.
pub fn is_interrogative(text: &str) -> bool {
    if is_excluded(text) {
        return false;
    }
    if text.contains('?') {
        return true;
    }
    let mut words = text.split_whitespace();
    let first = words.next().unwrap_or_default();
    if INTERROGATIVE_OPENERS.contains(&first) {
        return true;
    }
    if let Some(second) = words.next() {
        let bigram = format!("{first} {second}");
        if INTERROGATIVE_BIGRAMS.contains(&bigram.as_str()) {
            return true;
        }
    }
    INTERROGATIVE_STRUCTURES.iter().any(|s| text.contains(s))
}

/// Como [`is_interrogative`], aceitando também evidência por lema.
///
/// Usado quando há um modelo morfológico: "quem descobriu a penicilina"
/// já casa pelas regras, mas "eles descobriram a causa do erro" só casa
/// porque `descobriram` → `descobrir`.
pub fn is_interrogative_with_lemmas(text: &str, lemmas: &[String]) -> bool {
    if is_interrogative(text) {
        return true;
    }
    !is_excluded(text) && lemmas.iter().any(|l| INFORMATION_LEMMAS.contains(&l.as_str()))
}
