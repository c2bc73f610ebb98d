//! # Detector de Idioma — Flag Binária `pt` / `en`
//!
//! Heurística por indicadores, aplicada ao texto **original** (os acentos
//! são o indicador mais forte do português):
//!
//! | Indicador | Exemplos |
//! |-----------|----------|
//! | português | `ã õ ç á é í ó ú à ê ô`, `que`, `como`, `quando`, `onde`, `reuniao`, `calendario` |
//! | inglês | `what`, `how`, `when`, `where`, `meeting`, `calendar` |
//!
//! Só retorna `en` quando há indicador inglês **e nenhum** português. Na
//! dúvida, `pt`. A dica `ctx.language` do chamador tem precedência.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::Language;

fn portuguese_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[ãõçáéíóúàêô]|\b(que|como|quando|onde|reuniao|calendario)\b").unwrap()
    })
}

fn english_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(what|how|when|where|meeting|calendar)\b").unwrap())
}

/// Detecta o idioma do texto.
pub fn detect_language(text: &str) -> Language {
    if english_re().is_match(text) && !portuguese_re().is_match(text) {
        Language::En
    } else {
        Language::Pt
    }
}

/// Idioma efetivo: dica do chamador, se houver, senão detecção.
pub fn resolve_language(hint: Option<Language>, text: &str) -> Language {
    hint.unwrap_or_else(|| detect_language(text))
}
