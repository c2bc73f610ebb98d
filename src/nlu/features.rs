//! # Features — Visão Tokenizada de Uma Mensagem
//!
//! As regras do classificador nunca re-tokenizam o texto: [`Features`] é
//! calculado uma vez por mensagem e compartilhado por todas elas.
//!
//! ```text
//! "Agende uma Reunião com a Ana"
//!   original   = "Agende uma Reunião com a Ana"
//!   normalized = "agende uma reuniao com a ana"
//!   words      = [agende, uma, reuniao, com, a, ana]
//!   lemmas     = [agendar, uma, reuniao, com, a, ana]
//!   verb_hits  = [(0, agendar)]
//!   verbs      = {agendar}
//!   proper     = [T, F, T, F, F, T]
//! ```
//!
//! ## Tokenização
//!
//! Separa em qualquer caractere que não seja alfanumérico ou `@`, então
//! `"e-mail"` vira `[e, mail]` (casado pela frase `"e mail"`) e
//! `"ana@x.com"` vira `[ana@x, com]`.

use std::collections::BTreeSet;

use crate::nlu::lemmatizer::{Lemmatizer, VerbHit};
use crate::nlu::lexicon::STOPWORDS;

/// Sufixos de gerúndio/particípio, indício de forma verbal.
const VERB_SUFFIXES: &[&str] = &["ando", "endo", "indo", "ado", "ido"];

/// Mensagem pré-processada para as regras de classificação.
pub struct Features {
    /// Texto original sem espaços nas bordas.
    pub original: String,
    /// Texto normalizado sem espaços nas bordas.
    pub normalized: String,
    pub words: Vec<String>,
    /// Lema de cada palavra, alinhado com `words`.
    pub lemmas: Vec<String>,
    /// Cada ocorrência de verbo de integração, com a posição em `words`.
    pub verb_hits: Vec<VerbHit>,
    /// Verbos de integração presentes (infinitivos).
    pub verbs: BTreeSet<String>,
    /// Caracteres (não bytes) do texto original.
    pub char_count: usize,
    /// `true` quando há modelo morfológico por trás dos lemas.
    pub has_model: bool,
    padded: String,
    proper: Vec<bool>,
}

/// Divide em tokens alfanuméricos (mantendo `@`).
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '@'))
        .filter(|w| !w.is_empty())
        .collect()
}

impl Features {
    pub fn extract(original: &str, normalized: &str, lemmatizer: &Lemmatizer) -> Self {
        let original = original.trim().to_string();
        let normalized = normalized.trim().to_string();
        let words: Vec<String> = tokenize(&normalized).into_iter().map(str::to_string).collect();
        let lemmas = words.iter().map(|w| lemmatizer.lemmatize_word(w)).collect();
        let tokens: Vec<&str> = words.iter().map(String::as_str).collect();
        let verb_hits = lemmatizer.action_verb_hits(&tokens);
        let verbs = verb_hits.iter().map(|h| h.lemma.clone()).collect();

        let raw_tokens = tokenize(&original);
        let proper = if raw_tokens.len() == words.len() {
            raw_tokens
                .iter()
                .map(|t| t.chars().next().is_some_and(char::is_uppercase))
                .collect()
        } else {
            vec![false; words.len()]
        };

        let padded = format!(" {} ", words.join(" "));
        Self {
            char_count: original.chars().count(),
            original,
            normalized,
            words,
            lemmas,
            verb_hits,
            verbs,
            has_model: lemmatizer.has_model(),
            padded,
            proper,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn has_any_word(&self, list: &[&str]) -> bool {
        self.words.iter().any(|w| list.contains(&w.as_str()))
    }

    /// Casa uma sequência de tokens completa (`"se possivel"`, `"oi"`).
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.padded.contains(&format!(" {phrase} "))
    }

    /// Primeira frase da lista presente no texto.
    pub fn find_phrase<'a>(&self, list: &[&'a str]) -> Option<&'a str> {
        list.iter().copied().find(|p| self.has_phrase(p))
    }

    pub fn has_any_phrase(&self, list: &[&str]) -> bool {
        self.find_phrase(list).is_some()
    }

    /// Palavra-chave com plural simples: `planilha` ~ `planilhas`, `reuniao` ~ `reunioes`.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        if keyword.contains(' ') {
            return self.has_phrase(keyword);
        }
        self.words.iter().any(|w| keyword_matches(keyword, w))
    }

    pub fn find_keyword<'a>(&self, list: &[&'a str]) -> Option<&'a str> {
        list.iter().copied().find(|k| self.has_keyword(k))
    }

    pub fn has_any_keyword(&self, list: &[&str]) -> bool {
        self.find_keyword(list).is_some()
    }

    /// Palavra `i` casa alguma palavra-chave da lista.
    pub fn has_keyword_at(&self, i: usize, list: &[&str]) -> bool {
        self.words
            .get(i)
            .is_some_and(|w| list.iter().any(|k| keyword_matches(k, w)))
    }

    /// Algum lema (de qualquer palavra) pertence à lista.
    pub fn has_lemma(&self, list: &[&str]) -> bool {
        self.lemmas.iter().any(|l| list.contains(&l.as_str()))
    }

    pub fn ends_with_question(&self) -> bool {
        self.original.ends_with('?')
    }

    /// Quantidade de terminadores de frase (`.`, `?`, `!`, `;`).
    pub fn sentence_terminators(&self) -> usize {
        self.original.chars().filter(|c| matches!(c, '.' | '?' | '!' | ';')).count()
    }

    /// Token `i` estava capitalizado no texto original.
    pub fn is_proper_noun(&self, i: usize) -> bool {
        self.proper.get(i).copied().unwrap_or(false)
    }

    /// Palavras sem stopwords/artigos (usado para "substantivo solto").
    pub fn content_words(&self, ignore: &[&str]) -> Vec<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| !ignore.contains(w))
            .collect()
    }
}

fn keyword_matches(keyword: &str, word: &str) -> bool {
    if word == keyword {
        return true;
    }
    if let Some(stem) = word.strip_suffix('s') {
        if stem == keyword {
            return true;
        }
    }
    match keyword.strip_suffix("ao") {
        Some(stem) => word.strip_suffix("oes") == Some(stem),
        None => false,
    }
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Heurística de forma verbal por sufixo (gerúndio/particípio).
pub fn looks_like_verb(word: &str) -> bool {
    VERB_SUFFIXES.iter().any(|s| word.ends_with(s) && word.len() > s.len() + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlu::lemmatizer::{LemmatizerMode, LemmatizerSettings};
    use crate::nlu::normalizer::fold;

    fn features(text: &str) -> Features {
        let dir = tempfile::tempdir().unwrap();
        let settings = LemmatizerSettings {
            mode: LemmatizerMode::Dictionary,
            learned_path: dir.path().join("learned.json"),
            ..Default::default()
        };
        let lemmatizer = Lemmatizer::init(&settings);
        Features::extract(text, &fold(text), &lemmatizer)
    }

    #[test]
    fn tokenizes_and_lemmatizes() {
        let f = features("  Agende uma Reunião com a Ana!  ");
        assert_eq!(f.original, "Agende uma Reunião com a Ana!");
        assert_eq!(f.words, ["agende", "uma", "reuniao", "com", "a", "ana"]);
        assert_eq!(f.lemmas[0], "agendar");
        assert!(f.verbs.contains("agendar"));
        assert_eq!(f.verb_hits[0].position, 0);
        assert!(f.is_proper_noun(5));
        assert!(!f.is_proper_noun(4));
        assert_eq!(f.char_count, 29);
    }

    #[test]
    fn phrase_matching_respects_token_boundaries() {
        let f = features("se possível envie o e-mail");
        assert!(f.has_phrase("se possivel"));
        assert!(f.has_phrase("e mail"));
        assert!(!f.has_phrase("possi"));
        assert!(f.has_word("envie"));
    }

    #[test]
    fn keywords_match_simple_plurals() {
        let f = features("atualize as planilhas e as reuniões");
        assert!(f.has_keyword("planilha"));
        assert!(f.has_keyword("reuniao"));
        assert!(!f.has_keyword("planilh"));
    }

    #[test]
    fn counts_sentence_terminators() {
        let f = features("Oi. Tudo bem? Preciso de algo!");
        assert_eq!(f.sentence_terminators(), 3);
        assert!(!f.ends_with_question());
    }

    #[test]
    fn verb_suffix_heuristic() {
        assert!(looks_like_verb("falando"));
        assert!(looks_like_verb("terminado"));
        assert!(!looks_like_verb("lado"));
        assert!(!looks_like_verb("reuniao"));
    }
}
