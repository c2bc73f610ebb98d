//! # Fallback de Lematização — Interface de Capacidade
//!
//! Quando uma palavra não está no dicionário estático nem no aprendido, o
//! [`Lemmatizer`](super::Lemmatizer) consulta um [`LemmaFallback`]. Existem
//! duas implementações, escolhidas **uma vez** na construção via
//! configuração (nunca por tentativa-e-erro em tempo de execução):
//!
//! | Modo | Implementação | Comportamento |
//! |------|---------------|---------------|
//! | `dictionary` | [`DictionaryOnly`] | nunca reconhece nada → identidade |
//! | `hybrid` | [`MorphologyModel`] | analisa sufixos verbais do português |
//!
//! ## Modelo Morfológico
//!
//! O modelo reconhece formas verbais por terminação e reconstrói o
//! infinitivo:
//!
//! ```text
//! "programou"  ── sufixo "ou"   ──► "program" + "ar" ──► "programar"
//! "escrevendo" ── sufixo "endo" ──► "escrev"  + "er" ──► "escrever"
//! "dividiram"  ── sufixo "iram" ──► "divid"   + "ir" ──► "dividir"
//! ```
//!
//! Regras extras e exceções podem ser carregadas de um arquivo TOML. Se o
//! arquivo configurado não puder ser lido ou for inválido, o carregamento
//! falha com [`FallbackError::Unavailable`] e o chamador degrada para
//! [`DictionaryOnly`].

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::core::FallbackError;

/// Capacidade de reduzir palavras desconhecidas ao infinitivo.
pub trait LemmaFallback: Send + Sync {
    /// Nome curto para logs e estatísticas.
    fn name(&self) -> &'static str;

    /// Retorna `Some(infinitivo)` se a palavra for reconhecida como verbo.
    fn analyze(&self, word: &str) -> Result<Option<String>, FallbackError>;

    /// `true` se há um modelo real por trás (habilita evidência por lema nas perguntas).
    fn is_model(&self) -> bool {
        true
    }
}

/// Modo dicionário-apenas: nenhuma palavra nova é reconhecida.
pub struct DictionaryOnly;

impl LemmaFallback for DictionaryOnly {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn analyze(&self, _word: &str) -> Result<Option<String>, FallbackError> {
        Ok(None)
    }

    fn is_model(&self) -> bool {
        false
    }
}

/// Regra `sufixo → terminação do infinitivo`.
#[derive(Clone, Debug, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
}

/// Formato do arquivo de regras extras.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulesFile {
    rules: Vec<SuffixRule>,
    exceptions: Vec<String>,
}

/// Regras embutidas, da terminação mais longa para a mais curta.
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("aram", "ar"),
    ("eram", "er"),
    ("iram", "ir"),
    ("arei", "ar"),
    ("erei", "er"),
    ("irei", "ir"),
    ("aria", "ar"),
    ("eria", "er"),
    ("iria", "ir"),
    ("ando", "ar"),
    ("endo", "er"),
    ("indo", "ir"),
    ("asse", "ar"),
    ("esse", "er"),
    ("isse", "ir"),
    ("ado", "ar"),
    ("ada", "ar"),
    ("ou", "ar"),
    ("eu", "er"),
    ("iu", "ir"),
    ("ei", "ar"),
];

/// Palavras comuns que terminam como verbo mas não são.
const BUILTIN_EXCEPTIONS: &[&str] = &[
    "quando", "comando", "segundo", "mundo", "fundo", "lindo", "bando", "brando", "estado",
    "mercado", "resultado", "cuidado", "obrigado", "obrigada", "passado", "passada", "chegada",
    "entrada", "jornada", "camada", "tomada", "estrada", "namorado", "namorada", "advogado",
    "feriado", "sabado", "soldado", "recado", "pesado", "museu", "europeu", "chapeu", "judeu",
    "interesse", "disse", "classe", "tendo", "sendo", "vindo", "prezado", "prezada", "privado",
    "privada", "salada",
];

/// Comprimento mínimo do radical depois de remover o sufixo.
const MIN_STEM: usize = 3;

/// Analisador morfológico de formas verbais do português.
pub struct MorphologyModel {
    rules: Vec<SuffixRule>,
    exceptions: HashSet<String>,
}

impl MorphologyModel {
    /// Modelo apenas com as regras embutidas.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(s, r)| SuffixRule { suffix: s.to_string(), replacement: r.to_string() })
            .collect();
        let exceptions = BUILTIN_EXCEPTIONS.iter().map(|s| s.to_string()).collect();
        Self { rules, exceptions }
    }

    /// Carrega o modelo, acrescentando regras de `rules_path` se informado.
    ///
    /// # Erros
    ///
    /// [`FallbackError::Unavailable`] se o arquivo não puder ser lido, não for
    /// TOML válido, ou contiver regra cuja substituição não seja terminação
    /// de infinitivo (`ar`, `er`, `ir`, `or`).
    pub fn load(rules_path: Option<&Path>) -> Result<Self, FallbackError> {
        let mut model = Self::builtin();
        let Some(path) = rules_path else {
            return Ok(model);
        };

        let unavailable = |reason: String| FallbackError::Unavailable {
            path: path.to_path_buf(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let file: RulesFile = toml::from_str(&contents).map_err(|e| unavailable(e.to_string()))?;

        for rule in &file.rules {
            if rule.suffix.is_empty() || !is_infinitive_ending(&rule.replacement) {
                return Err(unavailable(format!(
                    "regra inválida: '{}' → '{}'",
                    rule.suffix, rule.replacement
                )));
            }
        }

        model.rules.extend(file.rules);
        model.rules.sort_by(|a, b| b.suffix.len().cmp(&a.suffix.len()));
        model.exceptions.extend(file.exceptions);
        Ok(model)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

fn is_infinitive_ending(s: &str) -> bool {
    matches!(s, "ar" | "er" | "ir" | "or")
}

impl LemmaFallback for MorphologyModel {
    fn name(&self) -> &'static str {
        "morphology"
    }

    fn analyze(&self, word: &str) -> Result<Option<String>, FallbackError> {
        if word.len() < 4 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return Ok(None);
        }
        if self.exceptions.contains(word) {
            return Ok(None);
        }
        // Infinitivos já são a forma canônica.
        if word.len() >= 5 {
            let ending = &word[word.len() - 2..];
            if is_infinitive_ending(ending) {
                return Ok(Some(word.to_string()));
            }
        }
        for rule in &self.rules {
            if let Some(stem) = word.strip_suffix(rule.suffix.as_str()) {
                if stem.len() >= MIN_STEM {
                    return Ok(Some(format!("{stem}{}", rule.replacement)));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn dictionary_only_never_recognizes() {
        let f = DictionaryOnly;
        assert_eq!(f.analyze("programou").unwrap(), None);
        assert!(!f.is_model());
    }

    #[test]
    fn morphology_reduces_common_forms() {
        let m = MorphologyModel::builtin();
        assert_eq!(m.analyze("programou").unwrap().as_deref(), Some("programar"));
        assert_eq!(m.analyze("escrevendo").unwrap().as_deref(), Some("escrever"));
        assert_eq!(m.analyze("dividiram").unwrap().as_deref(), Some("dividir"));
        assert_eq!(m.analyze("testado").unwrap().as_deref(), Some("testar"));
        assert_eq!(m.analyze("comprei").unwrap().as_deref(), Some("comprar"));
    }

    #[test]
    fn morphology_keeps_infinitives() {
        let m = MorphologyModel::builtin();
        assert_eq!(m.analyze("programar").unwrap().as_deref(), Some("programar"));
        assert_eq!(m.analyze("dividir").unwrap().as_deref(), Some("dividir"));
    }

    #[test]
    fn morphology_ignores_exceptions_and_short_stems() {
        let m = MorphologyModel::builtin();
        assert_eq!(m.analyze("quando").unwrap(), None);
        assert_eq!(m.analyze("obrigado").unwrap(), None);
        assert_eq!(m.analyze("lado").unwrap(), None);
        assert_eq!(m.analyze("casa").unwrap(), None);
        assert_eq!(m.analyze("14h").unwrap(), None);
    }

    #[test]
    fn extra_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "exceptions = [\"programou\"]\n[[rules]]\nsuffix = \"aste\"\nreplacement = \"ar\""
        )
        .unwrap();
        let m = MorphologyModel::load(Some(file.path())).unwrap();
        assert_eq!(m.rule_count(), BUILTIN_RULES.len() + 1);
        assert_eq!(m.analyze("mandaste").unwrap().as_deref(), Some("mandar"));
        assert_eq!(m.analyze("programou").unwrap(), None);
    }

    #[test]
    fn missing_or_invalid_rules_file_is_unavailable() {
        let missing = MorphologyModel::load(Some(Path::new("/nao/existe/regras.toml")));
        assert!(matches!(missing, Err(FallbackError::Unavailable { .. })));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[[rules]]\nsuffix = \"ou\"\nreplacement = \"xyz\"").unwrap();
        let invalid = MorphologyModel::load(Some(bad.path()));
        assert!(matches!(invalid, Err(FallbackError::Unavailable { .. })));
    }
}
