//! # Classificador — Primeira Regra que Casa Decide
//!
//! Máquina de estados com quatro estados terminais e nenhum intermediário:
//!
//! ```text
//! (original, normalizado)
//!   └── Features::extract
//!         └── for rule in rules:           (ordem fixa, grupos 1 → 12)
//!               if let Some(razão) = rule  → (rule.category, [razão])
//! ```
//!
//! A última regra sempre casa, então a função é total. Entrada vazia nunca
//! chega aqui: o [`Analyzer`](crate::analyzer::Analyzer) devolve o
//! sentinela antes.

use super::features::Features;
use super::lemmatizer::Lemmatizer;
use super::rules::{default_rules, Rule};
use crate::core::Category;

/// Decisão do classificador.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub category: Category,
    pub reasons: Vec<String>,
    /// Nome da regra que decidiu.
    pub rule: &'static str,
}

/// Pipeline ordenado de regras.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Classificador com lista de regras própria (usado em testes).
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Classifica uma mensagem já normalizada.
    pub fn classify(&self, original: &str, normalized: &str, lemmatizer: &Lemmatizer) -> Decision {
        let features = Features::extract(original, normalized, lemmatizer);
        for rule in &self.rules {
            if let Some(reason) = rule.evaluate(&features) {
                tracing::debug!(rule = rule.name, group = rule.group, category = %rule.category, "regra casou");
                return Decision {
                    category: rule.category,
                    reasons: vec![reason],
                    rule: rule.name,
                };
            }
        }
        Decision {
            category: Category::Messages,
            reasons: vec!["no rule matched".to_string()],
            rule: "none",
        }
    }
}
