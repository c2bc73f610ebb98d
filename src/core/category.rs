//! # Category — Os Quatro Buckets Terminais
//!
//! O classificador é uma máquina de estados com **quatro estados
//! terminais** e nenhum estado intermediário:
//!
//! | Categoria | Significado | Exemplo |
//! |-----------|-------------|---------|
//! | [`System`](Category::System) | Pedido de integração com API externa | "agende uma reunião amanhã às 14h" |
//! | [`Messages`](Category::Messages) | Pergunta ou conversa objetiva | "qual a capital do Brasil?" |
//! | [`User`](Category::User) | Mensagem pessoal, complexa ou narrativa | "estou me sentindo sobrecarregado" |
//! | [`Unclear`](Category::Unclear) | Ambígua, incompleta ou multi-intenção | "documento" |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bucket de intenção produzido pelo classificador.
///
/// Serializado em minúsculas (`"system"`, `"messages"`, ...) porque é esse
/// o formato consumido pelo construtor de prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Pedido que exige integração (e-mail, agenda, planilhas, ...).
    System,
    /// Pergunta direta, pedido de ajuda ou conversa objetiva.
    Messages,
    /// Conteúdo pessoal, complexo ou narrativo.
    User,
    /// Entrada ambígua: o assistente deve pedir esclarecimento.
    Unclear,
}

impl Category {
    /// Nome estável usado em logs e respostas JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Messages => "messages",
            Category::User => "user",
            Category::Unclear => "unclear",
        }
    }

    /// `true` para o bucket de integração, o único que aciona o detector de scopes.
    pub fn is_integration(&self) -> bool {
        matches!(self, Category::System)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
