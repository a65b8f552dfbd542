//! Transcription prompt value object

/// Base instruction for meeting transcriptions
const BASE_INSTRUCTION: &str = r#"Tu es un outil de transcription de réunions. Transcris fidèlement l'audio en texte.

Instructions:
- Transcris dans la langue parlée, sans traduire
- Conserve les prénoms, noms propres, chiffres et termes techniques exacts
- Supprime les hésitations (euh, hum) et les faux départs
- Ponctuation et grammaire correctes
- Renvoie UNIQUEMENT la transcription, sans commentaire ni explication
- Si l'audio ne contient aucune parole, renvoie exactement: Pas de données à transcrire"#;

/// Value object representing the system prompt sent with the audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    content: String,
}

impl SystemPrompt {
    /// Build the meeting transcription prompt
    pub fn meeting() -> Self {
        Self {
            content: BASE_INSTRUCTION.to_string(),
        }
    }

    /// Build the prompt with extra context (e.g. the meeting title)
    pub fn with_context(context: &str) -> Self {
        let context = context.trim();
        if context.is_empty() {
            return Self::meeting();
        }
        Self {
            content: format!("{}\n\nContexte de la réunion: {}", BASE_INSTRUCTION, context),
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::meeting()
    }
}
