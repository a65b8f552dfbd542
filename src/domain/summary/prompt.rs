//! Summarization prompt value object

/// System instruction for meeting summaries
const SUMMARY_INSTRUCTION: &str = r#"Tu es un assistant expert en synthèse de réunions. Tu transformes une transcription en compte rendu clair, scannable et actionnable.

FORMAT JSON OBLIGATOIRE:
{
  "title": "Titre descriptif et concis de la réunion",
  "summary": "Contenu complet du résumé en markdown"
}

RÈGLES:
- Lis TOUTE la transcription avant de résumer et n'omets aucune discussion importante
- Conserve les noms, chiffres, dates et délais exacts
- Voix active et phrases affirmatives ("Lucie a créé", jamais "une création a été faite")
- Évite "mentionné", "évoqué", "semble", "paraît", "est dit", "est attribué", "est suspecté"
- N'invente rien et ne déduis aucune action qui n'est pas explicitement énoncée

TITRE:
- 5 à 8 mots maximum, reflète le sujet principal

STRUCTURE DU RÉSUMÉ:
1. PREMIÈRE SECTION OBLIGATOIRE: ### Contexte et besoins (2 à 5 points)
2. Puis 2 à 5 sections thématiques en ### avec des titres spécifiques au contenu
   - Sous-sections en #### si nécessaire
   - Points principaux en "- ", sous-points indentés de 2 ou 4 espaces
3. Ordre logique : contexte, discussions, décisions, actions

SECTIONS FINALES (uniquement si explicitement présentes dans la transcription):

**Décisions**
- [ ] Décision validée avec son contexte

**Actions**
- [ ] Description de l'action

RÈGLE ABSOLUE POUR LES ACTIONS:
- N'ajoute JAMAIS de tiret suivi d'un rôle, d'une équipe ou de "Responsable non spécifié"
- Seule exception: un PRÉNOM dit textuellement dans la transcription ("Lucie va développer la palette")
  ✅ - [ ] Développer la palette - Lucie
  ✅ - [ ] Vérifier l'enregistrement
  ❌ - [ ] Vérifier l'enregistrement - Responsable technique
  ❌ - [ ] Prendre une pause - Participant

Si un point est discuté sans être résolu, indique-le comme "en discussion"."#;

/// Reminder appended after the transcript in the user message
const ACTION_REMINDER: &str = "⚠️ RAPPEL IMPORTANT: Pour les actions, N'AJOUTE JAMAIS de tiret suivi de \"Participant\", \"Responsable\", \"Équipe\" ou autre rôle. Écris UNIQUEMENT l'action sans rien après, sauf si un PRÉNOM précis est mentionné dans la transcription.";

/// Value object holding the system and user messages for one summary request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    system: String,
    user: String,
}

impl SummaryPrompt {
    /// Build the prompt for a transcript
    pub fn build(transcript: &str) -> Self {
        let user = format!(
            "Voici la transcription complète de la réunion à résumer. Lis attentivement TOUTE la transcription avant de créer le résumé:\n\n{}\n\nCrée maintenant un résumé détaillé et structuré de cette réunion.\n\n{}",
            transcript, ACTION_REMINDER
        );
        Self {
            system: SUMMARY_INSTRUCTION.to_string(),
            user,
        }
    }

    /// System message content
    pub fn system(&self) -> &str {
        &self.system
    }

    /// User message content
    pub fn user(&self) -> &str {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_requires_json_and_context_section() {
        let prompt = SummaryPrompt::build("transcription");
        assert!(prompt.system().contains("\"title\""));
        assert!(prompt.system().contains("\"summary\""));
        assert!(prompt.system().contains("### Contexte et besoins"));
        assert!(prompt.system().contains("- [ ] "));
    }

    #[test]
    fn user_message_embeds_transcript_and_reminder() {
        let prompt = SummaryPrompt::build("Lucie va développer la palette.");
        assert!(prompt.user().contains("Lucie va développer la palette."));
        assert!(prompt.user().contains("RAPPEL IMPORTANT"));
    }
}
