use std::sync::Arc;

use rand::seq::SliceRandom;
use skoo_domain::constants::{COACH_DEFAULT_MESSAGE, COACH_MAX_TOKENS, COACH_TEMPERATURE};
use skoo_domain::{ChatMessage, CoachContext, CoachMessageType, CoachRequest, CompletionRequest};
use tracing::{instrument, warn};

use crate::llm_ports::ChatModel;

const COACH_SYSTEM_PROMPT: &str = "Tu es Skoo, un coach d'études bienveillant et motivant pour les étudiants français. Tu parles de manière décontractée mais professionnelle, comme un grand frère/grande sœur qui aide avec les révisions.

Règles:
- Réponds UNIQUEMENT en français
- Messages courts (1-2 phrases max, 15-30 mots)
- Ton chaleureux, encourageant, jamais condescendant
- Utilise le prénom de l'étudiant si disponible
- Évite les emojis dans le texte (c'est pour de la synthèse vocale)
- Sois spécifique aux données fournies quand disponibles
- Ne commence jamais par \"Salut\" ou \"Bonjour\" pour les messages de motivation (seulement pour greeting)";

pub struct CoachService {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl CoachService {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self { model, model_name: model_name.into() }
    }

    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn message(&self, request: &CoachRequest) -> String {
        let kind = request.kind();
        let completion_request = CompletionRequest {
            max_tokens: Some(COACH_MAX_TOKENS),
            temperature: Some(COACH_TEMPERATURE),
            ..CompletionRequest::new(
                self.model_name.clone(),
                vec![
                    ChatMessage::system(COACH_SYSTEM_PROMPT),
                    ChatMessage::user(user_prompt(kind, &request.context)),
                ],
            )
        };

        match self.model.complete(completion_request).await {
            Ok(completion) => completion
                .content
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| COACH_DEFAULT_MESSAGE.to_string()),
            Err(err) => {
                warn!(error = %err, "coach generation failed, using fallback");
                fallback_message(kind).to_string()
            }
        }
    }
}

/// One of the two canned messages for `kind`, chosen at random
pub fn fallback_message(kind: CoachMessageType) -> &'static str {
    let options = fallback_options(kind);
    options.choose(&mut rand::thread_rng()).copied().unwrap_or(COACH_DEFAULT_MESSAGE)
}

const fn fallback_options(kind: CoachMessageType) -> &'static [&'static str] {
    match kind {
        CoachMessageType::Greeting => &[
            "Content de te revoir ! Prêt à avancer dans tes révisions ?",
            "Hey ! C'est le moment de briller !",
        ],
        CoachMessageType::Motivation => &[
            "Chaque session compte. Tu fais du super boulot !",
            "Continue comme ça, tu es sur la bonne voie !",
        ],
        CoachMessageType::Reminder => &[
            "Une petite session de révision ? Tu vas voir, ça passe vite !",
            "C'est le moment idéal pour commencer !",
        ],
        CoachMessageType::Celebration => &[
            "Bravo ! Continue sur cette lancée !",
            "Excellent travail ! Tu peux être fier de toi !",
        ],
        CoachMessageType::Tip => &[
            "Essaie la technique Pomodoro : 25 minutes de focus, 5 de pause.",
            "Révise le matin quand ton cerveau est frais !",
        ],
    }
}

pub(crate) fn user_prompt(kind: CoachMessageType, context: &CoachContext) -> String {
    let named = context
        .first_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| format!(" nommé {n}"))
        .unwrap_or_default();
    let today_sessions = context.today_sessions_count.filter(|c| *c > 0);

    let mut lines = Vec::new();
    match kind {
        CoachMessageType::Greeting => lines.push(format!(
            "Génère un message d'accueil pour un étudiant{named} qui vient d'ouvrir l'application. Sois chaleureux et motivant."
        )),
        CoachMessageType::Motivation => {
            lines.push(format!("Génère un message de motivation pour un étudiant{named}."));
            if let Some(total) = context.total_hours_this_week.filter(|h| *h != 0.0) {
                let done = context.completed_hours_this_week.unwrap_or(0.0);
                lines.push(format!("Cette semaine: {done}h faites sur {total}h planifiées."));
            }
            if let (Some(subject), Some(days)) = (
                context.next_exam_subject.as_deref().filter(|s| !s.is_empty()),
                context.next_exam_days.filter(|d| *d != 0),
            ) {
                lines.push(format!("Prochain examen: {subject} dans {days} jours."));
            }
            if let Some(count) = today_sessions {
                lines.push(format!("Aujourd'hui: {count} sessions prévues."));
            }
        }
        CoachMessageType::Reminder => {
            lines.push(format!(
                "Génère un rappel doux pour un étudiant{named} qui doit commencer ses révisions. Ne sois pas moralisateur, juste encourageant."
            ));
            if let Some(count) = today_sessions {
                lines.push(format!("Il a {count} sessions prévues aujourd'hui."));
            }
        }
        CoachMessageType::Celebration => {
            lines.push(format!(
                "Génère un message de félicitations pour un étudiant{named} qui a accompli quelque chose."
            ));
            lines.push(match context.completed_hours_this_week.filter(|h| *h != 0.0) {
                Some(hours) => format!("Il a fait {hours}h de révision cette semaine!"),
                None => "Il a terminé une session de révision!".to_string(),
            });
        }
        CoachMessageType::Tip => lines.push(format!(
            "Génère un conseil d'étude court et actionnable pour un étudiant{named}. Sois pratique et motivant."
        )),
    }
    lines.join("\n")
}
