//! Fixed prompts and function schemas per study aid

use serde_json::{json, Value};
use skoo_domain::{StudyToolKind, ToolDefinition};

pub(crate) fn system_prompt(kind: StudyToolKind) -> &'static str {
    match kind {
        StudyToolKind::Quiz => "Tu es un professeur expert qui crée des quiz de révision pour des étudiants français.
Quand on te donne un sujet et optionnellement un contenu, génère un quiz de 5 à 10 questions.
Chaque question doit avoir 4 propositions (A, B, C, D) et une seule bonne réponse.
Réponds UNIQUEMENT avec le JSON structuré via l'outil fourni, sans texte supplémentaire.",
        StudyToolKind::Fiche => "Tu es un professeur expert qui crée des fiches de révision synthétiques pour des étudiants français.
Quand on te donne un sujet et optionnellement un contenu, génère une fiche de révision claire et structurée.
La fiche doit contenir: un titre, les points clés (5-10 bullet points), les définitions importantes, et un résumé.
Réponds UNIQUEMENT avec le JSON structuré via l'outil fourni, sans texte supplémentaire.",
        StudyToolKind::Flashcards => "Tu es un professeur expert qui crée des flashcards de révision pour des étudiants français.
Quand on te donne un sujet et optionnellement un contenu, génère 8 à 15 flashcards.
Chaque flashcard a un recto (question/terme) et un verso (réponse/définition).
Réponds UNIQUEMENT avec le JSON structuré via l'outil fourni, sans texte supplémentaire.",
    }
}

/// The single function the model is forced to call
pub(crate) fn forced_tool(kind: StudyToolKind) -> ToolDefinition {
    let (name, description, parameters) = match kind {
        StudyToolKind::Quiz => ("generate_quiz", "Génère un quiz structuré", quiz_schema()),
        StudyToolKind::Fiche => {
            ("generate_fiche", "Génère une fiche de révision structurée", fiche_schema())
        }
        StudyToolKind::Flashcards => {
            ("generate_flashcards", "Génère des flashcards de révision", flashcards_schema())
        }
    };
    ToolDefinition { name: name.to_string(), description: description.to_string(), parameters }
}

pub(crate) fn user_message(subject: &str, content: Option<&str>) -> String {
    let mut message = format!("Sujet : {subject}");
    if let Some(content) = content.filter(|c| !c.is_empty()) {
        message.push_str("\n\nContenu fourni :\n");
        message.push_str(content);
    }
    message
}

fn quiz_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "Titre du quiz" },
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string" },
                        "options": {
                            "type": "object",
                            "properties": {
                                "A": { "type": "string" },
                                "B": { "type": "string" },
                                "C": { "type": "string" },
                                "D": { "type": "string" }
                            },
                            "required": ["A", "B", "C", "D"],
                            "additionalProperties": false
                        },
                        "correct_answer": { "type": "string", "enum": ["A", "B", "C", "D"] },
                        "explanation": { "type": "string" }
                    },
                    "required": ["question", "options", "correct_answer", "explanation"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["title", "questions"],
        "additionalProperties": false
    })
}

fn fiche_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "key_points": { "type": "array", "items": { "type": "string" } },
            "definitions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "term": { "type": "string" },
                        "definition": { "type": "string" }
                    },
                    "required": ["term", "definition"],
                    "additionalProperties": false
                }
            },
            "summary": { "type": "string" }
        },
        "required": ["title", "key_points", "definitions", "summary"],
        "additionalProperties": false
    })
}

fn flashcards_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "cards": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "front": { "type": "string" },
                        "back": { "type": "string" }
                    },
                    "required": ["front", "back"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["title", "cards"],
        "additionalProperties": false
    })
}
