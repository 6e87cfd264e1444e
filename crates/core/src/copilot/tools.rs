//! Tool catalog offered to the model on every round

use once_cell::sync::Lazy;
use serde_json::json;
use skoo_domain::ToolDefinition;

pub const CREATE_REVISION_SESSION: &str = "create_revision_session";
pub const UPDATE_SESSION_STATUS: &str = "update_session_status";
pub const CREATE_TASK: &str = "create_task";
pub const GENERATE_QUIZ: &str = "generate_quiz";
pub const GENERATE_REVISION_SHEET: &str = "generate_revision_sheet";
pub const GET_STUDY_STATS: &str = "get_study_stats";
pub const SUGGEST_STUDY_PLAN: &str = "suggest_study_plan";
pub const CREATE_FLASHCARD_DECK: &str = "create_flashcard_deck";

/// The eight copilot tools, in the order they are advertised
pub static COPILOT_TOOLS: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    vec![
        tool(
            CREATE_REVISION_SESSION,
            "Crée une session de révision dans le planning de l'étudiant",
            json!({
                "type": "object",
                "properties": {
                    "subject_id": { "type": "string", "description": "UUID de la matière" },
                    "date": { "type": "string", "description": "Date YYYY-MM-DD" },
                    "start_time": { "type": "string", "description": "Heure début HH:MM" },
                    "end_time": { "type": "string", "description": "Heure fin HH:MM" },
                    "notes": { "type": "string", "description": "Notes optionnelles" }
                },
                "required": ["subject_id", "date", "start_time", "end_time"]
            }),
        ),
        tool(
            UPDATE_SESSION_STATUS,
            "Met à jour le statut d'une session (planned, completed, skipped)",
            json!({
                "type": "object",
                "properties": {
                    "session_id": { "type": "string" },
                    "status": { "type": "string", "enum": ["planned", "completed", "skipped"] }
                },
                "required": ["session_id", "status"]
            }),
        ),
        tool(
            CREATE_TASK,
            "Crée une tâche pour l'étudiant",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "subject_id": { "type": "string" },
                    "priority": { "type": "string", "enum": ["low", "medium", "high"] },
                    "due_date": { "type": "string", "description": "Date YYYY-MM-DD" }
                },
                "required": ["title"]
            }),
        ),
        tool(
            GENERATE_QUIZ,
            "Génère un quiz interactif sur un sujet donné",
            json!({
                "type": "object",
                "properties": {
                    "subject": { "type": "string", "description": "Sujet du quiz" },
                    "num_questions": { "type": "integer" },
                    "difficulty": { "type": "string", "enum": ["facile", "moyen", "difficile"] }
                },
                "required": ["subject"]
            }),
        ),
        tool(
            GENERATE_REVISION_SHEET,
            "Génère une fiche de révision structurée",
            json!({
                "type": "object",
                "properties": {
                    "subject": { "type": "string" },
                    "topics": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["subject"]
            }),
        ),
        tool(
            GET_STUDY_STATS,
            "Récupère les statistiques de révision de l'étudiant",
            json!({
                "type": "object",
                "properties": {
                    "period": { "type": "string", "enum": ["today", "this_week", "this_month"] }
                },
                "required": ["period"]
            }),
        ),
        tool(
            SUGGEST_STUDY_PLAN,
            "Propose un plan de révision optimisé pour la semaine",
            json!({
                "type": "object",
                "properties": {
                    "focus_subjects": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "UUIDs des matières à prioriser"
                    }
                }
            }),
        ),
        tool(
            CREATE_FLASHCARD_DECK,
            "Crée un deck de flashcards sur un sujet",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "subject_id": { "type": "string" },
                    "cards": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "front": { "type": "string" },
                                "back": { "type": "string" }
                            },
                            "required": ["front", "back"]
                        }
                    }
                },
                "required": ["name", "cards"]
            }),
        ),
    ]
});

fn tool(name: &str, description: &str, parameters: serde_json::Value) -> ToolDefinition {
    ToolDefinition { name: name.to_string(), description: description.to_string(), parameters }
}
