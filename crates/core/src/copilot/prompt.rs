//! System prompt rendering

use std::fmt::Write as _;

use chrono::NaiveDate;
use skoo_domain::{ContextSession, ContextSubject, ContextTask, StudentContext};

const DEFAULT_FIRST_NAME: &str = "Étudiant";
const DEFAULT_WEEKLY_HOURS: f64 = 10.0;
const UNKNOWN: &str = "?";

const NO_SUBJECTS: &str = "Aucune matière configurée";
const NO_SESSIONS_TODAY: &str = "Aucune session aujourd'hui";
const NO_TASKS: &str = "Aucune tâche en cours";

const RULES: &str = "RÈGLES :
1. Parle TOUJOURS en français, tutoie l'étudiant
2. Sois concis (max 3-4 phrases par message sauf si explication demandée)
3. Quand l'étudiant demande une action, utilise les outils disponibles
4. Propose proactivement des actions quand c'est pertinent
5. Utilise des émojis avec modération (1-2 par message max)
6. Si l'étudiant semble stressé, priorise le réconfort avant les actions
7. Ne mens jamais sur les données";

/// Render the copilot system prompt for `context` as of `today`.
///
/// Only sessions dated `today` are listed.
pub fn build_system_prompt(context: &StudentContext, today: NaiveDate) -> String {
    let profile = context.profile.clone().unwrap_or_default();
    let today_str = today.format("%Y-%m-%d").to_string();

    let first_name = text_or(profile.first_name.as_deref(), DEFAULT_FIRST_NAME);
    let weekly_hours = profile.weekly_revision_hours.filter(|h| *h != 0.0).unwrap_or(DEFAULT_WEEKLY_HOURS);

    let subjects = render_list(context.subjects.iter().map(render_subject), NO_SUBJECTS);
    let sessions = render_list(
        context
            .sessions
            .iter()
            .filter(|s| s.date.as_deref() == Some(today_str.as_str()))
            .map(render_session),
        NO_SESSIONS_TODAY,
    );
    let tasks = render_list(context.tasks.iter().map(render_task), NO_TASKS);

    let mut prompt = String::from(
        "Tu es Skoo, le coach de révision IA de l'étudiant. Tu es bienveillant, motivant et concret.\n\n",
    );
    let _ = write!(
        prompt,
        "CONTEXTE ÉTUDIANT :
- Prénom : {first_name}
- Niveau : {level}
- Domaine : {domain}
- Période d'examens : {exam_period}
- Objectif hebdo : {weekly_hours}h

Matières :
{subjects}

Sessions aujourd'hui :
{sessions}

Tâches en cours :
{tasks}

Date du jour : {today_str}

{RULES}",
        level = text_or(profile.study_level.as_deref(), UNKNOWN),
        domain = text_or(profile.study_domain.as_deref(), UNKNOWN),
        exam_period = text_or(profile.exam_period.as_deref(), UNKNOWN),
    );
    prompt
}

fn render_subject(subject: &ContextSubject) -> String {
    let coefficient = subject
        .coefficient
        .filter(|c| *c != 0.0)
        .map_or_else(|| UNKNOWN.to_string(), |c| c.to_string());
    format!("- {} (coef: {coefficient})", text_or(subject.name.as_deref(), UNKNOWN))
}

fn render_session(session: &ContextSession) -> String {
    let subject = session.subjects.as_ref().and_then(|s| s.name.as_deref());
    format!(
        "- {}: {}-{} [{}]",
        text_or(subject, UNKNOWN),
        hour_minute(session.start_time.as_deref()),
        hour_minute(session.end_time.as_deref()),
        session.status.as_deref().unwrap_or_default(),
    )
}

fn render_task(task: &ContextTask) -> String {
    format!(
        "- {} [{}] {}",
        text_or(task.title.as_deref(), UNKNOWN),
        task.priority.as_deref().unwrap_or_default(),
        task.status.as_deref().unwrap_or_default(),
    )
}

fn render_list(lines: impl Iterator<Item = String>, placeholder: &str) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

/// `HH:MM:SS` -> `HH:MM`
fn hour_minute(time: Option<&str>) -> &str {
    match time {
        Some(t) => t.get(..5).unwrap_or(t),
        None => UNKNOWN,
    }
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}
