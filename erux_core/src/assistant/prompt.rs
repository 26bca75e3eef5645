use serde::Serialize;
use serde_json::json;

use crate::access::dto::{AccessEvent, AccessStatus};
use crate::directory::dto::RegisteredUser;
use crate::directory::schedule::SchedulePolicy;

pub const ASSISTANT_NAME: &str = "Centinela";
pub const GREETING: &str =
    "Hola, soy Centinela. Puedes hacerme preguntas sobre la actividad o pedirme que realice acciones.";
pub const PROMPT_LOG_LIMIT: usize = 50;

#[derive(Serialize)]
struct RosterEntry<'a> {
    id: &'a str,
    name: &'a str,
    schedule: &'a SchedulePolicy,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    name: &'a str,
    date: &'a str,
    time: &'a str,
    status: AccessStatus,
}

/// System instruction for one assistant turn, built from the kiosk state at
/// the moment the operator sends a message.
pub fn build_system_instruction(
    today: &str,
    users: &[RegisteredUser],
    log: &[AccessEvent],
) -> String {
    let roster: Vec<RosterEntry> = users
        .iter()
        .map(|u| RosterEntry {
            id: &u.id,
            name: &u.name,
            schedule: &u.schedule,
        })
        .collect();

    let recent: Vec<LogEntry> = log
        .iter()
        .take(PROMPT_LOG_LIMIT)
        .map(|e| LogEntry {
            name: &e.name,
            date: &e.date,
            time: &e.time,
            status: e.status,
        })
        .collect();

    let roster_json = serde_json::to_string(&roster).unwrap_or_else(|_| "[]".to_string());
    let log_json = serde_json::to_string(&recent).unwrap_or_else(|_| "[]".to_string());

    let navigate_example = json!({
        "response": "Te llevo a la gestión de usuarios. Necesitarás la contraseña de administrador.",
        "action": { "type": "navigate", "payload": "open_user_management" }
    });
    let schedule_example = json!({
        "response": "He preparado el envío diario a 'gerencia@miempresa.com' a las 08:00 en PDF. Confirma la acción, por favor.",
        "action": {
            "type": "schedule_report",
            "payload": { "email": "gerencia@miempresa.com", "time": "08:00", "format": "pdf" }
        }
    });

    format!(
        r#"Te llamas '{name}' y asistes a los operadores de un sistema de control de acceso.
Ayudas a usar el sistema con seguridad y a analizar la actividad registrada.
Hoy es {today}.

CONTEXTO
- Usuarios registrados: {roster_json}
- Últimos {limit} accesos (más reciente primero): {log_json}

REGLAS
1. Responde con brevedad y tono profesional. La seguridad es lo primero.
2. Usa el contexto para responder preguntas sobre los accesos: cuenta filtrando los registros, detecta llegadas tarde comparando la hora del acceso con el horario del usuario y calcula fechas relativas ("ayer", "la semana pasada") a partir de hoy.
3. Si el operador pide una acción, responde SOLO con un bloque de código ```json con la forma {{"response": "texto para el operador", "action": {{"type": "...", "payload": ...}}}}.
4. Si no hay acción, responde en texto plano sin JSON.

ACCIONES
a) "navigate": el payload es "open_user_management", "open_reports" o "open_settings".
Ejemplo ("¿Cómo doy de alta a alguien?"):
```json
{navigate_example}
```
b) "schedule_report": el payload es {{"email", "time" (HH:MM), "format" (pdf, csv o json)}}. Si falta la hora usa 08:00; si falta el formato usa pdf.
Ejemplo ("Envía los reportes a gerencia@miempresa.com a las 8"):
```json
{schedule_example}
```
"#,
        name = ASSISTANT_NAME,
        today = today,
        roster_json = roster_json,
        limit = PROMPT_LOG_LIMIT,
        log_json = log_json,
        navigate_example = navigate_example,
        schedule_example = schedule_example,
    )
}
