//! Rendering the accumulated event map into the final ordered program.

use crate::errors::TemplateError;
use crate::script::event::InitializeBlock;
use crate::script::{templates, Event, EventKind, EventMap, ScriptBody};

/// Render the full program: the initialize block first, then every other
/// category in fixed order (first, early, fitness, survival, reproduction,
/// late, custom), events within a category in insertion order.
pub fn serialize(events: &EventMap) -> Result<String, TemplateError> {
    let mut blocks = vec![render_initialize(events)?];
    for kind in EventKind::ALL {
        if kind == EventKind::Initialize {
            continue;
        }
        for event in events.events(kind) {
            blocks.push(render_event(event)?);
        }
    }
    Ok(blocks.join("\n"))
}

fn render_initialize(events: &EventMap) -> Result<String, TemplateError> {
    let init: &InitializeBlock = events.initialize();

    let constants = init
        .constants
        .iter()
        .map(|(name, value)| format!("defineConstant('{name}', {value});"))
        .collect::<Vec<_>>()
        .join("\n  ");

    // Free-form statements from the block itself, then any events appended
    // directly under the initialize category.
    let mut extras: Vec<String> = init.extra_scripts.iter().map(|s| clean_statement(s)).collect();
    for event in events.events(EventKind::Initialize) {
        extras.push(clean_body(event.body(), "\n  "));
    }

    templates::render(
        templates::INITIALIZE,
        &[
            ("model_type", &init.model_type),
            ("recombination_rate", &init.recombination_rate),
            ("mutation_rate", &init.mutation_rate),
            ("mutations", &init.mutation_types.join("\n  ")),
            ("elements", &init.element_types.join("\n  ")),
            ("chromosome", &init.intervals.join("\n  ")),
            ("constants", &constants),
            ("scripts", &extras.join("\n  ")),
        ],
    )
}

fn render_event(event: &Event) -> Result<String, TemplateError> {
    let comment = format_comment(event.comment_ref());
    let time = match event.time() {
        Some(tick) => format!("{tick} "),
        None => String::new(),
    };
    let idx = match event.symbol_ref() {
        Some(symbol) => format!("{symbol} "),
        None => String::new(),
    };
    let population = event.population_ref().unwrap_or("").to_string();
    let scripts = clean_body(event.body(), "\n    ");

    match event.kind() {
        EventKind::First => templates::render(
            templates::FIRST,
            &[("comment", &comment), ("time", &time), ("scripts", &scripts)],
        ),
        EventKind::Early => templates::render(
            templates::EARLY,
            &[("comment", &comment), ("time", &time), ("scripts", &scripts)],
        ),
        EventKind::Fitness => templates::render(
            templates::FITNESS,
            &[
                ("comment", &comment),
                ("idx", &idx),
                ("mutation", event.mutation_ref().unwrap_or("NULL")),
                ("scripts", &scripts),
            ],
        ),
        EventKind::Survival => templates::render(
            templates::SURVIVAL,
            &[
                ("comment", &comment),
                ("idx", &idx),
                ("population", &population),
                ("scripts", &scripts),
            ],
        ),
        EventKind::Reproduction => templates::render(
            templates::REPRODUCTION,
            &[("comment", &comment), ("population", &population), ("scripts", &scripts)],
        ),
        EventKind::Late => templates::render(
            templates::LATE,
            &[("comment", &comment), ("time", &time), ("scripts", &scripts)],
        ),
        EventKind::Custom => templates::render(
            templates::CUSTOM,
            &[("comment", &comment), ("scripts", &scripts)],
        ),
        // Initialize events are folded into the initialize block.
        EventKind::Initialize => Ok(String::new()),
    }
}

/// Normalize a script body so every statement ends with exactly one
/// delimiter. Statement lists are joined with the given indent; a block
/// ending in a structural close brace passes through unmodified.
fn clean_body(body: &ScriptBody, joiner: &str) -> String {
    match body {
        ScriptBody::Statements(statements) => statements
            .iter()
            .map(|s| clean_statement(s))
            .collect::<Vec<_>>()
            .join(joiner),
        ScriptBody::Block(block) => {
            let trimmed = block.trim();
            if trimmed.ends_with('}') {
                trimmed.to_string()
            } else {
                clean_statement(trimmed)
            }
        }
    }
}

fn clean_statement(statement: &str) -> String {
    format!("{};", statement.trim().trim_end_matches(';'))
}

/// Single leading marker, surrounding whitespace trimmed, trailing newline.
fn format_comment(comment: Option<&str>) -> String {
    match comment {
        Some(text) => format!("// {}\n", text.trim_start_matches('/').trim()),
        None => String::new(),
    }
}
