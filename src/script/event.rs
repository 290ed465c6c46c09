//! The event map: an ordered, multi-category accumulator of script fragments.

use crate::script::Symbol;
use std::collections::BTreeMap;

/// Script block categories, in their fixed serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Initialize,
    First,
    Early,
    Fitness,
    Survival,
    Reproduction,
    Late,
    Custom,
}

impl EventKind {
    /// Every category, in serialization order.
    pub const ALL: [EventKind; 8] = [
        EventKind::Initialize,
        EventKind::First,
        EventKind::Early,
        EventKind::Fitness,
        EventKind::Survival,
        EventKind::Reproduction,
        EventKind::Late,
        EventKind::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Initialize => "initialize",
            EventKind::First => "first",
            EventKind::Early => "early",
            EventKind::Fitness => "fitness",
            EventKind::Survival => "survival",
            EventKind::Reproduction => "reproduction",
            EventKind::Late => "late",
            EventKind::Custom => "custom",
        }
    }
}

/// The body of an event: either a pre-formatted block or a list of single
/// statements.
///
/// The serializer terminates every statement with exactly one delimiter; a
/// block ending in a structural close brace is passed through unmodified.
#[derive(Debug, Clone)]
pub enum ScriptBody {
    Block(String),
    Statements(Vec<String>),
}

impl From<&str> for ScriptBody {
    fn from(s: &str) -> Self {
        ScriptBody::Block(s.to_string())
    }
}

impl From<String> for ScriptBody {
    fn from(s: String) -> Self {
        ScriptBody::Block(s)
    }
}

impl From<Vec<String>> for ScriptBody {
    fn from(statements: Vec<String>) -> Self {
        ScriptBody::Statements(statements)
    }
}

impl From<Vec<&str>> for ScriptBody {
    fn from(statements: Vec<&str>) -> Self {
        ScriptBody::Statements(statements.into_iter().map(String::from).collect())
    }
}

/// One script fragment: a category, optional timing, optional population
/// selector, optional callback id, a body, and an optional comment.
///
/// A `time` of `None` means the callback applies every tick and is rendered
/// without a tick prefix.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    time: Option<u64>,
    population: Option<String>,
    symbol: Option<Symbol>,
    mutation: Option<String>,
    body: ScriptBody,
    comment: Option<String>,
}

impl Event {
    pub fn new(kind: EventKind, body: impl Into<ScriptBody>) -> Self {
        Self {
            kind,
            time: None,
            population: None,
            symbol: None,
            mutation: None,
            body: body.into(),
            comment: None,
        }
    }

    /// Pin the callback to one tick.
    pub fn at(mut self, tick: u64) -> Self {
        self.time = Some(tick);
        self
    }

    pub fn population(mut self, population: impl Into<String>) -> Self {
        self.population = Some(population.into());
        self
    }

    pub fn symbol(mut self, symbol: Symbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// The mutation type a fitness callback is bound to.
    pub fn mutation(mut self, mutation: impl Into<String>) -> Self {
        self.mutation = Some(mutation.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn time(&self) -> Option<u64> {
        self.time
    }

    #[inline]
    pub fn population_ref(&self) -> Option<&str> {
        self.population.as_deref()
    }

    #[inline]
    pub fn symbol_ref(&self) -> Option<Symbol> {
        self.symbol
    }

    #[inline]
    pub fn mutation_ref(&self) -> Option<&str> {
        self.mutation.as_deref()
    }

    #[inline]
    pub fn body(&self) -> &ScriptBody {
        &self.body
    }

    #[inline]
    pub fn comment_ref(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Data rendered inside the `initialize()` block, in its fixed sub-order:
/// model type, rates, mutation-type declarations, element-type declarations,
/// coding-interval declarations, named constants, free-form extras.
#[derive(Debug, Clone, Default)]
pub struct InitializeBlock {
    pub model_type: String,
    pub mutation_rate: String,
    pub recombination_rate: String,
    pub mutation_types: Vec<String>,
    pub element_types: Vec<String>,
    pub intervals: Vec<String>,
    pub constants: Vec<(String, String)>,
    pub extra_scripts: Vec<String>,
}

/// Mapping from category to an ordered sequence of events.
///
/// Events are append-only: once added they are never mutated, removed, or
/// reordered, so re-running composition over the same configuration
/// reproduces the same sequence.
#[derive(Debug, Default)]
pub struct EventMap {
    init: InitializeBlock,
    events: BTreeMap<EventKind, Vec<Event>>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to its category, preserving insertion order.
    pub fn add(&mut self, event: Event) {
        self.events.entry(event.kind()).or_default().push(event);
    }

    /// Events of one category, in insertion order.
    pub fn events(&self, kind: EventKind) -> &[Event] {
        self.events.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of accumulated events (excluding the initialize block).
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn initialize(&self) -> &InitializeBlock {
        &self.init
    }

    #[inline]
    pub fn initialize_mut(&mut self) -> &mut InitializeBlock {
        &mut self.init
    }

    /// Append a named constant to the initialize block.
    pub fn define_constant(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.init.constants.push((name.into(), value.into()));
    }

    /// Append a free-form statement to the initialize block.
    pub fn extra_script(&mut self, script: impl Into<String>) {
        self.init.extra_scripts.push(script.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        // Derived Ord must match the fixed serialization order.
        let mut sorted = EventKind::ALL;
        sorted.sort();
        assert_eq!(sorted, EventKind::ALL);
        assert!(EventKind::Initialize < EventKind::First);
        assert!(EventKind::Late < EventKind::Custom);
    }

    #[test]
    fn test_insertion_order_within_category() {
        let mut map = EventMap::new();
        map.add(Event::new(EventKind::Early, "a();"));
        map.add(Event::new(EventKind::Late, "x();"));
        map.add(Event::new(EventKind::Early, "b();"));

        let bodies: Vec<&ScriptBody> =
            map.events(EventKind::Early).iter().map(Event::body).collect();
        assert_eq!(bodies.len(), 2);
        match (bodies[0], bodies[1]) {
            (ScriptBody::Block(a), ScriptBody::Block(b)) => {
                assert_eq!(a, "a();");
                assert_eq!(b, "b();");
            }
            other => panic!("unexpected bodies: {other:?}"),
        }
    }

    #[test]
    fn test_events_accumulate_without_merging() {
        let mut map = EventMap::new();
        for i in 0..5 {
            map.add(Event::new(EventKind::Fitness, format!("f{i}();")));
        }
        assert_eq!(map.events(EventKind::Fitness).len(), 5);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_event_builder_fields() {
        let event = Event::new(EventKind::Late, vec!["a()", "b()"])
            .at(101)
            .population("p1")
            .comment("end of sim");
        assert_eq!(event.time(), Some(101));
        assert_eq!(event.population_ref(), Some("p1"));
        assert_eq!(event.comment_ref(), Some("end of sim"));
        assert!(matches!(event.body(), ScriptBody::Statements(s) if s.len() == 2));
    }

    #[test]
    fn test_constants_preserve_order() {
        let mut map = EventMap::new();
        map.define_constant("spo_pop_size", "500");
        map.define_constant("gam_pop_size", "1000");
        let names: Vec<&str> =
            map.initialize().constants.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["spo_pop_size", "gam_pop_size"]);
    }
}
