//! The event assembly engine: callback ids, the event map, category
//! templates, and the serializer that renders the final program.

mod builder;
mod event;
mod serialize;
mod symbols;
pub mod templates;

pub use builder::ScriptBuilder;
pub use event::{Event, EventKind, EventMap, InitializeBlock, ScriptBody};
pub use serialize::serialize;
pub use symbols::{Symbol, SymbolAllocator, RESERVED_CALLBACKS};
