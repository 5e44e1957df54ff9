//! # BEM Transform
//!
//! Rewrites calls to the macro-like `BEM({...})` construct into trees of
//! element-factory calls, with class names computed by emitting calls to
//! the runtime helper `buildClassName({block, elem?, mods?})`. The helper
//! itself lives in the output program's runtime; this crate only emits
//! calls to it.
//!
//! ## Rewrite invariants
//!
//! 1. **Block resolution**: an element's block is its own `block` field,
//!    else the nearest enclosing scope binding. Once resolved for a call,
//!    the block is fixed for that call and all of its nested content.
//!
//! 2. **Scope binding**: a `BEM` call with an explicit `block` binds it at
//!    the current lexical scope, overwriting any prior binding there.
//!    Later sibling calls that omit `block` inherit the most recently
//!    declared one; bindings never leak out of their scope.
//!
//! 3. **Descriptor reading**: field lookup scans forward over identifier
//!    keys, so the *last* entry for a duplicated key wins. The reader
//!    never mutates the descriptor.
//!
//! 4. **Output shape**: every emitted element call is
//!    `callee(tag, propsObject, ...children)` with each child its own
//!    positional argument. Absent content is a single `null` child.
//!    `className` is always appended after copied props, and the
//!    `buildClassName` options object orders keys `block`, `elem`, `mods`.
//!
//! 5. **Copy-on-emit**: nodes taken from a descriptor are re-homed as
//!    fresh nodes in the output; node identity is positional and is never
//!    shared across output positions.
//!
//! 6. **No partial success**: the first hard failure aborts the pass.

mod descriptor;
mod errors;
mod lowerer;
mod options;
mod scope;
mod transform;


pub use descriptor::get_value;
pub use errors::{
    RewriteError, ERR_ARGUMENT_COUNT, ERR_ARGUMENT_SHAPE, ERR_BLOCK_UNRESOLVED, ERR_PARSE,
    ERR_PRAGMA, ERR_PROPERTY_KIND,
};
pub use lowerer::BemLowerer;
pub use options::{BemOptions, TargetCallee};
pub use scope::ScopeArena;
pub use transform::{transform, transform_many, SourceFile};
