//! Text-extraction engine.
//!
//! Turning one chat message into suggestion skeletons is a three-stage
//! pipeline, each stage a focused submodule under `src/engine/`:
//!
//! ```text
//! raw text (lower-cased by the caller)
//!     │
//!     ├─ normalize          (normalize.rs)
//!     │    markup-wrapped labels rewritten so the separator
//!     │    lands outside the markup span
//!     │
//!     ├─ tokenize           (tokenize.rs)
//!     │    fixed-priority label dispatch over an ordered
//!     │    Vocabulary; Label / Separator / FreeText tokens
//!     │
//!     └─ assemble           (assemble.rs)
//!          token stream reduced to Title…fields… spans;
//!          all-or-nothing on failure (or best-effort per
//!          entry behind Recovery::BestEffort)
//!              │
//!              v
//!      Vec<SuggestionFields>
//! ```
//!
//! Every stage is pure: no shared state, safe to run concurrently across
//! independent inputs. A failure in any stage rejects the entire input; the
//! public API in `src/api.rs` maps that to "no suggestions found".

#[path = "engine/assemble.rs"]
mod assemble;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/tokenize.rs"]
mod tokenize;

pub use assemble::Recovery;

pub(crate) use assemble::assemble;
pub(crate) use normalize::normalize;
pub(crate) use tokenize::tokenize;
