//! # `confab-core` – provider-agnostic chat primitives and the turn loop
//!
//! This crate holds everything the `confab` chat client needs that is *not*
//! tied to a concrete HTTP backend:
//!
//! | Module             | What it provides                                                    |
//! |--------------------|---------------------------------------------------------------------|
//! | [`message`]        | `Role` / `Message`, serializable straight into the wire body        |
//! | [`conversation`]   | Append-only ordered history, re-sent in full every turn             |
//! | [`event`]          | `StreamEvent` – the decoded item type of a streaming reply          |
//! | [`provider`]       | `ChatStreamProvider` – the seam a backend implements                |
//! | [`render`]         | `TurnRenderer` – the seam a front-end (terminal, web) implements    |
//! | [`turn`]           | `run_turn` – the waiting/streaming/cancellation state machine       |
//! | [`error`]          | `ChatError` and the crate-wide `Result` alias                       |
//!
//! ## Design philosophy
//!
//! * **One suspension point** – the turn loop waits for the next event, a
//!   refresh tick or cancellation in a single `select!`, so there is no
//!   duplicated "first chunk" handling and no dangling connection on any
//!   exit path.
//! * **Seams as traits** – backends and renderers plug in through small
//!   traits, so the whole loop is unit-testable with scripted streams and a
//!   recording renderer, no network or terminal required.
//! * **Partial output is never lost** – completion, failure and cancellation
//!   all append whatever accumulated to the conversation.

pub mod conversation;
pub mod error;
pub mod event;
pub mod message;
pub mod provider;
pub mod render;
pub mod turn;

pub use conversation::Conversation;
pub use error::{ChatError, Result};
pub use event::StreamEvent;
pub use message::{Message, Role};
pub use provider::ChatStreamProvider;
pub use render::TurnRenderer;
pub use turn::{run_turn, TurnEnding, TurnOutcome, REFRESH_INTERVAL};
