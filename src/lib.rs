//! newsline — Google News headlines in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ LoadMsg   ┌──────────┐  draw()  ┌──────────┐
//! │ worker.rs │ ────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (threads) │ (channel) │ (state)  │          │ (render) │
//! └───────────┘           └──────────┘          └──────────┘
//!       ▲  LoadTicket          ▲
//!       └──────────────────────┤ handle_key_event()
//!                         ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `FeedSource` trait, the Google News client, the
//!   category table and the RSS parser.
//! * **`state`** — load / reload state machine and article → list-item mapping.
//! * **`worker`** — runs each fetch on a background thread.
//! * **`app`** — owns presentation state (state machine, scroll position).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.

pub mod app;
pub mod input;
pub mod source;
pub mod state;
pub mod ui;
pub mod worker;
