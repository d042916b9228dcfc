//! Application layer for the AgriContract demo.
//!
//! [`navigator`] is the page state machine, [`screens`] hold per-page state,
//! [`simulation`] stands in for the other party, and [`controller`] ties them
//! together for a frontend.

pub mod controller;
pub mod error;
pub mod forms;
pub mod frontend;
pub mod intents;
pub mod navigator;
pub mod screens;
pub mod simulation;
pub mod tasks;

pub use controller::{AppController, StatusLevel, StatusLine, Theme};
pub use error::{AppError, AppResult};
pub use intents::{Intent, ScreenAction};
pub use navigator::{Destination, NavEvent, Navigator, PageData, PageId, Session};
pub use simulation::{Counterparty, ListingDesk, PaymentProcessor, Services};
