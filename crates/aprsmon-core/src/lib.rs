//! # aprsmon-core - Core Domain Types
//!
//! Foundation crate for the APRS monitor. Provides push-channel event types,
//! the status projector, the bounded message log, the configuration record,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Events (`events`)
//! - [`StatusEvent`] - A named push-channel event with its JSON payload
//! - [`EventKind`] - Decoded topic name
//!
//! ### Status Projection (`status`)
//! - [`project()`] - Pure mapping from an event to a [`RenderInstruction`]
//! - [`Subsystem`], [`SubsystemState`], [`StatusColor`] - Rendered subsystem state
//! - [`Notification`] - One-shot operator notification
//!
//! ### Message Log (`message_log`)
//! - [`MessageLog`] - Bounded, order-preserving log of received messages
//! - [`MAX_ENTRIES`] - Log capacity
//!
//! ### Configuration Record (`config_record`)
//! - [`ConfigRecord`], [`ConfigValue`] - Typed device configuration
//! - [`CONFIG_FIELDS`] - Known keys, labels and kinds
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use aprsmon_core::prelude::*;
//! ```

pub mod config_record;
pub mod error;
pub mod events;
pub mod logging;
pub mod message_log;
pub mod prelude;
pub mod ring_buffer;
pub mod status;

// Re-export commonly used types at crate root for convenience
pub use config_record::{
    field_spec, format_number, parse_input, ConfigRecord, ConfigValue, FieldKind, FieldSpec,
    CONFIG_FIELDS,
};
pub use error::{Error, Result, ResultExt};
pub use events::{EventKind, StatusEvent};
pub use message_log::{MessageEntry, MessageLog, MAX_ENTRIES};
pub use ring_buffer::RingBuffer;
pub use status::{
    project, project_subsystem, Notification, NotificationLevel, RenderInstruction, StatusColor,
    Subsystem, SubsystemState,
};
