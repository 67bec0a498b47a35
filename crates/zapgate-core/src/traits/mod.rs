// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the lifecycle core and its external collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod backend;
pub mod store;
pub mod transport;

// Re-export all traits at the traits module level for convenience.
pub use backend::ReasoningBackend;
pub use store::CredentialStore;
pub use transport::{TransportConnection, TransportDriver, TransportHandle};
