//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::Provider`]
//! that generates synthetic content for one source domain.

pub mod official;
pub mod reference;
pub mod social;
pub mod synth;

use std::sync::Arc;

pub use official::OfficialProvider;
pub use reference::ReferenceProvider;
pub use social::SocialProvider;

use crate::config::ProviderSettings;
use crate::provider::Provider;
use crate::types::ProviderKind;

/// Instantiate one provider of the given kind.
pub fn build_provider(kind: ProviderKind, settings: &ProviderSettings) -> Arc<dyn Provider> {
    let latency = settings.simulated_latency_ms;
    match kind {
        ProviderKind::Official => Arc::new(OfficialProvider::new(latency)),
        ProviderKind::Social => Arc::new(SocialProvider::new(latency)),
        ProviderKind::Reference => Arc::new(ReferenceProvider::new(latency)),
    }
}

/// Build the ordered `(name, provider)` list for the enabled providers.
pub fn build_providers(settings: &ProviderSettings) -> Vec<(String, Arc<dyn Provider>)> {
    settings
        .enabled
        .iter()
        .map(|kind| (kind.name().to_owned(), build_provider(*kind, settings)))
        .collect()
}
