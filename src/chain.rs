//! Ordered provider fallback.
//!
//! A host engine usually consults several providers per field (a YAML file,
//! then the environment, then defaults). [`ProviderChain`] encodes the
//! fallback rule: a recoverable error moves on to the next provider, anything
//! else stops the field immediately.

use crate::error::YamlfigError;
use crate::field::Field;
use crate::provider::Provider;

/// Providers in priority order: first = tried first.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider at the lowest priority.
    pub fn with(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Initialize every provider, stopping at the first failure.
    pub fn init(&mut self) -> Result<(), YamlfigError> {
        for provider in &mut self.providers {
            provider.init()?;
            tracing::debug!(provider = provider.name(), "provider initialized");
        }
        Ok(())
    }

    /// Fill `field` from the first provider that has a value for it.
    ///
    /// When every provider falls through, the last provider's error is
    /// returned. An empty chain reports [`YamlfigError::MissingTag`].
    pub fn provide(&self, field: &mut dyn Field) -> Result<(), YamlfigError> {
        let mut last = None;
        for provider in &self.providers {
            match provider.provide(field) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_recoverable() => {
                    tracing::trace!(
                        provider = provider.name(),
                        field = field.name(),
                        "falling through: {err}"
                    );
                    last = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last.unwrap_or_else(|| YamlfigError::MissingTag {
            provider: "ProviderChain".into(),
            tag: field.name().into(),
        }))
    }
}
