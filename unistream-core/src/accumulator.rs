//! Usage and provider-metadata accumulation.

use unistream_spec::{ProviderMetadata, Usage};

/// Final, read-only view handed to the `finish` part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UsageSnapshot {
    pub usage: Usage,
    pub provider_metadata: Option<ProviderMetadata>,
}

/// Last-write-wins merge of usage and provider metadata.
///
/// Missing fields and JSON `null`s never clobber a previously known value.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    usage: Usage,
    provider_metadata: ProviderMetadata,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_usage(&mut self, usage: &Usage) {
        self.usage.merge_from(usage);
    }

    /// Merge a `{provider: {field: value}}` bag.
    ///
    /// Provider objects are merged field by field; other values are replaced.
    pub fn merge_provider_metadata(&mut self, metadata: ProviderMetadata) {
        for (provider, value) in metadata {
            if value.is_null() {
                continue;
            }
            match (self.provider_metadata.get_mut(&provider), value) {
                (Some(serde_json::Value::Object(existing)), serde_json::Value::Object(fresh)) => {
                    for (field, v) in fresh {
                        if !v.is_null() {
                            existing.insert(field, v);
                        }
                    }
                }
                (_, serde_json::Value::Object(fresh)) => {
                    let fresh: serde_json::Map<_, _> =
                        fresh.into_iter().filter(|(_, v)| !v.is_null()).collect();
                    self.provider_metadata
                        .insert(provider, serde_json::Value::Object(fresh));
                }
                (_, other) => {
                    self.provider_metadata.insert(provider, other);
                }
            }
        }
    }

    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    pub fn provider_metadata(&self) -> &ProviderMetadata {
        &self.provider_metadata
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            usage: self.usage.clone(),
            provider_metadata: (!self.provider_metadata.is_empty())
                .then(|| self.provider_metadata.clone()),
        }
    }
}
