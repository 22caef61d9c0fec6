use crate::workflows::catalog::{QosVector, ServiceRecord};
use std::collections::HashMap;

/// Injective mapping from service name to a dense integer id starting at 1.
///
/// The attributes of the record that first introduced a name are stored with the id, so
/// plan files can be written without going back to catalog positions.
#[derive(Debug, Clone, Default)]
pub struct ServiceIdRegistry {
    ids: HashMap<String, u32>,
    details: Vec<QosVector>,
}

impl ServiceIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for the record's name, assigning the next one on first sight.
    pub fn assign(&mut self, record: &ServiceRecord) -> u32 {
        if let Some(&id) = self.ids.get(&record.name) {
            return id;
        }

        self.details.push(record.attributes);
        let id = self.details.len() as u32;
        self.ids.insert(record.name.clone(), id);
        id
    }

    pub fn id_for(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    pub fn attributes(&self, id: u32) -> Option<&QosVector> {
        let position = usize::try_from(id).ok()?.checked_sub(1)?;
        self.details.get(position)
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn reset(&mut self) {
        self.ids.clear();
        self.details.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, value: f64) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            attributes: QosVector::splat(value),
            name: name.to_string(),
        }
    }

    #[test]
    fn same_name_maps_to_same_id() {
        let mut registry = ServiceIdRegistry::new();

        assert_eq!(registry.assign(&record("S1", "alpha", 1.0)), 1);
        assert_eq!(registry.assign(&record("S2", "beta", 2.0)), 2);
        assert_eq!(registry.assign(&record("S3", "alpha", 3.0)), 1);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.id_for("beta"), Some(2));
    }

    #[test]
    fn keeps_attributes_of_first_record_per_name() {
        let mut registry = ServiceIdRegistry::new();
        registry.assign(&record("S4", "alpha", 4.0));
        registry.assign(&record("S9", "alpha", 9.0));

        assert_eq!(registry.attributes(1), Some(&QosVector::splat(4.0)));
        assert_eq!(registry.attributes(0), None);
        assert_eq!(registry.attributes(2), None);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut registry = ServiceIdRegistry::new();
        registry.assign(&record("S1", "alpha", 1.0));
        registry.assign(&record("S2", "beta", 1.0));
        registry.reset();

        assert!(registry.is_empty());
        assert_eq!(registry.assign(&record("S2", "beta", 1.0)), 1);
    }
}
