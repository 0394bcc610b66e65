//! Process-local professor repository.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::Professor;

#[derive(Default)]
pub struct ProfessorStore {
    by_id: RwLock<HashMap<Uuid, Professor>>,
}

impl ProfessorStore {
    /// Returns false when a record with the same email already exists.
    pub fn insert(&self, professor: Professor) -> bool {
        let mut records = self.by_id.write().expect("professor store lock poisoned");
        if records.values().any(|p| p.email == professor.email) {
            return false;
        }
        records.insert(professor.id, professor);
        true
    }

    pub fn list(&self) -> Vec<Professor> {
        self.by_id
            .read()
            .expect("professor store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<Professor> {
        self.by_id
            .read()
            .expect("professor store lock poisoned")
            .get(&id)
            .cloned()
    }
}
