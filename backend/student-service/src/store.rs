//! Process-local student repository.
//!
//! Persistence proper is an external collaborator; this store exposes only
//! fetch-by-email, persist, list, and remove. Lock scopes never cross an
//! await point.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::Student;

#[derive(Default)]
pub struct StudentStore {
    by_email: RwLock<HashMap<String, Student>>,
}

impl StudentStore {
    /// Returns false when a record with the same email already exists.
    pub fn insert(&self, student: Student) -> bool {
        let mut records = self.by_email.write().expect("student store lock poisoned");
        if records.contains_key(&student.email) {
            return false;
        }
        records.insert(student.email.clone(), student);
        true
    }

    pub fn list(&self) -> Vec<Student> {
        self.by_email
            .read()
            .expect("student store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, email: &str) -> Option<Student> {
        self.by_email
            .read()
            .expect("student store lock poisoned")
            .get(email)
            .cloned()
    }

    pub fn update(
        &self,
        email: &str,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Option<Student> {
        let mut records = self.by_email.write().expect("student store lock poisoned");
        let student = records.get_mut(email)?;
        if let Some(name) = name {
            student.name = name;
        }
        if let Some(password_hash) = password_hash {
            student.password = password_hash;
        }
        Some(student.clone())
    }

    pub fn remove(&self, email: &str) -> Option<Student> {
        self.by_email
            .write()
            .expect("student store lock poisoned")
            .remove(email)
    }
}
