//! Process-local enrollment repository.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::Enrollment;

#[derive(Default)]
pub struct EnrollmentStore {
    by_id: RwLock<HashMap<Uuid, Enrollment>>,
}

impl EnrollmentStore {
    /// Returns false when the (student, course) pair is already enrolled.
    pub fn insert(&self, enrollment: Enrollment) -> bool {
        let mut records = self.by_id.write().expect("enrollment store lock poisoned");
        let duplicate = records.values().any(|e| {
            e.student_id == enrollment.student_id && e.course_id == enrollment.course_id
        });
        if duplicate {
            return false;
        }
        records.insert(enrollment.id, enrollment);
        true
    }

    pub fn list(&self) -> Vec<Enrollment> {
        self.by_id
            .read()
            .expect("enrollment store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<Enrollment> {
        self.by_id
            .read()
            .expect("enrollment store lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn list_by_student(&self, student_id: Uuid) -> Vec<Enrollment> {
        self.by_id
            .read()
            .expect("enrollment store lock poisoned")
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn list_by_course(&self, course_id: Uuid) -> Vec<Enrollment> {
        self.by_id
            .read()
            .expect("enrollment store lock poisoned")
            .values()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn remove(&self, id: Uuid) -> Option<Enrollment> {
        self.by_id
            .write()
            .expect("enrollment store lock poisoned")
            .remove(&id)
    }
}
