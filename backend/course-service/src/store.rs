//! Process-local course repository.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{Course, UpdateCourse};

#[derive(Default)]
pub struct CourseStore {
    by_id: RwLock<HashMap<Uuid, Course>>,
}

impl CourseStore {
    pub fn insert(&self, course: Course) {
        self.by_id
            .write()
            .expect("course store lock poisoned")
            .insert(course.id, course);
    }

    pub fn list(&self) -> Vec<Course> {
        self.by_id
            .read()
            .expect("course store lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<Course> {
        self.by_id
            .read()
            .expect("course store lock poisoned")
            .get(&id)
            .cloned()
    }

    pub fn update(&self, id: Uuid, changes: UpdateCourse) -> Option<Course> {
        let mut records = self.by_id.write().expect("course store lock poisoned");
        let course = records.get_mut(&id)?;
        if let Some(name) = changes.name {
            course.name = name;
        }
        if let Some(code) = changes.code {
            course.code = code;
        }
        if let Some(description) = changes.description {
            course.description = Some(description);
        }
        Some(course.clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<Course> {
        self.by_id
            .write()
            .expect("course store lock poisoned")
            .remove(&id)
    }
}
