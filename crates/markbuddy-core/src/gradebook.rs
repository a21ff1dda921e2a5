//! In-memory gradebook that keeps cached GPAs and CGPAs consistent.
//!
//! Every mutating operation runs the recomputation cascade explicitly:
//! component change → course GPA → semester CGPA. Overall CGPA is derived on
//! demand from the cached semester values. Mutation goes through `&mut self`,
//! so there is only ever one writer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::model::{Component, ComponentKind, Course, Semester};
use crate::statistics::overall_cgpa;

/// Name, credit hours and lab flag of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub name: String,
    pub credit_hours: f64,
    #[serde(default)]
    pub has_lab: bool,
}

impl CourseDetails {
    pub fn new(name: impl Into<String>, credit_hours: f64, has_lab: bool) -> Self {
        Self {
            name: name.into(),
            credit_hours,
            has_lab,
        }
    }

    fn validate(&self) -> Result<(), RecordError> {
        if !self.credit_hours.is_finite() || self.credit_hours < 0.0 {
            return Err(RecordError::InvalidCreditHours {
                course: self.name.clone(),
                credit_hours: self.credit_hours,
            });
        }
        Ok(())
    }
}

/// Semesters, courses and components with their derived grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    semesters: Vec<Semester>,
    next_id: u64,
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Gradebook {
    pub fn new() -> Self {
        Self {
            semesters: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a gradebook from existing semesters.
    ///
    /// Entities with id 0 get fresh ids. Courses with components are always
    /// regraded; a course without components keeps a stored GPA. Semesters
    /// with courses get a fresh CGPA, empty ones keep whatever was stored.
    pub fn from_semesters(semesters: Vec<Semester>) -> Self {
        let max_id = semesters
            .iter()
            .flat_map(|s| {
                std::iter::once(s.id).chain(s.courses.iter().flat_map(|c| {
                    std::iter::once(c.id).chain(c.components.iter().map(|comp| comp.id))
                }))
            })
            .max()
            .unwrap_or(0);

        let mut book = Self {
            semesters,
            next_id: max_id + 1,
        };

        let mut semesters = std::mem::take(&mut book.semesters);
        for semester in &mut semesters {
            if semester.id == 0 {
                semester.id = book.allocate_id();
            }
            for course in &mut semester.courses {
                if course.id == 0 {
                    course.id = book.allocate_id();
                }
                for component in &mut course.components {
                    if component.id == 0 {
                        component.id = book.allocate_id();
                    }
                }
                if !course.components.is_empty() || course.gpa.is_none() {
                    course.refresh_gpa();
                }
            }
            if !semester.courses.is_empty() {
                semester.refresh_cgpa();
            }
        }
        book.semesters = semesters;
        book
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn into_semesters(self) -> Vec<Semester> {
        self.semesters
    }

    pub fn semester(&self, id: u64) -> Result<&Semester, RecordError> {
        self.semesters
            .iter()
            .find(|s| s.id == id)
            .ok_or(RecordError::SemesterNotFound(id))
    }

    fn semester_mut(&mut self, id: u64) -> Result<&mut Semester, RecordError> {
        self.semesters
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RecordError::SemesterNotFound(id))
    }

    /// The most recently added semester.
    pub fn current_semester(&self) -> Option<&Semester> {
        self.semesters.iter().max_by_key(|s| s.id)
    }

    pub fn add_semester(&mut self, name: impl Into<String>) -> u64 {
        let mut semester = Semester::new(name);
        semester.id = self.allocate_id();
        let id = semester.id;
        self.semesters.push(semester);
        tracing::debug!(semester_id = id, "added semester");
        id
    }

    pub fn rename_semester(&mut self, id: u64, name: impl Into<String>) -> Result<(), RecordError> {
        self.semester_mut(id)?.name = name.into();
        Ok(())
    }

    /// Remove a semester together with its courses and their components.
    pub fn remove_semester(&mut self, id: u64) -> Result<Semester, RecordError> {
        let index = self
            .semesters
            .iter()
            .position(|s| s.id == id)
            .ok_or(RecordError::SemesterNotFound(id))?;
        Ok(self.semesters.remove(index))
    }

    pub fn course(&self, id: u64) -> Result<&Course, RecordError> {
        self.all_courses()
            .find(|c| c.id == id)
            .ok_or(RecordError::CourseNotFound(id))
    }

    pub fn courses_for_semester(&self, semester_id: u64) -> Result<&[Course], RecordError> {
        Ok(&self.semester(semester_id)?.courses)
    }

    pub fn all_courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    /// Locate a course as (semester index, course index).
    fn locate_course(&self, id: u64) -> Result<(usize, usize), RecordError> {
        self.semesters
            .iter()
            .enumerate()
            .find_map(|(si, s)| {
                s.courses
                    .iter()
                    .position(|c| c.id == id)
                    .map(|ci| (si, ci))
            })
            .ok_or(RecordError::CourseNotFound(id))
    }

    /// Locate a component as (semester index, course index, component index).
    fn locate_component(&self, id: u64) -> Result<(usize, usize, usize), RecordError> {
        for (si, semester) in self.semesters.iter().enumerate() {
            for (ci, course) in semester.courses.iter().enumerate() {
                if let Some(pi) = course.components.iter().position(|c| c.id == id) {
                    return Ok((si, ci, pi));
                }
            }
        }
        Err(RecordError::ComponentNotFound(id))
    }

    /// Regrade one course and then its semester.
    fn recompute(&mut self, semester_index: usize, course_index: usize) {
        let semester = &mut self.semesters[semester_index];
        let course = &mut semester.courses[course_index];
        let gpa = course.refresh_gpa();
        tracing::debug!(course_id = course.id, gpa, "recomputed course GPA");
        let cgpa = semester.refresh_cgpa();
        tracing::debug!(semester_id = semester.id, cgpa, "recomputed semester CGPA");
    }

    /// Add a course with its components and grade it.
    pub fn add_course(
        &mut self,
        semester_id: u64,
        details: CourseDetails,
        components: Vec<Component>,
    ) -> Result<u64, RecordError> {
        details.validate()?;
        self.semester(semester_id)?;

        let mut course = Course::new(details.name, details.credit_hours, details.has_lab);
        course.id = self.allocate_id();
        for mut component in components {
            component.id = self.allocate_id();
            course.components.push(component);
        }
        course.refresh_gpa();

        let id = course.id;
        let semester = self.semester_mut(semester_id)?;
        semester.courses.push(course);
        semester.refresh_cgpa();
        tracing::debug!(course_id = id, semester_id, "added course");
        Ok(id)
    }

    /// Add a course whose GPA is already known and that has no components.
    ///
    /// The supplied GPA stays cached until a component is added.
    pub fn add_graded_course(
        &mut self,
        semester_id: u64,
        details: CourseDetails,
        gpa: f64,
    ) -> Result<u64, RecordError> {
        details.validate()?;
        if !(0.0..=4.0).contains(&gpa) {
            return Err(RecordError::InvalidGpa {
                course: details.name,
                gpa,
            });
        }
        self.semester(semester_id)?;

        let mut course = Course::new(details.name, details.credit_hours, details.has_lab);
        course.id = self.allocate_id();
        course.gpa = Some(gpa);

        let id = course.id;
        let semester = self.semester_mut(semester_id)?;
        semester.courses.push(course);
        semester.refresh_cgpa();
        Ok(id)
    }

    /// Change a course's name, credit hours or lab flag and regrade it.
    ///
    /// A course without components keeps its supplied GPA; only the semester
    /// CGPA is refreshed for the new credit hours.
    pub fn update_course(&mut self, id: u64, details: CourseDetails) -> Result<(), RecordError> {
        details.validate()?;
        let (si, ci) = self.locate_course(id)?;
        let course = &mut self.semesters[si].courses[ci];
        course.name = details.name;
        course.credit_hours = details.credit_hours;
        course.has_lab = details.has_lab;
        if course.components.is_empty() && course.gpa.is_some() {
            self.semesters[si].refresh_cgpa();
        } else {
            self.recompute(si, ci);
        }
        Ok(())
    }

    /// Remove a course and its components; the semester CGPA is recomputed.
    pub fn remove_course(&mut self, id: u64) -> Result<Course, RecordError> {
        let (si, ci) = self.locate_course(id)?;
        let semester = &mut self.semesters[si];
        let course = semester.courses.remove(ci);
        semester.refresh_cgpa();
        tracing::debug!(course_id = id, semester_id = semester.id, "removed course");
        Ok(course)
    }

    /// Return the GPA of a course, grading it first if nothing is cached.
    ///
    /// Every mutation and load leaves courses graded, so this is normally a
    /// plain lookup.
    pub fn ensure_course_gpa(&mut self, id: u64) -> Result<f64, RecordError> {
        let (si, ci) = self.locate_course(id)?;
        if let Some(gpa) = self.semesters[si].courses[ci].gpa {
            return Ok(gpa);
        }
        self.recompute(si, ci);
        Ok(self.semesters[si].courses[ci].gpa.unwrap_or_default())
    }

    pub fn add_component(
        &mut self,
        course_id: u64,
        kind: ComponentKind,
        obtained_marks: f64,
        total_marks: f64,
    ) -> Result<u64, RecordError> {
        let (si, ci) = self.locate_course(course_id)?;
        let mut component = Component::new(kind, obtained_marks, total_marks);
        component.id = self.allocate_id();
        let id = component.id;
        self.semesters[si].courses[ci].components.push(component);
        self.recompute(si, ci);
        Ok(id)
    }

    pub fn update_component(
        &mut self,
        id: u64,
        obtained_marks: f64,
        total_marks: f64,
    ) -> Result<(), RecordError> {
        let (si, ci, pi) = self.locate_component(id)?;
        let component = &mut self.semesters[si].courses[ci].components[pi];
        component.obtained_marks = obtained_marks;
        component.total_marks = total_marks;
        self.recompute(si, ci);
        Ok(())
    }

    pub fn remove_component(&mut self, id: u64) -> Result<Component, RecordError> {
        let (si, ci, pi) = self.locate_component(id)?;
        let component = self.semesters[si].courses[ci].components.remove(pi);
        self.recompute(si, ci);
        Ok(component)
    }

    /// Mean CGPA over the semesters that have one.
    pub fn overall_cgpa(&self) -> Option<f64> {
        overall_cgpa(&self.semesters)
    }

    /// Save a JSON snapshot of the gradebook.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize gradebook")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write gradebook to {}", path.display()))?;
        Ok(())
    }

    /// Load a JSON snapshot written by [`Gradebook::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read gradebook from {}", path.display()))?;
        let book: Gradebook =
            serde_json::from_str(&content).context("failed to parse gradebook JSON")?;
        Ok(Self::from_semesters(book.semesters))
    }
}
