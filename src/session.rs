use tracing::debug;
use uuid::Uuid;

use crate::average;
use crate::errors::RosterError;
use crate::models::{AverageSummary, Course, CourseEdit, GradeLevel, Scale};
use crate::remap::{self, Direction};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub scale: Scale,
    pub level: Option<GradeLevel>,
    pub courses: Vec<Course>,
}

impl Session {
    pub fn new(scale: Scale, level: Option<GradeLevel>, courses: Vec<Course>) -> Self {
        Session {
            scale,
            level,
            courses,
        }
    }

    pub fn add_course(&mut self, course: Course) -> Uuid {
        let id = course.id;
        debug!(%id, name = %course.name, grade = %course.grade, "adding course");
        self.courses.push(course);
        id
    }

    pub fn update_course(&mut self, id: Uuid, edit: CourseEdit) -> Result<&Course, RosterError> {
        let course = self
            .courses
            .iter_mut()
            .find(|course| course.id == id)
            .ok_or(RosterError::CourseNotFound(id))?;

        if let Some(name) = edit.name {
            course.name = name;
        }
        if let Some(grade) = edit.grade {
            course.grade = grade;
        }
        if let Some(credits) = edit.credits {
            course.credits = credits;
        }

        debug!(%id, "updated course");
        Ok(&*course)
    }

    pub fn remove_course(&mut self, id: Uuid) -> Result<Course, RosterError> {
        let index = self
            .courses
            .iter()
            .position(|course| course.id == id)
            .ok_or(RosterError::CourseNotFound(id))?;
        Ok(self.courses.remove(index))
    }

    pub fn summary(&self) -> AverageSummary {
        average::summarize(&self.courses, self.scale)
    }

    // Returns a new snapshot; `self` is left as it was.
    pub fn switched_to(&self, to: Scale) -> Session {
        let Some(direction) = Direction::between(self.scale, to) else {
            return self.clone();
        };

        let courses = self
            .courses
            .iter()
            .map(|course| {
                let grade = remap::remap_label(&course.grade, direction);
                Course {
                    id: course.id,
                    name: remap::translate_subject(&course.name, to),
                    grade: grade.to_string(),
                    credits: course.credits,
                }
            })
            .collect();

        Session {
            scale: to,
            level: self.level.map(|level| level.remapped(to)),
            courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale;

    fn sample() -> Session {
        Session::new(
            Scale::Descending,
            GradeLevel::parse(Scale::Descending, "10. Klasse"),
            vec![
                Course::new("Mathematik", "1-", 4.0),
                Course::new("Physik", "3", 2.0),
                Course::new("Robotik AG", "6", 1.0),
            ],
        )
    }

    #[test]
    fn add_edit_remove_lifecycle() {
        let mut session = sample();
        let id = session.add_course(Course::new("Chemie", "2", 2.0));
        assert_eq!(session.courses.len(), 4);

        let edited = session
            .update_course(
                id,
                CourseEdit {
                    grade: Some("2+".to_string()),
                    ..CourseEdit::default()
                },
            )
            .unwrap();
        assert_eq!(edited.grade, "2+");
        assert_eq!(edited.name, "Chemie");

        let removed = session.remove_course(id).unwrap();
        assert_eq!(removed.grade, "2+");
        assert_eq!(session.courses.len(), 3);
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut session = sample();
        let ghost = Uuid::new_v4();
        assert!(matches!(
            session.remove_course(ghost),
            Err(RosterError::CourseNotFound(id)) if id == ghost
        ));
        assert!(session.update_course(ghost, CourseEdit::default()).is_err());
    }

    #[test]
    fn switching_remaps_grades_names_and_level() {
        let session = sample();
        let switched = session.switched_to(Scale::Ascending);

        assert_eq!(switched.scale, Scale::Ascending);
        assert_eq!(switched.level.map(|l| l.to_string()).as_deref(), Some("Year 11"));
        assert_eq!(switched.courses[0].name, "Mathematics");
        assert_eq!(switched.courses[0].grade, "8");
        assert_eq!(switched.courses[1].grade, "6");
        assert_eq!(switched.courses[2].name, "Robotik AG");
        assert_eq!(switched.courses[2].grade, "U");
        assert_eq!(switched.courses[0].id, session.courses[0].id);

        // the original snapshot is untouched
        assert_eq!(session.courses[0].grade, "1-");
    }

    #[test]
    fn switching_back_yields_valid_labels() {
        let back = sample()
            .switched_to(Scale::Ascending)
            .switched_to(Scale::Descending);
        assert_eq!(back.scale, Scale::Descending);
        for course in &back.courses {
            assert!(scale::is_valid_label(&course.grade, Scale::Descending));
        }
        assert_eq!(back.courses[0].name, "Mathematik");
    }

    #[test]
    fn unknown_grades_fall_back_on_switch() {
        let session = Session::new(
            Scale::Ascending,
            None,
            vec![Course::new("Art", "A*", 1.0)],
        );
        let switched = session.switched_to(Scale::Descending);
        assert_eq!(switched.courses[0].grade, Direction::ToDescending.fallback());
        assert_eq!(switched.courses[0].name, "Kunst");
    }

    #[test]
    fn switching_to_the_same_scale_is_identity() {
        let session = sample();
        assert_eq!(session.switched_to(Scale::Descending), session);
    }

    #[test]
    fn summary_uses_active_scale() {
        let summary = sample().summary();
        assert_eq!(summary.counted_courses, 3);
        let expected = (1.3 * 4.0 + 3.0 * 2.0 + 6.0 * 1.0) / 7.0;
        assert!((summary.average - expected).abs() < 1e-9);
    }
}
