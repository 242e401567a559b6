use crate::models::{AverageSummary, Course, Scale};
use crate::scale;

// Unresolved grades and `U` drop out of both sums.
pub fn compute_average(courses: &[Course], scale: Scale) -> f64 {
    let (total, weight) = weighted_totals(courses, scale);
    if weight > 0.0 {
        total / weight
    } else {
        0.0
    }
}

fn weighted_totals(courses: &[Course], scale: Scale) -> (f64, f64) {
    let mut total = 0.0;
    let mut weight = 0.0;

    for course in courses {
        let score = scale::resolve_score(&course.grade, scale);
        if score > 0.0 {
            total += score * course.credits;
            weight += course.credits;
        }
    }

    (total, weight)
}

pub fn summarize(courses: &[Course], scale: Scale) -> AverageSummary {
    let (_, weight) = weighted_totals(courses, scale);
    let counted = courses
        .iter()
        .filter(|course| scale::resolve_score(&course.grade, scale) > 0.0)
        .count();
    let average = compute_average(courses, scale);

    AverageSummary {
        scale,
        average,
        nearest_label: (weight > 0.0).then(|| scale::nearest_label(average, scale)),
        counted_courses: counted,
        excluded_courses: courses.len() - counted,
        counted_credits: weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn course(grade: &str, credits: f64) -> Course {
        Course::new("Mathematik", grade, credits)
    }

    #[test]
    fn empty_roster_averages_to_zero() {
        assert_eq!(compute_average(&[], Scale::Descending), 0.0);
        assert_eq!(compute_average(&[], Scale::Ascending), 0.0);
    }

    #[test]
    fn zero_credit_roster_averages_to_zero() {
        let courses = vec![course("2", 0.0), course("3+", 0.0)];
        assert_eq!(compute_average(&courses, Scale::Descending), 0.0);
    }

    #[test]
    fn negative_total_weight_averages_to_zero() {
        let courses = vec![course("2", 1.0), course("3", -3.0)];
        assert_eq!(compute_average(&courses, Scale::Descending), 0.0);
    }

    #[test]
    fn credits_cancelling_to_zero_average_to_zero() {
        let courses = vec![course("1", 2.0), course("4-", -0.5), course("2+", -1.5)];
        assert_eq!(compute_average(&courses, Scale::Descending), 0.0);
        assert_eq!(summarize(&courses, Scale::Descending).nearest_label, None);
    }

    #[test]
    fn weights_scores_by_credits() {
        let courses = vec![course("1", 3.0), course("4", 1.0)];
        let expected = (1.0 * 3.0 + 4.0 * 1.0) / 4.0;
        assert!((compute_average(&courses, Scale::Descending) - expected).abs() < EPSILON);
    }

    #[test]
    fn unresolved_and_failing_grades_are_excluded() {
        let courses = vec![course("7", 2.0), course("U", 5.0), course("x", 1.0)];
        assert!((compute_average(&courses, Scale::Ascending) - 7.0).abs() < EPSILON);

        let summary = summarize(&courses, Scale::Ascending);
        assert_eq!(summary.counted_courses, 1);
        assert_eq!(summary.excluded_courses, 2);
        assert!((summary.counted_credits - 2.0).abs() < EPSILON);
    }

    #[test]
    fn all_invalid_grades_average_to_zero() {
        let courses = vec![course("A", 2.0), course("B", 1.0)];
        assert_eq!(compute_average(&courses, Scale::Descending), 0.0);
        assert_eq!(summarize(&courses, Scale::Descending).nearest_label, None);
    }

    #[test]
    fn reordering_does_not_change_the_average() {
        let courses = vec![
            course("1-", 2.0),
            course("3", 1.5),
            course("5+", 0.5),
            course("2+", 4.0),
        ];
        let forward = compute_average(&courses, Scale::Descending);
        let mut reversed = courses.clone();
        reversed.reverse();
        let mut rotated = courses.clone();
        rotated.rotate_left(2);

        assert!((forward - compute_average(&reversed, Scale::Descending)).abs() < EPSILON);
        assert!((forward - compute_average(&rotated, Scale::Descending)).abs() < EPSILON);
    }

    #[test]
    fn three_course_roster_rounds_to_the_table_nearest() {
        let courses = vec![course("2", 1.0), course("1-", 1.0), course("2-", 1.0)];
        let average = compute_average(&courses, Scale::Descending);
        assert!((average - (2.0 + 1.3 + 2.3) / 3.0).abs() < EPSILON);

        let expected = scale::entries(Scale::Descending)
            .iter()
            .fold(None::<(&str, f64)>, |best, (label, score)| {
                let diff = (average - score).abs();
                match best {
                    Some((_, best_diff)) if best_diff <= diff => best,
                    _ => Some((*label, diff)),
                }
            })
            .map(|(label, _)| label);

        let summary = summarize(&courses, Scale::Descending);
        assert_eq!(summary.nearest_label, expected);
        assert_eq!(summary.nearest_label, Some("2"));
    }
}
