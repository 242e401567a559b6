use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::Course;
use crate::scale;
use crate::session::Session;

fn course_line(course: &Course, session: &Session) -> String {
    let score = scale::resolve_score(&course.grade, session.scale);
    if score > 0.0 {
        format!(
            "| {} | {} | {:.1} | {:.1} |",
            course.name, course.grade, score, course.credits
        )
    } else {
        format!(
            "| {} | {} | excluded | {:.1} |",
            course.name, course.grade, course.credits
        )
    }
}

pub fn build_report(session: &Session, generated_on: NaiveDate) -> String {
    let summary = session.summary();
    let mut output = String::new();

    let _ = writeln!(output, "# Grade Report");
    let level = session
        .level
        .map(|level| level.to_string())
        .unwrap_or_else(|| "no school year set".to_string());
    let _ = writeln!(
        output,
        "Generated on {} for {} ({} scale)",
        generated_on, level, session.scale
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Courses");

    if session.courses.is_empty() {
        let _ = writeln!(output, "No courses recorded yet.");
    } else {
        let _ = writeln!(output, "| Course | Grade | Score | Credits |");
        let _ = writeln!(output, "|---|---|---|---|");
        for course in &session.courses {
            let _ = writeln!(output, "{}", course_line(course, session));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weighted Average");

    match summary.nearest_label {
        Some(label) => {
            let _ = writeln!(
                output,
                "- Average {:.2} across {:.1} credits, closest grade {}",
                summary.average, summary.counted_credits, label
            );
        }
        None => {
            let _ = writeln!(output, "- No graded courses to average.");
        }
    }
    if summary.excluded_courses > 0 {
        let _ = writeln!(
            output,
            "- {} course(s) left out: ungraded, failing or off-scale",
            summary.excluded_courses
        );
    }

    let other = session.switched_to(session.scale.other());
    let _ = writeln!(output);
    let _ = writeln!(output, "## In the {} Scale", other.scale);

    if other.courses.is_empty() {
        let _ = writeln!(output, "No courses recorded yet.");
    } else {
        for (before, after) in session.courses.iter().zip(other.courses.iter()) {
            let _ = writeln!(
                output,
                "- {}: {} -> {} ({})",
                before.name, before.grade, after.grade, after.name
            );
        }
        if let Some(level) = other.level {
            let _ = writeln!(output, "- School year: {}", level);
        }
    }

    output
}
