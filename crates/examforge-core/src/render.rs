//! Printable Markdown pages: one exam sheet per version and its answer key.
//!
//! The sheet carries the institution header from [`ExamSettings`], the
//! version badge, the student fields, every question with its points and
//! lettered options, ruled space for essays and a footer with the totals.
//! The key page repeats the header, lists the correct letters and records
//! how the versions were shuffled.

use chrono::{Datelike, NaiveDate};

use crate::answer_key::{option_letter, AnswerKey};
use crate::model::{ExamSettings, ExamVersion, QuestionKind, ShuffleMode};

/// Ruled lines left under an essay question.
const ESSAY_LINES: usize = 8;

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// `2026-10-16` becomes `16 October 2026`; anything else is printed as written.
pub fn display_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => or_dash(raw).to_string(),
    }
}

fn points_label(points: f64) -> String {
    if points == 1.0 {
        "1.0 point".to_string()
    } else {
        format!("{points:.1} points")
    }
}

fn push_header(md: &mut String, settings: &ExamSettings) {
    if !settings.logo_url.trim().is_empty() {
        md.push_str(&format!("![Institution logo]({})\n\n", settings.logo_url));
    }
    let institution = if settings.university_name.trim().is_empty() {
        "Institution"
    } else {
        settings.university_name.as_str()
    };
    md.push_str(&format!("# {institution}\n\n"));
    if !settings.course.trim().is_empty() {
        md.push_str(&format!("## {}\n\n", settings.course));
    }
    if !settings.subject.trim().is_empty() {
        md.push_str(&format!("### {}\n\n", settings.subject));
    }
}

/// Render one version as a printable exam sheet.
pub fn version_sheet(version: &ExamVersion, settings: &ExamSettings) -> String {
    let mut md = String::new();
    let total = version.total_points();

    push_header(&mut md, settings);
    md.push_str(&format!("**VERSION {}**\n\n", version.code));

    md.push_str("| Professor | Date | Duration |\n");
    md.push_str("|-----------|------|----------|\n");
    md.push_str(&format!(
        "| {} | {} | {} |\n\n",
        or_dash(&settings.professor_name),
        display_date(&settings.date),
        or_dash(&settings.duration)
    ));

    md.push_str("**Student name:** ________________________________________\n\n");
    md.push_str(&format!(
        "**Student ID:** ____________________ **Score:** ______ / {total:.1}\n\n"
    ));
    md.push_str(&format!(
        "> **Attention:** mark version **{}** on your answer sheet.\n\n",
        version.code
    ));

    for (index, question) in version.questions.iter().enumerate() {
        md.push_str(&format!(
            "**{}.** {} _({})_\n\n",
            index + 1,
            question.text,
            points_label(question.points)
        ));
        match &question.kind {
            QuestionKind::MultipleChoice(choices) => {
                for (position, option) in choices.options().iter().enumerate() {
                    md.push_str(&format!("- **{})** {}\n", option_letter(position), option));
                }
                md.push('\n');
            }
            QuestionKind::Essay => {
                for _ in 0..ESSAY_LINES {
                    md.push_str(&"\\_".repeat(60));
                    md.push_str("\n\n");
                }
            }
        }
    }

    md.push_str("---\n\n");
    md.push_str(&format!(
        "**Questions:** {} | **Total points:** {total:.1} | **Version:** {}\n\n",
        version.questions.len(),
        version.code
    ));
    md.push_str("_Good luck!_\n");

    let year = NaiveDate::parse_from_str(settings.date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year());
    match (settings.university_name.trim().is_empty(), year) {
        (false, Some(year)) => md.push_str(&format!("\n{} - {year}\n", settings.university_name)),
        (false, None) => md.push_str(&format!("\n{}\n", settings.university_name)),
        (true, Some(year)) => md.push_str(&format!("\n{year}\n")),
        (true, None) => {}
    }

    md
}

/// Render the answer-key page that accompanies a version sheet.
pub fn key_sheet(key: &AnswerKey, settings: &ExamSettings, mode: ShuffleMode) -> String {
    let mut md = String::new();

    if !settings.logo_url.trim().is_empty() {
        md.push_str(&format!("![Institution logo]({})\n\n", settings.logo_url));
    }
    md.push_str("# Official answer key\n\n");
    md.push_str(&format!("## Version {}\n\n", key.version_code));
    if !settings.subject.trim().is_empty() {
        md.push_str(&format!("### {}\n\n", settings.subject));
    }
    md.push_str(&format!(
        "**Professor:** {} | **Date:** {}\n\n",
        or_dash(&settings.professor_name),
        display_date(&settings.date)
    ));

    md.push_str(&key.to_markdown());
    md.push('\n');

    md.push_str(&format!(
        "**Shuffle:** {} | **Institution:** {}\n\n",
        mode.describe(),
        or_dash(&settings.university_name)
    ));

    md.push_str(&format!(
        "_Answer key generated automatically for version {}",
        key.version_code
    ));
    if !settings.university_name.trim().is_empty() {
        md.push_str(&format!(", {}", settings.university_name));
    }
    md.push_str("_\n");

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use uuid::Uuid;

    fn settings() -> ExamSettings {
        ExamSettings {
            professor_name: "Prof. Silva".into(),
            university_name: "State University".into(),
            course: "Engineering, 1st year".into(),
            subject: "Algebra".into(),
            date: "2026-10-16".into(),
            duration: "60 minutes".into(),
            logo_url: "https://example.org/logo.png".into(),
        }
    }

    fn version() -> ExamVersion {
        ExamVersion {
            id: Uuid::new_v4(),
            code: 'C',
            questions: vec![
                Question::multiple_choice(
                    "linear",
                    "Solve $2x + 3 = 7$.",
                    1.0,
                    vec!["$x = 1$".into(), "$x = 2$".into(), "$x = 3$".into()],
                    1,
                )
                .unwrap(),
                Question::essay("proof", "Prove that $\\sqrt{2}$ is irrational.", 4.0),
            ],
        }
    }

    #[test]
    fn sheet_shows_every_setting() {
        let md = version_sheet(&version(), &settings());
        assert!(md.contains("![Institution logo](https://example.org/logo.png)"));
        assert!(md.contains("# State University"));
        assert!(md.contains("## Engineering, 1st year"));
        assert!(md.contains("### Algebra"));
        assert!(md.contains("| Prof. Silva | 16 October 2026 | 60 minutes |"));
        assert!(md.contains("State University - 2026"));
    }

    #[test]
    fn sheet_lists_questions_and_lettered_options() {
        let md = version_sheet(&version(), &settings());
        assert!(md.contains("**VERSION C**"));
        assert!(md.contains("mark version **C**"));
        assert!(md.contains("**1.** Solve $2x + 3 = 7$. _(1.0 point)_"));
        assert!(md.contains("- **A)** $x = 1$"));
        assert!(md.contains("- **B)** $x = 2$"));
        assert!(md.contains("- **C)** $x = 3$"));
        assert!(md.contains("**2.** Prove that $\\sqrt{2}$ is irrational. _(4.0 points)_"));
        assert_eq!(md.matches(&"\\_".repeat(60)).count(), ESSAY_LINES);
        assert!(md.contains("**Questions:** 2 | **Total points:** 5.0 | **Version:** C"));
        assert!(md.contains("/ 5.0"));
    }

    #[test]
    fn sheet_falls_back_on_missing_settings() {
        let md = version_sheet(&version(), &ExamSettings::default());
        assert!(md.contains("# Institution"));
        assert!(md.contains("| - | - | 120 minutes |"));
        assert!(!md.contains("Institution logo"));
    }

    #[test]
    fn free_form_dates_are_kept() {
        assert_eq!(display_date("2026-03-05"), "5 March 2026");
        assert_eq!(display_date("next Monday"), "next Monday");
        assert_eq!(display_date(""), "-");
    }

    #[test]
    fn key_page_records_version_and_shuffle() {
        let mut single = version();
        single.questions.truncate(1);
        let key = AnswerKey::derive(&single).unwrap();
        let md = key_sheet(&key, &settings(), ShuffleMode::OptionsOnly);
        assert!(md.contains("# Official answer key"));
        assert!(md.contains("## Version C"));
        assert!(md.contains("**Professor:** Prof. Silva | **Date:** 16 October 2026"));
        assert!(md.contains("| 1 | B |"));
        assert!(md.contains("**Shuffle:** options only | **Institution:** State University"));
        assert!(md.contains("generated automatically for version C, State University"));
    }
}
