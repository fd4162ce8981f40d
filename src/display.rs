use crate::error::Error;
use crate::models::{FixedFeedback, Question, QuestionKind, ResultRow};
use std::fmt::{self, Write};

/// A page that renders itself as an HTML document.
pub trait View: fmt::Display {
    fn render(&self) -> Result<String, Error> {
        let mut out = String::new();
        write!(out, "{}", self)?;
        Ok(out)
    }
}

/// Text with the HTML special characters escaped.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut rest = self.0;
        while let Some(idx) = rest.find(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
            f.write_str(&rest[..idx])?;
            f.write_str(match rest.as_bytes()[idx] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            })?;
            rest = &rest[idx + 1..];
        }
        f.write_str(rest)
    }
}

fn header(f: &mut fmt::Formatter, title: &str) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html>")?;
    writeln!(f, "<head>")?;
    writeln!(f, "<meta charset=\"utf-8\">")?;
    writeln!(f, "<title>{}</title>", Escaped(title))?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body>")?;
    writeln!(f, "<h1>{}</h1>", Escaped(title))
}

fn footer(f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
}

fn cell<T: fmt::Display>(f: &mut fmt::Formatter, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "<td>{}</td>", Escaped(&value.to_string())),
        None => write!(f, "<td></td>"),
    }
}

pub struct FormPage<'a> {
    pub questions: &'a [Question],
}

impl View for FormPage<'_> {}

impl fmt::Display for FormPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        header(f, "Feedback")?;
        writeln!(f, "<form method=\"post\" action=\"/submit\">")?;
        for question in self.questions {
            let name = question.field_name();
            writeln!(f, "<p>")?;
            writeln!(
                f,
                "<label for=\"{}\">{}</label><br>",
                name,
                Escaped(&question.question)
            )?;
            match question.kind {
                QuestionKind::Numeric => writeln!(
                    f,
                    "<input type=\"number\" id=\"{0}\" name=\"{0}\" required>",
                    name
                )?,
                QuestionKind::Text => {
                    writeln!(f, "<textarea id=\"{0}\" name=\"{0}\"></textarea>", name)?
                }
            }
            writeln!(f, "</p>")?;
        }
        writeln!(f, "<button type=\"submit\">Submit</button>")?;
        writeln!(f, "</form>")?;
        footer(f)
    }
}

pub struct ResultsPage<'a> {
    pub rows: &'a [ResultRow],
}

impl View for ResultsPage<'_> {}

impl fmt::Display for ResultsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        header(f, "Feedback results")?;
        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<tr><th>Question</th><th>Type</th><th>Numeric answer</th><th>Text answer</th></tr>"
        )?;
        for row in self.rows {
            write!(f, "<tr>")?;
            cell(f, Some(&row.question))?;
            cell(f, Some(row.kind))?;
            cell(f, row.numeric_answer)?;
            cell(f, row.text_answer.as_ref())?;
            writeln!(f, "</tr>")?;
        }
        writeln!(f, "</table>")?;
        writeln!(f, "<p><a href=\"/\">Back to the form</a></p>")?;
        footer(f)
    }
}

pub const FIXED_FIELDS: [(&str, &str); 3] = [
    ("answer1", "Question 1"),
    ("answer2", "Question 2"),
    ("answer3", "Question 3"),
];

pub struct FixedFormPage;

impl View for FixedFormPage {}

impl fmt::Display for FixedFormPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        header(f, "Feedback")?;
        writeln!(f, "<form method=\"post\" action=\"/submit\">")?;
        for (name, label) in FIXED_FIELDS.iter() {
            writeln!(f, "<p>")?;
            writeln!(f, "<label for=\"{}\">{}</label><br>", name, label)?;
            writeln!(f, "<input type=\"number\" id=\"{0}\" name=\"{0}\">", name)?;
            writeln!(f, "</p>")?;
        }
        writeln!(f, "<button type=\"submit\">Submit</button>")?;
        writeln!(f, "</form>")?;
        footer(f)
    }
}

pub struct FixedResultsPage<'a> {
    pub rows: &'a [FixedFeedback],
}

impl View for FixedResultsPage<'_> {}

impl fmt::Display for FixedResultsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        header(f, "Feedback results")?;
        writeln!(f, "<table>")?;
        write!(f, "<tr><th>#</th>")?;
        for (_, label) in FIXED_FIELDS.iter() {
            write!(f, "<th>{}</th>", label)?;
        }
        writeln!(f, "</tr>")?;
        for row in self.rows {
            write!(f, "<tr>")?;
            cell(f, Some(row.id))?;
            for value in &[row.answer1, row.answer2, row.answer3] {
                cell(f, Some(value))?;
            }
            writeln!(f, "</tr>")?;
        }
        writeln!(f, "</table>")?;
        writeln!(f, "<p><a href=\"/\">Back to the form</a></p>")?;
        footer(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            Escaped("<b>\"Tom\" & 'Jerry'</b>").to_string(),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(Escaped("plain").to_string(), "plain");
        assert_eq!(Escaped("").to_string(), "");
    }

    #[test]
    fn form_controls_follow_question_type() {
        let questions = vec![
            Question {
                id: 1,
                question: String::from("Rate <me>"),
                kind: QuestionKind::Numeric,
            },
            Question {
                id: 3,
                question: String::from("Comments?"),
                kind: QuestionKind::Text,
            },
        ];
        let html = FormPage {
            questions: &questions,
        }
        .render()
        .unwrap();
        assert!(html.contains("<input type=\"number\" id=\"q1\" name=\"q1\" required>"));
        assert!(html.contains("<textarea id=\"q3\" name=\"q3\"></textarea>"));
        assert!(html.contains("Rate &lt;me&gt;"));
        assert!(html.contains("action=\"/submit\""));
    }

    #[test]
    fn results_leave_null_answers_blank() {
        let rows = vec![
            ResultRow {
                question: String::from("How clear?"),
                kind: QuestionKind::Numeric,
                numeric_answer: Some(4),
                text_answer: None,
            },
            ResultRow {
                question: String::from("Comments?"),
                kind: QuestionKind::Text,
                numeric_answer: None,
                text_answer: Some(String::from("a & b")),
            },
        ];
        let html = ResultsPage { rows: &rows }.render().unwrap();
        assert!(html.contains("<tr><td>How clear?</td><td>numeric</td><td>4</td><td></td></tr>"));
        assert!(html.contains("<tr><td>Comments?</td><td>text</td><td></td><td>a &amp; b</td></tr>"));
    }

    #[test]
    fn fixed_pages() {
        let html = FixedFormPage.render().unwrap();
        for (name, _) in FIXED_FIELDS.iter() {
            assert!(html.contains(&format!("name=\"{}\"", name)));
        }

        let rows = vec![FixedFeedback {
            id: 1,
            answer1: 4,
            answer2: 5,
            answer3: 0,
        }];
        let html = FixedResultsPage { rows: &rows }.render().unwrap();
        assert!(html.contains("<tr><td>1</td><td>4</td><td>5</td><td>0</td></tr>"));
    }
}
