use crate::error::Error;
use crate::schema::*;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::Deserialize;
use std::fmt;
use std::io::Write;

#[derive(Debug, Copy, Clone, PartialEq, Eq, AsExpression, FromSqlRow)]
#[sql_type = "Text"]
pub enum QuestionKind {
    Numeric,
    Text,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Numeric => "numeric",
            QuestionKind::Text => "text",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromSql<Text, Sqlite> for QuestionKind {
    fn from_sql(bytes: Option<&<Sqlite as Backend>::RawValue>) -> deserialize::Result<Self> {
        match <String as FromSql<Text, Sqlite>>::from_sql(bytes)?.as_str() {
            "numeric" => Ok(QuestionKind::Numeric),
            "text" => Ok(QuestionKind::Text),
            other => Err(format!("unknown question type `{}`", other).into()),
        }
    }
}

impl ToSql<Text, Sqlite> for QuestionKind {
    fn to_sql<W: Write>(&self, out: &mut Output<W, Sqlite>) -> serialize::Result {
        <str as ToSql<Text, Sqlite>>::to_sql(self.as_str(), out)
    }
}

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn field_name(&self) -> FieldName {
        FieldName(self.id)
    }
}

#[derive(Debug, Insertable)]
#[table_name = "questions"]
pub struct NewQuestion<'a> {
    pub id: i32,
    pub question: &'a str,
    pub kind: QuestionKind,
}

#[derive(Debug, Insertable)]
#[table_name = "feedback"]
pub struct NewFeedback<'a> {
    pub question_id: i32,
    pub numeric_answer: Option<i64>,
    pub text_answer: Option<&'a str>,
}

/// One feedback row joined with the question it answers.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct ResultRow {
    pub question: String,
    pub kind: QuestionKind,
    pub numeric_answer: Option<i64>,
    pub text_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct FixedFeedback {
    pub id: i32,
    pub answer1: i64,
    pub answer2: i64,
    pub answer3: i64,
}

#[derive(Debug, PartialEq, Insertable)]
#[table_name = "fixed_feedback"]
pub struct NewFixedFeedback {
    pub answer1: i64,
    pub answer2: i64,
    pub answer3: i64,
}

/// Form field carrying the answer to one question, written `q<id>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldName(i32);

impl FieldName {
    pub const PREFIX: &'static str = "q";

    pub fn question_id(self) -> i32 {
        self.0
    }

    /// Recognizes `q<id>` with a positive decimal id. Anything else is not
    /// an answer field.
    pub fn parse(key: &str) -> Option<Self> {
        let digits = key.strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<i32>() {
            Ok(id) if id > 0 => Some(FieldName(id)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Answer fields of a posted questionnaire, in body order. Repeated keys keep
/// their first value.
#[derive(Debug, Default)]
pub struct Submission {
    answers: Vec<(FieldName, String)>,
}

impl Submission {
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut answers: Vec<(FieldName, String)> = Vec::new();
        for (key, value) in fields {
            if let Some(name) = FieldName::parse(&key) {
                if answers.iter().all(|(seen, _)| *seen != name) {
                    answers.push((name, value));
                }
            }
        }
        Self { answers }
    }

    pub fn answers(&self) -> &[(FieldName, String)] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub enum Answer<'a> {
    Numeric(i64),
    Text(&'a str),
}

impl<'a> Answer<'a> {
    pub fn parse(kind: QuestionKind, field: FieldName, value: &'a str) -> Result<Self, Error> {
        match kind {
            QuestionKind::Numeric => parse_integer(&field.to_string(), value).map(Answer::Numeric),
            QuestionKind::Text => Ok(Answer::Text(value)),
        }
    }

    pub fn to_row(&self, question_id: i32) -> NewFeedback<'a> {
        match *self {
            Answer::Numeric(n) => NewFeedback {
                question_id,
                numeric_answer: Some(n),
                text_answer: None,
            },
            Answer::Text(s) => NewFeedback {
                question_id,
                numeric_answer: None,
                text_answer: Some(s),
            },
        }
    }
}

fn parse_integer(field: &str, value: &str) -> Result<i64, Error> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

/// Posted fixed-slot form. Missing slots arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixedSubmission {
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
}

impl FixedSubmission {
    /// Empty slots are stored as zero, the value SQLite gives an empty string
    /// in an integer column.
    pub fn to_row(&self) -> Result<NewFixedFeedback, Error> {
        fn slot(field: &str, value: &str) -> Result<i64, Error> {
            if value.trim().is_empty() {
                Ok(0)
            } else {
                parse_integer(field, value)
            }
        }
        Ok(NewFixedFeedback {
            answer1: slot("answer1", &self.answer1)?,
            answer2: slot("answer2", &self.answer2)?,
            answer3: slot("answer3", &self.answer3)?,
        })
    }
}
