use crate::mode::Mode;
use crate::models::{NewQuestion, QuestionKind};
use crate::schema::questions;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL,
    numeric_answer INTEGER,
    text_answer TEXT,
    FOREIGN KEY(question_id) REFERENCES questions(id)
);
CREATE TABLE IF NOT EXISTS fixed_feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    answer1 INTEGER NOT NULL,
    answer2 INTEGER NOT NULL,
    answer3 INTEGER NOT NULL
);
"#;

pub const SEED_QUESTIONS: &[NewQuestion<'static>] = &[
    NewQuestion {
        id: 1,
        question: "How well do I listen to others?",
        kind: QuestionKind::Numeric,
    },
    NewQuestion {
        id: 2,
        question: "How clear is my communication?",
        kind: QuestionKind::Numeric,
    },
    NewQuestion {
        id: 3,
        question: "Any additional comments?",
        kind: QuestionKind::Text,
    },
];

pub fn create_tables(conn: &SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(CREATE_TABLES)
}

/// Inserts the seed questions whose id is still free. Returns how many were
/// added.
pub fn seed_questions(conn: &SqliteConnection) -> QueryResult<usize> {
    let mut added = 0;
    for question in SEED_QUESTIONS {
        added += diesel::insert_or_ignore_into(questions::table)
            .values(question)
            .execute(conn)?;
    }
    Ok(added)
}

/// Creates missing tables and, for the questionnaire, seeds the questions.
/// Only table creation can fail; a failed seed is logged.
pub fn initialize(conn: &SqliteConnection, mode: Mode) -> QueryResult<()> {
    create_tables(conn)?;
    if mode == Mode::Questions {
        match seed_questions(conn) {
            Ok(0) => log::debug!("seed questions already present"),
            Ok(n) => log::info!("seeded {} questions", n),
            Err(e) => log::warn!("unable to seed questions: {}", e),
        }
    }
    Ok(())
}
