use crate::error::Error;
use crate::models::*;
use crate::schema::*;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::QueryResult;

pub fn list_questions(conn: &SqliteConnection) -> QueryResult<Vec<Question>> {
    questions::table.order(questions::id).load(conn)
}

pub fn question_kind(conn: &SqliteConnection, id: i32) -> Result<QuestionKind, Error> {
    questions::table
        .find(id)
        .select(questions::kind)
        .first::<QuestionKind>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => Error::UnknownQuestion(id),
            e => e.into(),
        })
}

pub fn insert_feedback(conn: &SqliteConnection, row: &NewFeedback) -> QueryResult<usize> {
    diesel::insert_into(feedback::table).values(row).execute(conn)
}

/// Writes one feedback row per answer field, in order. Stops at the first
/// failing field; rows written before it are kept.
pub fn record_submission(conn: &SqliteConnection, submission: &Submission) -> Result<usize, Error> {
    let mut written = 0;
    for (field, value) in submission.answers() {
        let question_id = field.question_id();
        let kind = question_kind(conn, question_id)?;
        let answer = Answer::parse(kind, *field, value)?;
        written += insert_feedback(conn, &answer.to_row(question_id))?;
    }
    Ok(written)
}

pub fn load_results(conn: &SqliteConnection) -> QueryResult<Vec<ResultRow>> {
    feedback::table
        .inner_join(questions::table)
        .select((
            questions::question,
            questions::kind,
            feedback::numeric_answer,
            feedback::text_answer,
        ))
        .load(conn)
}

pub fn insert_fixed(conn: &SqliteConnection, row: &NewFixedFeedback) -> QueryResult<usize> {
    diesel::insert_into(fixed_feedback::table)
        .values(row)
        .execute(conn)
}

pub fn load_fixed(conn: &SqliteConnection) -> QueryResult<Vec<FixedFeedback>> {
    fixed_feedback::table.load(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::setup;

    fn connection() -> SqliteConnection {
        let conn = SqliteConnection::establish(":memory:").unwrap();
        setup::initialize(&conn, Mode::Questions).unwrap();
        conn
    }

    fn submission(pairs: &[(&str, &str)]) -> Submission {
        Submission::from_fields(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn questions_in_id_order() {
        let conn = connection();
        let questions = list_questions(&conn).unwrap();
        let ids = questions.iter().map(|q| q.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(questions[0].kind, QuestionKind::Numeric);
        assert_eq!(questions[2].kind, QuestionKind::Text);
    }

    #[test]
    fn question_kind_lookup() {
        let conn = connection();
        assert_eq!(question_kind(&conn, 2).unwrap(), QuestionKind::Numeric);
        assert_eq!(question_kind(&conn, 3).unwrap(), QuestionKind::Text);
        assert!(matches!(
            question_kind(&conn, 42),
            Err(Error::UnknownQuestion(42))
        ));
    }

    #[test]
    fn unknown_question_type_is_an_error() {
        let conn = connection();
        diesel::sql_query("INSERT INTO questions (id, question, type) VALUES (9, 'Rate me', 'stars')")
            .execute(&conn)
            .unwrap();
        assert!(matches!(question_kind(&conn, 9), Err(Error::Database(_))));
    }

    #[test]
    fn one_row_per_answer() {
        let conn = connection();
        let written =
            record_submission(&conn, &submission(&[("q1", "5"), ("q2", "3"), ("q3", "great")]))
                .unwrap();
        assert_eq!(written, 3);

        let rows = load_results(&conn).unwrap();
        assert_eq!(rows.len(), 3);
        let first = rows
            .iter()
            .find(|r| r.question == "How well do I listen to others?")
            .unwrap();
        assert_eq!(first.kind, QuestionKind::Numeric);
        assert_eq!(first.numeric_answer, Some(5));
        assert_eq!(first.text_answer, None);
        let comment = rows.iter().find(|r| r.kind == QuestionKind::Text).unwrap();
        assert_eq!(comment.text_answer.as_deref(), Some("great"));
        assert_eq!(comment.numeric_answer, None);
    }

    #[test]
    fn earlier_rows_survive_a_failing_field() {
        let conn = connection();
        let err = record_submission(&conn, &submission(&[("q1", "4"), ("q8", "1"), ("q2", "2")]))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownQuestion(8)));
        let rows = load_results(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].numeric_answer, Some(4));
    }

    #[test]
    fn fixed_rows() {
        let conn = connection();
        let row = NewFixedFeedback {
            answer1: 4,
            answer2: 5,
            answer3: 0,
        };
        assert_eq!(insert_fixed(&conn, &row).unwrap(), 1);
        assert_eq!(insert_fixed(&conn, &row).unwrap(), 1);
        let rows = load_fixed(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            FixedFeedback {
                id: 1,
                answer1: 4,
                answer2: 5,
                answer3: 0,
            }
        );
    }
}
