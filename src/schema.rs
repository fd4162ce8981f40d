table! {
    feedback (id) {
        id -> Integer,
        question_id -> Integer,
        numeric_answer -> Nullable<BigInt>,
        text_answer -> Nullable<Text>,
    }
}

table! {
    fixed_feedback (id) {
        id -> Integer,
        answer1 -> BigInt,
        answer2 -> BigInt,
        answer3 -> BigInt,
    }
}

table! {
    questions (id) {
        id -> Integer,
        question -> Text,
        #[sql_name = "type"]
        kind -> Text,
    }
}

joinable!(feedback -> questions (question_id));

allow_tables_to_appear_in_same_query!(
    feedback,
    fixed_feedback,
    questions,
);
