use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use dotenv::dotenv;
use exitfailure::ExitFailure;
use failure::ResultExt;
use feedbackd::actions;
use feedbackd::mode::Mode;
use feedbackd::setup;
use structopt::StructOpt;

#[derive(StructOpt)]
enum Command {
    /// Create missing tables and seed the questions
    Init,
    /// List the survey questions
    Questions,
    /// Print every questionnaire answer
    Results,
    /// Print every fixed-form submission
    FixedResults,
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, env = "DATABASE_URL", default_value = "./feedback.db")]
    database_url: String,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    let _ = dotenv();
    env_logger::init();
    let args = Args::from_args();
    let db = SqliteConnection::establish(&args.database_url)
        .context("unable to connect database")?;
    match args.command {
        Command::Init => init(&db)?,
        Command::Questions => questions(&db)?,
        Command::Results => results(&db)?,
        Command::FixedResults => fixed_results(&db)?,
    }
    Ok(())
}

fn init(db: &SqliteConnection) -> Result<(), failure::Error> {
    setup::initialize(db, Mode::Questions).context("unable to create tables")?;
    println!("Database ready");
    Ok(())
}

fn questions(db: &SqliteConnection) -> Result<(), failure::Error> {
    let questions = actions::list_questions(db).context("unable to get questions")?;
    for question in questions {
        println!("{} ({}) {}", question.id, question.kind, question.question);
    }
    Ok(())
}

fn results(db: &SqliteConnection) -> Result<(), failure::Error> {
    let rows = actions::load_results(db).context("unable to get results")?;
    println!("{} answers", rows.len());
    for row in rows {
        let answer = match (row.numeric_answer, row.text_answer) {
            (Some(n), _) => n.to_string(),
            (None, Some(text)) => text,
            (None, None) => String::new(),
        };
        println!("{} ({}): {}", row.question, row.kind, answer);
    }
    Ok(())
}

fn fixed_results(db: &SqliteConnection) -> Result<(), failure::Error> {
    let rows = actions::load_fixed(db).context("unable to get results")?;
    println!("{} submissions", rows.len());
    for row in rows {
        println!("{}: {} {} {}", row.id, row.answer1, row.answer2, row.answer3);
    }
    Ok(())
}
