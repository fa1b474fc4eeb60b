use crate::infra::{parse_answer_values, InMemoryDiagnosisRepository, InMemoryEventPublisher};
use clap::Args;
use std::str::FromStr;
use std::sync::Arc;

use pulsecheck::error::AppError;
use pulsecheck::workflows::diagnosis::{
    Answer, DiagnosisEngine, DiagnosisRepository, DiagnosisResult, DiagnosisService,
    MessageCatalog, MessageEngine, Questionnaire, ScoreBand,
};

/// Comma-separated answer values parsed into a full or partial sheet.
#[derive(Clone, Debug)]
pub(crate) struct SheetValues(Vec<Answer>);

impl FromStr for SheetValues {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_answer_values(raw).map(SheetValues)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answer values for questions 1..12 in order, e.g. 8,6,3,8,8,8,6,6,6,3,3,3
    #[arg(long)]
    pub(crate) values: SheetValues,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Answer values for questions 1..12 in order (defaults to a sample sheet)
    #[arg(long)]
    pub(crate) values: Option<SheetValues>,
    /// Skip the storage portion of the demo
    #[arg(long)]
    pub(crate) skip_storage: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let questionnaire = Questionnaire::standard();
    let engine = DiagnosisEngine::new(questionnaire.clone());
    let messages = MessageEngine::new(MessageCatalog::standard(), questionnaire);

    let answers = args.values.0;
    let result = engine.classify(&answers);
    let selected = messages.select(&result, &answers);
    render_score_report(&result, &selected);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        values,
        skip_storage,
    } = args;
    let answers = values.map(|sheet| sheet.0).unwrap_or_else(demo_answers);

    println!("Assessment demo");
    let questionnaire = Questionnaire::standard();

    println!("\nQuestionnaire");
    for answer in &answers {
        println!(
            "- {} [{}] {} -> {} points",
            answer.question_id,
            questionnaire.axis_for(answer.question_id).display_name(),
            questionnaire.prompt(answer.question_id),
            answer.value.points()
        );
    }

    let engine = DiagnosisEngine::new(questionnaire.clone());
    let messages = MessageEngine::new(MessageCatalog::standard(), questionnaire);
    let result = engine.classify(&answers);
    let selected = messages.select(&result, &answers);
    println!();
    render_score_report(&result, &selected);

    if skip_storage {
        return Ok(());
    }

    println!("\nStorage demo");
    let repository = Arc::new(InMemoryDiagnosisRepository::default());
    let events = Arc::new(InMemoryEventPublisher::default());
    let service = DiagnosisService::new(
        repository.clone(),
        events.clone(),
        MessageCatalog::standard(),
        Questionnaire::standard(),
    );

    let record = match service.submit(answers) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Stored assessment {} at {}",
        record.assessment_id.0, record.submitted_at
    );

    let stored_view = match repository.fetch(&record.assessment_id) {
        Ok(Some(stored)) => stored.view(),
        Ok(None) => {
            println!("  Repository lookup returned no record");
            return Ok(());
        }
        Err(err) => {
            println!("  Repository unavailable: {}", err);
            return Ok(());
        }
    };
    match serde_json::to_string_pretty(&stored_view) {
        Ok(json) => println!("  Stored payload:\n{}", json),
        Err(err) => println!("  Stored payload unavailable: {}", err),
    }

    let published = events.events();
    if published.is_empty() {
        println!("  Analytics events: none dispatched");
    } else {
        println!("  Analytics events:");
        for event in published {
            println!("    - {} -> {}", event.name, event.assessment_id.0);
        }
    }

    Ok(())
}

fn render_score_report(result: &DiagnosisResult, messages: &[String]) {
    println!("Assessment score report");

    println!("\nAxis scores");
    for (axis, raw) in result.raw_scores.iter() {
        println!(
            "- {}: {}/24 raw -> {}/100",
            axis.display_name(),
            raw,
            result.normalized_scores.get(axis)
        );
    }

    println!(
        "\nTotal score: {} ({:?} band)",
        result.total_score,
        ScoreBand::from_total(result.total_score)
    );
    println!("Diagnosis: {}", result.label);

    println!("\nFeedback");
    for message in messages {
        println!("- {}", message);
    }
}

fn demo_answers() -> Vec<Answer> {
    parse_answer_values("8,6,3,8,8,8,6,6,6,3,3,3").expect("demo sheet is valid")
}
