//! Aggregation engine.
//!
//! Pure computation from a question and a set of responses to a
//! chart-ready distribution plus a one-line narrative insight. Answer
//! values whose JSON shape does not match the question type are skipped,
//! never rejected; determinism of the "most common" pick comes from
//! first-encounter ordering combined with a stable descending sort.

use crate::schema::{AnswerValue, Question, QuestionType, Survey, SurveyResponse};
use serde::Serialize;

/// One labeled bar or slice of a question's distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub count: u64,
}

/// Display summary for a single question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub question_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub insight: String,
    pub data: Vec<ChartPoint>,
}

const NO_RESPONSES: &str = "No responses yet.";
const NO_INSIGHTS: &str = "No insights available.";
const SCALE_BINS: usize = 10;

/// Summarize every question of a survey against its responses.
pub fn survey_summary(survey: &Survey, responses: &[SurveyResponse]) -> Vec<QuestionSummary> {
    survey.questions.iter().map(|q| question_summary(q, responses)).collect()
}

/// Summarize one question against a set of responses.
pub fn question_summary(question: &Question, responses: &[SurveyResponse]) -> QuestionSummary {
    let (insight, data) = if responses.is_empty() {
        (NO_RESPONSES.to_string(), Vec::new())
    } else {
        let values = answer_values(&question.id, responses);
        match question.question_type {
            QuestionType::Text => (format!("{} text responses received.", values.len()), Vec::new()),
            QuestionType::Scale => scale_summary(&values),
            QuestionType::Radio => radio_summary(&question.options, &values),
            QuestionType::Checkbox => checkbox_summary(&question.options, &values),
            QuestionType::Unknown => (NO_INSIGHTS.to_string(), Vec::new()),
        }
    };

    QuestionSummary {
        question_id: question.id.clone(),
        question_text: question.text.clone(),
        question_type: question.question_type,
        insight,
        data,
    }
}

fn answer_values<'a>(question_id: &str, responses: &'a [SurveyResponse]) -> Vec<&'a AnswerValue> {
    responses
        .iter()
        .flat_map(|r| &r.answers)
        .filter(|a| a.question_id == question_id)
        .map(|a| &a.value)
        .collect()
}

fn scale_summary(values: &[&AnswerValue]) -> (String, Vec<ChartPoint>) {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|v| match v {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        })
        .collect();

    let mut bins = [0u64; SCALE_BINS];
    for n in &numbers {
        let bin = *n as i64;
        if (1..=SCALE_BINS as i64).contains(&bin) {
            bins[(bin - 1) as usize] += 1;
        }
    }
    let data = (1..=SCALE_BINS)
        .map(|value| ChartPoint { name: value.to_string(), count: bins[value - 1] })
        .collect();

    if numbers.is_empty() {
        return (NO_RESPONSES.to_string(), data);
    }

    let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
    let highest = numbers.iter().cloned().fold(f64::MIN, f64::max);
    let lowest = numbers.iter().cloned().fold(f64::MAX, f64::min);
    let insight = format!(
        "Average rating: {mean:.1} out of 10. Highest: {highest}, Lowest: {lowest}."
    );
    (insight, data)
}

fn radio_summary(options: &[String], values: &[&AnswerValue]) -> (String, Vec<ChartPoint>) {
    let mut counts = seed_counts(options);
    let mut total = 0u64;
    for value in values {
        if let AnswerValue::Text(choice) = value {
            bump(&mut counts, choice);
            total += 1;
        }
    }

    let insight = match top_entry(&counts) {
        Some((option, count)) if total > 0 => format!(
            "Most common response: \"{option}\" ({}% of responses).",
            percentage(count, total)
        ),
        _ => NO_RESPONSES.to_string(),
    };
    (insight, chart(counts))
}

fn checkbox_summary(options: &[String], values: &[&AnswerValue]) -> (String, Vec<ChartPoint>) {
    let mut counts = seed_counts(options);
    // Each selected option is one counted event, so a respondent picking
    // three options contributes three to the denominator.
    let mut total = 0u64;
    for value in values {
        if let AnswerValue::Selections(selected) = value {
            for option in selected {
                bump(&mut counts, option);
                total += 1;
            }
        }
    }

    let insight = match top_entry(&counts) {
        Some((option, count)) if total > 0 => format!(
            "Most selected option: \"{option}\" (selected in {}% of responses).",
            percentage(count, total)
        ),
        _ => NO_RESPONSES.to_string(),
    };
    (insight, chart(counts))
}

/// Zero-filled counts in the survey's original option order. Answered
/// values outside the configured options are appended as encountered.
fn seed_counts(options: &[String]) -> Vec<(String, u64)> {
    options.iter().map(|o| (o.clone(), 0)).collect()
}

fn bump(counts: &mut Vec<(String, u64)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

/// Highest-count entry; ties resolve to the first encountered because
/// the sort is stable over first-encounter order.
fn top_entry(counts: &[(String, u64)]) -> Option<(String, u64)> {
    let mut sorted = counts.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.into_iter().next().filter(|(_, count)| *count > 0)
}

fn percentage(count: u64, total: u64) -> i64 {
    (count as f64 * 100.0 / total as f64).round() as i64
}

fn chart(counts: Vec<(String, u64)>) -> Vec<ChartPoint> {
    counts.into_iter().map(|(name, count)| ChartPoint { name, count }).collect()
}
