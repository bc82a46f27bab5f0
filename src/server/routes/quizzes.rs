use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{get_all_questions, get_questions_for_category},
        Question,
    },
    server::{app::AppState, error::ApiError, extract::ApiJson},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

/// Category id the frontend sends when the player picks "All".
const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Debug, Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

#[tracing::instrument(skip(pool))]
async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizQuestion>> {
    let category_id = request.quiz_category.id;
    let questions = if category_id == ALL_CATEGORIES {
        get_all_questions(&pool).await?
    } else {
        get_questions_for_category(&pool, category_id).await?
    };
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let question = pick_unseen(questions, request.previous_questions.unwrap_or_default());
    if question.is_some() {
        let label = category_id.to_string();
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[label.as_str()])
            .inc();
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

/// Random question whose id is not in `previous`, `None` once all are used up.
fn pick_unseen(questions: Vec<Question>, previous: Vec<i64>) -> Option<Question> {
    let previous: HashSet<i64> = previous.into_iter().collect();
    let candidates: Vec<Question> = questions
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    candidates.choose(&mut rand::thread_rng()).cloned()
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: "answer".to_owned(),
            category: Some(1),
            difficulty: Some(1),
        }
    }

    #[test]
    fn never_repeats_previous_questions() {
        let questions: Vec<Question> = (1..=5).map(question).collect();
        for _ in 0..50 {
            let picked = pick_unseen(questions.clone(), vec![1, 2, 4]).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn exhausted_category_yields_none() {
        let questions: Vec<Question> = (1..=3).map(question).collect();
        assert!(pick_unseen(questions, vec![3, 1, 2]).is_none());
    }

    #[test]
    fn unknown_previous_ids_are_ignored() {
        let picked = pick_unseen(vec![question(7)], vec![100, 200]);
        assert_eq!(picked.map(|q| q.id), Some(7));
    }

    #[test]
    fn request_accepts_string_ids_and_missing_history() {
        let request: QuizRequest =
            serde_json::from_str(r#"{"quiz_category": {"type": "Science", "id": "1"}}"#).unwrap();
        assert_eq!(request.quiz_category.id, 1);
        assert!(request.previous_questions.is_none());
    }
}
