use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{self, get_all_questions, get_question_by_id, get_questions_for_category},
        },
        Category, Question,
    },
    server::{
        app::AppState,
        deserializers::{deserialize_lenient_number, deserialize_optional_integer},
        error::ApiError,
        extract::{ApiJson, ApiPath, ApiQuery},
        pagination::paginate,
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuestionsQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    page: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    category: Option<i64>,
}

// category and difficulty arrive as numbers, whole floats or numeric strings depending on the client
#[derive(Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    #[serde(default, deserialize_with = "deserialize_optional_integer")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_integer")]
    difficulty: Option<i64>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Vec<Category>,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[tracing::instrument(skip(pool, query))]
async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<QuestionsQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let categories = get_all_categories(&pool).await?;

    let (questions, current_category) = match query.category.filter(|id| *id != 0) {
        Some(id) => {
            let current = get_category(&pool, id).await?;
            (get_questions_for_category(&pool, id).await?, vec![current])
        }
        None => (get_all_questions(&pool).await?, categories.clone()),
    };

    let total_questions = questions.len();
    let questions = paginate(questions, query.page.unwrap_or(1));
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions,
        total_questions,
        current_category,
        categories,
    }))
}

#[tracing::instrument(skip(pool))]
async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    get_question_by_id(&pool, id).await?.ok_or(ApiError::NotFound)?;
    questions::delete_question(&pool, id).await?;
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "Question deleted");

    let remaining = get_all_questions(&pool).await?;
    Ok(Json(Deleted {
        success: true,
        deleted: id,
        total_questions: remaining.len(),
        questions: paginate(remaining, 1),
    }))
}

/// Searches when the body carries `searchTerm`, creates a question otherwise.
async fn create_or_search(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResponse<Response> {
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest);
    };

    match fields.get("searchTerm") {
        Some(term) => {
            let term = term.as_str().ok_or(ApiError::BadRequest)?;
            Ok(search(&pool, term).await?.into_response())
        }
        None => {
            let new_question: NewQuestion = serde_json::from_value(Value::Object(fields))
                .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
            Ok(create(&pool, new_question).await?.into_response())
        }
    }
}

#[tracing::instrument(skip(pool))]
async fn search(pool: &SqlitePool, term: &str) -> ApiResponse<Json<SearchResults>> {
    let questions = questions::search_questions(pool, term).await?;
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

#[tracing::instrument(skip(pool, new_question))]
async fn create(pool: &SqlitePool, new_question: NewQuestion) -> ApiResponse<Json<Created>> {
    let id = questions::create_question(
        pool,
        &new_question.question,
        &new_question.answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, "Question created");

    let questions = get_all_questions(pool).await?;
    Ok(Json(Created {
        success: true,
        created: id,
        total_questions: questions.len(),
        questions: paginate(questions, 1),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
