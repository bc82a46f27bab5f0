use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_lenient_number,
        error::ApiError,
        extract::{ApiPath, ApiQuery},
        pagination::paginate,
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    page: Option<u32>,
}

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Vec<Category>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesList {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

#[tracing::instrument(skip(pool, query))]
async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let questions = get_questions_for_category(&pool, id).await?;
    let total_questions = questions.len();
    let questions = paginate(questions, query.page.unwrap_or(1));
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let category = get_category(&pool, id).await?;

    Ok(Json(CategoryQuestions {
        success: true,
        questions,
        total_questions,
        current_category: vec![category],
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
