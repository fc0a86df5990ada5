//! Food item catalog handlers.

use actix_web::{HttpResponse, web};

use wastesmart_shared::dto::{ItemListQuery, ItemSearchQuery};
use wastesmart_shared::{ApiResponse, ListResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;
const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

fn validated_paging(limit: Option<usize>, offset: Option<usize>, default_limit: usize) -> AppResult<(usize, usize)> {
    let limit = limit.unwrap_or(default_limit);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::BadRequest(format!(
            "Limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    Ok((limit, offset.unwrap_or(0)))
}

/// GET /api/v1/items
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ItemListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let (limit, offset) = validated_paging(query.limit, query.offset, DEFAULT_LIST_LIMIT)?;

    let items = match query.category {
        Some(category) => state.items.by_category(&category),
        None => state.items.search("", limit, offset),
    };

    Ok(HttpResponse::Ok().json(ListResponse::of(items).with_pagination(limit, offset)))
}

/// GET /api/v1/items/search
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<ItemSearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please provide a search term".to_string(),
        ));
    }

    let (limit, offset) = validated_paging(query.limit, query.offset, DEFAULT_SEARCH_LIMIT)?;
    let items = state.items.search(&q, limit, offset);

    Ok(HttpResponse::Ok().json(
        ListResponse::of(items)
            .with_query(q)
            .with_pagination(limit, offset),
    ))
}

/// GET /api/v1/items/{id}
pub async fn by_id(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let item = state
        .items
        .by_id(&id)
        .ok_or_else(|| AppError::not_found(format!("No food item found with ID: {id}")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(item)))
}

/// GET /api/v1/items/category/{category}
pub async fn by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = path.into_inner();

    let items = state.items.by_category(&category);
    if items.is_empty() {
        return Err(AppError::not_found_with_suggestions(
            format!("No items found in category: {category}"),
            ["fruit", "vegetable", "bread", "dairy", "meat", "packaging"],
        ));
    }

    Ok(HttpResponse::Ok().json(ListResponse::of(items)))
}
