//! Book endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{BatchDeleteQuery, BookListQuery, BookPatch, BookView},
};

use super::{ApiJson, ApiPath, MessageResponse, ValidatedJson, ValidatedQuery};

/// Confirmation message with the affected book
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: BookView,
}

/// List books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "Books ordered by the sort column", body = Vec<BookView>),
        (status = 400, description = "Unknown sort column", body = crate::error::ErrorResponse),
        (status = 422, description = "Non-numeric or non-positive count", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<BookListQuery>,
) -> AppResult<Json<Vec<BookView>>> {
    let sort = query.sort_key()?;
    let books = state.services.books.list(query.count, sort).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookView),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Id is not an integer", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<BookView>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookView,
    responses(
        (status = 200, description = "Book added", body = BookResponse),
        (status = 422, description = "Missing or empty title/author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(book): ValidatedJson<BookView>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.create(&book).await?;
    Ok(Json(BookResponse {
        message: "Book added".to_string(),
        book,
    }))
}

/// Partially update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown field in body or non-integer id", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<BookPatch>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, &patch).await?;
    Ok(Json(BookResponse {
        message: "Book updated".to_string(),
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Id is not an integer", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}

/// Delete several books at once
///
/// Ids without a matching book are skipped; the message reports how many were
/// actually deleted.
#[utoipa::path(
    delete,
    path = "/books/batch",
    tag = "books",
    params(BatchDeleteQuery),
    responses(
        (status = 200, description = "Count of deleted books", body = MessageResponse),
        (status = 404, description = "No matching books found", body = crate::error::ErrorResponse),
        (status = 422, description = "No ids supplied, or an id is not an integer", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_books(
    State(state): State<crate::AppState>,
    ValidatedQuery(query): ValidatedQuery<BatchDeleteQuery>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state.services.books.delete_many(&query.book_ids).await?;
    Ok(Json(MessageResponse::new(format!("{} books deleted", deleted))))
}
