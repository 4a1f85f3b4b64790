//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookShort},
    services::books::{MSG_ADDED, MSG_DELETED, MSG_UPDATED},
    AppState,
};

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Serialize, ToSchema)]
pub struct BookIdData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// Response for a created book
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBookResponse {
    pub status: String,
    pub message: String,
    pub data: BookIdData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookShort>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListBooksResponse {
    pub status: String,
    pub data: BookListData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GetBookResponse {
    pub status: String,
    pub data: BookData,
}

/// Confirmation without payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.to_string(),
        }
    }
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = CreateBookResponse),
        (status = 400, description = "Missing name or readPage > pageCount", body = crate::error::ErrorResponse),
        (status = 500, description = "Book was not stored", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<CreateBookResponse>)> {
    let book_id = state.services.books.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookResponse {
            status: STATUS_SUCCESS.to_string(),
            message: MSG_ADDED.to_string(),
            data: BookIdData { book_id },
        }),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = ListBooksResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, AppError>,
) -> Json<ListBooksResponse> {
    let filter = BookFilter::from(BookQuery::from_pairs(pairs));
    let books = state.services.books.list(&filter).await;

    Json(ListBooksResponse {
        status: STATUS_SUCCESS.to_string(),
        data: BookListData { books },
    })
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = GetBookResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<GetBookResponse>> {
    let book = state.services.books.get_by_id(&id).await?;

    Ok(Json(GetBookResponse {
        status: STATUS_SUCCESS.to_string(),
        data: BookData { book },
    }))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage > pageCount", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(&id, payload).await?;
    Ok(Json(MessageResponse::success(MSG_UPDATED)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&id).await?;
    Ok(Json(MessageResponse::success(MSG_DELETED)))
}
