//! Book catalogue handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::request::{BookPayload, RecordPathParams};
use crate::handler::response::{Book, Books, Deleted, ErrorResponse};
use crate::handler::{Error, ErrorKind, Result};
use crate::middleware::{IdentityRequirement, RouterAccessExt};
use crate::service::{BookStore, ServiceState, ServiceStore};

/// Tracing target for book operations.
const TRACING_TARGET: &str = "libris_server::handler::books";

fn book_not_found(book_id: i32) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Book with specified id was not found")
        .with_resource("books")
        .with_context(format!("id: {book_id}"))
}

/// Adds a book to the catalogue.
#[tracing::instrument(skip_all, fields(user_id = auth_state.user().id))]
async fn create_book(
    State(store): State<ServiceStore>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<BookPayload>,
) -> Result<(StatusCode, Json<Book>)> {
    let new_book = request.into_model()?;

    let same_title = store.find_books_by_title(&new_book.title).await?;
    if same_title.iter().any(|book| book.author == new_book.author) {
        tracing::debug!(
            target: TRACING_TARGET,
            title = %new_book.title,
            author = %new_book.author,
            "duplicate book rejected"
        );
        return Err(ErrorKind::Conflict
            .with_message("Book with the specified title and author already exists")
            .with_resource("books"));
    }

    let book = store.create_book(new_book).await?;

    tracing::info!(
        target: TRACING_TARGET,
        book_id = book.id,
        title = %book.title,
        "book created"
    );

    Ok((StatusCode::CREATED, Json(Book::from_model(book))))
}

fn create_book_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create book")
        .description("Adds a book. Requires the CREATE right.")
        .response::<201, Json<Book>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Lists every book.
#[tracing::instrument(skip_all)]
async fn list_books(State(store): State<ServiceStore>) -> Result<(StatusCode, Json<Books>)> {
    let books = store.list_books().await?;

    tracing::debug!(target: TRACING_TARGET, count = books.len(), "books listed");

    let books = books.into_iter().map(Book::from_model).collect();
    Ok((StatusCode::OK, Json(books)))
}

fn list_books_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List books")
        .description("Returns the whole catalogue. No identity required.")
        .response::<200, Json<Books>>()
}

/// Reads a single book.
#[tracing::instrument(skip_all)]
async fn read_book(
    State(store): State<ServiceStore>,
    Path(path_params): Path<RecordPathParams>,
) -> Result<(StatusCode, Json<Book>)> {
    let book_id = path_params.id()?;

    let Some(book) = store.find_book_by_id(book_id).await? else {
        return Err(book_not_found(book_id));
    };

    Ok((StatusCode::OK, Json(Book::from_model(book))))
}

fn read_book_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get book")
        .description("Returns a book by id. No identity required.")
        .response::<200, Json<Book>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Replaces every field of a book.
#[tracing::instrument(skip_all, fields(user_id = auth_state.user().id))]
async fn update_book(
    State(store): State<ServiceStore>,
    auth_state: AuthState,
    Path(path_params): Path<RecordPathParams>,
    ValidateJson(request): ValidateJson<BookPayload>,
) -> Result<(StatusCode, Json<Book>)> {
    let book_id = path_params.id()?;
    let updates = request.into_update()?;

    let Some(book) = store.update_book(book_id, updates).await? else {
        return Err(book_not_found(book_id));
    };

    tracing::info!(target: TRACING_TARGET, book_id = book.id, "book updated");

    Ok((StatusCode::OK, Json(Book::from_model(book))))
}

fn update_book_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update book")
        .description("Replaces a book. Requires the UPDATE right.")
        .response::<200, Json<Book>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Removes a book.
#[tracing::instrument(skip_all, fields(user_id = auth_state.user().id))]
async fn delete_book(
    State(store): State<ServiceStore>,
    auth_state: AuthState,
    Path(path_params): Path<RecordPathParams>,
) -> Result<(StatusCode, Json<Deleted>)> {
    let book_id = path_params.id()?;

    if !store.delete_book(book_id).await? {
        return Err(book_not_found(book_id));
    }

    tracing::info!(target: TRACING_TARGET, book_id = book_id, "book deleted");

    Ok((StatusCode::OK, Json(Deleted::new())))
}

fn delete_book_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete book")
        .description("Removes a book. Requires the DELETE right.")
        .response::<200, Json<Deleted>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all related routes.
///
/// Reads are public. Writes need an identity whose role holds the right
/// implied by the method.
///
/// [`Router`]: axum::routing::Router
pub fn routes(state: ServiceState) -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/books",
            post_with(create_book, create_book_docs).get_with(list_books, list_books_docs),
        )
        .api_route(
            "/books/{id}",
            get_with(read_book, read_book_docs)
                .put_with(update_book, update_book_docs)
                .delete_with(delete_book, delete_book_docs),
        )
        .with_access(state, IdentityRequirement::MutatingOnly)
        .with_path_items(|item| item.tag("Books"))
}
