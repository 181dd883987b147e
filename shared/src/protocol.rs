//! Typed request/response catalogue for the library backend.
//!
//! Each endpoint is a request type implementing [`ApiRequest`], which binds
//! the URL path, HTTP method and decoded response type together. The API
//! client sends these generically, so payload shapes are validated at the
//! client boundary instead of being assumed at every call site.

use crate::{AllowedUsers, Book, Fine, IdentifierType, Loan, Role, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP methods used by the REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Defines the request-response relationship and metadata for an endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the backend origin. Dynamic because several
    /// endpoints carry a resource id in the path.
    fn path(&self) -> String;
}

/// Error body the backend sends with any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Generic `{ message }` acknowledgment for mutations with no resource body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: String,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "nombreCompleto")]
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/auth/login".into()
    }
}

/// Allow-list check performed before self-registration is attempted.
/// A 403 means the identifiers are not on the allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAllowedRequest {
    pub email: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
}

impl ApiRequest for CheckAllowedRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/auth/check-allowed".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/auth/register".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
}

impl ApiRequest for VerifyTokenRequest {
    type Response = VerifyTokenResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/auth/verify-token".into()
    }
}

// =========================================================
// Books
// =========================================================

/// Server-side listing filter (`estado` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookFilter {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "eliminado")]
    Deleted,
}

impl BookFilter {
    pub fn query_value(&self) -> &'static str {
        match self {
            BookFilter::Available => "disponible",
            BookFilter::Deleted => "eliminado",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBooksRequest {
    #[serde(skip)]
    pub estado: Option<BookFilter>,
}

impl ApiRequest for ListBooksRequest {
    type Response = Vec<Book>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        match self.estado {
            Some(filter) => format!("/api/books?estado={}", filter.query_value()),
            None => "/api/books".into(),
        }
    }
}

/// Editable book fields, shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPayload {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "año")]
    pub year: i32,
    #[serde(rename = "editorial")]
    pub publisher: String,
    #[serde(rename = "tipoLiteratura")]
    pub literature_type: String,
    #[serde(rename = "cantidadDisponible")]
    pub copies_available: u32,
    #[serde(rename = "fotoUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ApiRequest for BookPayload {
    type Response = Book;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/books".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub payload: BookPayload,
}

impl ApiRequest for UpdateBookRequest {
    type Response = Book;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/books/{}", self.id)
    }
}

/// Soft delete: the backend flags the book, it stays restorable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBookRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteBookRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/books/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreBookRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for RestoreBookRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/books/{}/restore", self.id)
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/users".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockUserRequest {
    #[serde(skip)]
    pub id: String,
    pub blocked: bool,
}

impl ApiRequest for BlockUserRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/users/{}/block", self.id)
    }
}

// =========================================================
// Loans
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLoansRequest;

impl ApiRequest for ListLoansRequest {
    type Response = Vec<Loan>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/loans".into()
    }
}

/// Loans belonging to the authenticated patron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMyLoansRequest;

impl ApiRequest for ListMyLoansRequest {
    type Response = Vec<Loan>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/loans/user".into()
    }
}

/// Admin-side loan creation with explicit patron and dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLoanRequest {
    #[serde(rename = "libroId")]
    pub book_id: String,
    #[serde(rename = "usuarioId")]
    pub patron_id: String,
    #[serde(rename = "fechaPrestamo")]
    pub loan_date: String,
    #[serde(rename = "fechaDevolucion")]
    pub due_date: String,
}

impl ApiRequest for CreateLoanRequest {
    type Response = Loan;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/loans".into()
    }
}

/// Patron-side loan request; the backend derives the patron from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLoanRequest {
    #[serde(rename = "libroId")]
    pub book_id: String,
}

impl ApiRequest for RequestLoanRequest {
    type Response = Loan;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/loans".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnLoanRequest {
    #[serde(skip)]
    pub id: String,
}

/// The backend reports whether the return was on time; a late return may
/// carry the fine it created. The client never computes this itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnLoanResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "multa", default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<Fine>,
}

impl ApiRequest for ReturnLoanRequest {
    type Response = ReturnLoanResponse;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/loans/{}/return", self.id)
    }
}

// =========================================================
// Fines
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFinesRequest;

impl ApiRequest for ListFinesRequest {
    type Response = Vec<Fine>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/fines".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMyFinesRequest;

impl ApiRequest for ListMyFinesRequest {
    type Response = Vec<Fine>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/fines/user".into()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFineRequest {
    #[serde(rename = "prestamoId")]
    pub loan_id: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "descripcion")]
    pub reason: String,
}

impl ApiRequest for CreateFineRequest {
    type Response = Fine;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/fines".into()
    }
}

/// Marks a fine paid; one-way, the backend rejects repeated payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayFineRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for PayFineRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/fines/{}/pay", self.id)
    }
}

// =========================================================
// Allow-list
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAllowedUsersRequest;

impl ApiRequest for ListAllowedUsersRequest {
    type Response = AllowedUsers;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/admin/allowed-users".into()
    }
}

/// Append-only: entries are added, never removed through this surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAllowedUserRequest {
    pub identifier: String,
    #[serde(rename = "type")]
    pub identifier_type: IdentifierType,
}

impl ApiRequest for AddAllowedUserRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/admin/allowed-users".into()
    }
}

// =========================================================
// Tests
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_bearing_paths_embed_the_resource_id() {
        let ret = ReturnLoanRequest { id: "l42".into() };
        assert_eq!(ret.path(), "/api/loans/l42/return");
        assert_eq!(<ReturnLoanRequest as ApiRequest>::METHOD, HttpMethod::Put);

        let pay = PayFineRequest { id: "f7".into() };
        assert_eq!(pay.path(), "/api/fines/f7/pay");

        let block = BlockUserRequest {
            id: "u9".into(),
            blocked: true,
        };
        assert_eq!(block.path(), "/api/users/u9/block");

        let restore = RestoreBookRequest { id: "b3".into() };
        assert_eq!(restore.path(), "/api/books/b3/restore");
        assert_eq!(<RestoreBookRequest as ApiRequest>::METHOD, HttpMethod::Put);
    }

    #[test]
    fn book_listing_filter_maps_to_estado_query() {
        let all = ListBooksRequest { estado: None };
        assert_eq!(all.path(), "/api/books");

        let deleted = ListBooksRequest {
            estado: Some(BookFilter::Deleted),
        };
        assert_eq!(deleted.path(), "/api/books?estado=eliminado");

        let available = ListBooksRequest {
            estado: Some(BookFilter::Available),
        };
        assert_eq!(available.path(), "/api/books?estado=disponible");
    }

    #[test]
    fn loan_creation_serializes_wire_field_names() {
        let req = CreateLoanRequest {
            book_id: "b1".into(),
            patron_id: "u1".into(),
            loan_date: "2025-03-01".into(),
            due_date: "2025-03-15".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["libroId"], "b1");
        assert_eq!(json["usuarioId"], "u1");
        assert_eq!(json["fechaPrestamo"], "2025-03-01");
        assert_eq!(json["fechaDevolucion"], "2025-03-15");
    }

    #[test]
    fn path_skipped_fields_do_not_leak_into_bodies() {
        let req = UpdateBookRequest {
            id: "b5".into(),
            payload: BookPayload {
                title: "Alma".into(),
                author: "B".into(),
                year: 2010,
                publisher: "Ed".into(),
                literature_type: "Novela".into(),
                copies_available: 2,
                photo_url: None,
            },
        };
        assert_eq!(req.path(), "/api/books/b5");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("_id").is_none());
        assert_eq!(json["titulo"], "Alma");
        assert!(json.get("fotoUrl").is_none());
    }

    #[test]
    fn allowed_user_create_uses_type_tag() {
        let req = AddAllowedUserRequest {
            identifier: "1002003004".into(),
            identifier_type: IdentifierType::NationalId,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["identifier"], "1002003004");
        assert_eq!(json["type"], "identification");
    }

    #[test]
    fn return_response_fine_is_optional() {
        let on_time: ReturnLoanResponse =
            serde_json::from_str(r#"{"message":"Devolución registrada"}"#).unwrap();
        assert!(on_time.fine.is_none());
    }
}
