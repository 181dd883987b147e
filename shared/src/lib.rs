use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// Enums
// =========================================================

/// Account role as reported by the backend at login.
///
/// Only trusted for UI branching; the backend re-validates every
/// privileged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador")]
    Administrator,
    #[serde(rename = "usuario")]
    Patron,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Patron
    }
}

/// Loan lifecycle state, computed server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "devuelto")]
    Returned,
    #[serde(rename = "vencido")]
    Overdue,
}

impl LoanStatus {
    /// Label shown in loan tables.
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Activo",
            LoanStatus::Returned => "Devuelto",
            LoanStatus::Overdue => "Vencido",
        }
    }
}

/// Kind of identifier held by an allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierType {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "identification")]
    NationalId,
}

// =========================================================
// Domain models
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
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
    #[serde(rename = "fotoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "eliminado", default)]
    pub deleted: bool,
}

impl Book {
    /// Availability is derived, never stored: at least one copy on the shelf.
    pub fn is_available(&self) -> bool {
        self.copies_available > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub blocked: bool,
}

/// A loan with its book and patron populated by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "libro")]
    pub book: Book,
    #[serde(rename = "usuario")]
    pub patron: User,
    #[serde(rename = "fechaPrestamo")]
    pub loan_date: DateTime<Utc>,
    #[serde(rename = "fechaDevolucion")]
    pub due_date: DateTime<Utc>,
    #[serde(rename = "devuelto", default)]
    pub returned: bool,
    #[serde(rename = "estado")]
    pub status: LoanStatus,
}

impl Loan {
    /// Past its due date and still out. Display-only: the backend owns the
    /// authoritative overdue computation and any resulting fine.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.returned && self.due_date < now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "prestamo", default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<String>,
    #[serde(rename = "libro")]
    pub book: Book,
    #[serde(rename = "usuario")]
    pub patron: User,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "descripcion")]
    pub reason: String,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "pagado", default)]
    pub paid: bool,
}

/// Allow-list as the backend reports it: one bucket per identifier type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedUsers {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub identifications: Vec<String>,
}

// =========================================================
// Tests
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_book_json() -> &'static str {
        r#"{
            "_id": "b1",
            "titulo": "Cien años de soledad",
            "autor": "García Márquez",
            "año": 1967,
            "editorial": "Sudamericana",
            "tipoLiteratura": "Novela",
            "cantidadDisponible": 2,
            "eliminado": false
        }"#
    }

    #[test]
    fn book_decodes_spanish_wire_names() {
        let book: Book = serde_json::from_str(sample_book_json()).unwrap();
        assert_eq!(book.id, "b1");
        assert_eq!(book.title, "Cien años de soledad");
        assert_eq!(book.year, 1967);
        assert_eq!(book.literature_type, "Novela");
        assert_eq!(book.copies_available, 2);
        assert_eq!(book.photo_url, None);
        assert!(!book.deleted);
        assert!(book.is_available());
    }

    #[test]
    fn book_with_no_copies_is_not_available() {
        let mut book: Book = serde_json::from_str(sample_book_json()).unwrap();
        book.copies_available = 0;
        assert!(!book.is_available());
    }

    #[test]
    fn role_wire_values() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrador\""
        );
        assert_eq!(serde_json::to_string(&Role::Patron).unwrap(), "\"usuario\"");
        let role: Role = serde_json::from_str("\"administrador\"").unwrap();
        assert!(role.is_admin());
    }

    #[test]
    fn loan_status_wire_values() {
        let status: LoanStatus = serde_json::from_str("\"vencido\"").unwrap();
        assert_eq!(status, LoanStatus::Overdue);
        assert_eq!(
            serde_json::to_string(&LoanStatus::Active).unwrap(),
            "\"activo\""
        );
    }

    #[test]
    fn identifier_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&IdentifierType::NationalId).unwrap(),
            "\"identification\""
        );
        assert_eq!(
            serde_json::to_string(&IdentifierType::Email).unwrap(),
            "\"email\""
        );
    }

    #[test]
    fn overdue_is_display_only_and_respects_returned_flag() {
        let book: Book = serde_json::from_str(sample_book_json()).unwrap();
        let patron = User {
            id: "u1".into(),
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            national_id: "123".into(),
            phone: "555".into(),
            role: Role::Patron,
            blocked: false,
        };
        let due = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let mut loan = Loan {
            id: "l1".into(),
            book,
            patron,
            loan_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            due_date: due,
            returned: false,
            status: LoanStatus::Active,
        };

        let before = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(!loan.is_overdue_at(before));
        assert!(loan.is_overdue_at(after));

        loan.returned = true;
        assert!(!loan.is_overdue_at(after));
    }

    #[test]
    fn allowed_users_decodes_both_buckets() {
        let json = r#"{"emails":["a@b.c"],"identifications":["1002003004"]}"#;
        let allowed: AllowedUsers = serde_json::from_str(json).unwrap();
        assert_eq!(allowed.emails, vec!["a@b.c"]);
        assert_eq!(allowed.identifications, vec!["1002003004"]);
    }
}
