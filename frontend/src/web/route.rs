//! Route definitions (domain model).
//!
//! Pure business layer with no DOM or web_sys dependency: every page of the
//! application, its URL path, and whether reaching it requires a verified
//! session.

use biblioteca_shared::Role;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login page (default route).
    #[default]
    Login,
    AdminDashboard,
    AdminBooks,
    AdminUsers,
    AdminLoans,
    AdminFines,
    AdminAllowedUsers,
    /// Patron profile (the patron landing page).
    Profile,
    Catalog,
    MyLoans,
    MyFines,
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/admin/dashboard" => Self::AdminDashboard,
            "/admin/books" => Self::AdminBooks,
            "/admin/users" => Self::AdminUsers,
            "/admin/loans" => Self::AdminLoans,
            "/admin/fines" => Self::AdminFines,
            "/admin/allowed-users" => Self::AdminAllowedUsers,
            "/usuario/perfil" => Self::Profile,
            "/usuario/catalogo" => Self::Catalog,
            "/usuario/prestamos" => Self::MyLoans,
            "/usuario/multas" => Self::MyFines,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminBooks => "/admin/books",
            Self::AdminUsers => "/admin/users",
            Self::AdminLoans => "/admin/loans",
            Self::AdminFines => "/admin/fines",
            Self::AdminAllowedUsers => "/admin/allowed-users",
            Self::Profile => "/usuario/perfil",
            Self::Catalog => "/usuario/catalogo",
            Self::MyLoans => "/usuario/prestamos",
            Self::MyFines => "/usuario/multas",
            Self::NotFound => "/404",
        }
    }

    /// Guard predicate: every page except login and 404 needs a verified
    /// session before it renders.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// Administrative panel routes; shown in the admin shell only.
    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            Self::AdminDashboard
                | Self::AdminBooks
                | Self::AdminUsers
                | Self::AdminLoans
                | Self::AdminFines
                | Self::AdminAllowedUsers
        )
    }

    /// Where a fresh login lands, by role.
    pub fn landing_for(role: Role) -> Self {
        if role.is_admin() {
            Self::AdminDashboard
        } else {
            Self::Profile
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 12] = [
        AppRoute::Login,
        AppRoute::AdminDashboard,
        AppRoute::AdminBooks,
        AppRoute::AdminUsers,
        AppRoute::AdminLoans,
        AppRoute::AdminFines,
        AppRoute::AdminAllowedUsers,
        AppRoute::Profile,
        AppRoute::Catalog,
        AppRoute::MyLoans,
        AppRoute::MyFines,
        AppRoute::NotFound,
    ];

    #[test]
    fn paths_round_trip() {
        for route in ALL {
            if route == AppRoute::NotFound {
                continue;
            }
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn only_login_and_not_found_are_public() {
        for route in ALL {
            let public = matches!(route, AppRoute::Login | AppRoute::NotFound);
            assert_eq!(route.requires_auth(), !public, "{route}");
        }
    }

    #[test]
    fn admin_routes_are_flagged() {
        assert!(AppRoute::AdminAllowedUsers.admin_only());
        assert!(!AppRoute::Catalog.admin_only());
        assert!(!AppRoute::Login.admin_only());
    }

    #[test]
    fn landing_page_depends_on_role() {
        assert_eq!(
            AppRoute::landing_for(Role::Administrator),
            AppRoute::AdminDashboard
        );
        assert_eq!(AppRoute::landing_for(Role::Patron), AppRoute::Profile);
    }
}
