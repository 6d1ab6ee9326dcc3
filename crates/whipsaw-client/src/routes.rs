//! Page table and the client-side route guard.

use uuid::Uuid;

use crate::session::Session;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Who may render a page.
///
/// `AdminOnly` and `Authenticated` behave the same: there is one privilege
/// tier, and both require a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    AdminOnly,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Work,
    WorkDetail(Uuid),
    Blog,
    BlogDetail(Uuid),
    Contact,
    AdminLogin,
    AdminDashboard,
    NewBlog,
    EditBlog(Uuid),
    NewWork,
    EditWork(Uuid),
    NotFound,
}

impl Page {
    pub fn access(&self) -> Access {
        match self {
            Page::AdminDashboard => Access::AdminOnly,
            Page::NewBlog | Page::EditBlog(_) | Page::NewWork | Page::EditWork(_) => {
                Access::Authenticated
            }
            _ => Access::Public,
        }
    }

    /// Resolve a location path to a page. Unknown paths and detail paths
    /// with an id that is not a UUID resolve to `NotFound`.
    pub fn from_path(path: &str) -> Page {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let id = |raw: &str, page: fn(Uuid) -> Page| {
            Uuid::parse_str(raw).map(page).unwrap_or(Page::NotFound)
        };

        match segments.as_slice() {
            [] => Page::Home,
            ["about"] => Page::About,
            ["work"] => Page::Work,
            ["work", raw] => id(*raw, Page::WorkDetail),
            ["blog"] => Page::Blog,
            ["blog", raw] => id(*raw, Page::BlogDetail),
            ["contact"] => Page::Contact,
            ["login"] | ["admin", "login"] => Page::AdminLogin,
            ["admin"] | ["admin", "dashboard"] => Page::AdminDashboard,
            ["admin", "blog", "new"] => Page::NewBlog,
            ["admin", "blog", raw, "edit"] => id(*raw, Page::EditBlog),
            ["admin", "work", "new"] => Page::NewWork,
            ["admin", "work", raw, "edit"] => id(*raw, Page::EditWork),
            _ => Page::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::About => "/about".to_string(),
            Page::Work => "/work".to_string(),
            Page::WorkDetail(id) => format!("/work/{id}"),
            Page::Blog => "/blog".to_string(),
            Page::BlogDetail(id) => format!("/blog/{id}"),
            Page::Contact => "/contact".to_string(),
            Page::AdminLogin => LOGIN_PATH.to_string(),
            Page::AdminDashboard => DASHBOARD_PATH.to_string(),
            Page::NewBlog => "/admin/blog/new".to_string(),
            Page::EditBlog(id) => format!("/admin/blog/{id}/edit"),
            Page::NewWork => "/admin/work/new".to_string(),
            Page::EditWork(id) => format!("/admin/work/{id}/edit"),
            Page::NotFound => "/404".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(String),
}

/// Decide whether `page` renders for the current session.
pub fn guard(page: &Page, session: &Session) -> RouteDecision {
    match page.access() {
        Access::Public => RouteDecision::Render,
        Access::AdminOnly | Access::Authenticated if session.is_authenticated() => {
            RouteDecision::Render
        }
        Access::AdminOnly | Access::Authenticated => {
            RouteDecision::Redirect(LOGIN_PATH.to_string())
        }
    }
}

/// Where the client navigates after a successful login.
pub fn after_login() -> Page {
    Page::AdminDashboard
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{MemoryStorage, SESSION_SLOT, SessionStorage};

    fn anonymous() -> Session {
        Session::load(Arc::new(MemoryStorage::new()))
    }

    fn signed_in() -> Session {
        let mut session = anonymous();
        session.save("token", "admin");
        session
    }

    #[test]
    fn test_public_pages_render_for_anyone() {
        for path in ["/", "/about", "/work", "/blog", "/contact", "/admin/login"] {
            let page = Page::from_path(path);
            assert_eq!(guard(&page, &anonymous()), RouteDecision::Render, "{path}");
        }
    }

    #[test]
    fn test_admin_pages_redirect_when_anonymous() {
        let id = Uuid::new_v4();
        let pages = [
            Page::AdminDashboard,
            Page::NewBlog,
            Page::EditBlog(id),
            Page::NewWork,
            Page::EditWork(id),
        ];
        for page in pages {
            assert_eq!(
                guard(&page, &anonymous()),
                RouteDecision::Redirect(LOGIN_PATH.to_string())
            );
            assert_eq!(guard(&page, &signed_in()), RouteDecision::Render);
        }
    }

    #[test]
    fn test_malformed_stored_session_redirects() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_SLOT, "garbage".to_string());
        let session = Session::load(storage);

        assert_eq!(
            guard(&Page::AdminDashboard, &session),
            RouteDecision::Redirect(LOGIN_PATH.to_string())
        );
    }

    #[test]
    fn test_path_round_trip_for_detail_pages() {
        let id = Uuid::new_v4();
        for page in [Page::BlogDetail(id), Page::EditWork(id), Page::WorkDetail(id)] {
            assert_eq!(Page::from_path(&page.path()), page);
        }
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Page::from_path("/blog/not-a-uuid"), Page::NotFound);
        assert_eq!(Page::from_path("/nowhere"), Page::NotFound);
        assert_eq!(Page::from_path("/blog?page=2"), Page::Blog);
    }

    #[test]
    fn test_login_lands_on_dashboard() {
        assert_eq!(after_login().path(), DASHBOARD_PATH);
    }
}
