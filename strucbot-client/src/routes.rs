/// Screens of the client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Chat,
    Profile,
    Settings,
}

impl Route {
    /// The login and register forms are the only public screens.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

/// Route guard. A protected destination without a session redirects to the
/// login form; an unknown destination lands on the chat when a session
/// exists and on the login form otherwise.
pub fn resolve(requested: Option<Route>, authenticated: bool) -> Route {
    match requested {
        Some(route) if route.requires_auth() && !authenticated => Route::Login,
        Some(route) => route,
        None if authenticated => Route::Chat,
        None => Route::Login,
    }
}
