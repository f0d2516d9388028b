use std::fmt;

/// Navigable screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Register,
    Dashboard,
    Client,
    Product,
    Sale,
    Course,
    Chatbot,
    BoardClient,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::SignIn,
        Route::Register,
        Route::Dashboard,
        Route::Client,
        Route::Product,
        Route::Sale,
        Route::Course,
        Route::Chatbot,
        Route::BoardClient,
    ];

    /// Parse a path; trailing slashes and query strings are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::SignIn,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/client" => Route::Client,
            "/product" => Route::Product,
            "/sale" => Route::Sale,
            "/course" => Route::Course,
            "/chatbot" => Route::Chatbot,
            "/board-cliente" => Route::BoardClient,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Client => "/client",
            Route::Product => "/product",
            Route::Sale => "/sale",
            Route::Course => "/course",
            Route::Chatbot => "/chatbot",
            Route::BoardClient => "/board-cliente",
            Route::NotFound => "/404",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::SignIn | Route::Register | Route::NotFound)
    }

    /// Route actually shown: protected screens fall back to sign-in.
    pub fn resolve(self, signed_in: bool) -> Self {
        if self.requires_session() && !signed_in {
            Route::SignIn
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.path()), route);
        }
        assert_eq!(Route::parse("/product/"), Route::Product);
        assert_eq!(Route::parse("/sale?page=2"), Route::Sale);
        assert_eq!(Route::parse("/blog"), Route::NotFound);
    }

    #[test]
    fn test_protected_routes_redirect_without_session() {
        assert_eq!(Route::Product.resolve(false), Route::SignIn);
        assert_eq!(Route::Product.resolve(true), Route::Product);
        assert_eq!(Route::Register.resolve(false), Route::Register);
    }
}
