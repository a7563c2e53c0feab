// ============================================================================
// ROUTER - Typed routes + route guard
// ============================================================================
// The guard only asks "is there a usable token". No roles, no permissions.
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    VerifyOtp,
    CompleteProfile,
    Dashboard,
    Programs,
    ProgramDetail(String),
    ProgramApply(String),
    Applications,
    ApplicationDetail(String),
    Notifications,
    News,
    NewsDetail(String),
    Profile,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        // drop query/fragment and trailing slash
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["verify-otp"] => Route::VerifyOtp,
            ["complete-profile"] => Route::CompleteProfile,
            ["dashboard"] => Route::Dashboard,
            ["programs"] => Route::Programs,
            ["programs", id] => Route::ProgramDetail(id.to_string()),
            ["programs", id, "apply"] => Route::ProgramApply(id.to_string()),
            ["applications"] => Route::Applications,
            ["applications", id] => Route::ApplicationDetail(id.to_string()),
            ["notifications"] => Route::Notifications,
            ["news"] => Route::News,
            ["news", id] => Route::NewsDetail(id.to_string()),
            ["profile"] => Route::Profile,
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::VerifyOtp => "/verify-otp".to_string(),
            Route::CompleteProfile => "/complete-profile".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Programs => "/programs".to_string(),
            Route::ProgramDetail(id) => format!("/programs/{}", id),
            Route::ProgramApply(id) => format!("/programs/{}/apply", id),
            Route::Applications => "/applications".to_string(),
            Route::ApplicationDetail(id) => format!("/applications/{}", id),
            Route::Notifications => "/notifications".to_string(),
            Route::News => "/news".to_string(),
            Route::NewsDetail(id) => format!("/news/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Screens behind the token check
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Programs
                | Route::ProgramDetail(_)
                | Route::ProgramApply(_)
                | Route::Applications
                | Route::ApplicationDetail(_)
                | Route::Notifications
                | Route::Profile
        )
    }

    /// Screens a signed-in user has no reason to see
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::VerifyOtp)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Portal UMKM",
            Route::Login => "Masuk",
            Route::Register => "Daftar",
            Route::VerifyOtp => "Verifikasi OTP",
            Route::CompleteProfile => "Lengkapi Profil",
            Route::Dashboard => "Beranda",
            Route::Programs => "Program",
            Route::ProgramDetail(_) => "Detail Program",
            Route::ProgramApply(_) => "Ajukan Program",
            Route::Applications => "Pengajuan Saya",
            Route::ApplicationDetail(_) => "Detail Pengajuan",
            Route::Notifications => "Notifikasi",
            Route::News => "Berita",
            Route::NewsDetail(_) => "Berita",
            Route::Profile => "Profil",
            Route::NotFound => "Halaman tidak ditemukan",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    /// `replace` rewrites the current history entry so Back does not return
    /// to the screen that was refused
    Redirect { to: Route, replace: bool },
}

pub fn guard(route: Route, authenticated: bool) -> GuardDecision {
    if route.is_guarded() && !authenticated {
        return GuardDecision::Redirect {
            to: Route::Login,
            replace: true,
        };
    }
    if route.is_guest_only() && authenticated {
        return GuardDecision::Redirect {
            to: Route::Dashboard,
            replace: true,
        };
    }
    GuardDecision::Render(route)
}
