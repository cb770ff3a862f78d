//! Static route table and breadcrumb segment labels.
//!
//! The site's pages are a fixed list; the table below is the single
//! place that knows which logical paths exist, and the segment-label
//! lookup localizes path segments for breadcrumb structured data.

use crate::i18n::Locale;

/// A page in the site's static route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Logical (unprefixed) URL path.
    pub path: &'static str,
    /// Route name, unique across the table.
    pub name: &'static str,
}

/// All site pages, by logical path.
pub const ROUTES: &[Route] = &[
    Route { path: "/", name: "home" },
    Route { path: "/solutions/app", name: "solutions-app" },
    Route { path: "/solutions/dashboard", name: "solutions-dashboard" },
    Route {
        path: "/solutions/dashboard/appointments",
        name: "solutions-dashboard-appointments",
    },
    Route {
        path: "/solutions/dashboard/booking-info",
        name: "solutions-dashboard-booking-info",
    },
    Route {
        path: "/solutions/dashboard/schedules",
        name: "solutions-dashboard-schedules",
    },
    Route { path: "/contact", name: "contact" },
    Route { path: "/kyc", name: "kyc" },
    Route { path: "/v1/Privacy-and-Policy", name: "privacy" },
    Route { path: "/v1/terms-of-use", name: "terms" },
];

/// Look up a route by its logical path.
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}

/// Localized labels for known path segments: (segment, arabic, english).
const SEGMENT_LABELS: &[(&str, &str, &str)] = &[
    ("solutions", "الحلول", "Solutions"),
    ("app", "تطبيق المرضى", "Patient App"),
    ("dashboard", "لوحة التحكم", "Dashboard"),
    ("appointments", "المواعيد", "Appointments"),
    ("booking-info", "معلومات الحجز", "Booking Info"),
    ("schedules", "الجداول", "Schedules"),
    ("contact", "اتصل بنا", "Contact"),
    ("kyc", "تسجيل المؤسسات", "Organization Registration"),
    ("Privacy-and-Policy", "سياسة الخصوصية", "Privacy Policy"),
    ("terms-of-use", "شروط الاستخدام", "Terms of Use"),
];

/// Localized label for the breadcrumb root.
pub fn home_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "الرئيسية",
        Locale::En => "Home",
    }
}

/// Localized label for a known path segment, if the segment is known.
pub fn segment_label(segment: &str, locale: Locale) -> Option<&'static str> {
    SEGMENT_LABELS
        .iter()
        .find(|(token, _, _)| *token == segment)
        .map(|(_, ar, en)| match locale {
            Locale::Ar => *ar,
            Locale::En => *en,
        })
}
