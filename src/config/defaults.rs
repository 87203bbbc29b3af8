//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub mod feed {
        pub fn path() -> String {
            "feed.rss".into()
        }

        pub fn max_items() -> usize {
            20
        }
    }

    pub mod sitemap {
        pub fn path() -> String {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub fn title_separator() -> String {
        " | ".into()
    }

    pub fn stylesheets() -> Vec<String> {
        vec!["/styles.css".into()]
    }
}

// ============================================================================
// [deploy] Section Defaults
// ============================================================================

pub mod deploy {
    pub fn timeout() -> String {
        "10m".into()
    }

    pub mod remote {
        pub fn command() -> Vec<String> {
            vec!["firebase".into()]
        }

        pub fn select() -> Vec<String> {
            vec!["use".into()]
        }

        pub fn publish() -> Vec<String> {
            vec!["deploy".into(), "--only".into(), "hosting".into()]
        }
    }
}
