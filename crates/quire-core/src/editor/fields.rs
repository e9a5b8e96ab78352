//! Scalar setters: free-text fields, the diagram flag and environment toggles.

use crate::models::{Browser, DatabaseTarget, Document};

impl Document {
    pub fn set_task_name(&mut self, name: &str) -> bool {
        self.task_name = name.trim().to_string();
        true
    }

    pub fn set_scope(&mut self, scope: &str) -> bool {
        self.scope = scope.trim().to_string();
        true
    }

    /// Stores the impact text; each non-empty line renders as one bullet.
    pub fn set_impact(&mut self, impact: &str) -> bool {
        self.impact = impact.trim().to_string();
        true
    }

    pub fn set_make_diagram_available(&mut self, enabled: bool) -> bool {
        self.make_diagram_available = enabled;
        true
    }

    pub fn set_browser(&mut self, browser: Browser, tested: bool) -> bool {
        self.browsers_tested.set(browser, tested);
        true
    }

    pub fn set_database(&mut self, target: DatabaseTarget, tested: bool) -> bool {
        self.databases_tested.set(target, tested);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Browser, DatabaseTarget, Document};

    #[test]
    fn test_scalar_setters() {
        let mut document = Document::default();
        assert!(document.set_task_name("  ACT-1 "));
        assert!(document.set_scope("login flow"));
        assert!(document.set_impact("\nfaster login\nless errors\n"));
        assert!(document.set_make_diagram_available(true));
        assert!(document.set_browser(Browser::Chrome, true));
        assert!(document.set_database(DatabaseTarget::Postgres, true));

        assert_eq!(document.task_name, "ACT-1");
        assert_eq!(document.impact, "faster login\nless errors");
        assert!(document.make_diagram_available);
        assert!(document.browsers_tested.chrome);
        assert!(document.databases_tested.postgres);
    }
}
