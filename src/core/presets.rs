//! Built-in rule tables and file lists.

use crate::error::Result;
use crate::rewrite::{import_rules, ImportClass, ImportRename, Rule, RuleTable};

/// Source suffixes scanned in discovery mode.
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Default discovery root.
pub const DEFAULT_ROOT: &str = "src";

/// UI components whose files moved to lower-case names.
pub const COMPONENT_RENAMES: &[(&str, &str)] = &[
    ("Button", "button"),
    ("Input", "input"),
    ("Modal", "modal"),
    ("Toast", "toast"),
    ("LoadingSpinner", "loadingspinner"),
];

/// Names fixed in the hand-maintained file list.
pub const FIXED_LIST_RENAMES: &[(&str, &str)] =
    &[("Button", "button"), ("Input", "input"), ("Modal", "modal")];

/// Files known to import renamed UI components.
pub const KNOWN_IMPORT_FILES: &[&str] = &[
    "src/components/auth/AccountDeletionDialog.tsx",
    "src/components/auth/EmailChangeDialog.tsx",
    "src/components/auth/SessionManagement.tsx",
    "src/components/subscription/ProrationPreview.tsx",
    "src/components/subscription/SubscriptionManagement.tsx",
    "src/pages/LoginPage-new.tsx",
    "src/pages/auth/RestoreAccount.tsx",
    "src/pages/auth/VerifyEmailChange.tsx",
    "src/components/UI/Modal.tsx",
];

pub const LANDING_PAGE_PATH: &str = "src/pages/LandingPage.tsx";

/// (label, marker, end pattern) for each landing-page section to hide.
const LANDING_SECTIONS: &[(&str, &str, &str)] = &[
    (
        "Trust Indicators",
        "{/* Trust Indicators */}",
        r"</div>\s*</div>",
    ),
    (
        "Additional Trust Elements",
        "{/* Additional Trust Elements */}",
        r"support@errorwise\.com.*?</div>",
    ),
    (
        "Social Icons",
        "{/* Social Icons with Enhanced Glow */}",
        r"</div>",
    ),
    ("Company Section", "{/* Company Section */}", r"</ul>\s*</div>"),
    ("Support Section", "{/* Support Section */}", r"</ul>\s*</div>"),
];

pub fn renames(pairs: &[(&str, &str)]) -> Vec<ImportRename> {
    pairs
        .iter()
        .map(|(from, to)| ImportRename::new(from, to))
        .collect()
}

/// Discovery-mode table: `/UI/` and `./` imports for every rename.
pub fn component_imports(renames: &[ImportRename]) -> Result<RuleTable> {
    let rules = import_rules(
        renames,
        &[ImportClass::UiDirectory, ImportClass::SameDirectory],
    )?;
    Ok(RuleTable::new("component-imports").with_rules(rules))
}

/// Fixed-list table: `/UI/` imports only.
pub fn ui_imports(renames: &[ImportRename]) -> Result<RuleTable> {
    let rules = import_rules(renames, &[ImportClass::UiDirectory])?;
    Ok(RuleTable::new("ui-imports").with_rules(rules))
}

/// Landing-page edits: button text first, then each hidden section.
pub fn landing_page() -> Result<RuleTable> {
    let mut table = RuleTable::new("landing-page");
    table.push(Rule::literal("Get Started Free", "Sign In")?);
    for (label, marker, end) in LANDING_SECTIONS {
        table.push(Rule::section(label, marker, end)?);
    }
    Ok(table)
}

/// Every built-in table, for listing.
pub fn all() -> Result<Vec<RuleTable>> {
    Ok(vec![
        component_imports(&renames(COMPONENT_RENAMES))?,
        ui_imports(&renames(FIXED_LIST_RENAMES))?,
        landing_page()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING: &str = r#"        <div className="hero">
          <Link to="/register">
                Get Started Free
          </Link>
          {/* Trust Indicators */}
          <div className="trust">
            <div>Trusted by developers at...</div>
          </div>
          </div>

          {/* Additional Trust Elements */}
          <div className="mt-8">
            <p>Questions? support@errorwise.com</p>
          </div>
        </div>
        <footer>
              {/* Social Icons with Enhanced Glow */}
              <div className="flex">
                <a href="https://github.com">GitHub</a>
              </div>
            {/* Company Section */}
            <div>
              <ul>
                <li>About</li>
              </ul>
            </div>
            {/* Support Section */}
            <div>
              <ul>
                <li>Help Center</li>
              </ul>
            </div>
        </footer>
"#;

    #[test]
    fn builtin_tables_compile() {
        let tables = all().unwrap();
        assert_eq!(tables.len(), 3);
        // 5 names x 2 classes x 2 quote styles
        assert_eq!(tables[0].len(), 20);
        assert_eq!(tables[1].len(), 6);
        assert_eq!(tables[2].len(), 1 + LANDING_SECTIONS.len());
    }

    #[test]
    fn landing_page_hides_every_section() {
        let table = landing_page().unwrap();
        let out = table.apply(LANDING);

        assert!(!out.contains("Get Started Free"));
        assert!(out.contains("Sign In"));
        for (label, marker, _) in LANDING_SECTIONS {
            assert!(!out.contains(marker), "marker still present: {}", marker);
            assert!(
                out.contains(&format!("{{/* {} - Hidden for deployment */}}", label)),
                "missing annotation for {}",
                label
            );
        }
    }

    #[test]
    fn landing_page_is_idempotent() {
        let table = landing_page().unwrap();
        let once = table.apply(LANDING);
        assert_eq!(table.apply(&once), once);
    }

    #[test]
    fn component_imports_are_idempotent() {
        let table = component_imports(&renames(COMPONENT_RENAMES)).unwrap();
        let text = "import { Toast } from \"../UI/Toast\";\nimport Modal from './Modal';\nimport S from '@/components/UI/LoadingSpinner';\n";
        let once = table.apply(text);
        assert_eq!(
            once,
            "import { Toast } from \"../UI/toast\";\nimport Modal from './modal';\nimport S from '@/components/UI/loadingspinner';\n"
        );
        assert_eq!(table.apply(&once), once);
    }

    #[test]
    fn text_without_patterns_is_untouched() {
        let text = "export const answer = 42;\n";
        for table in all().unwrap() {
            assert_eq!(table.apply(text), text, "table {} changed text", table.name);
        }
    }
}
