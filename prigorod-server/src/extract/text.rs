//! Text cleanup helpers shared by the extractors.

use scraper::ElementRef;

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Every text field leaves the extractors through this function, so
/// markup line breaks and indentation never reach the output.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapsed text content of an element and its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_interior_runs() {
        assert_eq!(
            collapse_whitespace("Москва   -\n\t Тверь "),
            "Москва - Тверь"
        );
    }

    #[test]
    fn empty_and_blank_collapse_to_empty() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Collapsing is idempotent.
        #[test]
        fn collapse_is_idempotent(s in ".*") {
            let once = collapse_whitespace(&s);
            prop_assert_eq!(collapse_whitespace(&once), once);
        }

        /// Collapsed text never contains consecutive spaces.
        #[test]
        fn no_double_spaces(s in ".*") {
            prop_assert!(!collapse_whitespace(&s).contains("  "));
        }
    }
}
