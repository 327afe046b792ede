//! Positional queries over a parsed page.
//!
//! The site has no stable ids for most fields, so values are addressed as
//! "the n-th node matching a selector under some scope". Positions are
//! 1-based like the page's own row numbering; position 0 never matches.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Root scope of a document.
pub fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}

/// Collapse runs of whitespace and trim.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Query helpers on an element scope.
pub trait NodeQuery<'a> {
    /// The `position`-th (1-based) descendant matching `selector`.
    fn nth(&self, selector: &Selector, position: usize) -> Option<ElementRef<'a>>;

    /// Cleaned full text of the `position`-th match, if non-empty.
    fn nth_text(&self, selector: &Selector, position: usize) -> Option<String>;

    /// Cleaned text of the whole subtree, if non-empty.
    fn full_text(&self) -> Option<String>;

    /// Attribute value of the `position`-th match, if non-empty.
    fn nth_attr(&self, selector: &Selector, position: usize, attr: &str) -> Option<String>;

    /// Cleaned text of this element's own text nodes (children only).
    fn own_text(&self) -> String;

    /// First match whose own text is non-empty.
    fn first_own_text(&self, selector: &Selector) -> Option<String>;

    /// Own text of every match, in document order, blanks skipped.
    fn own_texts(&self, selector: &Selector) -> Vec<String>;
}

impl<'a> NodeQuery<'a> for ElementRef<'a> {
    fn nth(&self, selector: &Selector, position: usize) -> Option<ElementRef<'a>> {
        position
            .checked_sub(1)
            .and_then(|index| self.select(selector).nth(index))
    }

    fn nth_text(&self, selector: &Selector, position: usize) -> Option<String> {
        self.nth(selector, position).and_then(|el| el.full_text())
    }

    fn full_text(&self) -> Option<String> {
        Some(clean_text(&self.text().collect::<String>())).filter(|text| !text.is_empty())
    }

    fn nth_attr(&self, selector: &Selector, position: usize, attr: &str) -> Option<String> {
        self.nth(selector, position)
            .and_then(|el| el.value().attr(attr))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn own_text(&self) -> String {
        let raw: String = self
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| &**text)
            .collect::<Vec<_>>()
            .join(" ");
        clean_text(&raw)
    }

    fn first_own_text(&self, selector: &Selector) -> Option<String> {
        self.select(selector)
            .map(|el| el.own_text())
            .find(|text| !text.is_empty())
    }

    fn own_texts(&self, selector: &Selector) -> Vec<String> {
        self.select(selector)
            .flat_map(|el| {
                el.children()
                    .filter_map(|node| node.value().as_text())
                    .map(|text| clean_text(text))
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Try each candidate selector in priority order; the first one yielding
/// non-empty own text wins.
pub fn first_present(scope: &ElementRef<'_>, candidates: &[&Selector]) -> Option<String> {
    candidates
        .iter()
        .find_map(|selector| scope.first_own_text(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul>
            <li class="item">  first
               item </li>
            <li class="item"><a href="/two">second</a></li>
            <li class="item"><a href="  ">blank link</a></li>
          </ul>
          <table><tr>
            <td>1</td><td><span><a>Team</a></span></td><td>30</td><td><span>60</span></td><td><b>65</b></td>
          </tr></table>
        </body></html>
    "#;

    fn sel(s: &str) -> Selector {
        parse_selector(s).unwrap()
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
        assert!(parse_selector("span[class*=\"size\"]").is_ok());
    }

    #[test]
    fn test_nth_is_one_based_and_bounds_checked() {
        let document = Html::parse_document(PAGE);
        let scope = root(&document);
        let item = sel("li.item");

        assert!(scope.nth(&item, 0).is_none());
        assert_eq!(scope.nth_text(&item, 1).as_deref(), Some("first item"));
        assert_eq!(scope.nth_text(&item, 2).as_deref(), Some("second"));
        assert!(scope.nth(&item, 4).is_none());
    }

    #[test]
    fn test_nth_attr_skips_blank_values() {
        let document = Html::parse_document(PAGE);
        let scope = root(&document);
        let link = sel("li a");

        assert_eq!(scope.nth_attr(&link, 1, "href").as_deref(), Some("/two"));
        assert!(scope.nth_attr(&link, 2, "href").is_none());
        assert!(scope.nth_attr(&link, 1, "title").is_none());
    }

    #[test]
    fn test_own_texts_only_direct_children() {
        let document = Html::parse_document(PAGE);
        let scope = root(&document);

        assert_eq!(scope.own_texts(&sel("td")), ["1", "30"]);
    }

    #[test]
    fn test_first_present_priority() {
        let document = Html::parse_document(PAGE);
        let scope = root(&document);
        let bold = sel("td > b");
        let plain = sel("td > span");
        let missing = sel("td > em");

        assert_eq!(first_present(&scope, &[&bold, &plain]).as_deref(), Some("65"));
        assert_eq!(first_present(&scope, &[&plain, &bold]).as_deref(), Some("60"));
        assert_eq!(first_present(&scope, &[&missing, &plain]).as_deref(), Some("60"));
        assert!(first_present(&scope, &[&missing]).is_none());
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a \n\t b  "), "a b");
        assert_eq!(clean_text("   "), "");
    }
}
