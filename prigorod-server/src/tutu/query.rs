//! Validated schedule search queries.

use std::sync::LazyLock;

use regex::Regex;

/// Form fields the upstream search endpoint expects alongside the
/// station parameters.
const FORM_TYPE: &str = "prigorod";
const FORM_VERSION: &str = "2.0";

static DATE_DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").unwrap());

/// Error returned when a schedule query names neither station pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required parameters: st1 and st2, or st1_num and st2_num")]
pub struct MissingStations;

/// A validated schedule search query.
///
/// The upstream search accepts stations either by name (`st1`/`st2`) or
/// by numeric identifier (`st1_num`/`st2_num`); at least one complete
/// pair is required. Empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    st1: Option<String>,
    st2: Option<String>,
    st1_num: Option<String>,
    st2_num: Option<String>,
    date: Option<String>,
}

impl ScheduleQuery {
    /// Validate raw query parameters into a search query.
    ///
    /// A `date` matching strict `DD.MM.YYYY` is rewritten to
    /// `YYYY-MM-DD`; any other non-empty value is passed through
    /// unmodified. There is no calendar validation: the upstream sees
    /// whatever the caller supplied.
    pub fn new(
        st1: Option<String>,
        st2: Option<String>,
        st1_num: Option<String>,
        st2_num: Option<String>,
        date: Option<String>,
    ) -> Result<Self, MissingStations> {
        let st1 = st1.filter(|s| !s.is_empty());
        let st2 = st2.filter(|s| !s.is_empty());
        let st1_num = st1_num.filter(|s| !s.is_empty());
        let st2_num = st2_num.filter(|s| !s.is_empty());

        let has_names = st1.is_some() && st2.is_some();
        let has_ids = st1_num.is_some() && st2_num.is_some();
        if !has_names && !has_ids {
            return Err(MissingStations);
        }

        let date = date
            .filter(|d| !d.is_empty())
            .map(|d| normalize_date(&d));

        Ok(Self {
            st1,
            st2,
            st1_num,
            st2_num,
            date,
        })
    }

    /// Query-string pairs for the upstream search endpoint.
    ///
    /// Absent fields are omitted entirely, never sent as empty. The two
    /// constant form fields always come last.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(st1) = &self.st1 {
            params.push(("st1", st1.as_str()));
        }
        if let Some(st2) = &self.st2 {
            params.push(("st2", st2.as_str()));
        }
        if let Some(st1_num) = &self.st1_num {
            params.push(("st1_num", st1_num.as_str()));
        }
        if let Some(st2_num) = &self.st2_num {
            params.push(("st2_num", st2_num.as_str()));
        }
        if let Some(date) = &self.date {
            params.push(("date", date.as_str()));
        }
        params.push(("form_type", FORM_TYPE));
        params.push(("form_version", FORM_VERSION));
        params
    }
}

/// Rewrite `DD.MM.YYYY` as `YYYY-MM-DD`; anything else passes through.
fn normalize_date(date: &str) -> String {
    match DATE_DMY.captures(date) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn requires_a_complete_station_pair() {
        assert_eq!(
            ScheduleQuery::new(None, None, None, None, None),
            Err(MissingStations)
        );

        // One half of each pair is not enough
        assert_eq!(
            ScheduleQuery::new(some("Москва"), None, None, some("456"), None),
            Err(MissingStations)
        );

        assert!(ScheduleQuery::new(some("Москва"), some("Тверь"), None, None, None).is_ok());
        assert!(ScheduleQuery::new(None, None, some("123"), some("456"), None).is_ok());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(
            ScheduleQuery::new(some(""), some("Тверь"), some(""), some(""), None),
            Err(MissingStations)
        );
    }

    #[test]
    fn date_is_rewritten_from_dmy() {
        let query =
            ScheduleQuery::new(some("A"), some("B"), None, None, some("01.02.2024")).unwrap();
        assert!(query.params().contains(&("date", "2024-02-01")));
    }

    #[test]
    fn other_dates_pass_through() {
        for raw in ["2024-02-01", "tomorrow", "1.2.2024", "01.02.24"] {
            let query =
                ScheduleQuery::new(some("A"), some("B"), None, None, some(raw)).unwrap();
            assert!(query.params().contains(&("date", raw)), "date {raw:?}");
        }
    }

    #[test]
    fn absent_fields_are_omitted() {
        let query = ScheduleQuery::new(some("A"), some("B"), None, None, None).unwrap();
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("st1", "A"),
                ("st2", "B"),
                ("form_type", "prigorod"),
                ("form_version", "2.0"),
            ]
        );
    }

    #[test]
    fn all_fields_present_keep_order() {
        let query = ScheduleQuery::new(
            some("A"),
            some("B"),
            some("1"),
            some("2"),
            some("05.06.2025"),
        )
        .unwrap();
        assert_eq!(
            query.params(),
            vec![
                ("st1", "A"),
                ("st2", "B"),
                ("st1_num", "1"),
                ("st2_num", "2"),
                ("date", "2025-06-05"),
                ("form_type", "prigorod"),
                ("form_version", "2.0"),
            ]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any strict DD.MM.YYYY date rewrites with matching components.
        #[test]
        fn dmy_rewrites_componentwise(day in 0u32..100, month in 0u32..100, year in 0u32..10000) {
            let raw = format!("{day:02}.{month:02}.{year:04}");
            let rewritten = normalize_date(&raw);
            prop_assert_eq!(rewritten, format!("{year:04}-{month:02}-{day:02}"));
        }

        /// Rewriting never changes the set of digits involved.
        #[test]
        fn rewrite_is_a_permutation(day in 1u32..=31, month in 1u32..=12, year in 1900u32..2100) {
            let raw = format!("{day:02}.{month:02}.{year:04}");
            let mut before: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
            let mut after: Vec<char> = normalize_date(&raw)
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}
