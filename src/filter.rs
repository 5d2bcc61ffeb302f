//! Query-string encoding of attribute filters.
//!
//! A filter is anything that can list its set fields as `(name, value)`
//! pairs. Only set fields are encoded; fields a type does not list never
//! reach the query string.

use std::borrow::Cow;
use std::fmt::Display;
use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParam {
    pub name: Cow<'static, str>,
    pub value: String,
}

impl FilterParam {
    pub fn new(name: impl Into<Cow<'static, str>>, value: impl Display) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Maps a filter value to its wire parameters, in declaration order.
pub trait FilterParams {
    fn filter_params(&self) -> Vec<FilterParam>;
}

/// Explicit, ordered list of filter parameters built by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    params: Vec<FilterParam>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on `name` equal to `value`.
    pub fn param(mut self, name: impl Into<Cow<'static, str>>, value: impl Display) -> Self {
        self.params.push(FilterParam::new(name, value));
        self
    }

    /// Like [`Filter::param`], but a `None` value adds nothing.
    pub fn param_opt<T: Display>(
        self,
        name: impl Into<Cow<'static, str>>,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FilterParams for Filter {
    fn filter_params(&self) -> Vec<FilterParam> {
        self.params.clone()
    }
}

/// Encode a filter as `&filter[<name>]=<value>` fragments.
///
/// Returns an empty string when no filter is given or none of its fields
/// are set. Values are form-urlencoded; names are emitted verbatim.
pub fn encode_filter<F: FilterParams + ?Sized>(filter: Option<&F>) -> String {
    let Some(filter) = filter else {
        return String::new();
    };
    filter
        .filter_params()
        .iter()
        .map(|p| {
            let value: String = byte_serialize(p.value.as_bytes()).collect();
            format!("&filter[{}]={}", p.name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SampleFilter {
        bank_id: Option<String>,
        joint_account: Option<bool>,
        // not part of the wire mapping
        note: Option<String>,
    }

    impl FilterParams for SampleFilter {
        fn filter_params(&self) -> Vec<FilterParam> {
            Filter::new()
                .param_opt("bank_id", self.bank_id.as_deref())
                .param_opt("joint_account", self.joint_account)
                .filter_params()
        }
    }

    #[test]
    fn absent_filter_encodes_to_empty_string() {
        assert_eq!(encode_filter::<SampleFilter>(None), "");
    }

    #[test]
    fn unset_fields_encode_to_empty_string() {
        assert_eq!(encode_filter(Some(&SampleFilter::default())), "");
        assert_eq!(encode_filter(Some(&Filter::new())), "");
    }

    #[test]
    fn single_field_encodes_exactly() {
        let filter = SampleFilter {
            bank_id: Some("400300".into()),
            ..Default::default()
        };
        assert_eq!(encode_filter(Some(&filter)), "&filter[bank_id]=400300");
    }

    #[test]
    fn unmapped_fields_never_appear() {
        let filter = SampleFilter {
            note: Some("internal".into()),
            ..Default::default()
        };
        assert_eq!(encode_filter(Some(&filter)), "");
    }

    #[test]
    fn set_false_is_distinct_from_unset() {
        let filter = SampleFilter {
            joint_account: Some(false),
            ..Default::default()
        };
        assert_eq!(encode_filter(Some(&filter)), "&filter[joint_account]=false");
    }

    #[test]
    fn keeps_declaration_order() {
        let filter = Filter::new()
            .param("country", "GB")
            .param("bank_id", 400300)
            .param_opt::<&str>("bic", None)
            .param("account_number", "41426819");
        assert_eq!(
            encode_filter(Some(&filter)),
            "&filter[country]=GB&filter[bank_id]=400300&filter[account_number]=41426819"
        );
    }

    #[test]
    fn escapes_reserved_characters_in_values() {
        let filter = Filter::new().param("name", "Sam & Co");
        assert_eq!(encode_filter(Some(&filter)), "&filter[name]=Sam+%26+Co");
    }
}
