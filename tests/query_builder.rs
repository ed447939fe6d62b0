use countries_api::db::build_list_query;
use countries_api::models::{GdpSort, ListFilter};

fn filter(region: Option<&str>, currency: Option<&str>, sort: Option<&str>) -> ListFilter {
    ListFilter {
        region: region.map(str::to_string),
        currency: currency.map(str::to_string),
        sort: sort.map(str::to_string),
    }
}

#[test]
fn no_filters_means_full_set_in_storage_order() {
    let (sql, params) = build_list_query(&ListFilter::default());
    assert!(sql.starts_with("select "));
    assert!(!sql.contains("where"));
    assert!(!sql.contains("order by"));
    assert!(params.is_empty());
}

#[test]
fn region_filter_binds_first_placeholder() {
    let (sql, params) = build_list_query(&filter(Some("Europe"), None, None));
    assert!(sql.ends_with(" where region = $1"));
    assert_eq!(params, vec!["Europe".to_string()]);
}

#[test]
fn currency_alone_still_starts_the_where_clause() {
    let (sql, params) = build_list_query(&filter(None, Some("EUR"), None));
    assert!(sql.ends_with(" where currency_code = $1"));
    assert_eq!(params, vec!["EUR".to_string()]);
}

#[test]
fn combined_filters_chain_in_order() {
    let (sql, params) = build_list_query(&filter(Some("Europe"), Some("EUR"), None));
    assert!(sql.contains(" where region = $1 and currency_code = $2"));
    assert_eq!(params, vec!["Europe".to_string(), "EUR".to_string()]);
}

#[test]
fn gdp_sorts_pin_nulls_last() {
    let (asc, _) = build_list_query(&filter(None, None, Some("gdp_asc")));
    assert!(asc.ends_with(" order by estimated_gdp asc nulls last"));

    let (desc, _) = build_list_query(&filter(None, None, Some("gdp_desc")));
    assert!(desc.ends_with(" order by estimated_gdp desc nulls last"));
}

#[test]
fn unknown_sort_value_is_ignored() {
    let (sql, _) = build_list_query(&filter(None, None, Some("population")));
    assert!(!sql.contains("order by"));
}

#[test]
fn empty_query_values_do_not_filter() {
    // `?region=&currency=` arrives as empty strings, which the original
    // service treats the same as absent parameters.
    let (sql, params) = build_list_query(&filter(Some(""), Some(""), None));
    assert!(!sql.contains("where"));
    assert!(params.is_empty());
}

#[test]
fn sort_tokens_parse_exactly() {
    assert_eq!(GdpSort::from_query("gdp_asc"), Some(GdpSort::Asc));
    assert_eq!(GdpSort::from_query("gdp_desc"), Some(GdpSort::Desc));
    assert_eq!(GdpSort::from_query("GDP_DESC"), None);
    assert_eq!(GdpSort::from_query(""), None);
}
