//! Fuzzy autocomplete ranking tests.

use quoting_service::search::fuzzy_search;

struct Record {
    name: &'static str,
}

fn records(names: &[&'static str]) -> Vec<Record> {
    names.iter().map(|n| Record { name: n }).collect()
}

fn search<'a>(query: &str, items: &'a [Record], limit: usize) -> Vec<&'a str> {
    fuzzy_search(query, items, |r| vec![r.name.to_string()], limit)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[test]
fn prefix_beats_substring_beats_typo() {
    let items = records(&[
        "Dupont SARL",
        "Restaurant Martin",
        "Martin Traiteur",
        "Boulangerie Martin",
    ]);

    let results = search("martin", &items, 10);
    assert_eq!(results[0], "Martin Traiteur");
    assert!(results.contains(&"Restaurant Martin"));
    assert!(results.contains(&"Boulangerie Martin"));
    assert!(!results.contains(&"Dupont SARL"));
}

#[test]
fn diacritics_are_folded() {
    let items = records(&["Pépinière du Sud", "Pepinerie Nord"]);
    let results = search("pépi", &items, 10);
    assert_eq!(results[0], "Pépinière du Sud");

    let results = search("pepi", &items, 10);
    assert_eq!(results[0], "Pépinière du Sud");
}

#[test]
fn single_typo_still_matches() {
    let items = records(&["Boulangerie Martin", "Garage Duval"]);
    let results = search("boulnagerie", &items, 10);
    assert_eq!(results, vec!["Boulangerie Martin"]);
}

#[test]
fn unrelated_text_is_cut_off() {
    let items = records(&["Garage Duval", "Fleuriste Iris"]);
    assert!(search("charcuterie", &items, 10).is_empty());
}

#[test]
fn empty_query_passes_through_in_order() {
    let items = records(&["B Corp", "A Corp", "C Corp"]);
    assert_eq!(search("", &items, 2), vec!["B Corp", "A Corp"]);
    assert_eq!(search("   ", &items, 10).len(), 3);
}

#[test]
fn ranking_is_stable_for_equal_scores() {
    // Two identical prefix hits keep their input order.
    let items = records(&["Martin Nord", "Martin Sud"]);
    assert_eq!(search("martin", &items, 10), vec!["Martin Nord", "Martin Sud"]);
}

#[test]
fn limit_caps_the_result_count() {
    let items = records(&["Martin A", "Martin B", "Martin C", "Martin D"]);
    assert_eq!(search("martin", &items, 2).len(), 2);
}
