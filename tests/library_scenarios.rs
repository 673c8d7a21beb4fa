//! End-to-end scenarios through the public API.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    thread,
};

use library_catalog::{
    Book, Catalog, CatalogError, Condition, Library, SmallCatalog, StrategyKind, TrackingState,
};

fn book(title: &str, authors: &[&str], year: i32) -> Book {
    Book::new(title, authors.iter().copied(), year).unwrap()
}

#[test]
fn lending_day() {
    let holes = book("Holes", &["Louis Sachar"], 1998);
    let matilda = book("Matilda", &["Roald Dahl"], 1988);
    let bfg = book("The BFG", &["Roald Dahl"], 1982);

    let mut catalog = Catalog::new();
    let holes_copy = catalog.buy(&holes);
    let matilda_copies = [catalog.buy(&matilda), catalog.buy(&matilda)];
    let bfg_copy = catalog.buy(&bfg);

    assert_eq!(catalog.find("Roald Dahl"), vec![matilda.clone(), bfg.clone()]);

    catalog.checkout(&matilda_copies[0]).unwrap();
    catalog.checkout(&holes_copy).unwrap();
    assert_eq!(catalog.available_copies(&matilda), HashSet::from([matilda_copies[1].clone()]));
    assert!(matches!(
        catalog.checkout(&holes_copy),
        Err(CatalogError::InvalidState { state: Some(TrackingState::CheckedOut), .. })
    ));

    holes_copy.set_condition(Condition::Damaged);
    catalog.checkin(&holes_copy).unwrap();
    catalog.lose(&bfg_copy).unwrap();

    assert_eq!(catalog.find("Roald Dahl"), vec![matilda]);
    assert_eq!(catalog.find("The BFG"), Vec::<Book>::new());
    assert_eq!(
        catalog.available_copies(&holes).iter().map(|c| c.condition()).collect::<Vec<_>>(),
        vec![Condition::Damaged]
    );
    assert_eq!(catalog.history().len(), 8);
}

#[test]
fn small_and_big_agree_on_exact_queries() {
    let books = [
        book("Bible", &["Moses"], 1000),
        book("Bible", &["Paul"], 1900),
        book("Biography", &["Bible"], 1500),
        book("Holes", &["Louis Sachar"], 1998),
    ];
    let mut small = SmallCatalog::new();
    let mut linear = Catalog::with_strategy(StrategyKind::Linear);
    for b in &books {
        small.buy(b);
        linear.buy(b);
    }

    for query in ["Bible", "Moses", "Holes", "Louis Sachar", "Nothing"] {
        assert_eq!(small.find(query), linear.find(query), "query {query:?}");
    }
    assert_eq!(small.find("Bible").first().map(Book::year), Some(1900));
}

#[test]
fn catalog_behind_external_lock() {
    let b = book("Shared", &["Author"], 2000);
    let catalog = Arc::new(Mutex::new(Catalog::new()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let b = b.clone();
            thread::spawn(move || {
                let copy = catalog.lock().unwrap().buy(&b);
                catalog.lock().unwrap().checkout(&copy).unwrap();
                catalog.lock().unwrap().checkin(&copy).unwrap();
                copy
            })
        })
        .collect();

    let copies: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let catalog = catalog.lock().unwrap();
    assert_eq!(catalog.available_copies(&b), copies);
    assert_eq!(catalog.find("Shared"), vec![b]);
}
