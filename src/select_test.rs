use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Deck {
    cards: Vec<String>,
    loading: bool,
}

impl Slice for Deck {
    const KEY: &'static str = "deck";

    fn initial() -> Self {
        Self { cards: Vec::new(), loading: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Score(u32);

impl Slice for Score {
    const KEY: &'static str = "score";

    fn initial() -> Self {
        Self(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct NotADeck;

impl Slice for NotADeck {
    const KEY: &'static str = "deck";

    fn initial() -> Self {
        Self
    }
}

fn deck(cards: &[&str], loading: bool) -> Deck {
    Deck { cards: cards.iter().map(ToString::to_string).collect(), loading }
}

#[test]
fn repeated_calls_return_cached_output() {
    let cards = Memoized::new(SliceSelector::<Deck>::new(), |d| d.cards.clone());
    let state = StateTree::new().with_slice(deck(&["A", "B"], false));

    let first = cards.select(&state);
    let second = cards.select(&state);

    assert_eq!(*first, vec!["A".to_string(), "B".to_string()]);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cards.recomputations(), 1);
}

#[test]
fn absent_slice_matches_explicit_default() {
    let loading = Memoized::new(SliceSelector::<Deck>::new(), |d| d.loading);
    let absent = StateTree::new();
    let explicit = StateTree::new().with_slice(Deck::initial());

    assert_eq!(loading.select(&absent), loading.select(&explicit));
    assert!(*loading.select(&absent));
}

#[test]
fn repeated_misses_share_the_default_allocation() {
    let resolver = SliceSelector::<Deck>::new();
    let cards = Memoized::new(&resolver, |d| d.cards.len());

    let a = cards.select(&StateTree::new());
    let b = cards.select(&StateTree::new().with_slice(Score(4)));

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cards.recomputations(), 1);
    assert!(Arc::ptr_eq(&resolver.select(&StateTree::new()), resolver.default_slice()));
}

#[test]
fn unrelated_slice_change_is_isolated() {
    let cards = Memoized::new(SliceSelector::<Deck>::new(), |d| d.cards.clone());
    let t1 = StateTree::new().with_slice(deck(&["A"], false)).with_slice(Score(1));
    let t2 = t1.with_slice(Score(2));

    let before = cards.select(&t1);
    let after = cards.select(&t2);

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(cards.recomputations(), 1);
}

#[test]
fn new_slice_reference_invalidates_cache() {
    let cards = Memoized::new(SliceSelector::<Deck>::new(), |d| d.cards.clone());
    let t1 = StateTree::new().with_slice(deck(&["A"], false));
    let t2 = t1.with_slice(deck(&["A", "C"], false));

    assert_eq!(*cards.select(&t1), vec!["A".to_string()]);
    assert_eq!(*cards.select(&t2), vec!["A".to_string(), "C".to_string()]);
    assert_eq!(cards.recomputations(), 2);
}

#[test]
fn equal_but_distinct_slice_still_recomputes() {
    let cards = Memoized::new(SliceSelector::<Deck>::new(), |d| d.cards.clone());
    let t1 = StateTree::new().with_slice(deck(&["A"], false));
    let t2 = t1.with_slice(deck(&["A"], false));

    assert_eq!(cards.select(&t1), cards.select(&t2));
    assert_eq!(cards.recomputations(), 2);
}

#[test]
fn field_selectors_sharing_a_resolver_keep_separate_caches() {
    let resolver = SliceSelector::<Deck>::new();
    let cards = Memoized::new(&resolver, |d| d.cards.clone());
    let loading = Memoized::new(&resolver, |d| d.loading);
    let state = StateTree::new().with_slice(deck(&["A"], false));

    cards.select(&state);
    cards.select(&state);
    loading.select(&state);

    assert_eq!(cards.recomputations(), 1);
    assert_eq!(loading.recomputations(), 1);
}

#[test]
fn reset_forces_recompute() {
    let cards = create_selector(SliceSelector::<Deck>::new(), |d| d.cards.len());
    let state = StateTree::new().with_slice(deck(&["A"], false));

    cards.select(&state);
    cards.reset();
    cards.select(&state);

    assert_eq!(cards.recomputations(), 2);
}

#[test]
fn mismatched_slice_type_reads_default() {
    let loading = Memoized::new(SliceSelector::<Deck>::new(), |d| d.loading);
    let state = StateTree::new().with_slice(NotADeck);

    assert!(*loading.select(&state));
}

#[test]
fn memoized_selectors_compose() {
    let cards = Memoized::new(SliceSelector::<Deck>::new(), |d| d.cards.clone());
    let count = Memoized::new(&cards, |cards| cards.len());
    let t1 = StateTree::new().with_slice(deck(&["A", "B"], false));
    let t2 = t1.with_slice(Score(3));

    assert_eq!(*count.select(&t1), 2);
    assert_eq!(*count.select(&t2), 2);
    assert_eq!(count.recomputations(), 1);
}

#[test]
fn combined_selector_tracks_both_inputs() {
    let total = Combined::new(SliceSelector::<Deck>::new(), SliceSelector::<Score>::new(), |d, s| {
        u32::try_from(d.cards.len()).unwrap_or(u32::MAX) + s.0
    });
    let t1 = StateTree::new().with_slice(deck(&["A"], false)).with_slice(Score(10));

    assert_eq!(*total.select(&t1), 11);
    assert_eq!(*total.select(&t1), 11);
    assert_eq!(total.recomputations(), 1);

    let t2 = t1.with_slice(Score(20));
    assert_eq!(*total.select(&t2), 21);
    assert_eq!(total.recomputations(), 2);
}
