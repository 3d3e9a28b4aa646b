use spotifeat::Error;
use spotifeat::ranking::*;
use spotifeat::types::ScoredItem;

fn list(items: &[&str]) -> RankedList {
    RankedList::new(items.iter().copied()).unwrap()
}

fn scored(id: &str, score: i64) -> ScoredItem {
    ScoredItem {
        item_id: id.to_string(),
        score,
    }
}

#[test]
fn test_aggregate_sums_window_contributions() {
    let short = list(&[]);
    let medium = list(&["b"]);
    let long = list(&["a", "b", "c"]);

    let result = aggregate(&short, &medium, &long, WindowWeights::default());

    assert_eq!(
        result,
        vec![scored("b", 199), scored("a", 100), scored("c", 98)]
    );
}

#[test]
fn test_aggregate_empty_windows() {
    let empty = RankedList::empty();
    let result = aggregate(&empty, &empty, &empty, WindowWeights::default());
    assert!(result.is_empty());
}

#[test]
fn test_top_of_every_window_scores_300() {
    let window = list(&["x", "y"]);
    let result = aggregate(&window, &window, &window, WindowWeights::default());

    assert_eq!(result[0], scored("x", 300));
    assert_eq!(result[1], scored("y", 297));
}

#[test]
fn test_union_collapses_duplicates_across_windows() {
    let short = list(&["a", "b"]);
    let medium = list(&["b", "c"]);
    let long = list(&["c", "a"]);

    let result = aggregate(&short, &medium, &long, WindowWeights::default());

    assert_eq!(result.len(), 3);
    let mut ids: Vec<&str> = result.iter().map(|s| s.item_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_scores_do_not_depend_on_window_order() {
    let a = list(&["a", "b", "c"]);
    let b = list(&["c", "d"]);
    let c = list(&["d", "a", "e"]);

    let forward = aggregate(&a, &b, &c, WindowWeights::default());
    let backward = aggregate(&c, &b, &a, WindowWeights::default());

    let mut forward_scores: Vec<(String, i64)> =
        forward.into_iter().map(|s| (s.item_id, s.score)).collect();
    let mut backward_scores: Vec<(String, i64)> =
        backward.into_iter().map(|s| (s.item_id, s.score)).collect();
    forward_scores.sort();
    backward_scores.sort();

    assert_eq!(forward_scores, backward_scores);
}

#[test]
fn test_ties_keep_first_seen_order() {
    // p and q both score 100, r and s both score 99
    let short = list(&["q", "s"]);
    let medium = list(&[]);
    let long = list(&["p", "r"]);

    let result = aggregate(&short, &medium, &long, WindowWeights::default());
    let ids: Vec<&str> = result.iter().map(|s| s.item_id.as_str()).collect();

    assert_eq!(ids, vec!["q", "p", "s", "r"]);
}

#[test]
fn test_aggregate_is_deterministic() {
    let short = list(&["a", "b", "c", "d"]);
    let medium = list(&["d", "c", "b", "a"]);
    let long = list(&["b", "d"]);

    let first = aggregate(&short, &medium, &long, WindowWeights::default());
    for _ in 0..10 {
        assert_eq!(aggregate(&short, &medium, &long, WindowWeights::default()), first);
    }
}

#[test]
fn test_window_weights_scale_contributions() {
    let short = list(&["a"]);
    let medium = list(&["b"]);
    let long = list(&["a", "c"]);

    let weights = WindowWeights {
        short: 1,
        medium: 3,
        long: 2,
    };
    let result = aggregate(&short, &medium, &long, weights);

    assert_eq!(
        result,
        vec![scored("a", 300), scored("b", 300), scored("c", 198)]
    );
}

#[test]
fn test_extreme_weights_keep_ordering() {
    let short = list(&["a", "b"]);
    let medium = list(&["b"]);
    let long = list(&["a", "c"]);

    let weights = WindowWeights {
        short: u32::MAX,
        medium: u32::MAX,
        long: u32::MAX,
    };
    let result = aggregate(&short, &medium, &long, weights);

    let max = i64::from(u32::MAX);
    assert_eq!(
        result,
        vec![
            scored("a", 200 * max),
            scored("b", 199 * max),
            scored("c", 99 * max),
        ]
    );
}

#[test]
fn test_zero_weight_mutes_window() {
    let short = list(&["a"]);
    let medium = list(&["b"]);
    let long = RankedList::empty();

    let weights = WindowWeights {
        short: 0,
        medium: 1,
        long: 1,
    };
    let result = aggregate(&short, &medium, &long, weights);

    assert_eq!(result, vec![scored("b", 100), scored("a", 0)]);
}

#[test]
fn test_default_weights_are_one() {
    assert_eq!(
        WindowWeights::default(),
        WindowWeights {
            short: 1,
            medium: 1,
            long: 1
        }
    );
}

#[test]
fn test_aggregate_leaves_inputs_untouched() {
    let short = list(&["c", "b", "a"]);
    let medium = list(&["a"]);
    let long = list(&["b"]);
    let before = (short.clone(), medium.clone(), long.clone());

    let _ = aggregate(&short, &medium, &long, WindowWeights::default());

    assert_eq!((short, medium, long), before);
}

#[test]
fn test_full_windows() {
    let ids: Vec<String> = (0..50).map(|i| format!("t{i}")).collect();
    let window = RankedList::new(ids.clone()).unwrap();
    let empty = RankedList::empty();

    let result = aggregate(&window, &empty, &empty, WindowWeights::default());

    assert_eq!(result.len(), 50);
    assert_eq!(result[0], scored("t0", 100));
    assert_eq!(result[49], scored("t49", 51));
}

#[test]
fn test_ranked_list_rejects_duplicates() {
    let err = RankedList::new(["a", "b", "a"]).unwrap_err();

    match err {
        Error::AggregationInput {
            item_id,
            first,
            second,
        } => {
            assert_eq!(item_id, "a");
            assert_eq!(first, 0);
            assert_eq!(second, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_ranked_list_rank_of() {
    let window = list(&["a", "b", "c"]);
    assert_eq!(window.rank_of("c"), Some(2));
    assert_eq!(window.rank_of("z"), None);
    assert_eq!(window.len(), 3);
    assert!(!window.is_empty());
}
